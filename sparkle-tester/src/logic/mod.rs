pub mod reports;
pub mod scenarios;
pub mod session;
pub mod storage;
pub mod tester;

pub use scenarios::{SCENARIOS, get_scenario, list_scenarios};
pub use tester::*;
