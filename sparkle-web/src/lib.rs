#![forbid(unsafe_code)]
//! Browser bindings for Sparkle Studio.
//!
//! The page's own script renders the panels; this crate owns the studio
//! session, persists it to `localStorage` after every action and hands
//! reports and snapshots back as plain JS objects.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod bridge;
pub mod clock;
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod facade;
pub mod storage;

pub use bridge::{BridgeError, StudioAction, StudioBridge, StudioSnapshot};
pub use clock::JsClock;
pub use storage::{LocalStorageBackend, WebStorageError};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
