use sparkle_game::Clock;

/// Browser wall clock via `Date.now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsClock;

impl Clock for JsClock {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn now_millis(&self) -> u64 {
        js_sys::Date::now().max(0.0) as u64
    }
}
