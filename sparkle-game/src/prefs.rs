//! Sound and narration preferences, stored apart from the studio blob so a
//! mission reset never touches them.
use serde::{Deserialize, Serialize};

const fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "enabled")]
    pub sound: bool,
    #[serde(default = "enabled")]
    pub narration: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sound: true,
            narration: true,
        }
    }
}

impl Preferences {
    pub const fn toggle_sound(&mut self) -> bool {
        self.sound = !self.sound;
        self.sound
    }

    pub const fn toggle_narration(&mut self) -> bool {
        self.narration = !self.narration;
        self.narration
    }
}
