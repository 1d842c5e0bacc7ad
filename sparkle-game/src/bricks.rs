//! Brick builder workshop: grid, tool mode, selected color and active goal.
use serde::{Deserialize, Serialize};

use crate::goals::BrickGoal;
use crate::grid::BrickGrid;

pub const BRICK_COLORS: [&str; 8] = [
    "#ff4fd8", "#fb7185", "#a78bfa", "#60a5fa", "#34d399", "#fbbf24", "#f97316", "#ffffff",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BrickMode {
    #[default]
    Place,
    Erase,
}

fn default_color() -> String {
    BRICK_COLORS[0].to_string()
}

/// What a single tap did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapEffect {
    Placed { was_empty: bool },
    Erased { was_filled: bool },
}

impl TapEffect {
    /// Only taps that change occupancy earn a point.
    #[must_use]
    pub const fn changed_occupancy(self) -> bool {
        match self {
            Self::Placed { was_empty } => was_empty,
            Self::Erased { was_filled } => was_filled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrickWorkshop {
    #[serde(default)]
    pub grid: BrickGrid,
    #[serde(default)]
    pub active_goal: BrickGoal,
    #[serde(default)]
    pub brick_mode: BrickMode,
    #[serde(default = "default_color")]
    pub brick_color: String,
}

impl Default for BrickWorkshop {
    fn default() -> Self {
        Self {
            grid: BrickGrid::default(),
            active_goal: BrickGoal::default(),
            brick_mode: BrickMode::default(),
            brick_color: default_color(),
        }
    }
}

impl BrickWorkshop {
    /// Apply the current tool to `index`.
    pub fn tap(&mut self, index: usize) -> TapEffect {
        match self.brick_mode {
            BrickMode::Place => TapEffect::Placed {
                was_empty: self.grid.place(index, &self.brick_color),
            },
            BrickMode::Erase => TapEffect::Erased {
                was_filled: self.grid.erase(index),
            },
        }
    }
}
