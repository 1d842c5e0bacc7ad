//! Brick goal rotation.
//!
//! Exactly one goal is active at a time. Meeting it pays out, unlocks the
//! goal badge and hands over to one of the other two goals at random.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{BadgeId, MissionId};
use crate::constants::{
    HEART_GOAL_REWARD, RAINBOW_GOAL_REWARD, RAINBOW_MIN_RUN, TOWER_GOAL_HEIGHT, TOWER_GOAL_REWARD,
};
use crate::grid::BrickGrid;
use crate::ledger::{RewardLedger, Unlocks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BrickGoal {
    #[default]
    Tower,
    Heart,
    Rainbow,
}

impl BrickGoal {
    pub const ALL: [Self; 3] = [Self::Tower, Self::Heart, Self::Rainbow];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tower => "Tower",
            Self::Heart => "Heart",
            Self::Rainbow => "Rainbow",
        }
    }

    #[must_use]
    pub fn is_met(self, grid: &BrickGrid) -> bool {
        match self {
            Self::Tower => grid.tallest_column() >= TOWER_GOAL_HEIGHT,
            Self::Heart => grid.matches_heart(),
            Self::Rainbow => grid.matches_horizontal_run(RAINBOW_MIN_RUN),
        }
    }

    #[must_use]
    pub const fn reward(self) -> u32 {
        match self {
            Self::Tower => TOWER_GOAL_REWARD,
            Self::Heart => HEART_GOAL_REWARD,
            Self::Rainbow => RAINBOW_GOAL_REWARD,
        }
    }

    #[must_use]
    pub const fn badge(self) -> BadgeId {
        match self {
            Self::Tower => BadgeId::GoalTower,
            Self::Heart => BadgeId::Heart,
            Self::Rainbow => BadgeId::Rainbow,
        }
    }

    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Tower => "Build higher! Try reaching 8 blocks tall.",
            Self::Heart => "Try to make a heart near the center 💖",
            Self::Rainbow => "Make a rainbow stripe somewhere 🌈",
        }
    }

    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Tower => "Goal complete: Tall Tower! 🎉",
            Self::Heart => "Goal complete: Heart! 💖",
            Self::Rainbow => "Goal complete: Rainbow! 🌈",
        }
    }

    #[must_use]
    pub fn others(self) -> [Self; 2] {
        match self {
            Self::Tower => [Self::Heart, Self::Rainbow],
            Self::Heart => [Self::Tower, Self::Rainbow],
            Self::Rainbow => [Self::Tower, Self::Heart],
        }
    }

    /// Pick the follow-up goal uniformly from the two other goals.
    pub fn next_after<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        self.others().choose(rng).copied().unwrap_or(Self::Tower)
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL.choose(rng).copied().unwrap_or_default()
    }
}

impl fmt::Display for BrickGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum GoalOutcome {
    Completed {
        goal: BrickGoal,
        next: BrickGoal,
        /// Ledger delta: goal reward, the brick-goal mission and any badges.
        points: u32,
        unlocked: Unlocks,
    },
    Pending {
        goal: BrickGoal,
    },
}

impl GoalOutcome {
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Completed { goal, .. } => goal.success_message(),
            Self::Pending { goal } => goal.hint(),
        }
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Check `active` against `grid`; on success pay out through `ledger` and
/// rotate `active` to a different goal.
pub fn evaluate_goal<R: Rng + ?Sized>(
    active: &mut BrickGoal,
    grid: &BrickGrid,
    ledger: &mut RewardLedger,
    at: u64,
    rng: &mut R,
) -> GoalOutcome {
    let goal = *active;
    if !goal.is_met(grid) {
        return GoalOutcome::Pending { goal };
    }

    let before = ledger.points();
    ledger.add_points(i64::from(goal.reward()));
    let mut unlocked = ledger.complete_task(MissionId::BrickGoal, at).milestones;
    if ledger.unlock_achievement(goal.badge(), at) {
        unlocked.push(goal.badge());
    }
    let next = goal.next_after(rng);
    *active = next;
    log::debug!("brick goal {goal} complete, next {next}");

    GoalOutcome::Completed {
        goal,
        next,
        points: ledger.points() - before,
        unlocked,
    }
}
