//! Centralized reward and tuning constants for Sparkle Studio.
//!
//! Point values, thresholds and grid geometry live here so that the reward
//! economy can only change through reviewed code, never through stored data.

// Storage keys -------------------------------------------------------------
pub const STATE_KEY: &str = "sparkle.state";
pub const PREFS_KEY: &str = "sparkle.prefs";
pub const SAVED_LOOK_KEY: &str = "sparkle.saved-look";
pub const SAVED_GLAM_KEY: &str = "sparkle.saved-glam";
pub const SAVED_ROOM_KEY: &str = "sparkle.saved-room";
/// Set once the first-visit bonus is paid. Not part of [`ALL_KEYS`], so it
/// outlives a full reset.
pub const FIRST_VISIT_KEY: &str = "sparkle.first";

/// Every key the studio writes; a full reset removes all of them.
pub const ALL_KEYS: [&str; 5] = [
    STATE_KEY,
    PREFS_KEY,
    SAVED_LOOK_KEY,
    SAVED_GLAM_KEY,
    SAVED_ROOM_KEY,
];

// Ledger -------------------------------------------------------------------
pub(crate) const BADGE_BONUS: u32 = 5;
pub(crate) const MILESTONE_STARTER: usize = 4;
pub(crate) const MILESTONE_HERO: usize = 8;
pub(crate) const FIRST_VISIT_BONUS: i64 = 3;

// Per-action rewards -------------------------------------------------------
pub(crate) const TAP_REWARD: i64 = 1;
pub(crate) const RANDOMIZE_REWARD: i64 = 2;
pub(crate) const SAVE_REWARD: i64 = 2;
pub(crate) const LOAD_REWARD: i64 = 1;
pub(crate) const ROOM_LOAD_REWARD: i64 = 2;

// Brick grid ---------------------------------------------------------------
pub const GRID_SIDE: usize = 12;
pub const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;
pub(crate) const GRID_CENTER: (usize, usize) = (6, 6);
pub(crate) const TOWER_GOAL_HEIGHT: u32 = 8;
pub(crate) const TOWER_BADGE_HEIGHT: u32 = 10;
pub(crate) const RAINBOW_MIN_RUN: usize = 5;
pub(crate) const TOWER_GOAL_REWARD: u32 = 4;
pub(crate) const HEART_GOAL_REWARD: u32 = 5;
pub(crate) const RAINBOW_GOAL_REWARD: u32 = 6;

/// `(row, col)` offsets from the grid center that outline a heart.
pub(crate) const HEART_OFFSETS: [(isize, isize); 9] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (0, -2),
    (0, 2),
    (1, -1),
    (1, 1),
    (2, 0),
];

// Stickers -----------------------------------------------------------------
pub(crate) const STICKER_MISSION_COUNT: usize = 10;
pub(crate) const STICKER_BADGE_COUNT: usize = 15;
