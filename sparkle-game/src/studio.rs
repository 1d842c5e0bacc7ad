//! The studio session: one object owning every panel's state.
//!
//! UI handlers never write fields directly. Each user action is one method
//! here, which mutates state, routes rewards through the ledger and returns
//! an [`ActionReport`] for the view layer to display.
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::bricks::{BrickMode, BrickWorkshop};
use crate::catalog::{BadgeId, MissionId};
use crate::clock::Clock;
use crate::constants::{
    FIRST_VISIT_BONUS, GRID_CELLS, LOAD_REWARD, RANDOMIZE_REWARD, ROOM_LOAD_REWARD, SAVE_REWARD,
    STICKER_BADGE_COUNT, STICKER_MISSION_COUNT, TAP_REWARD, TOWER_BADGE_HEIGHT, TOWER_GOAL_HEIGHT,
};
use crate::dress::{Accessory, DressLook, HairStyle, Outfit, Shoes};
use crate::glam::{GlamLook, MakeupTool};
use crate::goals::{BrickGoal, GoalOutcome, evaluate_goal};
use crate::ledger::{RewardLedger, Unlocks};
use crate::prefs::Preferences;
use crate::stickers::{PlacedSticker, RoomBackground, StickerRoom};

/// The persisted studio blob.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioState {
    #[serde(flatten)]
    pub ledger: RewardLedger,
    #[serde(flatten)]
    pub bricks: BrickWorkshop,
    #[serde(default)]
    pub dress: DressLook,
    #[serde(default)]
    pub glam: GlamLook,
    #[serde(default)]
    pub stickers: StickerRoom,
    #[serde(default)]
    pub first_visit_done: bool,
}

/// User-saved snapshots, each persisted under its own key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SavedSlots {
    pub look: Option<DressLook>,
    pub glam: Option<GlamLook>,
    pub room: Option<Vec<PlacedSticker>>,
}

/// What one user action did, for the view layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionReport {
    pub message: String,
    /// Points credited by this action.
    pub points: u32,
    pub total_points: u32,
    pub completed: SmallVec<[MissionId; 4]>,
    pub unlocked: Unlocks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<GoalOutcome>,
}

impl ActionReport {
    #[must_use]
    pub fn unlocked_badge(&self, id: BadgeId) -> bool {
        self.unlocked.contains(&id)
    }

    #[must_use]
    pub fn completed_mission(&self, id: MissionId) -> bool {
        self.completed.contains(&id)
    }
}

/// Accumulates ledger side effects while an action runs.
struct Tally {
    before: u32,
    completed: SmallVec<[MissionId; 4]>,
    unlocked: Unlocks,
    goal: Option<GoalOutcome>,
}

pub struct Studio<C: Clock> {
    state: StudioState,
    saved: SavedSlots,
    prefs: Preferences,
    rng: ChaCha20Rng,
    clock: C,
}

impl<C: Clock> Studio<C> {
    #[must_use]
    pub fn new(
        state: StudioState,
        saved: SavedSlots,
        prefs: Preferences,
        seed: u64,
        clock: C,
    ) -> Self {
        Self {
            state,
            saved,
            prefs,
            rng: ChaCha20Rng::seed_from_u64(seed),
            clock,
        }
    }

    /// A brand-new studio with default state.
    #[must_use]
    pub fn fresh(seed: u64, clock: C) -> Self {
        Self::new(
            StudioState::default(),
            SavedSlots::default(),
            Preferences::default(),
            seed,
            clock,
        )
    }

    #[must_use]
    pub const fn state(&self) -> &StudioState {
        &self.state
    }

    #[must_use]
    pub const fn ledger(&self) -> &RewardLedger {
        &self.state.ledger
    }

    #[must_use]
    pub const fn saved(&self) -> &SavedSlots {
        &self.saved
    }

    #[must_use]
    pub const fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    // Reward plumbing ------------------------------------------------------

    fn begin(&self) -> Tally {
        Tally {
            before: self.state.ledger.points(),
            completed: SmallVec::new(),
            unlocked: Unlocks::new(),
            goal: None,
        }
    }

    fn finish(&self, tally: Tally, message: impl Into<String>) -> ActionReport {
        let total_points = self.state.ledger.points();
        ActionReport {
            message: message.into(),
            points: total_points.saturating_sub(tally.before),
            total_points,
            completed: tally.completed,
            unlocked: tally.unlocked,
            goal: tally.goal,
        }
    }

    fn reward(&mut self, delta: i64) {
        self.state.ledger.add_points(delta);
    }

    fn complete(&mut self, tally: &mut Tally, id: MissionId) {
        let at = self.clock.now_millis();
        let outcome = self.state.ledger.complete_task(id, at);
        if !outcome.already_done {
            tally.completed.push(id);
        }
        tally.unlocked.extend(outcome.milestones);
    }

    fn unlock(&mut self, tally: &mut Tally, id: BadgeId) {
        let at = self.clock.now_millis();
        if self.state.ledger.unlock_achievement(id, at) {
            tally.unlocked.push(id);
        }
    }

    fn check_look(&mut self, tally: &mut Tally) {
        for badge in self.state.dress.combo_badges() {
            self.unlock(tally, badge);
        }
    }

    fn check_tower(&mut self, tally: &mut Tally) {
        let tallest = self.state.bricks.grid.tallest_column();
        if tallest >= TOWER_GOAL_HEIGHT {
            self.complete(tally, MissionId::Tower8);
        }
        if tallest >= TOWER_BADGE_HEIGHT {
            self.unlock(tally, BadgeId::Tower);
        }
    }

    fn check_glam(&mut self, tally: &mut Tally) {
        if self.state.glam.is_full() {
            self.complete(tally, MissionId::GlamFull);
            self.unlock(tally, BadgeId::Glam);
        }
    }

    // Session ----------------------------------------------------------------

    /// Run once when the studio opens: first-visit bonus, missions implied by
    /// restored state and any milestone the restored ledger already earns.
    pub fn welcome(&mut self) -> ActionReport {
        let mut tally = self.begin();
        if !self.state.first_visit_done {
            self.state.first_visit_done = true;
            self.reward(FIRST_VISIT_BONUS);
            self.unlock(&mut tally, BadgeId::Welcome);
        }
        if !self.state.bricks.grid.is_empty() {
            self.complete(&mut tally, MissionId::BrickPlace);
            self.check_tower(&mut tally);
        }
        let at = self.clock.now_millis();
        let milestones = self.state.ledger.award_milestones(at);
        tally.unlocked.extend(milestones);
        self.finish(tally, "Welcome! Pick a tab and have fun 💖")
    }

    /// Clear missions only; points and badges stay.
    pub fn reset_missions(&mut self) -> ActionReport {
        let tally = self.begin();
        self.state.ledger.reset_missions();
        self.finish(tally, "Missions reset!")
    }

    /// Forget everything, including saved slots and preferences. The
    /// first-visit flag is kept so the welcome bonus is never paid twice.
    pub fn reset_all(&mut self) {
        self.state = StudioState {
            first_visit_done: self.state.first_visit_done,
            ..StudioState::default()
        };
        self.saved = SavedSlots::default();
        self.prefs = Preferences::default();
    }

    pub const fn toggle_sound(&mut self) -> bool {
        self.prefs.toggle_sound()
    }

    pub const fn toggle_narration(&mut self) -> bool {
        self.prefs.toggle_narration()
    }

    // Dress-up ---------------------------------------------------------------

    pub fn set_hair(&mut self, hair: HairStyle) -> ActionReport {
        let mut tally = self.begin();
        self.state.dress.hair = hair;
        self.reward(TAP_REWARD);
        self.complete(&mut tally, MissionId::Hair);
        self.check_look(&mut tally);
        self.finish(tally, format!("Hair: {hair}!"))
    }

    pub fn set_outfit(&mut self, outfit: Outfit) -> ActionReport {
        let mut tally = self.begin();
        self.state.dress.outfit = outfit;
        self.reward(TAP_REWARD);
        self.complete(&mut tally, MissionId::Outfit);
        self.check_look(&mut tally);
        self.finish(tally, format!("Outfit: {outfit}!"))
    }

    pub fn set_shoes(&mut self, shoes: Shoes) -> ActionReport {
        let mut tally = self.begin();
        self.state.dress.shoes = shoes;
        self.reward(TAP_REWARD);
        self.check_look(&mut tally);
        self.finish(tally, format!("Shoes: {shoes}!"))
    }

    pub fn toggle_accessory(&mut self, acc: Accessory) -> ActionReport {
        let mut tally = self.begin();
        let on = self.state.dress.toggle(acc);
        self.reward(TAP_REWARD);
        self.complete(&mut tally, MissionId::Acc);
        self.check_look(&mut tally);
        let label = if on { "on" } else { "off" };
        self.finish(tally, format!("{acc} {label}!"))
    }

    pub fn random_look(&mut self) -> ActionReport {
        let mut tally = self.begin();
        self.state.dress.randomize(&mut self.rng);
        self.reward(RANDOMIZE_REWARD);
        self.check_look(&mut tally);
        self.finish(tally, "Random look created! ✨")
    }

    pub fn save_look(&mut self) -> ActionReport {
        let mut tally = self.begin();
        self.saved.look = Some(self.state.dress);
        self.reward(SAVE_REWARD);
        self.complete(&mut tally, MissionId::SaveLook);
        self.finish(tally, "Saved your look!")
    }

    pub fn load_look(&mut self) -> ActionReport {
        let mut tally = self.begin();
        let Some(look) = self.saved.look else {
            return self.finish(tally, "No saved look yet. Try Save Look!");
        };
        self.state.dress = look;
        self.reward(LOAD_REWARD);
        self.check_look(&mut tally);
        self.finish(tally, "Loaded your saved look!")
    }

    // Glam -------------------------------------------------------------------

    pub fn select_tool(&mut self, tool: MakeupTool) -> ActionReport {
        let mut tally = self.begin();
        self.state.glam.tool = tool;
        self.complete(&mut tally, MissionId::GlamTool);
        self.finish(tally, format!("Tool: {tool}"))
    }

    /// Apply `color` with the currently selected tool.
    pub fn apply_color(&mut self, color: &str) -> ActionReport {
        let mut tally = self.begin();
        let tool = self.state.glam.tool;
        self.state.glam.apply(tool, color);
        self.reward(TAP_REWARD);
        self.complete(&mut tally, MissionId::GlamColor);
        self.check_glam(&mut tally);
        self.finish(tally, format!("{tool} set!"))
    }

    pub fn random_glam(&mut self) -> ActionReport {
        let mut tally = self.begin();
        self.state.glam.randomize(&mut self.rng);
        self.reward(RANDOMIZE_REWARD);
        self.check_glam(&mut tally);
        self.finish(tally, "Random glam created!")
    }

    pub fn clear_glam(&mut self) -> ActionReport {
        let tally = self.begin();
        self.state.glam.clear();
        self.finish(tally, "Cleared. Try new colors!")
    }

    pub fn save_glam(&mut self) -> ActionReport {
        let tally = self.begin();
        self.saved.glam = Some(self.state.glam.clone());
        self.reward(SAVE_REWARD);
        self.finish(tally, "Saved glam look!")
    }

    pub fn load_glam(&mut self) -> ActionReport {
        let mut tally = self.begin();
        let Some(glam) = self.saved.glam.clone() else {
            return self.finish(tally, "No saved glam yet. Try Save!");
        };
        self.state.glam = glam;
        self.reward(LOAD_REWARD);
        self.check_glam(&mut tally);
        self.finish(tally, "Loaded saved glam!")
    }

    // Bricks -----------------------------------------------------------------

    pub fn select_brick_color(&mut self, color: &str) {
        self.state.bricks.brick_color = color.to_string();
    }

    pub const fn set_brick_mode(&mut self, mode: BrickMode) {
        self.state.bricks.brick_mode = mode;
    }

    /// Apply the current brick tool to a cell, then check tower progress and
    /// the active goal.
    pub fn tap_cell(&mut self, index: usize) -> ActionReport {
        let mut tally = self.begin();
        if index >= GRID_CELLS {
            return self.finish(tally, "That square is off the board.");
        }
        let effect = self.state.bricks.tap(index);
        if effect.changed_occupancy() {
            self.reward(TAP_REWARD);
        }
        if self.state.bricks.brick_mode == BrickMode::Place {
            self.complete(&mut tally, MissionId::BrickPlace);
        }
        self.check_tower(&mut tally);

        let goal_was_done = self.state.ledger.is_done(MissionId::BrickGoal);
        let at = self.clock.now_millis();
        let bricks = &mut self.state.bricks;
        let outcome = evaluate_goal(
            &mut bricks.active_goal,
            &bricks.grid,
            &mut self.state.ledger,
            at,
            &mut self.rng,
        );
        if let GoalOutcome::Completed { goal, unlocked, .. } = &outcome {
            if !goal_was_done {
                tally.completed.push(MissionId::BrickGoal);
            }
            tally.unlocked.extend(unlocked.iter().copied());
            log::debug!("goal {goal} paid out");
        }
        let message = outcome.message();
        tally.goal = Some(outcome);
        self.finish(tally, message)
    }

    pub fn clear_bricks(&mut self) -> ActionReport {
        let tally = self.begin();
        self.state.bricks.grid.clear();
        self.finish(tally, "Cleared! Build something new 🧱")
    }

    /// Swap in a random goal; it may repeat the current one.
    pub fn new_goal(&mut self) -> ActionReport {
        let tally = self.begin();
        let goal = BrickGoal::random(&mut self.rng);
        self.state.bricks.active_goal = goal;
        self.finish(tally, format!("New Goal: {goal}!"))
    }

    // Stickers ---------------------------------------------------------------

    fn place_one(&mut self, tally: &mut Tally, emoji: &str, x: f64, y: f64) {
        let count = self.state.stickers.place(emoji, x, y);
        self.reward(TAP_REWARD);
        if count >= STICKER_MISSION_COUNT {
            self.complete(tally, MissionId::Stickers10);
        }
        if count >= STICKER_BADGE_COUNT {
            self.unlock(tally, BadgeId::Decorator);
        }
    }

    pub fn place_sticker(&mut self, emoji: &str, x: f64, y: f64) -> ActionReport {
        let mut tally = self.begin();
        self.place_one(&mut tally, emoji, x, y);
        self.complete(&mut tally, MissionId::StickerPlace);
        self.finish(tally, "Sticker placed! ⭐")
    }

    /// Record where a dragged sticker was dropped.
    pub fn move_sticker(&mut self, index: usize, x: f64, y: f64) -> bool {
        self.state.stickers.move_to(index, x, y)
    }

    pub fn set_room_background(&mut self, bg: RoomBackground) -> ActionReport {
        let tally = self.begin();
        self.state.stickers.bg = bg;
        self.finish(tally, "Background changed! Keep decorating 💖")
    }

    pub fn clear_stickers(&mut self) -> ActionReport {
        let tally = self.begin();
        self.state.stickers.clear();
        self.finish(tally, "Cleared! Decorate again!")
    }

    pub fn save_room(&mut self) -> ActionReport {
        let mut tally = self.begin();
        self.saved.room = Some(self.state.stickers.placed.clone());
        self.reward(SAVE_REWARD);
        self.complete(&mut tally, MissionId::StickerSave);
        self.finish(tally, "Saved your room!")
    }

    /// Replace the room with the saved stickers, placing each one again.
    pub fn load_room(&mut self) -> ActionReport {
        let mut tally = self.begin();
        let Some(saved) = self.saved.room.clone() else {
            return self.finish(tally, "No saved room yet. Try Save Room!");
        };
        self.state.stickers.clear();
        for sticker in &saved {
            self.place_one(&mut tally, &sticker.emoji, sticker.x, sticker.y);
        }
        self.reward(ROOM_LOAD_REWARD);
        self.finish(tally, "Loaded your saved room!")
    }
}
