//! Sparkle Studio Engine
//!
//! Platform-agnostic core logic for Sparkle Studio, a kids' creative studio
//! with dress-up, glam, brick building and sticker panels that all feed one
//! reward ledger. This crate has no UI or browser dependencies; storage and
//! time are injected through [`StudioStorage`] and [`Clock`].

pub mod bricks;
pub mod catalog;
pub mod clock;
pub mod constants;
pub mod dress;
pub mod glam;
pub mod goals;
pub mod grid;
pub mod ledger;
pub mod prefs;
pub mod stickers;
pub mod storage;
pub mod studio;
pub mod views;

// Re-export commonly used types
pub use bricks::{BRICK_COLORS, BrickMode, BrickWorkshop, TapEffect};
pub use catalog::{BADGES, BadgeId, BadgeSpec, MISSIONS, MissionId, MissionSpec};
#[cfg(not(target_arch = "wasm32"))]
pub use clock::SystemClock;
pub use clock::{Clock, ManualClock};
pub use dress::{Accessories, Accessory, DressLook, HairStyle, Outfit, Shoes};
pub use glam::{GlamLook, MakeupTool};
pub use goals::{BrickGoal, GoalOutcome, evaluate_goal};
pub use grid::{BrickGrid, GridShapeError};
pub use ledger::{Award, RewardLedger, TaskCompletion, Unlocks};
pub use prefs::Preferences;
pub use stickers::{PlacedSticker, RoomBackground, STICKERS, StickerRoom};
pub use storage::{MemoryStorage, StorageError, StudioStorage};
pub use studio::{ActionReport, SavedSlots, Studio, StudioState};
pub use views::{BadgeRow, BrickStats, MissionRow, badge_rows, brick_stats, mission_rows};

use constants::{
    ALL_KEYS, FIRST_VISIT_KEY, PREFS_KEY, SAVED_GLAM_KEY, SAVED_LOOK_KEY, SAVED_ROOM_KEY,
    STATE_KEY,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Loads and saves studio sessions through a storage backend.
pub struct StudioEngine<S, C>
where
    S: StudioStorage,
    C: Clock + Clone,
{
    storage: S,
    clock: C,
}

impl<S, C> StudioEngine<S, C>
where
    S: StudioStorage,
    C: Clock + Clone,
{
    /// Create a new engine with the provided storage and clock
    pub const fn new(storage: S, clock: C) -> Self {
        Self { storage, clock }
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Restore a studio from storage. Missing, unreadable or corrupt entries
    /// fall back to defaults so the studio always opens.
    pub fn open(&self, seed: u64) -> Studio<C> {
        let mut state: StudioState = self.read_json(STATE_KEY).unwrap_or_default();
        if self.read_json::<bool>(FIRST_VISIT_KEY).unwrap_or(false) {
            state.first_visit_done = true;
        }
        let saved = SavedSlots {
            look: self.read_json(SAVED_LOOK_KEY),
            glam: self.read_json(SAVED_GLAM_KEY),
            room: self.read_json(SAVED_ROOM_KEY),
        };
        let prefs = self.read_json(PREFS_KEY).unwrap_or_default();
        log::debug!(
            "opened studio: {} points, {} missions done",
            state.ledger.points(),
            state.ledger.completed_count()
        );
        Studio::new(state, saved, prefs, seed, self.clock.clone())
    }

    /// Write the state blob, preferences and saved slots.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be serialized or the backend
    /// rejects a write.
    pub fn try_save(&self, studio: &Studio<C>) -> Result<(), StorageError> {
        self.write_json(STATE_KEY, studio.state())?;
        if studio.state().first_visit_done {
            self.write_json(FIRST_VISIT_KEY, &true)?;
        }
        self.write_json(PREFS_KEY, studio.prefs())?;
        let saved = studio.saved();
        self.write_slot(SAVED_LOOK_KEY, saved.look.as_ref())?;
        self.write_slot(SAVED_GLAM_KEY, saved.glam.as_ref())?;
        self.write_slot(SAVED_ROOM_KEY, saved.room.as_ref())?;
        Ok(())
    }

    /// Save, logging instead of failing. Returns whether the save succeeded.
    pub fn persist(&self, studio: &Studio<C>) -> bool {
        match self.try_save(studio) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("failed to persist studio: {err}");
                false
            }
        }
    }

    /// Remove every studio key and reset the in-memory session. The
    /// first-visit marker stays behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects a removal. The session is
    /// reset either way.
    pub fn reset(&self, studio: &mut Studio<C>) -> Result<(), StorageError> {
        studio.reset_all();
        for key in ALL_KEYS {
            self.storage.remove(key).map_err(backend)?;
        }
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.read(key) {
            Ok(raw) => raw?,
            Err(err) => {
                log::warn!("failed to read {key}: {err}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("discarding corrupt {key}: {err}");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        self.storage.write(key, &json).map_err(backend)
    }

    fn write_slot<T: Serialize>(&self, key: &str, value: Option<&T>) -> Result<(), StorageError> {
        match value {
            Some(value) => self.write_json(key, value),
            None => self.storage.remove(key).map_err(backend),
        }
    }
}

fn backend<E: std::error::Error>(err: E) -> StorageError {
    StorageError::Backend(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> StudioEngine<MemoryStorage, ManualClock> {
        StudioEngine::new(MemoryStorage::new(), ManualClock::starting_at(1_000))
    }

    #[test]
    fn empty_storage_opens_defaults() {
        let engine = engine();
        let studio = engine.open(1);
        assert_eq!(studio.state(), &StudioState::default());
        assert_eq!(studio.saved(), &SavedSlots::default());
        assert_eq!(studio.prefs(), &Preferences::default());
    }

    #[test]
    fn save_then_open_round_trips_session() {
        let engine = engine();
        let mut studio = engine.open(1);
        studio.welcome();
        studio.set_outfit(Outfit::Lego);
        studio.save_look();
        studio.place_sticker("🧁", 40.0, 60.0);
        studio.tap_cell(20);
        studio.toggle_narration();
        engine.try_save(&studio).unwrap();

        let reopened = engine.open(2);
        assert_eq!(reopened.state(), studio.state());
        assert_eq!(reopened.saved(), studio.saved());
        assert!(!reopened.prefs().narration);
        assert!(engine.storage().read(SAVED_GLAM_KEY).unwrap().is_none());
    }

    #[test]
    fn corrupt_blob_falls_back_to_defaults() {
        let engine = engine();
        engine.storage().write(STATE_KEY, "{not json").unwrap();
        engine.storage().write(SAVED_LOOK_KEY, "\"nope\"").unwrap();
        let studio = engine.open(1);
        assert_eq!(studio.state(), &StudioState::default());
        assert!(studio.saved().look.is_none());
    }

    #[test]
    fn short_grid_is_rejected_as_corrupt() {
        let engine = engine();
        engine
            .storage()
            .write(STATE_KEY, r#"{"points":12,"grid":[null,null]}"#)
            .unwrap();
        let studio = engine.open(1);
        assert_eq!(studio.ledger().points(), 0);
    }

    #[test]
    fn partial_blob_keeps_known_fields() {
        let engine = engine();
        engine
            .storage()
            .write(STATE_KEY, r#"{"points":12,"completed":{"hair":true}}"#)
            .unwrap();
        let studio = engine.open(1);
        assert_eq!(studio.ledger().points(), 12);
        assert!(studio.ledger().is_done(MissionId::Hair));
        assert!(studio.state().bricks.grid.is_empty());
    }

    #[test]
    fn reset_removes_every_key() {
        let engine = engine();
        let mut studio = engine.open(1);
        studio.welcome();
        studio.save_glam();
        studio.save_room();
        assert!(engine.persist(&studio));
        assert!(!engine.storage().is_empty());

        engine.reset(&mut studio).unwrap();
        assert_eq!(engine.storage().len(), 1);
        assert_eq!(
            engine.storage().read(FIRST_VISIT_KEY).unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(studio.ledger().points(), 0);
    }

    #[test]
    fn first_visit_bonus_is_not_paid_again_after_reset() {
        let engine = engine();
        let mut studio = engine.open(1);
        assert_eq!(studio.welcome().points, 8);
        studio.tap_cell(0);
        assert!(engine.persist(&studio));

        engine.reset(&mut studio).unwrap();
        let mut reopened = engine.open(2);
        assert!(reopened.state().first_visit_done);
        let report = reopened.welcome();
        assert_eq!(report.points, 0);
        assert!(report.unlocked.is_empty());
        assert_eq!(reopened.ledger().points(), 0);
        assert_eq!(reopened.ledger().unlocked_count(), 0);
    }
}
