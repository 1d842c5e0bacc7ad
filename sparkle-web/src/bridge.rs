//! Platform-neutral glue between page events and the studio session.
//!
//! Every action goes through [`StudioBridge::dispatch`], which runs it,
//! saves the session and returns the report. The wasm facade is a thin
//! wrapper over this type, so everything here is testable natively.
use serde::{Deserialize, Serialize};
use sparkle_game::{
    Accessory, ActionReport, BadgeRow, BrickMode, BrickStats, Clock, HairStyle, MakeupTool,
    MissionRow, Outfit, Preferences, RoomBackground, Shoes, StorageError, Studio, StudioEngine,
    StudioState, StudioStorage, badge_rows, brick_stats, mission_rows,
};

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Invalid action: {0}")]
    InvalidAction(#[from] serde_json::Error),
}

/// One user gesture from the page, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StudioAction {
    SetHair { hair: HairStyle },
    SetOutfit { outfit: Outfit },
    SetShoes { shoes: Shoes },
    ToggleAccessory { accessory: Accessory },
    RandomLook,
    SaveLook,
    LoadLook,
    SelectTool { tool: MakeupTool },
    ApplyColor { color: String },
    RandomGlam,
    ClearGlam,
    SaveGlam,
    LoadGlam,
    SelectBrickColor { color: String },
    SetBrickMode { mode: BrickMode },
    TapCell { index: usize },
    ClearBricks,
    NewGoal,
    PlaceSticker { emoji: String, x: f64, y: f64 },
    MoveSticker { index: usize, x: f64, y: f64 },
    SetBackground { bg: RoomBackground },
    ClearStickers,
    SaveRoom,
    LoadRoom,
    ResetMissions,
    ToggleSound,
    ToggleNarration,
}

/// Everything the page needs to redraw.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioSnapshot<'a> {
    pub state: &'a StudioState,
    pub prefs: &'a Preferences,
    pub missions: Vec<MissionRow>,
    pub badges: Vec<BadgeRow>,
    pub bricks: BrickStats,
    pub has_saved_look: bool,
    pub has_saved_glam: bool,
    pub has_saved_room: bool,
}

pub struct StudioBridge<S, C>
where
    S: StudioStorage,
    C: Clock + Clone,
{
    engine: StudioEngine<S, C>,
    studio: Studio<C>,
    welcome: ActionReport,
}

impl<S, C> StudioBridge<S, C>
where
    S: StudioStorage,
    C: Clock + Clone,
{
    /// Load the saved session, run the welcome check and save the result.
    pub fn open(storage: S, clock: C, seed: u64) -> Self {
        let engine = StudioEngine::new(storage, clock);
        let mut studio = engine.open(seed);
        let welcome = studio.welcome();
        engine.persist(&studio);
        Self {
            engine,
            studio,
            welcome,
        }
    }

    /// Report produced when the session opened.
    #[must_use]
    pub const fn welcome_report(&self) -> &ActionReport {
        &self.welcome
    }

    #[must_use]
    pub const fn studio(&self) -> &Studio<C> {
        &self.studio
    }

    #[must_use]
    pub const fn engine(&self) -> &StudioEngine<S, C> {
        &self.engine
    }

    #[must_use]
    pub fn snapshot(&self) -> StudioSnapshot<'_> {
        let state = self.studio.state();
        let saved = self.studio.saved();
        StudioSnapshot {
            state,
            prefs: self.studio.prefs(),
            missions: mission_rows(&state.ledger),
            badges: badge_rows(&state.ledger),
            bricks: brick_stats(&state.bricks),
            has_saved_look: saved.look.is_some(),
            has_saved_glam: saved.glam.is_some(),
            has_saved_room: saved.room.is_some(),
        }
    }

    /// Run `action` and persist the session.
    pub fn dispatch(&mut self, action: StudioAction) -> ActionReport {
        let report = self.apply(action);
        self.engine.persist(&self.studio);
        report
    }

    /// Decode a JSON action and dispatch it.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not a known action.
    pub fn dispatch_json(&mut self, raw: &str) -> Result<ActionReport, BridgeError> {
        let action: StudioAction = serde_json::from_str(raw)?;
        Ok(self.dispatch(action))
    }

    /// Wipe every saved key and start over with zero points. The welcome
    /// bonus is not paid again.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses to remove or write a key.
    pub fn reset(&mut self) -> Result<ActionReport, BridgeError> {
        self.engine.reset(&mut self.studio)?;
        self.engine.try_save(&self.studio)?;
        Ok(self.note("Everything reset. Fresh start!"))
    }

    fn note(&self, message: impl Into<String>) -> ActionReport {
        ActionReport {
            message: message.into(),
            total_points: self.studio.ledger().points(),
            ..ActionReport::default()
        }
    }

    fn apply(&mut self, action: StudioAction) -> ActionReport {
        let studio = &mut self.studio;
        match action {
            StudioAction::SetHair { hair } => studio.set_hair(hair),
            StudioAction::SetOutfit { outfit } => studio.set_outfit(outfit),
            StudioAction::SetShoes { shoes } => studio.set_shoes(shoes),
            StudioAction::ToggleAccessory { accessory } => studio.toggle_accessory(accessory),
            StudioAction::RandomLook => studio.random_look(),
            StudioAction::SaveLook => studio.save_look(),
            StudioAction::LoadLook => studio.load_look(),
            StudioAction::SelectTool { tool } => studio.select_tool(tool),
            StudioAction::ApplyColor { color } => studio.apply_color(&color),
            StudioAction::RandomGlam => studio.random_glam(),
            StudioAction::ClearGlam => studio.clear_glam(),
            StudioAction::SaveGlam => studio.save_glam(),
            StudioAction::LoadGlam => studio.load_glam(),
            StudioAction::SelectBrickColor { color } => {
                studio.select_brick_color(&color);
                self.note("Color selected!")
            }
            StudioAction::SetBrickMode { mode } => {
                studio.set_brick_mode(mode);
                let message = match mode {
                    BrickMode::Place => "Place mode",
                    BrickMode::Erase => "Erase mode",
                };
                self.note(message)
            }
            StudioAction::TapCell { index } => studio.tap_cell(index),
            StudioAction::ClearBricks => studio.clear_bricks(),
            StudioAction::NewGoal => studio.new_goal(),
            StudioAction::PlaceSticker { emoji, x, y } => studio.place_sticker(&emoji, x, y),
            StudioAction::MoveSticker { index, x, y } => {
                let moved = studio.move_sticker(index, x, y);
                if !moved {
                    log::debug!("ignored move for missing sticker {index}");
                }
                self.note(if moved { "Moved!" } else { "" })
            }
            StudioAction::SetBackground { bg } => studio.set_room_background(bg),
            StudioAction::ClearStickers => studio.clear_stickers(),
            StudioAction::SaveRoom => studio.save_room(),
            StudioAction::LoadRoom => studio.load_room(),
            StudioAction::ResetMissions => studio.reset_missions(),
            StudioAction::ToggleSound => {
                let on = studio.toggle_sound();
                self.note(if on { "Sound on" } else { "Sound off" })
            }
            StudioAction::ToggleNarration => {
                let on = studio.toggle_narration();
                self.note(if on { "Voice on" } else { "Voice off" })
            }
        }
    }
}
