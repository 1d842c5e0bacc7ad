//! `wasm-bindgen` surface exposed to the page script.
use serde::Serialize;
use sparkle_game::{BRICK_COLORS, MakeupTool, STICKERS, badge_rows, mission_rows};
use wasm_bindgen::prelude::*;

use crate::bridge::{StudioAction, StudioBridge};
use crate::clock::JsClock;
use crate::dom;
use crate::storage::LocalStorageBackend;

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn entropy_seed() -> u64 {
    let noise = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (js_sys::Date::now() as u64).rotate_left(17) ^ noise
}

#[wasm_bindgen]
pub struct SparkleStudio {
    bridge: StudioBridge<LocalStorageBackend, JsClock>,
}

#[wasm_bindgen]
impl SparkleStudio {
    /// Open the saved studio (or a fresh one) and run the first-visit check.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            bridge: StudioBridge::open(LocalStorageBackend, JsClock, entropy_seed()),
        }
    }

    /// Open with a fixed seed for reproducible randomize buttons.
    #[wasm_bindgen(js_name = withSeed)]
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            bridge: StudioBridge::open(LocalStorageBackend, JsClock, seed),
        }
    }

    /// Run one action object such as `{ type: "tapCell", index: 42 }`.
    ///
    /// # Errors
    /// Returns an error if the object is not a known action.
    pub fn dispatch(&mut self, action: JsValue) -> Result<JsValue, JsValue> {
        let action: StudioAction = serde_wasm_bindgen::from_value(action).map_err(|err| {
            let message = format!("Invalid action: {err}");
            dom::console_error(&message);
            JsValue::from_str(&message)
        })?;
        to_js(&self.bridge.dispatch(action))
    }

    /// # Errors
    /// Returns an error if the snapshot cannot be converted to a JS value.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.bridge.snapshot())
    }

    /// # Errors
    /// Returns an error if the rows cannot be converted to a JS value.
    pub fn missions(&self) -> Result<JsValue, JsValue> {
        to_js(&mission_rows(self.bridge.studio().ledger()))
    }

    /// # Errors
    /// Returns an error if the rows cannot be converted to a JS value.
    pub fn badges(&self) -> Result<JsValue, JsValue> {
        to_js(&badge_rows(self.bridge.studio().ledger()))
    }

    /// # Errors
    /// Returns an error if the report cannot be converted to a JS value.
    #[wasm_bindgen(js_name = welcomeReport)]
    pub fn welcome_report(&self) -> Result<JsValue, JsValue> {
        to_js(self.bridge.welcome_report())
    }

    /// Clear every saved key and start over.
    ///
    /// # Errors
    /// Returns an error if `localStorage` refuses the reset.
    pub fn reset(&mut self) -> Result<JsValue, JsValue> {
        let report = self
            .bridge
            .reset()
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        to_js(&report)
    }

    /// # Errors
    /// Returns an error if the list cannot be converted to a JS value.
    #[wasm_bindgen(js_name = brickColors)]
    pub fn brick_colors() -> Result<JsValue, JsValue> {
        to_js(&BRICK_COLORS)
    }

    /// # Errors
    /// Returns an error if the list cannot be converted to a JS value.
    pub fn stickers() -> Result<JsValue, JsValue> {
        to_js(&STICKERS)
    }

    /// Swatches for `tool`, e.g. `"lips"`.
    ///
    /// # Errors
    /// Returns an error for an unknown tool name.
    pub fn palette(tool: JsValue) -> Result<JsValue, JsValue> {
        let tool: MakeupTool = serde_wasm_bindgen::from_value(tool)?;
        to_js(tool.palette())
    }
}

impl Default for SparkleStudio {
    fn default() -> Self {
        Self::new()
    }
}
