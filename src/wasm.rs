//! Browser bindings
//!
//! JavaScript owns the `requestAnimationFrame` loop, keyboard listeners and
//! canvas drawing. Each frame it pushes the held keys, calls `advance` and
//! paints the JSON snapshot it gets back.

use wasm_bindgen::prelude::*;

use crate::sim::{GameState, TickInput, advance};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Nova Strike (wasm) loaded");
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A game session driven from JavaScript
#[wasm_bindgen]
pub struct WebSession {
    state: GameState,
    input: TickInput,
}

#[wasm_bindgen]
impl WebSession {
    /// Session seeded from the wall clock
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebSession {
        Self::with_seed(js_sys::Date::now())
    }

    /// Session with an explicit seed (JS numbers are f64)
    pub fn with_seed(seed: f64) -> WebSession {
        WebSession {
            state: GameState::new(seed as u64),
            input: TickInput::default(),
        }
    }

    /// Session with tuning overrides given as JSON
    pub fn with_tuning(tuning_json: &str, seed: f64) -> Result<WebSession, JsValue> {
        let tuning = Tuning::from_json(tuning_json).map_err(to_js)?;
        Ok(WebSession {
            state: GameState::with_tuning(tuning, seed as u64).map_err(to_js)?,
            input: TickInput::default(),
        })
    }

    pub fn start(&mut self) {
        self.state.start();
    }

    /// Restart with a fresh clock seed
    pub fn reset(&mut self) {
        self.state.reset_with_seed(js_sys::Date::now() as u64);
        self.input = TickInput::default();
    }

    pub fn set_input(&mut self, left: bool, right: bool, fire: bool) {
        self.input = TickInput { left, right, fire };
    }

    /// Advance one frame and return the snapshot as JSON
    pub fn advance(&mut self, dt_ms: f32) -> Result<String, JsValue> {
        let snapshot = advance(&mut self.state, &self.input, dt_ms);
        serde_json::to_string(&snapshot).map_err(to_js)
    }
}

impl Default for WebSession {
    fn default() -> Self {
        Self::new()
    }
}
