//! WASM API exports for JavaScript interop
//!
//! This module provides `#[wasm_bindgen]` exports for starting the plane demo
//! from JavaScript. It is only compiled when targeting wasm32.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::prelude::*;

use crate::core::{GridConfig, PlaneSettings};
use crate::runtime::run_plane;

fn to_js(report: error_stack::Report<crate::PlaneError>) -> JsValue {
    JsValue::from_str(&format!("{report:?}"))
}

/// JavaScript-accessible handle to the demo
#[wasm_bindgen]
pub struct JsPlane {
    settings: PlaneSettings,
    /// Canvas ID for rendering
    canvas_id: String,
    started: bool,
}

#[wasm_bindgen]
impl JsPlane {
    /// Create a new JsPlane from JSON settings.
    ///
    /// # Arguments
    /// * `json` - JSON settings; `"{}"` uses every default
    /// * `canvas_id` - HTML canvas element ID (without #)
    #[wasm_bindgen(constructor)]
    pub fn new(json: &str, canvas_id: &str) -> Result<JsPlane, JsValue> {
        let settings = PlaneSettings::from_json(json).map_err(to_js)?;

        Ok(JsPlane {
            settings,
            canvas_id: canvas_id.to_string(),
            started: false,
        })
    }

    /// Set the plane size and resolution used at startup.
    #[wasm_bindgen]
    pub fn set_grid(
        &mut self,
        width: f32,
        height: f32,
        width_segments: u32,
        height_segments: u32,
    ) -> Result<(), JsValue> {
        if self.started {
            web_sys::console::warn_1(&"Grid changes after start() use the on-screen panel".into());
            return Ok(());
        }

        let mut candidate = self.settings.clone();
        candidate.grid = GridConfig {
            width,
            height,
            width_segments,
            height_segments,
            ..candidate.grid
        };
        candidate.validate().map_err(to_js)?;
        self.settings = candidate;
        Ok(())
    }

    /// Current settings as JSON.
    #[wasm_bindgen]
    pub fn settings_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.settings)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize settings: {}", e)))
    }

    /// Start the Bevy render loop. Only the first call has an effect.
    #[wasm_bindgen]
    pub fn start(&mut self) {
        if self.started {
            web_sys::console::warn_1(&"Plane already started".into());
            return;
        }

        self.started = true;
        run_plane(self.settings.clone(), &self.canvas_id);
    }
}
