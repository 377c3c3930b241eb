//! Browser bindings
//!
//! `RafScheduler` drives frames from `requestAnimationFrame`; `WebGame` is
//! the object the JS front end holds. Rendering, audio and backgrounds stay
//! in JS and read `snapshotJson()` / `drainEventsJson()` every frame.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::driver::{FrameCallback, FrameHandle, FrameScheduler, GameLoop};
use crate::error::SchedulerError;
use crate::sim::GameSession;

/// Module entry: logging and panic reporting to the browser console
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Candle Flap starting...");
}

/// `requestAnimationFrame`-backed frame clock
pub struct RafScheduler {
    window: web_sys::Window,
}

impl RafScheduler {
    pub fn new() -> Result<Self, SchedulerError> {
        let window =
            web_sys::window().ok_or_else(|| SchedulerError::Unavailable("no window".into()))?;
        Ok(Self { window })
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, SchedulerError> {
        // Frees itself after running; a cancelled one is leaked, which is the
        // documented cost of once_into_js
        let closure = Closure::once_into_js(move |time: f64| callback(time));
        self.window
            .request_animation_frame(closure.unchecked_ref())
            .map(FrameHandle)
            .map_err(|e| SchedulerError::Unavailable(format!("{:?}", e)))
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }
}

/// JS-facing game handle
#[wasm_bindgen]
pub struct WebGame {
    game: GameLoop<RafScheduler>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create an idle game. `easy` picks the gentler preset.
    #[wasm_bindgen(constructor)]
    pub fn new(easy: bool) -> Result<WebGame, JsValue> {
        let config = if easy {
            GameConfig::easy()
        } else {
            GameConfig::default()
        };
        Self::build(config)
    }

    /// Create an idle game from a JSON config
    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: &str) -> Result<WebGame, JsValue> {
        let config = GameConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::build(config)
    }

    fn build(config: GameConfig) -> Result<WebGame, JsValue> {
        let seed = js_sys::Date::now() as u64;
        let session =
            GameSession::new(config, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let scheduler = RafScheduler::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Game created with seed: {}", seed);
        Ok(WebGame {
            game: GameLoop::new(session, scheduler),
        })
    }

    pub fn start(&self) {
        self.game.start();
    }

    pub fn jump(&self) -> bool {
        self.game.jump()
    }

    /// Start if not playing, otherwise jump
    pub fn press(&self) {
        self.game.press();
    }

    /// Cancel the pending frame (teardown)
    pub fn stop(&self) {
        self.game.stop();
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        self.game.snapshot().to_json()
    }

    #[wasm_bindgen(js_name = drainEventsJson)]
    pub fn drain_events_json(&self) -> String {
        serde_json::to_string(&self.game.drain_events()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Call `callback(snapshotJson)` after every tick
    #[wasm_bindgen(js_name = onFrame)]
    pub fn on_frame(&self, callback: js_sys::Function) {
        self.game.set_frame_observer(move |snapshot| {
            let json = JsValue::from_str(&snapshot.to_json());
            if let Err(e) = callback.call1(&JsValue::NULL, &json) {
                log::warn!("Frame callback threw: {:?}", e);
            }
        });
    }
}
