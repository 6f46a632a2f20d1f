//! Browser bindings
//!
//! A `LevelHandle` owns a streamer and its store; the page calls `advance`
//! once per frame with the camera x and reads records back as JSON.

use wasm_bindgen::prelude::*;

use crate::config::LevelConfig;
use crate::level::{ChunkGenerator, ChunkStreamer, LevelStore};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("levelgen ready");
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Streamed level owned by the page
#[wasm_bindgen]
pub struct LevelHandle {
    streamer: ChunkStreamer,
    store: LevelStore,
}

impl LevelHandle {
    fn with_config(config: LevelConfig) -> Result<LevelHandle, JsValue> {
        let generator = ChunkGenerator::new(config).map_err(js_error)?;
        Ok(Self {
            streamer: ChunkStreamer::from_generator(generator),
            store: LevelStore::new(),
        })
    }
}

#[wasm_bindgen]
impl LevelHandle {
    /// Handle for a named preset ("runner" or "side-scroller")
    #[wasm_bindgen(constructor)]
    pub fn new(preset: &str) -> Result<LevelHandle, JsValue> {
        let config = LevelConfig::preset(preset).map_err(js_error)?;
        Self::with_config(config)
    }

    /// Handle for a JSON config (missing fields take runner defaults)
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<LevelHandle, JsValue> {
        let config = LevelConfig::from_json(json).map_err(js_error)?;
        Self::with_config(config)
    }

    /// Stream around `camera_x`; returns the number of chunks generated
    pub fn advance(&mut self, camera_x: f64) -> u32 {
        self.streamer.advance(camera_x, &mut self.store).generated
    }

    /// Restart the level from chunk 0
    pub fn reset(&mut self) {
        self.streamer.reset();
        self.store.clear();
    }

    #[wasm_bindgen(js_name = platformsJson)]
    pub fn platforms_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.store.platforms()).map_err(js_error)
    }

    #[wasm_bindgen(js_name = pickupsJson)]
    pub fn pickups_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.store.pickups()).map_err(js_error)
    }

    /// Content of one chunk, regenerated from its index
    #[wasm_bindgen(js_name = chunkJson)]
    pub fn chunk_json(&self, index: u32) -> Result<String, JsValue> {
        serde_json::to_string(&self.streamer.generator().generate(index)).map_err(js_error)
    }
}
