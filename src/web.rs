//! JavaScript bindings
//!
//! `ScoreBank` mirrors the page-level score API the puzzle games call. Results
//! cross the boundary as JSON strings so pages can `JSON.parse` them directly.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::consts::MAX_PER_GAME;
use crate::entry::{Level, ScoreCandidate};
use crate::platform::{self, LocalStorage};
use crate::store::ScoreStore;

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Numbers and strings are kept; anything else is dropped
fn level_from_js(level: &JsValue) -> Option<Level> {
    level
        .as_f64()
        .map(Level::from)
        .or_else(|| level.as_string().map(Level::from))
}

#[wasm_bindgen]
pub struct ScoreBank {
    store: ScoreStore<LocalStorage>,
}

#[wasm_bindgen]
impl ScoreBank {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ScoreBank, JsValue> {
        platform::init_logging();
        let storage = LocalStorage::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Score bank ready");
        Ok(Self {
            store: ScoreStore::new(storage),
        })
    }

    /// Returns `{"isHighScore": bool, "rank": number}`
    #[wasm_bindgen(js_name = addScore)]
    pub fn add_score(
        &mut self,
        game_id: &str,
        name: Option<String>,
        score: f64,
        level: JsValue,
    ) -> Result<String, JsValue> {
        let candidate = ScoreCandidate {
            name,
            score,
            level: level_from_js(&level),
        };
        to_json(&self.store.add_score(game_id, candidate))
    }

    #[wasm_bindgen(js_name = getScores)]
    pub fn get_scores(&self, game_id: &str, n: Option<u32>) -> Result<String, JsValue> {
        let n = n.map_or(MAX_PER_GAME, |n| n as usize);
        to_json(&self.store.get_top_scores(game_id, n))
    }

    /// `null` when the game has no scores
    #[wasm_bindgen(js_name = getBest)]
    pub fn get_best(&self, game_id: &str) -> Result<String, JsValue> {
        to_json(&self.store.get_best(game_id))
    }

    #[wasm_bindgen(js_name = getGlobalTop)]
    pub fn get_global_top(&self, n: Option<u32>) -> Result<String, JsValue> {
        let n = n.map_or(MAX_PER_GAME, |n| n as usize);
        to_json(&self.store.get_global_top_n(n))
    }
}
