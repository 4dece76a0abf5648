//! Score store settings
//!
//! Defaults match the layout every puzzle game in the bank already reads, so a
//! store built with `StoreSettings::default()` shares its data with them.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_NAME, MAX_NAME_CHARS, MAX_PER_GAME, STORAGE_KEY};
use crate::entry::normalize_name;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Key the whole database is stored under
    pub storage_key: String,
    /// Entries kept per game board
    pub max_per_game: usize,
    /// Longest stored player name, in characters
    pub max_name_chars: usize,
    /// Name used when a player leaves theirs blank
    pub default_name: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            max_per_game: MAX_PER_GAME,
            max_name_chars: MAX_NAME_CHARS,
            default_name: DEFAULT_NAME.to_string(),
        }
    }
}

impl StoreSettings {
    /// Default settings under a different storage key
    pub fn with_storage_key(key: impl Into<String>) -> Self {
        Self {
            storage_key: key.into(),
            ..Self::default()
        }
    }

    /// Name as it will be stored
    pub fn display_name_for(&self, name: Option<&str>) -> String {
        normalize_name(name, self.max_name_chars, &self.default_name)
    }
}
