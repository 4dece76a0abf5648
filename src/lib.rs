//! Puzzle Bank scores - per-game leaderboards kept in browser LocalStorage
//!
//! Core modules:
//! - `entry`: Score entries and the candidates games submit
//! - `board`: Sorted, capped game boards and the score database
//! - `store`: Load/save over a key-value store, ranking and leaderboards
//! - `platform`: Browser/native storage backends and logging
//! - `games`: Display names for the bank's games

pub mod board;
pub mod clock;
pub mod entry;
pub mod games;
pub mod platform;
pub mod settings;
pub mod store;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use board::{GameBoard, ScoreDatabase};
pub use clock::{Clock, FixedClock, SystemClock};
pub use entry::{GlobalEntry, Level, ScoreCandidate, ScoreEntry};
pub use games::{KnownGame, display_name};
pub use platform::{KeyValueStore, MemoryStorage, StorageError};
pub use settings::StoreSettings;
pub use store::{AddScoreOutcome, ScoreStore};

/// Storage layout constants
pub mod consts {
    /// LocalStorage key holding every game's board
    pub const STORAGE_KEY: &str = "puzzlebank_scores";
    /// Entries kept per game, and the default leaderboard length
    pub const MAX_PER_GAME: usize = 10;
    /// Longest stored player name, in characters
    pub const MAX_NAME_CHARS: usize = 20;
    /// Stored when a player leaves the name blank
    pub const DEFAULT_NAME: &str = "Anonymous";
    /// Ranks 1..=3 count as a high score
    pub const HIGH_SCORE_RANKS: usize = 3;
}
