//! Score store
//!
//! Every operation reads the whole database from storage. Writes rebuild the
//! affected board and store the whole database again under one key.
//!
//! Reads never fail: a missing, unreadable or malformed blob is an empty
//! database. Nothing here locks, so two writers sharing the same storage (two
//! browser tabs) can lose one of two simultaneous additions.

use serde::{Deserialize, Serialize};

use crate::board::ScoreDatabase;
use crate::clock::{Clock, SystemClock};
use crate::consts::{HIGH_SCORE_RANKS, MAX_PER_GAME};
use crate::entry::{GlobalEntry, ScoreCandidate, ScoreEntry};
use crate::platform::{KeyValueStore, StorageError};
use crate::settings::StoreSettings;

/// Result of submitting a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddScoreOutcome {
    /// Placed in the top three
    pub is_high_score: bool,
    /// 1-indexed board position, 0 if the score didn't make the board
    pub rank: usize,
}

impl AddScoreOutcome {
    pub fn from_rank(rank: usize) -> Self {
        Self {
            is_high_score: (1..=HIGH_SCORE_RANKS).contains(&rank),
            rank,
        }
    }
}

pub struct ScoreStore<S: KeyValueStore, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    settings: StoreSettings,
}

impl<S: KeyValueStore> ScoreStore<S, SystemClock> {
    /// Store with default settings, dated by the system clock
    pub fn new(storage: S) -> Self {
        Self::with_settings(storage, SystemClock, StoreSettings::default())
    }
}

impl<S: KeyValueStore, C: Clock> ScoreStore<S, C> {
    pub fn with_clock(storage: S, clock: C) -> Self {
        Self::with_settings(storage, clock, StoreSettings::default())
    }

    pub fn with_settings(storage: S, clock: C, settings: StoreSettings) -> Self {
        Self {
            storage,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Read the database, or an empty one if nothing usable is stored
    pub fn load(&self) -> ScoreDatabase {
        let key = &self.settings.storage_key;
        match self.storage.get(key) {
            Ok(Some(json)) => match ScoreDatabase::from_json(&json) {
                Ok(db) => {
                    log::debug!("Loaded scores for {} games", db.games().count());
                    db
                }
                Err(e) => {
                    log::warn!("Ignoring malformed scores under {key:?}: {e}");
                    ScoreDatabase::new()
                }
            },
            Ok(None) => {
                log::debug!("No scores under {key:?}, starting fresh");
                ScoreDatabase::new()
            }
            Err(e) => {
                log::warn!("Could not read scores under {key:?}: {e}");
                ScoreDatabase::new()
            }
        }
    }

    /// Overwrite the stored database
    pub fn try_save(&mut self, db: &ScoreDatabase) -> Result<(), StorageError> {
        let json = db.to_json()?;
        self.storage.set(&self.settings.storage_key, &json)?;
        log::debug!("Scores saved ({} bytes)", json.len());
        Ok(())
    }

    /// Overwrite the stored database, logging rather than returning failures
    pub fn save(&mut self, db: &ScoreDatabase) {
        if let Err(e) = self.try_save(db) {
            log::warn!("Failed to save scores: {e}");
        }
    }

    /// Record a finished run and report where it placed.
    ///
    /// The rank is looked up by (score, name, date), so an identical earlier play
    /// from the same day reports its own position instead.
    pub fn add_score(&mut self, game_id: &str, candidate: ScoreCandidate) -> AddScoreOutcome {
        let mut db = self.load();
        let entry = ScoreEntry::from_candidate(candidate, &self.settings, self.clock.date_stamp());
        let rank = db
            .board_mut(game_id)
            .insert(entry, self.settings.max_per_game);
        self.save(&db);

        let outcome = AddScoreOutcome::from_rank(rank);
        if outcome.is_high_score {
            log::info!("New high score for {game_id}: rank {rank}");
        }
        outcome
    }

    /// Full board for a game, best first
    pub fn get_scores(&self, game_id: &str) -> Vec<ScoreEntry> {
        self.get_top_scores(game_id, self.settings.max_per_game)
    }

    /// Best `n` entries for a game; empty for unknown games
    pub fn get_top_scores(&self, game_id: &str, n: usize) -> Vec<ScoreEntry> {
        self.load()
            .board(game_id)
            .map(|board| board.top(n).to_vec())
            .unwrap_or_default()
    }

    pub fn get_best(&self, game_id: &str) -> Option<ScoreEntry> {
        self.get_top_scores(game_id, 1).into_iter().next()
    }

    /// Top ten entries across every game
    pub fn get_global_top(&self) -> Vec<GlobalEntry> {
        self.get_global_top_n(MAX_PER_GAME)
    }

    pub fn get_global_top_n(&self, n: usize) -> Vec<GlobalEntry> {
        self.load().global_top(n)
    }

    /// Check if a score would make the game's board right now
    pub fn qualifies(&self, game_id: &str, score: f64) -> bool {
        let cap = self.settings.max_per_game;
        match self.load().board(game_id) {
            Some(board) => board.qualifies(score, cap),
            None => cap > 0,
        }
    }

    /// Game ids with a board, in stored order
    pub fn games(&self) -> Vec<String> {
        self.load().games().map(str::to_string).collect()
    }

    /// Drop one game's board. Returns whether it existed.
    pub fn clear(&mut self, game_id: &str) -> bool {
        let mut db = self.load();
        if db.remove(game_id).is_none() {
            return false;
        }
        self.save(&db);
        log::info!("Cleared scores for {game_id}");
        true
    }

    /// Drop every board. Returns whether anything was stored.
    pub fn clear_all(&mut self) -> bool {
        let had_scores = !self.load().is_empty();
        self.save(&ScoreDatabase::new());
        if had_scores {
            log::info!("Cleared all scores");
        }
        had_scores
    }
}
