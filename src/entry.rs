//! Score entries
//!
//! One row of a game board, plus the caller-supplied candidate it is built from.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::settings::StoreSettings;

/// Largest integer a JS number holds exactly (2^53)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Game-defined progress metric: a number for most games, free text for others
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Level {
    Number(#[serde(serialize_with = "serialize_number")] f64),
    Text(String),
}

impl From<u32> for Level {
    fn from(level: u32) -> Self {
        Level::Number(level as f64)
    }
}

impl From<f64> for Level {
    fn from(level: f64) -> Self {
        Level::Number(level)
    }
}

impl From<&str> for Level {
    fn from(level: &str) -> Self {
        Level::Text(level.to_string())
    }
}

impl From<String> for Level {
    fn from(level: String) -> Self {
        Level::Text(level)
    }
}

/// A stored score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Display name (already defaulted and truncated)
    pub name: String,
    /// Non-finite scores are written as `null` and read back as 0
    #[serde(serialize_with = "serialize_number", deserialize_with = "deserialize_score")]
    pub score: f64,
    /// Older blobs may omit the level entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    /// UTC calendar date, `YYYY-MM-DD`
    pub date: String,
}

impl ScoreEntry {
    /// Build an entry from a candidate. The date is supplied by the caller's clock.
    pub fn from_candidate(
        candidate: ScoreCandidate,
        settings: &StoreSettings,
        date: String,
    ) -> Self {
        Self {
            name: settings.display_name_for(candidate.name.as_deref()),
            score: candidate.score,
            level: candidate.level,
            date,
        }
    }

    /// Rank lookup key. Level is deliberately not part of it.
    pub(crate) fn same_play(&self, other: &ScoreEntry) -> bool {
        self.score == other.score && self.name == other.name && self.date == other.date
    }
}

/// What a game submits when a run ends
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreCandidate {
    pub name: Option<String>,
    pub score: f64,
    pub level: Option<Level>,
}

impl ScoreCandidate {
    pub fn new(name: impl Into<String>, score: f64, level: impl Into<Level>) -> Self {
        Self {
            name: Some(name.into()),
            score,
            level: Some(level.into()),
        }
    }

    /// Candidate with no player name (stored under the default name)
    pub fn anonymous(score: f64, level: impl Into<Level>) -> Self {
        Self {
            name: None,
            score,
            level: Some(level.into()),
        }
    }
}

/// An entry from the cross-game leaderboard, tagged with its game's display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalEntry {
    #[serde(flatten)]
    pub entry: ScoreEntry,
    pub game: String,
}

/// Missing or empty names fall back to `default_name`; others keep at most
/// `max_chars` characters.
pub fn normalize_name(name: Option<&str>, max_chars: usize, default_name: &str) -> String {
    let name = match name {
        Some(name) if !name.is_empty() => name,
        _ => default_name,
    };
    name.chars().take(max_chars).collect()
}

/// Whole numbers are written without a fractional part, the way a browser's
/// `JSON.stringify` writes them.
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// `null` is what `JSON.stringify` leaves for NaN and infinities. A browser's
/// score sort treats it as 0, so it loads as 0 rather than failing the blob.
fn deserialize_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
