//! Known puzzle games and their display names

/// Games shipped with the puzzle bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownGame {
    Sequence,
    Memory,
    Anagram,
    Arithmetic,
}

impl KnownGame {
    pub const ALL: [KnownGame; 4] = [
        KnownGame::Sequence,
        KnownGame::Memory,
        KnownGame::Anagram,
        KnownGame::Arithmetic,
    ];

    /// Identifier used as the storage key for this game's board
    pub fn id(&self) -> &'static str {
        match self {
            KnownGame::Sequence => "sequence",
            KnownGame::Memory => "memory",
            KnownGame::Anagram => "anagram",
            KnownGame::Arithmetic => "arithmetic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            KnownGame::Sequence => "Number Sequence",
            KnownGame::Memory => "Memory Grid",
            KnownGame::Anagram => "Anagram",
            KnownGame::Arithmetic => "Arithmetic",
        }
    }

    /// Exact, case-sensitive match on the identifier
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|game| game.id() == id)
    }
}

/// Display name for a game id; unknown ids are shown as-is
pub fn display_name(game_id: &str) -> &str {
    KnownGame::from_id(game_id).map_or(game_id, |game| game.display_name())
}
