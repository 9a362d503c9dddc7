//! Session state and core round types
//!
//! Everything here is plain data. Transitions live in [`super::machine`].

use serde::{Deserialize, Serialize};

use super::scene::ItemId;

/// Play style selected at session start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameMode {
    /// Find the difference, three lives, no guess timer
    Classic,
    /// Race against a guess-phase countdown
    Timed,
    /// No observation timer at all
    Zen,
    /// Two second peek, one life
    Blitz,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Classic,
        GameMode::Timed,
        GameMode::Zen,
        GameMode::Blitz,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Timed => "Timed",
            GameMode::Zen => "Zen",
            GameMode::Blitz => "Blitz",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "timed" => Some(GameMode::Timed),
            "zen" => Some(GameMode::Zen),
            "blitz" => Some(GameMode::Blitz),
            _ => None,
        }
    }

    /// Whether the guess phase runs against a countdown
    pub fn has_guess_timer(&self) -> bool {
        matches!(self, GameMode::Timed)
    }
}

/// Current step of the round state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Main menu, no session
    Menu,
    /// Theme browser, no session
    Themes,
    /// Scene visible, player memorizes it
    Observe,
    /// Scene hidden while the change is applied
    Locked,
    /// Mutated scene visible, waiting for a pick
    Guess,
    /// Correct pick acknowledged, next round pending
    Result,
    /// Session over
    GameOver,
}

impl GamePhase {
    /// Phases that belong to a running session
    pub fn in_session(&self) -> bool {
        matches!(
            self,
            GamePhase::Observe | GamePhase::Locked | GamePhase::Guess | GamePhase::Result
        )
    }
}

/// Per-session counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSession {
    pub mode: GameMode,
    /// Starts at 1, +1 per correct guess
    pub level: u32,
    pub score: u64,
    pub lives: u8,
}

impl RoundSession {
    pub fn new(mode: GameMode, lives: u8) -> Self {
        Self {
            mode,
            level: 1,
            score: 0,
            lives,
        }
    }
}

/// Result of a player pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct { points: u64, xp: u32 },
    /// Wrong pick, the session goes on
    Wrong { lives_left: u8 },
    /// Wrong pick on the last life
    GameOver { final_score: u64 },
}

/// Notifications for the presentation layer (sounds, animations, toasts)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RoundStarted { level: u32, item_count: usize },
    SceneLocked,
    GuessOpened,
    CorrectGuess { item: ItemId, points: u64, xp: u32 },
    /// `item` is `None` when the guess clock ran out
    WrongGuess { item: Option<ItemId>, lives_left: u8 },
    GuessTimedOut,
    GameOver { mode: GameMode, score: u64 },
    NewHighScore { mode: GameMode, score: u64 },
    ThemeSelected(crate::catalog::ThemeId),
    ReturnedToMenu,
}
