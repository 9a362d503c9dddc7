//! Best score per game mode
//!
//! One slot per mode, persisted as part of the player profile.

use serde::{Deserialize, Serialize};

use crate::sim::GameMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScores {
    #[serde(rename = "CLASSIC")]
    pub classic: u64,
    #[serde(rename = "TIMED")]
    pub timed: u64,
    #[serde(rename = "ZEN")]
    pub zen: u64,
    #[serde(rename = "BLITZ")]
    pub blitz: u64,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Best score recorded for `mode`
    pub fn get(&self, mode: GameMode) -> u64 {
        match mode {
            GameMode::Classic => self.classic,
            GameMode::Timed => self.timed,
            GameMode::Zen => self.zen,
            GameMode::Blitz => self.blitz,
        }
    }

    fn slot_mut(&mut self, mode: GameMode) -> &mut u64 {
        match mode {
            GameMode::Classic => &mut self.classic,
            GameMode::Timed => &mut self.timed,
            GameMode::Zen => &mut self.zen,
            GameMode::Blitz => &mut self.blitz,
        }
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, mode: GameMode, score: u64) -> bool {
        score > self.get(mode)
    }

    /// Keep the maximum; returns true if `score` is a new best
    pub fn record(&mut self, mode: GameMode, score: u64) -> bool {
        let slot = self.slot_mut(mode);
        if score > *slot {
            *slot = score;
            true
        } else {
            false
        }
    }
}
