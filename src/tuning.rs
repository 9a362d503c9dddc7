//! Data-driven game balance
//!
//! Timing, lives and reward constants for the round machine. Defaults match the
//! shipped game; a JSON blob may override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::sim::difficulty::secs_to_ticks;
use crate::sim::state::GameMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing ===
    /// Timer granularity
    pub tick_ms: u32,
    /// Locked phase length ("WAIT...")
    pub lock_delay_ms: u32,
    /// Pause after a correct pick before the next round
    pub result_delay_ms: u32,
    /// Guess-phase countdown in Timed mode
    pub timed_guess_seconds: f32,

    // === Lives ===
    pub starting_lives: u8,
    pub blitz_lives: u8,

    // === Rewards ===
    /// Flat XP per correct pick
    pub xp_base: u32,
    /// Extra XP per level of the round
    pub xp_per_round_level: u32,
    /// Score per level of the round
    pub points_per_level: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            lock_delay_ms: 800,
            result_delay_ms: 500,
            timed_guess_seconds: 5.0,

            starting_lives: 3,
            blitz_lives: 1,

            xp_base: 20,
            xp_per_round_level: 5,
            points_per_level: 100,
        }
    }
}

impl Tuning {
    /// Parse overrides; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Lives at session start
    pub fn lives_for(&self, mode: GameMode) -> u8 {
        let lives = match mode {
            GameMode::Blitz => self.blitz_lives,
            _ => self.starting_lives,
        };
        lives.max(1)
    }

    /// XP for a correct pick at `level`
    pub fn xp_reward(&self, level: u32) -> u32 {
        self.xp_base + self.xp_per_round_level * level
    }

    /// Score for a correct pick at `level`
    pub fn points_reward(&self, level: u32) -> u64 {
        self.points_per_level * u64::from(level)
    }

    /// Seconds per tick
    pub fn tick_secs(&self) -> f32 {
        self.tick_ms.max(1) as f32 / 1000.0
    }

    pub fn lock_delay_ticks(&self) -> u32 {
        self.ms_to_ticks(self.lock_delay_ms)
    }

    pub fn result_delay_ticks(&self) -> u32 {
        self.ms_to_ticks(self.result_delay_ms)
    }

    pub fn timed_guess_ticks(&self) -> u32 {
        secs_to_ticks(self.timed_guess_seconds, self.tick_ms)
    }

    /// Same rounding as the observe and guess countdowns
    fn ms_to_ticks(&self, ms: u32) -> u32 {
        secs_to_ticks(ms as f32 / 1000.0, self.tick_ms)
    }
}
