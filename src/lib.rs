//! Odd One Away - a "spot the difference" memory game engine
//!
//! Core modules:
//! - `sim`: Round lifecycle (difficulty, scene, mutation, state machine)
//! - `catalog`: Icon and theme keys
//! - `profile` / `highscores`: Cross-session progress
//! - `persistence`: Profile stores with safe fallbacks
//! - `tuning`: Data-driven game balance

pub mod catalog;
pub mod highscores;
pub mod persistence;
pub mod profile;
pub mod sim;
pub mod tuning;

pub use catalog::{ColorKey, Icon, THEMES, Theme, ThemeId};
pub use highscores::HighScores;
pub use persistence::{MemoryStore, ProfileStore, StoreError};
pub use profile::PlayerProfile;
pub use sim::{GameMode, GamePhase, RoundMachine};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Items in the very first round
    pub const BASE_ITEMS: usize = 3;
    /// Item cap (keeps the grid readable on phones)
    pub const MAX_ITEMS: usize = 30;

    /// Observation time before level scaling (seconds)
    pub const BASE_OBSERVE_SECS: f32 = 5.0;
    /// Observation time lost per level (seconds)
    pub const OBSERVE_DECAY_PER_LEVEL: f32 = 0.1;
    /// Observation floor (seconds)
    pub const MIN_OBSERVE_SECS: f32 = 2.0;
    /// Blitz ignores the curve
    pub const BLITZ_OBSERVE_SECS: f32 = 2.0;

    /// XP needed per profile level
    pub const XP_PER_LEVEL: u32 = 100;

    /// Maximum ticks replayed by one `advance` call
    pub const MAX_CATCHUP_TICKS: u32 = 100;
}

/// Install the platform logger (safe to call more than once)
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Install the platform logger (safe to call more than once)
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
