//! Round lifecycle engine
//!
//! All gameplay logic lives here:
//! - Pure generation (difficulty curve, scene, mutation) driven by a caller RNG
//! - One state machine that owns the session and sequences phases
//! - Fixed-tick timers only, no wall clock
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod machine;
pub mod mutation;
pub mod scene;
pub mod state;
pub mod timers;

pub use difficulty::{ObserveTime, RoundConfig, compute_round_config, item_count_for_level};
pub use machine::RoundMachine;
pub use mutation::{MutationKind, apply_mutation};
pub use scene::{Appearance, DisplayItem, ItemId, generate_scene};
pub use state::{GameEvent, GameMode, GamePhase, GuessOutcome, RoundSession};
pub use timers::{Countdown, PendingAction, Timers};
