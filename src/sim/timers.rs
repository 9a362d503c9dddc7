//! Phase timers
//!
//! At most one countdown and at most one delayed action exist at a time:
//! - A countdown is tagged with the phase that armed it and only fires while
//!   that phase is still current.
//! - A delayed action is tagged with the session generation and is dropped if
//!   the session was reset or left before it came due.
//!
//! Both advance in whole ticks and fire exactly once.

use super::state::GamePhase;

/// One-shot actions the round machine schedules for later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Locked -> Guess, applying the mutation
    OpenGuess,
    /// Result -> Observe of the next level
    NextRound,
}

/// Repeating-tick countdown owned by one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub phase: GamePhase,
    pub total_ticks: u32,
    pub remaining_ticks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Delay {
    action: PendingAction,
    remaining_ticks: u32,
    generation: u64,
}

/// Something that came due on this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expired {
    Countdown(GamePhase),
    Action(PendingAction),
}

#[derive(Debug, Clone, Default)]
pub struct Timers {
    countdown: Option<Countdown>,
    delay: Option<Delay>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any running countdown
    pub fn arm_countdown(&mut self, phase: GamePhase, ticks: u32) {
        let ticks = ticks.max(1);
        self.countdown = Some(Countdown {
            phase,
            total_ticks: ticks,
            remaining_ticks: ticks,
        });
    }

    pub fn cancel_countdown(&mut self) {
        self.countdown = None;
    }

    /// Replace any pending action
    pub fn schedule(&mut self, action: PendingAction, ticks: u32, generation: u64) {
        self.delay = Some(Delay {
            action,
            remaining_ticks: ticks.max(1),
            generation,
        });
    }

    pub fn cancel_pending(&mut self) {
        self.delay = None;
    }

    pub fn cancel_all(&mut self) {
        self.countdown = None;
        self.delay = None;
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    pub fn pending(&self) -> Option<PendingAction> {
        self.delay.map(|d| d.action)
    }

    /// Advance by one tick and return whatever expired
    ///
    /// Timers whose tag no longer matches `phase` / `generation` are discarded
    /// without firing.
    pub fn tick(&mut self, phase: GamePhase, generation: u64) -> Vec<Expired> {
        let mut expired = Vec::new();

        if let Some(countdown) = self.countdown.as_mut() {
            if countdown.phase != phase {
                log::debug!(
                    "Dropping stale {:?} countdown (now {:?})",
                    countdown.phase,
                    phase
                );
                self.countdown = None;
            } else {
                countdown.remaining_ticks = countdown.remaining_ticks.saturating_sub(1);
                if countdown.remaining_ticks == 0 {
                    expired.push(Expired::Countdown(countdown.phase));
                    self.countdown = None;
                }
            }
        }

        if let Some(delay) = self.delay.as_mut() {
            if delay.generation != generation {
                log::debug!("Dropping stale {:?}", delay.action);
                self.delay = None;
            } else {
                delay.remaining_ticks = delay.remaining_ticks.saturating_sub(1);
                if delay.remaining_ticks == 0 {
                    expired.push(Expired::Action(delay.action));
                    self.delay = None;
                }
            }
        }

        expired
    }
}
