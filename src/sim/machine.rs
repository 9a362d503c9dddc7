//! Round state machine
//!
//! Sequences Menu -> Observe -> Locked -> Guess -> (Result -> Observe | GameOver)
//! and owns everything a session mutates. Time only moves through [`RoundMachine::tick`]
//! (or [`RoundMachine::advance`]), so callers drive it from their own frame loop.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::time::Duration;

use super::difficulty::{RoundConfig, compute_round_config};
use super::mutation::apply_mutation;
use super::scene::{DisplayItem, ItemId, generate_scene};
use super::state::{GameEvent, GameMode, GamePhase, GuessOutcome, RoundSession};
use super::timers::{Expired, PendingAction, Timers};
use crate::catalog::{Theme, ThemeId};
use crate::consts::MAX_CATCHUP_TICKS;
use crate::persistence::{ProfileStore, load_or_default, save_best_effort};
use crate::profile::PlayerProfile;
use crate::tuning::Tuning;

pub struct RoundMachine<S: ProfileStore> {
    tuning: Tuning,
    store: S,
    profile: PlayerProfile,
    rng: Pcg32,
    phase: GamePhase,
    session: Option<RoundSession>,
    config: Option<RoundConfig>,
    /// Scene as generated (what the player memorized)
    observed: Vec<DisplayItem>,
    /// Scene as currently displayed (mutated once Guess opens)
    scene: Vec<DisplayItem>,
    timers: Timers,
    /// Bumped on every session start/exit so stale delayed actions are dropped
    generation: u64,
    accumulator: Duration,
    events: Vec<GameEvent>,
}

impl<S: ProfileStore> RoundMachine<S> {
    /// Load the profile from `store` and sit in the menu
    pub fn new(mut store: S, tuning: Tuning, seed: u64) -> Self {
        let profile = load_or_default(&mut store);
        Self {
            tuning,
            store,
            profile,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            session: None,
            config: None,
            observed: Vec::new(),
            scene: Vec::new(),
            timers: Timers::new(),
            generation: 0,
            accumulator: Duration::ZERO,
            events: Vec::new(),
        }
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session(&self) -> Option<&RoundSession> {
        self.session.as_ref()
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.session.as_ref().map(|s| s.mode)
    }

    pub fn level(&self) -> u32 {
        self.session.as_ref().map_or(1, |s| s.level)
    }

    pub fn score(&self) -> u64 {
        self.session.as_ref().map_or(0, |s| s.score)
    }

    pub fn lives(&self) -> u8 {
        self.session.as_ref().map_or(0, |s| s.lives)
    }

    pub fn round_config(&self) -> Option<&RoundConfig> {
        self.config.as_ref()
    }

    /// Items as currently displayed
    pub fn scene(&self) -> &[DisplayItem] {
        &self.scene
    }

    /// Items as they were during Observe
    pub fn observed_scene(&self) -> &[DisplayItem] {
        &self.observed
    }

    /// The changed item, once the change has been applied
    pub fn target(&self) -> Option<&DisplayItem> {
        self.scene.iter().find(|i| i.is_target)
    }

    /// Seconds left on the active countdown (0 when none)
    pub fn time_left(&self) -> f32 {
        self.timers
            .countdown()
            .map_or(0.0, |c| c.remaining_ticks as f32 * self.tuning.tick_secs())
    }

    /// Full length of the active countdown (0 when none)
    pub fn total_time(&self) -> f32 {
        self.timers
            .countdown()
            .map_or(0.0, |c| c.total_ticks as f32 * self.tuning.tick_secs())
    }

    pub fn has_countdown(&self) -> bool {
        self.timers.countdown().is_some()
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn active_theme(&self) -> &'static Theme {
        Theme::get(self.profile.selected_theme)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Session lifecycle ===

    /// Start a new session; allowed from the menu or the game-over screen
    pub fn start_session(&mut self, mode: GameMode) -> bool {
        if !matches!(self.phase, GamePhase::Menu | GamePhase::GameOver) {
            log::debug!("Ignoring start_session in {:?}", self.phase);
            return false;
        }

        self.timers.cancel_all();
        self.generation += 1;
        self.accumulator = Duration::ZERO;
        let lives = self.tuning.lives_for(mode);
        self.session = Some(RoundSession::new(mode, lives));
        log::info!("Starting {} session ({} lives)", mode.as_str(), lives);

        self.start_round(1);
        true
    }

    /// Play the last mode again from the game-over screen
    pub fn restart(&mut self) -> bool {
        match (self.phase, self.mode()) {
            (GamePhase::GameOver, Some(mode)) => self.start_session(mode),
            _ => false,
        }
    }

    /// Abandon the session (or leave the game-over screen) and go back to the menu
    ///
    /// Cancels every pending timer so nothing fires against the dropped round.
    pub fn exit_to_menu(&mut self) -> bool {
        if !(self.phase.in_session() || self.phase == GamePhase::GameOver) {
            return false;
        }

        self.timers.cancel_all();
        self.generation += 1;
        self.session = None;
        self.config = None;
        self.observed.clear();
        self.scene.clear();
        self.set_phase(GamePhase::Menu);
        self.events.push(GameEvent::ReturnedToMenu);
        true
    }

    fn start_round(&mut self, level: u32) {
        let Some(mode) = self.mode() else {
            return;
        };
        let theme = self.active_theme();
        let config = compute_round_config(level, mode);
        let scene = generate_scene(&config, theme, &mut self.rng);
        assert!(!scene.is_empty(), "generated an empty scene");

        self.timers.cancel_all();
        self.observed = scene.clone();
        self.scene = scene;
        self.config = Some(config);
        self.set_phase(GamePhase::Observe);

        if let Some(ticks) = config.observe.ticks(self.tuning.tick_ms) {
            self.timers.arm_countdown(GamePhase::Observe, ticks);
        }

        self.events.push(GameEvent::RoundStarted {
            level,
            item_count: config.item_count,
        });
    }

    // === Timed transitions ===

    /// Advance all timers by one tick
    pub fn tick(&mut self) {
        for expired in self.timers.tick(self.phase, self.generation) {
            match expired {
                Expired::Countdown(GamePhase::Observe) => self.lock_scene(),
                Expired::Countdown(GamePhase::Guess) => self.guess_timed_out(),
                Expired::Countdown(phase) => {
                    log::warn!("Countdown expired in unexpected phase {:?}", phase)
                }
                Expired::Action(PendingAction::OpenGuess) => self.open_guess(),
                Expired::Action(PendingAction::NextRound) => self.next_round(),
            }
        }
    }

    /// Run as many whole ticks as fit into `elapsed`, carrying the remainder
    pub fn advance(&mut self, elapsed: Duration) {
        let tick = Duration::from_millis(u64::from(self.tuning.tick_ms.max(1)));
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= tick {
            self.accumulator -= tick;
            self.tick();
            ticks += 1;
            if ticks >= MAX_CATCHUP_TICKS {
                // Long stall (e.g. backgrounded tab): drop the backlog
                self.accumulator = Duration::ZERO;
                break;
            }
        }
    }

    /// Hide the scene before the countdown runs out ("ready")
    ///
    /// This is the only way out of Observe when observation is unbounded.
    pub fn end_observation(&mut self) -> bool {
        if self.phase != GamePhase::Observe {
            return false;
        }
        self.lock_scene();
        true
    }

    fn lock_scene(&mut self) {
        if self.phase != GamePhase::Observe {
            return;
        }
        self.timers.cancel_countdown();
        self.set_phase(GamePhase::Locked);
        self.timers.schedule(
            PendingAction::OpenGuess,
            self.tuning.lock_delay_ticks(),
            self.generation,
        );
        self.events.push(GameEvent::SceneLocked);
    }

    fn open_guess(&mut self) {
        if self.phase != GamePhase::Locked {
            return;
        }
        let level = self.level();
        let theme = self.active_theme();
        self.scene = apply_mutation(&self.observed, level, theme, &mut self.rng);
        debug_assert_eq!(
            self.scene.iter().filter(|i| i.is_target).count(),
            1,
            "guess phase needs exactly one target"
        );

        self.set_phase(GamePhase::Guess);
        if self.mode().is_some_and(|m| m.has_guess_timer()) {
            self.timers
                .arm_countdown(GamePhase::Guess, self.tuning.timed_guess_ticks());
        }
        self.events.push(GameEvent::GuessOpened);
    }

    fn guess_timed_out(&mut self) {
        if self.phase != GamePhase::Guess {
            return;
        }
        self.events.push(GameEvent::GuessTimedOut);
        self.wrong_guess(None);
        // Still alive: fresh clock for the next attempt
        if self.phase == GamePhase::Guess {
            self.timers
                .arm_countdown(GamePhase::Guess, self.tuning.timed_guess_ticks());
        }
    }

    fn next_round(&mut self) {
        if self.phase != GamePhase::Result {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.level += 1;
        let level = session.level;
        self.start_round(level);
    }

    // === Player input ===

    /// Pick an item during Guess; anything else is ignored
    pub fn select_item(&mut self, id: ItemId) -> Option<GuessOutcome> {
        if self.phase != GamePhase::Guess {
            log::debug!("Ignoring pick in {:?}", self.phase);
            return None;
        }
        let is_target = self.scene.iter().find(|i| i.id == id)?.is_target;

        let outcome = if is_target {
            self.correct_guess(id)
        } else {
            self.wrong_guess(Some(id))
        };
        Some(outcome)
    }

    fn correct_guess(&mut self, id: ItemId) -> GuessOutcome {
        let level = self.level();
        let points = self.tuning.points_reward(level);
        let xp = self.tuning.xp_reward(level);

        if let Some(session) = self.session.as_mut() {
            session.score += points;
        }
        if self.profile.award_xp(xp) {
            log::info!("Player reached level {}", self.profile.level);
        }
        self.profile.bump_streak();
        self.persist();

        self.timers.cancel_countdown();
        self.set_phase(GamePhase::Result);
        self.timers.schedule(
            PendingAction::NextRound,
            self.tuning.result_delay_ticks(),
            self.generation,
        );
        self.events.push(GameEvent::CorrectGuess {
            item: id,
            points,
            xp,
        });

        GuessOutcome::Correct { points, xp }
    }

    /// Costs a life, or ends the session on the last one
    fn wrong_guess(&mut self, id: Option<ItemId>) -> GuessOutcome {
        let Some(session) = self.session.as_mut() else {
            return GuessOutcome::GameOver { final_score: 0 };
        };

        if session.lives > 1 {
            session.lives -= 1;
            let lives_left = session.lives;
            self.events.push(GameEvent::WrongGuess {
                item: id,
                lives_left,
            });
            return GuessOutcome::Wrong { lives_left };
        }

        session.lives = 0;
        let (mode, score) = (session.mode, session.score);
        self.game_over(mode, score);
        GuessOutcome::GameOver { final_score: score }
    }

    fn game_over(&mut self, mode: GameMode, score: u64) {
        self.timers.cancel_all();
        self.set_phase(GamePhase::GameOver);

        let new_record = self.profile.high_scores.qualifies(mode, score);
        self.profile.record_score(mode, score);
        self.profile.reset_streak();
        self.persist();

        log::info!(
            "Game over: {} score {} (best {})",
            mode.as_str(),
            score,
            self.profile.high_scores.get(mode)
        );
        self.events.push(GameEvent::GameOver { mode, score });
        if new_record {
            self.events.push(GameEvent::NewHighScore { mode, score });
        }
    }

    // === Themes ===

    pub fn open_themes(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            return false;
        }
        self.set_phase(GamePhase::Themes);
        true
    }

    pub fn close_themes(&mut self) -> bool {
        if self.phase != GamePhase::Themes {
            return false;
        }
        self.set_phase(GamePhase::Menu);
        true
    }

    /// Switch to an unlocked theme (menu or theme browser only)
    pub fn select_theme(&mut self, theme: ThemeId) -> bool {
        if !matches!(self.phase, GamePhase::Menu | GamePhase::Themes) {
            return false;
        }
        if !self.profile.select_theme(theme) {
            log::debug!("Theme {} is locked", theme.as_str());
            return false;
        }
        self.persist();
        self.events.push(GameEvent::ThemeSelected(theme));
        true
    }

    pub fn unlock_theme(&mut self, theme: ThemeId) -> bool {
        if !self.profile.unlock_theme(theme) {
            return false;
        }
        log::info!("Unlocked theme {}", theme.as_str());
        self.persist();
        true
    }

    // === Internals ===

    fn set_phase(&mut self, phase: GamePhase) {
        log::debug!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn persist(&mut self) {
        save_best_effort(&mut self.store, &self.profile);
    }
}
