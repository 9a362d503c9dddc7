//! Odd One Away headless demo
//!
//! Plays one session per mode with a scripted player that is right most of the
//! time, logging the event stream. Progress is saved next to the system temp dir.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use odd_one_away::persistence::FileStore;
    use odd_one_away::sim::{GameEvent, GameMode, GamePhase};
    use odd_one_away::{RoundMachine, Tuning};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use std::time::{Duration, SystemTime};

    /// Chance the scripted player spots the change
    const ACCURACY: f64 = 0.8;
    /// Frame length fed to `advance`
    const FRAME: Duration = Duration::from_millis(16);
    /// Safety stop for one session
    const MAX_FRAMES: u32 = 200_000;

    odd_one_away::init_logging();

    let seed = clock_seed(SystemTime::now());
    log::info!("Odd One Away (native demo) starting, seed {}", seed);

    let store = FileStore::in_dir(std::env::temp_dir());
    log::info!("Profile at {}", store.path().display());

    let mut game = RoundMachine::new(store, Tuning::default(), seed);
    let mut player = Pcg32::seed_from_u64(seed ^ 0x5eed);

    for mode in GameMode::ALL {
        game.start_session(mode);

        for _ in 0..MAX_FRAMES {
            match game.phase() {
                // Zen never hides by itself: peek for a bit, then signal ready
                GamePhase::Observe if game.round_config().is_some_and(|c| c.observe.is_unbounded()) => {
                    game.end_observation();
                }
                GamePhase::Guess => {
                    let pick = if player.random_bool(ACCURACY) {
                        game.target().map(|t| t.id)
                    } else {
                        game.scene().iter().find(|i| !i.is_target).map(|i| i.id)
                    };
                    if let Some(id) = pick {
                        game.select_item(id);
                    }
                }
                GamePhase::GameOver => break,
                _ => {}
            }
            game.advance(FRAME);

            for event in game.drain_events() {
                match event {
                    GameEvent::RoundStarted { level, item_count } => {
                        log::info!("{} level {}: {} items", mode.as_str(), level, item_count)
                    }
                    GameEvent::WrongGuess { lives_left, .. } => {
                        log::info!("Missed, {} lives left", lives_left)
                    }
                    GameEvent::NewHighScore { score, .. } => {
                        log::info!("New {} high score: {}", mode.as_str(), score)
                    }
                    other => log::debug!("{:?}", other),
                }
            }
        }

        log::info!(
            "{} finished at level {} with {} points",
            mode.as_str(),
            game.level(),
            game.score()
        );
        game.exit_to_menu();
    }

    let profile = game.profile();
    log::info!(
        "Profile: level {} ({} xp, {:.0}% to next), streak {}",
        profile.level,
        profile.xp,
        profile.level_progress() * 100.0,
        profile.streak
    );
}

/// Milliseconds since the epoch, saturating; 0 if the clock is before it
#[cfg(not(target_arch = "wasm32"))]
fn clock_seed(now: std::time::SystemTime) -> u64 {
    now.duration_since(std::time::UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds embed the library; there is no standalone entry point
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_clock_seed_is_epoch_millis() {
        assert_eq!(clock_seed(UNIX_EPOCH + Duration::from_millis(1234)), 1234);
        assert_eq!(clock_seed(UNIX_EPOCH - Duration::from_secs(1)), 0);
    }
}
