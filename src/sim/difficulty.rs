//! Difficulty curve: level + mode -> round configuration
//!
//! Pure and deterministic. Out-of-range input is clamped, never rejected.

use serde::{Deserialize, Serialize};

use super::state::GameMode;
use crate::consts::*;

/// How long the scene stays visible before it is hidden
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObserveTime {
    Seconds(f32),
    /// No countdown; the player hides the scene when ready
    Unbounded,
}

impl ObserveTime {
    /// Whole countdown ticks, `None` when unbounded
    pub fn ticks(&self, tick_ms: u32) -> Option<u32> {
        match *self {
            ObserveTime::Seconds(secs) => Some(secs_to_ticks(secs, tick_ms)),
            ObserveTime::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, ObserveTime::Unbounded)
    }
}

/// Convert seconds to whole ticks (at least one)
pub fn secs_to_ticks(secs: f32, tick_ms: u32) -> u32 {
    let tick_ms = tick_ms.max(1) as f32;
    ((secs * 1000.0 / tick_ms).round() as u32).max(1)
}

/// Parameters for one round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub item_count: usize,
    pub observe: ObserveTime,
    /// Columns of a roughly square layout (advisory)
    pub grid_size: usize,
    /// Grows with level, not used by outcomes yet
    pub difficulty_scalar: f32,
}

/// Number of items shown at `level`
pub fn item_count_for_level(level: u32) -> usize {
    let level = level.max(1) as usize;
    (BASE_ITEMS + level / 2).min(MAX_ITEMS)
}

/// Compute the configuration for a round
pub fn compute_round_config(level: u32, mode: GameMode) -> RoundConfig {
    let level = level.max(1);
    let item_count = item_count_for_level(level);

    let observe = match mode {
        GameMode::Zen => ObserveTime::Unbounded,
        GameMode::Blitz => ObserveTime::Seconds(BLITZ_OBSERVE_SECS),
        GameMode::Classic | GameMode::Timed => ObserveTime::Seconds(
            (BASE_OBSERVE_SECS - OBSERVE_DECAY_PER_LEVEL * level as f32).max(MIN_OBSERVE_SECS),
        ),
    };

    let grid_size = (item_count as f32).sqrt().ceil() as usize;

    RoundConfig {
        item_count,
        observe,
        grid_size,
        difficulty_scalar: 1.0 + 0.1 * level as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn observe_secs(config: &RoundConfig) -> f32 {
        match config.observe {
            ObserveTime::Seconds(s) => s,
            ObserveTime::Unbounded => panic!("expected a bounded observe time"),
        }
    }

    #[test]
    fn test_level_one_classic() {
        let config = compute_round_config(1, GameMode::Classic);
        assert_eq!(config.item_count, 3);
        assert!((observe_secs(&config) - 4.9).abs() < 1e-4);
        assert_eq!(config.grid_size, 2);
        assert!((config.difficulty_scalar - 1.1).abs() < 1e-4);
        assert_eq!(config.observe.ticks(100), Some(49));
    }

    #[test]
    fn test_item_count_caps_at_thirty() {
        assert_eq!(item_count_for_level(54), 30);
        assert_eq!(item_count_for_level(55), 30);
        assert_eq!(item_count_for_level(10_000), 30);
        assert_eq!(compute_round_config(100, GameMode::Classic).grid_size, 6);
    }

    #[test]
    fn test_observe_time_floors_at_two_seconds() {
        let config = compute_round_config(40, GameMode::Timed);
        assert!((observe_secs(&config) - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_blitz_is_fixed() {
        for level in [1, 5, 29] {
            let config = compute_round_config(level, GameMode::Blitz);
            assert!((observe_secs(&config) - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_zero_level_clamps_to_one() {
        assert_eq!(
            compute_round_config(0, GameMode::Classic),
            compute_round_config(1, GameMode::Classic)
        );
    }

    proptest! {
        #[test]
        fn prop_item_count_formula(level in 1u32..500) {
            let expected = (3 + (level / 2) as usize).min(30);
            prop_assert_eq!(compute_round_config(level, GameMode::Classic).item_count, expected);
            prop_assert!(item_count_for_level(level + 1) >= item_count_for_level(level));
        }

        #[test]
        fn prop_config_is_pure(level in 1u32..500, mode_idx in 0usize..4) {
            let mode = GameMode::ALL[mode_idx];
            prop_assert_eq!(compute_round_config(level, mode), compute_round_config(level, mode));
        }

        #[test]
        fn prop_zen_always_unbounded(level in 1u32..500) {
            let config = compute_round_config(level, GameMode::Zen);
            prop_assert!(config.observe.is_unbounded());
            prop_assert_eq!(config.observe.ticks(100), None);
        }

        #[test]
        fn prop_grid_fits_items(level in 1u32..500) {
            let config = compute_round_config(level, GameMode::Classic);
            prop_assert!(config.grid_size * config.grid_size >= config.item_count);
        }
    }
}
