//! Mutation engine: change exactly one item of a scene
//!
//! The input scene is left untouched so the observed version can still be shown
//! in the reveal.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::scene::DisplayItem;
use crate::catalog::{Icon, Theme};

/// Degrees added by a rotation mutation
pub const ROTATION_STEP: f32 = 90.0;

/// Which attribute of the target gets changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Icon,
    Color,
    /// Modeled but never selected; see [`MutationKind::ENABLED`]
    Rotation,
}

impl MutationKind {
    /// Kinds the engine draws from, with equal weight
    pub const ENABLED: [MutationKind; 2] = [MutationKind::Icon, MutationKind::Color];
}

/// Return a copy of `scene` with one random item marked as target and changed
///
/// `level` is accepted for difficulty-aware strategies (subtler changes later on)
/// but does not influence the result yet.
pub fn apply_mutation<R: Rng + ?Sized>(
    scene: &[DisplayItem],
    level: u32,
    theme: &Theme,
    rng: &mut R,
) -> Vec<DisplayItem> {
    let mut items = scene.to_vec();

    debug_assert!(!items.is_empty(), "mutating an empty scene");
    if items.is_empty() {
        log::error!("Mutation requested on an empty scene");
        return items;
    }

    let index = rng.random_range(0..items.len());
    let kind = *MutationKind::ENABLED
        .choose(rng)
        .unwrap_or(&MutationKind::Icon);
    mutate_item(&mut items[index], kind, theme, rng);

    log::debug!(
        "Level {}: mutated item {} of {} ({:?})",
        level,
        index + 1,
        items.len(),
        kind
    );
    items
}

/// Record the prior look, flag as target, then change the attribute for `kind`
pub fn mutate_item<R: Rng + ?Sized>(
    item: &mut DisplayItem,
    kind: MutationKind,
    theme: &Theme,
    rng: &mut R,
) {
    item.prior = Some(item.appearance());
    item.is_target = true;

    match kind {
        MutationKind::Icon => {
            item.icon = resample(&Icon::ALL, item.icon, rng);
        }
        MutationKind::Color => {
            item.color = resample(theme.palette, item.color, rng);
        }
        MutationKind::Rotation => {
            item.rotation = (item.rotation + ROTATION_STEP) % 360.0;
        }
    }
}

/// Draw uniformly from `pool` until the result differs from `current`
fn resample<T: Copy + PartialEq, R: Rng + ?Sized>(pool: &[T], current: T, rng: &mut R) -> T {
    assert!(
        pool.iter().any(|v| *v != current),
        "no alternative value to mutate into"
    );
    loop {
        // Non-empty: the assert above found an element
        let candidate = pool[rng.random_range(0..pool.len())];
        if candidate != current {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColorKey, THEMES, ThemeId};
    use crate::sim::difficulty::compute_round_config;
    use crate::sim::scene::generate_scene;
    use crate::sim::state::GameMode;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn scene(level: u32, seed: u64) -> Vec<DisplayItem> {
        let config = compute_round_config(level, GameMode::Classic);
        generate_scene(
            &config,
            Theme::get(ThemeId::NeonCyber),
            &mut Pcg32::seed_from_u64(seed),
        )
    }

    /// Check the post-mutation guarantees against the input scene
    fn assert_single_change(before: &[DisplayItem], after: &[DisplayItem]) {
        assert_eq!(before.len(), after.len());
        let targets: Vec<_> = after.iter().filter(|i| i.is_target).collect();
        assert_eq!(targets.len(), 1, "exactly one target");
        let target = targets[0];
        let prior = target.prior.expect("target keeps its prior appearance");
        assert!(target.icon != prior.icon || target.color != prior.color);
        // Only one attribute changes
        assert!(target.icon == prior.icon || target.color == prior.color);
        assert_eq!(target.rotation, prior.rotation);

        for (b, a) in before.iter().zip(after) {
            if a.is_target {
                assert_eq!(b.appearance(), a.prior.unwrap());
                assert_eq!(b.id, a.id);
            } else {
                assert_eq!(b, a);
            }
        }
    }

    #[test]
    fn test_level_one_scenario() {
        let before = scene(1, 5);
        assert_eq!(before.len(), 3);
        let after = apply_mutation(
            &before,
            1,
            Theme::get(ThemeId::NeonCyber),
            &mut Pcg32::seed_from_u64(6),
        );
        assert_single_change(&before, &after);
        // Input untouched
        assert!(before.iter().all(|i| !i.is_target && i.prior.is_none()));
    }

    #[test]
    fn test_both_kinds_get_used() {
        let before = scene(20, 1);
        let theme = Theme::get(ThemeId::NeonCyber);
        let mut rng = Pcg32::seed_from_u64(99);
        let (mut icons, mut colors) = (0, 0);
        for _ in 0..200 {
            let after = apply_mutation(&before, 20, theme, &mut rng);
            let target = after.iter().find(|i| i.is_target).unwrap();
            let prior = target.prior.unwrap();
            if target.icon != prior.icon {
                icons += 1;
            } else {
                colors += 1;
            }
        }
        assert!(icons > 50 && colors > 50, "icons={icons} colors={colors}");
    }

    #[test]
    fn test_rotation_kind_is_latent() {
        assert!(!MutationKind::ENABLED.contains(&MutationKind::Rotation));

        let mut item = scene(1, 2).remove(0);
        let theme = Theme::get(ThemeId::NeonCyber);
        mutate_item(&mut item, MutationKind::Rotation, theme, &mut Pcg32::seed_from_u64(0));
        assert!(item.is_target);
        assert_eq!(item.rotation, 90.0);
        assert_eq!(item.prior.unwrap().rotation, 0.0);
    }

    #[test]
    fn test_color_resample_stays_in_palette() {
        let theme = Theme::get(ThemeId::CandyPop);
        let mut rng = Pcg32::seed_from_u64(13);
        let mut item = scene(1, 4).remove(0);
        item.color = ColorKey("pink-500");
        mutate_item(&mut item, MutationKind::Color, theme, &mut rng);
        assert_ne!(item.color, ColorKey("pink-500"));
        assert!(theme.palette.contains(&item.color));
    }

    #[test]
    #[should_panic(expected = "no alternative value")]
    fn test_single_value_pool_panics() {
        let mut rng = Pcg32::seed_from_u64(0);
        let _ = resample(&[1u8], 1, &mut rng);
    }

    proptest! {
        #[test]
        fn prop_exactly_one_change(level in 1u32..80, seed in any::<u64>(), theme_idx in 0usize..4) {
            let theme = &THEMES[theme_idx];
            let config = compute_round_config(level, GameMode::Classic);
            let mut rng = Pcg32::seed_from_u64(seed);
            let before = generate_scene(&config, theme, &mut rng);
            let after = apply_mutation(&before, level, theme, &mut rng);
            assert_single_change(&before, &after);
        }
    }
}
