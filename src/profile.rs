//! Cross-session player progress
//!
//! XP, derived level, per-mode best scores, theme unlocks and the win streak.
//! Stored as a JSON blob; missing fields fall back to defaults on load.

use serde::{Deserialize, Serialize};

use crate::catalog::ThemeId;
use crate::consts::XP_PER_LEVEL;
use crate::highscores::HighScores;
use crate::sim::GameMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerProfile {
    pub xp: u32,
    /// Always `xp / XP_PER_LEVEL + 1`
    pub level: u32,
    pub high_scores: HighScores,
    pub unlocked_themes: Vec<ThemeId>,
    #[serde(rename = "selectedThemeId")]
    pub selected_theme: ThemeId,
    /// Consecutive correct picks, reset when a session is lost
    pub streak: u32,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            high_scores: HighScores::new(),
            unlocked_themes: vec![ThemeId::default()],
            selected_theme: ThemeId::default(),
            streak: 0,
        }
    }
}

/// Level reached with `xp` experience
pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

impl PlayerProfile {
    /// Repair derived and cross-field state after deserializing
    pub fn normalize(&mut self) {
        self.level = level_for_xp(self.xp);
        if !self.unlocked_themes.contains(&ThemeId::default()) {
            self.unlocked_themes.insert(0, ThemeId::default());
        }
        let mut seen = Vec::with_capacity(self.unlocked_themes.len());
        self.unlocked_themes.retain(|t| {
            if seen.contains(t) {
                false
            } else {
                seen.push(*t);
                true
            }
        });
        if !self.is_unlocked(self.selected_theme) {
            self.selected_theme = ThemeId::default();
        }
    }

    /// Add XP; returns true if the player leveled up
    pub fn award_xp(&mut self, amount: u32) -> bool {
        let before = self.level;
        self.xp = self.xp.saturating_add(amount);
        self.level = level_for_xp(self.xp);
        self.level > before
    }

    /// Progress toward the next level, 0.0 - 1.0
    pub fn level_progress(&self) -> f32 {
        (self.xp % XP_PER_LEVEL) as f32 / XP_PER_LEVEL as f32
    }

    pub fn bump_streak(&mut self) {
        self.streak += 1;
    }

    pub fn reset_streak(&mut self) {
        self.streak = 0;
    }

    /// Keep the best score for `mode`; true on a new record
    pub fn record_score(&mut self, mode: GameMode, score: u64) -> bool {
        self.high_scores.record(mode, score)
    }

    pub fn is_unlocked(&self, theme: ThemeId) -> bool {
        self.unlocked_themes.contains(&theme)
    }

    /// Returns false if it was already unlocked
    pub fn unlock_theme(&mut self, theme: ThemeId) -> bool {
        if self.is_unlocked(theme) {
            return false;
        }
        self.unlocked_themes.push(theme);
        true
    }

    /// Select an unlocked theme; locked themes are refused
    pub fn select_theme(&mut self, theme: ThemeId) -> bool {
        if !self.is_unlocked(theme) {
            return false;
        }
        self.selected_theme = theme;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let profile = PlayerProfile::default();
        assert_eq!(profile.xp, 0);
        assert_eq!(profile.level, 1);
        assert_eq!(profile.streak, 0);
        assert_eq!(profile.unlocked_themes, vec![ThemeId::NeonCyber]);
        assert_eq!(profile.selected_theme, ThemeId::NeonCyber);
        for mode in GameMode::ALL {
            assert_eq!(profile.high_scores.get(mode), 0);
        }
    }

    #[test]
    fn test_level_derivation() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(99), 1);
        assert_eq!(level_for_xp(100), 2);
        assert_eq!(level_for_xp(120), 2);
        assert_eq!(level_for_xp(250), 3);
    }

    #[test]
    fn test_award_xp_levels_up() {
        let mut profile = PlayerProfile::default();
        assert!(!profile.award_xp(25));
        assert!(!profile.award_xp(70));
        assert!(profile.award_xp(25));
        assert_eq!(profile.xp, 120);
        assert_eq!(profile.level, 2);
        assert!((profile.level_progress() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_locked_theme_cannot_be_selected() {
        let mut profile = PlayerProfile::default();
        assert!(!profile.select_theme(ThemeId::CandyPop));
        assert_eq!(profile.selected_theme, ThemeId::NeonCyber);

        assert!(profile.unlock_theme(ThemeId::CandyPop));
        assert!(!profile.unlock_theme(ThemeId::CandyPop));
        assert!(profile.select_theme(ThemeId::CandyPop));
        assert_eq!(profile.selected_theme, ThemeId::CandyPop);
    }

    #[test]
    fn test_partial_blob_fills_defaults() {
        let mut profile: PlayerProfile =
            serde_json::from_str(r#"{ "xp": 120, "highScores": { "ZEN": 900 } }"#).unwrap();
        profile.normalize();
        assert_eq!(profile.level, 2);
        assert_eq!(profile.high_scores.get(GameMode::Zen), 900);
        assert_eq!(profile.high_scores.get(GameMode::Classic), 0);
        assert_eq!(profile.selected_theme, ThemeId::NeonCyber);
    }

    #[test]
    fn test_normalize_repairs_selection() {
        let mut profile = PlayerProfile {
            level: 40,
            unlocked_themes: vec![],
            selected_theme: ThemeId::ForestNature,
            ..Default::default()
        };
        profile.normalize();
        assert_eq!(profile.level, 1);
        assert_eq!(profile.unlocked_themes, vec![ThemeId::NeonCyber]);
        assert_eq!(profile.selected_theme, ThemeId::NeonCyber);
    }

    #[test]
    fn test_save_keys_match_blob_layout() {
        let json = serde_json::to_string(&PlayerProfile::default()).unwrap();
        for key in ["\"xp\"", "\"level\"", "\"highScores\"", "\"unlockedThemes\"", "\"selectedThemeId\"", "\"streak\""] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
    }
}
