//! Icon and theme catalogs
//!
//! The engine only ever stores symbolic keys. Mapping a key to a glyph or an
//! actual color is the presentation layer's job.

use serde::{Deserialize, Serialize};

/// Symbolic icon key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    Apple,
    Banana,
    Cherry,
    Grape,
    Pizza,
    Croissant,
    Coffee,
    Car,
    Bike,
    Plane,
    Rocket,
    Anchor,
    Heart,
    Star,
    Zap,
    Cloud,
    Sun,
    Moon,
    Cat,
    Dog,
    Fish,
    Bird,
    Bug,
    Music,
    Camera,
    Gamepad,
    Headphones,
    Umbrella,
    Key,
    Lock,
    Bell,
    Gift,
}

impl Icon {
    /// Full catalog, in display order
    pub const ALL: [Icon; 32] = [
        Icon::Apple,
        Icon::Banana,
        Icon::Cherry,
        Icon::Grape,
        Icon::Pizza,
        Icon::Croissant,
        Icon::Coffee,
        Icon::Car,
        Icon::Bike,
        Icon::Plane,
        Icon::Rocket,
        Icon::Anchor,
        Icon::Heart,
        Icon::Star,
        Icon::Zap,
        Icon::Cloud,
        Icon::Sun,
        Icon::Moon,
        Icon::Cat,
        Icon::Dog,
        Icon::Fish,
        Icon::Bird,
        Icon::Bug,
        Icon::Music,
        Icon::Camera,
        Icon::Gamepad,
        Icon::Headphones,
        Icon::Umbrella,
        Icon::Key,
        Icon::Lock,
        Icon::Bell,
        Icon::Gift,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Apple => "Apple",
            Icon::Banana => "Banana",
            Icon::Cherry => "Cherry",
            Icon::Grape => "Grape",
            Icon::Pizza => "Pizza",
            Icon::Croissant => "Croissant",
            Icon::Coffee => "Coffee",
            Icon::Car => "Car",
            Icon::Bike => "Bike",
            Icon::Plane => "Plane",
            Icon::Rocket => "Rocket",
            Icon::Anchor => "Anchor",
            Icon::Heart => "Heart",
            Icon::Star => "Star",
            Icon::Zap => "Zap",
            Icon::Cloud => "Cloud",
            Icon::Sun => "Sun",
            Icon::Moon => "Moon",
            Icon::Cat => "Cat",
            Icon::Dog => "Dog",
            Icon::Fish => "Fish",
            Icon::Bird => "Bird",
            Icon::Bug => "Bug",
            Icon::Music => "Music",
            Icon::Camera => "Camera",
            Icon::Gamepad => "Gamepad",
            Icon::Headphones => "Headphones",
            Icon::Umbrella => "Umbrella",
            Icon::Key => "Key",
            Icon::Lock => "Lock",
            Icon::Bell => "Bell",
            Icon::Gift => "Gift",
        }
    }
}

/// Symbolic color key into a theme palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorKey(pub &'static str);

impl ColorKey {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Theme identifiers (persisted in the player profile)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeId {
    #[default]
    NeonCyber,
    MinimalWhite,
    ForestNature,
    CandyPop,
}

impl ThemeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::NeonCyber => "neon_cyber",
            ThemeId::MinimalWhite => "minimal_white",
            ThemeId::ForestNature => "forest_nature",
            ThemeId::CandyPop => "candy_pop",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        THEMES.iter().map(|t| t.id).find(|id| id.as_str() == s)
    }
}

/// A color theme
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub id: ThemeId,
    /// Display name
    pub name: &'static str,
    /// Colors items may be drawn in
    pub palette: &'static [ColorKey],
}

impl Theme {
    /// Look up a theme by id
    pub fn get(id: ThemeId) -> &'static Theme {
        // Every ThemeId has an entry, first one is the fallback
        THEMES.iter().find(|t| t.id == id).unwrap_or(&THEMES[0])
    }
}

/// Theme catalog, in display order
pub static THEMES: [Theme; 4] = [
    Theme {
        id: ThemeId::NeonCyber,
        name: "Neon Cyber",
        palette: &[
            ColorKey("cyan-400"),
            ColorKey("fuchsia-400"),
            ColorKey("yellow-400"),
            ColorKey("emerald-400"),
        ],
    },
    Theme {
        id: ThemeId::MinimalWhite,
        name: "Minimalist",
        palette: &[
            ColorKey("indigo-500"),
            ColorKey("rose-500"),
            ColorKey("amber-500"),
            ColorKey("teal-500"),
        ],
    },
    Theme {
        id: ThemeId::ForestNature,
        name: "Forest",
        palette: &[
            ColorKey("lime-400"),
            ColorKey("green-400"),
            ColorKey("amber-300"),
            ColorKey("orange-400"),
        ],
    },
    Theme {
        id: ThemeId::CandyPop,
        name: "Candy Pop",
        palette: &[
            ColorKey("pink-500"),
            ColorKey("purple-500"),
            ColorKey("blue-400"),
            ColorKey("yellow-400"),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_icon_catalog_is_unique() {
        let names: HashSet<_> = Icon::ALL.iter().map(|i| i.as_str()).collect();
        assert_eq!(names.len(), Icon::ALL.len());
    }

    #[test]
    fn test_every_theme_is_in_catalog() {
        for id in [
            ThemeId::NeonCyber,
            ThemeId::MinimalWhite,
            ThemeId::ForestNature,
            ThemeId::CandyPop,
        ] {
            assert_eq!(Theme::get(id).id, id);
            assert_eq!(ThemeId::from_str(id.as_str()), Some(id));
        }
        assert_eq!(ThemeId::from_str("vaporwave"), None);
    }

    #[test]
    fn test_palettes_have_distinct_colors() {
        // Color mutation needs at least two distinct entries to resample into
        for theme in &THEMES {
            let colors: HashSet<_> = theme.palette.iter().collect();
            assert!(colors.len() >= 2, "{} palette too small", theme.name);
        }
    }

    #[test]
    fn test_theme_id_serde_names() {
        let json = serde_json::to_string(&ThemeId::ForestNature).unwrap();
        assert_eq!(json, "\"forest_nature\"");
    }
}
