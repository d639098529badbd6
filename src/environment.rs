//! Background themes and the decay multipliers they imply.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Night,
    Day,
    Space,
    Underwater,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Night, Theme::Day, Theme::Space, Theme::Underwater];

    /// Unknown ids fall back to `Day`, which carries no bonus.
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "night" => Theme::Night,
            "day" => Theme::Day,
            "space" => Theme::Space,
            "underwater" => Theme::Underwater,
            _ => Theme::Day,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Theme::Night => "night",
            Theme::Day => "day",
            Theme::Space => "space",
            Theme::Underwater => "underwater",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Night => "Night Sky",
            Theme::Day => "Sunny Day",
            Theme::Space => "Outer Space",
            Theme::Underwater => "Underwater",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Theme::Night => "A peaceful starry night",
            Theme::Day => "Bright blue skies and green grass",
            Theme::Space => "Deep space exploration",
            Theme::Underwater => "Beneath the waves",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// Per-meter rate multipliers. 1.0 leaves a rate untouched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Modifiers {
    pub health: f32,
    pub energy: f32,
    pub hunger: f32,
    pub mood: f32,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            health: 1.0,
            energy: 1.0,
            hunger: 1.0,
            mood: 1.0,
        }
    }
}

impl Modifiers {
    const HALF: f32 = 0.5;

    /// At most one meter is touched per theme.
    pub fn for_theme(theme: Theme) -> Self {
        let base = Self::default();
        match theme {
            Theme::Night => Self {
                energy: Self::HALF,
                ..base
            },
            Theme::Space => Self {
                mood: Self::HALF,
                ..base
            },
            Theme::Underwater => Self {
                health: Self::HALF,
                ..base
            },
            Theme::Day => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_theme_slows_exactly_one_meter() {
        for theme in Theme::ALL {
            let m = Modifiers::for_theme(theme);
            let slowed = [m.health, m.energy, m.hunger, m.mood]
                .iter()
                .filter(|v| **v != 1.0)
                .count();
            let expected = if theme == Theme::Day { 0 } else { 1 };
            assert_eq!(slowed, expected, "{:?}", theme);
        }
        assert_eq!(Modifiers::for_theme(Theme::Night).energy, 0.5);
        assert_eq!(Modifiers::for_theme(Theme::Space).mood, 0.5);
        assert_eq!(Modifiers::for_theme(Theme::Underwater).health, 0.5);
    }

    #[test]
    fn unknown_theme_ids_are_neutral() {
        assert_eq!(Theme::from_id("volcano"), Theme::Day);
        assert_eq!(Theme::from_id(""), Theme::Day);
        assert_eq!(Theme::from_id(" Night "), Theme::Night);
        assert_eq!(
            Modifiers::for_theme(Theme::from_id("volcano")),
            Modifiers::default()
        );
    }

    #[test]
    fn rotation_visits_every_theme() {
        let mut t = Theme::Night;
        let mut seen = vec![t];
        for _ in 0..3 {
            t = t.next();
            seen.push(t);
        }
        assert_eq!(seen, Theme::ALL.to_vec());
        assert_eq!(t.next(), Theme::Night);
    }

    #[test]
    fn every_theme_has_its_own_description() {
        let mut seen: Vec<&str> = Theme::ALL.iter().map(|t| t.description()).collect();
        assert!(seen.iter().all(|d| !d.is_empty()));
        seen.dedup();
        assert_eq!(seen.len(), Theme::ALL.len());
        assert_eq!(Theme::Underwater.description(), "Beneath the waves");
    }
}
