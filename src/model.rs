use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SAVE_VERSION: u32 = 1;

pub const METER_MIN: f32 = 0.0;
pub const METER_MAX: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PetId(pub u32);

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display-space coordinates. The simulation stores and hands these back but
/// never interprets them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetColor {
    #[default]
    Pink,
    Yellow,
    Orange,
    Blue,
    Purple,
    Red,
}

impl PetColor {
    pub const ALL: [PetColor; 6] = [
        PetColor::Pink,
        PetColor::Yellow,
        PetColor::Orange,
        PetColor::Blue,
        PetColor::Purple,
        PetColor::Red,
    ];

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// The four status meters plus the terminal flag.
///
/// Meters live in `[0, 100]`. `hunger` runs the other way round from the
/// rest: 0 is sated, 100 is starving.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PetVitals {
    pub health: f32,
    pub energy: f32,
    pub hunger: f32,
    pub mood: f32,
    #[serde(default)]
    pub is_dead: bool,
    // set on the tick energy bottoms out, cleared once it climbs again
    #[serde(skip)]
    pub exhausted: bool,
}

impl Default for PetVitals {
    fn default() -> Self {
        Self {
            health: METER_MAX,
            energy: METER_MAX,
            hunger: METER_MIN,
            mood: METER_MAX,
            is_dead: false,
            exhausted: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pet {
    pub id: PetId,
    pub vitals: PetVitals,
    pub color: PetColor,
    /// Where the pet is drawn right now.
    pub position: Position,
    /// Where the pet returns to after leaving the house.
    pub active_position: Position,
}

impl Pet {
    pub fn new(id: PetId, at: Position) -> Self {
        Self {
            id,
            vitals: PetVitals::default(),
            color: PetColor::default(),
            position: at,
            active_position: at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub tick_step_ms: u64,     // one tick per frame, ~60 fps
    pub catchup_step_ms: u64,  // 5000ms typical
    pub catchup_max_secs: i64, // 1 day typical
    pub energy_decay: f32,
    pub hunger_increase: f32,
    pub mood_decay: f32,
    pub health_decay: f32,
    pub resting_energy_gain: f32,
    pub auto_feed_threshold: f32,
    pub feed_reward: u64,
    pub pet_reward: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            tick_step_ms: 16,
            catchup_step_ms: 5000,
            catchup_max_secs: 24 * 3600,
            energy_decay: 0.05,
            hunger_increase: 0.1,
            mood_decay: 0.1,
            health_decay: 0.04,
            resting_energy_gain: 0.25,
            auto_feed_threshold: 75.0,
            feed_reward: 5,
            pet_reward: 1,
        }
    }
}

impl Rules {
    /// Replace rates that are negative or not finite with their defaults and
    /// keep the catch-up chunk at least one tick long.
    pub fn sanitized(self) -> Self {
        let d = Rules::default();
        let rate = |v: f32, fallback: f32| if v.is_finite() && v >= 0.0 { v } else { fallback };
        let tick_step_ms = if self.tick_step_ms == 0 {
            d.tick_step_ms
        } else {
            self.tick_step_ms
        };
        Self {
            tick_step_ms,
            catchup_step_ms: self.catchup_step_ms.max(tick_step_ms),
            catchup_max_secs: self.catchup_max_secs.max(0),
            energy_decay: rate(self.energy_decay, d.energy_decay),
            hunger_increase: rate(self.hunger_increase, d.hunger_increase),
            mood_decay: rate(self.mood_decay, d.mood_decay),
            health_decay: rate(self.health_decay, d.health_decay),
            resting_energy_gain: rate(self.resting_energy_gain, d.resting_energy_gain),
            auto_feed_threshold: if self.auto_feed_threshold.is_finite() {
                self.auto_feed_threshold.clamp(METER_MIN, METER_MAX)
            } else {
                d.auto_feed_threshold
            },
            feed_reward: self.feed_reward,
            pet_reward: self.pet_reward,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PetRecord {
    pub health: f32,
    pub energy: f32,
    pub hunger: f32,
    pub mood: f32,
    #[serde(default)]
    pub is_dead: bool,
    #[serde(default)]
    pub color: PetColor,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRecord {
    pub balance: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub servings: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackgroundsRecord {
    pub current_theme: String,
}

/// The JSON blob written under the save key. Every section is optional on
/// load so a partial save only restores what it has.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub pet: Option<PetRecord>,
    #[serde(default)]
    pub currency: Option<CurrencyRecord>,
    #[serde(default)]
    pub food: Option<FoodRecord>,
    #[serde(default)]
    pub backgrounds: Option<BackgroundsRecord>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchupSummary {
    pub ticks_simulated: u64,
    pub times_fed: u32,
    pub died: bool,
    pub health_min: f32,
    pub mood_min: f32,
    pub hunger_max: f32,
}

impl CatchupSummary {
    pub fn new() -> Self {
        Self {
            ticks_simulated: 0,
            times_fed: 0,
            died: false,
            health_min: METER_MAX,
            mood_min: METER_MAX,
            hunger_max: METER_MIN,
        }
    }

    pub fn has_anything(&self) -> bool {
        self.ticks_simulated > 0
            && (self.died
                || self.times_fed > 0
                || self.health_min < 60.0
                || self.mood_min < 40.0
                || self.hunger_max > 60.0)
    }

    pub fn record(&mut self, vitals: &PetVitals) {
        self.ticks_simulated += 1;
        self.health_min = self.health_min.min(vitals.health);
        self.mood_min = self.mood_min.min(vitals.mood);
        self.hunger_max = self.hunger_max.max(vitals.hunger);
        if vitals.is_dead {
            self.died = true;
        }
    }
}

impl Default for CatchupSummary {
    fn default() -> Self {
        Self::new()
    }
}
