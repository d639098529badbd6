use crate::environment::Modifiers;
use crate::model::{PetVitals, Rules, METER_MAX, METER_MIN};

/// What happened to the meters during one tick. The caller turns these into
/// house transitions and events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VitalsStep {
    /// Energy just bottomed out while awake: the pet must go rest.
    pub exhausted: bool,
    /// Energy is full again while resting: the pet may leave the house.
    pub rested: bool,
    /// Health reached zero on this tick. Fires once.
    pub died: bool,
}

impl PetVitals {
    /// Advance every meter by exactly one tick.
    ///
    /// Order matters: energy first, then mood (which reads the energy value
    /// produced this same tick), then hunger, then health from the updated
    /// meters, then the death edge.
    pub fn advance(&mut self, resting: bool, m: &Modifiers, rules: &Rules) -> VitalsStep {
        let mut step = VitalsStep::default();
        if self.is_dead {
            return step;
        }

        if resting {
            self.energy = clamp_meter(self.energy + rules.resting_energy_gain);
            if self.energy >= METER_MAX {
                step.rested = true;
            }
        } else {
            self.energy = clamp_meter(self.energy - rules.energy_decay * m.energy);

            let drained = if self.energy == METER_MIN { 2.0 } else { 1.0 };
            self.mood = clamp_meter(self.mood - rules.mood_decay * m.mood * drained);

            self.hunger = clamp_meter(self.hunger + rules.hunger_increase * m.hunger);

            if self.energy == METER_MIN && !self.exhausted {
                self.exhausted = true;
                step.exhausted = true;
            }
        }
        if self.energy > METER_MIN {
            self.exhausted = false;
        }

        let strain = self.strain();
        if strain > 0 {
            let loss = rules.health_decay * strain as f32 * m.health;
            self.health = clamp_meter(self.health - loss);
        }

        if self.health <= METER_MIN && !self.is_dead {
            self.is_dead = true;
            step.died = true;
        }

        step
    }

    /// Number of meters sitting at their bad extreme.
    pub fn strain(&self) -> u32 {
        [
            self.energy == METER_MIN,
            self.mood == METER_MIN,
            self.hunger == METER_MAX,
        ]
        .iter()
        .filter(|b| **b)
        .count() as u32
    }

    pub fn clamp(&mut self) {
        self.health = clamp_meter(self.health);
        self.energy = clamp_meter(self.energy);
        self.hunger = clamp_meter(self.hunger);
        self.mood = clamp_meter(self.mood);
    }
}

/// Clamp into `[0, 100]`; NaN collapses to 0.
pub fn clamp_meter(v: f32) -> f32 {
    if v.is_nan() {
        METER_MIN
    } else {
        v.clamp(METER_MIN, METER_MAX)
    }
}
