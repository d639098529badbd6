//! Capabilities the simulation borrows from the rest of the game.
//!
//! Each trait has a do-nothing implementation so the core runs on its own.
//! `reset` is how a new game reaches the collaborators; the default is to
//! ignore it.

use crate::environment::Theme;

pub trait EnvironmentProvider {
    fn theme(&self) -> Theme;

    fn reset(&mut self) {}
}

pub trait FoodStock {
    fn servings(&self) -> u32;

    /// Remove one serving. Returns false when there was nothing to take.
    fn take_serving(&mut self) -> bool;

    fn reset(&mut self) {}
}

/// One-way sink for coin credits. The simulation never reads a balance back.
pub trait RewardSink {
    fn credit(&mut self, amount: u64, reason: &str);

    fn reset(&mut self) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NeutralEnvironment;

impl EnvironmentProvider for NeutralEnvironment {
    fn theme(&self) -> Theme {
        Theme::Day
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyPantry;

impl FoodStock for EmptyPantry {
    fn servings(&self) -> u32 {
        0
    }

    fn take_serving(&mut self) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NullRewards;

impl RewardSink for NullRewards {
    fn credit(&mut self, _amount: u64, _reason: &str) {}
}
