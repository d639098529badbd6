//! Death and new games.
//!
//! Death itself is detected by the vitals; this module is what a caller
//! does about it. `game_over` is the query a UI polls, `reset` puts the pet
//! and every collaborator back to a fresh game.

use crate::model::Pet;
use crate::ports::{EnvironmentProvider, FoodStock, RewardSink};
use crate::sim::{SimEvent, Simulation};
use log::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOver {
    pub ticks_survived: u64,
}

impl<E, F, R> Simulation<E, F, R>
where
    E: EnvironmentProvider,
    F: FoodStock,
    R: RewardSink,
{
    pub fn game_over(&self) -> Option<GameOver> {
        self.is_frozen().then_some(GameOver {
            ticks_survived: self.ticks,
        })
    }

    /// Start over: fresh pet, empty house, and a reset request to every
    /// collaborator. Works whether or not the pet is dead.
    pub fn reset(&mut self) -> SimEvent {
        self.house.evict(self.pet.id);
        self.pet = Pet::new(self.pet.id, self.spawn_at);
        self.hearts.clear();
        self.ticks = 0;

        self.environment.reset();
        self.food.reset();
        self.rewards.reset();

        info!("new game started");
        SimEvent::Reset
    }
}
