//! A single virtual pet: four meters that drift every tick, a house to rest
//! in, a pantry it eats from on its own and a wallet it earns into.
//!
//! [`sim::Simulation`] is the entry point. Rendering and input are left to
//! whoever drives it.

pub mod app;
pub mod backdrop;
pub mod config;
pub mod environment;
pub mod error;
pub mod feed;
pub mod hearts;
pub mod house;
pub mod lifecycle;
pub mod model;
pub mod pantry;
pub mod ports;
pub mod sim;
pub mod storage;
pub mod vitals;
pub mod wallet;

pub use environment::{Modifiers, Theme};
pub use error::{HouseError, InteractionError, Refusal, StorageError};
pub use model::{PetVitals, Rules};
pub use sim::{Game, SimEvent, Simulation, TickOutcome};
