//! The house: a single resting slot.
//!
//! Occupancy is the whole state machine. An empty slot means every pet is
//! active; an occupied slot means that pet is resting. The house does not
//! police who may interact with a resting pet, it only answers "is anyone
//! in" and "who".

use crate::error::HouseError;
use crate::model::{PetId, Position};
use log::info;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct House {
    door: Position,
    occupant: Option<PetId>,
}

impl House {
    pub fn new(door: Position) -> Self {
        Self {
            door,
            occupant: None,
        }
    }

    pub fn door(&self) -> Position {
        self.door
    }

    pub fn set_door(&mut self, door: Position) {
        self.door = door;
    }

    /// Put `pet` in the house and hand back where it should be shown.
    /// Entering twice is harmless for the pet already inside.
    pub fn enter(&mut self, pet: PetId) -> Result<Position, HouseError> {
        match self.occupant {
            Some(other) if other != pet => Err(HouseError::Occupied(other)),
            Some(_) => Ok(self.door),
            None => {
                self.occupant = Some(pet);
                info!("pet {} is now resting in the house", pet);
                Ok(self.door)
            }
        }
    }

    pub fn leave(&mut self) -> Option<PetId> {
        let left = self.occupant.take();
        if let Some(pet) = left {
            info!("pet {} has left the house", pet);
        }
        left
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<PetId> {
        self.occupant
    }

    pub fn is_resting(&self, pet: PetId) -> bool {
        self.occupant == Some(pet)
    }

    /// Empty the slot if `pet` is the one inside.
    pub fn evict(&mut self, pet: PetId) -> bool {
        if self.is_resting(pet) {
            self.occupant = None;
            true
        } else {
            false
        }
    }
}
