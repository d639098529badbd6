use crate::ports::FoodStock;

pub const STARTING_SERVINGS: u32 = 5;

/// Food on the table. Purchases go through `stock`; the pet only ever eats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pantry {
    servings: u32,
}

impl Default for Pantry {
    fn default() -> Self {
        Self::new(STARTING_SERVINGS)
    }
}

impl Pantry {
    pub fn new(servings: u32) -> Self {
        Self { servings }
    }

    pub fn stock(&mut self, servings: u32) {
        self.servings = self.servings.saturating_add(servings);
    }
}

impl FoodStock for Pantry {
    fn servings(&self) -> u32 {
        self.servings
    }

    fn take_serving(&mut self) -> bool {
        match self.servings.checked_sub(1) {
            Some(left) => {
                self.servings = left;
                true
            }
            None => false,
        }
    }

    fn reset(&mut self) {
        self.servings = STARTING_SERVINGS;
    }
}
