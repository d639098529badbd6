use crate::model::{PetVitals, Rules, METER_MIN};
use crate::ports::FoodStock;
use log::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedEvent {
    pub reward: u64,
    pub servings_left: u32,
}

/// Eat one serving if the pet is hungry enough and there is food.
///
/// Dead pets don't eat. A pet past the threshold with an empty pantry just
/// keeps getting hungrier.
pub fn auto_feed(
    vitals: &mut PetVitals,
    food: &mut dyn FoodStock,
    rules: &Rules,
) -> Option<FeedEvent> {
    if vitals.is_dead || vitals.hunger <= rules.auto_feed_threshold {
        return None;
    }
    if food.servings() == 0 || !food.take_serving() {
        return None;
    }
    vitals.hunger = METER_MIN;
    info!("pet ate a serving, {} left", food.servings());
    Some(FeedEvent {
        reward: rules.feed_reward,
        servings_left: food.servings(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pantry::Pantry;
    use crate::ports::EmptyPantry;

    fn hungry(hunger: f32) -> PetVitals {
        PetVitals {
            hunger,
            ..PetVitals::default()
        }
    }

    #[test]
    fn eats_once_above_threshold() {
        let rules = Rules::default();
        let mut v = hungry(80.0);
        let mut food = Pantry::new(1);
        let ev = auto_feed(&mut v, &mut food, &rules);
        assert_eq!(
            ev,
            Some(FeedEvent {
                reward: 5,
                servings_left: 0
            })
        );
        assert_eq!(v.hunger, 0.0);
        assert_eq!(food.servings(), 0);

        v.hunger = 80.0;
        assert_eq!(auto_feed(&mut v, &mut food, &rules), None);
        assert_eq!(v.hunger, 80.0);
    }

    #[test]
    fn threshold_is_strict() {
        let rules = Rules::default();
        let mut v = hungry(75.0);
        let mut food = Pantry::new(3);
        assert_eq!(auto_feed(&mut v, &mut food, &rules), None);
        assert_eq!(food.servings(), 3);
    }

    #[test]
    fn empty_stock_and_dead_pets_do_nothing() {
        let rules = Rules::default();
        let mut v = hungry(99.0);
        assert_eq!(auto_feed(&mut v, &mut EmptyPantry, &rules), None);

        v.is_dead = true;
        let mut food = Pantry::new(2);
        assert_eq!(auto_feed(&mut v, &mut food, &rules), None);
        assert_eq!(food.servings(), 2);
    }
}
