use crate::backdrop::Backdrop;
use crate::environment::Modifiers;
use crate::error::{InteractionError, Refusal};
use crate::feed::auto_feed;
use crate::hearts::Hearts;
use crate::house::House;
use crate::model::{CatchupSummary, Pet, PetId, Position, Rules};
use crate::pantry::Pantry;
use crate::ports::{
    EmptyPantry, EnvironmentProvider, FoodStock, NeutralEnvironment, NullRewards, RewardSink,
};
use crate::wallet::Wallet;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use log::{info, warn};

pub const FEED_REASON: &str = "pet fed";
pub const PET_REASON: &str = "pet interaction";

/// Ticks between the follow-up hearts of a single interaction.
const HEART_GAP_TICKS: u32 = 6;

#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    /// Energy ran out; the pet was put in the house.
    ForcedRest { at: Position },
    /// The pet left the house and is back at `at`.
    WokeUp { at: Position },
    Eating { servings_left: u32 },
    Credit { amount: u64, reason: &'static str },
    Died,
    Reset,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    pub events: Vec<SimEvent>,
    /// The pet is dead; nothing will change until a reset.
    pub frozen: bool,
}

/// The game with real collaborators.
pub type Game = Simulation<Backdrop, Pantry, Wallet>;

/// One pet, its house and the collaborators it talks to.
///
/// The collaborators are type parameters so callers keep concrete access to
/// them (the game saves the wallet balance, tests inspect the pantry). The
/// defaults are the no-op ports, which is what a bare simulation runs on.
#[derive(Clone, Debug)]
pub struct Simulation<E = NeutralEnvironment, F = EmptyPantry, R = NullRewards> {
    pub rules: Rules,
    pub pet: Pet,
    pub house: House,
    pub hearts: Hearts,
    pub environment: E,
    pub food: F,
    pub rewards: R,
    pub(crate) spawn_at: Position,
    pub(crate) ticks: u64,
}

impl Simulation {
    pub fn standalone(rules: Rules) -> Self {
        Self::with_collaborators(rules, NeutralEnvironment, EmptyPantry, NullRewards)
    }
}

impl Game {
    pub fn new_game(rules: Rules) -> Self {
        Self::with_collaborators(rules, Backdrop::default(), Pantry::default(), Wallet::default())
    }
}

impl<E, F, R> Simulation<E, F, R>
where
    E: EnvironmentProvider,
    F: FoodStock,
    R: RewardSink,
{
    pub fn with_collaborators(rules: Rules, environment: E, food: F, rewards: R) -> Self {
        let spawn_at = Position::default();
        Self {
            rules,
            pet: Pet::new(PetId(1), spawn_at),
            house: House::default(),
            hearts: Hearts::default(),
            environment,
            food,
            rewards,
            spawn_at,
            ticks: 0,
        }
    }

    /// Where the pet appears on a new game, and where the house door is.
    pub fn with_layout(mut self, spawn_at: Position, door: Position) -> Self {
        self.spawn_at = spawn_at;
        self.pet.position = spawn_at;
        self.pet.active_position = spawn_at;
        self.house.set_door(door);
        self
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_resting(&self) -> bool {
        self.house.is_resting(self.pet.id)
    }

    /// True once the pet has died. Callers must not offer interactions then.
    pub fn is_frozen(&self) -> bool {
        self.pet.vitals.is_dead
    }

    pub fn can_interact(&self) -> bool {
        self.check_interactive().is_ok()
    }

    /// Run one simulation step.
    ///
    /// Meters move first, then the death edge, then auto-feed. A pet that
    /// dies this tick does not eat or change house state.
    pub fn tick(&mut self) -> TickOutcome {
        let mut out = TickOutcome::default();
        self.hearts.advance();

        if self.pet.vitals.is_dead {
            out.frozen = true;
            return out;
        }
        self.ticks += 1;

        let modifiers = Modifiers::for_theme(self.environment.theme());
        let resting = self.is_resting();
        let step = self.pet.vitals.advance(resting, &modifiers, &self.rules);

        if step.died {
            info!("pet {} died after {} ticks", self.pet.id, self.ticks);
            out.events.push(SimEvent::Died);
            out.frozen = true;
            return out;
        }

        if step.rested && resting {
            info!("energy restored; pet is leaving the house");
            out.events.push(SimEvent::WokeUp { at: self.wake() });
        }

        if step.exhausted && !resting {
            match self.send_to_house() {
                Ok(at) => {
                    info!("energy drained; pet is forced to rest in the house");
                    out.events.push(SimEvent::ForcedRest { at });
                }
                Err(err) => warn!("pet {} is exhausted but cannot rest: {}", self.pet.id, err),
            }
        }

        if !self.is_resting() {
            if let Some(fed) = auto_feed(&mut self.pet.vitals, &mut self.food, &self.rules) {
                self.rewards.credit(fed.reward, FEED_REASON);
                out.events.push(SimEvent::Eating {
                    servings_left: fed.servings_left,
                });
                out.events.push(SimEvent::Credit {
                    amount: fed.reward,
                    reason: FEED_REASON,
                });
            }
        }

        out
    }

    /// Pat the pet: a coin and a few hearts.
    pub fn pet(&mut self) -> Result<(), InteractionError> {
        self.check_interactive()?;
        self.rewards.credit(self.rules.pet_reward, PET_REASON);
        self.hearts.spawn(None);
        self.hearts.schedule(HEART_GAP_TICKS, None);
        self.hearts.schedule(HEART_GAP_TICKS * 2, None);
        Ok(())
    }

    pub fn change_color(&mut self) -> Result<(), InteractionError> {
        self.check_interactive()?;
        self.pet.color = self.pet.color.next();
        let color = Some(self.pet.color);
        self.hearts.spawn(color);
        for i in 1..=3 {
            self.hearts.schedule(HEART_GAP_TICKS * i, color);
        }
        Ok(())
    }

    /// Drag the pet somewhere. It will come back here after resting.
    pub fn move_to(&mut self, to: Position) -> Result<(), InteractionError> {
        self.check_interactive()?;
        self.pet.position = to;
        self.pet.active_position = to;
        Ok(())
    }

    pub fn enter_house(&mut self) -> Result<Position, InteractionError> {
        self.check_interactive()?;
        let at = self.send_to_house()?;
        Ok(at)
    }

    pub fn leave_house(&mut self) -> Result<Position, InteractionError> {
        if self.pet.vitals.is_dead {
            return Err(InteractionError::NotPermitted(Refusal::Dead));
        }
        if !self.is_resting() {
            return Err(InteractionError::NotPermitted(Refusal::Awake));
        }
        Ok(self.wake())
    }

    fn check_interactive(&self) -> Result<(), InteractionError> {
        if self.pet.vitals.is_dead {
            Err(InteractionError::NotPermitted(Refusal::Dead))
        } else if self.is_resting() {
            Err(InteractionError::NotPermitted(Refusal::Resting))
        } else {
            Ok(())
        }
    }

    fn send_to_house(&mut self) -> Result<Position, InteractionError> {
        let at = self.house.enter(self.pet.id)?;
        self.pet.active_position = self.pet.position;
        self.pet.position = at;
        Ok(at)
    }

    fn wake(&mut self) -> Position {
        self.house.evict(self.pet.id);
        self.pet.position = self.pet.active_position;
        self.pet.position
    }
}

/// Replay the time the game was closed, in fixed steps, until the pet dies
/// or the (capped) gap is used up.
pub fn catch_up<E, F, R>(
    sim: &mut Simulation<E, F, R>,
    last_seen: DateTime<Utc>,
    now: DateTime<Utc>,
) -> CatchupSummary
where
    E: EnvironmentProvider,
    F: FoodStock,
    R: RewardSink,
{
    let rules = sim.rules.clone();
    let elapsed = now - last_seen;
    let max_elapsed = ChronoDuration::seconds(rules.catchup_max_secs.max(0));
    let elapsed = elapsed.clamp(ChronoDuration::zero(), max_elapsed);

    let mut summary = CatchupSummary::new();

    let tick_ms = rules.tick_step_ms.max(1) as i64;
    // a chunk shorter than one tick would never advance
    let catch_step = ChronoDuration::milliseconds((rules.catchup_step_ms as i64).max(tick_ms));

    let mut remaining = elapsed;

    while remaining > ChronoDuration::zero() && !sim.is_frozen() {
        let step = if remaining < catch_step {
            remaining
        } else {
            catch_step
        };
        let ticks = (step.num_milliseconds() / tick_ms).max(0) as u64;
        if ticks == 0 {
            break;
        }
        for _ in 0..ticks {
            let out = sim.tick();
            summary.times_fed += out
                .events
                .iter()
                .filter(|e| matches!(e, SimEvent::Eating { .. }))
                .count() as u32;
            summary.record(&sim.pet.vitals);
            if out.frozen {
                break;
            }
        }
        remaining = remaining - ChronoDuration::milliseconds(ticks as i64 * tick_ms);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Theme;
    use crate::model::PetVitals;

    fn vitals(health: f32, energy: f32, hunger: f32, mood: f32) -> PetVitals {
        PetVitals {
            health,
            energy,
            hunger,
            mood,
            ..PetVitals::default()
        }
    }

    #[test]
    fn forced_rest_takes_effect_next_tick() {
        let mut sim = Simulation::standalone(Rules::default())
            .with_layout(Position::new(5.0, 5.0), Position::new(90.0, 80.0));
        sim.pet.vitals = vitals(100.0, 0.02, 0.0, 100.0);

        let out = sim.tick();
        assert_eq!(
            out.events,
            vec![SimEvent::ForcedRest {
                at: Position::new(90.0, 80.0)
            }]
        );
        assert!(sim.is_resting());
        assert_eq!(sim.pet.active_position, Position::new(5.0, 5.0));

        let hunger = sim.pet.vitals.hunger;
        sim.tick();
        assert_eq!(sim.pet.vitals.energy, 0.25);
        assert_eq!(sim.pet.vitals.hunger, hunger);
    }

    #[test]
    fn wakes_on_the_tick_energy_is_full() {
        let mut sim = Simulation::standalone(Rules::default())
            .with_layout(Position::new(1.0, 2.0), Position::new(9.0, 9.0));
        sim.enter_house().unwrap();
        sim.pet.vitals.energy = 99.8;

        let out = sim.tick();
        assert_eq!(
            out.events,
            vec![SimEvent::WokeUp {
                at: Position::new(1.0, 2.0)
            }]
        );
        assert!(!sim.is_resting());
        assert_eq!(sim.pet.position, Position::new(1.0, 2.0));
    }

    #[test]
    fn exhausted_pet_is_not_resent_every_tick() {
        let mut sim = Simulation::standalone(Rules::default());
        sim.pet.vitals = vitals(100.0, 0.01, 0.0, 100.0);
        sim.tick();
        assert!(sim.is_resting());

        // player drags it out while still empty
        sim.leave_house().unwrap();
        for _ in 0..5 {
            let out = sim.tick();
            assert!(out.events.is_empty());
        }
        assert!(!sim.is_resting());
    }

    #[test]
    fn night_slows_energy_loss() {
        let mut night = Simulation::with_collaborators(
            Rules::default(),
            Backdrop::new(Theme::Night),
            EmptyPantry,
            NullRewards,
        );
        let mut day = Simulation::with_collaborators(
            Rules::default(),
            Backdrop::new(Theme::Day),
            EmptyPantry,
            NullRewards,
        );
        for _ in 0..500 {
            night.tick();
            day.tick();
        }
        assert!(night.pet.vitals.energy > day.pet.vitals.energy);
        assert!((100.0 - night.pet.vitals.energy) < (100.0 - day.pet.vitals.energy) * 0.51);
    }

    #[test]
    fn auto_feed_consumes_and_credits() {
        let mut sim = Game::new_game(Rules::default());
        sim.food = Pantry::new(1);
        sim.pet.vitals.hunger = 80.0;

        let out = sim.tick();
        assert_eq!(sim.pet.vitals.hunger, 0.0);
        assert_eq!(sim.food, Pantry::new(0));
        assert_eq!(sim.rewards.balance(), 905);
        assert!(out.events.contains(&SimEvent::Eating { servings_left: 0 }));
        assert!(out.events.contains(&SimEvent::Credit {
            amount: 5,
            reason: FEED_REASON
        }));

        sim.pet.vitals.hunger = 80.0;
        let out = sim.tick();
        assert!(out.events.is_empty());
        assert!(sim.pet.vitals.hunger > 80.0);
    }

    #[test]
    fn dying_tick_skips_feeding_and_freezes() {
        let mut sim = Game::new_game(Rules::default());
        sim.pet.vitals = vitals(0.1, 0.0, 100.0, 0.0);

        let out = sim.tick();
        assert_eq!(out.events, vec![SimEvent::Died]);
        assert!(out.frozen);
        assert!(sim.is_frozen());
        assert_eq!(sim.food.servings(), 5);

        let before = sim.pet.vitals;
        for _ in 0..10 {
            let out = sim.tick();
            assert!(out.frozen);
            assert!(out.events.is_empty());
        }
        assert_eq!(sim.pet.vitals, before);
    }

    #[test]
    fn interactions_are_refused_while_resting_or_dead() {
        let mut sim = Game::new_game(Rules::default());
        sim.enter_house().unwrap();
        assert_eq!(
            sim.pet(),
            Err(InteractionError::NotPermitted(Refusal::Resting))
        );
        assert_eq!(
            sim.enter_house(),
            Err(InteractionError::NotPermitted(Refusal::Resting))
        );
        sim.leave_house().unwrap();
        assert_eq!(
            sim.leave_house(),
            Err(InteractionError::NotPermitted(Refusal::Awake))
        );

        sim.pet.vitals.is_dead = true;
        assert_eq!(sim.pet(), Err(InteractionError::NotPermitted(Refusal::Dead)));
        assert_eq!(
            sim.change_color(),
            Err(InteractionError::NotPermitted(Refusal::Dead))
        );
        assert!(!sim.can_interact());
        assert_eq!(sim.rewards.balance(), 900);
    }

    #[test]
    fn petting_pays_a_coin_and_schedules_hearts() {
        let mut sim = Game::new_game(Rules::default());
        sim.pet().unwrap();
        assert_eq!(sim.rewards.balance(), 901);
        assert_eq!(sim.hearts.live().len(), 1);
        assert_eq!(sim.hearts.pending(), 2);
        for _ in 0..12 {
            sim.tick();
        }
        assert_eq!(sim.hearts.live().len(), 3);
    }

    #[test]
    fn busy_house_leaves_pet_outside() {
        let mut sim = Simulation::standalone(Rules::default());
        sim.house.enter(PetId(42)).unwrap();
        sim.pet.vitals = vitals(100.0, 0.01, 0.0, 100.0);
        let out = sim.tick();
        assert!(out.events.is_empty());
        assert!(!sim.is_resting());
        assert_eq!(sim.house.occupant(), Some(PetId(42)));
    }

    #[test]
    fn catch_up_runs_capped_ticks() {
        let rules = Rules {
            catchup_max_secs: 2,
            ..Rules::default()
        };
        let mut sim = Simulation::standalone(rules);
        let now = Utc::now();
        let summary = catch_up(&mut sim, now - ChronoDuration::hours(3), now);
        // 2000ms at 16ms per tick
        assert_eq!(summary.ticks_simulated, 125);
        assert_eq!(sim.ticks(), 125);
    }

    #[test]
    fn catch_up_chunks_shorter_than_a_tick_still_advance() {
        let rules = Rules {
            catchup_step_ms: 10,
            catchup_max_secs: 3600,
            ..Rules::default()
        };
        let mut sim = Simulation::standalone(rules);
        let now = Utc::now();
        let summary = catch_up(&mut sim, now - ChronoDuration::hours(1), now);
        assert!(summary.ticks_simulated > 0);
        assert_eq!(summary.ticks_simulated, sim.ticks());
    }

    #[test]
    fn catch_up_ignores_clock_going_backwards() {
        let mut sim = Simulation::standalone(Rules::default());
        let now = Utc::now();
        let summary = catch_up(&mut sim, now + ChronoDuration::minutes(5), now);
        assert_eq!(summary.ticks_simulated, 0);
        assert!(!summary.has_anything());
    }

    #[test]
    fn catch_up_stops_at_death() {
        let mut sim = Simulation::standalone(Rules::default());
        sim.pet.vitals = vitals(1.0, 0.0, 100.0, 0.0);
        let now = Utc::now();
        let summary = catch_up(&mut sim, now - ChronoDuration::hours(1), now);
        assert!(summary.died);
        assert!(summary.has_anything());
        assert_eq!(summary.health_min, 0.0);
        // 1.0 health at 0.12 per tick
        assert!(summary.ticks_simulated < 20);
    }
}
