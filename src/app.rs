use crate::config::{load_settings, project_paths, save_settings_atomic, Paths, Settings};
use crate::lifecycle::GameOver;
use crate::model::{CatchupSummary, Rules};
use crate::ports::{EnvironmentProvider, FoodStock};
use crate::sim::{catch_up, Game, SimEvent};
use crate::storage::{restore, snapshot, FileStore, GameStorage, KeyValueStore};
use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::io::{self, Write};
use std::time::{Duration, Instant};

pub struct App {
    settings: Settings,
    paths: Paths,
    storage: GameStorage<FileStore>,
    game: Game,
    should_quit: bool,
    autosave_at: Instant,
}

/// What startup found in the save slot.
pub struct Resumed {
    pub game: Game,
    /// Offline catch-up, when there was a save to catch up from.
    pub recap: Option<CatchupSummary>,
    /// The saved pet was dead, or died while away; `game` is a fresh one.
    pub buried: Option<GameOver>,
}

/// Load the saved game, replay the time spent away and start over if the
/// pet did not make it. A dead pet is never handed back to the loop.
pub fn resume<S: KeyValueStore>(
    storage: &GameStorage<S>,
    rules: Rules,
    now: DateTime<Utc>,
) -> Resumed {
    let mut game = Game::new_game(rules);
    let mut recap = None;

    if let Some(save) = storage.load_game() {
        restore(&mut game, &save);
        recap = Some(catch_up(&mut game, save.saved_at, now));
    }

    let buried = game.game_over();
    if buried.is_some() {
        game.reset();
    }

    Resumed {
        game,
        recap,
        buried,
    }
}

impl App {
    fn init() -> Result<Self> {
        let paths = project_paths()?;
        let settings = load_settings(&paths.settings_path);
        let storage = GameStorage::new(FileStore::new(&paths.data_dir));

        let Resumed {
            game,
            recap,
            buried,
        } = resume(&storage, settings.rules.clone(), Utc::now());

        if let Some(summary) = recap.filter(|s| s.has_anything()) {
            println!(
                "While you were away: {} ticks, fed {} times, lowest health {:.1}, lowest mood {:.1}, hungriest {:.1}{}",
                summary.ticks_simulated,
                summary.times_fed,
                summary.health_min,
                summary.mood_min,
                summary.hunger_max,
                if summary.died { ", and your pet passed on" } else { "" },
            );
        }
        if buried.is_some() {
            println!("Your last pet did not make it. A new one is waiting for you.");
        }
        let theme = game.environment.theme();
        println!("{}: {}", theme.name(), theme.description());

        Ok(Self {
            autosave_at: Instant::now() + Duration::from_secs(settings.autosave_secs.max(1)),
            settings,
            paths,
            storage,
            game,
            should_quit: false,
        })
    }

    fn run(&mut self) -> Result<()> {
        let sim_step = Duration::from_millis(self.game.rules.tick_step_ms.max(1));
        let status_every = Duration::from_secs(self.settings.status_every_secs.max(1));
        let deadline = self
            .settings
            .run_secs
            .map(|s| Instant::now() + Duration::from_secs(s));

        let mut last_frame = Instant::now();
        let mut sim_accum = Duration::ZERO;
        let mut status_at = Instant::now();

        while !self.should_quit {
            // sim fixed-step
            let now = Instant::now();
            let real_dt = now.saturating_duration_since(last_frame);
            last_frame = now;
            sim_accum = sim_accum.saturating_add(real_dt);

            while sim_accum >= sim_step {
                let out = self.game.tick();
                sim_accum = sim_accum.saturating_sub(sim_step);
                for ev in &out.events {
                    self.announce(ev);
                }
                if out.frozen {
                    self.on_game_over()?;
                    break;
                }
            }

            if Instant::now() >= status_at {
                self.print_status()?;
                status_at = Instant::now() + status_every;
            }

            // autosave
            if Instant::now() >= self.autosave_at {
                self.save_now();
                self.autosave_at =
                    Instant::now() + Duration::from_secs(self.settings.autosave_secs.max(1));
            }

            if deadline.is_some_and(|d| Instant::now() >= d) {
                self.should_quit = true;
            }

            std::thread::sleep(sim_step);
        }

        self.save_now();
        save_settings_atomic(&self.paths.settings_path, &self.settings)?;
        Ok(())
    }

    fn on_game_over(&mut self) -> Result<()> {
        if let Some(over) = self.game.game_over() {
            println!(
                "Your pet has passed on after {} ticks.",
                over.ticks_survived
            );
        }
        if self.settings.auto_restart {
            let ev = self.game.reset();
            self.announce(&ev);
        } else {
            self.should_quit = true;
        }
        Ok(())
    }

    fn announce(&self, ev: &SimEvent) {
        match ev {
            SimEvent::ForcedRest { .. } => println!("Out of energy, off to the house."),
            SimEvent::WokeUp { .. } => println!("Fully rested and back outside."),
            SimEvent::Eating { servings_left } => {
                println!("Nom nom! {} servings left.", servings_left)
            }
            SimEvent::Credit { amount, reason } => info!("+{} coins ({})", amount, reason),
            SimEvent::Died => {}
            SimEvent::Reset => println!("New game started!"),
        }
    }

    fn print_status(&self) -> Result<()> {
        let v = &self.game.pet.vitals;
        let mut out = io::stdout().lock();
        writeln!(
            out,
            "[{}] health {:5.1} energy {:5.1} hunger {:5.1} mood {:5.1} | food {} | coins {} | {}",
            self.game.environment.theme().name(),
            v.health,
            v.energy,
            v.hunger,
            v.mood,
            self.game.food.servings(),
            self.game.rewards.balance(),
            if self.game.is_frozen() {
                "dead"
            } else if self.game.is_resting() {
                "resting"
            } else {
                "awake"
            },
        )?;
        out.flush()?;
        Ok(())
    }

    fn save_now(&mut self) {
        let save = snapshot(&self.game, Utc::now());
        if !self.storage.save_game(&save) {
            warn!("autosave skipped; keeping the previous save");
        }
    }
}

pub fn run() -> Result<()> {
    let mut app = App::init()?;
    app.run()?;
    Ok(())
}
