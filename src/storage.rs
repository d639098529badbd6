use crate::config::atomic_rename;
use crate::environment::Theme;
use crate::error::StorageError;
use crate::model::{
    BackgroundsRecord, CurrencyRecord, FoodRecord, PetRecord, SaveData, SAVE_VERSION,
};
use crate::pantry::Pantry;
use crate::ports::{EnvironmentProvider, FoodStock};
use crate::sim::Game;
use chrono::{DateTime, Utc};
use log::{error, info};
use std::collections::HashMap;
use std::{fs, path::PathBuf};

pub const SAVE_KEY: &str = "pocketpet-save";

/// A flat string-keyed store, the shape of a browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Returns whether anything was there.
    fn remove(&mut self, key: &str) -> Result<bool, StorageError>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        atomic_rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// Save slot on top of a key-value store.
///
/// Failures are logged and reported as `false`/`None`; the caller's game is
/// never touched by a failed load.
pub struct GameStorage<S> {
    store: S,
    key: String,
    last_save: Option<DateTime<Utc>>,
}

impl<S: KeyValueStore> GameStorage<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, SAVE_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
            last_save: None,
        }
    }

    pub fn save_game(&mut self, data: &SaveData) -> bool {
        match self.try_save(data) {
            Ok(()) => {
                self.last_save = Some(data.saved_at);
                info!("game saved");
                true
            }
            Err(e) => {
                error!("failed to save game: {}", e);
                false
            }
        }
    }

    /// `None` both when nothing is saved and when the save is unreadable.
    pub fn load_game(&self) -> Option<SaveData> {
        match self.try_load() {
            Ok(Some(data)) => {
                info!("game data loaded");
                Some(data)
            }
            Ok(None) => {
                info!("no saved game found");
                None
            }
            Err(e) => {
                error!("failed to load game: {}", e);
                None
            }
        }
    }

    pub fn has_saved_game(&self) -> bool {
        matches!(self.store.get(&self.key), Ok(Some(_)))
    }

    pub fn clear_saved_game(&mut self) -> bool {
        match self.store.remove(&self.key) {
            Ok(_) => {
                info!("saved game cleared");
                true
            }
            Err(e) => {
                error!("failed to clear saved game: {}", e);
                false
            }
        }
    }

    pub fn last_save_time(&self) -> Option<DateTime<Utc>> {
        self.last_save
    }

    fn try_save(&mut self, data: &SaveData) -> Result<(), StorageError> {
        let json = serde_json::to_string(data)?;
        self.store.set(&self.key, &json)
    }

    fn try_load(&self) -> Result<Option<SaveData>, StorageError> {
        match self.store.get(&self.key)? {
            Some(s) => Ok(Some(serde_json::from_str(&s)?)),
            None => Ok(None),
        }
    }
}

pub fn snapshot(game: &Game, now: DateTime<Utc>) -> SaveData {
    let v = &game.pet.vitals;
    SaveData {
        version: SAVE_VERSION,
        saved_at: now,
        pet: Some(PetRecord {
            health: v.health,
            energy: v.energy,
            hunger: v.hunger,
            mood: v.mood,
            is_dead: v.is_dead,
            color: game.pet.color,
        }),
        currency: Some(CurrencyRecord {
            balance: game.rewards.balance(),
        }),
        food: Some(FoodRecord {
            servings: game.food.servings(),
        }),
        backgrounds: Some(BackgroundsRecord {
            current_theme: game.environment.theme().id().to_string(),
        }),
    }
}

/// Copy whatever sections the save has into `game`.
pub fn restore(game: &mut Game, data: &SaveData) {
    if let Some(pet) = &data.pet {
        let v = &mut game.pet.vitals;
        v.health = pet.health;
        v.energy = pet.energy;
        v.hunger = pet.hunger;
        v.mood = pet.mood;
        v.is_dead = pet.is_dead;
        v.clamp();
        game.pet.color = pet.color;
    }
    if let Some(currency) = &data.currency {
        game.rewards.reset_balance(currency.balance);
    }
    if let Some(food) = &data.food {
        game.food = Pantry::new(food.servings);
    }
    if let Some(bg) = &data.backgrounds {
        game.environment.set_theme(Theme::from_id(&bg.current_theme));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rules;

    #[test]
    fn empty_store_is_not_an_error() {
        let storage = GameStorage::new(MemoryStore::default());
        assert!(!storage.has_saved_game());
        assert_eq!(storage.load_game(), None);
        assert_eq!(storage.last_save_time(), None);
    }

    #[test]
    fn corrupt_save_loads_as_none() {
        let mut store = MemoryStore::default();
        store.set(SAVE_KEY, "{not json").unwrap();
        let storage = GameStorage::new(store);
        assert!(storage.has_saved_game());
        assert_eq!(storage.load_game(), None);
    }

    #[test]
    fn older_saves_without_dead_flag_load_alive() {
        let json = r#"{
            "version": 1,
            "saved_at": "2025-01-01T00:00:00Z",
            "pet": {"health": 12.5, "energy": 40.0, "hunger": 70.0, "mood": 3.0}
        }"#;
        let mut store = MemoryStore::default();
        store.set(SAVE_KEY, json).unwrap();
        let data = GameStorage::new(store).load_game().unwrap();

        let mut game = Game::new_game(Rules::default());
        restore(&mut game, &data);
        assert!(!game.pet.vitals.is_dead);
        assert_eq!(game.pet.vitals.health, 12.5);
        assert_eq!(game.pet.vitals.mood, 3.0);
        // sections absent from the save keep their current values
        assert_eq!(game.food.servings(), 5);
        assert_eq!(game.rewards.balance(), 900);
    }

    #[test]
    fn clear_removes_the_slot() {
        let mut storage = GameStorage::new(MemoryStore::default());
        let game = Game::new_game(Rules::default());
        assert!(storage.save_game(&snapshot(&game, Utc::now())));
        assert!(storage.has_saved_game());
        assert!(storage.clear_saved_game());
        assert!(!storage.has_saved_game());
    }
}
