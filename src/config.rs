use crate::model::Rules;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub status_every_secs: u64,
    pub autosave_secs: u64,
    /// Stop after this many seconds; `None` runs until the pet dies.
    #[serde(default)]
    pub run_secs: Option<u64>,
    /// Start a new game straight away when the pet dies.
    #[serde(default)]
    pub auto_restart: bool,
    #[serde(default)]
    pub rules: Rules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            status_every_secs: 1,
            autosave_secs: 10,
            run_secs: None,
            auto_restart: false,
            rules: Rules::default(),
        }
    }
}

pub struct Paths {
    pub data_dir: PathBuf,
    pub settings_path: PathBuf,
}

pub fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "pocketpet", "PocketPet")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir)
        .with_context(|| format!("could not create data dir {}", dir.display()))?;
    Ok(Paths {
        settings_path: dir.join("settings.json"),
        data_dir: dir,
    })
}

/// Missing or unreadable settings fall back to defaults, and rule values
/// that make no sense are replaced by the default for that field.
pub fn load_settings(path: &Path) -> Settings {
    let s = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => return Settings::default(),
    };
    match serde_json::from_str::<Settings>(&s) {
        Ok(v) => Settings {
            rules: v.rules.sanitized(),
            ..v
        },
        Err(e) => {
            warn!("ignoring settings at {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

pub fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data)?;
    atomic_rename(&tmp, path)?;
    Ok(())
}

pub fn atomic_rename(from: &Path, to: &Path) -> io::Result<()> {
    // rename does not replace an existing file everywhere
    if to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to)
}
