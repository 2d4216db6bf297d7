//! Save and load.
//!
//! A save is three separately stored values in the save directory: the
//! world data as JSON text, the season index, and the year. There is no
//! version field; loading replaces the live world in place and only fails
//! when one of the three values is absent or unreadable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::world::{Season, World, WorldData};

pub const WORLD_FILE: &str = "world.json";
pub const SEASON_FILE: &str = "season.txt";
pub const YEAR_FILE: &str = "year.txt";
const META_FILE: &str = "meta.json";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no saved game data found in {}", .0.display())]
    NoSaveData(PathBuf),
    #[error("save io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("save decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unreadable season or year value: {0:?}")]
    Corrupt(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveMeta {
    saved_at: chrono::DateTime<chrono::Utc>,
    year: u64,
}

pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save(&self, world: &World) -> Result<(), SaveError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&world.data())?;
        fs::write(self.dir.join(WORLD_FILE), json)?;
        fs::write(self.dir.join(SEASON_FILE), world.season.index().to_string())?;
        fs::write(self.dir.join(YEAR_FILE), world.year.to_string())?;
        let meta = SaveMeta {
            saved_at: chrono::Utc::now(),
            year: world.year,
        };
        fs::write(self.dir.join(META_FILE), serde_json::to_string_pretty(&meta)?)?;
        Ok(())
    }

    /// Replace the live world's entity lists, season, and year with the
    /// stored ones. The day clock and speed belong to the host and are not
    /// part of a save.
    pub fn load_into(&self, world: &mut World) -> Result<(), SaveError> {
        let world_path = self.dir.join(WORLD_FILE);
        let season_path = self.dir.join(SEASON_FILE);
        let year_path = self.dir.join(YEAR_FILE);
        if !world_path.exists() || !season_path.exists() || !year_path.exists() {
            return Err(SaveError::NoSaveData(self.dir.clone()));
        }

        let data: WorldData = serde_json::from_str(&fs::read_to_string(world_path)?)?;
        let season_raw = fs::read_to_string(season_path)?;
        let season_index: u8 = season_raw
            .trim()
            .parse()
            .map_err(|_| SaveError::Corrupt(season_raw.clone()))?;
        let year_raw = fs::read_to_string(year_path)?;
        let year: u64 = year_raw
            .trim()
            .parse()
            .map_err(|_| SaveError::Corrupt(year_raw.clone()))?;

        world.restore(data, Season::from_index(season_index), year);
        Ok(())
    }
}
