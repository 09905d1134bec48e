//! RON tuning loader
//!
//! Loads progression tuning from an external RON file, with fallback to
//! the standard constants.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::progression::{LevelCurve, UnlockPlan};
use crate::world::DensityGrid;

/// Default location of the tuning file, relative to the working directory
pub const DEFAULT_TUNING_PATH: &str = "assets/data/tuning.ron";

/// Tuning load/validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize tuning: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// All progression knobs in one place
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub unlocks: UnlockPlan,
    pub levels: LevelCurve,
    pub density: DensityGrid,
}

impl Tuning {
    /// Load from the default path, falling back to the standard tuning
    pub fn new() -> Self {
        Self::load_or_default(Path::new(DEFAULT_TUNING_PATH))
    }

    /// Parse and validate a RON document
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = ron::from_str(content)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    /// Load from `path`; a missing file is silent, any other failure is
    /// logged and the standard tuning is used
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No tuning file at {:?}, using standard tuning", path);
            return Self::default();
        }
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Tuning loaded from {:?}", path);
                tuning
            }
            Err(e) => {
                log::warn!("{}, using standard tuning", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.unlocks.validate()?;
        self.levels.validate()?;
        self.density.validate()
    }
}

/// Write the standard tuning as pretty RON for editing
pub fn export_default_tuning(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let content = ron::ser::to_string_pretty(&Tuning::default(), ron::ser::PrettyConfig::default())?;
    fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Default tuning exported to {:?}", path);
    Ok(())
}
