//! Player snapshot and derived progress
//!
//! A snapshot is the raw player state owned by the presentation layer.
//! Everything in a `ProgressReport` is recomputed from it on demand.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::Tuning;
use crate::progression::{BonusSchedule, LevelInfo, Rank};
use crate::time::Timestamp;
use crate::world::{DensityZone, GeoPoint};

/// Snapshot read errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Raw player state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Account creation, nanoseconds since the Unix epoch
    pub registered_at_ns: u64,
    /// Current XP total
    pub xp: u64,
    /// XP total at the previous evaluation, for level-up detection
    #[serde(default)]
    pub previous_xp: Option<u64>,
    /// Visited spots
    #[serde(default)]
    pub spots: Vec<GeoPoint>,
}

impl PlayerSnapshot {
    pub fn registered_at(&self) -> Timestamp {
        Timestamp::from_nanos(self.registered_at_ns)
    }

    pub fn from_json(data: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(data)?)
    }
}

/// Everything derived from a snapshot at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub evaluated_at: Timestamp,
    pub bonus: BonusSchedule,
    pub level: LevelInfo,
    pub xp_progress: f64,
    pub rank: Rank,
    pub leveled_up: bool,
    pub density_zones: Vec<DensityZone>,
}

/// Derive all progression state for `now`
pub fn derive_progress(snapshot: &PlayerSnapshot, tuning: &Tuning, now: Timestamp) -> ProgressReport {
    let valid_spots: Vec<GeoPoint> = snapshot.spots.iter().copied().filter(GeoPoint::is_valid).collect();
    if valid_spots.len() != snapshot.spots.len() {
        log::warn!(
            "Ignoring {} spots with out-of-range coordinates",
            snapshot.spots.len() - valid_spots.len()
        );
    }

    let leveled_up = snapshot
        .previous_xp
        .is_some_and(|old| tuning.levels.is_level_up(old, snapshot.xp));
    if leveled_up {
        log::info!("Level up: now level {}", tuning.levels.level_info(snapshot.xp).level);
    }

    ProgressReport {
        evaluated_at: now,
        bonus: tuning.unlocks.compute(snapshot.registered_at(), now),
        level: tuning.levels.level_info(snapshot.xp),
        xp_progress: tuning.levels.progress(snapshot.xp),
        rank: Rank::from_xp(snapshot.xp),
        leveled_up,
        density_zones: tuning.density.build(&valid_spots),
    }
}

// ============================================================================
// Snapshot Storage
// ============================================================================

/// Default snapshot file path
pub fn snapshot_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "spotcoin", "Spotcoin") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push("snapshot.json");
        path
    } else {
        PathBuf::from("./snapshot.json")
    }
}

/// Read a snapshot from disk
pub fn load_snapshot(path: &Path) -> Result<PlayerSnapshot, SnapshotError> {
    let data = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = PlayerSnapshot::from_json(&data)?;
    log::info!("Snapshot loaded from {:?} ({} spots)", path, snapshot.spots.len());
    Ok(snapshot)
}
