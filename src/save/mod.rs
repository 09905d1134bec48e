//! Snapshot input
//!
//! Reads the raw player state the derived progress is computed from.

pub mod profile;

pub use profile::{
    PlayerSnapshot, ProgressReport, SnapshotError,
    derive_progress, load_snapshot, snapshot_path,
};
