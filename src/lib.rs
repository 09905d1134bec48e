//! Spotcoin - progression engine for a location-based coin collection game
//!
//! Turns a player's raw state (registration time, XP, visited spots) into
//! a bonus unlock schedule, a level and rank, and an activity density map.

pub mod time;
pub mod progression;
pub mod world;
pub mod data;
pub mod save;

// Re-export commonly used types
pub use time::Timestamp;
pub use progression::{
    BonusSchedule, LevelInfo, MonthlyUnlock, Rank,
    calculate_level, compute_schedule, detect_level_up, get_rank, get_xp_progress,
};
pub use world::{DensityTier, DensityZone, GeoPoint, build_density_zones};
pub use data::Tuning;
