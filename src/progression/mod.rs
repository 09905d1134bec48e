//! Progression systems

pub mod xp;
pub mod unlocks;

pub use xp::{LevelCurve, LevelInfo, Rank, calculate_level, detect_level_up, get_xp_progress, get_rank, xp_to_next_rank};
pub use unlocks::{UnlockPlan, BonusSchedule, MonthlyUnlock, compute_schedule};
