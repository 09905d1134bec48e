//! Experience and leveling
//!
//! Flat 100-XP level bands, level-up detection, and the rank ladder.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::ConfigError;

pub const XP_PER_LEVEL: u64 = 100;

/// Level band derived from an XP total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    /// Current level, starting at 1
    pub level: u64,
    /// XP at which this level starts (inclusive)
    pub xp_required: u64,
    /// XP at which the next level starts (exclusive bound of this one)
    pub xp_for_next: u64,
}

impl LevelInfo {
    /// XP still missing to reach the next level
    pub fn xp_to_next(&self, xp: u64) -> u64 {
        self.xp_for_next.saturating_sub(xp)
    }
}

/// Width of each level band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCurve {
    pub xp_per_level: u64,
}

impl LevelCurve {
    pub const STANDARD: LevelCurve = LevelCurve { xp_per_level: XP_PER_LEVEL };

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.xp_per_level == 0 {
            return Err(ConfigError::Invalid("xp_per_level must be positive".to_string()));
        }
        Ok(())
    }

    pub fn level_info(&self, xp: u64) -> LevelInfo {
        let level = xp.checked_div(self.xp_per_level).unwrap_or(0) + 1;
        LevelInfo {
            level,
            xp_required: (level - 1) * self.xp_per_level,
            xp_for_next: level.saturating_mul(self.xp_per_level),
        }
    }

    /// Percent progress through the current band (0..100)
    pub fn progress(&self, xp: u64) -> f64 {
        let info = self.level_info(xp);
        let band = info.xp_for_next - info.xp_required;
        if band == 0 {
            return 0.0;
        }
        100.0 * (xp - info.xp_required) as f64 / band as f64
    }

    /// Number of levels crossed going from `old_xp` to `new_xp`
    pub fn levels_gained(&self, old_xp: u64, new_xp: u64) -> u64 {
        self.level_info(new_xp)
            .level
            .saturating_sub(self.level_info(old_xp).level)
    }

    pub fn is_level_up(&self, old_xp: u64, new_xp: u64) -> bool {
        self.level_info(new_xp).level > self.level_info(old_xp).level
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Rank title, based on absolute XP rather than level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Novice,
    Explorer,
    Adventurer,
    Veteran,
    Master,
    Legend,
}

impl Rank {
    /// Ladder in ascending order
    pub const ALL: [Rank; 6] = [
        Rank::Novice,
        Rank::Explorer,
        Rank::Adventurer,
        Rank::Veteran,
        Rank::Master,
        Rank::Legend,
    ];

    pub fn from_xp(xp: u64) -> Rank {
        match xp {
            0..=99 => Rank::Novice,
            100..=499 => Rank::Explorer,
            500..=999 => Rank::Adventurer,
            1000..=2499 => Rank::Veteran,
            2500..=4999 => Rank::Master,
            _ => Rank::Legend,
        }
    }

    /// Lowest XP total that earns this rank
    pub fn min_xp(&self) -> u64 {
        match self {
            Rank::Novice => 0,
            Rank::Explorer => 100,
            Rank::Adventurer => 500,
            Rank::Veteran => 1000,
            Rank::Master => 2500,
            Rank::Legend => 5000,
        }
    }

    pub fn next(&self) -> Option<Rank> {
        match self {
            Rank::Novice => Some(Rank::Explorer),
            Rank::Explorer => Some(Rank::Adventurer),
            Rank::Adventurer => Some(Rank::Veteran),
            Rank::Veteran => Some(Rank::Master),
            Rank::Master => Some(Rank::Legend),
            Rank::Legend => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rank::Novice => "Novice",
            Rank::Explorer => "Explorer",
            Rank::Adventurer => "Adventurer",
            Rank::Veteran => "Veteran",
            Rank::Master => "Master",
            Rank::Legend => "Legend",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// XP missing until the next rank, `None` at the top of the ladder
pub fn xp_to_next_rank(xp: u64) -> Option<u64> {
    Rank::from_xp(xp).next().map(|next| next.min_xp() - xp)
}

/// Level band for an XP total on the standard curve
pub fn calculate_level(xp: u64) -> LevelInfo {
    LevelCurve::STANDARD.level_info(xp)
}

/// True when `new_xp` sits in a higher level than `old_xp`
pub fn detect_level_up(old_xp: u64, new_xp: u64) -> bool {
    LevelCurve::STANDARD.is_level_up(old_xp, new_xp)
}

/// Percent progress through the current level
pub fn get_xp_progress(xp: u64) -> f64 {
    LevelCurve::STANDARD.progress(xp)
}

pub fn get_rank(xp: u64) -> Rank {
    Rank::from_xp(xp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_level() {
        assert_eq!(
            calculate_level(0),
            LevelInfo { level: 1, xp_required: 0, xp_for_next: 100 }
        );
        assert_eq!(
            calculate_level(250),
            LevelInfo { level: 3, xp_required: 200, xp_for_next: 300 }
        );
        assert_eq!(calculate_level(99).level, 1);
        assert_eq!(calculate_level(100).level, 2); // band lower bound is inclusive
    }

    #[test]
    fn test_xp_progress() {
        assert_eq!(get_xp_progress(250), 50.0);
        assert_eq!(get_xp_progress(0), 0.0);
        assert_eq!(get_xp_progress(199), 99.0);
        assert_eq!(get_xp_progress(300), 0.0);
    }

    #[test]
    fn test_detect_level_up() {
        assert!(detect_level_up(95, 105));
        assert!(!detect_level_up(105, 195));
        assert!(!detect_level_up(105, 105));
        assert!(!detect_level_up(250, 50)); // losing XP is never a level up
    }

    #[test]
    fn test_levels_gained() {
        let curve = LevelCurve::STANDARD;
        assert_eq!(curve.levels_gained(95, 405), 4);
        assert_eq!(curve.levels_gained(405, 95), 0);
        assert_eq!(calculate_level(150).xp_to_next(150), 50);
    }

    #[test]
    fn test_level_is_monotonic() {
        let mut last = 0;
        for xp in 0..2_000 {
            let level = calculate_level(xp).level;
            assert!(level >= last);
            last = level;
        }
    }

    #[test]
    fn test_rank_boundaries() {
        assert_eq!(get_rank(99).label(), "Novice");
        assert_eq!(get_rank(100).label(), "Explorer");
        assert_eq!(get_rank(499), Rank::Explorer);
        assert_eq!(get_rank(500), Rank::Adventurer);
        assert_eq!(get_rank(999), Rank::Adventurer);
        assert_eq!(get_rank(1000), Rank::Veteran);
        assert_eq!(get_rank(2500), Rank::Master);
        assert_eq!(get_rank(4999), Rank::Master);
        assert_eq!(get_rank(5000).to_string(), "Legend");
    }

    #[test]
    fn test_rank_ladder_consistent() {
        for rank in Rank::ALL {
            assert_eq!(Rank::from_xp(rank.min_xp()), rank);
        }
        assert_eq!(xp_to_next_rank(80), Some(20));
        assert_eq!(xp_to_next_rank(1200), Some(1300));
        assert_eq!(xp_to_next_rank(9000), None);
    }

    #[test]
    fn test_zero_width_curve_rejected() {
        assert!(LevelCurve { xp_per_level: 0 }.validate().is_err());
        assert!(LevelCurve::STANDARD.validate().is_ok());
    }
}
