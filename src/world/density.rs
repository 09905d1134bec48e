//! Activity density map
//!
//! Buckets visited spots into a uniform lat/lng grid and classifies each
//! occupied cell into one of three tiers relative to the busiest cell.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::colors::{TierColor, DENSITY_HIGH, DENSITY_LOW, DENSITY_MID};
use super::geo::{Bounds, GeoPoint};
use crate::data::ConfigError;

pub const GRID_SIZE: f64 = 0.5;
pub const LOW_TIER_THRESHOLD: f64 = 0.33;
pub const HIGH_TIER_THRESHOLD: f64 = 0.66;

/// Density classification band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DensityTier {
    Low,
    Mid,
    High,
}

impl DensityTier {
    /// Classify with the standard thresholds
    pub fn from_density(density: f64) -> DensityTier {
        DensityGrid::STANDARD.classify(density)
    }

    pub fn color(&self) -> TierColor {
        match self {
            DensityTier::Low => DENSITY_LOW,
            DensityTier::Mid => DENSITY_MID,
            DensityTier::High => DENSITY_HIGH,
        }
    }
}

/// One occupied grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityZone {
    /// Cell origin as `"{lat},{lng}"`
    pub id: String,
    pub bounds: Bounds,
    /// Points in this cell
    pub count: u32,
    /// `count` relative to the busiest cell, in (0, 1]
    pub density: f64,
    pub tier: DensityTier,
    pub color: TierColor,
}

/// Grid and tier settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityGrid {
    /// Cell edge length in degrees
    pub grid_size: f64,
    /// Densities below this are low tier
    pub low_threshold: f64,
    /// Densities at or above this are high tier
    pub high_threshold: f64,
}

impl DensityGrid {
    pub const STANDARD: DensityGrid = DensityGrid {
        grid_size: GRID_SIZE,
        low_threshold: LOW_TIER_THRESHOLD,
        high_threshold: HIGH_TIER_THRESHOLD,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(ConfigError::Invalid(format!("grid size {} must be positive", self.grid_size)));
        }
        if !(0.0..=1.0).contains(&self.low_threshold)
            || !(0.0..=1.0).contains(&self.high_threshold)
            || self.low_threshold > self.high_threshold
        {
            return Err(ConfigError::Invalid(format!(
                "tier thresholds {} / {} must be ordered within 0..1",
                self.low_threshold, self.high_threshold
            )));
        }
        Ok(())
    }

    /// Exactly `low_threshold` is mid tier, exactly `high_threshold` is high tier
    pub fn classify(&self, density: f64) -> DensityTier {
        if density < self.low_threshold {
            DensityTier::Low
        } else if density < self.high_threshold {
            DensityTier::Mid
        } else {
            DensityTier::High
        }
    }

    fn cell_of(&self, point: &GeoPoint) -> (i64, i64) {
        (
            (point.latitude / self.grid_size).floor() as i64,
            (point.longitude / self.grid_size).floor() as i64,
        )
    }

    /// Bin points into cells and emit one zone per occupied cell,
    /// in order of first appearance.
    pub fn build(&self, points: &[GeoPoint]) -> Vec<DensityZone> {
        let mut index: HashMap<(i64, i64), usize> = HashMap::new();
        let mut cells: Vec<((i64, i64), u32)> = Vec::new();

        for point in points {
            let key = self.cell_of(point);
            match index.get(&key).copied() {
                Some(i) => cells[i].1 += 1,
                None => {
                    index.insert(key, cells.len());
                    cells.push((key, 1));
                }
            }
        }

        let Some(max_count) = cells.iter().map(|(_, count)| *count).max() else {
            return Vec::new();
        };

        log::debug!(
            "Binned {} points into {} cells (busiest holds {})",
            points.len(), cells.len(), max_count
        );

        cells
            .into_iter()
            .map(|((lat_idx, lng_idx), count)| {
                let south = lat_idx as f64 * self.grid_size;
                let west = lng_idx as f64 * self.grid_size;
                let density = count as f64 / max_count as f64;
                let tier = self.classify(density);
                DensityZone {
                    id: format!("{},{}", south, west),
                    bounds: Bounds {
                        north: south + self.grid_size,
                        south,
                        east: west + self.grid_size,
                        west,
                    },
                    count,
                    density,
                    tier,
                    color: tier.color(),
                }
            })
            .collect()
    }
}

impl Default for DensityGrid {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Build density zones on the standard 0.5° grid
pub fn build_density_zones(points: &[GeoPoint]) -> Vec<DensityZone> {
    DensityGrid::STANDARD.build(points)
}
