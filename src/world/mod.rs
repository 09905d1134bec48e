//! Geographic activity aggregation

pub mod geo;
pub mod colors;
pub mod density;

pub use geo::{GeoPoint, Bounds};
pub use colors::TierColor;
pub use density::{DensityGrid, DensityTier, DensityZone, build_density_zones};
