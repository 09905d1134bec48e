//! Data loading and external tuning
//!
//! Progression constants can be overridden from a RON file so balance
//! changes do not need a rebuild.

pub mod loader;

pub use loader::{ConfigError, Tuning, export_default_tuning, DEFAULT_TUNING_PATH};
