//! Spotcoin - Entry Point
//!
//! Reads a player snapshot, derives the current progression state and
//! prints it as JSON.
//!
//! Usage: `spotcoin [snapshot.json]`

use std::path::PathBuf;

use anyhow::{Context, Result};

use spotcoin::data::Tuning;
use spotcoin::save::{derive_progress, load_snapshot, snapshot_path};
use spotcoin::time::Timestamp;

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .init();

    log::info!("Starting Spotcoin v{}", env!("CARGO_PKG_VERSION"));

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(snapshot_path);

    let tuning = Tuning::new();
    let snapshot = load_snapshot(&path)
        .with_context(|| format!("could not load player snapshot from {:?}", path))?;

    // Sampled once so every derived field agrees on the same instant
    let now = Timestamp::now();
    let report = derive_progress(&snapshot, &tuning, now);

    let json = serde_json::to_string_pretty(&report).context("could not serialize report")?;
    println!("{}", json);

    log::info!(
        "Level {} {} with {}/{} bonus unlocked across {} zones",
        report.level.level,
        report.rank,
        report.bonus.unlocked,
        report.bonus.total_bonus,
        report.density_zones.len()
    );
    Ok(())
}
