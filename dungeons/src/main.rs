//! Previews the high ground of a world seed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use dungeons::{
    logger,
    preview::{PreviewRegion, render_region},
};
use dungeons_core::WorldgenConfig;

const DEFAULT_CONFIG_PATH: &str = "dungeons_config.json5";

fn main() -> Result<()> {
    logger::init();

    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = WorldgenConfig::load_or_create(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    let seed = config.seed();
    tracing::info!(seed, noise_cache = ?config.noise_cache, "Loaded config");

    let decider = config
        .build_decider()
        .context("Failed to build the high ground rule")?;
    let region = PreviewRegion {
        seed,
        sea_level: config.sea_level,
        ..PreviewRegion::default()
    };
    let map = render_region(&decider, &region);

    println!("{map}");
    tracing::info!(
        "{:.1}% of {} columns are high ground",
        map.raised_fraction() * 100.0,
        map.len()
    );
    Ok(())
}
