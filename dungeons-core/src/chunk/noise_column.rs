//! The noise column hook.
//!
//! Runs once per column while the generator fills its density samples, after
//! vanilla has computed them and before terrain is carved from them.

use dungeons_utils::ResourceLocation;

use crate::worldgen::{HighGroundDecider, NoiseSource};

/// Resolves the biome at a position.
pub trait BiomeLookup {
    /// Returns the biome at the given noise coordinates.
    fn biome_at(&self, x: i32, y: i32, z: i32) -> ResourceLocation;
}

impl<F> BiomeLookup for F
where
    F: Fn(i32, i32, i32) -> ResourceLocation,
{
    fn biome_at(&self, x: i32, y: i32, z: i32) -> ResourceLocation {
        self(x, y, z)
    }
}

/// Where the column being filled sits, and how tall it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnContext {
    /// Column x coordinate.
    pub x: i32,
    /// Column z coordinate.
    pub z: i32,
    /// Height the biome is looked up at.
    pub sea_level: i32,
    /// World seed.
    pub seed: i64,
    /// Index of the topmost density sample; the column holds
    /// `chunk_count_y + 1` samples.
    pub chunk_count_y: usize,
}

/// Raises the column's density samples when it is high ground.
///
/// The biome is looked up at `(x, sea_level, z)`. When the column is raised,
/// samples `0..=chunk_count_y` get the decider's offset; indices past the end
/// of `column` are ignored. Returns whether the column was raised.
pub fn fill_noise_column<S, B>(
    decider: &HighGroundDecider<S>,
    column: &mut [f64],
    ctx: &ColumnContext,
    biomes: &B,
) -> bool
where
    S: NoiseSource,
    B: BiomeLookup + ?Sized,
{
    let biome = biomes.biome_at(ctx.x, ctx.sea_level, ctx.z);
    if !decider.should_raise(ctx.x, ctx.z, ctx.seed, &biome) {
        return false;
    }

    let end = ctx.chunk_count_y.saturating_add(1).min(column.len());
    decider.apply_bias(&mut column[..end]);
    log::trace!("Raised noise column at ({}, {}) in {biome}", ctx.x, ctx.z);
    true
}
