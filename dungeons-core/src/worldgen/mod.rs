//! This module contains the terrain shaping rules applied during chunk generation.

mod high_ground;
mod noise_source;

pub use high_ground::{
    CREEPER_WOODS, HighGroundDecider, HighGroundSettings, is_high_ground, raise_column,
};
pub use noise_source::{ActiveSeedNoise, NoiseCache, NoiseCacheKind, NoiseSource, PerSeedNoise};
