//! # Dungeons Core
//!
//! World generation hooks for Dungeons World: the high ground rule for the
//! Creeper Woods biome, the noise sources backing it and the chunk column hook
//! that applies it.

/// Chunk generation hooks.
pub mod chunk;
/// Configuration loading.
pub mod config;
/// Terrain shaping rules and their noise sources.
pub mod worldgen;

pub use config::{ConfigError, WorldgenConfig};
