//! # Dungeons Utils
//!
//! Engine-independent building blocks for the Dungeons World generation hooks:
//! seeded random sequences, coherent noise and resource identifiers.

pub mod noise;
pub mod random;
mod types;

pub use types::{ResourceLocation, ResourceLocationError};
