//! Coherent noise used by the world generation hooks.
//!
//! Values must match the mod's original generator exactly so that an
//! existing world keeps the same terrain for the same seed.

mod math;
mod open_simplex;

pub use math::floor;
pub use open_simplex::{GRADIENTS_2D, Gradient2, OpenSimplex2, PMASK, PSIZE, PermutationTable};
