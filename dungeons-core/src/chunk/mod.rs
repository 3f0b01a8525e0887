//! This module contains the hooks called while a chunk's noise is filled.

mod noise_column;

pub use noise_column::{BiomeLookup, ColumnContext, fill_noise_column};
