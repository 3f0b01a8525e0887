//! # Dungeons
//!
//! Command line front end for the Dungeons World generation hooks: loads the
//! config and previews where the high ground rule raises terrain.

/// Logging setup.
pub mod logger;
/// High ground preview maps.
pub mod preview;
