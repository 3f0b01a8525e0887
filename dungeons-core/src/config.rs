use dungeons_utils::{ResourceLocation, ResourceLocationError};
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::worldgen::{HighGroundDecider, HighGroundSettings, NoiseCache, NoiseCacheKind};

/// The config written when none exists yet.
pub const DEFAULT_CONFIG: &str = include_str!("../../package-content/dungeons_config.json5");

/// Errors raised while loading a [`WorldgenConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read or created.
    #[error("failed to access {path}: {source}")]
    Io {
        /// The config file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The file is not valid json5 for this config.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json5::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
    /// `high_ground_biome` is not a valid resource location.
    #[error("invalid high ground biome: {0}")]
    Biome(#[from] ResourceLocationError),
}

/// World generation settings for the Dungeons World hooks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldgenConfig {
    /// World seed, as typed by the player.
    pub seed: String,
    /// Biome whose columns may be raised.
    pub high_ground_biome: String,
    /// World to noise coordinate scale.
    pub noise_scale: f64,
    /// Half-width of the flat band.
    pub band_threshold: f64,
    /// Density offset for raised columns.
    pub raise_amount: f64,
    /// Height the biome is looked up at.
    pub sea_level: i32,
    /// Noise sharing strategy.
    pub noise_cache: NoiseCacheKind,
}

impl WorldgenConfig {
    /// Loads the config at `path`, writing the default config there first if
    /// the file does not exist.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if path.exists() {
            let config_str = fs::read_to_string(path).map_err(io_error)?;
            return Self::from_json5(&config_str);
        }

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, DEFAULT_CONFIG).map_err(io_error)?;
        log::info!("Created default config at {}", path.display());
        Self::from_json5(DEFAULT_CONFIG)
    }

    /// Parses and validates a json5 config. Missing keys take their defaults.
    pub fn from_json5(config_str: &str) -> Result<Self, ConfigError> {
        let config: WorldgenConfig = serde_json5::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges and the biome id.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.noise_scale.is_finite() || self.noise_scale <= 0.0 {
            return Err(ConfigError::Invalid("Noise scale must be a positive number"));
        }
        if !(0.0..=1.0).contains(&self.band_threshold) {
            return Err(ConfigError::Invalid("Band threshold must be in range 0..1"));
        }
        if !self.raise_amount.is_finite() {
            return Err(ConfigError::Invalid("Raise amount must be a finite number"));
        }
        self.high_ground_biome.parse::<ResourceLocation>()?;
        Ok(())
    }

    /// The numeric world seed.
    #[must_use]
    pub fn seed(&self) -> i64 {
        parse_seed(&self.seed)
    }

    /// The high ground rule described by this config.
    pub fn high_ground_settings(&self) -> Result<HighGroundSettings, ConfigError> {
        Ok(HighGroundSettings {
            biome: self.high_ground_biome.parse()?,
            scale: self.noise_scale,
            threshold: self.band_threshold,
            raise_amount: self.raise_amount,
        })
    }

    /// Builds a decider backed by the configured noise cache.
    pub fn build_decider(&self) -> Result<HighGroundDecider<NoiseCache>, ConfigError> {
        Ok(HighGroundDecider::new(
            NoiseCache::new(self.noise_cache),
            self.high_ground_settings()?,
        ))
    }
}

impl Default for WorldgenConfig {
    fn default() -> Self {
        let settings = HighGroundSettings::default();
        Self {
            seed: "dungeons".to_string(),
            high_ground_biome: settings.biome.to_string(),
            noise_scale: settings.scale,
            band_threshold: settings.threshold,
            raise_amount: settings.raise_amount,
            sea_level: 63,
            noise_cache: NoiseCacheKind::ActiveSeed,
        }
    }
}

/// Turns a seed as typed by a player into a world seed.
///
/// Decimal integers are used directly. Anything else is hashed like a Java
/// string (UTF-16 code units, `h = 31 * h + c`) and sign-extended.
#[must_use]
pub fn parse_seed(seed: &str) -> i64 {
    let seed = seed.trim();
    if let Ok(value) = seed.parse::<i64>() {
        return value;
    }

    let mut hash = 0i32;
    for unit in seed.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    i64::from(hash)
}
