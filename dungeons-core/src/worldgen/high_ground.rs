//! The Creeper Woods "high ground" rule.
//!
//! Inside the Creeper Woods, low frequency noise decides per column whether
//! the terrain density is raised by a fixed offset. Raised columns are the
//! common case; flat ground only appears where the noise stays inside a
//! narrow band around zero.

use dungeons_utils::ResourceLocation;

use super::noise_source::{NoiseCache, NoiseSource};

/// The only biome the high ground rule applies to by default.
pub const CREEPER_WOODS: ResourceLocation = ResourceLocation::dungeons_static("creeper_woods");

/// Tuning for [`HighGroundDecider`].
#[derive(Debug, Clone, PartialEq)]
pub struct HighGroundSettings {
    /// Columns in any other biome are never raised.
    pub biome: ResourceLocation,
    /// Multiplier from world coordinates to noise coordinates.
    pub scale: f64,
    /// Half-width of the flat band around zero.
    pub threshold: f64,
    /// Offset added to every density sample of a raised column.
    pub raise_amount: f64,
}

impl Default for HighGroundSettings {
    fn default() -> Self {
        Self {
            biome: CREEPER_WOODS,
            scale: 0.015,
            threshold: 0.3,
            raise_amount: 4.0,
        }
    }
}

/// Decides which chunk columns are raised, and raises them.
pub struct HighGroundDecider<S = NoiseCache> {
    noise: S,
    settings: HighGroundSettings,
}

impl<S: NoiseSource> HighGroundDecider<S> {
    /// Creates a decider sampling `noise`.
    #[must_use]
    pub const fn new(noise: S, settings: HighGroundSettings) -> Self {
        Self { noise, settings }
    }

    /// The settings this decider was built with.
    #[must_use]
    pub const fn settings(&self) -> &HighGroundSettings {
        &self.settings
    }

    /// The underlying noise source.
    #[must_use]
    pub const fn noise(&self) -> &S {
        &self.noise
    }

    /// Samples the scaled noise for a column.
    #[must_use]
    pub fn sample(&self, x: i32, z: i32, seed: i64) -> f64 {
        let scale = self.settings.scale;
        self.noise
            .sample(seed, f64::from(x) * scale, f64::from(z) * scale)
    }

    /// Whether the column at `(x, z)` in `biome` should be raised.
    ///
    /// Other biomes are rejected before any noise is sampled.
    #[must_use]
    pub fn should_raise(&self, x: i32, z: i32, seed: i64, biome: &ResourceLocation) -> bool {
        if *biome != self.settings.biome {
            return false;
        }
        is_high_ground(self.sample(x, z, seed), self.settings.threshold)
    }

    /// Adds the configured offset to every sample.
    pub fn apply_bias(&self, samples: &mut [f64]) {
        raise_column(samples, self.settings.raise_amount);
    }
}

/// The band rule: a value is high ground unless it lies strictly inside
/// `(-threshold, threshold)`. Values of exactly `±threshold` are high ground.
#[inline]
#[must_use]
#[allow(clippy::nonminimal_bool, reason = "mirrors the band test as stated")]
pub fn is_high_ground(value: f64, threshold: f64) -> bool {
    !(value < threshold && value > -threshold)
}

/// Adds `amount` to every sample in place.
#[inline]
pub fn raise_column(samples: &mut [f64], amount: f64) {
    for sample in samples {
        *sample += amount;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use dungeons_utils::noise::OpenSimplex2;

    use super::*;
    use crate::worldgen::{ActiveSeedNoise, NoiseCacheKind};

    /// Returns the same value everywhere and counts how often it was asked.
    struct FixedNoise {
        value: f64,
        calls: AtomicUsize,
    }

    impl FixedNoise {
        fn new(value: f64) -> Self {
            Self {
                value,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl NoiseSource for FixedNoise {
        fn sample(&self, _seed: i64, _x: f64, _z: f64) -> f64 {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.value
        }
    }

    fn fixed(value: f64) -> HighGroundDecider<FixedNoise> {
        HighGroundDecider::new(FixedNoise::new(value), HighGroundSettings::default())
    }

    #[test]
    fn test_band_boundaries() {
        assert!(fixed(0.3).should_raise(0, 0, 0, &CREEPER_WOODS));
        assert!(fixed(-0.3).should_raise(0, 0, 0, &CREEPER_WOODS));
        assert!(!fixed(0.299_99).should_raise(0, 0, 0, &CREEPER_WOODS));
        assert!(!fixed(-0.299_99).should_raise(0, 0, 0, &CREEPER_WOODS));
        assert!(!fixed(0.0).should_raise(0, 0, 0, &CREEPER_WOODS));
        assert!(fixed(0.95).should_raise(0, 0, 0, &CREEPER_WOODS));
        assert!(fixed(-1.0).should_raise(0, 0, 0, &CREEPER_WOODS));
    }

    #[test]
    fn test_band_rule_alone() {
        assert!(is_high_ground(0.3, 0.3));
        assert!(is_high_ground(-0.3, 0.3));
        assert!(!is_high_ground(0.299_99, 0.3));
        assert!(!is_high_ground(-0.299_99, 0.3));
        // A zero-width band raises everything
        assert!(is_high_ground(0.0, 0.0));
    }

    #[test]
    fn test_other_biomes_skip_noise() {
        let decider = fixed(0.9);
        let forest = ResourceLocation::vanilla_static("forest");
        let lookalike = ResourceLocation::vanilla_static("creeper_woods");

        assert!(!decider.should_raise(0, 0, 0, &forest));
        assert!(!decider.should_raise(0, 0, 0, &lookalike));
        assert_eq!(decider.noise().calls.load(Ordering::Relaxed), 0);

        assert!(decider.should_raise(0, 0, 0, &CREEPER_WOODS));
        assert_eq!(decider.noise().calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_biome_gate_with_real_noise() {
        // Seed 0 at (100, -37) samples about 0.48, outside the band
        let decider = HighGroundDecider::new(
            NoiseCache::new(NoiseCacheKind::ActiveSeed),
            HighGroundSettings::default(),
        );
        assert!(decider.sample(100, -37, 0).abs() > 0.3);
        assert!(decider.should_raise(100, -37, 0, &CREEPER_WOODS));

        for biome in ["minecraft:plains", "minecraft:dark_forest", "dungeons_world:soggy_swamp"] {
            let biome: ResourceLocation = biome.parse().unwrap();
            assert!(!decider.should_raise(100, -37, 0, &biome));
        }
    }

    #[test]
    fn test_samples_at_scaled_coordinates() {
        let decider =
            HighGroundDecider::new(ActiveSeedNoise::new(), HighGroundSettings::default());
        let field = OpenSimplex2::new(42);
        for (x, z) in [(100, -37), (-500, 250), (16, 16), (1024, -2048)] {
            assert_eq!(
                decider.sample(x, z, 42).to_bits(),
                field
                    .sample(f64::from(x) * 0.015, f64::from(z) * 0.015)
                    .to_bits()
            );
        }
    }

    #[test]
    fn test_reference_decisions() {
        let decider =
            HighGroundDecider::new(ActiveSeedNoise::new(), HighGroundSettings::default());

        // (seed, x, z, raised): samples are 0.484, 0.624, -0.728, -0.929,
        // 0.559, 0.025, -0.037
        let cases = [
            (0, 100, -37, true),
            (42, 100, -37, true),
            (12345, 100, -37, true),
            (0, 16, 16, true),
            (12345, -500, 250, true),
            (0, -200, -24, false),
            (12345, -193, -24, false),
        ];
        for (seed, x, z, raised) in cases {
            assert_eq!(
                decider.should_raise(x, z, seed, &CREEPER_WOODS),
                raised,
                "seed {seed} at ({x}, {z})"
            );
        }
    }

    #[test]
    fn test_apply_bias_adds_offset() {
        let decider = fixed(1.0);
        let mut samples = [10.0, 12.0, 14.0];
        decider.apply_bias(&mut samples);
        assert_eq!(samples, [14.0, 16.0, 18.0]);

        let mut empty: [f64; 0] = [];
        raise_column(&mut empty, 4.0);
    }

    #[test]
    fn test_custom_settings() {
        let settings = HighGroundSettings {
            biome: ResourceLocation::dungeons_static("soggy_swamp"),
            scale: 0.015,
            threshold: 0.5,
            raise_amount: -2.0,
        };
        let decider = HighGroundDecider::new(FixedNoise::new(0.4), settings.clone());
        assert!(!decider.should_raise(0, 0, 0, &settings.biome));
        assert!(!decider.should_raise(0, 0, 0, &CREEPER_WOODS));

        let mut samples = [1.0];
        decider.apply_bias(&mut samples);
        assert_eq!(samples, [-1.0]);
    }
}
