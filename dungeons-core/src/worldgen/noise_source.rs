//! Shared noise fields keyed by world seed.
//!
//! Chunk columns are generated on several worker threads at once, so the
//! field behind the high ground rule is shared state. Two strategies are
//! offered: [`ActiveSeedNoise`] keeps a single field and swaps it when the
//! seed changes, [`PerSeedNoise`] keeps one field per seed.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use dungeons_utils::noise::OpenSimplex2;
use enum_dispatch::enum_dispatch;
use parking_lot::Mutex;
use scc::HashMap;
use serde::Deserialize;

/// A seeded 2D noise function that can be shared between threads.
#[enum_dispatch]
pub trait NoiseSource: Send + Sync {
    /// Samples the noise field of `seed` at `(x, z)`.
    fn sample(&self, seed: i64, x: f64, z: f64) -> f64;
}

/// Selects the noise sharing strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseCacheKind {
    /// One field for the single seed of the running world.
    #[default]
    ActiveSeed,
    /// One field per seed, for generating several worlds at once.
    PerSeed,
}

/// The configured noise sharing strategy, dispatched without boxing.
#[enum_dispatch(NoiseSource)]
pub enum NoiseCache {
    /// See [`ActiveSeedNoise`].
    ActiveSeed(ActiveSeedNoise),
    /// See [`PerSeedNoise`].
    PerSeed(PerSeedNoise),
}

impl NoiseCache {
    /// Creates an empty cache of the given kind.
    #[must_use]
    pub fn new(kind: NoiseCacheKind) -> Self {
        match kind {
            NoiseCacheKind::ActiveSeed => Self::ActiveSeed(ActiveSeedNoise::new()),
            NoiseCacheKind::PerSeed => Self::PerSeed(PerSeedNoise::new()),
        }
    }
}

impl Default for NoiseCache {
    fn default() -> Self {
        Self::new(NoiseCacheKind::default())
    }
}

/// Holds the noise field of the one seed currently being generated.
///
/// Sampling reads the published field without locking. A sample for any
/// other seed takes the reseed lock, builds the new field and publishes it
/// with an atomic pointer swap, so readers only ever see complete tables.
/// Samples already in flight keep the field they loaded.
///
/// Interleaving seeds stays correct but rebuilds the field on every switch;
/// use [`PerSeedNoise`] for that.
#[derive(Default)]
pub struct ActiveSeedNoise {
    field: ArcSwapOption<OpenSimplex2>,
    reseed_lock: Mutex<()>,
}

impl ActiveSeedNoise {
    /// Creates an empty source. The first sample builds the field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The seed of the published field, if any.
    #[must_use]
    pub fn active_seed(&self) -> Option<i64> {
        self.field.load().as_ref().map(|field| field.seed())
    }

    /// Returns the field for `seed`, making it the active one if needed.
    #[must_use]
    pub fn field(&self, seed: i64) -> Arc<OpenSimplex2> {
        if let Some(field) = self.field.load().as_ref() {
            if field.seed() == seed {
                return Arc::clone(field);
            }
        }
        self.reseed(seed)
    }

    /// Publishes the field for `seed` unless it is already active.
    pub fn reseed(&self, seed: i64) -> Arc<OpenSimplex2> {
        let _guard = self.reseed_lock.lock();

        // Another thread may have published it while we waited on the lock
        let current = self.field.load_full();
        if let Some(field) = current.as_ref() {
            if field.seed() == seed {
                return Arc::clone(field);
            }
        }

        let field = Arc::new(OpenSimplex2::new(seed));
        self.field.store(Some(Arc::clone(&field)));
        match current {
            Some(previous) => log::debug!(
                "Rebuilt high ground noise for seed {seed} (was {})",
                previous.seed()
            ),
            None => log::debug!("Built high ground noise for seed {seed}"),
        }
        field
    }
}

impl NoiseSource for ActiveSeedNoise {
    fn sample(&self, seed: i64, x: f64, z: f64) -> f64 {
        {
            let guard = self.field.load();
            if let Some(field) = guard.as_ref() {
                if field.seed() == seed {
                    return field.sample(x, z);
                }
            }
        }
        self.reseed(seed).sample(x, z)
    }
}

/// Keeps a noise field for every seed that has been sampled.
///
/// Fields are never rebuilt once cached, so any number of seeds can be
/// sampled concurrently. Memory grows by one permutation table per seed until
/// [`PerSeedNoise::evict`] is called.
#[derive(Default)]
pub struct PerSeedNoise {
    fields: HashMap<i64, Arc<OpenSimplex2>>,
}

impl PerSeedNoise {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached field for `seed`, building it on first use.
    #[must_use]
    pub fn field(&self, seed: i64) -> Arc<OpenSimplex2> {
        if let Some(field) = self.fields.read_sync(&seed, |_, field| Arc::clone(field)) {
            return field;
        }

        let field = Arc::new(OpenSimplex2::new(seed));
        match self.fields.insert_sync(seed, Arc::clone(&field)) {
            Ok(()) => {
                log::debug!("Cached high ground noise for seed {seed}");
                field
            }
            // Lost the race; use the field the other thread inserted
            Err(_) => self
                .fields
                .read_sync(&seed, |_, cached| Arc::clone(cached))
                .unwrap_or(field),
        }
    }

    /// Drops the field for `seed`. Returns whether one was cached.
    pub fn evict(&self, seed: i64) -> bool {
        self.fields.remove_sync(&seed).is_some()
    }

    /// Number of cached seeds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no seed has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl NoiseSource for PerSeedNoise {
    fn sample(&self, seed: i64, x: f64, z: f64) -> f64 {
        self.field(seed).sample(x, z)
    }
}
