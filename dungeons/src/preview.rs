use std::fmt::{self, Display};

use dungeons_core::{
    chunk::{ColumnContext, fill_noise_column},
    worldgen::{HighGroundDecider, NoiseSource},
};
use dungeons_utils::ResourceLocation;
use rayon::prelude::*;

/// Density samples per column, matching the overworld noise column height.
const CHUNK_COUNT_Y: usize = 32;

/// A rectangle of noise columns to preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewRegion {
    /// World seed.
    pub seed: i64,
    /// Height the biome is looked up at.
    pub sea_level: i32,
    /// Column at the centre of the map.
    pub center: (i32, i32),
    /// Columns per row.
    pub width: i32,
    /// Rows.
    pub height: i32,
}

impl Default for PreviewRegion {
    fn default() -> Self {
        Self {
            seed: 0,
            sea_level: 63,
            center: (0, 0),
            width: 96,
            height: 48,
        }
    }
}

/// Which columns of a region were raised, row by row along z.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighGroundMap {
    rows: Vec<Vec<bool>>,
}

impl HighGroundMap {
    /// Whether the column at `(column, row)` was raised.
    #[must_use]
    pub fn is_raised(&self, column: usize, row: usize) -> Option<bool> {
        self.rows.get(row)?.get(column).copied()
    }

    /// Number of columns in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Whether the map has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Share of raised columns, 0 for an empty map.
    #[must_use]
    pub fn raised_fraction(&self) -> f64 {
        let total = self.len();
        if total == 0 {
            return 0.0;
        }
        let raised = self.rows.iter().flatten().filter(|&&raised| raised).count();
        raised as f64 / total as f64
    }
}

impl Display for HighGroundMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: String = row
                .iter()
                .map(|&raised| if raised { '^' } else { '.' })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Runs the noise column hook over every column of `region`, one row per
/// rayon task, with the whole region inside the decider's biome.
#[tracing::instrument(skip(decider), fields(biome = %decider.settings().biome))]
pub fn render_region<S: NoiseSource>(
    decider: &HighGroundDecider<S>,
    region: &PreviewRegion,
) -> HighGroundMap {
    let biome = decider.settings().biome.clone();
    let lookup = move |_x: i32, _y: i32, _z: i32| -> ResourceLocation { biome.clone() };

    let (center_x, center_z) = region.center;
    let min_x = center_x - region.width / 2;
    let min_z = center_z - region.height / 2;

    let rows: Vec<Vec<bool>> = (0..region.height.max(0))
        .into_par_iter()
        .map(|row| {
            let mut column = [0.0; CHUNK_COUNT_Y + 1];
            (0..region.width.max(0))
                .map(|col| {
                    let ctx = ColumnContext {
                        x: min_x + col,
                        z: min_z + row,
                        sea_level: region.sea_level,
                        seed: region.seed,
                        chunk_count_y: CHUNK_COUNT_Y,
                    };
                    column.fill(0.0);
                    fill_noise_column(decider, &mut column, &ctx, &lookup)
                })
                .collect::<Vec<bool>>()
        })
        .collect();

    let map = HighGroundMap { rows };
    tracing::debug!(columns = map.len(), "Rendered high ground preview");
    map
}

#[cfg(test)]
mod tests {
    use dungeons_core::worldgen::{
        ActiveSeedNoise, HighGroundSettings, NoiseCache, NoiseCacheKind,
    };

    use super::*;

    #[test]
    fn test_map_matches_decider() {
        let decider = HighGroundDecider::new(ActiveSeedNoise::new(), HighGroundSettings::default());
        let region = PreviewRegion {
            seed: 12345,
            center: (-173, 195),
            width: 9,
            height: 5,
            ..PreviewRegion::default()
        };
        let map = render_region(&decider, &region);
        assert_eq!(map.len(), 45);

        let biome = decider.settings().biome.clone();
        for row in 0..5 {
            for col in 0..9 {
                let x = -173 - 4 + col as i32;
                let z = 195 - 2 + row as i32;
                assert_eq!(
                    map.is_raised(col, row),
                    Some(decider.should_raise(x, z, 12345, &biome)),
                    "column ({x}, {z})"
                );
            }
        }
        // The centre column of seed 12345 at (-173, 195) samples about -0.085
        assert_eq!(map.is_raised(4, 2), Some(false));
        assert_eq!(
            map.to_string(),
            "......^^^\n......^^^\n.......^^\n^......^^\n^.......^\n"
        );
    }

    #[test]
    fn test_strategies_render_the_same_map() {
        let region = PreviewRegion {
            seed: -77,
            width: 24,
            height: 12,
            ..PreviewRegion::default()
        };
        let active = HighGroundDecider::new(
            NoiseCache::new(NoiseCacheKind::ActiveSeed),
            HighGroundSettings::default(),
        );
        let per_seed = HighGroundDecider::new(
            NoiseCache::new(NoiseCacheKind::PerSeed),
            HighGroundSettings::default(),
        );
        assert_eq!(render_region(&active, &region), render_region(&per_seed, &region));
    }

    #[test]
    fn test_ascii_rendering() {
        let map = HighGroundMap {
            rows: vec![vec![true, false, true], vec![false, false, true]],
        };
        assert_eq!(map.to_string(), "^.^\n..^\n");
        assert!((map.raised_fraction() - 0.5).abs() < f64::EPSILON);
        assert_eq!(map.is_raised(3, 0), None);
    }

    #[test]
    fn test_empty_region() {
        let decider = HighGroundDecider::new(ActiveSeedNoise::new(), HighGroundSettings::default());
        let region = PreviewRegion {
            width: 0,
            height: 0,
            ..PreviewRegion::default()
        };
        let map = render_region(&decider, &region);
        assert!(map.is_empty());
        assert_eq!(map.raised_fraction(), 0.0);
        assert_eq!(map.to_string(), "");
    }
}
