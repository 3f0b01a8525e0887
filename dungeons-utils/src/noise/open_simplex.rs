//! OpenSimplex2 ("fast" variant) 2D noise.
//!
//! The permutation shuffle, lattice lookup and gradient set reproduce the
//! generator the mod shipped with, so a seed keeps producing the same
//! terrain. Only the 2D evaluation is provided.

#![allow(
    clippy::many_single_char_names,
    reason = "noise code uses mathematical single-letter variables (x, z, s)"
)]

use std::sync::LazyLock;

use crate::random::{Lcg64, Random};

use super::floor;

/// Size of the permutation and gradient tables. Must be a power of two.
pub const PSIZE: usize = 2048;
/// Mask equivalent of `% PSIZE` for lattice coordinates.
pub const PMASK: i32 = PSIZE as i32 - 1;

// Skew factor 0.5 * (sqrt(3) - 1) and unskew factor (3 - sqrt(3)) / 6, at the
// precision the original generator used.
const SKEW_2D: f64 = 0.366_025_403_784_439;
const UNSKEW_2D: f64 = -0.211_324_865_405_187;

// sqrt(2) / 2 and sqrt(3/2), used by the rotated lattice evaluation.
const ROOT2_OVER_2: f64 = 0.707_106_781_186_547_6;
const ROOT3_OVER_ROOT2: f64 = 1.224_744_871_380_249;

/// Normalisation constant folded into the gradients.
const N2: f64 = 0.010_016_341_213_657_12;

/// 24 unit gradients, 15° apart and offset 7.5° from the axes.
#[rustfmt::skip]
const BASE_GRADIENTS: [(f64, f64); 24] = [
    ( 0.130_526_192_220_052,  0.991_444_861_373_81),
    ( 0.382_683_432_365_09,   0.923_879_532_511_287),
    ( 0.608_761_429_008_721,  0.793_353_340_291_235),
    ( 0.793_353_340_291_235,  0.608_761_429_008_721),
    ( 0.923_879_532_511_287,  0.382_683_432_365_09),
    ( 0.991_444_861_373_81,   0.130_526_192_220_051),
    ( 0.991_444_861_373_81,  -0.130_526_192_220_051),
    ( 0.923_879_532_511_287, -0.382_683_432_365_09),
    ( 0.793_353_340_291_235, -0.608_761_429_008_72),
    ( 0.608_761_429_008_721, -0.793_353_340_291_235),
    ( 0.382_683_432_365_09,  -0.923_879_532_511_287),
    ( 0.130_526_192_220_052, -0.991_444_861_373_81),
    (-0.130_526_192_220_052, -0.991_444_861_373_81),
    (-0.382_683_432_365_09,  -0.923_879_532_511_287),
    (-0.608_761_429_008_721, -0.793_353_340_291_235),
    (-0.793_353_340_291_235, -0.608_761_429_008_721),
    (-0.923_879_532_511_287, -0.382_683_432_365_09),
    (-0.991_444_861_373_81,  -0.130_526_192_220_052),
    (-0.991_444_861_373_81,   0.130_526_192_220_051),
    (-0.923_879_532_511_287,  0.382_683_432_365_09),
    (-0.793_353_340_291_235,  0.608_761_429_008_721),
    (-0.608_761_429_008_721,  0.793_353_340_291_235),
    (-0.382_683_432_365_09,   0.923_879_532_511_287),
    (-0.130_526_192_220_052,  0.991_444_861_373_81),
];

/// A 2D gradient vector, pre-scaled by the noise normalisation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient2 {
    /// Component along x.
    pub dx: f64,
    /// Component along z.
    pub dz: f64,
}

/// Process-wide gradient table, tiled from [`BASE_GRADIENTS`] to [`PSIZE`]
/// entries so a permutation value indexes it directly.
pub static GRADIENTS_2D: LazyLock<Box<[Gradient2]>> = LazyLock::new(|| {
    (0..PSIZE)
        .map(|i| {
            let (dx, dz) = BASE_GRADIENTS[i % BASE_GRADIENTS.len()];
            Gradient2 {
                dx: dx / N2,
                dz: dz / N2,
            }
        })
        .collect()
});

/// A corner of the skewed lattice cell, with its unskewed offset from the
/// cell origin.
struct LatticePoint2 {
    xsv: i32,
    zsv: i32,
    dx: f64,
    dz: f64,
}

impl LatticePoint2 {
    const fn new(xsv: i32, zsv: i32) -> Self {
        let ssv = (xsv + zsv) as f64 * UNSKEW_2D;
        Self {
            xsv,
            zsv,
            dx: (-xsv) as f64 - ssv,
            dz: (-zsv) as f64 - ssv,
        }
    }
}

/// The three corners contributing to a point are `LATTICE_2D[i..i + 3]`,
/// where `i` depends on which side of the cell diagonal the point lies.
static LATTICE_2D: [LatticePoint2; 4] = [
    LatticePoint2::new(1, 0),
    LatticePoint2::new(0, 0),
    LatticePoint2::new(1, 1),
    LatticePoint2::new(0, 1),
];

/// Seeded shuffle of `0..PSIZE`, mapping lattice coordinates to gradients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationTable {
    p: Box<[u16]>,
}

impl PermutationTable {
    /// Builds the table for a seed.
    #[must_use]
    pub fn from_seed(seed: i64) -> Self {
        Self::shuffled(&mut Lcg64::from_seed(seed))
    }

    /// Builds the table by drawing from `random`.
    ///
    /// Walks the slots from the top down, filling slot `i` with a value drawn
    /// from the not-yet-used prefix of the identity sequence.
    pub fn shuffled<R: Random>(random: &mut R) -> Self {
        let mut source: Vec<u16> = (0..PSIZE as u16).collect();
        let mut p = vec![0u16; PSIZE].into_boxed_slice();

        for i in (0..PSIZE).rev() {
            let r = random.next_i32_bounded(i as i32 + 1) as usize;
            p[i] = source[r];
            source[r] = source[i];
        }

        Self { p }
    }

    /// Looks up a lattice coordinate, wrapping it into the table.
    #[inline]
    #[must_use]
    pub fn get(&self, index: i32) -> usize {
        usize::from(self.p[(index & PMASK) as usize])
    }

    /// The raw table entries.
    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        &self.p
    }

    /// Gradients reordered through this table: entry `i` is
    /// `gradients[p[i]]`.
    #[must_use]
    pub fn permute_gradients(&self, gradients: &[Gradient2]) -> Box<[Gradient2]> {
        self.p
            .iter()
            .map(|&index| gradients[usize::from(index)])
            .collect()
    }
}

/// Seeded 2D OpenSimplex2 noise.
///
/// Output lies in roughly `[-1, 1]` and is continuous with a continuous first
/// derivative. Sampling is pure: the same seed and coordinates give the same
/// bits on every run.
#[derive(Debug, Clone)]
pub struct OpenSimplex2 {
    seed: i64,
    perm: PermutationTable,
    /// `GRADIENTS_2D[perm[i]]`, so a corner costs two table lookups.
    perm_grad: Box<[Gradient2]>,
}

impl OpenSimplex2 {
    /// Creates the noise field for `seed`.
    #[must_use]
    pub fn new(seed: i64) -> Self {
        let perm = PermutationTable::from_seed(seed);
        let perm_grad = perm.permute_gradients(&GRADIENTS_2D);
        Self {
            seed,
            perm,
            perm_grad,
        }
    }

    /// The seed this field was built from.
    #[must_use]
    pub const fn seed(&self) -> i64 {
        self.seed
    }

    /// The permutation table backing this field.
    #[must_use]
    pub const fn permutation(&self) -> &PermutationTable {
        &self.perm
    }

    /// Rebuilds the permutation and gradient tables for `seed`.
    ///
    /// Does nothing when `seed` is already the current seed. Returns whether
    /// the tables were rebuilt.
    pub fn reseed(&mut self, seed: i64) -> bool {
        if self.seed == seed {
            return false;
        }
        *self = Self::new(seed);
        true
    }

    /// Samples the field at `(x, z)`.
    #[must_use]
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        // Skew input space onto the simplex lattice
        let s = SKEW_2D * (x + z);
        self.sample_base(x + s, z + s)
    }

    /// Samples a rotated lattice, with the skew and rotation folded into one
    /// transform.
    ///
    /// Better behaved than [`Self::sample`] when the 2D plane is a slice of a
    /// space whose remaining axis is "up" (e.g. a top-down height map).
    #[must_use]
    pub fn sample_x_before_z(&self, x: f64, z: f64) -> f64 {
        let xx = x * ROOT2_OVER_2;
        let zz = z * ROOT3_OVER_ROOT2;
        self.sample_base(zz + xx, zz - xx)
    }

    /// Evaluates the noise at skewed lattice coordinates.
    fn sample_base(&self, xs: f64, zs: f64) -> f64 {
        let xsb = floor(xs);
        let zsb = floor(zs);
        let xsi = xs - f64::from(xsb);
        let zsi = zs - f64::from(zsb);

        // Which side of the cell diagonal we're on picks the corner triple.
        // Always 0 or 1 unless the floor saturated on an out of range input.
        let index = (((zsi - xsi) / 2.0 + 1.0) as usize).min(1);

        // Unskew to get the offset from the cell origin
        let ssi = (xsi + zsi) * UNSKEW_2D;
        let xi = xsi + ssi;
        let zi = zsi + ssi;

        let mut value = 0.0;
        for point in &LATTICE_2D[index..index + 3] {
            let dx = xi + point.dx;
            let dz = zi + point.dz;
            let mut attn = 0.5 - dx * dx - dz * dz;
            if attn <= 0.0 {
                continue;
            }

            let pxm = xsb.wrapping_add(point.xsv) & PMASK;
            let pzm = (zsb.wrapping_add(point.zsv) & PMASK) as usize;
            let gradient = self.perm_grad[self.perm.get(pxm) ^ pzm];
            let extrapolation = gradient.dx * dx + gradient.dz * dz;

            attn *= attn;
            value += attn * attn * extrapolation;
        }
        value
    }
}
