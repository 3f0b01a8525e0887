use crate::random::Random;

// Knuth's MMIX constants.
const MULTIPLIER: i64 = 6_364_136_223_846_793_005;
const INCREMENT: i64 = 1_442_695_040_888_963_407;

const DOUBLE_UNIT: f64 = 1.0 / 9_007_199_254_740_992.0; // 2^-53

/// 64-bit linear congruential generator.
///
/// The state is the output: every step is `state * MULTIPLIER + INCREMENT`
/// with two's complement wrapping. Bounded draws reduce `state + 31` with a
/// truncating remainder, which is the sequence the noise permutation tables
/// are shuffled with.
#[derive(Debug, Clone)]
pub struct Lcg64 {
    state: i64,
}

impl Lcg64 {
    /// Starts the sequence at `seed`. The seed is used as the state unscrambled.
    #[must_use]
    pub const fn from_seed(seed: i64) -> Self {
        Self { state: seed }
    }

    fn next_random(&mut self) -> i64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
        self.state
    }
}

impl Random for Lcg64 {
    fn next_i64(&mut self) -> i64 {
        self.next_random()
    }

    fn next_i32_bounded(&mut self, bound: i32) -> i32 {
        let bound = i64::from(bound);
        let mut r = self.next_random().wrapping_add(31) % bound;
        if r < 0 {
            r += bound;
        }
        r as i32
    }

    fn next_f64(&mut self) -> f64 {
        ((self.next_random() as u64) >> 11) as f64 * DOUBLE_UNIT
    }
}
