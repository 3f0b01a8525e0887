//! Seeded pseudo-random sequences used to derive world generation state.
//!
//! Everything here is bit-for-bit reproducible from the seed; nothing reads
//! global entropy.

mod lcg;

pub use lcg::Lcg64;

/// A seeded source of pseudo-random values.
pub trait Random {
    /// Advances the sequence and returns the next raw 64-bit value.
    fn next_i64(&mut self) -> i64;

    /// Returns a value in `0..bound`. `bound` must be positive.
    fn next_i32_bounded(&mut self, bound: i32) -> i32;

    /// Returns a value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
}
