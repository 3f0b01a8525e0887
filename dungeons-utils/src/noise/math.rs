//! Math utilities for noise generation.

/// Floor function returning i32 (matches Java's `(int)` based fast floor).
///
/// The cast saturates outside the `i32` range, and the correction step wraps
/// like Java's `int` arithmetic, so every input has a result.
#[inline]
#[must_use]
pub fn floor(value: f64) -> i32 {
    let i = value as i32;
    if value < f64::from(i) { i.wrapping_sub(1) } else { i }
}
