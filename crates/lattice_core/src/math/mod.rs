//! Generic float helpers.
//!
//! Small conversions and comparisons used by the model and engine layers,
//! written against `num_traits::Float` so every layer stays generic over
//! the scalar type.

use num_traits::Float;

/// Converts a step or node index into the scalar type.
///
/// Indices are bounded by the lattice step limit, so the conversion is exact
/// for `f32` and `f64`. A type that cannot represent the index yields NaN,
/// which then fails every downstream validation.
///
/// # Examples
/// ```
/// use lattice_core::math::from_usize;
///
/// let n: f64 = from_usize(250);
/// assert_eq!(n, 250.0);
/// ```
#[inline]
pub fn from_usize<T: Float>(n: usize) -> T {
    T::from(n).unwrap_or_else(T::nan)
}

/// Converts a scalar to `f64` for error reporting.
#[inline]
pub fn to_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

/// Returns true if `x` is finite and strictly positive.
#[inline]
pub fn is_positive_finite<T: Float>(x: T) -> bool {
    x.is_finite() && x > T::zero()
}

/// Relative equality with a floor of one on the scale.
///
/// `|a - b| <= tol * max(1, |a|, |b|)`. NaN never compares equal.
///
/// The scale is floored at 1, so below unit magnitude this is an absolute
/// check. Use `approx::relative_eq!` with `max_relative` where a purely
/// relative tolerance is required.
///
/// # Examples
/// ```
/// use lattice_core::math::relative_eq;
///
/// assert!(relative_eq(1.0_f64, 1.0 + 1e-14, 1e-12));
/// assert!(!relative_eq(1.0_f64, 1.001, 1e-12));
/// ```
#[inline]
pub fn relative_eq<T: Float>(a: T, b: T, tol: T) -> bool {
    let scale = T::one().max(a.abs()).max(b.abs());
    (a - b).abs() <= tol * scale
}
