//! Scalar kernels over the host numerics library.
//!
//! The interval closure evaluates every partial scalar operation through
//! these wrappers, which state the domain preconditions explicitly; the
//! underlying primitives are assumed to satisfy IEEE 754 semantics.
//! Operations that are total (`exp`, `atan`, `floor`, ...) need no wrapper
//! and are consumed directly.

use num_traits::Float;

/// `x²`.
pub fn square<T: Copy + core::ops::Mul<Output = T>>(x: T) -> T {
    x * x
}

/// Square root. Requires `x ≥ 0`.
pub fn sqrt<T: Float>(x: T) -> T {
    debug_assert!(x >= T::zero());
    x.sqrt()
}

/// Natural logarithm. Requires `x ≥ 0`; `ln(0) = -∞`.
pub fn ln<T: Float>(x: T) -> T {
    debug_assert!(x >= T::zero());
    x.ln()
}

/// Arc sine. Requires `x ∈ [-1, 1]`.
pub fn asin<T: Float>(x: T) -> T {
    debug_assert!(x >= -T::one() && x <= T::one());
    x.asin()
}

/// Arc cosine. Requires `x ∈ [-1, 1]`.
pub fn acos<T: Float>(x: T) -> T {
    debug_assert!(x >= -T::one() && x <= T::one());
    x.acos()
}

/// Quadrant-aware arc tangent. Requires a point off the branch cut,
/// i.e. `y ≠ 0 ∨ x > 0`.
pub fn atan2<T: Float>(y: T, x: T) -> T {
    debug_assert!(y != T::zero() || x > T::zero());
    y.atan2(x)
}

/// Fractional part `x - ⌊x⌋`, in `[0, 1)` for finite `x`.
pub fn frac<T: Float>(x: T) -> T {
    x - x.floor()
}

/// Wraps `x` into the `[min, max)` interval.
///
/// Not adequate for arguments vastly larger than the target range; a
/// cancellation-free reduction (e.g. Payne–Hanek) would be needed there.
pub fn wraparound<T: Float>(x: T, min: T, max: T) -> T {
    assert!(min < max);
    let range = max - min;
    min + (range + (x - min) % range) % range
}
