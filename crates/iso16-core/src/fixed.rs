//! Q16.16 arithmetic unit.
//!
//! All operations are total and bit-exact across implementations:
//!
//! - `add` / `sub` wrap modulo 2^32 and reinterpret as signed.
//! - `abs` negates negative values, except `i32::MIN`, whose magnitude is
//!   unrepresentable; it clamps to `i32::MAX` instead of wrapping to itself.
//! - `leq` is an ordinary signed comparison.

use iso16_types::{Q16, Triple};

/// The tolerance used by both the symmetry and the error checks.
pub const EPSILON: Q16 = Q16::EPSILON;

/// Wrapping Q16.16 addition.
pub const fn add(a: Q16, b: Q16) -> Q16 {
    Q16(a.0.wrapping_add(b.0))
}

/// Wrapping Q16.16 subtraction.
pub const fn sub(a: Q16, b: Q16) -> Q16 {
    Q16(a.0.wrapping_sub(b.0))
}

/// Absolute value, clamping `MIN` to `MAX`.
pub const fn abs(a: Q16) -> Q16 {
    Q16(a.0.saturating_abs())
}

/// Signed `a <= b`.
pub const fn leq(a: Q16, b: Q16) -> bool {
    a.0 <= b.0
}

/// Componentwise wrapping addition of two triples.
pub const fn add_triple(a: Triple, b: Triple) -> Triple {
    Triple::new(add(a.x, b.x), add(a.y, b.y), add(a.z, b.z))
}

/// Componentwise absolute difference `|a - b|`.
pub const fn abs_diff_triple(a: Triple, b: Triple) -> Triple {
    Triple::new(
        abs(sub(a.x, b.x)),
        abs(sub(a.y, b.y)),
        abs(sub(a.z, b.z)),
    )
}
