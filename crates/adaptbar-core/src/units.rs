#![forbid(unsafe_code)]

//! Width units and the small amount of float arithmetic the layout needs.
//!
//! Widths are logical points. Hosts may hand in fractional, zero, or negative
//! widths (during a resize a container can collapse below its padding); all
//! helpers here are total over those inputs and never panic. `NaN` is treated
//! as zero.

/// A horizontal length in logical points.
pub type Px = f64;

/// Grid step used to bucket widths for caching and recalculation gating.
pub const WIDTH_QUANTUM: Px = 10.0;

/// Replace `NaN` with zero, leaving every other value untouched.
#[inline]
#[must_use]
pub fn sanitize(value: Px) -> Px {
    if value.is_nan() { 0.0 } else { value }
}

/// Clamp at zero from below.
#[inline]
#[must_use]
pub fn non_negative(value: Px) -> Px {
    sanitize(value).max(0.0)
}

/// Snap `width` down onto a grid of `step` points.
///
/// Returns the grid line as an integer so it can participate in `Hash`/`Eq`
/// keys. A non-positive or non-finite `step` disables quantization and
/// truncates the width instead.
#[must_use]
pub fn quantize(width: Px, step: Px) -> i64 {
    let width = sanitize(width);
    if !(step.is_finite() && step > 0.0) {
        return width.trunc() as i64;
    }
    ((width / step).floor() * step) as i64
}

/// Clamp `value` into `[lo, hi]`, applying the upper bound first.
///
/// When the bounds are inverted (`lo > hi`) the lower bound wins, so a
/// misconfigured minimum is never undercut.
#[inline]
#[must_use]
pub fn clamp_floor_wins(value: Px, lo: Px, hi: Px) -> Px {
    lo.max(sanitize(value).min(hi))
}

/// True when two widths differ by no more than `tolerance`.
#[inline]
#[must_use]
pub fn within(a: Px, b: Px, tolerance: Px) -> bool {
    (sanitize(a) - sanitize(b)).abs() <= tolerance
}
