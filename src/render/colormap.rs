//! Viridis colour map and linear magnitude normalization.

use plotters::style::RGBColor;

use crate::math::Scalar;

// Nine evenly spaced samples of matplotlib's viridis.
const VIRIDIS: [(u8, u8, u8); 9] = [
    (0x44, 0x01, 0x54),
    (0x48, 0x28, 0x78),
    (0x3e, 0x4a, 0x89),
    (0x31, 0x68, 0x8e),
    (0x26, 0x82, 0x8e),
    (0x1f, 0x9e, 0x89),
    (0x35, 0xb7, 0x79),
    (0x6d, 0xcd, 0x59),
    (0xfd, 0xe7, 0x25),
];

/// Viridis colour for `t` in [0, 1]; out-of-range and NaN inputs are clamped.
#[must_use]
pub fn viridis(t: Scalar) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (VIRIDIS.len() - 1) as Scalar;
    let lo = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - lo as Scalar;
    let (a, b) = (VIRIDIS[lo], VIRIDIS[lo + 1]);
    let mix = |x: u8, y: u8| (Scalar::from(x) + (Scalar::from(y) - Scalar::from(x)) * frac).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Linear map from a value range onto [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearNorm {
    /// Value mapped to 0.
    pub min: Scalar,
    /// Value mapped to 1.
    pub max: Scalar,
}

impl LinearNorm {
    /// Norm over `[min, max]`; a collapsed range is widened so it stays invertible.
    #[must_use]
    pub fn new(min: Scalar, max: Scalar) -> Self {
        if max > min {
            Self { min, max }
        } else {
            let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.5 };
            Self { min: min - pad, max: min + pad }
        }
    }

    /// Position of `value` within the range.
    #[must_use]
    pub fn apply(&self, value: Scalar) -> Scalar {
        (value - self.min) / (self.max - self.min)
    }
}
