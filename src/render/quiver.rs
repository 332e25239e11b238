//! Arrow geometry for quiver plots.
//!
//! Lengths are specified relative to the plot width in pixels and the arrow is
//! built in pixel space before being mapped back to data coordinates, so arrow
//! directions survive unequal x/y scaling.

use crate::math::{Scalar, R2};

/// Sizing of quiver arrows, in the conventions of matplotlib's `quiver`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuiverStyle {
    /// A unit vector spans `1 / scale` of the plot width.
    pub scale: Scalar,
    /// Shaft width as a fraction of the plot width.
    pub shaft_width: Scalar,
    /// Full head width in multiples of the shaft width.
    pub head_width: Scalar,
    /// Head length in multiples of the shaft width.
    pub head_length: Scalar,
}

impl Default for QuiverStyle {
    fn default() -> Self {
        Self {
            scale: 20.0,
            shaft_width: 0.005,
            head_width: 4.0,
            head_length: 5.0,
        }
    }
}

impl QuiverStyle {
    /// Shaft width in pixels for a plot `plot_width_px` wide.
    #[must_use]
    pub fn shaft_px(&self, plot_width_px: Scalar) -> Scalar {
        self.shaft_width * plot_width_px
    }
}

/// Linear data-to-pixel scale of a plotting area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelScale {
    /// Pixels per data unit along x.
    pub x_px_per_unit: Scalar,
    /// Pixels per data unit along y.
    pub y_px_per_unit: Scalar,
    /// Width of the plotting area in pixels.
    pub plot_width_px: Scalar,
}

impl PixelScale {
    /// Scale of a `width_px` × `height_px` area showing the given data ranges.
    #[must_use]
    pub fn new(width_px: u32, height_px: u32, x_range: (Scalar, Scalar), y_range: (Scalar, Scalar)) -> Self {
        let width = Scalar::from(width_px);
        let height = Scalar::from(height_px);
        Self {
            x_px_per_unit: width / (x_range.1 - x_range.0),
            y_px_per_unit: height / (y_range.1 - y_range.0),
            plot_width_px: width,
        }
    }

    fn to_data(self, offset_px: R2) -> R2 {
        R2::new(offset_px.x / self.x_px_per_unit, offset_px.y / self.y_px_per_unit)
    }
}

/// One arrow in data coordinates, anchored at its tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    /// Anchor point.
    pub tail: (Scalar, Scalar),
    /// Where the shaft meets the head.
    pub shaft_end: (Scalar, Scalar),
    /// Head triangle: tip, then the two base corners.
    pub head: [(Scalar, Scalar); 3],
}

/// Builds the arrow for vector `v` anchored at `tail`.
///
/// Returns `None` for zero-length or non-finite vectors.
#[must_use]
pub fn arrow(tail: R2, v: R2, style: &QuiverStyle, scale: &PixelScale) -> Option<Arrow> {
    let len = v.norm();
    if !len.is_finite() || len == 0.0 || !tail.iter().all(|c| c.is_finite()) {
        return None;
    }
    let dir = v / len;
    let normal = R2::new(-dir.y, dir.x);

    let length_px = scale.plot_width_px * len / style.scale;
    let shaft_px = style.shaft_px(scale.plot_width_px);
    let head_length_px = (style.head_length * shaft_px).min(length_px);
    let half_head_px = 0.5 * style.head_width * shaft_px;

    let at = |offset_px: R2| {
        let p = tail + scale.to_data(offset_px);
        (p.x, p.y)
    };
    let base = dir * (length_px - head_length_px);
    Some(Arrow {
        tail: (tail.x, tail.y),
        shaft_end: at(base),
        head: [
            at(dir * length_px),
            at(base + normal * half_head_px),
            at(base - normal * half_head_px),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_scale() -> PixelScale {
        // 400 px over 20 data units on both axes
        PixelScale::new(400, 400, (-10.0, 10.0), (-10.0, 10.0))
    }

    #[test]
    fn unit_arrow_spans_one_twentieth_of_the_width() {
        let a = arrow(R2::new(1.0, 2.0), R2::new(1.0, 0.0), &QuiverStyle::default(), &square_scale())
            .expect("finite vector");
        let tip = a.head[0];
        assert_relative_eq!(tip.0, 2.0, epsilon = 1.0e-12);
        assert_relative_eq!(tip.1, 2.0, epsilon = 1.0e-12);
        // head length 5 × (0.005 × 400 px) = 10 px = 0.5 data units
        assert_relative_eq!(a.shaft_end.0, 1.5, epsilon = 1.0e-12);
        // half head width 2 × 2 px = 4 px = 0.2 data units
        assert_relative_eq!(a.head[1].1 - a.head[2].1, 0.4, epsilon = 1.0e-12);
    }

    #[test]
    fn vertical_arrow_uses_pixel_length_on_stretched_axes() {
        // y axis is squeezed: 200 px for 20 units
        let scale = PixelScale::new(400, 200, (-10.0, 10.0), (-10.0, 10.0));
        let a = arrow(R2::zeros(), R2::new(0.0, 1.0), &QuiverStyle::default(), &scale).expect("finite vector");
        // 20 px of length is 2 data units vertically
        assert_relative_eq!(a.head[0].1, 2.0, epsilon = 1.0e-12);
        assert_relative_eq!(a.head[0].0, 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn degenerate_vectors_produce_no_arrow() {
        let style = QuiverStyle::default();
        assert!(arrow(R2::zeros(), R2::zeros(), &style, &square_scale()).is_none());
        assert!(arrow(R2::zeros(), R2::new(Scalar::NAN, 1.0), &style, &square_scale()).is_none());
    }
}
