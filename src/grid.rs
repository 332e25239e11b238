//! Rectangular sample grids over the plot domain.

use crate::fields::FieldError;
use crate::math::{linspace, Scalar, R2};

/// Bounds and resolution of the sampled domain.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Lower x bound in meters.
    pub x_min: Scalar,
    /// Upper x bound in meters.
    pub x_max: Scalar,
    /// Number of samples along x.
    pub x_points: usize,
    /// Lower y bound in meters.
    pub y_min: Scalar,
    /// Upper y bound in meters.
    pub y_max: Scalar,
    /// Number of samples along y.
    pub y_points: usize,
}

impl GridSpec {
    /// Square grid with `points` samples per axis over `[min, max]²`.
    #[must_use]
    pub fn square(min: Scalar, max: Scalar, points: usize) -> Self {
        Self {
            x_min: min,
            x_max: max,
            x_points: points,
            y_min: min,
            y_max: max,
            y_points: points,
        }
    }

    /// Checks bound ordering, finiteness and resolution of both axes.
    pub fn validate(&self) -> Result<(), FieldError> {
        check_axis("x", self.x_min, self.x_max, self.x_points)?;
        check_axis("y", self.y_min, self.y_max, self.y_points)
    }

    /// Validates the bounds and samples both axes.
    pub fn build(&self) -> Result<Grid, FieldError> {
        self.validate()?;
        Ok(Grid {
            xs: linspace(self.x_min, self.x_max, self.x_points),
            ys: linspace(self.y_min, self.y_max, self.y_points),
        })
    }
}

fn check_axis(axis: &'static str, min: Scalar, max: Scalar, points: usize) -> Result<(), FieldError> {
    let invalid = |reason: String| FieldError::InvalidAxis { axis, reason };
    if !min.is_finite() || !max.is_finite() {
        return Err(invalid(format!("bounds must be finite, got [{min}, {max}]")));
    }
    if min >= max {
        return Err(invalid(format!("lower bound {min} must be below upper bound {max}")));
    }
    if points == 0 {
        return Err(invalid("at least one sample is required".into()));
    }
    Ok(())
}

/// Meshgrid of sample points: rows follow y, columns follow x.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    xs: Vec<Scalar>,
    ys: Vec<Scalar>,
}

impl Grid {
    /// Samples along x (one per column).
    #[must_use]
    pub fn xs(&self) -> &[Scalar] {
        &self.xs
    }

    /// Samples along y (one per row).
    #[must_use]
    pub fn ys(&self) -> &[Scalar] {
        &self.ys
    }

    /// `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.ys.len(), self.xs.len())
    }

    /// Total number of sample points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len() * self.ys.len()
    }

    /// True if the grid holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coordinates of the sample at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the index lies outside the grid.
    #[must_use]
    pub fn point(&self, row: usize, col: usize) -> R2 {
        R2::new(self.xs[col], self.ys[row])
    }

    /// Row-major iterator over `(row, col, point)`.
    pub fn points(&self) -> impl Iterator<Item = (usize, usize, R2)> + '_ {
        self.ys.iter().enumerate().flat_map(move |(row, &y)| {
            self.xs
                .iter()
                .enumerate()
                .map(move |(col, &x)| (row, col, R2::new(x, y)))
        })
    }

    /// Span of the x samples.
    #[must_use]
    pub fn x_range(&self) -> (Scalar, Scalar) {
        span(&self.xs)
    }

    /// Span of the y samples.
    #[must_use]
    pub fn y_range(&self) -> (Scalar, Scalar) {
        span(&self.ys)
    }
}

fn span(values: &[Scalar]) -> (Scalar, Scalar) {
    match (values.first(), values.last()) {
        (Some(&lo), Some(&hi)) => (lo, hi),
        _ => (0.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_grid_shape_and_corners() {
        let grid = GridSpec::square(-10.0, 10.0, 50).build().expect("valid grid");
        assert_eq!(grid.shape(), (50, 50));
        assert_eq!(grid.point(0, 0), R2::new(-10.0, -10.0));
        assert_eq!(grid.point(49, 49), R2::new(10.0, 10.0));
        assert_eq!(grid.x_range(), (-10.0, 10.0));
    }

    #[test]
    fn points_are_row_major_with_x_along_columns() {
        let spec = GridSpec {
            x_min: 0.0,
            x_max: 2.0,
            x_points: 3,
            y_min: 0.0,
            y_max: 1.0,
            y_points: 2,
        };
        let grid = spec.build().expect("valid grid");
        let pts: Vec<_> = grid.points().collect();
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[1], (0, 1, R2::new(1.0, 0.0)));
        assert_eq!(pts[3], (1, 0, R2::new(0.0, 1.0)));
    }

    #[test]
    fn rejects_reversed_bounds() {
        let mut spec = GridSpec::square(-1.0, 1.0, 4);
        spec.y_min = 2.0;
        match spec.build() {
            Err(FieldError::InvalidAxis { axis, .. }) => assert_eq!(axis, "y"),
            other => panic!("expected InvalidAxis, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_resolution_and_nan_bounds() {
        assert!(GridSpec::square(-1.0, 1.0, 0).validate().is_err());
        assert!(GridSpec::square(Scalar::NAN, 1.0, 3).validate().is_err());
    }
}
