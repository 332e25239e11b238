//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{DMatrix, Vector2};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for two-dimensional real vectors.
pub type R2 = Vector2<Scalar>;
/// Grid-shaped array of scalars, indexed `(row, col)`.
pub type ScalarGrid = DMatrix<Scalar>;
/// Grid-shaped boolean mask, indexed `(row, col)`.
pub type MaskGrid = DMatrix<bool>;

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            let mut samples: Vec<Scalar> = (0..n).map(|i| start + step * i as Scalar).collect();
            // land exactly on the upper bound regardless of rounding in `step`
            samples[n - 1] = stop;
            samples
        }
    }
}

/// Minimum and maximum over the finite entries of `values`, if any.
#[must_use]
pub fn finite_range<'a>(values: impl IntoIterator<Item = &'a Scalar>) -> Option<(Scalar, Scalar)> {
    values
        .into_iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
