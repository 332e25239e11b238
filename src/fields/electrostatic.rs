use log::{debug, warn};

use super::FieldError;
use crate::constants::coulomb_constant;
use crate::grid::Grid;
use crate::math::{MaskGrid, R2, Scalar, ScalarGrid};

/// Distance (m) below which a sample point is considered to sit on a charge.
pub const SINGULARITY_RADIUS: Scalar = 1.0e-12;

/// Point charge in coulombs.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCharge {
    /// Position in meters.
    pub position: R2,
    /// Charge in coulombs.
    pub charge_c: Scalar,
}

impl PointCharge {
    /// Charge of `charge_c` coulombs located at `(x, y)`.
    #[must_use]
    pub fn new(charge_c: Scalar, x: Scalar, y: Scalar) -> Self {
        Self { position: R2::new(x, y), charge_c }
    }

    /// True for strictly positive charge.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.charge_c > 0.0
    }

    /// Coulomb field `k q r / |r|³` of this charge at `point`.
    ///
    /// Returns `None` when `point` lies within [`SINGULARITY_RADIUS`] of the charge.
    #[must_use]
    pub fn field_at(&self, point: R2) -> Option<R2> {
        let r_vec = point - self.position;
        let r = r_vec.norm();
        if r <= SINGULARITY_RADIUS {
            return None;
        }
        Some(r_vec * (coulomb_constant() * self.charge_c / (r * r * r)))
    }

    fn validate(&self, index: usize) -> Result<(), FieldError> {
        if !self.charge_c.is_finite() {
            return Err(FieldError::InvalidCharge { index, reason: "charge is not finite" });
        }
        if !self.position.iter().all(|c| c.is_finite()) {
            return Err(FieldError::InvalidCharge { index, reason: "position is not finite" });
        }
        Ok(())
    }
}

/// How superposition and normalization treat cells without a defined direction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SingularityPolicy {
    /// Fail with a [`FieldError`] naming the first offending cell.
    #[default]
    Reject,
    /// Mask the cell, store NaN and keep going.
    Mask,
}

/// Electric field E at `point` due to discrete point charges.
pub fn electric_field_at(point: R2, charges: &[PointCharge]) -> Result<R2, FieldError> {
    if !point.iter().all(|c| c.is_finite()) {
        return Err(FieldError::InvalidPoint { x: point.x, y: point.y });
    }
    let mut e = R2::zeros();
    for (index, c) in charges.iter().enumerate() {
        c.validate(index)?;
        e += c.field_at(point).ok_or(FieldError::Singular {
            charge: index,
            row: 0,
            col: 0,
            x: point.x,
            y: point.y,
        })?;
    }
    Ok(e)
}

/// Superposed field components sampled on a [`Grid`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMap {
    /// x component in V/m, indexed `(row, col)`.
    pub ex: ScalarGrid,
    /// y component in V/m, indexed `(row, col)`.
    pub ey: ScalarGrid,
    mask: MaskGrid,
}

impl FieldMap {
    fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            ex: ScalarGrid::zeros(rows, cols),
            ey: ScalarGrid::zeros(rows, cols),
            mask: MaskGrid::from_element(rows, cols, false),
        }
    }

    /// `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.ex.shape()
    }

    /// Field vector at `(row, col)`, or `None` for masked cells.
    #[must_use]
    pub fn at(&self, row: usize, col: usize) -> Option<R2> {
        if self.mask[(row, col)] {
            None
        } else {
            Some(R2::new(self.ex[(row, col)], self.ey[(row, col)]))
        }
    }

    /// True if the cell was excluded by [`SingularityPolicy::Mask`].
    #[must_use]
    pub fn is_masked(&self, row: usize, col: usize) -> bool {
        self.mask[(row, col)]
    }

    /// Number of masked cells.
    #[must_use]
    pub fn masked_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    pub(crate) fn mask(&self) -> &MaskGrid {
        &self.mask
    }
}

/// Sums the Coulomb contribution of every charge at every grid point.
///
/// Charges are processed one at a time over the whole grid. A grid point within
/// [`SINGULARITY_RADIUS`] of a charge is handled according to `policy`.
pub fn superpose(
    grid: &Grid,
    charges: &[PointCharge],
    policy: SingularityPolicy,
) -> Result<FieldMap, FieldError> {
    for (index, charge) in charges.iter().enumerate() {
        charge.validate(index)?;
    }

    let (rows, cols) = grid.shape();
    let mut field = FieldMap::zeros(rows, cols);

    for (index, charge) in charges.iter().enumerate() {
        debug!(
            "adding charge #{index}: {:.3e} C at ({}, {})",
            charge.charge_c, charge.position.x, charge.position.y
        );
        for (row, col, point) in grid.points() {
            match charge.field_at(point) {
                Some(e) => {
                    field.ex[(row, col)] += e.x;
                    field.ey[(row, col)] += e.y;
                }
                None => match policy {
                    SingularityPolicy::Reject => {
                        return Err(FieldError::Singular {
                            charge: index,
                            row,
                            col,
                            x: point.x,
                            y: point.y,
                        });
                    }
                    SingularityPolicy::Mask => field.mask[(row, col)] = true,
                },
            }
        }
    }

    let masked = field.masked_count();
    if masked > 0 {
        warn!("{masked} grid cell(s) coincide with a charge and were masked");
        for (value, &m) in field.ex.iter_mut().zip(field.mask.iter()) {
            if m {
                *value = Scalar::NAN;
            }
        }
        for (value, &m) in field.ey.iter_mut().zip(field.mask.iter()) {
            if m {
                *value = Scalar::NAN;
            }
        }
    }

    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::VACUUM_PERMITTIVITY;
    use crate::grid::GridSpec;
    use approx::assert_relative_eq;

    #[test]
    fn single_charge_follows_inverse_square_law_radially() {
        let q = PointCharge::new(1.0e-9, 0.0, 0.0);
        let k = 1.0 / (4.0 * std::f64::consts::PI * VACUUM_PERMITTIVITY);
        for p in [R2::new(1.0, 0.0), R2::new(-3.0, 4.0), R2::new(0.5, -0.25)] {
            let e = electric_field_at(p, &[q]).expect("off-charge point");
            let r = p.norm();
            assert_relative_eq!(e.norm(), k * 1.0e-9 / (r * r), max_relative = 1.0e-12);
            // outward: parallel to p with positive projection
            assert_relative_eq!(e.normalize().dot(&p.normalize()), 1.0, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn negative_charge_points_inward() {
        let q = PointCharge::new(-2.0e-9, 1.0, 1.0);
        let e = electric_field_at(R2::new(2.0, 1.0), &[q]).expect("off-charge point");
        assert!(e.x < 0.0);
        assert_relative_eq!(e.y, 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn evaluation_on_a_charge_is_singular() {
        let charges = [PointCharge::new(1.0e-9, 5.0, 0.0), PointCharge::new(1.0e-9, 2.0, 3.0)];
        match electric_field_at(R2::new(2.0, 3.0), &charges) {
            Err(FieldError::Singular { charge, x, y, .. }) => {
                assert_eq!(charge, 1);
                assert_eq!((x, y), (2.0, 3.0));
            }
            other => panic!("expected Singular, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_evaluation_point_is_rejected() {
        let charges = [PointCharge::new(1.0e-9, 0.0, 0.0)];
        for p in [R2::new(Scalar::NAN, 1.0), R2::new(0.0, Scalar::INFINITY)] {
            assert!(matches!(
                electric_field_at(p, &charges),
                Err(FieldError::InvalidPoint { .. })
            ));
        }
    }

    #[test]
    fn superposition_is_linear() {
        let grid = GridSpec::square(-5.0, 5.0, 12).build().expect("valid grid");
        let a = PointCharge::new(3.0e-9, 0.3, -1.1);
        let b = PointCharge::new(-1.5e-9, -2.2, 0.7);
        let both = superpose(&grid, &[a, b], SingularityPolicy::Reject).expect("no singular cells");
        let only_a = superpose(&grid, &[a], SingularityPolicy::Reject).expect("no singular cells");
        let only_b = superpose(&grid, &[b], SingularityPolicy::Reject).expect("no singular cells");
        for (row, col, _) in grid.points() {
            let sum = only_a.at(row, col).unwrap() + only_b.at(row, col).unwrap();
            let e = both.at(row, col).unwrap();
            assert_relative_eq!(e.x, sum.x, max_relative = 1.0e-12, epsilon = 1.0e-12);
            assert_relative_eq!(e.y, sum.y, max_relative = 1.0e-12, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn grid_matches_pointwise_evaluation() {
        let grid = GridSpec::square(-4.0, 4.0, 7).build().expect("valid grid");
        let charges = [PointCharge::new(1.0e-9, 0.5, 0.5), PointCharge::new(-1.0e-9, -0.5, 0.1)];
        let field = superpose(&grid, &charges, SingularityPolicy::Reject).expect("no singular cells");
        let e = electric_field_at(grid.point(2, 5), &charges).expect("off-charge point");
        assert_relative_eq!(field.ex[(2, 5)], e.x, max_relative = 1.0e-12);
        assert_relative_eq!(field.ey[(2, 5)], e.y, max_relative = 1.0e-12);
    }

    #[test]
    fn grid_point_on_charge_is_rejected_by_default() {
        let grid = GridSpec::square(-1.0, 1.0, 3).build().expect("valid grid");
        let charges = [PointCharge::new(1.0e-9, 0.0, 0.0)];
        match superpose(&grid, &charges, SingularityPolicy::default()) {
            Err(FieldError::Singular { charge, row, col, .. }) => {
                assert_eq!((charge, row, col), (0, 1, 1));
            }
            other => panic!("expected Singular, got {other:?}"),
        }
    }

    #[test]
    fn mask_policy_flags_singular_cells() {
        let grid = GridSpec::square(-1.0, 1.0, 3).build().expect("valid grid");
        let charges = [PointCharge::new(1.0e-9, 0.0, 0.0), PointCharge::new(-1.0e-9, 1.0, 1.0)];
        let field = superpose(&grid, &charges, SingularityPolicy::Mask).expect("masking never fails");
        assert_eq!(field.masked_count(), 2);
        assert!(field.is_masked(1, 1));
        assert!(field.is_masked(2, 2));
        assert!(field.at(1, 1).is_none());
        assert!(field.ex[(1, 1)].is_nan());
        assert!(field.at(0, 0).is_some_and(|e| e.x.is_finite() && e.y.is_finite()));
    }

    #[test]
    fn non_finite_charge_is_rejected() {
        let grid = GridSpec::square(-1.0, 1.0, 2).build().expect("valid grid");
        let charges = [PointCharge::new(1.0e-9, 0.3, 0.3), PointCharge::new(Scalar::NAN, 0.0, 0.0)];
        assert!(matches!(
            superpose(&grid, &charges, SingularityPolicy::Mask),
            Err(FieldError::InvalidCharge { index: 1, .. })
        ));
    }
}
