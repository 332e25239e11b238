use log::warn;

use super::{FieldError, FieldMap, SingularityPolicy};
use crate::math::{finite_range, MaskGrid, R2, Scalar, ScalarGrid};

/// Unit direction field with the original magnitude retained for colour coding.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedField {
    /// x component of the unit vector.
    pub ux: ScalarGrid,
    /// y component of the unit vector.
    pub uy: ScalarGrid,
    /// |E| in V/m.
    pub magnitude: ScalarGrid,
    mask: MaskGrid,
}

impl NormalizedField {
    /// `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.magnitude.shape()
    }

    /// Unit vector and magnitude at `(row, col)`, or `None` for masked cells.
    #[must_use]
    pub fn at(&self, row: usize, col: usize) -> Option<(R2, Scalar)> {
        if self.mask[(row, col)] {
            None
        } else {
            Some((
                R2::new(self.ux[(row, col)], self.uy[(row, col)]),
                self.magnitude[(row, col)],
            ))
        }
    }

    /// True if the cell carries no direction.
    #[must_use]
    pub fn is_masked(&self, row: usize, col: usize) -> bool {
        self.mask[(row, col)]
    }

    /// Number of masked cells.
    #[must_use]
    pub fn masked_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Smallest and largest magnitude over unmasked cells.
    #[must_use]
    pub fn magnitude_range(&self) -> Option<(Scalar, Scalar)> {
        finite_range(
            self.magnitude
                .iter()
                .zip(self.mask.iter())
                .filter(|(_, m)| !**m)
                .map(|(v, _)| v),
        )
    }
}

/// Splits every field vector into magnitude and unit direction.
///
/// Cells already masked in `field` stay masked. A vanishing field has no
/// direction and is handled according to `policy`.
pub fn normalize(field: &FieldMap, policy: SingularityPolicy) -> Result<NormalizedField, FieldError> {
    let (rows, cols) = field.shape();
    let mut out = NormalizedField {
        ux: ScalarGrid::from_element(rows, cols, Scalar::NAN),
        uy: ScalarGrid::from_element(rows, cols, Scalar::NAN),
        magnitude: ScalarGrid::from_element(rows, cols, Scalar::NAN),
        mask: field.mask().clone(),
    };
    let mut vanished = 0usize;

    for row in 0..rows {
        for col in 0..cols {
            let Some(e) = field.at(row, col) else {
                continue;
            };
            let magnitude = e.norm();
            if magnitude < Scalar::MIN_POSITIVE {
                match policy {
                    SingularityPolicy::Reject => return Err(FieldError::ZeroField { row, col }),
                    SingularityPolicy::Mask => {
                        out.mask[(row, col)] = true;
                        vanished += 1;
                        continue;
                    }
                }
            }
            out.ux[(row, col)] = e.x / magnitude;
            out.uy[(row, col)] = e.y / magnitude;
            out.magnitude[(row, col)] = magnitude;
        }
    }

    if vanished > 0 {
        warn!("{vanished} grid cell(s) have a vanishing field and were masked");
    }
    Ok(out)
}
