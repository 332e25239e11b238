//! Physical constants for electrostatics.
//!
//! ## Accuracy
//!
//! ε₀ is given to 11 significant figures (CODATA 2018). The Coulomb constant is
//! derived from it rather than stored, so the two can never disagree.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>
//! - Mohr, P. J., Newell, D. B., Taylor, B. N., & Tiesinga, E. (2019). CODATA Recommended Values of the Fundamental Physical Constants: 2018.

use std::f64::consts::PI;

use crate::math::Scalar;

/// Vacuum permittivity ε₀ in farads per meter (F/m).
/// Approximate value: 8.8541878128 × 10⁻¹² F/m (11 significant figures).
pub const VACUUM_PERMITTIVITY: Scalar = 8.854_187_812_8e-12;

/// One nanocoulomb in coulombs.
pub const NANOCOULOMB: Scalar = 1.0e-9;

/// Coulomb constant k_e = 1 / (4π ε₀) in N·m²/C².
#[inline]
#[must_use]
pub fn coulomb_constant() -> Scalar {
    1.0 / (4.0 * PI * VACUUM_PERMITTIVITY)
}
