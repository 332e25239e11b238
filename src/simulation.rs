//! High-level orchestration: sample, normalize and plot a charge configuration.

use std::path::Path;

use log::info;

use crate::constants::NANOCOULOMB;
use crate::errors::ChargeFieldError;
use crate::fields::{normalize, superpose, FieldError, FieldMap, NormalizedField, PointCharge, SingularityPolicy};
use crate::grid::{Grid, GridSpec};
use crate::render::{render_to_file, PlotStyle};

/// Inputs of one field computation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Human-readable identifier.
    pub name: String,
    /// Sampled domain.
    pub grid: GridSpec,
    /// Field sources.
    pub charges: Vec<PointCharge>,
    /// Treatment of cells on a charge or with a vanishing field.
    pub singularities: SingularityPolicy,
}

impl SimulationConfig {
    /// Creates a configuration that rejects singular cells.
    #[must_use]
    pub fn new(name: impl Into<String>, grid: GridSpec, charges: Vec<PointCharge>) -> Self {
        Self {
            name: name.into(),
            grid,
            charges,
            singularities: SingularityPolicy::Reject,
        }
    }

    /// Three fixed charges on a 50 × 50 grid over `[-10, 10]²`:
    /// +1 nC at (2, 3), −1 nC at (−2, −3) and +2 nC at the origin.
    #[must_use]
    pub fn three_charge_system() -> Self {
        Self::new(
            "three_charge_system",
            GridSpec::square(-10.0, 10.0, 50),
            vec![
                PointCharge::new(NANOCOULOMB, 2.0, 3.0),
                PointCharge::new(-NANOCOULOMB, -2.0, -3.0),
                PointCharge::new(2.0 * NANOCOULOMB, 0.0, 0.0),
            ],
        )
    }

    /// Replaces the singularity policy.
    #[must_use]
    pub fn with_singularities(mut self, policy: SingularityPolicy) -> Self {
        self.singularities = policy;
        self
    }

    /// Samples the grid, superposes all charges and normalizes the result.
    pub fn run(&self) -> Result<FieldSolution, FieldError> {
        let grid = self.grid.build()?;
        let (rows, cols) = grid.shape();
        info!(
            "{}: superposing {} charge(s) on a {rows}x{cols} grid",
            self.name,
            self.charges.len()
        );
        let field = superpose(&grid, &self.charges, self.singularities)?;
        let normalized = normalize(&field, self.singularities)?;
        Ok(FieldSolution { grid, field, normalized })
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::three_charge_system()
    }
}

/// Output of [`SimulationConfig::run`].
#[derive(Debug, Clone)]
pub struct FieldSolution {
    /// Sample points.
    pub grid: Grid,
    /// Superposed field.
    pub field: FieldMap,
    /// Unit directions and magnitudes.
    pub normalized: NormalizedField,
}

/// Runs `config` and writes its plot to `path`.
pub fn plot_to_file(config: &SimulationConfig, style: &PlotStyle, path: &Path) -> Result<FieldSolution, ChargeFieldError> {
    let solution = config.run()?;
    render_to_file(path, &solution.grid, &solution.normalized, &config.charges, style)?;
    Ok(solution)
}
