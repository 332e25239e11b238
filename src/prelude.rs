//! Convenience re-exports for computing and plotting charge fields.

pub use crate::constants::*;
pub use crate::errors::ChargeFieldError;
pub use crate::fields::{
    electric_field_at, normalize, superpose, FieldError, FieldMap, NormalizedField, PointCharge,
    SingularityPolicy,
};
pub use crate::grid::{Grid, GridSpec};
pub use crate::math::{linspace, Scalar, R2};
pub use crate::render::{render_svg_string, render_to_file, PlotStyle, QuiverStyle, RenderError};
pub use crate::simulation::{plot_to_file, FieldSolution, SimulationConfig};
