//! Shared error types used across submodules.

use thiserror::Error;

use crate::fields::FieldError;
use crate::render::RenderError;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum ChargeFieldError {
    /// Wraps field sampling and normalization errors.
    #[error(transparent)]
    Field(#[from] FieldError),
    /// Wraps plotting errors.
    #[error(transparent)]
    Render(#[from] RenderError),
}
