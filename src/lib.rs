#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Fundamental physical constants used throughout the library.
pub mod constants;
/// Shared numerical aliases and helpers.
pub mod math;
/// Sample grids over the plotted domain.
pub mod grid;
/// Point charges, field superposition and normalization.
pub mod fields;
/// Quiver-plot rendering.
pub mod render;
/// Configuration and orchestration of a field computation.
pub mod simulation;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
