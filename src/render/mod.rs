//! Quiver-plot rendering of normalized fields via `plotters`.

mod colormap;
mod plot;
mod quiver;

pub use colormap::{viridis, LinearNorm};
pub use plot::{render_svg_string, render_to_file};
pub use quiver::{arrow, Arrow, PixelScale, QuiverStyle};

/// Presentation settings of the field plot.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    /// Image width in pixels, colour bar included.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Width reserved for the colour bar on the right.
    pub colorbar_width: u32,
    /// Chart caption.
    pub title: String,
    /// x axis description.
    pub x_label: String,
    /// y axis description.
    pub y_label: String,
    /// Colour bar description.
    pub colorbar_label: String,
    /// Draw mesh lines behind the arrows.
    pub show_grid: bool,
    /// Arrow sizing.
    pub quiver: QuiverStyle,
    /// Charge marker radius in pixels.
    pub marker_radius: i32,
    /// Charge marker outline width in pixels.
    pub marker_edge_width: u32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            colorbar_width: 130,
            title: "Electrostatic field of a system of fixed point charges".into(),
            x_label: "x".into(),
            y_label: "y".into(),
            colorbar_label: "Field magnitude (V/m)".into(),
            show_grid: true,
            quiver: QuiverStyle::default(),
            marker_radius: 8,
            marker_edge_width: 2,
        }
    }
}

/// Errors raised while drawing or writing a plot.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Raised when the output path has no supported image extension.
    #[error("unsupported output format {0:?}; expected .svg, or .png with the `ttf` feature")]
    UnsupportedFormat(String),
    /// Raised when no cell carries a drawable vector.
    #[error("field has no unmasked samples to draw")]
    EmptyField,
    /// Raised by the drawing backend.
    #[error("drawing backend error: {0}")]
    Backend(String),
}
