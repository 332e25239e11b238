use std::path::Path;

use log::{debug, info};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use super::colormap::{viridis, LinearNorm};
use super::quiver::{arrow, Arrow, PixelScale};
use super::{PlotStyle, RenderError};
use crate::fields::{NormalizedField, PointCharge};
use crate::grid::Grid;
use crate::math::Scalar;

const COLORBAR_STEPS: usize = 128;
// Fraction of each data range left blank on either side of the samples.
const AXIS_MARGIN: Scalar = 0.05;

/// Renders the plot into an in-memory SVG document.
pub fn render_svg_string(
    grid: &Grid,
    field: &NormalizedField,
    charges: &[PointCharge],
    style: &PlotStyle,
) -> Result<String, RenderError> {
    let norm = magnitude_norm(field)?;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (style.width, style.height)).into_drawing_area();
        draw(&root, grid, field, charges, norm, style).map_err(backend_error)?;
    }
    Ok(svg)
}

/// Renders the plot to `path`; the extension selects SVG or PNG output.
///
/// PNG output is only available with the `ttf` feature: the bitmap backend
/// cannot draw text without a font backend.
pub fn render_to_file(
    path: &Path,
    grid: &Grid,
    field: &NormalizedField,
    charges: &[PointCharge],
    style: &PlotStyle,
) -> Result<(), RenderError> {
    let norm = magnitude_norm(field)?;
    let size = (style.width, style.height);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "svg" => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw(&root, grid, field, charges, norm, style).map_err(backend_error)?;
        }
        #[cfg(feature = "ttf")]
        "png" => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw(&root, grid, field, charges, norm, style).map_err(backend_error)?;
        }
        _ => return Err(RenderError::UnsupportedFormat(path.display().to_string())),
    }

    info!("wrote field plot to {}", path.display());
    Ok(())
}

fn magnitude_norm(field: &NormalizedField) -> Result<LinearNorm, RenderError> {
    let (min, max) = field.magnitude_range().ok_or(RenderError::EmptyField)?;
    debug!("colour range {min:.3e} .. {max:.3e} V/m");
    Ok(LinearNorm::new(min, max))
}

fn backend_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Backend(err.to_string())
}

fn padded((lo, hi): (Scalar, Scalar)) -> (Scalar, Scalar) {
    let range = LinearNorm::new(lo, hi);
    let pad = (range.max - range.min) * AXIS_MARGIN;
    (range.min - pad, range.max + pad)
}

fn marker_color(charge: &PointCharge) -> RGBColor {
    if charge.is_positive() {
        RED
    } else {
        BLUE
    }
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    grid: &Grid,
    field: &NormalizedField,
    charges: &[PointCharge],
    norm: LinearNorm,
    style: &PlotStyle,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let split = style.width.saturating_sub(style.colorbar_width) as i32;
    let (plot_area, bar_area) = root.split_horizontally(split);

    let (x_lo, x_hi) = padded(grid.x_range());
    let (y_lo, y_hi) = padded(grid.y_range());
    let mut chart = ChartBuilder::on(&plot_area)
        .caption(&style.title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(style.x_label.as_str()).y_desc(style.y_label.as_str());
    if !style.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    let (width_px, height_px) = chart.plotting_area().dim_in_pixel();
    let scale = PixelScale::new(width_px, height_px, (x_lo, x_hi), (y_lo, y_hi));
    let arrows: Vec<(Arrow, RGBColor)> = grid
        .points()
        .filter_map(|(row, col, point)| {
            let (unit, magnitude) = field.at(row, col)?;
            let a = arrow(point, unit, &style.quiver, &scale)?;
            Some((a, viridis(norm.apply(magnitude))))
        })
        .collect();
    debug!("drawing {} arrows", arrows.len());

    let shaft = (style.quiver.shaft_px(scale.plot_width_px).round() as u32).max(1);
    chart.draw_series(
        arrows
            .iter()
            .map(|(a, color)| PathElement::new(vec![a.tail, a.shaft_end], color.stroke_width(shaft))),
    )?;
    chart.draw_series(
        arrows
            .iter()
            .map(|(a, color)| Polygon::new(a.head.to_vec(), color.filled())),
    )?;

    chart.draw_series(charges.iter().map(|c| {
        Circle::new((c.position.x, c.position.y), style.marker_radius, marker_color(c).filled())
    }))?;
    chart.draw_series(charges.iter().map(|c| {
        Circle::new(
            (c.position.x, c.position.y),
            style.marker_radius,
            BLACK.stroke_width(style.marker_edge_width),
        )
    }))?;

    let mut bar = ChartBuilder::on(&bar_area)
        .margin_top(60)
        .margin_bottom(60)
        .margin_left(10)
        .margin_right(10)
        .right_y_label_area_size(80)
        .build_cartesian_2d(0.0..1.0, norm.min..norm.max)?;
    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_label_formatter(&|v| format!("{v:.1e}"))
        .y_desc(style.colorbar_label.as_str())
        .draw()?;

    let span = norm.max - norm.min;
    let steps = COLORBAR_STEPS as Scalar;
    bar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let lo = norm.min + span * i as Scalar / steps;
        let hi = norm.min + span * (i + 1) as Scalar / steps;
        Rectangle::new([(0.0, lo), (1.0, hi)], viridis((i as Scalar + 0.5) / steps).filled())
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{normalize, superpose, SingularityPolicy};
    use crate::grid::GridSpec;

    fn small_scene() -> (Grid, NormalizedField, Vec<PointCharge>) {
        let grid = GridSpec::square(-2.0, 2.0, 6).build().expect("valid grid");
        let charges = vec![PointCharge::new(1.0e-9, 0.5, 0.5), PointCharge::new(-1.0e-9, -0.5, -0.5)];
        let field = superpose(&grid, &charges, SingularityPolicy::Reject).expect("no singular cells");
        let unit = normalize(&field, SingularityPolicy::Reject).expect("no vanishing cells");
        (grid, unit, charges)
    }

    #[test]
    fn svg_contains_caption_and_markers() {
        let (grid, field, charges) = small_scene();
        let style = PlotStyle::default();
        let svg = render_svg_string(&grid, &field, &charges, &style).expect("svg renders");
        assert!(svg.contains("<svg"));
        assert!(svg.contains(&style.title));
        assert!(svg.contains("<polygon"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let (grid, field, charges) = small_scene();
        let err = render_to_file(Path::new("field.bmp.txt"), &grid, &field, &charges, &PlotStyle::default())
            .expect_err("txt is not an image format");
        assert!(matches!(err, RenderError::UnsupportedFormat(_)));
    }

    #[test]
    fn fully_masked_field_is_rejected() {
        let grid = GridSpec::square(-1.0, 1.0, 1).build().expect("valid grid");
        let charges = [PointCharge::new(1.0e-9, -1.0, -1.0)];
        let field = superpose(&grid, &charges, SingularityPolicy::Mask).expect("masking never fails");
        let unit = normalize(&field, SingularityPolicy::Mask).expect("masking never fails");
        let err = render_svg_string(&grid, &unit, &charges, &PlotStyle::default()).expect_err("nothing to draw");
        assert!(matches!(err, RenderError::EmptyField));
    }
}
