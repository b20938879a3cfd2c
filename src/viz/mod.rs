//! Visualization: render parsed chart data to **SVG**, **PNG**/**JPEG**/**BMP**
//! files or to an in-memory RGB buffer.
//!
//! - Chart kinds: `Bar`, `StackedBar`, `HorizontalBar`, `Scatter`
//! - Axis ranges padded by [`AUTO_EXPAND_RATIO`] of the data span
//! - Distinct series colors (Microsoft Office palette)
//! - Locale-aware tick labels (`30,000` vs `30.000`), large magnitudes scaled
//! - Legend placement: `Right` (default), `Top`, `Bottom`, `Inside`, `Hidden`

pub mod bar;
pub mod legend;
pub mod range;
pub mod scatter;
pub mod text;
pub mod types;
pub mod util;

pub use range::{AUTO_EXPAND_RATIO, AxisRange};
pub use types::{ChartKind, ChartOptions, DEFAULT_LEGEND_MODE, ImageFormat, LegendMode};

use crate::models::ChartData;
use anyhow::{Result, anyhow, bail};
use log::debug;

use plotters::chart::SeriesAnno;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::fmt::Debug;
use std::ops::Range;
use std::path::Path;
use std::sync::Once;

use legend::{LegendItem, Marker, band_height_px, draw_legend_panel, right_panel_width_px};

/// Outer margin around the plotting area, in pixels.
const MARGIN: i32 = 16;
/// Smallest canvas accepted in either dimension.
const MIN_SIDE_PX: u32 = 100;

/// Chart context over two `f64` axes, as used by every chart kind.
pub(crate) type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Plotters errors carry backend-specific types; flatten them into `anyhow`.
pub(crate) fn draw_err<E: Debug>(e: E) -> anyhow::Error {
    anyhow!("{:?}", e)
}

fn check_request(data: &ChartData, options: &ChartOptions, width: u32, height: u32) -> Result<()> {
    if width < MIN_SIDE_PX || height < MIN_SIDE_PX {
        bail!("chart size {width}x{height} is too small (minimum {MIN_SIDE_PX}x{MIN_SIDE_PX})");
    }
    match (data, options.kind) {
        (ChartData::Bar(_), k) if k.is_bar() => Ok(()),
        (ChartData::Scatter(_), ChartKind::Scatter) => Ok(()),
        (_, k) => bail!("chart kind {:?} cannot draw this data", k),
    }
}

/// Render to an image file; the format follows the file extension.
pub fn render_to_file<P: AsRef<Path>>(
    data: &ChartData,
    options: &ChartOptions,
    out_path: P,
) -> Result<()> {
    let out_path = out_path.as_ref();
    let format = out_path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ImageFormat::from_extension)
        .ok_or_else(|| {
            anyhow!(
                "unsupported image format for {} (use .png, .svg, .jpg or .bmp)",
                out_path.display()
            )
        })?;
    check_request(data, options, options.width, options.height)?;
    ensure_fonts_registered();

    let size = (options.width, options.height);
    match format {
        ImageFormat::Svg => {
            let root = SVGBackend::new(out_path, size).into_drawing_area();
            draw_chart(root, data, options)?
        }
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp => {
            let root = BitMapBackend::new(out_path, size).into_drawing_area();
            draw_chart(root, data, options)?
        }
    }
    debug!("wrote {:?} chart to {}", format, out_path.display());
    Ok(())
}

/// Render into a packed RGB buffer of `width * height * 3` bytes.
pub fn render_to_rgb(
    data: &ChartData,
    options: &ChartOptions,
    width: u32,
    height: u32,
) -> Result<Vec<u8>> {
    check_request(data, options, width, height)?;
    ensure_fonts_registered();

    let mut buf = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        draw_chart(root, data, options)?;
    }
    Ok(buf)
}

/// Render to an SVG document held in memory.
pub fn render_to_svg_string(data: &ChartData, options: &ChartOptions) -> Result<String> {
    check_request(data, options, options.width, options.height)?;
    ensure_fonts_registered();

    let mut out = String::new();
    {
        let root = SVGBackend::with_string(&mut out, (options.width, options.height))
            .into_drawing_area();
        draw_chart(root, data, options)?;
    }
    Ok(out)
}

fn draw_chart<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    data: &ChartData,
    options: &ChartOptions,
) -> Result<()> {
    root.fill(&WHITE).map_err(draw_err)?;
    match (data, options.kind) {
        (ChartData::Bar(table), ChartKind::HorizontalBar) => {
            bar::draw_horizontal(root, table, options)
        }
        (ChartData::Bar(table), _) => bar::draw_vertical(root, table, options),
        (ChartData::Scatter(scatter), _) => scatter::draw(root, scatter, options),
    }
}

/// Carve the external legend panel (if any) off the canvas.
pub(crate) fn split_for_legend<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    items: &[LegendItem],
    mode: LegendMode,
    axis_x_start_px: i32,
) -> (DrawingArea<DB, Shift>, Option<DrawingArea<DB, Shift>>) {
    let (w, h) = root.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    match mode {
        LegendMode::Right => {
            let panel = right_panel_width_px(items, w);
            let (plot, legend) = root.split_horizontally(w - panel);
            (plot, Some(legend))
        }
        LegendMode::Top => {
            let band = band_height_px(items, axis_x_start_px, w).max(40);
            let (legend, plot) = root.split_vertically(band);
            (plot, Some(legend))
        }
        LegendMode::Bottom => {
            let band = band_height_px(items, axis_x_start_px, w).max(40);
            // keep at least 40px for the plot
            let (plot, legend) = root.split_vertically((h - band).max(40));
            (plot, Some(legend))
        }
        LegendMode::Inside | LegendMode::Hidden => (root, None),
    }
}

/// Build the cartesian chart shared by all kinds.
pub(crate) fn build_chart<'a, DB: DrawingBackend + 'a>(
    area: &'a DrawingArea<DB, Shift>,
    title: Option<&str>,
    left_px: u32,
    bottom_px: u32,
    x: Range<f64>,
    y: Range<f64>,
) -> Result<Chart<'a, DB>> {
    let mut builder = ChartBuilder::on(area);
    builder
        .margin(MARGIN as u32)
        .set_label_area_size(LabelAreaPosition::Left, left_px)
        .set_label_area_size(LabelAreaPosition::Bottom, bottom_px);
    if let Some(t) = title.map(str::trim).filter(|t| !t.is_empty()) {
        builder.caption(t, (FontFamily::SansSerif, 24));
    }
    builder.build_cartesian_2d(x, y).map_err(draw_err)
}

/// Attach a plotters series label and glyph (used by the inside legend).
pub(crate) fn annotate<'a, DB: DrawingBackend + 'a>(
    anno: &mut SeriesAnno<'a, DB>,
    item: &LegendItem,
) {
    let color = item.color;
    anno.label(item.label.clone());
    match item.marker {
        Marker::Square => {
            anno.legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
        }
        Marker::Circle => {
            anno.legend(move |(x, y)| Circle::new((x + 5, y), 5, color.filled()));
        }
    }
}

/// Draw the legend in the requested mode and flush the canvas.
pub(crate) fn finish<'a, DB: DrawingBackend + 'a>(
    chart: &mut Chart<'a, DB>,
    plot_area: &DrawingArea<DB, Shift>,
    legend_area: Option<&DrawingArea<DB, Shift>>,
    items: &[LegendItem],
    mode: LegendMode,
    axis_x_start_px: i32,
) -> Result<()> {
    match (mode, legend_area) {
        (LegendMode::Inside, _) => {
            chart
                .configure_series_labels()
                .border_style(BLACK)
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.85))
                .label_font((FontFamily::SansSerif, 14))
                .draw()
                .map_err(draw_err)?;
        }
        (_, Some(area)) => draw_legend_panel(area, items, mode, axis_x_start_px)?,
        _ => {}
    }
    plot_area.present().map_err(draw_err)?;
    Ok(())
}

/// Left gutter plus margin: where the plot's x axis starts on the canvas.
pub(crate) fn axis_x_start(left_px: u32) -> i32 {
    MARGIN + left_px as i32
}
