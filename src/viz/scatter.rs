//! Scatter charts: one marker per point, both axes auto-expanded.

use anyhow::Result;
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;

use super::legend::{LegendItem, Marker};
use super::range::{AUTO_EXPAND_RATIO, AxisRange};
use super::types::{ChartOptions, LegendMode};
use super::util::{
    choose_axis_scale, format_tick, map_locale, scaled_axis_title, series_color, tick_precision,
    value_label_area_px,
};
use super::{annotate, axis_x_start, build_chart, draw_err, finish, split_for_legend};
use crate::models::ScatterData;

const POINT_RADIUS: i32 = 4;
const TICKS: usize = 10;

/// Padded `(x, y)` ranges over every point of every series.
pub fn axis_ranges(data: &ScatterData) -> (AxisRange, AxisRange) {
    let fallback = AxisRange { min: 0.0, max: 0.0 };
    let x = AxisRange::scan(data.points().map(|p| p.x)).unwrap_or(fallback);
    let y = AxisRange::scan(data.points().map(|p| p.y)).unwrap_or(fallback);
    (x.expand(AUTO_EXPAND_RATIO), y.expand(AUTO_EXPAND_RATIO))
}

fn axis_scale(r: AxisRange) -> (f64, &'static str) {
    choose_axis_scale(r.min.abs().max(r.max.abs()))
}

pub(crate) fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    data: &ScatterData,
    options: &ChartOptions,
) -> Result<()> {
    let locale = map_locale(&options.locale);
    let (x_range, y_range) = axis_ranges(data);
    let (x_scale, x_word) = axis_scale(x_range);
    let (y_scale, y_word) = axis_scale(y_range);
    let (x, y) = (x_range.scaled(x_scale), y_range.scaled(y_scale));
    debug!("scatter axes x={:?} y={:?}", x_range, y_range);

    let x_title = scaled_axis_title(options.x_label.as_deref(), x_word);
    let y_title = scaled_axis_title(options.y_label.as_deref(), y_word);

    let mut left_px = value_label_area_px(y, TICKS, locale, 12);
    if y_title.is_some() {
        left_px += 20;
    }
    let bottom_px = if x_title.is_some() { 56 } else { 40 };

    let items: Vec<LegendItem> = data
        .series
        .iter()
        .enumerate()
        .map(|(idx, s)| LegendItem {
            label: s.name.clone(),
            color: series_color(idx),
            marker: Marker::Circle,
        })
        .collect();

    let (plot_area, legend_area) =
        split_for_legend(root, &items, options.legend, axis_x_start(left_px));
    let mut chart = build_chart(
        &plot_area,
        options.title.as_deref(),
        left_px,
        bottom_px,
        x.as_range(),
        y.as_range(),
    )?;

    let (x_prec, y_prec) = (tick_precision(x, TICKS), tick_precision(y, TICKS));
    let x_fmt = |v: &f64| format_tick(*v, x_prec, locale);
    let y_fmt = |v: &f64| format_tick(*v, y_prec, locale);
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_labels(TICKS)
            .y_labels(TICKS)
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .label_style((FontFamily::SansSerif, 12))
            .axis_desc_style((FontFamily::SansSerif, 16));
        if let Some(t) = x_title.as_deref() {
            mesh.x_desc(t);
        }
        if let Some(t) = y_title.as_deref() {
            mesh.y_desc(t);
        }
        mesh.draw().map_err(draw_err)?;
    }

    let label_style = TextStyle::from((FontFamily::SansSerif, 11));
    for (series, item) in data.series.iter().zip(&items) {
        let style = item.color.filled();
        let anno = if options.point_labels {
            chart.draw_series(series.points.iter().map(|p| {
                EmptyElement::at((p.x / x_scale, p.y / y_scale))
                    + Circle::new((0, 0), POINT_RADIUS, style)
                    + Text::new(p.label.clone(), (POINT_RADIUS + 2, -14), label_style.clone())
            }))
        } else {
            chart.draw_series(
                series
                    .points
                    .iter()
                    .map(|p| Circle::new((p.x / x_scale, p.y / y_scale), POINT_RADIUS, style)),
            )
        }
        .map_err(draw_err)?;
        if options.legend == LegendMode::Inside {
            annotate(anno, item);
        }
    }

    finish(
        &mut chart,
        &plot_area,
        legend_area.as_ref(),
        &items,
        options.legend,
        axis_x_start(left_px),
    )
}
