//! Bar charts: grouped, stacked and horizontal.
//!
//! Category `i` occupies the slot centred on `i` of a `-0.5..n-0.5` axis, so
//! integer tick positions line up with slot centres and can be labelled with
//! category names.

use anyhow::Result;
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;

use super::legend::{LegendItem, Marker};
use super::range::{AUTO_EXPAND_RATIO, AxisRange};
use super::types::{ChartKind, ChartOptions, LegendMode};
use super::util::{
    category_label_area_px, category_tick, choose_axis_scale, format_tick, map_locale,
    scaled_axis_title, series_color, tick_precision, value_label_area_px,
};
use super::{Chart, annotate, axis_x_start, build_chart, draw_err, finish, split_for_legend};
use crate::models::BarTable;

/// Fraction of a category slot covered by its bars.
const GROUP_WIDTH: f64 = 0.8;
const VALUE_TICKS: usize = 10;

fn legend_items(table: &BarTable) -> Vec<LegendItem> {
    table
        .sets
        .iter()
        .enumerate()
        .map(|(idx, set)| LegendItem {
            label: set.name.clone(),
            color: series_color(idx),
            marker: Marker::Square,
        })
        .collect()
}

/// Padded value-axis range for the kind: stacked bars look at stack totals.
pub fn value_range(table: &BarTable, kind: ChartKind) -> AxisRange {
    let scanned = if kind == ChartKind::StackedBar {
        AxisRange::scan(
            table
                .stack_totals()
                .into_iter()
                .flat_map(|(pos, neg)| [pos, neg]),
        )
    } else {
        AxisRange::scan(table.values())
    };
    scanned
        .unwrap_or(AxisRange { min: 0.0, max: 0.0 })
        .value_axis(AUTO_EXPAND_RATIO)
}

/// Category axis title: explicit label first, then the table's corner cell.
fn category_title(explicit: Option<&str>, table: &BarTable) -> Option<String> {
    explicit
        .map(str::to_string)
        .or_else(|| Some(table.corner.clone()).filter(|c| !c.is_empty()))
}

fn slot_range(n: usize) -> std::ops::Range<f64> {
    -0.5..(n as f64 - 0.5)
}

/// Rectangles `(category_index, low, high)` for one set, in data units.
fn stacked_segments(table: &BarTable) -> Vec<Vec<(usize, f64, f64)>> {
    let mut pos = vec![0.0; table.categories.len()];
    let mut neg = vec![0.0; table.categories.len()];
    table
        .sets
        .iter()
        .map(|set| {
            set.values
                .iter()
                .enumerate()
                .map(|(ci, v)| {
                    let base = if *v >= 0.0 { &mut pos[ci] } else { &mut neg[ci] };
                    let low = *base;
                    *base += v;
                    (ci, low.min(*base), low.max(*base))
                })
                .collect()
        })
        .collect()
}

pub(crate) fn draw_vertical<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    table: &BarTable,
    options: &ChartOptions,
) -> Result<()> {
    let locale = map_locale(&options.locale);
    let range = value_range(table, options.kind);
    let (scale, scale_word) = choose_axis_scale(range.min.abs().max(range.max.abs()));
    let y = range.scaled(scale);
    debug!("bar value axis {:?} (scale {})", range, scale);

    let x_title = category_title(options.x_label.as_deref(), table);
    let y_title = scaled_axis_title(options.y_label.as_deref(), scale_word);

    let mut left_px = value_label_area_px(y, VALUE_TICKS, locale, 12);
    if y_title.is_some() {
        left_px += 20;
    }
    let bottom_px = if x_title.is_some() { 56 } else { 40 };

    let items = legend_items(table);
    let (plot_area, legend_area) =
        split_for_legend(root, &items, options.legend, axis_x_start(left_px));
    let mut chart = build_chart(
        &plot_area,
        options.title.as_deref(),
        left_px,
        bottom_px,
        slot_range(table.categories.len()),
        y.as_range(),
    )?;

    let x_fmt = |v: &f64| category_tick(&table.categories, *v);
    let y_prec = tick_precision(y, VALUE_TICKS);
    let y_fmt = |v: &f64| format_tick(*v, y_prec, locale);
    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .x_labels(table.categories.len())
            .y_labels(VALUE_TICKS)
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

    let inside = options.legend == LegendMode::Inside;
    if options.kind == ChartKind::StackedBar {
        let half = GROUP_WIDTH / 2.0;
        for (segments, item) in stacked_segments(table).into_iter().zip(&items) {
            let color = item.color;
            let anno = chart
                .draw_series(segments.into_iter().map(|(ci, low, high)| {
                    let c = ci as f64;
                    Rectangle::new(
                        [(c - half, low / scale), (c + half, high / scale)],
                        color.filled(),
                    )
                }))
                .map_err(draw_err)?;
            if inside {
                annotate(anno, item);
            }
        }
    } else {
        let bar_w = GROUP_WIDTH / table.sets.len().max(1) as f64;
        for (idx, (set, item)) in table.sets.iter().zip(&items).enumerate() {
            let color = item.color;
            let anno = chart
                .draw_series(set.values.iter().enumerate().map(|(ci, v)| {
                    let x0 = ci as f64 - GROUP_WIDTH / 2.0 + idx as f64 * bar_w;
                    let v = v / scale;
                    Rectangle::new([(x0, v.min(0.0)), (x0 + bar_w, v.max(0.0))], color.filled())
                }))
                .map_err(draw_err)?;
            if inside {
                annotate(anno, item);
            }
        }
    }

    if y.min < 0.0 {
        draw_zero_line(&mut chart, true, slot_range(table.categories.len()))?;
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

pub(crate) fn draw_horizontal<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    table: &BarTable,
    options: &ChartOptions,
) -> Result<()> {
    let locale = map_locale(&options.locale);
    let range = value_range(table, ChartKind::HorizontalBar);
    let (scale, scale_word) = choose_axis_scale(range.min.abs().max(range.max.abs()));
    let x = range.scaled(scale);
    debug!("hbar value axis {:?} (scale {})", range, scale);

    // first category on top
    let n = table.categories.len();
    let top_down: Vec<String> = table.categories.iter().rev().cloned().collect();

    let x_title = scaled_axis_title(options.x_label.as_deref(), scale_word);
    let y_title = category_title(options.y_label.as_deref(), table);

    let mut left_px = category_label_area_px(&table.categories, 12);
    if y_title.is_some() {
        left_px += 20;
    }
    let bottom_px = if x_title.is_some() { 56 } else { 40 };

    let items = legend_items(table);
    let (plot_area, legend_area) =
        split_for_legend(root, &items, options.legend, axis_x_start(left_px));
    let mut chart = build_chart(
        &plot_area,
        options.title.as_deref(),
        left_px,
        bottom_px,
        x.as_range(),
        slot_range(n),
    )?;

    let x_prec = tick_precision(x, VALUE_TICKS);
    let x_fmt = |v: &f64| format_tick(*v, x_prec, locale);
    let y_fmt = |v: &f64| category_tick(&top_down, *v);
    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_y_mesh()
            .x_labels(VALUE_TICKS)
            .y_labels(n)
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

    let inside = options.legend == LegendMode::Inside;
    let bar_h = GROUP_WIDTH / table.sets.len().max(1) as f64;
    for (idx, (set, item)) in table.sets.iter().zip(&items).enumerate() {
        let color = item.color;
        let anno = chart
            .draw_series(set.values.iter().enumerate().map(|(ci, v)| {
                let center = (n - 1 - ci) as f64;
                let y1 = center + GROUP_WIDTH / 2.0 - idx as f64 * bar_h;
                let v = v / scale;
                Rectangle::new([(v.min(0.0), y1 - bar_h), (v.max(0.0), y1)], color.filled())
            }))
            .map_err(draw_err)?;
        if inside {
            annotate(anno, item);
        }
    }

    if x.min < 0.0 {
        draw_zero_line(&mut chart, false, slot_range(n))?;
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

/// Baseline at value zero across the category axis.
fn draw_zero_line<'a, DB: DrawingBackend + 'a>(
    chart: &mut Chart<'a, DB>,
    vertical_bars: bool,
    slots: std::ops::Range<f64>,
) -> Result<()> {
    let path = if vertical_bars {
        vec![(slots.start, 0.0), (slots.end, 0.0)]
    } else {
        vec![(0.0, slots.start), (0.0, slots.end)]
    };
    chart
        .draw_series(std::iter::once(PathElement::new(path, BLACK.stroke_width(1))))
        .map_err(draw_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BarSet;

    fn table() -> BarTable {
        BarTable {
            corner: "lib".into(),
            categories: vec!["a".into(), "b".into()],
            sets: vec![
                BarSet {
                    name: "s1".into(),
                    values: vec![4.0, -1.0],
                },
                BarSet {
                    name: "s2".into(),
                    values: vec![6.0, -3.0],
                },
            ],
        }
    }

    #[test]
    fn stacked_segments_accumulate_per_sign() {
        let segs = stacked_segments(&table());
        assert_eq!(segs[0], vec![(0, 0.0, 4.0), (1, -1.0, 0.0)]);
        assert_eq!(segs[1], vec![(0, 4.0, 10.0), (1, -4.0, -1.0)]);
    }

    #[test]
    fn stacked_range_uses_totals() {
        let r = value_range(&table(), ChartKind::StackedBar);
        // totals span -4..10, padding 0.7
        assert!((r.min - -4.7).abs() < 1e-9);
        assert!((r.max - 10.7).abs() < 1e-9);
        let g = value_range(&table(), ChartKind::Bar);
        // values span -3..6, padding 0.45
        assert!((g.max - 6.45).abs() < 1e-9);
    }

    #[test]
    fn category_title_falls_back_to_corner() {
        let t = table();
        assert_eq!(category_title(None, &t).as_deref(), Some("lib"));
        assert_eq!(category_title(Some("x"), &t).as_deref(), Some("x"));
        let blank = BarTable {
            corner: String::new(),
            ..t
        };
        assert_eq!(category_title(None, &blank), None);
    }
}
