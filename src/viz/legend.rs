//! Legend layout and drawing for the external panels (right column, top/bottom band).
//!
//! The band layout is computed once by [`layout_band`] and shared by the
//! height estimate and the drawing pass, so the reserved space always matches
//! what gets drawn.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::draw_err;
use super::text::TextMetrics;
use super::types::LegendMode;

const FONT_PX: u32 = 14;
const PAD: i32 = 8;
const ROW_GAP: i32 = 4;
const MARKER_R: i32 = 5;
/// Marker centre to text start.
const MARKER_TO_TEXT: i32 = 14;
const TRAILING_GAP: i32 = 16;

/// Glyph drawn next to a legend label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Square,
    Circle,
}

#[derive(Debug, Clone)]
pub struct LegendItem {
    pub label: String,
    pub color: RGBAColor,
    pub marker: Marker,
}

/// A positioned legend entry: text column start and wrapped lines.
struct Placed {
    text_x: i32,
    lines: Vec<String>,
}

fn metrics() -> TextMetrics {
    TextMetrics::new(FONT_PX)
}

fn row_height(row: &[(usize, Placed)]) -> i32 {
    let line_h = metrics().line_height();
    row.iter()
        .map(|(_, p)| p.lines.len().max(1) as i32 * line_h)
        .max()
        .unwrap_or(line_h)
}

/// Greedy flow of items into rows starting at `start_x` (aligned with the
/// plot's x axis). Each entry keeps its item index.
fn layout_band(items: &[LegendItem], start_x: i32, total_w: i32) -> Vec<Vec<(usize, Placed)>> {
    let m = metrics();
    let right = total_w - PAD;
    let text_cap = (((right - start_x) as f32) * 0.4).max(120.0) as u32;

    let mut rows = Vec::new();
    let mut cur: Vec<(usize, Placed)> = Vec::new();
    let mut x = start_x;
    for (idx, item) in items.iter().enumerate() {
        let lines = m.wrap(&item.label, text_cap);
        let text_w = lines.iter().map(|l| m.width(l)).max().unwrap_or(0) as i32;
        let block_w = MARKER_TO_TEXT + text_w + TRAILING_GAP;
        if x + block_w > right && !cur.is_empty() {
            rows.push(std::mem::take(&mut cur));
            x = start_x;
        }
        cur.push((
            idx,
            Placed {
                text_x: x + MARKER_TO_TEXT,
                lines,
            },
        ));
        x += block_w;
    }
    if !cur.is_empty() {
        rows.push(cur);
    }
    rows
}

/// Height the top/bottom band needs for `items`, in pixels.
pub fn band_height_px(items: &[LegendItem], start_x: i32, total_w: i32) -> i32 {
    let rows = layout_band(items, start_x, total_w);
    let body: i32 = rows.iter().map(|r| row_height(r)).sum();
    let gaps = ROW_GAP * (rows.len().saturating_sub(1) as i32);
    PAD * 2 + body + gaps
}

/// Width of the right-hand legend column: fits the longest label, but never
/// more than 35% of the canvas.
pub fn right_panel_width_px(items: &[LegendItem], total_w: i32) -> i32 {
    let m = metrics();
    let longest = items
        .iter()
        .map(|i| m.width(&i.label) as i32)
        .max()
        .unwrap_or(0);
    let wanted = PAD + MARKER_R + MARKER_TO_TEXT + longest + PAD * 2;
    wanted.clamp(80, (total_w * 35 / 100).max(80))
}

fn draw_marker<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    item: &LegendItem,
    center: (i32, i32),
) -> Result<()> {
    let (x, y) = center;
    match item.marker {
        Marker::Square => area
            .draw(&Rectangle::new(
                [(x - MARKER_R, y - MARKER_R), (x + MARKER_R, y + MARKER_R)],
                item.color.filled(),
            ))
            .map_err(draw_err),
        Marker::Circle => area
            .draw(&Circle::new((x, y), MARKER_R, item.color.filled()))
            .map_err(draw_err),
    }
}

fn draw_lines<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    lines: &[String],
    text_x: i32,
    top: i32,
) -> Result<()> {
    let line_h = metrics().line_height();
    let style =
        TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));
    for (i, line) in lines.iter().enumerate() {
        let y = top + i as i32 * line_h + line_h / 2;
        area.draw(&Text::new(line.as_str(), (text_x, y), style.clone()))
            .map_err(draw_err)?;
    }
    Ok(())
}

/// Draw the legend into its own area (Right: single column; Top/Bottom: flowing rows).
pub fn draw_legend_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    items: &[LegendItem],
    placement: LegendMode,
    axis_x_start_px: i32,
) -> Result<()> {
    area.fill(&WHITE).map_err(draw_err)?;
    let (w, _) = area.dim_in_pixel();
    let w = w as i32;
    let m = metrics();
    let line_h = m.line_height();

    match placement {
        LegendMode::Right => {
            let marker_x = PAD + MARKER_R;
            let text_x = marker_x + MARKER_TO_TEXT;
            let cap = (w - text_x - PAD).max(40) as u32;
            // first entry lines up with the top of the plot, below the margin
            let mut y = PAD * 3;
            for item in items {
                let lines = m.wrap(&item.label, cap);
                let block_h = lines.len().max(1) as i32 * line_h;
                draw_marker(area, item, (marker_x, y + line_h / 2))?;
                draw_lines(area, &lines, text_x, y)?;
                y += block_h + ROW_GAP;
            }
        }
        LegendMode::Top | LegendMode::Bottom => {
            let mut y = PAD;
            for row in layout_band(items, axis_x_start_px, w) {
                let row_h = row_height(&row);
                for (idx, placed) in &row {
                    let block_h = placed.lines.len().max(1) as i32 * line_h;
                    let top = y + (row_h - block_h) / 2;
                    let center = (placed.text_x - MARKER_TO_TEXT, y + row_h / 2);
                    draw_marker(area, &items[*idx], center)?;
                    draw_lines(area, &placed.lines, placed.text_x, top)?;
                }
                y += row_h + ROW_GAP;
            }
        }
        LegendMode::Inside | LegendMode::Hidden => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(labels: &[&str]) -> Vec<LegendItem> {
        labels
            .iter()
            .map(|l| LegendItem {
                label: l.to_string(),
                color: BLACK.to_rgba(),
                marker: Marker::Square,
            })
            .collect()
    }

    #[test]
    fn short_labels_share_one_row() {
        let its = items(&["utf8", "utf16", "utf32"]);
        let rows = layout_band(&its, 60, 1000);
        assert_eq!(rows.len(), 1);
        assert_eq!(band_height_px(&its, 60, 1000), PAD * 2 + metrics().line_height());
    }

    #[test]
    fn many_labels_wrap_into_more_rows() {
        let labels: Vec<String> = (0..12).map(|i| format!("series number {i}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let its = items(&refs);
        let rows = layout_band(&its, 60, 400);
        assert!(rows.len() > 1);
        let flat: Vec<usize> = rows.iter().flatten().map(|(i, _)| *i).collect();
        assert_eq!(flat, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn right_panel_is_bounded() {
        let its = items(&["a label that is far too long to fit in a narrow legend column"]);
        assert_eq!(right_panel_width_px(&its, 1000), 350);
        assert_eq!(right_panel_width_px(&items(&["x"]), 1000), 80);
    }
}
