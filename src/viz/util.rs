//! Utility functions for visualization: colors, scaling, locale-aware tick labels.

use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use super::range::AxisRange;
use super::text::TextMetrics;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange,
/// Dark Gray, Brownish Gold.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // #4472C4
    RGBColor(237, 125, 49),  // #ED7D31
    RGBColor(165, 165, 165), // #A5A5A5
    RGBColor(255, 192, 0),   // #FFC000
    RGBColor(91, 155, 213),  // #5B9BD5
    RGBColor(112, 173, 71),  // #70AD47
    RGBColor(38, 68, 120),   // #264478
    RGBColor(158, 72, 14),   // #9E480E
    RGBColor(99, 99, 99),    // #636363
    RGBColor(153, 115, 0),   // #997300
];

#[inline]
pub fn series_color(idx: usize) -> RGBAColor {
    OFFICE10[idx % OFFICE10.len()].to_rgba()
}

/// Pick a single value-axis scale and its human label based on the overall magnitude.
/// Returns (scale, label), e.g. (1e6, "millions").
pub fn choose_axis_scale(max_abs: f64) -> (f64, &'static str) {
    if max_abs >= 1.0e12 {
        (1.0e12, "trillions")
    } else if max_abs >= 1.0e9 {
        (1.0e9, "billions")
    } else if max_abs >= 1.0e6 {
        (1.0e6, "millions")
    } else if max_abs >= 1.0e3 {
        (1.0e3, "thousands")
    } else {
        (1.0, "")
    }
}

/// Axis title after scaling, e.g. `Time (ms) (thousands)` or `Value (millions)`.
pub fn scaled_axis_title(base: Option<&str>, scale_word: &str) -> Option<String> {
    match (base, scale_word) {
        (Some(b), "") => Some(b.to_string()),
        (Some(b), w) => Some(format!("{b} ({w})")),
        (None, "") => None,
        (None, w) => Some(format!("Value ({w})")),
    }
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().replace('-', "_").as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Decimals needed to tell apart ticks spread over `range` with at most
/// `ticks` labels. Capped at 10.
pub fn tick_precision(range: AxisRange, ticks: usize) -> usize {
    let step = range.span() / ticks.max(1) as f64;
    if !step.is_finite() || step <= 0.0 {
        return 2;
    }
    (-step.log10() - 1e-9).ceil().clamp(0.0, 10.0) as usize
}

/// Tick label with `prec` decimals; grouping and decimal separator follow
/// `locale`.
pub fn format_tick(v: f64, prec: usize, locale: &Locale) -> String {
    let digits = format!("{:.*}", prec, v.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };
    let grouped = match int_part.parse::<u64>() {
        Ok(n) => n.to_formatted_string(locale),
        Err(_) => int_part.to_string(),
    };

    let mut out = String::new();
    let is_zero = digits.chars().all(|c| c == '0' || c == '.');
    if v < 0.0 && !is_zero {
        out.push_str(locale.minus_sign());
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push_str(locale.decimal());
        out.push_str(f);
    }
    out
}

/// Width of the label area next to a value axis, measured from the tick labels
/// that will actually be drawn. Clamped to avoid silly extremes.
pub fn value_label_area_px(range: AxisRange, ticks: usize, locale: &Locale, font_px: u32) -> u32 {
    let metrics = TextMetrics::new(font_px);
    let prec = tick_precision(range, ticks);
    let max_px = (0..=ticks)
        .map(|i| {
            let t = if ticks == 0 { 0.0 } else { i as f64 / ticks as f64 };
            metrics.width(&format_tick(range.min + range.span() * t, prec, locale))
        })
        .max()
        .unwrap_or(0);
    max_px.saturating_add(18).clamp(48, 140)
}

/// Width of the label area holding category names (horizontal bars).
pub fn category_label_area_px(categories: &[String], font_px: u32) -> u32 {
    let metrics = TextMetrics::new(font_px);
    let max_px = categories.iter().map(|c| metrics.width(c)).max().unwrap_or(0);
    max_px.saturating_add(18).clamp(48, 220)
}

/// Label for a category-axis tick: the category whose slot centre is at `v`.
pub fn category_tick(categories: &[String], v: f64) -> String {
    let idx = v.round();
    if (v - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    categories.get(idx as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_grouping_and_sign() {
        let en_locale = map_locale("en");
        assert_eq!(format_tick(1234.4, 0, en_locale), "1,234");
        assert_eq!(format_tick(12.34, 1, en_locale), "12.3");
        assert_eq!(format_tick(-2.0, 2, en_locale), "-2.00");
        assert_eq!(format_tick(-0.0001, 2, en_locale), "0.00");
    }

    #[test]
    fn precision_follows_tick_step() {
        let r = |min, max| AxisRange { min, max };
        assert_eq!(tick_precision(r(0.0, 5000.0), 10), 0);
        assert_eq!(tick_precision(r(0.0, 10.0), 10), 0);
        assert_eq!(tick_precision(r(0.0, 5.0), 10), 1);
        assert_eq!(tick_precision(r(0.0, 0.00415), 10), 4);
        assert_eq!(tick_precision(r(3.0, 3.0), 10), 2);

        let en_locale = map_locale("en");
        let prec = tick_precision(r(0.0, 0.00415), 10);
        let labels: Vec<String> = [0.0, 0.0005, 0.001, 0.0015]
            .iter()
            .map(|v| format_tick(*v, prec, en_locale))
            .collect();
        assert_eq!(labels, vec!["0.0000", "0.0005", "0.0010", "0.0015"]);
    }

    #[test]
    fn german_separators() {
        let de_locale = map_locale("de_DE");
        assert_eq!(format_tick(1234567.0, 0, de_locale), "1.234.567");
        assert_eq!(format_tick(2.5, 2, de_locale), "2,50");
    }

    #[test]
    fn axis_scale_words() {
        assert_eq!(choose_axis_scale(5.0e6), (1.0e6, "millions"));
        assert_eq!(choose_axis_scale(999.0), (1.0, ""));
        assert_eq!(
            scaled_axis_title(Some("Bytes"), "thousands").as_deref(),
            Some("Bytes (thousands)")
        );
        assert_eq!(scaled_axis_title(None, ""), None);
    }

    #[test]
    fn category_ticks_only_at_slot_centres() {
        let cats = vec!["a".to_string(), "b".to_string()];
        assert_eq!(category_tick(&cats, 1.0), "b");
        assert_eq!(category_tick(&cats, 0.5), "");
        assert_eq!(category_tick(&cats, 2.0), "");
        assert_eq!(category_tick(&cats, -1.0), "");
    }
}
