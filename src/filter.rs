//! Series and category selection applied after parsing.

use crate::models::{BarTable, ChartData};
use log::warn;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("no {what} left after filtering (requested: {requested})")]
    NothingLeft { what: &'static str, requested: String },
    #[error("category filter only applies to bar charts")]
    NotBarData,
}

/// Split a user list on commas or semicolons, trimming and dropping empties.
pub fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn warn_unmatched<'a>(
    wanted: &[String],
    present: impl Iterator<Item = &'a str> + Clone,
    what: &str,
) {
    for name in wanted {
        if !present.clone().any(|p| p == name.as_str()) {
            warn!("{} '{}' not found in input", what, name);
        }
    }
}

/// Keep only the named series (bar sets or scatter series), in input order.
/// An empty `names` keeps everything.
pub fn retain_series(data: &mut ChartData, names: &[String]) -> Result<(), FilterError> {
    if names.is_empty() {
        return Ok(());
    }
    warn_unmatched(names, data.series_names().into_iter(), "series");
    let keep = |n: &str| names.iter().any(|w| w == n);
    let left = match data {
        ChartData::Bar(t) => {
            t.sets.retain(|s| keep(&s.name));
            t.sets.len()
        }
        ChartData::Scatter(d) => {
            d.series.retain(|s| keep(&s.name));
            d.series.len()
        }
    };
    if left == 0 {
        return Err(FilterError::NothingLeft {
            what: "series",
            requested: names.join(","),
        });
    }
    Ok(())
}

/// Keep only the named categories of a bar table, in input order.
pub fn retain_categories(table: &mut BarTable, names: &[String]) -> Result<(), FilterError> {
    if names.is_empty() {
        return Ok(());
    }
    warn_unmatched(names, table.categories.iter().map(String::as_str), "category");
    let mask: Vec<bool> = table
        .categories
        .iter()
        .map(|c| names.iter().any(|w| w == c))
        .collect();
    if !mask.contains(&true) {
        return Err(FilterError::NothingLeft {
            what: "categories",
            requested: names.join(","),
        });
    }

    let pick = |v: &[String]| -> Vec<String> {
        v.iter()
            .zip(&mask)
            .filter(|(_, k)| **k)
            .map(|(c, _)| c.clone())
            .collect()
    };
    table.categories = pick(&table.categories);
    for set in &mut table.sets {
        set.values = set
            .values
            .iter()
            .zip(&mask)
            .filter(|(_, k)| **k)
            .map(|(v, _)| *v)
            .collect();
    }
    Ok(())
}

/// Apply both filters; categories only make sense for bar data.
pub fn apply(
    data: &mut ChartData,
    series: &[String],
    categories: &[String],
) -> Result<(), FilterError> {
    retain_series(data, series)?;
    if categories.is_empty() {
        return Ok(());
    }
    match data {
        ChartData::Bar(t) => retain_categories(t, categories),
        ChartData::Scatter(_) => Err(FilterError::NotBarData),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_parsing_accepts_both_separators() {
        assert_eq!(parse_list("a, b;c ,,"), vec!["a", "b", "c"]);
        assert!(parse_list("").is_empty());
    }
}
