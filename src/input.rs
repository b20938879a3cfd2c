//! Reading and parsing the chart CSV dialect.
//!
//! The dialect is deliberately simple: fields are split on commas, there is no
//! quoting or escaping, surrounding whitespace is trimmed and blank lines are
//! skipped. Two layouts exist:
//!
//! **Bar table** (`bar`, `stacked-bar`, `hbar`)
//! ```text
//! lib,encode,decode
//! utf8,1.5,2.0
//! utf16,2.1,2.4
//! ```
//!
//! **Scatter blocks** (`scatter`): a line without a comma starts a block; each
//! following `name,x,y` line adds one point to the series at that position.
//! ```text
//! english
//! utf8,1.0,12.5
//! utf16,2.0,10.1
//! japanese
//! utf8,2.9,20.3
//! utf16,2.0,11.7
//! ```

use crate::models::{BarSet, BarTable, ChartData, ScatterData, ScatterPoint, ScatterSeries};
use crate::viz::ChartKind;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("input is empty")]
    Empty,
    #[error("header line has no series columns")]
    NoSeries,
    #[error("no data rows")]
    NoRows,
    #[error("line {line}: expected at most {expected} values, found {found}")]
    TooManyValues {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("line {line}, column {column}: '{text}' is not a number")]
    BadNumber {
        line: u64,
        column: usize,
        text: String,
    },
    #[error("line {line}: expected name,x,y")]
    ShortPoint { line: u64 },
    #[error("block '{title}' (line {line}) has {found} points, expected {expected}")]
    BlockSize {
        title: String,
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Read the whole input document from a file, or from stdin for `None` / `-`.
pub fn read_input(source: Option<&Path>) -> Result<String, InputError> {
    match source {
        Some(path) if path != Path::new("-") => {
            let file = fs::File::open(path).map_err(|e| InputError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
            read_from(file, &path.display().to_string())
        }
        _ => read_from(io::stdin().lock(), "<stdin>"),
    }
}

/// Read a document from any reader; `name` is only used in error messages.
pub fn read_from<R: Read>(mut reader: R, name: &str) -> Result<String, InputError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| InputError::Io {
            path: name.to_string(),
            source: e,
        })?;
    if text.trim().is_empty() {
        return Err(InputError::Empty);
    }
    debug!("read {} bytes from {}", text.len(), name);
    Ok(text)
}

/// Parse `text` in the layout the chart kind expects.
pub fn parse(text: &str, kind: ChartKind) -> Result<ChartData, InputError> {
    if kind.is_bar() {
        parse_bar_table(text).map(ChartData::Bar)
    } else {
        parse_scatter(text).map(ChartData::Scatter)
    }
}

/// Non-blank records with their 1-based line numbers.
fn records(text: &str) -> Result<Vec<(u64, StringRecord)>, InputError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if rec.iter().all(str::is_empty) {
            continue;
        }
        let line = rec.position().map(|p| p.line()).unwrap_or(0);
        out.push((line, rec));
    }
    Ok(out)
}

fn number(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a bar table. Unparsable cells and missing trailing cells become `0.0`.
pub fn parse_bar_table(text: &str) -> Result<BarTable, InputError> {
    let mut rows = records(text)?.into_iter();
    let (_, header) = rows.next().ok_or(InputError::Empty)?;

    let corner = header.get(0).unwrap_or_default().to_string();
    let mut sets: Vec<BarSet> = header
        .iter()
        .skip(1)
        .map(|name| BarSet {
            name: name.to_string(),
            values: Vec::new(),
        })
        .collect();
    if sets.iter().all(|s| s.name.is_empty()) {
        return Err(InputError::NoSeries);
    }
    for (i, _) in sets.iter().enumerate().filter(|(_, s)| s.name.is_empty()) {
        warn!("header column {} has no series name", i + 2);
    }

    let mut categories = Vec::new();
    for (line, rec) in rows {
        let found = rec.len().saturating_sub(1);
        if found > sets.len() {
            return Err(InputError::TooManyValues {
                line,
                expected: sets.len(),
                found,
            });
        }
        if found < sets.len() {
            warn!(
                "line {}: {} of {} values present, padding with 0",
                line,
                found,
                sets.len()
            );
        }

        categories.push(rec.get(0).unwrap_or_default().to_string());
        for (i, set) in sets.iter_mut().enumerate() {
            let value = match rec.get(i + 1) {
                Some(cell) => number(cell).unwrap_or_else(|| {
                    warn!(
                        "line {}, column {}: '{}' is not a number, using 0",
                        line,
                        i + 2,
                        cell
                    );
                    0.0
                }),
                None => 0.0,
            };
            set.values.push(value);
        }
    }

    if categories.is_empty() {
        return Err(InputError::NoRows);
    }
    debug!(
        "bar table: {} categories x {} sets",
        categories.len(),
        sets.len()
    );
    Ok(BarTable {
        corner,
        categories,
        sets,
    })
}

struct Block {
    title: String,
    line: u64,
    points: Vec<(String, f64, f64)>,
}

fn coordinate(rec: &StringRecord, idx: usize, line: u64) -> Result<f64, InputError> {
    let cell = rec.get(idx).unwrap_or_default();
    number(cell).ok_or_else(|| InputError::BadNumber {
        line,
        column: idx + 1,
        text: cell.to_string(),
    })
}

/// Parse scatter blocks. The first block fixes the number and names of the series.
pub fn parse_scatter(text: &str) -> Result<ScatterData, InputError> {
    let mut blocks: Vec<Block> = Vec::new();
    for (line, rec) in records(text)? {
        match rec.len() {
            1 => blocks.push(Block {
                title: rec.get(0).unwrap_or_default().to_string(),
                line,
                points: Vec::new(),
            }),
            2 => return Err(InputError::ShortPoint { line }),
            _ => {
                let x = coordinate(&rec, 1, line)?;
                let y = coordinate(&rec, 2, line)?;
                if blocks.is_empty() {
                    blocks.push(Block {
                        title: String::new(),
                        line,
                        points: Vec::new(),
                    });
                }
                if let Some(block) = blocks.last_mut() {
                    block
                        .points
                        .push((rec.get(0).unwrap_or_default().to_string(), x, y));
                }
            }
        }
    }

    let Some(sized) = blocks.iter().find(|b| !b.points.is_empty()) else {
        return Err(InputError::NoRows);
    };
    let expected = sized.points.len();
    if let Some(empty) = blocks.first().filter(|b| b.points.is_empty()) {
        // a leading title with no points of its own
        return Err(InputError::BlockSize {
            title: empty.title.clone(),
            line: empty.line,
            expected,
            found: 0,
        });
    }

    let mut series: Vec<ScatterSeries> = blocks[0]
        .points
        .iter()
        .map(|(name, _, _)| ScatterSeries {
            name: name.clone(),
            points: Vec::with_capacity(blocks.len()),
        })
        .collect();

    for block in &blocks {
        if block.points.len() != expected {
            return Err(InputError::BlockSize {
                title: block.title.clone(),
                line: block.line,
                expected,
                found: block.points.len(),
            });
        }
        for (s, (name, x, y)) in series.iter_mut().zip(&block.points) {
            if *name != s.name {
                debug!(
                    "block '{}': point named '{}' assigned to series '{}'",
                    block.title, name, s.name
                );
            }
            s.points.push(ScatterPoint {
                x: *x,
                y: *y,
                label: block.title.clone(),
            });
        }
    }

    debug!(
        "scatter: {} series x {} blocks",
        series.len(),
        blocks.len()
    );
    Ok(ScatterData { series })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_lines_are_skipped() {
        let t = parse_bar_table("k,a\n   \nx,1\n").unwrap();
        assert_eq!(t.categories, vec!["x"]);
    }

    #[test]
    fn crlf_line_endings() {
        let t = parse_bar_table("k,a,b\r\nx,1,2\r\ny,3,4\r\n").unwrap();
        assert_eq!(t.sets[1].values, vec![2.0, 4.0]);
    }

    #[test]
    fn blank_series_names() {
        assert!(matches!(parse_bar_table("k,\nx,1\n"), Err(InputError::NoSeries)));
        assert!(matches!(parse_bar_table("k, , \nx,1,2\n"), Err(InputError::NoSeries)));
        let t = parse_bar_table("k,,b\nx,1,2\n").unwrap();
        assert_eq!(t.sets[0].name, "");
        assert_eq!(t.sets[1].values, vec![2.0]);
    }

    #[test]
    fn read_from_rejects_blank_document() {
        let err = read_from("  \n\n".as_bytes(), "mem").unwrap_err();
        assert!(matches!(err, InputError::Empty));
    }
}
