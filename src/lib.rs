//! wcchart
//!
//! Turn small CSV files into charts: grouped, stacked or horizontal bar
//! charts and scatter charts, shown in a window or exported as PNG/SVG.
//! Pairs with the `wcchart` CLI.
//!
//! ### Features
//! - Parse a minimal comma-split CSV dialect (bar tables and scatter blocks)
//! - Filter series and categories by name
//! - Auto-expand axis ranges by 5% of the data span
//! - Render SVG/PNG/JPEG/BMP files, in-memory SVG or RGB buffers
//! - Interactive window with resize and "Save as…"
//!
//! ### Example
//! ```no_run
//! use wcchart::{ChartKind, ChartOptions, input, viz};
//!
//! let text = "lib,encode,decode\nutf8,1.5,2.0\nutf16,2.1,2.4\n";
//! let data = input::parse(text, ChartKind::Bar)?;
//! let options = ChartOptions {
//!     title: Some("Throughput".into()),
//!     ..ChartOptions::default()
//! };
//! viz::render_to_file(&data, &options, "throughput.svg")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod filter;
pub mod input;
pub mod models;
pub mod viewer;
pub mod viz;

pub use models::{BarSet, BarTable, ChartData, ScatterData, ScatterPoint, ScatterSeries};
pub use viz::{ChartKind, ChartOptions, LegendMode};
