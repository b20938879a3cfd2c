use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use wcchart::{ChartKind, ChartOptions, LegendMode};
use wcchart::{filter, input, viewer, viz};

#[derive(Parser, Debug)]
#[command(
    name = "wcchart",
    version,
    about = "Render bar and scatter charts from CSV, in a window or as an image"
)]
struct Cli {
    /// Source .csv file to use when generating the chart (stdin if omitted or "-").
    source: Option<PathBuf>,
    /// Chart type to generate.
    #[arg(short = 't', long = "type", value_enum)]
    chart_type: ChartType,
    /// Write the chart to this image file (.png, .svg, .jpg, .bmp) instead of opening a window.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Chart title.
    #[arg(long)]
    title: Option<String>,
    /// Horizontal axis title (category axis of bar/stacked-bar, default: first header cell).
    #[arg(long)]
    x_label: Option<String>,
    /// Vertical axis title (category axis of hbar, default: first header cell).
    #[arg(long)]
    y_label: Option<String>,
    /// Width of the chart in pixels.
    #[arg(long, default_value_t = 1024)]
    width: u32,
    /// Height of the chart in pixels.
    #[arg(long, default_value_t = 768)]
    height: u32,
    /// Legend placement.
    #[arg(long, value_enum, default_value_t = LegendArg::Right)]
    legend: LegendArg,
    /// Locale for tick labels (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Only draw these series, separated by comma or semicolon.
    #[arg(long)]
    series: Option<String>,
    /// Only draw these categories (bar charts), separated by comma or semicolon.
    #[arg(long)]
    categories: Option<String>,
    /// Label scatter points with the title of their block.
    #[arg(long, default_value_t = false)]
    point_labels: bool,
    /// Print the parsed (and filtered) data as JSON and exit.
    #[arg(long, default_value_t = false)]
    dump_json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ChartType {
    Bar,
    StackedBar,
    Hbar,
    Scatter,
}

impl From<ChartType> for ChartKind {
    fn from(t: ChartType) -> Self {
        match t {
            ChartType::Bar => ChartKind::Bar,
            ChartType::StackedBar => ChartKind::StackedBar,
            ChartType::Hbar => ChartKind::HorizontalBar,
            ChartType::Scatter => ChartKind::Scatter,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LegendArg {
    Right,
    Top,
    Bottom,
    Inside,
    Hidden,
}

impl From<LegendArg> for LegendMode {
    fn from(l: LegendArg) -> Self {
        match l {
            LegendArg::Right => LegendMode::Right,
            LegendArg::Top => LegendMode::Top,
            LegendArg::Bottom => LegendMode::Bottom,
            LegendArg::Inside => LegendMode::Inside,
            LegendArg::Hidden => LegendMode::Hidden,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let kind = ChartKind::from(cli.chart_type);
    let text = input::read_input(cli.source.as_deref())?;
    let mut data = input::parse(&text, kind).with_context(|| {
        let name = cli
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<stdin>".into());
        format!("invalid {:?} input in {}", kind, name)
    })?;

    let series = cli.series.as_deref().map(filter::parse_list).unwrap_or_default();
    let categories = cli
        .categories
        .as_deref()
        .map(filter::parse_list)
        .unwrap_or_default();
    filter::apply(&mut data, &series, &categories)?;

    if cli.dump_json {
        let mut out = io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &data)?;
        writeln!(out)?;
        return Ok(());
    }

    let options = ChartOptions {
        kind,
        title: cli.title,
        x_label: cli.x_label,
        y_label: cli.y_label,
        legend: cli.legend.into(),
        locale: cli.locale,
        width: cli.width,
        height: cli.height,
        point_labels: cli.point_labels,
    };

    match cli.output {
        Some(path) => {
            viz::render_to_file(&data, &options, &path)?;
            eprintln!("Wrote chart to {}", path.display());
        }
        None => viewer::show(data, options)?,
    }
    Ok(())
}
