//! Public types and constants for the visualization module.

/// Legend placement options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendMode {
    /// Separate, non-overlapping legend panel on the right side.
    Right,
    /// Separate, non-overlapping legend band at the top.
    Top,
    /// Separate, non-overlapping legend band at the bottom.
    Bottom,
    /// Overlay legend inside the plotting area (may overlap data).
    Inside,
    /// No legend.
    Hidden,
}

/// Right-aligned legend, as the chart window has always shown it.
pub const DEFAULT_LEGEND_MODE: LegendMode = LegendMode::Right;

/// Chart types supported by this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Grouped vertical bars, one bar per set in each category.
    Bar,
    /// Vertical bars stacked per category (negatives stack downward).
    StackedBar,
    /// Grouped bars along the vertical category axis.
    HorizontalBar,
    /// Markers at (x, y) per series.
    Scatter,
}

impl ChartKind {
    /// Whether this kind reads the bar-table CSV layout.
    pub fn is_bar(self) -> bool {
        !matches!(self, ChartKind::Scatter)
    }
}

/// Everything that controls how a chart is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub kind: ChartKind,
    /// Caption; nothing is drawn when `None`.
    pub title: Option<String>,
    /// Horizontal axis title.
    pub x_label: Option<String>,
    /// Vertical axis title.
    ///
    /// Whichever axis carries the categories of a bar chart falls back to the
    /// table's corner label when its title is unset.
    pub y_label: Option<String>,
    pub legend: LegendMode,
    /// Locale tag for tick labels, e.g. `en` or `de`.
    pub locale: String,
    pub width: u32,
    pub height: u32,
    /// Annotate scatter points with the title of their block.
    pub point_labels: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            kind: ChartKind::Bar,
            title: None,
            x_label: None,
            y_label: None,
            legend: DEFAULT_LEGEND_MODE,
            locale: "en".to_string(),
            width: 1024,
            height: 768,
            point_labels: false,
        }
    }
}

/// Image formats accepted by [`super::render_to_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
    Jpeg,
    Bmp,
}

impl ImageFormat {
    /// Infer the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "svg" => Some(ImageFormat::Svg),
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "bmp" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }
}
