//! Plot configuration shared across visualization functions

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels
/// - `series_colors`: Optional colors, one per series (exact, direct, Sloan)
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `show_caption`: Whether to draw the title
/// - `show_grid`: Whether to draw the mesh and axis labels
/// - `show_legend`: Whether to draw the series legend
///
/// # Example
///
/// ```rust,ignore
/// use fredholm_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::sweep("Averaging, N = 15");
/// config.series_colors = Some(vec![BLACK, RED, BLUE]);
/// config.width = 1920;
/// config.height = 1080;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: "s")
    pub xlabel: String,

    /// Y-axis label (default: "u(s)")
    pub ylabel: String,

    /// Optional colors, one per series
    ///
    /// If None, uses default palette: [BLACK, RED, BLUE, GREEN, ...]
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show the title above the chart (default: true)
    pub show_caption: bool,

    /// Show grid lines (default: true)
    pub show_grid: bool,

    /// Show legend (default: true)
    pub show_legend: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: "s".to_string(),
            ylabel: "u(s)".to_string(),
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_caption: true,
            show_grid: true,
            show_legend: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
///
/// # Example
///
/// ```rust,ignore
/// let config = PlotConfig::sweep(NO_TITLE);
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Config for solution curves (exact, direct, Sloan) with optional custom title
    ///
    /// Title defaults to "Approximate Solution".
    pub fn sweep(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Approximate Solution".to_string());
        config
    }

    /// Config for pointwise error curves with optional custom title
    ///
    /// Sets ylabel to "|error|" and title to custom value or "Pointwise Error".
    pub fn errors(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.ylabel = "|error|".to_string();
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Pointwise Error".to_string());
        config
    }

    /// Config with custom series colors
    pub fn with_colors(colors: Vec<RGBColor>) -> Self {
        let mut config = Self::default();
        config.series_colors = Some(colors);
        config
    }

    /// Builder pattern: no caption, mesh or legend
    ///
    /// Only the curves are drawn.
    pub fn curves_only(mut self) -> Self {
        self.show_caption = false;
        self.show_grid = false;
        self.show_legend = false;
        self
    }

    /// Get color for series at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub(crate) fn get_series_color(&self, series_index: usize) -> RGBColor {
        if let Some(ref colors) = self.series_colors {
            if series_index < colors.len() {
                return colors[series_index];
            }
        }

        const DEFAULT_COLORS: [RGBColor; 6] = [
            BLACK,
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            RGBColor(255, 165, 0), // Orange
        ];

        DEFAULT_COLORS[series_index % DEFAULT_COLORS.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
