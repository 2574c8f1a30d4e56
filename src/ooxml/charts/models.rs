//! Chart data models.
//!
//! Charts embedded in generated slides carry their data inline (`c:strLit` / `c:numLit`)
//! instead of referencing an embedded workbook.

use crate::common::RGBColor;
use crate::ooxml::charts::types::{ChartKind, LegendPosition};

/// One data series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Series name shown in the legend
    pub name: String,
    /// One value per category
    pub values: Vec<f64>,
    /// Series fill or stroke color
    pub color: RGBColor,
}

impl ChartSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>, color: RGBColor) -> Self {
        Self {
            name: name.into(),
            values,
            color,
        }
    }
}

/// Which data label fields are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataLabels {
    pub show_value: bool,
    pub show_percent: bool,
}

impl DataLabels {
    #[inline]
    pub fn any(&self) -> bool {
        self.show_value || self.show_percent
    }
}

/// A complete chart ready to be written as a `c:chartSpace` part.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    /// Optional chart title; when absent the automatic title is suppressed
    pub title: Option<String>,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
    /// Per-point colors for pie and doughnut charts, cycled if shorter than the data
    pub point_colors: Vec<RGBColor>,
    pub legend: Option<LegendPosition>,
    pub data_labels: DataLabels,
    /// Color used for axis labels, legend text and titles
    pub text_color: RGBColor,
    pub gridline_color: Option<RGBColor>,
    /// Latin typeface for all chart text
    pub font: Option<String>,
    /// Font size in points for chart text
    pub font_size: f64,
    /// Doughnut hole size in percent (10-90)
    pub hole_size: u8,
}

impl Chart {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            title: None,
            categories: Vec::new(),
            series: Vec::new(),
            point_colors: Vec::new(),
            legend: Some(LegendPosition::Bottom),
            data_labels: DataLabels::default(),
            text_color: RGBColor::new(0x33, 0x33, 0x33),
            gridline_color: None,
            font: None,
            font_size: 12.0,
            hole_size: 50,
        }
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn add_series(mut self, series: ChartSeries) -> Self {
        self.series.push(series);
        self
    }

    /// Number of data points, taken from the longest series.
    pub fn point_count(&self) -> usize {
        self.series
            .iter()
            .map(|s| s.values.len())
            .max()
            .unwrap_or(0)
    }
}
