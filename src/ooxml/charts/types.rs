//! Chart enumerations.

use std::fmt;

/// Chart kinds the presentation writer can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Horizontal bars
    Bar,
    /// Vertical bars
    Column,
    /// Line chart
    Line,
    /// Pie chart
    Pie,
    /// Doughnut chart
    Doughnut,
    /// Scatter (XY) chart
    Scatter,
    /// Area chart
    Area,
}

impl ChartKind {
    /// Returns the XML element name for this chart kind.
    #[inline]
    pub const fn xml_element_name(&self) -> &'static str {
        match self {
            Self::Bar | Self::Column => "barChart",
            Self::Line => "lineChart",
            Self::Pie => "pieChart",
            Self::Doughnut => "doughnutChart",
            Self::Scatter => "scatterChart",
            Self::Area => "areaChart",
        }
    }

    /// Whether the chart is drawn against a pair of axes.
    #[inline]
    pub const fn has_axes(&self) -> bool {
        !self.is_radial()
    }

    /// Pie and doughnut charts color individual points rather than series.
    #[inline]
    pub const fn is_radial(&self) -> bool {
        matches!(self, Self::Pie | Self::Doughnut)
    }

    /// Whether series are stroked lines rather than filled areas.
    #[inline]
    pub const fn is_stroked(&self) -> bool {
        matches!(self, Self::Line | Self::Scatter)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xml_element_name())
    }
}

/// Legend position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPosition {
    #[default]
    Bottom,
    Top,
    Left,
    Right,
}

impl LegendPosition {
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Bottom => "b",
            Self::Top => "t",
            Self::Left => "l",
            Self::Right => "r",
        }
    }
}

/// Axis position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPosition {
    Bottom,
    Left,
}

impl AxisPosition {
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Bottom => "b",
            Self::Left => "l",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_properties() {
        assert_eq!(ChartKind::Column.xml_element_name(), "barChart");
        assert!(ChartKind::Doughnut.is_radial());
        assert!(!ChartKind::Pie.has_axes());
        assert!(ChartKind::Scatter.is_stroked());
        assert!(!ChartKind::Area.is_stroked());
    }
}
