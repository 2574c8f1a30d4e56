//! The declarative deck specification, as normalized by the validator.
//!
//! These types are always fully populated: the validator fills every gap
//! before layout runs. They round-trip through serde (camelCase) so a
//! normalized spec can be dumped and fed back in.

use crate::common::RGBColor;
use serde::{Deserialize, Serialize};

/// A whole deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationSpec {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_type: Option<String>,
    pub slides: Vec<SlideSpec>,
    #[serde(default)]
    pub theme: ThemeSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animations: Option<AnimationSpec>,
}

/// One slide: shared fields plus the type-tagged payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideSpec {
    pub title: String,
    /// Background pattern override for this slide only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_pattern: Option<String>,
    #[serde(flatten)]
    pub kind: SlideKind,
}

/// Closed set of slide types, keyed by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SlideKind {
    Title {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
    },
    Content {
        items: Vec<String>,
    },
    TwoColumn {
        left: Column,
        right: Column,
    },
    Chart {
        #[serde(rename = "chartType")]
        chart_type: String,
        data: ChartData,
        #[serde(default = "default_true", rename = "showLegend")]
        show_legend: bool,
        #[serde(default, rename = "showValues")]
        show_values: bool,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        /// Zero-based data row indices to highlight
        #[serde(default)]
        emphasis: Vec<usize>,
    },
    Comparison {
        left: Column,
        right: Column,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        verdict: Option<String>,
    },
    Process {
        steps: Vec<ProcessStep>,
    },
    Timeline {
        events: Vec<TimelineEvent>,
    },
    Conclusion {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        points: Vec<String>,
        #[serde(default, rename = "callToAction", skip_serializing_if = "Option::is_none")]
        call_to_action: Option<String>,
    },
    Quote {
        quote: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attribution: Option<String>,
    },
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Basic {
        content: Vec<String>,
    },
    /// Unrecognized `type`; laid out like `basic`
    Unknown {
        #[serde(rename = "originalType")]
        original_type: String,
        content: Vec<String>,
    },
}

fn default_true() -> bool {
    true
}

impl SlideKind {
    /// The `type` tag as written in a specification.
    pub fn tag(&self) -> &str {
        match self {
            SlideKind::Title { .. } => "title",
            SlideKind::Content { .. } => "content",
            SlideKind::TwoColumn { .. } => "two-column",
            SlideKind::Chart { .. } => "chart",
            SlideKind::Table { .. } => "table",
            SlideKind::Comparison { .. } => "comparison",
            SlideKind::Process { .. } => "process",
            SlideKind::Timeline { .. } => "timeline",
            SlideKind::Conclusion { .. } => "conclusion",
            SlideKind::Quote { .. } => "quote",
            SlideKind::Image { .. } => "image",
            SlideKind::Basic { .. } => "basic",
            SlideKind::Unknown { original_type, .. } => original_type,
        }
    }
}

/// A heading plus a list of points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Column {
    pub heading: String,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    /// `None` marks an entry that was not a number
    pub data: Vec<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<RGBColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Caller-supplied theme; every field is an optional override.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default)]
    pub colors: ColorOverrides,
    #[serde(default)]
    pub fonts: FontOverrides,
    #[serde(default)]
    pub design: DesignOverrides,
    #[serde(default)]
    pub spacing: SpacingOverrides,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorOverrides {
    pub primary: Option<RGBColor>,
    pub secondary: Option<RGBColor>,
    pub accent: Option<RGBColor>,
    pub background: Option<RGBColor>,
    pub text: Option<RGBColor>,
    pub text_light: Option<RGBColor>,
    pub success: Option<RGBColor>,
    pub warning: Option<RGBColor>,
    pub error: Option<RGBColor>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FontOverrides {
    pub heading: Option<String>,
    pub body: Option<String>,
    pub accent: Option<String>,
}

/// Corner rounding level for panels and cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CornerRadius {
    None,
    Low,
    #[default]
    Medium,
    High,
}

impl CornerRadius {
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "none" | "square" | "sharp" => Some(CornerRadius::None),
            "low" | "small" | "subtle" => Some(CornerRadius::Low),
            "medium" | "md" => Some(CornerRadius::Medium),
            "high" | "large" | "round" | "rounded" => Some(CornerRadius::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignOverrides {
    pub background_pattern: Option<String>,
    pub corner_radius: Option<CornerRadius>,
    pub shadows: Option<bool>,
}

/// Spacing hints in inches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpacingOverrides {
    pub margin: Option<f64>,
    pub gap: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationSpec {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}
