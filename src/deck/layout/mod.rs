//! Slide layout engine.
//!
//! One algorithm per slide type, each a deterministic recipe on a fixed
//! canvas. [`layout_slide`] dispatches on the closed [`SlideKind`] union and
//! returns a [`LayoutError`] for anything it cannot draw; the assembler turns
//! those into the error layout from [`error_slide`].

mod chart;
mod content;
mod error;
mod process;
mod simple;
mod table;
mod timeline;
mod title;
mod two_column;

pub use error::error_slide;

use crate::deck::pattern::{self, PatternId};
use crate::deck::primitive::{
    Background, Bounds, Canvas, Paint, ShapeKind, ShapePrimitive, Slide, TextPrimitive, TextStyle,
};
use crate::deck::spec::{SlideKind, SlideSpec};
use crate::deck::theme::{ResolvedTheme, style};
use thiserror::Error;

/// A recoverable, per-slide layout failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("unsupported chart type `{0}`")]
    UnsupportedChartType(String),

    #[error("chart has no categories or no series")]
    MissingChartData,

    #[error("series `{series}` has {found} values for {expected} categories")]
    SeriesLengthMismatch {
        series: String,
        expected: usize,
        found: usize,
    },

    #[error("series `{series}` contains a missing or non-numeric value")]
    NonFiniteValue { series: String },

    #[error("table has no columns")]
    EmptyTable,

    #[error("process has no steps")]
    EmptySteps,

    #[error("invalid geometry: {0}")]
    Geometry(String),

    #[error("writer rejected slide: {0}")]
    Writer(String),
}

/// Everything a layout algorithm may read: the theme, the canvas and the slide position.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext<'a> {
    pub theme: &'a ResolvedTheme,
    pub canvas: Canvas,
    pub index: usize,
}

/// Vertical position of the title text.
const TITLE_TOP: f64 = 0.3;
const TITLE_HEIGHT: f64 = 0.7;
/// First usable y below the title block.
const CONTENT_TOP: f64 = 1.35;

impl<'a> LayoutContext<'a> {
    pub fn new(theme: &'a ResolvedTheme, canvas: Canvas, index: usize) -> Self {
        Self {
            theme,
            canvas,
            index,
        }
    }

    /// Side margin, at most a quarter of the canvas width. Total for any canvas.
    pub fn margin(&self) -> f64 {
        // f64::max drops a NaN operand, so the upper bound never falls below 0.1
        let upper = (self.canvas.width / 4.0).max(0.1);
        let margin = self.theme.spacing.margin;
        if margin.is_finite() { margin.clamp(0.1, upper) } else { 0.1 }
    }

    pub fn gap(&self) -> f64 {
        let gap = self.theme.spacing.gap;
        if gap.is_finite() { gap.clamp(0.05, 1.0) } else { 0.05 }
    }

    /// Full width between the side margins.
    pub fn content_width(&self) -> f64 {
        self.canvas.width - 2.0 * self.margin()
    }

    pub fn heading_style(&self, size: f64) -> TextStyle {
        TextStyle::new(&self.theme.fonts.heading, size, self.theme.colors.text).bold()
    }

    pub fn body_style(&self, size: f64) -> TextStyle {
        TextStyle::new(&self.theme.fonts.body, size, self.theme.colors.text)
    }

    pub fn muted_style(&self, size: f64) -> TextStyle {
        TextStyle::new(&self.theme.fonts.body, size, self.theme.colors.text_light)
    }

    pub fn text(&self, bounds: Bounds, text: impl Into<String>, style: TextStyle) -> TextPrimitive {
        TextPrimitive {
            bounds,
            paragraphs: vec![text.into()],
            style,
        }
    }

    /// Fill for cards and panels: the background nudged toward the primary colour.
    pub fn panel_fill(&self) -> Paint {
        let c = &self.theme.colors;
        Paint::solid(c.background.mix(&c.primary, 0.06))
    }

    /// A themed card: rounded per the corner level, shadowed when enabled.
    pub fn panel(&self, bounds: Bounds) -> ShapePrimitive {
        ShapePrimitive::new(ShapeKind::Rect, bounds)
            .filled(self.panel_fill())
            .rounded(self.theme.corner_adjustment())
            .shadowed(style::card_shadow(self.theme.design.shadows))
    }

    /// Empty slide with the theme background and the pattern layer.
    ///
    /// A per-slide override always applies; otherwise the theme pattern is
    /// drawn only when `with_theme_pattern` is set.
    pub fn base_slide(&self, pattern_override: Option<&str>, with_theme_pattern: bool) -> Slide {
        let mut slide = Slide::new(Background::Solid(self.theme.colors.background));
        let pattern = match pattern_override {
            Some(id) => PatternId::parse(id),
            None if with_theme_pattern => self.theme.design.background_pattern,
            None => PatternId::Solid,
        };
        slide.decorations = pattern::render(pattern, self.canvas, self.theme.colors.primary);
        slide
    }

    /// Title text plus underline rule; returns the first y available to content.
    pub fn title_block(&self, slide: &mut Slide, title: &str) -> f64 {
        let margin = self.margin();
        slide.push(self.text(
            Bounds::new(margin, TITLE_TOP, self.content_width(), TITLE_HEIGHT),
            title,
            self.heading_style(28.0),
        ));
        slide.push(
            ShapePrimitive::new(
                ShapeKind::Rect,
                Bounds::new(margin, TITLE_TOP + TITLE_HEIGHT + 0.05, 1.2, 0.05),
            )
            .filled(Paint::solid(self.theme.colors.primary)),
        );
        CONTENT_TOP
    }

    /// Height left below `top`, keeping a bottom margin.
    pub fn remaining_height(&self, top: f64) -> f64 {
        (self.canvas.height - top - self.margin() * 0.6).max(0.5)
    }
}

/// Lay out one slide.
pub fn layout_slide(
    spec: &SlideSpec,
    index: usize,
    theme: &ResolvedTheme,
    canvas: Canvas,
) -> Result<Slide, LayoutError> {
    if !canvas.is_usable() {
        return Err(LayoutError::Geometry(format!(
            "canvas {}x{} in is too small",
            canvas.width, canvas.height
        )));
    }

    let ctx = LayoutContext::new(theme, canvas, index);
    let slide = match &spec.kind {
        SlideKind::Title { subtitle } => title::layout(&ctx, spec, subtitle.as_deref()),
        SlideKind::Content { items } => content::layout(&ctx, spec, items),
        SlideKind::TwoColumn { left, right } => two_column::layout(&ctx, spec, left, right),
        SlideKind::Chart {
            chart_type,
            data,
            show_legend,
            show_values,
        } => chart::layout(&ctx, spec, chart_type, data, *show_legend, *show_values)?,
        SlideKind::Table {
            headers,
            rows,
            emphasis,
        } => table::layout(&ctx, spec, headers, rows, emphasis)?,
        SlideKind::Comparison {
            left,
            right,
            verdict,
        } => two_column::comparison(&ctx, spec, left, right, verdict.as_deref()),
        SlideKind::Process { steps } => process::layout(&ctx, spec, steps)?,
        SlideKind::Timeline { events } => timeline::layout(&ctx, spec, events),
        SlideKind::Conclusion {
            message,
            points,
            call_to_action,
        } => simple::conclusion(
            &ctx,
            spec,
            message.as_deref(),
            points,
            call_to_action.as_deref(),
        ),
        SlideKind::Quote { quote, attribution } => {
            simple::quote(&ctx, spec, quote, attribution.as_deref())
        },
        SlideKind::Image {
            caption,
            description,
        } => simple::image(&ctx, spec, caption.as_deref(), description.as_deref()),
        SlideKind::Basic { content } | SlideKind::Unknown { content, .. } => {
            simple::basic(&ctx, spec, content)
        },
    };

    if let Some(bad) = slide.iter().find(|p| !p.bounds().is_finite()) {
        return Err(LayoutError::Geometry(format!(
            "non-finite bounds {:?}",
            bad.bounds()
        )));
    }
    Ok(slide)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::primitive::VisualPrimitive;
    use crate::deck::spec::{ChartData, Column, Dataset, ProcessStep, TimelineEvent};

    fn slide(kind: SlideKind) -> SlideSpec {
        SlideSpec {
            title: "Heading".to_string(),
            background_pattern: None,
            kind,
        }
    }

    fn every_kind() -> Vec<SlideKind> {
        vec![
            SlideKind::Title {
                subtitle: Some("Sub".to_string()),
            },
            SlideKind::Content {
                items: vec!["a".into(), "b".into()],
            },
            SlideKind::TwoColumn {
                left: Column::default(),
                right: Column {
                    heading: "R".into(),
                    points: vec!["x".into()],
                },
            },
            SlideKind::Chart {
                chart_type: "line".into(),
                data: ChartData {
                    labels: vec!["a".into()],
                    datasets: vec![Dataset {
                        label: "s".into(),
                        data: vec![Some(1.0)],
                        color: None,
                    }],
                },
                show_legend: true,
                show_values: false,
            },
            SlideKind::Table {
                headers: vec!["h".into()],
                rows: vec![vec!["1".into()]],
                emphasis: vec![],
            },
            SlideKind::Comparison {
                left: Column::default(),
                right: Column::default(),
                verdict: Some("v".into()),
            },
            SlideKind::Process {
                steps: vec![ProcessStep {
                    title: "s".into(),
                    description: String::new(),
                }],
            },
            SlideKind::Timeline {
                events: vec![TimelineEvent {
                    date: "2024".into(),
                    title: "t".into(),
                    description: String::new(),
                }],
            },
            SlideKind::Conclusion {
                message: Some("m".into()),
                points: vec!["p".into()],
                call_to_action: Some("go".into()),
            },
            SlideKind::Quote {
                quote: "q".into(),
                attribution: Some("a".into()),
            },
            SlideKind::Image {
                caption: Some("c".into()),
                description: None,
            },
            SlideKind::Basic {
                content: vec!["b".into()],
            },
        ]
    }

    #[test]
    fn test_every_kind_lays_out_inside_the_canvas() {
        let theme = ResolvedTheme::default();
        let canvas = Canvas::default();
        for kind in every_kind() {
            let tag = kind.tag().to_string();
            let laid = layout_slide(&slide(kind), 0, &theme, canvas).unwrap();
            assert!(laid.primitive_count() > 0, "{tag} produced nothing");
            for p in &laid.primitives {
                let b = p.bounds();
                assert!(b.x >= -0.01 && b.y >= -0.01, "{tag}: {b:?}");
                assert!(b.right() <= canvas.width + 0.01, "{tag}: {b:?}");
                assert!(b.bottom() <= canvas.height + 0.01, "{tag}: {b:?}");
            }
        }
    }

    #[test]
    fn test_unknown_matches_basic() {
        let theme = ResolvedTheme::default();
        let basic = layout_slide(
            &slide(SlideKind::Basic {
                content: vec!["x".into()],
            }),
            0,
            &theme,
            Canvas::default(),
        )
        .unwrap();
        let unknown = layout_slide(
            &slide(SlideKind::Unknown {
                original_type: "hologram".into(),
                content: vec!["x".into()],
            }),
            0,
            &theme,
            Canvas::default(),
        )
        .unwrap();
        assert_eq!(basic, unknown);
    }

    #[test]
    fn test_tiny_canvas_is_a_geometry_error() {
        let theme = ResolvedTheme::default();
        let err = layout_slide(
            &slide(SlideKind::Basic { content: vec![] }),
            0,
            &theme,
            Canvas {
                width: 1.0,
                height: f64::NAN,
            },
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::Geometry(_)));
    }

    #[test]
    fn test_margin_is_total_for_degenerate_canvases() {
        let theme = ResolvedTheme::default();
        for width in [0.2, 0.0, -3.0, f64::NAN, f64::INFINITY] {
            let ctx = LayoutContext::new(&theme, Canvas { width, height: 5.0 }, 0);
            let margin = ctx.margin();
            assert!((0.1..=theme.spacing.margin.max(0.1)).contains(&margin), "{width}: {margin}");
            assert!(ctx.gap() >= 0.05);
        }
    }

    #[test]
    fn test_pattern_override_applies_to_any_slide() {
        let theme = ResolvedTheme::default();
        let mut spec = slide(SlideKind::Content { items: vec![] });
        spec.background_pattern = Some("dots".into());
        let laid = layout_slide(&spec, 0, &theme, Canvas::default()).unwrap();
        assert!(!laid.decorations.is_empty());

        spec.background_pattern = Some("no-such-pattern".into());
        let laid = layout_slide(&spec, 0, &theme, Canvas::default()).unwrap();
        assert!(laid.decorations.is_empty());
        assert!(laid.primitives.iter().all(|p| !matches!(p, VisualPrimitive::Chart(_))));
    }
}
