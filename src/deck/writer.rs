//! The document-writer contract and its PPTX implementation.
//!
//! The compiler only ever talks to a [`DocumentWriter`]: create slides, place
//! text, shapes, charts and tables, set a background, serialize. Anything that
//! implements the trait can stand in for [`PptxWriter`].

use crate::common::RGBColor;
use crate::common::unit::{degrees_to_angle, inch_to_emu, pt_to_emu_f64};
use crate::deck::blob::RawDocument;
use crate::deck::primitive::{
    Background, Bounds, Canvas, ChartKind, ChartPrimitive, Dash, HAlign, Paint, ShadowStyle,
    ShapeKind, ShapePrimitive, Stop, Stroke, TablePrimitive, TextPrimitive, TextStyle, VAlign,
    VisualPrimitive,
};
use crate::deck::theme::ResolvedTheme;
use crate::ooxml::OoxmlError;
use crate::ooxml::charts::{self, Chart, ChartSeries, DataLabels, LegendPosition};
use crate::ooxml::pptx::{
    ColorScheme, ColorValue, DashStyle, Fill, Frame, Geometry, GradientStop, MutablePresentation,
    MutableSlide, Outline, Paragraph, Shadow, SlideBackground, SlideTransition, TableCell,
    TableModel, TextAlign, TextAnchor, TextBody, TextFormat, ThemeDefinition, TransitionDirection,
    TransitionSpeed, TransitionType, ZoomDirection,
};
use chrono::{DateTime, Utc};
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("no slide has been added yet")]
    NoSlide,

    #[error("invalid primitive: {0}")]
    InvalidPrimitive(String),

    #[error(transparent)]
    Ooxml(#[from] OoxmlError),

    #[error("serialization task failed: {0}")]
    Task(String),
}

/// Top-level document properties.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMetadata {
    pub title: String,
    pub author: String,
    pub subject: Option<String>,
    pub created: DateTime<Utc>,
}

/// Slide transition applied when animations are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionStyle {
    #[default]
    Fade,
    Push,
    Wipe,
    Zoom,
    Cover,
    Dissolve,
}

impl TransitionStyle {
    /// Unknown or missing styles fall back to [`TransitionStyle::Fade`].
    pub fn from_token(token: Option<&str>) -> Self {
        match token.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("push" | "slide") => TransitionStyle::Push,
            Some("wipe") => TransitionStyle::Wipe,
            Some("zoom") => TransitionStyle::Zoom,
            Some("cover") => TransitionStyle::Cover,
            Some("dissolve") => TransitionStyle::Dissolve,
            _ => TransitionStyle::Fade,
        }
    }
}

/// The primitive surface a document backend must provide.
///
/// Drawing calls apply to the most recently added slide.
pub trait DocumentWriter: Send {
    fn set_metadata(&mut self, metadata: &DocumentMetadata);

    /// Offer the resolved theme to backends with a native theme concept.
    fn set_theme(&mut self, _theme: &ResolvedTheme) {}

    fn add_slide(&mut self) -> Result<(), WriteError>;

    fn set_background(&mut self, background: &Background) -> Result<(), WriteError>;

    fn add_text(&mut self, text: &TextPrimitive) -> Result<(), WriteError>;

    fn add_shape(&mut self, shape: &ShapePrimitive) -> Result<(), WriteError>;

    fn add_chart(&mut self, chart: &ChartPrimitive) -> Result<(), WriteError>;

    fn add_table(&mut self, table: &TablePrimitive) -> Result<(), WriteError>;

    fn set_transition(&mut self, style: TransitionStyle) -> Result<(), WriteError>;

    /// Drop everything drawn on the current slide, keeping the slide itself.
    fn reset_slide(&mut self) -> Result<(), WriteError>;

    fn serialize(self) -> impl Future<Output = Result<RawDocument, WriteError>> + Send
    where
        Self: Sized;

    fn add_primitive(&mut self, primitive: &VisualPrimitive) -> Result<(), WriteError> {
        match primitive {
            VisualPrimitive::Text(text) => self.add_text(text),
            VisualPrimitive::Shape(shape) => self.add_shape(shape),
            VisualPrimitive::Chart(chart) => self.add_chart(chart),
            VisualPrimitive::Table(table) => self.add_table(table),
        }
    }
}

/// [`DocumentWriter`] backed by the crate's own PPTX package writer.
#[derive(Debug)]
pub struct PptxWriter {
    pres: MutablePresentation,
    current: Option<usize>,
}

impl PptxWriter {
    pub fn new(canvas: Canvas) -> Self {
        let mut pres = MutablePresentation::new();
        pres.set_slide_size(inch_to_emu(canvas.width), inch_to_emu(canvas.height));
        Self {
            pres,
            current: None,
        }
    }

    pub fn presentation(&self) -> &MutablePresentation {
        &self.pres
    }

    fn slide(&mut self) -> Result<&mut MutableSlide, WriteError> {
        let index = self.current.ok_or(WriteError::NoSlide)?;
        Ok(self.pres.slide_mut(index)?)
    }
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new(Canvas::default())
    }
}

impl DocumentWriter for PptxWriter {
    fn set_metadata(&mut self, metadata: &DocumentMetadata) {
        let props = self.pres.properties_mut();
        props.title = Some(metadata.title.clone());
        props.creator = Some(metadata.author.clone());
        props.subject = metadata.subject.clone();
        props.created = metadata.created;
    }

    fn set_theme(&mut self, theme: &ResolvedTheme) {
        self.pres.set_theme(theme_definition(theme));
    }

    fn add_slide(&mut self) -> Result<(), WriteError> {
        self.pres.add_slide();
        self.current = Some(self.pres.slide_count() - 1);
        Ok(())
    }

    fn set_background(&mut self, background: &Background) -> Result<(), WriteError> {
        let background = match background {
            Background::Solid(color) => SlideBackground::solid(*color),
            Background::LinearGradient { angle, stops } => SlideBackground::Gradient {
                angle: *angle,
                stops: gradient_stops(stops),
            },
        };
        self.slide()?.set_background(background);
        Ok(())
    }

    fn add_text(&mut self, text: &TextPrimitive) -> Result<(), WriteError> {
        let frame = frame(text.bounds, 0.0)?;
        let format = text_format(&text.style);
        let paragraphs = text
            .paragraphs
            .iter()
            .map(|p| Paragraph {
                align: text_align(text.style.align),
                space_after: (text.paragraphs.len() > 1).then_some(text.style.size * 0.4),
                ..Paragraph::new(p.as_str(), format.clone())
            })
            .collect();
        let body = TextBody {
            anchor: text_anchor(text.style.valign),
            ..TextBody::new(paragraphs)
        };
        self.slide()?.add_text_box(frame, body);
        Ok(())
    }

    fn add_shape(&mut self, shape: &ShapePrimitive) -> Result<(), WriteError> {
        let frame = frame(shape.bounds, shape.rotation)?;

        if shape.kind == ShapeKind::Line {
            let stroke = shape.stroke.ok_or_else(|| {
                WriteError::InvalidPrimitive("line without a stroke".to_string())
            })?;
            self.slide()?.add_connector(frame, outline(&stroke));
            return Ok(());
        }

        let geometry = match shape.kind {
            ShapeKind::Rect | ShapeKind::Line => Geometry::Rect,
            ShapeKind::RoundRect => Geometry::RoundRect {
                adj: shape.radius.unwrap_or(16_667),
            },
            ShapeKind::Ellipse => Geometry::Ellipse,
            ShapeKind::RightTriangle => Geometry::RightTriangle,
            ShapeKind::Wave => Geometry::Wave,
            ShapeKind::Teardrop => Geometry::Teardrop,
            ShapeKind::Parallelogram => Geometry::Parallelogram,
        };
        let created = self.slide()?.add_auto_shape(geometry, frame);
        created.fill(shape.fill.as_ref().map(fill).unwrap_or(Fill::None));
        if let Some(stroke) = &shape.stroke {
            created.line(outline(stroke));
        }
        if let Some(shadow) = &shape.shadow {
            created.shadow(drop_shadow(shadow));
        }
        if let Some((label, style)) = &shape.label {
            let paragraph = Paragraph {
                align: text_align(style.align),
                ..Paragraph::new(label.as_str(), text_format(style))
            };
            created.text(TextBody {
                anchor: text_anchor(style.valign),
                insets: [45_720; 4],
                ..TextBody::new(vec![paragraph])
            });
        }
        Ok(())
    }

    fn add_chart(&mut self, chart: &ChartPrimitive) -> Result<(), WriteError> {
        let frame = frame(chart.bounds, 0.0)?;
        let mut model = Chart::new(match chart.kind {
            ChartKind::Bar => charts::ChartKind::Bar,
            ChartKind::Column => charts::ChartKind::Column,
            ChartKind::Line => charts::ChartKind::Line,
            ChartKind::Pie => charts::ChartKind::Pie,
            ChartKind::Doughnut => charts::ChartKind::Doughnut,
            ChartKind::Scatter => charts::ChartKind::Scatter,
            ChartKind::Area => charts::ChartKind::Area,
        })
        .with_categories(chart.categories.clone());
        for series in &chart.series {
            model = model.add_series(ChartSeries::new(
                series.name.as_str(),
                series.values.clone(),
                series.color,
            ));
        }
        model.point_colors = chart.point_colors.clone();
        model.legend = chart.show_legend.then_some(LegendPosition::Bottom);
        model.data_labels = DataLabels {
            show_value: chart.show_values,
            show_percent: false,
        };
        model.text_color = chart.text.color;
        model.gridline_color = chart.gridlines;
        model.font = Some(chart.text.font.clone());
        model.font_size = chart.text.size;

        self.slide()?.add_chart(frame, model);
        Ok(())
    }

    fn add_table(&mut self, table: &TablePrimitive) -> Result<(), WriteError> {
        let frame = frame(table.bounds, 0.0)?;
        let rows = table
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| TableCell {
                        text: cell.text.clone(),
                        format: text_format(&cell.style),
                        fill: cell.fill,
                        align: text_align(cell.style.align),
                    })
                    .collect()
            })
            .collect();
        let model = TableModel {
            rows,
            col_widths: table.col_widths.iter().map(|w| inch_to_emu(*w)).collect(),
            row_height: inch_to_emu(table.row_height),
            border: table.border.map(|color| (color, pt_to_emu_f64(0.75))),
            first_row_header: table.header,
        };
        self.slide()?.add_table(frame, model);
        Ok(())
    }

    fn set_transition(&mut self, style: TransitionStyle) -> Result<(), WriteError> {
        let transition_type = match style {
            TransitionStyle::Fade => TransitionType::Fade,
            TransitionStyle::Push => TransitionType::Push {
                direction: TransitionDirection::Left,
            },
            TransitionStyle::Wipe => TransitionType::Wipe {
                direction: TransitionDirection::Left,
            },
            TransitionStyle::Zoom => TransitionType::Zoom {
                direction: ZoomDirection::In,
            },
            TransitionStyle::Cover => TransitionType::Cover {
                direction: TransitionDirection::Left,
            },
            TransitionStyle::Dissolve => TransitionType::Dissolve,
        };
        self.slide()?
            .set_transition(SlideTransition::new(transition_type).with_speed(TransitionSpeed::Medium));
        Ok(())
    }

    fn reset_slide(&mut self) -> Result<(), WriteError> {
        self.slide()?.clear();
        Ok(())
    }

    fn serialize(self) -> impl Future<Output = Result<RawDocument, WriteError>> + Send {
        let pres = self.pres;
        async move {
            let bytes = tokio::task::spawn_blocking(move || pres.to_bytes())
                .await
                .map_err(|err| WriteError::Task(err.to_string()))??;
            Ok(RawDocument::Buffer(bytes))
        }
    }
}

impl From<WriteError> for crate::common::Error {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::Ooxml(err) => crate::common::Error::Ooxml(err),
            WriteError::Task(msg) => crate::common::Error::Task(msg),
            other => crate::common::Error::Ooxml(OoxmlError::Other(other.to_string())),
        }
    }
}

fn frame(bounds: Bounds, rotation: f64) -> Result<Frame, WriteError> {
    if !bounds.is_finite() || !rotation.is_finite() {
        return Err(WriteError::InvalidPrimitive(format!(
            "non-finite geometry {bounds:?}"
        )));
    }
    let mut frame = Frame::new(
        inch_to_emu(bounds.x),
        inch_to_emu(bounds.y),
        inch_to_emu(bounds.w),
        inch_to_emu(bounds.h),
    );
    frame.rotation = if rotation == 0.0 {
        0
    } else {
        degrees_to_angle(rotation)
    };
    Ok(frame)
}

/// DrawingML alpha for a 0..1 transparency; `None` when opaque.
fn alpha(transparency: f64) -> Option<u32> {
    (transparency > 0.0).then(|| ((1.0 - transparency.clamp(0.0, 1.0)) * 100_000.0).round() as u32)
}

fn color_value(color: RGBColor, transparency: f64) -> ColorValue {
    ColorValue {
        color,
        alpha: alpha(transparency),
    }
}

fn gradient_stops(stops: &[Stop]) -> Vec<GradientStop> {
    stops
        .iter()
        .map(|stop| GradientStop {
            position: stop.position.clamp(0.0, 1.0),
            color: color_value(stop.color, stop.transparency),
        })
        .collect()
}

fn fill(paint: &Paint) -> Fill {
    match paint {
        Paint::Solid {
            color,
            transparency,
        } => Fill::Solid(color_value(*color, *transparency)),
        Paint::LinearGradient { angle, stops } => Fill::Gradient {
            angle: *angle,
            stops: gradient_stops(stops),
        },
    }
}

fn outline(stroke: &Stroke) -> Outline {
    Outline {
        dash: match stroke.dash {
            Dash::Solid => DashStyle::Solid,
            Dash::Dash => DashStyle::Dash,
            Dash::Dot => DashStyle::Dot,
        },
        tail_arrow: stroke.arrow,
        ..Outline::new(stroke.color, pt_to_emu_f64(stroke.width))
    }
}

fn drop_shadow(shadow: &ShadowStyle) -> Shadow {
    Shadow {
        color: color_value(shadow.color, shadow.transparency),
        blur: pt_to_emu_f64(shadow.blur),
        distance: pt_to_emu_f64(shadow.offset),
        direction: degrees_to_angle(shadow.angle),
    }
}

fn text_format(style: &TextStyle) -> TextFormat {
    TextFormat {
        font: Some(style.font.clone()),
        size: Some(style.size),
        bold: style.bold,
        italic: style.italic,
        color: Some(style.color),
    }
}

fn text_align(align: HAlign) -> TextAlign {
    match align {
        HAlign::Left => TextAlign::Left,
        HAlign::Center => TextAlign::Center,
        HAlign::Right => TextAlign::Right,
    }
}

fn text_anchor(valign: VAlign) -> TextAnchor {
    match valign {
        VAlign::Top => TextAnchor::Top,
        VAlign::Middle => TextAnchor::Middle,
        VAlign::Bottom => TextAnchor::Bottom,
    }
}

/// Package theme built from the resolved deck theme.
fn theme_definition(theme: &ResolvedTheme) -> ThemeDefinition {
    let c = &theme.colors;
    let (dk1, lt1) = if c.background.is_dark() {
        (c.background, c.text)
    } else {
        (c.text, c.background)
    };
    ThemeDefinition {
        name: theme.name.clone(),
        major_font: theme.fonts.heading.clone(),
        minor_font: theme.fonts.body.clone(),
        colors: ColorScheme {
            dk1,
            lt1,
            dk2: c.primary.shade(0.5),
            lt2: c.background.mix(&c.primary, 0.1),
            accents: [c.primary, c.secondary, c.accent, c.success, c.warning, c.error],
            hlink: c.primary,
            fol_hlink: c.secondary,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::primitive::{CellData, SeriesData};
    use std::io::{Cursor, Read};

    fn style() -> TextStyle {
        TextStyle::new("Calibri", 18.0, RGBColor::BLACK)
    }

    fn part(bytes: &[u8], name: &str) -> Option<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).ok()?;
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        Some(out)
    }

    async fn finish(writer: PptxWriter) -> Vec<u8> {
        match writer.serialize().await.unwrap() {
            RawDocument::Buffer(bytes) => bytes,
            other => panic!("unexpected representation {other:?}"),
        }
    }

    #[test]
    fn test_drawing_before_a_slide_fails() {
        let mut writer = PptxWriter::default();
        let text = TextPrimitive {
            bounds: Bounds::new(0.0, 0.0, 1.0, 1.0),
            paragraphs: vec!["x".into()],
            style: style(),
        };
        assert!(matches!(writer.add_text(&text), Err(WriteError::NoSlide)));
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        let mut writer = PptxWriter::default();
        writer.add_slide().unwrap();
        let shape = ShapePrimitive::new(ShapeKind::Rect, Bounds::new(f64::NAN, 0.0, 1.0, 1.0));
        assert!(matches!(
            writer.add_shape(&shape),
            Err(WriteError::InvalidPrimitive(_))
        ));
    }

    #[test]
    fn test_transparency_maps_to_alpha() {
        assert_eq!(alpha(0.0), None);
        assert_eq!(alpha(0.25), Some(75_000));
        assert_eq!(alpha(1.0), Some(0));
    }

    #[test]
    fn test_transition_tokens() {
        assert_eq!(TransitionStyle::from_token(None), TransitionStyle::Fade);
        assert_eq!(TransitionStyle::from_token(Some(" Push ")), TransitionStyle::Push);
        assert_eq!(TransitionStyle::from_token(Some("spin")), TransitionStyle::Fade);
    }

    #[tokio::test]
    async fn test_primitives_reach_the_package() {
        let mut writer = PptxWriter::default();
        writer.set_metadata(&DocumentMetadata {
            title: "Deck".into(),
            author: "Ana".into(),
            subject: None,
            created: DateTime::UNIX_EPOCH,
        });
        writer.set_theme(&ResolvedTheme::default());

        writer.add_slide().unwrap();
        writer
            .set_background(&Background::Solid(RGBColor::new(0x03, 0x0F, 0x26)))
            .unwrap();
        writer
            .add_primitive(&VisualPrimitive::Text(TextPrimitive {
                bounds: Bounds::new(0.5, 0.5, 9.0, 1.0),
                paragraphs: vec!["Hello & welcome".into()],
                style: style(),
            }))
            .unwrap();
        writer
            .add_shape(
                &ShapePrimitive::new(ShapeKind::Line, Bounds::new(1.0, 2.0, 2.0, 0.0))
                    .stroked(Stroke::new(RGBColor::WHITE, 1.5).with_arrow()),
            )
            .unwrap();
        writer.set_transition(TransitionStyle::Fade).unwrap();

        writer.add_slide().unwrap();
        writer
            .add_chart(&ChartPrimitive {
                bounds: Bounds::new(0.5, 1.3, 9.0, 4.0),
                kind: ChartKind::Pie,
                categories: vec!["a".into(), "b".into()],
                series: vec![SeriesData {
                    name: "s".into(),
                    values: vec![1.0, 2.0],
                    color: RGBColor::BLACK,
                }],
                point_colors: vec![RGBColor::BLACK, RGBColor::WHITE],
                show_legend: true,
                show_values: false,
                text: style(),
                gridlines: None,
            })
            .unwrap();
        writer
            .add_table(&TablePrimitive {
                bounds: Bounds::new(0.5, 1.3, 9.0, 1.0),
                col_widths: vec![4.5, 4.5],
                row_height: 0.5,
                rows: vec![vec![
                    CellData {
                        text: "h1".into(),
                        style: style(),
                        fill: Some(RGBColor::BLACK),
                    },
                    CellData {
                        text: "h2".into(),
                        style: style(),
                        fill: None,
                    },
                ]],
                border: Some(RGBColor::BLACK),
                header: true,
            })
            .unwrap();

        let bytes = finish(writer).await;
        let slide1 = part(&bytes, "ppt/slides/slide1.xml").unwrap();
        assert!(slide1.contains("030F26"));
        assert!(slide1.contains("Hello &amp; welcome"));
        assert!(slide1.contains("<p:cxnSp>"));
        assert!(slide1.contains("<p:transition"));
        let slide2 = part(&bytes, "ppt/slides/slide2.xml").unwrap();
        assert!(slide2.contains("<a:tbl>"));
        assert!(part(&bytes, "ppt/charts/chart1.xml").is_some());
        assert!(part(&bytes, "docProps/core.xml").unwrap().contains("Ana"));
        assert!(part(&bytes, "ppt/theme/theme1.xml").unwrap().contains("2563EB"));
        assert!(part(&bytes, "ppt/slides/slide3.xml").is_none());
    }

    #[tokio::test]
    async fn test_reset_slide_keeps_the_slide() {
        let mut writer = PptxWriter::default();
        writer.add_slide().unwrap();
        writer
            .add_shape(
                &ShapePrimitive::new(ShapeKind::Ellipse, Bounds::new(1.0, 1.0, 1.0, 1.0))
                    .filled(Paint::solid(RGBColor::BLACK)),
            )
            .unwrap();
        writer.reset_slide().unwrap();
        assert_eq!(writer.presentation().slide_count(), 1);
        assert_eq!(writer.presentation().slides()[0].shape_count(), 0);
        let bytes = finish(writer).await;
        assert!(part(&bytes, "ppt/slides/slide1.xml").is_some());
    }
}
