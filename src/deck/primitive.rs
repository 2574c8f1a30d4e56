//! Positioned drawables produced by the layout engine.
//!
//! Everything here is measured in inches on a fixed canvas and carries no
//! package-writer types, so layouts and patterns stay testable on their own.

use crate::common::RGBColor;
use serde::{Deserialize, Serialize};

/// Slide canvas size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    /// 16:9 at 10 inches wide.
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 5.625,
        }
    }
}

impl Canvas {
    /// Smallest canvas the layouts can place a title block on, in inches.
    pub const MIN_WIDTH: f64 = 2.0;
    pub const MIN_HEIGHT: f64 = 1.5;

    /// Finite and at least [`Canvas::MIN_WIDTH`] by [`Canvas::MIN_HEIGHT`].
    pub fn is_usable(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width >= Self::MIN_WIDTH
            && self.height >= Self::MIN_HEIGHT
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.height)
    }

    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }
}

/// Axis-aligned bounding box, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// A `w` by `h` box centred on `(cx, cy)`.
    pub fn centered(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }
}

/// Preset outline of a shape primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rect,
    RoundRect,
    Ellipse,
    /// Straight line from the top-left to the bottom-right corner of its bounds
    Line,
    RightTriangle,
    Wave,
    Teardrop,
    Parallelogram,
}

/// One stop of a linear gradient; `position` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stop {
    pub position: f64,
    pub color: RGBColor,
    /// 0 is opaque, 1 is invisible
    pub transparency: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid { color: RGBColor, transparency: f64 },
    LinearGradient { angle: f64, stops: Vec<Stop> },
}

impl Paint {
    pub fn solid(color: RGBColor) -> Self {
        Paint::Solid {
            color,
            transparency: 0.0,
        }
    }

    pub fn translucent(color: RGBColor, transparency: f64) -> Self {
        Paint::Solid {
            color,
            transparency: transparency.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dash {
    #[default]
    Solid,
    Dash,
    Dot,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: RGBColor,
    /// Width in points
    pub width: f64,
    pub dash: Dash,
    /// Arrow head at the end of a line
    pub arrow: bool,
}

impl Stroke {
    pub fn new(color: RGBColor, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Dash::Solid,
            arrow: false,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dash = Dash::Dash;
        self
    }

    pub fn with_arrow(mut self) -> Self {
        self.arrow = true;
        self
    }
}

/// Drop shadow parameters, in points and degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowStyle {
    pub color: RGBColor,
    pub transparency: f64,
    pub blur: f64,
    pub offset: f64,
    pub angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: String,
    /// Size in points
    pub size: f64,
    pub color: RGBColor,
    pub bold: bool,
    pub italic: bool,
    pub align: HAlign,
    pub valign: VAlign,
}

impl TextStyle {
    pub fn new(font: impl Into<String>, size: f64, color: RGBColor) -> Self {
        Self {
            font: font.into(),
            size,
            color,
            bold: false,
            italic: false,
            align: HAlign::Left,
            valign: VAlign::Top,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn align(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }

    pub fn valign(mut self, valign: VAlign) -> Self {
        self.valign = valign;
        self
    }

    pub fn centered(self) -> Self {
        self.align(HAlign::Center).valign(VAlign::Middle)
    }
}

/// A block of text; each entry of `paragraphs` is its own paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub bounds: Bounds,
    pub paragraphs: Vec<String>,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapePrimitive {
    pub kind: ShapeKind,
    pub bounds: Bounds,
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
    /// Corner rounding in 1/100000 of the shorter side, for `RoundRect`
    pub radius: Option<u32>,
    pub shadow: Option<ShadowStyle>,
    /// Clockwise rotation in degrees
    pub rotation: f64,
    pub label: Option<(String, TextStyle)>,
}

impl ShapePrimitive {
    pub fn new(kind: ShapeKind, bounds: Bounds) -> Self {
        Self {
            kind,
            bounds,
            fill: None,
            stroke: None,
            radius: None,
            shadow: None,
            rotation: 0.0,
            label: None,
        }
    }

    pub fn filled(mut self, paint: Paint) -> Self {
        self.fill = Some(paint);
        self
    }

    pub fn stroked(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Apply a corner radius; `None` turns a rounded rectangle back into a plain one.
    pub fn rounded(mut self, radius: Option<u32>) -> Self {
        match radius {
            Some(adj) => {
                if self.kind == ShapeKind::Rect {
                    self.kind = ShapeKind::RoundRect;
                }
                self.radius = Some(adj);
            },
            None => {
                if self.kind == ShapeKind::RoundRect {
                    self.kind = ShapeKind::Rect;
                }
                self.radius = None;
            },
        }
        self
    }

    pub fn shadowed(mut self, shadow: Option<ShadowStyle>) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn labeled(mut self, text: impl Into<String>, style: TextStyle) -> Self {
        self.label = Some((text.into(), style));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Column,
    Line,
    Pie,
    Doughnut,
    Scatter,
    Area,
}

impl ChartKind {
    /// Map a chart-type token; `None` for anything unsupported.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "bar" => Some(ChartKind::Bar),
            "column" => Some(ChartKind::Column),
            "line" => Some(ChartKind::Line),
            "pie" => Some(ChartKind::Pie),
            "donut" | "doughnut" => Some(ChartKind::Doughnut),
            "scatter" => Some(ChartKind::Scatter),
            "area" => Some(ChartKind::Area),
            _ => None,
        }
    }

    pub fn is_radial(&self) -> bool {
        matches!(self, ChartKind::Pie | ChartKind::Doughnut)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub name: String,
    pub values: Vec<f64>,
    pub color: RGBColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPrimitive {
    pub bounds: Bounds,
    pub kind: ChartKind,
    pub categories: Vec<String>,
    pub series: Vec<SeriesData>,
    /// Per-category colours for radial charts
    pub point_colors: Vec<RGBColor>,
    pub show_legend: bool,
    pub show_values: bool,
    pub text: TextStyle,
    pub gridlines: Option<RGBColor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellData {
    pub text: String,
    pub style: TextStyle,
    pub fill: Option<RGBColor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TablePrimitive {
    pub bounds: Bounds,
    pub col_widths: Vec<f64>,
    pub row_height: f64,
    pub rows: Vec<Vec<CellData>>,
    pub border: Option<RGBColor>,
    pub header: bool,
}

/// A positioned drawable.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualPrimitive {
    Text(TextPrimitive),
    Shape(ShapePrimitive),
    Chart(ChartPrimitive),
    Table(TablePrimitive),
}

impl VisualPrimitive {
    pub fn bounds(&self) -> Bounds {
        match self {
            VisualPrimitive::Text(t) => t.bounds,
            VisualPrimitive::Shape(s) => s.bounds,
            VisualPrimitive::Chart(c) => c.bounds,
            VisualPrimitive::Table(t) => t.bounds,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapePrimitive> {
        match self {
            VisualPrimitive::Shape(s) => Some(s),
            _ => None,
        }
    }
}

impl From<TextPrimitive> for VisualPrimitive {
    fn from(value: TextPrimitive) -> Self {
        VisualPrimitive::Text(value)
    }
}

impl From<ShapePrimitive> for VisualPrimitive {
    fn from(value: ShapePrimitive) -> Self {
        VisualPrimitive::Shape(value)
    }
}

impl From<ChartPrimitive> for VisualPrimitive {
    fn from(value: ChartPrimitive) -> Self {
        VisualPrimitive::Chart(value)
    }
}

impl From<TablePrimitive> for VisualPrimitive {
    fn from(value: TablePrimitive) -> Self {
        VisualPrimitive::Table(value)
    }
}

/// Slide background fill.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Solid(RGBColor),
    LinearGradient { angle: f64, stops: Vec<Stop> },
}

impl Background {
    /// The colour text sits on; gradients report their first stop.
    pub fn base_color(&self) -> RGBColor {
        match self {
            Background::Solid(color) => *color,
            Background::LinearGradient { stops, .. } => stops
                .first()
                .map(|s| s.color)
                .unwrap_or(RGBColor::WHITE),
        }
    }
}

/// A laid-out slide: background, decorative pattern layer, then content.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub background: Background,
    /// Pattern primitives, painted beneath the content
    pub decorations: Vec<VisualPrimitive>,
    pub primitives: Vec<VisualPrimitive>,
}

impl Slide {
    pub fn new(background: Background) -> Self {
        Self {
            background,
            decorations: Vec::new(),
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: impl Into<VisualPrimitive>) {
        self.primitives.push(primitive.into());
    }

    /// Decorations followed by content, in paint order.
    pub fn iter(&self) -> impl Iterator<Item = &VisualPrimitive> {
        self.decorations.iter().chain(self.primitives.iter())
    }

    pub fn primitive_count(&self) -> usize {
        self.decorations.len() + self.primitives.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_tokens() {
        assert_eq!(ChartKind::from_token("Donut"), Some(ChartKind::Doughnut));
        assert_eq!(ChartKind::from_token(" column "), Some(ChartKind::Column));
        assert_eq!(ChartKind::from_token("radar"), None);
    }

    #[test]
    fn test_rounded_toggles_kind() {
        let shape = ShapePrimitive::new(ShapeKind::Rect, Bounds::default()).rounded(Some(8000));
        assert_eq!(shape.kind, ShapeKind::RoundRect);
        let shape = shape.rounded(None);
        assert_eq!(shape.kind, ShapeKind::Rect);
        assert_eq!(shape.radius, None);
    }

    #[test]
    fn test_paint_order() {
        let mut slide = Slide::new(Background::Solid(RGBColor::WHITE));
        slide
            .decorations
            .push(ShapePrimitive::new(ShapeKind::Ellipse, Bounds::default()).into());
        slide.push(ShapePrimitive::new(ShapeKind::Rect, Bounds::default()));
        let kinds: Vec<_> = slide
            .iter()
            .filter_map(|p| p.as_shape().map(|s| s.kind))
            .collect();
        assert_eq!(kinds, vec![ShapeKind::Ellipse, ShapeKind::Rect]);
        assert_eq!(slide.primitive_count(), 2);
    }
}
