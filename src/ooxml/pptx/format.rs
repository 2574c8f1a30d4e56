//! Drawing and text formatting types for PPTX shapes.
//!
//! Every coordinate here is already in EMUs and every angle in 60,000ths of a degree;
//! callers convert from their own units before building shapes.

use crate::common::RGBColor;
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// Position, size and orientation of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
    /// Clockwise rotation in 60,000ths of a degree
    pub rotation: i64,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Frame {
    pub fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self {
            x,
            y,
            cx: cx.max(0),
            cy: cy.max(0),
            ..Default::default()
        }
    }

    /// Write `<a:xfrm>` (or `<p:xfrm>` for graphic frames).
    pub(crate) fn write_xml(&self, xml: &mut String, prefix: &str) {
        let mut buf = itoa::Buffer::new();
        xml.push('<');
        xml.push_str(prefix);
        xml.push_str(":xfrm");
        if self.rotation != 0 {
            xml.push_str(" rot=\"");
            xml.push_str(buf.format(self.rotation));
            xml.push('"');
        }
        if self.flip_h {
            xml.push_str(" flipH=\"1\"");
        }
        if self.flip_v {
            xml.push_str(" flipV=\"1\"");
        }
        xml.push_str("><a:off x=\"");
        xml.push_str(buf.format(self.x));
        xml.push_str("\" y=\"");
        xml.push_str(buf.format(self.y));
        xml.push_str("\"/><a:ext cx=\"");
        xml.push_str(buf.format(self.cx));
        xml.push_str("\" cy=\"");
        xml.push_str(buf.format(self.cy));
        xml.push_str("\"/></");
        xml.push_str(prefix);
        xml.push_str(":xfrm>");
    }
}

/// A color with optional opacity (0-100000, DrawingML percentage units).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorValue {
    pub color: RGBColor,
    pub alpha: Option<u32>,
}

impl ColorValue {
    pub fn opaque(color: RGBColor) -> Self {
        Self { color, alpha: None }
    }

    pub(crate) fn write_xml(&self, xml: &mut String) -> Result<()> {
        match self.alpha {
            Some(alpha) if alpha < 100_000 => write!(
                xml,
                r#"<a:srgbClr val="{}"><a:alpha val="{}"/></a:srgbClr>"#,
                self.color.to_hex(),
                alpha
            )?,
            _ => write!(xml, r#"<a:srgbClr val="{}"/>"#, self.color.to_hex())?,
        }
        Ok(())
    }
}

impl From<RGBColor> for ColorValue {
    fn from(color: RGBColor) -> Self {
        Self::opaque(color)
    }
}

/// A gradient stop (position and color).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position from 0.0 to 1.0
    pub position: f64,
    pub color: ColorValue,
}

/// Shape fill.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Fill {
    #[default]
    None,
    Solid(ColorValue),
    /// Linear gradient; `angle` in degrees
    Gradient { angle: f64, stops: Vec<GradientStop> },
}

impl Fill {
    pub fn solid(color: RGBColor) -> Self {
        Fill::Solid(ColorValue::opaque(color))
    }

    pub(crate) fn write_xml(&self, xml: &mut String) -> Result<()> {
        match self {
            Fill::None => xml.push_str("<a:noFill/>"),
            Fill::Solid(color) => {
                xml.push_str("<a:solidFill>");
                color.write_xml(xml)?;
                xml.push_str("</a:solidFill>");
            },
            Fill::Gradient { angle, stops } => {
                xml.push_str(r#"<a:gradFill rotWithShape="1"><a:gsLst>"#);
                for stop in stops {
                    let pos = (stop.position.clamp(0.0, 1.0) * 100_000.0).round() as i64;
                    write!(xml, r#"<a:gs pos="{}">"#, pos)?;
                    stop.color.write_xml(xml)?;
                    xml.push_str("</a:gs>");
                }
                xml.push_str("</a:gsLst>");
                write!(
                    xml,
                    r#"<a:lin ang="{}" scaled="0"/>"#,
                    crate::common::unit::degrees_to_angle(*angle)
                )?;
                xml.push_str("</a:gradFill>");
            },
        }
        Ok(())
    }
}

/// Line dash style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    LongDash,
}

impl DashStyle {
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dash => "dash",
            Self::Dot => "sysDot",
            Self::LongDash => "lgDash",
        }
    }
}

/// Shape outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub color: ColorValue,
    /// Width in EMUs
    pub width: i64,
    pub dash: DashStyle,
    /// Arrowhead at the end point
    pub tail_arrow: bool,
}

impl Outline {
    pub fn new(color: RGBColor, width: i64) -> Self {
        Self {
            color: ColorValue::opaque(color),
            width,
            dash: DashStyle::Solid,
            tail_arrow: false,
        }
    }

    pub(crate) fn write_xml(outline: Option<&Outline>, xml: &mut String) -> Result<()> {
        let Some(line) = outline else {
            xml.push_str("<a:ln><a:noFill/></a:ln>");
            return Ok(());
        };
        write!(xml, r#"<a:ln w="{}">"#, line.width.max(0))?;
        xml.push_str("<a:solidFill>");
        line.color.write_xml(xml)?;
        xml.push_str("</a:solidFill>");
        if line.dash != DashStyle::Solid {
            write!(xml, r#"<a:prstDash val="{}"/>"#, line.dash.xml_value())?;
        }
        if line.tail_arrow {
            xml.push_str(r#"<a:tailEnd type="triangle" w="med" len="med"/>"#);
        }
        xml.push_str("</a:ln>");
        Ok(())
    }
}

/// Outer drop shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: ColorValue,
    /// Blur radius in EMUs
    pub blur: i64,
    /// Offset distance in EMUs
    pub distance: i64,
    /// Direction in 60,000ths of a degree
    pub direction: i64,
}

impl Shadow {
    pub(crate) fn write_xml(&self, xml: &mut String) -> Result<()> {
        write!(
            xml,
            r#"<a:effectLst><a:outerShdw blurRad="{}" dist="{}" dir="{}" algn="tl" rotWithShape="0">"#,
            self.blur, self.distance, self.direction
        )?;
        self.color.write_xml(xml)?;
        xml.push_str("</a:outerShdw></a:effectLst>");
        Ok(())
    }
}

/// Preset geometries used by generated slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    Rect,
    /// Rounded rectangle; `adj` is the corner radius in 1/100000 of the short side
    RoundRect { adj: u32 },
    Ellipse,
    RightTriangle,
    Wave,
    Teardrop,
    Parallelogram,
}

impl Geometry {
    pub const fn preset_name(&self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::RoundRect { .. } => "roundRect",
            Self::Ellipse => "ellipse",
            Self::RightTriangle => "rtTriangle",
            Self::Wave => "wave",
            Self::Teardrop => "teardrop",
            Self::Parallelogram => "parallelogram",
        }
    }

    pub(crate) fn write_xml(&self, xml: &mut String) -> Result<()> {
        write!(xml, r#"<a:prstGeom prst="{}">"#, self.preset_name())?;
        match self {
            Self::RoundRect { adj } => {
                write!(xml, r#"<a:avLst><a:gd name="adj" fmla="val {}"/></a:avLst>"#, adj)?
            },
            _ => xml.push_str("<a:avLst/>"),
        }
        xml.push_str("</a:prstGeom>");
        Ok(())
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "ctr",
            Self::Right => "r",
        }
    }
}

/// Vertical anchoring of text inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl TextAnchor {
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Top => "t",
            Self::Middle => "ctr",
            Self::Bottom => "b",
        }
    }
}

/// Text formatting options for runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextFormat {
    /// Font name (e.g., "Arial", "Calibri")
    pub font: Option<String>,
    /// Font size in points
    pub size: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub color: Option<RGBColor>,
}

impl TextFormat {
    pub(crate) fn write_run_properties(&self, xml: &mut String, tag: &str) -> Result<()> {
        write!(xml, r#"<a:{} lang="en-US""#, tag)?;
        if let Some(size) = self.size {
            write!(xml, r#" sz="{}""#, crate::common::unit::pt_to_centipoints(size))?;
        }
        if self.bold {
            xml.push_str(r#" b="1""#);
        }
        if self.italic {
            xml.push_str(r#" i="1""#);
        }
        xml.push_str(r#" dirty="0""#);
        if self.color.is_none() && self.font.is_none() {
            xml.push_str("/>");
            return Ok(());
        }
        xml.push('>');
        if let Some(color) = self.color {
            write!(
                xml,
                r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                color.to_hex()
            )?;
        }
        if let Some(ref font) = self.font {
            let font = escape_xml(font);
            write!(
                xml,
                r#"<a:latin typeface="{}"/><a:cs typeface="{}"/>"#,
                font, font
            )?;
        }
        write!(xml, "</a:{}>", tag)?;
        Ok(())
    }
}

/// One paragraph of single-format text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub text: String,
    pub format: TextFormat,
    pub align: TextAlign,
    /// Line spacing in percent of single spacing
    pub line_spacing: Option<u32>,
    /// Space after the paragraph in points
    pub space_after: Option<f64>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, format: TextFormat) -> Self {
        Self {
            text: text.into(),
            format,
            ..Default::default()
        }
    }

    pub(crate) fn write_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<a:p>");
        write!(xml, r#"<a:pPr algn="{}">"#, self.align.xml_value())?;
        if let Some(pct) = self.line_spacing {
            write!(xml, r#"<a:lnSpc><a:spcPct val="{}"/></a:lnSpc>"#, pct * 1000)?;
        }
        if let Some(after) = self.space_after {
            write!(
                xml,
                r#"<a:spcAft><a:spcPts val="{}"/></a:spcAft>"#,
                (after * 100.0).round() as i64
            )?;
        }
        xml.push_str("<a:buNone/></a:pPr>");
        if !self.text.is_empty() {
            xml.push_str("<a:r>");
            self.format.write_run_properties(xml, "rPr")?;
            write!(xml, "<a:t>{}</a:t>", escape_xml(&self.text))?;
            xml.push_str("</a:r>");
        }
        self.format.write_run_properties(xml, "endParaRPr")?;
        xml.push_str("</a:p>");
        Ok(())
    }
}

/// Text content of a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBody {
    pub paragraphs: Vec<Paragraph>,
    pub anchor: TextAnchor,
    /// Left, top, right, bottom insets in EMUs
    pub insets: [i64; 4],
    pub wrap: bool,
    /// Shrink text on overflow
    pub shrink_on_overflow: bool,
}

impl Default for TextBody {
    fn default() -> Self {
        Self {
            paragraphs: Vec::new(),
            anchor: TextAnchor::Top,
            insets: [91_440, 45_720, 91_440, 45_720],
            wrap: true,
            shrink_on_overflow: true,
        }
    }
}

impl TextBody {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            paragraphs,
            ..Default::default()
        }
    }

    pub(crate) fn write_xml(&self, xml: &mut String, tag: &str) -> Result<()> {
        write!(xml, "<{}>", tag)?;
        write!(
            xml,
            r#"<a:bodyPr wrap="{}" lIns="{}" tIns="{}" rIns="{}" bIns="{}" anchor="{}" rtlCol="0">"#,
            if self.wrap { "square" } else { "none" },
            self.insets[0],
            self.insets[1],
            self.insets[2],
            self.insets[3],
            self.anchor.xml_value()
        )?;
        if self.shrink_on_overflow {
            xml.push_str("<a:normAutofit/>");
        } else {
            xml.push_str("<a:noAutofit/>");
        }
        xml.push_str("</a:bodyPr><a:lstStyle/>");
        if self.paragraphs.is_empty() {
            xml.push_str(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
        }
        for paragraph in &self.paragraphs {
            paragraph.write_xml(xml)?;
        }
        write!(xml, "</{}>", tag)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_xml() {
        let mut frame = Frame::new(1, 2, 3, 4);
        frame.rotation = 5_400_000;
        frame.flip_v = true;
        let mut xml = String::new();
        frame.write_xml(&mut xml, "a");
        assert_eq!(
            xml,
            r#"<a:xfrm rot="5400000" flipV="1"><a:off x="1" y="2"/><a:ext cx="3" cy="4"/></a:xfrm>"#
        );
    }

    #[test]
    fn test_negative_extent_clamped() {
        let frame = Frame::new(0, 0, -5, 10);
        assert_eq!(frame.cx, 0);
    }

    #[test]
    fn test_fill_with_alpha() {
        let mut xml = String::new();
        Fill::Solid(ColorValue {
            color: RGBColor::new(0, 0, 255),
            alpha: Some(30_000),
        })
        .write_xml(&mut xml)
        .unwrap();
        assert!(xml.contains(r#"<a:alpha val="30000"/>"#));
    }

    #[test]
    fn test_round_rect_adjust() {
        let mut xml = String::new();
        Geometry::RoundRect { adj: 16_667 }.write_xml(&mut xml).unwrap();
        assert!(xml.contains(r#"fmla="val 16667""#));
    }

    #[test]
    fn test_paragraph_escapes_text() {
        let mut xml = String::new();
        let format = TextFormat {
            bold: true,
            color: Some(RGBColor::WHITE),
            ..Default::default()
        };
        Paragraph::new("R&D <2025>", format).write_xml(&mut xml).unwrap();
        assert!(xml.contains("<a:t>R&amp;D &lt;2025&gt;</a:t>"));
        assert!(xml.contains(r#"b="1""#));
        assert!(xml.contains(r#"<a:srgbClr val="FFFFFF"/>"#));
    }
}
