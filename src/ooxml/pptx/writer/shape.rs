/// Shape types and implementation for PPTX presentations.
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use crate::ooxml::pptx::format::{Fill, Frame, Geometry, Outline, Shadow, TextBody};
use crate::ooxml::pptx::writer::table::TableModel;
use std::fmt::Write as FmtWrite;

/// A shape on a slide (auto shape, connector, chart frame or table).
#[derive(Debug, Clone)]
pub struct MutableShape {
    /// Shape ID
    pub(crate) shape_id: u32,
    /// Shape type
    pub(crate) shape_type: ShapeType,
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeType {
    AutoShape {
        geometry: Geometry,
        frame: Frame,
        fill: Fill,
        line: Option<Outline>,
        shadow: Option<Shadow>,
        text: Option<TextBody>,
        text_box: bool,
    },
    Connector {
        frame: Frame,
        line: Outline,
    },
    Chart {
        frame: Frame,
        /// Index of the chart within its slide
        chart_idx: usize,
    },
    Table {
        frame: Frame,
        table: TableModel,
    },
}

impl MutableShape {
    pub(crate) fn new_auto_shape(shape_id: u32, geometry: Geometry, frame: Frame) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::AutoShape {
                geometry,
                frame,
                fill: Fill::None,
                line: None,
                shadow: None,
                text: None,
                text_box: false,
            },
        }
    }

    pub(crate) fn new_text_box(shape_id: u32, frame: Frame, text: TextBody) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::AutoShape {
                geometry: Geometry::Rect,
                frame,
                fill: Fill::None,
                line: None,
                shadow: None,
                text: Some(text),
                text_box: true,
            },
        }
    }

    pub(crate) fn new_connector(shape_id: u32, frame: Frame, line: Outline) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::Connector { frame, line },
        }
    }

    pub(crate) fn new_chart(shape_id: u32, frame: Frame, chart_idx: usize) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::Chart { frame, chart_idx },
        }
    }

    pub(crate) fn new_table(shape_id: u32, frame: Frame, table: TableModel) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::Table { frame, table },
        }
    }

    /// Get the shape ID.
    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    /// Builder method: set the fill (auto shapes only).
    pub fn fill(&mut self, new_fill: Fill) -> &mut Self {
        if let ShapeType::AutoShape { ref mut fill, .. } = self.shape_type {
            *fill = new_fill;
        }
        self
    }

    /// Builder method: set the outline (auto shapes only).
    pub fn line(&mut self, outline: Outline) -> &mut Self {
        if let ShapeType::AutoShape { ref mut line, .. } = self.shape_type {
            *line = Some(outline);
        }
        self
    }

    /// Builder method: set an outer shadow (auto shapes only).
    pub fn shadow(&mut self, effect: Shadow) -> &mut Self {
        if let ShapeType::AutoShape { ref mut shadow, .. } = self.shape_type {
            *shadow = Some(effect);
        }
        self
    }

    /// Builder method: place text inside the shape (auto shapes only).
    pub fn text(&mut self, body: TextBody) -> &mut Self {
        if let ShapeType::AutoShape { ref mut text, .. } = self.shape_type {
            *text = Some(body);
        }
        self
    }

    /// Generate XML for this shape.
    ///
    /// Chart frames need the relationship ID of their chart part.
    pub(crate) fn to_xml(&self, xml: &mut String, chart_rel_id: Option<&str>) -> Result<()> {
        match &self.shape_type {
            ShapeType::AutoShape {
                geometry,
                frame,
                fill,
                line,
                shadow,
                text,
                text_box,
            } => {
                let name = if *text_box { "TextBox" } else { "Shape" };
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="{} {}"/>"#,
                    self.shape_id, name, self.shape_id
                )?;
                if *text_box {
                    xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
                } else {
                    xml.push_str("<p:cNvSpPr/>");
                }
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                frame.write_xml(xml, "a");
                geometry.write_xml(xml)?;
                fill.write_xml(xml)?;
                Outline::write_xml(line.as_ref(), xml)?;
                if let Some(shadow) = shadow {
                    shadow.write_xml(xml)?;
                }
                xml.push_str("</p:spPr>");

                if let Some(body) = text {
                    body.write_xml(xml, "p:txBody")?;
                }

                xml.push_str("</p:sp>");
            },
            ShapeType::Connector { frame, line } => {
                xml.push_str("<p:cxnSp>");
                xml.push_str("<p:nvCxnSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Connector {}"/>"#,
                    self.shape_id, self.shape_id
                )?;
                xml.push_str("<p:cNvCxnSpPr/>");
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvCxnSpPr>");

                xml.push_str("<p:spPr>");
                frame.write_xml(xml, "a");
                xml.push_str(r#"<a:prstGeom prst="line"><a:avLst/></a:prstGeom>"#);
                Outline::write_xml(Some(line), xml)?;
                xml.push_str("</p:spPr>");
                xml.push_str("</p:cxnSp>");
            },
            ShapeType::Chart { frame, .. } => {
                let rid = chart_rel_id.ok_or_else(|| {
                    crate::ooxml::error::OoxmlError::PartNotFound(format!(
                        "chart part for shape {}",
                        self.shape_id
                    ))
                })?;
                xml.push_str("<p:graphicFrame>");
                xml.push_str("<p:nvGraphicFramePr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Chart {}"/>"#,
                    self.shape_id, self.shape_id
                )?;
                xml.push_str("<p:cNvGraphicFramePr/>");
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvGraphicFramePr>");
                frame.write_xml(xml, "p");
                xml.push_str("<a:graphic>");
                xml.push_str(
                    r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart">"#,
                );
                write!(
                    xml,
                    r#"<c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" r:id="{}"/>"#,
                    escape_xml(rid)
                )?;
                xml.push_str("</a:graphicData>");
                xml.push_str("</a:graphic>");
                xml.push_str("</p:graphicFrame>");
            },
            ShapeType::Table { frame, table } => {
                xml.push_str("<p:graphicFrame>");
                xml.push_str("<p:nvGraphicFramePr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Table {}"/>"#,
                    self.shape_id, self.shape_id
                )?;
                xml.push_str(r#"<p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr>"#);
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvGraphicFramePr>");
                frame.write_xml(xml, "p");
                xml.push_str("<a:graphic>");
                xml.push_str(
                    r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table">"#,
                );
                table.write_xml(xml)?;
                xml.push_str("</a:graphicData>");
                xml.push_str("</a:graphic>");
                xml.push_str("</p:graphicFrame>");
            },
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::ooxml::pptx::format::{Paragraph, TextFormat};

    #[test]
    fn test_auto_shape_xml_order() {
        let mut shape = MutableShape::new_auto_shape(
            3,
            Geometry::RoundRect { adj: 8000 },
            Frame::new(0, 0, 100, 100),
        );
        shape
            .fill(Fill::solid(RGBColor::new(0x11, 0x22, 0x33)))
            .line(Outline::new(RGBColor::BLACK, 12_700));
        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();

        let geom = xml.find("<a:prstGeom").unwrap();
        let fill = xml.find("<a:solidFill>").unwrap();
        let ln = xml.find("<a:ln w=").unwrap();
        assert!(geom < fill && fill < ln);
        assert!(xml.contains(r#"name="Shape 3""#));
    }

    #[test]
    fn test_text_box_flag() {
        let body = TextBody::new(vec![Paragraph::new("Hi", TextFormat::default())]);
        let shape = MutableShape::new_text_box(4, Frame::new(0, 0, 10, 10), body);
        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();
        assert!(xml.contains(r#"<p:cNvSpPr txBox="1"/>"#));
        assert!(xml.contains("<a:t>Hi</a:t>"));
    }

    #[test]
    fn test_chart_requires_relationship() {
        let shape = MutableShape::new_chart(5, Frame::new(0, 0, 10, 10), 0);
        let mut xml = String::new();
        assert!(shape.to_xml(&mut xml, None).is_err());
        xml.clear();
        shape.to_xml(&mut xml, Some("rId2")).unwrap();
        assert!(xml.contains(r#"r:id="rId2""#));
    }
}
