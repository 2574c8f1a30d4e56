/// Slide types and implementation for PPTX presentations.
use crate::ooxml::charts::Chart;
use crate::ooxml::error::Result;
use crate::ooxml::pptx::backgrounds::SlideBackground;
use crate::ooxml::pptx::format::{Frame, Geometry, Outline, TextBody};
use crate::ooxml::pptx::transitions::SlideTransition;

use super::relmap::RelationshipMapper;
use super::shape::{MutableShape, ShapeType};
use super::table::TableModel;

/// A mutable slide in a presentation.
#[derive(Debug, Clone)]
pub struct MutableSlide {
    /// Slide ID (unique identifier, 256 and up)
    pub(crate) slide_id: u32,
    /// Shapes on the slide, in paint order
    pub(crate) shapes: Vec<MutableShape>,
    pub(crate) background: SlideBackground,
    pub(crate) transition: Option<SlideTransition>,
    /// Chart models referenced by chart frames
    pub(crate) charts: Vec<Chart>,
}

impl MutableSlide {
    pub(crate) fn new(slide_id: u32) -> Self {
        Self {
            slide_id,
            shapes: Vec::new(),
            background: SlideBackground::None,
            transition: None,
            charts: Vec::new(),
        }
    }

    /// Get the slide ID.
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    pub fn set_background(&mut self, background: SlideBackground) {
        self.background = background;
    }

    pub fn background(&self) -> &SlideBackground {
        &self.background
    }

    pub fn set_transition(&mut self, transition: SlideTransition) {
        self.transition = Some(transition);
    }

    pub fn transition(&self) -> Option<&SlideTransition> {
        self.transition.as_ref()
    }

    // IDs: 1=group, 2 reserved, 3+=shapes
    fn next_shape_id(&self) -> u32 {
        (self.shapes.len() + 3) as u32
    }

    /// Add a preset-geometry shape and return it for further styling.
    pub fn add_auto_shape(&mut self, geometry: Geometry, frame: Frame) -> &mut MutableShape {
        let shape = MutableShape::new_auto_shape(self.next_shape_id(), geometry, frame);
        self.push(shape)
    }

    /// Add a text box with no fill and no outline.
    pub fn add_text_box(&mut self, frame: Frame, text: TextBody) -> &mut MutableShape {
        let shape = MutableShape::new_text_box(self.next_shape_id(), frame, text);
        self.push(shape)
    }

    /// Add a straight connector spanning the frame diagonal.
    pub fn add_connector(&mut self, frame: Frame, line: Outline) -> &mut MutableShape {
        let shape = MutableShape::new_connector(self.next_shape_id(), frame, line);
        self.push(shape)
    }

    /// Add a chart; the chart part is emitted when the package is built.
    pub fn add_chart(&mut self, frame: Frame, chart: Chart) -> &mut MutableShape {
        let chart_idx = self.charts.len();
        self.charts.push(chart);
        let shape = MutableShape::new_chart(self.next_shape_id(), frame, chart_idx);
        self.push(shape)
    }

    pub fn add_table(&mut self, frame: Frame, table: TableModel) -> &mut MutableShape {
        let shape = MutableShape::new_table(self.next_shape_id(), frame, table);
        self.push(shape)
    }

    fn push(&mut self, shape: MutableShape) -> &mut MutableShape {
        self.shapes.push(shape);
        let last = self.shapes.len() - 1;
        &mut self.shapes[last]
    }

    /// Drop every shape, chart, background and transition.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.charts.clear();
        self.background = SlideBackground::None;
        self.transition = None;
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn shapes(&self) -> &[MutableShape] {
        &self.shapes
    }

    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }

    /// Generate slide XML content with relationship IDs from the mapper.
    pub(crate) fn to_xml_with_rels(
        &self,
        slide_index: usize,
        rel_mapper: &RelationshipMapper,
    ) -> Result<String> {
        let mut xml = String::with_capacity(4096 + self.shapes.len() * 512);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
        );
        xml.push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        xml.push_str("<p:cSld>");

        // Background must come before spTree
        self.background.write_xml(&mut xml)?;

        xml.push_str("<p:spTree>");
        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr>");
        xml.push_str("<a:xfrm>");
        xml.push_str(r#"<a:off x="0" y="0"/>"#);
        xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
        xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
        xml.push_str("</a:xfrm>");
        xml.push_str("</p:grpSpPr>");

        for shape in &self.shapes {
            let chart_rel_id = match &shape.shape_type {
                ShapeType::Chart { chart_idx, .. } => {
                    rel_mapper.get_chart_id(slide_index, *chart_idx)
                },
                _ => None,
            };
            shape.to_xml(&mut xml, chart_rel_id)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");

        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);

        if let Some(ref transition) = self.transition {
            transition.write_xml(&mut xml)?;
        }

        xml.push_str("</p:sld>");

        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::ooxml::charts::ChartKind;
    use crate::ooxml::pptx::format::Fill;
    use crate::ooxml::pptx::transitions::TransitionType;

    #[test]
    fn test_shape_ids_start_at_three() {
        let mut slide = MutableSlide::new(256);
        let a = slide
            .add_auto_shape(Geometry::Ellipse, Frame::new(0, 0, 10, 10))
            .shape_id();
        let b = slide
            .add_connector(Frame::new(0, 0, 10, 0), Outline::new(RGBColor::BLACK, 12_700))
            .shape_id();
        assert_eq!((a, b), (3, 4));
    }

    #[test]
    fn test_element_order() {
        let mut slide = MutableSlide::new(256);
        slide.set_background(SlideBackground::solid(RGBColor::WHITE));
        slide
            .add_auto_shape(Geometry::Rect, Frame::new(0, 0, 10, 10))
            .fill(Fill::solid(RGBColor::BLACK));
        slide.set_transition(SlideTransition::new(TransitionType::Fade));

        let xml = slide
            .to_xml_with_rels(0, &RelationshipMapper::new())
            .unwrap();
        let bg = xml.find("<p:bg>").unwrap();
        let tree = xml.find("<p:spTree>").unwrap();
        let map = xml.find("<p:clrMapOvr>").unwrap();
        let transition = xml.find("<p:transition").unwrap();
        assert!(bg < tree && tree < map && map < transition);
    }

    #[test]
    fn test_chart_frame_uses_mapped_id() {
        let mut slide = MutableSlide::new(256);
        slide.add_chart(Frame::new(0, 0, 10, 10), Chart::new(ChartKind::Pie));
        let mut mapper = RelationshipMapper::new();
        mapper.add_chart(2, 0, "rId7".to_string());
        let xml = slide.to_xml_with_rels(2, &mapper).unwrap();
        assert!(xml.contains(r#"r:id="rId7""#));
        assert!(slide.to_xml_with_rels(0, &mapper).is_err());
    }

    #[test]
    fn test_clear() {
        let mut slide = MutableSlide::new(256);
        slide.add_chart(Frame::new(0, 0, 10, 10), Chart::new(ChartKind::Bar));
        slide.set_background(SlideBackground::solid(RGBColor::BLACK));
        slide.clear();
        assert_eq!(slide.shape_count(), 0);
        assert!(slide.charts().is_empty());
        assert_eq!(slide.background(), &SlideBackground::None);
    }
}
