//! Slide backgrounds.

use crate::common::RGBColor;
use crate::ooxml::error::Result;
use crate::ooxml::pptx::format::{Fill, GradientStop};

/// Slide background, written as `p:bg` ahead of the shape tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SlideBackground {
    /// Inherit the master background
    #[default]
    None,
    Solid { color: RGBColor },
    /// Linear gradient, angle in degrees
    Gradient { angle: f64, stops: Vec<GradientStop> },
}

impl SlideBackground {
    pub fn solid(color: RGBColor) -> Self {
        SlideBackground::Solid { color }
    }

    /// The colour text is drawn against. Gradients report their first stop.
    pub fn base_color(&self) -> Option<RGBColor> {
        match self {
            SlideBackground::None => None,
            SlideBackground::Solid { color } => Some(*color),
            SlideBackground::Gradient { stops, .. } => stops.first().map(|s| s.color.color),
        }
    }

    pub(crate) fn write_xml(&self, xml: &mut String) -> Result<()> {
        let fill = match self {
            SlideBackground::None => return Ok(()),
            SlideBackground::Solid { color } => Fill::solid(*color),
            SlideBackground::Gradient { angle, stops } => Fill::Gradient {
                angle: *angle,
                stops: stops.clone(),
            },
        };

        xml.push_str("<p:bg><p:bgPr>");
        fill.write_xml(xml)?;
        xml.push_str("<a:effectLst/>");
        xml.push_str("</p:bgPr></p:bg>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::format::ColorValue;

    #[test]
    fn test_solid_background() {
        let mut xml = String::new();
        SlideBackground::solid(RGBColor::new(0x03, 0x0F, 0x26))
            .write_xml(&mut xml)
            .unwrap();
        assert!(xml.starts_with("<p:bg><p:bgPr><a:solidFill>"));
        assert!(xml.contains(r#"val="030F26""#));
        assert!(xml.ends_with("<a:effectLst/></p:bgPr></p:bg>"));
    }

    #[test]
    fn test_gradient_base_color() {
        let bg = SlideBackground::Gradient {
            angle: 90.0,
            stops: vec![
                GradientStop {
                    position: 0.0,
                    color: ColorValue::opaque(RGBColor::BLACK),
                },
                GradientStop {
                    position: 1.0,
                    color: ColorValue::opaque(RGBColor::WHITE),
                },
            ],
        };
        assert_eq!(bg.base_color(), Some(RGBColor::BLACK));
        let mut xml = String::new();
        bg.write_xml(&mut xml).unwrap();
        assert_eq!(xml.matches("<a:gs ").count(), 2);
    }

    #[test]
    fn test_none_writes_nothing() {
        let mut xml = String::new();
        SlideBackground::None.write_xml(&mut xml).unwrap();
        assert!(xml.is_empty());
    }
}
