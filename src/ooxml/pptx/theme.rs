/// Theme part (`ppt/theme/theme1.xml`) for generated presentations.
///
/// The colour scheme and font pair come from the resolved deck theme, so that
/// applications which recolour by scheme slot pick up the deck's palette.
use crate::common::RGBColor;
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// Theme definition written into the package.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDefinition {
    pub name: String,
    /// Major font (headings)
    pub major_font: String,
    /// Minor font (body text)
    pub minor_font: String,
    pub colors: ColorScheme,
}

/// The twelve scheme colours.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    pub dk1: RGBColor,
    pub lt1: RGBColor,
    pub dk2: RGBColor,
    pub lt2: RGBColor,
    pub accents: [RGBColor; 6],
    pub hlink: RGBColor,
    pub fol_hlink: RGBColor,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            dk1: RGBColor::BLACK,
            lt1: RGBColor::WHITE,
            dk2: RGBColor::new(0x44, 0x54, 0x6A),
            lt2: RGBColor::new(0xE7, 0xE6, 0xE6),
            accents: [
                RGBColor::new(0x44, 0x72, 0xC4),
                RGBColor::new(0xED, 0x7D, 0x31),
                RGBColor::new(0xA5, 0xA5, 0xA5),
                RGBColor::new(0xFF, 0xC0, 0x00),
                RGBColor::new(0x5B, 0x9B, 0xD5),
                RGBColor::new(0x70, 0xAD, 0x47),
            ],
            hlink: RGBColor::new(0x05, 0x63, 0xC1),
            fol_hlink: RGBColor::new(0x95, 0x4F, 0x72),
        }
    }
}

impl Default for ThemeDefinition {
    fn default() -> Self {
        Self {
            name: "Office Theme".to_string(),
            major_font: "Calibri Light".to_string(),
            minor_font: "Calibri".to_string(),
            colors: ColorScheme::default(),
        }
    }
}

impl ColorScheme {
    fn write_xml(&self, xml: &mut String, name: &str) -> Result<()> {
        write!(xml, r#"<a:clrScheme name="{}">"#, escape_xml(name))?;

        for (tag, color) in [
            ("dk1", self.dk1),
            ("lt1", self.lt1),
            ("dk2", self.dk2),
            ("lt2", self.lt2),
        ] {
            write!(xml, r#"<a:{0}><a:srgbClr val="{1}"/></a:{0}>"#, tag, color.to_hex())?;
        }

        for (i, accent) in self.accents.iter().enumerate() {
            write!(
                xml,
                r#"<a:accent{0}><a:srgbClr val="{1}"/></a:accent{0}>"#,
                i + 1,
                accent.to_hex()
            )?;
        }

        write!(xml, r#"<a:hlink><a:srgbClr val="{}"/></a:hlink>"#, self.hlink.to_hex())?;
        write!(
            xml,
            r#"<a:folHlink><a:srgbClr val="{}"/></a:folHlink>"#,
            self.fol_hlink.to_hex()
        )?;

        xml.push_str("</a:clrScheme>");
        Ok(())
    }
}

impl ThemeDefinition {
    /// Generate theme1.xml content.
    pub(crate) fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        write!(xml, r#"name="{}">"#, escape_xml(&self.name))?;

        xml.push_str("<a:themeElements>");
        self.colors.write_xml(&mut xml, &self.name)?;

        write!(xml, r#"<a:fontScheme name="{}">"#, escape_xml(&self.name))?;
        for (tag, font) in [("majorFont", &self.major_font), ("minorFont", &self.minor_font)] {
            write!(
                xml,
                r#"<a:{0}><a:latin typeface="{1}"/><a:ea typeface=""/><a:cs typeface=""/></a:{0}>"#,
                tag,
                escape_xml(font)
            )?;
        }
        xml.push_str("</a:fontScheme>");

        // Format scheme: every list needs three entries
        write!(xml, r#"<a:fmtScheme name="{}">"#, escape_xml(&self.name))?;
        xml.push_str("<a:fillStyleLst>");
        for _ in 0..3 {
            xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
        }
        xml.push_str("</a:fillStyleLst>");
        xml.push_str("<a:lnStyleLst>");
        for width in [6350, 12700, 19050] {
            write!(
                xml,
                r#"<a:ln w="{}" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln>"#,
                width
            )?;
        }
        xml.push_str("</a:lnStyleLst>");
        xml.push_str("<a:effectStyleLst>");
        for _ in 0..3 {
            xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
        }
        xml.push_str("</a:effectStyleLst>");
        xml.push_str("<a:bgFillStyleLst>");
        for _ in 0..3 {
            xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
        }
        xml.push_str("</a:bgFillStyleLst>");
        xml.push_str("</a:fmtScheme>");

        xml.push_str("</a:themeElements>");
        xml.push_str("<a:objectDefaults/>");
        xml.push_str("<a:extraClrSchemeLst/>");
        xml.push_str("</a:theme>");

        Ok(xml)
    }
}
