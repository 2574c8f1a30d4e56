//! Document properties stored in `docProps/core.xml` and `docProps/app.xml`.

use crate::common::xml::escape_xml;
use chrono::{DateTime, SecondsFormat, Utc};

/// Document core properties (metadata).
#[derive(Debug, Clone)]
pub struct DocumentProperties {
    pub title: Option<String>,
    pub subject: Option<String>,
    /// Document creator/author
    pub creator: Option<String>,
    /// Creation date, also written as the modification date
    pub created: DateTime<Utc>,
}

impl Default for DocumentProperties {
    fn default() -> Self {
        Self {
            title: None,
            subject: None,
            creator: None,
            created: DateTime::UNIX_EPOCH,
        }
    }
}

impl DocumentProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the `cp:coreProperties` part.
    pub fn to_core_xml(&self) -> String {
        let mut xml = String::with_capacity(1024);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);

        if let Some(ref title) = self.title {
            xml.push_str("<dc:title>");
            xml.push_str(&escape_xml(title));
            xml.push_str("</dc:title>");
        }

        if let Some(ref subject) = self.subject {
            xml.push_str("<dc:subject>");
            xml.push_str(&escape_xml(subject));
            xml.push_str("</dc:subject>");
        }

        if let Some(ref creator) = self.creator {
            xml.push_str("<dc:creator>");
            xml.push_str(&escape_xml(creator));
            xml.push_str("</dc:creator>");
            xml.push_str("<cp:lastModifiedBy>");
            xml.push_str(&escape_xml(creator));
            xml.push_str("</cp:lastModifiedBy>");
        }

        let stamp = self.created.to_rfc3339_opts(SecondsFormat::Secs, true);
        xml.push_str(r#"<dcterms:created xsi:type="dcterms:W3CDTF">"#);
        xml.push_str(&stamp);
        xml.push_str("</dcterms:created>");
        xml.push_str(r#"<dcterms:modified xsi:type="dcterms:W3CDTF">"#);
        xml.push_str(&stamp);
        xml.push_str("</dcterms:modified>");

        xml.push_str("</cp:coreProperties>");
        xml
    }

    /// Generate the extended (`app.xml`) properties part.
    pub fn to_app_xml(&self, slide_count: usize) -> String {
        let mut xml = String::with_capacity(512);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#);
        xml.push_str("<Application>");
        xml.push_str(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        xml.push_str("</Application>");
        xml.push_str("<PresentationFormat>On-screen Show (16:9)</PresentationFormat>");
        xml.push_str("<Slides>");
        xml.push_str(itoa::Buffer::new().format(slide_count));
        xml.push_str("</Slides>");
        xml.push_str("</Properties>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_core_xml() {
        let props = DocumentProperties {
            title: Some("Q3 <Review>".to_string()),
            subject: None,
            creator: Some("deckwright".to_string()),
            created: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };
        let xml = props.to_core_xml();
        assert!(xml.contains("<dc:title>Q3 &lt;Review&gt;</dc:title>"));
        assert!(!xml.contains("<dc:subject>"));
        assert!(xml.contains(">2024-05-01T12:00:00Z</dcterms:created>"));
    }

    #[test]
    fn test_app_xml_counts_slides() {
        let xml = DocumentProperties::new().to_app_xml(7);
        assert!(xml.contains("<Slides>7</Slides>"));
    }
}
