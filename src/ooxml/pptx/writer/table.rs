//! Table model for `a:tbl` graphic frames.

use crate::common::RGBColor;
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use crate::ooxml::pptx::format::{TextAlign, TextFormat};
use std::fmt::Write as FmtWrite;

/// A table cell with its own text format and fill.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
    pub text: String,
    pub format: TextFormat,
    pub fill: Option<RGBColor>,
    pub align: TextAlign,
}

/// A table with explicit column widths (EMU) and a uniform row height.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableModel {
    pub rows: Vec<Vec<TableCell>>,
    pub col_widths: Vec<i64>,
    pub row_height: i64,
    /// Cell border color and width (EMU)
    pub border: Option<(RGBColor, i64)>,
    pub first_row_header: bool,
}

impl TableModel {
    pub fn column_count(&self) -> usize {
        self.col_widths.len()
    }

    pub(crate) fn write_xml(&self, xml: &mut String) -> Result<()> {
        write!(
            xml,
            r#"<a:tbl><a:tblPr firstRow="{}" bandRow="1"/>"#,
            if self.first_row_header { "1" } else { "0" }
        )?;

        xml.push_str("<a:tblGrid>");
        for width in &self.col_widths {
            write!(xml, r#"<a:gridCol w="{}"/>"#, width)?;
        }
        xml.push_str("</a:tblGrid>");

        let columns = self.column_count();
        let empty = TableCell::default();
        for row in &self.rows {
            write!(xml, r#"<a:tr h="{}">"#, self.row_height)?;
            // Ragged rows are padded so every row spans the grid
            for col in 0..columns {
                let cell = row.get(col).unwrap_or(&empty);
                self.write_cell(xml, cell)?;
            }
            xml.push_str("</a:tr>");
        }

        xml.push_str("</a:tbl>");
        Ok(())
    }

    fn write_cell(&self, xml: &mut String, cell: &TableCell) -> Result<()> {
        xml.push_str("<a:tc><a:txBody><a:bodyPr/><a:lstStyle/><a:p>");
        write!(xml, r#"<a:pPr algn="{}"/>"#, cell.align.xml_value())?;
        if !cell.text.is_empty() {
            xml.push_str("<a:r>");
            cell.format.write_run_properties(xml, "rPr")?;
            write!(xml, "<a:t>{}</a:t>", escape_xml(&cell.text))?;
            xml.push_str("</a:r>");
        }
        cell.format.write_run_properties(xml, "endParaRPr")?;
        xml.push_str("</a:p></a:txBody>");

        xml.push_str(r#"<a:tcPr marL="91440" marR="91440" marT="45720" marB="45720" anchor="ctr">"#);
        if let Some((color, width)) = self.border {
            for side in ["lnL", "lnR", "lnT", "lnB"] {
                write!(
                    xml,
                    r#"<a:{} w="{}"><a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:{}>"#,
                    side,
                    width,
                    color.to_hex(),
                    side
                )?;
            }
        }
        match cell.fill {
            Some(color) => write!(
                xml,
                r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                color.to_hex()
            )?,
            None => xml.push_str("<a:noFill/>"),
        }
        xml.push_str("</a:tcPr></a:tc>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows_are_padded() {
        let table = TableModel {
            rows: vec![
                vec![
                    TableCell {
                        text: "A".into(),
                        ..Default::default()
                    },
                    TableCell {
                        text: "B".into(),
                        ..Default::default()
                    },
                ],
                vec![TableCell {
                    text: "only".into(),
                    ..Default::default()
                }],
            ],
            col_widths: vec![100, 100],
            row_height: 50,
            border: Some((RGBColor::BLACK, 6350)),
            first_row_header: true,
        };
        let mut xml = String::new();
        table.write_xml(&mut xml).unwrap();
        assert_eq!(xml.matches("<a:tc>").count(), 4);
        assert_eq!(xml.matches("<a:gridCol").count(), 2);
        assert!(xml.contains(r#"firstRow="1""#));
    }
}
