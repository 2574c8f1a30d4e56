//! Assembly of a [`MutablePresentation`] into an OPC package.
//!
//! Relationships are created first and their IDs collected, then the XML of
//! each owning part is generated with those IDs.

use crate::ooxml::charts::writer::write_chart;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::{OpcPackage, PackURI, PackageWriter, Part, Relationships};
use crate::ooxml::pptx::template;
use tracing::debug;

use super::pres::MutablePresentation;
use super::relmap::RelationshipMapper;

fn uri(s: impl Into<String>) -> Result<PackURI> {
    PackURI::new(s).map_err(|e| OoxmlError::Opc(OpcError::InvalidPackUri(e)))
}

impl MutablePresentation {
    /// Build the in-memory OPC package for this presentation.
    pub fn to_package(&self) -> Result<OpcPackage> {
        let mut package = OpcPackage::new();
        let mut pres_rels = Relationships::new();
        let mut rel_mapper = RelationshipMapper::new();

        // rId1 is the master, as presentation.xml expects
        pres_rels.get_or_add(rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml");

        let mut slide_rel_ids = Vec::with_capacity(self.slides.len());
        let mut slide_parts = Vec::with_capacity(self.slides.len());
        let mut chart_number = 0usize;

        for (slide_index, slide) in self.slides.iter().enumerate() {
            let slide_no = slide_index + 1;
            slide_rel_ids.push(
                pres_rels.get_or_add(rt::SLIDE, &format!("slides/slide{}.xml", slide_no)),
            );

            let mut slide_rels = Relationships::new();
            slide_rels.get_or_add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");

            for (chart_index, chart) in slide.charts.iter().enumerate() {
                chart_number += 1;
                let rid = slide_rels
                    .get_or_add(rt::CHART, &format!("../charts/chart{}.xml", chart_number));
                rel_mapper.add_chart(slide_index, chart_index, rid);

                let mut blob = Vec::with_capacity(4096);
                write_chart(&mut blob, chart)?;
                package.add_part(Part::new(
                    uri(format!("/ppt/charts/chart{}.xml", chart_number))?,
                    ct::DML_CHART,
                    blob,
                ))?;
            }

            slide_parts.push((slide_no, slide_rels));
        }

        for ((slide_no, slide_rels), (slide_index, slide)) in
            slide_parts.into_iter().zip(self.slides.iter().enumerate())
        {
            let xml = slide.to_xml_with_rels(slide_index, &rel_mapper)?;
            package.add_part(
                Part::xml(
                    uri(format!("/ppt/slides/slide{}.xml", slide_no))?,
                    ct::PML_SLIDE,
                    xml,
                )
                .with_rels(slide_rels),
            )?;
        }

        pres_rels.get_or_add(rt::PRES_PROPS, "presProps.xml");
        pres_rels.get_or_add(rt::VIEW_PROPS, "viewProps.xml");
        pres_rels.get_or_add(rt::THEME, "theme/theme1.xml");
        pres_rels.get_or_add(rt::TABLE_STYLES, "tableStyles.xml");

        let pres_uri = uri("/ppt/presentation.xml")?;
        let pres_xml = self.generate_presentation_xml_with_rels(&slide_rel_ids)?;
        package.add_part(
            Part::xml(pres_uri.clone(), ct::PML_PRESENTATION_MAIN, pres_xml).with_rels(pres_rels),
        )?;

        let mut master_rels = Relationships::new();
        master_rels.get_or_add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
        master_rels.get_or_add(rt::THEME, "../theme/theme1.xml");
        package.add_part(
            Part::xml(
                uri("/ppt/slideMasters/slideMaster1.xml")?,
                ct::PML_SLIDE_MASTER,
                template::slide_master_xml(),
            )
            .with_rels(master_rels),
        )?;

        let mut layout_rels = Relationships::new();
        layout_rels.get_or_add(rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
        package.add_part(
            Part::xml(
                uri("/ppt/slideLayouts/slideLayout1.xml")?,
                ct::PML_SLIDE_LAYOUT,
                template::blank_layout_xml(),
            )
            .with_rels(layout_rels),
        )?;

        package.add_part(Part::xml(
            uri("/ppt/theme/theme1.xml")?,
            ct::OFC_THEME,
            self.theme.to_xml()?,
        ))?;
        package.add_part(Part::xml(
            uri("/ppt/presProps.xml")?,
            ct::PML_PRES_PROPS,
            template::pres_props_xml(),
        ))?;
        package.add_part(Part::xml(
            uri("/ppt/viewProps.xml")?,
            ct::PML_VIEW_PROPS,
            template::view_props_xml(),
        ))?;
        package.add_part(Part::xml(
            uri("/ppt/tableStyles.xml")?,
            ct::PML_TABLE_STYLES,
            template::table_styles_xml(),
        ))?;

        let core_uri = uri("/docProps/core.xml")?;
        package.add_part(Part::xml(
            core_uri.clone(),
            ct::OPC_CORE_PROPERTIES,
            self.properties.to_core_xml(),
        ))?;
        let app_uri = uri("/docProps/app.xml")?;
        package.add_part(Part::xml(
            app_uri.clone(),
            ct::OFC_EXTENDED_PROPERTIES,
            self.properties.to_app_xml(self.slides.len()),
        ))?;

        package.relate_to(&pres_uri, rt::OFFICE_DOCUMENT);
        package.relate_to(&core_uri, rt::CORE_PROPERTIES);
        package.relate_to(&app_uri, rt::EXTENDED_PROPERTIES);

        debug!(
            slides = self.slides.len(),
            charts = chart_number,
            parts = package.part_count(),
            "assembled presentation package"
        );

        Ok(package)
    }

    /// Serialize the presentation to `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let package = self.to_package()?;
        Ok(PackageWriter::to_bytes(&package)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::ooxml::charts::{Chart, ChartKind, ChartSeries};
    use crate::ooxml::pptx::format::Frame;
    use std::io::{Cursor, Read};

    fn sample() -> MutablePresentation {
        let mut pres = MutablePresentation::new();
        pres.add_slide();
        let slide = pres.add_slide();
        let chart = Chart::new(ChartKind::Pie).add_series(ChartSeries::new(
            "S",
            vec![1.0, 2.0],
            RGBColor::BLACK,
        ));
        slide.add_chart(Frame::new(0, 0, 100, 100), chart.clone());
        slide.add_chart(Frame::new(0, 0, 100, 100), chart);
        pres
    }

    #[test]
    fn test_package_parts() {
        let package = sample().to_package().unwrap();
        let names: Vec<&str> = package.iter_parts().map(|p| p.partname().as_str()).collect();
        for expected in [
            "/ppt/presentation.xml",
            "/ppt/slides/slide1.xml",
            "/ppt/slides/slide2.xml",
            "/ppt/charts/chart1.xml",
            "/ppt/charts/chart2.xml",
            "/ppt/slideMasters/slideMaster1.xml",
            "/ppt/slideLayouts/slideLayout1.xml",
            "/ppt/theme/theme1.xml",
            "/docProps/core.xml",
            "/docProps/app.xml",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
        assert_eq!(package.rels().len(), 3);
    }

    #[test]
    fn test_bytes_are_a_zip() {
        let bytes = sample().to_bytes().unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut slide = String::new();
        archive
            .by_name("ppt/slides/slide2.xml")
            .unwrap()
            .read_to_string(&mut slide)
            .unwrap();
        assert!(slide.contains(r#"r:id="rId2""#));
        assert!(slide.contains(r#"r:id="rId3""#));
        let mut rels = String::new();
        archive
            .by_name("ppt/slides/_rels/slide2.xml.rels")
            .unwrap()
            .read_to_string(&mut rels)
            .unwrap();
        assert!(rels.contains("../charts/chart2.xml"));
    }

    #[test]
    fn test_output_is_reproducible() {
        assert_eq!(sample().to_bytes().unwrap(), sample().to_bytes().unwrap());
    }
}
