//! Chart XML writer.
//!
//! Produces the `c:chartSpace` part for a [`Chart`]. Elements are written in the
//! order the DrawingML chart schema requires.

use crate::common::RGBColor;
use crate::common::xml::escape_xml;
use crate::ooxml::charts::models::{Chart, ChartSeries, DataLabels};
use crate::ooxml::charts::types::{AxisPosition, ChartKind};
use crate::ooxml::opc::constants::namespace;
use std::io::Write;

const CAT_AX_ID: u32 = 111_111_111;
const VAL_AX_ID: u32 = 222_222_222;

/// Write a chart to XML.
pub fn write_chart<W: Write>(writer: &mut W, chart: &Chart) -> std::io::Result<()> {
    write!(
        writer,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#
    )?;
    write!(
        writer,
        r#"<c:chartSpace xmlns:c="{}" xmlns:a="{}" xmlns:r="{}">"#,
        namespace::DML_CHART,
        namespace::DML_MAIN,
        namespace::OFC_RELATIONSHIPS
    )?;
    write!(writer, r#"<c:date1904 val="0"/>"#)?;
    write!(writer, r#"<c:lang val="en-US"/>"#)?;
    write!(writer, r#"<c:roundedCorners val="0"/>"#)?;

    write!(writer, "<c:chart>")?;
    if let Some(ref title) = chart.title {
        write_title(writer, title, chart)?;
        write!(writer, r#"<c:autoTitleDeleted val="0"/>"#)?;
    } else {
        write!(writer, r#"<c:autoTitleDeleted val="1"/>"#)?;
    }

    write_plot_area(writer, chart)?;

    if let Some(position) = chart.legend {
        write!(writer, "<c:legend>")?;
        write!(writer, r#"<c:legendPos val="{}"/>"#, position.xml_value())?;
        write!(writer, r#"<c:overlay val="0"/>"#)?;
        write!(writer, "</c:legend>")?;
    }

    write!(writer, r#"<c:plotVisOnly val="1"/>"#)?;
    write!(writer, r#"<c:dispBlanksAs val="gap"/>"#)?;
    write!(writer, "</c:chart>")?;

    // Transparent chart area so the slide background shows through
    write!(
        writer,
        "<c:spPr><a:noFill/><a:ln><a:noFill/></a:ln></c:spPr>"
    )?;
    write_text_properties(writer, chart)?;

    write!(writer, "</c:chartSpace>")?;

    Ok(())
}

fn write_title<W: Write>(writer: &mut W, title: &str, chart: &Chart) -> std::io::Result<()> {
    write!(writer, "<c:title>")?;
    write!(writer, "<c:tx><c:rich>")?;
    write!(writer, "<a:bodyPr/><a:lstStyle/>")?;
    write!(writer, "<a:p><a:pPr><a:defRPr b=\"1\"/></a:pPr>")?;
    write!(writer, r#"<a:r><a:rPr lang="en-US" b="1">"#)?;
    write_solid_fill(writer, chart.text_color)?;
    write!(
        writer,
        r#"</a:rPr><a:t>{}</a:t></a:r>"#,
        escape_xml(title)
    )?;
    write!(writer, "</a:p></c:rich></c:tx>")?;
    write!(writer, r#"<c:overlay val="0"/>"#)?;
    write!(writer, "</c:title>")?;
    Ok(())
}

fn write_plot_area<W: Write>(writer: &mut W, chart: &Chart) -> std::io::Result<()> {
    write!(writer, "<c:plotArea>")?;
    write!(writer, "<c:layout/>")?;

    match chart.kind {
        ChartKind::Bar | ChartKind::Column => write_bar_chart(writer, chart)?,
        ChartKind::Line => write_line_chart(writer, chart)?,
        ChartKind::Pie => write_pie_chart(writer, chart, false)?,
        ChartKind::Doughnut => write_pie_chart(writer, chart, true)?,
        ChartKind::Scatter => write_scatter_chart(writer, chart)?,
        ChartKind::Area => write_area_chart(writer, chart)?,
    }

    if chart.kind.has_axes() {
        write_axes(writer, chart)?;
    }

    write!(writer, "</c:plotArea>")?;
    Ok(())
}

fn write_bar_chart<W: Write>(writer: &mut W, chart: &Chart) -> std::io::Result<()> {
    let direction = if chart.kind == ChartKind::Bar {
        "bar"
    } else {
        "col"
    };
    write!(writer, "<c:barChart>")?;
    write!(writer, r#"<c:barDir val="{}"/>"#, direction)?;
    write!(writer, r#"<c:grouping val="clustered"/>"#)?;
    write!(writer, r#"<c:varyColors val="0"/>"#)?;

    for (idx, series) in chart.series.iter().enumerate() {
        write_series_head(writer, idx, series)?;
        write_fill_properties(writer, series.color)?;
        write!(writer, r#"<c:invertIfNegative val="0"/>"#)?;
        write_categories(writer, &chart.categories)?;
        write_numbers(writer, "c:val", &series.values)?;
        write!(writer, "</c:ser>")?;
    }

    write_data_labels(writer, chart.data_labels)?;
    write!(writer, r#"<c:gapWidth val="80"/>"#)?;
    write_axis_ids(writer)?;
    write!(writer, "</c:barChart>")?;
    Ok(())
}

fn write_line_chart<W: Write>(writer: &mut W, chart: &Chart) -> std::io::Result<()> {
    write!(writer, "<c:lineChart>")?;
    write!(writer, r#"<c:grouping val="standard"/>"#)?;
    write!(writer, r#"<c:varyColors val="0"/>"#)?;

    for (idx, series) in chart.series.iter().enumerate() {
        write_series_head(writer, idx, series)?;
        write_stroke_properties(writer, series.color)?;
        write_marker(writer, series.color)?;
        write_categories(writer, &chart.categories)?;
        write_numbers(writer, "c:val", &series.values)?;
        write!(writer, r#"<c:smooth val="0"/>"#)?;
        write!(writer, "</c:ser>")?;
    }

    write_data_labels(writer, chart.data_labels)?;
    write!(writer, r#"<c:marker val="1"/>"#)?;
    write_axis_ids(writer)?;
    write!(writer, "</c:lineChart>")?;
    Ok(())
}

fn write_area_chart<W: Write>(writer: &mut W, chart: &Chart) -> std::io::Result<()> {
    write!(writer, "<c:areaChart>")?;
    write!(writer, r#"<c:grouping val="standard"/>"#)?;
    write!(writer, r#"<c:varyColors val="0"/>"#)?;

    for (idx, series) in chart.series.iter().enumerate() {
        write_series_head(writer, idx, series)?;
        write_fill_properties(writer, series.color)?;
        write_categories(writer, &chart.categories)?;
        write_numbers(writer, "c:val", &series.values)?;
        write!(writer, "</c:ser>")?;
    }

    write_data_labels(writer, chart.data_labels)?;
    write_axis_ids(writer)?;
    write!(writer, "</c:areaChart>")?;
    Ok(())
}

fn write_pie_chart<W: Write>(writer: &mut W, chart: &Chart, doughnut: bool) -> std::io::Result<()> {
    let element = chart.kind.xml_element_name();
    write!(writer, "<c:{}>", element)?;
    write!(writer, r#"<c:varyColors val="1"/>"#)?;

    for (idx, series) in chart.series.iter().enumerate() {
        write_series_head(writer, idx, series)?;
        write_fill_properties(writer, series.color)?;
        if !chart.point_colors.is_empty() {
            for point in 0..series.values.len() {
                let color = chart.point_colors[point % chart.point_colors.len()];
                write!(writer, "<c:dPt>")?;
                write!(writer, r#"<c:idx val="{}"/>"#, point)?;
                write!(writer, r#"<c:bubble3D val="0"/>"#)?;
                write!(writer, "<c:spPr>")?;
                write_solid_fill(writer, color)?;
                write!(
                    writer,
                    r#"<a:ln w="19050"><a:solidFill><a:srgbClr val="FFFFFF"/></a:solidFill></a:ln>"#
                )?;
                write!(writer, "</c:spPr>")?;
                write!(writer, "</c:dPt>")?;
            }
        }
        write_categories(writer, &chart.categories)?;
        write_numbers(writer, "c:val", &series.values)?;
        write!(writer, "</c:ser>")?;
    }

    write_data_labels(writer, chart.data_labels)?;
    write!(writer, r#"<c:firstSliceAng val="0"/>"#)?;
    if doughnut {
        write!(
            writer,
            r#"<c:holeSize val="{}"/>"#,
            chart.hole_size.clamp(10, 90)
        )?;
    }
    write!(writer, "</c:{}>", element)?;
    Ok(())
}

fn write_scatter_chart<W: Write>(writer: &mut W, chart: &Chart) -> std::io::Result<()> {
    write!(writer, "<c:scatterChart>")?;
    write!(writer, r#"<c:scatterStyle val="lineMarker"/>"#)?;
    write!(writer, r#"<c:varyColors val="0"/>"#)?;

    let x_values = scatter_x_values(&chart.categories, chart.point_count());
    for (idx, series) in chart.series.iter().enumerate() {
        write_series_head(writer, idx, series)?;
        // Markers only
        write!(writer, "<c:spPr><a:ln w=\"28575\"><a:noFill/></a:ln></c:spPr>")?;
        write_marker(writer, series.color)?;
        write_numbers(writer, "c:xVal", &x_values[..series.values.len()])?;
        write_numbers(writer, "c:yVal", &series.values)?;
        write!(writer, r#"<c:smooth val="0"/>"#)?;
        write!(writer, "</c:ser>")?;
    }

    write_data_labels(writer, chart.data_labels)?;
    write_axis_ids(writer)?;
    write!(writer, "</c:scatterChart>")?;
    Ok(())
}

/// X coordinates for scatter series: numeric category labels are used as-is,
/// anything else falls back to the 1-based point position.
fn scatter_x_values(categories: &[String], count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| {
            categories
                .get(i)
                .and_then(|label| label.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or((i + 1) as f64)
        })
        .collect()
}

fn write_series_head<W: Write>(
    writer: &mut W,
    idx: usize,
    series: &ChartSeries,
) -> std::io::Result<()> {
    write!(writer, "<c:ser>")?;
    write!(writer, r#"<c:idx val="{}"/>"#, idx)?;
    write!(writer, r#"<c:order val="{}"/>"#, idx)?;
    write!(
        writer,
        "<c:tx><c:v>{}</c:v></c:tx>",
        escape_xml(&series.name)
    )?;
    Ok(())
}

fn write_solid_fill<W: Write>(writer: &mut W, color: RGBColor) -> std::io::Result<()> {
    write!(
        writer,
        r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
        color.to_hex()
    )
}

fn write_fill_properties<W: Write>(writer: &mut W, color: RGBColor) -> std::io::Result<()> {
    write!(writer, "<c:spPr>")?;
    write_solid_fill(writer, color)?;
    write!(writer, "</c:spPr>")?;
    Ok(())
}

fn write_stroke_properties<W: Write>(writer: &mut W, color: RGBColor) -> std::io::Result<()> {
    write!(writer, r#"<c:spPr><a:ln w="28575" cap="rnd">"#)?;
    write_solid_fill(writer, color)?;
    write!(writer, "<a:round/></a:ln></c:spPr>")?;
    Ok(())
}

fn write_marker<W: Write>(writer: &mut W, color: RGBColor) -> std::io::Result<()> {
    write!(writer, "<c:marker>")?;
    write!(writer, r#"<c:symbol val="circle"/><c:size val="6"/>"#)?;
    write_fill_properties(writer, color)?;
    write!(writer, "</c:marker>")?;
    Ok(())
}

fn write_categories<W: Write>(writer: &mut W, categories: &[String]) -> std::io::Result<()> {
    if categories.is_empty() {
        return Ok(());
    }
    write!(writer, "<c:cat><c:strLit>")?;
    write!(writer, r#"<c:ptCount val="{}"/>"#, categories.len())?;
    for (i, val) in categories.iter().enumerate() {
        write!(
            writer,
            r#"<c:pt idx="{}"><c:v>{}</c:v></c:pt>"#,
            i,
            escape_xml(val)
        )?;
    }
    write!(writer, "</c:strLit></c:cat>")?;
    Ok(())
}

fn write_numbers<W: Write>(writer: &mut W, tag: &str, values: &[f64]) -> std::io::Result<()> {
    write!(writer, "<{}><c:numLit>", tag)?;
    write!(writer, "<c:formatCode>General</c:formatCode>")?;
    write!(writer, r#"<c:ptCount val="{}"/>"#, values.len())?;
    for (i, val) in values.iter().enumerate() {
        write!(writer, r#"<c:pt idx="{}"><c:v>"#, i)?;
        write_number(writer, *val)?;
        write!(writer, "</c:v></c:pt>")?;
    }
    write!(writer, "</c:numLit></{}>", tag)?;
    Ok(())
}

/// Integral values are written without a fractional part.
fn write_number<W: Write>(writer: &mut W, value: f64) -> std::io::Result<()> {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        let mut buf = itoa::Buffer::new();
        writer.write_all(buf.format(value as i64).as_bytes())
    } else {
        let mut buf = ryu::Buffer::new();
        writer.write_all(buf.format(value).as_bytes())
    }
}

fn write_data_labels<W: Write>(writer: &mut W, labels: DataLabels) -> std::io::Result<()> {
    let flag = |on: bool| if on { "1" } else { "0" };
    write!(writer, "<c:dLbls>")?;
    write!(writer, r#"<c:showLegendKey val="0"/>"#)?;
    write!(writer, r#"<c:showVal val="{}"/>"#, flag(labels.show_value))?;
    write!(writer, r#"<c:showCatName val="0"/>"#)?;
    write!(writer, r#"<c:showSerName val="0"/>"#)?;
    write!(writer, r#"<c:showPercent val="{}"/>"#, flag(labels.show_percent))?;
    write!(writer, r#"<c:showBubbleSize val="0"/>"#)?;
    if labels.any() {
        write!(writer, r#"<c:showLeaderLines val="1"/>"#)?;
    }
    write!(writer, "</c:dLbls>")?;
    Ok(())
}

fn write_axis_ids<W: Write>(writer: &mut W) -> std::io::Result<()> {
    write!(
        writer,
        r#"<c:axId val="{}"/><c:axId val="{}"/>"#,
        CAT_AX_ID, VAL_AX_ID
    )
}

fn write_axes<W: Write>(writer: &mut W, chart: &Chart) -> std::io::Result<()> {
    let (cat_pos, val_pos) = if chart.kind == ChartKind::Bar {
        (AxisPosition::Left, AxisPosition::Bottom)
    } else {
        (AxisPosition::Bottom, AxisPosition::Left)
    };

    if chart.kind == ChartKind::Scatter {
        write_value_axis(writer, chart, CAT_AX_ID, VAL_AX_ID, cat_pos, false)?;
    } else {
        write!(writer, "<c:catAx>")?;
        write_axis_common(writer, chart, CAT_AX_ID, VAL_AX_ID, cat_pos, false)?;
        write!(writer, r#"<c:auto val="1"/>"#)?;
        write!(writer, r#"<c:lblAlgn val="ctr"/>"#)?;
        write!(writer, r#"<c:lblOffset val="100"/>"#)?;
        write!(writer, r#"<c:noMultiLvlLbl val="0"/>"#)?;
        write!(writer, "</c:catAx>")?;
    }

    write_value_axis(writer, chart, VAL_AX_ID, CAT_AX_ID, val_pos, true)
}

fn write_value_axis<W: Write>(
    writer: &mut W,
    chart: &Chart,
    axis_id: u32,
    cross_axis_id: u32,
    position: AxisPosition,
    gridlines: bool,
) -> std::io::Result<()> {
    write!(writer, "<c:valAx>")?;
    write_axis_common(writer, chart, axis_id, cross_axis_id, position, gridlines)?;
    write!(writer, r#"<c:crossBetween val="between"/>"#)?;
    write!(writer, "</c:valAx>")?;
    Ok(())
}

fn write_axis_common<W: Write>(
    writer: &mut W,
    chart: &Chart,
    axis_id: u32,
    cross_axis_id: u32,
    position: AxisPosition,
    gridlines: bool,
) -> std::io::Result<()> {
    write!(writer, r#"<c:axId val="{}"/>"#, axis_id)?;
    write!(writer, r#"<c:scaling><c:orientation val="minMax"/></c:scaling>"#)?;
    write!(writer, r#"<c:delete val="0"/>"#)?;
    write!(writer, r#"<c:axPos val="{}"/>"#, position.xml_value())?;

    if gridlines && let Some(color) = chart.gridline_color {
        write!(writer, r#"<c:majorGridlines><c:spPr><a:ln w="6350">"#)?;
        write_solid_fill(writer, color)?;
        write!(writer, "</a:ln></c:spPr></c:majorGridlines>")?;
    }

    write!(writer, r#"<c:majorTickMark val="none"/>"#)?;
    write!(writer, r#"<c:minorTickMark val="none"/>"#)?;
    write!(writer, r#"<c:tickLblPos val="nextTo"/>"#)?;
    write!(writer, r#"<c:spPr><a:ln w="9525">"#)?;
    write_solid_fill(writer, chart.gridline_color.unwrap_or(chart.text_color))?;
    write!(writer, "</a:ln></c:spPr>")?;
    write!(writer, r#"<c:crossAx val="{}"/>"#, cross_axis_id)?;
    write!(writer, r#"<c:crosses val="autoZero"/>"#)?;
    Ok(())
}

fn write_text_properties<W: Write>(writer: &mut W, chart: &Chart) -> std::io::Result<()> {
    write!(writer, "<c:txPr><a:bodyPr/><a:lstStyle/>")?;
    write!(
        writer,
        r#"<a:p><a:pPr><a:defRPr sz="{}">"#,
        crate::common::unit::pt_to_centipoints(chart.font_size)
    )?;
    write_solid_fill(writer, chart.text_color)?;
    if let Some(ref font) = chart.font {
        write!(writer, r#"<a:latin typeface="{}"/>"#, escape_xml(font))?;
    }
    write!(
        writer,
        r#"</a:defRPr></a:pPr><a:endParaRPr lang="en-US"/></a:p></c:txPr>"#
    )?;
    Ok(())
}
