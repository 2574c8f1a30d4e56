use super::error::error_glyph;
use super::{LayoutContext, LayoutError};
use crate::deck::primitive::{Bounds, ChartKind, ChartPrimitive, SeriesData, Slide};
use crate::deck::spec::{ChartData, SlideSpec};
use tracing::warn;

/// Chart slide.
///
/// An unsupported chart-type token fails the whole slide. Problems with the
/// series themselves are absorbed here: the chart area gets an error glyph
/// and the rest of the slide renders normally.
pub(super) fn layout(
    ctx: &LayoutContext<'_>,
    spec: &SlideSpec,
    chart_type: &str,
    data: &ChartData,
    show_legend: bool,
    show_values: bool,
) -> Result<Slide, LayoutError> {
    let kind = ChartKind::from_token(chart_type)
        .ok_or_else(|| LayoutError::UnsupportedChartType(chart_type.to_string()))?;

    let mut slide = ctx.base_slide(spec.background_pattern.as_deref(), false);
    let top = ctx.title_block(&mut slide, &spec.title);
    let area = Bounds::new(ctx.margin(), top, ctx.content_width(), ctx.remaining_height(top));

    match build(ctx, kind, data, area, show_legend, show_values) {
        Ok(chart) => slide.push(chart),
        Err(err) => {
            warn!(slide = ctx.index, error = %err, "chart data rejected");
            error_glyph(ctx, &mut slide, area, &err.to_string());
        },
    }
    Ok(slide)
}

fn build(
    ctx: &LayoutContext<'_>,
    kind: ChartKind,
    data: &ChartData,
    bounds: Bounds,
    show_legend: bool,
    show_values: bool,
) -> Result<ChartPrimitive, LayoutError> {
    let theme = ctx.theme;
    if data.labels.is_empty() || data.datasets.is_empty() {
        return Err(LayoutError::MissingChartData);
    }

    let mut series = Vec::with_capacity(data.datasets.len());
    for (i, set) in data.datasets.iter().enumerate() {
        if set.data.len() != data.labels.len() {
            return Err(LayoutError::SeriesLengthMismatch {
                series: set.label.clone(),
                expected: data.labels.len(),
                found: set.data.len(),
            });
        }
        let values = set
            .data
            .iter()
            .map(|v| v.filter(|v| v.is_finite()))
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| LayoutError::NonFiniteValue {
                series: set.label.clone(),
            })?;
        series.push(SeriesData {
            name: set.label.clone(),
            values,
            color: set.color.unwrap_or_else(|| theme.series_color(i)),
        });
    }

    // Radial charts show one series, one colour per slice
    let point_colors = if kind.is_radial() {
        series.truncate(1);
        (0..data.labels.len()).map(|i| theme.series_color(i)).collect()
    } else {
        Vec::new()
    };

    Ok(ChartPrimitive {
        bounds,
        kind,
        categories: data.labels.clone(),
        series,
        point_colors,
        show_legend,
        show_values,
        text: ctx.body_style(12.0),
        gridlines: (!kind.is_radial()).then(|| theme.colors.text_light.tint(0.6)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::deck::primitive::{Canvas, VisualPrimitive};
    use crate::deck::spec::{Dataset, SlideKind};
    use crate::deck::theme::ResolvedTheme;

    fn spec() -> SlideSpec {
        SlideSpec {
            title: "Revenue".into(),
            background_pattern: None,
            kind: SlideKind::Basic { content: vec![] },
        }
    }

    fn data(values: Vec<Option<f64>>, color: Option<RGBColor>) -> ChartData {
        ChartData {
            labels: vec!["Q1".into(), "Q2".into(), "Q3".into()],
            datasets: vec![
                Dataset {
                    label: "2024".into(),
                    data: values,
                    color,
                },
                Dataset {
                    label: "2025".into(),
                    data: vec![Some(1.0), Some(2.0), Some(3.0)],
                    color: None,
                },
            ],
        }
    }

    fn chart_of(slide: &Slide) -> Option<&ChartPrimitive> {
        slide.primitives.iter().find_map(|p| match p {
            VisualPrimitive::Chart(c) => Some(c),
            _ => None,
        })
    }

    #[test]
    fn test_unsupported_token_fails_the_slide() {
        let theme = ResolvedTheme::default();
        let ctx = LayoutContext::new(&theme, Canvas::default(), 2);
        let err = layout(&ctx, &spec(), "radar", &data(vec![Some(1.0); 3], None), true, false)
            .unwrap_err();
        assert_eq!(err, LayoutError::UnsupportedChartType("radar".into()));
    }

    #[test]
    fn test_series_colors_rotate_unless_explicit() {
        let theme = ResolvedTheme::default();
        let ctx = LayoutContext::new(&theme, Canvas::default(), 0);
        let explicit = RGBColor::new(1, 2, 3);
        let slide = layout(
            &ctx,
            &spec(),
            "column",
            &data(vec![Some(4.0), Some(5.0), Some(6.0)], Some(explicit)),
            true,
            true,
        )
        .unwrap();
        let chart = chart_of(&slide).unwrap();
        assert_eq!(chart.kind, ChartKind::Column);
        assert_eq!(chart.series[0].color, explicit);
        assert_eq!(chart.series[1].color, theme.series_color(1));
        assert!(chart.show_values);
    }

    #[test]
    fn test_donut_keeps_first_series_with_slice_colors() {
        let theme = ResolvedTheme::default();
        let ctx = LayoutContext::new(&theme, Canvas::default(), 0);
        let slide = layout(&ctx, &spec(), "donut", &data(vec![Some(1.0); 3], None), false, false)
            .unwrap();
        let chart = chart_of(&slide).unwrap();
        assert_eq!(chart.kind, ChartKind::Doughnut);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.point_colors.len(), 3);
        assert!(chart.gridlines.is_none());
    }

    #[test]
    fn test_bad_values_draw_glyph_instead_of_failing() {
        let theme = ResolvedTheme::default();
        let ctx = LayoutContext::new(&theme, Canvas::default(), 0);
        for values in [vec![Some(1.0), None, Some(2.0)], vec![Some(1.0)]] {
            let slide = layout(&ctx, &spec(), "bar", &data(values, None), true, false).unwrap();
            assert!(chart_of(&slide).is_none());
            assert!(slide
                .primitives
                .iter()
                .filter_map(|p| p.as_shape())
                .any(|s| s.label.as_ref().is_some_and(|(t, _)| t == "!")));
        }
    }
}
