//! Side-by-side layouts: two-column panels and the comparison board.

use super::LayoutContext;
use crate::deck::primitive::{
    Bounds, HAlign, Paint, ShapeKind, ShapePrimitive, Slide, Stroke, VAlign,
};
use crate::deck::spec::{Column, SlideSpec};
use crate::deck::theme::contrast::{correct_text_color, on_color};
use crate::deck::theme::style;

const HEADER_H: f64 = 0.5;
const MAX_POINT_ROW: f64 = 0.45;
const BADGE: f64 = 0.7;

pub(super) fn layout(ctx: &LayoutContext<'_>, spec: &SlideSpec, left: &Column, right: &Column) -> Slide {
    let mut slide = ctx.base_slide(spec.background_pattern.as_deref(), false);
    let top = ctx.title_block(&mut slide, &spec.title);
    let gap = ctx.gap().max(0.2);
    let panel_w = (ctx.content_width() - gap) / 2.0;
    let panel_h = ctx.remaining_height(top);

    for (side, column) in [left, right].into_iter().enumerate() {
        let x = ctx.margin() + side as f64 * (panel_w + gap);
        let panel = Bounds::new(x, top, panel_w, panel_h);
        slide.push(ctx.panel(panel));

        let band_color = ctx.theme.rotation_color(side);
        let mut band = ShapePrimitive::new(ShapeKind::Rect, Bounds::new(x, top, panel_w, HEADER_H))
            .filled(Paint::solid(band_color))
            .rounded(ctx.theme.corner_adjustment());
        if !column.heading.is_empty() {
            let mut style = ctx.heading_style(16.0).centered();
            style.color = on_color(band_color);
            band = band.labeled(&column.heading, style);
        }
        slide.push(band);

        points(ctx, &mut slide, panel, &column.points, "\u{2022} ");
    }
    slide
}

pub(super) fn comparison(
    ctx: &LayoutContext<'_>,
    spec: &SlideSpec,
    left: &Column,
    right: &Column,
    verdict: Option<&str>,
) -> Slide {
    let theme = ctx.theme;
    let mut slide = ctx.base_slide(spec.background_pattern.as_deref(), false);
    let top = ctx.title_block(&mut slide, &spec.title);
    let banner_h = if verdict.is_some() { 0.55 } else { 0.0 };
    let panel_gap = BADGE + 0.2;
    let panel_w = (ctx.content_width() - panel_gap) / 2.0;
    let panel_h = ctx.remaining_height(top) - if verdict.is_some() { banner_h + 0.15 } else { 0.0 };

    for (side, column) in [left, right].into_iter().enumerate() {
        let x = ctx.margin() + side as f64 * (panel_w + panel_gap);
        let panel = Bounds::new(x, top, panel_w, panel_h);
        let accent = theme.rotation_color(side);
        slide.push(ctx.panel(panel).stroked(Stroke::new(accent, 1.5)));

        if !column.heading.is_empty() {
            let mut style = ctx.heading_style(18.0).align(HAlign::Center);
            style.color = correct_text_color(accent, theme.colors.background);
            slide.push(ctx.text(
                Bounds::new(x + 0.1, top + 0.05, panel_w - 0.2, HEADER_H),
                &column.heading,
                style,
            ));
        }
        points(ctx, &mut slide, panel, &column.points, "\u{2713} ");
    }

    // Badge sits on the shared vertical midpoint of both panels
    let accent = theme.colors.accent;
    let mut badge_style = ctx.heading_style(16.0).centered();
    badge_style.color = on_color(accent);
    slide.push(
        ShapePrimitive::new(
            ShapeKind::Ellipse,
            Bounds::centered(ctx.canvas.center_x(), top + panel_h / 2.0, BADGE, BADGE),
        )
        .filled(Paint::solid(accent))
        .shadowed(style::card_shadow(theme.design.shadows))
        .labeled("VS", badge_style),
    );

    if let Some(verdict) = verdict {
        let mut style = ctx.body_style(16.0).bold().centered();
        style.color = on_color(theme.colors.primary);
        slide.push(
            ShapePrimitive::new(
                ShapeKind::Rect,
                Bounds::new(ctx.margin(), top + panel_h + 0.15, ctx.content_width(), banner_h),
            )
            .filled(Paint::solid(theme.colors.primary))
            .rounded(theme.corner_adjustment())
            .labeled(verdict, style),
        );
    }
    slide
}

/// Point rows below a panel's header.
fn points(ctx: &LayoutContext<'_>, slide: &mut Slide, panel: Bounds, points: &[String], marker: &str) {
    if points.is_empty() {
        return;
    }
    let top = panel.y + HEADER_H + 0.15;
    let row = ((panel.bottom() - top - 0.1) / points.len() as f64).clamp(0.05, MAX_POINT_ROW);
    let size = if points.len() > 6 { 12.0 } else { 15.0 };
    for (i, point) in points.iter().enumerate() {
        slide.push(ctx.text(
            Bounds::new(panel.x + 0.2, top + i as f64 * row, panel.w - 0.4, row),
            format!("{marker}{point}"),
            ctx.body_style(size).valign(VAlign::Middle),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::primitive::{Canvas, VisualPrimitive};
    use crate::deck::spec::SlideKind;
    use crate::deck::theme::ResolvedTheme;

    fn spec() -> SlideSpec {
        SlideSpec {
            title: "Options".into(),
            background_pattern: None,
            kind: SlideKind::Basic { content: vec![] },
        }
    }

    fn column(heading: &str, n: usize) -> Column {
        Column {
            heading: heading.into(),
            points: (0..n).map(|i| format!("point {i}")).collect(),
        }
    }

    #[test]
    fn test_two_columns_are_symmetric() {
        let theme = ResolvedTheme::default();
        let ctx = LayoutContext::new(&theme, Canvas::default(), 0);
        let slide = layout(&ctx, &spec(), &column("A", 2), &column("B", 2));
        let panels: Vec<_> = slide
            .primitives
            .iter()
            .filter_map(|p| p.as_shape())
            .filter(|s| s.shadow.is_some())
            .collect();
        assert_eq!(panels.len(), 2);
        let left_gap = panels[0].bounds.x;
        let right_gap = ctx.canvas.width - panels[1].bounds.right();
        assert!((left_gap - right_gap).abs() < 1e-9);
        assert_eq!(panels[0].bounds.w, panels[1].bounds.w);
    }

    #[test]
    fn test_comparison_badge_and_verdict() {
        let theme = ResolvedTheme::default();
        let ctx = LayoutContext::new(&theme, Canvas::default(), 0);
        let slide = comparison(&ctx, &spec(), &column("Old", 3), &column("New", 3), Some("New wins"));

        let badge = slide
            .primitives
            .iter()
            .filter_map(|p| p.as_shape())
            .find(|s| s.label.as_ref().is_some_and(|(t, _)| t == "VS"))
            .unwrap();
        assert_eq!(badge.kind, ShapeKind::Ellipse);
        assert!((badge.bounds.center().0 - ctx.canvas.center_x()).abs() < 1e-9);

        let checks = slide
            .primitives
            .iter()
            .filter(|p| matches!(p, VisualPrimitive::Text(t) if t.paragraphs[0].starts_with('\u{2713}')))
            .count();
        assert_eq!(checks, 6);
        assert!(slide
            .primitives
            .iter()
            .filter_map(|p| p.as_shape())
            .any(|s| s.label.as_ref().is_some_and(|(t, _)| t == "New wins")));
    }
}
