use super::LayoutContext;
use crate::deck::primitive::{Bounds, HAlign, Paint, ShapeKind, ShapePrimitive, Slide, Stroke};
use crate::deck::spec::{SlideSpec, TimelineEvent};
use crate::deck::theme::contrast::on_color;

const RAIL_H: f64 = 0.06;
const DOT: f64 = 0.2;
const CHIP_W: f64 = 1.0;
const CHIP_H: f64 = 0.3;
const MAX_CARD_W: f64 = 2.6;
const MAX_CARD_H: f64 = 1.25;
/// Distance between the rail and the near edge of a card.
const CARD_OFFSET: f64 = 0.5;

pub(super) fn layout(ctx: &LayoutContext<'_>, spec: &SlideSpec, events: &[TimelineEvent]) -> Slide {
    let theme = ctx.theme;
    let margin = ctx.margin();
    let mut slide = ctx.base_slide(spec.background_pattern.as_deref(), false);
    let top = ctx.title_block(&mut slide, &spec.title);

    let rail_y = top + ctx.remaining_height(top) / 2.0;
    slide.push(
        ShapePrimitive::new(
            ShapeKind::Rect,
            Bounds::new(margin, rail_y - RAIL_H / 2.0, ctx.content_width(), RAIL_H),
        )
        .filled(Paint::solid(theme.colors.primary.tint(0.5))),
    );
    if events.is_empty() {
        return slide;
    }

    let slot = ctx.content_width() / events.len() as f64;
    // Same-side neighbours are two slots apart
    let card_w = (2.0 * slot - 0.15).min(MAX_CARD_W).min(ctx.content_width());
    let card_h = (rail_y - top - CARD_OFFSET - CHIP_H / 2.0).clamp(0.3, MAX_CARD_H);

    for (i, event) in events.iter().enumerate() {
        let cx = margin + slot * (i as f64 + 0.5);
        let color = theme.rotation_color(i);
        let above = i % 2 == 0;

        slide.push(
            ShapePrimitive::new(ShapeKind::Ellipse, Bounds::centered(cx, rail_y, DOT, DOT))
                .filled(Paint::solid(color)),
        );

        let card_y = if above {
            rail_y - CARD_OFFSET - card_h
        } else {
            rail_y + CARD_OFFSET
        };
        let (line_top, line_bottom) = if above {
            (card_y + card_h, rail_y - DOT / 2.0)
        } else {
            (rail_y + DOT / 2.0, card_y)
        };
        slide.push(
            ShapePrimitive::new(ShapeKind::Line, Bounds::new(cx, line_top, 0.0, line_bottom - line_top))
                .stroked(Stroke::new(color, 1.0).dashed()),
        );

        let card_x = (cx - card_w / 2.0).clamp(margin, ctx.canvas.width - margin - card_w);
        let card = Bounds::new(card_x, card_y, card_w, card_h);
        slide.push(ctx.panel(card));

        let mut chip_style = ctx.body_style(11.0).bold().centered();
        chip_style.color = on_color(color);
        slide.push(
            ShapePrimitive::new(ShapeKind::RoundRect, Bounds::centered(cx, card_y, CHIP_W, CHIP_H))
                .filled(Paint::solid(color))
                .rounded(Some(50_000))
                .labeled(&event.date, chip_style),
        );

        let inner = Bounds::new(card.x + 0.08, card.y + CHIP_H / 2.0 + 0.05, card.w - 0.16, 0.35);
        slide.push(ctx.text(inner, &event.title, ctx.heading_style(13.0).align(HAlign::Center)));
        if !event.description.is_empty() {
            slide.push(ctx.text(
                Bounds::new(inner.x, inner.bottom(), inner.w, (card.bottom() - inner.bottom() - 0.05).max(0.1)),
                &event.description,
                ctx.muted_style(10.0).align(HAlign::Center),
            ));
        }
    }
    slide
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::primitive::Canvas;
    use crate::deck::spec::SlideKind;
    use crate::deck::theme::ResolvedTheme;

    #[test]
    fn test_events_alternate_sides_of_the_rail() {
        let theme = ResolvedTheme::default();
        let ctx = LayoutContext::new(&theme, Canvas::default(), 0);
        let events: Vec<_> = (0..4)
            .map(|i| TimelineEvent {
                date: format!("202{i}"),
                title: format!("Event {i}"),
                description: "more".into(),
            })
            .collect();
        let spec = SlideSpec {
            title: "Roadmap".into(),
            background_pattern: None,
            kind: SlideKind::Timeline { events: vec![] },
        };
        let slide = layout(&ctx, &spec, &events);
        let shapes: Vec<_> = slide.primitives.iter().filter_map(|p| p.as_shape()).collect();

        let rail = shapes[1];
        assert_eq!(rail.kind, ShapeKind::Rect);
        let rail_y = rail.bounds.center().1;

        let chips: Vec<_> = shapes
            .iter()
            .filter(|s| s.kind == ShapeKind::RoundRect && s.label.is_some())
            .collect();
        assert_eq!(chips.len(), 4);
        for (i, chip) in chips.iter().enumerate() {
            assert_eq!(chip.bounds.center().1 < rail_y, i % 2 == 0);
        }

        let connectors: Vec<_> = shapes.iter().filter(|s| s.kind == ShapeKind::Line).collect();
        assert_eq!(connectors.len(), 4);
        assert!(connectors.iter().all(|c| c.stroke.is_some_and(|s| s.dash != crate::deck::primitive::Dash::Solid)));
    }
}
