use super::LayoutContext;
use crate::deck::primitive::{Bounds, Paint, ShapeKind, ShapePrimitive, Slide};
use crate::deck::spec::{CornerRadius, SlideSpec};

const TITLE_Y: f64 = 1.7;
const TITLE_H: f64 = 1.1;
const SUBTITLE_H: f64 = 0.6;
const BAR_H: f64 = 0.06;

pub(super) fn layout(ctx: &LayoutContext<'_>, spec: &SlideSpec, subtitle: Option<&str>) -> Slide {
    let theme = ctx.theme;
    let margin = ctx.margin();
    let width = ctx.content_width();
    let cx = ctx.canvas.center_x();
    let mut slide = ctx.base_slide(spec.background_pattern.as_deref(), true);

    slide.push(ctx.text(
        Bounds::new(margin, TITLE_Y, width, TITLE_H),
        &spec.title,
        ctx.heading_style(40.0).centered(),
    ));

    let mut bar_y = TITLE_Y + TITLE_H + 0.15;
    if let Some(subtitle) = subtitle {
        slide.push(ctx.text(
            Bounds::new(margin, TITLE_Y + TITLE_H + 0.05, width, SUBTITLE_H),
            subtitle,
            ctx.muted_style(20.0).centered(),
        ));
        bar_y += SUBTITLE_H + 0.05;
    }

    match theme.design.corner_radius {
        CornerRadius::None | CornerRadius::Low => {
            slide.push(
                ShapePrimitive::new(ShapeKind::Rect, Bounds::centered(cx, bar_y, 1.5, BAR_H))
                    .filled(Paint::solid(theme.colors.primary)),
            );
        },
        CornerRadius::Medium | CornerRadius::High => {
            // Three bars, each shorter and lower than the last
            for (i, bar_w) in [1.2, 0.8, 0.4].into_iter().enumerate() {
                let y = bar_y + i as f64 * (BAR_H + 0.04);
                slide.push(
                    ShapePrimitive::new(ShapeKind::RoundRect, Bounds::centered(cx, y, bar_w, BAR_H))
                        .filled(Paint::solid(theme.rotation_color(i)))
                        .rounded(Some(50_000)),
                );
            }
        },
    }

    if theme.design.corner_radius == CornerRadius::High {
        corner_decorations(ctx, &mut slide);
    }
    slide
}

fn corner_decorations(ctx: &LayoutContext<'_>, slide: &mut Slide) {
    let c = &ctx.theme.colors;
    let (w, h) = (ctx.canvas.width, ctx.canvas.height);
    let size = (h * 0.3).min(1.6);
    slide.push(
        ShapePrimitive::new(ShapeKind::Ellipse, Bounds::new(w - size, 0.0, size, size))
            .filled(Paint::translucent(c.primary, 0.82)),
    );
    slide.push(
        ShapePrimitive::new(
            ShapeKind::Ellipse,
            Bounds::new(w - size * 0.55, size * 0.45, size * 0.5, size * 0.5),
        )
        .filled(Paint::translucent(c.accent, 0.7)),
    );
    slide.push(
        ShapePrimitive::new(ShapeKind::RoundRect, Bounds::new(0.0, h - size * 0.7, size * 0.7, size * 0.7))
            .filled(Paint::translucent(c.secondary, 0.8))
            .rounded(Some(30_000)),
    );
}
