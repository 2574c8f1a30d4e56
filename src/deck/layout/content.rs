use super::LayoutContext;
use crate::deck::primitive::{Bounds, Paint, ShapeKind, ShapePrimitive, Slide, VAlign};
use crate::deck::spec::SlideSpec;

const MARKER: f64 = 0.14;
const MAX_ROW: f64 = 0.55;

pub(super) fn layout(ctx: &LayoutContext<'_>, spec: &SlideSpec, items: &[String]) -> Slide {
    let mut slide = ctx.base_slide(spec.background_pattern.as_deref(), false);
    let top = ctx.title_block(&mut slide, &spec.title);
    if items.is_empty() {
        return slide;
    }

    let margin = ctx.margin();
    let row = (ctx.remaining_height(top) / items.len() as f64).min(MAX_ROW);
    let size = if items.len() > 7 { 14.0 } else { 18.0 };

    for (i, item) in items.iter().enumerate() {
        let y = top + i as f64 * row;
        slide.push(
            ShapePrimitive::new(
                ShapeKind::Ellipse,
                Bounds::new(margin + 0.05, y + (row - MARKER) / 2.0, MARKER, MARKER),
            )
            .filled(Paint::solid(ctx.theme.rotation_color(i))),
        );
        slide.push(ctx.text(
            Bounds::new(margin + 0.35, y, ctx.content_width() - 0.35, row),
            item,
            ctx.body_style(size).valign(VAlign::Middle),
        ));
    }
    slide
}
