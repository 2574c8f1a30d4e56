//! The internal fallback layout. It cannot fail.

use super::LayoutContext;
use crate::deck::primitive::{Bounds, HAlign, ShapeKind, ShapePrimitive, Slide, Stroke, VAlign};

const GLYPH: f64 = 0.9;

/// Error slide carrying the original title and the captured message.
pub fn error_slide(title: &str, message: &str, ctx: &LayoutContext<'_>) -> Slide {
    let mut slide = ctx.base_slide(None, false);
    let top = ctx.title_block(&mut slide, title);
    let area = Bounds::new(ctx.margin(), top, ctx.content_width(), ctx.remaining_height(top));
    error_glyph(ctx, &mut slide, area, message);
    slide
}

/// Centered warning circle with the message beneath it, drawn in the error colour.
pub(super) fn error_glyph(ctx: &LayoutContext<'_>, slide: &mut Slide, area: Bounds, message: &str) {
    let error = ctx.theme.colors.error;
    let (cx, cy) = area.center();
    let glyph_y = cy - 0.35;

    let mut mark = ctx.heading_style(32.0).centered();
    mark.color = error;
    slide.push(
        ShapePrimitive::new(ShapeKind::Ellipse, Bounds::centered(cx, glyph_y, GLYPH, GLYPH))
            .stroked(Stroke::new(error, 3.0))
            .labeled("!", mark),
    );

    let mut style = ctx.body_style(14.0).align(HAlign::Center).valign(VAlign::Top);
    style.color = error;
    slide.push(ctx.text(
        Bounds::new(area.x, glyph_y + GLYPH / 2.0 + 0.15, area.w, 0.8),
        message,
        style,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::primitive::{Canvas, VisualPrimitive};
    use crate::deck::theme::ResolvedTheme;

    #[test]
    fn test_error_slide_keeps_title_and_message() {
        let theme = ResolvedTheme::default();
        let ctx = LayoutContext::new(&theme, Canvas::default(), 4);
        let slide = error_slide("Revenue", "unsupported chart type `radar`", &ctx);

        let texts: Vec<_> = slide
            .primitives
            .iter()
            .filter_map(|p| match p {
                VisualPrimitive::Text(t) => Some(t),
                _ => None,
            })
            .collect();
        assert_eq!(texts[0].paragraphs, ["Revenue"]);
        let message = texts.last().unwrap();
        assert!(message.paragraphs[0].contains("radar"));
        assert_eq!(message.style.color, theme.colors.error);
        assert!(slide.decorations.is_empty());
    }

    #[test]
    fn test_error_slide_survives_degenerate_canvas() {
        let theme = ResolvedTheme::default();
        for canvas in [
            Canvas { width: 0.2, height: 5.0 },
            Canvas { width: f64::NAN, height: 5.0 },
            Canvas { width: 10.0, height: f64::NAN },
        ] {
            let ctx = LayoutContext::new(&theme, canvas, 0);
            let slide = error_slide("Hi", "canvas too small", &ctx);
            assert!(slide.primitive_count() >= 3);
        }
    }
}
