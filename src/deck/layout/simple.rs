//! Single- and two-block layouts: conclusion, quote, image placeholder and basic.

use super::LayoutContext;
use crate::deck::primitive::{
    Bounds, HAlign, Paint, ShapeKind, ShapePrimitive, Slide, Stroke, TextPrimitive, TextStyle, VAlign,
};
use crate::deck::spec::SlideSpec;
use crate::deck::theme::contrast::{correct_text_color, on_color};
use crate::deck::theme::style;

pub(super) fn conclusion(
    ctx: &LayoutContext<'_>,
    spec: &SlideSpec,
    message: Option<&str>,
    points: &[String],
    call_to_action: Option<&str>,
) -> Slide {
    let c = &ctx.theme.colors;
    let margin = ctx.margin();
    let width = ctx.content_width();
    let mut slide = ctx.base_slide(spec.background_pattern.as_deref(), false);
    let mut y = ctx.title_block(&mut slide, &spec.title);

    if let Some(message) = message {
        let mut style = ctx.heading_style(22.0);
        style.color = correct_text_color(c.primary, c.background);
        slide.push(ctx.text(Bounds::new(margin, y, width, 0.7), message, style));
        y += 0.8;
    }

    let cta_h = if call_to_action.is_some() { 0.6 } else { 0.0 };
    if !points.is_empty() {
        let available = ctx.canvas.height - y - cta_h - 0.6;
        let row = (available / points.len() as f64).clamp(0.05, 0.45);
        for (i, point) in points.iter().enumerate() {
            slide.push(ctx.text(
                Bounds::new(margin + 0.2, y + i as f64 * row, width - 0.2, row),
                format!("\u{2713} {point}"),
                ctx.body_style(16.0).valign(VAlign::Middle),
            ));
        }
    }

    if let Some(cta) = call_to_action {
        let mut style = ctx.heading_style(18.0).centered();
        style.color = on_color(c.accent);
        slide.push(
            ShapePrimitive::new(
                ShapeKind::Rect,
                Bounds::centered(ctx.canvas.center_x(), ctx.canvas.height - 0.4 - cta_h / 2.0, width * 0.6, cta_h),
            )
            .filled(Paint::solid(c.accent))
            .rounded(ctx.theme.corner_adjustment())
            .shadowed(style::card_shadow(ctx.theme.design.shadows))
            .labeled(cta, style),
        );
    }
    slide
}

pub(super) fn quote(ctx: &LayoutContext<'_>, spec: &SlideSpec, quote: &str, attribution: Option<&str>) -> Slide {
    let c = &ctx.theme.colors;
    let margin = ctx.margin();
    let width = ctx.content_width();
    let mut slide = ctx.base_slide(spec.background_pattern.as_deref(), false);

    slide.push(ctx.text(Bounds::new(margin, 0.3, width, 0.5), &spec.title, ctx.muted_style(16.0).bold()));

    let mut mark = TextStyle::new(&ctx.theme.fonts.accent, 72.0, correct_text_color(c.accent, c.background));
    mark.bold = true;
    slide.push(ctx.text(Bounds::new(margin, 0.8, 1.0, 1.2), "\u{201C}", mark));

    let body = Bounds::new(margin + 0.6, 1.3, width - 1.2, 2.4);
    slide.push(ctx.text(
        body,
        quote,
        TextStyle::new(&ctx.theme.fonts.accent, 26.0, c.text).italic().centered(),
    ));

    if let Some(attribution) = attribution {
        slide.push(ctx.text(
            Bounds::new(body.x, body.bottom() + 0.2, body.w, 0.5),
            format!("\u{2014} {attribution}"),
            ctx.muted_style(16.0).align(HAlign::Right),
        ));
    }
    slide
}

pub(super) fn image(
    ctx: &LayoutContext<'_>,
    spec: &SlideSpec,
    caption: Option<&str>,
    description: Option<&str>,
) -> Slide {
    let c = &ctx.theme.colors;
    let mut slide = ctx.base_slide(spec.background_pattern.as_deref(), false);
    let top = ctx.title_block(&mut slide, &spec.title);
    let caption_h = if caption.is_some() { 0.5 } else { 0.0 };
    let frame = Bounds::new(
        ctx.margin() + 1.0,
        top,
        ctx.content_width() - 2.0,
        ctx.remaining_height(top) - caption_h,
    );

    let label = description.unwrap_or("Image");
    slide.push(
        ShapePrimitive::new(ShapeKind::Rect, frame)
            .filled(Paint::solid(c.background.mix(&c.primary, 0.05)))
            .stroked(Stroke::new(c.text_light, 1.5).dashed())
            .rounded(ctx.theme.corner_adjustment())
            .labeled(label, ctx.muted_style(14.0).centered()),
    );

    if let Some(caption) = caption {
        slide.push(ctx.text(
            Bounds::new(frame.x, frame.bottom() + 0.05, frame.w, caption_h - 0.05),
            caption,
            ctx.muted_style(12.0).italic().align(HAlign::Center),
        ));
    }
    slide
}

/// Plain text block. Also used for unrecognized slide types.
pub(super) fn basic(ctx: &LayoutContext<'_>, spec: &SlideSpec, content: &[String]) -> Slide {
    let mut slide = ctx.base_slide(spec.background_pattern.as_deref(), false);
    let top = ctx.title_block(&mut slide, &spec.title);
    if !content.is_empty() {
        slide.push(TextPrimitive {
            bounds: Bounds::new(ctx.margin(), top, ctx.content_width(), ctx.remaining_height(top)),
            paragraphs: content.to_vec(),
            style: ctx.body_style(18.0),
        });
    }
    slide
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::primitive::{Canvas, VisualPrimitive};
    use crate::deck::spec::SlideKind;
    use crate::deck::theme::ResolvedTheme;

    fn spec() -> SlideSpec {
        SlideSpec {
            title: "Wrap-up".into(),
            background_pattern: None,
            kind: SlideKind::Basic { content: vec![] },
        }
    }

    #[test]
    fn test_conclusion_call_to_action_banner() {
        let theme = ResolvedTheme::default();
        let ctx = LayoutContext::new(&theme, Canvas::default(), 0);
        let slide = conclusion(&ctx, &spec(), Some("Ship it"), &["a".into(), "b".into()], Some("Sign up"));
        let banner = slide
            .primitives
            .iter()
            .filter_map(|p| p.as_shape())
            .find(|s| s.label.is_some())
            .unwrap();
        assert_eq!(banner.label.as_ref().unwrap().0, "Sign up");
        assert_eq!(banner.fill, Some(Paint::solid(theme.colors.accent)));
        assert!(banner.bounds.bottom() <= ctx.canvas.height);
    }

    #[test]
    fn test_basic_keeps_paragraphs() {
        let theme = ResolvedTheme::default();
        let ctx = LayoutContext::new(&theme, Canvas::default(), 0);
        let slide = basic(&ctx, &spec(), &["one".into(), "two".into()]);
        let Some(VisualPrimitive::Text(body)) = slide.primitives.last() else {
            panic!("expected text");
        };
        assert_eq!(body.paragraphs, ["one", "two"]);
    }

    #[test]
    fn test_image_placeholder_is_dashed() {
        let theme = ResolvedTheme::default();
        let ctx = LayoutContext::new(&theme, Canvas::default(), 0);
        let slide = image(&ctx, &spec(), Some("Figure 1"), None);
        let frame = slide
            .primitives
            .iter()
            .filter_map(|p| p.as_shape())
            .find(|s| s.stroke.is_some())
            .unwrap();
        assert_eq!(frame.label.as_ref().unwrap().0, "Image");
        assert_ne!(frame.stroke.unwrap().dash, crate::deck::primitive::Dash::Solid);
    }
}
