use super::{LayoutContext, LayoutError};
use crate::deck::primitive::{Bounds, HAlign, Paint, ShapeKind, ShapePrimitive, Slide, Stroke};
use crate::deck::spec::{ProcessStep, SlideSpec};
use crate::deck::theme::contrast::on_color;
use crate::deck::theme::style;

const MAX_CIRCLE: f64 = 0.7;
/// Clearance between a circle and its connector ends.
const CONNECTOR_PAD: f64 = 0.08;

pub(super) fn layout(ctx: &LayoutContext<'_>, spec: &SlideSpec, steps: &[ProcessStep]) -> Result<Slide, LayoutError> {
    if steps.is_empty() {
        return Err(LayoutError::EmptySteps);
    }
    let theme = ctx.theme;
    let mut slide = ctx.base_slide(spec.background_pattern.as_deref(), false);
    let top = ctx.title_block(&mut slide, &spec.title);

    let n = steps.len();
    let slot = ctx.content_width() / n as f64;
    let diameter = (slot * 0.6).min(MAX_CIRCLE);
    let cy = top + 0.3 + diameter / 2.0;
    let center = |i: usize| ctx.margin() + slot * (i as f64 + 0.5);
    let text_size = if n > 5 { 11.0 } else { 14.0 };

    for (i, step) in steps.iter().enumerate() {
        let cx = center(i);
        let color = theme.rotation_color(i);
        let mut number = ctx.heading_style(18.0).centered();
        number.color = on_color(color);
        slide.push(
            ShapePrimitive::new(ShapeKind::Ellipse, Bounds::centered(cx, cy, diameter, diameter))
                .filled(Paint::solid(color))
                .shadowed(style::card_shadow(theme.design.shadows))
                .labeled((i + 1).to_string(), number),
        );

        if i + 1 < n {
            let x1 = cx + diameter / 2.0 + CONNECTOR_PAD;
            let x2 = center(i + 1) - diameter / 2.0 - CONNECTOR_PAD;
            slide.push(
                ShapePrimitive::new(ShapeKind::Line, Bounds::new(x1, cy, (x2 - x1).max(0.05), 0.0))
                    .stroked(Stroke::new(theme.colors.text_light, 1.5).with_arrow()),
            );
        }

        let text_x = cx - slot / 2.0 + 0.05;
        let text_top = cy + diameter / 2.0 + 0.15;
        slide.push(ctx.text(
            Bounds::new(text_x, text_top, slot - 0.1, 0.45),
            &step.title,
            ctx.heading_style(text_size).align(HAlign::Center),
        ));
        if !step.description.is_empty() {
            slide.push(ctx.text(
                Bounds::new(text_x, text_top + 0.5, slot - 0.1, 1.2),
                &step.description,
                ctx.muted_style(text_size - 2.0).align(HAlign::Center),
            ));
        }
    }
    Ok(slide)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::primitive::Canvas;
    use crate::deck::spec::SlideKind;
    use crate::deck::theme::ResolvedTheme;

    fn steps(n: usize) -> Vec<ProcessStep> {
        (0..n)
            .map(|i| ProcessStep {
                title: format!("Step {i}"),
                description: "details".into(),
            })
            .collect()
    }

    fn spec() -> SlideSpec {
        SlideSpec {
            title: "How".into(),
            background_pattern: None,
            kind: SlideKind::Process { steps: vec![] },
        }
    }

    #[test]
    fn test_five_steps_have_four_connectors() {
        let theme = ResolvedTheme::default();
        let ctx = LayoutContext::new(&theme, Canvas::default(), 0);
        let slide = layout(&ctx, &spec(), &steps(5)).unwrap();
        let shapes: Vec<_> = slide.primitives.iter().filter_map(|p| p.as_shape()).collect();

        let circles: Vec<_> = shapes.iter().filter(|s| s.kind == ShapeKind::Ellipse).collect();
        assert_eq!(circles.len(), 5);
        let numbers: Vec<_> = circles
            .iter()
            .filter_map(|s| s.label.as_ref().map(|(t, _)| t.as_str()))
            .collect();
        assert_eq!(numbers, ["1", "2", "3", "4", "5"]);

        let connectors: Vec<_> = shapes.iter().filter(|s| s.kind == ShapeKind::Line).collect();
        assert_eq!(connectors.len(), 4);
        assert!(connectors.iter().all(|c| c.stroke.is_some_and(|s| s.arrow)));
        // Nothing points past the last circle
        let last = circles[4].bounds;
        assert!(connectors.iter().all(|c| c.bounds.right() < last.x));
    }

    #[test]
    fn test_single_step_and_empty() {
        let theme = ResolvedTheme::default();
        let ctx = LayoutContext::new(&theme, Canvas::default(), 0);
        let slide = layout(&ctx, &spec(), &steps(1)).unwrap();
        assert!(slide
            .primitives
            .iter()
            .filter_map(|p| p.as_shape())
            .all(|s| s.kind != ShapeKind::Line));
        assert_eq!(layout(&ctx, &spec(), &[]).unwrap_err(), LayoutError::EmptySteps);
    }
}
