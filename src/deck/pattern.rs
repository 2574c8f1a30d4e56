//! Procedural background patterns.
//!
//! [`render`] is a pure function of the pattern, the canvas and the primary
//! colour. Patterns are drawn translucent or tinted so content stays legible.

use crate::common::RGBColor;
use crate::deck::primitive::{
    Bounds, Canvas, Paint, ShapeKind, ShapePrimitive, Stop, Stroke, VisualPrimitive,
};
use serde::{Deserialize, Serialize};

/// Known background patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternId {
    /// Plain background, no decoration
    #[default]
    Solid,
    Dots,
    Grid,
    Waves,
    Gradient,
    Flag,
    Futuristic,
    Organic,
    Stripes,
    Circles,
}

impl PatternId {
    /// Parse a pattern identifier. Unknown identifiers degrade to [`PatternId::Solid`].
    pub fn parse(id: &str) -> Self {
        Self::lookup(id).unwrap_or(PatternId::Solid)
    }

    /// Parse a pattern identifier, `None` when unrecognized.
    pub fn lookup(id: &str) -> Option<Self> {
        let id = id.trim().to_ascii_lowercase().replace('_', "-");
        let pattern = match id.as_str() {
            "solid" | "none" | "plain" => PatternId::Solid,
            "dots" | "dot" | "dot-grid" | "dotted" => PatternId::Dots,
            "grid" | "lines" | "line-grid" => PatternId::Grid,
            "waves" | "wave" => PatternId::Waves,
            "gradient" | "linear-gradient" => PatternId::Gradient,
            "flag" | "bands" | "flag-bands" => PatternId::Flag,
            "futuristic" | "tech" | "constellation" => PatternId::Futuristic,
            "organic" | "leaves" | "leaf" => PatternId::Organic,
            "stripes" | "diagonal" | "diagonal-stripes" => PatternId::Stripes,
            "circles" | "corner-circles" | "rings" => PatternId::Circles,
            _ => return None,
        };
        Some(pattern)
    }
}

/// Render the decoration layer for `pattern`.
pub fn render(pattern: PatternId, canvas: Canvas, primary: RGBColor) -> Vec<VisualPrimitive> {
    let shapes = match pattern {
        PatternId::Solid => Vec::new(),
        PatternId::Dots => dots(canvas, primary),
        PatternId::Grid => grid(canvas, primary),
        PatternId::Waves => waves(canvas, primary),
        PatternId::Gradient => gradient(canvas, primary),
        PatternId::Flag => flag(canvas, primary),
        PatternId::Futuristic => futuristic(canvas, primary),
        PatternId::Organic => organic(canvas, primary),
        PatternId::Stripes => stripes(canvas, primary),
        PatternId::Circles => circles(canvas, primary),
    };
    shapes.into_iter().map(VisualPrimitive::Shape).collect()
}

fn dots(canvas: Canvas, primary: RGBColor) -> Vec<ShapePrimitive> {
    const SPACING: f64 = 0.6;
    const DIAMETER: f64 = 0.06;
    let cols = (canvas.width / SPACING).floor() as usize;
    let rows = (canvas.height / SPACING).floor() as usize;
    let mut shapes = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            let cx = SPACING * (col as f64 + 0.5);
            let cy = SPACING * (row as f64 + 0.5);
            shapes.push(
                ShapePrimitive::new(
                    ShapeKind::Ellipse,
                    Bounds::centered(cx, cy, DIAMETER, DIAMETER),
                )
                .filled(Paint::translucent(primary, 0.8)),
            );
        }
    }
    shapes
}

fn grid(canvas: Canvas, primary: RGBColor) -> Vec<ShapePrimitive> {
    const SPACING: f64 = 0.75;
    let stroke = Stroke::new(primary.tint(0.85), 0.5);
    let mut shapes = Vec::new();
    let mut x = SPACING;
    while x < canvas.width {
        shapes.push(
            ShapePrimitive::new(ShapeKind::Line, Bounds::new(x, 0.0, 0.0, canvas.height))
                .stroked(stroke),
        );
        x += SPACING;
    }
    let mut y = SPACING;
    while y < canvas.height {
        shapes.push(
            ShapePrimitive::new(ShapeKind::Line, Bounds::new(0.0, y, canvas.width, 0.0))
                .stroked(stroke),
        );
        y += SPACING;
    }
    shapes
}

fn waves(canvas: Canvas, primary: RGBColor) -> Vec<ShapePrimitive> {
    [(1.3, 0.75), (1.0, 0.82), (0.7, 0.9)]
        .into_iter()
        .enumerate()
        .map(|(i, (height, transparency))| {
            let overhang = 0.4 * i as f64;
            ShapePrimitive::new(
                ShapeKind::Wave,
                Bounds::new(
                    -overhang,
                    canvas.height - height,
                    canvas.width + 2.0 * overhang,
                    height + 0.2,
                ),
            )
            .filled(Paint::translucent(primary, transparency))
        })
        .collect()
}

fn gradient(canvas: Canvas, primary: RGBColor) -> Vec<ShapePrimitive> {
    vec![
        ShapePrimitive::new(ShapeKind::Rect, canvas.bounds()).filled(Paint::LinearGradient {
            angle: 45.0,
            stops: vec![
                Stop {
                    position: 0.0,
                    color: primary,
                    transparency: 0.75,
                },
                Stop {
                    position: 1.0,
                    color: primary,
                    transparency: 1.0,
                },
            ],
        }),
    ]
}

fn flag(canvas: Canvas, primary: RGBColor) -> Vec<ShapePrimitive> {
    const BAND: f64 = 0.12;
    let mut shapes: Vec<_> = [0.0, 0.35, 0.65]
        .into_iter()
        .enumerate()
        .map(|(i, tint)| {
            ShapePrimitive::new(
                ShapeKind::Rect,
                Bounds::new(0.0, BAND * i as f64, canvas.width, BAND),
            )
            .filled(Paint::solid(primary.tint(tint)))
        })
        .collect();

    // Corner accent, right angle in the bottom-right corner
    let size = canvas.height * 0.3;
    shapes.push(
        ShapePrimitive::new(
            ShapeKind::RightTriangle,
            Bounds::new(canvas.width - size, canvas.height - size, size, size),
        )
        .filled(Paint::translucent(primary, 0.3))
        .rotated(270.0),
    );
    shapes
}

/// Low-discrepancy point in the unit square (additive recurrence on the plastic number).
fn scatter(i: usize) -> (f64, f64) {
    const A1: f64 = 0.754_877_666_246_692_7;
    const A2: f64 = 0.569_840_290_998_053_3;
    let n = i as f64 + 1.0;
    ((0.5 + A1 * n).fract(), (0.5 + A2 * n).fract())
}

fn futuristic(canvas: Canvas, primary: RGBColor) -> Vec<ShapePrimitive> {
    const POINTS: usize = 42;
    let mut shapes = Vec::with_capacity(POINTS + 6);
    for i in 0..POINTS {
        let (u, v) = scatter(i);
        let d = 0.03 + 0.03 * (i % 3) as f64;
        shapes.push(
            ShapePrimitive::new(
                ShapeKind::Ellipse,
                Bounds::centered(u * canvas.width, v * canvas.height, d, d),
            )
            .filled(Paint::translucent(primary, 0.45 + 0.15 * (i % 3) as f64)),
        );
    }

    for (cx, cy) in [
        (canvas.width * 0.86, canvas.height * 0.2),
        (canvas.width * 0.1, canvas.height * 0.84),
    ] {
        for ring in 0..3 {
            let d = 0.5 + 0.45 * ring as f64;
            shapes.push(
                ShapePrimitive::new(ShapeKind::Ellipse, Bounds::centered(cx, cy, d, d))
                    .stroked(Stroke::new(primary.tint(0.2 * ring as f64), 0.75)),
            );
        }
    }
    shapes
}

fn organic(canvas: Canvas, primary: RGBColor) -> Vec<ShapePrimitive> {
    let leaf = 0.9;
    let mut shapes: Vec<_> = [0.0, 40.0, 80.0, 120.0]
        .into_iter()
        .enumerate()
        .map(|(i, angle)| {
            ShapePrimitive::new(
                ShapeKind::Teardrop,
                Bounds::new(
                    canvas.width - leaf - 0.25 - 0.35 * i as f64,
                    0.15 + 0.1 * i as f64,
                    leaf,
                    leaf,
                ),
            )
            .filled(Paint::translucent(primary.tint(0.15 * i as f64), 0.7))
            .rotated(angle)
        })
        .collect();

    shapes.push(
        ShapePrimitive::new(
            ShapeKind::Wave,
            Bounds::new(0.0, canvas.height - 0.8, canvas.width, 0.9),
        )
        .filled(Paint::translucent(primary, 0.85)),
    );
    shapes
}

fn stripes(canvas: Canvas, primary: RGBColor) -> Vec<ShapePrimitive> {
    const WIDTH: f64 = 0.35;
    const PITCH: f64 = 0.55;
    (0..5)
        .map(|i| {
            let x = canvas.width - 2.9 + PITCH * i as f64;
            ShapePrimitive::new(
                ShapeKind::Parallelogram,
                Bounds::new(x, 0.0, WIDTH + 0.6, canvas.height),
            )
            .filled(Paint::translucent(primary, 0.72 + 0.05 * i as f64))
        })
        .collect()
}

fn circles(canvas: Canvas, primary: RGBColor) -> Vec<ShapePrimitive> {
    let mut shapes = Vec::with_capacity(5);
    for (i, d) in [2.0, 3.2, 4.4].into_iter().enumerate() {
        shapes.push(
            ShapePrimitive::new(ShapeKind::Ellipse, Bounds::centered(canvas.width, 0.0, d, d))
                .stroked(Stroke::new(primary.tint(0.25 * i as f64), 1.0)),
        );
    }
    for (i, d) in [1.6, 2.6].into_iter().enumerate() {
        shapes.push(
            ShapePrimitive::new(
                ShapeKind::Ellipse,
                Bounds::centered(0.0, canvas.height, d, d),
            )
            .filled(Paint::translucent(primary, 0.8 + 0.08 * i as f64)),
        );
    }
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIMARY: RGBColor = RGBColor::new(0x25, 0x63, 0xEB);

    #[test]
    fn test_unknown_pattern_is_solid() {
        assert_eq!(PatternId::parse("holographic"), PatternId::Solid);
        assert_eq!(PatternId::lookup("holographic"), None);
        assert!(render(PatternId::parse("holographic"), Canvas::default(), PRIMARY).is_empty());
    }

    #[test]
    fn test_aliases() {
        assert_eq!(PatternId::parse("Dot_Grid"), PatternId::Dots);
        assert_eq!(PatternId::parse(" corner-circles "), PatternId::Circles);
    }

    #[test]
    fn test_every_pattern_is_deterministic_and_finite() {
        let canvas = Canvas::default();
        for pattern in [
            PatternId::Dots,
            PatternId::Grid,
            PatternId::Waves,
            PatternId::Gradient,
            PatternId::Flag,
            PatternId::Futuristic,
            PatternId::Organic,
            PatternId::Stripes,
            PatternId::Circles,
        ] {
            let a = render(pattern, canvas, PRIMARY);
            let b = render(pattern, canvas, PRIMARY);
            assert!(!a.is_empty(), "{pattern:?} drew nothing");
            assert_eq!(a, b);
            assert!(a.iter().all(|p| p.bounds().is_finite()));
        }
    }

    #[test]
    fn test_flag_has_corner_accent() {
        let shapes = render(PatternId::Flag, Canvas::default(), PRIMARY);
        assert_eq!(shapes.len(), 4);
        let accent = shapes.last().and_then(|p| p.as_shape()).unwrap();
        assert_eq!(accent.kind, ShapeKind::RightTriangle);
    }

    #[test]
    fn test_scatter_stays_in_unit_square() {
        for i in 0..500 {
            let (u, v) = scatter(i);
            assert!((0.0..1.0).contains(&u) && (0.0..1.0).contains(&v));
        }
    }
}
