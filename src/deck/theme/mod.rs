//! Theme resolution.
//!
//! A [`ResolvedTheme`] is built once per generation call by layering the
//! built-in defaults, an optional preset and the caller's overrides, then
//! correcting text colours for contrast. It is read-only afterwards.

pub mod contrast;
pub mod presets;
mod resolver;
pub mod style;

pub use resolver::resolve_theme;

use crate::common::RGBColor;
use crate::deck::pattern::PatternId;
use crate::deck::spec::CornerRadius;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: RGBColor,
    pub secondary: RGBColor,
    pub accent: RGBColor,
    pub background: RGBColor,
    pub text: RGBColor,
    pub text_light: RGBColor,
    pub success: RGBColor,
    pub warning: RGBColor,
    pub error: RGBColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fonts {
    pub heading: String,
    pub body: String,
    pub accent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    pub background_pattern: PatternId,
    pub corner_radius: CornerRadius,
    pub shadows: bool,
}

/// Spacing in inches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spacing {
    pub margin: f64,
    pub gap: f64,
}

/// Fully populated, contrast-corrected theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTheme {
    /// Preset the theme was built on, or `"default"`
    pub name: String,
    pub colors: Palette,
    pub fonts: Fonts,
    pub design: Design,
    pub spacing: Spacing,
}

impl Default for ResolvedTheme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            colors: Palette {
                primary: RGBColor::new(0x25, 0x63, 0xEB),
                secondary: RGBColor::new(0x7C, 0x3A, 0xED),
                accent: RGBColor::new(0x06, 0xB6, 0xD4),
                background: RGBColor::WHITE,
                text: RGBColor::new(0x1F, 0x29, 0x37),
                text_light: RGBColor::new(0x6B, 0x72, 0x80),
                success: RGBColor::new(0x10, 0xB9, 0x81),
                warning: RGBColor::new(0xF5, 0x9E, 0x0B),
                error: RGBColor::new(0xEF, 0x44, 0x44),
            },
            fonts: Fonts {
                heading: "Calibri".to_string(),
                body: "Calibri".to_string(),
                accent: "Calibri Light".to_string(),
            },
            design: Design {
                background_pattern: PatternId::Solid,
                corner_radius: CornerRadius::Medium,
                shadows: true,
            },
            spacing: Spacing {
                margin: 0.5,
                gap: 0.25,
            },
        }
    }
}

impl ResolvedTheme {
    /// Three-colour rotation used for bullets and step markers.
    pub fn rotation_color(&self, index: usize) -> RGBColor {
        match index % 3 {
            0 => self.colors.primary,
            1 => self.colors.secondary,
            _ => self.colors.accent,
        }
    }

    /// Eight-colour rotation for chart series and slices.
    pub fn series_color(&self, index: usize) -> RGBColor {
        let c = &self.colors;
        match index % 8 {
            0 => c.primary,
            1 => c.secondary,
            2 => c.accent,
            3 => c.success,
            4 => c.warning,
            5 => c.error,
            6 => c.primary.shade(0.35),
            _ => c.secondary.tint(0.35),
        }
    }

    /// Rounded-rectangle adjustment for the theme's rounding level.
    pub fn corner_adjustment(&self) -> Option<u32> {
        style::corner_adjustment(self.design.corner_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_rotation_wraps() {
        let theme = ResolvedTheme::default();
        assert_eq!(theme.series_color(0), theme.series_color(8));
        assert_ne!(theme.series_color(6), theme.series_color(0));
        assert_eq!(theme.rotation_color(4), theme.colors.secondary);
    }

    #[test]
    fn test_serializes_hex_colors() {
        let json = serde_json::to_value(ResolvedTheme::default()).unwrap();
        assert_eq!(json["colors"]["background"], "#FFFFFF");
        assert_eq!(json["design"]["backgroundPattern"], "solid");
    }
}
