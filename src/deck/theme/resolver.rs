use super::contrast::correct_text_color;
use super::presets::{self, Preset};
use super::{Design, Fonts, Palette, ResolvedTheme};
use crate::deck::pattern::PatternId;
use crate::deck::spec::ThemeSpec;
use tracing::debug;

/// Resolve the deck theme: defaults, then the preset, then explicit overrides.
///
/// The preset is `spec.preset` when it names a known preset, otherwise the
/// preset mapped from `presentation_type`. Overrides are merged key by key, so
/// overriding one font keeps the preset's other fonts.
pub fn resolve_theme(spec: &ThemeSpec, presentation_type: Option<&str>) -> ResolvedTheme {
    let mut theme = ResolvedTheme::default();

    let preset = match spec.preset.as_deref() {
        Some(name) => presets::get(name).or_else(|| {
            debug!(preset = name, "unknown theme preset ignored");
            None
        }),
        None => None,
    }
    .or_else(|| presentation_type.and_then(presets::for_presentation_type));

    if let Some(preset) = preset {
        apply_preset(&mut theme, preset);
    }

    apply_overrides(&mut theme, spec);

    let bg = theme.colors.background;
    theme.colors.text = correct_text_color(theme.colors.text, bg);
    theme.colors.text_light = correct_text_color(theme.colors.text_light, bg);

    theme
}

fn apply_preset(theme: &mut ResolvedTheme, preset: &Preset) {
    theme.name = preset.name.to_string();
    theme.colors = Palette {
        primary: preset.primary,
        secondary: preset.secondary,
        accent: preset.accent,
        background: preset.background,
        text: preset.text,
        text_light: preset.text_light,
        success: preset.success,
        warning: preset.warning,
        error: preset.error,
    };
    theme.fonts = Fonts {
        heading: preset.heading_font.to_string(),
        body: preset.body_font.to_string(),
        accent: preset.accent_font.to_string(),
    };
    theme.design = Design {
        background_pattern: PatternId::parse(preset.pattern),
        corner_radius: preset.corner_radius,
        shadows: preset.shadows,
    };
}

fn apply_overrides(theme: &mut ResolvedTheme, spec: &ThemeSpec) {
    let colors = &spec.colors;
    let palette = &mut theme.colors;
    for (slot, value) in [
        (&mut palette.primary, colors.primary),
        (&mut palette.secondary, colors.secondary),
        (&mut palette.accent, colors.accent),
        (&mut palette.background, colors.background),
        (&mut palette.text, colors.text),
        (&mut palette.text_light, colors.text_light),
        (&mut palette.success, colors.success),
        (&mut palette.warning, colors.warning),
        (&mut palette.error, colors.error),
    ] {
        if let Some(color) = value {
            *slot = color;
        }
    }

    let fonts = &spec.fonts;
    for (slot, value) in [
        (&mut theme.fonts.heading, &fonts.heading),
        (&mut theme.fonts.body, &fonts.body),
        (&mut theme.fonts.accent, &fonts.accent),
    ] {
        if let Some(font) = value {
            slot.clone_from(font);
        }
    }

    let design = &spec.design;
    if let Some(ref pattern) = design.background_pattern {
        theme.design.background_pattern = PatternId::parse(pattern);
    }
    if let Some(radius) = design.corner_radius {
        theme.design.corner_radius = radius;
    }
    if let Some(shadows) = design.shadows {
        theme.design.shadows = shadows;
    }

    if let Some(margin) = spec.spacing.margin.filter(|m| m.is_finite() && *m >= 0.0) {
        theme.spacing.margin = margin;
    }
    if let Some(gap) = spec.spacing.gap.filter(|g| g.is_finite() && *g >= 0.0) {
        theme.spacing.gap = gap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::deck::spec::{ColorOverrides, FontOverrides};

    #[test]
    fn test_dark_background_forces_white_text() {
        let spec = ThemeSpec {
            colors: ColorOverrides {
                background: RGBColor::from_hex("#030F26"),
                ..Default::default()
            },
            ..Default::default()
        };
        let theme = resolve_theme(&spec, None);
        assert_eq!(theme.colors.text, RGBColor::WHITE);
        assert_eq!(theme.colors.text_light, RGBColor::WHITE);
    }

    #[test]
    fn test_overrides_beat_preset() {
        let spec = ThemeSpec {
            preset: Some("corporate".to_string()),
            colors: ColorOverrides {
                primary: Some(RGBColor::new(1, 2, 3)),
                ..Default::default()
            },
            fonts: FontOverrides {
                heading: Some("Futura".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let theme = resolve_theme(&spec, None);
        assert_eq!(theme.name, "corporate");
        assert_eq!(theme.colors.primary, RGBColor::new(1, 2, 3));
        assert_eq!(theme.fonts.heading, "Futura");
        // Sibling fonts survive a partial override
        assert_eq!(theme.fonts.accent, "Calibri Light");
        assert_eq!(theme.design.background_pattern, PatternId::Grid);
    }

    #[test]
    fn test_presentation_type_selects_preset() {
        let theme = resolve_theme(&ThemeSpec::default(), Some("startup"));
        assert_eq!(theme.name, "vibrant");

        let explicit = ThemeSpec {
            preset: Some("nature".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_theme(&explicit, Some("startup")).name, "nature");
    }

    #[test]
    fn test_unknown_preset_falls_back() {
        let spec = ThemeSpec {
            preset: Some("sparkly".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_theme(&spec, None), ResolvedTheme::default());
        assert_eq!(resolve_theme(&spec, Some("tech")).name, "futuristic");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let spec = ThemeSpec {
            preset: Some("futuristic".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_theme(&spec, None), resolve_theme(&spec, None));
    }
}
