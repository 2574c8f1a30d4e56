//! Built-in theme presets.
//!
//! Static, read-only tables; looked up by lower-cased name.

use crate::common::RGBColor;
use crate::deck::spec::CornerRadius;
use phf::phf_map;

/// A complete named theme.
#[derive(Debug)]
pub struct Preset {
    pub name: &'static str,
    pub primary: RGBColor,
    pub secondary: RGBColor,
    pub accent: RGBColor,
    pub background: RGBColor,
    pub text: RGBColor,
    pub text_light: RGBColor,
    pub success: RGBColor,
    pub warning: RGBColor,
    pub error: RGBColor,
    pub heading_font: &'static str,
    pub body_font: &'static str,
    pub accent_font: &'static str,
    pub pattern: &'static str,
    pub corner_radius: CornerRadius,
    pub shadows: bool,
}

const fn rgb(hex: u32) -> RGBColor {
    RGBColor::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

static PRESETS: phf::Map<&'static str, Preset> = phf_map! {
    "corporate" => Preset {
        name: "corporate",
        primary: rgb(0x1E3A8A),
        secondary: rgb(0x3B82F6),
        accent: rgb(0xF59E0B),
        background: rgb(0xFFFFFF),
        text: rgb(0x1F2937),
        text_light: rgb(0x6B7280),
        success: rgb(0x059669),
        warning: rgb(0xD97706),
        error: rgb(0xDC2626),
        heading_font: "Calibri",
        body_font: "Calibri",
        accent_font: "Calibri Light",
        pattern: "grid",
        corner_radius: CornerRadius::Low,
        shadows: true,
    },
    "vibrant" => Preset {
        name: "vibrant",
        primary: rgb(0x7C3AED),
        secondary: rgb(0xEC4899),
        accent: rgb(0xF97316),
        background: rgb(0xFFFBF5),
        text: rgb(0x1E1B4B),
        text_light: rgb(0x6B7280),
        success: rgb(0x10B981),
        warning: rgb(0xF59E0B),
        error: rgb(0xEF4444),
        heading_font: "Montserrat",
        body_font: "Open Sans",
        accent_font: "Montserrat",
        pattern: "waves",
        corner_radius: CornerRadius::High,
        shadows: true,
    },
    "nature" => Preset {
        name: "nature",
        primary: rgb(0x166534),
        secondary: rgb(0x65A30D),
        accent: rgb(0xCA8A04),
        background: rgb(0xF7FBF2),
        text: rgb(0x1C2B1A),
        text_light: rgb(0x5B6B55),
        success: rgb(0x15803D),
        warning: rgb(0xB45309),
        error: rgb(0xB91C1C),
        heading_font: "Georgia",
        body_font: "Verdana",
        accent_font: "Georgia",
        pattern: "organic",
        corner_radius: CornerRadius::Medium,
        shadows: false,
    },
    "futuristic" => Preset {
        name: "futuristic",
        primary: rgb(0x22D3EE),
        secondary: rgb(0xA855F7),
        accent: rgb(0x34D399),
        background: rgb(0x030F26),
        text: rgb(0xE2E8F0),
        text_light: rgb(0x94A3B8),
        success: rgb(0x4ADE80),
        warning: rgb(0xFACC15),
        error: rgb(0xF87171),
        heading_font: "Segoe UI",
        body_font: "Segoe UI",
        accent_font: "Consolas",
        pattern: "futuristic",
        corner_radius: CornerRadius::Low,
        shadows: false,
    },
    "elegant" => Preset {
        name: "elegant",
        primary: rgb(0x1F2937),
        secondary: rgb(0x9F1239),
        accent: rgb(0xB08D57),
        background: rgb(0xFAF7F2),
        text: rgb(0x111827),
        text_light: rgb(0x6B6357),
        success: rgb(0x3F6212),
        warning: rgb(0xA16207),
        error: rgb(0x991B1B),
        heading_font: "Garamond",
        body_font: "Georgia",
        accent_font: "Garamond",
        pattern: "circles",
        corner_radius: CornerRadius::None,
        shadows: false,
    },
    "minimal" => Preset {
        name: "minimal",
        primary: rgb(0x111827),
        secondary: rgb(0x4B5563),
        accent: rgb(0x2563EB),
        background: rgb(0xFFFFFF),
        text: rgb(0x111827),
        text_light: rgb(0x6B7280),
        success: rgb(0x16A34A),
        warning: rgb(0xCA8A04),
        error: rgb(0xDC2626),
        heading_font: "Helvetica",
        body_font: "Helvetica",
        accent_font: "Helvetica",
        pattern: "solid",
        corner_radius: CornerRadius::None,
        shadows: false,
    },
    "bold" => Preset {
        name: "bold",
        primary: rgb(0xDC2626),
        secondary: rgb(0x111827),
        accent: rgb(0xFBBF24),
        background: rgb(0xFFFFFF),
        text: rgb(0x111827),
        text_light: rgb(0x4B5563),
        success: rgb(0x16A34A),
        warning: rgb(0xF59E0B),
        error: rgb(0xB91C1C),
        heading_font: "Arial Black",
        body_font: "Arial",
        accent_font: "Arial",
        pattern: "flag",
        corner_radius: CornerRadius::Medium,
        shadows: true,
    },
    "dark" => Preset {
        name: "dark",
        primary: rgb(0x60A5FA),
        secondary: rgb(0xF472B6),
        accent: rgb(0xFBBF24),
        background: rgb(0x111827),
        text: rgb(0xF9FAFB),
        text_light: rgb(0x9CA3AF),
        success: rgb(0x34D399),
        warning: rgb(0xFBBF24),
        error: rgb(0xF87171),
        heading_font: "Segoe UI",
        body_font: "Segoe UI",
        accent_font: "Segoe UI",
        pattern: "stripes",
        corner_radius: CornerRadius::Medium,
        shadows: false,
    },
};

static PRESENTATION_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
    "business" => "corporate",
    "corporate" => "corporate",
    "pitch" => "vibrant",
    "startup" => "vibrant",
    "marketing" => "vibrant",
    "education" => "nature",
    "academic" => "nature",
    "technical" => "futuristic",
    "tech" => "futuristic",
    "creative" => "elegant",
};

/// Look up a preset by name, ignoring case and surrounding whitespace.
pub fn get(name: &str) -> Option<&'static Preset> {
    PRESETS.get(name.trim().to_ascii_lowercase().as_str())
}

/// The preset implied by a presentation type, if any.
pub fn for_presentation_type(kind: &str) -> Option<&'static Preset> {
    PRESENTATION_TYPES
        .get(kind.trim().to_ascii_lowercase().as_str())
        .and_then(|name| PRESETS.get(*name))
}

/// All preset names, sorted.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<_> = PRESETS.keys().copied().collect();
    names.sort_unstable();
    names
}
