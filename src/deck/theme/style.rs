//! Corner-radius and shadow resolution from design tokens.

use crate::common::RGBColor;
use crate::deck::primitive::ShadowStyle;
use crate::deck::spec::CornerRadius;

/// Rounded-rectangle adjustment for a rounding level, `None` for square corners.
pub fn corner_adjustment(level: CornerRadius) -> Option<u32> {
    match level {
        CornerRadius::None => None,
        CornerRadius::Low => Some(8_000),
        CornerRadius::Medium => Some(16_667),
        CornerRadius::High => Some(30_000),
    }
}

/// Soft drop shadow used on panels and cards when shadows are enabled.
pub fn card_shadow(enabled: bool) -> Option<ShadowStyle> {
    enabled.then_some(ShadowStyle {
        color: RGBColor::BLACK,
        transparency: 0.78,
        blur: 8.0,
        offset: 3.0,
        angle: 90.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_levels_increase() {
        assert_eq!(corner_adjustment(CornerRadius::None), None);
        let low = corner_adjustment(CornerRadius::Low).unwrap();
        let medium = corner_adjustment(CornerRadius::Medium).unwrap();
        let high = corner_adjustment(CornerRadius::High).unwrap();
        assert!(low < medium && medium < high);
    }

    #[test]
    fn test_shadow_toggle() {
        assert!(card_shadow(false).is_none());
        assert_eq!(card_shadow(true).map(|s| s.angle), Some(90.0));
    }
}
