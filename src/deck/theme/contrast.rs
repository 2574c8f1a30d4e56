//! Text/background contrast correction.

use crate::common::RGBColor;

/// Minimum luminance distance (0-255 scale) for legible text.
pub const MIN_LUMINANCE_DISTANCE: f64 = 125.0;

/// Text colour used on light backgrounds when correction kicks in.
pub const NEAR_BLACK: RGBColor = RGBColor::new(0x1A, 0x1A, 0x1A);

/// Keep `text` if it is far enough from `background`, otherwise force white
/// (dark background) or near-black (light background).
pub fn correct_text_color(text: RGBColor, background: RGBColor) -> RGBColor {
    if text.luminance_distance(&background) >= MIN_LUMINANCE_DISTANCE {
        text
    } else {
        on_color(background)
    }
}

/// The legible extreme for text drawn on `fill`.
#[inline]
pub fn on_color(fill: RGBColor) -> RGBColor {
    if fill.is_dark() { RGBColor::WHITE } else { NEAR_BLACK }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_dark_background_forces_white() {
        let bg = RGBColor::from_hex("#030F26").unwrap();
        let text = RGBColor::from_hex("#1F2937").unwrap();
        assert_eq!(correct_text_color(text, bg), RGBColor::WHITE);
    }

    #[test]
    fn test_light_background_forces_near_black() {
        let bg = RGBColor::from_hex("#F5F5F5").unwrap();
        let text = RGBColor::from_hex("#DDDDDD").unwrap();
        assert_eq!(correct_text_color(text, bg), NEAR_BLACK);
    }

    #[test]
    fn test_legible_text_kept() {
        let text = RGBColor::new(0x22, 0x22, 0x22);
        assert_eq!(correct_text_color(text, RGBColor::WHITE), text);
    }

    proptest! {
        #[test]
        fn prop_corrected_text_is_legible_or_extreme(
            tr in any::<u8>(), tg in any::<u8>(), tb in any::<u8>(),
            br in any::<u8>(), bg in any::<u8>(), bb in any::<u8>(),
        ) {
            let background = RGBColor::new(br, bg, bb);
            let corrected = correct_text_color(RGBColor::new(tr, tg, tb), background);
            prop_assert!(
                corrected.luminance_distance(&background) >= MIN_LUMINANCE_DISTANCE
                    || corrected == RGBColor::WHITE
                    || corrected == NEAR_BLACK
            );
        }
    }
}
