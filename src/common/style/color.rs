use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// RGB color representation.
///
/// Represents a color using red, green, and blue components, each in the range 0-255.
///
/// # Examples
///
/// ```rust
/// use deckwright::common::RGBColor;
///
/// // Create a red color
/// let red = RGBColor::new(255, 0, 0);
///
/// // Create from hex string
/// let blue = RGBColor::from_hex("0000FF").unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    /// Pure white.
    pub const WHITE: RGBColor = RGBColor::new(0xFF, 0xFF, 0xFF);
    /// Pure black.
    pub const BLACK: RGBColor = RGBColor::new(0x00, 0x00, 0x00);

    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an RGB color from a hex string.
    ///
    /// Accepts `RRGGBB`, `#RRGGBB` and the short `#RGB` form.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deckwright::common::RGBColor;
    ///
    /// let red = RGBColor::from_hex("FF0000").unwrap();
    /// let blue = RGBColor::from_hex("#0000FF").unwrap();
    /// let white = RGBColor::from_hex("#fff").unwrap();
    /// assert_eq!(white, RGBColor::WHITE);
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            },
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Self::new(r * 17, g * 17, b * 17))
            },
            _ => None,
        }
    }

    /// Convert to hex string (without # prefix).
    ///
    /// ```rust
    /// use deckwright::common::RGBColor;
    ///
    /// let color = RGBColor::new(255, 0, 0);
    /// assert_eq!(color.to_hex(), "FF0000");
    /// ```
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Perceptual luminance on a 0-255 scale (`0.299R + 0.587G + 0.114B`).
    #[inline]
    pub fn luminance(&self) -> f64 {
        0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64
    }

    /// Absolute luminance distance between two colors.
    #[inline]
    pub fn luminance_distance(&self, other: &RGBColor) -> f64 {
        (self.luminance() - other.luminance()).abs()
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
    pub fn mix(&self, other: &RGBColor, t: f64) -> RGBColor {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        RGBColor::new(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
        )
    }

    /// Lighten towards white by `amount` (0 = unchanged, 1 = white).
    #[inline]
    pub fn tint(&self, amount: f64) -> RGBColor {
        self.mix(&RGBColor::WHITE, amount)
    }

    /// Darken towards black by `amount` (0 = unchanged, 1 = black).
    #[inline]
    pub fn shade(&self, amount: f64) -> RGBColor {
        self.mix(&RGBColor::BLACK, amount)
    }

    /// Whether text drawn on this color should be light.
    #[inline]
    pub fn is_dark(&self) -> bool {
        self.luminance() < 128.0
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl Serialize for RGBColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RGBColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RGBColor::from_hex(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color '{raw}'")))
    }
}
