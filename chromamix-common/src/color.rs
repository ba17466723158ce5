//! Color model and color-space conversions
//!
//! Hex strings are accepted case-insensitively with an optional leading `#`
//! and are always produced as uppercase `#RRGGBB`. RGB channels are `f64` so
//! that mixing can carry fractional values until the final hex formatting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB triplet, each channel in [0, 255]
///
/// Channels may be fractional while a mix is being computed; they are only
/// rounded by [`rgb_to_hex`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl RgbColor {
    pub const WHITE: RgbColor = RgbColor::new(255.0, 255.0, 255.0);
    pub const BLACK: RgbColor = RgbColor::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Format as an uppercase `#RRGGBB` string (channels rounded)
    pub fn to_hex(&self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }
}

/// A named color with its wheel hue
///
/// `hex` is always a valid, uppercase `#RRGGBB` string. `hue` is integer
/// degrees in [0, 360); colors that do not come from the wheel (lab mixes,
/// arbitrary picks) carry hue 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColorRecord")]
pub struct Color {
    pub name: String,
    pub hex: String,
    pub hue: u16,
}

/// Unvalidated wire shape of [`Color`]
#[derive(Deserialize)]
struct ColorRecord {
    name: String,
    hex: String,
    #[serde(default)]
    hue: u16,
}

impl TryFrom<ColorRecord> for Color {
    type Error = String;

    fn try_from(record: ColorRecord) -> Result<Self, Self::Error> {
        Color::new(record.name, &record.hex, record.hue)
            .ok_or_else(|| format!("invalid hex color: {:?}", record.hex))
    }
}

impl Color {
    /// Build a color, normalizing `hex` to uppercase `#RRGGBB`
    ///
    /// Returns `None` if `hex` is not a 6-digit hex triplet. Hues of 360 or
    /// more wrap around.
    pub fn new(name: impl Into<String>, hex: &str, hue: u16) -> Option<Self> {
        let hex = normalize_hex(hex)?;
        Some(Self {
            name: name.into(),
            hex,
            hue: hue % 360,
        })
    }

    /// Parsed RGB value of this color
    pub fn rgb(&self) -> RgbColor {
        // hex is validated at construction
        hex_to_rgb(&self.hex).unwrap_or(RgbColor::BLACK)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.hex)
    }
}

/// Parse a `#RRGGBB` / `RRGGBB` string
///
/// Exactly six hex digits are required; 3-digit shorthand, alpha channels
/// and surrounding whitespace are rejected.
pub fn hex_to_rgb(hex: &str) -> Option<RgbColor> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();

    Some(RgbColor {
        r: channel(0..2)? as f64,
        g: channel(2..4)? as f64,
        b: channel(4..6)? as f64,
    })
}

/// Format channels as uppercase `#RRGGBB`
///
/// Each channel is rounded to the nearest integer. Callers pass values in
/// [0, 255]; anything outside is clamped.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    let byte = |c: f64| c.round().clamp(0.0, 255.0) as u8;
    format!("#{:02X}{:02X}{:02X}", byte(r), byte(g), byte(b))
}

/// Normalize a hex string to uppercase `#RRGGBB`, or `None` if invalid
pub fn normalize_hex(hex: &str) -> Option<String> {
    hex_to_rgb(hex).map(|rgb| rgb.to_hex())
}

/// Squared Euclidean distance in RGB space
///
/// Only meaningful for comparisons (nearest-neighbor search); the square
/// root is never taken.
pub fn color_distance(a: &RgbColor, b: &RgbColor) -> f64 {
    let dr = a.r - b.r;
    let dg = a.g - b.g;
    let db = a.b - b.b;
    dr * dr + dg * dg + db * db
}

/// Normalize any integer hue into [0, 360)
pub fn normalize_hue(hue: i32) -> u16 {
    hue.rem_euclid(360) as u16
}

/// Swatch string for a hue at full saturation and 50% lightness
pub fn hsl_string(hue: i32) -> String {
    format!("hsl({}, 100%, 50%)", normalize_hue(hue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb_with_and_without_hash() {
        let expected = RgbColor::new(255.0, 87.0, 51.0);
        assert_eq!(hex_to_rgb("#FF5733"), Some(expected));
        assert_eq!(hex_to_rgb("FF5733"), Some(expected));
        assert_eq!(hex_to_rgb("#ff5733"), Some(expected));
    }

    #[test]
    fn test_hex_to_rgb_rejects_malformed_input() {
        for bad in ["#ABC", "red", "#GGHHII", "", "#", "#FF57331", "##FF5733", " #FF5733", "#FF 733"] {
            assert_eq!(hex_to_rgb(bad), None, "{:?} should not parse", bad);
        }
    }

    #[test]
    fn test_hex_to_rgb_rejects_non_ascii() {
        // six bytes but not six hex digits
        assert_eq!(hex_to_rgb("#ééé"), None);
    }

    #[test]
    fn test_rgb_to_hex_rounds_and_pads() {
        assert_eq!(rgb_to_hex(255.0, 127.5, 0.0), "#FF8000");
        assert_eq!(rgb_to_hex(191.25, 191.25, 191.25), "#BFBFBF");
        assert_eq!(rgb_to_hex(1.0, 2.0, 3.0), "#010203");
    }

    #[test]
    fn test_rgb_to_hex_clamps_out_of_range() {
        assert_eq!(rgb_to_hex(300.0, -4.0, 255.4), "#FF00FF");
    }

    #[test]
    fn test_round_trip_normalizes_case() {
        for hex in ["#a1b2c3", "#000000", "#FFFFFF", "0f0f0f", "#7FfF80"] {
            let rgb = hex_to_rgb(hex).unwrap();
            let back = rgb_to_hex(rgb.r, rgb.g, rgb.b);
            let digits = hex.trim_start_matches('#').to_uppercase();
            assert_eq!(back, format!("#{}", digits));
        }
    }

    #[test]
    fn test_color_distance_is_squared() {
        let a = RgbColor::new(0.0, 0.0, 0.0);
        let b = RgbColor::new(3.0, 4.0, 0.0);
        assert_eq!(color_distance(&a, &b), 25.0);
        assert_eq!(color_distance(&b, &b), 0.0);
    }

    #[test]
    fn test_color_new_normalizes() {
        let color = Color::new("Teal", "008080", 540).unwrap();
        assert_eq!(color.hex, "#008080");
        assert_eq!(color.hue, 180);
        assert!(Color::new("Bad", "#12345", 0).is_none());
    }

    #[test]
    fn test_color_deserialize_validates_hex() {
        let ok: Color = serde_json::from_str(r##"{"name":"Mint","hex":"#aaffcc","hue":150}"##).unwrap();
        assert_eq!(ok.hex, "#AAFFCC");

        let missing_hue: Color = serde_json::from_str(r##"{"name":"Mix","hex":"#123456"}"##).unwrap();
        assert_eq!(missing_hue.hue, 0);

        let bad = serde_json::from_str::<Color>(r#"{"name":"Nope","hex":"red","hue":0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_hsl_string_normalizes_hue() {
        assert_eq!(hsl_string(-30), "hsl(330, 100%, 50%)");
        assert_eq!(hsl_string(540), "hsl(180, 100%, 50%)");
        assert_eq!(hsl_string(0), "hsl(0, 100%, 50%)");
    }
}
