//! The fixed color wheel
//!
//! Twelve slices at 30° hue steps, each fully saturated at 50% lightness.
//! The order is significant: nearest-entry searches break ties in favor of
//! the earlier entry.

use crate::color::{color_distance, hex_to_rgb, Color};
use std::sync::OnceLock;

/// Wheel slices as (name, hex, hue)
pub const WHEEL_SLICES: [(&str, &str, u16); 12] = [
    ("Red", "#FF0000", 0),
    ("Orange", "#FF8000", 30),
    ("Yellow", "#FFFF00", 60),
    ("Chartreuse", "#80FF00", 90),
    ("Green", "#00FF00", 120),
    ("Spring Green", "#00FF80", 150),
    ("Cyan", "#00FFFF", 180),
    ("Azure", "#0080FF", 210),
    ("Blue", "#0000FF", 240),
    ("Violet", "#8000FF", 270),
    ("Magenta", "#FF00FF", 300),
    ("Rose", "#FF0080", 330),
];

/// The wheel as [`Color`] values, in slice order
pub fn wheel() -> &'static [Color] {
    static WHEEL: OnceLock<Vec<Color>> = OnceLock::new();
    WHEEL.get_or_init(|| {
        WHEEL_SLICES
            .iter()
            .map(|&(name, hex, hue)| Color {
                name: name.to_string(),
                hex: hex.to_string(),
                hue,
            })
            .collect()
    })
}

/// Nearest wheel entry to an arbitrary hex color, by RGB distance
///
/// Unparseable input falls back to the first wheel entry. Ties go to the
/// entry that comes first on the wheel.
pub fn find_closest_palette_entry(target_hex: &str) -> &'static Color {
    let palette = wheel();
    let Some(target) = hex_to_rgb(target_hex) else {
        tracing::debug!(target_hex, "Unparseable hex, falling back to first wheel entry");
        return &palette[0];
    };

    let mut closest = &palette[0];
    let mut min_distance = f64::INFINITY;
    for entry in palette {
        let distance = color_distance(&target, &entry.rgb());
        if distance < min_distance {
            min_distance = distance;
            closest = entry;
        }
    }
    closest
}

/// Circular distance between two hues in degrees
pub fn hue_difference(a: u16, b: u16) -> u16 {
    let diff = (a as i32 - b as i32).unsigned_abs() as u16 % 360;
    diff.min(360 - diff)
}

/// Nearest wheel hue to `target_hue`, by circular hue difference
///
/// This works in hue space and is unrelated to the RGB search in
/// [`find_closest_palette_entry`]. Ties go to the earlier wheel entry.
pub fn find_closest_hue(target_hue: u16) -> u16 {
    let palette = wheel();
    let mut closest = palette[0].hue;
    let mut min_diff = u16::MAX;
    for entry in palette {
        let diff = hue_difference(entry.hue, target_hue);
        if diff < min_diff {
            min_diff = diff;
            closest = entry.hue;
        }
    }
    closest
}
