//! Pigment mixing
//!
//! Mixing is a part-weighted linear average in RGB space. It is not a model
//! of real (subtractive) paint: yellow and blue average to gray, not green.
//! Expected outputs depend on this exact formula.

use chromamix_common::color::RgbColor;
use chromamix_common::{Color, Pigment};
use serde::{Deserialize, Serialize};

/// Upper bound of a lab slider
pub const MAX_SLIDER_PARTS: u8 = 10;

/// Part-weighted average of `(color, parts)` entries
///
/// Entries with zero or negative parts are ignored entirely. With no
/// positive parts the result is white. Channels are not rounded.
pub fn mix(entries: &[(RgbColor, i32)]) -> RgbColor {
    let mut total_parts = 0.0;
    let (mut r, mut g, mut b) = (0.0, 0.0, 0.0);

    for (rgb, parts) in entries.iter().filter(|(_, parts)| *parts > 0) {
        let weight = *parts as f64;
        total_parts += weight;
        r += rgb.r * weight;
        g += rgb.g * weight;
        b += rgb.b * weight;
    }

    if total_parts == 0.0 {
        return RgbColor::WHITE;
    }

    RgbColor::new(r / total_parts, g / total_parts, b / total_parts)
}

/// Mix whole pigments
pub fn mix_pigments(parts: &[(Pigment, i32)]) -> RgbColor {
    let entries: Vec<(RgbColor, i32)> = parts.iter().map(|(p, n)| (p.rgb(), *n)).collect();
    mix(&entries)
}

/// Lab slider state: one integer in [0, 10] per pigment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualMix {
    #[serde(default)]
    pub red: u8,
    #[serde(default)]
    pub yellow: u8,
    #[serde(default)]
    pub blue: u8,
    #[serde(default)]
    pub white: u8,
    #[serde(default)]
    pub black: u8,
}

impl ManualMix {
    pub fn get(&self, pigment: Pigment) -> u8 {
        match pigment {
            Pigment::Red => self.red,
            Pigment::Yellow => self.yellow,
            Pigment::Blue => self.blue,
            Pigment::White => self.white,
            Pigment::Black => self.black,
        }
    }

    /// Set one slider, clamping to [0, 10]
    pub fn set(&mut self, pigment: Pigment, parts: u8) {
        let parts = parts.min(MAX_SLIDER_PARTS);
        match pigment {
            Pigment::Red => self.red = parts,
            Pigment::Yellow => self.yellow = parts,
            Pigment::Blue => self.blue = parts,
            Pigment::White => self.white = parts,
            Pigment::Black => self.black = parts,
        }
    }

    /// Copy with every slider clamped to [0, 10]
    pub fn clamped(&self) -> Self {
        let mut mix = Self::default();
        for pigment in Pigment::ALL {
            mix.set(pigment, self.get(pigment));
        }
        mix
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total_parts(&self) -> u32 {
        Pigment::ALL.iter().map(|p| self.get(*p) as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_parts() == 0
    }

    pub fn rgb(&self) -> RgbColor {
        let parts: Vec<(Pigment, i32)> = Pigment::ALL
            .iter()
            .map(|p| (*p, self.get(*p) as i32))
            .collect();
        mix_pigments(&parts)
    }

    pub fn hex(&self) -> String {
        self.rgb().to_hex()
    }

    /// The mix as a savable color, `None` when nothing is mixed
    ///
    /// Mixed colors have no wheel position, so their hue is 0.
    pub fn to_color(&self) -> Option<Color> {
        if self.is_empty() {
            return None;
        }
        let hex = self.hex();
        Color::new(format!("Mix {}", hex), &hex, 0)
    }
}
