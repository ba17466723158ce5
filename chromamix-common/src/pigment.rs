//! Base pigments and recipe steps

use crate::color::RgbColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five paints available for mixing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pigment {
    Red,
    Yellow,
    Blue,
    White,
    Black,
}

impl Pigment {
    /// All pigments in display order
    pub const ALL: [Pigment; 5] = [
        Pigment::Red,
        Pigment::Yellow,
        Pigment::Blue,
        Pigment::White,
        Pigment::Black,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Pigment::Red => "Red",
            Pigment::Yellow => "Yellow",
            Pigment::Blue => "Blue",
            Pigment::White => "White",
            Pigment::Black => "Black",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            Pigment::Red => "#FF0000",
            Pigment::Yellow => "#FFFF00",
            Pigment::Blue => "#0000FF",
            Pigment::White => "#FFFFFF",
            Pigment::Black => "#000000",
        }
    }

    pub fn rgb(&self) -> RgbColor {
        match self {
            Pigment::Red => RgbColor::new(255.0, 0.0, 0.0),
            Pigment::Yellow => RgbColor::new(255.0, 255.0, 0.0),
            Pigment::Blue => RgbColor::new(0.0, 0.0, 255.0),
            Pigment::White => RgbColor::WHITE,
            Pigment::Black => RgbColor::BLACK,
        }
    }

    /// Build a recipe step for this pigment
    pub fn step(&self, parts: u32) -> MixingStep {
        MixingStep {
            color_name: self.name().to_string(),
            color_hex: self.hex().to_string(),
            parts,
        }
    }
}

impl fmt::Display for Pigment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pigment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pigment::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown pigment: {}", s))
    }
}

/// One line of a mixing recipe
///
/// Field names are camelCase on the wire (`colorName`, `colorHex`, `parts`)
/// to match the recipe backend's response schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixingStep {
    pub color_name: String,
    pub color_hex: String,
    pub parts: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hex_to_rgb;

    #[test]
    fn test_pigment_hex_matches_rgb() {
        for pigment in Pigment::ALL {
            assert_eq!(hex_to_rgb(pigment.hex()), Some(pigment.rgb()), "{}", pigment);
        }
    }

    #[test]
    fn test_pigment_from_str_is_case_insensitive() {
        assert_eq!("yellow".parse::<Pigment>(), Ok(Pigment::Yellow));
        assert_eq!("BLACK".parse::<Pigment>(), Ok(Pigment::Black));
        assert!("green".parse::<Pigment>().is_err());
    }

    #[test]
    fn test_mixing_step_wire_format() {
        let json = serde_json::to_string(&Pigment::White.step(2)).unwrap();
        assert_eq!(json, r##"{"colorName":"White","colorHex":"#FFFFFF","parts":2}"##);
    }
}
