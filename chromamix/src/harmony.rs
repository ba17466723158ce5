//! Color harmonies
//!
//! Companion hues are fixed rotations of a base hue. For highlighting on the
//! wheel each companion is snapped to the nearest wheel hue (circular hue
//! distance), which may collapse several companions onto one slice.

use chromamix_common::color::{hsl_string, normalize_hue};
use chromamix_common::palette::find_closest_hue;
use serde::Serialize;
use std::collections::BTreeSet;

/// Harmony kinds and their rotation offsets in degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonyKind {
    Complementary,
    Analogous,
    Triadic,
}

impl HarmonyKind {
    pub fn offsets(&self) -> &'static [i32] {
        match self {
            Self::Complementary => &[180],
            Self::Analogous => &[-30, 30],
            Self::Triadic => &[120, 240],
        }
    }
}

/// Companion hues of a base hue, each in [0, 360)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Harmony {
    pub base_hue: u16,
    pub complementary: u16,
    pub analogous: [u16; 2],
    pub triadic: [u16; 2],
}

/// Display swatches for each companion hue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarmonySwatches {
    pub complementary: String,
    pub analogous: [String; 2],
    pub triadic: [String; 2],
}

impl Harmony {
    pub fn from_hue(hue: u16) -> Self {
        let rotate = |offset: i32| normalize_hue(hue as i32 + offset);
        Self {
            base_hue: normalize_hue(hue as i32),
            complementary: rotate(180),
            analogous: [rotate(-30), rotate(30)],
            triadic: [rotate(120), rotate(240)],
        }
    }

    /// Companion hues in order: complementary, analogous, triadic
    pub fn hues(&self) -> [u16; 5] {
        [
            self.complementary,
            self.analogous[0],
            self.analogous[1],
            self.triadic[0],
            self.triadic[1],
        ]
    }

    pub fn of_kind(&self, kind: HarmonyKind) -> Vec<u16> {
        kind.offsets()
            .iter()
            .map(|offset| normalize_hue(self.base_hue as i32 + offset))
            .collect()
    }

    pub fn swatches(&self) -> HarmonySwatches {
        let hsl = |hue: u16| hsl_string(hue as i32);
        HarmonySwatches {
            complementary: hsl(self.complementary),
            analogous: [hsl(self.analogous[0]), hsl(self.analogous[1])],
            triadic: [hsl(self.triadic[0]), hsl(self.triadic[1])],
        }
    }

    /// Wheel hues to highlight: each companion snapped independently,
    /// deduplicated, at most five
    pub fn highlighted_palette_hues(&self) -> BTreeSet<u16> {
        self.hues().into_iter().map(find_closest_hue).collect()
    }
}
