//! Hue-based harmony scoring for color combinations.
//!
//! Colors are compared by hue angle in HSL. Low-saturation and very dark or
//! very light colors are treated as neutrals and go with anything.

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::convert::{HslPercent, parse_hex, srgb_to_hsl};

/// Score for combinations that need no analysis (0 or 1 colors).
pub const TRIVIAL_SCORE: u8 = 100;
/// Score for combinations with fewer than two chromatic colors.
pub const NEUTRAL_SCORE: u8 = 90;

const MIN_CHROMATIC_SATURATION: f32 = 10.0;
const MIN_CHROMATIC_LIGHTNESS: f32 = 10.0;
const MAX_CHROMATIC_LIGHTNESS: f32 = 90.0;

const MONOCHROMATIC_MAX_SPREAD: f32 = 15.0;
const ANALOGOUS_MAX_SPREAD: f32 = 45.0;
const COMPLEMENTARY_RANGE: (f32, f32) = (150.0, 210.0);
const TRIADIC_RANGE: (f32, f32) = (100.0, 140.0);

const TIGHT_SATURATION_RANGE: f32 = 20.0;
const WIDE_SATURATION_RANGE: f32 = 50.0;
const SATURATION_ADJUSTMENT: i32 = 5;

/// Harmony family of a color combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonyFamily {
    /// Fewer than two colors
    Trivial,
    /// Fewer than two chromatic colors
    Neutral,
    Monochromatic,
    Analogous,
    Complementary,
    Triadic,
    Clashing,
}

impl HarmonyFamily {
    /// Score before the saturation adjustment.
    pub fn base_score(self) -> u8 {
        match self {
            HarmonyFamily::Trivial => TRIVIAL_SCORE,
            HarmonyFamily::Neutral => NEUTRAL_SCORE,
            HarmonyFamily::Monochromatic => 92,
            HarmonyFamily::Analogous => 82,
            HarmonyFamily::Complementary => 77,
            HarmonyFamily::Triadic => 72,
            HarmonyFamily::Clashing => 35,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HarmonyFamily::Trivial => "Single color",
            HarmonyFamily::Neutral => "Neutral",
            HarmonyFamily::Monochromatic => "Monochromatic",
            HarmonyFamily::Analogous => "Analogous",
            HarmonyFamily::Complementary => "Complementary",
            HarmonyFamily::Triadic => "Triadic",
            HarmonyFamily::Clashing => "Clashing",
        }
    }
}

impl fmt::Display for HarmonyFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification and final score of a color combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarmonyReport {
    pub family: HarmonyFamily,
    /// Final score in `[0, 100]`
    pub score: u8,
}

/// Harmony score in `[0, 100]` for a list of hex colors.
pub fn compute_harmony_score<S: AsRef<str>>(hex_colors: &[S]) -> u8 {
    classify_harmony(hex_colors).score
}

/// Classify a list of hex colors into a harmony family and score it.
///
/// Entries that are not valid hex colors are skipped with a warning.
pub fn classify_harmony<S: AsRef<str>>(hex_colors: &[S]) -> HarmonyReport {
    if hex_colors.len() < 2 {
        return HarmonyReport {
            family: HarmonyFamily::Trivial,
            score: TRIVIAL_SCORE,
        };
    }

    let chromatic: Vec<HslPercent> = hex_colors
        .iter()
        .filter_map(|hex| match parse_hex(hex.as_ref()) {
            Ok(rgb) => Some(srgb_to_hsl(rgb)),
            Err(err) => {
                warn!("harmony: skipping color: {err}");
                None
            }
        })
        .filter(is_chromatic)
        .collect();

    if chromatic.len() < 2 {
        return HarmonyReport {
            family: HarmonyFamily::Neutral,
            score: NEUTRAL_SCORE,
        };
    }

    let distances = pairwise_hue_distances(&chromatic);
    let family = classify_distances(&distances);

    let (min_sat, max_sat) = chromatic
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c.saturation), hi.max(c.saturation))
        });
    let saturation_range = max_sat - min_sat;

    let adjustment = if saturation_range < TIGHT_SATURATION_RANGE {
        SATURATION_ADJUSTMENT
    } else if saturation_range > WIDE_SATURATION_RANGE {
        -SATURATION_ADJUSTMENT
    } else {
        0
    };

    let score = (family.base_score() as i32 + adjustment).clamp(0, 100) as u8;
    HarmonyReport { family, score }
}

fn is_chromatic(c: &HslPercent) -> bool {
    c.saturation > MIN_CHROMATIC_SATURATION
        && c.lightness > MIN_CHROMATIC_LIGHTNESS
        && c.lightness < MAX_CHROMATIC_LIGHTNESS
}

/// Shortest angle between two hues, in `[0, 180]`.
pub fn hue_distance(h1: f32, h2: f32) -> f32 {
    let diff = (h1 - h2).abs();
    diff.min(360.0 - diff)
}

fn pairwise_hue_distances(colors: &[HslPercent]) -> Vec<f32> {
    let mut distances = Vec::with_capacity(colors.len() * (colors.len() - 1) / 2);
    for (i, a) in colors.iter().enumerate() {
        for b in &colors[i + 1..] {
            distances.push(hue_distance(a.hue, b.hue));
        }
    }
    distances
}

/// First matching band wins, in the order the bands are declared.
fn classify_distances(distances: &[f32]) -> HarmonyFamily {
    let max = distances.iter().copied().fold(0.0, f32::max);
    let any_in = |(lo, hi): (f32, f32)| distances.iter().any(|&d| d >= lo && d <= hi);

    if max < MONOCHROMATIC_MAX_SPREAD {
        HarmonyFamily::Monochromatic
    } else if max < ANALOGOUS_MAX_SPREAD {
        HarmonyFamily::Analogous
    } else if any_in(COMPLEMENTARY_RANGE) {
        HarmonyFamily::Complementary
    } else if any_in(TRIADIC_RANGE) {
        HarmonyFamily::Triadic
    } else {
        HarmonyFamily::Clashing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivial_inputs() {
        let empty: [&str; 0] = [];
        assert_eq!(compute_harmony_score(&empty), 100);
        assert_eq!(compute_harmony_score(&["#123456"]), 100);
        assert_eq!(classify_harmony(&["#123456"]).family, HarmonyFamily::Trivial);
    }

    #[test]
    fn test_neutrals_only() {
        let report = classify_harmony(&["#000000", "#FFFFFF", "#808080"]);
        assert_eq!(
            report,
            HarmonyReport {
                family: HarmonyFamily::Neutral,
                score: 90
            }
        );

        // one chromatic color plus neutrals
        assert_eq!(compute_harmony_score(&["#FF0000", "#FFFFFF", "#111111"]), 90);
    }

    #[test]
    fn test_monochromatic() {
        let report = classify_harmony(&["#FF0000", "#FF1100"]);
        assert_eq!(report.family, HarmonyFamily::Monochromatic);
        // equal saturation earns the +5
        assert_eq!(report.score, 97);
    }

    #[test]
    fn test_analogous() {
        // red (0°) and orange (~39°)
        let report = classify_harmony(&["#FF0000", "#FFA500"]);
        assert_eq!(report.family, HarmonyFamily::Analogous);
        assert_eq!(report.score, 87);
    }

    #[test]
    fn test_complementary() {
        let report = classify_harmony(&["#FF0000", "#00FFFF"]);
        assert_eq!(report.family, HarmonyFamily::Complementary);
        assert_eq!(report.score, 82);
    }

    #[test]
    fn test_triadic() {
        let report = classify_harmony(&["#FF0000", "#00FF00", "#0000FF"]);
        assert_eq!(report.family, HarmonyFamily::Triadic);
        assert_eq!(report.score, 77);
    }

    #[test]
    fn test_clashing_with_wide_saturation_range() {
        // red (0°) vs a muted yellow-green (~75°, ~20% saturation)
        let report = classify_harmony(&["#FF0000", "#8C9973"]);
        assert_eq!(report.family, HarmonyFamily::Clashing);
        assert_eq!(report.score, 30);
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        assert_eq!(compute_harmony_score(&["#FF0000", "nope"]), 90);
    }

    #[test]
    fn test_hue_distance_wraps() {
        assert_eq!(hue_distance(350.0, 10.0), 20.0);
        assert_eq!(hue_distance(0.0, 180.0), 180.0);
        assert_eq!(hue_distance(90.0, 90.0), 0.0);
    }

    #[test]
    fn test_band_priority() {
        // complementary wins over triadic when both occur
        assert_eq!(classify_distances(&[170.0, 120.0]), HarmonyFamily::Complementary);
        assert_eq!(classify_distances(&[120.0, 60.0]), HarmonyFamily::Triadic);
        assert_eq!(classify_distances(&[60.0, 145.0]), HarmonyFamily::Clashing);
    }
}
