//! Hex parsing and color space conversion helpers.
//!
//! LAB values follow the sRGB → linear RGB → XYZ → LAB chain under the D65
//! white point (Xn = 0.95047, Yn = 1.0, Zn = 1.08883), which is what
//! `palette`'s default `Lab<D65, f32>` implements.

use std::str::FromStr;

use palette::{FromColor, Hsl, Lab, Srgb};

use crate::error::{ColorError, Result};

/// Normalize a hex color to `#RRGGBB` uppercase.
///
/// Accepts an optional leading `#`, 3-digit shorthand (each nibble doubled)
/// or the full 6-digit form, in any letter case.
pub fn normalize_hex(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::invalid_color(input));
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(ColorError::invalid_color(input)),
    };

    Ok(format!("#{}", expanded.to_ascii_uppercase()))
}

/// Parse a hex color (any accepted form) into 8-bit sRGB.
pub fn parse_hex(input: &str) -> Result<Srgb<u8>> {
    let normalized = normalize_hex(input)?;
    Srgb::<u8>::from_str(&normalized).map_err(|_| ColorError::invalid_color(input))
}

/// Format an 8-bit sRGB color as `#RRGGBB`.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}

/// Convert 8-bit sRGB to CIE LAB (D65).
pub fn srgb_to_lab(color: Srgb<u8>) -> Lab {
    Lab::from_color(color.into_format::<f32>())
}

/// CIE76 color difference: Euclidean distance in LAB space.
pub fn delta_e76(lab1: Lab, lab2: Lab) -> f32 {
    let dl = lab1.l - lab2.l;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// Hue/saturation/lightness with hue in degrees `[0, 360)` and the other two
/// channels in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslPercent {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

/// Convert 8-bit sRGB to HSL. Achromatic colors get hue 0.
pub fn srgb_to_hsl(color: Srgb<u8>) -> HslPercent {
    let hsl: Hsl = Hsl::from_color(color.into_format::<f32>());
    HslPercent {
        hue: hsl.hue.into_positive_degrees() % 360.0,
        saturation: hsl.saturation * 100.0,
        lightness: hsl.lightness * 100.0,
    }
}
