//! Nearest-neighbour color naming in CIE LAB space.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, PaletteEntry};
use crate::convert::{delta_e76, normalize_hex, parse_hex, srgb_to_lab};
use crate::error::Result;

/// Human-readable name for a hex color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorName {
    /// Name of the closest catalog color
    pub name: String,
    /// Catalog hex of the closest color
    pub canonical_hex: String,
    /// The caller's color, normalized to `#RRGGBB`
    pub normalized_hex: String,
}

/// Name a hex color by the closest catalog entry (CIE76 distance).
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`](crate::ColorError::InvalidColorFormat)
/// if `hex` is not 3 or 6 hex digits with an optional `#`.
pub fn name_color(hex: &str) -> Result<ColorName> {
    let normalized_hex = normalize_hex(hex)?;
    let lab = srgb_to_lab(parse_hex(&normalized_hex)?);
    let entry = nearest_entry(lab);

    Ok(ColorName {
        name: entry.name.to_string(),
        canonical_hex: entry.hex.to_string(),
        normalized_hex,
    })
}

/// Closest catalog entry to `lab`; ties keep the earlier entry.
pub(crate) fn nearest_entry(lab: palette::Lab) -> &'static PaletteEntry {
    nearest_in(lab, catalog::entries())
}

/// Closest of `entries` to `lab`, scanning in order so the first of several
/// equidistant entries wins. `entries` must not be empty.
fn nearest_in(lab: palette::Lab, entries: &[PaletteEntry]) -> &PaletteEntry {
    let mut best = &entries[0];
    let mut best_dist = f32::INFINITY;

    for entry in entries {
        let dist = delta_e76(lab, entry.lab);
        if dist < best_dist {
            best_dist = dist;
            best = entry;
        }
    }

    best
}

/// Catalog `(name, hex)` pairs in declaration order.
pub fn palette_entries() -> impl Iterator<Item = (&'static str, &'static str)> {
    catalog::entries().iter().map(|e| (e.name, e.hex))
}
