//! # Garment Colors
//!
//! Color facts for garment photos and hex values:
//!
//! - [`name_color`]: nearest named fashion color (CIE76 in LAB space)
//! - [`extract_dominant_colors`]: up to 5 ranked colors of a photo, backdrop removed
//! - [`compute_harmony_score`]: 0-100 harmony of a color combination
//! - [`compute_hash`] / [`find_duplicates`]: average-hash near-duplicate search
//!
//! Everything is synchronous and free of I/O apart from decoding the image
//! buffer handed in. The `wasm` module exports the same operations to JavaScript.
//!
//! ## Example
//!
//! ```
//! use garment_colors::{compute_harmony_score, name_color};
//!
//! let named = name_color("#f00")?;
//! assert_eq!(named.name, "Red");
//! assert_eq!(named.normalized_hex, "#FF0000");
//!
//! assert!(compute_harmony_score(&["#FF0000", "#FF1100"]) >= 90);
//! # Ok::<(), garment_colors::ColorError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod convert;
pub mod error;
pub mod extract;
pub mod harmony;
mod kmeans;
pub mod namer;
pub mod phash;
pub mod wasm;

pub use config::{BackgroundFilter, ClusteringConfig, ExtractorConfig};
pub use error::{ColorError, Result};
pub use extract::{DominantColorExtractor, ExtractedColor, extract_dominant_colors};
pub use harmony::{HarmonyFamily, HarmonyReport, classify_harmony, compute_harmony_score};
pub use namer::{ColorName, name_color, palette_entries};
pub use phash::{
    DEFAULT_DUPLICATE_THRESHOLD, DuplicateMatch, HashCandidate, PerceptualHash, compute_hash,
    compute_hash_from_image, find_duplicates, hamming_distance,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_name_serialization() {
        let named = name_color("#000080").unwrap();
        let json = serde_json::to_string(&named).unwrap();
        assert_eq!(
            json,
            r##"{"name":"Navy","canonical_hex":"#000080","normalized_hex":"#000080"}"##
        );
        let back: ColorName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, named);
    }

    #[test]
    fn test_harmony_report_serialization() {
        let report = classify_harmony(&["#FF0000", "#00FFFF"]);
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"family":"complementary","score":82}"#);
    }
}
