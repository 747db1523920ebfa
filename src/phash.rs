//! Average-hash fingerprints and near-duplicate search.
//!
//! A hash is the 8×8 grayscale thumbnail of an image thresholded against its
//! own mean intensity, written as 64 `'0'`/`'1'` characters in row-major order.

use std::fmt;
use std::str::FromStr;

use image::{DynamicImage, imageops::FilterType};
use serde::{Deserialize, Serialize};

use crate::error::{ColorError, Result};

/// Side of the hash thumbnail.
pub const HASH_SIDE: u32 = 8;
/// Number of bits (characters) in a hash.
pub const HASH_BITS: usize = (HASH_SIDE * HASH_SIDE) as usize;
/// Default maximum Hamming distance for [`find_duplicates`].
pub const DEFAULT_DUPLICATE_THRESHOLD: u32 = 10;

/// A 64-character binary average hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PerceptualHash(String);

impl PerceptualHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hamming distance to another hash.
    pub fn distance(&self, other: &PerceptualHash) -> u32 {
        hamming_distance(&self.0, &other.0)
    }
}

impl FromStr for PerceptualHash {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        let len = s.chars().count();
        if len != HASH_BITS {
            return Err(ColorError::HashLength { len });
        }
        let stray = s.chars().enumerate().find(|&(_, c)| c != '0' && c != '1');
        if let Some((position, digit)) = stray {
            return Err(ColorError::HashDigit { digit, position });
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for PerceptualHash {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<PerceptualHash> for String {
    fn from(hash: PerceptualHash) -> Self {
        hash.0
    }
}

impl fmt::Display for PerceptualHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the average hash of an encoded image.
///
/// # Errors
///
/// Returns [`ColorError::Decode`] if the bytes are not a supported image.
pub fn compute_hash(image_bytes: &[u8]) -> Result<PerceptualHash> {
    let img = image::load_from_memory(image_bytes).map_err(ColorError::decode)?;
    Ok(compute_hash_from_image(&img))
}

/// Compute the average hash of a decoded image.
pub fn compute_hash_from_image(img: &DynamicImage) -> PerceptualHash {
    let thumb = img
        .resize_exact(HASH_SIDE, HASH_SIDE, FilterType::Triangle)
        .to_luma8();

    let intensities: Vec<u32> = thumb.pixels().map(|p| p.0[0] as u32).collect();
    let mean = intensities.iter().sum::<u32>() as f64 / intensities.len() as f64;

    let bits = intensities
        .iter()
        .map(|&v| if v as f64 >= mean { '1' } else { '0' })
        .collect();
    PerceptualHash(bits)
}

/// Number of positions at which two hashes differ.
///
/// Hashes of different lengths (legacy or corrupted data) are maximally
/// distant: the result is 64.
pub fn hamming_distance(a: &str, b: &str) -> u32 {
    if a.len() != b.len() {
        return HASH_BITS as u32;
    }
    a.bytes().zip(b.bytes()).filter(|(x, y)| x != y).count() as u32
}

/// A stored fingerprint to compare against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashCandidate<Id> {
    pub id: Id,
    pub hash: String,
}

/// A candidate within the duplicate threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateMatch<Id> {
    pub id: Id,
    /// `round((1 - distance / 64) * 100)`
    pub similarity: u8,
}

/// Candidates whose hash is within `threshold` bits of `target_hash`.
///
/// Matches are returned in candidate order, not sorted by similarity.
pub fn find_duplicates<Id: Clone>(
    target_hash: &str,
    candidates: &[HashCandidate<Id>],
    threshold: u32,
) -> Vec<DuplicateMatch<Id>> {
    candidates
        .iter()
        .filter_map(|candidate| {
            let distance = hamming_distance(target_hash, &candidate.hash);
            (distance <= threshold).then(|| DuplicateMatch {
                id: candidate.id.clone(),
                similarity: similarity_percent(distance),
            })
        })
        .collect()
}

/// Similarity in percent for a Hamming distance between 64-bit hashes.
pub fn similarity_percent(distance: u32) -> u8 {
    let distance = distance.min(HASH_BITS as u32) as f64;
    ((1.0 - distance / HASH_BITS as f64) * 100.0).round() as u8
}
