//! Tunable parameters for dominant-color extraction.
//!
//! Defaults reproduce the production behaviour. A config can be built in code
//! or round-tripped through JSON:
//!
//! ```
//! use garment_colors::ExtractorConfig;
//!
//! let config = ExtractorConfig {
//!     seed: Some(7),
//!     ..ExtractorConfig::default()
//! };
//! let json = config.to_json_string()?;
//! assert_eq!(ExtractorConfig::from_json_str(&json)?, config);
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};

/// Complete extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Side of the square working buffer the photo is resampled to
    pub working_size: u32,

    /// Pixels more transparent than this (0 = opaque, 127 = fully transparent) are skipped
    pub max_transparency: u8,

    /// Background filter thresholds
    pub background: BackgroundFilter,

    /// Below this many pixels after strict filtering, fall back to the relaxed filter
    pub relax_below: usize,

    /// Below this many pixels after the relaxed filter, give up
    pub min_pixels: usize,

    /// Clustering parameters
    pub clustering: ClusteringConfig,

    /// Clusters holding less than this fraction of pixels are dropped
    pub min_cluster_share: f32,

    /// Maximum number of colors reported
    pub max_colors: usize,

    /// Fixed RNG seed for reproducible clustering; `None` seeds from entropy
    pub seed: Option<u64>,
}

/// Thresholds of the strict background filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundFilter {
    /// Every channel above this counts as near-white
    pub white_channel: u8,

    /// Channel average above this counts as near-white
    pub white_average: f32,

    /// Channel average below this counts as near-black
    pub black_average: f32,

    /// Channel spread at or below this counts as gray
    pub gray_spread: u8,

    /// Gray pixels are only dropped when their average is above this
    pub gray_average: f32,
}

/// K-means parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Upper bound on k
    pub max_clusters: usize,

    /// One cluster per this many pixels, before clamping to `1..=max_clusters`
    pub pixels_per_cluster: usize,

    /// Maximum assignment/update rounds
    pub max_iterations: usize,

    /// Stop once no centroid moves more than this (RGB units)
    pub convergence: f32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            working_size: 100,
            max_transparency: 64,
            background: BackgroundFilter::default(),
            relax_below: 100,
            min_pixels: 10,
            clustering: ClusteringConfig::default(),
            min_cluster_share: 0.05,
            max_colors: 5,
            seed: None,
        }
    }
}

impl Default for BackgroundFilter {
    fn default() -> Self {
        Self {
            white_channel: 240,
            white_average: 235.0,
            black_average: 20.0,
            gray_spread: 10,
            gray_average: 200.0,
        }
    }
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            max_clusters: 5,
            pixels_per_cluster: 200,
            max_iterations: 20,
            convergence: 1.0,
        }
    }
}

impl ClusteringConfig {
    /// Number of clusters for `pixel_count` filtered pixels.
    pub fn cluster_count(&self, pixel_count: usize) -> usize {
        (pixel_count / self.pixels_per_cluster.max(1)).clamp(1, self.max_clusters.max(1))
    }
}

impl ExtractorConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_count() {
        let clustering = ClusteringConfig::default();
        assert_eq!(clustering.cluster_count(10), 1);
        assert_eq!(clustering.cluster_count(199), 1);
        assert_eq!(clustering.cluster_count(400), 2);
        assert_eq!(clustering.cluster_count(999), 4);
        assert_eq!(clustering.cluster_count(10_000), 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"seed": 42, "clustering": {"max_iterations": 5}}"#;
        let config = ExtractorConfig::from_json_str(json).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.clustering.max_iterations, 5);
        assert_eq!(config.clustering.max_clusters, 5);
        assert_eq!(config.working_size, 100);
        assert_eq!(config.background, BackgroundFilter::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ExtractorConfig::default();
        let json = config.to_json_string().unwrap();
        assert!(json.contains("\"working_size\": 100"));
        assert_eq!(ExtractorConfig::from_json_str(&json).unwrap(), config);
    }
}
