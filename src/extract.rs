use image::{DynamicImage, RgbaImage, imageops::FilterType};
use log::{debug, warn};
use palette::Srgb;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::ExtractorConfig;
use crate::convert::{srgb_to_lab, to_hex};
use crate::error::{ColorError, Result};
use crate::kmeans::{Cluster, Rgb, cluster_pixels};
use crate::namer::nearest_entry;

/// One dominant color of a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedColor {
    /// Cluster centroid as `#RRGGBB`
    pub hex: String,
    /// Catalog name of the centroid
    pub name: String,
}

/// Extract up to 5 dominant colors from an encoded JPEG/PNG/WebP/GIF image.
///
/// Never fails: undecodable or near-empty images give an empty list.
pub fn extract_dominant_colors(image_bytes: &[u8]) -> Vec<ExtractedColor> {
    DominantColorExtractor::default().extract(image_bytes)
}

/// Background-aware dominant color extraction.
///
/// Steps performed:
/// 1. Decode the image (format sniffed from the bytes) and resample it to a
///    square RGBA working buffer, keeping alpha.
/// 2. Drop mostly-transparent pixels, then backdrop pixels (near-white,
///    near-black, light gray). If that leaves too little, only pure white and
///    pure black are dropped instead.
/// 3. Run k-means in RGB space with `k` scaled to the pixel count.
/// 4. Drop insignificant clusters, rank the rest by size and name them.
#[derive(Debug, Clone, Default)]
pub struct DominantColorExtractor {
    config: ExtractorConfig,
}

impl DominantColorExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract dominant colors, logging and swallowing every failure.
    pub fn extract(&self, image_bytes: &[u8]) -> Vec<ExtractedColor> {
        self.try_extract(image_bytes).unwrap_or_else(|err| {
            warn!("dominant color extraction skipped: {err}");
            Vec::new()
        })
    }

    /// Like [`extract`](Self::extract), for an already decoded image.
    pub fn extract_from_image(&self, img: &DynamicImage) -> Vec<ExtractedColor> {
        self.try_extract_from_image(img).unwrap_or_else(|err| {
            warn!("dominant color extraction skipped: {err}");
            Vec::new()
        })
    }

    /// Extract dominant colors, reporting why nothing could be extracted.
    ///
    /// # Errors
    ///
    /// - [`ColorError::Decode`] if the bytes are not a supported image
    /// - [`ColorError::InsufficientSignal`] if background filtering leaves too few pixels
    pub fn try_extract(&self, image_bytes: &[u8]) -> Result<Vec<ExtractedColor>> {
        let img = image::load_from_memory(image_bytes).map_err(ColorError::decode)?;
        self.try_extract_from_image(&img)
    }

    /// Like [`try_extract`](Self::try_extract), for an already decoded image.
    pub fn try_extract_from_image(&self, img: &DynamicImage) -> Result<Vec<ExtractedColor>> {
        let side = self.config.working_size.max(1);
        let working = image::imageops::resize(&img.to_rgba8(), side, side, FilterType::Triangle);

        let sampled = self.sample_visible(&working);
        let pixels = self.filter_background(&sampled)?;

        let k = self.config.clustering.cluster_count(pixels.len());
        let mut rng = match self.config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::seed_from_u64(rand::random()),
        };
        let clusters = cluster_pixels(&pixels, k, &self.config.clustering, &mut rng);

        Ok(self.rank(clusters, pixels.len()))
    }

    // ------------------------------------------------------------
    // Sampling and background filtering
    // ------------------------------------------------------------

    /// RGB of every pixel that is at most half transparent.
    fn sample_visible(&self, working: &RgbaImage) -> Vec<Rgb> {
        working
            .pixels()
            .filter(|p| transparency(p.0[3]) <= self.config.max_transparency)
            .map(|p| [p.0[0], p.0[1], p.0[2]])
            .collect()
    }

    fn filter_background(&self, sampled: &[Rgb]) -> Result<Vec<Rgb>> {
        let strict: Vec<Rgb> = sampled
            .iter()
            .copied()
            .filter(|&p| !self.is_backdrop(p))
            .collect();

        if strict.len() >= self.config.relax_below {
            debug!("background filter kept {} of {} pixels", strict.len(), sampled.len());
            return Ok(strict);
        }

        let relaxed: Vec<Rgb> = sampled
            .iter()
            .copied()
            .filter(|&p| !is_pure_white_or_black(p))
            .collect();
        debug!(
            "strict background filter kept {} pixels, relaxed filter kept {} of {}",
            strict.len(),
            relaxed.len(),
            sampled.len()
        );

        if relaxed.len() < self.config.min_pixels {
            return Err(ColorError::InsufficientSignal {
                pixels: relaxed.len(),
                minimum: self.config.min_pixels,
            });
        }
        Ok(relaxed)
    }

    /// Near-white, near-black or very light gray.
    fn is_backdrop(&self, [r, g, b]: Rgb) -> bool {
        let bg = &self.config.background;
        let avg = (r as f32 + g as f32 + b as f32) / 3.0;

        let near_white = (r > bg.white_channel && g > bg.white_channel && b > bg.white_channel)
            || avg > bg.white_average;
        let near_black = avg < bg.black_average;
        let spread = r.max(g).max(b) - r.min(g).min(b);
        let light_gray = spread <= bg.gray_spread && avg > bg.gray_average;

        near_white || near_black || light_gray
    }

    // ------------------------------------------------------------
    // Ranking
    // ------------------------------------------------------------

    fn rank(&self, clusters: Vec<Cluster>, total: usize) -> Vec<ExtractedColor> {
        let min_size = total as f32 * self.config.min_cluster_share;

        let mut kept: Vec<Cluster> = clusters
            .iter()
            .filter(|c| c.size > 0 && c.size as f32 >= min_size)
            .cloned()
            .collect();

        if kept.is_empty() {
            // Keep the single largest cluster rather than reporting nothing.
            let mut largest: Option<&Cluster> = None;
            for c in &clusters {
                if largest.is_none_or(|l| c.size > l.size) {
                    largest = Some(c);
                }
            }
            kept.extend(largest.cloned());
        }

        kept.sort_by(|a, b| b.size.cmp(&a.size));
        kept.truncate(self.config.max_colors);

        kept.into_iter()
            .map(|c| {
                let rgb = centroid_to_srgb(c.centroid);
                ExtractedColor {
                    hex: to_hex(rgb),
                    name: nearest_entry(srgb_to_lab(rgb)).name.to_string(),
                }
            })
            .collect()
    }
}

/// 8-bit alpha (255 = opaque) to a 0..=127 transparency scale (127 = invisible).
#[inline]
fn transparency(alpha: u8) -> u8 {
    127 - (alpha >> 1)
}

#[inline]
fn is_pure_white_or_black(p: Rgb) -> bool {
    p == [255, 255, 255] || p == [0, 0, 0]
}

fn centroid_to_srgb(c: [f32; 3]) -> Srgb<u8> {
    let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    Srgb::new(channel(c[0]), channel(c[1]), channel(c[2]))
}
