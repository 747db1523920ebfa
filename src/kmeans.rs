//! Lloyd's k-means over RGB pixels.
//!
//! Seeding picks `k` distinct pixels at random. A cluster that loses all of
//! its members keeps its previous centroid.

use log::debug;
use rand::Rng;
use rand::seq::index;

use crate::config::ClusteringConfig;

pub(crate) type Rgb = [u8; 3];

/// A converged cluster: centroid in RGB space plus the number of member pixels.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Cluster {
    pub centroid: [f32; 3],
    pub size: usize,
}

#[inline]
fn to_f32(p: Rgb) -> [f32; 3] {
    [p[0] as f32, p[1] as f32, p[2] as f32]
}

#[inline]
fn distance_squared(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

/// Index of the nearest centroid; ties keep the lower index.
#[inline]
fn nearest(pixel: [f32; 3], centroids: &[[f32; 3]]) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, &c) in centroids.iter().enumerate() {
        let d = distance_squared(pixel, c);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Run Lloyd rounds on `centroids` until every centroid moves by at most
/// `config.convergence` or `config.max_iterations` rounds have run.
///
/// Returns the number of rounds run.
fn refine(pixels: &[Rgb], centroids: &mut [[f32; 3]], config: &ClusteringConfig) -> usize {
    let k = centroids.len();
    let mut sums = vec![[0f64; 3]; k];
    let mut counts = vec![0usize; k];
    let mut rounds = 0;

    for _ in 0..config.max_iterations {
        rounds += 1;
        sums.iter_mut().for_each(|s| *s = [0.0; 3]);
        counts.iter_mut().for_each(|c| *c = 0);

        for &p in pixels {
            let pf = to_f32(p);
            let i = nearest(pf, centroids);
            sums[i][0] += pf[0] as f64;
            sums[i][1] += pf[1] as f64;
            sums[i][2] += pf[2] as f64;
            counts[i] += 1;
        }

        let mut max_shift = 0f32;
        for i in 0..k {
            if counts[i] == 0 {
                // Empty cluster: keep the previous centroid.
                continue;
            }
            let n = counts[i] as f64;
            let updated = [
                (sums[i][0] / n) as f32,
                (sums[i][1] / n) as f32,
                (sums[i][2] / n) as f32,
            ];
            max_shift = max_shift.max(distance_squared(updated, centroids[i]).sqrt());
            centroids[i] = updated;
        }

        if max_shift <= config.convergence {
            break;
        }
    }

    rounds
}

/// Cluster `pixels` into at most `k` groups.
///
/// Returns one [`Cluster`] per centroid (possibly with `size == 0`), with
/// sizes taken from a final assignment pass against the converged centroids.
pub(crate) fn cluster_pixels<R: Rng + ?Sized>(
    pixels: &[Rgb],
    k: usize,
    config: &ClusteringConfig,
    rng: &mut R,
) -> Vec<Cluster> {
    let k = k.min(pixels.len());
    if k == 0 {
        return Vec::new();
    }

    let mut centroids: Vec<[f32; 3]> = index::sample(rng, pixels.len(), k)
        .into_iter()
        .map(|i| to_f32(pixels[i]))
        .collect();

    let rounds = refine(pixels, &mut centroids, config);

    let mut sizes = vec![0usize; k];
    for &p in pixels {
        sizes[nearest(to_f32(p), &centroids)] += 1;
    }

    debug!("k-means: k={k}, rounds={rounds}, pixels={}", pixels.len());

    centroids
        .into_iter()
        .zip(sizes)
        .map(|(centroid, size)| Cluster { centroid, size })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(0x5eed)
    }

    #[test]
    fn test_empty_input() {
        let clusters = cluster_pixels(&[], 3, &ClusteringConfig::default(), &mut rng());
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_k_is_capped_by_pixel_count() {
        let pixels = [[10, 20, 30], [200, 100, 50]];
        let clusters = cluster_pixels(&pixels, 5, &ClusteringConfig::default(), &mut rng());
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters.iter().map(|c| c.size).sum::<usize>(), 2);
    }

    #[test]
    fn test_two_well_separated_groups() {
        let mut pixels = vec![[250u8, 10, 10]; 300];
        pixels.extend(vec![[10u8, 10, 250]; 100]);

        let mut clusters = cluster_pixels(&pixels, 2, &ClusteringConfig::default(), &mut rng());
        clusters.sort_by(|a, b| b.size.cmp(&a.size));

        assert_eq!(clusters[0].size, 300);
        assert_eq!(clusters[1].size, 100);
        assert_eq!(clusters[0].centroid, [250.0, 10.0, 10.0]);
        assert_eq!(clusters[1].centroid, [10.0, 10.0, 250.0]);
    }

    #[test]
    fn test_identical_seeds_leave_empty_clusters() {
        // Every seed lands on the same color, so all pixels join the first centroid
        // and the rest stay empty with their seed as centroid.
        let pixels = vec![[120u8, 40, 200]; 50];
        let clusters = cluster_pixels(&pixels, 3, &ClusteringConfig::default(), &mut rng());

        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[0].size, 50);
        for empty in &clusters[1..] {
            assert_eq!(empty.size, 0);
            assert_eq!(empty.centroid, [120.0, 40.0, 200.0]);
        }
    }

    #[test]
    fn test_sizes_cover_every_pixel() {
        let pixels: Vec<Rgb> = (0..=255u8).map(|v| [v, v / 2, 255 - v]).collect();
        let clusters = cluster_pixels(&pixels, 4, &ClusteringConfig::default(), &mut rng());
        assert_eq!(clusters.iter().map(|c| c.size).sum::<usize>(), pixels.len());
    }

    #[test]
    fn test_same_seed_same_result() {
        let pixels: Vec<Rgb> = (0..500u32)
            .map(|i| [(i * 7 % 256) as u8, (i * 13 % 256) as u8, (i * 29 % 256) as u8])
            .collect();
        let config = ClusteringConfig::default();
        let a = cluster_pixels(&pixels, 5, &config, &mut rng());
        let b = cluster_pixels(&pixels, 5, &config, &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_nearest_tie_keeps_lower_index() {
        let centroids = [[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [5.0, 5.0, 0.0]];
        assert_eq!(nearest([5.0, 0.0, 0.0], &centroids), 0);
        assert_eq!(nearest([5.0, 0.0, 0.0], &centroids[1..]), 0);
    }

    fn red_and_blue() -> Vec<Rgb> {
        let mut pixels = vec![[250u8, 10, 10]; 300];
        pixels.extend(vec![[10u8, 10, 250]; 100]);
        pixels
    }

    #[test]
    fn test_refine_stops_once_centroids_settle() {
        // round 1 moves each centroid by 50, round 2 moves nothing
        let mut centroids = [[200.0, 10.0, 10.0], [10.0, 10.0, 200.0]];
        let rounds = refine(&red_and_blue(), &mut centroids, &ClusteringConfig::default());

        assert_eq!(rounds, 2);
        assert_eq!(centroids, [[250.0, 10.0, 10.0], [10.0, 10.0, 250.0]]);
    }

    #[test]
    fn test_refine_honours_round_cap() {
        let config = ClusteringConfig {
            max_iterations: 1,
            ..ClusteringConfig::default()
        };
        let mut centroids = [[200.0, 10.0, 10.0], [10.0, 10.0, 200.0]];

        assert_eq!(refine(&red_and_blue(), &mut centroids, &config), 1);
        assert_eq!(centroids, [[250.0, 10.0, 10.0], [10.0, 10.0, 250.0]]);

        let config = ClusteringConfig {
            max_iterations: 0,
            ..ClusteringConfig::default()
        };
        let mut untouched = [[200.0, 10.0, 10.0], [10.0, 10.0, 200.0]];
        assert_eq!(refine(&red_and_blue(), &mut untouched, &config), 0);
        assert_eq!(untouched, [[200.0, 10.0, 10.0], [10.0, 10.0, 200.0]]);
    }

    #[test]
    fn test_refine_movement_at_threshold_counts_as_converged() {
        let config = ClusteringConfig {
            convergence: 50.0,
            ..ClusteringConfig::default()
        };
        let mut centroids = [[200.0, 10.0, 10.0], [10.0, 10.0, 200.0]];

        assert_eq!(refine(&red_and_blue(), &mut centroids, &config), 1);
    }
}
