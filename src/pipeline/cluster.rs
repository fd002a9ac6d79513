use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::color::Color;
use crate::pipeline::sample::{sample_pixels, PixelBuffer, PixelSample};

/// Palette size used when a request does not name one.
pub const DEFAULT_K: usize = 5;

/// Palette sizes accepted from callers.
pub const MIN_K: usize = 2;
pub const MAX_K: usize = 10;

/// Sample count from which assignment runs on the rayon pool.
const PARALLEL_THRESHOLD: usize = 16_384;
const CHUNK_SIZE: usize = 4_096;

/// Tuning knobs for [`PixelClusterer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterOptions {
    /// Keep one pixel out of every `stride`.
    pub stride: usize,
    /// Pixels with alpha below this are not visually present.
    pub alpha_threshold: u8,
    /// Upper bound on Lloyd rounds.
    pub max_iterations: usize,
    /// Stop once every centroid moved at most this far (squared, 0-255 scale).
    pub convergence: f64,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            stride: 4,
            alpha_threshold: 128,
            max_iterations: 10,
            convergence: 1.0,
        }
    }
}

/// A centroid materialized as a color, with the share of samples it won.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractedColor {
    pub color: Color,
    pub weight: f64,
}

/// Everything one clustering run produced, in centroid order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterOutcome {
    pub colors: Vec<ExtractedColor>,
    pub sample_size: usize,
    pub iterations: usize,
    pub converged: bool,
}

impl ClusterOutcome {
    fn empty(sample_size: usize) -> Self {
        Self {
            colors: Vec::new(),
            sample_size,
            iterations: 0,
            converged: false,
        }
    }
}

/// K-means palette extraction over RGB pixel samples, seeded with k-means++.
///
/// The clusterer holds configuration only. All working state lives inside a
/// single call, so one value can serve any number of calls with different `k`.
#[derive(Debug, Clone, Default)]
pub struct PixelClusterer {
    options: ClusterOptions,
}

impl PixelClusterer {
    pub fn new(options: ClusterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    /// Reduce `pixels` to at most `k` representative colors.
    ///
    /// Returns an empty palette when no opaque pixel survives sampling.
    pub fn generate<R: Rng + ?Sized>(&self, pixels: &PixelBuffer, k: usize, rng: &mut R) -> Vec<Color> {
        self.extract(pixels, k, rng)
            .colors
            .into_iter()
            .map(|extracted| extracted.color)
            .collect()
    }

    /// Same as [`generate`](Self::generate) but keeps cluster weights and run
    /// statistics.
    pub fn extract<R: Rng + ?Sized>(&self, pixels: &PixelBuffer, k: usize, rng: &mut R) -> ClusterOutcome {
        let samples = sample_pixels(pixels, self.options.stride, self.options.alpha_threshold);
        debug!(
            pixels = pixels.pixel_count(),
            samples = samples.len(),
            k,
            "sampled image for clustering"
        );
        if samples.is_empty() || k == 0 {
            return ClusterOutcome::empty(samples.len());
        }

        let mut state = KMeansState::seed(&samples, k, rng);
        let (iterations, converged) =
            state.iterate(self.options.max_iterations, self.options.convergence);
        debug!(iterations, converged, "k-means finished");

        ClusterOutcome {
            colors: state.materialize(),
            sample_size: samples.len(),
            iterations,
            converged,
        }
    }
}

/// RGB point on the 0-255 scale.
type Centroid = [f64; 3];

/// Working set for one clustering call.
struct KMeansState<'a> {
    samples: &'a [PixelSample],
    centroids: Vec<Centroid>,
}

impl<'a> KMeansState<'a> {
    /// k-means++: first centroid uniform, each next one drawn with probability
    /// proportional to its squared distance from the nearest chosen centroid.
    fn seed<R: Rng + ?Sized>(samples: &'a [PixelSample], k: usize, rng: &mut R) -> Self {
        let mut centroids = Vec::with_capacity(k);
        let first = to_point(&samples[rng.random_range(0..samples.len())]);
        centroids.push(first);

        let mut closest: Vec<f64> = samples
            .iter()
            .map(|s| distance_sq(&to_point(s), &first))
            .collect();

        while centroids.len() < k {
            let total: f64 = closest.iter().sum();
            let mut target = rng.random::<f64>() * total;

            let mut chosen = samples.len() - 1;
            for (i, weight) in closest.iter().enumerate() {
                target -= weight;
                if target <= 0.0 {
                    chosen = i;
                    break;
                }
            }

            let next = to_point(&samples[chosen]);
            for (dist, sample) in closest.iter_mut().zip(samples) {
                *dist = dist.min(distance_sq(&to_point(sample), &next));
            }
            centroids.push(next);
        }

        Self { samples, centroids }
    }

    /// Lloyd rounds until converged or out of iterations.
    fn iterate(&mut self, max_iterations: usize, convergence: f64) -> (usize, bool) {
        for round in 1..=max_iterations {
            let sums = accumulate(self.samples, &self.centroids);
            let shift = apply_means(&mut self.centroids, &sums);
            trace!(round, max_shift = shift, "lloyd round");
            if shift <= convergence {
                return (round, true);
            }
        }
        (max_iterations, false)
    }

    fn materialize(&self) -> Vec<ExtractedColor> {
        let sums = accumulate(self.samples, &self.centroids);
        let total = self.samples.len() as f64;
        self.centroids
            .iter()
            .zip(&sums.counts)
            .map(|(c, &count)| ExtractedColor {
                color: Color::from_srgb(c[0] / 255.0, c[1] / 255.0, c[2] / 255.0),
                weight: count as f64 / total,
            })
            .collect()
    }
}

/// Per-cluster channel sums and member counts. Integer sums make merging
/// exact, so chunked and sequential accumulation agree bit for bit.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ClusterSums {
    sums: Vec<[u64; 3]>,
    counts: Vec<u64>,
}

impl ClusterSums {
    fn new(k: usize) -> Self {
        Self {
            sums: vec![[0; 3]; k],
            counts: vec![0; k],
        }
    }

    fn add(&mut self, cluster: usize, sample: &PixelSample) {
        let sum = &mut self.sums[cluster];
        for (acc, &channel) in sum.iter_mut().zip(sample) {
            *acc += u64::from(channel);
        }
        self.counts[cluster] += 1;
    }

    fn merge(mut self, other: Self) -> Self {
        for (mine, theirs) in self.sums.iter_mut().zip(&other.sums) {
            for (a, b) in mine.iter_mut().zip(theirs) {
                *a += b;
            }
        }
        for (a, b) in self.counts.iter_mut().zip(&other.counts) {
            *a += b;
        }
        self
    }
}

/// Assign every sample to its nearest centroid and sum the members.
fn accumulate(samples: &[PixelSample], centroids: &[Centroid]) -> ClusterSums {
    if samples.len() >= PARALLEL_THRESHOLD {
        accumulate_parallel(samples, centroids)
    } else {
        accumulate_sequential(samples, centroids)
    }
}

fn accumulate_sequential(samples: &[PixelSample], centroids: &[Centroid]) -> ClusterSums {
    let mut sums = ClusterSums::new(centroids.len());
    for sample in samples {
        sums.add(nearest(&to_point(sample), centroids), sample);
    }
    sums
}

fn accumulate_parallel(samples: &[PixelSample], centroids: &[Centroid]) -> ClusterSums {
    let k = centroids.len();
    samples
        .par_chunks(CHUNK_SIZE)
        .map(|chunk| accumulate_sequential(chunk, centroids))
        .reduce(|| ClusterSums::new(k), ClusterSums::merge)
}

/// Move each centroid to the mean of its members and return the largest
/// squared displacement. Clusters without members keep their centroid.
fn apply_means(centroids: &mut [Centroid], sums: &ClusterSums) -> f64 {
    let mut max_shift: f64 = 0.0;
    for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums.sums).zip(&sums.counts) {
        if count == 0 {
            continue;
        }
        let n = count as f64;
        let mean = [sum[0] as f64 / n, sum[1] as f64 / n, sum[2] as f64 / n];
        max_shift = max_shift.max(distance_sq(&mean, centroid));
        *centroid = mean;
    }
    max_shift
}

/// Index of the closest centroid; the lowest index wins ties.
fn nearest(point: &Centroid, centroids: &[Centroid]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let dist = distance_sq(point, centroid);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

fn to_point(sample: &PixelSample) -> Centroid {
    [
        f64::from(sample[0]),
        f64::from(sample[1]),
        f64::from(sample[2]),
    ]
}

fn distance_sq(a: &Centroid, b: &Centroid) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)
}
