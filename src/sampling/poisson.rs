//! Poisson disk sampling.
//!
//! Generates blue noise point distributions where no two points are closer
//! than a specified minimum distance. Uses Bridson's fast algorithm with
//! O(n) time complexity.

use super::DensityField;
use crate::error::{Result, VoronoiError};
use crate::primitives::Point2;
use log::debug;
use rand::Rng;

/// Candidates tried around an active sample before it is retired.
pub const DEFAULT_ATTEMPTS: usize = 30;

/// The region samples are drawn from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SamplingDomain {
    /// The open unit square.
    #[default]
    Square,
    /// The open disc of radius 0.5 centered in the unit square.
    Disc,
}

impl SamplingDomain {
    /// Whether `p` lies strictly inside the domain.
    #[inline]
    pub fn contains(self, p: Point2<f64>) -> bool {
        match self {
            SamplingDomain::Square => p.x > 0.0 && p.x < 1.0 && p.y > 0.0 && p.y < 1.0,
            SamplingDomain::Disc => p.distance_squared(Point2::new(0.5, 0.5)) < 0.25,
        }
    }
}

/// Generates about `target_count` blue-noise points in the unit square.
///
/// The minimum separation is `1 / sqrt(target_count)`. With a density
/// field, each point is then kept with probability equal to the field's
/// value under it.
///
/// # Errors
///
/// - [`VoronoiError::InvalidConfig`] if `target_count` is zero.
/// - [`VoronoiError::NoPointsPlaced`] if thinning discards every point.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use voronoise::sampling::generate;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let points = generate(200, None, &mut rng).unwrap();
///
/// let r = 1.0 / 200f64.sqrt();
/// for i in 0..points.len() {
///     for j in (i + 1)..points.len() {
///         assert!(points[i].distance(points[j]) >= r);
///     }
/// }
/// ```
pub fn generate<R: Rng + ?Sized>(
    target_count: usize,
    density: Option<&DensityField>,
    rng: &mut R,
) -> Result<Vec<Point2<f64>>> {
    PoissonDiskSampler::for_count(target_count)?.sample(density, rng)
}

/// A configured Poisson disk sampler over the unit square.
#[derive(Debug, Clone, PartialEq)]
pub struct PoissonDiskSampler {
    min_distance: f64,
    max_attempts: usize,
    domain: SamplingDomain,
    resolution: Option<u32>,
}

impl PoissonDiskSampler {
    /// Creates a sampler whose radius packs about `target_count` points.
    pub fn for_count(target_count: usize) -> Result<Self> {
        if target_count == 0 {
            return Err(VoronoiError::invalid_config(
                "target_count",
                target_count,
                "must be at least 1",
            ));
        }
        let n = target_count as f64;
        Self::with_min_distance(n.sqrt() / n)
    }

    /// Creates a sampler with an explicit minimum separation.
    pub fn with_min_distance(min_distance: f64) -> Result<Self> {
        if !min_distance.is_finite() || min_distance <= 0.0 {
            return Err(VoronoiError::invalid_config(
                "min_distance",
                min_distance,
                "must be finite and positive",
            ));
        }
        Ok(Self {
            min_distance,
            max_attempts: DEFAULT_ATTEMPTS,
            domain: SamplingDomain::Square,
            resolution: None,
        })
    }

    /// Sets the number of candidates tried per active sample.
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn domain(mut self, domain: SamplingDomain) -> Self {
        self.domain = domain;
        self
    }

    /// Requires density fields to be `size x size`.
    pub fn resolution(mut self, size: u32) -> Self {
        self.resolution = Some(size);
        self
    }

    #[inline]
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Runs the sampler.
    ///
    /// # Errors
    ///
    /// - [`VoronoiError::DensityResolutionMismatch`] if a resolution was set
    ///   and the density field has other dimensions.
    /// - [`VoronoiError::NoPointsPlaced`] if no point survives thinning.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        density: Option<&DensityField>,
        rng: &mut R,
    ) -> Result<Vec<Point2<f64>>> {
        if let (Some(expected), Some(field)) = (self.resolution, density) {
            if field.dimensions() != (expected, expected) {
                return Err(VoronoiError::DensityResolutionMismatch {
                    expected,
                    found: field.dimensions(),
                });
            }
        }

        let mut grid = Grid::new(self.min_distance);
        let points = grid.fill(self, rng);
        let placed = points.len();

        let points: Vec<Point2<f64>> = match density {
            Some(field) => points
                .into_iter()
                .filter(|&p| rng.random::<f32>() < field.sample(p))
                .collect(),
            None => points,
        };

        debug!(
            "placed {} samples at r = {:.6}, kept {} after thinning",
            placed,
            self.min_distance,
            points.len()
        );

        if points.is_empty() {
            return Err(VoronoiError::NoPointsPlaced);
        }
        Ok(points)
    }
}

/// Background grid with at most one sample per cell.
struct Grid {
    min_distance: f64,
    cell_size: f64,
    size: usize,
    cells: Vec<Option<usize>>,
    points: Vec<Point2<f64>>,
    active: Vec<usize>,
}

impl Grid {
    fn new(min_distance: f64) -> Self {
        // Cell size = r / sqrt(2) ensures at most one point per cell
        let cell_size = min_distance / std::f64::consts::SQRT_2;
        let size = (1.0 / cell_size).ceil().max(1.0) as usize;

        Self {
            min_distance,
            cell_size,
            size,
            cells: vec![None; size * size],
            points: Vec::new(),
            active: Vec::new(),
        }
    }

    fn fill<R: Rng + ?Sized>(&mut self, sampler: &PoissonDiskSampler, rng: &mut R) -> Vec<Point2<f64>> {
        let first = random_point_in_domain(sampler.domain, rng);
        self.add_point(first);

        while !self.active.is_empty() {
            let active_idx = rng.random_range(0..self.active.len());
            let center = self.points[self.active[active_idx]];

            let found = (0..sampler.max_attempts)
                .map(|_| self.random_point_in_annulus(center, rng))
                .find(|&candidate| sampler.domain.contains(candidate) && self.is_far_enough(candidate));

            match found {
                Some(candidate) => self.add_point(candidate),
                None => {
                    self.active.swap_remove(active_idx);
                }
            }
        }

        std::mem::take(&mut self.points)
    }

    fn add_point(&mut self, p: Point2<f64>) {
        let idx = self.points.len();
        self.points.push(p);
        self.active.push(idx);

        let (gx, gy) = self.grid_coords(p);
        self.cells[gy * self.size + gx] = Some(idx);
    }

    /// Checks the 5x5 cell neighborhood for a sample closer than `r`.
    fn is_far_enough(&self, p: Point2<f64>) -> bool {
        let (gx, gy) = self.grid_coords(p);
        let search_radius = 2;

        let min_gx = gx.saturating_sub(search_radius);
        let max_gx = (gx + search_radius + 1).min(self.size);
        let min_gy = gy.saturating_sub(search_radius);
        let max_gy = (gy + search_radius + 1).min(self.size);

        let min_dist_sq = self.min_distance * self.min_distance;

        for cy in min_gy..max_gy {
            for cx in min_gx..max_gx {
                if let Some(idx) = self.cells[cy * self.size + cx] {
                    if p.distance_squared(self.points[idx]) < min_dist_sq {
                        return false;
                    }
                }
            }
        }

        true
    }

    fn grid_coords(&self, p: Point2<f64>) -> (usize, usize) {
        let clamp = |t: f64| ((t / self.cell_size).floor().max(0.0) as usize).min(self.size - 1);
        (clamp(p.x), clamp(p.y))
    }

    /// A random point in the annulus [r, 2r] around `center`.
    fn random_point_in_annulus<R: Rng + ?Sized>(&self, center: Point2<f64>, rng: &mut R) -> Point2<f64> {
        let angle = rng.random::<f64>() * std::f64::consts::TAU;
        let r = self.min_distance * (1.0 + rng.random::<f64>());
        Point2::new(center.x + r * angle.cos(), center.y + r * angle.sin())
    }
}

/// A uniform random point strictly inside `domain`.
fn random_point_in_domain<R: Rng + ?Sized>(domain: SamplingDomain, rng: &mut R) -> Point2<f64> {
    loop {
        let p = Point2::new(rng.random::<f64>(), rng.random::<f64>());
        if domain.contains(p) {
            return p;
        }
    }
}
