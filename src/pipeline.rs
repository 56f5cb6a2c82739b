//! One end-to-end run: sample, triangulate, extract, and write outputs.

use crate::bounds::Aabb2;
use crate::config::Config;
use crate::error::Result;
use crate::io::{save_points, save_segments};
use crate::primitives::{Point2, Segment2};
use crate::raster::{plot_endpoints, plot_points, render_diagram, save_bmp};
use crate::sampling::{DensityField, PoissonDiskSampler};
use crate::triangulation::{extract, Triangulation};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use std::time::Instant;

/// File names written by [`Diagram::write_outputs`].
pub const POINTS_BMP: &str = "Poisson.bmp";
pub const POINTS_TXT: &str = "Poisson.txt";
pub const SEGMENTS_TXT: &str = "voronoi_diagram.txt";
pub const ENDPOINTS_BMP: &str = "Voronoi.bmp";
pub const TEXTURE_BMP: &str = "voronoi_texture.bmp";

/// The result of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    /// Sampled sites, in generation order.
    pub points: Vec<Point2<f64>>,
    pub triangle_count: usize,
    /// Voronoi edges clipped to the unit square.
    pub segments: Vec<Segment2<f64>>,
}

/// Runs sampler, triangulator and extractor for one [`Config`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Validates `config` and wraps it.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A generator seeded from the configured seed, or from the operating
    /// system when none is set.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        }
    }

    /// Produces the diagram.
    ///
    /// # Errors
    ///
    /// Anything the sampler or triangulator reports, such as
    /// [`VoronoiError::DensityResolutionMismatch`](crate::VoronoiError::DensityResolutionMismatch)
    /// or [`VoronoiError::NoPointsPlaced`](crate::VoronoiError::NoPointsPlaced).
    pub fn run<R: Rng + ?Sized>(&self, density: Option<&DensityField>, rng: &mut R) -> Result<Diagram> {
        let target = self.config.target_point_count();
        let sampler = PoissonDiskSampler::for_count(target)?
            .max_attempts(self.config.max_attempts)
            .domain(self.config.domain)
            .resolution(self.config.image_size);

        let start = Instant::now();
        let points = sampler.sample(density, rng)?;
        info!("sampled {} points (target {})", points.len(), target);
        debug!("sampling took {:?}", start.elapsed());

        let start = Instant::now();
        let tri = Triangulation::build(&points)?;
        let triangle_count = tri.triangles().len();
        info!("built {} Delaunay triangles", triangle_count);
        debug!("triangulation took {:?}", start.elapsed());

        let start = Instant::now();
        let segments = extract(&tri, &Aabb2::unit())?;
        info!("extracted {} Voronoi segments", segments.len());
        debug!("extraction took {:?}", start.elapsed());

        Ok(Diagram {
            points,
            triangle_count,
            segments,
        })
    }
}

impl Diagram {
    /// Writes the point and segment text files and the three images into
    /// `dir`, which must exist.
    pub fn write_outputs<P: AsRef<Path>>(&self, dir: P, config: &Config) -> Result<()> {
        let dir = dir.as_ref();
        let size = config.image_size;

        save_bmp(dir.join(POINTS_BMP), &plot_points(&self.points, size))?;
        save_points(dir.join(POINTS_TXT), &self.points)?;
        save_segments(dir.join(SEGMENTS_TXT), &self.segments)?;
        save_bmp(dir.join(ENDPOINTS_BMP), &plot_endpoints(&self.segments, size))?;

        let texture = render_diagram(
            &self.segments,
            size,
            config.line_width,
            config.cell_color,
            config.edge_color,
        );
        save_bmp(dir.join(TEXTURE_BMP), &texture)?;

        info!("wrote outputs to {}", dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VoronoiError;

    fn config() -> Config {
        Config {
            image_size: 256,
            cell_size: 900,
            seed: Some(42),
            ..Config::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let bad = Config {
            line_width: 0,
            ..Config::default()
        };
        assert!(matches!(Pipeline::new(bad), Err(VoronoiError::InvalidConfig { .. })));
    }

    #[test]
    fn test_run_is_deterministic_for_a_seed() {
        let pipeline = Pipeline::new(config()).unwrap();
        let first = pipeline.run(None, &mut pipeline.rng()).unwrap();
        let second = pipeline.run(None, &mut pipeline.rng()).unwrap();
        assert_eq!(first, second);
        assert!(first.points.len() > 3);
        assert!(first.triangle_count > 0);
        assert!(!first.segments.is_empty());
    }

    #[test]
    fn test_density_must_match_image_size() {
        let pipeline = Pipeline::new(config()).unwrap();
        let field = DensityField::uniform(128, 128, 1.0).unwrap();
        assert!(matches!(
            pipeline.run(Some(&field), &mut pipeline.rng()),
            Err(VoronoiError::DensityResolutionMismatch { expected: 256, .. })
        ));
    }

    #[test]
    fn test_write_outputs() {
        let pipeline = Pipeline::new(config()).unwrap();
        let diagram = pipeline.run(None, &mut pipeline.rng()).unwrap();

        let dir = std::env::temp_dir().join(format!("voronoise-pipeline-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        diagram.write_outputs(&dir, pipeline.config()).unwrap();

        for name in [POINTS_BMP, POINTS_TXT, SEGMENTS_TXT, ENDPOINTS_BMP, TEXTURE_BMP] {
            assert!(dir.join(name).is_file(), "{name} missing");
        }
        let points = crate::io::load_points(dir.join(POINTS_TXT)).unwrap();
        assert_eq!(points, diagram.points);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
