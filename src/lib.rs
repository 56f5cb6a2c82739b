//! voronoise - Blue-noise sampling, Delaunay triangulation and clipped
//! Voronoi diagrams
//!
//! The pipeline samples points with a minimum separation (optionally thinned
//! by a density map), triangulates them with exact predicates, and extracts
//! the dual Voronoi diagram as segments clipped to the unit square.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use voronoise::bounds::Aabb2;
//! use voronoise::sampling::generate;
//! use voronoise::triangulation::{extract, Triangulation};
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(1);
//! let points = generate(100, None, &mut rng).unwrap();
//! let tri = Triangulation::build(&points).unwrap();
//! let segments = extract(&tri, &Aabb2::unit()).unwrap();
//!
//! assert!(tri.is_delaunay());
//! assert!(!segments.is_empty());
//! ```

pub mod bounds;
pub mod config;
pub mod error;
pub mod io;
pub mod kernel;
pub mod pipeline;
pub mod primitives;
pub mod raster;
pub mod sampling;
pub mod triangulation;

pub use config::{Config, NamedColor};
pub use error::{Result, VoronoiError};
pub use kernel::{circumcenter, clip, in_circumcircle, orientation, DualEdge, Orientation};
pub use pipeline::{Diagram, Pipeline};
pub use primitives::{Line2, Point2, Ray2, Segment2, Vec2};
