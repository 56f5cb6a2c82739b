//! Delaunay triangulation and its dual Voronoi diagram.
//!
//! [`Triangulation::build`] constructs the triangulation over a borrowed
//! point slice; [`extract`] turns it into Voronoi segments clipped to a
//! rectangle.

mod delaunay;
mod voronoi;

pub use delaunay::{Triangle, Triangulation, Vertex};
pub use voronoi::{dual_edges, extract, voronoi_vertices};
