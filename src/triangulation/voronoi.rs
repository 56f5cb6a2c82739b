//! Voronoi diagram extraction from a Delaunay triangulation.
//!
//! A Voronoi diagram partitions the plane into cells, where each cell contains
//! all points closer to its generating site than to any other site.
//!
//! # How It Works
//!
//! The Voronoi diagram is the dual of the Delaunay triangulation:
//! - Each Delaunay triangle's circumcenter becomes a Voronoi vertex
//! - Each Delaunay edge shared by two triangles becomes a Voronoi segment
//! - Edges on the convex hull become rays pointing away from the hull
//! - Two sites with no triangle are separated by their bisector line
//!
//! Every dual edge is then clipped to a bounding rectangle, so the output is
//! a flat list of finite segments.
//!
//! # Example
//!
//! ```
//! use voronoise::bounds::Aabb2;
//! use voronoise::triangulation::{extract, Triangulation};
//! use voronoise::Point2;
//!
//! let sites: Vec<Point2<f64>> = vec![
//!     Point2::new(0.25, 0.25),
//!     Point2::new(0.75, 0.25),
//!     Point2::new(0.5, 0.75),
//! ];
//!
//! let tri = Triangulation::build(&sites).unwrap();
//! let segments = extract(&tri, &Aabb2::unit()).unwrap();
//!
//! // One triangle, three hull edges, three rays
//! assert_eq!(segments.len(), 3);
//! ```

use crate::bounds::Aabb2;
use crate::error::Result;
use crate::kernel::{circumcenter, clip, DualEdge};
use crate::primitives::{Line2, Point2, Ray2, Segment2};
use crate::triangulation::Triangulation;
use log::{debug, warn};
use num_traits::Float;

/// Circumcenters of all triangles, in triangle order.
///
/// An entry is `None` when the circumcenter cannot be represented, which
/// only happens for triangles so flat that its coordinates overflow.
pub fn voronoi_vertices<F: Float>(tri: &Triangulation<'_, F>) -> Vec<Option<Point2<F>>> {
    (0..tri.triangles().len())
        .map(|t| {
            let [a, b, c] = tri.triangle_points(t);
            circumcenter(a, b, c)
        })
        .collect()
}

/// The unclipped dual edges of `tri`, in output order.
///
/// Triangles are visited in arena order and their edges in slot order. An
/// interior edge is emitted once, from the lower-indexed of its two
/// triangles; a hull edge gives a ray along its outward normal. Edges whose
/// circumcenters are not representable are skipped with a warning.
pub fn dual_edges<F: Float>(tri: &Triangulation<'_, F>) -> Vec<DualEdge<F>> {
    let points = tri.points();

    if tri.is_empty() {
        return match points {
            [a, b] => vec![DualEdge::Line(Line2::bisector(*a, *b))],
            _ => Vec::new(),
        };
    }

    let centers = voronoi_vertices(tri);
    let mut edges = Vec::with_capacity(tri.triangles().len() * 2);

    for (t, triangle) in tri.triangles().iter().enumerate() {
        let Some(center) = centers[t] else {
            warn!("triangle {t} has no finite circumcenter; skipping its dual edges");
            continue;
        };

        for i in 0..3 {
            match triangle.neighbors[i] {
                Some(u) if u > t => match centers[u] {
                    Some(other) => edges.push(DualEdge::Segment(Segment2::new(center, other))),
                    None => warn!("triangle {u} has no finite circumcenter; skipping edge"),
                },
                Some(_) => {}
                None => {
                    let (a, b) = triangle.edge(i);
                    let outward = (points[b] - points[a]).perpendicular_cw();
                    edges.push(DualEdge::Ray(Ray2::new(center, outward)));
                }
            }
        }
    }

    edges
}

/// Builds the Voronoi diagram of the triangulated sites, clipped to `bbox`.
///
/// Dual edges that miss the rectangle are dropped. A dual segment of zero
/// length (two triangles sharing a circumcenter) is kept when its point is
/// inside the rectangle.
///
/// # Errors
///
/// [`VoronoiError::DegenerateDirection`](crate::VoronoiError::DegenerateDirection)
/// if a ray or line has no direction, which a valid triangulation never
/// produces.
pub fn extract<F: Float>(tri: &Triangulation<'_, F>, bbox: &Aabb2<F>) -> Result<Vec<Segment2<F>>> {
    let edges = dual_edges(tri);
    let mut segments = Vec::with_capacity(edges.len());
    for edge in &edges {
        if let Some(segment) = clip(edge, bbox)? {
            segments.push(segment);
        }
    }

    debug!(
        "clipped {} dual edges to {} segments",
        edges.len(),
        segments.len()
    );
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VoronoiError;
    use approx::assert_relative_eq;

    fn unit() -> Aabb2<f64> {
        Aabb2::unit()
    }

    #[test]
    fn test_empty_and_single_site() {
        let none: Vec<Point2<f64>> = vec![];
        let tri = Triangulation::build(&none).unwrap();
        assert!(extract(&tri, &unit()).unwrap().is_empty());

        let one = vec![Point2::new(0.3_f64, 0.6)];
        let tri = Triangulation::build(&one).unwrap();
        assert!(dual_edges(&tri).is_empty());
        assert!(extract(&tri, &unit()).unwrap().is_empty());
    }

    #[test]
    fn test_two_sites_give_bisector() {
        let sites = vec![Point2::new(0.25_f64, 0.5), Point2::new(0.75, 0.5)];
        let tri = Triangulation::build(&sites).unwrap();

        let segments = extract(&tri, &unit()).unwrap();
        assert_eq!(segments.len(), 1);
        let s = segments[0];
        assert_relative_eq!(s.start.x, 0.5);
        assert_relative_eq!(s.end.x, 0.5);
        let (lo, hi) = (s.start.y.min(s.end.y), s.start.y.max(s.end.y));
        assert_relative_eq!(lo, 0.0);
        assert_relative_eq!(hi, 1.0);
    }

    #[test]
    fn test_square_sites() {
        let sites = vec![
            Point2::new(0.25_f64, 0.25),
            Point2::new(0.75, 0.25),
            Point2::new(0.25, 0.75),
            Point2::new(0.75, 0.75),
        ];
        let tri = Triangulation::build(&sites).unwrap();

        let edges = dual_edges(&tri);
        let rays = edges
            .iter()
            .filter(|e| matches!(e, DualEdge::Ray(_)))
            .count();
        assert_eq!(rays, 4);
        assert_eq!(edges.len(), 5);

        // Both circumcenters are the square's center, so the interior
        // segment collapses to a point and the rays run to the edge midpoints.
        let segments = extract(&tri, &unit()).unwrap();
        assert_eq!(segments.len(), 5);
        let center = Point2::new(0.5, 0.5);
        assert_eq!(segments.iter().filter(|s| s.is_degenerate()).count(), 1);

        let mut ends: Vec<(f64, f64)> = segments
            .iter()
            .filter(|s| !s.is_degenerate())
            .map(|s| {
                assert_eq!(s.start, center);
                (s.end.x, s.end.y)
            })
            .collect();
        ends.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(ends, vec![(0.0, 0.5), (0.5, 0.0), (0.5, 1.0), (1.0, 0.5)]);
    }

    #[test]
    fn test_vertex_count_matches_triangles() {
        let sites = vec![
            Point2::new(0.1_f64, 0.2),
            Point2::new(0.8, 0.1),
            Point2::new(0.9, 0.7),
            Point2::new(0.3, 0.9),
            Point2::new(0.5, 0.45),
            Point2::new(0.2, 0.55),
        ];
        let tri = Triangulation::build(&sites).unwrap();
        let centers = voronoi_vertices(&tri);
        assert_eq!(centers.len(), tri.triangles().len());
        assert!(centers.iter().all(Option::is_some));
    }

    #[test]
    fn test_hull_rays_point_outward() {
        let sites = vec![
            Point2::new(0.2_f64, 0.2),
            Point2::new(0.8, 0.2),
            Point2::new(0.5, 0.8),
        ];
        let tri = Triangulation::build(&sites).unwrap();
        let centroid = Point2::new(0.5, 0.4);

        for edge in dual_edges(&tri) {
            let DualEdge::Ray(ray) = edge else {
                panic!("expected only rays, got {edge:?}");
            };
            let ahead = ray.point_at(1.0);
            assert!(ahead.distance(centroid) > ray.origin.distance(centroid));
        }
    }

    #[test]
    fn test_obtuse_triangle_center_outside_box() {
        // Circumcenter lies far below the square; two rays still enter it.
        let sites = vec![
            Point2::new(0.1_f64, 0.9),
            Point2::new(0.9, 0.9),
            Point2::new(0.5, 0.91),
        ];
        let tri = Triangulation::build(&sites).unwrap();
        let center = voronoi_vertices(&tri)[0].unwrap();
        assert!(center.y < 0.0);

        let segments = extract(&tri, &unit()).unwrap();
        assert!(!segments.is_empty());
        for s in &segments {
            assert!(unit().contains_point(s.start));
            assert!(unit().contains_point(s.end));
        }
    }

    #[test]
    fn test_segments_stay_in_box() {
        let sites: Vec<Point2<f64>> = (0..60)
            .map(|i| {
                let t = i as f64;
                Point2::new((t * 0.618_034).fract(), (t * 0.414_214 + 0.05).fract())
            })
            .collect();
        let tri = Triangulation::build(&sites).unwrap();
        let segments = extract(&tri, &unit()).unwrap();
        assert!(!segments.is_empty());
        for s in &segments {
            assert!(unit().contains_point(s.start));
            assert!(unit().contains_point(s.end));
        }
    }

    #[test]
    fn test_collinear_sites_propagate_error() {
        let sites = vec![
            Point2::new(0.1_f64, 0.5),
            Point2::new(0.5, 0.5),
            Point2::new(0.9, 0.5),
        ];
        assert!(matches!(
            Triangulation::build(&sites),
            Err(VoronoiError::CollinearInput { count: 3 })
        ));
    }
}
