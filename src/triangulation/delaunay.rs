//! Delaunay triangulation by incremental insertion and edge flipping.
//!
//! Delaunay triangulation maximizes the minimum angle of all triangles,
//! avoiding skinny triangles when possible. It has the property that no
//! point lies inside the circumcircle of any triangle.
//!
//! # Algorithm
//!
//! 1. Seed the mesh with the first non-degenerate triple of input points.
//!    The convex hull is closed off with *ghost* triangles that share a
//!    vertex at infinity, so every edge always has a face on both sides.
//! 2. Insert the remaining points in input order. Each point is located by
//!    a visibility walk from the most recently created face, then the face
//!    containing it is split into three (or the two faces sharing the edge
//!    it lies on are split into four).
//! 3. Every edge opposite the new point is checked against the
//!    empty-circle condition and flipped if it fails, until the
//!    neighborhood is Delaunay again.
//! 4. Ghost triangles are dropped; their slots become `None` neighbors.
//!
//! All decisions go through the exact predicates in [`crate::kernel`].
//! A point exactly on a circumcircle does not trigger a flip, so cocircular
//! configurations resolve by insertion order and the result is
//! reproducible.
//!
//! # Complexity
//!
//! - Time: O(n log n) expected for spatially coherent input, O(n²) worst
//!   case for the walk
//! - Space: O(n)
//!
//! # Example
//!
//! ```
//! use voronoise::triangulation::Triangulation;
//! use voronoise::Point2;
//!
//! let points: Vec<Point2<f64>> = vec![
//!     Point2::new(0.1, 0.1),
//!     Point2::new(0.9, 0.1),
//!     Point2::new(0.9, 0.9),
//!     Point2::new(0.1, 0.9),
//!     Point2::new(0.5, 0.5),
//! ];
//!
//! let tri = Triangulation::build(&points).unwrap();
//! assert_eq!(tri.triangles().len(), 4);
//! assert!(tri.is_delaunay());
//! ```

use crate::error::{Result, VoronoiError};
use crate::kernel::{incircle, orientation, Orientation};
use crate::primitives::Point2;
use log::debug;
use num_traits::Float;

/// Vertex id of the point at infinity. Only ghost faces use it.
const INFINITE: usize = usize::MAX;

/// A triangle of the finished triangulation.
///
/// Vertices are indices into the input point slice, in counter-clockwise
/// order. `neighbors[i]` is the triangle across the edge opposite
/// `vertices[i]`, or `None` if that edge lies on the convex hull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub vertices: [usize; 3],
    pub neighbors: [Option<usize>; 3],
}

impl Triangle {
    /// Returns the edge opposite vertex `i`, directed so that the triangle
    /// lies on its left.
    #[inline]
    pub fn edge(&self, i: usize) -> (usize, usize) {
        (self.vertices[(i + 1) % 3], self.vertices[(i + 2) % 3])
    }

    /// Returns the three edges, indexed like the neighbors.
    #[inline]
    pub fn edges(&self) -> [(usize, usize); 3] {
        [self.edge(0), self.edge(1), self.edge(2)]
    }

    /// Checks if the triangle contains a specific vertex index.
    #[inline]
    pub fn contains_vertex(&self, v: usize) -> bool {
        self.vertices.contains(&v)
    }
}

/// A triangulation vertex: the input point it stands for and one triangle
/// incident to it (`None` when the input had fewer than three points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex<'a, F> {
    pub point: &'a Point2<F>,
    pub triangle: Option<usize>,
}

/// An immutable Delaunay triangulation of a borrowed point set.
#[derive(Debug, Clone)]
pub struct Triangulation<'a, F> {
    points: &'a [Point2<F>],
    vertices: Vec<Vertex<'a, F>>,
    triangles: Vec<Triangle>,
}

impl<'a, F: Float> Triangulation<'a, F> {
    /// Computes the Delaunay triangulation of `points`.
    ///
    /// Fewer than three points give a triangulation with no triangles.
    ///
    /// # Errors
    ///
    /// - [`VoronoiError::InvalidPoint`] if a coordinate is NaN or infinite.
    /// - [`VoronoiError::DuplicatePoint`] if two points are identical.
    /// - [`VoronoiError::CollinearInput`] if three or more points all lie
    ///   on one line.
    pub fn build(points: &'a [Point2<F>]) -> Result<Self> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(VoronoiError::InvalidPoint { index });
        }
        check_duplicates(points)?;

        let triangles = if points.len() < 3 {
            Vec::new()
        } else {
            let mut mesh = Mesh::seed(points)?;
            mesh.insert_remaining()?;
            mesh.freeze()
        };

        let mut vertices: Vec<Vertex<'a, F>> = points
            .iter()
            .map(|point| Vertex {
                point,
                triangle: None,
            })
            .collect();
        for (t, tri) in triangles.iter().enumerate() {
            for &v in &tri.vertices {
                vertices[v].triangle.get_or_insert(t);
            }
        }

        debug!(
            "triangulated {} points into {} triangles",
            points.len(),
            triangles.len()
        );

        Ok(Self {
            points,
            vertices,
            triangles,
        })
    }

    /// The input points, in input order.
    #[inline]
    pub fn points(&self) -> &'a [Point2<F>] {
        self.points
    }

    /// One vertex per input point, in input order.
    #[inline]
    pub fn vertices(&self) -> &[Vertex<'a, F>] {
        &self.vertices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Returns `true` if there are no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The corner positions of triangle `t`, counter-clockwise.
    #[inline]
    pub fn triangle_points(&self, t: usize) -> [Point2<F>; 3] {
        self.triangles[t].vertices.map(|v| self.points[v])
    }

    /// Iterates over every undirected edge exactly once.
    ///
    /// An interior edge is reported by the lower-indexed of its two
    /// triangles.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.triangles.iter().enumerate().flat_map(|(t, tri)| {
            (0..3).filter_map(move |i| match tri.neighbors[i] {
                Some(u) if u < t => None,
                _ => Some(tri.edge(i)),
            })
        })
    }

    /// Iterates over the convex hull edges, directed with the interior on
    /// their left.
    pub fn hull_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.triangles.iter().flat_map(|tri| {
            (0..3).filter_map(move |i| tri.neighbors[i].is_none().then(|| tri.edge(i)))
        })
    }

    /// Verifies the local Delaunay condition on every interior edge.
    ///
    /// For a valid triangulation this is equivalent to the global
    /// empty-circumcircle property.
    pub fn is_delaunay(&self) -> bool {
        self.triangles.iter().enumerate().all(|(t, tri)| {
            let [a, b, c] = self.triangle_points(t);
            tri.neighbors.iter().flatten().all(|&u| {
                let other = &self.triangles[u];
                other
                    .vertices
                    .iter()
                    .filter(|v| !tri.contains_vertex(**v))
                    .all(|&v| incircle(a, b, c, self.points[v]) <= F::zero())
            })
        })
    }
}

/// Rejects inputs containing two identical points.
///
/// Reports the pair with the earliest repeated index.
fn check_duplicates<F: Float>(points: &[Point2<F>]) -> Result<()> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&i, &j| {
        let (p, q) = (points[i], points[j]);
        p.x.partial_cmp(&q.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(p.y.partial_cmp(&q.y).unwrap_or(std::cmp::Ordering::Equal))
            .then(i.cmp(&j))
    });

    let duplicate = order
        .windows(2)
        .filter(|w| points[w[0]] == points[w[1]])
        .map(|w| (w[0], w[1]))
        .min_by_key(|&(_, second)| second);

    match duplicate {
        Some((first, second)) => Err(VoronoiError::DuplicatePoint { first, second }),
        None => Ok(()),
    }
}

/// Returns `true` if `p` lies strictly between `a` and `b`, assuming the
/// three points are collinear.
fn strictly_between<F: Float>(a: Point2<F>, b: Point2<F>, p: Point2<F>) -> bool {
    if a.x != b.x {
        (a.x < p.x && p.x < b.x) || (b.x < p.x && p.x < a.x)
    } else {
        (a.y < p.y && p.y < b.y) || (b.y < p.y && p.y < a.y)
    }
}

/// A face of the working mesh. `n[i]` is the face across the edge opposite
/// `v[i]`; the mesh is closed, so every slot is filled.
#[derive(Debug, Clone, Copy)]
struct Face {
    v: [usize; 3],
    n: [usize; 3],
}

impl Face {
    /// Slot of the vertex at infinity, if this is a ghost face.
    #[inline]
    fn ghost_slot(&self) -> Option<usize> {
        self.v.iter().position(|&v| v == INFINITE)
    }

    #[inline]
    fn is_ghost(&self) -> bool {
        self.ghost_slot().is_some()
    }
}

/// Where a point falls in the working mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    /// Strictly inside a face (for a ghost face: strictly outside the hull
    /// edge it carries).
    Face(usize),
    /// On the interior of the edge opposite slot `.1` of face `.0`.
    Edge(usize, usize),
}

/// The mutable triangulation used during construction.
struct Mesh<'a, F> {
    points: &'a [Point2<F>],
    faces: Vec<Face>,
    seeded: [usize; 3],
    last: usize,
    flips: usize,
}

impl<'a, F: Float> Mesh<'a, F> {
    /// Builds the initial triangle and its three ghosts.
    fn seed(points: &'a [Point2<F>]) -> Result<Self> {
        let (p0, p1) = (points[0], points[1]);
        let (k, turn) = points
            .iter()
            .enumerate()
            .skip(2)
            .map(|(k, &pk)| (k, orientation(p0, p1, pk)))
            .find(|&(_, o)| o != Orientation::Collinear)
            .ok_or(VoronoiError::CollinearInput {
                count: points.len(),
            })?;

        let (a, b, c) = match turn {
            Orientation::CounterClockwise => (0, 1, k),
            _ => (1, 0, k),
        };

        let faces = vec![
            Face {
                v: [a, b, c],
                n: [1, 2, 3],
            },
            Face {
                v: [c, b, INFINITE],
                n: [3, 2, 0],
            },
            Face {
                v: [a, c, INFINITE],
                n: [1, 3, 0],
            },
            Face {
                v: [b, a, INFINITE],
                n: [2, 1, 0],
            },
        ];

        Ok(Self {
            points,
            faces,
            seeded: [a, b, c],
            last: 0,
            flips: 0,
        })
    }

    fn insert_remaining(&mut self) -> Result<()> {
        for p in 0..self.points.len() {
            if !self.seeded.contains(&p) {
                self.insert(p)?;
            }
        }
        debug!(
            "inserted {} points with {} flips",
            self.points.len(),
            self.flips
        );
        Ok(())
    }

    fn insert(&mut self, p: usize) -> Result<()> {
        let created = match self.locate(p)? {
            Location::Face(f) => self.split_face(f, p).to_vec(),
            Location::Edge(f, i) => self.split_edge(f, i, p).to_vec(),
        };
        self.last = created[0];
        self.legalize(p, created);
        Ok(())
    }

    #[inline]
    fn point(&self, v: usize) -> Point2<F> {
        self.points[v]
    }

    /// Visibility walk from the most recently created face.
    fn locate(&self, p: usize) -> Result<Location> {
        let target = self.point(p);
        let mut f = self.last;

        'walk: loop {
            let face = self.faces[f];

            if let Some(k) = face.ghost_slot() {
                let a = face.v[(k + 1) % 3];
                let b = face.v[(k + 2) % 3];
                let (pa, pb) = (self.point(a), self.point(b));
                match orientation(pa, pb, target) {
                    Orientation::CounterClockwise => return Ok(Location::Face(f)),
                    Orientation::Clockwise => f = face.n[k],
                    Orientation::Collinear => {
                        if strictly_between(pa, pb, target) {
                            return Ok(Location::Edge(f, k));
                        }
                        if target == pa || target == pb {
                            let first = if target == pa { a } else { b };
                            return Err(VoronoiError::DuplicatePoint { first, second: p });
                        }
                        // On the hull line but beyond one end: slide along
                        // the hull towards that end.
                        f = if strictly_between(pa, target, pb) {
                            face.n[(k + 1) % 3]
                        } else {
                            face.n[(k + 2) % 3]
                        };
                    }
                }
                continue 'walk;
            }

            let mut on_edge = None;
            let mut zeros = 0;
            for i in 0..3 {
                let a = self.point(face.v[(i + 1) % 3]);
                let b = self.point(face.v[(i + 2) % 3]);
                match orientation(a, b, target) {
                    Orientation::Clockwise => {
                        f = face.n[i];
                        continue 'walk;
                    }
                    Orientation::Collinear => {
                        zeros += 1;
                        on_edge = Some(i);
                    }
                    Orientation::CounterClockwise => {}
                }
            }

            return match (zeros, on_edge) {
                (0, _) => Ok(Location::Face(f)),
                (1, Some(i)) => Ok(Location::Edge(f, i)),
                _ => {
                    let first = face
                        .v
                        .iter()
                        .copied()
                        .find(|&v| self.point(v) == target)
                        .unwrap_or(face.v[0]);
                    Err(VoronoiError::DuplicatePoint { first, second: p })
                }
            };
        }
    }

    /// Points the slot of `face` that refers to `old` at `new` instead.
    fn replace_neighbor(&mut self, face: usize, old: usize, new: usize) {
        if let Some(slot) = self.faces[face].n.iter_mut().find(|n| **n == old) {
            *slot = new;
        }
    }

    /// Splits face `f` into three faces around `p`.
    fn split_face(&mut self, f: usize, p: usize) -> [usize; 3] {
        let Face {
            v: [a, b, c],
            n: [na, nb, nc],
        } = self.faces[f];
        let f1 = self.faces.len();
        let f2 = f1 + 1;

        self.faces[f] = Face {
            v: [p, b, c],
            n: [na, f1, f2],
        };
        self.faces.push(Face {
            v: [p, c, a],
            n: [nb, f2, f],
        });
        self.faces.push(Face {
            v: [p, a, b],
            n: [nc, f, f1],
        });
        self.replace_neighbor(nb, f, f1);
        self.replace_neighbor(nc, f, f2);

        [f, f1, f2]
    }

    /// Splits the edge opposite slot `i` of face `f`, and the face across
    /// it, into four faces around `p`.
    fn split_edge(&mut self, f: usize, i: usize, p: usize) -> [usize; 4] {
        let face = self.faces[f];
        let apex = face.v[i];
        let x = face.v[(i + 1) % 3];
        let y = face.v[(i + 2) % 3];
        let across_yp = face.n[(i + 1) % 3];
        let across_px = face.n[(i + 2) % 3];

        let g = face.n[i];
        let other = self.faces[g];
        let j = other.n.iter().position(|&n| n == f).unwrap_or(0);
        let far = other.v[j];
        let across_xq = other.n[(j + 1) % 3];
        let across_qy = other.n[(j + 2) % 3];

        let f1 = self.faces.len();
        let g1 = f1 + 1;

        self.faces[f] = Face {
            v: [apex, x, p],
            n: [g1, f1, across_px],
        };
        self.faces.push(Face {
            v: [apex, p, y],
            n: [g, across_yp, f],
        });
        self.faces[g] = Face {
            v: [far, y, p],
            n: [f1, g1, across_qy],
        };
        self.faces.push(Face {
            v: [far, p, x],
            n: [f, across_xq, g],
        });
        self.replace_neighbor(across_yp, f, f1);
        self.replace_neighbor(across_xq, g, g1);

        [f, f1, g, g1]
    }

    /// Whether `p` violates the empty-circle condition of face `g`.
    ///
    /// For a ghost face the "circle" is the open half-plane beyond its
    /// hull edge plus the open edge itself.
    fn in_conflict(&self, g: usize, p: usize) -> bool {
        let face = self.faces[g];
        let target = self.point(p);
        match face.ghost_slot() {
            Some(k) => {
                let a = self.point(face.v[(k + 1) % 3]);
                let b = self.point(face.v[(k + 2) % 3]);
                match orientation(a, b, target) {
                    Orientation::CounterClockwise => true,
                    Orientation::Clockwise => false,
                    Orientation::Collinear => strictly_between(a, b, target),
                }
            }
            None => {
                let [a, b, c] = face.v.map(|v| self.point(v));
                incircle(a, b, c, target) > F::zero()
            }
        }
    }

    /// Restores the Delaunay condition around the newly inserted `p`.
    fn legalize(&mut self, p: usize, mut stack: Vec<usize>) {
        while let Some(f) = stack.pop() {
            let face = self.faces[f];
            let Some(i) = face.v.iter().position(|&v| v == p) else {
                continue;
            };
            let g = face.n[i];
            let Some(j) = self.faces[g].n.iter().position(|&n| n == f) else {
                continue;
            };
            if self.in_conflict(g, p) {
                self.flip(f, i, g, j);
                self.flips += 1;
                stack.push(f);
                stack.push(g);
            }
        }
    }

    /// Replaces the edge shared by `f` and `g` with the other diagonal of
    /// their quadrilateral. Afterwards both faces start with `f`'s apex.
    fn flip(&mut self, f: usize, i: usize, g: usize, j: usize) {
        let face = self.faces[f];
        let other = self.faces[g];
        let p = face.v[i];
        let x = face.v[(i + 1) % 3];
        let y = face.v[(i + 2) % 3];
        let q = other.v[j];

        let across_yp = face.n[(i + 1) % 3];
        let across_px = face.n[(i + 2) % 3];
        let across_xq = other.n[(j + 1) % 3];
        let across_qy = other.n[(j + 2) % 3];

        self.faces[f] = Face {
            v: [p, x, q],
            n: [across_xq, g, across_px],
        };
        self.faces[g] = Face {
            v: [p, q, y],
            n: [across_qy, across_yp, f],
        };
        self.replace_neighbor(across_xq, g, f);
        self.replace_neighbor(across_yp, f, g);
    }

    /// Drops ghost faces and renumbers the rest.
    fn freeze(self) -> Vec<Triangle> {
        let mut remap = vec![None; self.faces.len()];
        let mut next = 0;
        for (slot, face) in remap.iter_mut().zip(&self.faces) {
            if !face.is_ghost() {
                *slot = Some(next);
                next += 1;
            }
        }

        self.faces
            .iter()
            .filter(|face| !face.is_ghost())
            .map(|face| Triangle {
                vertices: face.v,
                neighbors: face.n.map(|n| remap[n]),
            })
            .collect()
    }
}
