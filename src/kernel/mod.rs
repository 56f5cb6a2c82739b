//! Geometry kernel: robust predicates, circumcenters and clipping.
//!
//! Everything here is deterministic and free of side effects. The
//! triangulator relies on [`orientation`] and [`in_circumcircle`] giving
//! exact answers; the Voronoi extractor uses [`circumcenter`] and [`clip`].

mod clip;
mod expansion;
mod predicates;

pub use clip::{clip, DualEdge};
pub use predicates::{
    circumcenter, in_circumcircle, incircle, orient2d, orientation, Orientation,
};
