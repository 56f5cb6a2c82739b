//! Bounding regions.

mod aabb;

pub use aabb::Aabb2;
