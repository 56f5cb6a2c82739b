//! Input/output of sampled points and Voronoi segments as text files.

mod text;

pub use text::{
    load_points, load_segments, read_points, read_segments, save_points, save_segments,
    write_points, write_segments,
};
