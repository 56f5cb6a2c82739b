//! Raster output: BMP files, sample plots and diagram rendering.
//!
//! Also loads density maps, which are BMP images whose first (blue) channel
//! gives the keep probability of each pixel.

mod bmp;
mod image;
mod render;

pub use bmp::{load_bmp, read_bmp, save_bmp, write_bmp};
pub use image::{Bgr, Image, BLACK, WHITE};
pub use render::{plot_endpoints, plot_points, render_diagram};

use crate::error::{Result, VoronoiError};
use crate::sampling::DensityField;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Converts an image to a density field, one value per pixel, from the
/// blue channel scaled to `[0, 1]`.
pub fn density_from_image(image: &Image) -> Result<DensityField> {
    let values = image.pixels().iter().map(|p| f32::from(p[0]) / 255.0).collect();
    DensityField::new(image.width(), image.height(), values)
}

/// Reads a density map that must be `expected_size` pixels square.
///
/// The dimensions are checked against the header before any pixel data is
/// read.
///
/// # Errors
///
/// [`VoronoiError::DensityResolutionMismatch`] if the image has other
/// dimensions, or any error from [`read_bmp`].
pub fn read_density_map<R: Read>(mut r: R, expected_size: u32) -> Result<DensityField> {
    let header = bmp::read_header(&mut r)?;
    if (header.width, header.height) != (expected_size, expected_size) {
        return Err(VoronoiError::DensityResolutionMismatch {
            expected: expected_size,
            found: (header.width, header.height),
        });
    }
    density_from_image(&bmp::read_pixels(&mut r, header)?)
}

/// Loads a density map file, see [`read_density_map`].
pub fn load_density_map<P: AsRef<Path>>(path: P, expected_size: u32) -> Result<DensityField> {
    read_density_map(BufReader::new(File::open(path)?), expected_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Point2;
    use byteorder::ByteOrder;

    #[test]
    fn test_density_from_blue_channel() {
        let mut img = Image::new(2, 1, BLACK);
        img.set(1, 0, [255, 0, 0]);
        let field = density_from_image(&img).unwrap();
        assert_eq!(field.sample(Point2::new(0.25, 0.5)), 0.0);
        assert_eq!(field.sample(Point2::new(0.75, 0.5)), 1.0);
    }

    #[test]
    fn test_load_density_map_checks_size() {
        let dir = std::env::temp_dir().join(format!("voronoise-density-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("density.bmp");
        save_bmp(&path, &Image::new(8, 4, WHITE)).unwrap();

        assert!(matches!(
            load_density_map(&path, 8),
            Err(VoronoiError::DensityResolutionMismatch {
                expected: 8,
                found: (8, 4)
            })
        ));

        save_bmp(&path, &Image::new(8, 8, WHITE)).unwrap();
        let field = load_density_map(&path, 8).unwrap();
        assert_eq!(field.dimensions(), (8, 8));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_bogus_height_is_rejected_before_pixels() {
        let mut buf = Vec::new();
        write_bmp(&mut buf, &Image::new(8, 8, WHITE)).unwrap();
        byteorder::LittleEndian::write_i32(&mut buf[22..26], i32::MAX);

        assert!(matches!(
            read_density_map(buf.as_slice(), 8),
            Err(VoronoiError::DensityResolutionMismatch {
                expected: 8,
                found: (8, h)
            }) if h == i32::MAX as u32
        ));
    }
}
