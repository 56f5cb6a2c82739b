//! Density fields for thinning blue-noise samples.

use crate::error::{Result, VoronoiError};
use crate::primitives::Point2;

/// A grid of acceptance probabilities over the unit square.
///
/// Values are stored row-major, row 0 covering `y` in `[0, 1/height)`.
/// Each value is the probability in `[0, 1]` that a sample falling in that
/// cell is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityField {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl DensityField {
    /// Creates a field from row-major values.
    ///
    /// Values outside `[0, 1]` are clamped; NaN becomes 0.
    ///
    /// # Errors
    ///
    /// [`VoronoiError::InvalidConfig`](crate::VoronoiError::InvalidConfig)
    /// if either dimension is zero or `values` has the wrong length.
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(VoronoiError::invalid_config(
                "density dimensions",
                format!("{width} x {height}"),
                "must be non-empty",
            ));
        }
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(VoronoiError::invalid_config(
                "density values",
                values.len(),
                "must contain width * height entries",
            ));
        }

        let values = values
            .into_iter()
            .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
            .collect();

        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// A field with the same value everywhere.
    pub fn uniform(width: u32, height: u32, value: f32) -> Result<Self> {
        Self::new(width, height, vec![value; width as usize * height as usize])
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The value of cell `(x, y)`, clamped to the grid.
    #[inline]
    pub fn value_at(&self, x: u32, y: u32) -> f32 {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        self.values[y * self.width as usize + x]
    }

    /// The value under a point of the unit square.
    ///
    /// The cell is `(floor(x * width), floor(y * height))`, clamped so that
    /// coordinates at or beyond the edges use the border cells.
    pub fn sample(&self, p: Point2<f64>) -> f32 {
        let cell = |t: f64, n: u32| -> u32 {
            let scaled = (t * f64::from(n)).floor();
            if scaled.is_nan() || scaled <= 0.0 {
                0
            } else {
                (scaled as u32).min(n - 1)
            }
        };
        self.value_at(cell(p.x, self.width), cell(p.y, self.height))
    }
}
