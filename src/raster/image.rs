//! A minimal 24-bit image buffer.

/// A pixel in BMP byte order: blue, green, red.
pub type Bgr = [u8; 3];

pub const BLACK: Bgr = [0, 0, 0];
pub const WHITE: Bgr = [255, 255, 255];

/// A width x height grid of [`Bgr`] pixels.
///
/// Row 0 is the bottom row, matching both the unit-square `y` axis and the
/// row order stored in BMP files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Bgr>,
}

impl Image {
    /// Creates an image filled with `color`.
    pub fn new(width: u32, height: u32, color: Bgr) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Wraps existing row-major pixels.
    ///
    /// Returns `None` if `pixels` has the wrong length.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Bgr>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Bgr] {
        &self.pixels
    }

    /// One row of pixels, bottom row first.
    #[inline]
    pub fn row(&self, y: u32) -> &[Bgr] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Bgr> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Sets a pixel; coordinates outside the image are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Bgr) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Sets the pixel under a unit-square point, `(floor(x * w), floor(y * h))`
    /// clamped to the image.
    pub fn set_at(&mut self, x: f64, y: f64, color: Bgr) {
        let (px, py) = (to_pixel(x, self.width), to_pixel(y, self.height));
        self.set(px, py, color);
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }
}

/// Maps a unit coordinate to a pixel index in `0..n`.
pub(crate) fn to_pixel(t: f64, n: u32) -> u32 {
    let scaled = (t * f64::from(n)).floor();
    if scaled.is_nan() || scaled <= 0.0 || n == 0 {
        0
    } else {
        (scaled as u32).min(n - 1)
    }
}
