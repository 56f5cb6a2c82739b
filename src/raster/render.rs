//! Software rendering of samples and Voronoi diagrams.
//!
//! Unit-square coordinates map to pixels by `floor(t * size)`, clamped to
//! the image, with row 0 at the bottom.

use super::image::{to_pixel, Bgr, Image, BLACK, WHITE};
use crate::config::NamedColor;
use crate::primitives::{Point2, Segment2};

/// White pixels on black, one per point.
pub fn plot_points(points: &[Point2<f64>], size: u32) -> Image {
    let mut img = Image::new(size, size, BLACK);
    for p in points {
        img.set_at(p.x, p.y, WHITE);
    }
    img
}

/// White pixels on black, one per segment endpoint.
pub fn plot_endpoints(segments: &[Segment2<f64>], size: u32) -> Image {
    let mut img = Image::new(size, size, BLACK);
    for s in segments {
        img.set_at(s.start.x, s.start.y, WHITE);
        img.set_at(s.end.x, s.end.y, WHITE);
    }
    img
}

/// Fills the image with the cell color and draws every segment in the
/// edge color, `line_width` pixels wide.
pub fn render_diagram(
    segments: &[Segment2<f64>],
    size: u32,
    line_width: u32,
    cell_color: NamedColor,
    edge_color: NamedColor,
) -> Image {
    let mut img = Image::new(size, size, cell_color.bgr8());
    let edge = edge_color.bgr8();
    let half_width = f64::from(line_width.max(1)) / 2.0;
    for s in segments {
        draw_thick_line(&mut img, *s, half_width, edge);
    }
    img
}

/// Colors every pixel whose center lies within `half_width` pixels of the
/// segment.
fn draw_thick_line(img: &mut Image, segment: Segment2<f64>, half_width: f64, color: Bgr) {
    let size = f64::from(img.width());
    let a = Point2::new(segment.start.x * size, segment.start.y * size);
    let b = Point2::new(segment.end.x * size, segment.end.y * size);

    let lo = |t: f64| to_pixel((t - half_width) / size, img.width());
    let hi = |t: f64| to_pixel((t + half_width) / size, img.width());
    let (x0, x1) = (lo(a.x.min(b.x)), hi(a.x.max(b.x)));
    let (y0, y1) = (lo(a.y.min(b.y)), hi(a.y.max(b.y)));

    let limit = half_width * half_width;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let center = Point2::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if distance_squared_to_segment(center, a, b) <= limit {
                img.set(x, y, color);
            }
        }
    }
}

fn distance_squared_to_segment(p: Point2<f64>, a: Point2<f64>, b: Point2<f64>) -> f64 {
    let ab = b - a;
    let len_sq = ab.magnitude_squared();
    if len_sq == 0.0 {
        return p.distance_squared(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(img: &Image, color: Bgr) -> usize {
        img.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn test_plot_points() {
        let points = vec![Point2::new(0.1, 0.1), Point2::new(0.9, 0.5), Point2::new(0.9, 0.501)];
        let img = plot_points(&points, 256);
        // The last two land in the same pixel.
        assert_eq!(count(&img, WHITE), 2);
        assert_eq!(img.get(25, 25), Some(WHITE));
        assert_eq!(img.get(230, 128), Some(WHITE));
    }

    #[test]
    fn test_plot_endpoints_on_boundary() {
        let segments = vec![Segment2::from_coords(0.0, 0.5, 1.0, 0.5)];
        let img = plot_endpoints(&segments, 256);
        assert_eq!(img.get(0, 128), Some(WHITE));
        assert_eq!(img.get(255, 128), Some(WHITE));
        assert_eq!(count(&img, WHITE), 2);
    }

    #[test]
    fn test_render_horizontal_line_width() {
        let segments = vec![Segment2::from_coords(0.0, 0.5, 1.0, 0.5)];
        let img = render_diagram(&segments, 256, 4, NamedColor::White, NamedColor::Red);
        let red = NamedColor::Red.bgr8();

        // y = 128 px exactly; centers 126.5..=129.5 are within 2 px.
        for y in 126..=129 {
            assert_eq!(img.get(100, y), Some(red), "row {y}");
        }
        assert_eq!(img.get(100, 125), Some(WHITE));
        assert_eq!(img.get(100, 130), Some(WHITE));
        assert_eq!(count(&img, red), 256 * 4);
    }

    #[test]
    fn test_render_fills_cells() {
        let img = render_diagram(&[], 256, 1, NamedColor::Navy, NamedColor::Black);
        assert_eq!(count(&img, NamedColor::Navy.bgr8()), 256 * 256);
    }

    #[test]
    fn test_diagonal_line_has_no_gaps() {
        let segments = vec![Segment2::from_coords(0.0, 0.0, 1.0, 1.0)];
        let img = render_diagram(&segments, 256, 1, NamedColor::Black, NamedColor::White);
        for i in 0..256 {
            assert_eq!(img.get(i, i), Some(WHITE));
        }
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(4.0, 0.0);
        assert_eq!(distance_squared_to_segment(Point2::new(2.0, 3.0), a, b), 9.0);
        assert_eq!(distance_squared_to_segment(Point2::new(7.0, 4.0), a, b), 25.0);
        assert_eq!(distance_squared_to_segment(Point2::new(1.0, 1.0), a, a), 2.0);
    }
}
