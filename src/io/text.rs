//! Plain-text point and segment files.
//!
//! # Formats
//!
//! Points file:
//!
//! ```text
//! NumPoints = 3
//! 0.25 0.5
//! 0.75 0.5
//! 0.5 0.9
//! ```
//!
//! Segments file, one `x1 y1 x2 y2` line per segment:
//!
//! ```text
//! 1
//! 0.5 0 0.5 1
//! ```
//!
//! Numbers are written in the shortest form that reads back to the same
//! `f64`. Blank lines are ignored when reading.
//!
//! # Example
//!
//! ```
//! use voronoise::io::{read_points, write_points};
//! use voronoise::Point2;
//!
//! let points = vec![Point2::new(0.25, 0.5), Point2::new(0.75, 0.125)];
//! let mut buf = Vec::new();
//! write_points(&mut buf, &points).unwrap();
//!
//! assert_eq!(String::from_utf8(buf.clone()).unwrap(), "NumPoints = 2\n0.25 0.5\n0.75 0.125\n");
//! assert_eq!(read_points(buf.as_slice()).unwrap(), points);
//! ```

use crate::error::{Result, VoronoiError};
use crate::primitives::{Point2, Segment2};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const POINTS_HEADER: &str = "NumPoints";

/// Writes `points` in the points file format.
pub fn write_points<W: Write>(mut w: W, points: &[Point2<f64>]) -> Result<()> {
    writeln!(w, "{POINTS_HEADER} = {}", points.len())?;
    for p in points {
        writeln!(w, "{} {}", p.x, p.y)?;
    }
    w.flush()?;
    Ok(())
}

/// Reads a points file.
///
/// # Errors
///
/// [`VoronoiError::Format`] for a missing or malformed header, a line that
/// is not two numbers, or a point count that disagrees with the header.
pub fn read_points<R: BufRead>(r: R) -> Result<Vec<Point2<f64>>> {
    let mut lines = Lines::new(r);

    let (line, header) = lines.next_required("missing NumPoints header")?;
    let count = header
        .split_once('=')
        .filter(|(key, _)| key.trim() == POINTS_HEADER)
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .ok_or_else(|| format_error(line, format!("expected `{POINTS_HEADER} = <count>`, found `{header}`")))?;

    let mut points = Vec::new();
    while let Some((line, text)) = lines.next_line()? {
        let [x, y] = parse_numbers::<2>(line, &text)?;
        points.push(Point2::new(x, y));
    }

    if points.len() != count {
        return Err(format_error(
            lines.last_line,
            format!("header declares {count} points, found {}", points.len()),
        ));
    }
    Ok(points)
}

/// Writes `segments` in the segments file format.
pub fn write_segments<W: Write>(mut w: W, segments: &[Segment2<f64>]) -> Result<()> {
    writeln!(w, "{}", segments.len())?;
    for s in segments {
        writeln!(w, "{} {} {} {}", s.start.x, s.start.y, s.end.x, s.end.y)?;
    }
    w.flush()?;
    Ok(())
}

/// Reads a segments file.
///
/// # Errors
///
/// [`VoronoiError::Format`] for a malformed count line, a line that is not
/// four numbers, or a segment count that disagrees with the first line.
pub fn read_segments<R: BufRead>(r: R) -> Result<Vec<Segment2<f64>>> {
    let mut lines = Lines::new(r);

    let (line, header) = lines.next_required("missing segment count")?;
    let count = header
        .trim()
        .parse::<usize>()
        .map_err(|_| format_error(line, format!("expected a segment count, found `{header}`")))?;

    let mut segments = Vec::new();
    while let Some((line, text)) = lines.next_line()? {
        let [x1, y1, x2, y2] = parse_numbers::<4>(line, &text)?;
        segments.push(Segment2::from_coords(x1, y1, x2, y2));
    }

    if segments.len() != count {
        return Err(format_error(
            lines.last_line,
            format!("header declares {count} segments, found {}", segments.len()),
        ));
    }
    Ok(segments)
}

/// Writes a points file at `path`, replacing it if it exists.
pub fn save_points<P: AsRef<Path>>(path: P, points: &[Point2<f64>]) -> Result<()> {
    write_points(BufWriter::new(File::create(path)?), points)
}

pub fn load_points<P: AsRef<Path>>(path: P) -> Result<Vec<Point2<f64>>> {
    read_points(BufReader::new(File::open(path)?))
}

/// Writes a segments file at `path`, replacing it if it exists.
pub fn save_segments<P: AsRef<Path>>(path: P, segments: &[Segment2<f64>]) -> Result<()> {
    write_segments(BufWriter::new(File::create(path)?), segments)
}

pub fn load_segments<P: AsRef<Path>>(path: P) -> Result<Vec<Segment2<f64>>> {
    read_segments(BufReader::new(File::open(path)?))
}

fn format_error(line: usize, message: String) -> VoronoiError {
    VoronoiError::Format { line, message }
}

/// Parses exactly `N` whitespace-separated finite numbers.
fn parse_numbers<const N: usize>(line: usize, text: &str) -> Result<[f64; N]> {
    let mut values = [0.0; N];
    let mut fields = text.split_whitespace();
    for value in values.iter_mut() {
        let field = fields
            .next()
            .ok_or_else(|| format_error(line, format!("expected {N} numbers, found `{text}`")))?;
        *value = field
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format_error(line, format!("`{field}` is not a finite number")))?;
    }
    if fields.next().is_some() {
        return Err(format_error(line, format!("expected {N} numbers, found `{text}`")));
    }
    Ok(values)
}

/// Non-blank lines with 1-based line numbers.
struct Lines<R> {
    inner: std::io::Lines<R>,
    last_line: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(r: R) -> Self {
        Self {
            inner: r.lines(),
            last_line: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        for text in self.inner.by_ref() {
            let text = text?;
            self.last_line += 1;
            if !text.trim().is_empty() {
                return Ok(Some((self.last_line, text)));
            }
        }
        Ok(None)
    }

    fn next_required(&mut self, missing: &str) -> Result<(usize, String)> {
        self.next_line()?
            .ok_or_else(|| format_error(self.last_line.max(1), missing.to_string()))
    }
}
