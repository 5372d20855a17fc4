//! Point datasets: loading from text files and bounding-box computation.

use std::path::Path;

use num_traits::NumCast;

use crate::boundary::{Boundary, Interval};
use crate::error::Result;
use crate::point::Point;
use crate::r#type::IndexableNum;

/// A collection of points with a shared dimensionality.
///
/// ## Text format
///
/// A header line "`d n`" followed by `n` lines each holding `d`
/// whitespace-separated numeric values. A malformed header, `d < 1`, or
/// `n < 1` yields an empty dataset rather than an error; a truncated body
/// keeps the points read so far.
#[derive(Debug, Default)]
pub struct Dataset<const D: usize, N: IndexableNum> {
    points: Vec<Point<D, N>>,
}

impl<const D: usize, N: IndexableNum> Dataset<D, N> {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a dataset from an existing point list.
    pub fn from_points(points: Vec<Point<D, N>>) -> Self {
        Self { points }
    }

    /// Load a dataset from a text file.
    ///
    /// ## Errors
    ///
    /// - If the file cannot be read. Malformed content is not an error; see
    ///   the type docs.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut dataset = Self::new();
        dataset.load_text(&contents);
        Ok(dataset)
    }

    /// Append the points described by `text` (see the type docs for the
    /// format) to this dataset.
    pub fn load_text(&mut self, text: &str) {
        let mut tokens = text.split_whitespace();
        let Some(num_dimensions) = tokens.next().and_then(|t| t.parse::<usize>().ok()) else {
            return;
        };
        let Some(num_points) = tokens.next().and_then(|t| t.parse::<usize>().ok()) else {
            return;
        };
        if num_dimensions < 1 || num_points < 1 {
            return;
        }

        self.points.reserve(num_points);
        for _ in 0..num_points {
            let mut values = [N::zero(); D];
            for d in 0..num_dimensions {
                let parsed = tokens
                    .next()
                    .and_then(|t| t.parse::<f64>().ok())
                    .and_then(|v| <N as NumCast>::from(v));
                // A truncated or unparsable body ends the load, keeping the
                // points read so far.
                let Some(value) = parsed else {
                    return;
                };
                if d < D {
                    values[d] = value;
                }
            }
            self.points.push(Point::new(values));
        }
    }

    /// All points in the dataset.
    pub fn points(&self) -> &[Point<D, N>] {
        &self.points
    }

    /// The minimum bounding hyper-rectangle containing every point, or the
    /// D-fold `[0, 0]` boundary for an empty dataset.
    pub fn compute_boundary(&self) -> Boundary<D, N> {
        let mut boundary = Boundary::splat(Interval::new(N::zero(), N::zero()));
        let Some(first) = self.points.first() else {
            return boundary;
        };
        for d in 0..D {
            boundary[d] = Interval::new(first[d], first[d]);
        }
        for point in &self.points[1..] {
            for d in 0..D {
                let value = point[d];
                if value < boundary[d].min {
                    boundary[d].min = value;
                } else if value > boundary[d].max {
                    boundary[d].max = value;
                }
            }
        }
        boundary
    }
}
