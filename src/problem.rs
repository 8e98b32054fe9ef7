//! Problem definition: the immutable set of demand points.

use crate::error::{Error, Result};
use crate::point::Point;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::Index;
use std::path::Path;

/// A p-median instance: `n` demand points sharing dimensionality `d`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub name: String,
    points: Vec<Point>,
    dimensions: usize,
}

impl Problem {
    /// Create a new problem, checking that it holds at least one point and
    /// that every point has the same, non-zero, number of coordinates.
    pub fn new(name: String, points: Vec<Point>) -> Result<Self> {
        let first = points
            .first()
            .ok_or_else(|| Error::invalid_argument("a problem needs at least one point"))?;

        let dimensions = first.dimensions();
        if dimensions == 0 {
            return Err(Error::invalid_argument(
                "points need at least one coordinate",
            ));
        }

        if let Some(pos) = points.iter().position(|p| p.dimensions() != dimensions) {
            return Err(Error::invalid_argument(format!(
                "point {} has {} coordinates, expected {}",
                pos,
                points[pos].dimensions(),
                dimensions
            )));
        }

        Ok(Problem {
            name,
            points,
            dimensions,
        })
    }

    /// Number of demand points.
    pub fn size(&self) -> usize {
        self.points.len()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Load a problem from a file.
    ///
    /// The file is whitespace separated: the point count `m`, the dimension
    /// count `d`, then `m * d` coordinates.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::parse(name, &content)
    }

    /// Parse a problem from the textual instance format.
    pub fn parse(name: String, content: &str) -> Result<Self> {
        let mut tokens = content.split_whitespace();

        let mut next_count = |what: &str| -> Result<usize> {
            let token = tokens
                .next()
                .ok_or_else(|| Error::invalid_instance(format!("missing {}", what)))?;
            token
                .parse::<usize>()
                .map_err(|_| Error::invalid_instance(format!("bad {} '{}'", what, token)))
        };

        let m = next_count("point count")?;
        let d = next_count("dimension count")?;

        let coords = tokens
            .map(|token| {
                token
                    .parse::<f64>()
                    .map_err(|_| Error::invalid_instance(format!("bad coordinate '{}'", token)))
            })
            .collect::<Result<Vec<f64>>>()?;

        if m == 0 || d == 0 {
            return Err(Error::invalid_instance(format!(
                "header declares {} points of dimension {}",
                m, d
            )));
        }
        let expected = m.checked_mul(d).ok_or_else(|| {
            Error::invalid_instance(format!("{} points of dimension {} overflow", m, d))
        })?;
        if coords.len() != expected {
            return Err(Error::invalid_instance(format!(
                "expected {} coordinates for {} points of dimension {}, found {}",
                expected,
                m,
                d,
                coords.len()
            )));
        }

        let points = coords
            .chunks(d)
            .map(|chunk| Point::new(chunk.to_vec()))
            .collect();

        Problem::new(name, points)
    }
}

impl Index<usize> for Problem {
    type Output = Point;

    fn index(&self, i: usize) -> &Point {
        &self.points[i]
    }
}
