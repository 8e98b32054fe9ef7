//! Geometry primitives: a fixed-dimension point and the Euclidean metric.

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Absolute per-coordinate tolerance used when comparing facility locations.
pub const COORDINATE_TOLERANCE: f64 = 0.001;

/// A point in d-dimensional space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point(Vec<f64>);

impl Point {
    /// Create a point from its coordinates.
    pub fn new(coords: Vec<f64>) -> Self {
        Point(coords)
    }

    /// Number of coordinates.
    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    pub fn coords(&self) -> &[f64] {
        &self.0
    }

    /// Euclidean distance to another point of the same dimensionality.
    pub fn distance(&self, other: &Point) -> f64 {
        euclidean_distance(self, other)
    }

    /// Squared Euclidean distance, used by the SSE metric.
    pub fn squared_distance(&self, other: &Point) -> f64 {
        self.0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    /// Check whether both points agree on every coordinate within `tolerance`.
    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(&other.0)
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl From<Vec<f64>> for Point {
    fn from(coords: Vec<f64>) -> Self {
        Point(coords)
    }
}

impl Index<usize> for Point {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

/// Calculate the Euclidean distance between two points.
pub fn euclidean_distance(a: &Point, b: &Point) -> f64 {
    a.squared_distance(b).sqrt()
}

