//! Solution representation for the p-median problem.

use crate::distance_index::DistanceIndex;
use crate::point::{Point, COORDINATE_TOLERANCE};
use crate::problem::Problem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// An ordered list of facility locations.
#[derive(Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The facility locations (centroids for the k-means baseline)
    pub facilities: Vec<Point>,
    dimensions: usize,
}

impl Solution {
    /// Create a new, empty solution for points of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Solution {
            facilities: Vec::new(),
            dimensions,
        }
    }

    /// Create a solution from a list of facilities.
    pub fn from_facilities(dimensions: usize, facilities: Vec<Point>) -> Self {
        Solution {
            facilities,
            dimensions,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of facilities.
    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    pub fn push(&mut self, facility: Point) {
        self.facilities.push(facility);
    }

    /// Check whether a facility sits at `point` (within the coordinate tolerance).
    pub fn contains(&self, point: &Point) -> bool {
        self.facilities
            .iter()
            .any(|f| f.approx_eq(point, COORDINATE_TOLERANCE))
    }

    /// Calculate the p-median cost: the sum over all demand points of the
    /// distance to the nearest facility.
    pub fn evaluate(&self, problem: &Problem) -> f64 {
        problem
            .points()
            .iter()
            .map(|point| {
                self.facilities
                    .iter()
                    .map(|f| point.distance(f))
                    .fold(f64::INFINITY, f64::min)
            })
            .sum()
    }

    /// Calculate the p-median cost and rebuild `index` for this solution.
    pub fn evaluate_into(&self, problem: &Problem, index: &mut DistanceIndex) -> f64 {
        *index = DistanceIndex::build(problem, &self.facilities);
        index.total()
    }

    /// Sum of squared distances from each point to its nearest facility.
    pub fn sse(&self, problem: &Problem) -> f64 {
        problem
            .points()
            .iter()
            .map(|point| {
                self.facilities
                    .iter()
                    .map(|f| point.squared_distance(f))
                    .fold(f64::INFINITY, f64::min)
            })
            .sum()
    }
}

impl Index<usize> for Solution {
    type Output = Point;

    fn index(&self, i: usize) -> &Point {
        &self.facilities[i]
    }
}

/// Two solutions are equal when they hold the same facilities in the same
/// order, each coordinate within 0.001.
impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.facilities.len() == other.facilities.len()
            && self
                .facilities
                .iter()
                .zip(&other.facilities)
                .all(|(a, b)| a.approx_eq(b, COORDINATE_TOLERANCE))
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Dimensions: {}", self.dimensions)?;
        writeln!(f, "  Facilities: {}", self.facilities.len())?;

        for (i, facility) in self.facilities.iter().enumerate() {
            writeln!(f, "  Facility {}: {:?}", i, facility.coords())?;
        }

        Ok(())
    }
}
