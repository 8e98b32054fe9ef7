//! Per-demand-point cache of the nearest facility.
//!
//! The index is always tied to one facility list. Repair methods mutate the
//! index in place to describe the facility list *after* a move, so they are
//! meant to run on a scratch copy and be committed only when the move wins.

use crate::point::Point;
use crate::problem::Problem;
use std::ops::Index;

/// Nearest-facility assignment of a single demand point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment {
    /// Distance to the nearest facility
    pub distance: f64,
    /// Position of that facility in the solution
    pub facility: usize,
}

/// Nearest-facility assignments, parallel to the problem's points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceIndex {
    assignments: Vec<Assignment>,
}

impl DistanceIndex {
    /// Build the index from scratch by scanning every facility for every point.
    pub fn build(problem: &Problem, facilities: &[Point]) -> Self {
        let assignments = problem
            .points()
            .iter()
            .map(|point| nearest(point, facilities, None))
            .collect();

        DistanceIndex { assignments }
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter()
    }

    /// Sum of the cached nearest distances (the p-median cost).
    pub fn total(&self) -> f64 {
        self.assignments.iter().map(|a| a.distance).sum()
    }

    /// Repair for a facility at `candidate` appended at position `facility`.
    ///
    /// Returns the cost of the facility list with the candidate added.
    pub fn repair_insertion(&mut self, problem: &Problem, candidate: &Point, facility: usize) -> f64 {
        let mut total = 0.0;

        for (assignment, point) in self.assignments.iter_mut().zip(problem.points()) {
            let distance = point.distance(candidate);
            if distance < assignment.distance {
                *assignment = Assignment { distance, facility };
            }
            total += assignment.distance;
        }

        total
    }

    /// Repair for the facility at position `removed` being erased.
    ///
    /// Points served by the removed facility are rescanned against the others.
    /// Facility positions above `removed` shift down by one so the index
    /// matches the shortened list. Requires at least two facilities.
    pub fn repair_elimination(&mut self, problem: &Problem, facilities: &[Point], removed: usize) -> f64 {
        debug_assert!(facilities.len() > 1, "cannot eliminate the last facility");
        let mut total = 0.0;

        for (assignment, point) in self.assignments.iter_mut().zip(problem.points()) {
            if assignment.facility == removed {
                *assignment = nearest(point, facilities, Some(removed));
            }
            if assignment.facility > removed {
                assignment.facility -= 1;
            }
            total += assignment.distance;
        }

        total
    }

    /// Repair for the facility at position `slot` being replaced by `incoming`.
    ///
    /// Elimination of the outgoing facility followed by insertion of the
    /// incoming one into the same slot.
    pub fn repair_exchange(
        &mut self,
        problem: &Problem,
        facilities: &[Point],
        slot: usize,
        incoming: &Point,
    ) -> f64 {
        let mut total = 0.0;

        for (assignment, point) in self.assignments.iter_mut().zip(problem.points()) {
            if assignment.facility == slot {
                *assignment = nearest(point, facilities, Some(slot));
            }

            let distance = point.distance(incoming);
            if distance < assignment.distance {
                *assignment = Assignment {
                    distance,
                    facility: slot,
                };
            }
            total += assignment.distance;
        }

        total
    }

    /// Check that every assignment names a live facility at the true minimum distance.
    pub fn is_consistent_with(&self, problem: &Problem, facilities: &[Point], tolerance: f64) -> bool {
        self.assignments.len() == problem.size()
            && self
                .assignments
                .iter()
                .zip(problem.points())
                .all(|(assignment, point)| {
                    let expected = nearest(point, facilities, None);
                    assignment.facility < facilities.len()
                        && (assignment.distance - expected.distance).abs() <= tolerance
                        && (point.distance(&facilities[assignment.facility]) - assignment.distance)
                            .abs()
                            <= tolerance
                })
    }
}

impl Index<usize> for DistanceIndex {
    type Output = Assignment;

    fn index(&self, i: usize) -> &Assignment {
        &self.assignments[i]
    }
}

/// Find the nearest facility to `point`, optionally skipping one position.
///
/// A facility located exactly at the point is a valid zero-distance assignment.
fn nearest(point: &Point, facilities: &[Point], skip: Option<usize>) -> Assignment {
    let mut best = Assignment {
        distance: f64::INFINITY,
        facility: 0,
    };

    for (j, facility) in facilities.iter().enumerate() {
        if Some(j) == skip {
            continue;
        }
        let distance = point.distance(facility);
        if distance < best.distance {
            best = Assignment {
                distance,
                facility: j,
            };
        }
    }

    best
}
