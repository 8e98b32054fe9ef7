//! Insertion neighborhood: open one additional facility.

use crate::distance_index::DistanceIndex;
use crate::problem::Problem;
use crate::solution::Solution;

use super::{keep_if_better, Candidate, LocalSearch, Move};

impl LocalSearch {
    /// Find the best problem point to add as a new facility.
    ///
    /// A candidate only qualifies if it cuts the cost below
    /// `cost * (1 - insertion_penalty)`; returns `None` otherwise.
    pub fn insertion_neighborhood(
        &self,
        solution: &Solution,
        index: &DistanceIndex,
        cost: f64,
        problem: &Problem,
    ) -> Option<Candidate> {
        let threshold = cost * (1.0 - self.insertion_penalty);
        let slot = solution.len();
        let mut best = None;
        let mut scratch = DistanceIndex::default();

        for (point, location) in problem.points().iter().enumerate() {
            scratch.clone_from(index);
            let value = scratch.repair_insertion(problem, location, slot);

            if value < threshold {
                keep_if_better(&mut best, Move::Insert { point }, value, &mut scratch);
            }
        }

        best
    }
}
