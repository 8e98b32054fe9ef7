//! Elimination neighborhood: close one facility.

use crate::distance_index::DistanceIndex;
use crate::problem::Problem;
use crate::solution::Solution;

use super::{keep_if_better, Candidate, LocalSearch, Move};

impl LocalSearch {
    /// Find the facility whose removal costs the least.
    ///
    /// A removal qualifies while `value * (1 - elimination_boost)` stays below
    /// `cost`. A single-facility solution has no elimination neighbors.
    pub fn elimination_neighborhood(
        &self,
        solution: &Solution,
        index: &DistanceIndex,
        cost: f64,
        problem: &Problem,
    ) -> Option<Candidate> {
        if solution.len() < 2 {
            return None;
        }

        let mut best = None;
        let mut scratch = DistanceIndex::default();

        for facility in 0..solution.len() {
            scratch.clone_from(index);
            let value = scratch.repair_elimination(problem, &solution.facilities, facility);

            if value * (1.0 - self.elimination_boost) < cost {
                keep_if_better(&mut best, Move::Eliminate { facility }, value, &mut scratch);
            }
        }

        best
    }
}
