//! Exchange neighborhood: swap an open facility for a problem point.

use crate::distance_index::DistanceIndex;
use crate::problem::Problem;
use crate::solution::Solution;

use super::{improves, keep_if_better, Candidate, LocalSearch, Move};

impl LocalSearch {
    /// Find the strictly best-improving (facility, point) swap.
    pub fn exchange_neighborhood(
        &self,
        solution: &Solution,
        index: &DistanceIndex,
        cost: f64,
        problem: &Problem,
    ) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        let mut scratch = DistanceIndex::default();

        for facility in 0..solution.len() {
            for (point, location) in problem.points().iter().enumerate() {
                scratch.clone_from(index);
                let value =
                    scratch.repair_exchange(problem, &solution.facilities, facility, location);

                let bound = best.as_ref().map_or(cost, |b| b.cost);
                if improves(value, bound) {
                    keep_if_better(&mut best, Move::Exchange { facility, point }, value, &mut scratch);
                }
            }
        }

        best
    }
}
