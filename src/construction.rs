//! Randomized greedy construction with a restricted candidate list (RCL).

use crate::error::{Error, Result};
use crate::problem::Problem;
use crate::solution::Solution;
use itertools::Itertools;
use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

/// Builds solutions by repeatedly opening a facility drawn from the
/// `rcl_size` points farthest from every facility opened so far.
#[derive(Debug, Clone, Copy)]
pub struct RandomizedGreedy {
    pub rcl_size: usize,
}

impl RandomizedGreedy {
    pub fn new(rcl_size: usize) -> Self {
        RandomizedGreedy { rcl_size }
    }

    /// Construct a solution with `k` facilities, the first one drawn uniformly.
    pub fn construct<R: Rng>(&self, problem: &Problem, k: usize, rng: &mut R) -> Result<Solution> {
        check_arguments(problem, k, self.rcl_size)?;
        let first = rng.gen_range(0..problem.size());
        Ok(self.construct_from(problem, k, first, rng))
    }

    /// Construct a solution with `k` facilities starting from problem point `first`.
    pub fn construct_from<R: Rng>(
        &self,
        problem: &Problem,
        k: usize,
        first: usize,
        rng: &mut R,
    ) -> Solution {
        let mut solution = Solution::new(problem.dimensions());
        let mut selected = vec![false; problem.size()];
        let mut nearest = vec![f64::INFINITY; problem.size()];

        open_facility(problem, first, &mut solution, &mut selected, &mut nearest);

        while solution.len() < k {
            let rcl = restricted_candidate_list(&nearest, &selected, self.rcl_size);
            let Some(&pick) = rcl.choose(rng) else {
                break;
            };
            trace!("rcl {:?} -> picked {}", rcl, pick);
            open_facility(problem, pick, &mut solution, &mut selected, &mut nearest);
        }

        solution
    }
}

/// Open problem point `point` as a facility and refresh the nearest distances.
fn open_facility(
    problem: &Problem,
    point: usize,
    solution: &mut Solution,
    selected: &mut [bool],
    nearest: &mut [f64],
) {
    selected[point] = true;
    let facility = &problem[point];
    for (distance, location) in nearest.iter_mut().zip(problem.points()) {
        *distance = distance.min(location.distance(facility));
    }
    solution.push(facility.clone());
}

/// Rank the unselected points by distance to their nearest open facility and
/// keep the `rcl_size` farthest ones. Ties keep the lower point index first.
pub fn restricted_candidate_list(nearest: &[f64], selected: &[bool], rcl_size: usize) -> Vec<usize> {
    (0..nearest.len())
        .filter(|&i| !selected[i])
        .sorted_by(|&a, &b| nearest[b].total_cmp(&nearest[a]))
        .take(rcl_size)
        .collect()
}

/// Compute the RCL for a partial solution given as selected problem indices.
pub fn candidate_list_for(problem: &Problem, facilities: &[usize], rcl_size: usize) -> Vec<usize> {
    let mut selected = vec![false; problem.size()];
    for &f in facilities {
        selected[f] = true;
    }

    let nearest: Vec<f64> = problem
        .points()
        .iter()
        .map(|p| {
            facilities
                .iter()
                .map(|&f| p.distance(&problem[f]))
                .fold(f64::INFINITY, f64::min)
        })
        .collect();

    restricted_candidate_list(&nearest, &selected, rcl_size)
}

/// Check the `k` and `rcl_size` preconditions shared by the solvers.
pub fn check_arguments(problem: &Problem, k: usize, rcl_size: usize) -> Result<()> {
    let n = problem.size();
    if k == 0 || k > n {
        return Err(Error::invalid_argument(format!(
            "k must be in 1..={}, got {}",
            n, k
        )));
    }
    if rcl_size == 0 || rcl_size > n {
        return Err(Error::invalid_argument(format!(
            "rcl_size must be in 1..={}, got {}",
            n, rcl_size
        )));
    }
    Ok(())
}
