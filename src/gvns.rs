//! General Variable Neighborhood Search: shaking plus local search.

use crate::config::Config;
use crate::construction::{check_arguments, RandomizedGreedy};
use crate::error::Result;
use crate::local_search::{improves, LocalSearch};
use crate::problem::Problem;
use crate::solution::Solution;
use log::{debug, info, trace};
use rand::seq::{index, SliceRandom};
use rand::Rng;

/// General variable neighborhood search driver.
pub struct Gvns {
    pub config: Config,
    pub local_search: LocalSearch,
}

impl Gvns {
    pub fn new(config: Config) -> Self {
        Gvns {
            local_search: LocalSearch::from_config(&config),
            config,
        }
    }

    /// Run GVNS for `k` facilities.
    ///
    /// The start solution comes from the RCL constructor followed by a local
    /// search. Each outer iteration shakes the incumbent with growing sizes,
    /// resetting to size 1 whenever a shaken-and-improved solution wins.
    /// Returns the trace of accepted solutions, strictly decreasing in cost.
    pub fn solve<R: Rng>(&self, problem: &Problem, k: usize, rng: &mut R) -> Result<Vec<Solution>> {
        self.config.validate()?;
        let rcl_size = self.config.gvns_rcl_size.min(problem.size());
        check_arguments(problem, k, rcl_size)?;

        info!(
            "gvns: n={} k={} strategy={:?} on {}",
            problem.size(),
            k,
            self.local_search.strategy,
            problem.name
        );

        let start = RandomizedGreedy::new(rcl_size).construct(problem, k, rng)?;
        let optimum = self.local_search.run(&start, problem, rng);
        let mut incumbent = optimum.solution;
        let mut incumbent_cost = optimum.cost;

        let mut solutions: Vec<Solution> = Vec::new();
        let mut best_cost = f64::INFINITY;
        let mut iterations = 0u32;
        let mut without_improvement = 0u32;

        while without_improvement < self.config.max_iterations_without_improvement
            && iterations < self.config.max_iterations
        {
            let mut shake_size = 1;
            loop {
                let outsiders = outsiders(&incumbent, problem);
                if shake_size > incumbent.len().min(outsiders.len()) {
                    break;
                }

                let shaken = shake(&incumbent, problem, &outsiders, shake_size, rng);
                let optimum = self.local_search.run(&shaken, problem, rng);

                if improves(optimum.cost, incumbent_cost) {
                    trace!(
                        "gvns: shake {} improved {:.4} -> {:.4}",
                        shake_size,
                        incumbent_cost,
                        optimum.cost
                    );
                    incumbent = optimum.solution;
                    incumbent_cost = optimum.cost;
                    shake_size = 1;
                } else {
                    shake_size += 1;
                }
            }

            iterations += 1;
            without_improvement += 1;

            if solutions.is_empty() || improves(incumbent_cost, best_cost) {
                debug!(
                    "gvns: iteration {} improved to {:.4} with {} facilities",
                    iterations,
                    incumbent_cost,
                    incumbent.len()
                );
                solutions.push(incumbent.clone());
                best_cost = incumbent_cost;
                without_improvement = 0;
            }
        }

        info!(
            "gvns: {} iterations, {} accepted, best cost {:.4}",
            iterations,
            solutions.len(),
            best_cost
        );

        Ok(solutions)
    }
}

/// Problem points that do not coincide with any facility of `solution`.
pub fn outsiders(solution: &Solution, problem: &Problem) -> Vec<usize> {
    (0..problem.size())
        .filter(|&i| !solution.contains(&problem[i]))
        .collect()
}

/// Replace `size` distinct facilities by `size` distinct points from `outsiders`.
///
/// `size` is clamped to what the solution and the outsider pool allow.
pub fn shake<R: Rng>(
    solution: &Solution,
    problem: &Problem,
    outsiders: &[usize],
    size: usize,
    rng: &mut R,
) -> Solution {
    let size = size.min(solution.len()).min(outsiders.len());
    let mut shaken = solution.clone();

    let positions = index::sample(rng, solution.len(), size);
    let incoming: Vec<usize> = outsiders.choose_multiple(rng, size).copied().collect();

    for (position, point) in positions.iter().zip(incoming) {
        shaken.facilities[position] = problem[point].clone();
    }

    shaken
}
