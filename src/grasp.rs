//! GRASP: repeated randomized greedy construction with a restart counter.

use crate::config::Config;
use crate::construction::{check_arguments, RandomizedGreedy};
use crate::error::Result;
use crate::local_search::{improves, LocalSearch};
use crate::problem::Problem;
use crate::solution::Solution;
use log::{debug, info};
use rand::Rng;

/// Greedy randomized adaptive search procedure.
pub struct Grasp {
    pub config: Config,
    pub local_search: LocalSearch,
}

impl Grasp {
    pub fn new(config: Config) -> Self {
        Grasp {
            local_search: LocalSearch::from_config(&config),
            config,
        }
    }

    /// Construct solutions until `max_iterations_without_improvement`
    /// consecutive constructions fail to beat the best one.
    ///
    /// Returns the trace of accepted solutions, strictly decreasing in cost.
    pub fn solve<R: Rng>(
        &self,
        problem: &Problem,
        k: usize,
        rcl_size: usize,
        rng: &mut R,
    ) -> Result<Vec<Solution>> {
        self.config.validate()?;
        check_arguments(problem, k, rcl_size)?;

        let constructor = RandomizedGreedy::new(rcl_size);
        let mut trace: Vec<Solution> = Vec::new();
        let mut best_cost = f64::INFINITY;
        let mut without_improvement = 0u32;
        let mut constructions = 0u64;

        info!(
            "grasp: n={} k={} rcl_size={} on {}",
            problem.size(),
            k,
            rcl_size,
            problem.name
        );

        while without_improvement < self.config.max_iterations_without_improvement {
            let mut solution = constructor.construct(problem, k, rng)?;
            let cost = if self.config.grasp_local_search {
                let optimum = self.local_search.run(&solution, problem, rng);
                solution = optimum.solution;
                optimum.cost
            } else {
                solution.evaluate(problem)
            };
            constructions += 1;

            if trace.is_empty() || improves(cost, best_cost) {
                debug!("grasp: construction {} improved to {:.4}", constructions, cost);
                trace.push(solution);
                best_cost = cost;
                without_improvement = 0;
            } else {
                without_improvement += 1;
            }
        }

        info!(
            "grasp: {} constructions, {} accepted, best cost {:.4}",
            constructions,
            trace.len(),
            best_cost
        );

        Ok(trace)
    }
}
