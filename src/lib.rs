//! # p-median heuristics
//!
//! Metaheuristic solvers for the uncapacitated p-median problem: choose `k`
//! facility locations among `n` demand points so that the sum of distances
//! from every point to its nearest facility is minimal.
//!
//! Two solvers share one data model and one evaluation contract:
//! - GRASP, a repeated randomized greedy construction driven by a restricted
//!   candidate list ([`grasp::Grasp`]),
//! - GVNS, which alternates random shaking with a local search over
//!   insertion, elimination and exchange moves ([`gvns::Gvns`]).
//!
//! Local search re-evaluates moves incrementally through a per-point
//! nearest-facility cache ([`distance_index::DistanceIndex`]).

pub mod config;
pub mod construction;
pub mod distance_index;
pub mod error;
pub mod grasp;
pub mod gvns;
pub mod kmeans;
pub mod local_search;
pub mod point;
pub mod problem;
pub mod solution;
pub mod utils;

pub use crate::error::{Error, Result};

use crate::config::Config;
use crate::grasp::Grasp;
use crate::gvns::Gvns;
use crate::local_search::DescentStrategy;
use crate::problem::Problem;
use crate::solution::Solution;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Build the solver random generator from a seed, or from entropy.
pub fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Run GRASP with the default configuration and an entropy-seeded generator.
pub fn construct_and_search(problem: &Problem, k: usize, rcl_size: usize) -> Result<Vec<Solution>> {
    let config = Config::default();
    let mut rng = make_rng(config.seed);
    Grasp::new(config).solve(problem, k, rcl_size, &mut rng)
}

/// Run GVNS with the default configuration and an entropy-seeded generator.
///
/// `use_rvnd` shuffles the neighborhood order of the local search.
pub fn variable_neighborhood_search(problem: &Problem, k: usize, use_rvnd: bool) -> Result<Vec<Solution>> {
    let descent = if use_rvnd {
        DescentStrategy::Randomized
    } else {
        DescentStrategy::Fixed
    };
    let config = Config::default().with_descent(descent);
    let mut rng = make_rng(config.seed);
    Gvns::new(config).solve(problem, k, &mut rng)
}
