//! Configuration parameters for the GRASP and GVNS solvers.

use crate::error::{Error, Result};
use crate::local_search::DescentStrategy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration settings shared by the solvers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Consecutive non-improving iterations before GRASP and GVNS stop
    pub max_iterations_without_improvement: u32,
    /// Hard cap on GVNS outer iterations (and k-means iterations)
    pub max_iterations: u32,
    /// RCL size of the constructive phase that seeds GVNS
    pub gvns_rcl_size: usize,
    /// Relative improvement an inserted facility has to deliver
    pub insertion_penalty: f64,
    /// Relative degradation tolerated when eliminating a facility
    pub elimination_boost: f64,
    /// Neighborhood ordering of the local search descent
    pub descent: DescentStrategy,
    /// Refine every GRASP construction with local search
    pub grasp_local_search: bool,
    /// Seed for the random generator; entropy when absent
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_iterations_without_improvement: 200,
            max_iterations: 3000,
            gvns_rcl_size: 3,
            insertion_penalty: 0.2,
            elimination_boost: 0.05,
            descent: DescentStrategy::Fixed,
            grasp_local_search: false,
            seed: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the maximum iterations without improvement.
    pub fn with_max_iterations_without_improvement(mut self, iterations: u32) -> Self {
        self.max_iterations_without_improvement = iterations;
        self
    }

    /// Set the hard iteration cap.
    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Set the RCL size used to seed GVNS.
    pub fn with_gvns_rcl_size(mut self, size: usize) -> Self {
        self.gvns_rcl_size = size;
        self
    }

    /// Set the insertion penalty.
    pub fn with_insertion_penalty(mut self, penalty: f64) -> Self {
        self.insertion_penalty = penalty;
        self
    }

    /// Set the elimination boost.
    pub fn with_elimination_boost(mut self, boost: f64) -> Self {
        self.elimination_boost = boost;
        self
    }

    pub fn with_descent(mut self, descent: DescentStrategy) -> Self {
        self.descent = descent;
        self
    }

    pub fn with_grasp_local_search(mut self, enabled: bool) -> Self {
        self.grasp_local_search = enabled;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject parameter values the solvers cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations_without_improvement == 0 || self.max_iterations == 0 {
            return Err(Error::invalid_argument("iteration caps must be positive"));
        }
        if self.gvns_rcl_size == 0 {
            return Err(Error::invalid_argument("gvns_rcl_size must be at least 1"));
        }
        if !(0.0..1.0).contains(&self.insertion_penalty) {
            return Err(Error::invalid_argument(format!(
                "insertion_penalty must be in [0, 1), got {}",
                self.insertion_penalty
            )));
        }
        if !(0.0..1.0).contains(&self.elimination_boost) {
            return Err(Error::invalid_argument(format!(
                "elimination_boost must be in [0, 1), got {}",
                self.elimination_boost
            )));
        }
        Ok(())
    }
}
