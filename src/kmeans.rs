//! Plain k-means clustering, the comparison baseline for the p-median solvers.

use crate::config::Config;
use crate::construction::check_arguments;
use crate::error::Result;
use crate::point::Point;
use crate::problem::Problem;
use crate::solution::Solution;
use log::{debug, info};
use rand::seq::index;
use rand::Rng;

/// Lloyd's fixed-point iteration.
pub struct KMeans {
    pub config: Config,
}

impl KMeans {
    pub fn new(config: Config) -> Self {
        KMeans { config }
    }

    /// Cluster `problem` into `k` groups.
    ///
    /// Returns every centroid set produced until the centroids stop moving or
    /// `max_iterations` is reached.
    pub fn solve<R: Rng>(&self, problem: &Problem, k: usize, rng: &mut R) -> Result<Vec<Solution>> {
        self.config.validate()?;
        check_arguments(problem, k, 1)?;

        let initial = index::sample(rng, problem.size(), k)
            .iter()
            .map(|i| problem[i].clone())
            .collect();
        let mut centroids = Solution::from_facilities(problem.dimensions(), initial);
        let mut solutions = Vec::new();

        for iteration in 0..self.config.max_iterations {
            let next = recompute_centroids(problem, &centroids);
            if next == centroids {
                debug!("kmeans: converged after {} iterations", iteration);
                break;
            }
            solutions.push(next.clone());
            centroids = next;
        }

        info!(
            "kmeans: {} centroid sets, final sse {:.4}",
            solutions.len(),
            centroids.sse(problem)
        );

        Ok(solutions)
    }
}

/// Assign every point to its nearest centroid and return the cluster means.
///
/// A centroid whose cluster is empty keeps its position.
fn recompute_centroids(problem: &Problem, centroids: &Solution) -> Solution {
    let d = problem.dimensions();
    let mut sums = vec![vec![0.0; d]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];

    for point in problem.points() {
        let closest = centroids
            .facilities
            .iter()
            .enumerate()
            .map(|(j, c)| (j, point.distance(c)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(j, _)| j)
            .unwrap_or(0);

        counts[closest] += 1;
        for (sum, x) in sums[closest].iter_mut().zip(point.coords()) {
            *sum += x;
        }
    }

    let facilities = sums
        .into_iter()
        .zip(counts)
        .zip(&centroids.facilities)
        .map(|((sum, count), previous)| {
            if count == 0 {
                previous.clone()
            } else {
                Point::new(sum.into_iter().map(|s| s / count as f64).collect())
            }
        })
        .collect();

    Solution::from_facilities(d, facilities)
}
