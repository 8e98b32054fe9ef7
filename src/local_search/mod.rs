//! Local search engine for the p-median problem.
//!
//! Three neighborhoods (exchange, insertion, elimination) are explored with
//! best improvement inside a neighborhood. The descent applies the first
//! neighborhood that strictly improves and restarts from the top of its order.

pub mod elimination;
pub mod exchange;
pub mod insertion;

use crate::config::Config;
use crate::distance_index::DistanceIndex;
use crate::problem::Problem;
use crate::solution::Solution;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::mem;

/// Absolute margin a candidate cost has to beat the incumbent by.
pub const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Strict improvement test used by every acceptance decision.
pub fn improves(candidate: f64, incumbent: f64) -> bool {
    candidate < incumbent - IMPROVEMENT_EPSILON
}

/// The neighborhoods explored by the descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    Exchange,
    Insertion,
    Elimination,
}

/// How the descent orders its neighborhoods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DescentStrategy {
    /// Exchange, then insertion, then elimination
    #[default]
    Fixed,
    /// Shuffle the neighborhoods at every restart (RVND)
    Randomized,
}

impl DescentStrategy {
    /// The neighborhood trial order for the next pass.
    pub fn order<R: Rng>(&self, rng: &mut R) -> [Neighborhood; 3] {
        let mut order = [
            Neighborhood::Exchange,
            Neighborhood::Insertion,
            Neighborhood::Elimination,
        ];
        if *self == DescentStrategy::Randomized {
            order.shuffle(rng);
        }
        order
    }
}

/// A single modification of a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Append problem point `point` as a new facility
    Insert { point: usize },
    /// Remove the facility at position `facility`
    Eliminate { facility: usize },
    /// Replace the facility at position `facility` by problem point `point`
    Exchange { facility: usize, point: usize },
}

impl Move {
    /// Apply the move to a solution.
    pub fn apply(&self, solution: &mut Solution, problem: &Problem) {
        match *self {
            Move::Insert { point } => solution.push(problem[point].clone()),
            Move::Eliminate { facility } => {
                solution.facilities.remove(facility);
            }
            Move::Exchange { facility, point } => {
                solution.facilities[facility] = problem[point].clone();
            }
        }
    }
}

/// Best move of a neighborhood with the index repaired for it.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub mv: Move,
    pub cost: f64,
    pub index: DistanceIndex,
}

/// Result of a descent: a locally optimal solution with its index and cost.
#[derive(Debug, Clone)]
pub struct LocalOptimum {
    pub solution: Solution,
    pub index: DistanceIndex,
    pub cost: f64,
}

/// Manages the local search phase.
#[derive(Debug, Clone)]
pub struct LocalSearch {
    /// A new facility must cut the cost by more than this fraction
    pub insertion_penalty: f64,
    /// An elimination may raise the cost by up to this fraction and still be
    /// reported by the elimination neighborhood. The descent only applies
    /// strictly improving moves, and closing a facility never lowers the
    /// cost, so `run` never commits an elimination.
    pub elimination_boost: f64,
    pub strategy: DescentStrategy,
}

impl Default for LocalSearch {
    fn default() -> Self {
        LocalSearch::new(0.2, 0.05)
    }
}

impl LocalSearch {
    /// Create a new local search instance with the fixed neighborhood order.
    pub fn new(insertion_penalty: f64, elimination_boost: f64) -> Self {
        LocalSearch {
            insertion_penalty,
            elimination_boost,
            strategy: DescentStrategy::Fixed,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        LocalSearch {
            insertion_penalty: config.insertion_penalty,
            elimination_boost: config.elimination_boost,
            strategy: config.descent,
        }
    }

    pub fn with_strategy(mut self, strategy: DescentStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Run the descent from `solution` until no neighborhood strictly improves.
    pub fn run<R: Rng>(
        &self,
        solution: &Solution,
        problem: &Problem,
        rng: &mut R,
    ) -> LocalOptimum {
        let mut current = solution.clone();
        let mut index = DistanceIndex::default();
        let mut cost = current.evaluate_into(problem, &mut index);
        let initial_cost = cost;
        let mut moves = 0usize;

        'descent: loop {
            for neighborhood in self.strategy.order(rng) {
                let Some(candidate) = self.explore(neighborhood, &current, &index, cost, problem)
                else {
                    continue;
                };

                if improves(candidate.cost, cost) {
                    trace!(
                        "{:?}: {:?} {:.4} -> {:.4}",
                        neighborhood,
                        candidate.mv,
                        cost,
                        candidate.cost
                    );
                    candidate.mv.apply(&mut current, problem);
                    index = candidate.index;
                    cost = candidate.cost;
                    moves += 1;
                    continue 'descent;
                }
            }
            break;
        }

        debug!(
            "local search: {} moves, cost {:.4} -> {:.4}, {} facilities",
            moves,
            initial_cost,
            cost,
            current.len()
        );

        LocalOptimum {
            solution: current,
            index,
            cost,
        }
    }

    /// Explore one neighborhood around `solution`.
    ///
    /// `index` and `cost` must describe `solution`; they are never modified.
    pub fn explore(
        &self,
        neighborhood: Neighborhood,
        solution: &Solution,
        index: &DistanceIndex,
        cost: f64,
        problem: &Problem,
    ) -> Option<Candidate> {
        match neighborhood {
            Neighborhood::Exchange => self.exchange_neighborhood(solution, index, cost, problem),
            Neighborhood::Insertion => self.insertion_neighborhood(solution, index, cost, problem),
            Neighborhood::Elimination => {
                self.elimination_neighborhood(solution, index, cost, problem)
            }
        }
    }
}

/// Record `mv` as the best candidate when it beats the current one.
///
/// The repaired `scratch` index is swapped into the candidate so the buffer
/// is reused for the next evaluation.
pub(crate) fn keep_if_better(
    best: &mut Option<Candidate>,
    mv: Move,
    cost: f64,
    scratch: &mut DistanceIndex,
) {
    if let Some(candidate) = best.as_mut() {
        if cost < candidate.cost {
            candidate.mv = mv;
            candidate.cost = cost;
            mem::swap(&mut candidate.index, scratch);
        }
        return;
    }

    *best = Some(Candidate {
        mv,
        cost,
        index: mem::take(scratch),
    });
}
