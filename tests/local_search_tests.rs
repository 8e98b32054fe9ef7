//! Unit tests for the local search neighborhoods and the descent.

use pmedian::distance_index::DistanceIndex;
use pmedian::local_search::{DescentStrategy, LocalSearch, Move, Neighborhood};
use pmedian::point::Point;
use pmedian::problem::Problem;
use pmedian::solution::Solution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Two "plus" shaped clusters of five points around (0, 0) and (10, 10).
fn create_test_problem() -> Problem {
    let coords = [
        (0.0, 0.0),
        (1.0, 0.0),
        (-1.0, 0.0),
        (0.0, 1.0),
        (0.0, -1.0),
        (10.0, 10.0),
        (11.0, 10.0),
        (9.0, 10.0),
        (10.0, 11.0),
        (10.0, 9.0),
    ];
    let points = coords
        .iter()
        .map(|&(x, y)| Point::new(vec![x, y]))
        .collect();
    Problem::new("plus".to_string(), points).unwrap()
}

/// Points 0, 1, 2, 10, 11, 12 on a line.
fn create_line_problem() -> Problem {
    let points = [0.0, 1.0, 2.0, 10.0, 11.0, 12.0]
        .iter()
        .map(|&x| Point::new(vec![x]))
        .collect();
    Problem::new("line".to_string(), points).unwrap()
}

fn create_random_problem(seed: u64, n: usize) -> Problem {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points = (0..n)
        .map(|_| Point::new(vec![rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)]))
        .collect();
    Problem::new(format!("random_{}", seed), points).unwrap()
}

fn solution_of(problem: &Problem, indices: &[usize]) -> Solution {
    Solution::from_facilities(
        problem.dimensions(),
        indices.iter().map(|&i| problem[i].clone()).collect(),
    )
}

fn indexed(problem: &Problem, solution: &Solution) -> (DistanceIndex, f64) {
    let mut index = DistanceIndex::default();
    let cost = solution.evaluate_into(problem, &mut index);
    (index, cost)
}

#[test]
fn test_exchange_neighborhood_picks_best_swap() {
    let problem = create_test_problem();
    let solution = solution_of(&problem, &[1, 8]);
    let (index, cost) = indexed(&problem, &solution);
    let snapshot = index.clone();

    let local_search = LocalSearch::default();
    let candidate = local_search
        .exchange_neighborhood(&solution, &index, cost, &problem)
        .expect("an improving swap exists");

    // Moving either facility to its cluster center is equally good; the
    // first one found wins because ties never replace the incumbent.
    assert_eq!(candidate.mv, Move::Exchange { facility: 0, point: 0 });
    let expected = 4.0 + 3.0 + 2.0 * 2f64.sqrt();
    assert!((candidate.cost - expected).abs() < 1e-9);

    // The live index is never touched by candidate evaluation
    assert_eq!(index, snapshot);
}

#[test]
fn test_exchange_neighborhood_at_optimum() {
    let problem = create_test_problem();
    let solution = solution_of(&problem, &[0, 5]);
    let (index, cost) = indexed(&problem, &solution);

    let local_search = LocalSearch::default();
    assert!(local_search
        .exchange_neighborhood(&solution, &index, cost, &problem)
        .is_none());
}

#[test]
fn test_insertion_neighborhood_accepts_large_cut() {
    let problem = create_line_problem();
    let solution = solution_of(&problem, &[1]);
    let (index, cost) = indexed(&problem, &solution);
    assert!((cost - 32.0).abs() < 1e-9);

    let local_search = LocalSearch::default();
    let candidate = local_search
        .insertion_neighborhood(&solution, &index, cost, &problem)
        .expect("opening a facility in the far cluster pays off");

    assert_eq!(candidate.mv, Move::Insert { point: 4 });
    assert!((candidate.cost - 4.0).abs() < 1e-9);

    let mut modified = solution.clone();
    candidate.mv.apply(&mut modified, &problem);
    assert_eq!(modified.len(), 2);
    assert!(candidate
        .index
        .is_consistent_with(&problem, &modified.facilities, 1e-9));
}

#[test]
fn test_insertion_neighborhood_respects_penalty() {
    let problem = create_line_problem();
    let solution = solution_of(&problem, &[1, 4]);
    let (index, cost) = indexed(&problem, &solution);
    assert!((cost - 4.0).abs() < 1e-9);

    // The best insertion brings the cost to 3: a 25% cut
    let lenient = LocalSearch::new(0.2, 0.05);
    let candidate = lenient
        .insertion_neighborhood(&solution, &index, cost, &problem)
        .unwrap();
    assert!((candidate.cost - 3.0).abs() < 1e-9);

    let strict = LocalSearch::new(0.5, 0.05);
    assert!(strict
        .insertion_neighborhood(&solution, &index, cost, &problem)
        .is_none());
}

#[test]
fn test_elimination_neighborhood_drops_duplicate() {
    let problem = create_line_problem();
    let solution = solution_of(&problem, &[1, 4, 1]);
    let (index, cost) = indexed(&problem, &solution);
    assert!((cost - 4.0).abs() < 1e-9);

    let local_search = LocalSearch::default();
    let candidate = local_search
        .elimination_neighborhood(&solution, &index, cost, &problem)
        .expect("removing a duplicate is free");

    assert_eq!(candidate.mv, Move::Eliminate { facility: 0 });
    assert!((candidate.cost - 4.0).abs() < 1e-9);

    let mut modified = solution.clone();
    candidate.mv.apply(&mut modified, &problem);
    assert_eq!(modified.len(), 2);
    assert!(candidate
        .index
        .is_consistent_with(&problem, &modified.facilities, 1e-9));
}

#[test]
fn test_elimination_neighborhood_rejects_expensive_removal() {
    let problem = create_test_problem();
    let solution = solution_of(&problem, &[0, 5]);
    let (index, cost) = indexed(&problem, &solution);

    let local_search = LocalSearch::default();
    assert!(local_search
        .elimination_neighborhood(&solution, &index, cost, &problem)
        .is_none());

    // A single facility can never be removed
    let single = solution_of(&problem, &[0]);
    let (index, cost) = indexed(&problem, &single);
    assert!(local_search
        .elimination_neighborhood(&single, &index, cost, &problem)
        .is_none());
}

#[test]
fn test_explore_dispatches() {
    let problem = create_test_problem();
    let solution = solution_of(&problem, &[1, 8]);
    let (index, cost) = indexed(&problem, &solution);
    let local_search = LocalSearch::default();

    let candidate = local_search
        .explore(Neighborhood::Exchange, &solution, &index, cost, &problem)
        .unwrap();
    assert!(matches!(candidate.mv, Move::Exchange { .. }));
    assert!(local_search
        .explore(Neighborhood::Elimination, &solution, &index, cost, &problem)
        .is_none());
}

#[test]
fn test_descent_reaches_cluster_centers() {
    let problem = create_test_problem();
    let perturbed = solution_of(&problem, &[1, 8]);
    let reference = solution_of(&problem, &[0, 5]);
    let reference_cost = reference.evaluate(&problem);
    assert!(perturbed.evaluate(&problem) > reference_cost);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let local_search = LocalSearch::default();

    // The reference is itself a local optimum
    let fixed = local_search.run(&reference, &problem, &mut rng);
    assert_eq!(fixed.solution, reference);

    let optimum = local_search.run(&perturbed, &problem, &mut rng);
    assert!(optimum.cost <= reference_cost + 1e-9);
    assert_eq!(optimum.solution.len(), 2);
    assert!((optimum.cost - optimum.solution.evaluate(&problem)).abs() < 1e-9);
    assert!(optimum
        .index
        .is_consistent_with(&problem, &optimum.solution.facilities, 1e-9));
}

#[test]
fn test_descent_never_worsens() {
    for seed in 0..4 {
        let problem = create_random_problem(seed, 20);
        let solution = solution_of(&problem, &[0, 1, 2]);
        let initial = solution.evaluate(&problem);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let optimum = LocalSearch::default().run(&solution, &problem, &mut rng);

        assert!(optimum.cost <= initial);
        assert!((optimum.cost - optimum.solution.evaluate(&problem)).abs() < 1e-6);
    }
}

#[test]
fn test_descent_is_idempotent() {
    for strategy in [DescentStrategy::Fixed, DescentStrategy::Randomized] {
        for seed in 0..3 {
            let problem = create_random_problem(seed + 10, 20);
            let solution = solution_of(&problem, &[0, 5, 10]);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let local_search = LocalSearch::default().with_strategy(strategy);

            let first = local_search.run(&solution, &problem, &mut rng);
            let second = local_search.run(&first.solution, &problem, &mut rng);

            assert_eq!(second.solution, first.solution);
            assert!((second.cost - first.cost).abs() < 1e-9);
        }
    }
}

#[test]
fn test_randomized_order_is_a_permutation() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..10 {
        let order = DescentStrategy::Randomized.order(&mut rng);
        assert!(order.contains(&Neighborhood::Exchange));
        assert!(order.contains(&Neighborhood::Insertion));
        assert!(order.contains(&Neighborhood::Elimination));
    }

    assert_eq!(
        DescentStrategy::Fixed.order(&mut rng),
        [
            Neighborhood::Exchange,
            Neighborhood::Insertion,
            Neighborhood::Elimination
        ]
    );
}

#[test]
fn test_descent_never_commits_elimination() {
    let problem = create_test_problem();
    // Centers with a duplicate: closing the duplicate is free but not an improvement
    let solution = solution_of(&problem, &[0, 5, 0]);
    assert!((solution.evaluate(&problem) - 8.0).abs() < 1e-9);

    for boost in [0.05, 0.99] {
        for strategy in [DescentStrategy::Fixed, DescentStrategy::Randomized] {
            let local_search = LocalSearch::new(0.2, boost).with_strategy(strategy);
            let mut rng = ChaCha8Rng::seed_from_u64(5);

            let optimum = local_search.run(&solution, &problem, &mut rng);

            // The duplicate slot is exchanged onto an arm point instead
            assert_eq!(optimum.solution.len(), 3);
            assert!((optimum.cost - 7.0).abs() < 1e-9);
        }
    }
}
