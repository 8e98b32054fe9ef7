//! Unit tests for points and problem construction/loading.

use pmedian::point::{euclidean_distance, Point, COORDINATE_TOLERANCE};
use pmedian::problem::Problem;
use pmedian::Error;
use std::fs;

fn p(coords: &[f64]) -> Point {
    Point::new(coords.to_vec())
}

#[test]
fn test_point_distance() {
    let a = p(&[0.0, 0.0]);
    let b = p(&[3.0, 4.0]);

    assert!((euclidean_distance(&a, &b) - 5.0).abs() < 1e-12);
    assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    assert_eq!(a.squared_distance(&b), 25.0);
    assert_eq!(a.distance(&a), 0.0);
}

#[test]
fn test_point_approx_eq() {
    let a = p(&[1.0, 2.0]);

    assert!(a.approx_eq(&p(&[1.0005, 1.9995]), COORDINATE_TOLERANCE));
    assert!(!a.approx_eq(&p(&[1.01, 2.0]), COORDINATE_TOLERANCE));
    // Different dimensionality is never equal
    assert!(!a.approx_eq(&p(&[1.0]), COORDINATE_TOLERANCE));
}

#[test]
fn test_problem_new() {
    let problem = Problem::new(
        "tiny".to_string(),
        vec![p(&[0.0, 0.0]), p(&[1.0, 1.0]), p(&[2.0, 2.0])],
    )
    .unwrap();

    assert_eq!(problem.size(), 3);
    assert_eq!(problem.dimensions(), 2);
    assert_eq!(problem[2][1], 2.0);
    assert_eq!(problem.name, "tiny");
}

#[test]
fn test_problem_rejects_empty() {
    let result = Problem::new("empty".to_string(), vec![]);
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn test_problem_rejects_zero_dimensions() {
    let result = Problem::new("flat".to_string(), vec![p(&[]), p(&[])]);
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn test_problem_rejects_mixed_dimensions() {
    let result = Problem::new("mixed".to_string(), vec![p(&[0.0, 0.0]), p(&[1.0])]);
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn test_problem_parse() {
    let problem = Problem::parse("parsed".to_string(), "4 2\n0 0\n1 0\n0 1\n1.5 -2.5\n").unwrap();

    assert_eq!(problem.size(), 4);
    assert_eq!(problem.dimensions(), 2);
    assert_eq!(problem[3].coords(), &[1.5, -2.5]);
}

#[test]
fn test_problem_parse_errors() {
    // Bad header
    let result = Problem::parse("bad".to_string(), "x 2\n0 0\n");
    assert!(matches!(result, Err(Error::InvalidInstance(_))));

    // Bad coordinate
    let result = Problem::parse("bad".to_string(), "1 2\n0 zero\n");
    assert!(matches!(result, Err(Error::InvalidInstance(_))));

    // Too few coordinates
    let result = Problem::parse("bad".to_string(), "3 2\n0 0\n1 1\n");
    assert!(matches!(result, Err(Error::InvalidInstance(_))));

    // Missing dimension count
    let result = Problem::parse("bad".to_string(), "3");
    assert!(matches!(result, Err(Error::InvalidInstance(_))));
}

#[test]
fn test_problem_parse_rejects_overflowing_header() {
    let result = Problem::parse("huge".to_string(), "18446744073709551615 2 1.0 2.0");
    assert!(matches!(result, Err(Error::InvalidInstance(_))));
}

#[test]
fn test_problem_parse_rejects_empty_header() {
    let result = Problem::parse("empty".to_string(), "0 2");
    assert!(matches!(result, Err(Error::InvalidInstance(_))));

    let result = Problem::parse("flat".to_string(), "2 0");
    assert!(matches!(result, Err(Error::InvalidInstance(_))));
}

#[test]
fn test_problem_from_file() {
    let dir = std::env::temp_dir().join("pmedian_problem_from_file");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("line_instance.txt");
    fs::write(&path, "3 1\n0\n5\n10\n").unwrap();

    let problem = Problem::from_file(&path).unwrap();

    assert_eq!(problem.name, "line_instance");
    assert_eq!(problem.size(), 3);
    assert_eq!(problem.dimensions(), 1);
    assert_eq!(problem[1][0], 5.0);

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_problem_from_missing_file() {
    let result = Problem::from_file("/definitely/not/here.txt");
    assert!(matches!(result, Err(Error::Io(_))));
}
