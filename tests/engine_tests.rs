#![cfg(feature = "dev")]

use approx::assert_relative_eq;
use rand::prelude::*;

use llcf_rs::internals::engine::executor::{
    LlcfConfig, LlcfExecutor, NeighborSearch, NeighborhoodSize,
};
use llcf_rs::internals::engine::validator::Validator;
use llcf_rs::internals::math::distance::DistanceMetric;
use llcf_rs::internals::primitives::errors::LlcfError;

// ============================================================================
// Validator
// ============================================================================

#[test]
fn test_validate_inputs_returns_row_count() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let y = [1.0, 2.0, 3.0];
    assert_eq!(Validator::validate_inputs(&x, 2, &y, 1), Ok(3));
}

#[test]
fn test_validate_inputs_check_order() {
    // Emptiness is reported before shape problems
    assert_eq!(
        Validator::validate_inputs::<f64>(&[], 3, &[1.0], 2),
        Err(LlcfError::EmptyInput)
    );

    // Shape is reported before non-finite values
    assert_eq!(
        Validator::validate_inputs(&[f64::NAN, 1.0, 2.0], 2, &[1.0], 1),
        Err(LlcfError::InvalidDimensions {
            which: "x",
            dimensions: 2,
            len: 3
        })
    );

    assert!(matches!(
        Validator::validate_inputs(&[1.0, 2.0], 1, &[1.0, f64::INFINITY], 1),
        Err(LlcfError::InvalidNumericValue(msg)) if msg.starts_with("y[1]")
    ));
}

#[test]
fn test_validate_zero_dimensions() {
    assert_eq!(
        Validator::validate_dimensions("y", 0, 4),
        Err(LlcfError::InvalidDimensions {
            which: "y",
            dimensions: 0,
            len: 4
        })
    );
}

#[test]
fn test_validate_parameter_ranges() {
    assert!(Validator::validate_neighborhood_size(1, 1).is_ok());
    assert!(Validator::validate_neighborhood_size(0, 5).is_err());
    assert!(Validator::validate_neighborhood_size(6, 5).is_err());

    assert!(Validator::validate_alpha(0.05).is_ok());
    assert!(Validator::validate_alpha(f64::NAN).is_err());

    assert!(Validator::validate_gamma(0.0).is_ok());
    assert!(Validator::validate_gamma(0.999).is_ok());
    assert!(Validator::validate_gamma(1.0).is_err());

    assert!(Validator::validate_iterations(1).is_ok());
    assert!(Validator::validate_iterations(1_000_000).is_ok());
    assert!(Validator::validate_iterations(0).is_err());

    assert!(Validator::validate_tolerance(0.0).is_ok());
    assert!(Validator::validate_tolerance(f64::NAN).is_err());

    assert!(Validator::validate_distance_metric(&DistanceMetric::Minkowski(1.0)).is_ok());
    assert!(Validator::validate_distance_metric(&DistanceMetric::Minkowski(f64::INFINITY)).is_err());
    assert!(Validator::validate_distance_metric::<f64>(&DistanceMetric::Chebyshev).is_ok());
}

#[test]
fn test_validate_no_duplicates() {
    assert!(Validator::validate_no_duplicates(None).is_ok());
    assert_eq!(
        Validator::validate_no_duplicates(Some("alpha")),
        Err(LlcfError::DuplicateParameter { parameter: "alpha" })
    );
}

// ============================================================================
// Neighborhood Size
// ============================================================================

#[test]
fn test_neighborhood_size_resolution() {
    assert_eq!(NeighborhoodSize::Auto.resolve(1), 1);
    assert_eq!(NeighborhoodSize::Auto.resolve(16), 4);
    assert_eq!(NeighborhoodSize::Auto.resolve(17), 5);
    assert_eq!(NeighborhoodSize::Fixed(7).resolve(3), 7);
    assert_eq!(NeighborhoodSize::Fixed(7).resolve_capped(3), 3);
    assert_eq!(NeighborhoodSize::Auto.resolve_capped(9), 3);
    assert_eq!(NeighborhoodSize::from(4), NeighborhoodSize::Fixed(4));
}

// ============================================================================
// Executor
// ============================================================================

#[test]
fn test_neighbor_table_rows_sorted_and_include_self() {
    let mut rng = StdRng::seed_from_u64(4);
    let joint: Vec<f64> = (0..60).map(|_| rng.random()).collect();

    for search in [NeighborSearch::KdTree, NeighborSearch::BruteForce] {
        let table = LlcfExecutor::neighbor_table(
            &joint,
            2,
            4,
            &DistanceMetric::Euclidean,
            search,
            false,
        );

        assert_eq!(table.len(), 30);
        for i in 0..table.len() {
            let row = table.neighbors(i);
            assert!(row.contains(&i));
            assert!(row.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[test]
fn test_run_zetas_identity() {
    let x: Vec<f64> = (0..12).map(|i| i as f64).collect();
    let config = LlcfConfig {
        k: NeighborhoodSize::Fixed(3),
        ..LlcfConfig::default()
    };

    let output = LlcfExecutor::run_zetas(&x, &x, &config);
    assert_eq!(output.k, 3);
    assert!(output.zeta_x.iter().all(|&z| z == 1.0));
    assert!(output.zeta_y.iter().all(|&z| z == 1.0));
}

#[test]
fn test_run_bootstrap_produces_one_deviation_per_iteration() {
    let x: Vec<f64> = (0..25).map(|i| (i as f64 * 0.4).sin()).collect();
    let y: Vec<f64> = x.iter().map(|v| v * v).collect();
    let config = LlcfConfig {
        iterations: 17,
        ..LlcfConfig::default()
    };

    let mut rng = StdRng::seed_from_u64(8);
    let output = LlcfExecutor::run_bootstrap(&x, &y, &config, &mut rng);

    assert_eq!(output.deviations_x.len(), 17);
    assert_eq!(output.deviations_y.len(), 17);
    assert_eq!(output.zetas.zeta_x.len(), 25);
    assert!(output.interval_x.lower <= output.interval_x.upper);
    assert_relative_eq!(
        output.probability_x,
        output.zetas.zeta_x.iter().filter(|&&z| z == 1.0).count() as f64 / 25.0
    );
}
