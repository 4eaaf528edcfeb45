use approx::{assert_abs_diff_eq, assert_relative_eq};
use llcf_rs::prelude::*;
use rand::prelude::*;
use rand_distr::{Normal, Uniform};

// ============================================================================
// Helpers
// ============================================================================

fn uniform_matrix(rows: usize, cols: usize, rng: &mut StdRng) -> Vec<f64> {
    let dist = Uniform::new(0.0, 1.0).unwrap();
    (0..rows * cols).map(|_| dist.sample(&mut *rng)).collect()
}

fn noisy_sine(n: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.05).unwrap();
    let x: Vec<f64> = (0..n).map(|i| i as f64 * 3.0 / n as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| v.sin() + noise.sample(&mut rng)).collect();
    (x, y)
}

// ============================================================================
// End-to-End Scenarios
// ============================================================================

#[test]
fn test_identity_interval_centered_on_one() {
    let x: Vec<f64> = (1..=20).map(|i| i as f64).collect();
    let y = x.clone();

    let result = Llcf::new()
        .k(5)
        .iterations(50)
        .seed(7)
        .adapter(Bootstrap)
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap();

    assert_relative_eq!(result.probability_x, 1.0);
    assert_relative_eq!(result.probability_y, 1.0);
    assert_abs_diff_eq!(result.interval_x.midpoint(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.interval_y.midpoint(), 1.0, epsilon = 1e-12);
    assert!(result.accepts_x_to_y());
    assert!(result.accepts_y_to_x());
}

#[test]
fn test_zero_variance_bootstrap_gives_zero_width() {
    let x: Vec<f64> = (0..30).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| 3.0 * v - 2.0).collect();

    let result = Llcf::new()
        .iterations(40)
        .seed(3)
        .adapter(Bootstrap)
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap();

    assert_eq!(result.deviations_x.len(), 40);
    assert!(result.deviations_x.iter().all(|&d| d == 0.0));
    assert_abs_diff_eq!(result.interval_x.width(), 0.0);
    assert_abs_diff_eq!(result.interval_y.width(), 0.0);
}

#[test]
fn test_independent_noise_rejects_both_directions() {
    let mut rng = StdRng::seed_from_u64(2024);
    let x = uniform_matrix(200, 2, &mut rng);
    let y = uniform_matrix(200, 2, &mut rng);

    let result = Llcf::new()
        .x_dimensions(2)
        .y_dimensions(2)
        .iterations(30)
        .seed(99)
        .adapter(Bootstrap)
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap();

    let ((_, high_x), (_, high_y)) = result.intervals();
    assert!(high_x < 1.0, "upper bound for x was {high_x}");
    assert!(high_y < 1.0, "upper bound for y was {high_y}");
    assert!(!result.accepts_x_to_y());
    assert!(!result.accepts_y_to_x());
}

// ============================================================================
// Statistical Properties
// ============================================================================

#[test]
fn test_observed_probability_matches_zeta_vector() {
    let (x, y) = noisy_sine(60, 5);

    let result = Llcf::new()
        .iterations(20)
        .seed(1)
        .adapter(Bootstrap)
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap();

    let ones_x = result.zeta_x.iter().filter(|&&z| z == 1.0).count();
    let ones_y = result.zeta_y.iter().filter(|&&z| z == 1.0).count();

    assert_relative_eq!(result.probability_x, ones_x as f64 / 60.0);
    assert_relative_eq!(result.probability_y, ones_y as f64 / 60.0);
}

#[test]
fn test_lower_bound_not_above_upper_bound() {
    for seed in 0..5 {
        let (x, y) = noisy_sine(40, 100 + seed);

        let result = Llcf::new()
            .iterations(25)
            .alpha(0.1)
            .seed(seed)
            .adapter(Bootstrap)
            .build()
            .unwrap()
            .fit(&x, &y)
            .unwrap();

        assert!(result.interval_x.lower <= result.interval_x.upper);
        assert!(result.interval_y.lower <= result.interval_y.upper);
    }
}

#[test]
fn test_gamma_trimming_keeps_interval_ordered() {
    let (x, y) = noisy_sine(50, 8);

    let result = Llcf::new()
        .iterations(20)
        .gamma(0.2)
        .seed(4)
        .adapter(Bootstrap)
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap();

    assert_relative_eq!(result.gamma, 0.2);
    assert!(result.interval_x.lower <= result.interval_x.upper);
    assert!(result.deviations_x.iter().all(|d| d.is_finite()));
}

// ============================================================================
// Reproducibility
// ============================================================================

#[test]
fn test_seeded_runs_are_deterministic() {
    let (x, y) = noisy_sine(45, 12);

    let test = Llcf::new()
        .iterations(15)
        .seed(77)
        .adapter(Bootstrap)
        .build()
        .unwrap();

    let first = test.fit(&x, &y).unwrap();
    let second = test.fit(&x, &y).unwrap();

    assert_eq!(first.intervals(), second.intervals());
    assert_eq!(first.deviations_x, second.deviations_x);
    assert_eq!(first.deviations_y, second.deviations_y);
}

#[test]
fn test_injected_rng_matches_seed() {
    let (x, y) = noisy_sine(45, 13);

    let seeded = Llcf::new()
        .iterations(15)
        .seed(5)
        .adapter(Bootstrap)
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap();

    let mut rng = StdRng::seed_from_u64(5);
    let injected = Llcf::new()
        .iterations(15)
        .adapter(Bootstrap)
        .build()
        .unwrap()
        .fit_with_rng(&x, &y, &mut rng)
        .unwrap();

    assert_eq!(seeded.intervals(), injected.intervals());
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(31);
    let x = uniform_matrix(80, 2, &mut rng);
    let y = uniform_matrix(80, 1, &mut rng);

    let run = |parallel: bool| {
        Llcf::new()
            .x_dimensions(2)
            .iterations(12)
            .seed(9)
            .parallel(parallel)
            .adapter(Bootstrap)
            .build()
            .unwrap()
            .fit(&x, &y)
            .unwrap()
    };

    let sequential = run(false);
    let parallel = run(true);

    assert_eq!(sequential.intervals(), parallel.intervals());
    assert_eq!(sequential.deviations_x, parallel.deviations_x);
    assert_eq!(sequential.deviations_y, parallel.deviations_y);
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_display_reports_both_directions() {
    let x: Vec<f64> = (1..=20).map(|i| i as f64).collect();
    let y = x.clone();

    let result = Llcf::new()
        .iterations(10)
        .seed(1)
        .adapter(Bootstrap)
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap();
    let text = format!("{result}");

    assert!(text.contains("Bootstrap iterations: 10"));
    assert!(text.contains("X -> Y"));
    assert!(text.contains("Y -> X"));
    assert!(text.contains("accept"));
}

// ============================================================================
// Configuration Errors
// ============================================================================

#[test]
fn test_invalid_parameters_rejected_at_build() {
    let build = |builder: Llcf<f64>| builder.adapter(Bootstrap).build().map(|_| ());

    assert_eq!(
        build(Llcf::new().alpha(0.0)).unwrap_err(),
        LlcfError::InvalidAlpha(0.0)
    );
    assert_eq!(
        build(Llcf::new().alpha(1.0)).unwrap_err(),
        LlcfError::InvalidAlpha(1.0)
    );
    assert_eq!(
        build(Llcf::new().gamma(1.0)).unwrap_err(),
        LlcfError::InvalidGamma(1.0)
    );
    assert_eq!(
        build(Llcf::new().gamma(-0.1)).unwrap_err(),
        LlcfError::InvalidGamma(-0.1)
    );
    assert_eq!(
        build(Llcf::new().iterations(0)).unwrap_err(),
        LlcfError::InvalidIterations(0)
    );
    assert_eq!(
        build(Llcf::new().distance_metric(Minkowski(0.5))).unwrap_err(),
        LlcfError::InvalidMinkowskiPower(0.5)
    );
    assert_eq!(
        build(Llcf::new().tolerance(f64::INFINITY)).unwrap_err(),
        LlcfError::InvalidTolerance(f64::INFINITY)
    );
}

#[test]
fn test_duplicate_parameter_rejected() {
    let err = Llcf::<f64>::new()
        .iterations(10)
        .iterations(20)
        .adapter(Bootstrap)
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        LlcfError::DuplicateParameter {
            parameter: "iterations"
        }
    );
}

#[test]
fn test_mismatched_rows_rejected_at_fit() {
    let test = Llcf::new().adapter(Bootstrap).build().unwrap();
    let err = test.fit(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();

    assert_eq!(
        err,
        LlcfError::MismatchedRows {
            x_rows: 3,
            y_rows: 2
        }
    );
}

#[test]
fn test_scaling_parses_from_str() {
    let scaling: ScalingMethod = "rank".parse().unwrap();
    assert_eq!(scaling, ScalingMethod::Rank);

    let err = "zscore".parse::<ScalingMethod>().unwrap_err();
    assert_eq!(err, LlcfError::UnknownScaling("zscore".to_string()));
}
