#![cfg(feature = "dev")]

use approx::assert_relative_eq;
use rand::prelude::*;

use llcf_rs::internals::algorithms::resampling::{
    fraction_equal_one, trimmed_indicator_mean, Replicate,
};

// ============================================================================
// Replicate Construction
// ============================================================================

#[test]
fn test_from_indices_collapses_repeats() {
    let replicate = Replicate::from_indices(&[0, 0, 2], 3);

    assert_eq!(replicate.unique(), &[0, 2]);
    assert_eq!(replicate.counts(), &[2, 1]);
    assert_eq!(replicate.distinct(), 2);
    assert_eq!(replicate.draws(), 3);
}

#[test]
fn test_draw_preserves_sample_size() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..20 {
        let replicate = Replicate::draw(25, &mut rng);
        assert_eq!(replicate.draws(), 25);
        assert!(replicate.distinct() >= 1 && replicate.distinct() <= 25);
        assert!(replicate.unique().windows(2).all(|w| w[0] < w[1]));
        assert!(replicate.unique().iter().all(|&i| i < 25));
    }
}

#[test]
fn test_draw_is_reproducible() {
    let a = Replicate::draw(40, &mut StdRng::seed_from_u64(3));
    let b = Replicate::draw(40, &mut StdRng::seed_from_u64(3));
    assert_eq!(a, b);
}

#[test]
fn test_expand_repeats_by_count() {
    let replicate = Replicate::from_indices(&[4, 1, 4, 4], 5);
    let expanded = replicate.expand(&['a', 'b']);
    assert_eq!(expanded, vec!['a', 'b', 'b', 'b']);
}

// ============================================================================
// Indicator Statistics
// ============================================================================

#[test]
fn test_fraction_equal_one() {
    assert_relative_eq!(fraction_equal_one(&[1.0, 0.5, 1.0, f64::NAN]), 0.5);
    assert_relative_eq!(fraction_equal_one::<f64>(&[]), 0.0);
    assert_relative_eq!(fraction_equal_one(&[1.0, 1.0]), 1.0);
}

#[test]
fn test_indicator_mean_weights_by_multiplicity() {
    // Row 0 drawn three times with zeta 1, row 1 once with zeta 0.5
    let replicate = Replicate::from_indices(&[0, 0, 0, 1], 2);
    let mean = trimmed_indicator_mean(&replicate, &[1.0, 0.5], 0.0);
    assert_relative_eq!(mean, 0.75);
}

#[test]
fn test_indicator_mean_treats_nan_as_zero() {
    let replicate = Replicate::from_indices(&[0, 1], 2);
    let mean = trimmed_indicator_mean(&replicate, &[1.0, f64::NAN], 0.0);
    assert_relative_eq!(mean, 0.5);
}

#[test]
fn test_indicator_mean_trims_both_tails() {
    // Ten draws, indicators [0, 1 x 9]; gamma 0.2 cuts one from each tail
    let replicate = Replicate::from_indices(&[0, 1, 1, 1, 1, 1, 1, 1, 1, 1], 2);
    let mean = trimmed_indicator_mean(&replicate, &[0.25, 1.0], 0.2);
    assert_relative_eq!(mean, 1.0);

    let untrimmed = trimmed_indicator_mean(&replicate, &[0.25, 1.0], 0.0);
    assert_relative_eq!(untrimmed, 0.9);
}
