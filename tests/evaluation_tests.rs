#![cfg(feature = "dev")]

use approx::assert_relative_eq;

use llcf_rs::internals::evaluation::histogram::ZetaHistogram;
use llcf_rs::internals::evaluation::intervals::ConfidenceInterval;

// ============================================================================
// Confidence Intervals
// ============================================================================

#[test]
fn test_interval_from_deviations() {
    let mut deviations = [0.5, -0.25, 0.0, 0.25, -0.5];
    let ci = ConfidenceInterval::from_deviations(0.75, &mut deviations, 0.25);

    // Quantiles at 0.25 and 0.75 of five evenly spaced values
    assert_relative_eq!(ci.lower, 0.5);
    assert_relative_eq!(ci.upper, 1.0);
    assert!(ci.accepts_invertibility());
}

#[test]
fn test_interval_below_one_rejects() {
    let ci = ConfidenceInterval::new(0.4, 0.7);

    assert!(!ci.accepts_invertibility());
    assert!(ci.contains(0.4));
    assert!(ci.contains(0.7));
    assert!(!ci.contains(0.71));
    assert_relative_eq!(ci.width(), 0.3, epsilon = 1e-12);
    assert_relative_eq!(ci.midpoint(), 0.55, epsilon = 1e-12);
    assert_eq!(ci.bounds(), (0.4, 0.7));
}

#[test]
fn test_zero_deviations_collapse_interval() {
    let mut deviations = [0.0; 8];
    let ci = ConfidenceInterval::from_deviations(0.6, &mut deviations, 0.05);
    assert_relative_eq!(ci.width(), 0.0);
    assert_relative_eq!(ci.lower, 0.6);
}

#[test]
fn test_interval_display() {
    let ci = ConfidenceInterval::new(0.25, 1.0);
    assert_eq!(ci.to_string(), "[0.2500, 1.0000]");
}

// ============================================================================
// Histograms
// ============================================================================

#[test]
fn test_histogram_bins_and_edges() {
    let values = [0.0, 0.25, 0.5, 0.75, 1.0, f64::NAN];
    let hist = ZetaHistogram::from_values(&values, 4);

    assert_eq!(hist.bins(), 4);
    assert_eq!(hist.edges.len(), 5);
    assert_relative_eq!(hist.edges[0], 0.0);
    assert_relative_eq!(hist.edges[4], 1.0);
    assert_eq!(hist.counts, vec![1, 1, 1, 2]);
    assert_eq!(hist.undefined, 1);
    assert_eq!(hist.total(), 6);
}

#[test]
fn test_histogram_constant_values() {
    let hist = ZetaHistogram::from_values(&[1.0, 1.0, 1.0], 2);

    assert_relative_eq!(hist.edges[0], 0.5);
    assert_relative_eq!(hist.edges[2], 1.5);
    assert_eq!(hist.counts, vec![0, 3]);
}

#[test]
fn test_histogram_all_undefined() {
    let hist = ZetaHistogram::from_values(&[f64::NAN, f64::NAN], 10);

    assert!(hist.edges.is_empty());
    assert!(hist.counts.is_empty());
    assert_eq!(hist.undefined, 2);
    assert_eq!(hist.total(), 2);
}

#[test]
fn test_histogram_zero_bins_becomes_one() {
    let hist = ZetaHistogram::from_values(&[0.1, 0.9], 0);
    assert_eq!(hist.counts, vec![2]);
}
