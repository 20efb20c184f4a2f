//! Verification Suite Tests
//!
//! Passivity, causality and reciprocity checks on synthetic networks with
//! known answers.

use approx::assert_relative_eq;
use ndarray::Array3;
use num_complex::Complex64;
use sparam_core::error::AnalysisError;
use sparam_core::network::Network;
use sparam_core::verification::{
    check_causality, check_passivity, check_reciprocity, power_eigenvalues, verify, CheckDetails,
    CheckKind,
};
use sparam_core::AnalysisConfig;

fn freqs(n: usize) -> Vec<f64> {
    (1..=n).map(|k| k as f64 * 1e9).collect()
}

/// Matched 2-port attenuator with the given voltage gain per frequency
fn attenuator(gains: &[f64]) -> Network {
    let n = gains.len();
    let mut s = Array3::<Complex64>::zeros((n, 2, 2));
    for (k, &g) in gains.iter().enumerate() {
        s[[k, 0, 1]] = Complex64::new(g, 0.0);
        s[[k, 1, 0]] = Complex64::new(g, 0.0);
    }
    Network::from_hz(freqs(n), s, 50.0).unwrap()
}

// ============================================================================
// Passivity
// ============================================================================

#[test]
fn test_matched_attenuator_is_passive() {
    let ntwk = attenuator(&[0.5, 0.5, 0.5, 0.5]);
    let result = check_passivity(&ntwk, None).unwrap();

    assert_eq!(result.kind, CheckKind::Passivity);
    assert!(result.passed);
    assert_eq!(result.first_violation_hz, None);

    let eigs = power_eigenvalues(&ntwk).unwrap();
    for v in eigs.iter() {
        assert!(*v <= 1.0 + 1e-9);
        assert_relative_eq!(*v, 0.25, epsilon = 1e-12);
    }
}

#[test]
fn test_amplifier_fails_at_first_gain_point() {
    // Gain above unity starts at the third frequency
    let ntwk = attenuator(&[0.5, 0.9, 1.1, 1.2, 0.5]);
    let result = check_passivity(&ntwk, None).unwrap();

    assert!(!result.passed);
    assert_eq!(result.first_violation_hz, Some(3e9));
    match result.details {
        CheckDetails::Passivity(d) => {
            assert_eq!(d.violation_index, Some(2));
            assert_eq!(d.scanned, 3);
            assert_relative_eq!(d.max_eigenvalue, 1.21, epsilon = 1e-12);
        }
        other => panic!("unexpected details {other:?}"),
    }
}

#[test]
fn test_passivity_tolerance_is_configurable() {
    let ntwk = attenuator(&[1.0005]);
    assert!(!check_passivity(&ntwk, None).unwrap().passed);
    assert!(check_passivity(&ntwk, Some(1e-2)).unwrap().passed);
}

// ============================================================================
// Reciprocity
// ============================================================================

#[test]
fn test_symmetric_network_is_reciprocal() {
    let mut s = Array3::<Complex64>::zeros((2, 3, 3));
    for k in 0..2 {
        for i in 0..3 {
            for j in 0..3 {
                let v = Complex64::new(0.1 * (i + j) as f64, 0.05 * (i * j) as f64);
                s[[k, i, j]] = v;
            }
        }
    }
    let ntwk = Network::from_hz(freqs(2), s, 50.0).unwrap();
    let result = check_reciprocity(&ntwk, None).unwrap();

    assert!(result.passed);
    assert_eq!(result.first_violation_hz, None);
    match result.details {
        CheckDetails::Reciprocity(d) => {
            assert_eq!(d.checked, 2);
            assert!(d.violations.is_empty());
        }
        other => panic!("unexpected details {other:?}"),
    }
}

#[test]
fn test_asymmetric_network_reports_exact_deviation() {
    let mut s = Array3::<Complex64>::zeros((3, 2, 2));
    for k in 0..3 {
        s[[k, 0, 1]] = Complex64::new(0.5, 0.0);
        s[[k, 1, 0]] = Complex64::new(0.5, 0.0);
    }
    // Isolator-like behaviour at 2 GHz and 3 GHz
    s[[1, 1, 0]] = Complex64::new(0.9, 0.3);
    s[[2, 0, 1]] = Complex64::new(0.0, 0.1);
    let ntwk = Network::from_hz(freqs(3), s.clone(), 50.0).unwrap();

    let result = check_reciprocity(&ntwk, None).unwrap();
    assert!(!result.passed);
    assert_eq!(result.first_violation_hz, Some(2e9));

    let CheckDetails::Reciprocity(d) = result.details else {
        panic!("unexpected details");
    };
    assert_eq!(d.violations.len(), 2);
    for v in &d.violations {
        let k = v.index;
        for i in 0..2 {
            for j in 0..2 {
                let expected = (s[[k, i, j]] - s[[k, j, i]]).norm();
                assert_eq!(v.deviation[[i, j]], expected);
            }
        }
    }
    assert_relative_eq!(
        d.violations[0].deviation[[1, 0]],
        (0.4_f64 * 0.4 + 0.3 * 0.3).sqrt(),
        epsilon = 1e-15
    );
}

// ============================================================================
// Causality
// ============================================================================

#[test]
fn test_causality_reports_no_frequency() {
    let ntwk = attenuator(&[0.5, 0.5, 0.5]);
    let result = check_causality(&ntwk).unwrap();
    assert_eq!(result.kind, CheckKind::Causality);
    assert!(result.passed);
    assert_eq!(result.first_violation_hz, None);
}

// ============================================================================
// Degenerate inputs
// ============================================================================

#[test]
fn test_empty_network_rejected_by_every_check() {
    let s = Array3::<Complex64>::zeros((0, 2, 2));
    let ntwk = Network::from_hz(vec![], s, 50.0).unwrap();

    assert_eq!(check_passivity(&ntwk, None), Err(AnalysisError::EmptyNetwork));
    assert_eq!(check_causality(&ntwk), Err(AnalysisError::EmptyNetwork));
    assert_eq!(check_reciprocity(&ntwk, None), Err(AnalysisError::EmptyNetwork));
    assert_eq!(
        verify(&ntwk, &AnalysisConfig::default()),
        Err(AnalysisError::EmptyNetwork)
    );
}

#[test]
fn test_single_point_network_is_checked() {
    let ntwk = attenuator(&[0.7]);
    let report = verify(&ntwk, &AnalysisConfig::default()).unwrap();
    assert!(report.all_passed());
}

// ============================================================================
// Report
// ============================================================================

#[test]
fn test_report_text() {
    let ntwk = attenuator(&[0.5, 1.5]).with_name("amp.s2p");
    let report = verify(&ntwk, &AnalysisConfig::default()).unwrap();
    assert!(!report.all_passed());

    let text = report.to_string();
    assert!(text.contains("amp.s2p"));
    assert!(text.contains("passivity: FAIL"));
    assert!(text.contains("2.000 GHz"));
    assert!(text.contains("reciprocity: PASS"));
    assert!(text.contains("causality (heuristic)"));
    assert!(text.trim_end().ends_with("overall: FAIL"));
}
