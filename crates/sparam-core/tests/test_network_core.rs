//! Network Construction Tests

use ndarray::Array3;
use num_complex::Complex64;
use sparam_core::error::AnalysisError;
use sparam_core::frequency::{Frequency, FrequencyUnit};
use sparam_core::network::{Network, PortMode};

fn zeros(nfreq: usize, nports: usize) -> Array3<Complex64> {
    Array3::<Complex64>::zeros((nfreq, nports, nports))
}

#[test]
fn test_network_from_sweep() {
    let f: Vec<f64> = (1..=10).map(|k| k as f64 * 1e9).collect();
    let freq = Frequency::from_hz(f).with_unit(FrequencyUnit::GHz);
    let ntwk = Network::new(freq, zeros(10, 2), 50.0).unwrap();

    assert_eq!(ntwk.nports(), 2);
    assert_eq!(ntwk.nfreq(), 10);
    assert_eq!(ntwk.f()[0], 1e9);
    assert_eq!(ntwk.f()[9], 10e9);
    assert_eq!(ntwk.frequency().f_scaled()[9], 10.0);
    assert_eq!(ntwk.mode(), PortMode::SingleEnded);
    assert_eq!(ntwk.name(), None);
}

#[test]
fn test_any_port_count() {
    for nports in 1..=6 {
        let ntwk = Network::from_hz(vec![1e9], zeros(1, nports), 50.0).unwrap();
        assert_eq!(ntwk.nports(), nports);
    }
}

#[test]
fn test_empty_network_is_constructible() {
    let ntwk = Network::from_hz(vec![], zeros(0, 4), 50.0).unwrap();
    assert_eq!(ntwk.nfreq(), 0);
    assert_eq!(ntwk.ensure_not_empty(), Err(AnalysisError::EmptyNetwork));
}

#[test]
fn test_rejects_non_square() {
    let s = Array3::<Complex64>::zeros((2, 2, 3));
    let result = Network::from_hz(vec![1e9, 2e9], s, 50.0);
    assert!(matches!(result, Err(AnalysisError::MalformedNetwork(_))));
}

#[test]
fn test_rejects_length_mismatch() {
    let result = Network::from_hz(vec![1e9, 2e9, 3e9], zeros(2, 2), 50.0);
    assert!(matches!(result, Err(AnalysisError::MalformedNetwork(_))));
}

#[test]
fn test_rejects_unsorted_frequencies() {
    let result = Network::from_hz(vec![2e9, 1e9], zeros(2, 2), 50.0);
    assert!(matches!(result, Err(AnalysisError::MalformedNetwork(_))));

    let result = Network::from_hz(vec![1e9, 1e9], zeros(2, 2), 50.0);
    assert!(matches!(result, Err(AnalysisError::MalformedNetwork(_))));
}

#[test]
fn test_rejects_bad_reference_impedance() {
    for z0 in [0.0, -50.0, f64::NAN, f64::INFINITY] {
        let result = Network::from_hz(vec![1e9], zeros(1, 2), z0);
        assert!(matches!(result, Err(AnalysisError::MalformedNetwork(_))));
    }
}

#[test]
fn test_rejects_non_finite_data() {
    let mut s = zeros(2, 2);
    s[[1, 0, 1]] = Complex64::new(f64::NAN, 0.0);
    let err = Network::from_hz(vec![1e9, 2e9], s, 50.0).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::MalformedNetwork("non-finite S[1, 2] at frequency index 1".to_string())
    );
}

#[test]
fn test_trace_accessor() {
    let mut s = zeros(3, 2);
    for k in 0..3 {
        s[[k, 1, 0]] = Complex64::new(k as f64, 0.0);
    }
    let ntwk = Network::from_hz(vec![1e9, 2e9, 3e9], s, 50.0)
        .unwrap()
        .with_name("dut");
    let s21 = ntwk.trace(1, 0);
    assert_eq!(s21.len(), 3);
    assert_eq!(s21[2], Complex64::new(2.0, 0.0));
    assert_eq!(ntwk.name(), Some("dut"));
}
