//! Mixed-Mode Transform Tests

use approx::assert_relative_eq;
use ndarray::Array3;
use num_complex::Complex64;
use sparam_core::error::AnalysisError;
use sparam_core::network::{MixedModeLabel, Network, Parameter, PortMode};

/// Arbitrary, deterministic 4-port data
fn scrambled_four_port(nfreq: usize) -> Network {
    let mut s = Array3::<Complex64>::zeros((nfreq, 4, 4));
    for k in 0..nfreq {
        for i in 0..4 {
            for j in 0..4 {
                let x = (k * 16 + i * 4 + j) as f64;
                s[[k, i, j]] = Complex64::new((0.37 * x).sin() * 0.4, (0.11 * x).cos() * 0.3);
            }
        }
    }
    let f = (1..=nfreq).map(|k| k as f64 * 5e8).collect();
    Network::from_hz(f, s, 50.0).unwrap()
}

/// Two uncoupled, matched lines: 1 -> 3 and 2 -> 4
fn coupled_pair(thru: Complex64, xtalk: Complex64) -> Network {
    let mut s = Array3::<Complex64>::zeros((1, 4, 4));
    for (a, b) in [(0, 2), (1, 3)] {
        s[[0, a, b]] = thru;
        s[[0, b, a]] = thru;
    }
    // Near-end crosstalk between the two legs of the pair
    s[[0, 0, 1]] = xtalk;
    s[[0, 1, 0]] = xtalk;
    s[[0, 2, 3]] = xtalk;
    s[[0, 3, 2]] = xtalk;
    Network::from_hz(vec![1e9], s, 50.0).unwrap()
}

#[test]
fn test_round_trip() {
    let ntwk = scrambled_four_port(7);
    let back = ntwk.to_mixed_mode().unwrap().to_single_ended().unwrap();

    assert_eq!(back.mode(), PortMode::SingleEnded);
    assert_eq!(back.f(), ntwk.f());
    for (a, b) in ntwk.s().iter().zip(back.s().iter()) {
        assert_relative_eq!(a.re, b.re, epsilon = 1e-14);
        assert_relative_eq!(a.im, b.im, epsilon = 1e-14);
    }
}

#[test]
fn test_frequencies_and_impedance_preserved() {
    let ntwk = scrambled_four_port(3).with_name("pair.s4p");
    let mm = ntwk.to_mixed_mode().unwrap();

    assert_eq!(mm.f(), ntwk.f());
    assert_eq!(mm.z0(), 50.0);
    assert_eq!(mm.nports(), 4);
    assert_eq!(mm.name(), Some("pair.s4p"));
    assert!(mm.is_mixed_mode());
}

#[test]
fn test_crosstalk_splits_into_modes() {
    // Odd-mode sees S11 - S12, even-mode sees S11 + S12
    let xt = Complex64::new(0.1, 0.0);
    let mm = coupled_pair(Complex64::new(0.8, 0.0), xt)
        .to_mixed_mode()
        .unwrap();

    let sdd11 = mm.s()[[0, 0, 0]];
    let scc11 = mm.s()[[0, 2, 2]];
    assert_relative_eq!(sdd11.re, -0.1, epsilon = 1e-12);
    assert_relative_eq!(scc11.re, 0.1, epsilon = 1e-12);

    // Balanced structure has no mode conversion
    for label in [MixedModeLabel::Sdc11, MixedModeLabel::Sdc21] {
        let (i, j) = label.indices();
        assert_relative_eq!(mm.s()[[0, i, j]].norm(), 0.0, epsilon = 1e-12);
    }
}

#[test]
fn test_unbalanced_pair_converts_modes() {
    let mut s = Array3::<Complex64>::zeros((1, 4, 4));
    // Only the positive leg reflects
    s[[0, 0, 0]] = Complex64::new(0.2, 0.0);
    let ntwk = Network::from_hz(vec![1e9], s, 50.0).unwrap();

    let trace = ntwk
        .to_mixed_mode()
        .unwrap()
        .extract_parameter(Parameter::MixedMode(MixedModeLabel::Sdc11))
        .unwrap();
    // |0.2 / 2| = 0.1
    assert_relative_eq!(trace.magnitude_db[0], -20.0, epsilon = 1e-12);
}

#[test]
fn test_wrong_port_count() {
    for nports in [1, 2, 3] {
        let s = Array3::<Complex64>::zeros((2, nports, nports));
        let ntwk = Network::from_hz(vec![1e9, 2e9], s, 50.0).unwrap();
        assert_eq!(
            ntwk.to_mixed_mode(),
            Err(AnalysisError::UnsupportedPortCount {
                required: 4,
                actual: nports
            })
        );
    }
}

#[test]
fn test_inverse_requires_mixed_mode() {
    let ntwk = scrambled_four_port(1);
    assert_eq!(
        ntwk.to_single_ended(),
        Err(AnalysisError::InvalidMode {
            expected: PortMode::MixedMode,
            actual: PortMode::SingleEnded
        })
    );
}
