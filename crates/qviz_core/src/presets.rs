//! Reference states for QVIZ
//!
//! Gantree: L1_Result → Presets
//!
//! The small catalogue of states the demonstration backend serves without a
//! full simulator. Useful for tests and offline demos.

use crate::builder::SimulationResultBuilder;
use crate::error::{QvizError, QvizResult};
use crate::types::SimulationResult;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

/// Largest register `Ground(n)` will build
pub const MAX_GROUND_QUBITS: usize = 16;

/// Named reference state
/// Gantree: PresetState // 기준 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresetState {
    /// (|00⟩ + |11⟩)/√2
    Bell,
    /// (|000⟩ + |111⟩)/√2
    Ghz,
    /// (|0⟩ + |1⟩)/√2
    Superposition,
    /// |1⟩
    XGate,
    /// |0…0⟩ on n qubits
    Ground(usize),
}

impl PresetState {
    /// Every fixed preset (Ground shown with 2 qubits)
    pub const ALL: [PresetState; 5] = [
        PresetState::Bell,
        PresetState::Ghz,
        PresetState::Superposition,
        PresetState::XGate,
        PresetState::Ground(2),
    ];

    /// Catalogue name
    pub fn name(&self) -> &'static str {
        match self {
            PresetState::Bell => "bell_state",
            PresetState::Ghz => "ghz_state",
            PresetState::Superposition => "superposition",
            PresetState::XGate => "x_gate",
            PresetState::Ground(_) => "default",
        }
    }

    /// Look up by catalogue name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bell_state" => Some(PresetState::Bell),
            "ghz_state" => Some(PresetState::Ghz),
            "superposition" => Some(PresetState::Superposition),
            "x_gate" => Some(PresetState::XGate),
            "default" => Some(PresetState::Ground(2)),
            _ => None,
        }
    }

    /// Number of qubits in the preset
    pub fn num_qubits(&self) -> usize {
        match *self {
            PresetState::Bell => 2,
            PresetState::Ghz => 3,
            PresetState::Superposition | PresetState::XGate => 1,
            PresetState::Ground(n) => n,
        }
    }

    /// Statevector for this preset
    ///
    /// Fails with `InvalidConfig` for `Ground(n)` outside 1..=16.
    pub fn amplitudes(&self) -> QvizResult<Vec<Complex64>> {
        let zero = Complex64::new(0.0, 0.0);
        let half = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let one = Complex64::new(1.0, 0.0);

        let sv = match *self {
            PresetState::Bell => vec![half, zero, zero, half],
            PresetState::Ghz => {
                let mut sv = vec![zero; 8];
                sv[0] = half;
                sv[7] = half;
                sv
            }
            PresetState::Superposition => vec![half, half],
            PresetState::XGate => vec![zero, one],
            PresetState::Ground(n) => {
                if !(1..=MAX_GROUND_QUBITS).contains(&n) {
                    return Err(QvizError::InvalidConfig(format!(
                        "ground state needs 1..={} qubits, got {}",
                        MAX_GROUND_QUBITS, n
                    )));
                }
                let mut sv = vec![zero; 1usize << n];
                sv[0] = one;
                sv
            }
        };
        Ok(sv)
    }

    /// Build the result snapshot
    /// Gantree: to_result(self) -> Result<SimulationResult> // 결과 생성
    pub fn to_result(&self) -> QvizResult<SimulationResult> {
        SimulationResultBuilder::from_amplitudes(self.amplitudes()?)
            .circuit_depth(2)
            .circuit_size(2)
            .build()
    }
}

impl fmt::Display for PresetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetState::Ground(n) => write!(f, "ground({})", n),
            other => write!(f, "{}", other.name()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_all_presets_valid() {
        for preset in PresetState::ALL {
            let r = preset.to_result().unwrap();
            assert!(r.validate().is_ok(), "{} invalid", preset);
        }
    }

    #[test]
    fn test_bell_marginals() {
        let r = PresetState::Bell.to_result().unwrap();
        assert_eq!(r.num_qubits, 2);
        for m in &r.marginal_probabilities {
            assert_abs_diff_eq!(m.prob_0, 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_ghz_shape() {
        let r = PresetState::Ghz.to_result().unwrap();
        assert_eq!(r.num_qubits, 3);
        assert_eq!(r.significant_states(0.01), vec![0, 7]);
    }

    #[test]
    fn test_x_gate() {
        let r = PresetState::XGate.to_result().unwrap();
        assert_eq!(r.probabilities_for(0), Some((0.0, 1.0)));
    }

    #[test]
    fn test_ground() {
        let r = PresetState::Ground(3).to_result().unwrap();
        assert_eq!(r.num_qubits, 3);
        assert_eq!(r.most_likely_state(), Some((0, 1.0)));
    }

    #[test]
    fn test_ground_size_checked() {
        for n in [0, MAX_GROUND_QUBITS + 1] {
            let err = PresetState::Ground(n).to_result().unwrap_err();
            assert!(matches!(err, QvizError::InvalidConfig(_)), "ground({})", n);
        }
        let r = PresetState::Ground(1).to_result().unwrap();
        assert_eq!(r.num_qubits, PresetState::Ground(1).num_qubits());
    }

    #[test]
    fn test_names() {
        for preset in PresetState::ALL {
            assert_eq!(PresetState::from_name(preset.name()), Some(preset));
        }
        assert_eq!(PresetState::from_name("qft"), None);
    }
}
