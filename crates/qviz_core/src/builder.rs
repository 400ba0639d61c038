//! Simulation result builder for QVIZ
//!
//! Gantree: L1_Result → SimulationResultBuilder
//!
//! Fluent construction of validated `SimulationResult` values from either a
//! statevector or a list of basis probabilities.

use crate::error::{QvizError, QvizResult};
use crate::types::{dimension_for, qubit_bit, MarginalProbability, SimulationResult};
use num_complex::Complex64;

/// Sum basis probabilities into per-qubit marginals (little-endian bits)
/// Gantree: marginals_from_probabilities(n,probs) -> Vec<Marginal> // 주변 확률
pub fn marginals_from_probabilities(
    num_qubits: usize,
    probabilities: &[f64],
) -> Vec<MarginalProbability> {
    (0..num_qubits)
        .map(|qubit| {
            let (mut prob_0, mut prob_1) = (0.0, 0.0);
            for (state, &p) in probabilities.iter().enumerate() {
                if qubit_bit(state, qubit) {
                    prob_1 += p;
                } else {
                    prob_0 += p;
                }
            }
            MarginalProbability::new(qubit, prob_0, prob_1)
        })
        .collect()
}

/// |amplitude|² for every basis state
pub fn probabilities_from_amplitudes(amplitudes: &[Complex64]) -> Vec<f64> {
    amplitudes.iter().map(|a| a.norm_sqr()).collect()
}

/// Number of qubits for a vector of length 2^n
pub fn qubits_for_dimension(len: usize) -> QvizResult<usize> {
    if len < 2 || !len.is_power_of_two() {
        return Err(QvizError::InvalidResult(format!(
            "length {} is not a power of two >= 2",
            len
        )));
    }
    Ok(len.trailing_zeros() as usize)
}

/// Fluent result builder (consuming self pattern)
/// Gantree: SimulationResultBuilder // 빌더 패턴
#[derive(Debug, Clone, Default)]
pub struct SimulationResultBuilder {
    num_qubits: Option<usize>,
    probabilities: Option<Vec<f64>>,
    amplitudes: Option<Vec<Complex64>>,
    marginals: Option<Vec<MarginalProbability>>,
    circuit_depth: Option<usize>,
    circuit_size: Option<usize>,
}

impl SimulationResultBuilder {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a statevector
    /// Gantree: from_amplitudes(amps) -> Self // 상태벡터
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> Self {
        Self {
            amplitudes: Some(amplitudes),
            ..Self::default()
        }
    }

    /// Start from basis probabilities
    pub fn from_probabilities(probabilities: Vec<f64>) -> Self {
        Self {
            probabilities: Some(probabilities),
            ..Self::default()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Declare qubit count explicitly
    pub fn num_qubits(mut self, n: usize) -> Self {
        self.num_qubits = Some(n);
        self
    }

    /// Override basis probabilities
    pub fn probabilities(mut self, probabilities: Vec<f64>) -> Self {
        self.probabilities = Some(probabilities);
        self
    }

    /// Supply backend-computed marginals
    pub fn marginals(mut self, marginals: Vec<MarginalProbability>) -> Self {
        self.marginals = Some(marginals);
        self
    }

    /// Set circuit depth
    pub fn circuit_depth(mut self, depth: usize) -> Self {
        self.circuit_depth = Some(depth);
        self
    }

    /// Set circuit size
    pub fn circuit_size(mut self, size: usize) -> Self {
        self.circuit_size = Some(size);
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Assemble and validate
    /// Gantree: build(self) -> Result<SimulationResult> // 생성+검증
    pub fn build(self) -> QvizResult<SimulationResult> {
        let result = self.build_unchecked()?;
        result.validate()?;
        Ok(result)
    }

    /// Assemble, deriving missing pieces, without normalisation checks
    pub fn build_unchecked(self) -> QvizResult<SimulationResult> {
        let probabilities = match (self.probabilities, &self.amplitudes) {
            (Some(p), _) => p,
            (None, Some(amps)) => probabilities_from_amplitudes(amps),
            (None, None) => {
                return Err(QvizError::InvalidResult(
                    "neither amplitudes nor probabilities supplied".into(),
                ))
            }
        };

        let num_qubits = match self.num_qubits {
            Some(n) => n,
            None => qubits_for_dimension(probabilities.len())?,
        };

        if dimension_for(num_qubits) != Some(probabilities.len()) {
            return Err(QvizError::InvalidResult(format!(
                "{} probabilities do not describe {} qubits",
                probabilities.len(),
                num_qubits
            )));
        }

        let marginals = self
            .marginals
            .unwrap_or_else(|| marginals_from_probabilities(num_qubits, &probabilities));

        Ok(SimulationResult {
            success: true,
            error: None,
            num_qubits,
            basis_probabilities: probabilities,
            marginal_probabilities: marginals,
            amplitudes: self.amplitudes,
            circuit_depth: self.circuit_depth,
            circuit_size: self.circuit_size,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
