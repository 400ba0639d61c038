//! Core types for QVIZ
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Simulation result snapshot plus the derived per-qubit and per-pair values
//! that flow from the classifier into the animators.

use crate::constants::thresholds::PROBABILITY_TOLERANCE;
use crate::error::{QvizError, QvizResult};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed, little-endian bit position)
/// Gantree: QubitIndex // pub type QubitIndex = usize
pub type QubitIndex = usize;

/// Unordered qubit pair stored as (low, high)
pub type QubitPair = (QubitIndex, QubitIndex);

/// Number of basis states for `num_qubits`, `None` on overflow
pub fn dimension_for(num_qubits: usize) -> Option<usize> {
    u32::try_from(num_qubits)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
}

/// Bit of `qubit` inside basis-state index `state`
#[inline]
pub fn qubit_bit(state: usize, qubit: QubitIndex) -> bool {
    (state >> qubit) & 1 == 1
}

// ============================================================================
// Marginal Probability
// ============================================================================

/// Single-qubit marginal distribution
/// Gantree: MarginalProbability // 큐비트 주변 확률
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginalProbability {
    /// Qubit index
    pub qubit: QubitIndex,

    /// P(qubit = 0)
    pub prob_0: f64,

    /// P(qubit = 1)
    pub prob_1: f64,
}

impl MarginalProbability {
    /// Create new marginal
    pub fn new(qubit: QubitIndex, prob_0: f64, prob_1: f64) -> Self {
        Self {
            qubit,
            prob_0,
            prob_1,
        }
    }

    /// Sum of both outcomes (≈ 1)
    pub fn total(&self) -> f64 {
        self.prob_0 + self.prob_1
    }

    /// |p0 - p1|
    pub fn difference(&self) -> f64 {
        (self.prob_0 - self.prob_1).abs()
    }
}

// ============================================================================
// Simulation Result
// ============================================================================

/// Immutable snapshot of one completed simulation
/// Gantree: SimulationResult // 시뮬레이션 결과
///
/// Replaced wholesale when a new result arrives; never mutated in place by
/// the visualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Backend success flag
    pub success: bool,

    /// Backend error message when `success` is false
    pub error: Option<String>,

    /// Number of qubits
    pub num_qubits: usize,

    /// Basis-state probabilities, length 2^num_qubits
    pub basis_probabilities: Vec<f64>,

    /// One marginal per qubit, ordered by index
    pub marginal_probabilities: Vec<MarginalProbability>,

    /// Statevector amplitudes (optional)
    pub amplitudes: Option<Vec<Complex64>>,

    /// Circuit depth reported by the backend
    pub circuit_depth: Option<usize>,

    /// Circuit gate count reported by the backend
    pub circuit_size: Option<usize>,
}

impl SimulationResult {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a successful result without validation
    pub fn from_parts(
        num_qubits: usize,
        basis_probabilities: Vec<f64>,
        marginal_probabilities: Vec<MarginalProbability>,
    ) -> Self {
        Self {
            success: true,
            error: None,
            num_qubits,
            basis_probabilities,
            marginal_probabilities,
            amplitudes: None,
            circuit_depth: None,
            circuit_size: None,
        }
    }

    /// Create a failed result carrying the backend message
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            num_qubits: 0,
            basis_probabilities: Vec::new(),
            marginal_probabilities: Vec::new(),
            amplitudes: None,
            circuit_depth: None,
            circuit_size: None,
        }
    }

    /// Attach amplitudes
    pub fn with_amplitudes(mut self, amplitudes: Vec<Complex64>) -> Self {
        self.amplitudes = Some(amplitudes);
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate shape and normalisation
    /// Gantree: validate(&self) -> Result<()> // 결과 검증
    ///
    /// Sums drifting from 1.0 by less than `PROBABILITY_TOLERANCE` pass.
    pub fn validate(&self) -> QvizResult<()> {
        if !self.success {
            let message = self
                .error
                .clone()
                .unwrap_or_else(|| "backend reported failure".to_string());
            return Err(QvizError::ResultUnsuccessful(message));
        }

        if self.num_qubits == 0 {
            return Err(QvizError::InvalidResult("result has no qubits".into()));
        }

        let dim = dimension_for(self.num_qubits).ok_or_else(|| {
            QvizError::InvalidResult(format!("{} qubits is too many", self.num_qubits))
        })?;

        if self.marginal_probabilities.len() != self.num_qubits {
            return Err(QvizError::InvalidResult(format!(
                "marginal count {} != {} qubits",
                self.marginal_probabilities.len(),
                self.num_qubits
            )));
        }

        if self.basis_probabilities.len() != dim {
            return Err(QvizError::InvalidResult(format!(
                "basis probability count {} != 2^{}",
                self.basis_probabilities.len(),
                self.num_qubits
            )));
        }

        if let Some(amps) = &self.amplitudes {
            if amps.len() != dim {
                return Err(QvizError::InvalidResult(format!(
                    "amplitude count {} != 2^{}",
                    amps.len(),
                    self.num_qubits
                )));
            }
        }

        if let Some(&p) = self
            .basis_probabilities
            .iter()
            .find(|p| !p.is_finite() || **p < -PROBABILITY_TOLERANCE)
        {
            return Err(QvizError::InvalidResult(format!(
                "basis probability {} is not a probability",
                p
            )));
        }

        let total: f64 = self.basis_probabilities.iter().sum();
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(QvizError::InvalidResult(format!(
                "basis probabilities sum to {:.8}",
                total
            )));
        }

        for (i, m) in self.marginal_probabilities.iter().enumerate() {
            if m.qubit != i {
                return Err(QvizError::InvalidResult(format!(
                    "marginal at position {} describes qubit {}",
                    i, m.qubit
                )));
            }
            if !m.prob_0.is_finite() || !m.prob_1.is_finite() {
                return Err(QvizError::InvalidResult(format!(
                    "qubit {} marginal is not finite",
                    i
                )));
            }
            if (m.total() - 1.0).abs() > PROBABILITY_TOLERANCE {
                return Err(QvizError::InvalidResult(format!(
                    "qubit {} marginal sums to {:.8}",
                    i,
                    m.total()
                )));
            }
        }

        Ok(())
    }

    /// Check validity
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of basis states (2^n)
    pub fn dimension(&self) -> usize {
        self.basis_probabilities.len()
    }

    /// Marginal for a qubit, `None` when out of range
    pub fn marginal(&self, qubit: QubitIndex) -> Option<&MarginalProbability> {
        self.marginal_probabilities.get(qubit)
    }

    /// Marginal for a qubit, erroring when out of range
    pub fn checked_marginal(&self, qubit: QubitIndex) -> QvizResult<&MarginalProbability> {
        self.marginal(qubit).ok_or(QvizError::IndexOutOfRange {
            index: qubit,
            len: self.marginal_probabilities.len(),
        })
    }

    /// (prob_0, prob_1) for a qubit
    pub fn probabilities_for(&self, qubit: QubitIndex) -> Option<(f64, f64)> {
        self.marginal(qubit).map(|m| (m.prob_0, m.prob_1))
    }

    /// Probability of one basis state
    pub fn basis_probability(&self, state: usize) -> Option<f64> {
        self.basis_probabilities.get(state).copied()
    }

    /// Basis states whose weight exceeds `threshold`
    /// Gantree: significant_states(threshold) -> Vec<usize> // 진폭 필터
    ///
    /// Uses |amplitude|² when amplitudes are present, else the basis probability.
    pub fn significant_states(&self, threshold: f64) -> Vec<usize> {
        match &self.amplitudes {
            Some(amps) => amps
                .iter()
                .enumerate()
                .filter(|(_, a)| a.norm_sqr() > threshold)
                .map(|(i, _)| i)
                .collect(),
            None => self
                .basis_probabilities
                .iter()
                .enumerate()
                .filter(|(_, &p)| p > threshold)
                .map(|(i, _)| i)
                .collect(),
        }
    }

    /// Most likely basis state
    pub fn most_likely_state(&self) -> Option<(usize, f64)> {
        self.basis_probabilities
            .iter()
            .copied()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.success {
            return write!(
                f,
                "SimulationResult(failed: {})",
                self.error.as_deref().unwrap_or("unknown")
            );
        }
        write!(
            f,
            "SimulationResult({}Q, states={}, depth={})",
            self.num_qubits,
            self.basis_probabilities.len(),
            self.circuit_depth
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string())
        )
    }
}

// ============================================================================
// Derived Visual Values
// ============================================================================

/// Visual class of a single qubit
/// Gantree: Classification // 시각 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Classification {
    /// Definite |0⟩
    #[default]
    Zero,
    /// Definite |1⟩
    One,
    /// Marginals too close to tell apart
    Superposition,
}

impl Classification {
    /// Check if definite (Zero or One)
    pub fn is_definite(&self) -> bool {
        !matches!(self, Classification::Superposition)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Zero => write!(f, "|0⟩"),
            Classification::One => write!(f, "|1⟩"),
            Classification::Superposition => write!(f, "superposition"),
        }
    }
}

/// Derived per-qubit state handed to the animator by value
/// Gantree: QubitVisualState // 큐비트 시각 상태
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QubitVisualState {
    /// Qubit index
    pub qubit: QubitIndex,

    /// Visual class
    pub classification: Classification,

    /// Eligible for connection rendering
    pub entangled: bool,

    /// P(0)
    pub prob_0: f64,

    /// P(1)
    pub prob_1: f64,
}

impl QubitVisualState {
    /// Resting state before the first result (Zero pole)
    pub fn ground(qubit: QubitIndex) -> Self {
        Self {
            qubit,
            classification: Classification::Zero,
            entangled: false,
            prob_0: 1.0,
            prob_1: 0.0,
        }
    }

    /// |p0 - p1|
    pub fn difference(&self) -> f64 {
        (self.prob_0 - self.prob_1).abs()
    }

    /// Check classification
    pub fn is_superposition(&self) -> bool {
        self.classification == Classification::Superposition
    }

    /// Check against an explicit band (textual label uses 0.01)
    pub fn is_in_superposition(&self, threshold: f64) -> bool {
        self.difference() < threshold
    }
}

/// Correlation between two qubits
/// Gantree: CorrelationEdge // 상관 엣지
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEdge {
    /// Lower qubit index
    pub qubit_a: QubitIndex,

    /// Higher qubit index
    pub qubit_b: QubitIndex,

    /// Strength in [0, 1]
    pub strength: f64,
}

impl CorrelationEdge {
    /// Create edge; pair is normalised to (low, high) and strength clamped
    pub fn new(a: QubitIndex, b: QubitIndex, strength: f64) -> Self {
        let (qubit_a, qubit_b) = if a <= b { (a, b) } else { (b, a) };
        Self {
            qubit_a,
            qubit_b,
            strength: strength.clamp(0.0, 1.0),
        }
    }

    /// Unordered pair key
    pub fn pair(&self) -> QubitPair {
        (self.qubit_a, self.qubit_b)
    }

    /// Check if edge touches qubit
    pub fn involves(&self, qubit: QubitIndex) -> bool {
        self.qubit_a == qubit || self.qubit_b == qubit
    }

    /// Strictly above threshold
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.strength > threshold
    }
}

impl fmt::Display for CorrelationEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "q{}-q{} ({:.2})",
            self.qubit_a, self.qubit_b, self.strength
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
