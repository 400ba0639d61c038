//! Pairwise correlation heuristic
//!
//! Gantree: L2_Classify → Correlation
//!
//! Classical agreement score between two qubits' computational-basis
//! statistics. This is not an entanglement witness: any pair whose basis
//! outcomes happen to agree (or disagree) often scores high, superposition or
//! not. It ranks pairs among the entangled qubits; `StateClassifier::connectable_edges`
//! applies the eligibility gate.

use qviz_core::types::qubit_bit;
use qviz_core::{CorrelationEdge, QubitIndex, SimulationResult};

/// Probability mass on basis states where qubits `a` and `b` agree
/// Gantree: same_state_probability(probs,a,b) -> f64 // 일치 확률
pub fn same_state_probability(probabilities: &[f64], a: QubitIndex, b: QubitIndex) -> f64 {
    probabilities
        .iter()
        .enumerate()
        .filter(|(state, _)| qubit_bit(*state, a) == qubit_bit(*state, b))
        .map(|(_, &p)| p)
        .sum()
}

/// Strength in [0, 1]: `|same - 0.5| × 2`
/// Gantree: pair_strength(probs,a,b) -> f64 // 상관 강도
///
/// 0 means no net agreement, 1 means always equal or always opposite.
/// A product state such as |00⟩ also scores 1.
pub fn pair_strength(probabilities: &[f64], a: QubitIndex, b: QubitIndex) -> f64 {
    let same = same_state_probability(probabilities, a, b);
    ((same - 0.5).abs() * 2.0).clamp(0.0, 1.0)
}

/// One edge per unordered pair, ordered (0,1), (0,2), …, (1,2), …
pub fn correlation_edges(num_qubits: usize, probabilities: &[f64]) -> Vec<CorrelationEdge> {
    let mut edges = Vec::with_capacity(num_qubits * num_qubits.saturating_sub(1) / 2);
    for a in 0..num_qubits {
        for b in a + 1..num_qubits {
            edges.push(CorrelationEdge::new(
                a,
                b,
                pair_strength(probabilities, a, b),
            ));
        }
    }
    edges
}

/// Coarse system-wide trigger: more than one significant basis state
/// Gantree: is_globally_entangled(result,threshold) -> bool // 전역 얽힘
pub fn is_globally_entangled(result: &SimulationResult, threshold: f64) -> bool {
    result.num_qubits > 1 && result.significant_states(threshold).len() > 1
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qviz_core::PresetState;

    #[test]
    fn test_bell_perfect_correlation() {
        let probs = [0.5, 0.0, 0.0, 0.5];
        assert_relative_eq!(pair_strength(&probs, 0, 1), 1.0);
    }

    #[test]
    fn test_anti_correlation_is_strong() {
        // (|01⟩ + |10⟩)/√2
        let probs = [0.0, 0.5, 0.5, 0.0];
        assert_relative_eq!(same_state_probability(&probs, 0, 1), 0.0);
        assert_relative_eq!(pair_strength(&probs, 0, 1), 1.0);
    }

    #[test]
    fn test_uniform_has_no_correlation() {
        let probs = [0.25; 4];
        assert_relative_eq!(pair_strength(&probs, 0, 1), 0.0);
    }

    #[test]
    fn test_product_state_false_positive() {
        // |00⟩ is not entangled but both qubits always agree
        let probs = [1.0, 0.0, 0.0, 0.0];
        assert_relative_eq!(pair_strength(&probs, 0, 1), 1.0);
    }

    #[test]
    fn test_symmetry() {
        let probs = [0.1, 0.2, 0.05, 0.15, 0.1, 0.1, 0.2, 0.1];
        for a in 0..3 {
            for b in 0..3 {
                assert_relative_eq!(pair_strength(&probs, a, b), pair_strength(&probs, b, a));
            }
        }
    }

    #[test]
    fn test_edge_count() {
        assert!(correlation_edges(1, &[1.0, 0.0]).is_empty());
        assert_eq!(correlation_edges(3, &[0.125; 8]).len(), 3);
        let pairs: Vec<_> = correlation_edges(3, &[0.125; 8])
            .iter()
            .map(|e| e.pair())
            .collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_global_trigger() {
        let bell = PresetState::Bell.to_result().unwrap();
        assert!(is_globally_entangled(&bell, 0.01));

        let ground = PresetState::Ground(2).to_result().unwrap();
        assert!(!is_globally_entangled(&ground, 0.01));

        // Single qubit never counts
        let plus = PresetState::Superposition.to_result().unwrap();
        assert!(!is_globally_entangled(&plus, 0.01));
    }
}
