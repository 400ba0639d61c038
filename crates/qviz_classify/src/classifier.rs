//! State classifier
//!
//! Gantree: L2_Classify → StateClassifier
//!
//! Turns a simulation result into per-qubit visual states and pairwise
//! correlation edges. Pure and deterministic: no state survives between calls.

use crate::correlation::{correlation_edges, is_globally_entangled};
use qviz_core::thresholds::{
    CORRELATION_EDGE, ENTANGLEMENT_BASIS, SUPERPOSITION_ANIMATION,
};
use qviz_core::{
    Classification, CorrelationEdge, QubitIndex, QubitVisualState, QvizResult, SimulationResult,
};
use serde::{Deserialize, Serialize};

/// Classifier thresholds
/// Gantree: ClassifierConfig // 분류 설정
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// |p0 - p1| band for the Superposition class (animation band)
    pub superposition_threshold: f64,

    /// Basis-state probability counted as significant
    pub entanglement_threshold: f64,

    /// Pairwise strength for a visible connection
    pub correlation_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            superposition_threshold: SUPERPOSITION_ANIMATION,
            entanglement_threshold: ENTANGLEMENT_BASIS,
            correlation_threshold: CORRELATION_EDGE,
        }
    }
}

/// Classifier output for one result
/// Gantree: Classified // 분류 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classified {
    /// One state per qubit, ordered by index
    pub states: Vec<QubitVisualState>,

    /// One edge per unordered pair
    pub edges: Vec<CorrelationEdge>,

    /// System-wide entangled trigger
    pub entangled: bool,
}

impl Classified {
    /// Number of qubits
    pub fn num_qubits(&self) -> usize {
        self.states.len()
    }

    /// State for one qubit
    pub fn state(&self, qubit: QubitIndex) -> Option<&QubitVisualState> {
        self.states.get(qubit)
    }

    /// Edge for an unordered pair
    pub fn edge(&self, a: QubitIndex, b: QubitIndex) -> Option<&CorrelationEdge> {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.edges.iter().find(|e| e.pair() == key)
    }

    /// Edges strictly above `threshold`
    pub fn strong_edges(&self, threshold: f64) -> impl Iterator<Item = &CorrelationEdge> {
        self.edges.iter().filter(move |e| e.exceeds(threshold))
    }
}

/// Stateless classifier
/// Gantree: StateClassifier // 상태 분류기
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StateClassifier {
    config: ClassifierConfig,
}

impl StateClassifier {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create with thresholds
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    // ========================================================================
    // Classification
    // ========================================================================

    /// Class for a single marginal
    /// Gantree: classify_marginal(p0,p1,threshold) -> Classification // 큐비트 분류
    ///
    /// Exactly equal marginals are always Superposition, even with a zero band.
    pub fn classify_marginal(prob_0: f64, prob_1: f64, threshold: f64) -> Classification {
        let d = (prob_0 - prob_1).abs();
        if d < threshold || prob_0 == prob_1 {
            Classification::Superposition
        } else if prob_0 > prob_1 {
            Classification::Zero
        } else {
            Classification::One
        }
    }

    /// Classify every qubit and score every pair
    /// Gantree: classify(result) -> Classified // 전체 분류
    ///
    /// Assumes a validated result; use `classify_checked` otherwise.
    pub fn classify(&self, result: &SimulationResult) -> Classified {
        let entangled = is_globally_entangled(result, self.config.entanglement_threshold);

        let states = result
            .marginal_probabilities
            .iter()
            .take(result.num_qubits)
            .enumerate()
            .map(|(qubit, m)| QubitVisualState {
                qubit,
                classification: Self::classify_marginal(
                    m.prob_0,
                    m.prob_1,
                    self.config.superposition_threshold,
                ),
                entangled,
                prob_0: m.prob_0,
                prob_1: m.prob_1,
            })
            .collect();

        let edges = correlation_edges(result.num_qubits, &result.basis_probabilities);

        Classified {
            states,
            edges,
            entangled,
        }
    }

    /// Validate then classify
    pub fn classify_checked(&self, result: &SimulationResult) -> QvizResult<Classified> {
        result.validate()?;
        Ok(self.classify(result))
    }

    /// Pairs that get a connection line
    /// Gantree: connectable_edges(classified) -> Vec<CorrelationEdge> // 연결 대상
    ///
    /// Only entangled qubits are eligible; among those, a pair connects when
    /// its strength is above `correlation_threshold`.
    pub fn connectable_edges(&self, classified: &Classified) -> Vec<CorrelationEdge> {
        let eligible = |q: QubitIndex| classified.state(q).map_or(false, |s| s.entangled);
        classified
            .strong_edges(self.config.correlation_threshold)
            .filter(|e| eligible(e.qubit_a) && eligible(e.qubit_b))
            .copied()
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qviz_core::{MarginalProbability, PresetState, QvizError};

    fn one_qubit(p0: f64) -> SimulationResult {
        SimulationResult::from_parts(
            1,
            vec![p0, 1.0 - p0],
            vec![MarginalProbability::new(0, p0, 1.0 - p0)],
        )
    }

    #[test]
    fn test_exact_half_is_superposition() {
        assert_eq!(
            StateClassifier::classify_marginal(0.5, 0.5, 0.1),
            Classification::Superposition
        );
        assert_eq!(
            StateClassifier::classify_marginal(0.5, 0.5, 0.0),
            Classification::Superposition
        );
    }

    #[test]
    fn test_definite_poles() {
        assert_eq!(
            StateClassifier::classify_marginal(1.0, 0.0, 0.1),
            Classification::Zero
        );
        assert_eq!(
            StateClassifier::classify_marginal(0.0, 1.0, 0.1),
            Classification::One
        );
    }

    #[test]
    fn test_band_edges() {
        // d = 0.08 is inside the animation band but outside the label band
        assert_eq!(
            StateClassifier::classify_marginal(0.54, 0.46, 0.1),
            Classification::Superposition
        );
        assert_eq!(
            StateClassifier::classify_marginal(0.54, 0.46, 0.01),
            Classification::Zero
        );
        // d = 0.2 is definite
        assert_eq!(
            StateClassifier::classify_marginal(0.4, 0.6, 0.1),
            Classification::One
        );
    }

    #[test]
    fn test_single_qubit_ground() {
        let out = StateClassifier::default().classify(&one_qubit(1.0));
        assert_eq!(out.states.len(), 1);
        assert_eq!(out.states[0].classification, Classification::Zero);
        assert!(!out.states[0].entangled);
        assert!(out.edges.is_empty());
    }

    #[test]
    fn test_bell() {
        let bell = PresetState::Bell.to_result().unwrap();
        let out = StateClassifier::default().classify(&bell);

        assert_eq!(out.num_qubits(), 2);
        assert!(out.entangled);
        for s in &out.states {
            assert_eq!(s.classification, Classification::Superposition);
            assert!(s.entangled);
            assert_relative_eq!(s.prob_0 + s.prob_1, 1.0, epsilon = 1e-9);
        }
        assert_relative_eq!(out.edge(1, 0).unwrap().strength, 1.0, epsilon = 1e-9);
        assert_eq!(out.strong_edges(0.5).count(), 1);
    }

    #[test]
    fn test_probabilities_preserved() {
        let ghz = PresetState::Ghz.to_result().unwrap();
        let out = StateClassifier::default().classify(&ghz);
        for (s, m) in out.states.iter().zip(&ghz.marginal_probabilities) {
            assert_eq!(s.prob_0, m.prob_0);
            assert_eq!(s.prob_1, m.prob_1);
        }
    }

    #[test]
    fn test_deterministic() {
        let classifier = StateClassifier::default();
        let ghz = PresetState::Ghz.to_result().unwrap();
        assert_eq!(classifier.classify(&ghz), classifier.classify(&ghz));
    }

    #[test]
    fn test_connectable_edges_need_entanglement() {
        let classifier = StateClassifier::default();

        let bell = classifier.classify(&PresetState::Bell.to_result().unwrap());
        assert_eq!(classifier.connectable_edges(&bell).len(), 1);

        // |00⟩ scores as perfectly correlated but nothing is entangled
        let ground = classifier.classify(&PresetState::Ground(2).to_result().unwrap());
        assert_eq!(ground.strong_edges(0.5).count(), 1);
        assert!(classifier.connectable_edges(&ground).is_empty());
    }

    #[test]
    fn test_connectable_edges_use_threshold() {
        let strict = StateClassifier::new(ClassifierConfig {
            correlation_threshold: 1.0,
            ..ClassifierConfig::default()
        });
        let ghz = strict.classify(&PresetState::Ghz.to_result().unwrap());
        assert!(ghz.entangled);
        assert!(strict.connectable_edges(&ghz).is_empty());
    }

    #[test]
    fn test_classify_checked_rejects_failed() {
        let err = StateClassifier::default()
            .classify_checked(&SimulationResult::failed("boom"))
            .unwrap_err();
        assert!(matches!(err, QvizError::ResultUnsuccessful(_)));
    }
}
