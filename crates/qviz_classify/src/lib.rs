//! # QVIZ Classify
//!
//! Per-qubit visual classification and pairwise correlation scoring.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qviz_classify // L2: Classify
//!     StateClassifier // 상태 분류기
//!         classify_marginal() - |p0-p1| 밴드 분류
//!         classify() - 전체 큐비트 + 엣지
//!     Correlation // 상관 휴리스틱
//!         pair_strength() - |same-0.5|×2
//!         is_globally_entangled() - 유효 기저 상태 > 1
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qviz_classify::prelude::*;
//! use qviz_core::{Classification, PresetState};
//!
//! let bell = PresetState::Bell.to_result().unwrap();
//! let out = StateClassifier::default().classify(&bell);
//!
//! assert!(out.states.iter().all(|s| s.classification == Classification::Superposition));
//! assert!(out.edge(0, 1).unwrap().strength > 0.99);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Classifier (Gantree: L2_Classify → StateClassifier)
pub mod classifier;

/// Correlation heuristic (Gantree: L2_Classify → Correlation)
pub mod correlation;

// ============================================================================
// Re-exports
// ============================================================================

pub use classifier::{Classified, ClassifierConfig, StateClassifier};
pub use correlation::{correlation_edges, is_globally_entangled, pair_strength};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qviz_classify::prelude::*;
    //! ```

    pub use crate::classifier::{Classified, ClassifierConfig, StateClassifier};
    pub use crate::correlation::pair_strength;
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use qviz_core::{Classification, PresetState, SimulationResultBuilder};

    #[test]
    fn test_every_preset_yields_n_states() {
        let classifier = StateClassifier::default();
        for preset in PresetState::ALL {
            let result = preset.to_result().unwrap();
            let out = classifier.classify(&result);
            assert_eq!(out.states.len(), result.num_qubits, "{}", preset);
            let n = result.num_qubits;
            assert_eq!(out.edges.len(), n * (n - 1) / 2);
        }
    }

    #[test]
    fn test_edge_symmetry_all_pairs() {
        let result = SimulationResultBuilder::from_probabilities(vec![
            0.1, 0.2, 0.05, 0.15, 0.1, 0.1, 0.2, 0.1,
        ])
        .build()
        .unwrap();
        for a in 0..3 {
            for b in 0..3 {
                if a != b {
                    assert_eq!(
                        pair_strength(&result.basis_probabilities, a, b),
                        pair_strength(&result.basis_probabilities, b, a)
                    );
                }
            }
        }
    }

    #[test]
    fn test_x_gate_is_one_without_edges() {
        let out = StateClassifier::default().classify(&PresetState::XGate.to_result().unwrap());
        assert_eq!(out.states[0].classification, Classification::One);
        assert!(!out.entangled);
        assert!(out.edges.is_empty());
    }

    #[test]
    fn test_ghz_all_pairs_strong() {
        let out = StateClassifier::default().classify(&PresetState::Ghz.to_result().unwrap());
        assert_eq!(out.strong_edges(0.5).count(), 3);
    }

    #[test]
    fn test_custom_band() {
        let result = SimulationResultBuilder::from_probabilities(vec![0.54, 0.46])
            .build()
            .unwrap();
        let loose = StateClassifier::default().classify(&result);
        let tight = StateClassifier::new(ClassifierConfig {
            superposition_threshold: 0.01,
            ..ClassifierConfig::default()
        })
        .classify(&result);

        assert_eq!(loose.states[0].classification, Classification::Superposition);
        assert_eq!(tight.states[0].classification, Classification::Zero);
    }
}
