//! Visualization summary
//!
//! Gantree: L4_Engine → Summary
//!
//! Human-readable and JSON renderings of the current session for the host UI.

use qviz_classify::Classified;
use qviz_core::{Classification, CorrelationEdge, QubitIndex, SimulationResult};
use serde::{Deserialize, Serialize};

/// Text shown when no result has been presented
pub const EMPTY_SUMMARY: &str = "No visualization";

/// Summary format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryFormat {
    /// Plain text
    #[default]
    Text,
    /// JSON
    Json,
}

/// One qubit line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QubitSummary {
    /// Qubit index
    pub qubit: QubitIndex,

    /// P(0)
    pub prob_0: f64,

    /// P(1)
    pub prob_1: f64,

    /// Visual class
    pub classification: Classification,

    /// Within the textual superposition band
    pub in_superposition: bool,

    /// Global entangled flag
    pub entangled: bool,
}

/// Snapshot of a presented result
/// Gantree: VisualizationSummary // 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationSummary {
    /// Qubit count
    pub num_qubits: usize,

    /// Per-qubit lines
    pub qubits: Vec<QubitSummary>,

    /// Pairs above the correlation threshold
    pub correlated_pairs: Vec<CorrelationEdge>,

    /// Circuit depth if reported
    pub circuit_depth: Option<usize>,

    /// Circuit size if reported
    pub circuit_size: Option<usize>,
}

impl VisualizationSummary {
    /// Collect summary values
    /// Gantree: build(result,classified,label,corr) -> VisualizationSummary // 요약 생성
    pub fn build(
        result: &SimulationResult,
        classified: &Classified,
        label_threshold: f64,
        correlation_threshold: f64,
    ) -> Self {
        let qubits = classified
            .states
            .iter()
            .map(|s| QubitSummary {
                qubit: s.qubit,
                prob_0: s.prob_0,
                prob_1: s.prob_1,
                classification: s.classification,
                in_superposition: s.is_in_superposition(label_threshold),
                entangled: s.entangled,
            })
            .collect();

        Self {
            num_qubits: result.num_qubits,
            qubits,
            correlated_pairs: classified
                .strong_edges(correlation_threshold)
                .copied()
                .collect(),
            circuit_depth: result.circuit_depth,
            circuit_size: result.circuit_size,
        }
    }

    /// Render in a format
    pub fn render(&self, format: SummaryFormat) -> String {
        match format {
            SummaryFormat::Text => self.to_text(),
            SummaryFormat::Json => self.to_json(),
        }
    }

    /// Plain text rendering
    ///
    /// ```text
    /// Quantum State Visualization (2 qubits)
    /// Qubit 0: |0⟩ 0.500, |1⟩ 0.500 - superposition (in superposition) [entangled]
    /// Qubit 1: |0⟩ 0.500, |1⟩ 0.500 - superposition (in superposition) [entangled]
    /// Correlated pairs:
    ///   q0-q1 (1.00)
    /// ```
    pub fn to_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.qubits.len() + 4);

        let noun = if self.num_qubits == 1 { "qubit" } else { "qubits" };
        lines.push(format!(
            "Quantum State Visualization ({} {})",
            self.num_qubits, noun
        ));

        if let (Some(depth), Some(size)) = (self.circuit_depth, self.circuit_size) {
            lines.push(format!("Circuit: depth {}, size {}", depth, size));
        }

        for q in &self.qubits {
            let mut line = format!(
                "Qubit {}: |0⟩ {:.3}, |1⟩ {:.3} - {}",
                q.qubit, q.prob_0, q.prob_1, q.classification
            );
            if q.in_superposition {
                line.push_str(" (in superposition)");
            }
            if q.entangled {
                line.push_str(" [entangled]");
            }
            lines.push(line);
        }

        if !self.correlated_pairs.is_empty() {
            lines.push("Correlated pairs:".to_string());
            for edge in &self.correlated_pairs {
                lines.push(format!("  {}", edge));
            }
        }

        lines.join("\n")
    }

    /// JSON rendering
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
