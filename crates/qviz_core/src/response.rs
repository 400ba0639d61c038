//! Backend response decoding for QVIZ
//!
//! Gantree: L1_Result → BackendResponse
//!
//! JSON payload produced by the simulation backend's `/simulate` endpoint.
//! Only decoding lives here; transport belongs to the host application.

use crate::builder::SimulationResultBuilder;
use crate::error::{QvizError, QvizResult};
use crate::types::{MarginalProbability, SimulationResult};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Raw backend payload
/// Gantree: BackendResponse // 백엔드 응답
///
/// ```json
/// {
///   "success": true,
///   "statevector": [[0.7071, 0.0], [0.0, 0.0], [0.0, 0.0], [0.7071, 0.0]],
///   "num_qubits": 2,
///   "probabilities": [0.5, 0.0, 0.0, 0.5],
///   "marginal_probabilities": [{"qubit": 0, "prob_0": 0.5, "prob_1": 0.5}, ...],
///   "circuit_depth": 2,
///   "circuit_size": 2
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendResponse {
    /// Success flag
    #[serde(default)]
    pub success: bool,

    /// Amplitudes as [real, imag] pairs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statevector: Option<Vec<[f64; 2]>>,

    /// Qubit count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_qubits: Option<usize>,

    /// Basis-state probabilities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<Vec<f64>>,

    /// Per-qubit marginals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marginal_probabilities: Option<Vec<MarginalProbability>>,

    /// Circuit depth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_depth: Option<usize>,

    /// Circuit gate count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_size: Option<usize>,

    /// Error message on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Backend traceback on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
}

impl BackendResponse {
    /// Convert into a result snapshot
    /// Gantree: into_result(self) -> Result<SimulationResult> // 변환
    ///
    /// A failed response becomes a failed `SimulationResult`; normalisation is
    /// checked later by `SimulationResult::validate`.
    pub fn into_result(self) -> QvizResult<SimulationResult> {
        if !self.success {
            return Ok(SimulationResult::failed(
                self.error
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            ));
        }

        let amplitudes = self.statevector.map(|sv| {
            sv.into_iter()
                .map(|[re, im]| Complex64::new(re, im))
                .collect::<Vec<_>>()
        });

        let mut builder = match (amplitudes, self.probabilities) {
            (Some(amps), Some(probs)) => {
                SimulationResultBuilder::from_amplitudes(amps).probabilities(probs)
            }
            (Some(amps), None) => SimulationResultBuilder::from_amplitudes(amps),
            (None, Some(probs)) => SimulationResultBuilder::from_probabilities(probs),
            (None, None) => {
                return Err(QvizError::InvalidResult(
                    "response has neither statevector nor probabilities".into(),
                ))
            }
        };

        if let Some(n) = self.num_qubits {
            builder = builder.num_qubits(n);
        }
        if let Some(marginals) = self.marginal_probabilities {
            builder = builder.marginals(marginals);
        }
        if let Some(depth) = self.circuit_depth {
            builder = builder.circuit_depth(depth);
        }
        if let Some(size) = self.circuit_size {
            builder = builder.circuit_size(size);
        }

        builder.build_unchecked()
    }
}

impl From<&SimulationResult> for BackendResponse {
    fn from(result: &SimulationResult) -> Self {
        Self {
            success: result.success,
            statevector: result
                .amplitudes
                .as_ref()
                .map(|amps| amps.iter().map(|a| [a.re, a.im]).collect()),
            num_qubits: Some(result.num_qubits),
            probabilities: Some(result.basis_probabilities.clone()),
            marginal_probabilities: Some(result.marginal_probabilities.clone()),
            circuit_depth: result.circuit_depth,
            circuit_size: result.circuit_size,
            error: result.error.clone(),
            traceback: None,
        }
    }
}

impl SimulationResult {
    /// Decode a backend JSON payload
    /// Gantree: from_json(&str) -> Result<Self> // JSON 파싱
    ///
    /// A literal `null` payload is an invalid result.
    pub fn from_json(json: &str) -> QvizResult<Self> {
        let response: Option<BackendResponse> = serde_json::from_str(json)?;
        response
            .ok_or_else(|| QvizError::InvalidResult("empty response".into()))?
            .into_result()
    }

    /// Encode in the backend payload format
    pub fn to_json(&self) -> QvizResult<String> {
        Ok(serde_json::to_string(&BackendResponse::from(self))?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BELL_JSON: &str = r#"{
        "success": true,
        "statevector": [[0.7071067811865476, 0.0], [0.0, 0.0], [0.0, 0.0], [0.7071067811865476, 0.0]],
        "num_qubits": 2,
        "probabilities": [0.5000000000000001, 0.0, 0.0, 0.5000000000000001],
        "marginal_probabilities": [
            {"qubit": 0, "prob_0": 0.5, "prob_1": 0.5},
            {"qubit": 1, "prob_0": 0.5, "prob_1": 0.5}
        ],
        "circuit_depth": 2,
        "circuit_size": 2
    }"#;

    #[test]
    fn test_decode_bell() {
        let r = SimulationResult::from_json(BELL_JSON).unwrap();
        assert!(r.success);
        assert_eq!(r.num_qubits, 2);
        assert_eq!(r.amplitudes.as_ref().map(|a| a.len()), Some(4));
        assert_eq!(r.circuit_size, Some(2));
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_decode_failure() {
        let json = r#"{"success": false, "error": "Missing qiskit_code parameter"}"#;
        let r = SimulationResult::from_json(json).unwrap();
        assert!(!r.success);
        assert_eq!(r.error.as_deref(), Some("Missing qiskit_code parameter"));
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_decode_null() {
        let err = SimulationResult::from_json("null").unwrap_err();
        assert!(matches!(err, QvizError::InvalidResult(_)));
    }

    #[test]
    fn test_decode_garbage() {
        let err = SimulationResult::from_json("{not json").unwrap_err();
        assert!(matches!(err, QvizError::JsonError(_)));
    }

    #[test]
    fn test_marginals_derived_when_missing() {
        let json = r#"{"success": true, "statevector": [[0.0, 0.0], [1.0, 0.0]]}"#;
        let r = SimulationResult::from_json(json).unwrap();
        assert_eq!(r.num_qubits, 1);
        assert_eq!(r.probabilities_for(0), Some((0.0, 1.0)));
    }

    #[test]
    fn test_no_data() {
        let json = r#"{"success": true, "num_qubits": 1}"#;
        assert!(SimulationResult::from_json(json).is_err());
    }

    #[test]
    fn test_encode_decode_preserves_marginals() {
        let r = SimulationResult::from_json(BELL_JSON).unwrap();
        let again = SimulationResult::from_json(&r.to_json().unwrap()).unwrap();
        assert_eq!(r.marginal_probabilities, again.marginal_probabilities);
    }
}
