//! # QVIZ Core
//!
//! Simulation result snapshots, layout, style and error types for the QVIZ
//! statevector visualizer.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qviz_core // L0+L1: Foundation + Result + Scene
//!     L0_Foundation // 기반 타입/상수/에러
//!         CoreTypes // SimulationResult, QubitVisualState, CorrelationEdge
//!         Constants // 임계값/배치/애니메이션 상수
//!         Errors // 에러 타입
//!     L1_Result // 결과 구성
//!         SimulationResultBuilder // 빌더 패턴
//!         BackendResponse // JSON 디코딩
//!         Presets // 기준 상태
//!     L1_Scene // 장면
//!         Layout // 큐비트 배치 + 카메라
//!         StyleRegistry // 색상 테이블
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qviz_core::prelude::*;
//!
//! let bell = PresetState::Bell.to_result().unwrap();
//! assert_eq!(bell.num_qubits, 2);
//! assert_eq!(bell.probabilities_for(0).map(|(p0, _)| (p0 * 10.0).round()), Some(5.0));
//!
//! let positions = Layout::positions(bell.num_qubits, 3.0);
//! let camera = Layout::camera_placement(&positions);
//! println!("eye at {:?}", camera.eye);
//! ```
//!
//! ## Decoding a Backend Payload
//!
//! ```rust
//! use qviz_core::prelude::*;
//!
//! let json = r#"{"success": true, "statevector": [[0.0, 0.0], [1.0, 0.0]]}"#;
//! let result = SimulationResult::from_json(json).unwrap();
//! assert!(result.validate().is_ok());
//! assert_eq!(result.probabilities_for(0), Some((0.0, 1.0)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Result builder (Gantree: L1_Result → SimulationResultBuilder)
pub mod builder;

/// Backend payload decoding (Gantree: L1_Result → BackendResponse)
pub mod response;

/// Reference states (Gantree: L1_Result → Presets)
pub mod presets;

/// Qubit layout (Gantree: L1_Scene → Layout)
pub mod layout;

/// Colour table (Gantree: L1_Scene → StyleRegistry)
pub mod style;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::{marginals_from_probabilities, SimulationResultBuilder};
pub use constants::{animation, connection, layout as layout_constants, thresholds};
pub use error::{QvizError, QvizResult};
pub use layout::{Bounds, CameraPlacement, Layout};
pub use presets::{PresetState, MAX_GROUND_QUBITS};
pub use response::BackendResponse;
pub use style::{MaterialKind, Rgba, StyleRegistry};
pub use types::{
    Classification, CorrelationEdge, MarginalProbability, QubitIndex, QubitPair,
    QubitVisualState, SimulationResult,
};

/// Vector math types used across the workspace
pub use nalgebra::{Point3, Vector3};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qviz_core::prelude::*;
    //! ```

    pub use crate::builder::SimulationResultBuilder;
    pub use crate::constants::thresholds;
    pub use crate::error::{QvizError, QvizResult};
    pub use crate::layout::{CameraPlacement, Layout};
    pub use crate::presets::PresetState;
    pub use crate::style::{MaterialKind, Rgba, StyleRegistry};
    pub use crate::types::{
        Classification, CorrelationEdge, MarginalProbability, QubitIndex, QubitVisualState,
        SimulationResult,
    };
    pub use nalgebra::{Point3, Vector3};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_preset_json_roundtrip_validates() {
        for preset in PresetState::ALL {
            let result = preset.to_result().unwrap();
            let decoded = SimulationResult::from_json(&result.to_json().unwrap()).unwrap();
            assert!(decoded.validate().is_ok(), "{}", preset);
            assert_eq!(decoded.num_qubits, result.num_qubits);
        }
    }

    #[test]
    fn test_layout_for_every_preset() {
        for preset in PresetState::ALL {
            let result = preset.to_result().unwrap();
            let positions = Layout::positions(result.num_qubits, 3.0);
            assert_eq!(positions.len(), result.num_qubits);
            let camera = Layout::camera_placement(&positions);
            assert!(camera.distance() >= 5.0);
        }
    }

    #[test]
    fn test_failed_payload_is_invalid() {
        let json = r#"{"success": false, "error": "Simulation error: boom", "traceback": "..."}"#;
        let result = SimulationResult::from_json(json).unwrap();
        let err = result.validate().unwrap_err();
        assert!(err.is_invalid_result());
        assert!(err.to_string().contains("boom"));
    }
}
