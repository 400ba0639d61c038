//! # QVIZ Engine
//!
//! Live visualization of statevector simulation results.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qviz_engine // L4: Engine
//!     VisualizerConfig // 통합 설정
//!         thresholds, layout, animation, connection, seed
//!         to_classifier_config(), to_animation_config(), to_connection_config()
//!     VisualizationCoordinator // 세션 조정
//!         present() - 검증 → 재구성 → 상태 전달 → 연결선 → 카메라
//!         tick() - 프레임 진행
//!         visualization_summary(), probabilities_for(), is_in_superposition()
//!     Summary // 텍스트/JSON 요약
//!     ClassificationWorker // 백그라운드 분류
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qviz_engine::prelude::*;
//! use qviz_core::PresetState;
//!
//! let mut viz = VisualizationCoordinator::new(VisualizerConfig::deterministic(42)).unwrap();
//! viz.present(PresetState::Bell.to_result().unwrap()).unwrap();
//!
//! for _ in 0..60 {
//!     viz.tick(1.0 / 60.0);
//! }
//!
//! assert_eq!(viz.connection_count(), 1);
//! println!("{}", viz.visualization_summary());
//! ```
//!
//! ## Background Classification
//!
//! ```rust
//! use qviz_engine::prelude::*;
//! use qviz_core::PresetState;
//! use std::time::Duration;
//!
//! let config = VisualizerConfig::default();
//! let mut worker = ClassificationWorker::spawn(config.to_classifier_config());
//! let mut viz = VisualizationCoordinator::new(config).unwrap();
//!
//! worker.submit(PresetState::Ghz.to_result().unwrap());
//! if let Some(WorkerResponse::Classified(ready)) = worker.recv_timeout(Duration::from_secs(5)) {
//!     viz.apply_classified(ready).unwrap();
//! }
//! assert_eq!(viz.qubit_count(), 3);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Configuration (Gantree: L4_Engine → VisualizerConfig)
pub mod config;

/// Coordinator (Gantree: L4_Engine → VisualizationCoordinator)
pub mod coordinator;

/// Summary rendering (Gantree: L4_Engine → Summary)
pub mod summary;

/// Background worker (Gantree: L4_Engine → ClassificationWorker)
pub mod worker;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::VisualizerConfig;
pub use coordinator::{PresentReport, SessionState, VisualizationCoordinator};
pub use summary::{QubitSummary, SummaryFormat, VisualizationSummary, EMPTY_SUMMARY};
pub use worker::{ClassificationWorker, ClassifiedResult, WorkerRequest, WorkerResponse};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qviz_engine::prelude::*;
    //! ```

    pub use crate::config::VisualizerConfig;
    pub use crate::coordinator::{PresentReport, SessionState, VisualizationCoordinator};
    pub use crate::summary::{SummaryFormat, VisualizationSummary};
    pub use crate::worker::{ClassificationWorker, ClassifiedResult, WorkerResponse};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Integration Tests
// ============================================================================
