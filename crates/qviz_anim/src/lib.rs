//! # QVIZ Anim
//!
//! Frame-driven animation layer: a cooperative scheduler of resumable tasks,
//! per-qubit animators and the connection renderer.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qviz_anim // L3: Anim
//!     FrameClock // 프레임 시계
//!     Easing // smoothstep, Tween
//!     Scheduler // 소유자당 태스크 1개, 매 프레임 poll
//!         spawn() - 충돌 시 AnimationTaskConflict
//!         cancel() - stop 훅 실행
//!         tick() - 완료/고아 태스크 제거
//!     ParticleEmitter // 파티클
//!     QubitAnimator // Idle / AnimatingSuperposition / AnimatingDefinite
//!         SuperpositionLoop - 무작위 점 이동 + 펄스 + 파티클
//!         DefiniteSettle - 극점 정착 (+ 얽힘 펄스)
//!     ConnectionRenderer // 상관 연결선
//!         sync() - 멱등 동기화
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qviz_anim::prelude::*;
//! use qviz_core::{Classification, Point3, QubitVisualState, StyleRegistry};
//!
//! let style = StyleRegistry::default();
//! let mut actors = vec![QubitActor::new(0, Point3::origin(), AnimationConfig::default(), &style, Some(1))];
//! let mut tasks = QubitTasks::new("qubit");
//! let mut clock = FrameClock::new();
//!
//! let state = QubitVisualState {
//!     qubit: 0,
//!     classification: Classification::Superposition,
//!     entangled: false,
//!     prob_0: 0.5,
//!     prob_1: 0.5,
//! };
//! actors[0].set_visual_state(state, &mut tasks, &style).unwrap();
//!
//! for _ in 0..60 {
//!     let frame = clock.advance(1.0 / 60.0);
//!     tasks.tick(&frame, &mut actors);
//!     for actor in actors.iter_mut() {
//!         actor.update_particles(frame.dt);
//!     }
//! }
//! assert_eq!(actors[0].mode(), AnimationMode::AnimatingSuperposition);
//! assert!(actors[0].emitter().live_count() > 0);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Frame clock (Gantree: L3_Anim → FrameClock)
pub mod clock;

/// Easing curves (Gantree: L3_Anim → Easing)
pub mod easing;

/// Cooperative scheduler (Gantree: L3_Anim → Scheduler)
pub mod scheduler;

/// Particle emitter (Gantree: L3_Anim → ParticleEmitter)
pub mod particles;

/// Qubit animator (Gantree: L3_Anim → QubitAnimator)
pub mod qubit;

/// Connection renderer (Gantree: L3_Anim → ConnectionRenderer)
pub mod connection;

// ============================================================================
// Re-exports
// ============================================================================

pub use clock::{Frame, FrameClock};
pub use connection::{ConnectionActor, ConnectionConfig, ConnectionRenderer, SyncReport};
pub use easing::{smoothstep, Easing, Tween};
pub use particles::{Particle, ParticleEmitter};
pub use qubit::{AnimationConfig, AnimationMode, QubitActor, QubitTasks, QubitVisual};
pub use scheduler::{AnimationTask, Scheduler, TargetStore, TaskId, TaskStatus};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qviz_anim::prelude::*;
    //! ```

    pub use crate::clock::{Frame, FrameClock};
    pub use crate::connection::{ConnectionConfig, ConnectionRenderer};
    pub use crate::qubit::{AnimationConfig, AnimationMode, QubitActor, QubitTasks};
    pub use crate::scheduler::{AnimationTask, Scheduler, TaskStatus};
}

// ============================================================================
// Integration Tests
// ============================================================================
