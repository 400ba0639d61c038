//! Qubit animator
//!
//! Gantree: L3_Anim → QubitAnimator
//!
//! One long-lived actor per qubit: body, indicator dot and particle emitter.
//! Its motion is driven by at most one task in a shared `QubitTasks`
//! scheduler. `set_visual_state` always cancels the running task before the
//! next one starts. The pulse phase and particles live on the actor, so a
//! restarted loop picks up where the previous one left off.

use crate::clock::Frame;
use crate::easing::{lerp, Easing, Tween};
use crate::particles::{random_direction, ParticleEmitter};
use crate::scheduler::{AnimationTask, Scheduler, TaskId, TaskStatus};
use nalgebra::{Point3, Vector3};
use qviz_core::animation::{
    DEFINITE_SETTLE_SECS, ENTANGLED_PULSE_AMPLITUDE, ENTANGLED_PULSE_SPEED,
    ENTANGLED_ROTATION_SPEED_DEG, PARTICLE_LIFETIME_SECS, PARTICLE_RATE, PULSE_AMPLITUDE,
    PULSE_SPEED, REST_SCALE, ROTATION_SPEED_DEG, SPHERE_RADIUS, SUPERPOSITION_MOVE_SECS,
};
use qviz_core::{
    Classification, MaterialKind, QubitIndex, QubitVisualState, QvizResult, Rgba, StyleRegistry,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Particle drift speed in units per second
const PARTICLE_SPEED: f64 = 0.4;

/// Scheduler type for qubit tasks
pub type QubitTasks = Scheduler<QubitIndex, QubitActor>;

// ============================================================================
// Configuration
// ============================================================================

/// Animation timing and shape parameters
/// Gantree: AnimationConfig // 애니메이션 설정
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Seconds per random dot move in superposition
    pub superposition_move_secs: f64,

    /// Seconds to settle at a pole
    pub definite_settle_secs: f64,

    /// Superposition pulse angular speed
    pub pulse_speed: f64,

    /// Superposition pulse relative amplitude
    pub pulse_amplitude: f64,

    /// Entangled pulse angular speed
    pub entangled_pulse_speed: f64,

    /// Entangled pulse relative amplitude
    pub entangled_pulse_amplitude: f64,

    /// Body rotation in superposition (deg/s)
    pub rotation_speed_deg: f64,

    /// Body rotation when entangled (deg/s)
    pub entangled_rotation_speed_deg: f64,

    /// Static body scale
    pub rest_scale: f64,

    /// Dot orbit radius
    pub sphere_radius: f64,

    /// Particles per second while in superposition
    pub particle_rate: f64,

    /// Particle lifetime in seconds
    pub particle_lifetime_secs: f64,

    /// Emit particles at all
    pub particles_enabled: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            superposition_move_secs: SUPERPOSITION_MOVE_SECS,
            definite_settle_secs: DEFINITE_SETTLE_SECS,
            pulse_speed: PULSE_SPEED,
            pulse_amplitude: PULSE_AMPLITUDE,
            entangled_pulse_speed: ENTANGLED_PULSE_SPEED,
            entangled_pulse_amplitude: ENTANGLED_PULSE_AMPLITUDE,
            rotation_speed_deg: ROTATION_SPEED_DEG,
            entangled_rotation_speed_deg: ENTANGLED_ROTATION_SPEED_DEG,
            rest_scale: REST_SCALE,
            sphere_radius: SPHERE_RADIUS,
            particle_rate: PARTICLE_RATE,
            particle_lifetime_secs: PARTICLE_LIFETIME_SECS,
            particles_enabled: true,
        }
    }
}

impl AnimationConfig {
    /// Dot offset for a definite class (north for |0⟩, south for |1⟩)
    pub fn pole_for(&self, classification: Classification) -> Vector3<f64> {
        match classification {
            Classification::One => Vector3::new(0.0, -self.sphere_radius, 0.0),
            _ => Vector3::new(0.0, self.sphere_radius, 0.0),
        }
    }
}

// ============================================================================
// Actor
// ============================================================================

/// Animator state
/// Gantree: AnimationMode // 애니메이션 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationMode {
    /// No task running
    #[default]
    Idle,
    /// Random dot motion with pulse and particles
    AnimatingSuperposition,
    /// Settling at (or pulsing on) a pole
    AnimatingDefinite,
}

impl fmt::Display for AnimationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationMode::Idle => write!(f, "idle"),
            AnimationMode::AnimatingSuperposition => write!(f, "superposition"),
            AnimationMode::AnimatingDefinite => write!(f, "definite"),
        }
    }
}

/// Renderable state of one actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QubitVisual {
    /// Indicator dot relative to the body centre
    pub dot_offset: Vector3<f64>,

    /// Uniform body scale
    pub scale: f64,

    /// Body rotation about the vertical axis, degrees in [0, 360)
    pub rotation_deg: f64,

    /// Body material
    pub material: MaterialKind,

    /// Body colour
    pub color: Rgba,

    /// Indicator dot colour
    pub dot_color: Rgba,

    /// Particle colour
    pub particle_color: Rgba,
}

/// Visual entity for one qubit
/// Gantree: QubitActor // 큐비트 액터
#[derive(Debug)]
pub struct QubitActor {
    index: QubitIndex,
    position: Point3<f64>,
    state: Option<QubitVisualState>,
    mode: AnimationMode,
    visual: QubitVisual,
    emitter: ParticleEmitter,
    pulse_phase: f64,
    rng: StdRng,
    config: AnimationConfig,
}

impl QubitActor {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an idle actor at the |0⟩ pole
    /// Gantree: new(index,position,config,style,seed) -> QubitActor // 액터 생성
    ///
    /// `seed` fixes the random dot path; `None` seeds from entropy.
    pub fn new(
        index: QubitIndex,
        position: Point3<f64>,
        config: AnimationConfig,
        style: &StyleRegistry,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            index,
            position,
            state: None,
            mode: AnimationMode::Idle,
            visual: QubitVisual {
                dot_offset: config.pole_for(Classification::Zero),
                scale: config.rest_scale,
                rotation_deg: 0.0,
                material: MaterialKind::Zero,
                color: style.color_of(MaterialKind::Zero),
                dot_color: style.dot,
                particle_color: style.particle,
            },
            emitter: ParticleEmitter::new(
                config.particle_rate,
                config.particle_lifetime_secs,
                PARTICLE_SPEED,
            ),
            pulse_phase: 0.0,
            rng,
            config,
        }
    }

    // ========================================================================
    // State Transitions
    // ========================================================================

    /// Apply a new visual state
    /// Gantree: set_visual_state(state,tasks,style) -> Result<TaskId> // 상태 전환
    ///
    /// Cancels the running task, picks the material, then starts either the
    /// superposition loop or the pole settle.
    pub fn set_visual_state(
        &mut self,
        state: QubitVisualState,
        tasks: &mut QubitTasks,
        style: &StyleRegistry,
    ) -> QvizResult<TaskId> {
        let index = self.index;
        let was_superposition = self.mode == AnimationMode::AnimatingSuperposition;
        tasks.cancel(&index, self);

        self.state = Some(state);
        self.visual.material = MaterialKind::select(&state);
        self.visual.color = style.color_of(self.visual.material);

        if state.is_superposition() {
            if !was_superposition {
                self.pulse_phase = 0.0;
            }
            self.mode = AnimationMode::AnimatingSuperposition;
            if self.config.particles_enabled {
                self.emitter.play();
            }
            tasks.spawn(index, Box::new(SuperpositionLoop::new()))
        } else {
            self.mode = AnimationMode::AnimatingDefinite;
            let target = self.config.pole_for(state.classification);
            let settle = DefiniteSettle::new(self, target, state.entangled);
            tasks.spawn(index, Box::new(settle))
        }
    }

    /// Cancel the running task and release the actor
    /// Gantree: destroy(tasks) // 액터 제거
    pub fn destroy(mut self, tasks: &mut QubitTasks) {
        let index = self.index;
        tasks.cancel(&index, &mut self);
        self.emitter.clear();
    }

    /// Age particles and emit new ones; runs every frame, task or not
    /// Gantree: update_particles(dt) // 파티클 진행
    pub fn update_particles(&mut self, dt: f64) {
        self.emitter.update(dt, &mut self.rng);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Qubit index
    pub fn index(&self) -> QubitIndex {
        self.index
    }

    /// World position of the body
    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// World position of the indicator dot
    pub fn dot_position(&self) -> Point3<f64> {
        self.position + self.visual.dot_offset
    }

    /// Last applied state
    pub fn state(&self) -> Option<&QubitVisualState> {
        self.state.as_ref()
    }

    /// Animator state
    pub fn mode(&self) -> AnimationMode {
        self.mode
    }

    /// Renderable state
    pub fn visual(&self) -> &QubitVisual {
        &self.visual
    }

    /// Particle emitter
    pub fn emitter(&self) -> &ParticleEmitter {
        &self.emitter
    }

    /// Animation parameters
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    fn advance_rotation(&mut self, deg_per_sec: f64, dt: f64) {
        self.visual.rotation_deg = (self.visual.rotation_deg + deg_per_sec * dt).rem_euclid(360.0);
    }
}

// ============================================================================
// Tasks
// ============================================================================

/// Random dot motion, body pulse and particles while in superposition
/// Gantree: SuperpositionLoop // 중첩 루프
#[derive(Debug, Default)]
pub struct SuperpositionLoop {
    tween: Option<Tween>,
    moves: u64,
}

impl SuperpositionLoop {
    /// Fresh loop; the first target is drawn on the first poll
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnimationTask<QubitActor> for SuperpositionLoop {
    fn name(&self) -> &'static str {
        "superposition"
    }

    fn poll(&mut self, actor: &mut QubitActor, frame: &Frame) -> TaskStatus {
        let cfg = actor.config;
        actor.pulse_phase += frame.dt;

        let needs_target = self.tween.as_ref().map_or(true, Tween::is_finished);
        if needs_target {
            let target = random_direction(&mut actor.rng) * cfg.sphere_radius;
            self.tween = Some(Tween::new(
                actor.visual.dot_offset,
                target,
                cfg.superposition_move_secs,
                Easing::Linear,
            ));
            self.moves += 1;
        }
        if let Some(tween) = self.tween.as_mut() {
            actor.visual.dot_offset = tween.advance(frame.dt);
        }

        let pulse = (actor.pulse_phase * cfg.pulse_speed).sin();
        actor.visual.scale = cfg.rest_scale * (1.0 + cfg.pulse_amplitude * pulse);
        actor.advance_rotation(cfg.rotation_speed_deg, frame.dt);

        TaskStatus::Running
    }

    fn stop(&mut self, actor: &mut QubitActor) {
        actor.emitter.stop();
        actor.mode = AnimationMode::Idle;
    }
}

/// Eased move to a pole, then rest or an entangled idle pulse
/// Gantree: DefiniteSettle // 확정 상태 정착
#[derive(Debug)]
pub struct DefiniteSettle {
    tween: Tween,
    start_scale: f64,
    entangled: bool,
    pulse_elapsed: f64,
}

impl DefiniteSettle {
    /// Settle from the actor's current dot and scale toward `target`
    pub fn new(actor: &QubitActor, target: Vector3<f64>, entangled: bool) -> Self {
        Self {
            tween: Tween::new(
                actor.visual.dot_offset,
                target,
                actor.config.definite_settle_secs,
                Easing::SmoothStep,
            ),
            start_scale: actor.visual.scale,
            entangled,
            pulse_elapsed: 0.0,
        }
    }
}

impl AnimationTask<QubitActor> for DefiniteSettle {
    fn name(&self) -> &'static str {
        if self.entangled {
            "definite-entangled"
        } else {
            "definite"
        }
    }

    fn poll(&mut self, actor: &mut QubitActor, frame: &Frame) -> TaskStatus {
        let cfg = actor.config;

        if !self.tween.is_finished() {
            actor.visual.dot_offset = self.tween.advance(frame.dt);
            actor.visual.scale = lerp(self.start_scale, cfg.rest_scale, self.tween.eased());
            if !self.tween.is_finished() {
                return TaskStatus::Running;
            }
        } else {
            // pulse phase starts at rest scale on the frame the settle completes
            self.pulse_elapsed += frame.dt;
        }

        if !self.entangled {
            actor.visual.scale = cfg.rest_scale;
            return TaskStatus::Finished;
        }

        actor.visual.scale = cfg.rest_scale
            * (1.0
                + cfg.entangled_pulse_amplitude
                    * (self.pulse_elapsed * cfg.entangled_pulse_speed).sin());
        actor.advance_rotation(cfg.entangled_rotation_speed_deg, frame.dt);
        TaskStatus::Running
    }

    fn stop(&mut self, actor: &mut QubitActor) {
        actor.mode = AnimationMode::Idle;
    }
}

// ============================================================================
// Tests
// ============================================================================
