//! Visualization coordinator
//!
//! Gantree: L4_Engine → VisualizationCoordinator
//!
//! Owns one visualization session: qubit actors, their animation tasks, the
//! connection renderer and the camera. Each `present` runs as one transaction
//! over `&mut self`. The result is validated and classified before anything
//! is touched, so a rejected result leaves the session exactly as it was.

use crate::config::VisualizerConfig;
use crate::summary::{VisualizationSummary, EMPTY_SUMMARY};
use crate::worker::ClassifiedResult;
use qviz_anim::{
    ConnectionRenderer, Frame, FrameClock, QubitActor, QubitTasks, SyncReport,
};
use qviz_classify::{Classified, StateClassifier};
use qviz_core::{
    CameraPlacement, CorrelationEdge, Layout, Point3, QubitIndex, QubitVisualState, QvizError,
    QvizResult, SimulationResult, StyleRegistry,
};
use serde::{Deserialize, Serialize};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Nothing presented yet (or cleared)
    #[default]
    Empty,
    /// Showing a result
    Populated,
}

/// What one `present` changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentReport {
    /// Actors were destroyed and recreated
    pub rebuilt: bool,

    /// Qubit count now shown
    pub num_qubits: usize,

    /// Connection changes
    pub connections: SyncReport,
}

/// Session orchestrator
/// Gantree: VisualizationCoordinator // 시각화 조정자
#[derive(Debug)]
pub struct VisualizationCoordinator {
    config: VisualizerConfig,
    style: StyleRegistry,
    classifier: StateClassifier,
    state: SessionState,
    result: Option<SimulationResult>,
    classified: Option<Classified>,
    qubits: Vec<QubitActor>,
    qubit_tasks: QubitTasks,
    connections: ConnectionRenderer,
    camera: Option<CameraPlacement>,
    clock: FrameClock,
}

impl VisualizationCoordinator {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create coordinator with validated configuration
    pub fn new(config: VisualizerConfig) -> QvizResult<Self> {
        Self::with_style(config, StyleRegistry::default())
    }

    /// Create coordinator with a custom style registry
    pub fn with_style(config: VisualizerConfig, style: StyleRegistry) -> QvizResult<Self> {
        config.validate()?;
        Ok(Self::build(config, style))
    }

    fn build(config: VisualizerConfig, style: StyleRegistry) -> Self {
        Self {
            classifier: StateClassifier::new(config.to_classifier_config()),
            connections: ConnectionRenderer::new(config.to_connection_config()),
            config,
            style,
            state: SessionState::Empty,
            result: None,
            classified: None,
            qubits: Vec::new(),
            qubit_tasks: QubitTasks::new("qubit"),
            camera: None,
            clock: FrameClock::new(),
        }
    }

    // ========================================================================
    // Presentation
    // ========================================================================

    /// Show a new simulation result
    /// Gantree: present(result) -> Result<PresentReport> // 결과 표시
    ///
    /// 1. validate (unsuccessful or mis-shaped results fail with `InvalidResult`)
    /// 2. rebuild actors if the qubit count changed
    /// 3. push per-qubit states to the animators
    /// 4. sync connections between entangled, strongly correlated pairs
    /// 5. reframe the camera
    pub fn present(&mut self, result: SimulationResult) -> QvizResult<PresentReport> {
        let classified = self
            .classifier
            .classify_checked(&result)
            .map_err(Self::reject)?;
        self.apply(result, classified)
    }

    /// Decode a backend payload and show it
    ///
    /// Malformed JSON and a literal `null` both fail with `InvalidResult`.
    pub fn present_json(&mut self, json: &str) -> QvizResult<PresentReport> {
        let result = SimulationResult::from_json(json).map_err(Self::reject)?;
        self.present(result)
    }

    /// Show a result classified by `ClassificationWorker`
    pub fn apply_classified(&mut self, ready: ClassifiedResult) -> QvizResult<PresentReport> {
        let ClassifiedResult {
            result, classified, ..
        } = ready;
        if classified.num_qubits() != result.num_qubits {
            return Err(Self::reject(QvizError::InvalidResult(format!(
                "{} states for {} qubits",
                classified.num_qubits(),
                result.num_qubits
            ))));
        }
        self.apply(result, classified)
    }

    fn reject(err: QvizError) -> QvizError {
        log::warn!("rejected simulation result: {}", err);
        match err {
            QvizError::InvalidResult(_) => err,
            other => QvizError::InvalidResult(other.to_string()),
        }
    }

    fn apply(
        &mut self,
        result: SimulationResult,
        classified: Classified,
    ) -> QvizResult<PresentReport> {
        let num_qubits = result.num_qubits;
        let rebuilt = self.state == SessionState::Empty || self.qubits.len() != num_qubits;

        if rebuilt {
            let cancelled = self.teardown();
            self.spawn_actors(num_qubits);
            log::info!(
                "rebuilt session for {} qubits ({} tasks cancelled)",
                num_qubits,
                cancelled
            );
        }

        for state in &classified.states {
            if let Some(actor) = self.qubits.get_mut(state.qubit) {
                actor.set_visual_state(*state, &mut self.qubit_tasks, &self.style)?;
            }
        }

        let drawable = self.classifier.connectable_edges(&classified);
        let connections = self.connections.sync(&drawable, &self.qubits, &self.style)?;

        let positions: Vec<Point3<f64>> = self.qubits.iter().map(QubitActor::position).collect();
        self.camera = Some(Layout::camera_placement_with_margin(
            &positions,
            self.config.camera_margin,
        ));

        log::debug!(
            "presented {} (entangled={}, connections={})",
            result,
            classified.entangled,
            self.connections.len()
        );

        self.result = Some(result);
        self.classified = Some(classified);
        self.state = SessionState::Populated;

        Ok(PresentReport {
            rebuilt,
            num_qubits,
            connections,
        })
    }

    fn spawn_actors(&mut self, num_qubits: usize) {
        let animation = self.config.to_animation_config();
        self.qubits = Layout::positions(num_qubits, self.config.spacing)
            .into_iter()
            .enumerate()
            .map(|(i, p)| QubitActor::new(i, p, animation, &self.style, self.config.seed_for(i)))
            .collect();
    }

    /// Cancel every task and drop every actor
    fn teardown(&mut self) -> usize {
        let mut cancelled = self.connections.clear();
        cancelled += self.qubit_tasks.cancel_all(&mut self.qubits);
        for actor in self.qubits.drain(..) {
            actor.destroy(&mut self.qubit_tasks);
        }
        cancelled
    }

    /// Drop the session back to empty
    /// Gantree: clear() // 시각화 초기화
    pub fn clear(&mut self) {
        let cancelled = self.teardown();
        if self.state == SessionState::Populated {
            log::info!("cleared visualization ({} tasks cancelled)", cancelled);
        }
        self.state = SessionState::Empty;
        self.result = None;
        self.classified = None;
        self.camera = None;
        self.clock.reset();
    }

    // ========================================================================
    // Frame Loop
    // ========================================================================

    /// Advance one frame and poll every live task once
    /// Gantree: tick(dt) -> Frame // 프레임 진행
    pub fn tick(&mut self, dt: f64) -> Frame {
        let frame = self.clock.advance(dt);
        self.qubit_tasks.tick(&frame, &mut self.qubits);
        for actor in &mut self.qubits {
            actor.update_particles(frame.dt);
        }
        self.connections.tick(&frame);
        frame
    }

    /// Live animation tasks (qubit and connection)
    pub fn active_task_count(&self) -> usize {
        self.qubit_tasks.len() + self.connections.active_task_count()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Marginals for one qubit; `None` when out of range or empty
    /// Gantree: probabilities_for(q) -> Option<(p0,p1)> // 확률 조회
    pub fn probabilities_for(&self, qubit: QubitIndex) -> Option<(f64, f64)> {
        self.result.as_ref()?.probabilities_for(qubit)
    }

    /// Within the textual band (`label_threshold`, 0.01 by default)
    pub fn is_in_superposition(&self, qubit: QubitIndex) -> bool {
        self.is_in_superposition_within(qubit, self.config.label_threshold)
    }

    /// Within an explicit band; false when out of range
    pub fn is_in_superposition_within(&self, qubit: QubitIndex, threshold: f64) -> bool {
        self.probabilities_for(qubit)
            .map_or(false, |(p0, p1)| (p0 - p1).abs() < threshold)
    }

    /// Text summary for the host UI
    /// Gantree: visualization_summary() -> String // 요약
    pub fn visualization_summary(&self) -> String {
        self.summary()
            .map(|s| s.to_text())
            .unwrap_or_else(|| EMPTY_SUMMARY.to_string())
    }

    /// Structured summary
    pub fn summary(&self) -> Option<VisualizationSummary> {
        let result = self.result.as_ref()?;
        let classified = self.classified.as_ref()?;
        Some(VisualizationSummary::build(
            result,
            classified,
            self.config.label_threshold,
            self.config.correlation_threshold,
        ))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Shown result
    pub fn result(&self) -> Option<&SimulationResult> {
        self.result.as_ref()
    }

    /// Per-qubit states of the shown result
    pub fn visual_states(&self) -> &[QubitVisualState] {
        self.classified
            .as_ref()
            .map(|c| c.states.as_slice())
            .unwrap_or(&[])
    }

    /// Every pairwise edge of the shown result
    pub fn edges(&self) -> &[CorrelationEdge] {
        self.classified
            .as_ref()
            .map(|c| c.edges.as_slice())
            .unwrap_or(&[])
    }

    /// Qubit actors
    pub fn qubits(&self) -> &[QubitActor] {
        &self.qubits
    }

    /// One qubit actor
    pub fn qubit(&self, qubit: QubitIndex) -> Option<&QubitActor> {
        self.qubits.get(qubit)
    }

    /// Number of qubit actors
    pub fn qubit_count(&self) -> usize {
        self.qubits.len()
    }

    /// Connection renderer
    pub fn connections(&self) -> &ConnectionRenderer {
        &self.connections
    }

    /// Number of drawn connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Current camera
    pub fn camera(&self) -> Option<&CameraPlacement> {
        self.camera.as_ref()
    }

    /// Configuration
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Style registry
    pub fn style(&self) -> &StyleRegistry {
        &self.style
    }

    /// Seconds of animation since the session started
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }
}

impl Default for VisualizationCoordinator {
    fn default() -> Self {
        Self::build(VisualizerConfig::default(), StyleRegistry::default())
    }
}

impl Drop for VisualizationCoordinator {
    fn drop(&mut self) {
        self.teardown();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qviz_anim::AnimationMode;
    use qviz_core::{Classification, MarginalProbability, PresetState, SimulationResultBuilder};

    fn coordinator() -> VisualizationCoordinator {
        VisualizationCoordinator::new(VisualizerConfig::deterministic(42)).unwrap()
    }

    fn run(coord: &mut VisualizationCoordinator, frames: usize) {
        for _ in 0..frames {
            coord.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn test_starts_empty() {
        let coord = coordinator();
        assert_eq!(coord.state(), SessionState::Empty);
        assert_eq!(coord.qubit_count(), 0);
        assert_eq!(coord.active_task_count(), 0);
        assert!(coord.camera().is_none());
        assert_eq!(coord.visualization_summary(), "No visualization");
    }

    #[test]
    fn test_present_bell() {
        let mut coord = coordinator();
        let report = coord.present(PresetState::Bell.to_result().unwrap()).unwrap();

        assert!(report.rebuilt);
        assert_eq!(report.connections.created, 1);
        assert_eq!(coord.state(), SessionState::Populated);
        assert_eq!(coord.qubit_count(), 2);
        assert_eq!(coord.connection_count(), 1);
        assert_eq!(coord.active_task_count(), 3);
        for actor in coord.qubits() {
            assert_eq!(actor.mode(), AnimationMode::AnimatingSuperposition);
        }
        assert!(coord.camera().is_some());
    }

    #[test]
    fn test_invalid_result_keeps_previous() {
        let mut coord = coordinator();
        coord.present(PresetState::Bell.to_result().unwrap()).unwrap();
        let states_before = coord.visual_states().to_vec();
        let summary_before = coord.visualization_summary();

        let err = coord.present(SimulationResult::failed("boom")).unwrap_err();
        assert!(matches!(err, QvizError::InvalidResult(_)));

        assert_eq!(coord.qubit_count(), 2);
        assert_eq!(coord.visual_states(), states_before.as_slice());
        assert_eq!(coord.visualization_summary(), summary_before);
        assert_eq!(coord.active_task_count(), 3);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let mut coord = coordinator();
        coord.present(PresetState::XGate.to_result().unwrap()).unwrap();

        let bad = SimulationResult::from_parts(
            2,
            vec![0.5, 0.0, 0.0, 0.5],
            vec![MarginalProbability::new(0, 0.5, 0.5)],
        );
        let err = coord.present(bad).unwrap_err();

        assert!(matches!(err, QvizError::InvalidResult(_)));
        assert_eq!(coord.qubit_count(), 1);
        assert_eq!(coord.visual_states()[0].classification, Classification::One);
    }

    #[test]
    fn test_present_json_null_and_garbage() {
        let mut coord = coordinator();
        for payload in ["null", "{oops", r#"{"success": false, "error": "x"}"#] {
            let err = coord.present_json(payload).unwrap_err();
            assert!(matches!(err, QvizError::InvalidResult(_)), "{}", payload);
        }
        assert_eq!(coord.state(), SessionState::Empty);
    }

    #[test]
    fn test_present_json_ok() {
        let mut coord = coordinator();
        let json = PresetState::Ghz.to_result().unwrap().to_json().unwrap();
        coord.present_json(&json).unwrap();
        assert_eq!(coord.qubit_count(), 3);
        assert_eq!(coord.connection_count(), 3);
    }

    #[test]
    fn test_rebuild_leaks_no_tasks() {
        let mut coord = coordinator();
        coord.present(PresetState::Ghz.to_result().unwrap()).unwrap();
        assert_eq!(coord.active_task_count(), 6);
        run(&mut coord, 20);

        let report = coord.present(PresetState::XGate.to_result().unwrap()).unwrap();
        assert!(report.rebuilt);
        assert_eq!(coord.qubit_count(), 1);
        assert_eq!(coord.connection_count(), 0);
        assert_eq!(coord.active_task_count(), 1);

        run(&mut coord, 60);
        assert_eq!(coord.active_task_count(), 0);
        assert_eq!(coord.qubit(0).unwrap().mode(), AnimationMode::Idle);

        coord.present(PresetState::Bell.to_result().unwrap()).unwrap();
        assert_eq!(coord.active_task_count(), 3);
    }

    #[test]
    fn test_same_count_updates_in_place() {
        let mut coord = coordinator();
        coord.present(PresetState::Bell.to_result().unwrap()).unwrap();
        let report = coord.present(PresetState::Ground(2).to_result().unwrap()).unwrap();

        assert!(!report.rebuilt);
        assert_eq!(coord.qubit_count(), 2);
        for actor in coord.qubits() {
            assert_eq!(actor.mode(), AnimationMode::AnimatingDefinite);
        }
        assert_eq!(report.connections.removed, 1);
        assert_eq!(coord.connection_count(), 0);
        assert_eq!(coord.active_task_count(), 2);

        run(&mut coord, 60);
        assert_eq!(coord.active_task_count(), 0);
    }

    #[test]
    fn test_product_state_draws_no_connections() {
        let mut coord = coordinator();
        let report = coord.present(PresetState::Ground(3).to_result().unwrap()).unwrap();

        // every pair scores as correlated, none is entangled
        assert_eq!(coord.edges().iter().filter(|e| e.exceeds(0.5)).count(), 3);
        assert!(coord.visual_states().iter().all(|s| !s.entangled));
        assert_eq!(report.connections.created, 0);
        assert_eq!(coord.connection_count(), 0);
    }

    #[test]
    fn test_represent_same_superposition_is_continuous() {
        let mut coord = coordinator();
        let superposition = PresetState::Superposition.to_result().unwrap();
        coord.present(superposition.clone()).unwrap();
        run(&mut coord, 47);

        let before = *coord.qubit(0).unwrap().visual();
        let particles_before = coord.qubit(0).unwrap().emitter().live_count();
        assert!(particles_before > 0);

        let report = coord.present(superposition).unwrap();
        assert!(!report.rebuilt);
        run(&mut coord, 1);

        let actor = coord.qubit(0).unwrap();
        let max_step = actor.config().rest_scale
            * actor.config().pulse_amplitude
            * actor.config().pulse_speed
            / 60.0;
        assert!((actor.visual().scale - before.scale).abs() <= max_step + 1e-9);
        assert!(actor.emitter().live_count() >= particles_before);
        assert_eq!(coord.active_task_count(), 1);
    }

    #[test]
    fn test_long_frame_gap_bounds_particles() {
        let mut coord = coordinator();
        coord.present(PresetState::Superposition.to_result().unwrap()).unwrap();
        coord.tick(3600.0);

        let actor = coord.qubit(0).unwrap();
        let cap = (actor.config().particle_rate * actor.config().particle_lifetime_secs).ceil();
        assert!(actor.emitter().live_count() as f64 <= cap);
    }

    #[test]
    fn test_probabilities_for() {
        let mut coord = coordinator();
        assert_eq!(coord.probabilities_for(0), None);

        coord.present(PresetState::Bell.to_result().unwrap()).unwrap();
        let (p0, p1) = coord.probabilities_for(1).unwrap();
        assert_relative_eq!(p0, 0.5, epsilon = 1e-9);
        assert_relative_eq!(p1, 0.5, epsilon = 1e-9);
        assert_eq!(coord.probabilities_for(2), None);
        assert_eq!(coord.probabilities_for(usize::MAX), None);
    }

    #[test]
    fn test_two_superposition_bands() {
        let mut coord = coordinator();
        let tilted = SimulationResultBuilder::from_probabilities(vec![0.54, 0.46])
            .build()
            .unwrap();
        coord.present(tilted).unwrap();

        // animated as superposition (0.1 band) but not labelled (0.01 band)
        assert_eq!(
            coord.visual_states()[0].classification,
            Classification::Superposition
        );
        assert!(!coord.is_in_superposition(0));
        assert!(coord.is_in_superposition_within(0, 0.1));
        assert!(!coord.is_in_superposition(7));
    }

    #[test]
    fn test_camera_single_qubit() {
        let mut coord = coordinator();
        coord.present(PresetState::Superposition.to_result().unwrap()).unwrap();
        let camera = coord.camera().unwrap();
        assert_relative_eq!(camera.distance(), 5.0, epsilon = 1e-12);
        assert_eq!(camera.look_at, Point3::origin());
    }

    #[test]
    fn test_clear() {
        let mut coord = coordinator();
        coord.present(PresetState::Ghz.to_result().unwrap()).unwrap();
        run(&mut coord, 5);
        coord.clear();

        assert_eq!(coord.state(), SessionState::Empty);
        assert_eq!(coord.active_task_count(), 0);
        assert_eq!(coord.qubit_count(), 0);
        assert_eq!(coord.elapsed(), 0.0);
        assert_eq!(coord.visualization_summary(), EMPTY_SUMMARY);
    }

    #[test]
    fn test_summary_text() {
        let mut coord = coordinator();
        coord.present(PresetState::Bell.to_result().unwrap()).unwrap();
        let text = coord.visualization_summary();
        assert!(text.starts_with("Quantum State Visualization (2 qubits)"));
        assert!(text.contains("q0-q1"));
    }

    #[test]
    fn test_invalid_config() {
        let err = VisualizationCoordinator::new(VisualizerConfig::default().with_spacing(-1.0))
            .unwrap_err();
        assert!(matches!(err, QvizError::InvalidConfig(_)));
    }
}
