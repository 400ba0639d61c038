//! Connection renderer
//!
//! Gantree: L3_Anim → ConnectionRenderer
//!
//! Keeps exactly one pulsing line per qubit pair whose correlation strength
//! is above the threshold. `sync` is idempotent: repeating it with the same
//! edges creates nothing and spawns nothing.

use crate::clock::Frame;
use crate::qubit::QubitActor;
use crate::scheduler::{AnimationTask, Scheduler, TaskStatus};
use nalgebra::Point3;
use qviz_core::connection::{BASE_WIDTH, PULSE_AMPLITUDE, PULSE_SPEED};
use qviz_core::thresholds::CORRELATION_EDGE;
use qviz_core::{CorrelationEdge, QubitPair, QvizResult, Rgba, StyleRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Connection line parameters
/// Gantree: ConnectionConfig // 연결선 설정
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Resting line width
    pub base_width: f64,

    /// Width swing at strength 1
    pub pulse_amplitude: f64,

    /// Pulse angular speed
    pub pulse_speed: f64,

    /// Strength a pair must exceed to be drawn
    pub threshold: f64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_width: BASE_WIDTH,
            pulse_amplitude: PULSE_AMPLITUDE,
            pulse_speed: PULSE_SPEED,
            threshold: CORRELATION_EDGE,
        }
    }
}

/// Line between two correlated qubits
/// Gantree: ConnectionActor // 연결선 액터
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionActor {
    /// Unordered pair (low, high)
    pub pair: QubitPair,

    /// Correlation strength in [0, 1]
    pub strength: f64,

    /// Endpoint at the lower qubit
    pub start: Point3<f64>,

    /// Endpoint at the higher qubit
    pub end: Point3<f64>,

    /// Line colour
    pub color: Rgba,

    /// Current line width
    pub width: f64,
}

/// Width pulse for one connection
#[derive(Debug)]
pub struct ConnectionPulse {
    config: ConnectionConfig,
    elapsed: f64,
}

impl ConnectionPulse {
    /// Create pulse
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            elapsed: 0.0,
        }
    }

    /// Width at a given time and strength
    pub fn width_at(config: &ConnectionConfig, strength: f64, time: f64) -> f64 {
        config.base_width + config.pulse_amplitude * strength * (time * config.pulse_speed).sin()
    }
}

impl AnimationTask<ConnectionActor> for ConnectionPulse {
    fn name(&self) -> &'static str {
        "connection-pulse"
    }

    fn poll(&mut self, actor: &mut ConnectionActor, frame: &Frame) -> TaskStatus {
        self.elapsed += frame.dt;
        actor.width = Self::width_at(&self.config, actor.strength, self.elapsed);
        TaskStatus::Running
    }

    fn stop(&mut self, actor: &mut ConnectionActor) {
        actor.width = self.config.base_width;
    }
}

/// Counts from one `sync`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// New connections
    pub created: usize,

    /// Existing connections refreshed
    pub updated: usize,

    /// Connections torn down
    pub removed: usize,
}

/// Owner of every connection actor and its pulse task
/// Gantree: ConnectionRenderer // 연결선 렌더러
#[derive(Debug)]
pub struct ConnectionRenderer {
    config: ConnectionConfig,
    actors: BTreeMap<QubitPair, ConnectionActor>,
    tasks: Scheduler<QubitPair, ConnectionActor>,
}

impl ConnectionRenderer {
    /// Create empty renderer
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            actors: BTreeMap::new(),
            tasks: Scheduler::new("connection"),
        }
    }

    /// Configuration
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    // ========================================================================
    // Sync
    // ========================================================================

    /// Reconcile connections with a new edge set
    /// Gantree: sync(edges,qubits,style) -> Result<SyncReport> // 연결선 동기화
    ///
    /// Edges above the threshold get a connection with refreshed colour and
    /// endpoints. All others are removed and their pulse stopped. Edges that
    /// reference a missing qubit are skipped.
    pub fn sync(
        &mut self,
        edges: &[CorrelationEdge],
        qubits: &[QubitActor],
        style: &StyleRegistry,
    ) -> QvizResult<SyncReport> {
        let mut report = SyncReport::default();

        let wanted: BTreeMap<QubitPair, &CorrelationEdge> = edges
            .iter()
            .filter(|e| e.exceeds(self.config.threshold))
            .filter(|e| e.qubit_a != e.qubit_b)
            .filter(|e| e.qubit_b < qubits.len())
            .map(|e| (e.pair(), e))
            .collect();

        let stale: Vec<QubitPair> = self
            .actors
            .keys()
            .filter(|pair| !wanted.contains_key(*pair))
            .copied()
            .collect();
        for pair in stale {
            if self.remove(pair) {
                report.removed += 1;
            }
        }

        for (pair, edge) in wanted {
            let start = qubits[pair.0].position();
            let end = qubits[pair.1].position();
            let color = style.connection_color(edge.strength);

            match self.actors.get_mut(&pair) {
                Some(actor) => {
                    actor.strength = edge.strength;
                    actor.start = start;
                    actor.end = end;
                    actor.color = color;
                    report.updated += 1;
                }
                None => {
                    self.actors.insert(
                        pair,
                        ConnectionActor {
                            pair,
                            strength: edge.strength,
                            start,
                            end,
                            color,
                            width: self.config.base_width,
                        },
                    );
                    report.created += 1;
                }
            }

            if !self.tasks.is_active(&pair) {
                self.tasks.spawn(pair, Box::new(ConnectionPulse::new(self.config)))?;
            }
        }

        if report.created > 0 || report.removed > 0 {
            log::debug!(
                "connections: +{} ~{} -{} (now {})",
                report.created,
                report.updated,
                report.removed,
                self.actors.len()
            );
        }
        Ok(report)
    }

    /// Remove one connection, stopping its pulse
    pub fn remove(&mut self, pair: QubitPair) -> bool {
        match self.actors.remove(&pair) {
            Some(mut actor) => {
                self.tasks.cancel(&pair, &mut actor);
                true
            }
            None => false,
        }
    }

    /// Remove everything
    pub fn clear(&mut self) -> usize {
        let cancelled = self.tasks.cancel_all(&mut self.actors);
        self.actors.clear();
        cancelled
    }

    /// Poll every pulse once
    pub fn tick(&mut self, frame: &Frame) -> usize {
        self.tasks.tick(frame, &mut self.actors)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Connection for a pair in either order
    pub fn get(&self, a: usize, b: usize) -> Option<&ConnectionActor> {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.actors.get(&key)
    }

    /// All connections ordered by pair
    pub fn actors(&self) -> impl Iterator<Item = &ConnectionActor> {
        self.actors.values()
    }

    /// Number of connections
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// No connections
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Live pulse tasks
    pub fn active_task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Default for ConnectionRenderer {
    fn default() -> Self {
        Self::new(ConnectionConfig::default())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrameClock;
    use crate::qubit::AnimationConfig;
    use approx::assert_relative_eq;
    use qviz_core::Layout;

    fn qubits(n: usize) -> Vec<QubitActor> {
        let style = StyleRegistry::default();
        Layout::positions(n, 3.0)
            .into_iter()
            .enumerate()
            .map(|(i, p)| QubitActor::new(i, p, AnimationConfig::default(), &style, Some(i as u64)))
            .collect()
    }

    #[test]
    fn test_sync_creates_above_threshold() {
        let mut renderer = ConnectionRenderer::default();
        let qs = qubits(3);
        let edges = [
            CorrelationEdge::new(0, 1, 1.0),
            CorrelationEdge::new(0, 2, 0.5),
            CorrelationEdge::new(1, 2, 0.2),
        ];

        let report = renderer
            .sync(&edges, &qs, &StyleRegistry::default())
            .unwrap();

        assert_eq!(report.created, 1);
        assert_eq!(renderer.len(), 1);
        assert_eq!(renderer.active_task_count(), 1);
        let c = renderer.get(1, 0).unwrap();
        assert_eq!(c.start, qs[0].position());
        assert_eq!(c.end, qs[1].position());
    }

    #[test]
    fn test_sync_idempotent() {
        let mut renderer = ConnectionRenderer::default();
        let qs = qubits(2);
        let style = StyleRegistry::default();
        let edges = [CorrelationEdge::new(0, 1, 0.9)];

        renderer.sync(&edges, &qs, &style).unwrap();
        let again = renderer.sync(&edges, &qs, &style).unwrap();

        assert_eq!(again, SyncReport { created: 0, updated: 1, removed: 0 });
        assert_eq!(renderer.len(), 1);
        assert_eq!(renderer.active_task_count(), 1);
    }

    #[test]
    fn test_sync_removes_weakened() {
        let mut renderer = ConnectionRenderer::default();
        let qs = qubits(2);
        let style = StyleRegistry::default();

        renderer
            .sync(&[CorrelationEdge::new(0, 1, 0.9)], &qs, &style)
            .unwrap();
        let report = renderer
            .sync(&[CorrelationEdge::new(0, 1, 0.3)], &qs, &style)
            .unwrap();

        assert_eq!(report.removed, 1);
        assert!(renderer.is_empty());
        assert_eq!(renderer.active_task_count(), 0);
    }

    #[test]
    fn test_missing_qubit_skipped() {
        let mut renderer = ConnectionRenderer::default();
        let qs = qubits(2);
        renderer
            .sync(&[CorrelationEdge::new(0, 5, 1.0)], &qs, &StyleRegistry::default())
            .unwrap();
        assert!(renderer.is_empty());
    }

    #[test]
    fn test_pulse_width() {
        let mut renderer = ConnectionRenderer::default();
        let qs = qubits(2);
        renderer
            .sync(&[CorrelationEdge::new(0, 1, 1.0)], &qs, &StyleRegistry::default())
            .unwrap();

        let mut clock = FrameClock::new();
        let frame = clock.advance(0.5);
        renderer.tick(&frame);

        let expected = BASE_WIDTH + PULSE_AMPLITUDE * (0.5 * PULSE_SPEED).sin();
        assert_relative_eq!(renderer.get(0, 1).unwrap().width, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_colour_follows_strength() {
        let mut renderer = ConnectionRenderer::default();
        let style = StyleRegistry::default();
        let qs = qubits(2);
        renderer
            .sync(&[CorrelationEdge::new(0, 1, 1.0)], &qs, &style)
            .unwrap();
        assert_eq!(renderer.get(0, 1).unwrap().color, style.connection_color(1.0));
        assert_ne!(style.connection_color(1.0), style.connection_color(0.6));
    }

    #[test]
    fn test_clear() {
        let mut renderer = ConnectionRenderer::default();
        let qs = qubits(4);
        let edges: Vec<_> = [(0, 1), (1, 2), (2, 3)]
            .iter()
            .map(|&(a, b)| CorrelationEdge::new(a, b, 0.8))
            .collect();
        renderer
            .sync(&edges, &qs, &StyleRegistry::default())
            .unwrap();

        assert_eq!(renderer.clear(), 3);
        assert!(renderer.is_empty());
        assert_eq!(renderer.active_task_count(), 0);
    }
}
