//! Integrated configuration for QVIZ
//!
//! Gantree: L4_Engine → VisualizerConfig
//!
//! Unified configuration combining the classifier, layout, animation and
//! connection parameters.

use qviz_anim::{AnimationConfig, ConnectionConfig};
use qviz_classify::ClassifierConfig;
use qviz_core::animation::{
    DEFINITE_SETTLE_SECS, ENTANGLED_PULSE_AMPLITUDE, ENTANGLED_PULSE_SPEED,
    ENTANGLED_ROTATION_SPEED_DEG, PARTICLE_LIFETIME_SECS, PARTICLE_RATE, PULSE_AMPLITUDE,
    PULSE_SPEED, REST_SCALE, ROTATION_SPEED_DEG, SPHERE_RADIUS, SUPERPOSITION_MOVE_SECS,
};
use qviz_core::connection as line;
use qviz_core::layout_constants::{CAMERA_MARGIN, DEFAULT_SPACING};
use qviz_core::thresholds::{
    CORRELATION_EDGE, ENTANGLEMENT_BASIS, SUPERPOSITION_ANIMATION, SUPERPOSITION_LABEL,
};
use qviz_core::{QvizError, QvizResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Unified QVIZ configuration
/// Gantree: VisualizerConfig // 통합 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    // ========================================================================
    // Thresholds
    // ========================================================================
    /// |p0 - p1| band for the superposition animation
    pub superposition_threshold: f64,

    /// |p0 - p1| band for the textual "in superposition" label
    pub label_threshold: f64,

    /// Basis-state probability counted as significant
    pub entanglement_threshold: f64,

    /// Pair strength needed for a connection
    pub correlation_threshold: f64,

    // ========================================================================
    // Layout
    // ========================================================================
    /// Qubit spacing
    pub spacing: f64,

    /// Constant camera distance margin
    pub camera_margin: f64,

    // ========================================================================
    // Animation
    // ========================================================================
    /// Seconds per random dot move
    pub superposition_move_secs: f64,

    /// Seconds to settle at a pole
    pub definite_settle_secs: f64,

    /// Superposition pulse speed
    pub pulse_speed: f64,

    /// Superposition pulse amplitude
    pub pulse_amplitude: f64,

    /// Entangled pulse speed
    pub entangled_pulse_speed: f64,

    /// Entangled pulse amplitude
    pub entangled_pulse_amplitude: f64,

    /// Superposition rotation (deg/s)
    pub rotation_speed_deg: f64,

    /// Entangled rotation (deg/s)
    pub entangled_rotation_speed_deg: f64,

    /// Static body scale
    pub rest_scale: f64,

    /// Dot orbit radius
    pub sphere_radius: f64,

    /// Particles per second
    pub particle_rate: f64,

    /// Particle lifetime (s)
    pub particle_lifetime_secs: f64,

    /// Emit particles
    pub particles_enabled: bool,

    // ========================================================================
    // Connections
    // ========================================================================
    /// Connection base width
    pub connection_width: f64,

    /// Connection pulse amplitude
    pub connection_pulse_amplitude: f64,

    /// Connection pulse speed
    pub connection_pulse_speed: f64,

    // ========================================================================
    // Execution
    // ========================================================================
    /// Random seed for animation paths
    pub seed: Option<u64>,
}

impl VisualizerConfig {
    // ========================================================================
    // Presets
    // ========================================================================

    /// Reproducible animation paths
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Slow pulses, no particles
    pub fn calm() -> Self {
        Self {
            pulse_speed: PULSE_SPEED / 2.0,
            pulse_amplitude: PULSE_AMPLITUDE / 2.0,
            entangled_pulse_speed: ENTANGLED_PULSE_SPEED / 2.0,
            rotation_speed_deg: ROTATION_SPEED_DEG / 3.0,
            superposition_move_secs: SUPERPOSITION_MOVE_SECS * 3.0,
            particles_enabled: false,
            connection_pulse_speed: line::PULSE_SPEED / 2.0,
            ..Self::default()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set superposition animation band
    pub fn with_superposition_threshold(mut self, threshold: f64) -> Self {
        self.superposition_threshold = threshold;
        self
    }

    /// Set textual superposition band
    pub fn with_label_threshold(mut self, threshold: f64) -> Self {
        self.label_threshold = threshold;
        self
    }

    /// Set basis significance threshold
    pub fn with_entanglement_threshold(mut self, threshold: f64) -> Self {
        self.entanglement_threshold = threshold;
        self
    }

    /// Set connection threshold
    pub fn with_correlation_threshold(mut self, threshold: f64) -> Self {
        self.correlation_threshold = threshold;
        self
    }

    /// Set qubit spacing
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set camera margin
    pub fn with_camera_margin(mut self, margin: f64) -> Self {
        self.camera_margin = margin;
        self
    }

    /// Enable or disable particles
    pub fn with_particles(mut self, enabled: bool) -> Self {
        self.particles_enabled = enabled;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    // ========================================================================
    // Conversion Methods
    // ========================================================================

    /// Classifier thresholds
    pub fn to_classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            superposition_threshold: self.superposition_threshold,
            entanglement_threshold: self.entanglement_threshold,
            correlation_threshold: self.correlation_threshold,
        }
    }

    /// Animator parameters
    pub fn to_animation_config(&self) -> AnimationConfig {
        AnimationConfig {
            superposition_move_secs: self.superposition_move_secs,
            definite_settle_secs: self.definite_settle_secs,
            pulse_speed: self.pulse_speed,
            pulse_amplitude: self.pulse_amplitude,
            entangled_pulse_speed: self.entangled_pulse_speed,
            entangled_pulse_amplitude: self.entangled_pulse_amplitude,
            rotation_speed_deg: self.rotation_speed_deg,
            entangled_rotation_speed_deg: self.entangled_rotation_speed_deg,
            rest_scale: self.rest_scale,
            sphere_radius: self.sphere_radius,
            particle_rate: self.particle_rate,
            particle_lifetime_secs: self.particle_lifetime_secs,
            particles_enabled: self.particles_enabled,
        }
    }

    /// Connection parameters
    pub fn to_connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            base_width: self.connection_width,
            pulse_amplitude: self.connection_pulse_amplitude,
            pulse_speed: self.connection_pulse_speed,
            threshold: self.correlation_threshold,
        }
    }

    /// Seed for one qubit's animator
    pub fn seed_for(&self, qubit: usize) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(qubit as u64))
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Parse from JSON; missing fields take defaults
    pub fn from_json_str(json: &str) -> QvizResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> QvizResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| QvizError::FileError(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> QvizResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> QvizResult<()> {
        let unit = [
            ("superposition_threshold", self.superposition_threshold),
            ("label_threshold", self.label_threshold),
            ("entanglement_threshold", self.entanglement_threshold),
            ("correlation_threshold", self.correlation_threshold),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(QvizError::InvalidConfig(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }

        let positive = [
            ("spacing", self.spacing),
            ("superposition_move_secs", self.superposition_move_secs),
            ("definite_settle_secs", self.definite_settle_secs),
            ("rest_scale", self.rest_scale),
            ("sphere_radius", self.sphere_radius),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(QvizError::InvalidConfig(format!(
                    "{} must be > 0, got {}",
                    name, value
                )));
            }
        }

        if self.camera_margin < 0.0 || self.particle_rate < 0.0 || self.connection_width < 0.0 {
            return Err(QvizError::InvalidConfig(
                "camera_margin, particle_rate and connection_width must be >= 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            superposition_threshold: SUPERPOSITION_ANIMATION,
            label_threshold: SUPERPOSITION_LABEL,
            entanglement_threshold: ENTANGLEMENT_BASIS,
            correlation_threshold: CORRELATION_EDGE,
            spacing: DEFAULT_SPACING,
            camera_margin: CAMERA_MARGIN,
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
            connection_width: line::BASE_WIDTH,
            connection_pulse_amplitude: line::PULSE_AMPLITUDE,
            connection_pulse_speed: line::PULSE_SPEED,
            seed: None,
        }
    }
}

impl fmt::Display for VisualizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VisualizerConfig(band={}/{}, corr={}, spacing={}, particles={}, seed={:?})",
            self.superposition_threshold,
            self.label_threshold,
            self.correlation_threshold,
            self.spacing,
            self.particles_enabled,
            self.seed
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
