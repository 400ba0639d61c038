//! Constants for QVIZ
//!
//! Gantree: L0_Foundation → Constants
//!
//! Classification thresholds, layout/camera parameters and animation timing.

// ============================================================================
// Threshold Constants
// Gantree: thresholds // 분류 임계값
// ============================================================================

pub mod thresholds {
    //! Classification and correlation thresholds

    /// |p0 - p1| below this drives the superposition animation
    /// Gantree: SUPERPOSITION_ANIMATION: f64 = 0.1
    pub const SUPERPOSITION_ANIMATION: f64 = 0.1;

    /// |p0 - p1| below this earns the "(in superposition)" text label
    /// Gantree: SUPERPOSITION_LABEL: f64 = 0.01
    pub const SUPERPOSITION_LABEL: f64 = 0.01;

    /// Basis-state probability counted as significant
    /// Gantree: ENTANGLEMENT_BASIS: f64 = 0.01
    pub const ENTANGLEMENT_BASIS: f64 = 0.01;

    /// Pairwise strength needed to draw a connection
    /// Gantree: CORRELATION_EDGE: f64 = 0.5
    pub const CORRELATION_EDGE: f64 = 0.5;

    /// Allowed drift of probability sums away from 1.0
    pub const PROBABILITY_TOLERANCE: f64 = 1e-6;
}

// ============================================================================
// Layout Constants
// Gantree: layout // 배치 상수
// ============================================================================

pub mod layout {
    //! Spatial arrangement and camera placement

    /// Distance between neighbouring qubits
    /// Gantree: DEFAULT_SPACING: f64 = 3.0
    pub const DEFAULT_SPACING: f64 = 3.0;

    /// Qubits per ring before the circle radius starts to grow
    pub const RING_CAPACITY: usize = 4;

    /// Eye distance = EXTENT_FACTOR × extent + margin
    pub const CAMERA_EXTENT_FACTOR: f64 = 1.5;

    /// Constant camera margin
    /// Gantree: CAMERA_MARGIN: f64 = 5.0
    pub const CAMERA_MARGIN: f64 = 5.0;

    /// Eye offset direction (unnormalised): up and back
    pub const CAMERA_OFFSET: [f64; 3] = [0.0, 0.5, -1.0];
}

// ============================================================================
// Animation Constants
// Gantree: animation // 애니메이션 상수
// ============================================================================

pub mod animation {
    //! Per-qubit animation timing

    /// Dot travel time toward each new random point (seconds)
    /// Gantree: SUPERPOSITION_MOVE_SECS: f64 = 0.1
    pub const SUPERPOSITION_MOVE_SECS: f64 = 0.1;

    /// Dot travel time to a pole (seconds)
    /// Gantree: DEFINITE_SETTLE_SECS: f64 = 0.5
    pub const DEFINITE_SETTLE_SECS: f64 = 0.5;

    /// Body pulse angular speed while in superposition (rad/s)
    pub const PULSE_SPEED: f64 = 2.0;

    /// Relative body scale swing while in superposition
    pub const PULSE_AMPLITUDE: f64 = 0.1;

    /// Gentle pulse angular speed for an entangled definite qubit (rad/s)
    pub const ENTANGLED_PULSE_SPEED: f64 = 3.0;

    /// Gentle pulse amplitude for an entangled definite qubit
    pub const ENTANGLED_PULSE_AMPLITUDE: f64 = 0.05;

    /// Body spin while in superposition (degrees/s)
    pub const ROTATION_SPEED_DEG: f64 = 30.0;

    /// Slow spin for an entangled definite qubit (degrees/s)
    pub const ENTANGLED_ROTATION_SPEED_DEG: f64 = 10.0;

    /// Body scale at rest
    pub const REST_SCALE: f64 = 1.0;

    /// Radius of the sphere the indicator dot moves on
    pub const SPHERE_RADIUS: f64 = 0.5;

    /// Particles spawned per second while playing
    pub const PARTICLE_RATE: f64 = 20.0;

    /// Particle lifetime (seconds)
    pub const PARTICLE_LIFETIME_SECS: f64 = 1.0;
}

// ============================================================================
// Connection Constants
// Gantree: connection // 연결선 상수
// ============================================================================

pub mod connection {
    //! Correlation link rendering

    /// Line width before pulsing
    pub const BASE_WIDTH: f64 = 0.05;

    /// Width swing at strength 1.0
    pub const PULSE_AMPLITUDE: f64 = 0.02;

    /// Width pulse angular speed (rad/s)
    pub const PULSE_SPEED: f64 = 3.0;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superposition_bands_distinct() {
        assert!(thresholds::SUPERPOSITION_LABEL < thresholds::SUPERPOSITION_ANIMATION);
        assert_eq!(thresholds::SUPERPOSITION_ANIMATION, 0.1);
        assert_eq!(thresholds::SUPERPOSITION_LABEL, 0.01);
    }

    #[test]
    fn test_animation_durations() {
        assert!(animation::SUPERPOSITION_MOVE_SECS < animation::DEFINITE_SETTLE_SECS);
        assert_eq!(thresholds::CORRELATION_EDGE, 0.5);
    }
}
