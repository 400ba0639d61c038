//! Easing and tweening
//!
//! Gantree: L3_Anim → Easing

use nalgebra::Vector3;

/// Hermite smoothstep on [0, 1]
pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation of scalars
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Interpolation curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed
    #[default]
    Linear,
    /// Slow in, slow out
    SmoothStep,
}

impl Easing {
    /// Map progress through the curve
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t.clamp(0.0, 1.0),
            Easing::SmoothStep => smoothstep(t),
        }
    }
}

/// Timed move between two offsets
/// Gantree: Tween // 보간 이동
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: Vector3<f64>,
    to: Vector3<f64>,
    duration: f64,
    elapsed: f64,
    easing: Easing,
}

impl Tween {
    /// Create tween; a non-positive duration finishes on the first advance
    pub fn new(from: Vector3<f64>, to: Vector3<f64>, duration: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Progress in [0, 1] before easing
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return if self.elapsed > 0.0 { 1.0 } else { 0.0 };
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Eased progress
    pub fn eased(&self) -> f64 {
        self.easing.apply(self.progress())
    }

    /// Step forward and return the current value
    pub fn advance(&mut self, dt: f64) -> Vector3<f64> {
        self.elapsed += dt.max(0.0);
        if self.duration <= 0.0 {
            self.elapsed = self.elapsed.max(f64::MIN_POSITIVE);
        }
        self.value()
    }

    /// Current value
    pub fn value(&self) -> Vector3<f64> {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(&self.to, self.eased())
    }

    /// Reached destination
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Destination
    pub fn target(&self) -> Vector3<f64> {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_smoothstep_shape() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_relative_eq!(smoothstep(0.5), 0.5);
        assert!(smoothstep(0.1) < 0.1);
        assert_eq!(smoothstep(3.0), 1.0);
    }

    #[test]
    fn test_tween_reaches_target() {
        let mut tween = Tween::new(Vector3::zeros(), Vector3::y(), 0.5, Easing::SmoothStep);
        let mid = tween.advance(0.25);
        assert_relative_eq!(mid.y, 0.5, epsilon = 1e-12);
        assert!(!tween.is_finished());
        assert_eq!(tween.advance(0.3), Vector3::y());
        assert!(tween.is_finished());
    }

    #[test]
    fn test_zero_duration() {
        let mut tween = Tween::new(Vector3::zeros(), Vector3::x(), 0.0, Easing::Linear);
        assert!(!tween.is_finished());
        assert_eq!(tween.advance(0.0), Vector3::x());
        assert!(tween.is_finished());
    }
}
