//! Visual style registry for QVIZ
//!
//! Gantree: L1_Scene → StyleRegistry
//!
//! Immutable colour table built once at startup and passed by reference to
//! the animators.

use crate::types::QubitVisualState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red
    pub r: f64,
    /// Green
    pub g: f64,
    /// Blue
    pub b: f64,
    /// Alpha
    pub a: f64,
}

impl Rgba {
    /// Create colour
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Component-wise interpolation, `t` clamped to [0, 1]
    pub fn lerp(&self, other: &Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        Rgba::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Same colour with a new alpha
    pub fn with_alpha(&self, a: f64) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }

    /// Opaque white
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({:.2}, {:.2}, {:.2}, {:.2})",
            self.r, self.g, self.b, self.a
        )
    }
}

/// Body material kind
/// Gantree: MaterialKind // 재질 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MaterialKind {
    /// Definite |0⟩
    #[default]
    Zero,
    /// Definite |1⟩
    One,
    /// Superposition
    Superposition,
    /// Entangled (overrides everything)
    Entangled,
}

impl MaterialKind {
    /// Pick material for a qubit
    /// Gantree: select(state) -> MaterialKind // 재질 선택
    ///
    /// Order: entangled, superposition, prob_0 > prob_1, otherwise one.
    pub fn select(state: &QubitVisualState) -> Self {
        if state.entangled {
            MaterialKind::Entangled
        } else if state.is_superposition() {
            MaterialKind::Superposition
        } else if state.prob_0 > state.prob_1 {
            MaterialKind::Zero
        } else {
            MaterialKind::One
        }
    }
}

/// Shared colour table
/// Gantree: StyleRegistry // 스타일 레지스트리
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRegistry {
    /// |0⟩ body colour
    pub zero: Rgba,

    /// |1⟩ body colour
    pub one: Rgba,

    /// Superposition body colour
    pub superposition: Rgba,

    /// Entangled body colour
    pub entangled: Rgba,

    /// Indicator dot colour
    pub dot: Rgba,

    /// Connection colour at strength 0
    pub connection_neutral: Rgba,

    /// Connection colour at strength 1
    pub connection_highlight: Rgba,

    /// Particle colour
    pub particle: Rgba,
}

impl StyleRegistry {
    /// Colour for a material kind
    pub fn color_of(&self, kind: MaterialKind) -> Rgba {
        match kind {
            MaterialKind::Zero => self.zero,
            MaterialKind::One => self.one,
            MaterialKind::Superposition => self.superposition,
            MaterialKind::Entangled => self.entangled,
        }
    }

    /// Connection colour scaled by strength
    pub fn connection_color(&self, strength: f64) -> Rgba {
        self.connection_neutral
            .lerp(&self.connection_highlight, strength)
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self {
            zero: Rgba::rgb(0.2, 0.4, 1.0),
            one: Rgba::rgb(1.0, 0.3, 0.2),
            superposition: Rgba::new(0.7, 0.3, 1.0, 0.8),
            entangled: Rgba::rgb(1.0, 0.85, 0.1),
            dot: Rgba::WHITE,
            connection_neutral: Rgba::new(0.6, 0.6, 0.6, 0.5),
            connection_highlight: Rgba::rgb(0.0, 1.0, 1.0),
            particle: Rgba::new(0.8, 0.6, 1.0, 0.6),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Classification;

    fn state(classification: Classification, entangled: bool, p0: f64) -> QubitVisualState {
        QubitVisualState {
            qubit: 0,
            classification,
            entangled,
            prob_0: p0,
            prob_1: 1.0 - p0,
        }
    }

    #[test]
    fn test_entangled_overrides_all() {
        let s = state(Classification::Superposition, true, 0.5);
        assert_eq!(MaterialKind::select(&s), MaterialKind::Entangled);
        let s = state(Classification::Zero, true, 1.0);
        assert_eq!(MaterialKind::select(&s), MaterialKind::Entangled);
    }

    #[test]
    fn test_selection_order() {
        assert_eq!(
            MaterialKind::select(&state(Classification::Superposition, false, 0.5)),
            MaterialKind::Superposition
        );
        assert_eq!(
            MaterialKind::select(&state(Classification::Zero, false, 0.9)),
            MaterialKind::Zero
        );
        assert_eq!(
            MaterialKind::select(&state(Classification::One, false, 0.1)),
            MaterialKind::One
        );
    }

    #[test]
    fn test_lerp_clamped() {
        let a = Rgba::rgb(0.0, 0.0, 0.0);
        let b = Rgba::rgb(1.0, 1.0, 1.0);
        assert_eq!(a.lerp(&b, 0.5), Rgba::rgb(0.5, 0.5, 0.5));
        assert_eq!(a.lerp(&b, 2.0), b);
    }

    #[test]
    fn test_connection_color_endpoints() {
        let style = StyleRegistry::default();
        assert_eq!(style.connection_color(0.0), style.connection_neutral);
        assert_eq!(style.connection_color(1.0), style.connection_highlight);
    }
}
