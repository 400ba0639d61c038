//! Qubit layout for QVIZ
//!
//! Gantree: L1_Scene → Layout
//!
//! Deterministic qubit positions per qubit count, and camera placement
//! framing a set of positions. Qubits lie in the horizontal XZ plane.

use crate::constants::layout::{
    CAMERA_EXTENT_FACTOR, CAMERA_MARGIN, CAMERA_OFFSET, DEFAULT_SPACING, RING_CAPACITY,
};
use crate::types::QubitIndex;
use nalgebra::{Point3, Vector3};
use std::f64::consts::TAU;

/// Camera eye and target
/// Gantree: CameraPlacement // 카메라 배치
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPlacement {
    /// Eye position
    pub eye: Point3<f64>,

    /// Point the camera looks at
    pub look_at: Point3<f64>,
}

impl CameraPlacement {
    /// Eye-to-target distance
    pub fn distance(&self) -> f64 {
        (self.eye - self.look_at).norm()
    }
}

/// Axis-aligned bounding volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum corner
    pub min: Point3<f64>,

    /// Maximum corner
    pub max: Point3<f64>,
}

impl Bounds {
    /// Enclose all points, `None` for an empty slice
    pub fn enclosing(points: &[Point3<f64>]) -> Option<Self> {
        let first = points.first()?;
        let (min, max) = points.iter().skip(1).fold((*first, *first), |(lo, hi), p| {
            (
                Point3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Point3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        });
        Some(Self { min, max })
    }

    /// Centre point
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Edge lengths
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Largest horizontal (X or Z) edge
    pub fn horizontal_extent(&self) -> f64 {
        let size = self.size();
        size.x.max(size.z)
    }
}

/// Layout engine (stateless)
/// Gantree: Layout // 배치 엔진
pub struct Layout;

impl Layout {
    // ========================================================================
    // Positions
    // ========================================================================

    /// Position of one qubit
    /// Gantree: position_for(index,total,spacing) -> Point3 // 위치 계산
    ///
    /// - 1 qubit: origin
    /// - 2 qubits: ±spacing/2 on X
    /// - 3 qubits: triangle of radius `spacing`
    /// - 4+: circle of radius `spacing × max(1, total/4)`
    pub fn position_for(index: QubitIndex, total: usize, spacing: f64) -> Point3<f64> {
        match total {
            0 | 1 => Point3::origin(),
            2 => {
                let half = spacing / 2.0;
                let x = if index == 0 { -half } else { half };
                Point3::new(x, 0.0, 0.0)
            }
            3 => Self::on_circle(index, 3, spacing),
            n => {
                let radius = spacing * (n as f64 / RING_CAPACITY as f64).max(1.0);
                Self::on_circle(index, n, radius)
            }
        }
    }

    /// Positions for every qubit
    pub fn positions(total: usize, spacing: f64) -> Vec<Point3<f64>> {
        (0..total)
            .map(|i| Self::position_for(i, total, spacing))
            .collect()
    }

    /// Positions with default spacing
    pub fn default_positions(total: usize) -> Vec<Point3<f64>> {
        Self::positions(total, DEFAULT_SPACING)
    }

    fn on_circle(index: QubitIndex, total: usize, radius: f64) -> Point3<f64> {
        let angle = index as f64 * TAU / total as f64;
        Point3::new(radius * angle.cos(), 0.0, radius * angle.sin())
    }

    // ========================================================================
    // Camera
    // ========================================================================

    /// Camera framing all positions
    /// Gantree: camera_placement(positions) -> CameraPlacement // 카메라
    ///
    /// Eye sits along `CAMERA_OFFSET` at `1.5 × extent + margin` from the
    /// bounding-volume centre. A single point has extent 0 and yields the
    /// margin distance.
    pub fn camera_placement(positions: &[Point3<f64>]) -> CameraPlacement {
        Self::camera_placement_with_margin(positions, CAMERA_MARGIN)
    }

    /// Camera framing with an explicit margin
    pub fn camera_placement_with_margin(positions: &[Point3<f64>], margin: f64) -> CameraPlacement {
        let (center, extent) = match Bounds::enclosing(positions) {
            Some(bounds) => (bounds.center(), bounds.horizontal_extent()),
            None => (Point3::origin(), 0.0),
        };

        let distance = CAMERA_EXTENT_FACTOR * extent + margin;
        let offset = Vector3::from(CAMERA_OFFSET).normalize();

        CameraPlacement {
            eye: center + offset * distance,
            look_at: center,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_single_qubit_at_origin() {
        assert_eq!(Layout::position_for(0, 1, 3.0), Point3::origin());
    }

    #[test]
    fn test_two_qubits_symmetric() {
        let p = Layout::positions(2, 3.0);
        assert_ne!(p[0], p[1]);
        assert_abs_diff_eq!(p[0].x + p[1].x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!((p[1] - p[0]).norm(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_triangle_radius() {
        for p in Layout::positions(3, 2.0) {
            assert_relative_eq!(p.coords.norm(), 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_circle_radius_grows() {
        let four = Layout::positions(4, 3.0);
        let eight = Layout::positions(8, 3.0);
        assert_relative_eq!(four[1].coords.norm(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(eight[1].coords.norm(), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_positions_deterministic() {
        assert_eq!(Layout::positions(5, 3.0), Layout::positions(5, 3.0));
    }

    #[test]
    fn test_camera_single_point() {
        let cam = Layout::camera_placement(&[Point3::origin()]);
        assert_eq!(cam.look_at, Point3::origin());
        assert_relative_eq!(cam.distance(), CAMERA_MARGIN, epsilon = 1e-12);
        assert!(cam.eye.coords.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_camera_empty() {
        let cam = Layout::camera_placement(&[]);
        assert!(cam.distance().is_finite());
    }

    #[test]
    fn test_camera_distance_scales_with_extent() {
        let cam = Layout::camera_placement(&Layout::positions(2, 4.0));
        assert_relative_eq!(cam.distance(), 1.5 * 4.0 + CAMERA_MARGIN, epsilon = 1e-12);
        assert_abs_diff_eq!(cam.look_at.x, 0.0, epsilon = 1e-12);
        assert!(cam.eye.y > 0.0);
    }

    #[test]
    fn test_bounds() {
        let b = Bounds::enclosing(&[Point3::new(-1.0, 0.0, 2.0), Point3::new(3.0, 1.0, -2.0)])
            .unwrap();
        assert_eq!(b.center(), Point3::new(1.0, 0.5, 0.0));
        assert_eq!(b.horizontal_extent(), 4.0);
    }
}
