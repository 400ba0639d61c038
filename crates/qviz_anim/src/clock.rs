//! Frame clock
//!
//! Gantree: L3_Anim → FrameClock
//!
//! One tick per rendered frame; every task sees the same `Frame` snapshot.

/// Snapshot of one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    /// Tick counter (first tick is 1)
    pub index: u64,

    /// Seconds since the previous tick
    pub dt: f64,

    /// Seconds since the clock started
    pub elapsed: f64,
}

/// Monotonic frame clock
/// Gantree: FrameClock // 프레임 시계
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    frame: Frame,
}

impl FrameClock {
    /// Create clock at t = 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds; negative or non-finite steps count as 0
    pub fn advance(&mut self, dt: f64) -> Frame {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.frame = Frame {
            index: self.frame.index + 1,
            dt,
            elapsed: self.frame.elapsed + dt,
        };
        self.frame
    }

    /// Latest frame
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Seconds since start
    pub fn elapsed(&self) -> f64 {
        self.frame.elapsed
    }

    /// Back to t = 0
    pub fn reset(&mut self) {
        self.frame = Frame::default();
    }
}
