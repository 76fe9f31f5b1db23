//=========================================================================
// Frame Clock
//=========================================================================
//
// Fixed-step simulation time for the logic thread.
//
// Time is derived from the tick counter rather than the wall clock, so
// every animation advances by exactly `dt` per tick regardless of how
// long the tick took.
//
//=========================================================================

//=== FrameClock ==========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    tick: u64,
    tps: f64,
    dt: f32,
}

impl FrameClock {
    /// Clock for a loop running at `tps` ticks per second.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn new(tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        Self {
            tick: 0,
            tps,
            dt: (1.0 / tps) as f32,
        }
    }

    /// Moves to the next tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Simulated milliseconds since start. Computed in f64 so long runs
    /// stay as precise as the f32 result allows.
    pub fn time_ms(&self) -> f32 {
        (self.tick as f64 * 1000.0 / self.tps) as f32
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60.0)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
