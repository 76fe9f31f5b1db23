//=========================================================================
// Sensor Animation Primitives
//=========================================================================
//
// Scalars and colorings shared by the sensor scenes.
//
// Rates are expressed per second and scaled by the tick's `dt`; at
// 60 TPS a ramp moves 0.01 and a bounce decays 0.005 per tick.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::render::Color;

//=== Constants ===========================================================

/// Ramp speed in units per second.
pub const RAMP_RATE: f32 = 0.6;

/// Bounce amplitude right after a kick.
pub const BOUNCE_KICK: f32 = 0.15;

/// Bounce amplitude lost per second.
pub const BOUNCE_DECAY: f32 = 0.3;

/// Angular speed of the bounce wobble, radians per millisecond.
const BOUNCE_FREQUENCY: f32 = 0.01;

/// Distance floor for inverse-square falloff.
const MIN_DISTANCE: f32 = 1e-3;

//=== Ramp ================================================================

/// A scalar in [0, 1] moving toward a target at [`RAMP_RATE`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ramp {
    value: f32,
}

impl Ramp {
    pub fn new(value: f32) -> Self {
        Self { value: value.clamp(0.0, 1.0) }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Steps toward `target` by at most `RAMP_RATE · dt`.
    pub fn approach(&mut self, target: f32, dt: f32) {
        let target = target.clamp(0.0, 1.0);
        let step = RAMP_RATE * dt.max(0.0);
        let delta = target - self.value;
        self.value = if delta.abs() <= step {
            target
        } else {
            self.value + step.copysign(delta)
        };
        self.value = self.value.clamp(0.0, 1.0);
    }

    pub fn set(&mut self, value: f32) {
        self.value = value.clamp(0.0, 1.0);
    }
}

//=== Bounce ==============================================================

/// Decaying wobble applied after a release or state change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounce {
    factor: f32,
}

impl Bounce {
    pub fn kick(&mut self) {
        self.factor = BOUNCE_KICK;
    }

    pub fn decay(&mut self, dt: f32) {
        self.factor = (self.factor - BOUNCE_DECAY * dt.max(0.0)).max(0.0);
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn is_active(&self) -> bool {
        self.factor > 0.0
    }

    /// Vertical offset at simulated time `time_ms`.
    pub fn offset(&self, time_ms: f32) -> f32 {
        (time_ms * BOUNCE_FREQUENCY).sin() * self.factor
    }
}

//=== Field & Color Helpers ===============================================

/// Inverse-square field strength at `distance`.
pub fn field_strength(distance: f32) -> f32 {
    let d = distance.max(MIN_DISTANCE);
    1.0 / (d * d)
}

/// Yellow at 0, red at 1 and above.
pub fn heat_color(level: f32) -> Color {
    let level = level.clamp(0.0, 1.0);
    Color::rgb(1.0, 1.0 - 0.8 * level, 0.0)
}

//=========================================================================
// Unit Tests
//=========================================================================
