//=========================================================================
// Orbit Camera
//=========================================================================
//
// Damped orbit around a fixed target.
//
// Controls:
//   - Left drag: orbit (a full viewport height of drag is one turn)
//   - Wheel: zoom by 0.95 per line
//
// Spherical coordinates, Y up:
// ```text
//   x = r · sin φ · sin θ
//   y = r · cos φ
//   z = r · sin φ · cos θ
// ```
// Drag input accumulates into (Δθ, Δφ). Each tick applies a fraction of
// the pending delta and decays the rest, so the view keeps gliding
// briefly after the button is released.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::{PI, TAU};

use glam::Vec3;

//=== Internal Dependencies ===============================================

use crate::core::input::{MouseButton, StateTracker};
use crate::render::Viewpoint;

//=== Constants ===========================================================

/// Fraction of the pending rotation applied per tick.
pub const DAMPING_FACTOR: f32 = 0.05;

/// Radius multiplier per wheel line toward the target.
pub const ZOOM_SCALE: f32 = 0.95;

const MIN_RADIUS: f32 = 0.5;
const MAX_RADIUS: f32 = 200.0;

/// Keeps the polar angle off the poles, where `look_at` degenerates.
const POLE_EPSILON: f32 = 1e-6;

//=== OrbitController =====================================================

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitController {
    target: Vec3,
    radius: f32,
    /// Azimuth about +Y, measured from +Z.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    delta_theta: f32,
    delta_phi: f32,
}

impl OrbitController {
    /// Controller positioned at `home`.
    pub fn new(home: Viewpoint) -> Self {
        let mut controller = Self {
            target: Vec3::ZERO,
            radius: 1.0,
            theta: 0.0,
            phi: PI / 2.0,
            delta_theta: 0.0,
            delta_phi: 0.0,
        };
        controller.reset(home);
        controller
    }

    /// Jumps to `home` and cancels any motion still in flight.
    pub fn reset(&mut self, home: Viewpoint) {
        let offset = home.eye - home.target;
        self.target = home.target;
        self.radius = offset.length().clamp(MIN_RADIUS, MAX_RADIUS);
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / offset.length().max(f32::EPSILON))
            .clamp(-1.0, 1.0)
            .acos()
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
    }

    //--- Input ------------------------------------------------------------

    /// Accumulates drag rotation and applies wheel zoom for one tick.
    ///
    /// Movement in the tick the button goes down is ignored so a click
    /// does not jump the view.
    pub fn handle_input(&mut self, state: &StateTracker, viewport_height: u32) {
        if state.is_button_down(MouseButton::Left) && !state.is_button_pressed(MouseButton::Left) {
            let (dx, dy) = state.mouse_delta();
            let height = viewport_height.max(1) as f32;
            self.rotate_left(TAU * dx / height);
            self.rotate_up(TAU * dy / height);
        }

        let scroll = state.scroll_delta();
        if scroll != 0.0 {
            self.zoom(scroll);
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Positive `lines` move toward the target.
    pub fn zoom(&mut self, lines: f32) {
        self.radius = (self.radius * ZOOM_SCALE.powf(lines)).clamp(MIN_RADIUS, MAX_RADIUS);
    }

    //--- Tick -------------------------------------------------------------

    /// Applies the damped share of the pending rotation.
    pub fn update(&mut self) {
        self.theta += self.delta_theta * DAMPING_FACTOR;
        self.phi = (self.phi + self.delta_phi * DAMPING_FACTOR)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);

        self.delta_theta *= 1.0 - DAMPING_FACTOR;
        self.delta_phi *= 1.0 - DAMPING_FACTOR;
    }

    //--- Queries ----------------------------------------------------------

    pub fn eye(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_phi * self.theta.sin(),
                    self.phi.cos(),
                    sin_phi * self.theta.cos(),
                )
    }

    pub fn viewpoint(&self) -> Viewpoint {
        Viewpoint::new(self.eye(), self.target)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// True while rotation from an earlier drag is still being applied.
    pub fn is_moving(&self) -> bool {
        self.delta_theta.abs() > 1e-5 || self.delta_phi.abs() > 1e-5
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(Viewpoint::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, InputSystem, Modifiers};
    use approx::assert_relative_eq;

    fn home() -> Viewpoint {
        Viewpoint::new(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO)
    }

    fn settle(controller: &mut OrbitController) {
        for _ in 0..2000 {
            controller.update();
        }
    }

    //=====================================================================
    // Placement
    //=====================================================================

    #[test]
    fn starts_at_home() {
        let controller = OrbitController::new(home());
        let eye = controller.eye();
        assert_relative_eq!(eye.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(eye.y, 5.0, epsilon = 1e-4);
        assert_relative_eq!(eye.z, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn reset_restores_home_and_stops_motion() {
        let mut controller = OrbitController::new(home());
        controller.rotate_left(1.0);
        controller.update();
        controller.zoom(5.0);
        assert!(controller.is_moving());

        controller.reset(home());

        assert!(!controller.is_moving());
        assert_relative_eq!(controller.eye().z, 10.0, epsilon = 1e-4);
        assert_relative_eq!(controller.radius(), 125f32.sqrt(), epsilon = 1e-4);
    }

    #[test]
    fn reset_to_side_view() {
        let side = Viewpoint::new(Vec3::new(5.0, 3.0, 0.0), Vec3::ZERO);
        let controller = OrbitController::new(side);
        let eye = controller.eye();
        assert_relative_eq!(eye.x, 5.0, epsilon = 1e-4);
        assert_relative_eq!(eye.y, 3.0, epsilon = 1e-4);
        assert_relative_eq!(eye.z, 0.0, epsilon = 1e-4);
    }

    //=====================================================================
    // Rotation & Damping
    //=====================================================================

    #[test]
    fn damping_applies_the_full_rotation_eventually() {
        let mut controller = OrbitController::new(home());
        controller.rotate_left(0.5);
        settle(&mut controller);

        // The geometric series sums to the requested angle.
        let eye = controller.eye();
        let theta = eye.x.atan2(eye.z);
        assert_relative_eq!(theta, -0.5, epsilon = 1e-3);
        assert!(!controller.is_moving());
    }

    #[test]
    fn first_tick_applies_damping_fraction() {
        let mut controller = OrbitController::new(home());
        controller.rotate_left(1.0);
        controller.update();
        let eye = controller.eye();
        assert_relative_eq!(eye.x.atan2(eye.z), -DAMPING_FACTOR, epsilon = 1e-5);
    }

    #[test]
    fn polar_angle_never_crosses_the_pole() {
        let mut controller = OrbitController::new(home());
        controller.rotate_up(100.0);
        settle(&mut controller);
        let eye = controller.eye();
        assert!(eye.y > 0.0);
        assert!(eye.y <= controller.radius());
        assert!(eye.x.is_finite() && eye.z.is_finite());
    }

    //=====================================================================
    // Zoom
    //=====================================================================

    #[test]
    fn wheel_away_zooms_in() {
        let mut controller = OrbitController::new(home());
        let before = controller.radius();
        controller.zoom(1.0);
        assert_relative_eq!(controller.radius(), before * ZOOM_SCALE, epsilon = 1e-4);
        controller.zoom(-1.0);
        assert_relative_eq!(controller.radius(), before, epsilon = 1e-4);
    }

    #[test]
    fn zoom_is_bounded() {
        let mut controller = OrbitController::new(home());
        controller.zoom(1000.0);
        assert_relative_eq!(controller.radius(), MIN_RADIUS);
    }

    //=====================================================================
    // Input Handling
    //=====================================================================

    #[test]
    fn left_drag_orbits_after_press_tick() {
        let mut input = InputSystem::new();
        let mut state = StateTracker::new();
        let mut controller = OrbitController::new(home());

        let press = InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::NONE };
        input.process_frame(&mut state, &[vec![InputEvent::MouseMoved { x: 100.0, y: 100.0 }, press]]);
        controller.handle_input(&state, 720);
        assert!(!controller.is_moving());

        input.process_frame(&mut state, &[vec![InputEvent::MouseMoved { x: 460.0, y: 100.0 }]]);
        controller.handle_input(&state, 720);
        assert!(controller.is_moving());

        settle(&mut controller);
        // Half a viewport height of drag is half a turn.
        let eye = controller.eye();
        assert_relative_eq!(eye.z, -10.0, epsilon = 1e-2);
    }

    #[test]
    fn hovering_without_button_does_nothing() {
        let mut input = InputSystem::new();
        let mut state = StateTracker::new();
        let mut controller = OrbitController::new(home());

        input.process_frame(&mut state, &[vec![InputEvent::MouseMoved { x: 400.0, y: 300.0 }]]);
        controller.handle_input(&state, 720);

        assert!(!controller.is_moving());
    }

    #[test]
    fn wheel_events_zoom() {
        let mut input = InputSystem::new();
        let mut state = StateTracker::new();
        let mut controller = OrbitController::new(home());
        let before = controller.radius();

        input.process_frame(&mut state, &[vec![InputEvent::MouseWheel { delta: 2.0 }]]);
        controller.handle_input(&state, 720);

        assert_relative_eq!(controller.radius(), before * 0.9025, epsilon = 1e-4);
    }
}
