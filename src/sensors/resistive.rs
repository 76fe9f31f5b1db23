//=========================================================================
// Resistive Sensor
//=========================================================================
//
// Piezo-resistive grid under a pressure plate.
//
// A 3×3 grid of resistor elements sits in the housing below a conductive
// layer. Pressing squashes the plate, pushes it toward the grid and heats
// the resistors from amber to red. Resistance falls with pressure:
//
//   R / R₀ = 1 / (1 + 4p)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::Vec3;

//=== Internal Dependencies ===============================================

use super::common::{Bounce, Ramp};
use super::SensorKind;
use crate::core::{Action, GlobalContext, Scene};
use crate::geometry::{Mesh, Transform};
use crate::render::{Color, FrameBuilder, Material, Viewpoint};

//=== Constants ===========================================================

const GRID_SPACING: f32 = 1.2;
const RESISTOR_Y: f32 = 0.5;
const COLD: u32 = 0xcc9900;
const HOT: u32 = 0xff0000;

/// Conductance gain at full pressure.
const SENSITIVITY: f32 = 4.0;

//=== ResistiveScene ======================================================

pub struct ResistiveScene {
    pressing: bool,
    pressure: Ramp,
    bounce: Bounce,
    offset: f32,

    base: Arc<Mesh>,
    housing: Arc<Mesh>,
    resistor: Arc<Mesh>,
    conductive_layer: Arc<Mesh>,
    plate: Arc<Mesh>,
    probe: Arc<Mesh>,
}

impl ResistiveScene {
    pub fn new() -> Self {
        Self {
            pressing: false,
            pressure: Ramp::default(),
            bounce: Bounce::default(),
            offset: 0.0,
            base: Arc::new(Mesh::cuboid(6.0, 0.5, 6.0)),
            housing: Arc::new(Mesh::cuboid(5.0, 1.0, 5.0)),
            resistor: Arc::new(Mesh::cylinder(0.2, 0.2, 0.8, 16)),
            conductive_layer: Arc::new(Mesh::cuboid(4.5, 0.1, 4.5)),
            plate: Arc::new(Mesh::cuboid(4.0, 0.3, 4.0)),
            probe: Arc::new(Mesh::sphere(1.0, 32, 32)),
        }
    }

    pub fn is_pressing(&self) -> bool {
        self.pressing
    }

    pub fn pressure(&self) -> f32 {
        self.pressure.value()
    }

    //--- Layout -----------------------------------------------------------

    pub fn probe_y(&self) -> f32 {
        2.85 - 0.5 * self.pressure() + self.offset
    }

    pub fn plate_y(&self) -> f32 {
        1.7 - 0.5 * self.pressure() + 0.5 * self.offset
    }

    /// Plate squash: thinner and slightly wider under load.
    pub fn plate_scale(&self) -> Vec3 {
        let squish = 1.0 - 0.2 * self.pressure();
        let spread = 1.0 + (1.0 - squish) * 0.1;
        Vec3::new(spread, squish, spread)
    }

    pub fn resistor_color(&self) -> Color {
        Color::from_hex(COLD).lerp(Color::from_hex(HOT), self.pressure())
    }

    pub fn relative_resistance(&self) -> f32 {
        1.0 / (1.0 + SENSITIVITY * self.pressure())
    }

    pub fn resistor_positions() -> impl Iterator<Item = Vec3> {
        (-1..=1).flat_map(|x| {
            (-1..=1).map(move |z| Vec3::new(x as f32 * GRID_SPACING, RESISTOR_Y, z as f32 * GRID_SPACING))
        })
    }
}

impl Default for ResistiveScene {
    fn default() -> Self {
        Self::new()
    }
}

//=== Scene ===============================================================

impl Scene<SensorKind> for ResistiveScene {
    fn title(&self) -> &str {
        "Resistive Tactile Sensor"
    }

    fn instructions(&self) -> &str {
        "Press SPACE to apply/release pressure"
    }

    fn status(&self) -> String {
        format!(
            "{} | pressure {:.0}% | R/R0 {:.2}",
            if self.pressing { "Pressing" } else { "Released" },
            self.pressure() * 100.0,
            self.relative_resistance()
        )
    }

    fn home_view(&self) -> Viewpoint {
        Viewpoint::new(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO)
    }

    fn update(&mut self, context: &GlobalContext<SensorKind>) {
        for action in &context.actions {
            if *action == Action::Press {
                self.pressing = !self.pressing;
                if !self.pressing && self.pressure() > 0.5 {
                    self.bounce.kick();
                }
            }
        }

        let dt = context.dt();
        self.pressure.approach(if self.pressing { 1.0 } else { 0.0 }, dt);
        self.bounce.decay(dt);
        self.offset = self.bounce.offset(context.time_ms());
    }

    fn compose(&self, frame: &mut FrameBuilder) {
        frame.mesh(&self.base, Transform::from_xyz(0.0, -0.25, 0.0), Material::lit(Color::from_hex(0x333333)));
        frame.mesh(&self.housing, Transform::from_xyz(0.0, 0.5, 0.0), Material::lit(Color::from_hex(0x666666)));

        let heat = Material::lit(self.resistor_color());
        for position in Self::resistor_positions() {
            frame.mesh(
                &self.resistor,
                Transform::from_translation(position).with_euler(FRAC_PI_2, 0.0, 0.0),
                heat,
            );
        }

        frame.mesh(
            &self.conductive_layer,
            Transform::from_xyz(0.0, 1.05, 0.0),
            Material::lit(Color::from_hex(0x888888)),
        );
        frame.mesh(
            &self.plate,
            Transform::from_xyz(0.0, self.plate_y(), 0.0).with_scale(self.plate_scale()),
            Material::lit(Color::from_hex(0x2266cc)),
        );
        frame.mesh(
            &self.probe,
            Transform::from_xyz(0.0, self.probe_y(), 0.0),
            Material::lit(Color::from_hex(0xffcccc)).with_opacity(0.8),
        );
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::testing::{act_all, press, run};
    use approx::assert_relative_eq;

    fn pressed_scene() -> ResistiveScene {
        let mut scene = ResistiveScene::new();
        let mut context = GlobalContext::new(60.0);
        press(&mut scene, &mut context);
        run(&mut scene, &mut context, 120);
        scene
    }

    #[test]
    fn rest_layout() {
        let scene = ResistiveScene::new();
        assert_relative_eq!(scene.probe_y(), 2.85);
        assert_relative_eq!(scene.plate_y(), 1.7);
        assert_eq!(scene.plate_scale(), Vec3::ONE);
        assert_eq!(scene.resistor_color(), Color::from_hex(COLD));
        assert_eq!(scene.relative_resistance(), 1.0);
    }

    #[test]
    fn full_press_layout() {
        let scene = pressed_scene();
        assert_relative_eq!(scene.probe_y(), 2.35, epsilon = 1e-5);
        assert_relative_eq!(scene.plate_y(), 1.2, epsilon = 1e-5);

        let scale = scene.plate_scale();
        assert_relative_eq!(scale.y, 0.8, epsilon = 1e-5);
        assert_relative_eq!(scale.x, 1.02, epsilon = 1e-5);
        assert_eq!(scale.x, scale.z);

        assert_eq!(scene.resistor_color(), Color::RED);
        assert_relative_eq!(scene.relative_resistance(), 0.2, epsilon = 1e-6);
    }

    #[test]
    fn resistance_falls_monotonically() {
        let mut scene = ResistiveScene::new();
        let mut context = GlobalContext::new(60.0);
        press(&mut scene, &mut context);

        let mut last = scene.relative_resistance();
        for _ in 0..100 {
            run(&mut scene, &mut context, 1);
            let r = scene.relative_resistance();
            assert!(r <= last);
            last = r;
        }
    }

    #[test]
    fn grid_is_three_by_three() {
        let positions: Vec<Vec3> = ResistiveScene::resistor_positions().collect();
        assert_eq!(positions.len(), 9);
        assert!(positions.contains(&Vec3::new(-1.2, 0.5, 1.2)));
        assert!(positions.contains(&Vec3::new(0.0, 0.5, 0.0)));
    }

    #[test]
    fn compose_colors_every_resistor() {
        let scene = pressed_scene();
        let mut frame = FrameBuilder::new();
        scene.compose(&mut frame);

        assert_eq!(frame.items().len(), 14);
        let red = frame.items().iter().filter(|item| item.material.color == Color::RED).count();
        assert_eq!(red, 9);
    }

    #[test]
    fn release_bounces_then_settles() {
        let mut scene = pressed_scene();
        let mut context = GlobalContext::new(60.0);
        press(&mut scene, &mut context);
        assert!(scene.bounce.is_active());

        run(&mut scene, &mut context, 150);
        assert_eq!(scene.pressure(), 0.0);
        assert_relative_eq!(scene.plate_y(), 1.7);
    }

    #[test]
    fn each_press_in_a_tick_toggles_once() {
        let mut scene = ResistiveScene::new();
        let mut context = GlobalContext::new(60.0);
        act_all(&mut scene, &mut context, &[Action::Press, Action::Press, Action::Press]);

        assert!(scene.is_pressing());
        act_all(&mut scene, &mut context, &[Action::Press, Action::Press]);
        assert!(scene.is_pressing());
    }
}
