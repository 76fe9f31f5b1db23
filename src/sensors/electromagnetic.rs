//=========================================================================
// Electromagnetic Sensor
//=========================================================================
//
// Magnet embedded above a row of Hall-effect sensors.
//
// Layout (front view, x right):
// ```text
//                 ( magnet )              y 1.5 − 0.7p, x 1.5s
//   ╭╮╭╮╭╮╭╮╭╮╭╮╭╮╭╮  field loops          hang below y 0.6
//   ▒▒▒▒▒▒▒ protective layer ▒▒▒▒▒▒▒      y 0.45
//     ▮     ▮     ▮     ▮     ▮           Hall sensors, y 0.25
//   ═══════════ housing ═══════════       y 0.1
// ```
//
// Load states cycle on Space:
//   Initial ──► Normal Load ──► Shear Load ──► Initial
//
// Each Hall sensor is tinted by inverse-square field strength from the
// magnet. The field loops deepen as the magnet approaches them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use glam::Vec3;

//=== Internal Dependencies ===============================================

use super::common::{field_strength, heat_color, Bounce, Ramp};
use super::SensorKind;
use crate::core::{Action, GlobalContext, Scene};
use crate::geometry::curve::ARC_DIVISIONS;
use crate::geometry::{ArcLengthTable, Arrow, CubicBezier, Curve, Mesh, QuadraticBezier, Transform};
use crate::render::{Color, FrameBuilder, Material, Viewpoint};

//=== Constants ===========================================================

const MAGNET_REST: Vec3 = Vec3::new(0.0, 1.5, 0.0);
const MAGNET_TRAVEL: f32 = 0.7;
const SHEAR_TRAVEL: f32 = 1.5;
const SHEAR_PRESSURE: f32 = 0.5;

const HALL_Y: f32 = 0.25;
const HALL_COUNT: usize = 5;
const HALL_SPACING: f32 = 0.75;
const HALL_GAIN: f32 = 5.0;

/// Underside of the protective layer, where field loops start and end.
const LOOP_Y: f32 = 0.6;
const LOOP_COUNT: usize = 8;
const LOOP_SPAN_X: f32 = 4.5;
const LOOP_SPAN_Z: f32 = 1.3;
const LOOP_REACH: f32 = 3.0;
const LOOP_CLOSE: f32 = 1.0;
const LOOP_MAX_EXPANSION: f32 = 2.5;

const ARROWS_PER_LOOP: usize = 3;
const ARROW_LENGTH: f32 = 0.15;

const TRANSLUCENT: f32 = 0.7;

//=== LoadState ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Initial,
    NormalLoad,
    ShearLoad,
}

impl LoadState {
    pub fn next(self) -> Self {
        match self {
            Self::Initial => Self::NormalLoad,
            Self::NormalLoad => Self::ShearLoad,
            Self::ShearLoad => Self::Initial,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Initial => "Initial",
            Self::NormalLoad => "Normal Load",
            Self::ShearLoad => "Shear Load",
        }
    }
}

//=== Field Loops =========================================================

/// Loop depth multiplier for a magnet `distance` away from the loop.
pub fn loop_expansion(distance: f32) -> f32 {
    if distance < LOOP_REACH {
        1.0 + (LOOP_MAX_EXPANSION - 1.0) * ((LOOP_REACH - distance) / (LOOP_REACH - LOOP_CLOSE)).max(0.0)
    } else {
        1.0
    }
}

struct FieldLoop {
    x: f32,
    /// z of the starting end; the loop runs to −start_z.
    start_z: f32,
    expansion: f32,
    curve: QuadraticBezier,
    tube: Arc<Mesh>,
}

impl FieldLoop {
    fn new(x: f32, start_z: f32, expansion: f32) -> Self {
        let base_depth = start_z.abs();
        let curve = QuadraticBezier::new(
            Vec3::new(x, LOOP_Y, start_z),
            Vec3::new(x, LOOP_Y - base_depth * expansion, 0.0),
            Vec3::new(x, LOOP_Y, -start_z),
        );
        Self {
            x,
            start_z,
            expansion,
            curve,
            tube: Arc::new(Mesh::tube(&curve, 50, 0.03, 8)),
        }
    }

    fn midpoint(&self) -> Vec3 {
        Vec3::new(self.x, LOOP_Y, 0.0)
    }

    /// Direction markers at a quarter, half and three quarters of the loop.
    fn arrows(&self) -> impl Iterator<Item = Arrow> + '_ {
        let table = ArcLengthTable::new(&self.curve, ARC_DIVISIONS);
        (1..=ARROWS_PER_LOOP).map(move |j| {
            let t = table.parameter_at(j as f32 * 0.25);
            Arrow::new(
                self.curve.point(t),
                self.curve.tangent(t),
                ARROW_LENGTH,
                ARROW_LENGTH * 0.5,
                ARROW_LENGTH * 0.3,
            )
        })
    }
}

//=== ElectromagneticScene ================================================

pub struct ElectromagneticScene {
    state: LoadState,
    pressure: Ramp,
    shear: Ramp,
    bounce: Bounce,
    offset: f32,
    time_ms: f32,
    loops: Vec<FieldLoop>,

    base: Arc<Mesh>,
    housing: Arc<Mesh>,
    hall_sensor: Arc<Mesh>,
    protective_layer: Arc<Mesh>,
    magnet: Arc<Mesh>,
    connector: Arc<Mesh>,
    arrow_head: Arc<Mesh>,
}

impl ElectromagneticScene {
    pub fn new() -> Self {
        let connector = CubicBezier::new(
            Vec3::new(0.0, 0.3, 0.0),
            Vec3::new(0.0, 0.28, 0.0),
            Vec3::new(0.0, 0.27, 0.0),
            Vec3::new(0.0, HALL_Y, 0.0),
        );

        let mut scene = Self {
            state: LoadState::Initial,
            pressure: Ramp::default(),
            shear: Ramp::default(),
            bounce: Bounce::default(),
            offset: 0.0,
            time_ms: 0.0,
            loops: Vec::with_capacity(LOOP_COUNT * 2),
            base: Arc::new(Mesh::cuboid(6.0, 0.5, 2.0)),
            housing: Arc::new(Mesh::cuboid(5.0, 0.2, 1.5)),
            hall_sensor: Arc::new(Mesh::cuboid(0.4, 0.1, 0.8)),
            protective_layer: Arc::new(Mesh::cuboid(5.0, 0.3, 1.5)),
            magnet: Arc::new(Mesh::sphere(0.6, 32, 32)),
            connector: Arc::new(Mesh::tube(&connector, 8, 0.02, 6)),
            arrow_head: Arc::new(Arrow::head_mesh()),
        };

        let spacing = LOOP_SPAN_X / (LOOP_COUNT + 1) as f32;
        let magnet = scene.magnet_position();
        for i in 1..=LOOP_COUNT {
            let x = -LOOP_SPAN_X / 2.0 + i as f32 * spacing;
            for start_z in [LOOP_SPAN_Z / 2.0, -LOOP_SPAN_Z / 2.0] {
                let expansion = loop_expansion(magnet.distance(Vec3::new(x, LOOP_Y, 0.0)));
                scene.loops.push(FieldLoop::new(x, start_z, expansion));
            }
        }
        scene
    }

    //--- State ------------------------------------------------------------

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn pressure(&self) -> f32 {
        self.pressure.value()
    }

    pub fn shear(&self) -> f32 {
        self.shear.value()
    }

    pub fn magnet_position(&self) -> Vec3 {
        Vec3::new(
            SHEAR_TRAVEL * self.shear(),
            MAGNET_REST.y - MAGNET_TRAVEL * self.pressure() + self.offset,
            0.0,
        )
    }

    pub fn hall_positions() -> impl Iterator<Item = f32> {
        (0..HALL_COUNT).map(|i| -1.5 + i as f32 * HALL_SPACING)
    }

    /// Tint of the Hall sensor at `x` for the current magnet position.
    pub fn hall_color(&self, x: f32) -> Color {
        let magnet = self.magnet_position();
        let distance = ((x - magnet.x).powi(2) + (HALL_Y - magnet.y).powi(2)).sqrt();
        heat_color(field_strength(distance) * HALL_GAIN)
    }

    /// Current depth multipliers of the field loops.
    pub fn loop_expansions(&self) -> Vec<f32> {
        self.loops.iter().map(|l| l.expansion).collect()
    }

    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    //--- Animation --------------------------------------------------------

    fn advance_state(&mut self) {
        self.state = self.state.next();
        if self.state == LoadState::Initial {
            self.pressure.set(0.0);
            self.shear.set(0.0);
        }
        self.bounce.kick();
    }

    fn animate_loads(&mut self, dt: f32) {
        match self.state {
            LoadState::NormalLoad => {
                self.pressure.approach(1.0, dt);
                self.shear.set(0.0);
            }
            LoadState::ShearLoad => {
                self.shear.approach(1.0, dt);
                self.pressure.approach(SHEAR_PRESSURE, dt);
            }
            LoadState::Initial => {
                self.pressure.approach(0.0, dt);
                self.shear.approach(0.0, dt);
            }
        }
    }

    /// Rebuilds loops whose depth changed since the last tick.
    fn refresh_loops(&mut self) {
        let magnet = self.magnet_position();
        for field in &mut self.loops {
            let expansion = loop_expansion(magnet.distance(field.midpoint()));
            if (expansion - field.expansion).abs() > 1e-5 {
                *field = FieldLoop::new(field.x, field.start_z, expansion);
            }
        }
    }
}

impl Default for ElectromagneticScene {
    fn default() -> Self {
        Self::new()
    }
}

//=== Scene ===============================================================

impl Scene<SensorKind> for ElectromagneticScene {
    fn title(&self) -> &str {
        "Electromagnetic Tactile Sensor"
    }

    fn instructions(&self) -> &str {
        "Press SPACE to toggle between states (Initial → Normal Load → Shear Load)"
    }

    fn status(&self) -> String {
        format!(
            "Current State: {} | pressure {:.0}% | shear {:.0}%",
            self.state.label(),
            self.pressure() * 100.0,
            self.shear() * 100.0
        )
    }

    fn home_view(&self) -> Viewpoint {
        Viewpoint::new(Vec3::new(5.0, 3.0, 0.0), Vec3::ZERO)
    }

    fn update(&mut self, context: &GlobalContext<SensorKind>) {
        for action in &context.actions {
            if *action == Action::Press {
                self.advance_state();
            }
        }

        let dt = context.dt();
        self.animate_loads(dt);
        self.bounce.decay(dt);
        self.time_ms = context.time_ms();
        self.offset = self.bounce.offset(self.time_ms);
        self.refresh_loops();
    }

    fn compose(&self, frame: &mut FrameBuilder) {
        let translucent = |hex: u32| Material::lit(Color::from_hex(hex)).with_opacity(TRANSLUCENT);
        let black = Material::lit(Color::BLACK).with_opacity(TRANSLUCENT);

        frame.mesh(&self.base, Transform::from_xyz(0.0, -0.25, 0.0), translucent(0x333333));
        frame.mesh(&self.housing, Transform::from_xyz(0.0, 0.1, 0.0), translucent(0x88cc88));

        //--- Hall sensors and their connectors -----------------------------
        for x in Self::hall_positions() {
            frame.mesh(
                &self.hall_sensor,
                Transform::from_xyz(x, HALL_Y, 0.0),
                Material::lit(self.hall_color(x)).with_opacity(TRANSLUCENT),
            );
            frame.mesh(&self.connector, Transform::from_xyz(x, 0.0, 0.0), black);
        }

        frame.mesh(&self.protective_layer, Transform::from_xyz(0.0, 0.45, 0.0), translucent(0x4488ff));
        frame.mesh(
            &self.magnet,
            Transform::from_translation(self.magnet_position()),
            translucent(0xffff00),
        );

        //--- Field loops ---------------------------------------------------
        let mut index = 0usize;
        for field in &self.loops {
            frame.mesh(&field.tube, Transform::IDENTITY, black);
            for arrow in field.arrows() {
                let pulse = 0.8 + 0.2 * (self.time_ms * 0.001 + index as f32 * 0.1).sin();
                frame.arrow(&arrow.scaled(pulse), &self.arrow_head, Color::BLACK);
                index += 1;
            }
        }
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

    #[test]
    fn space_cycles_through_load_states() {
        let mut scene = ElectromagneticScene::new();
        let mut context = GlobalContext::new(60.0);

        press(&mut scene, &mut context);
        assert_eq!(scene.state(), LoadState::NormalLoad);
        press(&mut scene, &mut context);
        assert_eq!(scene.state(), LoadState::ShearLoad);
        press(&mut scene, &mut context);
        assert_eq!(scene.state(), LoadState::Initial);
    }

    #[test]
    fn each_press_in_a_tick_advances_once() {
        let mut scene = ElectromagneticScene::new();
        let mut context = GlobalContext::new(60.0);

        act_all(&mut scene, &mut context, &[Action::Press, Action::Press]);
        assert_eq!(scene.state(), LoadState::ShearLoad);
    }

    #[test]
    fn normal_load_lowers_magnet() {
        let mut scene = ElectromagneticScene::new();
        let mut context = GlobalContext::new(60.0);
        press(&mut scene, &mut context);
        run(&mut scene, &mut context, 150);

        assert_eq!(scene.pressure(), 1.0);
        assert_eq!(scene.shear(), 0.0);
        let magnet = scene.magnet_position();
        assert_relative_eq!(magnet.y, 0.8, epsilon = 1e-5);
        assert_eq!(magnet.x, 0.0);
    }

    #[test]
    fn shear_load_settles_at_half_pressure() {
        let mut scene = ElectromagneticScene::new();
        let mut context = GlobalContext::new(60.0);
        press(&mut scene, &mut context);
        run(&mut scene, &mut context, 150);
        press(&mut scene, &mut context);

        for _ in 0..150 {
            run(&mut scene, &mut context, 1);
            assert!(scene.pressure() >= 0.5);
        }
        assert_eq!(scene.pressure(), 0.5);
        assert_eq!(scene.shear(), 1.0);
        assert_relative_eq!(scene.magnet_position().x, 1.5, epsilon = 1e-5);
    }

    #[test]
    fn returning_to_initial_zeroes_loads_at_once() {
        let mut scene = ElectromagneticScene::new();
        let mut context = GlobalContext::new(60.0);
        press(&mut scene, &mut context);
        run(&mut scene, &mut context, 50);
        press(&mut scene, &mut context);
        run(&mut scene, &mut context, 50);
        press(&mut scene, &mut context);

        assert_eq!(scene.state(), LoadState::Initial);
        assert_eq!(scene.pressure(), 0.0);
        assert_eq!(scene.shear(), 0.0);
        assert!(scene.bounce.is_active());
    }

    #[test]
    fn hall_sensors_saturate_at_rest() {
        let scene = ElectromagneticScene::new();
        // 1.25 below the magnet: 5 / 1.25² > 1
        assert_relative_eq!(scene.hall_color(0.0).g, 0.2, epsilon = 1e-6);
        assert_eq!(scene.hall_color(0.0).r, 1.0);
    }

    #[test]
    fn shear_cools_the_far_sensor() {
        let mut scene = ElectromagneticScene::new();
        let mut context = GlobalContext::new(60.0);
        press(&mut scene, &mut context);
        run(&mut scene, &mut context, 150);
        press(&mut scene, &mut context);
        run(&mut scene, &mut context, 150);

        let near = scene.hall_color(1.5);
        let far = scene.hall_color(-1.5);
        assert!(far.g > near.g);

        // magnet at (1.5, 1.15): d² = 9 + 0.81
        let expected = 1.0 - 0.8 * (5.0 / 9.81);
        assert_relative_eq!(far.g, expected, epsilon = 1e-4);
    }

    #[test]
    fn expansion_grows_as_magnet_approaches() {
        assert_eq!(loop_expansion(3.5), 1.0);
        assert_eq!(loop_expansion(3.0), 1.0);
        assert_relative_eq!(loop_expansion(1.0), 2.5);
        assert!(loop_expansion(1.5) > loop_expansion(2.5));
    }

    #[test]
    fn loops_deepen_under_normal_load() {
        let mut scene = ElectromagneticScene::new();
        let before: f32 = scene.loop_expansions().iter().sum();

        let mut context = GlobalContext::new(60.0);
        press(&mut scene, &mut context);
        run(&mut scene, &mut context, 150);

        let after: f32 = scene.loop_expansions().iter().sum();
        assert!(after > before);
    }

    #[test]
    fn sixteen_loops_with_three_arrows_each() {
        let scene = ElectromagneticScene::new();
        assert_eq!(scene.loop_count(), 16);

        let mut frame = FrameBuilder::new();
        scene.compose(&mut frame);
        // 4 bodies + 5 sensors + 5 connectors + 16 tubes + 48 arrow heads
        assert_eq!(frame.items().len(), 78);
        assert_eq!(frame.lines().len(), 48);
    }

    #[test]
    fn loop_arrows_follow_the_curve() {
        let field = FieldLoop::new(0.25, 0.65, 1.0);
        let arrows: Vec<Arrow> = field.arrows().collect();

        // Midpoint of a symmetric loop is its lowest point, heading toward −z
        assert_relative_eq!(arrows[1].origin.y, LOOP_Y - 0.65 * 0.5, epsilon = 1e-3);
        assert_relative_eq!(arrows[1].direction.z, -1.0, epsilon = 1e-3);
    }
}
