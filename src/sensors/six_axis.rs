//=========================================================================
// Six-Axis Force/Torque Sensor
//=========================================================================
//
// End effector on a top mount, carried by four elastic beams that are
// instrumented with strain gauges.
//
// Top view, beam k at angle θ = kπ/2, radius 3.15:
// ```text
//              beam 1
//                ▮
//     beam 2 ▮  (◎)  ▮ beam 0      ◎ end effector (r 1.5)
//                ▮
//              beam 3
// ```
//
// Each beam carries six gauges. Which ones respond depends on the load:
//
//   vertical    top / bottom    Fy, Tx, Tz
//   radial      inner / outer   Fx, Fz along the beam, Ty
//   tangential  left / right    Fx, Fz across the beam, Ty
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

use glam::Vec3;

//=== Internal Dependencies ===============================================

use super::common::{heat_color, Ramp};
use super::SensorKind;
use crate::core::input::LoadAxis;
use crate::core::{Action, GlobalContext, Scene};
use crate::geometry::{Arrow, Mesh, Transform};
use crate::render::{Color, FrameBuilder, Material, Viewpoint};

//=== Constants ===========================================================

const BEAM_COUNT: usize = 4;
const BEAM_RADIUS: f32 = 3.15;
const BEAM_Y: f32 = 0.6;
const GAUGE_OFFSET: f32 = 0.3;

const EFFECTOR_REST: Vec3 = Vec3::new(0.0, 2.0, 0.0);
const MOUNT_REST: Vec3 = Vec3::new(0.0, 1.45, 0.0);
const TRANSLATION_GAIN: f32 = 0.3;
const ROTATION_GAIN: f32 = 0.2;

const ARROW_ORIGIN: Vec3 = Vec3::new(0.0, 2.0, 0.0);
const ARROW_GAIN: f32 = 2.0;

const GAUGE_EMISSIVE: u32 = 0x884400;

//=== Gauges ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeFace {
    Top,
    Bottom,
    Inner,
    Outer,
    Left,
    Right,
}

impl GaugeFace {
    pub const ALL: [Self; 6] = [Self::Top, Self::Bottom, Self::Inner, Self::Outer, Self::Left, Self::Right];

    /// Placement of a gauge on the beam at `angle`.
    fn transform(self, angle: f32) -> Transform {
        let (sin, cos) = angle.sin_cos();
        let beam = Vec3::new(cos * BEAM_RADIUS, BEAM_Y, sin * BEAM_RADIUS);
        let radial = Vec3::new(cos, 0.0, sin) * GAUGE_OFFSET;
        let side = |a: f32| Vec3::new(a.cos(), 0.0, a.sin()) * GAUGE_OFFSET;

        match self {
            Self::Top => Transform::from_xyz(beam.x, 1.05, beam.z).with_euler(0.0, angle, 0.0),
            Self::Bottom => Transform::from_xyz(beam.x, 0.15, beam.z).with_euler(0.0, angle, 0.0),
            Self::Inner => Transform::from_translation(beam - radial).with_euler(0.0, angle, FRAC_PI_2),
            Self::Outer => Transform::from_translation(beam + radial).with_euler(0.0, angle, FRAC_PI_2),
            Self::Left => Transform::from_translation(beam + side(angle + FRAC_PI_2)).with_euler(FRAC_PI_2, angle, 0.0),
            Self::Right => Transform::from_translation(beam + side(angle - FRAC_PI_2)).with_euler(FRAC_PI_2, angle, 0.0),
        }
    }
}

fn beam_angle(beam: usize) -> f32 {
    beam as f32 * PI / 2.0
}

/// Strain read by the gauge on `face` of the beam at `angle` under
/// `force` and `torque` scaled by `amount`.
pub fn gauge_strain(face: GaugeFace, angle: f32, force: Vec3, torque: Vec3, amount: f32) -> f32 {
    let (sin, cos) = angle.sin_cos();
    let f = force * amount;
    let t = torque * amount;

    match face {
        GaugeFace::Top | GaugeFace::Bottom => {
            let strain = f.y + (t.z * cos - t.x * sin);
            if face == GaugeFace::Top { -strain } else { strain }
        }
        GaugeFace::Inner | GaugeFace::Outer => {
            let strain = f.x * cos + f.z * sin + 0.5 * t.y;
            if face == GaugeFace::Inner { -strain } else { strain }
        }
        GaugeFace::Left | GaugeFace::Right => {
            let strain = -f.x * sin + f.z * cos + t.y;
            if face == GaugeFace::Right { -strain } else { strain }
        }
    }
}

/// Heat level in [0, 1] shown for a given strain.
pub fn strain_level(strain: f32) -> f32 {
    (strain.abs() * 2.0).min(1.0)
}

//=== SixAxisScene ========================================================

pub struct SixAxisScene {
    loading: bool,
    amount: Ramp,
    force: Vec3,
    torque: Vec3,

    base: Arc<Mesh>,
    top_mount: Arc<Mesh>,
    effector: Arc<Mesh>,
    connector: Arc<Mesh>,
    beam: Arc<Mesh>,
    gauge: Arc<Mesh>,
    arrow_head: Arc<Mesh>,
}

impl SixAxisScene {
    pub fn new() -> Self {
        Self {
            loading: false,
            amount: Ramp::default(),
            force: LoadAxis::ForceY.vector(),
            torque: Vec3::ZERO,
            base: Arc::new(Mesh::cylinder(4.0, 4.0, 0.5, 32)),
            top_mount: Arc::new(Mesh::cylinder(3.5, 3.5, 0.5, 32)),
            effector: Arc::new(Mesh::cylinder(1.5, 1.5, 0.5, 32)),
            connector: Arc::new(Mesh::cylinder(0.5, 0.5, 0.5, 16)),
            beam: Arc::new(Mesh::cuboid(0.7, 0.8, 0.7)),
            gauge: Arc::new(Mesh::cuboid(0.4, 0.05, 0.2)),
            arrow_head: Arc::new(Arrow::head_mesh()),
        }
    }

    //--- State ------------------------------------------------------------

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn amount(&self) -> f32 {
        self.amount.value()
    }

    pub fn force(&self) -> Vec3 {
        self.force
    }

    pub fn torque(&self) -> Vec3 {
        self.torque
    }

    /// Applies exactly one wrench component.
    pub fn select(&mut self, axis: LoadAxis) {
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
        if axis.is_force() {
            self.force = axis.vector();
        } else {
            self.torque = axis.vector();
        }
    }

    /// Current wrench component for `axis`, scaled by the load amount.
    pub fn component(&self, axis: LoadAxis) -> f32 {
        let source = if axis.is_force() { self.force } else { self.torque };
        source.dot(axis.vector().abs()) * self.amount()
    }

    //--- Layout -----------------------------------------------------------

    fn displacement(&self) -> Vec3 {
        self.force * self.amount() * TRANSLATION_GAIN
    }

    fn tilt(&self) -> Vec3 {
        self.torque * self.amount() * ROTATION_GAIN
    }

    /// Placement of the end effector; the top mount moves with it.
    pub fn effector_transform(&self) -> Transform {
        let tilt = self.tilt();
        Transform::from_translation(EFFECTOR_REST + self.displacement()).with_euler(tilt.x, tilt.y, tilt.z)
    }

    pub fn mount_transform(&self) -> Transform {
        let tilt = self.tilt();
        Transform::from_translation(MOUNT_REST + self.displacement()).with_euler(tilt.x, tilt.y, tilt.z)
    }

    pub fn strain(&self, beam: usize, face: GaugeFace) -> f32 {
        gauge_strain(face, beam_angle(beam), self.force, self.torque, self.amount())
    }

    /// Arrows for the nonzero wrench components, in Fx..Tz order.
    pub fn load_arrows(&self) -> Vec<(LoadAxis, Arrow)> {
        LoadAxis::ALL
            .into_iter()
            .filter_map(|axis| {
                let source = if axis.is_force() { self.force } else { self.torque };
                let basis = axis.vector().abs();
                let c = source.dot(basis);
                if c == 0.0 {
                    return None;
                }
                let arrow = Arrow::new(ARROW_ORIGIN, basis * c.signum(), ARROW_GAIN * c.abs() * self.amount(), 0.2, 0.1);
                Some((axis, arrow))
            })
            .collect()
    }
}

impl Default for SixAxisScene {
    fn default() -> Self {
        Self::new()
    }
}

fn axis_color(axis: LoadAxis) -> Color {
    match axis {
        LoadAxis::ForceX => Color::RED,
        LoadAxis::ForceY => Color::GREEN,
        LoadAxis::ForceZ => Color::BLUE,
        LoadAxis::TorqueX => Color::MAGENTA,
        LoadAxis::TorqueY => Color::YELLOW,
        LoadAxis::TorqueZ => Color::CYAN,
    }
}

//=== Scene ===============================================================

impl Scene<SensorKind> for SixAxisScene {
    fn title(&self) -> &str {
        "Six-Axis Force/Torque Sensor"
    }

    fn instructions(&self) -> &str {
        "Press SPACE to apply/release force / Press 1-6 to change force direction"
    }

    fn status(&self) -> String {
        let wrench = LoadAxis::ALL
            .into_iter()
            .map(|axis| format!("{} {:.2}", axis.label(), self.component(axis)))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} | {}", if self.loading { "Loading" } else { "Unloaded" }, wrench)
    }

    fn home_view(&self) -> Viewpoint {
        Viewpoint::new(Vec3::new(5.0, 5.0, 10.0), Vec3::ZERO)
    }

    fn update(&mut self, context: &GlobalContext<SensorKind>) {
        for action in &context.actions {
            match *action {
                Action::Press => self.loading = !self.loading,
                Action::SelectLoad(axis) => self.select(axis),
                _ => {}
            }
        }

        self.amount.approach(if self.loading { 1.0 } else { 0.0 }, context.dt());
    }

    fn compose(&self, frame: &mut FrameBuilder) {
        let gray = Color::from_hex(0x555555);

        frame.mesh(&self.base, Transform::from_xyz(0.0, -0.25, 0.0), Material::lit(gray).with_opacity(0.7));
        frame.mesh(&self.top_mount, self.mount_transform(), Material::lit(gray).with_opacity(0.7));
        frame.mesh(
            &self.effector,
            self.effector_transform(),
            Material::lit(Color::from_hex(0xcc4444)).with_opacity(0.7),
        );
        frame.mesh(
            &self.connector,
            Transform::from_xyz(0.0, 1.7, 0.0),
            Material::lit(Color::from_hex(0x999999)).with_opacity(0.7),
        );

        //--- Beams and gauges ----------------------------------------------
        let beam_material = Material::lit(Color::from_hex(0x88aadd)).with_opacity(0.8);
        for beam in 0..BEAM_COUNT {
            let angle = beam_angle(beam);
            let (sin, cos) = angle.sin_cos();
            frame.mesh(
                &self.beam,
                Transform::from_xyz(cos * BEAM_RADIUS, BEAM_Y, sin * BEAM_RADIUS).with_euler(0.0, angle, 0.0),
                beam_material,
            );

            for face in GaugeFace::ALL {
                let level = strain_level(self.strain(beam, face));
                let material = Material::lit(heat_color(level))
                    .with_emissive(Color::from_hex(GAUGE_EMISSIVE), 0.3 + 0.7 * level);
                frame.mesh(&self.gauge, face.transform(angle), material);
            }
        }

        //--- Load arrows ---------------------------------------------------
        for (axis, arrow) in self.load_arrows() {
            frame.arrow(&arrow, &self.arrow_head, axis_color(axis));
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
