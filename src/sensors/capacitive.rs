//=========================================================================
// Capacitive Sensor
//=========================================================================
//
// Parallel-plate capacitor under a fingertip.
//
// Layout (side view, y up):
// ```text
//        ( probe )          y 2.775 − 0.5p
//   ════ top plate ════     y 1.7 − 0.5p
//   ░░░░ dielectric ░░░     y 1.1 − 0.25p, squashed by 1 − 0.5p
//   ──── bottom plate ──    y 0.8
//   [      housing     ]
//   [        base        ]
// ```
//
// Pressing narrows the plate gap; capacitance rises as d₀ / d and the
// field lines between the plates brighten.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use glam::Vec3;

//=== Internal Dependencies ===============================================

use super::common::{Bounce, Ramp};
use super::SensorKind;
use crate::core::{Action, GlobalContext, Scene};
use crate::geometry::{Mesh, Transform};
use crate::render::{Color, FrameBuilder, Material, Viewpoint};

//=== Constants ===========================================================

const BOTTOM_PLATE_Y: f32 = 0.8;
const TOP_PLATE_REST_Y: f32 = 1.7;
const FIELD_LINE_BASE_Y: f32 = 0.85;
const FIELD_LINES_PER_SIDE: usize = 5;
const FIELD_LINE_EXTENT: f32 = 1.5;

//=== CapacitiveScene =====================================================

pub struct CapacitiveScene {
    pressing: bool,
    pressure: Ramp,
    bounce: Bounce,
    /// Bounce offset for the current tick.
    offset: f32,

    base: Arc<Mesh>,
    housing: Arc<Mesh>,
    bottom_plate: Arc<Mesh>,
    top_plate: Arc<Mesh>,
    dielectric: Arc<Mesh>,
    probe: Arc<Mesh>,
}

impl CapacitiveScene {
    pub fn new() -> Self {
        Self {
            pressing: false,
            pressure: Ramp::default(),
            bounce: Bounce::default(),
            offset: 0.0,
            base: Arc::new(Mesh::cuboid(6.0, 0.5, 6.0)),
            housing: Arc::new(Mesh::cuboid(5.0, 1.0, 5.0)),
            bottom_plate: Arc::new(Mesh::cuboid(4.0, 0.1, 4.0)),
            top_plate: Arc::new(Mesh::cuboid(4.0, 0.15, 4.0)),
            dielectric: Arc::new(Mesh::cuboid(3.8, 0.5, 3.8)),
            probe: Arc::new(Mesh::sphere(1.0, 32, 32)),
        }
    }

    //--- State ------------------------------------------------------------

    pub fn is_pressing(&self) -> bool {
        self.pressing
    }

    pub fn pressure(&self) -> f32 {
        self.pressure.value()
    }

    //--- Layout -----------------------------------------------------------

    pub fn probe_y(&self) -> f32 {
        2.775 - 0.5 * self.pressure() + self.offset
    }

    pub fn top_plate_y(&self) -> f32 {
        TOP_PLATE_REST_Y - 0.5 * self.pressure() + 0.5 * self.offset
    }

    pub fn dielectric_y(&self) -> f32 {
        1.1 - 0.25 * self.pressure() + 0.25 * self.offset
    }

    pub fn dielectric_squash(&self) -> f32 {
        1.0 - 0.5 * self.pressure()
    }

    /// Upper end of the field lines; follows the plate without the bounce.
    fn field_line_top(&self) -> f32 {
        TOP_PLATE_REST_Y - 0.5 * self.pressure()
    }

    pub fn field_line_opacity(&self) -> f32 {
        (0.2 + 0.5 / (self.field_line_top() - BOTTOM_PLATE_Y)).clamp(0.0, 1.0)
    }

    /// C / C₀ for the current plate gap.
    pub fn relative_capacitance(&self) -> f32 {
        let rest_gap = TOP_PLATE_REST_Y - BOTTOM_PLATE_Y;
        let gap = (self.top_plate_y() - BOTTOM_PLATE_Y).max(1e-3);
        rest_gap / gap
    }

    /// Grid positions (x, z) of the field lines.
    pub fn field_line_positions() -> Vec<(f32, f32)> {
        let spacing = 2.0 * FIELD_LINE_EXTENT / 20f32.sqrt();
        let coords: Vec<f32> = (0..FIELD_LINES_PER_SIDE)
            .map(|k| -FIELD_LINE_EXTENT + k as f32 * spacing)
            .collect();
        coords
            .iter()
            .flat_map(|&x| coords.iter().map(move |&z| (x, z)))
            .collect()
    }
}

impl Default for CapacitiveScene {
    fn default() -> Self {
        Self::new()
    }
}

//=== Scene ===============================================================

impl Scene<SensorKind> for CapacitiveScene {
    fn title(&self) -> &str {
        "Capacitive Tactile Sensor"
    }

    fn instructions(&self) -> &str {
        "Press SPACE to apply/release pressure"
    }

    fn status(&self) -> String {
        format!(
            "{} | pressure {:.0}% | C/C0 {:.2}",
            if self.pressing { "Pressing" } else { "Released" },
            self.pressure() * 100.0,
            self.relative_capacitance()
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
        let plate = Color::from_hex(0xcccccc);

        // Static
        frame.mesh(&self.base, Transform::from_xyz(0.0, -0.25, 0.0), Material::lit(Color::from_hex(0x333333)));
        frame.mesh(&self.housing, Transform::from_xyz(0.0, 0.5, 0.0), Material::lit(Color::from_hex(0x666666)));
        frame.mesh(&self.bottom_plate, Transform::from_xyz(0.0, BOTTOM_PLATE_Y, 0.0), Material::lit(plate));

        // Moving
        frame.mesh(&self.top_plate, Transform::from_xyz(0.0, self.top_plate_y(), 0.0), Material::lit(plate));
        frame.mesh(
            &self.dielectric,
            Transform::from_xyz(0.0, self.dielectric_y(), 0.0).with_scale(Vec3::new(1.0, self.dielectric_squash(), 1.0)),
            Material::lit(Color::from_hex(0x88aaff)).with_opacity(0.7),
        );
        frame.mesh(
            &self.probe,
            Transform::from_xyz(0.0, self.probe_y(), 0.0),
            Material::lit(Color::from_hex(0xffcccc)).with_opacity(0.8),
        );

        //--- Field lines ---------------------------------------------------
        let top = self.field_line_top();
        let opacity = self.field_line_opacity();
        for (x, z) in Self::field_line_positions() {
            frame.segment(Vec3::new(x, FIELD_LINE_BASE_Y, z), Vec3::new(x, top, z), Color::CYAN, opacity);
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
