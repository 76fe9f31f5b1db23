//=========================================================================
// Visual-Tactile Sensor
//=========================================================================
//
// Gel contact surface imaged from below by a camera.
//
// Layout (side view):
// ```text
//              ( probe )        y 1.8 − p, moved in x/z by arrow keys
//   ▒▒▒▒▒▒ gel housing ▒▒▒▒▒    contact at 0.8 − 0.5p
//   [        base         ]
//            \ | /               rays: 8 cyan + 1 yellow central
//             \|/
//            [lens]              y −2
//           [camera]             y −2.5
// ```
//
// The inset panel shows what the camera sees: a bright contact blob that
// grows with pressure, ringed in red, with sensor noise on top.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::{FRAC_PI_2, TAU};
use std::sync::Arc;

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

//=== Internal Dependencies ===============================================

use super::common::Ramp;
use super::SensorKind;
use crate::core::{Action, GlobalContext, Scene};
use crate::geometry::{Mesh, Transform};
use crate::render::{Anchor, Color, FrameBuilder, Material, OverlayPanel, Shape, Viewpoint};

//=== Constants ===========================================================

const PROBE_REST_Y: f32 = 1.8;
const PROBE_STEP: f32 = 0.2;
/// Half-extent of the housing; the probe stays above it.
const PROBE_LIMIT: f32 = 2.5;

const GEL_SURFACE_Y: f32 = 0.8;
const LENS_ORIGIN: Vec3 = Vec3::new(0.0, -2.0, 0.0);
const RAY_COUNT: usize = 8;

/// Inset camera image size in pixels.
pub const IMAGE_SIZE: Vec2 = Vec2::new(200.0, 150.0);
/// Pixels per world unit of contact offset in the image.
const IMAGE_SCALE: f32 = 20.0;
const SPECK_COUNT: usize = 50;

//=== VisualTactileScene ==================================================

pub struct VisualTactileScene {
    pressing: bool,
    pressure: Ramp,
    probe_xz: Vec2,
    /// Sensor noise for the current image: (top-left, size).
    specks: Vec<(Vec2, Vec2)>,
    rng: StdRng,

    base: Arc<Mesh>,
    housing: Arc<Mesh>,
    camera_body: Arc<Mesh>,
    lens: Arc<Mesh>,
    lens_glass: Arc<Mesh>,
    probe: Arc<Mesh>,
}

impl VisualTactileScene {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Scene with reproducible sensor noise.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            pressing: false,
            pressure: Ramp::default(),
            probe_xz: Vec2::ZERO,
            specks: Vec::with_capacity(SPECK_COUNT),
            rng,
            base: Arc::new(Mesh::cuboid(6.0, 0.5, 6.0)),
            housing: Arc::new(Mesh::cuboid(5.0, 0.8, 5.0)),
            camera_body: Arc::new(Mesh::cuboid(1.5, 0.8, 1.0)),
            lens: Arc::new(Mesh::cylinder(0.4, 0.3, 0.5, 16)),
            lens_glass: Arc::new(Mesh::cylinder(0.25, 0.25, 0.05, 16)),
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

    pub fn probe_position(&self) -> Vec3 {
        Vec3::new(self.probe_xz.x, PROBE_REST_Y - self.pressure(), self.probe_xz.y)
    }

    /// Contact point on the gel in (x, z).
    pub fn contact(&self) -> Vec2 {
        self.probe_xz / 2.0
    }

    pub fn contact_y(&self) -> f32 {
        GEL_SURFACE_Y - 0.5 * self.pressure()
    }

    //--- Rays -------------------------------------------------------------

    /// End points of the cyan fan around the contact.
    pub fn ray_targets(&self) -> Vec<Vec3> {
        let contact = self.contact();
        let spread = 0.5 + 0.5 * self.pressure();
        let y = self.contact_y();
        (0..RAY_COUNT)
            .map(|i| {
                let angle = i as f32 / RAY_COUNT as f32 * TAU;
                Vec3::new(contact.x + angle.cos() * spread, y, contact.y + angle.sin() * spread)
            })
            .collect()
    }

    pub fn central_ray_target(&self) -> Vec3 {
        let contact = self.contact();
        Vec3::new(contact.x, self.contact_y(), contact.y)
    }

    //--- Input ------------------------------------------------------------

    fn nudge(&mut self, step: Vec2) {
        self.probe_xz = (self.probe_xz + step * PROBE_STEP).clamp(Vec2::splat(-PROBE_LIMIT), Vec2::splat(PROBE_LIMIT));
    }

    //--- Camera Image -----------------------------------------------------

    fn regenerate_specks(&mut self) {
        self.specks.clear();
        if self.pressure() <= 0.0 {
            return;
        }
        for _ in 0..SPECK_COUNT {
            let origin = Vec2::new(
                self.rng.gen_range(0.0..IMAGE_SIZE.x),
                self.rng.gen_range(0.0..IMAGE_SIZE.y),
            );
            let size = Vec2::splat(self.rng.gen_range(1.0..4.0)).min(IMAGE_SIZE - origin);
            self.specks.push((origin, size));
        }
    }

    /// The internal camera's view for the current tick.
    pub fn camera_image(&self) -> OverlayPanel {
        let mut panel = OverlayPanel::new(Anchor::TopRight, IMAGE_SIZE, Color::BLACK)
            .with_border(Color::from_hex(0x444444), 2.0);

        let p = self.pressure();
        if p <= 0.0 {
            return panel;
        }

        let center = IMAGE_SIZE / 2.0 + self.contact() * IMAGE_SCALE;
        panel.push(Shape::Disc { center, radius: 40.0 * p, color: Color::WHITE, alpha: 1.0 });
        for &(origin, size) in &self.specks {
            panel.push(Shape::Rect { origin, size, color: Color::BLACK, alpha: 0.2 });
        }
        panel.push(Shape::Ring { center, radius: 45.0 * p, width: 2.0, color: Color::RED, alpha: 1.0 });
        panel
    }
}

impl Default for VisualTactileScene {
    fn default() -> Self {
        Self::new()
    }
}

//=== Scene ===============================================================

impl Scene<SensorKind> for VisualTactileScene {
    fn title(&self) -> &str {
        "Visual-Tactile Sensor"
    }

    fn instructions(&self) -> &str {
        "Press SPACE to apply/release pressure / Use ARROW KEYS to move the object"
    }

    fn status(&self) -> String {
        if self.pressure() <= 0.0 {
            return String::from("No contact detected");
        }
        let contact = self.contact();
        format!(
            "Pressure: {:.0}% | X: {:.2} | Z: {:.2}",
            self.pressure() * 100.0,
            contact.x,
            contact.y
        )
    }

    fn home_view(&self) -> Viewpoint {
        Viewpoint::new(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO)
    }

    fn update(&mut self, context: &GlobalContext<SensorKind>) {
        for action in &context.actions {
            match action {
                Action::Press => self.pressing = !self.pressing,
                Action::Nudge(direction) => self.nudge(direction.step()),
                _ => {}
            }
        }

        self.pressure.approach(if self.pressing { 1.0 } else { 0.0 }, context.dt());
        self.regenerate_specks();
    }

    fn compose(&self, frame: &mut FrameBuilder) {
        let translucent = |hex: u32, opacity: f32| Material::lit(Color::from_hex(hex)).with_opacity(opacity);
        let lens_axis = |y: f32| Transform::from_xyz(0.0, y, 0.0).with_euler(FRAC_PI_2, 0.0, 0.0);

        frame.mesh(&self.base, Transform::from_xyz(0.0, -0.25, 0.0), translucent(0x333333, 0.7));
        frame.mesh(&self.housing, Transform::from_xyz(0.0, 0.4, 0.0), translucent(0x666666, 0.7));

        //--- External camera -----------------------------------------------
        frame.mesh(&self.camera_body, Transform::from_xyz(0.0, -2.5, 0.0), translucent(0x333333, 0.8));
        frame.mesh(&self.lens, lens_axis(-2.0), translucent(0x111111, 0.8));
        frame.mesh(
            &self.lens_glass,
            lens_axis(-1.7),
            translucent(0x8888ff, 0.7).with_emissive(Color::from_hex(0x4444ff), 0.5),
        );

        frame.mesh(
            &self.probe,
            Transform::from_translation(self.probe_position()),
            translucent(0xffcccc, 0.8),
        );

        //--- Rays ----------------------------------------------------------
        for target in self.ray_targets() {
            frame.segment(LENS_ORIGIN, target, Color::CYAN, 0.4);
        }
        frame.segment(LENS_ORIGIN, self.central_ray_target(), Color::YELLOW, 0.6);

        frame.overlay(self.camera_image());
    }

    fn reset(&mut self) {
        let rng = std::mem::replace(&mut self.rng, StdRng::seed_from_u64(0));
        *self = Self::with_rng(rng);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
