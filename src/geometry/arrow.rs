//=========================================================================
// Arrow
//=========================================================================
//
// Direction marker made of a line shaft and a five-sided cone head.
//
// Layout along the arrow's local +Y axis:
// ```text
//   origin ──── shaft ────┤◄ head ►│
//   0          length - head_len    length
// ```
// The local frame is rotated so +Y points along `direction`.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Mat4, Quat, Vec3};

//=== Internal Dependencies ===============================================

use super::mesh::Mesh;

//=== Constants ===========================================================

/// Shortest shaft drawn, so a zero-length arrow still has a valid line.
const MIN_SHAFT: f32 = 1e-4;

/// Radial segments of the head cone.
const HEAD_SEGMENTS: u32 = 5;

//=== Arrow ===============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
    pub length: f32,
    pub head_length: f32,
    pub head_width: f32,
}

impl Arrow {
    /// Creates an arrow; a zero `direction` falls back to +Y.
    pub fn new(origin: Vec3, direction: Vec3, length: f32, head_length: f32, head_width: f32) -> Self {
        let direction = direction.try_normalize().unwrap_or(Vec3::Y);
        Self {
            origin,
            direction,
            length,
            head_length,
            head_width,
        }
    }

    /// Uniformly scales the arrow about its origin.
    pub fn scaled(mut self, factor: f32) -> Self {
        self.length *= factor;
        self.head_length *= factor;
        self.head_width *= factor;
        self
    }

    /// Rotation taking local +Y onto `direction`.
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_arc(Vec3::Y, self.direction)
    }

    /// Shaft endpoints in world space.
    pub fn shaft(&self) -> [Vec3; 2] {
        let shaft = (self.length - self.head_length).max(MIN_SHAFT);
        [self.origin, self.origin + self.direction * shaft]
    }

    /// World position of the head's tip.
    pub fn tip(&self) -> Vec3 {
        self.origin + self.direction * self.length
    }

    /// Model matrix placing [`Arrow::head_mesh`] at the end of the arrow.
    pub fn head_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.origin)
            * Mat4::from_translation(Vec3::new(0.0, self.length, 0.0))
            * Mat4::from_scale(Vec3::new(self.head_width, self.head_length, self.head_width))
    }

    /// Unit cone with its tip at the local origin and base at y = -1.
    pub fn head_mesh() -> Mesh {
        Mesh::cylinder(0.0, 0.5, 1.0, HEAD_SEGMENTS).translated(Vec3::new(0.0, -0.5, 0.0))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
