//=========================================================================
// Transform
//=========================================================================
//
// Position / rotation / scale triple for placing a mesh in the world.
//
// Rotations given as euler angles use XYZ order: the combined rotation
// is Rx · Ry · Rz, so the Z rotation is applied to the mesh first.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Mat4, Quat, Vec3};

//=== Transform ===========================================================

/// Local-to-world placement of a single mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    //--- Construction -----------------------------------------------------

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::from_translation(Vec3::new(x, y, z))
    }

    //--- Builders ---------------------------------------------------------

    /// Replaces the rotation with an XYZ euler rotation (radians).
    pub fn with_euler(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = euler_xyz(x, y, z);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    //--- Conversion -------------------------------------------------------

    /// Model matrix: translate · rotate · scale.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Transform> for Mat4 {
    fn from(transform: Transform) -> Self {
        transform.matrix()
    }
}

//=== Helpers =============================================================

/// XYZ-order euler rotation (Rx · Ry · Rz).
pub fn euler_xyz(x: f32, y: f32, z: f32) -> Quat {
    Quat::from_rotation_x(x) * Quat::from_rotation_y(y) * Quat::from_rotation_z(z)
}

//=========================================================================
// Unit Tests
//=========================================================================
