//=========================================================================
// Actions
//=========================================================================
//
// High-level commands produced from key presses.
//
// Scenes and global systems react to actions rather than raw keys, so
// rebinding never touches scene code.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Vec2, Vec3};

//=== Direction ===========================================================

/// Arrow-key direction on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit step in (x, z). Up moves away from the default camera (−z).
    pub fn step(self) -> Vec2 {
        match self {
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
        }
    }
}

//=== LoadAxis ============================================================

/// One of the six wrench components a force/torque sensor measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadAxis {
    ForceX,
    ForceY,
    ForceZ,
    TorqueX,
    TorqueY,
    TorqueZ,
}

impl LoadAxis {
    pub const ALL: [Self; 6] = [
        Self::ForceX,
        Self::ForceY,
        Self::ForceZ,
        Self::TorqueX,
        Self::TorqueY,
        Self::TorqueZ,
    ];

    pub fn is_force(self) -> bool {
        matches!(self, Self::ForceX | Self::ForceY | Self::ForceZ)
    }

    /// Load vector this axis selects. Vertical force points down.
    pub fn vector(self) -> Vec3 {
        match self {
            Self::ForceX | Self::TorqueX => Vec3::X,
            Self::ForceY => Vec3::NEG_Y,
            Self::TorqueY => Vec3::Y,
            Self::ForceZ | Self::TorqueZ => Vec3::Z,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ForceX => "Fx",
            Self::ForceY => "Fy",
            Self::ForceZ => "Fz",
            Self::TorqueX => "Tx",
            Self::TorqueY => "Ty",
            Self::TorqueZ => "Tz",
        }
    }
}

//=== Action ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Apply/release, or advance the load state.
    Press,
    /// Move the probe one step.
    Nudge(Direction),
    /// Select which wrench component is applied.
    SelectLoad(LoadAxis),
    NextSensor,
    PreviousSensor,
    /// Restore the active sensor to its initial state.
    RestartSensor,
    /// Return the camera to the sensor's home view.
    ResetView,
    Quit,
}

//=========================================================================
// Unit Tests
//=========================================================================
