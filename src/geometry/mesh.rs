//=========================================================================
// Mesh
//=========================================================================
//
// Indexed triangle meshes with per-vertex normals.
//
// Primitives are centered on the origin with Y up, matching the usual
// scene-graph conventions:
// - `cuboid(w, h, d)`: axis-aligned box
// - `cylinder(rt, rb, h, n)`: Y-axis frustum, caps where radius > 0
// - `sphere(r, ws, hs)`: UV sphere, poles on ±Y
// - `tube(curve, ...)`: swept circle along a curve
//
// Winding is counter-clockwise seen from outside.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec3};

//=== Internal Dependencies ===============================================

use super::curve::{ArcLengthTable, Curve, ARC_DIVISIONS};

//=== Mesh ================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    //--- Queries ----------------------------------------------------------

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Axis-aligned bounds as `(min, max)`; `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }

    //--- Adjustments ------------------------------------------------------

    /// Shifts every vertex by `offset` (bakes a pivot change).
    pub fn translated(mut self, offset: Vec3) -> Self {
        for p in &mut self.positions {
            *p += offset;
        }
        self
    }

    //--- Primitives -------------------------------------------------------

    /// Axis-aligned box centered on the origin.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width, height, depth) * 0.5;

        // (normal, u, v) with u × v = normal
        const FACES: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];

        let mut mesh = Self::with_capacity(24, 36);
        for (normal, u, v) in FACES {
            let center = normal * half;
            let u = u * half;
            let v = v * half;
            let base = mesh.positions.len() as u32;

            for corner in [center - u - v, center + u - v, center + u + v, center - u + v] {
                mesh.positions.push(corner);
                mesh.normals.push(normal);
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }

    /// Y-axis cylinder or cone frustum centered on the origin.
    ///
    /// Side vertices sit at `(r·sinθ, y, r·cosθ)`. A cap is emitted only
    /// for an end whose radius is positive, so `cylinder(0.0, r, h, n)` is
    /// a cone with its tip at `+h/2`.
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        let segments = radial_segments.max(3);
        let half_height = height * 0.5;
        let slope = if height > 0.0 {
            (radius_bottom - radius_top) / height
        } else {
            0.0
        };

        let mut mesh = Self::with_capacity(
            (segments as usize + 1) * 4 + 2,
            segments as usize * 12,
        );

        //--- Side ---------------------------------------------------------
        for row in 0..=1u32 {
            let v = row as f32;
            let radius = v * (radius_bottom - radius_top) + radius_top;
            let y = half_height - v * height;
            for i in 0..=segments {
                let theta = i as f32 / segments as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                mesh.positions.push(Vec3::new(radius * sin, y, radius * cos));
                mesh.normals.push(Vec3::new(sin, slope, cos).normalize());
            }
        }
        let stride = segments + 1;
        for i in 0..segments {
            let a = i;
            let b = stride + i;
            let c = stride + i + 1;
            let d = i + 1;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }

        //--- Caps ---------------------------------------------------------
        if radius_top > 0.0 {
            mesh.push_cap(radius_top, half_height, segments, true);
        }
        if radius_bottom > 0.0 {
            mesh.push_cap(radius_bottom, -half_height, segments, false);
        }
        mesh
    }

    /// UV sphere centered on the origin.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let ws = width_segments.max(3);
        let hs = height_segments.max(2);
        let mut mesh = Self::with_capacity(
            ((ws + 1) * (hs + 1)) as usize,
            (ws * hs * 6) as usize,
        );

        for iy in 0..=hs {
            let v = iy as f32 / hs as f32;
            for ix in 0..=ws {
                let u = ix as f32 / ws as f32;
                let normal = Vec3::new(
                    -(u * TAU).cos() * (v * PI).sin(),
                    (v * PI).cos(),
                    (u * TAU).sin() * (v * PI).sin(),
                );
                mesh.positions.push(normal * radius);
                mesh.normals.push(normal);
            }
        }

        let row = ws + 1;
        for iy in 0..hs {
            for ix in 0..ws {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                if iy != 0 {
                    mesh.indices.extend_from_slice(&[a, b, d]);
                }
                if iy != hs - 1 {
                    mesh.indices.extend_from_slice(&[b, c, d]);
                }
            }
        }
        mesh
    }

    /// Circular tube swept along `curve` (open ends).
    ///
    /// Rings are placed at equal arc-length steps and oriented with
    /// parallel-transport frames, so the tube does not twist.
    pub fn tube<C: Curve>(
        curve: &C,
        tubular_segments: u32,
        radius: f32,
        radial_segments: u32,
    ) -> Self {
        let segments = tubular_segments.max(1);
        let radial = radial_segments.max(3);
        let table = ArcLengthTable::new(curve, ARC_DIVISIONS);
        let frames = transport_frames(curve, &table, segments);

        let mut mesh = Self::with_capacity(
            ((segments + 1) * (radial + 1)) as usize,
            (segments * radial * 6) as usize,
        );

        for (i, frame) in frames.iter().enumerate() {
            let u = i as f32 / segments as f32;
            let center = curve.point(table.parameter_at(u));
            for j in 0..=radial {
                let angle = j as f32 / radial as f32 * TAU;
                let (sin, cos) = (angle.sin(), -angle.cos());
                let normal = (frame.normal * cos + frame.binormal * sin).normalize_or_zero();
                mesh.positions.push(center + normal * radius);
                mesh.normals.push(normal);
            }
        }

        let row = radial + 1;
        for j in 1..=segments {
            for i in 1..=radial {
                let a = row * (j - 1) + (i - 1);
                let b = row * j + (i - 1);
                let c = row * j + i;
                let d = row * (j - 1) + i;
                mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        mesh
    }

    //--- Internal Helpers -------------------------------------------------

    fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    fn push_cap(&mut self, radius: f32, y: f32, segments: u32, top: bool) {
        let normal = if top { Vec3::Y } else { Vec3::NEG_Y };
        let center = self.positions.len() as u32;
        self.positions.push(Vec3::new(0.0, y, 0.0));
        self.normals.push(normal);

        let rim = self.positions.len() as u32;
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            self.positions.push(Vec3::new(radius * sin, y, radius * cos));
            self.normals.push(normal);
        }

        for i in 0..segments {
            if top {
                self.indices.extend_from_slice(&[center, rim + i, rim + i + 1]);
            } else {
                self.indices.extend_from_slice(&[center, rim + i + 1, rim + i]);
            }
        }
    }
}

//=== Frames ==============================================================

#[derive(Debug, Clone, Copy)]
struct Frame {
    normal: Vec3,
    binormal: Vec3,
}

/// Rotation-minimizing frames at `segments + 1` equal arc-length stations.
fn transport_frames<C: Curve>(curve: &C, table: &ArcLengthTable, segments: u32) -> Vec<Frame> {
    let tangents: Vec<Vec3> = (0..=segments)
        .map(|i| curve.tangent(table.parameter_at(i as f32 / segments as f32)))
        .collect();

    // Seed normal: perpendicular to the tangent, away from its dominant axis
    let t0 = tangents[0];
    let abs = t0.abs();
    let axis = if abs.x <= abs.y && abs.x <= abs.z {
        Vec3::X
    } else if abs.y <= abs.z {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let side = t0.cross(axis).normalize_or_zero();
    let mut normal = t0.cross(side);

    let mut frames = Vec::with_capacity(tangents.len());
    frames.push(Frame {
        normal,
        binormal: t0.cross(normal),
    });

    for pair in tangents.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let axis = prev.cross(next);
        if axis.length() > f32::EPSILON {
            let theta = prev.dot(next).clamp(-1.0, 1.0).acos();
            normal = Quat::from_axis_angle(axis.normalize(), theta) * normal;
        }
        frames.push(Frame {
            normal,
            binormal: next.cross(normal),
        });
    }
    frames
}

//=========================================================================
// Unit Tests
//=========================================================================
