//=========================================================================
// Frame Batching
//=========================================================================
//
// Flattens a `FrameSnapshot` into three world-space vertex streams, one
// per pipeline:
//
//   opaque       → depth write on,  no blending
//   lines        → depth write off, alpha blend, LineList
//   translucent  → depth write off, alpha blend, sorted far → near
//
// Vertices carry their own material terms (base color, emissive, lit
// flag), so each stream is drawn with a single call.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cmp::Ordering;

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

//=== Internal Dependencies ===============================================

use super::frame::{DrawItem, FrameSnapshot, Shading};

//=== SceneVertex =========================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// Linear RGB + opacity.
    pub color: [f32; 4],
    /// Linear RGB, already multiplied by intensity.
    pub emissive: [f32; 3],
    /// 1.0 for lit surfaces, 0.0 for flat color.
    pub lit: f32,
}

impl SceneVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3,
            2 => Float32x4,
            3 => Float32x3,
            4 => Float32,
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SceneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

//=== MeshStream ==========================================================

/// Indexed triangle list.
#[derive(Debug, Clone, Default)]
pub struct MeshStream {
    pub vertices: Vec<SceneVertex>,
    pub indices: Vec<u32>,
}

impl MeshStream {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn append(&mut self, item: &DrawItem) {
        let base = self.vertices.len() as u32;
        let normal_matrix = normal_matrix(item.model);
        let m = &item.material;
        let color = m.color.with_alpha(m.opacity);
        let emissive = m.emissive.scaled(m.emissive_intensity).to_array();
        let lit = match m.shading {
            Shading::Lit => 1.0,
            Shading::Unlit => 0.0,
        };

        self.vertices.extend(
            item.mesh
                .positions
                .iter()
                .zip(&item.mesh.normals)
                .map(|(&p, &n)| SceneVertex {
                    position: item.model.transform_point3(p).to_array(),
                    normal: (normal_matrix * n).normalize_or_zero().to_array(),
                    color,
                    emissive,
                    lit,
                }),
        );
        self.indices.extend(item.mesh.indices.iter().map(|&i| base + i));
    }
}

//=== FrameBatch ==========================================================

#[derive(Debug, Clone, Default)]
pub struct FrameBatch {
    pub opaque: MeshStream,
    pub translucent: MeshStream,
    /// Pairs of endpoints for a `LineList` topology.
    pub lines: Vec<SceneVertex>,
}

impl FrameBatch {
    pub fn build(frame: &FrameSnapshot) -> Self {
        let mut batch = Self::default();

        let mut translucent: Vec<(f32, &DrawItem)> = Vec::new();
        for item in &frame.items {
            if item.material.is_translucent() {
                let center = item.model.transform_point3(Vec3::ZERO);
                translucent.push((center.distance_squared(frame.viewpoint.eye), item));
            } else {
                batch.opaque.append(item);
            }
        }

        // Far to near; stable so equal depths keep submission order
        translucent.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        for (_, item) in translucent {
            batch.translucent.append(item);
        }

        for strip in &frame.lines {
            let color = strip.color.with_alpha(strip.opacity);
            for pair in strip.points.windows(2) {
                for p in pair {
                    batch.lines.push(SceneVertex {
                        position: p.to_array(),
                        color,
                        ..SceneVertex::default()
                    });
                }
            }
        }

        batch
    }
}

//=== Helpers =============================================================

/// Inverse-transpose of the model's linear part; plain linear part when
/// the model is singular.
fn normal_matrix(model: Mat4) -> Mat3 {
    let linear = Mat3::from_mat4(model);
    if linear.determinant().abs() > 1e-8 {
        linear.inverse().transpose()
    } else {
        linear
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Mesh, Transform};
    use crate::render::color::Color;
    use crate::render::frame::{FrameBuilder, Material, Viewpoint};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn snapshot(build: impl FnOnce(&mut FrameBuilder)) -> FrameSnapshot {
        let mut frame = FrameBuilder::new();
        build(&mut frame);
        frame.finish(0, Color::WHITE, Viewpoint::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO), String::new())
    }

    #[test]
    fn opaque_and_translucent_are_separated() {
        let cube = Arc::new(Mesh::cuboid(1.0, 1.0, 1.0));
        let frame = snapshot(|f| {
            f.mesh(&cube, Mat4::IDENTITY, Material::lit(Color::WHITE));
            f.mesh(&cube, Mat4::IDENTITY, Material::lit(Color::WHITE).with_opacity(0.5));
        });
        let batch = FrameBatch::build(&frame);
        assert_eq!(batch.opaque.vertices.len(), 24);
        assert_eq!(batch.translucent.vertices.len(), 24);
        assert_eq!(batch.translucent.vertices[0].color[3], 0.5);
    }

    #[test]
    fn translucent_items_sort_far_to_near() {
        let cube = Arc::new(Mesh::cuboid(1.0, 1.0, 1.0));
        let near = Material::lit(Color::RED).with_opacity(0.5);
        let far = Material::lit(Color::BLUE).with_opacity(0.5);
        let frame = snapshot(|f| {
            f.mesh(&cube, Transform::from_xyz(0.0, 0.0, 5.0), near);
            f.mesh(&cube, Transform::from_xyz(0.0, 0.0, -5.0), far);
        });
        let batch = FrameBatch::build(&frame);
        assert_eq!(batch.translucent.vertices[0].color[2], 1.0, "far (blue) item first");
        assert_eq!(batch.translucent.vertices[24].color[0], 1.0, "near (red) item last");
    }

    #[test]
    fn indices_are_rebased_per_item() {
        let cube = Arc::new(Mesh::cuboid(1.0, 1.0, 1.0));
        let frame = snapshot(|f| {
            f.mesh(&cube, Mat4::IDENTITY, Material::lit(Color::WHITE));
            f.mesh(&cube, Mat4::IDENTITY, Material::lit(Color::WHITE));
        });
        let batch = FrameBatch::build(&frame);
        assert_eq!(batch.opaque.indices.len(), 72);
        assert_eq!(*batch.opaque.indices.iter().max().unwrap(), 47);
    }

    #[test]
    fn positions_are_transformed_to_world() {
        let cube = Arc::new(Mesh::cuboid(2.0, 2.0, 2.0));
        let frame = snapshot(|f| {
            f.mesh(&cube, Transform::from_xyz(0.0, 3.0, 0.0), Material::lit(Color::WHITE));
        });
        let batch = FrameBatch::build(&frame);
        let min_y = batch.opaque.vertices.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        assert_relative_eq!(min_y, 2.0);
    }

    #[test]
    fn normals_survive_nonuniform_scale() {
        let cube = Arc::new(Mesh::cuboid(1.0, 1.0, 1.0));
        let model = Transform::IDENTITY.with_scale(Vec3::new(1.0, 0.5, 1.0));
        let frame = snapshot(|f| f.mesh(&cube, model, Material::lit(Color::WHITE)));
        let batch = FrameBatch::build(&frame);
        for v in &batch.opaque.vertices {
            let n = Vec3::from(v.normal);
            assert_relative_eq!(n.length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn emissive_is_premultiplied_by_intensity() {
        let cube = Arc::new(Mesh::cuboid(1.0, 1.0, 1.0));
        let m = Material::lit(Color::WHITE).with_emissive(Color::rgb(0.5, 0.25, 0.0), 0.5);
        let frame = snapshot(|f| f.mesh(&cube, Mat4::IDENTITY, m));
        let v = FrameBatch::build(&frame).opaque.vertices[0];
        assert_eq!(v.emissive, [0.25, 0.125, 0.0]);
        assert_eq!(v.lit, 1.0);
    }

    #[test]
    fn polyline_expands_to_segment_pairs() {
        let frame = snapshot(|f| {
            f.line(vec![Vec3::ZERO, Vec3::X, Vec3::Y], Color::CYAN, 0.4);
        });
        let batch = FrameBatch::build(&frame);
        assert_eq!(batch.lines.len(), 4);
        assert_eq!(batch.lines[1].position, batch.lines[2].position);
        assert_eq!(batch.lines[0].color[3], 0.4);
        assert_eq!(batch.lines[0].lit, 0.0);
    }
}
