//=========================================================================
// Geometry
//=========================================================================
//
// CPU-side shape construction for the sensor scenes.
//
// Components:
// - `transform`: translation / XYZ-euler rotation / scale → model matrix
// - `mesh`: indexed triangle meshes (box, cylinder, sphere, tube)
// - `curve`: bezier curves with arc-length parameterization
// - `arrow`: shaft + cone direction markers
//
// All meshes are built in local space and placed by a model matrix.
// Nothing here touches the GPU.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod arrow;
pub mod curve;
pub mod mesh;
pub mod transform;

//=== Public API ==========================================================

pub use arrow::Arrow;
pub use curve::{ArcLengthTable, CubicBezier, Curve, QuadraticBezier};
pub use mesh::Mesh;
pub use transform::Transform;
