//=========================================================================
// Curves
//=========================================================================
//
// Parametric 3D curves used for magnetic field lines and connectors.
//
// `point(t)` uses the raw bezier parameter. `point_at(u)` / `tangent_at(u)`
// take a normalized arc-length fraction instead, so that u = 0.5 is the
// geometric midpoint even on an asymmetric curve. The mapping is a
// cumulative chord-length table sampled at `ARC_DIVISIONS` points.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Constants ===========================================================

/// Samples used to build the arc-length table.
pub const ARC_DIVISIONS: usize = 200;

//=== Curve Trait =========================================================

/// A smooth curve over t ∈ [0, 1].
pub trait Curve {
    /// Point at raw parameter `t`.
    fn point(&self, t: f32) -> Vec3;

    /// First derivative at raw parameter `t`.
    fn derivative(&self, t: f32) -> Vec3;

    /// Unit tangent at raw parameter `t`.
    ///
    /// Falls back to the chord direction where the derivative vanishes
    /// (coincident control points).
    fn tangent(&self, t: f32) -> Vec3 {
        let d = self.derivative(t);
        if d.length_squared() > f32::EPSILON {
            return d.normalize();
        }
        let t1 = (t - 1e-4).max(0.0);
        let t2 = (t + 1e-4).min(1.0);
        (self.point(t2) - self.point(t1)).normalize_or_zero()
    }

    /// Point at arc-length fraction `u`.
    fn point_at(&self, u: f32) -> Vec3
    where
        Self: Sized,
    {
        let table = ArcLengthTable::new(self, ARC_DIVISIONS);
        self.point(table.parameter_at(u))
    }

    /// Unit tangent at arc-length fraction `u`.
    fn tangent_at(&self, u: f32) -> Vec3
    where
        Self: Sized,
    {
        let table = ArcLengthTable::new(self, ARC_DIVISIONS);
        self.tangent(table.parameter_at(u))
    }

    /// Approximate total length.
    fn length(&self) -> f32
    where
        Self: Sized,
    {
        ArcLengthTable::new(self, ARC_DIVISIONS).total()
    }
}

//=== ArcLengthTable ======================================================

/// Cumulative chord lengths for mapping arc-length fractions to `t`.
///
/// Build once per curve and reuse when sampling many points.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    lengths: Vec<f32>,
}

impl ArcLengthTable {
    pub fn new<C: Curve + ?Sized>(curve: &C, divisions: usize) -> Self {
        let divisions = divisions.max(1);
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = curve.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);

        for i in 1..=divisions {
            let p = curve.point(i as f32 / divisions as f32);
            sum += p.distance(last);
            lengths.push(sum);
            last = p;
        }

        Self { lengths }
    }

    pub fn total(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Maps an arc-length fraction `u ∈ [0, 1]` to the raw parameter `t`.
    pub fn parameter_at(&self, u: f32) -> f32 {
        let count = self.lengths.len();
        if count < 2 {
            return u.clamp(0.0, 1.0);
        }

        let target = u.clamp(0.0, 1.0) * self.total();

        // Last index whose cumulative length is <= target
        let i = self
            .lengths
            .partition_point(|&l| l <= target)
            .saturating_sub(1)
            .min(count - 2);

        let before = self.lengths[i];
        let segment = self.lengths[i + 1] - before;
        let fraction = if segment > 0.0 {
            ((target - before) / segment).clamp(0.0, 1.0)
        } else {
            0.0
        };

        (i as f32 + fraction) / (count - 1) as f32
    }
}

//=== QuadraticBezier =====================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    pub start: Vec3,
    pub control: Vec3,
    pub end: Vec3,
}

impl QuadraticBezier {
    pub fn new(start: Vec3, control: Vec3, end: Vec3) -> Self {
        Self { start, control, end }
    }
}

impl Curve for QuadraticBezier {
    fn point(&self, t: f32) -> Vec3 {
        let k = 1.0 - t;
        self.start * (k * k) + self.control * (2.0 * k * t) + self.end * (t * t)
    }

    fn derivative(&self, t: f32) -> Vec3 {
        (self.control - self.start) * (2.0 * (1.0 - t)) + (self.end - self.control) * (2.0 * t)
    }
}

//=== CubicBezier =========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub start: Vec3,
    pub control1: Vec3,
    pub control2: Vec3,
    pub end: Vec3,
}

impl CubicBezier {
    pub fn new(start: Vec3, control1: Vec3, control2: Vec3, end: Vec3) -> Self {
        Self { start, control1, control2, end }
    }
}

impl Curve for CubicBezier {
    fn point(&self, t: f32) -> Vec3 {
        let k = 1.0 - t;
        self.start * (k * k * k)
            + self.control1 * (3.0 * k * k * t)
            + self.control2 * (3.0 * k * t * t)
            + self.end * (t * t * t)
    }

    fn derivative(&self, t: f32) -> Vec3 {
        let k = 1.0 - t;
        (self.control1 - self.start) * (3.0 * k * k)
            + (self.control2 - self.control1) * (6.0 * k * t)
            + (self.end - self.control2) * (3.0 * t * t)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn field_arc() -> QuadraticBezier {
        QuadraticBezier::new(
            Vec3::new(0.0, 0.6, 0.65),
            Vec3::new(0.0, -0.05, 0.0),
            Vec3::new(0.0, 0.6, -0.65),
        )
    }

    //=====================================================================
    // Bezier Evaluation
    //=====================================================================

    #[test]
    fn quadratic_hits_endpoints() {
        let c = field_arc();
        assert_eq!(c.point(0.0), c.start);
        assert_eq!(c.point(1.0), c.end);
    }

    #[test]
    fn quadratic_midpoint_is_halfway_to_control() {
        let c = field_arc();
        let mid = c.point(0.5);
        // (start + 2·control + end) / 4
        assert_relative_eq!(mid.y, (0.6 + 2.0 * -0.05 + 0.6) / 4.0, epsilon = 1e-6);
        assert_relative_eq!(mid.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn cubic_hits_endpoints() {
        let c = CubicBezier::new(
            Vec3::new(1.0, 0.3, 0.0),
            Vec3::new(1.0, 0.28, 0.0),
            Vec3::new(1.0, 0.27, 0.0),
            Vec3::new(1.0, 0.25, 0.0),
        );
        assert_eq!(c.point(0.0), c.start);
        assert_relative_eq!(c.point(1.0).y, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn tangent_is_unit_length() {
        let c = field_arc();
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert_relative_eq!(c.tangent(t).length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn tangent_falls_back_when_derivative_vanishes() {
        let p = Vec3::new(0.0, 1.0, 0.0);
        let c = CubicBezier::new(p, p, Vec3::ZERO, Vec3::ZERO);
        let t = c.tangent(0.0);
        assert_relative_eq!(t.y, -1.0, epsilon = 1e-4);
    }

    //=====================================================================
    // Arc Length
    //=====================================================================

    #[test]
    fn arc_length_of_straight_line() {
        let c = QuadraticBezier::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(c.length(), 2.0, epsilon = 1e-4);
    }

    #[test]
    fn arc_table_is_monotonic_and_bounded() {
        let table = ArcLengthTable::new(&field_arc(), ARC_DIVISIONS);
        let mut last = -1.0;
        for i in 0..=20 {
            let t = table.parameter_at(i as f32 / 20.0);
            assert!(t >= last, "parameter must not decrease");
            assert!((0.0..=1.0).contains(&t));
            last = t;
        }
        assert_relative_eq!(table.parameter_at(0.0), 0.0);
        assert_relative_eq!(table.parameter_at(1.0), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn arc_midpoint_of_symmetric_curve_is_apex() {
        let c = field_arc();
        let mid = c.point_at(0.5);
        assert_relative_eq!(mid.z, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn arc_parameterization_is_uniform_on_skewed_curve() {
        // Control point near the start crowds raw samples there
        let c = QuadraticBezier::new(Vec3::ZERO, Vec3::new(0.1, 0.0, 0.0), Vec3::new(4.0, 0.0, 0.0));
        assert_relative_eq!(c.point_at(0.25).x, 1.0, epsilon = 1e-2);
        assert_relative_eq!(c.point_at(0.75).x, 3.0, epsilon = 1e-2);
    }

    #[test]
    fn out_of_range_fraction_is_clamped() {
        let table = ArcLengthTable::new(&field_arc(), 50);
        assert_relative_eq!(table.parameter_at(-1.0), 0.0);
        assert_relative_eq!(table.parameter_at(2.0), 1.0, epsilon = 1e-5);
    }
}
