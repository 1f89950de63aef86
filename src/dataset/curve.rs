//! Ribbon path: a Catmull-Rom curve resampled at uniform arc length.
//!
//! Pure Vec3 → Vec3 math with no GPU dependencies. The sample order is
//! significant: the ribbon reveals bulbs from index 0 upward.

use std::f32::consts::TAU;

use glam::Vec3;

use super::generator::TreeShape;
use crate::options::RibbonOptions;

/// Arc-length table resolution per control-point span.
const LENGTH_DIVISIONS_PER_SPAN: usize = 8;

/// Centripetal Catmull-Rom curve through a sequence of control points.
///
/// The curve passes through every control point. End tangents are
/// extrapolated by mirroring the neighbouring point.
#[derive(Debug, Clone)]
pub struct CurvePath {
    points: Vec<Vec3>,
    /// Cumulative chord length at each arc-length division.
    lengths: Vec<f32>,
}

impl CurvePath {
    /// Curve through `points` with its arc-length table precomputed.
    #[must_use]
    pub fn new(points: Vec<Vec3>) -> Self {
        let mut path = Self {
            points,
            lengths: Vec::new(),
        };
        path.lengths = path.cumulative_lengths();
        path
    }

    /// Control points.
    #[must_use]
    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Approximate total length.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at curve parameter `t` in `[0, 1]` (not arc-length uniform).
    #[must_use]
    pub fn point_at(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        match n {
            0 => return Vec3::ZERO,
            1 => return self.points[0],
            _ => {}
        }

        let spans = n - 1;
        let s = t.clamp(0.0, 1.0) * spans as f32;
        let i = (s.floor() as usize).min(spans - 1);
        let local = s - i as f32;

        let p1 = self.points[i];
        let p2 = self.points[i + 1];
        let p0 = if i == 0 { p1 * 2.0 - p2 } else { self.points[i - 1] };
        let p3 = if i + 2 >= n {
            p2 * 2.0 - p1
        } else {
            self.points[i + 2]
        };

        let (c0, c1, c2, c3) = centripetal_coefficients(p0, p1, p2, p3);
        c0 + (c1 + (c2 + c3 * local) * local) * local
    }

    /// Point at arc-length fraction `u` in `[0, 1]`.
    #[must_use]
    pub fn point_at_fraction(&self, u: f32) -> Vec3 {
        self.point_at(self.parameter_for_fraction(u))
    }

    /// `count` points at arc-length fractions `i / count`, `i < count`.
    ///
    /// The curve's final endpoint is not included, so consecutive samples
    /// are evenly spaced and index 0 is the first control point.
    #[must_use]
    pub fn spaced_points(&self, count: usize) -> Vec<Vec3> {
        (0..count)
            .map(|i| self.point_at_fraction(i as f32 / count as f32))
            .collect()
    }

    fn divisions(&self) -> usize {
        self.points.len().saturating_sub(1).max(1) * LENGTH_DIVISIONS_PER_SPAN
    }

    fn cumulative_lengths(&self) -> Vec<f32> {
        let divisions = self.divisions();
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut total = 0.0;
        let mut prev = self.point_at(0.0);
        lengths.push(0.0);
        for d in 1..=divisions {
            let p = self.point_at(d as f32 / divisions as f32);
            total += p.distance(prev);
            lengths.push(total);
            prev = p;
        }
        lengths
    }

    /// Invert the arc-length table: curve parameter whose cumulative length
    /// is `u * length()`.
    fn parameter_for_fraction(&self, u: f32) -> f32 {
        let total = self.length();
        if total <= 0.0 {
            return u.clamp(0.0, 1.0);
        }
        let target = u.clamp(0.0, 1.0) * total;
        let divisions = self.lengths.len() - 1;

        // First index whose cumulative length reaches the target.
        let hi = self
            .lengths
            .partition_point(|&l| l < target)
            .clamp(1, divisions);
        let lo = hi - 1;
        let span = self.lengths[hi] - self.lengths[lo];
        let local = if span > 0.0 {
            (target - self.lengths[lo]) / span
        } else {
            0.0
        };
        (lo as f32 + local) / divisions as f32
    }
}

/// Cubic coefficients of the centripetal (alpha 0.5) segment from `p1` to
/// `p2`, for the local parameter in `[0, 1]`.
fn centripetal_coefficients(
    p0: Vec3,
    p1: Vec3,
    p2: Vec3,
    p3: Vec3,
) -> (Vec3, Vec3, Vec3, Vec3) {
    let mut dt0 = p0.distance(p1).sqrt();
    let mut dt1 = p1.distance(p2).sqrt();
    let mut dt2 = p2.distance(p3).sqrt();
    // Coincident points fall back to the neighbouring span.
    if dt1 < 1e-4 {
        dt1 = 1.0;
    }
    if dt0 < 1e-4 {
        dt0 = dt1;
    }
    if dt2 < 1e-4 {
        dt2 = dt1;
    }

    let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;
    (
        p1,
        t1,
        -3.0 * p1 + 3.0 * p2 - 2.0 * t1 - t2,
        2.0 * p1 - 2.0 * p2 + t1 + t2,
    )
}

/// Control points of the ribbon: a loosening spiral with a sinusoidal
/// drape, hugging the cone from base to tip.
#[must_use]
pub fn ribbon_control_points(
    ribbon: &RibbonOptions,
    shape: &TreeShape,
) -> Vec<Vec3> {
    let spans = ribbon.control_spans.max(1);
    let turns = ribbon.turns as f32;
    (0..=spans)
        .map(|i| {
            let t = i as f32 / spans as f32;
            let height = (t - 0.5) * shape.height;
            let drape = (t * TAU * turns).sin() * ribbon.drape;
            let radius =
                (1.0 - t) * shape.radius + ribbon.radial_offset + drape;
            let angle = t * TAU * turns;
            Vec3::new(angle.cos() * radius, height, angle.sin() * radius)
        })
        .collect()
}

/// Build the ribbon path once and sample it into `ribbon.light_count`
/// ordered bulb positions.
#[must_use]
pub fn build_ribbon_path(ribbon: &RibbonOptions, shape: &TreeShape) -> Vec<Vec3> {
    let path = CurvePath::new(ribbon_control_points(ribbon, shape));
    let samples = path.spaced_points(ribbon.light_count as usize);
    log::debug!(
        "ribbon path: {} control points, length {:.2}, {} samples",
        path.control_points().len(),
        path.length(),
        samples.len()
    );
    samples
}
