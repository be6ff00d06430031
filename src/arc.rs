//! Elliptical arc to cubic Bézier conversion.
//!
//! Implements the endpoint-to-center parameterization from the SVG
//! implementation notes: the arc is mapped onto a unit circle, its center
//! and angular span are solved there, and the span is split into pieces of
//! at most about 90 degrees, each approximated by one cubic curve.

use std::f64::consts::{FRAC_PI_2, PI};

use log::debug;

use crate::path::PathData;
use crate::vector::{Vector, Vertex};

/// Append the cubic approximation of an SVG `A` command to `path`.
///
/// `from` is the current point. Negative radii are treated as positive,
/// `x_axis_rotation` is in degrees. Coincident endpoints append nothing, a
/// zero radius appends a straight line. The final curve ends exactly at
/// `to`.
pub fn append_arc(
    path: &mut PathData,
    from: Vertex,
    radii: Vector,
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
    to: Vertex,
) {
    if from == to {
        debug!("append_arc: Endpoints coincide, skipping arc");
        return;
    }
    let mut rx = radii.x.abs();
    let mut ry = radii.y.abs();
    if rx == 0.0 || ry == 0.0 {
        debug!("append_arc: Zero radius, using a line");
        path.line_to(to);
        return;
    }

    let (sin_th, cos_th) = x_axis_rotation.to_radians().sin_cos();

    // Half chord in the frame of the ellipse axes.
    let half = (from - to) / 2.0;
    let dx1 = cos_th * half.x + sin_th * half.y;
    let dy1 = -sin_th * half.x + cos_th * half.y;
    let check = (dx1 * dx1) / (rx * rx) + (dy1 * dy1) / (ry * ry);
    if check > 1.0 {
        let scale = check.sqrt();
        debug!("append_arc: Radii too small, scaling by {}", scale);
        rx *= scale;
        ry *= scale;
    }

    // Map both endpoints into the space where the ellipse is a unit circle.
    let to_unit = |p: Vertex| {
        Vector::new(
            (cos_th * p.x + sin_th * p.y) / rx,
            (-sin_th * p.x + cos_th * p.y) / ry,
        )
    };
    let p0 = to_unit(from);
    let p1 = to_unit(to);

    let d = (p1 - p0).norm();
    let mut sfactor = (1.0 / d - 0.25).max(0.0).sqrt();
    if sweep == large_arc {
        sfactor = -sfactor;
    }
    let center = Vector::new(
        0.5 * (p0.x + p1.x) - sfactor * (p1.y - p0.y),
        0.5 * (p0.y + p1.y) + sfactor * (p1.x - p0.x),
    );

    let th0 = (p0.y - center.y).atan2(p0.x - center.x);
    let th1 = (p1.y - center.y).atan2(p1.x - center.x);
    let mut th_arc = th1 - th0;
    if th_arc < 0.0 && sweep {
        th_arc += 2.0 * PI;
    } else if th_arc > 0.0 && !sweep {
        th_arc -= 2.0 * PI;
    }

    let segments = (0.5 + (th_arc / (FRAC_PI_2 + 0.001)).abs()).round();
    let from_unit = UnitMapping::new(rx, ry, sin_th, cos_th);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = segments as usize;
    for i in 0..count {
        #[allow(clippy::cast_precision_loss)]
        let (start, end) = (
            th0 + i as f64 * th_arc / segments,
            th0 + (i + 1) as f64 * th_arc / segments,
        );
        let (c1, c2, end_point) = unit_arc_segment(center, start, end);
        // Snap to the exact end point so rounding does not accumulate.
        let end_point = if i + 1 == count {
            to
        } else {
            from_unit.apply(end_point)
        };
        path.curve_to(from_unit.apply(c1), from_unit.apply(c2), end_point);
    }
}

/// Cubic approximation of the unit circle arc around `center` from angle
/// `th0` to `th1`. Returns the two control points and the end point.
fn unit_arc_segment(center: Vector, th0: f64, th1: f64) -> (Vector, Vector, Vector) {
    let half = 0.5 * (th1 - th0);
    // Same as 4/3 * tan(span / 4).
    let t = (8.0 / 3.0) * (half * 0.5).sin().powi(2) / half.sin();
    let (sin0, cos0) = th0.sin_cos();
    let (sin1, cos1) = th1.sin_cos();
    let c1 = Vector::new(center.x + cos0 - t * sin0, center.y + sin0 + t * cos0);
    let end = Vector::new(center.x + cos1, center.y + sin1);
    let c2 = Vector::new(end.x + t * sin1, end.y - t * cos1);
    (c1, c2, end)
}

/// Maps unit circle coordinates back to user space: scale by the radii,
/// then rotate by the x axis rotation.
struct UnitMapping {
    a00: f64,
    a01: f64,
    a10: f64,
    a11: f64,
}

impl UnitMapping {
    fn new(rx: f64, ry: f64, sin_th: f64, cos_th: f64) -> Self {
        Self {
            a00: cos_th * rx,
            a01: -sin_th * ry,
            a10: sin_th * rx,
            a11: cos_th * ry,
        }
    }

    fn apply(&self, p: Vector) -> Vector {
        Vector::new(
            self.a00 * p.x + self.a01 * p.y,
            self.a10 * p.x + self.a11 * p.y,
        )
    }
}
