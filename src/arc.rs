//! Elliptical arc geometry.
//!
//! Arcs are written in SVG's endpoint form: radii, x-axis rotation, the two
//! flags, and the target point. Mapping an arc through an affine transform, or
//! approximating it with cubic Béziers, needs the ellipse itself, so every
//! [`EllipticalArcItem`] derives its center when it is created.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::number::format_number;
use crate::point::Point;
use crate::transform::Transform;

/// Radii, or distances between endpoints, below this are treated as zero.
const DEGENERATE_TOLERANCE: f64 = 1e-9;

/// One arc of an `A`/`a` command, with absolute endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipticalArcItem {
    pub rx: f64,
    pub ry: f64,
    /// Degrees.
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    from: Point,
    to: Point,
    center: Point,
    ellipse_start: Point,
}

/// The center form of an arc, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CenterParameterization {
    center: Point,
    rx: f64,
    ry: f64,
    theta1: f64,
    delta_theta: f64,
}

impl EllipticalArcItem {
    /// An arc from `from` to `to`, both absolute.
    pub fn new(
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        from: Point,
        to: Point,
    ) -> Self {
        let mut item = Self {
            rx,
            ry,
            x_axis_rotation,
            large_arc,
            sweep,
            from,
            to,
            center: Point::default(),
            ellipse_start: Point::default(),
        };

        let (center, rx) = match item.center_parameterization() {
            Some(cp) => (cp.center, cp.rx),
            None => (
                Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0),
                rx.abs(),
            ),
        };
        let (sin_phi, cos_phi) = x_axis_rotation.to_radians().sin_cos();
        item.center = center;
        item.ellipse_start = center + Point::new(rx * cos_phi, rx * sin_phi);
        item
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    /// The center of the ellipse the arc lies on.
    pub fn center(&self) -> Point {
        self.center
    }

    /// The end of the ellipse's rotated x semi-axis: `center + rx·(cos φ, sin φ)`.
    pub fn ellipse_start(&self) -> Point {
        self.ellipse_start
    }

    /// Zero radius or coincident endpoints. SVG draws such an arc as a
    /// straight line, or not at all.
    pub fn is_degenerate(&self) -> bool {
        self.rx.abs() < DEGENERATE_TOLERANCE
            || self.ry.abs() < DEGENERATE_TOLERANCE
            || self.from.distance_to(self.to) < DEGENERATE_TOLERANCE
    }

    /// Re-derive the endpoint form after mapping the arc through `t`.
    ///
    /// The radius along the rotated x axis is exact. The other radius keeps
    /// its ratio to it, which is only exact when `t` is a similarity.
    pub fn transform(&mut self, t: &Transform) {
        let from = t.apply(self.from);
        let to = t.apply(self.to);
        let center = t.apply(self.center);
        let ellipse_start = t.apply(self.ellipse_start);

        if !self.is_degenerate() {
            let axis = ellipse_start - center;
            let rx = axis.x.hypot(axis.y);
            self.ry *= rx / self.rx.abs();
            self.rx = rx;
            self.x_axis_rotation = angle_from_x_axis(axis, rx);
            if t.determinant() < 0.0 {
                self.sweep = !self.sweep;
            }
        }

        self.from = from;
        self.to = to;
        self.center = center;
        self.ellipse_start = ellipse_start;
    }

    /// Cubic Bézier points approximating the arc, three per curve. A
    /// degenerate arc becomes one straight curve.
    pub fn to_cubic_points(&self) -> Vec<Point> {
        let Some(cp) = self.center_parameterization() else {
            return vec![self.from, self.to, self.to];
        };

        let segments = (cp.delta_theta.abs() / FRAC_PI_2 - 1e-9).ceil().max(1.0) as usize;
        let step = cp.delta_theta / segments as f64;
        let mut points = Vec::with_capacity(segments * 3);
        for i in 0..segments {
            let th0 = cp.theta1 + step * i as f64;
            let th1 = th0 + step;
            points.extend(cubic_for_arc_segment(&cp, self.x_axis_rotation, th0, th1));
        }
        // The last point is the target exactly, not a rounding of it.
        if let Some(last) = points.last_mut() {
            *last = self.to;
        }
        points
    }

    /// `rx ry rotation large sweep x,y`. The target is written relative to the
    /// arc's own start point when `relative` is set.
    pub fn render(&self, precision: u8, relative: bool) -> String {
        let target = if relative {
            self.to - self.from
        } else {
            self.to
        };
        format!(
            "{} {} {} {} {} {}",
            format_number(self.rx, precision),
            format_number(self.ry, precision),
            format_number(self.x_axis_rotation, precision),
            u8::from(self.large_arc),
            u8::from(self.sweep),
            target.render(precision)
        )
    }

    /// Endpoint to center conversion (SVG 1.1, F.6.5). Radii too small to
    /// span the endpoints are scaled up uniformly.
    fn center_parameterization(&self) -> Option<CenterParameterization> {
        if self.is_degenerate() {
            return None;
        }

        let (x1, y1) = (self.from.x, self.from.y);
        let (x2, y2) = (self.to.x, self.to.y);
        let mut rx = self.rx.abs();
        let mut ry = self.ry.abs();
        let (sin_phi, cos_phi) = self.x_axis_rotation.to_radians().sin_cos();

        let mid_x = (x1 - x2) / 2.0;
        let mid_y = (y1 - y2) / 2.0;
        let x1_ = cos_phi * mid_x + sin_phi * mid_y;
        let y1_ = -sin_phi * mid_x + cos_phi * mid_y;

        let lambda = (x1_ / rx).powi(2) + (y1_ / ry).powi(2);
        if lambda > 1.0 {
            rx *= lambda.sqrt();
            ry *= lambda.sqrt();
        }

        let d = (rx * y1_).powi(2) + (ry * x1_).powi(2);
        if d == 0.0 {
            return None;
        }
        let mut k = ((rx * ry).powi(2) / d - 1.0).abs().sqrt();
        if self.sweep == self.large_arc {
            k = -k;
        }
        let cx_ = k * rx * y1_ / ry;
        let cy_ = -k * ry * x1_ / rx;

        let center = Point::new(
            cos_phi * cx_ - sin_phi * cy_ + (x1 + x2) / 2.0,
            sin_phi * cx_ + cos_phi * cy_ + (y1 + y2) / 2.0,
        );

        let ux = (x1_ - cx_) / rx;
        let uy = (y1_ - cy_) / ry;
        let vx = (-x1_ - cx_) / rx;
        let vy = (-y1_ - cy_) / ry;
        let u_len = ux.hypot(uy);
        let v_len = vx.hypot(vy);
        if u_len == 0.0 || v_len == 0.0 {
            return None;
        }

        let mut theta1 = (ux / u_len).clamp(-1.0, 1.0).acos();
        if uy < 0.0 {
            theta1 = -theta1;
        }

        let mut delta_theta = ((ux * vx + uy * vy) / (u_len * v_len))
            .clamp(-1.0, 1.0)
            .acos();
        if ux * vy - uy * vx < 0.0 {
            delta_theta = -delta_theta;
        }
        if self.sweep && delta_theta < 0.0 {
            delta_theta += PI * 2.0;
        } else if !self.sweep && delta_theta > 0.0 {
            delta_theta -= PI * 2.0;
        }

        Some(CenterParameterization {
            center,
            rx,
            ry,
            theta1,
            delta_theta,
        })
    }
}

fn cubic_for_arc_segment(
    cp: &CenterParameterization,
    x_axis_rotation: f64,
    th0: f64,
    th1: f64,
) -> [Point; 3] {
    let (sin_phi, cos_phi) = x_axis_rotation.to_radians().sin_cos();
    let (sin_th0, cos_th0) = th0.sin_cos();
    let (sin_th1, cos_th1) = th1.sin_cos();
    let (rx, ry) = (cp.rx, cp.ry);

    let th_half = 0.5 * (th1 - th0);
    let t = (8.0 / 3.0) * (th_half * 0.5).sin().powi(2) / th_half.sin();
    let x1 = rx * (cos_th0 - t * sin_th0);
    let y1 = ry * (sin_th0 + t * cos_th0);
    let x3 = rx * cos_th1;
    let y3 = ry * sin_th1;
    let x2 = x3 + rx * (t * sin_th1);
    let y2 = y3 + ry * (-t * cos_th1);

    let map = |x: f64, y: f64| {
        Point::new(
            cp.center.x + cos_phi * x - sin_phi * y,
            cp.center.y + sin_phi * x + cos_phi * y,
        )
    };
    [map(x1, y1), map(x2, y2), map(x3, y3)]
}

/// Angle of `v` from the positive x axis in degrees, in `[0, 360)`. `radius`
/// scales the tolerance used to snap to the axes.
fn angle_from_x_axis(v: Point, radius: f64) -> f64 {
    let tolerance = 1e-9 * radius.max(1.0);

    if v.y.abs() <= tolerance {
        return if v.x > 0.0 { 0.0 } else { 180.0 };
    }
    if v.x.abs() <= tolerance {
        return if v.y > 0.0 { 90.0 } else { 270.0 };
    }

    let theta = (v.y / v.x).atan().to_degrees();
    let angle = if v.x > 0.0 && v.y > 0.0 {
        theta
    } else if v.x > 0.0 {
        360.0 + theta
    } else {
        180.0 + theta
    };
    if angle >= 360.0 { angle - 360.0 } else { angle }
}
