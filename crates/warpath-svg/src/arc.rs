//! Elliptical arc to cubic Bézier conversion.
//!
//! Arcs in endpoint parameterization are converted to center
//! parameterization and split into pieces of at most a quarter turn, each
//! approximated by one cubic with the standard `4/3 tan(θ/4)` handle length.

use std::f64::consts::{FRAC_PI_2, TAU};

use warpath_core::{Point, Segment};

/// Endpoint parameterization of one arc command.
#[derive(Debug, Clone, Copy)]
pub struct Arc {
    pub from: Point,
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the ellipse's x-axis, in degrees.
    pub rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub to: Point,
}

impl Arc {
    /// Approximate the arc with cubic segments.
    ///
    /// Coincident endpoints yield no segments and a zero radius yields a
    /// straight line, as SVG renderers do.
    pub fn to_cubics(&self) -> Vec<Segment> {
        if self.from == self.to {
            return Vec::new();
        }
        if self.rx == 0.0 || self.ry == 0.0 {
            return vec![Segment::line(self.from, self.to)];
        }

        let (sin_phi, cos_phi) = self.rotation.to_radians().sin_cos();
        let mut rx = self.rx.abs();
        let mut ry = self.ry.abs();

        // Midpoint-relative coordinates in the ellipse frame.
        let dx = (self.from.x - self.to.x) / 2.0;
        let dy = (self.from.y - self.to.y) / 2.0;
        let x1 = cos_phi.mul_add(dx, sin_phi * dy);
        let y1 = (-sin_phi).mul_add(dx, cos_phi * dy);

        // Scale radii up if the endpoints cannot be reached.
        let lambda = (x1 * x1) / (rx * rx) + (y1 * y1) / (ry * ry);
        if lambda > 1.0 {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
        }

        let num = (rx * ry).powi(2) - (rx * y1).powi(2) - (ry * x1).powi(2);
        let den = (rx * y1).powi(2) + (ry * x1).powi(2);
        let sign = if self.large_arc == self.sweep { -1.0 } else { 1.0 };
        let coef = sign * (num / den).max(0.0).sqrt();
        let cx1 = coef * rx * y1 / ry;
        let cy1 = -coef * ry * x1 / rx;

        let center = Point::new(
            cos_phi.mul_add(cx1, -sin_phi * cy1) + (self.from.x + self.to.x) / 2.0,
            sin_phi.mul_add(cx1, cos_phi * cy1) + (self.from.y + self.to.y) / 2.0,
        );

        let start_angle = angle((1.0, 0.0), ((x1 - cx1) / rx, (y1 - cy1) / ry));
        let mut sweep_angle = angle(
            ((x1 - cx1) / rx, (y1 - cy1) / ry),
            ((-x1 - cx1) / rx, (-y1 - cy1) / ry),
        );
        if !self.sweep && sweep_angle > 0.0 {
            sweep_angle -= TAU;
        } else if self.sweep && sweep_angle < 0.0 {
            sweep_angle += TAU;
        }

        let ellipse = Ellipse {
            center,
            rx,
            ry,
            sin_phi,
            cos_phi,
        };

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let (pieces, step) = {
            let pieces = (sweep_angle.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
            (pieces, sweep_angle / pieces as f64)
        };
        let handle = 4.0 / 3.0 * (step / 4.0).tan();

        let mut segments = Vec::with_capacity(pieces);
        let mut start = self.from;
        for i in 0..pieces {
            #[allow(clippy::cast_precision_loss)]
            let t0 = (i as f64).mul_add(step, start_angle);
            let t1 = t0 + step;
            let end = if i + 1 == pieces {
                self.to
            } else {
                ellipse.point(t1)
            };
            let d0 = ellipse.derivative(t0);
            let d1 = ellipse.derivative(t1);
            segments.push(Segment::cubic(
                start,
                Point::new(handle.mul_add(d0.x, start.x), handle.mul_add(d0.y, start.y)),
                Point::new((-handle).mul_add(d1.x, end.x), (-handle).mul_add(d1.y, end.y)),
                end,
            ));
            start = end;
        }
        segments
    }
}

struct Ellipse {
    center: Point,
    rx: f64,
    ry: f64,
    sin_phi: f64,
    cos_phi: f64,
}

impl Ellipse {
    fn point(&self, theta: f64) -> Point {
        let (sin, cos) = theta.sin_cos();
        let x = self.rx * cos;
        let y = self.ry * sin;
        Point::new(
            self.center.x + self.cos_phi.mul_add(x, -self.sin_phi * y),
            self.center.y + self.sin_phi.mul_add(x, self.cos_phi * y),
        )
    }

    fn derivative(&self, theta: f64) -> Point {
        let (sin, cos) = theta.sin_cos();
        let x = -self.rx * sin;
        let y = self.ry * cos;
        Point::new(
            self.cos_phi.mul_add(x, -self.sin_phi * y),
            self.sin_phi.mul_add(x, self.cos_phi * y),
        )
    }
}

/// Signed angle from `u` to `v`.
fn angle(u: (f64, f64), v: (f64, f64)) -> f64 {
    let cross = u.0.mul_add(v.1, -u.1 * v.0);
    let dot = u.0.mul_add(v.0, u.1 * v.1);
    cross.atan2(dot)
}
