//! Built-in point transforms exposed on the command line.

use warpath_core::{Point, TransformChain};

/// Scale about `center`.
pub fn scale(center: Point, sx: f64, sy: f64) -> impl Fn(Point) -> Point {
    move |p| Point::new(sx.mul_add(p.x - center.x, center.x), sy.mul_add(p.y - center.y, center.y))
}

/// Rotate points about `center` by an angle that falls off linearly from
/// `degrees` at the center to zero at `radius`.
pub fn swirl(center: Point, degrees: f64, radius: f64) -> impl Fn(Point) -> Point {
    let max_angle = degrees.to_radians();
    move |p| {
        let (dx, dy) = (p.x - center.x, p.y - center.y);
        let distance = dx.hypot(dy);
        if radius <= 0.0 || distance >= radius {
            return p;
        }
        let (sin, cos) = (max_angle * (1.0 - distance / radius)).sin_cos();
        Point::new(
            center.x + cos.mul_add(dx, -sin * dy),
            center.y + sin.mul_add(dx, cos * dy),
        )
    }
}

/// Displace y by a sine of x.
pub fn wave(amplitude: f64, wavelength: f64) -> impl Fn(Point) -> Point {
    move |p| {
        if wavelength == 0.0 {
            return p;
        }
        Point::new(p.x, (p.x / wavelength * std::f64::consts::TAU).sin().mul_add(amplitude, p.y))
    }
}

/// Shift every point.
pub fn translate(dx: f64, dy: f64) -> impl Fn(Point) -> Point {
    move |p| Point::new(p.x + dx, p.y + dy)
}

/// Parameters of every effect the CLI can chain.
#[derive(Debug, Clone)]
pub struct Effects {
    /// Fixed point of scale and swirl.
    pub center: Point,
    /// `(sx, sy)`.
    pub scale: Option<(f64, f64)>,
    /// `(degrees, radius)`.
    pub swirl: Option<(f64, f64)>,
    /// `(amplitude, wavelength)`.
    pub wave: Option<(f64, f64)>,
    /// `(dx, dy)`.
    pub translate: Option<(f64, f64)>,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            center: Point::new(0.0, 0.0),
            scale: None,
            swirl: None,
            wave: None,
            translate: None,
        }
    }
}

impl Effects {
    /// Chain the configured effects in a fixed order: scale, swirl, wave,
    /// translate.
    pub fn chain(&self) -> TransformChain<'static> {
        let mut chain = TransformChain::new();
        if let Some((sx, sy)) = self.scale {
            chain.push(scale(self.center, sx, sy));
        }
        if let Some((degrees, radius)) = self.swirl {
            chain.push(swirl(self.center, degrees, radius));
        }
        if let Some((amplitude, wavelength)) = self.wave {
            chain.push(wave(amplitude, wavelength));
        }
        if let Some((dx, dy)) = self.translate {
            chain.push(translate(dx, dy));
        }
        chain
    }
}
