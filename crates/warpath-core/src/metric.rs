//! Distance metrics driving adaptive subdivision and merging.
//!
//! A metric reduces a segment's two endpoints to a single scalar. The
//! subdivider splits while that value is above the threshold; the merger
//! joins while the combined value is at or below it. The same metric can
//! therefore drive both directions.

use crate::types::{Point, Segment};

/// Computes a scalar "length" from a segment's first and last points.
///
/// Implemented for any `Fn(&P, &P) -> f64` closure.
pub trait Metric<P> {
    /// Measure the span between two endpoints.
    fn measure(&self, first: &P, last: &P) -> f64;

    /// Measure a segment by its endpoints.
    fn measure_segment(&self, segment: &Segment<P>) -> f64 {
        self.measure(segment.first(), segment.last())
    }
}

impl<P, F> Metric<P> for F
where
    F: Fn(&P, &P) -> f64,
{
    fn measure(&self, first: &P, last: &P) -> f64 {
        self(first, last)
    }
}

/// Straight-line distance between the endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl Metric<Point> for EuclideanDistance {
    fn measure(&self, first: &Point, last: &Point) -> f64 {
        first.distance(*last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_ignores_control_points() {
        let s = Segment::quadratic(
            Point::new(0.0, 0.0),
            Point::new(50.0, 50.0),
            Point::new(6.0, 8.0),
        );
        assert!((EuclideanDistance.measure_segment(&s) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn closure_is_a_metric() {
        let horizontal = |a: &Point, b: &Point| (b.x - a.x).abs();
        let d = horizontal.measure(&Point::new(1.0, 0.0), &Point::new(4.0, 100.0));
        assert!((d - 3.0).abs() < 1e-12);
    }
}
