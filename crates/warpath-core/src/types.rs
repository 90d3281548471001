//! Shared types for the warpath core: points, segments, paths, and errors.

use serde::{Deserialize, Serialize};

use crate::config::ResolutionLimit;

/// A 2D point in user-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Linear interpolation between two values of the same type.
///
/// Everything the subdivider and merger do to control points is expressed
/// in terms of `lerp`, so any point type implementing it can flow through
/// the adaptive operations. `t` outside `0.0..=1.0` extrapolates along the
/// line through both values.
pub trait Lerp {
    /// Interpolate from `self` (at `t = 0`) towards `other` (at `t = 1`).
    #[must_use]
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for Point {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(
            (other.x - self.x).mul_add(t, self.x),
            (other.y - self.y).mul_add(t, self.y),
        )
    }
}

/// Curve type of a segment.
///
/// Ordered by degree so the higher of two kinds can be picked with `max`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Straight line: start and end point.
    Line,
    /// Quadratic Bézier: start, one control point, end.
    #[default]
    Quadratic,
    /// Cubic Bézier: start, two control points, end.
    Cubic,
}

impl SegmentKind {
    /// Number of points a segment of this kind holds, including its start.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Line => 2,
            Self::Quadratic => 3,
            Self::Cubic => 4,
        }
    }
}

/// One curve unit of a path: a curve-type tag and its fixed-arity point list.
///
/// The point list includes the segment's start point, so [`first`](Self::first)
/// and [`last`](Self::last) are always the on-curve endpoints and any points in
/// between are control points. The list length always equals
/// [`SegmentKind::arity`]; there is no way to build a segment that violates
/// this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "SegmentRepr<P>",
    bound(
        serialize = "P: Serialize",
        deserialize = "P: Deserialize<'de>"
    )
)]
pub struct Segment<P = Point> {
    kind: SegmentKind,
    points: Vec<P>,
}

/// Unvalidated serde form of [`Segment`]; deserialization goes through
/// [`Segment::new`] so the arity contract also holds for decoded data.
#[derive(Deserialize)]
struct SegmentRepr<P> {
    kind: SegmentKind,
    points: Vec<P>,
}

impl<P> TryFrom<SegmentRepr<P>> for Segment<P> {
    type Error = WarpError;

    fn try_from(repr: SegmentRepr<P>) -> Result<Self, Self::Error> {
        Self::new(repr.kind, repr.points)
    }
}

impl<P> Segment<P> {
    /// Create a segment, checking that `points` matches the arity of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::ArityMismatch`] if `points.len()` differs from
    /// `kind.arity()`.
    pub fn new(kind: SegmentKind, points: Vec<P>) -> Result<Self, WarpError> {
        if points.len() == kind.arity() {
            Ok(Self { kind, points })
        } else {
            Err(WarpError::ArityMismatch {
                kind,
                expected: kind.arity(),
                actual: points.len(),
            })
        }
    }

    /// A straight line from `start` to `end`.
    #[must_use]
    pub fn line(start: P, end: P) -> Self {
        Self {
            kind: SegmentKind::Line,
            points: vec![start, end],
        }
    }

    /// A quadratic Bézier from `start` to `end` with one control point.
    #[must_use]
    pub fn quadratic(start: P, control: P, end: P) -> Self {
        Self {
            kind: SegmentKind::Quadratic,
            points: vec![start, control, end],
        }
    }

    /// A cubic Bézier from `start` to `end` with two control points.
    #[must_use]
    pub fn cubic(start: P, control1: P, control2: P, end: P) -> Self {
        Self {
            kind: SegmentKind::Cubic,
            points: vec![start, control1, control2, end],
        }
    }

    /// The curve type of this segment.
    #[must_use]
    pub const fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// All points, start first.
    #[must_use]
    pub fn points(&self) -> &[P] {
        &self.points
    }

    /// The start point.
    #[must_use]
    pub fn first(&self) -> &P {
        &self.points[0]
    }

    /// The end point.
    #[must_use]
    pub fn last(&self) -> &P {
        &self.points[self.points.len() - 1]
    }

    /// Consumes the segment and returns its points.
    #[must_use]
    pub fn into_points(self) -> Vec<P> {
        self.points
    }

    /// Map every point through `f`, keeping the curve type.
    #[must_use]
    pub fn map<Q>(&self, f: impl FnMut(&P) -> Q) -> Segment<Q> {
        Segment {
            kind: self.kind,
            points: self.points.iter().map(f).collect(),
        }
    }
}

impl<P: Lerp + Clone> Segment<P> {
    /// Split the segment at parameter `t` using de Casteljau's algorithm.
    ///
    /// Both halves keep this segment's kind. The left half ends and the
    /// right half starts at the exact curve value at `t`.
    #[must_use]
    pub fn split(&self, t: f64) -> (Self, Self) {
        let mut left = Vec::with_capacity(self.points.len());
        let mut right = Vec::with_capacity(self.points.len());

        let mut level = self.points.clone();
        while let (Some(head), Some(tail)) = (level.first(), level.last()) {
            left.push(head.clone());
            right.push(tail.clone());
            level = level.windows(2).map(|w| w[0].lerp(&w[1], t)).collect();
        }
        right.reverse();

        (
            Self {
                kind: self.kind,
                points: left,
            },
            Self {
                kind: self.kind,
                points: right,
            },
        )
    }

    /// Split the segment at its parametric midpoint.
    #[must_use]
    pub fn split_at_midpoint(&self) -> (Self, Self) {
        self.split(0.5)
    }

    /// Raise the segment's degree by one without changing its shape.
    ///
    /// Cubic segments are returned unchanged.
    #[must_use]
    pub fn elevate(&self) -> Self {
        let p = &self.points;
        match self.kind {
            SegmentKind::Line => Self::quadratic(p[0].clone(), p[0].lerp(&p[1], 0.5), p[1].clone()),
            SegmentKind::Quadratic => Self::cubic(
                p[0].clone(),
                p[0].lerp(&p[1], 2.0 / 3.0),
                p[2].lerp(&p[1], 2.0 / 3.0),
                p[2].clone(),
            ),
            SegmentKind::Cubic => self.clone(),
        }
    }

    /// Convert the segment to `kind`.
    ///
    /// Promotion is exact (degree elevation). Demotion approximates: a
    /// cubic becomes the quadratic whose control point is
    /// `(3c1 - p0 + 3c2 - p3) / 4`, and any curve becomes its chord when
    /// converted to a line.
    #[must_use]
    pub fn to_kind(&self, kind: SegmentKind) -> Self {
        if kind >= self.kind {
            let mut segment = self.clone();
            while segment.kind < kind {
                segment = segment.elevate();
            }
            return segment;
        }

        let p = &self.points;
        match kind {
            SegmentKind::Line => Self::line(self.first().clone(), self.last().clone()),
            SegmentKind::Quadratic | SegmentKind::Cubic => {
                // Only reachable from a cubic.
                let from_start = p[0].lerp(&p[1], 1.5);
                let from_end = p[3].lerp(&p[2], 1.5);
                Self::quadratic(p[0].clone(), from_start.lerp(&from_end, 0.5), p[3].clone())
            }
        }
    }

    /// Join this segment with the one that follows it.
    ///
    /// The result has the higher of the two kinds and spans from this
    /// segment's start to `next`'s end. Control points are reconstructed
    /// by inverting a midpoint split, so joining the two halves of
    /// [`split_at_midpoint`](Self::split_at_midpoint) restores the original
    /// segment. For any other pair the result approximates both curves.
    #[must_use]
    pub fn join(&self, next: &Self) -> Self {
        let kind = self.kind.max(next.kind);
        let a = self.to_kind(kind);
        let b = next.to_kind(kind);
        let (a, b) = (&a.points, &b.points);

        match kind {
            SegmentKind::Line => Self::line(a[0].clone(), b[1].clone()),
            SegmentKind::Quadratic => {
                let from_start = a[0].lerp(&a[1], 2.0);
                let from_end = b[2].lerp(&b[1], 2.0);
                Self::quadratic(a[0].clone(), from_start.lerp(&from_end, 0.5), b[2].clone())
            }
            SegmentKind::Cubic => Self::cubic(
                a[0].clone(),
                a[0].lerp(&a[1], 2.0),
                b[3].lerp(&b[2], 2.0),
                b[3].clone(),
            ),
        }
    }
}

/// A continuous run of segments started by a single move-to.
///
/// Within a subpath the last point of each segment equals the first point
/// of the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "P: Serialize", deserialize = "P: Deserialize<'de>"))]
pub struct Subpath<P = Point> {
    /// Segments in drawing order.
    pub segments: Vec<Segment<P>>,
    /// Whether the subpath ends with a close command.
    pub closed: bool,
}

impl<P> Subpath<P> {
    /// Create a subpath.
    #[must_use]
    pub const fn new(segments: Vec<Segment<P>>, closed: bool) -> Self {
        Self { segments, closed }
    }

    /// An open subpath.
    #[must_use]
    pub const fn open(segments: Vec<Segment<P>>) -> Self {
        Self::new(segments, false)
    }

    /// A closed subpath.
    #[must_use]
    pub const fn closed(segments: Vec<Segment<P>>) -> Self {
        Self::new(segments, true)
    }
}

/// One (possibly multi-subpath) curve, associated with a single geometry node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "P: Serialize", deserialize = "P: Deserialize<'de>"))]
pub struct Path<P = Point>(Vec<Subpath<P>>);

impl<P> Default for Path<P> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<P> Path<P> {
    /// Create a path from its subpaths.
    #[must_use]
    pub const fn new(subpaths: Vec<Subpath<P>>) -> Self {
        Self(subpaths)
    }

    /// Returns `true` if the path has no segments at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|s| s.segments.is_empty())
    }

    /// Total number of segments across all subpaths.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.0.iter().map(|s| s.segments.len()).sum()
    }

    /// Returns a slice of all subpaths.
    #[must_use]
    pub fn subpaths(&self) -> &[Subpath<P>] {
        &self.0
    }

    /// Iterate over every segment of every subpath in order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment<P>> {
        self.0.iter().flat_map(|s| s.segments.iter())
    }

    /// Consumes the path and returns its subpaths.
    #[must_use]
    pub fn into_subpaths(self) -> Vec<Subpath<P>> {
        self.0
    }

    /// Rebuild every subpath's segment sequence with `f`, keeping the
    /// `closed` flags.
    #[must_use]
    pub fn map_sequences<Q>(&self, mut f: impl FnMut(&[Segment<P>]) -> Vec<Segment<Q>>) -> Path<Q> {
        Path(
            self.0
                .iter()
                .map(|s| Subpath::new(f(&s.segments), s.closed))
                .collect(),
        )
    }

    /// Fallible form of [`map_sequences`](Self::map_sequences); stops at the
    /// first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map_sequences<Q, E>(
        &self,
        mut f: impl FnMut(&[Segment<P>]) -> Result<Vec<Segment<Q>>, E>,
    ) -> Result<Path<Q>, E> {
        self.0
            .iter()
            .map(|s| Ok(Subpath::new(f(&s.segments)?, s.closed)))
            .collect::<Result<Vec<_>, E>>()
            .map(Path)
    }
}

/// Errors produced by the warp core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WarpError {
    /// A segment was built with the wrong number of points for its kind.
    #[error("{kind:?} segment requires {expected} points, got {actual}")]
    ArityMismatch {
        /// Declared curve type.
        kind: SegmentKind,
        /// Arity of `kind`.
        expected: usize,
        /// Points actually supplied.
        actual: usize,
    },

    /// Adaptive subdivision hit a [`ResolutionLimits`](crate::ResolutionLimits) bound.
    ///
    /// Usually means the metric does not shrink as segments get shorter.
    #[error("resolution limit exceeded: {limit} reached {value}")]
    ResolutionLimitExceeded {
        /// Which bound was hit.
        limit: ResolutionLimit,
        /// The value that reached the bound.
        value: usize,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn approx_eq(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-9
    }

    /// Evaluate a Bézier segment at `t` by repeated lerp.
    fn eval(segment: &Segment, t: f64) -> Point {
        let mut level = segment.points().to_vec();
        while level.len() > 1 {
            level = level.windows(2).map(|w| w[0].lerp(&w[1], t)).collect();
        }
        level[0]
    }

    // --- Point tests ---

    #[test]
    fn point_distance_345() {
        let d = Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn point_lerp_extrapolates() {
        let p = Point::new(1.0, 1.0).lerp(&Point::new(2.0, 3.0), 2.0);
        assert_eq!(p, Point::new(3.0, 5.0));
    }

    // --- Arity contract ---

    #[test]
    fn arity_per_kind() {
        assert_eq!(SegmentKind::Line.arity(), 2);
        assert_eq!(SegmentKind::Quadratic.arity(), 3);
        assert_eq!(SegmentKind::Cubic.arity(), 4);
    }

    #[test]
    fn new_rejects_wrong_arity() {
        let result = Segment::new(SegmentKind::Cubic, vec![Point::new(0.0, 0.0); 3]);
        assert_eq!(
            result,
            Err(WarpError::ArityMismatch {
                kind: SegmentKind::Cubic,
                expected: 4,
                actual: 3,
            })
        );
    }

    #[test]
    fn new_rejects_empty_points() {
        let result: Result<Segment, _> = Segment::new(SegmentKind::Line, vec![]);
        assert!(matches!(result, Err(WarpError::ArityMismatch { actual: 0, .. })));
    }

    #[test]
    fn first_and_last_ignore_control_points() {
        let s = Segment::cubic(
            Point::new(0.0, 0.0),
            Point::new(1.0, 5.0),
            Point::new(2.0, 5.0),
            Point::new(3.0, 0.0),
        );
        assert_eq!(*s.first(), Point::new(0.0, 0.0));
        assert_eq!(*s.last(), Point::new(3.0, 0.0));
    }

    #[test]
    fn deserialize_checks_arity() {
        let ok: Segment = serde_json::from_str(
            r#"{"kind":"line","points":[{"x":0.0,"y":0.0},{"x":1.0,"y":0.0}]}"#,
        )
        .unwrap();
        assert_eq!(ok.kind(), SegmentKind::Line);

        let bad: Result<Segment, _> =
            serde_json::from_str(r#"{"kind":"quadratic","points":[{"x":0.0,"y":0.0}]}"#);
        assert!(bad.is_err());
    }

    // --- Splitting ---

    #[test]
    fn split_line_at_midpoint() {
        let s = Segment::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let (a, b) = s.split_at_midpoint();
        assert_eq!(a.points(), &[Point::new(0.0, 0.0), Point::new(5.0, 0.0)]);
        assert_eq!(b.points(), &[Point::new(5.0, 0.0), Point::new(10.0, 0.0)]);
    }

    #[test]
    fn split_cubic_keeps_arity_and_curve_value() {
        let s = Segment::cubic(
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        );
        let (a, b) = s.split(0.3);
        assert_eq!(a.kind(), SegmentKind::Cubic);
        assert_eq!(a.points().len(), 4);
        assert_eq!(b.points().len(), 4);
        assert_eq!(a.last(), b.first());
        assert!(approx_eq(*a.last(), eval(&s, 0.3)));
        // A point on the right half maps back onto the original curve.
        assert!(approx_eq(eval(&b, 0.5), eval(&s, 0.65)));
    }

    // --- Kind conversion ---

    #[test]
    fn elevate_quadratic_preserves_shape() {
        let q = Segment::quadratic(
            Point::new(0.0, 0.0),
            Point::new(5.0, 8.0),
            Point::new(10.0, 0.0),
        );
        let c = q.elevate();
        assert_eq!(c.kind(), SegmentKind::Cubic);
        for t in [0.0, 0.25, 0.5, 0.9, 1.0] {
            assert!(approx_eq(eval(&q, t), eval(&c, t)), "mismatch at t={t}");
        }
    }

    #[test]
    fn line_to_cubic_stays_straight() {
        let l = Segment::line(Point::new(0.0, 0.0), Point::new(9.0, 3.0));
        let c = l.to_kind(SegmentKind::Cubic);
        assert_eq!(c.kind(), SegmentKind::Cubic);
        assert!(approx_eq(eval(&c, 0.5), Point::new(4.5, 1.5)));
    }

    #[test]
    fn cubic_demotes_to_exact_quadratic_when_possible() {
        let q = Segment::quadratic(
            Point::new(0.0, 0.0),
            Point::new(4.0, 6.0),
            Point::new(8.0, 0.0),
        );
        let back = q.elevate().to_kind(SegmentKind::Quadratic);
        assert!(approx_eq(back.points()[1], Point::new(4.0, 6.0)));
    }

    #[test]
    fn demote_to_line_keeps_chord() {
        let q = Segment::quadratic(
            Point::new(0.0, 0.0),
            Point::new(4.0, 6.0),
            Point::new(8.0, 0.0),
        );
        let l = q.to_kind(SegmentKind::Line);
        assert_eq!(l.points(), &[Point::new(0.0, 0.0), Point::new(8.0, 0.0)]);
    }

    // --- Joining ---

    #[test]
    fn join_inverts_midpoint_split() {
        let segments = [
            Segment::line(Point::new(1.0, 2.0), Point::new(7.0, -3.0)),
            Segment::quadratic(Point::new(0.0, 0.0), Point::new(3.0, 9.0), Point::new(6.0, 0.0)),
            Segment::cubic(
                Point::new(0.0, 0.0),
                Point::new(2.0, 7.0),
                Point::new(8.0, -4.0),
                Point::new(10.0, 1.0),
            ),
        ];
        for s in segments {
            let (a, b) = s.split_at_midpoint();
            let joined = a.join(&b);
            assert_eq!(joined.kind(), s.kind());
            for (got, want) in joined.points().iter().zip(s.points()) {
                assert!(approx_eq(*got, *want), "{got:?} != {want:?}");
            }
        }
    }

    #[test]
    fn join_mixed_kinds_promotes() {
        let line = Segment::line(Point::new(0.0, 0.0), Point::new(5.0, 0.0));
        let quad = Segment::quadratic(
            Point::new(5.0, 0.0),
            Point::new(7.5, 4.0),
            Point::new(10.0, 0.0),
        );
        let joined = line.join(&quad);
        assert_eq!(joined.kind(), SegmentKind::Quadratic);
        assert_eq!(*joined.first(), Point::new(0.0, 0.0));
        assert_eq!(*joined.last(), Point::new(10.0, 0.0));
    }

    // --- Path helpers ---

    #[test]
    fn path_counts_segments_across_subpaths() {
        let a = Segment::line(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let path = Path::new(vec![
            Subpath::open(vec![a.clone(), a.clone()]),
            Subpath::closed(vec![a]),
        ]);
        assert_eq!(path.segment_count(), 3);
        assert_eq!(path.segments().count(), 3);
        assert!(!path.is_empty());
        assert!(Path::<Point>::default().is_empty());
    }

    #[test]
    fn try_map_sequences_keeps_closed_flags() {
        let a = Segment::line(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let path = Path::new(vec![Subpath::open(vec![a.clone()]), Subpath::closed(vec![a])]);
        let mapped: Path = path
            .try_map_sequences(|s| Ok::<_, WarpError>(s.to_vec()))
            .unwrap();
        assert!(!mapped.subpaths()[0].closed);
        assert!(mapped.subpaths()[1].closed);
    }
}
