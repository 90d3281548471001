//! Transform applier: map point transforms over segment sequences.
//!
//! A [`Transformer`] maps one point to another. Applying it to a path
//! visits every point of every segment in order; each segment keeps its
//! kind and arity, and shared endpoints of neighbouring segments receive
//! the same input and therefore stay joined.

use crate::types::{Path, Point, Segment};

/// A point-level transform.
///
/// Implemented for any `Fn(Point) -> Point` closure. Several transforms can
/// be applied in order with a [`TransformChain`].
pub trait Transformer {
    /// Map `point` to its transformed position.
    fn transform(&self, point: Point) -> Point;
}

impl<F> Transformer for F
where
    F: Fn(Point) -> Point,
{
    fn transform(&self, point: Point) -> Point {
        self(point)
    }
}

/// An ordered list of transformers applied one after another.
///
/// Each step consumes the previous step's output. An empty chain is the
/// identity.
#[derive(Default)]
pub struct TransformChain<'a> {
    steps: Vec<Box<dyn Transformer + 'a>>,
}

impl<'a> TransformChain<'a> {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step, builder style.
    #[must_use]
    pub fn then(mut self, step: impl Transformer + 'a) -> Self {
        self.push(step);
        self
    }

    /// Append a step.
    pub fn push(&mut self, step: impl Transformer + 'a) {
        self.steps.push(Box::new(step));
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the chain has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Transformer for TransformChain<'_> {
    fn transform(&self, point: Point) -> Point {
        self.steps.iter().fold(point, |p, step| step.transform(p))
    }
}

/// Apply `transformer` to every point of every segment.
///
/// Segments are processed independently and in sequence order. The
/// returned sequence has the same length and the same kinds as the input.
#[must_use = "returns the transformed segments"]
pub fn apply_transform<T>(segments: &[Segment], transformer: &T) -> Vec<Segment>
where
    T: Transformer + ?Sized,
{
    map_segments(segments, |p| transformer.transform(*p))
}

/// Map every point of every segment through `f`, allowing the point type
/// to change.
///
/// Used to attach and strip extra per-point data around an adaptive
/// operation (see [`crate::anchor`]).
#[must_use = "returns the mapped segments"]
pub fn map_segments<P, Q>(segments: &[Segment<P>], mut f: impl FnMut(&P) -> Q) -> Vec<Segment<Q>> {
    segments.iter().map(|s| s.map(&mut f)).collect()
}

/// Apply `transformer` to every subpath of `path`.
#[must_use = "returns the transformed path"]
pub fn transform_path<T>(path: &Path, transformer: &T) -> Path
where
    T: Transformer + ?Sized,
{
    path.map_sequences(|segments| apply_transform(segments, transformer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SegmentKind, Subpath};

    fn shift(dx: f64, dy: f64) -> impl Fn(Point) -> Point {
        move |p| Point::new(p.x + dx, p.y + dy)
    }

    fn sample() -> Vec<Segment> {
        vec![
            Segment::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
            Segment::quadratic(
                Point::new(10.0, 0.0),
                Point::new(15.0, 5.0),
                Point::new(20.0, 0.0),
            ),
        ]
    }

    #[test]
    fn single_transformer_moves_every_point() {
        let out = apply_transform(&sample(), &shift(1.0, 2.0));
        assert_eq!(out.len(), 2);
        assert_eq!(*out[0].first(), Point::new(1.0, 2.0));
        assert_eq!(out[1].points()[1], Point::new(16.0, 7.0));
    }

    #[test]
    fn arity_and_kind_preserved() {
        let out = apply_transform(&sample(), &|p: Point| Point::new(p.x * p.x, p.y.sin()));
        for (before, after) in sample().iter().zip(&out) {
            assert_eq!(before.kind(), after.kind());
            assert_eq!(after.points().len(), after.kind().arity());
        }
    }

    #[test]
    fn continuity_preserved_by_nonlinear_transform() {
        let out = apply_transform(&sample(), &|p: Point| Point::new(p.x, p.x.sqrt()));
        assert_eq!(out[0].last(), out[1].first());
    }

    #[test]
    fn chain_applies_in_order() {
        let double = |p: Point| Point::new(p.x * 2.0, p.y * 2.0);
        let chain = TransformChain::new().then(shift(1.0, 0.0)).then(double);
        assert_eq!(chain.len(), 2);
        // (0 + 1) * 2, not 0 * 2 + 1.
        assert_eq!(chain.transform(Point::new(0.0, 0.0)), Point::new(2.0, 0.0));
    }

    #[test]
    fn empty_chain_is_identity() {
        let chain = TransformChain::new();
        assert!(chain.is_empty());
        let out = apply_transform(&sample(), &chain);
        assert_eq!(out, sample());
    }

    #[test]
    fn transform_path_keeps_subpath_structure() {
        let path = Path::new(vec![Subpath::closed(sample()), Subpath::open(sample())]);
        let out = transform_path(&path, &shift(0.0, 1.0));
        assert_eq!(out.subpaths().len(), 2);
        assert!(out.subpaths()[0].closed);
        assert_eq!(out.segment_count(), 4);
        assert_eq!(out.subpaths()[1].segments[1].kind(), SegmentKind::Quadratic);
    }

    #[test]
    fn map_segments_changes_point_type() {
        let xs = map_segments(&sample(), |p| p.x);
        assert_eq!(xs[1].points(), &[10.0, 15.0, 20.0]);
    }
}
