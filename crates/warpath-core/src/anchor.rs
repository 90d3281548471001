//! Pre-interpolation and pre-extrapolation against computed reference points.
//!
//! Plain [`interpolate`](crate::interpolate()) measures a segment by its own
//! endpoints. Before a non-linear transform it is more useful to measure
//! where the endpoints are going to end up. The composed flow here:
//!
//! 1. pairs every point with an *anchor* computed by a reference
//!    [`Transformer`] ([`anchor_segments`]),
//! 2. runs the ordinary subdivider or merger over the anchored points with an
//!    [`AnchorMetric`], which measures anchors instead of positions,
//! 3. strips the anchors again ([`strip_anchors`]).
//!
//! The subdivider and merger are generic over the point type, so they split
//! and join anchors and positions together without knowing about either.

use crate::config::ResolutionLimits;
use crate::extrapolate::extrapolate;
use crate::interpolate::{AdaptiveResult, interpolate_with_limits};
use crate::metric::Metric;
use crate::transform::{Transformer, map_segments};
use crate::types::{Lerp, Point, Segment, WarpError};

/// A point paired with a reference position computed from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchored {
    /// Reference position the metric sees.
    pub anchor: Point,
    /// The real geometry.
    pub point: Point,
}

impl Lerp for Anchored {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            anchor: self.anchor.lerp(&other.anchor, t),
            point: self.point.lerp(&other.point, t),
        }
    }
}

/// Adapts a point metric to measure the anchors of [`Anchored`] points.
#[derive(Debug, Clone, Copy)]
pub struct AnchorMetric<'a, M: ?Sized>(pub &'a M);

impl<M> Metric<Anchored> for AnchorMetric<'_, M>
where
    M: Metric<Point> + ?Sized,
{
    fn measure(&self, first: &Anchored, last: &Anchored) -> f64 {
        self.0.measure(&first.anchor, &last.anchor)
    }
}

/// Pair every point with the anchor `reference` computes for it.
#[must_use = "returns the anchored segments"]
pub fn anchor_segments<T>(segments: &[Segment], reference: &T) -> Vec<Segment<Anchored>>
where
    T: Transformer + ?Sized,
{
    map_segments(segments, |&point| Anchored {
        anchor: reference.transform(point),
        point,
    })
}

/// Drop the anchors, keeping the real geometry.
#[must_use = "returns the stripped segments"]
pub fn strip_anchors(segments: &[Segment<Anchored>]) -> Vec<Segment> {
    map_segments(segments, |a| a.point)
}

/// Subdivide `segments` until the metric between the *anchors* of every
/// segment's endpoints is at most `threshold`.
///
/// # Errors
///
/// Returns [`WarpError::ResolutionLimitExceeded`] if `limits` are reached.
pub fn pre_interpolate<T, M>(
    segments: &[Segment],
    reference: &T,
    threshold: f64,
    metric: &M,
    limits: &ResolutionLimits,
) -> Result<AdaptiveResult<Vec<Segment>>, WarpError>
where
    T: Transformer + ?Sized,
    M: Metric<Point> + ?Sized,
{
    let anchored = anchor_segments(segments, reference);
    let result = interpolate_with_limits(&anchored, threshold, &AnchorMetric(metric), limits)?;
    Ok(AdaptiveResult {
        output: strip_anchors(&result.output),
        did_work: result.did_work,
    })
}

/// Merge adjacent `segments` while the metric between the *anchors* of the
/// pair's outer endpoints is at most `threshold`.
#[must_use = "returns the merged segments"]
pub fn pre_extrapolate<T, M>(
    segments: &[Segment],
    reference: &T,
    threshold: f64,
    metric: &M,
) -> AdaptiveResult<Vec<Segment>>
where
    T: Transformer + ?Sized,
    M: Metric<Point> + ?Sized,
{
    let anchored = anchor_segments(segments, reference);
    let result = extrapolate(&anchored, threshold, &AnchorMetric(metric));
    AdaptiveResult {
        output: strip_anchors(&result.output),
        did_work: result.did_work,
    }
}
