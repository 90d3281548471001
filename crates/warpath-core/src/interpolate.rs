//! Adaptive subdivision: split segments until every one is within tolerance.
//!
//! Each segment whose metric exceeds the threshold is halved at its
//! parametric midpoint and both halves are examined again. Halving keeps
//! the curve type and the exact curve value at the split point, so the
//! path's shape does not change, only its resolution.
//!
//! Recursion is bounded by [`ResolutionLimits`]: a metric that does not
//! shrink under halving produces [`WarpError::ResolutionLimitExceeded`]
//! instead of exhausting memory.

use crate::config::{ResolutionLimit, ResolutionLimits};
use crate::metric::Metric;
use crate::types::{Lerp, Segment, WarpError};

/// Output of an adaptive operation.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveResult<T> {
    /// The rewritten data.
    pub output: T,
    /// `true` if at least one segment was split (or merged).
    pub did_work: bool,
}

/// Subdivide `segments` until every segment's metric is at most `threshold`.
///
/// Uses [`ResolutionLimits::default`]. See [`interpolate_with_limits`].
///
/// # Errors
///
/// Returns [`WarpError::ResolutionLimitExceeded`] if the default limits are
/// reached.
///
/// # Examples
///
/// ```
/// use warpath_core::{EuclideanDistance, Point, Segment, interpolate};
///
/// let line = Segment::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
/// let result = interpolate(&[line], 3.0, &EuclideanDistance)?;
/// // 10 -> 5 + 5 -> four segments of 2.5
/// assert_eq!(result.output.len(), 4);
/// assert!(result.did_work);
/// # Ok::<(), warpath_core::WarpError>(())
/// ```
pub fn interpolate<P, M>(
    segments: &[Segment<P>],
    threshold: f64,
    metric: &M,
) -> Result<AdaptiveResult<Vec<Segment<P>>>, WarpError>
where
    P: Lerp + Clone,
    M: Metric<P> + ?Sized,
{
    interpolate_with_limits(segments, threshold, metric, &ResolutionLimits::default())
}

/// Subdivide `segments` until every segment's metric is at most `threshold`,
/// within explicit [`ResolutionLimits`].
///
/// Segments whose metric is at or below `threshold` (or NaN) are kept
/// unchanged. Order is preserved: the halves of a split segment take its
/// place in the sequence.
///
/// # Errors
///
/// Returns [`WarpError::ResolutionLimitExceeded`] if a segment would be
/// halved more than `limits.max_depth` times or the output would exceed
/// `limits.max_segments`.
pub fn interpolate_with_limits<P, M>(
    segments: &[Segment<P>],
    threshold: f64,
    metric: &M,
    limits: &ResolutionLimits,
) -> Result<AdaptiveResult<Vec<Segment<P>>>, WarpError>
where
    P: Lerp + Clone,
    M: Metric<P> + ?Sized,
{
    let subdivider = Subdivider {
        threshold,
        metric,
        limits,
    };

    let mut output = Vec::with_capacity(segments.len());
    let mut did_work = false;
    for (i, segment) in segments.iter().enumerate() {
        let pending = segments.len() - i - 1;
        did_work = subdivider.subdivide(segment.clone(), 0, pending, did_work, &mut output)?;
    }

    log::trace!(
        "interpolate: {} -> {} segments (threshold {threshold})",
        segments.len(),
        output.len(),
    );

    Ok(AdaptiveResult { output, did_work })
}

/// Recursion state shared by every call for one sequence.
struct Subdivider<'a, M: ?Sized> {
    threshold: f64,
    metric: &'a M,
    limits: &'a ResolutionLimits,
}

impl<M: ?Sized> Subdivider<'_, M> {
    /// Emit `segment` (or its recursive halves) into `output`.
    ///
    /// `pending` counts segments that will follow this one in the output
    /// at minimum: unvisited right halves and unvisited input segments.
    /// `did_work` is the accumulated flag so far; the returned flag is
    /// `did_work` OR'd with whether this call split anything.
    fn subdivide<P>(
        &self,
        segment: Segment<P>,
        depth: usize,
        pending: usize,
        did_work: bool,
        output: &mut Vec<Segment<P>>,
    ) -> Result<bool, WarpError>
    where
        P: Lerp + Clone,
        M: Metric<P>,
    {
        let value = self.metric.measure_segment(&segment);
        if value > self.threshold {
            if depth >= self.limits.max_depth {
                return Err(WarpError::ResolutionLimitExceeded {
                    limit: ResolutionLimit::Depth,
                    value: depth,
                });
            }
            self.check_count(output.len() + pending + 2)?;

            let (left, right) = segment.split_at_midpoint();
            let did_work = self.subdivide(left, depth + 1, pending + 1, true, output)?;
            self.subdivide(right, depth + 1, pending, did_work, output)
        } else {
            self.check_count(output.len() + pending + 1)?;
            output.push(segment);
            Ok(did_work)
        }
    }

    /// Fail if an output of at least `count` segments is over the limit.
    fn check_count(&self, count: usize) -> Result<(), WarpError> {
        if count > self.limits.max_segments {
            return Err(WarpError::ResolutionLimitExceeded {
                limit: ResolutionLimit::SegmentCount,
                value: count,
            });
        }
        Ok(())
    }
}
