//! Adaptive merging: join neighbouring segments while they stay within tolerance.
//!
//! The mirror of [`interpolate`](crate::interpolate()): a pair of adjacent
//! segments is joined when the metric over the pair's outer endpoints (start
//! of the left segment, end of the right one) is at or below the threshold.
//!
//! Each pass walks the sequence left to right in non-overlapping pairs: when
//! a segment could join either neighbour, the left pair wins because it is
//! examined first. A joined segment is re-examined against its new
//! neighbour on the next pass. Passes repeat until one performs no merge,
//! so the result is a fixed point of this operation. Pairing this way
//! undoes uniform subdivision level by level, which keeps every join the
//! exact inverse of a midpoint split.

use crate::interpolate::AdaptiveResult;
use crate::metric::Metric;
use crate::types::{Lerp, Segment};

/// Merge adjacent segments of `segments` while the combined metric is at
/// most `threshold`.
///
/// Joined segments take the higher curve type of the pair (see
/// [`Segment::join`]). Joining the two halves of a midpoint split restores
/// the original segment exactly.
///
/// # Examples
///
/// ```
/// use warpath_core::{EuclideanDistance, Point, Segment, extrapolate, interpolate};
///
/// let line = Segment::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
/// let fine = interpolate(&[line.clone()], 3.0, &EuclideanDistance)?.output;
/// assert_eq!(fine.len(), 4);
///
/// // Every pair of 2.5 segments spans 5, so nothing merges at 3 ...
/// assert!(!extrapolate(&fine, 3.0, &EuclideanDistance).did_work);
/// // ... while 10 collapses them back to the original line.
/// assert_eq!(extrapolate(&fine, 10.0, &EuclideanDistance).output, vec![line]);
/// # Ok::<(), warpath_core::WarpError>(())
/// ```
#[must_use = "returns the merged segments"]
pub fn extrapolate<P, M>(
    segments: &[Segment<P>],
    threshold: f64,
    metric: &M,
) -> AdaptiveResult<Vec<Segment<P>>>
where
    P: Lerp + Clone,
    M: Metric<P> + ?Sized,
{
    let mut output = segments.to_vec();
    let mut did_work = false;

    loop {
        let (merged, merged_any) = merge_pass(&output, threshold, metric);
        output = merged;
        if !merged_any {
            break;
        }
        did_work = true;
    }

    log::trace!(
        "extrapolate: {} -> {} segments (threshold {threshold})",
        segments.len(),
        output.len(),
    );

    AdaptiveResult { output, did_work }
}

/// One left-to-right pass over non-overlapping pairs. Returns the new
/// sequence and whether anything was merged.
fn merge_pass<P, M>(segments: &[Segment<P>], threshold: f64, metric: &M) -> (Vec<Segment<P>>, bool)
where
    P: Lerp + Clone,
    M: Metric<P> + ?Sized,
{
    let mut output = Vec::with_capacity(segments.len());
    let mut did_work = false;

    let mut rest = segments;
    while let Some((current, tail)) = rest.split_first() {
        match tail.split_first() {
            Some((next, after)) if metric.measure(current.first(), next.last()) <= threshold => {
                output.push(current.join(next));
                did_work = true;
                rest = after;
            }
            _ => {
                output.push(current.clone());
                rest = tail;
            }
        }
    }

    (output, did_work)
}
