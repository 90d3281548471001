//! Normalization: rewrite arbitrary path data so that every segment has the
//! same curve type.
//!
//! Shorthand commands (`H V S T`) are expanded, arcs are approximated with
//! cubics, closing lines are made explicit, and every segment is converted
//! to the target [`SegmentKind`]. Promotion is exact (degree elevation);
//! demotion is an approximation. Curves demoted to lines are first split
//! into [`FLATTEN_PIECES`] chords so their shape survives.

use warpath_core::{Path, Segment, SegmentKind};

use crate::encode::encode;
use crate::error::SvgError;
use crate::parse::{Syntax, read};

/// Number of chords a curve becomes when normalized to lines.
pub const FLATTEN_PIECES: usize = 1 << FLATTEN_DEPTH;

const FLATTEN_DEPTH: u32 = 3;

/// Normalize path data so that every segment is of `curve_type`.
///
/// The output only uses `M`, one of `L`/`Q`/`C`, and `z`, and is accepted by
/// [`crate::parse`].
///
/// # Errors
///
/// Returns an [`SvgError`] if `d` is not valid path data.
///
/// # Examples
///
/// ```
/// use warpath_core::SegmentKind;
/// use warpath_svg::{normalize, parse};
///
/// let d = normalize("M0,0 H10 V10 Z", SegmentKind::Cubic)?;
/// let path = parse(&d)?;
/// assert_eq!(path.segment_count(), 3);
/// assert!(path.segments().all(|s| s.kind() == SegmentKind::Cubic));
/// # Ok::<(), warpath_svg::SvgError>(())
/// ```
pub fn normalize(d: &str, curve_type: SegmentKind) -> Result<String, SvgError> {
    let path = read(d, Syntax::Full)?;
    Ok(encode(&normalize_path(&path, curve_type)))
}

/// Convert every segment of `path` to `curve_type`.
#[must_use]
pub fn normalize_path(path: &Path, curve_type: SegmentKind) -> Path {
    path.map_sequences(|segments| {
        segments
            .iter()
            .flat_map(|segment| convert(segment, curve_type))
            .collect()
    })
}

fn convert(segment: &Segment, curve_type: SegmentKind) -> Vec<Segment> {
    if curve_type == SegmentKind::Line && segment.kind() != SegmentKind::Line {
        flatten(segment)
    } else {
        vec![segment.to_kind(curve_type)]
    }
}

/// Replace a curve with [`FLATTEN_PIECES`] chords.
fn flatten(segment: &Segment) -> Vec<Segment> {
    let mut pieces = vec![segment.clone()];
    for _ in 0..FLATTEN_DEPTH {
        pieces = pieces
            .iter()
            .flat_map(|piece| {
                let (left, right) = piece.split_at_midpoint();
                [left, right]
            })
            .collect();
    }
    pieces
        .iter()
        .map(|piece| piece.to_kind(SegmentKind::Line))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use warpath_core::Point;

    fn kinds(d: &str) -> Vec<SegmentKind> {
        parse(d).unwrap().segments().map(Segment::kind).collect()
    }

    #[test]
    fn every_segment_gets_target_kind() {
        let source = "M0,0 L10,0 Q15,5 10,10 C5,12 2,8 0,10 Z";
        for kind in [SegmentKind::Quadratic, SegmentKind::Cubic] {
            let d = normalize(source, kind).unwrap();
            let got = kinds(&d);
            assert_eq!(got.len(), 4);
            assert!(got.iter().all(|k| *k == kind), "{kind:?}: {d}");
        }
    }

    #[test]
    fn lines_flatten_curves() {
        let d = normalize("M0,0 Q5,10 10,0", SegmentKind::Line).unwrap();
        let path = parse(&d).unwrap();
        assert_eq!(path.segment_count(), FLATTEN_PIECES);
        assert_eq!(*path.segments().last().unwrap().last(), Point::new(10.0, 0.0));
        // The middle chord endpoint is the curve's apex.
        let apex = path.segments().nth(FLATTEN_PIECES / 2 - 1).unwrap().last();
        assert_eq!(*apex, Point::new(5.0, 5.0));
    }

    #[test]
    fn lines_stay_lines() {
        let d = normalize("M0,0 H10 V10", SegmentKind::Line).unwrap();
        assert_eq!(d, "M0,0 L10,0 L10,10");
    }

    #[test]
    fn closing_segment_is_explicit() {
        let d = normalize("M0,0 L10,0 L10,10 Z", SegmentKind::Quadratic).unwrap();
        let path = parse(&d).unwrap();
        assert_eq!(path.segment_count(), 3);
        assert!(path.subpaths()[0].closed);
    }

    #[test]
    fn arcs_become_cubics() {
        let d = normalize("M10,0 A10,10 0 1 1 -10,0", SegmentKind::Cubic).unwrap();
        let path = parse(&d).unwrap();
        assert_eq!(path.segment_count(), 2);
    }

    #[test]
    fn normalized_output_is_stable() {
        let once = normalize("M0,0 S5,5 10,0 T20,0", SegmentKind::Cubic).unwrap();
        let twice = normalize(&once, SegmentKind::Cubic).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_data() {
        assert_eq!(normalize("", SegmentKind::Quadratic).unwrap(), "");
    }

    #[test]
    fn invalid_data_is_an_error() {
        assert!(normalize("L0,0", SegmentKind::Cubic).is_err());
    }
}
