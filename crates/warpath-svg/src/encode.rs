//! [`Path`] to path data.

use svg::node::Value;
use svg::node::element::path::Data;
use warpath_core::Path;

/// Serialize `path` as normalized path data.
///
/// Each subpath starts with an absolute `M` at its first segment's start
/// point, followed by one `L`, `Q`, or `C` per segment (start points are
/// implied by the pen) and a trailing `z` if it is closed. Coordinates are
/// formatted by the [`svg`] crate with `f32` precision.
///
/// [`crate::parse`] reads the output back to the same segments, up to that
/// precision.
///
/// # Examples
///
/// ```
/// use warpath_core::{Path, Point, Segment, Subpath};
/// use warpath_svg::encode;
///
/// let line = Segment::line(Point::new(10.0, 20.0), Point::new(30.0, 40.0));
/// let path = Path::new(vec![Subpath::open(vec![line])]);
/// assert_eq!(encode(&path), "M10,20 L30,40");
/// ```
#[must_use]
pub fn encode(path: &Path) -> String {
    let mut data = Data::new();
    for subpath in path.subpaths() {
        let Some(first) = subpath.segments.first() else {
            continue;
        };
        let start = first.first();
        data = data.move_to((start.x, start.y));
        for segment in &subpath.segments {
            // Arity is fixed by the segment kind, so one arm always matches.
            data = match segment.points() {
                [_, end] => data.line_to((end.x, end.y)),
                [_, c, end] => data.quadratic_curve_to((c.x, c.y, end.x, end.y)),
                [_, c1, c2, end] => data.cubic_curve_to((c1.x, c1.y, c2.x, c2.y, end.x, end.y)),
                _ => data,
            };
        }
        if subpath.closed {
            data = data.close();
        }
    }
    String::from(Value::from(data))
}
