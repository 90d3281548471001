//! Basic shapes to path data.
//!
//! `rect`, `circle`, `ellipse`, `line`, `polyline`, and `polygon` elements
//! are rewritten as `path` elements so that every piece of geometry in a
//! document can be warped the same way. Curved outlines use arc commands,
//! which [`crate::normalize`] later converts to the working curve type.

use std::fmt::Write;

/// Element names [`shape_path_data`] understands.
pub const SHAPE_ELEMENTS: [&str; 6] = ["rect", "circle", "ellipse", "line", "polyline", "polygon"];

/// Attributes consumed by converting the shape `name`.
///
/// These are removed from the element when it becomes a `path`.
#[must_use]
pub fn geometry_attributes(name: &str) -> &'static [&'static str] {
    match name {
        "rect" => &["x", "y", "width", "height", "rx", "ry"],
        "circle" => &["cx", "cy", "r"],
        "ellipse" => &["cx", "cy", "rx", "ry"],
        "line" => &["x1", "y1", "x2", "y2"],
        "polyline" | "polygon" => &["points"],
        _ => &[],
    }
}

/// Path data equivalent to the shape element `name` with `attribute`
/// lookup.
///
/// Returns `None` if `name` is not a basic shape. Shapes that render
/// nothing (non-positive size or radius, no points) produce an empty
/// string.
///
/// # Examples
///
/// ```
/// use warpath_svg::shape_path_data;
///
/// let attrs = [("x1", "0"), ("y1", "0"), ("x2", "10"), ("y2", "5")];
/// let lookup = |name: &str| attrs.iter().find(|(n, _)| *n == name).map(|(_, v)| *v);
/// assert_eq!(shape_path_data("line", lookup).as_deref(), Some("M0,0 L10,5"));
/// assert_eq!(shape_path_data("g", lookup), None);
/// ```
#[must_use]
pub fn shape_path_data<'a>(
    name: &str,
    attribute: impl Fn(&str) -> Option<&'a str>,
) -> Option<String> {
    let length = |key: &str| attribute(key).map_or(0.0, |value| parse_length(key, value));
    let d = match name {
        "rect" => {
            let rx = attribute("rx").or_else(|| attribute("ry"));
            let ry = attribute("ry").or_else(|| attribute("rx"));
            rect(
                length("x"),
                length("y"),
                length("width"),
                length("height"),
                rx.map_or(0.0, |v| parse_length("rx", v)),
                ry.map_or(0.0, |v| parse_length("ry", v)),
            )
        }
        "circle" => {
            let r = length("r");
            ellipse(length("cx"), length("cy"), r, r)
        }
        "ellipse" => ellipse(length("cx"), length("cy"), length("rx"), length("ry")),
        "line" => format!(
            "M{},{} L{},{}",
            length("x1"),
            length("y1"),
            length("x2"),
            length("y2")
        ),
        "polyline" => poly(attribute("points").unwrap_or_default(), false),
        "polygon" => poly(attribute("points").unwrap_or_default(), true),
        _ => return None,
    };
    if d.is_empty() {
        log::warn!("<{name}> renders nothing; leaving its path empty");
    }
    Some(d)
}

/// Parse a length attribute, accepting an optional `px` unit.
fn parse_length(name: &str, value: &str) -> f64 {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    number.trim().parse().unwrap_or_else(|_| {
        log::warn!("unsupported length {name}=\"{value}\"; using 0");
        0.0
    })
}

fn rect(x: f64, y: f64, width: f64, height: f64, rx: f64, ry: f64) -> String {
    if width <= 0.0 || height <= 0.0 {
        return String::new();
    }
    let rx = rx.clamp(0.0, width / 2.0);
    let ry = ry.clamp(0.0, height / 2.0);
    let (right, bottom) = (x + width, y + height);

    if rx <= 0.0 || ry <= 0.0 {
        return format!("M{x},{y} H{right} V{bottom} H{x} Z");
    }

    let corner = format!("A{rx},{ry} 0 0 1");
    let (inner_left, inner_right) = (x + rx, right - rx);
    let (inner_top, inner_bottom) = (y + ry, bottom - ry);
    format!(
        "M{inner_left},{y} H{inner_right} {corner} {right},{inner_top} V{inner_bottom} \
         {corner} {inner_right},{bottom} H{inner_left} {corner} {x},{inner_bottom} \
         V{inner_top} {corner} {inner_left},{y} Z"
    )
}

/// Four quarter arcs starting at the rightmost point.
fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> String {
    if rx <= 0.0 || ry <= 0.0 {
        return String::new();
    }
    let arc = format!("A{rx},{ry} 0 0 1");
    format!(
        "M{},{cy} {arc} {cx},{} {arc} {},{cy} {arc} {cx},{} {arc} {},{cy} Z",
        cx + rx,
        cy + ry,
        cx - rx,
        cy - ry,
        cx + rx,
    )
}

/// `points` attribute to path data. A trailing odd coordinate is ignored.
fn poly(points: &str, closed: bool) -> String {
    let numbers: Vec<f64> = points
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map_while(|token| token.parse().ok())
        .collect();
    let mut pairs = numbers.chunks_exact(2);

    let Some(first) = pairs.next() else {
        return String::new();
    };
    let mut d = format!("M{},{}", first[0], first[1]);
    for pair in pairs {
        let _ = write!(d, " L{},{}", pair[0], pair[1]);
    }
    if closed {
        d.push_str(" Z");
    }
    d
}
