//! Path data (`d` attribute) to [`Path`].
//!
//! [`parse`] accepts only the normalized command set `M L Q C Z`, absolute
//! or relative, with implicit repetition. Everything else, including the
//! shorthand and arc commands, is rejected with
//! [`SvgError::UnsupportedCommand`]; run [`crate::normalize`] first.
//!
//! Every segment carries its own start point (the pen position before the
//! command), so consecutive segments share endpoints. A close command whose
//! pen is away from the subpath start adds a closing line segment.

use svg::node::element::path::{Command, Data, Parameters, Position};
use warpath_core::{Path, Point, Segment, Subpath};

use crate::arc::Arc;
use crate::error::SvgError;

/// Which commands the reader accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Syntax {
    /// `M L Q C Z` only.
    Normalized,
    /// All SVG path commands.
    Full,
}

/// Parse normalized path data into subpaths of segments.
///
/// Empty data gives an empty path. A subpath consisting of a lone move-to
/// draws nothing and is dropped.
///
/// # Errors
///
/// - [`SvgError::PathData`] if the data cannot be tokenized.
/// - [`SvgError::UnsupportedCommand`] for commands outside `M L Q C Z`.
/// - [`SvgError::MissingMoveTo`] if drawing starts before a move-to.
/// - [`SvgError::ParameterCount`] if a command has a partial parameter group.
///
/// # Examples
///
/// ```
/// use warpath_svg::parse;
///
/// let path = parse("M0,0 L10,0 Q15,5 20,0 Z")?;
/// assert_eq!(path.subpaths().len(), 1);
/// // Z away from the start adds a closing line.
/// assert_eq!(path.segment_count(), 3);
/// # Ok::<(), warpath_svg::SvgError>(())
/// ```
pub fn parse(d: &str) -> Result<Path, SvgError> {
    read(d, Syntax::Normalized)
}

/// Tokenize `d` and read it with the given command set.
pub(crate) fn read(d: &str, syntax: Syntax) -> Result<Path, SvgError> {
    let data = Data::parse(d).map_err(|e| SvgError::PathData(e.to_string()))?;
    let mut reader = Reader::new();
    for command in data.iter() {
        reader.command(command, syntax)?;
    }
    Ok(reader.finish())
}

/// Pen state while walking commands.
struct Reader {
    subpaths: Vec<Subpath>,
    segments: Vec<Segment>,
    start: Point,
    pen: Point,
    started: bool,
    /// Second control point of the previous cubic, for `S`.
    cubic_control: Option<Point>,
    /// Control point of the previous quadratic, for `T`.
    quadratic_control: Option<Point>,
}

impl Reader {
    const fn new() -> Self {
        Self {
            subpaths: Vec::new(),
            segments: Vec::new(),
            start: Point::new(0.0, 0.0),
            pen: Point::new(0.0, 0.0),
            started: false,
            cubic_control: None,
            quadratic_control: None,
        }
    }

    fn command(&mut self, command: &Command, syntax: Syntax) -> Result<(), SvgError> {
        let letter = letter(command);
        if syntax == Syntax::Normalized
            && !matches!(letter.to_ascii_uppercase(), 'M' | 'L' | 'Q' | 'C' | 'Z')
        {
            return Err(SvgError::UnsupportedCommand(letter));
        }
        if !self.started && !matches!(command, Command::Move(..)) {
            return Err(SvgError::MissingMoveTo);
        }

        match command {
            Command::Move(position, params) => {
                for (i, c) in groups(params, 2, letter)?.enumerate() {
                    let p = self.resolve(position, c[0], c[1]);
                    if i == 0 {
                        self.move_to(p);
                    } else {
                        self.line_to(p);
                    }
                }
            }
            Command::Line(position, params) => {
                for c in groups(params, 2, letter)? {
                    let p = self.resolve(position, c[0], c[1]);
                    self.line_to(p);
                }
            }
            Command::HorizontalLine(position, params) => {
                for c in groups(params, 1, letter)? {
                    let x = offset(position, self.pen.x, c[0]);
                    self.line_to(Point::new(x, self.pen.y));
                }
            }
            Command::VerticalLine(position, params) => {
                for c in groups(params, 1, letter)? {
                    let y = offset(position, self.pen.y, c[0]);
                    self.line_to(Point::new(self.pen.x, y));
                }
            }
            Command::QuadraticCurve(position, params) => {
                for c in groups(params, 4, letter)? {
                    let control = self.resolve(position, c[0], c[1]);
                    let end = self.resolve(position, c[2], c[3]);
                    self.quadratic_to(control, end);
                }
            }
            Command::SmoothQuadraticCurve(position, params) => {
                for c in groups(params, 2, letter)? {
                    let control = self.reflect(self.quadratic_control);
                    let end = self.resolve(position, c[0], c[1]);
                    self.quadratic_to(control, end);
                }
            }
            Command::CubicCurve(position, params) => {
                for c in groups(params, 6, letter)? {
                    let control1 = self.resolve(position, c[0], c[1]);
                    let control2 = self.resolve(position, c[2], c[3]);
                    let end = self.resolve(position, c[4], c[5]);
                    self.cubic_to(control1, control2, end);
                }
            }
            Command::SmoothCubicCurve(position, params) => {
                for c in groups(params, 4, letter)? {
                    let control1 = self.reflect(self.cubic_control);
                    let control2 = self.resolve(position, c[0], c[1]);
                    let end = self.resolve(position, c[2], c[3]);
                    self.cubic_to(control1, control2, end);
                }
            }
            Command::EllipticalArc(position, params) => {
                for c in groups(params, 7, letter)? {
                    let arc = Arc {
                        from: self.pen,
                        rx: f64::from(c[0]),
                        ry: f64::from(c[1]),
                        rotation: f64::from(c[2]),
                        large_arc: c[3] != 0.0,
                        sweep: c[4] != 0.0,
                        to: self.resolve(position, c[5], c[6]),
                    };
                    self.segments.extend(arc.to_cubics());
                    self.pen = arc.to;
                    self.clear_controls();
                }
            }
            Command::Close => self.close(),
        }
        Ok(())
    }

    fn resolve(&self, position: &Position, x: f32, y: f32) -> Point {
        Point::new(offset(position, self.pen.x, x), offset(position, self.pen.y, y))
    }

    /// Reflect a previous control point about the pen, or use the pen itself
    /// when the previous command was not of the same curve type.
    fn reflect(&self, control: Option<Point>) -> Point {
        control.map_or(self.pen, |c| {
            Point::new(2.0f64.mul_add(self.pen.x, -c.x), 2.0f64.mul_add(self.pen.y, -c.y))
        })
    }

    const fn clear_controls(&mut self) {
        self.cubic_control = None;
        self.quadratic_control = None;
    }

    fn move_to(&mut self, p: Point) {
        self.finish_subpath(false);
        self.start = p;
        self.pen = p;
        self.started = true;
        self.clear_controls();
    }

    fn line_to(&mut self, p: Point) {
        self.segments.push(Segment::line(self.pen, p));
        self.pen = p;
        self.clear_controls();
    }

    fn quadratic_to(&mut self, control: Point, end: Point) {
        self.segments.push(Segment::quadratic(self.pen, control, end));
        self.pen = end;
        self.cubic_control = None;
        self.quadratic_control = Some(control);
    }

    fn cubic_to(&mut self, control1: Point, control2: Point, end: Point) {
        self.segments.push(Segment::cubic(self.pen, control1, control2, end));
        self.pen = end;
        self.cubic_control = Some(control2);
        self.quadratic_control = None;
    }

    fn close(&mut self) {
        if !self.segments.is_empty() && self.pen != self.start {
            self.segments.push(Segment::line(self.pen, self.start));
        }
        self.finish_subpath(true);
        self.pen = self.start;
        self.clear_controls();
    }

    fn finish_subpath(&mut self, closed: bool) {
        if self.segments.is_empty() {
            if self.started {
                log::trace!("dropping subpath with no drawing commands");
            }
            return;
        }
        let segments = std::mem::take(&mut self.segments);
        self.subpaths.push(Subpath::new(segments, closed));
    }

    fn finish(mut self) -> Path {
        self.finish_subpath(false);
        Path::new(self.subpaths)
    }
}

fn offset(position: &Position, pen: f64, value: f32) -> f64 {
    match position {
        Position::Absolute => f64::from(value),
        Position::Relative => pen + f64::from(value),
    }
}

/// Split `params` into whole groups of `size`.
fn groups(
    params: &Parameters,
    size: usize,
    command: char,
) -> Result<std::slice::ChunksExact<'_, f32>, SvgError> {
    if params.is_empty() || params.len() % size != 0 {
        return Err(SvgError::ParameterCount {
            command,
            group: size,
            count: params.len(),
        });
    }
    Ok(params.chunks_exact(size))
}

/// The command letter as written, lowercase for relative commands.
fn letter(command: &Command) -> char {
    let (upper, position) = match command {
        Command::Move(position, _) => ('M', position),
        Command::Line(position, _) => ('L', position),
        Command::HorizontalLine(position, _) => ('H', position),
        Command::VerticalLine(position, _) => ('V', position),
        Command::QuadraticCurve(position, _) => ('Q', position),
        Command::SmoothQuadraticCurve(position, _) => ('T', position),
        Command::CubicCurve(position, _) => ('C', position),
        Command::SmoothCubicCurve(position, _) => ('S', position),
        Command::EllipticalArc(position, _) => ('A', position),
        Command::Close => return 'Z',
    };
    match position {
        Position::Absolute => upper,
        Position::Relative => upper.to_ascii_lowercase(),
    }
}
