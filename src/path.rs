use std::fmt;
use std::str::FromStr;

use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::arc::append_arc;
use crate::error::{Error, Result};
use crate::tokenizer::{tokenize, Token, TokenKind};
use crate::transform::Transform;
use crate::vector::{Vector, Vertex};

/// The kind of a resolved path command.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathCommand {
    MoveTo,
    LineTo,
    /// Cubic Bézier curve: two control points followed by the end point.
    CurveTo,
    Close,
}

impl PathCommand {
    /// Number of vertices consumed by this command.
    pub fn arity(self) -> usize {
        match self {
            Self::Close => 0,
            Self::MoveTo | Self::LineTo => 1,
            Self::CurveTo => 3,
        }
    }
}

/// Absolute path geometry.
///
/// Every command consumes [`PathCommand::arity`] vertices from `vertices`,
/// in order. Quadratic curves and elliptical arcs are stored as cubic
/// curves, and every coordinate is absolute.
#[derive(Debug, Default, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathData {
    commands: Vec<PathCommand>,
    vertices: Vec<Vertex>,
}

/// One command of a [`PathData`] together with its vertices.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Segment {
    MoveTo(Vertex),
    LineTo(Vertex),
    CurveTo(Vertex, Vertex, Vertex),
    Close,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, v: Vertex) {
        self.commands.push(PathCommand::MoveTo);
        self.vertices.push(v);
    }

    pub fn line_to(&mut self, v: Vertex) {
        self.commands.push(PathCommand::LineTo);
        self.vertices.push(v);
    }

    pub fn curve_to(&mut self, c1: Vertex, c2: Vertex, v: Vertex) {
        self.commands.push(PathCommand::CurveTo);
        self.vertices.extend_from_slice(&[c1, c2, v]);
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over the commands paired with their vertices.
    pub fn iter(&self) -> Segments<'_> {
        Segments {
            commands: self.commands.iter(),
            vertices: &self.vertices,
        }
    }

    /// Map every vertex through `transform`.
    ///
    /// Affine maps send Bézier control points to the control points of the
    /// mapped curve, so the result is exact.
    pub fn transform(&self, transform: &Transform) -> Self {
        Self {
            commands: self.commands.clone(),
            vertices: self
                .vertices
                .iter()
                .map(|v| transform.apply_point(*v))
                .collect(),
        }
    }

    /// Parse SVG path data (the `d` attribute).
    ///
    /// Relative commands are resolved against the current point, `H`/`V`
    /// become lines, `Q`/`T` and `A` become cubic curves, and the smooth
    /// variants `S`/`T` get their reflected control points filled in.
    pub fn parse(s: &str) -> Result<Self> {
        trace!("PathData::parse");
        let tokens = tokenize(s)?;
        let mut path = Self::new();
        let mut cursor = Cursor::default();

        let mut index = 0;
        while index < tokens.len() {
            let token = tokens[index];
            let letter = match token.kind {
                TokenKind::Command(letter) => letter,
                TokenKind::Number(_) => return Err(Error::UnexpectedNumber(token.offset)),
            };
            index += 1;
            let args_start = index;
            while index < tokens.len() && tokens[index].number().is_some() {
                index += 1;
            }
            let args: Vec<f64> = tokens[args_start..index]
                .iter()
                .filter_map(Token::number)
                .collect();
            cursor.execute(&mut path, letter, token.offset, &args)?;
        }

        trace!("PathData::parse: {} commands", path.commands.len());
        Ok(path)
    }
}

impl FromStr for PathData {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a PathData {
    type Item = Segment;
    type IntoIter = Segments<'a>;

    fn into_iter(self) -> Segments<'a> {
        self.iter()
    }
}

/// Iterator returned by [`PathData::iter`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    commands: std::slice::Iter<'a, PathCommand>,
    vertices: &'a [Vertex],
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let command = *self.commands.next()?;
        let arity = command.arity();
        let taken = self.vertices.get(..arity)?;
        let segment = match (command, taken) {
            (PathCommand::MoveTo, &[v]) => Segment::MoveTo(v),
            (PathCommand::LineTo, &[v]) => Segment::LineTo(v),
            (PathCommand::CurveTo, &[c1, c2, v]) => Segment::CurveTo(c1, c2, v),
            (PathCommand::Close, _) => Segment::Close,
            _ => return None,
        };
        self.vertices = &self.vertices[arity..];
        Some(segment)
    }
}

/// Writes path data using only `M`, `L`, `C` and `z`.
impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self {
            match segment {
                Segment::MoveTo(v) => write!(f, "M{},{}", v.x, v.y)?,
                Segment::LineTo(v) => write!(f, "L{},{}", v.x, v.y)?,
                Segment::CurveTo(c1, c2, v) => write!(
                    f,
                    "C{},{},{},{},{},{}",
                    c1.x, c1.y, c2.x, c2.y, v.x, v.y
                )?,
                Segment::Close => f.write_str("z")?,
            }
        }
        Ok(())
    }
}

/// A path data command as written, before resolution.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
enum Command {
    MoveTo,
    LineTo,
    HorizontalLineTo,
    VerticalLineTo,
    ClosePath,
    CurveTo,
    SmoothCurveTo,
    Quadratic,
    SmoothQuadratic,
    EllipticalArc,
}

impl Command {
    fn from_letter(letter: char) -> Option<Self> {
        let command = match letter.to_ascii_lowercase() {
            'm' => Self::MoveTo,
            'l' => Self::LineTo,
            'h' => Self::HorizontalLineTo,
            'v' => Self::VerticalLineTo,
            'z' => Self::ClosePath,
            'c' => Self::CurveTo,
            's' => Self::SmoothCurveTo,
            'q' => Self::Quadratic,
            't' => Self::SmoothQuadratic,
            'a' => Self::EllipticalArc,
            _ => return None,
        };
        Some(command)
    }

    /// Number of arguments consumed per repetition.
    fn group_size(self) -> usize {
        match self {
            Self::ClosePath => 0,
            Self::HorizontalLineTo | Self::VerticalLineTo => 1,
            Self::MoveTo | Self::LineTo | Self::SmoothQuadratic => 2,
            Self::SmoothCurveTo | Self::Quadratic => 4,
            Self::CurveTo => 6,
            Self::EllipticalArc => 7,
        }
    }

    fn is_cubic(self) -> bool {
        matches!(self, Self::CurveTo | Self::SmoothCurveTo)
    }

    fn is_quadratic(self) -> bool {
        matches!(self, Self::Quadratic | Self::SmoothQuadratic)
    }
}

/// Interpreter state for one parse call.
#[derive(Debug, Default)]
struct Cursor {
    current: Vertex,
    subpath_start: Vertex,
    /// The previously executed command, consulted by `S` and `T`.
    last_command: Option<Command>,
    /// Second control point of the last cubic, or the control point of the
    /// last quadratic.
    last_control: Vertex,
}

impl Cursor {
    fn execute(
        &mut self,
        path: &mut PathData,
        letter: char,
        offset: usize,
        args: &[f64],
    ) -> Result<()> {
        let command =
            Command::from_letter(letter).ok_or(Error::UnknownCommand(letter, offset))?;
        let relative = letter.is_ascii_lowercase();
        trace!("Cursor::execute: {} {:?}", letter, args);

        let group = command.group_size();
        if group == 0 {
            if !args.is_empty() {
                return Err(Error::InvalidArgumentCount {
                    command: letter,
                    offset,
                });
            }
            self.close_path(path);
            return Ok(());
        }
        if args.is_empty() || args.len() % group != 0 {
            return Err(Error::InvalidArgumentCount {
                command: letter,
                offset,
            });
        }

        for (i, g) in args.chunks_exact(group).enumerate() {
            let origin = if relative { self.current } else { Vector::ZERO };
            let point = |x: f64, y: f64| origin + Vector::new(x, y);
            // Extra coordinate pairs after a moveto are implicit linetos.
            let command = if command == Command::MoveTo && i > 0 {
                Command::LineTo
            } else {
                command
            };
            match command {
                Command::MoveTo => {
                    let to = point(g[0], g[1]);
                    path.move_to(to);
                    self.current = to;
                    self.subpath_start = to;
                }
                Command::LineTo => self.line_to(path, point(g[0], g[1])),
                Command::HorizontalLineTo => {
                    let x = origin.x + g[0];
                    self.line_to(path, Vector::new(x, self.current.y));
                }
                Command::VerticalLineTo => {
                    let y = origin.y + g[0];
                    self.line_to(path, Vector::new(self.current.x, y));
                }
                Command::CurveTo => {
                    self.cubic_to(
                        path,
                        point(g[0], g[1]),
                        point(g[2], g[3]),
                        point(g[4], g[5]),
                    );
                }
                Command::SmoothCurveTo => {
                    let c1 = self.reflected_control(Command::is_cubic);
                    self.cubic_to(path, c1, point(g[0], g[1]), point(g[2], g[3]));
                }
                Command::Quadratic => self.quadratic_to(path, point(g[0], g[1]), point(g[2], g[3])),
                Command::SmoothQuadratic => {
                    let control = self.reflected_control(Command::is_quadratic);
                    self.quadratic_to(path, control, point(g[0], g[1]));
                }
                Command::EllipticalArc => {
                    let to = point(g[5], g[6]);
                    append_arc(
                        path,
                        self.current,
                        Vector::new(g[0], g[1]),
                        g[2],
                        g[3] != 0.0,
                        g[4] != 0.0,
                        to,
                    );
                    self.current = to;
                }
                Command::ClosePath => self.close_path(path),
            }
            self.last_command = Some(command);
        }
        Ok(())
    }

    /// The first control point of a smooth curve: the previous control point
    /// mirrored through the current point when the previous command was of
    /// the same family, otherwise the current point itself.
    fn reflected_control(&self, same_family: fn(Command) -> bool) -> Vertex {
        match self.last_command {
            Some(previous) if same_family(previous) => {
                self.last_control.reflect_through(self.current)
            }
            _ => self.current,
        }
    }

    fn line_to(&mut self, path: &mut PathData, to: Vertex) {
        path.line_to(to);
        self.current = to;
    }

    fn cubic_to(&mut self, path: &mut PathData, c1: Vertex, c2: Vertex, to: Vertex) {
        path.curve_to(c1, c2, to);
        self.last_control = c2;
        self.current = to;
    }

    /// Quadratic curves are stored as cubics whose control points both
    /// coincide with the quadratic control point.
    fn quadratic_to(&mut self, path: &mut PathData, control: Vertex, to: Vertex) {
        path.curve_to(control, control, to);
        self.last_control = control;
        self.current = to;
    }

    fn close_path(&mut self, path: &mut PathData) {
        path.close();
        self.current = self.subpath_start;
        self.last_command = Some(Command::ClosePath);
    }
}
