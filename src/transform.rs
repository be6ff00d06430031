use std::str::FromStr;

use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tokenizer::{scan_number, skip_separators, skip_whitespace};
use crate::vector::Vector;

/// An affine transform `[[a c e] [b d f] [0 0 1]]`, applied to column
/// vectors `(x, y, 1)`.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `angle` radians. With the y axis pointing down this is
    /// clockwise on screen.
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    pub fn skew_x(angle: f64) -> Self {
        Self::new(1.0, 0.0, angle.tan(), 1.0, 0.0, 0.0)
    }

    pub fn skew_y(angle: f64) -> Self {
        Self::new(1.0, angle.tan(), 0.0, 1.0, 0.0, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// The transform that applies `self` first and `then` afterwards.
    ///
    /// `a.compose(&b).apply_point(p) == b.apply_point(a.apply_point(p))`.
    pub fn compose(&self, then: &Self) -> Self {
        let (a, b) = (self, then);
        Self {
            a: b.a * a.a + b.c * a.b,
            b: b.b * a.a + b.d * a.b,
            c: b.a * a.c + b.c * a.d,
            d: b.b * a.c + b.d * a.d,
            e: b.a * a.e + b.c * a.f + b.e,
            f: b.b * a.e + b.d * a.f + b.f,
        }
    }

    /// Map a point, including the translation part.
    pub fn apply_point(&self, p: Vector) -> Vector {
        Vector::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Map a direction or offset; the translation part is ignored.
    pub fn apply_vector(&self, v: Vector) -> Vector {
        Vector::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    /// Parse an SVG transform list such as `translate(10 20) rotate(45)`.
    ///
    /// The functions apply right to left, as in SVG: the result maps a point
    /// through the last function first. Angles are in degrees. An empty
    /// list yields the identity.
    pub fn parse(s: &str) -> Result<Self> {
        trace!("Transform::parse");
        let bytes = s.as_bytes();
        let mut result = Self::identity();
        let mut pos = skip_separators(bytes, 0);
        while pos < bytes.len() {
            let name_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
                pos += 1;
            }
            if pos == name_start {
                return Err(Error::Syntax(pos));
            }
            let name = &s[name_start..pos];
            let function = Function::from_name(name)
                .ok_or_else(|| Error::UnknownTransformFunction(name.to_string(), name_start))?;

            pos = skip_whitespace(bytes, pos);
            if bytes.get(pos) != Some(&b'(') {
                return Err(Error::MissingDelimiter('(', pos));
            }
            pos += 1;

            let mut args = Vec::with_capacity(6);
            loop {
                pos = skip_separators(bytes, pos);
                match bytes.get(pos) {
                    Some(b')') => {
                        pos += 1;
                        break;
                    }
                    Some(_) => {
                        let (value, end) = scan_number(s, pos)?;
                        args.push(value);
                        pos = end;
                    }
                    None => return Err(Error::MissingDelimiter(')', pos)),
                }
            }

            let transform = function.resolve(&args, name_start)?;
            trace!("Transform::parse: {} {:?}", name, args);
            result = transform.compose(&result);
            pos = skip_separators(bytes, pos);
        }
        Ok(result)
    }
}

impl FromStr for Transform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
enum Function {
    Translate,
    Scale,
    Rotate,
    SkewX,
    SkewY,
    Matrix,
}

impl Function {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "translate" => Some(Self::Translate),
            "scale" => Some(Self::Scale),
            "rotate" => Some(Self::Rotate),
            "skewX" => Some(Self::SkewX),
            "skewY" => Some(Self::SkewY),
            "matrix" => Some(Self::Matrix),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
            Self::SkewX => "skewX",
            Self::SkewY => "skewY",
            Self::Matrix => "matrix",
        }
    }

    fn expected_arguments(self) -> &'static str {
        match self {
            Self::Translate | Self::Scale => "1 or 2",
            Self::Rotate => "1 or 3",
            Self::SkewX | Self::SkewY => "1",
            Self::Matrix => "6",
        }
    }

    fn resolve(self, args: &[f64], offset: usize) -> Result<Transform> {
        let transform = match (self, args) {
            (Self::Translate, &[tx]) => Transform::translation(tx, 0.0),
            (Self::Translate, &[tx, ty]) => Transform::translation(tx, ty),
            (Self::Scale, &[s]) => Transform::scaling(s, s),
            (Self::Scale, &[sx, sy]) => Transform::scaling(sx, sy),
            (Self::Rotate, &[angle]) => Transform::rotation(angle.to_radians()),
            (Self::Rotate, &[angle, cx, cy]) => Transform::translation(-cx, -cy)
                .compose(&Transform::rotation(angle.to_radians()))
                .compose(&Transform::translation(cx, cy)),
            (Self::SkewX, &[angle]) => Transform::skew_x(angle.to_radians()),
            (Self::SkewY, &[angle]) => Transform::skew_y(angle.to_radians()),
            (Self::Matrix, &[a, b, c, d, e, f]) => Transform::new(a, b, c, d, e, f),
            _ => {
                return Err(Error::InvalidTransformArgumentCount {
                    name: self.name().to_string(),
                    expected: self.expected_arguments(),
                    actual: args.len(),
                    offset,
                })
            }
        };
        Ok(transform)
    }
}
