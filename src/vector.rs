use std::convert;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D vector (or point) with `f64` coordinates.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

/// Points in path data are plain vectors.
pub type Vertex = Vector;

impl Vector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Sum of all vectors, `Vector::ZERO` for an empty input.
    pub fn sum_of<I: IntoIterator<Item = Self>>(vectors: I) -> Self {
        vectors.into_iter().sum()
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The z component of the 3D cross product.
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Squared length.
    pub fn norm(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.norm().sqrt()
    }

    /// Unit vector with the same direction.
    ///
    /// The zero vector has no direction: its components come back as `NaN`,
    /// following IEEE division semantics. Check `is_finite` when the input
    /// may be degenerate.
    pub fn normalized(self) -> Self {
        self / self.length()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Point reflection of `self` through `center`.
    pub fn reflect_through(self, center: Self) -> Self {
        center * 2.0 - self
    }
}

impl convert::From<(f64, f64)> for Vector {
    fn from(val: (f64, f64)) -> Self {
        Self { x: val.0, y: val.1 }
    }
}

impl convert::From<Vector> for (f64, f64) {
    fn from(val: Vector) -> Self {
        (val.x, val.y)
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Mul<f64> for Vector {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

/// Division by zero is not an error: the components become `±inf` (or
/// `NaN` for a zero component).
impl Div<f64> for Vector {
    type Output = Self;

    fn div(self, k: f64) -> Self {
        Self::new(self.x / k, self.y / k)
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Sum for Vector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Vector> for Vector {
    fn sum<I: Iterator<Item = &'a Vector>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
