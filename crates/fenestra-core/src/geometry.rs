use std::ops::{Add, Div, Mul, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply_scalar(self, s: f32) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }

    pub fn divide_scalar(self, s: f32) -> Vec2 {
        Vec2::new(self.x / s, self.y / s)
    }

    /// Element-wise division.
    pub fn divide(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x / other.x, self.y / other.y)
    }

    /// Component-wise floor. The result always holds whole numbers.
    pub fn floor(self) -> Vec2 {
        Vec2::new(self.x.floor(), self.y.floor())
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::add(self, rhs)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        self.subtract(rhs)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        self.multiply_scalar(rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f32) -> Vec2 {
        self.divide_scalar(rhs)
    }
}

impl Div for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: Vec2) -> Vec2 {
        self.divide(rhs)
    }
}

/// Half-open hit test: the left/top edges are inside, the right/bottom edges are not.
pub fn intersects(point: Vec2, origin: Vec2, size: Vec2) -> bool {
    point.x >= origin.x
        && point.x < origin.x + size.x
        && point.y >= origin.y
        && point.y < origin.y + size.y
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            w: size.x,
            h: size.y,
        }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        intersects(p, self.origin(), self.size())
    }
}

/// 3x3 affine matrix, column-major.
///
/// Only translation and scale are ever composed; there is no rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix3 {
    pub m: [f32; 9],
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix3 {
    pub const fn identity() -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        }
    }

    pub fn translation(v: Vec2) -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, v.x, v.y, 1.0],
        }
    }

    pub fn scaling(v: Vec2) -> Self {
        Self {
            m: [v.x, 0.0, 0.0, 0.0, v.y, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// `self * other`
    pub fn mul(&self, other: &Matrix3) -> Matrix3 {
        let a = &self.m;
        let b = &other.m;
        let mut out = [0.0f32; 9];
        for col in 0..3 {
            for row in 0..3 {
                out[col * 3 + row] = a[row] * b[col * 3]
                    + a[3 + row] * b[col * 3 + 1]
                    + a[6 + row] * b[col * 3 + 2];
            }
        }
        Matrix3 { m: out }
    }

    /// Post-multiplies a translation, so it applies before everything already in `self`.
    pub fn translate(self, v: Vec2) -> Matrix3 {
        self.mul(&Matrix3::translation(v))
    }

    /// Post-multiplies a scale, so it applies before everything already in `self`.
    pub fn scale(self, v: Vec2) -> Matrix3 {
        self.mul(&Matrix3::scaling(v))
    }

    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        let m = &self.m;
        Vec2 {
            x: m[0] * p.x + m[3] * p.y + m[6],
            y: m[1] * p.x + m[4] * p.y + m[7],
        }
    }
}
