use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Below this cross-product magnitude two directions are treated as
/// colinear and the rotation axis falls back to +Y.
const AXIS_EPSILON: f32 = 1e-15;

/// A 3D vector. The table lies on the X-Z plane; Y is height.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X_AXIS: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y_AXIS: Self = Self::new(0.0, 1.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in this direction. A (near-)zero vector normalizes to
    /// zero so degenerate geometry stays deterministic downstream.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            Self::ZERO
        } else {
            self * (1.0 / len)
        }
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// A 3x3 rotation matrix, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3(pub [[f32; 3]; 3]);

impl Mat3 {
    /// Axis-angle rotation matrix from a unit axis and the angle's
    /// cosine/sine.
    pub fn axis_angle(u: Vec3, cos: f32, sin: f32) -> Self {
        let k = 1.0 - cos;
        Self([
            [
                cos + u.x * u.x * k,
                u.x * u.y * k - u.z * sin,
                u.x * u.z * k + u.y * sin,
            ],
            [
                u.y * u.x * k + u.z * sin,
                cos + u.y * u.y * k,
                u.y * u.z * k - u.x * sin,
            ],
            [
                u.z * u.x * k - u.y * sin,
                u.z * u.y * k + u.x * sin,
                cos + u.z * u.z * k,
            ],
        ])
    }

    /// Rotation carrying the unit direction `dir` onto the +X axis.
    ///
    /// The axis is `dir × X`; when the cross product vanishes (directions
    /// colinear, or `dir` degenerate-zero) the axis falls back to +Y.
    pub fn rotation_onto_x(dir: Vec3) -> Self {
        let mut axis = dir.cross(Vec3::X_AXIS);
        let cos = dir.dot(Vec3::X_AXIS);
        let sin = axis.length();
        if sin < AXIS_EPSILON {
            axis = Vec3::Y_AXIS;
        } else {
            axis = axis * (1.0 / sin);
        }
        Self::axis_angle(axis, cos, sin)
    }

    /// The transpose, which inverts a rotation.
    pub fn transposed(&self) -> Self {
        let m = &self.0;
        Self([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Apply the matrix to a vector.
    pub fn apply(&self, v: Vec3) -> Vec3 {
        let m = &self.0;
        Vec3::new(
            v.x * m[0][0] + v.y * m[0][1] + v.z * m[0][2],
            v.x * m[1][0] + v.y * m[1][1] + v.z * m[1][2],
            v.x * m[2][0] + v.y * m[2][1] + v.z * m[2][2],
        )
    }
}

/// A quaternion driving the cosmetic ball roll.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Unit quaternion in this orientation; a zero quaternion collapses to
    /// identity.
    pub fn normalized(self) -> Self {
        let len = (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt();
        if len <= f32::EPSILON {
            Self::IDENTITY
        } else {
            let inv = 1.0 / len;
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        }
    }
}

impl Mul for Quat {
    type Output = Self;

    /// Hamilton product: `self` followed by `rhs` in the local frame.
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}
