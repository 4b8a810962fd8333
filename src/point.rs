//! Wrapper module around the `Point3` type

use crate::Float;
use std::ops::*;

/// A physical point in 3D world space
///
/// We treat positive Y as up, matching the convention of the mesh kernel: cylinders grow along Y
/// and planes lie flat in the XZ plane. The same type doubles as an offset vector and as a triple
/// of euler angles, because the mesh kernel's transform calls want all three shapes of data.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3 {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl Point3 {
    /// The origin / zero offset
    pub const ZERO: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: Float, y: Float, z: Float) -> Self {
        Point3 { x, y, z }
    }

    /// Componentwise multiplication, used to apply non-uniform scale factors
    pub fn mul_componentwise(self, other: Point3) -> Self {
        Point3 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }

    /// Rotates the point about the X axis by `angle` radians
    ///
    /// The rotation is counter-clockwise when viewed from positive X, following the right-hand
    /// rule. See also: [`rotated_y`], [`rotated_z`].
    ///
    /// [`rotated_y`]: Self::rotated_y
    /// [`rotated_z`]: Self::rotated_z
    pub fn rotated_x(self, angle: Float) -> Self {
        let (sin, cos) = angle.sin_cos();
        Point3 {
            x: self.x,
            y: cos * self.y - sin * self.z,
            z: sin * self.y + cos * self.z,
        }
    }

    /// Rotates the point about the Y axis by `angle` radians
    pub fn rotated_y(self, angle: Float) -> Self {
        let (sin, cos) = angle.sin_cos();
        Point3 {
            x: cos * self.x + sin * self.z,
            y: self.y,
            z: -sin * self.x + cos * self.z,
        }
    }

    /// Rotates the point about the Z axis by `angle` radians
    pub fn rotated_z(self, angle: Float) -> Self {
        let (sin, cos) = angle.sin_cos();
        Point3 {
            x: cos * self.x - sin * self.y,
            y: sin * self.x + cos * self.y,
            z: self.z,
        }
    }
}

impl Add<Point3> for Point3 {
    type Output = Self;

    fn add(self, other: Point3) -> Self {
        Point3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl AddAssign<Point3> for Point3 {
    fn add_assign(&mut self, other: Point3) {
        *self = *self + other;
    }
}

impl Sub<Point3> for Point3 {
    type Output = Self;

    fn sub(self, other: Point3) -> Self {
        self + -1.0 * other
    }
}

impl Neg for Point3 {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl Mul<Point3> for Float {
    type Output = Point3;

    fn mul(self, point: Point3) -> Point3 {
        point * self
    }
}

impl Mul<Float> for Point3 {
    type Output = Self;

    fn mul(self, scale: Float) -> Self {
        Point3 {
            x: scale * self.x,
            y: scale * self.y,
            z: scale * self.z,
        }
    }
}

impl Div<Float> for Point3 {
    type Output = Self;

    fn div(self, divisor: Float) -> Self {
        self * (1.0 / divisor)
    }
}
