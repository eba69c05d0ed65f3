use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used by degenerate-input guards (zero vectors, zero dt).
pub const EPSILON: f32 = 1e-6;

/// Small 3D vector. `y` is up; ground movement happens on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    /// Default facing of a freshly spawned body.
    pub const FORWARD: Self = Self::new(0.0, 0.0, -1.0);

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

    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len <= EPSILON || !len.is_finite() {
            Self::ZERO
        } else {
            self / len
        }
    }

    /// Projection onto the ground plane.
    pub fn horizontal(self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }

    /// Truncate the vector to `max_len` (a.k.a. "clamp length").
    pub fn clamp_length(self, max_len: f32) -> Self {
        let max_len = max_len.max(0.0);
        let len = self.length();
        if len <= max_len || len <= EPSILON {
            self
        } else {
            self * (max_len / len)
        }
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    pub fn approx_eq(self, other: Self, tolerance: f32) -> bool {
        self.distance(other) <= tolerance.max(0.0)
    }

    /// Unsigned angle in radians. Zero vectors yield `0.0`.
    pub fn angle_between(self, other: Self) -> f32 {
        let denom = self.length() * other.length();
        if denom <= EPSILON {
            return 0.0;
        }
        (self.dot(other) / denom).clamp(-1.0, 1.0).acos()
    }

    /// Rodrigues rotation around a unit `axis`.
    pub fn rotate_about(self, axis: Self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        self * cos + axis.cross(self) * sin + axis * (axis.dot(self) * (1.0 - cos))
    }

    /// Rotate the direction `self` toward `target` by at most `max_angle` radians.
    ///
    /// Both inputs are treated as directions; the result is unit length unless both are zero.
    pub fn rotate_towards(self, target: Self, max_angle: f32) -> Self {
        let from = self.normalize_or_zero();
        let to = target.normalize_or_zero();
        if from == Self::ZERO {
            return to;
        }
        if to == Self::ZERO {
            return from;
        }

        let angle = from.angle_between(to);
        if angle <= max_angle.max(0.0) || angle <= EPSILON {
            return to;
        }

        let mut axis = from.cross(to);
        if axis.length_squared() <= EPSILON * EPSILON {
            // Antiparallel: any perpendicular axis works, prefer yaw.
            axis = from.cross(Self::UP).cross(from);
            if axis.length_squared() <= EPSILON * EPSILON {
                axis = from.cross(Self::X);
            }
        }
        from.rotate_about(axis.normalize_or_zero(), max_angle.max(0.0))
            .normalize_or_zero()
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Linearly remap `value` from `[from_min, from_max]` to `[to_min, to_max]`.
///
/// Not clamped. A degenerate source range maps everything to `to_max`.
pub fn map(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    let span = from_max - from_min;
    if span.abs() <= EPSILON {
        return to_max;
    }
    to_min + (value - from_min) / span * (to_max - to_min)
}

/// Use `value` as a divisor, falling back to `1.0` when it is ~0.
pub fn safe_divisor(value: f32) -> f32 {
    if value.abs() <= EPSILON || !value.is_finite() {
        1.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn map_is_linear_and_handles_degenerate_range() {
        assert!((map(1.0, 0.0, 2.0, 0.0, 10.0) - 5.0).abs() < 1e-6);
        assert!((map(0.0, 0.0, 4.0, 1.0, 0.0) - 1.0).abs() < 1e-6);
        assert_eq!(map(3.0, 1.0, 1.0, 0.0, 7.0), 7.0);
    }

    #[test]
    fn rotate_towards_respects_max_angle() {
        let from = Vec3::X;
        let to = Vec3::new(0.0, 0.0, 1.0);
        let step = from.rotate_towards(to, FRAC_PI_2 / 2.0);
        assert!((step.angle_between(from) - FRAC_PI_2 / 2.0).abs() < 1e-4);
        assert!((step.length() - 1.0).abs() < 1e-5);

        let done = from.rotate_towards(to, PI);
        assert!(done.approx_eq(to, 1e-5));
    }

    #[test]
    fn rotate_towards_handles_antiparallel_directions() {
        let step = Vec3::X.rotate_towards(-Vec3::X, 0.1);
        assert!((step.angle_between(Vec3::X) - 0.1).abs() < 1e-4);
        assert!(step.y.abs() < 1e-5, "antiparallel turn should yaw around up");
    }

    #[test]
    fn clamp_length_truncates_only_long_vectors() {
        let v = Vec3::new(3.0, 0.0, 4.0);
        assert_eq!(v.clamp_length(10.0), v);
        assert!((v.clamp_length(1.0).length() - 1.0).abs() < 1e-6);
        assert_eq!(Vec3::ZERO.normalize_or_zero(), Vec3::ZERO);
    }

    #[test]
    fn safe_divisor_defaults_to_one() {
        assert_eq!(safe_divisor(0.0), 1.0);
        assert_eq!(safe_divisor(f32::NAN), 1.0);
        assert_eq!(safe_divisor(2.0), 2.0);
    }
}
