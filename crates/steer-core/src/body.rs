use crate::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The scene-owned transform an agent steers.
///
/// Agents never own their body; the scene passes it into every update.
pub trait Manipulator {
    fn position(&self) -> Vec3;
    fn forward(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    /// Orient the body so it faces `direction`. Zero directions are ignored.
    fn rotate_to(&mut self, direction: Vec3);
    fn set_normal(&mut self, normal: Vec3);
}

/// Plain transform used by headless simulations and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    pub position: Vec3,
    pub forward: Vec3,
    pub normal: Vec3,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn facing(mut self, forward: Vec3) -> Self {
        self.rotate_to(forward);
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::FORWARD,
            normal: Vec3::UP,
        }
    }
}

impl Manipulator for Transform {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        self.forward
    }

    fn set_position(&mut self, position: Vec3) {
        if position.is_finite() {
            self.position = position;
        }
    }

    fn rotate_to(&mut self, direction: Vec3) {
        let dir = direction.normalize_or_zero();
        if dir != Vec3::ZERO {
            self.forward = dir;
        }
    }

    fn set_normal(&mut self, normal: Vec3) {
        let n = normal.normalize_or_zero();
        if n != Vec3::ZERO {
            self.normal = n;
        }
    }
}
