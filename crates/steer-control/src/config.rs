use core::f32::consts::{FRAC_PI_2, FRAC_PI_4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SteerConfig {
    /// Default speed limit (units/second). `follow` may override it per path.
    pub max_speed: f32,
    /// Acceleration limit (units/second²).
    pub max_force: f32,
    /// Distance to the final target where deceleration starts.
    pub arrival_radius: f32,
    /// Distance to the final target that counts as arrived.
    pub arriving_threshold: f32,
    /// How far ahead (in seconds at max speed) the future heading is sampled.
    pub look_ahead_seconds: f32,
    /// Heading delta (radians) where turn braking starts; full stop at 90°.
    pub brake_start_angle: f32,
}

impl Default for SteerConfig {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            max_force: 20.0,
            arrival_radius: 2.0,
            arriving_threshold: 0.1,
            look_ahead_seconds: 2.0,
            brake_start_angle: FRAC_PI_4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SteerConfigError {
    #[error("{field} must be finite and >= 0 (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be finite and > 0 (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("brake_start_angle must lie in [0, pi/2] (got {0})")]
    BrakeAngle(f32),
}

impl SteerConfig {
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn validate(&self) -> Result<(), SteerConfigError> {
        non_negative("max_speed", self.max_speed)?;
        positive("max_force", self.max_force)?;
        non_negative("arrival_radius", self.arrival_radius)?;
        positive("arriving_threshold", self.arriving_threshold)?;
        non_negative("look_ahead_seconds", self.look_ahead_seconds)?;
        if !(0.0..=FRAC_PI_2).contains(&self.brake_start_angle) {
            return Err(SteerConfigError::BrakeAngle(self.brake_start_angle));
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), SteerConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SteerConfigError::Negative { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), SteerConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SteerConfigError::NotPositive { field, value })
    }
}
