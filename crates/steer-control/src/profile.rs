use steer_core::{safe_divisor, Vec3};

/// Vehicle-specific parts of the steering update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SteerProfile {
    /// Snaps orientation to the travel direction; brakes for sharp turns.
    #[default]
    Standard,
    /// Rotates at most `turn_rate` radians/second; brakes for sharp turns and pivots in place.
    Tank { turn_rate: f32 },
    /// No turn braking; pitches the nose down with speed and tracks acceleration.
    Heli(HeliMotion),
}

impl SteerProfile {
    pub fn tank(turn_rate: f32) -> Self {
        Self::Tank {
            turn_rate: turn_rate.max(0.0),
        }
    }

    pub fn heli(dip: f32) -> Self {
        Self::Heli(HeliMotion::new(dip))
    }

    pub fn brakes_for_turns(&self) -> bool {
        !matches!(self, Self::Heli(_))
    }
}

/// Rotorcraft motion state exposed for tilt/visual consumers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeliMotion {
    /// Vertical look offset at full speed (units per unit of horizontal heading).
    pub dip: f32,
    acceleration: f32,
    speed_ratio: f32,
    last_horizontal_speed: f32,
}

impl HeliMotion {
    pub fn new(dip: f32) -> Self {
        Self {
            dip: if dip.is_finite() { dip.max(0.0) } else { 0.0 },
            ..Self::default()
        }
    }

    /// Δ(horizontal speed)/Δt from the last update.
    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    /// Horizontal speed over the speed limit.
    pub fn speed_ratio(&self) -> f32 {
        self.speed_ratio
    }

    pub(crate) fn observe(&mut self, velocity: Vec3, max_speed: f32, dt: f32) {
        let horizontal_speed = velocity.horizontal().length();
        self.speed_ratio = horizontal_speed / safe_divisor(max_speed);
        self.acceleration = (horizontal_speed - self.last_horizontal_speed) / safe_divisor(dt);
        self.last_horizontal_speed = horizontal_speed;
    }

    /// Facing that dips below the horizontal heading in proportion to speed.
    pub(crate) fn facing(&self, heading: Vec3, fallback: Vec3) -> Vec3 {
        let mut flat = heading.horizontal().normalize_or_zero();
        if flat == Vec3::ZERO {
            flat = fallback.horizontal().normalize_or_zero();
        }
        if flat == Vec3::ZERO {
            return Vec3::ZERO;
        }
        (flat - Vec3::UP * (self.dip * self.speed_ratio)).normalize_or_zero()
    }
}
