use core::f32::consts::FRAC_PI_2;
use core::fmt;

use steer_core::{map, Manipulator, Vec3, EPSILON};
use steer_path::{Path, PolylinePath};

use crate::{HeliMotion, SteerConfig, SteerProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteerState {
    /// No path installed.
    Idle,
    Following,
    /// Reached the end of the last path; the body is stopped.
    Arrived,
}

/// Brake factors at or below this stop translation so the body turns in place.
pub const PIVOT_FACTOR: f32 = 0.05;

/// Velocity scale for a turn from `forward` to `heading`, measured on the ground plane.
///
/// `1.0` up to `brake_start`, falling linearly to `0.0` at 90°, and `0.0` beyond: the body
/// pivots in place before translating again.
pub fn turn_brake_factor(forward: Vec3, heading: Vec3, brake_start: f32) -> f32 {
    let delta = forward.horizontal().angle_between(heading.horizontal());
    if delta <= brake_start {
        return 1.0;
    }
    if delta >= FRAC_PI_2 {
        return 0.0;
    }
    (1.0 - map(delta, brake_start, FRAC_PI_2, 0.0, 1.0)).clamp(0.0, 1.0)
}

/// Steers a body along a path with arrival deceleration.
pub struct SteerController {
    config: SteerConfig,
    profile: SteerProfile,
    max_speed: f32,
    velocity: Vec3,
    path: Option<Box<dyn Path>>,
    path_time: f32,
    target: Option<Vec3>,
    state: SteerState,
}

impl SteerController {
    pub fn new(config: SteerConfig, profile: SteerProfile) -> Self {
        Self {
            max_speed: sanitize_speed(config.max_speed),
            config,
            profile,
            velocity: Vec3::ZERO,
            path: None,
            path_time: 0.0,
            target: None,
            state: SteerState::Idle,
        }
    }

    pub fn standard(config: SteerConfig) -> Self {
        Self::new(config, SteerProfile::Standard)
    }

    pub fn tank(config: SteerConfig, turn_rate: f32) -> Self {
        Self::new(config, SteerProfile::tank(turn_rate))
    }

    pub fn heli(config: SteerConfig, dip: f32) -> Self {
        Self::new(config, SteerProfile::heli(dip))
    }

    pub fn config(&self) -> &SteerConfig {
        &self.config
    }

    pub fn profile(&self) -> &SteerProfile {
        &self.profile
    }

    pub fn heli_motion(&self) -> Option<&HeliMotion> {
        match &self.profile {
            SteerProfile::Heli(motion) => Some(motion),
            _ => None,
        }
    }

    pub fn state(&self) -> SteerState {
        self.state
    }

    pub fn has_path(&self) -> bool {
        self.path.is_some()
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.max_speed = sanitize_speed(max_speed);
        self.velocity = self.velocity.clamp_length(self.max_speed);
    }

    /// Arc-length progress along the current path.
    pub fn path_time(&self) -> f32 {
        self.path_time
    }

    /// Final point of the current (or last arrived) path.
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    pub fn path(&self) -> Option<&dyn Path> {
        self.path.as_deref()
    }

    /// Follow a point sequence at up to `speed` units/second.
    ///
    /// Fewer than two points, or a path of ~zero length, arrives immediately.
    pub fn follow(&mut self, points: &[Vec3], speed: f32) {
        self.set_max_speed(speed);
        self.follow_path(Box::new(PolylinePath::new(points.to_vec())));
    }

    /// Install an arbitrary path, keeping the current speed limit.
    pub fn follow_path(&mut self, path: Box<dyn Path>) {
        self.path_time = 0.0;
        let length = path.length();
        self.target = Some(path.end());

        if length.is_nan() || length <= EPSILON {
            tracing::debug!(length, "degenerate path; arrived immediately");
            self.path = None;
            self.velocity = Vec3::ZERO;
            self.state = SteerState::Arrived;
            return;
        }

        tracing::debug!(length, max_speed = self.max_speed, "following path");
        self.path = Some(path);
        self.state = SteerState::Following;
    }

    /// Drop the path and stop.
    pub fn clear(&mut self) {
        self.path = None;
        self.target = None;
        self.velocity = Vec3::ZERO;
        self.path_time = 0.0;
        self.state = SteerState::Idle;
    }

    /// Advance one tick and apply the result to `body`.
    pub fn update_manipulator(&mut self, dt: f32, body: &mut dyn Manipulator) -> SteerState {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if self.state != SteerState::Following {
            if let SteerProfile::Heli(motion) = &mut self.profile {
                if dt > EPSILON {
                    motion.observe(Vec3::ZERO, self.max_speed, dt);
                }
            }
            return self.state;
        }

        let Some(path) = self.path.as_deref() else {
            self.state = SteerState::Idle;
            return self.state;
        };

        let target = path.end();
        let position = body.position();
        if position.distance(target) <= self.config.arriving_threshold {
            self.arrive();
            return self.state;
        }
        if dt <= EPSILON {
            return self.state;
        }

        let max_speed = self.max_speed;

        // Seek a point one step ahead on the path, slowing inside the arrival radius.
        let next = path.position(self.path_time + max_speed * dt);
        let remaining = position.distance(target);
        let speed = if remaining < self.config.arrival_radius {
            map(remaining, 0.0, self.config.arrival_radius, 0.0, max_speed).clamp(0.0, max_speed)
        } else {
            max_speed
        };
        let desired = (next - position).normalize_or_zero() * speed;

        let steer = (desired - self.velocity).clamp_length(self.config.max_force * dt);
        self.velocity = (self.velocity + steer).clamp_length(max_speed);
        if !self.velocity.is_finite() {
            self.velocity = Vec3::ZERO;
        }

        let future = path.position(self.path_time + max_speed * self.config.look_ahead_seconds);
        let heading = future - position;
        let pivot = match &mut self.profile {
            SteerProfile::Heli(motion) => {
                motion.observe(self.velocity, max_speed, dt);
                false
            }
            _ => {
                let factor =
                    turn_brake_factor(body.forward(), heading, self.config.brake_start_angle);
                self.velocity = if factor <= PIVOT_FACTOR {
                    Vec3::ZERO
                } else {
                    self.velocity * factor
                };
                factor <= PIVOT_FACTOR
            }
        };

        self.path_time += self.velocity.length() * dt;
        let new_position = path.position(self.path_time);
        body.set_position(new_position);
        body.set_normal(path.normal(self.path_time));

        // Blend travel with the look-ahead heading only while both point the same way. Pivoting,
        // or a heading behind the travel direction, faces the heading outright.
        let travel = (new_position - position).horizontal().normalize_or_zero();
        let ahead = heading.horizontal().normalize_or_zero();
        let facing = if pivot || travel.dot(ahead) <= 0.0 {
            ahead
        } else {
            (travel + ahead).normalize_or_zero()
        };
        let facing = if facing == Vec3::ZERO { travel } else { facing };
        match &self.profile {
            SteerProfile::Standard => body.rotate_to(facing.horizontal()),
            SteerProfile::Tank { turn_rate } => {
                let turned = body
                    .forward()
                    .rotate_towards(facing.horizontal(), turn_rate * dt);
                body.rotate_to(turned.horizontal());
            }
            SteerProfile::Heli(motion) => body.rotate_to(motion.facing(heading, body.forward())),
        }

        if new_position.distance(target) <= self.config.arriving_threshold {
            self.arrive();
        }
        self.state
    }

    fn arrive(&mut self) {
        tracing::debug!(goal = ?self.target, path_time = self.path_time, "arrived");
        self.path = None;
        self.velocity = Vec3::ZERO;
        self.state = SteerState::Arrived;
    }
}

impl fmt::Debug for SteerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SteerController")
            .field("state", &self.state)
            .field("profile", &self.profile)
            .field("velocity", &self.velocity)
            .field("max_speed", &self.max_speed)
            .field("path_time", &self.path_time)
            .field("path_length", &self.path.as_ref().map(|p| p.length()))
            .field("target", &self.target)
            .finish()
    }
}

fn sanitize_speed(speed: f32) -> f32 {
    if speed.is_finite() {
        speed.max(0.0)
    } else {
        0.0
    }
}
