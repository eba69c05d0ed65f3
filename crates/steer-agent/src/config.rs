//! Agent configuration, loaded from YAML.

use core::f32::consts::FRAC_PI_2;
use std::path::Path;

use serde::{Deserialize, Serialize};
use steer_control::SteerConfig;
use steer_core::Vec3;
use steer_path::MovementClass;

use crate::ConfigError;

/// Vehicle family; picks the steering profile and the destruction reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    #[default]
    Standard,
    Tank,
    Heli,
}

impl AgentKind {
    pub fn movement_class(self) -> MovementClass {
        match self {
            AgentKind::Standard => MovementClass::Ground,
            AgentKind::Tank => MovementClass::Tracked,
            AgentKind::Heli => MovementClass::Air,
        }
    }
}

/// Top-level agent configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub kind: AgentKind,

    /// Starting (and maximum) life
    #[serde(default = "default_life")]
    pub life: f32,

    #[serde(default)]
    pub weapon: WeaponConfig,

    /// Steering parameters shared by every profile
    #[serde(default)]
    pub steer: SteerConfig,

    #[serde(default)]
    pub patrol: PatrolConfig,

    /// Tank turn rate (radians/second)
    #[serde(default = "default_turn_rate")]
    pub turn_rate: f32,

    /// Heli nose dip at full speed
    #[serde(default = "default_rotor_dip")]
    pub rotor_dip: f32,

    #[serde(default)]
    pub crash: CrashConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    #[serde(default = "default_weapon_range")]
    pub range: f32,

    /// Seconds between shots
    #[serde(default = "default_cooldown")]
    pub cooldown_seconds: f32,

    #[serde(default = "default_damage")]
    pub damage: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrolConfig {
    /// Waypoints visited cyclically; empty means no patrol
    #[serde(default)]
    pub route: Vec<Vec3>,

    #[serde(default = "default_patrol_speed")]
    pub speed: f32,

    /// Seconds to rest at a checkpoint before moving on
    #[serde(default = "default_dwell")]
    pub dwell_seconds: f32,

    /// Per-tick movement below this counts as stationary
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
}

/// Heli destruction reaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrashConfig {
    #[serde(default = "default_fall_speed")]
    pub fall_speed: f32,

    #[serde(default = "default_rotor_stop")]
    pub rotor_stop_seconds: f32,
}

fn default_life() -> f32 {
    100.0
}
fn default_turn_rate() -> f32 {
    FRAC_PI_2
}
fn default_rotor_dip() -> f32 {
    0.3
}
fn default_weapon_range() -> f32 {
    15.0
}
fn default_cooldown() -> f32 {
    1.0
}
fn default_damage() -> f32 {
    10.0
}
fn default_patrol_speed() -> f32 {
    5.0
}
fn default_dwell() -> f32 {
    1.0
}
fn default_tolerance() -> f32 {
    1e-3
}
fn default_fall_speed() -> f32 {
    8.0
}
fn default_rotor_stop() -> f32 {
    2.0
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            kind: AgentKind::default(),
            life: default_life(),
            weapon: WeaponConfig::default(),
            steer: SteerConfig::default(),
            patrol: PatrolConfig::default(),
            turn_rate: default_turn_rate(),
            rotor_dip: default_rotor_dip(),
            crash: CrashConfig::default(),
        }
    }
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            range: default_weapon_range(),
            cooldown_seconds: default_cooldown(),
            damage: default_damage(),
        }
    }
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            route: Vec::new(),
            speed: default_patrol_speed(),
            dwell_seconds: default_dwell(),
            tolerance: default_tolerance(),
        }
    }
}

impl Default for CrashConfig {
    fn default() -> Self {
        Self {
            fall_speed: default_fall_speed(),
            rotor_stop_seconds: default_rotor_stop(),
        }
    }
}

impl AgentConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(path = %path.display(), kind = ?config.kind, "loaded agent config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.steer.validate()?;
        positive("life", self.life)?;
        non_negative("weapon.range", self.weapon.range)?;
        non_negative("weapon.cooldown_seconds", self.weapon.cooldown_seconds)?;
        non_negative("weapon.damage", self.weapon.damage)?;
        non_negative("patrol.speed", self.patrol.speed)?;
        non_negative("patrol.dwell_seconds", self.patrol.dwell_seconds)?;
        non_negative("patrol.tolerance", self.patrol.tolerance)?;
        if self.patrol.route.iter().any(|p| !p.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "patrol.route",
                reason: "waypoints must be finite",
            });
        }
        non_negative("turn_rate", self.turn_rate)?;
        non_negative("rotor_dip", self.rotor_dip)?;
        non_negative("crash.fall_speed", self.crash.fall_speed)?;
        non_negative("crash.rotor_stop_seconds", self.crash.rotor_stop_seconds)?;
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be finite and >= 0",
        })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be finite and > 0",
        })
    }
}
