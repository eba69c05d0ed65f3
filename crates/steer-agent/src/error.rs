use std::path::PathBuf;

use steer_control::SteerConfigError;
use steer_coroutine::SchedulerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read agent config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse agent config")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid steering config")]
    Steer(#[from] SteerConfigError),
    #[error("{field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("patrol route must contain at least one waypoint")]
    EmptyRoute,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("agent routine failed")]
    Scheduler(#[from] SchedulerError),
}
