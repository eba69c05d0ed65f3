use thiserror::Error;

use crate::RoutineId;

/// Failure raised from inside a routine body.
#[derive(Debug, Error)]
pub enum RoutineError {
    #[error("{0}")]
    Failed(String),
}

impl RoutineError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The routine was dropped; the scheduler itself stays usable.
    #[error("routine {id} failed")]
    Routine {
        id: RoutineId,
        #[source]
        source: RoutineError,
    },
}

impl SchedulerError {
    pub fn routine_id(&self) -> RoutineId {
        match self {
            Self::Routine { id, .. } => *id,
        }
    }
}
