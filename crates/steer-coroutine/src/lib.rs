//! Cooperative, single-threaded routines resumed once per tick.
//!
//! A routine is an explicit step function: every [`Routine::resume`] either suspends until the
//! next tick, delegates to an inner routine, or finishes. No threads, no async runtime.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod routine;
pub mod scheduler;

pub use error::{RoutineError, SchedulerError};
pub use routine::{from_fn, Chain, FnRoutine, Routine, Step, WaitForCount, WaitForSeconds};
pub use scheduler::{RoutineId, Scheduler};
