//! Deterministic, engine-agnostic primitives shared by the `steer-*` crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod body;
pub mod math;
pub mod tick;
pub mod trace;

pub use agent::AgentId;
pub use body::{Manipulator, Transform};
pub use math::{map, safe_divisor, Vec3, EPSILON};
pub use tick::TickContext;
pub use trace::{TraceEvent, TraceKind, TraceLog, TraceSink, Tracer};
