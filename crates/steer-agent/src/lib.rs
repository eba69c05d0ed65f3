//! Agent coordinator: patrol/attack behaviors driving a steering controller.
//!
//! Per tick: [`Agent::update`] → active behavior → [`steer_control::SteerController`] →
//! the scene-owned body. Behaviors observe the world through [`AgentWorld`] instead of global
//! scene state.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod behavior;
pub mod config;
pub mod error;
pub mod hooks;
pub mod route;
pub mod world;

pub use agent::{Agent, AgentEvent, AttackOrder};
pub use behavior::{
    AttackBehavior, AttackStep, AttackTarget, BehaviorKind, BehaviorSet, PatrolBehavior,
    PatrolStep,
};
pub use config::{AgentConfig, AgentKind, CrashConfig, PatrolConfig, WeaponConfig};
pub use error::{AgentError, ConfigError};
pub use hooks::{AgentHooks, DestroyedContext, HeliCrash, StopInPlace};
pub use route::plan_route;
pub use world::{AgentView, AgentWorld, TargetState, WorldSnapshot};
