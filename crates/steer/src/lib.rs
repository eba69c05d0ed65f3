//! Umbrella crate that re-exports the `steer-*` building blocks.
//!
//! A typical frame: rebuild an [`agent::WorldSnapshot`] from the scene, then call
//! [`agent::Agent::update`] for every agent with its scene-owned body.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use steer_core as core;

#[cfg(feature = "path")]
#[cfg_attr(docsrs, doc(cfg(feature = "path")))]
pub use steer_path as path;

#[cfg(feature = "coroutine")]
#[cfg_attr(docsrs, doc(cfg(feature = "coroutine")))]
pub use steer_coroutine as coroutine;

#[cfg(feature = "control")]
#[cfg_attr(docsrs, doc(cfg(feature = "control")))]
pub use steer_control as control;

#[cfg(feature = "agent")]
#[cfg_attr(docsrs, doc(cfg(feature = "agent")))]
pub use steer_agent as agent;
