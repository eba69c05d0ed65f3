//! Path-following steering: seek/arrive toward a look-ahead point, force-limited acceleration,
//! sharp-turn braking, and profile-specific orientation.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod profile;

pub use config::{SteerConfig, SteerConfigError};
pub use controller::{turn_brake_factor, SteerController, SteerState, PIVOT_FACTOR};
pub use profile::{HeliMotion, SteerProfile};
