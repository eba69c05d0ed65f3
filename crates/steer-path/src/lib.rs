//! Path sampling (arc-length queries) and pathfinding backends.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod grid;
pub mod navigator;
pub mod path;

pub use grid::NavGrid;
pub use navigator::{MovementClass, Pathfinder};
pub use path::{Path, PolylinePath};
