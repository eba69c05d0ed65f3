use steer_core::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which navigation layer an agent travels on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MovementClass {
    #[default]
    Ground,
    Tracked,
    Air,
}

/// Optional pathfinding service consulted when an agent re-routes.
pub trait Pathfinder {
    /// Point sequence from `from` to `to`, or `None` when no route exists.
    fn find_path(&self, class: MovementClass, from: Vec3, to: Vec3) -> Option<Vec<Vec3>>;

    /// Project a point onto the nearest location the given class can stand on.
    ///
    /// Backends that don't support projection may return `None`.
    fn nearest_point(&self, _class: MovementClass, _point: Vec3) -> Option<Vec3> {
        None
    }
}
