use steer_core::Vec3;
use steer_path::{MovementClass, Pathfinder};

/// Points from `from` to `to`.
///
/// With `refine` and a pathfinder the route comes from the pathfinder; otherwise (or when the
/// pathfinder finds nothing) it is the straight segment.
pub fn plan_route(
    class: MovementClass,
    from: Vec3,
    to: Vec3,
    pathfinder: Option<&dyn Pathfinder>,
    refine: bool,
) -> Vec<Vec3> {
    if refine {
        if let Some(pathfinder) = pathfinder {
            match pathfinder.find_path(class, from, to) {
                Some(points) if !points.is_empty() => return points,
                _ => {
                    tracing::warn!(?class, ?from, ?to, "no route found; using straight path");
                }
            }
        }
    }
    vec![from, to]
}
