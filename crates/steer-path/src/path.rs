use steer_core::{Vec3, EPSILON};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A curve sampled by arc length.
///
/// `t` is a distance along the path; implementations clamp it to `[0, length()]` so callers may
/// look ahead past the end.
pub trait Path {
    fn length(&self) -> f32;
    fn position(&self, t: f32) -> Vec3;
    fn normal(&self, t: f32) -> Vec3;
    /// The first control point strictly ahead of `t` (the end point once `t` reaches it).
    fn next_control_point(&self, t: f32) -> Vec3;

    fn start(&self) -> Vec3 {
        self.position(0.0)
    }

    fn end(&self) -> Vec3 {
        self.position(self.length())
    }
}

/// Piecewise-linear path through a point sequence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolylinePath {
    points: Vec<Vec3>,
    normals: Vec<Vec3>,
    /// `distances[i]` is the arc length from `points[0]` to `points[i]`.
    distances: Vec<f32>,
}

impl PolylinePath {
    /// Build a path with up-facing normals. An empty input yields an empty, zero-length path.
    pub fn new(points: Vec<Vec3>) -> Self {
        let normals = vec![Vec3::UP; points.len()];
        Self::with_normals(points, normals)
    }

    /// Build a path with per-point normals. Missing or degenerate normals default to up.
    pub fn with_normals(points: Vec<Vec3>, normals: Vec<Vec3>) -> Self {
        let normals = (0..points.len())
            .map(|i| {
                let n = normals.get(i).copied().unwrap_or(Vec3::UP).normalize_or_zero();
                if n == Vec3::ZERO {
                    Vec3::UP
                } else {
                    n
                }
            })
            .collect();

        let mut distances = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                total += p.distance(points[i - 1]);
            }
            distances.push(total);
        }

        Self {
            points,
            normals,
            distances,
        }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Segment index `i` such that `t` lies within `[distances[i], distances[i + 1]]`, plus the
    /// interpolation factor inside that segment.
    fn locate(&self, t: f32) -> Option<(usize, f32)> {
        if self.points.len() < 2 {
            return None;
        }
        let t = self.clamp_t(t);
        let upper = self.distances.partition_point(|&d| d < t);
        let i = upper.saturating_sub(1).min(self.points.len() - 2);
        let d0 = self.distances[i];
        let span = self.distances[i + 1] - d0;
        let f = if span <= EPSILON {
            0.0
        } else {
            ((t - d0) / span).clamp(0.0, 1.0)
        };
        Some((i, f))
    }

    fn clamp_t(&self, t: f32) -> f32 {
        if t.is_finite() {
            t.clamp(0.0, self.length())
        } else if t > 0.0 {
            self.length()
        } else {
            0.0
        }
    }
}

impl Path for PolylinePath {
    fn length(&self) -> f32 {
        self.distances.last().copied().unwrap_or(0.0)
    }

    fn position(&self, t: f32) -> Vec3 {
        match self.locate(t) {
            Some((i, f)) => self.points[i].lerp(self.points[i + 1], f),
            None => self.points.first().copied().unwrap_or(Vec3::ZERO),
        }
    }

    fn normal(&self, t: f32) -> Vec3 {
        match self.locate(t) {
            Some((i, f)) => {
                let n = self.normals[i].lerp(self.normals[i + 1], f).normalize_or_zero();
                if n == Vec3::ZERO {
                    self.normals[i]
                } else {
                    n
                }
            }
            None => self.normals.first().copied().unwrap_or(Vec3::UP),
        }
    }

    fn next_control_point(&self, t: f32) -> Vec3 {
        let t = self.clamp_t(t);
        let idx = self.distances.partition_point(|&d| d <= t);
        self.points
            .get(idx)
            .or_else(|| self.points.last())
            .copied()
            .unwrap_or(Vec3::ZERO)
    }
}
