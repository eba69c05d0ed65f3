use core::cmp::Reverse;
use std::collections::BinaryHeap;

use steer_core::Vec3;

use crate::{MovementClass, Pathfinder};

/// 4-connected steps in a fixed order (-Z, +X, +Z, -X) so searches are reproducible.
const STEPS: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Uniform occupancy grid on the XZ plane at a fixed ground height.
///
/// Ground and tracked agents route around blocked cells; air agents fly straight. Returned
/// routes keep the exact endpoints and only the cells where the route turns.
#[derive(Debug, Clone, PartialEq)]
pub struct NavGrid {
    width: usize,
    depth: usize,
    cell_size: f32,
    ground_y: f32,
    blocked: Vec<bool>,
}

impl NavGrid {
    pub fn new(width: u32, depth: u32, cell_size: f32) -> Self {
        assert!(width > 0 && depth > 0, "grid must be non-empty");
        assert!(cell_size > 0.0, "cell_size must be > 0");
        let (width, depth) = (width as usize, depth as usize);
        Self {
            width,
            depth,
            cell_size,
            ground_y: 0.0,
            blocked: vec![false; width * depth],
        }
    }

    /// Build from text rows, `#` marking blocked cells. Row `i` is `z = i`.
    ///
    /// Short rows are padded with free cells.
    pub fn from_rows(rows: &[&str], cell_size: f32) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0).max(1);
        let depth = rows.len().max(1);
        let mut grid = Self::new(width as u32, depth as u32, cell_size);
        for (z, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                grid.blocked[z * width + x] = c == '#';
            }
        }
        grid
    }

    pub fn with_ground_height(mut self, ground_y: f32) -> Self {
        self.ground_y = ground_y;
        self
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn ground_height(&self) -> f32 {
        self.ground_y
    }

    pub fn set_blocked(&mut self, x: i32, z: i32, blocked: bool) {
        if let Some(idx) = self.index(i64::from(x), i64::from(z)) {
            self.blocked[idx] = blocked;
        }
    }

    /// Out-of-bounds cells count as blocked.
    pub fn is_blocked(&self, x: i32, z: i32) -> bool {
        self.index(i64::from(x), i64::from(z))
            .map_or(true, |idx| self.blocked[idx])
    }

    fn index(&self, x: i64, z: i64) -> Option<usize> {
        let in_bounds = x >= 0 && z >= 0 && (x as usize) < self.width && (z as usize) < self.depth;
        in_bounds.then(|| z as usize * self.width + x as usize)
    }

    fn coords(&self, idx: usize) -> (i64, i64) {
        ((idx % self.width) as i64, (idx / self.width) as i64)
    }

    fn locate(&self, p: Vec3) -> Option<usize> {
        if !p.is_finite() {
            return None;
        }
        let x = (p.x / self.cell_size).floor() as i64;
        let z = (p.z / self.cell_size).floor() as i64;
        self.index(x, z)
    }

    fn center(&self, idx: usize) -> Vec3 {
        let (x, z) = self.coords(idx);
        Vec3::new(
            (x as f32 + 0.5) * self.cell_size,
            self.ground_y,
            (z as f32 + 0.5) * self.cell_size,
        )
    }

    fn manhattan(&self, a: usize, b: usize) -> u32 {
        let (ax, az) = self.coords(a);
        let (bx, bz) = self.coords(b);
        ((ax - bx).abs() + (az - bz).abs()) as u32
    }

    /// A* over cell indices. Heap entries order by (f, g, cell index) for stable tie-breaks.
    fn search(&self, start: usize, goal: usize) -> Option<Vec<usize>> {
        if self.blocked[start] || self.blocked[goal] {
            return None;
        }

        let mut cost = vec![u32::MAX; self.blocked.len()];
        let mut parent: Vec<Option<usize>> = vec![None; self.blocked.len()];
        let mut open = BinaryHeap::new();

        cost[start] = 0;
        open.push(Reverse((self.manhattan(start, goal), 0u32, start)));

        while let Some(Reverse((_, g, idx))) = open.pop() {
            if idx == goal {
                let mut cells = vec![goal];
                let mut cursor = goal;
                while let Some(prev) = parent[cursor] {
                    cells.push(prev);
                    cursor = prev;
                }
                cells.reverse();
                return Some(cells);
            }
            if g > cost[idx] {
                continue;
            }

            let (x, z) = self.coords(idx);
            for (dx, dz) in STEPS {
                let Some(next) = self.index(x + dx, z + dz) else {
                    continue;
                };
                let next_cost = g + 1;
                if self.blocked[next] || next_cost >= cost[next] {
                    continue;
                }
                cost[next] = next_cost;
                parent[next] = Some(idx);
                open.push(Reverse((
                    next_cost + self.manhattan(next, goal),
                    next_cost,
                    next,
                )));
            }
        }

        None
    }

    /// Interior cells where the route changes direction.
    fn turns(&self, cells: &[usize]) -> Vec<usize> {
        cells
            .windows(3)
            .filter(|w| {
                let (ax, az) = self.coords(w[0]);
                let (bx, bz) = self.coords(w[1]);
                let (cx, cz) = self.coords(w[2]);
                (bx - ax, bz - az) != (cx - bx, cz - bz)
            })
            .map(|w| w[1])
            .collect()
    }
}

impl Pathfinder for NavGrid {
    fn find_path(&self, class: MovementClass, from: Vec3, to: Vec3) -> Option<Vec<Vec3>> {
        if class == MovementClass::Air {
            return Some(vec![from, to]);
        }

        let cells = self.search(self.locate(from)?, self.locate(to)?)?;
        let mut points = Vec::with_capacity(cells.len().min(8) + 2);
        points.push(from);
        points.extend(self.turns(&cells).into_iter().map(|idx| self.center(idx)));
        points.push(to);
        Some(points)
    }

    /// Closest free cell center at ground height; the lowest index wins ties.
    fn nearest_point(&self, _class: MovementClass, point: Vec3) -> Option<Vec3> {
        let flat = point.horizontal();
        (0..self.blocked.len())
            .filter(|&idx| !self.blocked[idx])
            .map(|idx| self.center(idx))
            .fold(None, |best: Option<(f32, Vec3)>, center| {
                let d = center.horizontal().distance(flat);
                match best {
                    Some((bd, _)) if bd <= d => best,
                    _ => Some((d, center)),
                }
            })
            .map(|(_, p)| p)
    }
}
