//! Tile grid math and the enemy-proximity index.

use std::collections::HashMap;
use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Side length of one map tile. User-driven placement and removal snap to
/// multiples of this; procedurally generated coordinates stay continuous.
pub const TILE_SIZE: f32 = 16.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Floor a continuous coordinate to the nearest tile boundary.
pub fn snap(value: f32) -> f32 {
    (value / TILE_SIZE).floor() * TILE_SIZE
}

pub fn snap_point(point: Vec2) -> Vec2 {
    Vec2::new(snap(point.x), snap(point.y))
}

/// Playable extent of the map. Positions are clamped into
/// [0, width] x [0, height].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub width: f32,
    pub height: f32,
}

impl MapBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(0.0, self.width),
            point.y.clamp(0.0, self.height),
        )
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

/// Bucket-grid index over point entities. Callers insert (position, id)
/// pairs, then query a circle and re-check true distance on the candidates;
/// the index only narrows the scan.
pub struct SpatialIndex<T> {
    cell_size: f32,
    buckets: HashMap<(i32, i32), Vec<T>>,
}

impl<T: Copy> SpatialIndex<T> {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            buckets: HashMap::new(),
        }
    }

    fn cell_of(&self, point: Vec2) -> (i32, i32) {
        (
            (point.x / self.cell_size).floor() as i32,
            (point.y / self.cell_size).floor() as i32,
        )
    }

    pub fn insert(&mut self, point: Vec2, value: T) {
        let cell = self.cell_of(point);
        self.buckets.entry(cell).or_default().push(value);
    }

    /// Candidates whose bucket overlaps the circle around `center`. May
    /// include entries farther than `radius`; never omits one within it.
    pub fn query_circle(&self, center: Vec2, radius: f32) -> Vec<T> {
        let reach = (radius / self.cell_size).ceil() as i32;
        let (cx, cy) = self.cell_of(center);
        let mut found = Vec::new();
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                if let Some(bucket) = self.buckets.get(&(cx + dx, cy + dy)) {
                    found.extend_from_slice(bucket);
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_floors_to_tile_boundary() {
        assert_eq!(snap(0.0), 0.0);
        assert_eq!(snap(15.9), 0.0);
        assert_eq!(snap(16.0), 16.0);
        assert_eq!(snap(37.4), 32.0);
    }

    #[test]
    fn bounds_clamp_keeps_points_inside() {
        let bounds = MapBounds::new(800.0, 800.0);
        let clamped = bounds.clamp(Vec2::new(-3.0, 812.5));
        assert_eq!(clamped, Vec2::new(0.0, 800.0));
        assert!(bounds.contains(clamped));
    }

    #[test]
    fn query_circle_finds_near_neighbors() {
        let mut index = SpatialIndex::new(20.0);
        index.insert(Vec2::new(100.0, 100.0), 1_u64);
        index.insert(Vec2::new(112.0, 100.0), 2_u64);
        index.insert(Vec2::new(500.0, 500.0), 3_u64);

        let found = index.query_circle(Vec2::new(100.0, 100.0), 20.0);
        assert!(found.contains(&1));
        assert!(found.contains(&2));
        assert!(!found.contains(&3));
    }

    #[test]
    fn query_circle_never_omits_entries_within_radius() {
        // Entries sitting just across a bucket boundary must still be
        // returned as candidates.
        let mut index = SpatialIndex::new(20.0);
        index.insert(Vec2::new(19.9, 0.0), 7_u64);
        let found = index.query_circle(Vec2::new(20.1, 0.0), 20.0);
        assert!(found.contains(&7));
    }
}
