//! # Neighbor Grid
//!
//! Uniform spatial hash for fixed-radius neighbor queries.
//!
//! Cells are cubes of side `radius`, so every point within `radius` of a
//! query lies in the query's cell or one of its 26 neighbors.

use std::collections::HashMap;

use glam::DVec3;

/// Integer cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Cell {
    x: i64,
    y: i64,
    z: i64,
}

impl Cell {
    /// Cell holding `pos`. Out-of-range coordinates saturate to the edge cell.
    fn containing(pos: DVec3, size: f64) -> Self {
        Self {
            x: (pos.x / size).floor() as i64,
            y: (pos.y / size).floor() as i64,
            z: (pos.z / size).floor() as i64,
        }
    }

    fn offset(self, dx: i64, dy: i64, dz: i64) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            z: self.z.checked_add(dz)?,
        })
    }
}

/// Fixed-radius neighbor index over a borrowed point slice.
#[derive(Debug)]
pub struct NeighborGrid<'a> {
    points: &'a [DVec3],
    radius: f64,
    cells: HashMap<Cell, Vec<usize>>,
}

impl<'a> NeighborGrid<'a> {
    /// Indexes `points` for queries of the given `radius` (must be > 0).
    pub fn new(points: &'a [DVec3], radius: f64) -> Self {
        let mut cells: HashMap<Cell, Vec<usize>> = HashMap::new();
        for (i, p) in points.iter().enumerate() {
            cells.entry(Cell::containing(*p, radius)).or_default().push(i);
        }
        Self {
            points,
            radius,
            cells,
        }
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Indices of all points within `radius` of point `index`, itself
    /// included, in ascending order.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let center = self.points[index];
        let home = Cell::containing(center, self.radius);

        let mut found = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(cell) = home.offset(dx, dy, dz) else {
                        continue;
                    };
                    if let Some(members) = self.cells.get(&cell) {
                        found.extend(
                            members
                                .iter()
                                .copied()
                                .filter(|&j| center.distance(self.points[j]) <= self.radius),
                        );
                    }
                }
            }
        }
        found.sort_unstable();
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(points: &[DVec3], index: usize, radius: f64) -> Vec<usize> {
        (0..points.len())
            .filter(|&j| points[index].distance(points[j]) <= radius)
            .collect()
    }

    #[test]
    fn test_neighbors_include_self() {
        let points = [DVec3::ZERO];
        let grid = NeighborGrid::new(&points, 1.0);
        assert_eq!(grid.neighbors(0), vec![0]);
    }

    #[test]
    fn test_boundary_distance_is_inclusive() {
        let points = [DVec3::ZERO, DVec3::X, DVec3::new(1.5, 0.0, 0.0)];
        let grid = NeighborGrid::new(&points, 1.0);
        assert_eq!(grid.neighbors(0), vec![0, 1]);
        assert_eq!(grid.neighbors(1), vec![0, 1, 2]);
    }

    #[test]
    fn test_neighbors_across_negative_cells() {
        let points = [DVec3::new(-0.1, -0.1, -0.1), DVec3::new(0.1, 0.1, 0.1)];
        let grid = NeighborGrid::new(&points, 0.5);
        assert_eq!(grid.cell_count(), 2);
        assert_eq!(grid.neighbors(0), vec![0, 1]);
    }

    #[test]
    fn test_matches_brute_force() {
        let points: Vec<DVec3> = (0..200)
            .map(|i| {
                let t = i as f64;
                DVec3::new((t * 0.37).sin() * 5.0, (t * 0.71).cos() * 5.0, (t * 0.13).sin() * 5.0)
            })
            .collect();
        for radius in [0.3, 1.0, 2.5] {
            let grid = NeighborGrid::new(&points, radius);
            for i in 0..points.len() {
                assert_eq!(grid.neighbors(i), brute_force(&points, i, radius));
            }
        }
    }

    #[test]
    fn test_huge_coordinates_saturate() {
        let points = [DVec3::splat(1e300), DVec3::splat(1e300), DVec3::splat(-1e300)];
        let grid = NeighborGrid::new(&points, 1e-6);
        assert_eq!(grid.neighbors(0), vec![0, 1]);
        assert_eq!(grid.neighbors(2), vec![2]);
    }
}
