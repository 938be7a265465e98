//! Geodesic surface grid built from an unwrapped icosahedron.
//!
//! The map is five faces around, each `face_size` rows tall, stacked three
//! high: northern triangles, the equatorial band and southern triangles.
//! Every tile is a triangle pointing up (-1) or down (+1), and each row has
//! its own width, so callers iterate with [`GeodesicGrid::width_at`].

mod paint;
mod render;

pub use render::stretch;

use crate::constants::{DEFAULT_HEIGHT, GRID_FACES, MAX_HEIGHT, MIN_HEIGHT};
use crate::error::{PlanetGenError, Result};
use crate::tile::Tile;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

pub const DEFAULT_TILE: Tile = Tile::new("Grey", 0x777777, false, 3);

#[derive(Debug, Clone)]
pub struct GeodesicGrid {
    face_size: usize,
    /// Column position of each tile on the unwrapped map, starting at 1.
    columns: Vec<Vec<i64>>,
    facing: Vec<Vec<i8>>,
    tiles: Vec<Vec<Tile>>,
    heights: Vec<Vec<i32>>,
}

impl GeodesicGrid {
    pub fn new(face_size: usize) -> Result<Self> {
        if face_size == 0 {
            return Err(PlanetGenError::invalid("grid face size must be at least 1"));
        }
        let n = face_size as i64;
        let faces = GRID_FACES as i64;
        let rows = 3 * face_size;

        let mut columns = Vec::with_capacity(rows);
        let mut facing = Vec::with_capacity(rows);
        for row in 0..rows as i64 {
            let per_face = if row < n {
                2 * row + 1
            } else if row < 2 * n {
                2 * n
            } else {
                2 * (3 * n - row) - 1
            };
            let (first_facing, offset) = if row < 2 * n {
                (-1, -row)
            } else {
                (1, row - 3 * n - n + 1)
            };

            let mut row_columns = Vec::with_capacity((per_face * faces) as usize);
            let mut row_facing = Vec::with_capacity((per_face * faces) as usize);
            for face in 0..faces {
                let start = (face + 1) * 2 * n + offset;
                let mut dir = first_facing;
                for i in 0..per_face {
                    row_columns.push(start + i);
                    row_facing.push(dir);
                    dir = -dir;
                }
            }
            columns.push(row_columns);
            facing.push(row_facing);
        }

        let tiles = columns.iter().map(|r| vec![DEFAULT_TILE; r.len()]).collect();
        let heights = columns.iter().map(|r| vec![DEFAULT_HEIGHT; r.len()]).collect();

        Ok(Self {
            face_size,
            columns,
            facing,
            tiles,
            heights,
        })
    }

    pub fn face_size(&self) -> usize {
        self.face_size
    }

    pub fn rows(&self) -> i64 {
        self.columns.len() as i64
    }

    fn row_index(&self, y: i64) -> usize {
        y.clamp(0, self.rows() - 1) as usize
    }

    /// Number of tiles in row `y`; out-of-range rows are clamped.
    pub fn width_at(&self, y: i64) -> i64 {
        self.columns[self.row_index(y)].len() as i64
    }

    /// Rightmost column position used by any tile.
    pub fn max_column(&self) -> i64 {
        self.columns
            .iter()
            .filter_map(|r| r.last().copied())
            .max()
            .unwrap_or(0)
    }

    pub fn tile_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Storage slot for `(x, y)`: y is clamped and x wraps around the row.
    fn slot(&self, x: i64, y: i64) -> (usize, usize) {
        let row = self.row_index(y);
        let width = self.columns[row].len() as i64;
        (x.rem_euclid(width) as usize, row)
    }

    pub fn tile(&self, x: i64, y: i64) -> &Tile {
        let (col, row) = self.slot(x, y);
        &self.tiles[row][col]
    }

    pub fn set_tile(&mut self, x: i64, y: i64, tile: Tile) {
        let (col, row) = self.slot(x, y);
        self.tiles[row][col] = tile;
    }

    pub fn height(&self, x: i64, y: i64) -> i32 {
        let (col, row) = self.slot(x, y);
        self.heights[row][col]
    }

    pub fn set_height(&mut self, x: i64, y: i64, height: i32) {
        let (col, row) = self.slot(x, y);
        self.heights[row][col] = height.clamp(MIN_HEIGHT, MAX_HEIGHT);
    }

    /// -1 when the tile's apex points north, +1 when it points south.
    pub fn facing(&self, x: i64, y: i64) -> i64 {
        let (col, row) = self.slot(x, y);
        self.facing[row][col] as i64
    }

    pub fn column(&self, x: i64, y: i64) -> i64 {
        let (col, row) = self.slot(x, y);
        self.columns[row][col]
    }

    pub fn west(&self, x: i64, y: i64) -> i64 {
        (x - 1).rem_euclid(self.width_at(y))
    }

    pub fn east(&self, x: i64, y: i64) -> i64 {
        (x + 1).rem_euclid(self.width_at(y))
    }

    fn normalise(&self, x: i64, y: i64) -> (i64, i64) {
        let y = y.clamp(0, self.rows() - 1);
        (x.rem_euclid(self.width_at(y)), y)
    }

    /// Tile sharing this tile's flat edge.
    pub fn up_down(&self, x: i64, y: i64) -> (i64, i64) {
        let dir = self.facing(x, y);
        self.across(x, y, y - dir)
    }

    /// Tile meeting this tile apex to apex. Where the apex touches the gap
    /// between two polar faces, the nearest tile of that row is used.
    pub fn opposite(&self, x: i64, y: i64) -> (i64, i64) {
        let dir = self.facing(x, y);
        self.across(x, y, y + dir)
    }

    /// Tile in row `target` that sits in the same map column as `(x, y)`.
    fn across(&self, x: i64, y: i64, target: i64) -> (i64, i64) {
        if target < 0 || target >= self.rows() {
            return self.normalise(x, y);
        }
        let column = self.column(x, y);
        let period = 2 * GRID_FACES as i64 * self.face_size as i64;
        let row = &self.columns[target as usize];

        for c in [column, column + period, column - period] {
            if let Ok(i) = row.binary_search(&c) {
                return (i as i64, target);
            }
        }
        let distance = |c: i64| {
            let d = (c - column).rem_euclid(period);
            d.min(period - d)
        };
        let nearest = row
            .iter()
            .enumerate()
            .min_by_key(|&(_, &c)| distance(c))
            .map_or(0, |(i, _)| i as i64);
        (nearest, target)
    }

    /// Distance from the equator in degrees, 0..=90, for row `y`.
    pub fn latitude(&self, y: i64) -> i32 {
        let rows = self.rows();
        let y = self.row_index(y) as i64;
        let fraction = if 2 * y < rows { y } else { rows - y };
        (90 * (rows - 2 * fraction) / rows) as i32
    }

    /// Unit vector through the centre of the tile, for sampling 3D noise.
    pub fn direction(&self, x: i64, y: i64) -> Vec3 {
        let (col, row) = self.slot(x, y);
        let lat = PI / 2.0 - PI * (row as f32 + 0.5) / self.rows() as f32;
        let lon = TAU * (col as f32 + 0.5) / self.columns[row].len() as f32;
        Vec3::new(lat.cos() * lon.cos(), lat.sin(), lat.cos() * lon.sin())
    }
}
