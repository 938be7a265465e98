use super::GeodesicGrid;
use crate::constants::{MAX_HEIGHT, MIN_HEIGHT};
use crate::dice::RandomSource;
use crate::error::{PlanetGenError, Result};
use crate::tile::Tile;
use log::debug;

/// Upper bound on spreading passes, for floods that are walled in by height.
const MAX_FLOOD_PASSES: usize = 10_000;

impl GeodesicGrid {
    /// Every `(x, y)` on the grid, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        (0..self.rows()).flat_map(move |y| (0..self.width_at(y)).map(move |x| (x, y)))
    }

    fn mask(&self, tile: &Tile) -> Vec<Vec<bool>> {
        self.tiles
            .iter()
            .map(|row| row.iter().map(|t| t == tile).collect())
            .collect()
    }

    pub fn count_tiles(&self, tile: &Tile) -> usize {
        self.tiles.iter().flatten().filter(|t| *t == tile).count()
    }

    /// Random height for every tile, the seed layer of a fractal height map.
    pub fn fractal(&mut self, dice: &mut dyn RandomSource) {
        for y in 0..self.rows() {
            for x in 0..self.width_at(y) {
                self.set_height(x, y, dice.roll(100) as i32);
            }
        }
    }

    fn parent_height(&self, parent: &GeodesicGrid, x: i64, y: i64) -> i32 {
        let divisor = (self.rows() / parent.rows()).max(1);
        let py = y / divisor;
        let scale = self.width_at(y) as f64 / parent.width_at(py) as f64;
        let px = (x as f64 / scale) as i64;
        parent.height(px, py)
    }

    /// Heights from a coarser grid: each tile averages the parent heights
    /// under itself and its three neighbours, then adds ± `variation`.
    pub fn fractal_from(
        &mut self,
        parent: &GeodesicGrid,
        variation: i64,
        dice: &mut dyn RandomSource,
    ) -> Result<()> {
        if parent.rows() >= self.rows() {
            return Err(PlanetGenError::invalid(format!(
                "parent grid ({} rows) must be smaller than this grid ({} rows)",
                parent.rows(),
                self.rows()
            )));
        }
        for y in 0..self.rows() {
            for x in 0..self.width_at(y) {
                let (ux, uy) = self.up_down(x, y);
                let sum = self.parent_height(parent, x, y)
                    + self.parent_height(parent, ux, uy)
                    + self.parent_height(parent, x - 1, y)
                    + self.parent_height(parent, x + 1, y);
                let h = sum / 4 + dice.variance(variation) as i32;
                self.set_height(x, y, h);
            }
        }
        Ok(())
    }

    pub fn copy_heights(&mut self, source: &GeodesicGrid) -> Result<()> {
        if source.face_size != self.face_size {
            return Err(PlanetGenError::invalid(format!(
                "cannot copy heights from face size {} to {}",
                source.face_size, self.face_size
            )));
        }
        self.heights.clone_from(&source.heights);
        Ok(())
    }

    /// Height below which `percent` of the surface lies.
    pub fn sea_level(&self, percent: i32) -> i32 {
        let mut buckets = vec![0usize; (MAX_HEIGHT - MIN_HEIGHT + 1) as usize];
        for h in self.heights.iter().flatten() {
            buckets[(h - MIN_HEIGHT) as usize] += 1;
        }
        let mut to_cover = (self.tile_count() as i64 * percent as i64) / 100;
        let mut height = MIN_HEIGHT;
        while to_cover > 0 && height < MAX_HEIGHT {
            to_cover -= buckets[(height - MIN_HEIGHT) as usize] as i64;
            height += 1;
        }
        height
    }

    /// Thicken the edge of every `tile` region by `thickness` layers. Per
    /// layer, a tile converts when at least `neighbours` of its west, east and
    /// up/down neighbours were `tile` at the start of the layer.
    pub fn grow_border(&mut self, tile: &Tile, neighbours: usize, thickness: usize) -> Result<()> {
        if !(1..=3).contains(&neighbours) {
            return Err(PlanetGenError::invalid(format!(
                "neighbour count must be 1 to 3, got {neighbours}"
            )));
        }
        for _ in 0..thickness {
            let before = self.mask(tile);
            for y in 0..self.rows() {
                for x in 0..self.width_at(y) {
                    if before[y as usize][x as usize] {
                        continue;
                    }
                    let (ux, uy) = self.up_down(x, y);
                    let touching = [(self.west(x, y), y), (self.east(x, y), y), (ux, uy)]
                        .into_iter()
                        .filter(|&(nx, ny)| before[ny as usize][nx as usize])
                        .count();
                    if touching >= neighbours {
                        self.set_tile(x, y, tile.clone());
                    }
                }
            }
        }
        Ok(())
    }

    fn random_neighbour(&self, x: i64, y: i64, dice: &mut dyn RandomSource) -> (i64, i64) {
        match dice.roll(3) {
            1 => (self.west(x, y), y),
            2 => (self.east(x, y), y),
            _ => self.up_down(x, y),
        }
    }

    /// Spread `tile` into one random neighbour of each of its tiles, once
    /// per iteration.
    pub fn flood(&mut self, tile: &Tile, iterations: usize, dice: &mut dyn RandomSource) {
        for _ in 0..iterations {
            let before = self.mask(tile);
            for y in 0..self.rows() {
                for x in 0..self.width_at(y) {
                    if before[y as usize][x as usize] {
                        let (nx, ny) = self.random_neighbour(x, y, dice);
                        self.set_tile(nx, ny, tile.clone());
                    }
                }
            }
        }
    }

    /// Keep flooding until `tile` covers more than `percent` of the surface.
    /// With `use_heights`, a tile only takes the flood on a d100 at or below
    /// its height, so low ground resists.
    pub fn flood_to_percentage(
        &mut self,
        tile: &Tile,
        percent: i32,
        use_heights: bool,
        dice: &mut dyn RandomSource,
    ) {
        let total = self.tile_count();
        let required = (total * percent.max(0) as usize / 100).min(total.saturating_sub(1));
        let mut flooded = self.count_tiles(tile);
        if flooded == 0 {
            debug!("No {} tiles to flood from", tile.name());
            return;
        }

        let mut passes = 0;
        while flooded <= required {
            if passes == MAX_FLOOD_PASSES {
                debug!(
                    "Stopped flooding {} at {flooded} of {required} tiles",
                    tile.name()
                );
                return;
            }
            passes += 1;
            let before = self.mask(tile);
            'rows: for y in 0..self.rows() {
                for x in 0..self.width_at(y) {
                    if flooded > required {
                        break 'rows;
                    }
                    if !before[y as usize][x as usize] {
                        continue;
                    }
                    let (nx, ny) = self.random_neighbour(x, y, dice);
                    if use_heights && dice.roll(100) > self.height(nx, ny) as i64 {
                        continue;
                    }
                    if self.tile(nx, ny) != tile {
                        self.set_tile(nx, ny, tile.clone());
                        flooded += 1;
                    }
                }
            }
            flooded = self.count_tiles(tile);
        }
    }
}
