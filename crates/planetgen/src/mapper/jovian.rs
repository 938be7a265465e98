//! Gas giants: latitude bands of cloud, drifting in colour from one band to
//! the next.

use super::{MapCapabilities, SurfaceMapper};
use crate::body::{Body, BodyType, JovianFeature};
use crate::config::PlanetGenConfig;
use crate::dice::RandomSource;
use crate::error::Result;
use crate::grid::GeodesicGrid;
use crate::tile::Tile;
use log::debug;

mod jovic {
    use crate::tile::Tile;

    pub const CREAM: Tile = Tile::new("Cream", 0xDDDDAA, false, 6);
    pub const YELLOW: Tile = Tile::new("Yellow", 0xCCCC99, false, 6);
    pub const LIGHT_BROWN: Tile = Tile::new("Light Brown", 0xD3AD6E, false, 4);
    pub const DARK_BROWN: Tile = Tile::new("Dark Brown", 0xC69E60, false, 4);
}

mod saturnian {
    use crate::tile::Tile;

    pub const PALE_CREAM: Tile = Tile::new("Pale Cream", 0xEEEECC, false, 2);
    pub const LIGHT_CREAM: Tile = Tile::new("Cream", 0xDDDDAA, false, 5);
    pub const DARK_CREAM: Tile = Tile::new("Dark Brown", 0xCCCC99, false, 3);
    pub const LIGHT_BROWN: Tile = Tile::new("Light Brown", 0xD3AD6E, false, 3);
    pub const YELLOW: Tile = Tile::new("Yellow", 0xCCCC99, false, 4);
}

pub struct JovianMapper<'a> {
    body: &'a Body,
    grid: GeodesicGrid,
}

impl<'a> JovianMapper<'a> {
    pub fn new(body: &'a Body, config: &PlanetGenConfig) -> Result<Self> {
        Ok(Self {
            body,
            grid: GeodesicGrid::new(config.mapping.jovian_face_size)?,
        })
    }

    fn random_colour(&self, dice: &mut dyn RandomSource) -> Tile {
        if self.body.body_type() == BodyType::Jovic {
            return match dice.roll(6) {
                1 => jovic::CREAM,
                2..=3 => jovic::YELLOW,
                4..=5 => jovic::LIGHT_BROWN,
                _ => jovic::DARK_BROWN,
            };
        }

        // Saturnian and Sokarian worlds share the paler palette.
        if self.body.has_feature(JovianFeature::AmmoniaClouds) {
            match dice.roll_n(4, 2) {
                ..=2 => saturnian::YELLOW,
                3..=5 => saturnian::LIGHT_CREAM,
                6 => saturnian::DARK_CREAM,
                _ => saturnian::LIGHT_BROWN,
            }
        } else if self.body.has_feature(JovianFeature::WaterClouds) {
            match dice.roll(6) {
                1..=2 => saturnian::PALE_CREAM,
                3..=5 => saturnian::LIGHT_CREAM,
                _ => saturnian::DARK_CREAM,
            }
        } else {
            match dice.roll(3) {
                1 => saturnian::PALE_CREAM,
                2 => saturnian::LIGHT_CREAM,
                _ => saturnian::DARK_CREAM,
            }
        }
    }

    /// One colour per pair of rows. Each usually drifts from the one before,
    /// with a one in four chance of a fresh colour.
    fn band_keys(&self, dice: &mut dyn RandomSource) -> Vec<Tile> {
        let count = (self.grid.rows() / 2 + 1) as usize;
        let mut keys: Vec<Tile> = Vec::with_capacity(count);
        for _ in 0..count {
            let key = match keys.last() {
                Some(previous) if !dice.one_in(4) => previous.variant(dice.variance(8)),
                _ => self.random_colour(dice),
            };
            keys.push(key);
        }
        keys
    }
}

impl SurfaceMapper for JovianMapper<'_> {
    fn body(&self) -> &Body {
        self.body
    }

    fn grid(&self) -> &GeodesicGrid {
        &self.grid
    }

    fn capabilities(&self) -> MapCapabilities {
        MapCapabilities {
            main: true,
            ..Default::default()
        }
    }

    fn generate(&mut self, dice: &mut dyn RandomSource) -> Result<()> {
        let keys = self.band_keys(dice);

        // Even rows take a key colour; odd rows blend the keys either side.
        for y in 0..self.grid.rows() {
            let i = (y / 2) as usize;
            let band = if y % 2 == 0 {
                keys[i].clone()
            } else {
                keys[i].mix(&keys[i + 1])
            };
            for x in 0..self.grid.width_at(y) {
                self.grid.set_tile(x, y, band.clone());
            }
        }
        debug!("mapped {} with {} bands", self.body.name(), keys.len());
        Ok(())
    }
}
