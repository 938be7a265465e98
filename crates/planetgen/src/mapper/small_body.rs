//! Asteroids and other small irregular bodies. The height map deforms the
//! body's shape, so it is smoothed more on larger, rounder bodies.

use super::{MapCapabilities, SurfaceMapper, generate_height_map, smooth_heights};
use crate::body::{Body, BodyType};
use crate::config::PlanetGenConfig;
use crate::dice::RandomSource;
use crate::error::{PlanetGenError, Result};
use crate::grid::GeodesicGrid;
use crate::tile::Tile;

const CARBON: Tile = Tile::new("Carbon", 0x606060, false, 3);
const SILICATES: Tile = Tile::new("Silicates", 0xA09070, false, 3);

pub struct SmallBodyMapper<'a> {
    body: &'a Body,
    grid: GeodesicGrid,
    base_face_size: usize,
    variation: i64,
}

impl<'a> SmallBodyMapper<'a> {
    pub fn new(body: &'a Body, config: &PlanetGenConfig) -> Result<Self> {
        if matches!(body.body_type(), BodyType::Metallic | BodyType::Vulcanian) {
            return Err(PlanetGenError::unsupported(format!(
                "no surface mapper for {}",
                body.body_type()
            )));
        }
        Ok(Self {
            body,
            grid: GeodesicGrid::new(config.mapping.small_body_face_size)?,
            base_face_size: config.mapping.base_face_size,
            variation: config.mapping.small_body_variation,
        })
    }

    /// Colour every tile by height, then smooth. Above `round_radius` km the
    /// divisor grows with the radius.
    fn shade(&mut self, tile: &Tile, base: i32, rough: bool, round_radius: i64, per_km: i64) {
        for (x, y) in self.grid.cells().collect::<Vec<_>>() {
            let shaded = tile.shaded(base + self.grid.height(x, y) / 2);
            let shaded = if rough { shaded.rough() } else { shaded };
            self.grid.set_tile(x, y, shaded);
        }

        let radius = self.body.radius();
        let divisor = if radius > round_radius {
            1 + radius / per_km
        } else {
            3
        };
        smooth_heights(&mut self.grid, divisor as i32);
    }
}

impl SurfaceMapper for SmallBodyMapper<'_> {
    fn body(&self) -> &Body {
        self.body
    }

    fn grid(&self) -> &GeodesicGrid {
        &self.grid
    }

    fn capabilities(&self) -> MapCapabilities {
        MapCapabilities {
            main: true,
            deform: true,
            ..Default::default()
        }
    }

    fn generate(&mut self, dice: &mut dyn RandomSource) -> Result<()> {
        generate_height_map(&mut self.grid, self.base_face_size, self.variation, dice)?;
        match self.body.body_type() {
            BodyType::Carbonaceous => self.shade(&CARBON, 25, false, 300, 100),
            BodyType::Silicaceous => self.shade(&SILICATES, 50, true, 240, 80),
            _ => {}
        }
        Ok(())
    }
}
