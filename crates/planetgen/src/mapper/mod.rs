//! Surface mappers turn a generated [`Body`] into tiles on a [`GeodesicGrid`].
//!
//! `generate` fills the grid and the `draw*` methods project it. Which draw
//! paths a mapper offers depends on the body class and is reported by
//! [`SurfaceMapper::capabilities`]; asking for any other one is an
//! [`PlanetGenError::Unsupported`] error.

mod belt;
mod dwarf;
mod jovian;
mod small_body;
mod terrestrial;

pub use belt::OrbitMapper;
pub use dwarf::{
    AreanMapper, FerrinianMapper, HermianMapper, JanianMapper, MesoAreanMapper, SelenianMapper,
};
pub use jovian::JovianMapper;
pub use small_body::SmallBodyMapper;
pub use terrestrial::{CythereanMapper, EoGaianMapper};

use crate::body::{Body, BodyType};
use crate::canvas::Canvas;
use crate::config::{CloudConfig, NoiseConfig, PlanetGenConfig};
use crate::constants::CRATER_HEIGHT;
use crate::dice::RandomSource;
use crate::error::{PlanetGenError, Result};
use crate::grid::{GeodesicGrid, stretch};
use crate::tile::Tile;
use image::RgbaImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapCapabilities {
    /// Coloured surface map.
    pub main: bool,
    /// Relief map for a round body.
    pub height: bool,
    /// Height map used to deform an irregular body's shape.
    pub deform: bool,
    pub clouds: bool,
    /// Rings drawn onto a system map rather than a surface of its own.
    pub orbit: bool,
}

pub trait SurfaceMapper {
    fn body(&self) -> &Body;

    fn grid(&self) -> &GeodesicGrid;

    fn capabilities(&self) -> MapCapabilities;

    /// Populate tiles and heights. Produces no pixels.
    fn generate(&mut self, dice: &mut dyn RandomSource) -> Result<()>;

    fn draw(&self, width: u32, dice: &mut dyn RandomSource) -> Result<RgbaImage> {
        require(self.body(), self.capabilities().main, "surface map")?;
        self.grid().draw(width, dice)
    }

    fn draw_height_map(&self, width: u32, dice: &mut dyn RandomSource) -> Result<RgbaImage> {
        let caps = self.capabilities();
        require(self.body(), caps.height || caps.deform, "height map")?;
        self.grid().draw_heights(width, dice)
    }

    /// One stretched, partly transparent image per cloud layer, lowest first.
    fn draw_clouds(&self, _width: u32, _dice: &mut dyn RandomSource) -> Result<Vec<RgbaImage>> {
        require(self.body(), false, "cloud map")?;
        Ok(Vec::new())
    }

    /// Draw the body onto a system map centred on its star at `(cx, cy)`.
    fn draw_orbit(
        &self,
        _canvas: &mut dyn Canvas,
        _cx: i64,
        _cy: i64,
        _km_per_pixel: i64,
        _dice: &mut dyn RandomSource,
    ) -> Result<()> {
        require(self.body(), false, "orbit map")
    }
}

fn require(body: &Body, enabled: bool, what: &str) -> Result<()> {
    if enabled {
        Ok(())
    } else {
        Err(PlanetGenError::unsupported(format!(
            "{} ({}) has no {what}",
            body.name(),
            body.body_type()
        )))
    }
}

/// Pick the mapper for a body's type.
pub fn mapper_for<'a>(
    body: &'a Body,
    config: &PlanetGenConfig,
) -> Result<Box<dyn SurfaceMapper + 'a>> {
    use BodyType::*;
    Ok(match body.body_type() {
        EoGaian => Box::new(EoGaianMapper::new(body, config)?),
        Cytherean => Box::new(CythereanMapper::new(body, config)?),
        Jovic | Saturnian | Sokarian => Box::new(JovianMapper::new(body, config)?),
        Carbonaceous | Silicaceous | Aggregate | Gelidaceous => {
            Box::new(SmallBodyMapper::new(body, config)?)
        }
        EuArean => Box::new(AreanMapper::new(body, config)?),
        MesoArean => Box::new(MesoAreanMapper::new(body, config)?),
        Ferrinian => Box::new(FerrinianMapper::new(body, config)?),
        Hermian => Box::new(HermianMapper::new(body, config)?),
        Janian => Box::new(JanianMapper::new(body, config)?),
        Selenian => Box::new(SelenianMapper::new(body, config)?),
        AsteroidBelt | VulcanianBelt | IceBelt | DustDisc | PlanetesimalDisc => {
            Box::new(OrbitMapper::new(body)?)
        }
        Metallic | Vulcanian => {
            return Err(PlanetGenError::unsupported(format!(
                "no surface mapper for {}",
                body.body_type()
            )));
        }
    })
}

/// Fractal height map: random heights on a `base_face_size` grid, doubled
/// up to the grid's size with the variation halving at every step.
pub fn generate_height_map(
    grid: &mut GeodesicGrid,
    base_face_size: usize,
    variation: i64,
    dice: &mut dyn RandomSource,
) -> Result<()> {
    let mut parent = GeodesicGrid::new(base_face_size.min(grid.face_size()))?;
    parent.fractal(dice);
    generate_height_map_from(grid, parent, variation, dice)
}

/// As [`generate_height_map`], starting from an already populated parent.
pub fn generate_height_map_from(
    grid: &mut GeodesicGrid,
    mut parent: GeodesicGrid,
    mut variation: i64,
    dice: &mut dyn RandomSource,
) -> Result<()> {
    let target = grid.face_size();
    while parent.face_size() < target {
        let mut next = GeodesicGrid::new((parent.face_size() * 2).min(target))?;
        next.fractal_from(&parent, variation, dice)?;
        variation /= 2;
        parent = next;
    }
    grid.copy_heights(&parent)
}

fn set_crater_tile(grid: &mut GeodesicGrid, x: i64, y: i64) {
    let tile = grid.tile(x, y);
    if tile.is_water() || grid.height(x, y) == CRATER_HEIGHT {
        return;
    }
    let floor = tile.shaded(85);
    grid.set_height(x, y, CRATER_HEIGHT);
    grid.set_tile(x, y, floor);
}

fn crater_line(grid: &mut GeodesicGrid, x: i64, y: i64, half_width: i64) {
    for xx in x - half_width..=x + half_width {
        set_crater_tile(grid, xx, y);
    }
}

/// Stamp `number` craters across the middle latitudes. `size` biases the
/// d6 toward larger ones; water is never cratered.
pub fn create_craters(grid: &mut GeodesicGrid, size: i64, number: usize, dice: &mut dyn RandomSource) {
    let rows = grid.rows();
    for _ in 0..number {
        let y = rows / 5 + dice.roll_zero(rows * 3 / 5);
        let x = 2 + dice.roll_zero(grid.width_at(y) - 4);

        match dice.roll(6) + size {
            ..=1 => set_crater_tile(grid, x, y),
            2..=5 => {
                crater_line(grid, x, y, 1);
                let (ox, oy) = grid.opposite(x, y);
                crater_line(grid, ox, oy, 1);
            }
            _ => {
                crater_line(grid, x, y, 3);
                let (ox, oy) = grid.opposite(x, y);
                crater_line(grid, ox, oy, 3);
                let (ux, uy) = grid.up_down(ox, oy);
                crater_line(grid, ux, uy, 2);
                let (ux, uy) = grid.up_down(x, y);
                crater_line(grid, ux, uy, 2);
            }
        }
    }
}

/// Lay a wandering line of `tile` eastwards from a random mid-latitude tile.
pub fn add_rift(grid: &mut GeodesicGrid, tile: &Tile, length: i64, dice: &mut dyn RandomSource) {
    let rows = grid.rows();
    let mut y = rows / 4 + dice.roll(rows / 2);
    let mut x = dice.roll_zero(grid.width_at(y));

    for _ in 0..length {
        if dice.roll(3) == 1 {
            x = grid.west(x, y);
            (x, y) = grid.up_down(x, y);
        }
        grid.set_tile(x, y, tile.clone());
        grid.set_height(x, y, CRATER_HEIGHT);
        x = grid.east(x, y);
    }
}

/// Sum each tile with its west and east neighbours and divide by `divisor`.
/// A divisor above 3 flattens the body.
pub fn smooth_heights(grid: &mut GeodesicGrid, divisor: i32) {
    let divisor = divisor.max(1);
    for y in 0..grid.rows() {
        for x in 0..grid.width_at(y) {
            let sum = grid.height(x - 1, y) + grid.height(x, y) + grid.height(x + 1, y);
            grid.set_height(x, y, sum / divisor);
        }
    }
}

/// Fractal cloud cover with Perlin swirl on top.
pub fn cloud_layer(config: &CloudConfig, dice: &mut dyn RandomSource) -> Result<GeodesicGrid> {
    let mut cloud = GeodesicGrid::new(config.final_face_size)?;
    generate_height_map(&mut cloud, config.base_face_size, config.variation, dice)?;

    let seed = dice.roll_zero(u32::MAX as i64) as u32;
    let noise = NoiseConfig::new(seed, config.noise_frequency, config.noise_amplitude);
    for (x, y) in cloud.cells().collect::<Vec<_>>() {
        let swirl = noise.sample(cloud.direction(x, y)) as i32;
        cloud.set_height(x, y, cloud.height(x, y) + swirl);
    }
    Ok(cloud)
}

/// Project a cloud layer as a stretched texture `width` pixels wide.
pub(crate) fn cloud_image(
    cloud: &GeodesicGrid,
    rgb: u32,
    width: u32,
    dice: &mut dyn RandomSource,
) -> Result<RgbaImage> {
    let render_width = width.max(cloud.max_column() as u32 + 1);
    let image = cloud.draw_transparency(rgb, render_width, dice)?;
    Ok(stretch(&image, width))
}
