//! Dwarf terrestrial worlds: barren, cratered surfaces in greys or reds,
//! with rifts, metal seas and polar craters drawn from the body's features.

use super::{
    MapCapabilities, SurfaceMapper, add_rift, create_craters, generate_height_map,
    generate_height_map_from,
};
use crate::body::{Atmosphere, Body, DwarfFeature};
use crate::config::PlanetGenConfig;
use crate::dice::RandomSource;
use crate::error::Result;
use crate::grid::GeodesicGrid;
use crate::tile::Tile;
use log::debug;

/// State shared by every dwarf mapper.
struct Surface<'a> {
    body: &'a Body,
    grid: GeodesicGrid,
    base_face_size: usize,
    variation: i64,
}

impl<'a> Surface<'a> {
    fn new(body: &'a Body, config: &PlanetGenConfig) -> Result<Self> {
        Ok(Self {
            body,
            grid: GeodesicGrid::new(config.mapping.dwarf_face_size)?,
            base_face_size: config.mapping.base_face_size,
            variation: config.mapping.height_variation,
        })
    }

    fn height_map(&mut self, dice: &mut dyn RandomSource) -> Result<()> {
        generate_height_map(&mut self.grid, self.base_face_size, self.variation, dice)
    }
}

macro_rules! dwarf_mapper {
    ($(#[$meta:meta])* $name:ident, $build:ident, height: $height:expr) => {
        $(#[$meta])*
        pub struct $name<'a>(Surface<'a>);

        impl<'a> $name<'a> {
            pub fn new(body: &'a Body, config: &PlanetGenConfig) -> Result<Self> {
                Surface::new(body, config).map(Self)
            }
        }

        impl SurfaceMapper for $name<'_> {
            fn body(&self) -> &Body {
                self.0.body
            }

            fn grid(&self) -> &GeodesicGrid {
                &self.0.grid
            }

            fn capabilities(&self) -> MapCapabilities {
                MapCapabilities {
                    main: true,
                    height: $height,
                    ..Default::default()
                }
            }

            fn generate(&mut self, dice: &mut dyn RandomSource) -> Result<()> {
                $build(&mut self.0, dice)?;
                debug!("mapped {} ({})", self.0.body.name(), self.0.body.body_type());
                Ok(())
            }
        }
    };
}

/// Replace each tile for which `hit` succeeds with a cratered copy.
fn scatter_craters(
    grid: &mut GeodesicGrid,
    dice: &mut dyn RandomSource,
    mut hit: impl FnMut(&Tile, &mut dyn RandomSource) -> bool,
) {
    for (x, y) in grid.cells().collect::<Vec<_>>() {
        let tile = grid.tile(x, y);
        if hit(tile, dice) {
            let cratered = tile.cratered();
            grid.set_tile(x, y, cratered);
        }
    }
}

fn paint_row(grid: &mut GeodesicGrid, y: i64, tile: &Tile) {
    for x in 0..grid.width_at(y) {
        grid.set_tile(x, y, tile.clone());
    }
}

fn great_rift(grid: &mut GeodesicGrid, rift: &Tile, dice: &mut dyn RandomSource) {
    let length = 8 + dice.roll_n(6, 2);
    add_rift(grid, rift, length, dice);
}

fn broken_rifts(grid: &mut GeodesicGrid, rift: &Tile, dice: &mut dyn RandomSource) {
    let count = 6 + dice.roll_n(4, 2);
    for _ in 0..count {
        let length = 6 + dice.roll_n(4, 2);
        add_rift(grid, rift, length, dice);
    }
}

/// Drop a seed of `sea` at `(x, y)` and let it spread.
fn metallic_sea(grid: &mut GeodesicGrid, sea: &Tile, x: i64, y: i64, dice: &mut dyn RandomSource) {
    grid.set_tile(x, y, sea.clone());
    grid.flood(sea, 7, dice);
}

mod arean {
    use crate::tile::Tile;

    pub const DARK_RED: Tile = Tile::new("Dark Red", 0x906045, false, 2);
    pub const MID_RED: Tile = Tile::new("Mid Red", 0xD08055, false, 3);
    pub const LIGHT_RED: Tile = Tile::new("Light Red", 0xF09050, false, 2);
    pub const ICE: Tile = Tile::new("Ice", 0xE0E0E0, false, 2);
    pub const RIFT: Tile = Tile::new("Rift", 0xD08040, false, 1);
}

dwarf_mapper!(
    /// Mars-like world with a low southern hemisphere and polar ice.
    AreanMapper,
    build_arean,
    height: true
);

fn build_arean(s: &mut Surface<'_>, dice: &mut dyn RandomSource) -> Result<()> {
    use arean::*;

    // Each southern row of the coarse grid is halved again.
    let base = s.base_face_size.min(s.grid.face_size());
    let mut parent = GeodesicGrid::new(base)?;
    parent.fractal(dice);
    let mut modifier = 1.0;
    for y in (2 * base as i64 - 1)..(3 * base as i64) {
        modifier *= 0.5;
        for x in 0..parent.width_at(y) {
            let h = (parent.height(x, y) as f64 * modifier) as i32;
            parent.set_height(x, y, h);
        }
    }
    generate_height_map_from(&mut s.grid, parent, s.variation, dice)?;

    let grid = &mut s.grid;
    for (x, y) in grid.cells().collect::<Vec<_>>() {
        let h = grid.height(x, y);
        let tile = match h {
            ..15 => DARK_RED.shaded(75 + h),
            15..75 => LIGHT_RED.shaded(100 - h / 5),
            _ => MID_RED.shaded(85 + (h - 75) / 2),
        };
        grid.set_tile(x, y, tile);
    }

    grid.flood(&DARK_RED, 6, dice);
    for (x, y) in grid.cells().collect::<Vec<_>>() {
        if grid.tile(x, y) == &DARK_RED {
            grid.set_tile(x, y, DARK_RED.shaded(75 + grid.height(x, y)));
        }
    }

    for (x, y) in grid.cells().collect::<Vec<_>>() {
        let frost = grid.latitude(y) + grid.height(x, y) / 5;
        let tile = grid.tile(x, y);
        let replacement = if frost > 85 {
            Some(ICE)
        } else if frost > 80 {
            Some(tile.mix(&ICE).mix(&ICE))
        } else {
            let chance = if tile == &LIGHT_RED {
                20
            } else if tile == &MID_RED {
                6
            } else {
                12
            };
            dice.one_in(chance).then(|| tile.cratered())
        };
        if let Some(tile) = replacement {
            grid.set_tile(x, y, tile);
        }
    }

    if s.body.has_feature(DwarfFeature::GreatRift) {
        let length = 24 + dice.roll_n(12, 3);
        add_rift(grid, &RIFT, length, dice);
        grid.flood(&RIFT, 1, dice);
    }
    if s.body.has_feature(DwarfFeature::BrokenRifts) {
        broken_rifts(grid, &RIFT, dice);
    }
    Ok(())
}

mod meso_arean {
    use crate::tile::Tile;

    pub const DARK_RED: Tile = Tile::new("Dark Red", 0xA07055, false, 3);
    pub const MID_RED: Tile = Tile::new("Mid Red", 0xE07040, false, 2);
    pub const LIGHT_RED: Tile = Tile::new("Light Red", 0xF08050, false, 2);
    pub const RIFT: Tile = Tile::new("Rift", 0x604040, false, 1);
    pub const WATER: Tile = Tile::new("Water", 0x6666AA, true, 3);
}

dwarf_mapper!(
    /// Red desert world, possibly with shallow seas.
    MesoAreanMapper,
    build_meso_arean,
    height: false
);

fn build_meso_arean(s: &mut Surface<'_>, dice: &mut dyn RandomSource) -> Result<()> {
    use meso_arean::*;

    let grid = &mut s.grid;
    for (x, y) in grid.cells().collect::<Vec<_>>() {
        let tile = match dice.roll_n(6, 2) {
            ..=5 => LIGHT_RED,
            6..=11 => MID_RED,
            _ => DARK_RED,
        };
        grid.set_tile(x, y, tile);
    }
    grid.flood(&DARK_RED, 4, dice);
    grid.flood(&LIGHT_RED, 3, dice);

    scatter_craters(grid, dice, |tile, dice| {
        if tile == &LIGHT_RED {
            dice.one_in(12)
        } else if tile == &MID_RED {
            dice.one_in(6)
        } else if tile == &DARK_RED {
            !dice.one_in(3)
        } else {
            false
        }
    });

    let hydrographics = s.body.hydrographics();
    if hydrographics > 0 {
        let seeds = 1 + grid.tile_count() as i64 * hydrographics as i64 / 1000;
        for _ in 0..seeds {
            let y = dice.roll_zero(grid.rows());
            let x = dice.roll_zero(grid.width_at(y));
            grid.set_tile(x, y, WATER);
        }
        grid.flood_to_percentage(&WATER, hydrographics, false, dice);
    }

    if s.body.has_feature(DwarfFeature::GreatRift) {
        great_rift(grid, &RIFT, dice);
    }
    Ok(())
}

mod ferrinian {
    use crate::tile::Tile;

    pub const CRATER: Tile = Tile::new("Polar Crater", 0x505050, false, 4);
    pub const DARK_GREY: Tile = Tile::new("Dark Grey", 0x707270, false, 3);
    pub const MID_GREY: Tile = Tile::new("Mid Grey", 0x747674, false, 3);
    pub const LIGHT_GREY: Tile = Tile::new("Light Grey", 0x7B7B78, false, 3);
}

dwarf_mapper!(
    /// Dense iron world, optionally with one pole taken up by a huge crater.
    FerrinianMapper,
    build_ferrinian,
    height: true
);

fn build_ferrinian(s: &mut Surface<'_>, dice: &mut dyn RandomSource) -> Result<()> {
    use ferrinian::*;

    s.height_map(dice)?;
    let grid = &mut s.grid;
    for (x, y) in grid.cells().collect::<Vec<_>>() {
        let tile = match dice.roll_n(6, 2) {
            ..=3 => LIGHT_GREY,
            4..=8 => MID_GREY,
            _ => DARK_GREY,
        };
        grid.set_tile(x, y, tile);
    }
    grid.flood(&DARK_GREY, 4, dice);
    grid.flood(&LIGHT_GREY, 6, dice);

    scatter_craters(grid, dice, |tile, dice| {
        if tile == &LIGHT_GREY {
            dice.one_in(4)
        } else {
            dice.one_in(3)
        }
    });

    let rows = grid.rows();
    if s.body.has_feature(DwarfFeature::NorthCrater) {
        let size = rows / 3 - dice.roll(4);
        for y in 0..size {
            for x in 0..grid.width_at(y) {
                if y < size - dice.roll(2) {
                    grid.set_tile(x, y, CRATER);
                }
            }
        }
    } else if s.body.has_feature(DwarfFeature::SouthCrater) {
        let size = rows * 2 / 3 + dice.roll(4);
        for y in (size + 1..rows).rev() {
            for x in 0..grid.width_at(y) {
                if y > size + dice.roll(2) {
                    grid.set_tile(x, y, CRATER);
                }
            }
        }
    }
    Ok(())
}

mod hermian {
    use crate::tile::Tile;

    pub const DARK_GREY: Tile = Tile::new("Dark Grey", 0x808280, false, 2);
    pub const MID_GREY: Tile = Tile::new("Mid Grey", 0x848684, false, 2);
    pub const LIGHT_GREY: Tile = Tile::new("Light Grey", 0x8B8B88, false, 2);
    pub const RIFT: Tile = Tile::new("Rift", 0x404040, false, 1);
    pub const SILVER: Tile = Tile::new("Silver", 0xD0D0D0, true, 1);
    pub const RIDGE: Tile = Tile::new("Ridge", 0xA0A0A0, false, 2);
    pub const FLOOR: Tile = Tile::new("Floor", 0x606060, false, 5);
}

dwarf_mapper!(
    /// Mercury-like world: grey, heavily cratered and banded by height.
    HermianMapper,
    build_hermian,
    height: true
);

fn build_hermian(s: &mut Surface<'_>, dice: &mut dyn RandomSource) -> Result<()> {
    use hermian::*;

    s.height_map(dice)?;
    let remelted = s.body.has_feature(DwarfFeature::ReMelted);
    let grid = &mut s.grid;

    for (x, y) in grid.cells().collect::<Vec<_>>() {
        let tile = if remelted {
            if dice.roll_n(6, 2) == 2 {
                LIGHT_GREY
            } else {
                DARK_GREY
            }
        } else {
            match dice.roll_n(4, 2) + grid.height(x, y) as i64 / 24 {
                ..=2 => LIGHT_GREY,
                3..=9 => MID_GREY,
                _ => DARK_GREY,
            }
        };
        grid.set_tile(x, y, tile);
    }

    if remelted {
        grid.flood(&DARK_GREY, 1, dice);
        grid.flood(&LIGHT_GREY, 3, dice);
    } else {
        grid.flood(&DARK_GREY, 3, dice);
        grid.flood(&LIGHT_GREY, 7, dice);
    }

    // Re-melted surfaces have lost most of their older craters.
    scatter_craters(grid, dice, |tile, dice| {
        if tile == &LIGHT_GREY {
            dice.one_in(3)
        } else {
            (dice.one_in(2) && !remelted) || dice.one_in(6)
        }
    });

    for (x, y) in grid.cells().collect::<Vec<_>>() {
        let h = match grid.height(x, y) {
            ..21 => 10,
            21..90 => 50,
            _ => 100,
        };
        grid.set_height(x, y, h);
    }
    create_craters(grid, 0, 250, dice);

    if s.body.has_feature(DwarfFeature::GreatRift) {
        great_rift(grid, &RIFT, dice);
    }
    if s.body.has_feature(DwarfFeature::BrokenRifts) {
        broken_rifts(grid, &RIFT, dice);
    }
    if s.body.has_feature(DwarfFeature::MetallicSea) {
        let y = grid.rows() / 2 + dice.variance(3);
        let x = grid.width_at(y) / 2 + dice.variance(2);
        metallic_sea(grid, &SILVER, x, y, dice);
    }
    if s.body.has_feature(DwarfFeature::NorthCrater) {
        major_crater(grid, 0, 1, dice);
    }
    if s.body.has_feature(DwarfFeature::SouthCrater) {
        major_crater(grid, grid.rows() - 1, -1, dice);
    }
    Ok(())
}

/// Ridged basin covering a third of the globe from one pole, with a
/// chance of a lesser ridge part way out.
fn major_crater(grid: &mut GeodesicGrid, start: i64, direction: i64, dice: &mut dyn RandomSource) {
    use hermian::*;

    paint_row(grid, start, &RIDGE);
    let edge = start + (grid.rows() / 3 + dice.variance(3)) * direction;

    let mut y = start;
    while y != edge {
        y += direction;
        for x in 0..grid.width_at(y) {
            let floor = if dice.one_in(6) {
                FLOOR.cratered()
            } else {
                FLOOR
            };
            grid.set_tile(x, y, floor);
        }
    }

    for x in 0..grid.width_at(y) {
        let rim = if dice.one_in(6) { LIGHT_GREY } else { RIDGE };
        grid.set_tile(x, y, rim);
    }

    if dice.one_in(2) {
        let mid = (start + y) / 2 + dice.variance(2);
        for x in 0..grid.width_at(mid) {
            let ridge = if dice.one_in(3) { DARK_GREY } else { MID_GREY };
            grid.set_tile(x, mid, ridge);
        }
    }
}

mod janian {
    use crate::tile::Tile;

    pub const DARK_GREY: Tile = Tile::new("Dark Grey", 0x808280, false, 2);
    pub const MID_GREY: Tile = Tile::new("Mid Grey", 0x848684, false, 2);
    pub const LIGHT_GREY: Tile = Tile::new("Light Grey", 0x908B88, false, 2);
    pub const RIFT: Tile = Tile::new("Rift", 0x404040, false, 1);
    pub const SILVER: Tile = Tile::new("Silver", 0x1E1F12, true, 1);
    pub const ICE: Tile = Tile::new("Ice", 0xE0E0E0, false, 1);
}

dwarf_mapper!(
    /// Tidally locked world, lighter towards the middle of the map and
    /// darker on the star side.
    JanianMapper,
    build_janian,
    height: false
);

/// Colour modifier by distance along the row from its midpoint.
fn longitude_modifier(x: i64, width: i64) -> i64 {
    let fraction = x as f64 / (width / 2).max(1) as f64;
    match fraction {
        f if f < 0.2 => -2,
        f if f < 0.4 => -1,
        f if f < 0.6 => 0,
        f if f < 0.8 => 1,
        f if f < 1.2 => 2,
        f if f < 1.4 => 1,
        f if f < 1.6 => 0,
        f if f < 1.8 => -1,
        _ => -2,
    }
}

fn build_janian(s: &mut Surface<'_>, dice: &mut dyn RandomSource) -> Result<()> {
    use janian::*;

    let grid = &mut s.grid;
    for (x, y) in grid.cells().collect::<Vec<_>>() {
        let modifier = longitude_modifier(x, grid.width_at(y));
        let tile = match dice.roll_n(6, 2) + modifier {
            ..=4 => DARK_GREY,
            5..=9 => MID_GREY,
            _ => LIGHT_GREY,
        };
        grid.set_tile(x, y, tile);
    }
    grid.flood(&DARK_GREY, 2, dice);
    grid.flood(&LIGHT_GREY, 2, dice);

    if s.body.has_feature(DwarfFeature::NightsideIce) {
        let y = grid.rows() / 2;
        let x = grid.width_at(y) / 2;
        grid.set_tile(x, y, ICE);
        grid.flood(&ICE, 8, dice);
        if s.body.atmosphere() == Atmosphere::Oxygen {
            grid.flood(&ICE, 4, dice);
        }
    }

    scatter_craters(grid, dice, |tile, dice| {
        if tile == &LIGHT_GREY {
            dice.one_in(3)
        } else {
            dice.one_in(6)
        }
    });

    if s.body.has_feature(DwarfFeature::GreatRift) {
        great_rift(grid, &RIFT, dice);
    }
    if s.body.has_feature(DwarfFeature::BrokenRifts) {
        broken_rifts(grid, &RIFT, dice);
    }
    if s.body.has_feature(DwarfFeature::MetallicSea) {
        let y = grid.rows() / 2 + dice.variance(3);
        let x = dice.variance(4);
        metallic_sea(grid, &SILVER, x, y, dice);
    }
    Ok(())
}

mod selenian {
    use crate::tile::Tile;

    pub const MARIA: Tile = Tile::new("Seas", 0x404040, false, 2);
    pub const HIGHLANDS: Tile = Tile::new("Highlands", 0x8B8B88, false, 2);
}

dwarf_mapper!(
    /// Moon-like world of pale highlands and dark lava seas.
    SelenianMapper,
    build_selenian,
    height: true
);

fn build_selenian(s: &mut Surface<'_>, dice: &mut dyn RandomSource) -> Result<()> {
    use selenian::*;

    s.height_map(dice)?;
    let grid = &mut s.grid;
    let sea_level = grid.sea_level(5);
    for (x, y) in grid.cells().collect::<Vec<_>>() {
        let h = grid.height(x, y);
        let tile = if h <= sea_level {
            MARIA
        } else {
            HIGHLANDS.shaded(50 + h / 2)
        };
        grid.set_tile(x, y, tile);
    }

    // Shade the maria only once they have spread, so seeds and flooded
    // tiles match.
    grid.flood_to_percentage(&MARIA, 20, false, dice);
    grid.grow_border(&MARIA, 2, 2)?;
    for (x, y) in grid.cells().collect::<Vec<_>>() {
        if grid.tile(x, y) == &MARIA {
            grid.set_tile(x, y, MARIA.shaded(75 + grid.height(x, y) / 2));
        }
    }
    Ok(())
}
