//! Earth-sized worlds: fractal continents in a global ocean, polar ice and
//! fractal cloud cover.

use super::{
    MapCapabilities, SurfaceMapper, cloud_image, cloud_layer, create_craters, generate_height_map,
};
use crate::body::{Body, TerrestrialFeature};
use crate::config::{CloudConfig, MappingConfig, PlanetGenConfig};
use crate::constants::STANDARD_PRESSURE;
use crate::dice::RandomSource;
use crate::error::Result;
use crate::grid::GeodesicGrid;
use crate::tile::Tile;
use image::RgbaImage;
use log::debug;

const WATER: Tile = Tile::new("Water", 0x7070C0, true, 2);
const LAND: Tile = Tile::new("Land", 0x807050, false, 3);
const LAND_ICE: Tile = Tile::new("Glacier", 0xC0C0C0, false, 2);
const SEA_ICE: Tile = Tile::new("Sea Ice", 0xD0D0D0, true, 2);
const BACTERIAL_MAT: Tile = Tile::new("Bacterial Mat", 0x203020, true, 3);
const BARREN_LAND: Tile = Tile::new("Land", 0xA07050, false, 2);

/// Percentage of the surface raised above the ocean.
const LAND_PERCENT: i32 = 30;

/// Ocean everywhere, then a handful of continent seeds grown over the
/// higher ground.
fn ocean_world(
    grid: &mut GeodesicGrid,
    mapping: &MappingConfig,
    dice: &mut dyn RandomSource,
) -> Result<()> {
    generate_height_map(grid, mapping.base_face_size, mapping.height_variation, dice)?;
    for (x, y) in grid.cells().collect::<Vec<_>>() {
        grid.set_tile(x, y, WATER);
    }

    let continents = 4 + dice.roll(6);
    for _ in 0..continents {
        let y = dice.roll_zero(grid.rows() - 4) + 2;
        let x = dice.roll_zero(grid.width_at(y));
        grid.set_tile(x, y, LAND);
    }
    grid.flood_to_percentage(&LAND, LAND_PERCENT, true, dice);
    Ok(())
}

/// Freeze everything poleward of a line that retreats as the world warms.
/// Sea freezes more readily than land.
fn set_ice_caps(grid: &mut GeodesicGrid, temperature: i32) {
    let ice_line = if temperature > 250 {
        ((temperature - 250) as f64 * 1.5) as i32
    } else {
        0
    };

    for (x, y) in grid.cells().collect::<Vec<_>>() {
        let latitude = grid.latitude(y);
        let h = grid.height(x, y);
        if grid.tile(x, y).is_water() {
            if latitude + h / 10 > ice_line {
                grid.set_tile(x, y, SEA_ICE);
            }
        } else if latitude + h / 5 > ice_line {
            grid.set_tile(x, y, LAND_ICE);
        }
    }
}

pub struct EoGaianMapper<'a> {
    body: &'a Body,
    grid: GeodesicGrid,
    mapping: MappingConfig,
    clouds: CloudConfig,
}

impl<'a> EoGaianMapper<'a> {
    pub fn new(body: &'a Body, config: &PlanetGenConfig) -> Result<Self> {
        Ok(Self {
            body,
            grid: GeodesicGrid::new(config.mapping.terrestrial_face_size)?,
            mapping: config.mapping.clone(),
            clouds: config.clouds.clone(),
        })
    }

    /// Cloud heights below this are clear sky. Dryness comes from the
    /// hydrographics percentage alone: up to 10 is dry, 30 or more is wet.
    fn cloud_limit(&self) -> i32 {
        match self.body.hydrographics() {
            ..=10 => 75,
            30.. => 30,
            _ => 50,
        }
    }
}

impl SurfaceMapper for EoGaianMapper<'_> {
    fn body(&self) -> &Body {
        self.body
    }

    fn grid(&self) -> &GeodesicGrid {
        &self.grid
    }

    fn capabilities(&self) -> MapCapabilities {
        MapCapabilities {
            main: true,
            height: true,
            clouds: true,
            ..Default::default()
        }
    }

    fn generate(&mut self, dice: &mut dyn RandomSource) -> Result<()> {
        let grid = &mut self.grid;
        ocean_world(grid, &self.mapping, dice)?;

        for (x, y) in grid.cells().collect::<Vec<_>>() {
            let h = grid.height(x, y);
            let tile = grid.tile(x, y);
            let shaded = if tile.is_water() {
                tile.shaded((h + 200) / 3)
            } else {
                tile.shaded((h + 100) / 2)
            };
            grid.set_tile(x, y, shaded);
        }
        set_ice_caps(grid, self.body.temperature());

        // Flatten to sea, plains and highlands for the relief map.
        for (x, y) in grid.cells().collect::<Vec<_>>() {
            let h = match (grid.tile(x, y).is_water(), grid.height(x, y)) {
                (true, _) => 0,
                (false, ..90) => 50,
                (false, _) => 100,
            };
            grid.set_height(x, y, h);
        }
        create_craters(grid, 0, 50, dice);

        if self.body.has_feature(TerrestrialFeature::BacterialMats) {
            for (x, y) in grid.cells().collect::<Vec<_>>() {
                if grid.tile(x, y).is_water() && grid.height(x, y) + grid.latitude(y) < 60 {
                    grid.set_tile(x, y, BACTERIAL_MAT);
                }
            }
        }

        debug!(
            "mapped {}: {} of {} tiles land",
            self.body.name(),
            grid.cells().filter(|&(x, y)| !grid.tile(x, y).is_water()).count(),
            grid.tile_count()
        );
        Ok(())
    }

    fn draw_clouds(&self, width: u32, dice: &mut dyn RandomSource) -> Result<Vec<RgbaImage>> {
        let mut cloud = cloud_layer(&self.clouds, dice)?;
        let limit = self.cloud_limit();
        for (x, y) in cloud.cells().collect::<Vec<_>>() {
            if cloud.height(x, y) < limit {
                cloud.set_height(x, y, 0);
            }
        }

        // Ash-laden skies over volcanic worlds.
        let colour = if self.body.has_feature(TerrestrialFeature::VolcanicFlats) {
            0x808080
        } else {
            0xF0F0F0
        };
        Ok(vec![cloud_image(&cloud, colour, width, dice)?])
    }
}

/// Hot, barren world under a permanent double cloud deck.
pub struct CythereanMapper<'a> {
    body: &'a Body,
    grid: GeodesicGrid,
    mapping: MappingConfig,
    clouds: CloudConfig,
}

impl<'a> CythereanMapper<'a> {
    pub fn new(body: &'a Body, config: &PlanetGenConfig) -> Result<Self> {
        Ok(Self {
            body,
            grid: GeodesicGrid::new(config.mapping.terrestrial_face_size)?,
            mapping: config.mapping.clone(),
            clouds: config.clouds.clone(),
        })
    }

    fn cloud_deck(
        &self,
        rgb: u32,
        width: u32,
        thickness: impl Fn(i32, i32) -> i32,
        dice: &mut dyn RandomSource,
    ) -> Result<RgbaImage> {
        let mut cloud = cloud_layer(&self.clouds, dice)?;
        let modifier = self.body.pressure() / STANDARD_PRESSURE;
        for (x, y) in cloud.cells().collect::<Vec<_>>() {
            cloud.set_height(x, y, thickness(modifier, cloud.height(x, y)));
        }
        cloud_image(&cloud, rgb, width, dice)
    }
}

impl SurfaceMapper for CythereanMapper<'_> {
    fn body(&self) -> &Body {
        self.body
    }

    fn grid(&self) -> &GeodesicGrid {
        &self.grid
    }

    fn capabilities(&self) -> MapCapabilities {
        MapCapabilities {
            main: true,
            height: true,
            clouds: true,
            ..Default::default()
        }
    }

    fn generate(&mut self, dice: &mut dyn RandomSource) -> Result<()> {
        let grid = &mut self.grid;
        generate_height_map(
            grid,
            self.mapping.base_face_size,
            self.mapping.height_variation,
            dice,
        )?;

        for (x, y) in grid.cells().collect::<Vec<_>>() {
            let h = grid.height(x, y);
            grid.set_tile(x, y, BARREN_LAND.shaded((h + 100) / 2));
            let h = match h {
                ..50 => 25,
                50..90 => 50,
                _ => 100,
            };
            grid.set_height(x, y, h);
        }
        Ok(())
    }

    /// The lower deck is nearly opaque; the upper one is thinner so the
    /// lower shows through.
    fn draw_clouds(&self, width: u32, dice: &mut dyn RandomSource) -> Result<Vec<RgbaImage>> {
        let lower = self.cloud_deck(0xCFC1A4, width, |m, h| m + h / 2, dice)?;
        let upper = self.cloud_deck(0xB0B8BA, width, |m, h| (m + h) / 3, dice)?;
        Ok(vec![lower, upper])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyType;
    use crate::dice::Dice;
    use crate::mapper::test_support::small_config;
    use rstest::rstest;

    fn world(body_type: BodyType, temperature: i32, hydrographics: i32) -> Body {
        let mut body = Body::new("Test", body_type).unwrap();
        body.set_temperature(temperature);
        body.set_hydrographics(hydrographics);
        body.set_pressure(9 * STANDARD_PRESSURE);
        body
    }

    fn names(grid: &GeodesicGrid) -> Vec<String> {
        grid.cells()
            .map(|(x, y)| grid.tile(x, y).name().to_string())
            .collect()
    }

    #[test]
    fn test_eo_gaian_has_land_and_sea() {
        let body = world(BodyType::EoGaian, 400, 20);
        let mut mapper = EoGaianMapper::new(&body, &small_config()).unwrap();
        mapper.generate(&mut Dice::seeded(3)).unwrap();

        let grid = mapper.grid();
        let names = names(grid);
        assert!(names.iter().any(|n| n == "Land"));
        assert!(names.iter().any(|n| n == "Water"));
        // Too warm for ice anywhere.
        assert!(!names.iter().any(|n| n == "Glacier" || n == "Sea Ice"));

        for (x, y) in grid.cells() {
            let h = grid.height(x, y);
            if grid.tile(x, y).is_water() {
                assert_eq!(h, 0);
            } else {
                assert!([10, 50, 100].contains(&h), "{h}");
            }
        }
    }

    #[test]
    fn test_eo_gaian_poles_freeze_when_cold() {
        let body = world(BodyType::EoGaian, 200, 20);
        let mut mapper = EoGaianMapper::new(&body, &small_config()).unwrap();
        mapper.generate(&mut Dice::seeded(3)).unwrap();
        let grid = mapper.grid();
        for x in 0..grid.width_at(0) {
            let name = grid.tile(x, 0).name();
            assert!(name == "Glacier" || name == "Sea Ice", "{name}");
        }
    }

    #[test]
    fn test_bacterial_mats_cover_warm_shallows() {
        let mut body = world(BodyType::EoGaian, 400, 20);
        body.add_feature(TerrestrialFeature::BacterialMats);
        let mut mapper = EoGaianMapper::new(&body, &small_config()).unwrap();
        mapper.generate(&mut Dice::seeded(4)).unwrap();

        let grid = mapper.grid();
        for (x, y) in grid.cells() {
            if grid.tile(x, y).is_water() && grid.latitude(y) < 60 {
                assert_eq!(grid.tile(x, y).name(), "Bacterial Mat");
            }
        }
        assert!(grid.count_tiles(&BACTERIAL_MAT) > 0);
    }

    #[test]
    fn test_dry_worlds_have_fewer_clouds() {
        let config = small_config();
        let cover = |hydrographics: i32| {
            let body = world(BodyType::EoGaian, 300, hydrographics);
            let mapper = EoGaianMapper::new(&body, &config).unwrap();
            let layers = mapper.draw_clouds(128, &mut Dice::seeded(9)).unwrap();
            assert_eq!(layers.len(), 1);
            assert_eq!(layers[0].dimensions(), (128, 64));
            layers[0].pixels().map(|p| p.0[3] as u64).sum::<u64>()
        };
        assert!(cover(5) < cover(35));
    }

    #[rstest]
    #[case(5, 75)]
    #[case(20, 50)]
    #[case(30, 30)]
    fn test_cloud_limit(#[case] hydrographics: i32, #[case] limit: i32) {
        let body = world(BodyType::EoGaian, 300, hydrographics);
        let mapper = EoGaianMapper::new(&body, &small_config()).unwrap();
        assert_eq!(mapper.cloud_limit(), limit);
    }

    #[test]
    fn test_cytherean_is_all_land() {
        let body = world(BodyType::Cytherean, 700, 0);
        let mut mapper = CythereanMapper::new(&body, &small_config()).unwrap();
        mapper.generate(&mut Dice::seeded(5)).unwrap();

        let grid = mapper.grid();
        assert_eq!(grid.count_tiles(&BARREN_LAND), grid.tile_count());
        assert!(
            grid.cells()
                .all(|(x, y)| [25, 50, 100].contains(&grid.height(x, y)))
        );
    }

    #[test]
    fn test_cytherean_has_two_cloud_decks() {
        let body = world(BodyType::Cytherean, 700, 0);
        let mapper = CythereanMapper::new(&body, &small_config()).unwrap();
        let layers = mapper.draw_clouds(128, &mut Dice::seeded(6)).unwrap();
        assert_eq!(layers.len(), 2);
        let opacity = |image: &RgbaImage| image.pixels().map(|p| p.0[3] as u64).sum::<u64>();
        assert!(opacity(&layers[0]) > opacity(&layers[1]));
    }
}
