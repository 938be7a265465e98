//! Belts and discs have no surface. They are drawn as bands of rings on the
//! star system's map.

use super::{MapCapabilities, SurfaceMapper};
use crate::body::Body;
use crate::canvas::Canvas;
use crate::dice::RandomSource;
use crate::error::{PlanetGenError, Result};
use crate::grid::GeodesicGrid;
use crate::tile::Tile;
use log::info;

pub struct OrbitMapper<'a> {
    body: &'a Body,
    grid: GeodesicGrid,
}

impl<'a> OrbitMapper<'a> {
    pub fn new(body: &'a Body) -> Result<Self> {
        if !body.body_type().is_belt() {
            return Err(PlanetGenError::invalid(format!(
                "{} is not a belt",
                body.body_type()
            )));
        }
        Ok(Self {
            body,
            grid: GeodesicGrid::new(1)?,
        })
    }
}

impl SurfaceMapper for OrbitMapper<'_> {
    fn body(&self) -> &Body {
        self.body
    }

    fn grid(&self) -> &GeodesicGrid {
        &self.grid
    }

    fn capabilities(&self) -> MapCapabilities {
        MapCapabilities {
            orbit: true,
            ..Default::default()
        }
    }

    fn generate(&mut self, _dice: &mut dyn RandomSource) -> Result<()> {
        Ok(())
    }

    /// Concentric ring outlines across the belt's width, each a little
    /// darker, lighter or the same as the belt's colour.
    fn draw_orbit(
        &self,
        canvas: &mut dyn Canvas,
        cx: i64,
        cy: i64,
        km_per_pixel: i64,
        dice: &mut dyn RandomSource,
    ) -> Result<()> {
        if km_per_pixel <= 0 {
            return Err(PlanetGenError::invalid(format!(
                "scale must be positive, got {km_per_pixel} km per pixel"
            )));
        }
        let distance = self.body.distance();
        let width = self.body.radius();
        info!(
            "drawing orbit for [{}] at [{distance}]km scale [{km_per_pixel}]",
            self.body.name()
        );

        let base = Tile::new("Ring", self.body.body_type().colour(), false, 0);
        let mut d = distance - width;
        while d < distance + width {
            let ring = match dice.roll(3) {
                1 => base.shaded(100 - (6 + dice.roll_zero(6)) as i32),
                2 => base.shaded(100 + (6 + dice.roll_zero(6)) as i32),
                _ => base.clone(),
            };
            let thickness = 1 + dice.roll_zero(width / (km_per_pixel * 10));
            canvas.circle_outline(cx, cy, d / km_per_pixel, thickness, ring.shifted(1.0));
            d += 1 + dice.roll_zero(width / 10);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyType;
    use crate::dice::Dice;
    use image::RgbaImage;
    use rstest::rstest;

    fn belt(body_type: BodyType, distance: i64, width: i64) -> Body {
        let mut body = Body::new("Belt", body_type).unwrap();
        body.set_distance(distance);
        body.set_radius(width);
        body
    }

    #[test]
    fn test_rings_cover_belt_width() {
        // 1,000 km per pixel: the belt spans 40..60 pixels from the centre.
        let body = belt(BodyType::AsteroidBelt, 50_000, 10_000);
        let mapper = OrbitMapper::new(&body).unwrap();
        let mut image = RgbaImage::new(200, 200);
        mapper
            .draw_orbit(&mut image, 100, 100, 1_000, &mut Dice::seeded(1))
            .unwrap();

        let painted = |x: u32, y: u32| image.get_pixel(x, y).0[3] > 0;
        assert!(!painted(100, 100));
        assert!(!painted(100 + 30, 100));
        assert!(!painted(100 + 70, 100));
        assert!((140..=160).any(|x| painted(x, 100)));
        assert!((40..=60).any(|y| painted(100, y)));
    }

    #[rstest]
    #[case(BodyType::DustDisc)]
    #[case(BodyType::IceBelt)]
    #[case(BodyType::VulcanianBelt)]
    fn test_ring_colours_stay_near_type_colour(#[case] body_type: BodyType) {
        let body = belt(body_type, 50_000, 10_000);
        let mapper = OrbitMapper::new(&body).unwrap();
        let mut image = RgbaImage::new(200, 200);
        mapper
            .draw_orbit(&mut image, 100, 100, 1_000, &mut Dice::seeded(2))
            .unwrap();

        let base = Tile::new("Ring", body_type.colour(), false, 0);
        let (darkest, lightest) = (base.shaded(89).rgb(), base.shaded(111).rgb());
        for p in image.pixels().filter(|p| p.0[3] > 0) {
            for c in 0..3 {
                assert!(darkest[c] <= p.0[c] && p.0[c] <= lightest[c], "{p:?}");
            }
        }
    }

    #[test]
    fn test_only_orbit_drawing() {
        let body = belt(BodyType::PlanetesimalDisc, 50_000, 10_000);
        let mut mapper = OrbitMapper::new(&body).unwrap();
        let mut dice = Dice::seeded(3);
        mapper.generate(&mut dice).unwrap();
        assert!(matches!(
            mapper.draw(256, &mut dice),
            Err(PlanetGenError::Unsupported(_))
        ));
        assert!(matches!(
            mapper.draw_orbit(&mut RgbaImage::new(8, 8), 4, 4, 0, &mut dice),
            Err(PlanetGenError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_planets_are_not_belts() {
        let body = Body::new("Rock", BodyType::Hermian).unwrap();
        assert!(OrbitMapper::new(&body).is_err());
    }
}
