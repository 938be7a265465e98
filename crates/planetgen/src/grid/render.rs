use super::GeodesicGrid;
use crate::canvas::Canvas;
use crate::dice::RandomSource;
use crate::error::{PlanetGenError, Result};
use crate::tile::Tile;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// Fully transparent white.
const BACKGROUND: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0x00]);

/// Anything painted, including zero-opacity tiles. Tile channels never
/// reach 0xFF so painted pixels always differ from the background.
fn is_painted(p: &Rgba<u8>) -> bool {
    p.0[..3] != BACKGROUND.0[..3]
}

impl GeodesicGrid {
    /// Project the tiles onto a flat icosahedral unwrap `width` pixels wide.
    pub fn draw(&self, width: u32, dice: &mut dyn RandomSource) -> Result<RgbaImage> {
        self.render(width, dice, |x, y| self.tile(x, y).clone())
    }

    /// Greyscale projection of the height map. Tiles are left untouched.
    pub fn draw_heights(&self, width: u32, dice: &mut dyn RandomSource) -> Result<RgbaImage> {
        self.render(width, dice, |x, y| Tile::grey(self.height(x, y) * 2))
    }

    /// Single colour projection whose opacity follows the height map.
    pub fn draw_transparency(
        &self,
        rgb: u32,
        width: u32,
        dice: &mut dyn RandomSource,
    ) -> Result<RgbaImage> {
        self.render(width, dice, |x, y| {
            Tile::transparent(rgb, (self.height(x, y) as f64 * 2.5) as i32)
        })
    }

    fn render(
        &self,
        width: u32,
        dice: &mut dyn RandomSource,
        tile_at: impl Fn(i64, i64) -> Tile,
    ) -> Result<RgbaImage> {
        let columns = self.max_column();
        if (width as i64) <= columns {
            return Err(PlanetGenError::invalid(format!(
                "map width {width} is narrower than {} columns",
                columns + 1
            )));
        }
        let root3 = 3f64.sqrt();
        let tile_width = width as i64 / columns;
        let tile_height = (tile_width as f64 * root3) as i64;
        let height = (self.rows() as f64 * tile_width as f64 * root3) as u32;

        let mut image = RgbaImage::from_pixel(width, height, BACKGROUND);
        for (x, y) in self.cells() {
            let dir = self.facing(x, y);
            let px = (self.column(x, y) - 1) * tile_width;
            let mut py = (y as f64 * tile_width as f64 * root3) as i64 + tile_height;
            if dir > 0 {
                py -= tile_height;
            }
            let h = tile_height * dir;

            let tile = tile_at(x, y);
            let colour = tile.jittered(dice);
            image.fill_triangle(px, py, tile_width, h, colour);
            tile.detail()
                .paint(&tile, &mut image, px, py, tile_width, h, dice);
        }
        Ok(image)
    }
}

/// Turn an icosahedral unwrap into a `width × width/2` equirectangular
/// texture: the slanted right edge is moved to the left, then every row's
/// painted pixels are stretched across the full row. Painted means any
/// colour other than the background, so clear cloud cells keep their place.
pub fn stretch(image: &RgbaImage, width: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    let target_height = (width / 2).max(1);
    if w == 0 || h == 0 {
        return RgbaImage::from_pixel(width, target_height, BACKGROUND);
    }
    let mut b = image.clone();

    let shift = w / 11;
    let right = w - shift;
    for y in 0..h {
        for x in 0..shift {
            let p = *b.get_pixel(right + x, y);
            if is_painted(&p) {
                b.put_pixel(x, y, p);
                b.put_pixel(right + x, y, BACKGROUND);
            }
        }
    }

    for y in 0..h {
        let painted: Vec<Rgba<u8>> = (0..w)
            .map(|x| *b.get_pixel(x, y))
            .filter(is_painted)
            .collect();
        let Some(&last) = painted.last() else {
            continue;
        };
        let step = w as f64 / painted.len() as f64;
        let mut total = 0.0;
        let mut x = 0;
        for p in painted {
            total += step;
            let run = total as u32;
            total -= run as f64;
            for _ in 0..run {
                if x < w {
                    b.put_pixel(x, y, p);
                }
                x += 1;
            }
        }
        while x < w {
            b.put_pixel(x, y, last);
            x += 1;
        }
    }

    imageops::resize(&b, width, target_height, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Dice;
    use rstest::rstest;

    #[rstest]
    #[case(3, 33)]
    #[case(3, 100)]
    #[case(12, 640)]
    #[case(24, 1025)]
    fn test_projection_has_requested_width(#[case] face_size: usize, #[case] width: u32) {
        let grid = GeodesicGrid::new(face_size).unwrap();
        let image = grid.draw(width, &mut Dice::seeded(1)).unwrap();
        assert_eq!(image.width(), width);
        let tw = (width as i64 / grid.max_column()) as f64;
        assert_eq!(image.height(), (grid.rows() as f64 * tw * 3f64.sqrt()) as u32);
    }

    #[test]
    fn test_too_narrow_rejected() {
        let grid = GeodesicGrid::new(3).unwrap();
        assert!(matches!(
            grid.draw(32, &mut Dice::seeded(1)),
            Err(PlanetGenError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_draw_leaves_corners_transparent() {
        let grid = GeodesicGrid::new(3).unwrap();
        let image = grid.draw(330, &mut Dice::seeded(1)).unwrap();
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
        let painted = image.pixels().filter(|p| p.0[3] == 0xFF).count();
        assert!(painted > image.pixels().count() / 2);
        let centre = image.get_pixel(image.width() / 2, image.height() / 2);
        assert!((0x75..=0x79).contains(&centre.0[0]));
    }

    #[test]
    fn test_height_and_transparency_views() {
        let mut grid = GeodesicGrid::new(3).unwrap();
        grid.set_height(0, 4, 100);
        let heights = grid.draw_heights(330, &mut Dice::seeded(1)).unwrap();
        let centre = heights.get_pixel(heights.width() / 2, heights.height() / 2);
        assert_eq!(centre.0, [100, 100, 100, 0xFF]);
        assert_eq!(grid.tile(0, 4).name(), "Grey");

        let clouds = grid
            .draw_transparency(0xF0F0F0, 330, &mut Dice::seeded(1))
            .unwrap();
        let alphas: Vec<u8> = clouds.pixels().map(|p| p.0[3]).collect();
        assert!(alphas.contains(&125));
        assert!(alphas.contains(&250));
        assert!(alphas.iter().all(|a| [0, 125, 250].contains(a)));
    }

    #[test]
    fn test_stretch_fills_texture() {
        let grid = GeodesicGrid::new(6).unwrap();
        let image = grid.draw(660, &mut Dice::seeded(2)).unwrap();
        let texture = stretch(&image, 256);
        assert_eq!(texture.dimensions(), (256, 128));
        assert_eq!(texture.get_pixel(128, 64).0[3], 0xFF);
        assert_eq!(texture.get_pixel(1, 64).0[3], 0xFF);
    }

    #[test]
    fn test_stretch_keeps_clear_sky() {
        // Left half clear sky, right half cloud.
        let mut layer = RgbaImage::new(22, 1);
        for x in 0..22 {
            let alpha = if x < 11 { 0 } else { 200 };
            layer.put_pixel(x, 0, Rgba([0xF0, 0xF0, 0xF0, alpha]));
        }
        let texture = stretch(&layer, 22);
        assert_eq!(texture.dimensions(), (22, 11));
        let row: Vec<u8> = (0..22).map(|x| texture.get_pixel(x, 5).0[3]).collect();
        let clear = row.iter().filter(|&&a| a == 0).count();
        let cloud = row.iter().filter(|&&a| a >= 190).count();
        assert!(clear >= 6, "{row:?}");
        assert!(cloud >= 6, "{row:?}");
    }

    #[test]
    fn test_clear_cloud_grid_stays_clear() {
        let mut grid = GeodesicGrid::new(3).unwrap();
        for (x, y) in grid.cells().collect::<Vec<_>>() {
            grid.set_height(x, y, if y < grid.rows() / 2 { 0 } else { 100 });
        }
        let image = grid
            .draw_transparency(0xF0F0F0, 330, &mut Dice::seeded(3))
            .unwrap();
        let texture = stretch(&image, 128);
        assert_eq!(texture.get_pixel(64, 4).0[3], 0);
        assert!(texture.get_pixel(64, 60).0[3] > 200);
    }

    #[test]
    fn test_stretch_of_empty_image() {
        let texture = stretch(&RgbaImage::new(0, 0), 64);
        assert_eq!(texture.dimensions(), (64, 32));
    }
}
