//! Texture painted over a tile's triangle at render time.

use crate::canvas::Canvas;
use crate::dice::RandomSource;
use crate::tile::Tile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Detail {
    #[default]
    Plain,
    /// One to three small craters.
    Cratered,
    /// Dappled light and dark pixels.
    Rough,
}

struct Crater {
    x: i64,
    y: i64,
    radius: i64,
}

impl Detail {
    /// Paint over the triangle whose base starts at `(x, y)`, `w` pixels per
    /// half-base and `h` pixels tall (negative when pointing up).
    pub fn paint(
        self,
        tile: &Tile,
        canvas: &mut dyn Canvas,
        x: i64,
        y: i64,
        w: i64,
        h: i64,
        dice: &mut dyn RandomSource,
    ) {
        match self {
            Detail::Plain => {}
            Detail::Cratered => paint_craters(tile, canvas, x, y, w, h, dice),
            Detail::Rough => paint_rough(tile, canvas, x, y, w, h, dice),
        }
    }
}

fn paint_craters(
    tile: &Tile,
    canvas: &mut dyn Canvas,
    x: i64,
    y: i64,
    w: i64,
    h: i64,
    dice: &mut dyn RandomSource,
) {
    let floor = tile.shifted(0.85);
    let walls = tile.shifted(1.1);
    let var = (w / 5).max(2);

    let count = match dice.roll(6) {
        1..=3 => 1,
        4..=5 => 2,
        _ => 3,
    };
    let spread = var + count / 2;
    let craters: Vec<Crater> = (0..count)
        .map(|_| Crater {
            radius: w / 4 + dice.variance(var),
            x: x + w + dice.variance(spread),
            y: y + h / 2 + dice.variance(spread),
        })
        .collect();

    // Walls first, so no later wall covers an earlier floor.
    for c in &craters {
        canvas.circle_outline(c.x, c.y, c.radius, 1, walls);
    }
    for c in &craters {
        canvas.circle(c.x, c.y, c.radius - 1, floor);
    }
}

fn paint_rough(
    tile: &Tile,
    canvas: &mut dyn Canvas,
    x: i64,
    y: i64,
    w: i64,
    h: i64,
    dice: &mut dyn RandomSource,
) {
    let dark = tile.shifted(0.9);
    let light = tile.shifted(1.1);
    let height = h.abs();
    for yy in 0..height {
        let width = w * (height - yy) / height;
        for xx in -width..width {
            let colour = match dice.roll(3) {
                1 => dark,
                2 => light,
                _ => tile.jittered(dice),
            };
            canvas.set_pixel(x + xx + w, y + h.signum() * yy, colour);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{Dice, ScriptedDice};
    use image::{Rgba, RgbaImage};

    const ROCK: Tile = Tile::new("Rock", 0x808080, false, 0);

    #[test]
    fn test_plain_paints_nothing() {
        let mut image = RgbaImage::new(40, 40);
        Detail::Plain.paint(&ROCK, &mut image, 0, 39, 20, -34, &mut Dice::seeded(1));
        assert!(image.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn test_crater_floor_drawn_after_walls() {
        let mut image = RgbaImage::new(60, 60);
        // One crater, no jitter: centre (30, 30), radius 20 / 4 = 5.
        let mut dice = ScriptedDice::with_fallback(&[1], 1);
        Detail::Cratered.paint(&ROCK, &mut image, 10, 20, 20, 20, &mut dice);
        let floor = ROCK.shifted(0.85);
        let walls = ROCK.shifted(1.1);
        assert_eq!(*image.get_pixel(30, 30), floor);
        assert_eq!(*image.get_pixel(35, 30), walls);
        assert_eq!(*image.get_pixel(34, 30), floor);
        assert_eq!(image.get_pixel(37, 30).0[3], 0);
    }

    #[test]
    fn test_rough_stays_within_triangle() {
        let mut image = RgbaImage::new(40, 40);
        Detail::Rough.paint(&ROCK, &mut image, 0, 0, 10, 17, &mut Dice::seeded(2));
        let allowed = [
            ROCK.shifted(0.9),
            ROCK.shifted(1.1),
            Rgba([0x80, 0x80, 0x80, 0xFF]),
        ];
        for (x, y, p) in image.enumerate_pixels() {
            if p.0[3] > 0 {
                assert!(y < 17 && x < 20, "({x}, {y})");
                assert!(allowed.contains(p));
            }
        }
        assert!(image.get_pixel(10, 0).0[3] > 0);
    }
}
