//! Map tiles: a named colour with a little per-pixel noise.

use crate::detail::Detail;
use crate::dice::RandomSource;
use image::Rgba;
use std::borrow::Cow;

/// A surface tile. Two tiles are equal when their names match, so a shaded
/// or jittered variant still counts as the same terrain for flooding.
#[derive(Debug, Clone)]
pub struct Tile {
    name: Cow<'static, str>,
    rgb: [u8; 3],
    is_water: bool,
    /// Size of the ± jitter applied to each channel when drawn.
    variance: i64,
    opacity: u8,
    detail: Detail,
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Tile {}

/// Clamp a colour channel into 1..=254 so nothing is ever pure black or white.
fn channel(value: i64) -> u8 {
    value.clamp(1, 254) as u8
}

const fn split_rgb(hex: u32) -> [u8; 3] {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
}

impl Tile {
    pub const fn new(name: &'static str, rgb: u32, is_water: bool, variance: i64) -> Self {
        Self {
            name: Cow::Borrowed(name),
            rgb: split_rgb(rgb),
            is_water,
            variance,
            opacity: 0xFF,
            detail: Detail::Plain,
        }
    }

    /// Flat grey tile named `G<level>`, used for height maps.
    pub fn grey(level: i32) -> Self {
        let c = channel(level as i64);
        Self {
            name: Cow::Owned(format!("G{level}")),
            rgb: [c, c, c],
            is_water: false,
            variance: 0,
            opacity: 0xFF,
            detail: Detail::Plain,
        }
    }

    /// Partly transparent tile, used for cloud layers.
    pub fn transparent(rgb: u32, opacity: i32) -> Self {
        Self {
            name: Cow::Borrowed("T"),
            rgb: split_rgb(rgb),
            is_water: false,
            variance: 2,
            opacity: opacity.clamp(0, 255) as u8,
            detail: Detail::Plain,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    pub fn is_water(&self) -> bool {
        self.is_water
    }

    pub fn variance(&self) -> i64 {
        self.variance
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    pub fn detail(&self) -> Detail {
        self.detail
    }

    fn with_rgb(&self, rgb: [i64; 3]) -> Self {
        Self {
            rgb: rgb.map(channel),
            ..self.clone()
        }
    }

    fn channels(&self) -> [i64; 3] {
        self.rgb.map(i64::from)
    }

    /// Same tile scaled to `percent` of its brightness.
    pub fn shaded(&self, percent: i32) -> Self {
        let pct = percent as i64;
        self.with_rgb(self.channels().map(|c| c * pct / 100))
    }

    /// Same tile with `delta` added to every channel.
    pub fn variant(&self, delta: i64) -> Self {
        self.with_rgb(self.channels().map(|c| c + delta))
    }

    /// Average of both colours, keeping this tile's name.
    pub fn mix(&self, other: &Tile) -> Self {
        let a = self.channels();
        let b = other.channels();
        self.with_rgb([0, 1, 2].map(|i| (a[i] + b[i]) / 2))
    }

    /// Base colour multiplied by `factor`, without jitter.
    pub fn shifted(&self, factor: f64) -> Rgba<u8> {
        let [r, g, b] = self.rgb.map(|c| channel((c as f64 * factor) as i64));
        Rgba([r, g, b, self.opacity])
    }

    /// Colour to paint with, each channel moved by up to ± variance.
    pub fn jittered(&self, dice: &mut dyn RandomSource) -> Rgba<u8> {
        let var = self.variance;
        let [r, g, b] = self.channels().map(|c| {
            if var > 0 {
                channel(c + dice.variance(var))
            } else {
                channel(c)
            }
        });
        Rgba([r, g, b, self.opacity])
    }

    pub fn with_detail(&self, detail: Detail) -> Self {
        Self {
            detail,
            ..self.clone()
        }
    }

    pub fn cratered(&self) -> Self {
        self.with_detail(Detail::Cratered)
    }

    pub fn rough(&self) -> Self {
        self.with_detail(Detail::Rough)
    }
}
