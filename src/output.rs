//! Everything that touches the filesystem: the TOML body summary and PNG
//! maps.

use anyhow::{Context, Result};
use image::RgbaImage;
use log::{info, warn};
use planetgen::body::Body;
use planetgen::canvas::overlay;
use planetgen::config::PlanetGenConfig;
use planetgen::dice::RandomSource;
use planetgen::error::PlanetGenError;
use planetgen::grid::stretch;
use planetgen::mapper::mapper_for;
use std::fs;
use std::path::{Path, PathBuf};

/// File name stem for a body: whitespace runs become underscores.
pub fn file_stem(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

pub fn write_summary(body: &Body, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("{}.toml", file_stem(body.name())));
    let text = toml::to_string_pretty(body)
        .with_context(|| format!("serialising {}", body.name()))?;
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(path)
}

fn save(image: &RgbaImage, path: PathBuf) -> Result<PathBuf> {
    image
        .save(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(path)
}

/// Generate the body's surface and write every map its mapper offers.
/// Bodies without a mapper are skipped with a warning.
pub fn write_maps(
    body: &Body,
    config: &PlanetGenConfig,
    width: u32,
    dir: &Path,
    dice: &mut dyn RandomSource,
) -> Result<Vec<PathBuf>> {
    let mut mapper = match mapper_for(body, config) {
        Ok(mapper) => mapper,
        Err(PlanetGenError::Unsupported(reason)) => {
            warn!("No maps for {}: {reason}", body.name());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    mapper.generate(dice)?;

    let caps = mapper.capabilities();
    let stem = file_stem(body.name());
    let mut written = Vec::new();

    let main = if caps.main {
        let image = mapper.draw(width, dice)?;
        written.push(save(&image, dir.join(format!("{stem}_main.png")))?);
        Some(image)
    } else {
        None
    };

    if caps.height || caps.deform {
        let kind = if caps.deform { "deform" } else { "height" };
        let image = mapper.draw_height_map(width, dice)?;
        written.push(save(&image, dir.join(format!("{stem}_{kind}.png")))?);
    }

    if caps.clouds {
        let layers = mapper.draw_clouds(width, dice)?;
        for (i, layer) in layers.iter().enumerate() {
            written.push(save(layer, dir.join(format!("{stem}_cloud{i}.png")))?);
        }
        // Surface texture with every cloud layer laid over it.
        if let Some(main) = &main {
            let mut clouded = stretch(main, width);
            for layer in &layers {
                overlay(&mut clouded, layer);
            }
            written.push(save(&clouded, dir.join(format!("{stem}_clouded.png")))?);
        }
    }

    if caps.orbit {
        let size = config.render.orbit_image_size.max(2);
        let centre = (size / 2) as i64;
        let km_per_pixel = ((body.distance() + body.radius()) / centre).max(1);
        let mut image = RgbaImage::new(size, size);
        mapper.draw_orbit(&mut image, centre, centre, km_per_pixel, dice)?;
        written.push(save(&image, dir.join(format!("{stem}_orbit.png")))?);
    }
    Ok(written)
}
