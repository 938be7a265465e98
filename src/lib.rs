//! Command line driver around `planetgen`: generate one body with its moons,
//! then write a TOML summary and every map its mapper can draw.

pub mod cli;
pub mod output;

use anyhow::{Context, Result};
use cli::Cli;
use log::info;
use planetgen::config::{PlanetGenConfig, get_config};
use planetgen::constants::{MKM, SOL_RADIUS};
use planetgen::dice::Dice;
use planetgen::generator::{GenerationContext, generate_with_moons};
use planetgen::star::Star;
use std::fs;
use std::path::PathBuf;

/// Run one generation and return the paths of every file written.
pub fn run(cli: Cli) -> Result<Vec<PathBuf>> {
    let config = match &cli.config {
        Some(path) => PlanetGenConfig::load_from_file(path)?,
        None => get_config(),
    };
    let mut dice = cli.seed.map(Dice::seeded).unwrap_or_else(Dice::from_entropy);
    info!("Generating {} [{}] with seed {}", cli.body, cli.name, dice.seed());

    let star = Star::new(
        cli.star.to_string(),
        cli.star,
        cli.star_radius.unwrap_or(SOL_RADIUS),
        1.0,
    );
    let mut ctx = GenerationContext::new(&star, cli.distance * MKM);
    let body = generate_with_moons(cli.body, &mut ctx, &cli.name, &mut dice)?;

    fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating output directory {}", cli.out.display()))?;
    let width = cli.width.unwrap_or(config.render.map_width);

    let mut written = vec![output::write_summary(&body, &cli.out)?];
    for target in std::iter::once(&body).chain(&body.moons) {
        written.extend(output::write_maps(target, &config, width, &cli.out, &mut dice)?);
    }
    Ok(written)
}
