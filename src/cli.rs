use clap::Parser;
use planetgen::body::BodyType;
use planetgen::star::SpectralType;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "worldgen")]
#[command(about = "Generate a celestial body and draw its surface maps")]
pub struct Cli {
    /// Body type to generate, e.g. EoGaian, Hermian or AsteroidBelt.
    #[arg(long)]
    pub body: BodyType,

    /// Orbital distance from the star, in millions of km.
    #[arg(long, default_value_t = 150)]
    pub distance: i64,

    /// Spectral type of the star, e.g. G2 or M5.
    #[arg(long, default_value = "G2")]
    pub star: SpectralType,

    /// Star radius in km. Defaults to the Sun's.
    #[arg(long)]
    pub star_radius: Option<i64>,

    /// Seed for a reproducible body. A random one is logged when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Width of the surface maps in pixels. Defaults to the configured width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Directory the maps and the body summary are written to.
    #[arg(long, default_value = "out")]
    pub out: PathBuf,

    /// TOML configuration file to use instead of planetgen_config.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "Unnamed")]
    pub name: String,
}
