use clap::Parser;
use worldgen::cli::Cli;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let written = worldgen::run(Cli::parse())?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
