use anyhow::{Context, Result};
use pocketboy_gb::GameBoy;

fn run(rom_path: &str) -> Result<()> {
    let rom = std::fs::read(rom_path)
        .with_context(|| format!("failed to read rom '{rom_path}'"))?;

    log::info!("Playing ROM path: '{}'", rom_path);
    let mut gb = GameBoy::from_image(&rom)?;

    // The CPU core has no halt instruction in scope, so `run` only returns
    // when execution cannot continue.
    gb.run()?;
    Ok(())
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rom_path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!(
                "No ROM path provided.\n\
                 Please specify a path, for example:\n\
                 pocketboy path/to/your.gb"
            );
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&rom_path) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
