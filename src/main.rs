use anyhow::Context;
use clap::Parser;
use log::info;

use chip8_core::config::Config;
use chip8_core::frontend::Frontend;
use chip8_core::ChipState;

#[allow(unreachable_code)]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::parse();
    let mut chip8_vm = ChipState::new();
    chip8_vm
        .load_file(&config.rom)
        .with_context(|| format!("loading {}", config.rom.display()))?;
    info!(
        "running {} at {} instructions/s, {} cycles per frame",
        config.rom.display(),
        config.ips,
        config.cycles_per_step()
    );

    chip8_base::run(Frontend::new(chip8_vm, &config));
    Ok(())
}
