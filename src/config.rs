use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_INSTRUCTIONS_PER_SECOND: u32 = 700;
pub const DEFAULT_FRAME_RATE: u32 = 60;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Run a CHIP-8 ROM", long_about = None)]
pub struct Config {
    /// Path to the raw ROM image
    pub rom: PathBuf,

    /// Instructions executed per second
    #[arg(short, long, default_value_t = DEFAULT_INSTRUCTIONS_PER_SECOND, value_parser = clap::value_parser!(u32).range(1..))]
    pub ips: u32,

    /// Host steps (screen refreshes) per second
    #[arg(short, long, default_value_t = DEFAULT_FRAME_RATE, value_parser = clap::value_parser!(u32).range(1..))]
    pub frame_rate: u32,
}

impl Config {
    pub fn new(rom: impl Into<PathBuf>, ips: u32, frame_rate: u32) -> Self {
        Config {
            rom: rom.into(),
            ips,
            frame_rate,
        }
    }

    /// Interpreter cycles to run on every host step, never less than one.
    pub fn cycles_per_step(&self) -> usize {
        ((self.ips as f64 / self.frame_rate.max(1) as f64).round() as usize).max(1)
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_secs_f64(1_f64 / self.frame_rate.max(1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["chip8", "roms/ibm.ch8"]).unwrap();
        assert_eq!(config.rom, PathBuf::from("roms/ibm.ch8"));
        assert_eq!(config.ips, 700);
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.cycles_per_step(), 12);
    }

    #[test]
    fn test_flags() {
        let config =
            Config::try_parse_from(["chip8", "--ips", "1000", "-f", "50", "game.ch8"]).unwrap();
        assert_eq!(config.ips, 1000);
        assert_eq!(config.frame_rate, 50);
        assert_eq!(config.cycles_per_step(), 20);
        assert_eq!(config.step_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_slow_clock_runs_at_least_one_cycle() {
        assert_eq!(Config::new("x.ch8", 10, 60).cycles_per_step(), 1);
    }

    #[test]
    fn test_rejects_zero_rates() {
        assert!(Config::try_parse_from(["chip8", "--ips", "0", "x.ch8"]).is_err());
        assert!(Config::try_parse_from(["chip8", "--frame-rate", "0", "x.ch8"]).is_err());
    }

    #[test]
    fn test_rom_is_required() {
        assert!(Config::try_parse_from(["chip8"]).is_err());
    }
}
