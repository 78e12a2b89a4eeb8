//! Adapter that lets `chip8_base` drive the interpreter core.
//!
//! `chip8_base` owns the window, keypad and pacing; every step here runs a
//! batch of core cycles and hands back a converted frame when the batch drew.

use std::time::Duration;

use chip8_base::{Display, Interpreter, Keys, Pixel};
use log::debug;

use crate::config::Config;
use crate::interpreter::{ChipState, Screen, SCREEN_WIDTH};

pub struct Frontend {
    chip: ChipState,
    cycles_per_step: usize,
    step_interval: Duration,
    unsupported: usize,
}

impl Frontend {
    pub fn new(chip: ChipState, config: &Config) -> Self {
        Frontend {
            chip,
            cycles_per_step: config.cycles_per_step(),
            step_interval: config.step_interval(),
            unsupported: 0,
        }
    }

    pub fn chip(&self) -> &ChipState {
        &self.chip
    }

    /// Unsupported instructions skipped since the frontend started.
    pub fn unsupported_count(&self) -> usize {
        self.unsupported
    }
}

/// Map the core's 0/1 framebuffer onto `chip8_base` pixels.
pub fn to_display(screen: &Screen) -> Display {
    let mut display: Display = [[Pixel::default(); 64]; 32];
    for (i, &value) in screen.iter().enumerate() {
        display[i / SCREEN_WIDTH][i % SCREEN_WIDTH] = Pixel::try_from(value).unwrap_or_default();
    }
    display
}

impl Interpreter for Frontend {
    // The core has no keypad instructions, so key state is ignored.
    fn step(&mut self, _keys: &Keys) -> Option<Display> {
        let summary = self.chip.run_cycles(self.cycles_per_step);
        if summary.unsupported > 0 {
            self.unsupported += summary.unsupported;
            debug!(
                "{} unsupported instructions this step ({} total)",
                summary.unsupported, self.unsupported
            );
        }
        summary.redraw.then(|| to_display(self.chip.screen()))
    }

    fn speed(&self) -> Duration {
        self.step_interval
    }

    // No sound timer in the core.
    fn buzzer_active(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frontend_with(program: &[u8], ips: u32) -> Frontend {
        let mut chip = ChipState::new();
        chip.load_program(program).unwrap();
        Frontend::new(chip, &Config::new("test.ch8", ips, 60))
    }

    #[test]
    fn test_step_runs_configured_cycles() {
        // LD V0 1; ADD V0 1 (x3)
        let mut frontend =
            frontend_with(&[0x60, 0x01, 0x70, 0x01, 0x70, 0x01, 0x70, 0x01], 240);
        assert!(frontend.step(&[false; 16]).is_none());
        assert_eq!(frontend.chip().register(0), 4);
        assert_eq!(frontend.chip().program_counter(), 0x208);
    }

    #[test]
    fn test_step_returns_frame_after_draw() {
        let mut frontend = frontend_with(&[0xA2, 0x04, 0xD0, 0x01, 0x80, 0x00], 120);
        let display = frontend.step(&[false; 16]).unwrap();
        let lit = |p: Pixel| -> bool { p.into() };
        assert!(lit(display[0][0]));
        assert!((1..64).all(|x| !lit(display[0][x])));
        assert!(display[1..].iter().flatten().all(|&p| !lit(p)));
    }

    #[test]
    fn test_step_counts_unsupported() {
        let mut frontend = frontend_with(&[0x22, 0x00, 0xF0, 0x0A], 120);
        frontend.step(&[false; 16]);
        assert_eq!(frontend.unsupported_count(), 2);
        assert!(!frontend.buzzer_active());
    }

    #[test]
    fn test_blank_screen_maps_to_default_pixels() {
        let display = to_display(&[0; 64 * 32]);
        assert!(display.iter().flatten().all(|&p| {
            let lit: bool = p.into();
            !lit
        }));
    }
}
