//! CHIP-8 interpreter core.
//!
//! [`ChipState`] owns the memory, registers and 64x32 framebuffer of one
//! machine and runs instructions on demand:
//!
//! ```
//! use chip8_core::ChipState;
//!
//! let mut chip = ChipState::new();
//! chip.load_program(&[0x60, 0x05]).unwrap();
//! chip.run_cycles(1);
//! assert_eq!(chip.register(0), 5);
//! ```
//!
//! Only a subset of the instruction set is executed. Everything else is
//! reported through [`Outcome::Unsupported`] and the `log` facade, then
//! skipped as a 2-byte no-op.

pub mod config;
pub mod frontend;
pub mod interpreter;

pub use interpreter::{
    ChipState, Instruction, LoadError, Outcome, RunSummary, Screen, Unsupported, SCREEN_HEIGHT,
    SCREEN_WIDTH,
};
