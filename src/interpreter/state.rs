use std::path::Path;

use log::debug;
use thiserror::Error;

pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Mask applied to every address the engine reads: the CHIP-8 address space is 12 bits wide.
pub(crate) const ADDRESS_MASK: u16 = 0x0FFF;

pub type Screen = [u8; SCREEN_SIZE];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("write of {len} bytes at {address:#05X} runs past the end of memory")]
    OutOfBounds { address: u16, len: usize },

    #[error("failed to read ROM")]
    Io(#[from] std::io::Error),
}

/// Registers, memory and framebuffer of one CHIP-8 machine.
///
/// Instances are independent; the engine half lives in the parent module.
#[derive(Clone, Debug)]
pub struct ChipState {
    pub(crate) memory: [u8; MEMORY_SIZE],
    pub(crate) registers: [u8; 16],
    pub(crate) index_register: u16,
    pub(crate) program_counter: u16,
    pub(crate) screen: Screen,
}

impl Default for ChipState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChipState {
    pub fn new() -> Self {
        ChipState {
            memory: [0; MEMORY_SIZE],
            registers: [0; 16],
            index_register: 0,
            program_counter: PROGRAM_START,
            screen: [0; SCREEN_SIZE],
        }
    }

    /// Zero registers, index, framebuffer and program memory; pc back to 0x200.
    pub fn reset(&mut self) {
        self.registers = [0; 16];
        self.index_register = 0;
        self.program_counter = PROGRAM_START;
        self.memory[PROGRAM_START as usize..].fill(0);
        self.clear_screen();
        debug!("machine reset");
    }

    /// Reset the machine and copy a raw ROM image to 0x200.
    ///
    /// Images that don't fit between 0x200 and the end of memory are rejected
    /// and the current state is kept.
    pub fn load_program(&mut self, program: &[u8]) -> Result<&mut Self, LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::RomTooLarge {
                size: program.len(),
                max_size: MAX_PROGRAM_SIZE,
            });
        }
        self.reset();
        let start = PROGRAM_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        debug!("loaded {} byte program at {:#05X}", program.len(), PROGRAM_START);
        Ok(self)
    }

    pub fn load_file(&mut self, filename: impl AsRef<Path>) -> Result<&mut Self, LoadError> {
        let program = std::fs::read(filename)?;
        self.load_program(&program)
    }

    /// Copy bytes anywhere into memory, e.g. to preload sprite data.
    pub fn write_memory(&mut self, address: u16, bytes: &[u8]) -> Result<(), LoadError> {
        let start = address as usize;
        let end = start + bytes.len();
        if end > MEMORY_SIZE {
            return Err(LoadError::OutOfBounds {
                address,
                len: bytes.len(),
            });
        }
        self.memory[start..end].copy_from_slice(bytes);
        Ok(())
    }

    pub fn clear_screen(&mut self) {
        self.screen = [0; SCREEN_SIZE];
    }

    /// Row-major view of the display, one byte (0 or 1) per pixel.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_width(&self) -> usize {
        SCREEN_WIDTH
    }

    pub fn screen_height(&self) -> usize {
        SCREEN_HEIGHT
    }

    /// Pixel at (x, y), or `None` when the coordinate is off-screen.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return None;
        }
        Some(self.screen[y * SCREEN_WIDTH + x])
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.registers
    }

    pub fn register(&self, x: u8) -> u8 {
        self.registers[(x & 0xF) as usize]
    }

    pub fn index_register(&self) -> u16 {
        self.index_register
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn memory(&self) -> &[u8; MEMORY_SIZE] {
        &self.memory
    }

    pub(crate) fn read_byte(&self, address: u16) -> u8 {
        self.memory[(address & ADDRESS_MASK) as usize]
    }
}
