mod instruction;
mod state;

pub use instruction::Instruction;
pub use state::{
    ChipState, LoadError, Screen, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, SCREEN_HEIGHT,
    SCREEN_SIZE, SCREEN_WIDTH,
};

use log::{trace, warn};
use state::ADDRESS_MASK;
use thiserror::Error;

/// Why an instruction was skipped instead of executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Unsupported {
    #[error("unimplemented instruction {name} ({opcode:#06X})")]
    Unimplemented { name: &'static str, opcode: u16 },

    #[error("unknown opcode {opcode:#06X} ({:X}xxx family)", .opcode >> 12)]
    Unrecognized { opcode: u16 },
}

impl Unsupported {
    pub fn opcode(&self) -> u16 {
        match *self {
            Unsupported::Unimplemented { opcode, .. } | Unsupported::Unrecognized { opcode } => {
                opcode
            }
        }
    }
}

/// Result of a single fetch-decode-execute step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Executed(Instruction),
    /// The word was treated as a 2-byte no-op.
    Unsupported(Unsupported),
}

/// Tally of a `run_cycles` batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub unsupported: usize,
    /// Some instruction in the batch cleared or drew to the screen.
    pub redraw: bool,
}

impl ChipState {
    /// Run exactly one instruction. Never fails and always moves the program counter.
    pub fn run_cycle(&mut self) -> Outcome {
        let address = self.program_counter;
        let opcode = self.fetch();
        let instruction = Instruction::decode(opcode);
        match self.execute(instruction, opcode) {
            Ok(()) => {
                trace!("{:#05X}: {}", address, instruction);
                Outcome::Executed(instruction)
            }
            Err(unsupported) => {
                warn!("{:#05X}: {}", address, unsupported);
                self.advance(2);
                Outcome::Unsupported(unsupported)
            }
        }
    }

    /// Run `n` cycles back to back; unsupported instructions don't stop the batch.
    pub fn run_cycles(&mut self, n: usize) -> RunSummary {
        let mut summary = RunSummary::default();
        for _ in 0..n {
            match self.run_cycle() {
                Outcome::Executed(instruction) => {
                    summary.executed += 1;
                    summary.redraw |= instruction.touches_screen();
                }
                Outcome::Unsupported(_) => summary.unsupported += 1,
            }
        }
        summary
    }

    fn fetch(&self) -> u16 {
        u16::from_be_bytes([
            self.read_byte(self.program_counter),
            self.read_byte(self.program_counter.wrapping_add(1)),
        ])
    }

    fn advance(&mut self, n: u16) {
        self.program_counter = self.program_counter.wrapping_add(n) & ADDRESS_MASK;
    }

    // The program counter still points at the instruction while it executes.
    fn execute(&mut self, instruction: Instruction, opcode: u16) -> Result<(), Unsupported> {
        match instruction {
            Instruction::ClearScreen => {
                self.clear_screen();
                self.advance(2);
            }
            Instruction::Return => {
                return Err(Unsupported::Unimplemented {
                    name: "RET",
                    opcode,
                })
            }
            Instruction::Jump { address } => {
                self.program_counter = address & ADDRESS_MASK;
            }
            Instruction::Call { .. } => {
                return Err(Unsupported::Unimplemented {
                    name: "CALL",
                    opcode,
                })
            }
            Instruction::SkipIfEqual { x, byte } => {
                if self.registers[x as usize] == byte {
                    self.advance(4);
                } else {
                    self.advance(2);
                }
            }
            Instruction::LoadImmediate { x, byte } => {
                self.registers[x as usize] = byte;
                self.advance(2);
            }
            Instruction::AddImmediate { x, byte } => {
                self.registers[x as usize] = self.registers[x as usize].wrapping_add(byte);
                self.advance(2);
            }
            Instruction::LoadIndex { address } => {
                self.index_register = address;
                self.advance(2);
            }
            Instruction::Draw { x, y, height } => {
                self.draw_sprite(x, y, height);
                self.advance(2);
            }
            Instruction::Misc { .. } => {
                return Err(Unsupported::Unimplemented {
                    name: "Fxxx",
                    opcode,
                })
            }
            Instruction::Unknown { .. } => return Err(Unsupported::Unrecognized { opcode }),
        }
        Ok(())
    }

    /// XOR an 8-pixel-wide sprite from memory at I onto the screen at (Vx, Vy).
    ///
    /// Both the start position and every pixel wrap around the screen edges.
    /// VF is left alone: no collision flag is reported.
    fn draw_sprite(&mut self, x: u8, y: u8, height: u8) {
        let x0 = self.registers[x as usize] as usize % SCREEN_WIDTH;
        let y0 = self.registers[y as usize] as usize % SCREEN_HEIGHT;

        for row in 0..height as usize {
            let sprite_byte = self.read_byte(self.index_register.wrapping_add(row as u16));
            let pix_y = (y0 + row) % SCREEN_HEIGHT;
            for col in 0..8 {
                let bit = (sprite_byte >> (7 - col)) & 1;
                let pix_x = (x0 + col) % SCREEN_WIDTH;
                self.screen[pix_y * SCREEN_WIDTH + pix_x] ^= bit;
            }
        }
    }
}
