use std::fmt;

/// A decoded instruction word.
///
/// Decoding never fails: words outside the known families become
/// [`Instruction::Unknown`] and the engine treats them as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0 CLS
    ClearScreen,
    /// 00EE RET
    Return,
    /// 1nnn JP addr
    Jump { address: u16 },
    /// 2nnn CALL addr
    Call { address: u16 },
    /// 3xkk SE Vx, byte
    SkipIfEqual { x: u8, byte: u8 },
    /// 6xkk LD Vx, byte
    LoadImmediate { x: u8, byte: u8 },
    /// 7xkk ADD Vx, byte
    AddImmediate { x: u8, byte: u8 },
    /// Annn LD I, addr
    LoadIndex { address: u16 },
    /// Dxyn DRW Vx, Vy, nibble
    Draw { x: u8, y: u8, height: u8 },
    /// Any Fxxx: timers, keypad, BCD and register spill/fill.
    Misc { opcode: u16 },
    Unknown { opcode: u16 },
}

// Break u16 instruction into 4 u8 nibbles
fn nibbles(n: u16) -> (u8, u8, u8, u8) {
    let n3 = (n >> 12) as u8;
    let n2 = ((n >> 8) & 0b1111) as u8;
    let n1 = ((n >> 4) & 0b1111) as u8;
    let n0 = (n & 0b1111) as u8;
    (n3, n2, n1, n0)
}

impl Instruction {
    pub fn decode(opcode: u16) -> Self {
        let address = opcode & 0x0FFF;
        let byte = (opcode & 0x00FF) as u8;
        match nibbles(opcode) {
            (0x0, 0x0, 0xE, 0x0) => Instruction::ClearScreen,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x1, ..) => Instruction::Jump { address },
            (0x2, ..) => Instruction::Call { address },
            (0x3, x, ..) => Instruction::SkipIfEqual { x, byte },
            (0x6, x, ..) => Instruction::LoadImmediate { x, byte },
            (0x7, x, ..) => Instruction::AddImmediate { x, byte },
            (0xA, ..) => Instruction::LoadIndex { address },
            (0xD, x, y, height) => Instruction::Draw { x, y, height },
            (0xF, ..) => Instruction::Misc { opcode },
            _ => Instruction::Unknown { opcode },
        }
    }

    /// Whether executing this instruction can change the framebuffer.
    pub fn touches_screen(&self) -> bool {
        matches!(self, Instruction::ClearScreen | Instruction::Draw { .. })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::ClearScreen => write!(f, "CLS"),
            Instruction::Return => write!(f, "RET"),
            Instruction::Jump { address } => write!(f, "JP {:#05X}", address),
            Instruction::Call { address } => write!(f, "CALL {:#05X}", address),
            Instruction::SkipIfEqual { x, byte } => write!(f, "SE V{:X}, {:#04X}", x, byte),
            Instruction::LoadImmediate { x, byte } => write!(f, "LD V{:X}, {:#04X}", x, byte),
            Instruction::AddImmediate { x, byte } => write!(f, "ADD V{:X}, {:#04X}", x, byte),
            Instruction::LoadIndex { address } => write!(f, "LD I, {:#05X}", address),
            Instruction::Draw { x, y, height } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, height),
            Instruction::Misc { opcode } | Instruction::Unknown { opcode } => {
                write!(f, "DW {:#06X}", opcode)
            }
        }
    }
}
