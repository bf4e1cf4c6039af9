use crate::emulator::decode::Opcode;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Nop, // 0000
    ClearScreen, // 00E0
    Return, // 00EE
    Jump(Addr), // 1NNN
    Call(Addr), // 2NNN
    SkipIfEqConst(Reg, Const), // 3XNN
    SkipIfNeqConst(Reg, Const), // 4XNN
    SkipIfEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    AddConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    Or(Reg, Reg), // 8XY1
    And(Reg, Reg), // 8XY2
    Xor(Reg, Reg), // 8XY3
    AddReg(Reg, Reg), // 8XY4
    SubReg(Reg, Reg), // 8XY5
    ShiftRight(Reg), // 8XY6
    SubRegReversed(Reg, Reg), // 8XY7
    ShiftLeft(Reg), // 8XYE
    SkipIfNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    JumpWithV0(Addr), // BNNN
    Random(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    SkipIfKeyDown(Reg), // EX9E
    SkipIfKeyUp(Reg), // EXA1
    GetDelayTimer(Reg), // FX07
    WaitForKey(Reg), // FX0A
    SetDelayTimer(Reg), // FX15
    SetSoundTimer(Reg), // FX18
    AddToI(Reg), // FX1E
    SetIToFont(Reg), // FX29
    StoreBcd(Reg), // FX33
    StoreRegisters(Reg), // FX55
    LoadRegisters(Reg), // FX65
}

impl Instruction {

    /// Decode a raw instruction word.
    ///
    /// The word is masked according to its family and the masked value is
    /// looked up among the 35 known opcodes. Anything else, including
    /// `0NNN` machine routines other than the null word, yields `None`.
    pub fn decode(word: u16) -> Option<Instruction> {
        Self::from_opcode(Opcode(word))
    }

    pub fn from_two_u8(high: u8, low: u8) -> Option<Instruction> {
        Self::from_opcode(Opcode::from_bytes(high, low))
    }

    fn from_opcode(opcode: Opcode) -> Option<Instruction> {
        let x = Reg(opcode.x());
        let y = Reg(opcode.y());
        let nn = Const(opcode.nn());
        let nnn = Addr(opcode.nnn());

        let instruction = match opcode.masked() {
            0x0000 => Instruction::Nop,
            0x00E0 => Instruction::ClearScreen,
            0x00EE => Instruction::Return,
            0x1000 => Instruction::Jump(nnn),
            0x2000 => Instruction::Call(nnn),
            0x3000 => Instruction::SkipIfEqConst(x, nn),
            0x4000 => Instruction::SkipIfNeqConst(x, nn),
            0x5000 => Instruction::SkipIfEqReg(x, y),
            0x6000 => Instruction::SetRegToConst(x, nn),
            0x7000 => Instruction::AddConst(x, nn),
            0x8000 => Instruction::SetRegToReg(x, y),
            0x8001 => Instruction::Or(x, y),
            0x8002 => Instruction::And(x, y),
            0x8003 => Instruction::Xor(x, y),
            0x8004 => Instruction::AddReg(x, y),
            0x8005 => Instruction::SubReg(x, y),
            0x8006 => Instruction::ShiftRight(x),
            0x8007 => Instruction::SubRegReversed(x, y),
            0x800E => Instruction::ShiftLeft(x),
            0x9000 => Instruction::SkipIfNeqReg(x, y),
            0xA000 => Instruction::SetI(nnn),
            0xB000 => Instruction::JumpWithV0(nnn),
            0xC000 => Instruction::Random(x, nn),
            0xD000 => Instruction::Draw(x, y, Const(opcode.n())),
            0xE09E => Instruction::SkipIfKeyDown(x),
            0xE0A1 => Instruction::SkipIfKeyUp(x),
            0xF007 => Instruction::GetDelayTimer(x),
            0xF00A => Instruction::WaitForKey(x),
            0xF015 => Instruction::SetDelayTimer(x),
            0xF018 => Instruction::SetSoundTimer(x),
            0xF01E => Instruction::AddToI(x),
            0xF029 => Instruction::SetIToFont(x),
            0xF033 => Instruction::StoreBcd(x),
            0xF055 => Instruction::StoreRegisters(x),
            0xF065 => Instruction::LoadRegisters(x),
            _ => return None,
        };

        Some(instruction)
    }
}
