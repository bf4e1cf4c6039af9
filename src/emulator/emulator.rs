//! The CHIP-8 virtual machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use crate::emulator::decode::Opcode;
use crate::emulator::display::{Framebuffer, Snapshot};
use crate::emulator::error::{Error, Result};
use crate::emulator::instruction::*;
use crate::emulator::keypad::Keypad;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::ops::Range;

pub const MEM_SIZE: usize = 4096;
pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const PC_START: u16 = 0x200;
const FLAG: usize = 0xF;
const GLYPH_SIZE: u16 = 5;
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

pub struct Emulator {
    // Standard fields
    memory: [u8; MEM_SIZE],
    registers: [u8; NUM_REGISTERS],
    delay_timer: u8,
    sound_timer: u8,
    i: u16,
    program_counter: u16,
    stack_pointer: u8,
    stack: [u16; STACK_SIZE],

    keypad: Keypad,
    screen: Framebuffer,
    seed: Option<u64>,
    rng: StdRng,
}

impl fmt::Display for Emulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.screen)
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Emulator {

    /// Create a new emulator with a randomly seeded `RND` source
    pub fn new() -> Emulator {
        Self::with_rng(None, StdRng::from_entropy())
    }

    /// Create a new emulator whose `RND` instruction is reproducible
    pub fn with_seed(seed: u64) -> Emulator {
        Self::with_rng(Some(seed), StdRng::seed_from_u64(seed))
    }

    fn with_rng(seed: Option<u64>, rng: StdRng) -> Emulator {
        let mut emulator = Emulator {
            memory: [0; MEM_SIZE],
            registers: [0; NUM_REGISTERS],
            delay_timer: 0,
            sound_timer: 0,
            i: 0,
            program_counter: PC_START,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],

            keypad: Keypad::new(),
            screen: Framebuffer::new(),
            seed,
            rng,
        };
        emulator.power_on();
        emulator
    }

    fn power_on(&mut self) {
        self.memory = [0; MEM_SIZE];
        self.memory[..FONT.len()].copy_from_slice(&FONT);
        self.registers = [0; NUM_REGISTERS];
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.i = 0;
        self.program_counter = PC_START;
        self.stack_pointer = 0;
        self.stack = [0; STACK_SIZE];
        self.keypad.release_all();
        self.screen.clear();

        // A seeded machine replays the same random stream after every reset
        if let Some(seed) = self.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
    }

    /// Return to the power-on state. The loaded program is discarded.
    pub fn reset(&mut self) {
        log::debug!("Reset");
        self.power_on();
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        let start = PC_START as usize;
        let max = MEM_SIZE - start;
        if program.len() > max {
            return Err(Error::LoadTooLarge { size: program.len(), max });
        }

        self.memory[start..start + program.len()].copy_from_slice(program);
        log::debug!("Loaded {} bytes at {:#05X}", program.len(), start);
        Ok(())
    }

    /// Perform a single step: fetch the instruction at the program counter,
    /// decode it and execute it.
    ///
    /// On error the machine is left as it was before the step.
    pub fn step(&mut self) -> Result<()> {
        let address = self.program_counter;

        // Each opcode is two bytes
        let bytes = &self.memory[self.range(address, 2)?];
        let (high, low) = (bytes[0], bytes[1]);

        let instruction = match Instruction::from_two_u8(high, low) {
            Some(instruction) => instruction,
            None => {
                let Opcode(opcode) = Opcode::from_bytes(high, low);
                log::error!("Unimplemented opcode {:#06X} at {:#05X}", opcode, address);
                return Err(Error::UnimplementedOpcode { opcode, address });
            }
        };

        log::trace!("{:#05X}: {:?}", address, instruction);

        self.program_counter = address + 2;
        if let Err(error) = self.execute(instruction) {
            self.program_counter = address;
            return Err(error);
        }

        Ok(())
    }

    /// Decrement the delay and sound timers. Meant to be called at 60 Hz,
    /// independently of `step`.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);

        if self.sound_timer > 0 {
            self.sound_timer -= 1;
            if self.sound_timer == 0 {
                log::debug!("Sound timer expired");
            }
        }
    }

    /// Press or release one of the 16 keys.
    pub fn key_event(&mut self, key: u8, pressed: bool) -> Result<()> {
        if self.keypad.set(key, pressed) {
            Ok(())
        } else {
            Err(Error::InvalidKey { index: key })
        }
    }

    /// A copy of the screen, row-major.
    pub fn snapshot(&self) -> Snapshot {
        self.screen.snapshot()
    }

    pub fn screen(&self) -> &Framebuffer {
        &self.screen
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.screen.get(x, y)
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    /// Whether the host should be making a sound.
    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    pub fn stack_pointer(&self) -> u8 {
        self.stack_pointer
    }

    /// The return addresses currently on the stack, oldest first.
    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.stack_pointer as usize]
    }

    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn is_key_down(&self, key: u8) -> bool {
        self.keypad.is_down(key)
    }

    /// Execute several instructions in order, stopping at the first error.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<()> {
        instructions
            .iter()
            .try_for_each(|&instruction| self.execute(instruction))
    }

    /// Execute a single instruction, as if the program counter had just
    /// been advanced past it.
    ///
    /// Every check happens before any state is touched, so a failing
    /// instruction has no effect.
    pub fn execute(&mut self, instruction: Instruction) -> Result<()> {
        match instruction {

            Instruction::Nop => {}

            // Clear the screen
            Instruction::ClearScreen => {
                self.screen.clear();
            }

            // Return to the previous call site via the stack.
            Instruction::Return => {
                if self.stack_pointer == 0 {
                    return Err(Error::StackUnderflow { address: self.current_address() });
                }
                self.stack_pointer -= 1;
                self.program_counter = self.stack[self.stack_pointer as usize]; // Jump back via stack
            }

            // Go to a specific memory address
            Instruction::Jump(Addr(addr)) => {
                self.program_counter = addr;
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                if self.stack_pointer as usize == STACK_SIZE {
                    return Err(Error::StackOverflow { address: self.current_address() });
                }
                self.stack[self.stack_pointer as usize] = self.program_counter; // Store return address
                self.stack_pointer += 1;
                self.program_counter = addr;
            }

            Instruction::SkipIfEqConst(Reg(x), Const(n)) => {
                self.skip_if(self.registers[x as usize] == n);
            }

            Instruction::SkipIfNeqConst(Reg(x), Const(n)) => {
                self.skip_if(self.registers[x as usize] != n);
            }

            Instruction::SkipIfEqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.registers[x as usize] == self.registers[y as usize]);
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = n;
            }

            // No carry flag for immediates
            Instruction::AddConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = self.registers[x as usize].wrapping_add(n);
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.registers[x as usize] = self.registers[y as usize];
            }

            Instruction::Or(Reg(x), Reg(y)) => {
                self.registers[x as usize] |= self.registers[y as usize];
            }

            Instruction::And(Reg(x), Reg(y)) => {
                self.registers[x as usize] &= self.registers[y as usize];
            }

            Instruction::Xor(Reg(x), Reg(y)) => {
                self.registers[x as usize] ^= self.registers[y as usize];
            }

            // The flag is written after the result, so `VF` always ends up 0 or 1.
            Instruction::AddReg(Reg(x), Reg(y)) => {
                let (sum, carry) = self.registers[x as usize].overflowing_add(self.registers[y as usize]);
                self.set_with_flag(x, sum, carry);
            }

            // VF is 1 when there is no borrow
            Instruction::SubReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.registers[x as usize], self.registers[y as usize]);
                self.set_with_flag(x, vx.wrapping_sub(vy), vx >= vy);
            }

            Instruction::ShiftRight(Reg(x)) => {
                let vx = self.registers[x as usize];
                self.set_with_flag(x, vx >> 1, vx & 1 == 1);
            }

            Instruction::SubRegReversed(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.registers[x as usize], self.registers[y as usize]);
                self.set_with_flag(x, vy.wrapping_sub(vx), vy >= vx);
            }

            Instruction::ShiftLeft(Reg(x)) => {
                let vx = self.registers[x as usize];
                self.set_with_flag(x, vx << 1, vx >> 7 & 1 == 1);
            }

            Instruction::SkipIfNeqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.registers[x as usize] != self.registers[y as usize]);
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
            }

            Instruction::JumpWithV0(Addr(addr)) => {
                self.program_counter = u16::from(self.registers[0]) + addr;
            }

            Instruction::Random(Reg(x), Const(n)) => {
                self.registers[x as usize] = self.rng.gen::<u8>() & n;
            }

            // XOR an 8xN sprite from memory at I onto the screen, wrapping at the edges.
            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {

                // Get coordinates
                let x_coord = self.registers[x as usize] as usize;
                let y_coord = self.registers[y as usize] as usize;

                // Get sprite, each row is 8 bits
                let sprite = self.range(self.i, sprite_height as usize)?;

                let mut any_collisions = false;
                for (row, &bits) in self.memory[sprite].iter().enumerate() {
                    any_collisions |= self.screen.draw_row(x_coord, y_coord + row, bits);
                }

                // Set VF collision flag
                self.registers[FLAG] = any_collisions as u8;
            }

            Instruction::SkipIfKeyDown(Reg(x)) => {
                self.skip_if(self.keypad.is_down(self.registers[x as usize]));
            }

            Instruction::SkipIfKeyUp(Reg(x)) => {
                self.skip_if(!self.keypad.is_down(self.registers[x as usize]));
            }

            Instruction::GetDelayTimer(Reg(x)) => {
                self.registers[x as usize] = self.delay_timer;
            }

            // Wait for a key press by running this instruction again until one arrives.
            Instruction::WaitForKey(Reg(x)) => {
                match self.keypad.first_down() {
                    Some(key) => self.registers[x as usize] = key,
                    None => self.program_counter = self.program_counter.wrapping_sub(2),
                }
            }

            Instruction::SetDelayTimer(Reg(x)) => {
                self.delay_timer = self.registers[x as usize];
            }

            Instruction::SetSoundTimer(Reg(x)) => {
                self.sound_timer = self.registers[x as usize];
            }

            Instruction::AddToI(Reg(x)) => {
                self.i = self.i.wrapping_add(u16::from(self.registers[x as usize]));
            }

            // Set i to character address. Each font element is 5 bytes wide.
            Instruction::SetIToFont(Reg(x)) => {
                self.i = (u16::from(self.registers[x as usize]) * GLYPH_SIZE) % FONT.len() as u16;
            }

            Instruction::StoreBcd(Reg(x)) => {
                let digits = self.writable_range(self.i, 3)?;
                let value = self.registers[x as usize];
                self.memory[digits].copy_from_slice(&[value / 100, value / 10 % 10, value % 10]);
            }

            // Dump register values up to Vx
            Instruction::StoreRegisters(Reg(x)) => {
                let count = x as usize + 1;
                let block = self.writable_range(self.i, count)?;
                self.memory[block].copy_from_slice(&self.registers[..count]);
            }

            // Load register values up to Vx
            Instruction::LoadRegisters(Reg(x)) => {
                let count = x as usize + 1;
                let block = self.range(self.i, count)?;
                self.registers[..count].copy_from_slice(&self.memory[block]);
            }
        };

        Ok(())
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter = self.program_counter.wrapping_add(2);
        }
    }

    fn set_with_flag(&mut self, x: u8, value: u8, flag: bool) {
        self.registers[x as usize] = value;
        self.registers[FLAG] = flag as u8;
    }

    /// The address of the instruction being executed.
    fn current_address(&self) -> u16 {
        self.program_counter.wrapping_sub(2)
    }

    fn range(&self, address: u16, len: usize) -> Result<Range<usize>> {
        let start = address as usize;
        let end = start + len;
        if end > MEM_SIZE {
            return Err(Error::MemoryOutOfBounds { address });
        }
        Ok(start..end)
    }

    /// Like `range`, but the font table at the bottom of memory is off limits.
    fn writable_range(&self, address: u16, len: usize) -> Result<Range<usize>> {
        if (address as usize) < FONT.len() {
            return Err(Error::MemoryOutOfBounds { address });
        }
        self.range(address, len)
    }
}
