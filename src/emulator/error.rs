/// Everything that can stop the emulator.
///
/// None of these are retried: execution is deterministic, so the host
/// decides whether to reset or give up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Unimplemented opcode {opcode:#06X} at {address:#05X}")]
    UnimplementedOpcode { opcode: u16, address: u16 },

    /// `address` is where the offending access starts: the program counter
    /// for a fetch, I for sprite and register block accesses.
    #[error("Memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: u16 },

    #[error("Stack overflow: call at {address:#05X} exceeds 16 nested levels")]
    StackOverflow { address: u16 },

    #[error("Stack underflow: return at {address:#05X} with an empty call stack")]
    StackUnderflow { address: u16 },

    #[error("Program is too large ({size} bytes), max size is {max} bytes")]
    LoadTooLarge { size: usize, max: usize },

    #[error("Key index {index:#X} is outside 0x0..=0xF")]
    InvalidKey { index: u8 },
}

pub type Result<T> = std::result::Result<T, Error>;
