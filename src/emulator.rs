//! The virtual machine and everything it is made of.

pub mod decode;
pub mod display;
pub mod emulator;
pub mod error;
pub mod instruction;
pub mod keypad;

pub use self::emulator::Emulator;
pub use self::error::{Error, Result};
