/*!

A CHIP-8 virtual machine core as specified at https://en.wikipedia.org/wiki/CHIP-8.

The core owns memory, registers, the stack, both timers, the keypad and the
framebuffer. It never draws, beeps or sleeps: a host drives it by calling
`step` at whatever instruction rate it likes, `tick_timers` at 60 Hz, feeding
key events in and reading the framebuffer out.

# Headless runner

If you want to try the emulator on some programs, there is a ready-to-use runner
you can start with `cargo run --release --bin no_frontend -- <program>`.
It runs the program for a number of frames and prints the final screen.
Use `--press` to hold keys down, e.g. `--press 5 --press w`.

# Library

The main way of running a program is to load instructions as bytes.

```rust
use chip8_core::emulator::Emulator;

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
emulator.load(&clear_display)?;
emulator.step()?; // Will now clear the display
assert_eq!(emulator.program_counter(), 0x202);
# Ok::<(), chip8_core::emulator::Error>(())
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip8_core::emulator::Emulator;
use chip8_core::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::with_seed(0);

// Execute instructions manually
emulator.execute(Instruction::ClearScreen)?;

// Or many sequentially
emulator.execute_many(&[
    Instruction::Jump(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
])?;
assert_eq!(emulator.registers()[0xB], 35);
# Ok::<(), chip8_core::emulator::Error>(())
```

## Errors

Nothing panics on a bad program. `step` reports unknown opcodes, stack
misuse and out-of-bounds memory accesses as an `Error`, and leaves the
machine as it was before the failing instruction.

```rust
use chip8_core::emulator::{Emulator, Error};

let mut emulator = Emulator::new();
emulator.load(&[0x00, 0xEE])?; // return, with nothing to return to
assert_eq!(emulator.step(), Err(Error::StackUnderflow { address: 0x200 }));
# Ok::<(), Error>(())
```

## Input

The blocking key wait (`FX0A`) is emulated by polling: `step` keeps running
the same instruction until a key is down.

```rust
use chip8_core::emulator::Emulator;
use chip8_core::keymap::key_index;

let mut emulator = Emulator::new();
emulator.load(&[0xF3, 0x0A])?; // V3 = next key
emulator.step()?;
assert_eq!(emulator.program_counter(), 0x200);

emulator.key_event(key_index("w").unwrap(), true)?;
emulator.step()?;
assert_eq!(emulator.registers()[3], 0x5);
# Ok::<(), chip8_core::emulator::Error>(())
```
*/

pub mod emulator;
pub mod keymap;
