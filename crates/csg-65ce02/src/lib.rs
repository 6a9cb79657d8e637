//! Instruction-level 6502 / 65CE02 CPU emulator.
//!
//! Each `step()` fetches one opcode, resolves its operand through one of
//! the addressing modes, applies the instruction and charges the opcode's
//! fixed cycle cost from a 256-entry table.
//!
//! One engine covers both instruction sets. [`Variant::Mos6502`] decodes
//! only the documented NMOS opcodes; [`Variant::Csg65ce02`] adds the Z
//! register, word branches and the bit manipulation instructions. Opcodes
//! outside the selected set are charged, skipped and reported as
//! [`StepKind::Unimplemented`] rather than halting the machine.

mod addressing;
mod cpu;
mod error;
mod execute;
pub mod flags;
mod opcodes;
mod registers;

pub use addressing::AddressingMode;
pub use cpu::{Csg65ce02, RESET_VECTOR, Step, StepKind, Variant};
pub use error::CpuError;
pub use flags::Status;
pub use opcodes::{Instruction, OPCODE_TABLE, Opcode};
pub use registers::{Registers, STACK_PAGE};
