//! CPU register file.

use crate::Status;

/// Base address of the stack page.
pub const STACK_PAGE: u16 = 0x0100;

/// 6502 / 65CE02 register set.
///
/// - A: 8-bit accumulator
/// - X, Y: 8-bit index registers
/// - Z: 8-bit index register (65CE02 only, stays zero on the plain 6502)
/// - S: 8-bit stack pointer (stack at $0100-$01FF)
/// - PC: 16-bit program counter
/// - P: 8-bit processor status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Z index register.
    pub z: u8,
    /// Stack pointer (points to next free location).
    pub s: u8,
    /// Program counter.
    pub pc: u16,
    /// Processor status flags.
    pub p: Status,
}

impl Registers {
    /// Create a register file with every register cleared.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            z: 0,
            s: 0,
            pc: 0,
            p: Status(0),
        }
    }

    /// Return the address to push to, then move S down one slot.
    ///
    /// S wraps within the stack page; keeping the stack from overflowing is
    /// up to the program.
    pub fn push(&mut self) -> u16 {
        let addr = STACK_PAGE | u16::from(self.s);
        self.s = self.s.wrapping_sub(1);
        addr
    }

    /// Move S up one slot and return the address to read.
    pub fn pop(&mut self) -> u16 {
        self.s = self.s.wrapping_add(1);
        STACK_PAGE | u16::from(self.s)
    }
}
