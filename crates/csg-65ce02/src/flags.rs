//! Processor status register (P).
//!
//! Bit layout, high to low: N V E B D I Z C.

/// Carry flag - set if operation resulted in carry/borrow.
pub const C: u8 = 0x01;

/// Zero flag - set if result is zero.
pub const Z: u8 = 0x02;

/// Interrupt disable.
pub const I: u8 = 0x04;

/// Decimal mode - enables BCD arithmetic for ADC/SBC.
pub const D: u8 = 0x08;

/// Break flag, set by BRK.
pub const B: u8 = 0x10;

/// Extend disable (8-bit stack pointer mode). Reserved on the plain 6502.
pub const E: u8 = 0x20;

/// Overflow flag - set if signed arithmetic overflowed.
pub const V: u8 = 0x40;

/// Negative flag - set if result has bit 7 set.
pub const N: u8 = 0x80;

/// Processor status register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status(pub u8);

impl Status {
    /// Check if a flag is set.
    #[must_use]
    pub const fn is_set(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    /// Set a flag.
    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    /// Clear a flag.
    pub fn clear(&mut self, flag: u8) {
        self.0 &= !flag;
    }

    /// Set or clear a flag based on condition.
    pub fn set_if(&mut self, flag: u8, condition: bool) {
        if condition {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }

    /// Update N and Z flags based on a value.
    pub fn update_nz(&mut self, value: u8) {
        self.set_if(N, value & 0x80 != 0);
        self.set_if(Z, value == 0);
    }

    /// Update N and Z flags from a 16-bit result (INW, DEW, ASW, ROW).
    pub fn update_nz_word(&mut self, value: u16) {
        self.set_if(N, value & 0x8000 != 0);
        self.set_if(Z, value == 0);
    }

    #[must_use]
    pub const fn negative(self) -> bool {
        self.is_set(N)
    }

    #[must_use]
    pub const fn overflow(self) -> bool {
        self.is_set(V)
    }

    #[must_use]
    pub const fn extend_disable(self) -> bool {
        self.is_set(E)
    }

    #[must_use]
    pub const fn brk(self) -> bool {
        self.is_set(B)
    }

    #[must_use]
    pub const fn decimal(self) -> bool {
        self.is_set(D)
    }

    #[must_use]
    pub const fn interrupt_disable(self) -> bool {
        self.is_set(I)
    }

    #[must_use]
    pub const fn zero(self) -> bool {
        self.is_set(Z)
    }

    #[must_use]
    pub const fn carry(self) -> bool {
        self.is_set(C)
    }
}
