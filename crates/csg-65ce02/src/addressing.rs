//! Addressing modes.

/// How an instruction locates its operand.
///
/// Base-page modes address the first 256 bytes of memory with a one-byte
/// operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand (CLC, TAX, RTS).
    Implied,
    /// Operates on the accumulator (ASL A, INC A).
    Accumulator,
    /// One literal byte (LDA #$10).
    Immediate,
    /// One literal little-endian word (PHW #$1234).
    ImmediateWord,
    /// bp
    BasePage,
    /// bp,X
    BasePageX,
    /// bp,Y
    BasePageY,
    /// abs
    Absolute,
    /// abs,X
    AbsoluteX,
    /// abs,Y
    AbsoluteY,
    /// (bp,X): pointer in the base page offset by X, then dereferenced.
    IndexedIndirect,
    /// (bp),Y: base-page pointer dereferenced, then offset by Y.
    IndirectY,
    /// (bp),Z: base-page pointer dereferenced, then offset by Z.
    IndirectZ,
    /// (d,SP),Y: pointer on the stack page at S+d, then offset by Y.
    StackIndirectY,
    /// (abs): word pointer, used by JMP and JSR.
    Indirect,
    /// (abs,X): word pointer offset by X, used by JMP and JSR.
    AbsoluteIndexedIndirect,
    /// Signed 8-bit displacement.
    Relative,
    /// Signed 16-bit displacement.
    RelativeWord,
    /// Base-page address followed by a signed 8-bit displacement (BBR/BBS).
    BasePageRelative,
    /// Three operand bytes that are fetched and ignored (AUG).
    Augment,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    #[must_use]
    pub const fn operand_bytes(self) -> u8 {
        match self {
            Self::Implied | Self::Accumulator => 0,
            Self::Immediate
            | Self::BasePage
            | Self::BasePageX
            | Self::BasePageY
            | Self::IndexedIndirect
            | Self::IndirectY
            | Self::IndirectZ
            | Self::StackIndirectY
            | Self::Relative => 1,
            Self::ImmediateWord
            | Self::Absolute
            | Self::AbsoluteX
            | Self::AbsoluteY
            | Self::Indirect
            | Self::AbsoluteIndexedIndirect
            | Self::RelativeWord
            | Self::BasePageRelative => 2,
            Self::Augment => 3,
        }
    }
}

/// A resolved operand, produced before the instruction body runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    None,
    Accumulator,
    Immediate(u8),
    ImmediateWord(u16),
    /// Effective address for reads, writes, and jump targets.
    Address(u16),
    /// Branch target, already offset from the post-operand PC.
    Target(u16),
    /// BBR/BBS: the tested byte's address and the branch target.
    BitTarget { address: u16, target: u16 },
}
