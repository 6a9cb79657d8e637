//! Opcode table.
//!
//! One 256-entry table indexed by opcode byte is the single source of truth
//! for decode: the operation, its addressing mode, its fixed cycle cost,
//! and whether the opcode exists on the plain NMOS 6502. Cycle costs follow
//! 65CE02 timing and are charged on every execution, with no page-crossing
//! or branch-taken adjustments.

use crate::addressing::AddressingMode;

/// Operation selector. Bit-numbered families carry the bit index (0-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Adc,
    And,
    Asl,
    Asr,
    Asw,
    Bbr(u8),
    Bbs(u8),
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Bra,
    Brk,
    Bsr,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cle,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Cpz,
    Dec,
    Dew,
    Dex,
    Dey,
    Dez,
    Eor,
    Inc,
    Inw,
    Inx,
    Iny,
    Inz,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Ldz,
    Lsr,
    Aug,
    Neg,
    Nop,
    Ora,
    Pha,
    Php,
    Phw,
    Phx,
    Phy,
    Phz,
    Pla,
    Plp,
    Plx,
    Ply,
    Plz,
    Rmb(u8),
    Rol,
    Ror,
    Row,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    See,
    Sei,
    Smb(u8),
    Sta,
    Stx,
    Sty,
    Stz,
    Tab,
    Tax,
    Tay,
    Taz,
    Tba,
    Trb,
    Tsb,
    Tsx,
    Tsy,
    Txa,
    Txs,
    Tya,
    Tys,
    Tza,
}

impl Instruction {
    /// Assembler mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        const BBR: [&str; 8] = ["BBR0", "BBR1", "BBR2", "BBR3", "BBR4", "BBR5", "BBR6", "BBR7"];
        const BBS: [&str; 8] = ["BBS0", "BBS1", "BBS2", "BBS3", "BBS4", "BBS5", "BBS6", "BBS7"];
        const RMB: [&str; 8] = ["RMB0", "RMB1", "RMB2", "RMB3", "RMB4", "RMB5", "RMB6", "RMB7"];
        const SMB: [&str; 8] = ["SMB0", "SMB1", "SMB2", "SMB3", "SMB4", "SMB5", "SMB6", "SMB7"];

        match self {
            Self::Adc => "ADC",
            Self::And => "AND",
            Self::Asl => "ASL",
            Self::Asr => "ASR",
            Self::Asw => "ASW",
            Self::Bbr(bit) => BBR[(bit & 7) as usize],
            Self::Bbs(bit) => BBS[(bit & 7) as usize],
            Self::Bcc => "BCC",
            Self::Bcs => "BCS",
            Self::Beq => "BEQ",
            Self::Bit => "BIT",
            Self::Bmi => "BMI",
            Self::Bne => "BNE",
            Self::Bpl => "BPL",
            Self::Bra => "BRA",
            Self::Brk => "BRK",
            Self::Bsr => "BSR",
            Self::Bvc => "BVC",
            Self::Bvs => "BVS",
            Self::Clc => "CLC",
            Self::Cld => "CLD",
            Self::Cle => "CLE",
            Self::Cli => "CLI",
            Self::Clv => "CLV",
            Self::Cmp => "CMP",
            Self::Cpx => "CPX",
            Self::Cpy => "CPY",
            Self::Cpz => "CPZ",
            Self::Dec => "DEC",
            Self::Dew => "DEW",
            Self::Dex => "DEX",
            Self::Dey => "DEY",
            Self::Dez => "DEZ",
            Self::Eor => "EOR",
            Self::Inc => "INC",
            Self::Inw => "INW",
            Self::Inx => "INX",
            Self::Iny => "INY",
            Self::Inz => "INZ",
            Self::Jmp => "JMP",
            Self::Jsr => "JSR",
            Self::Lda => "LDA",
            Self::Ldx => "LDX",
            Self::Ldy => "LDY",
            Self::Ldz => "LDZ",
            Self::Lsr => "LSR",
            Self::Aug => "AUG",
            Self::Neg => "NEG",
            Self::Nop => "NOP",
            Self::Ora => "ORA",
            Self::Pha => "PHA",
            Self::Php => "PHP",
            Self::Phw => "PHW",
            Self::Phx => "PHX",
            Self::Phy => "PHY",
            Self::Phz => "PHZ",
            Self::Pla => "PLA",
            Self::Plp => "PLP",
            Self::Plx => "PLX",
            Self::Ply => "PLY",
            Self::Plz => "PLZ",
            Self::Rmb(bit) => RMB[(bit & 7) as usize],
            Self::Rol => "ROL",
            Self::Ror => "ROR",
            Self::Row => "ROW",
            Self::Rti => "RTI",
            Self::Rts => "RTS",
            Self::Sbc => "SBC",
            Self::Sec => "SEC",
            Self::Sed => "SED",
            Self::See => "SEE",
            Self::Sei => "SEI",
            Self::Smb(bit) => SMB[(bit & 7) as usize],
            Self::Sta => "STA",
            Self::Stx => "STX",
            Self::Sty => "STY",
            Self::Stz => "STZ",
            Self::Tab => "TAB",
            Self::Tax => "TAX",
            Self::Tay => "TAY",
            Self::Taz => "TAZ",
            Self::Tba => "TBA",
            Self::Trb => "TRB",
            Self::Tsb => "TSB",
            Self::Tsx => "TSX",
            Self::Tsy => "TSY",
            Self::Txa => "TXA",
            Self::Txs => "TXS",
            Self::Tya => "TYA",
            Self::Tys => "TYS",
            Self::Tza => "TZA",
        }
    }

    /// False for operations whose behaviour is not modelled.
    ///
    /// TAB and TBA need a relocatable base-page register, which does not
    /// exist here, so the base page stays at $00. AUG is reserved.
    #[must_use]
    pub const fn is_modelled(self) -> bool {
        !matches!(self, Self::Tab | Self::Tba | Self::Aug)
    }
}

/// Static decode information for one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub instruction: Instruction,
    pub mode: AddressingMode,
    /// Fixed cycle cost charged when the opcode executes.
    pub cycles: u8,
    /// Present on the NMOS 6502 as a documented opcode.
    pub nmos: bool,
}

impl Opcode {
    /// Total instruction length including the opcode byte.
    #[must_use]
    pub const fn size(&self) -> u8 {
        1 + self.mode.operand_bytes()
    }
}

const fn nmos(instruction: Instruction, mode: AddressingMode, cycles: u8) -> Opcode {
    Opcode {
        instruction,
        mode,
        cycles,
        nmos: true,
    }
}

const fn ce02(instruction: Instruction, mode: AddressingMode, cycles: u8) -> Opcode {
    Opcode {
        instruction,
        mode,
        cycles,
        nmos: false,
    }
}

use AddressingMode as M;
use Instruction as I;

/// Decode table indexed by opcode byte.
///
/// BRK is listed with an immediate operand: it consumes the byte after the
/// opcode.
pub static OPCODE_TABLE: [Opcode; 256] = [
    // $00
    nmos(I::Brk, M::Immediate, 7),
    nmos(I::Ora, M::IndexedIndirect, 5),
    ce02(I::Cle, M::Implied, 2),
    ce02(I::See, M::Implied, 2),
    ce02(I::Tsb, M::BasePage, 4),
    nmos(I::Ora, M::BasePage, 3),
    nmos(I::Asl, M::BasePage, 4),
    ce02(I::Rmb(0), M::BasePage, 4),
    nmos(I::Php, M::Implied, 3),
    nmos(I::Ora, M::Immediate, 2),
    nmos(I::Asl, M::Accumulator, 1),
    ce02(I::Tsy, M::Implied, 1),
    ce02(I::Tsb, M::Absolute, 5),
    nmos(I::Ora, M::Absolute, 4),
    nmos(I::Asl, M::Absolute, 5),
    ce02(I::Bbr(0), M::BasePageRelative, 4),
    // $10
    nmos(I::Bpl, M::Relative, 2),
    nmos(I::Ora, M::IndirectY, 5),
    ce02(I::Ora, M::IndirectZ, 5),
    ce02(I::Bpl, M::RelativeWord, 3),
    ce02(I::Trb, M::BasePage, 4),
    nmos(I::Ora, M::BasePageX, 3),
    nmos(I::Asl, M::BasePageX, 5),
    ce02(I::Rmb(1), M::BasePage, 4),
    nmos(I::Clc, M::Implied, 1),
    nmos(I::Ora, M::AbsoluteY, 4),
    ce02(I::Inc, M::Accumulator, 1),
    ce02(I::Inz, M::Implied, 1),
    ce02(I::Trb, M::Absolute, 5),
    nmos(I::Ora, M::AbsoluteX, 4),
    nmos(I::Asl, M::AbsoluteX, 5),
    ce02(I::Bbr(1), M::BasePageRelative, 4),
    // $20
    nmos(I::Jsr, M::Absolute, 5),
    nmos(I::And, M::IndexedIndirect, 5),
    ce02(I::Jsr, M::Indirect, 7),
    ce02(I::Jsr, M::AbsoluteIndexedIndirect, 7),
    nmos(I::Bit, M::BasePage, 3),
    nmos(I::And, M::BasePage, 3),
    nmos(I::Rol, M::BasePage, 4),
    ce02(I::Rmb(2), M::BasePage, 4),
    nmos(I::Plp, M::Implied, 3),
    nmos(I::And, M::Immediate, 2),
    nmos(I::Rol, M::Accumulator, 1),
    ce02(I::Tys, M::Implied, 1),
    nmos(I::Bit, M::Absolute, 4),
    nmos(I::And, M::Absolute, 4),
    nmos(I::Rol, M::Absolute, 5),
    ce02(I::Bbr(2), M::BasePageRelative, 4),
    // $30
    nmos(I::Bmi, M::Relative, 2),
    nmos(I::And, M::IndirectY, 5),
    ce02(I::And, M::IndirectZ, 5),
    ce02(I::Bmi, M::RelativeWord, 3),
    ce02(I::Bit, M::BasePageX, 3),
    nmos(I::And, M::BasePageX, 3),
    nmos(I::Rol, M::BasePageX, 5),
    ce02(I::Rmb(3), M::BasePage, 4),
    nmos(I::Sec, M::Implied, 1),
    nmos(I::And, M::AbsoluteY, 4),
    ce02(I::Dec, M::Accumulator, 1),
    ce02(I::Dez, M::Implied, 1),
    ce02(I::Bit, M::AbsoluteX, 4),
    nmos(I::And, M::AbsoluteX, 4),
    nmos(I::Rol, M::AbsoluteX, 5),
    ce02(I::Bbr(3), M::BasePageRelative, 4),
    // $40
    nmos(I::Rti, M::Implied, 5),
    nmos(I::Eor, M::IndexedIndirect, 5),
    ce02(I::Neg, M::Accumulator, 2),
    ce02(I::Asr, M::Accumulator, 2),
    ce02(I::Asr, M::BasePage, 4),
    nmos(I::Eor, M::BasePage, 3),
    nmos(I::Lsr, M::BasePage, 4),
    ce02(I::Rmb(4), M::BasePage, 4),
    nmos(I::Pha, M::Implied, 3),
    nmos(I::Eor, M::Immediate, 2),
    nmos(I::Lsr, M::Accumulator, 1),
    ce02(I::Taz, M::Implied, 1),
    nmos(I::Jmp, M::Absolute, 3),
    nmos(I::Eor, M::Absolute, 4),
    nmos(I::Lsr, M::Absolute, 5),
    ce02(I::Bbr(4), M::BasePageRelative, 4),
    // $50
    nmos(I::Bvc, M::Relative, 2),
    nmos(I::Eor, M::IndirectY, 5),
    ce02(I::Eor, M::IndirectZ, 5),
    ce02(I::Bvc, M::RelativeWord, 3),
    ce02(I::Asr, M::BasePageX, 5),
    nmos(I::Eor, M::BasePageX, 3),
    nmos(I::Lsr, M::BasePageX, 5),
    ce02(I::Rmb(5), M::BasePage, 4),
    nmos(I::Cli, M::Implied, 1),
    nmos(I::Eor, M::AbsoluteY, 4),
    ce02(I::Phy, M::Implied, 3),
    ce02(I::Tab, M::Implied, 1),
    ce02(I::Aug, M::Augment, 4),
    nmos(I::Eor, M::AbsoluteX, 4),
    nmos(I::Lsr, M::AbsoluteX, 5),
    ce02(I::Bbr(5), M::BasePageRelative, 4),
    // $60
    nmos(I::Rts, M::Implied, 4),
    nmos(I::Adc, M::IndexedIndirect, 5),
    ce02(I::Rts, M::Immediate, 7),
    ce02(I::Bsr, M::RelativeWord, 5),
    ce02(I::Stz, M::BasePage, 3),
    nmos(I::Adc, M::BasePage, 3),
    nmos(I::Ror, M::BasePage, 4),
    ce02(I::Rmb(6), M::BasePage, 4),
    nmos(I::Pla, M::Implied, 4),
    nmos(I::Adc, M::Immediate, 2),
    nmos(I::Ror, M::Accumulator, 1),
    ce02(I::Tza, M::Implied, 1),
    nmos(I::Jmp, M::Indirect, 5),
    nmos(I::Adc, M::Absolute, 4),
    nmos(I::Ror, M::Absolute, 5),
    ce02(I::Bbr(6), M::BasePageRelative, 4),
    // $70
    nmos(I::Bvs, M::Relative, 2),
    nmos(I::Adc, M::IndirectY, 5),
    ce02(I::Adc, M::IndirectZ, 5),
    ce02(I::Bvs, M::RelativeWord, 3),
    ce02(I::Stz, M::BasePageX, 3),
    nmos(I::Adc, M::BasePageX, 3),
    nmos(I::Ror, M::BasePageX, 5),
    ce02(I::Rmb(7), M::BasePage, 4),
    nmos(I::Sei, M::Implied, 1),
    nmos(I::Adc, M::AbsoluteY, 4),
    ce02(I::Ply, M::Implied, 3),
    ce02(I::Tba, M::Implied, 1),
    ce02(I::Jmp, M::AbsoluteIndexedIndirect, 5),
    nmos(I::Adc, M::AbsoluteX, 4),
    nmos(I::Ror, M::AbsoluteX, 5),
    ce02(I::Bbr(7), M::BasePageRelative, 4),
    // $80
    ce02(I::Bra, M::Relative, 2),
    nmos(I::Sta, M::IndexedIndirect, 5),
    ce02(I::Sta, M::StackIndirectY, 6),
    ce02(I::Bra, M::RelativeWord, 3),
    nmos(I::Sty, M::BasePage, 3),
    nmos(I::Sta, M::BasePage, 3),
    nmos(I::Stx, M::BasePage, 3),
    ce02(I::Smb(0), M::BasePage, 4),
    nmos(I::Dey, M::Implied, 1),
    ce02(I::Bit, M::Immediate, 2),
    nmos(I::Txa, M::Implied, 1),
    ce02(I::Sty, M::AbsoluteX, 4),
    nmos(I::Sty, M::Absolute, 4),
    nmos(I::Sta, M::Absolute, 4),
    nmos(I::Stx, M::Absolute, 4),
    ce02(I::Bbs(0), M::BasePageRelative, 4),
    // $90
    nmos(I::Bcc, M::Relative, 2),
    nmos(I::Sta, M::IndirectY, 5),
    ce02(I::Sta, M::IndirectZ, 5),
    ce02(I::Bcc, M::RelativeWord, 3),
    nmos(I::Sty, M::BasePageX, 3),
    nmos(I::Sta, M::BasePageX, 3),
    nmos(I::Stx, M::BasePageY, 3),
    ce02(I::Smb(1), M::BasePage, 4),
    nmos(I::Tya, M::Implied, 1),
    nmos(I::Sta, M::AbsoluteY, 4),
    nmos(I::Txs, M::Implied, 1),
    ce02(I::Stx, M::AbsoluteY, 4),
    ce02(I::Stz, M::Absolute, 4),
    nmos(I::Sta, M::AbsoluteX, 4),
    ce02(I::Stz, M::AbsoluteX, 4),
    ce02(I::Bbs(1), M::BasePageRelative, 4),
    // $A0
    nmos(I::Ldy, M::Immediate, 2),
    nmos(I::Lda, M::IndexedIndirect, 5),
    nmos(I::Ldx, M::Immediate, 2),
    ce02(I::Ldz, M::Immediate, 2),
    nmos(I::Ldy, M::BasePage, 3),
    nmos(I::Lda, M::BasePage, 3),
    nmos(I::Ldx, M::BasePage, 3),
    ce02(I::Smb(2), M::BasePage, 4),
    nmos(I::Tay, M::Implied, 1),
    nmos(I::Lda, M::Immediate, 2),
    nmos(I::Tax, M::Implied, 1),
    ce02(I::Ldz, M::Absolute, 4),
    nmos(I::Ldy, M::Absolute, 4),
    nmos(I::Lda, M::Absolute, 4),
    nmos(I::Ldx, M::Absolute, 4),
    ce02(I::Bbs(2), M::BasePageRelative, 4),
    // $B0
    nmos(I::Bcs, M::Relative, 2),
    nmos(I::Lda, M::IndirectY, 5),
    ce02(I::Lda, M::IndirectZ, 5),
    ce02(I::Bcs, M::RelativeWord, 3),
    nmos(I::Ldy, M::BasePageX, 3),
    nmos(I::Lda, M::BasePageX, 3),
    nmos(I::Ldx, M::BasePageY, 3),
    ce02(I::Smb(3), M::BasePage, 4),
    nmos(I::Clv, M::Implied, 1),
    nmos(I::Lda, M::AbsoluteY, 4),
    nmos(I::Tsx, M::Implied, 1),
    ce02(I::Ldz, M::AbsoluteX, 4),
    nmos(I::Ldy, M::AbsoluteX, 4),
    nmos(I::Lda, M::AbsoluteX, 4),
    nmos(I::Ldx, M::AbsoluteY, 4),
    ce02(I::Bbs(3), M::BasePageRelative, 4),
    // $C0
    nmos(I::Cpy, M::Immediate, 2),
    nmos(I::Cmp, M::IndexedIndirect, 5),
    ce02(I::Cpz, M::Immediate, 2),
    ce02(I::Dew, M::BasePage, 6),
    nmos(I::Cpy, M::BasePage, 3),
    nmos(I::Cmp, M::BasePage, 3),
    nmos(I::Dec, M::BasePage, 4),
    ce02(I::Smb(4), M::BasePage, 4),
    nmos(I::Iny, M::Implied, 1),
    nmos(I::Cmp, M::Immediate, 2),
    nmos(I::Dex, M::Implied, 1),
    ce02(I::Asw, M::Absolute, 7),
    nmos(I::Cpy, M::Absolute, 4),
    nmos(I::Cmp, M::Absolute, 4),
    nmos(I::Dec, M::Absolute, 5),
    ce02(I::Bbs(4), M::BasePageRelative, 4),
    // $D0
    nmos(I::Bne, M::Relative, 2),
    nmos(I::Cmp, M::IndirectY, 5),
    ce02(I::Cmp, M::IndirectZ, 5),
    ce02(I::Bne, M::RelativeWord, 3),
    ce02(I::Cpz, M::BasePage, 3),
    nmos(I::Cmp, M::BasePageX, 3),
    nmos(I::Dec, M::BasePageX, 5),
    ce02(I::Smb(5), M::BasePage, 4),
    nmos(I::Cld, M::Implied, 1),
    nmos(I::Cmp, M::AbsoluteY, 4),
    ce02(I::Phx, M::Implied, 3),
    ce02(I::Phz, M::Implied, 3),
    ce02(I::Cpz, M::Absolute, 4),
    nmos(I::Cmp, M::AbsoluteX, 4),
    nmos(I::Dec, M::AbsoluteX, 5),
    ce02(I::Bbs(5), M::BasePageRelative, 4),
    // $E0
    nmos(I::Cpx, M::Immediate, 2),
    nmos(I::Sbc, M::IndexedIndirect, 5),
    ce02(I::Lda, M::StackIndirectY, 6),
    ce02(I::Inw, M::BasePage, 6),
    nmos(I::Cpx, M::BasePage, 3),
    nmos(I::Sbc, M::BasePage, 3),
    nmos(I::Inc, M::BasePage, 4),
    ce02(I::Smb(6), M::BasePage, 4),
    nmos(I::Inx, M::Implied, 1),
    nmos(I::Sbc, M::Immediate, 2),
    nmos(I::Nop, M::Implied, 1),
    ce02(I::Row, M::Absolute, 7),
    nmos(I::Cpx, M::Absolute, 4),
    nmos(I::Sbc, M::Absolute, 4),
    nmos(I::Inc, M::Absolute, 5),
    ce02(I::Bbs(6), M::BasePageRelative, 4),
    // $F0
    nmos(I::Beq, M::Relative, 2),
    nmos(I::Sbc, M::IndirectY, 5),
    ce02(I::Sbc, M::IndirectZ, 5),
    ce02(I::Beq, M::RelativeWord, 3),
    ce02(I::Phw, M::ImmediateWord, 5),
    nmos(I::Sbc, M::BasePageX, 3),
    nmos(I::Inc, M::BasePageX, 5),
    ce02(I::Smb(7), M::BasePage, 4),
    nmos(I::Sed, M::Implied, 1),
    nmos(I::Sbc, M::AbsoluteY, 4),
    ce02(I::Plx, M::Implied, 3),
    ce02(I::Plz, M::Implied, 3),
    ce02(I::Phw, M::Absolute, 7),
    nmos(I::Sbc, M::AbsoluteX, 4),
    nmos(I::Inc, M::AbsoluteX, 5),
    ce02(I::Bbs(7), M::BasePageRelative, 4),
];
