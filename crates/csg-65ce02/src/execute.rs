//! Instruction bodies and ALU operations.

use emu_core::Bus;

use crate::addressing::Operand;
use crate::cpu::{StepKind, Variant, read_word};
use crate::flags::{self, C, D, E, I, N, V, Z};
use crate::opcodes::Instruction;
use crate::{Csg65ce02, Status};

impl<M> Csg65ce02<M> {
    /// Run the body of `instruction` on an already resolved operand.
    pub(crate) fn execute<B: Bus>(
        &mut self,
        bus: &mut B,
        instruction: Instruction,
        operand: Operand,
    ) -> StepKind {
        match instruction {
            // Loads, ALU and compares
            Instruction::Lda => self.read_with(bus, operand, Self::do_lda),
            Instruction::Ldx => self.read_with(bus, operand, Self::do_ldx),
            Instruction::Ldy => self.read_with(bus, operand, Self::do_ldy),
            Instruction::Ldz => self.read_with(bus, operand, Self::do_ldz),
            Instruction::Ora => self.read_with(bus, operand, Self::do_ora),
            Instruction::And => self.read_with(bus, operand, Self::do_and),
            Instruction::Eor => self.read_with(bus, operand, Self::do_eor),
            Instruction::Adc => self.read_with(bus, operand, Self::do_adc),
            Instruction::Sbc => self.read_with(bus, operand, Self::do_sbc),
            Instruction::Cmp => self.read_with(bus, operand, Self::do_cmp),
            Instruction::Cpx => self.read_with(bus, operand, Self::do_cpx),
            Instruction::Cpy => self.read_with(bus, operand, Self::do_cpy),
            Instruction::Cpz => self.read_with(bus, operand, Self::do_cpz),
            Instruction::Bit => {
                if matches!(operand, Operand::Immediate(_)) {
                    self.read_with(bus, operand, Self::do_bit_immediate);
                } else {
                    self.read_with(bus, operand, Self::do_bit);
                }
            }

            // Read-modify-write
            Instruction::Asl => self.modify(bus, operand, Self::do_asl),
            Instruction::Lsr => self.modify(bus, operand, Self::do_lsr),
            Instruction::Rol => self.modify(bus, operand, Self::do_rol),
            Instruction::Ror => self.modify(bus, operand, Self::do_ror),
            Instruction::Asr => self.modify(bus, operand, Self::do_asr),
            Instruction::Neg => self.modify(bus, operand, Self::do_neg),
            Instruction::Inc => self.modify(bus, operand, Self::do_inc),
            Instruction::Dec => self.modify(bus, operand, Self::do_dec),
            Instruction::Tsb => self.modify(bus, operand, Self::do_tsb),
            Instruction::Trb => self.modify(bus, operand, Self::do_trb),
            Instruction::Rmb(bit) => self.modify(bus, operand, |_, val| val & !(1 << bit)),
            Instruction::Smb(bit) => self.modify(bus, operand, |_, val| val | (1 << bit)),
            Instruction::Inw => self.modify_word(bus, operand, Self::do_inw),
            Instruction::Dew => self.modify_word(bus, operand, Self::do_dew),
            Instruction::Asw => self.modify_word(bus, operand, Self::do_asw),
            Instruction::Row => self.modify_word(bus, operand, Self::do_row),

            // Stores
            Instruction::Sta => self.store(bus, operand, self.regs.a),
            Instruction::Stx => self.store(bus, operand, self.regs.x),
            Instruction::Sty => self.store(bus, operand, self.regs.y),
            // STZ stores the Z register, which reads as zero until loaded.
            Instruction::Stz => self.store(bus, operand, self.regs.z),

            // Branches
            Instruction::Bpl => self.branch(operand, !self.regs.p.is_set(N)),
            Instruction::Bmi => self.branch(operand, self.regs.p.is_set(N)),
            Instruction::Bvc => self.branch(operand, !self.regs.p.is_set(V)),
            Instruction::Bvs => self.branch(operand, self.regs.p.is_set(V)),
            Instruction::Bcc => self.branch(operand, !self.regs.p.is_set(C)),
            Instruction::Bcs => self.branch(operand, self.regs.p.is_set(C)),
            Instruction::Bne => self.branch(operand, !self.regs.p.is_set(Z)),
            Instruction::Beq => self.branch(operand, self.regs.p.is_set(Z)),
            Instruction::Bra => self.branch(operand, true),
            Instruction::Bbr(bit) => self.branch_on_bit(bus, operand, bit, false),
            Instruction::Bbs(bit) => self.branch_on_bit(bus, operand, bit, true),

            // Jumps, calls and returns
            Instruction::Jmp => {
                if let Operand::Address(target) = operand {
                    self.regs.pc = target;
                }
            }
            Instruction::Jsr | Instruction::Bsr => {
                if let Operand::Address(target) | Operand::Target(target) = operand {
                    let ret = self.regs.pc.wrapping_sub(1);
                    self.push_word(bus, ret);
                    self.regs.pc = target;
                }
            }
            Instruction::Rts => {
                self.regs.pc = self.pull_word(bus).wrapping_add(1);
                // RTS #n also drops n bytes of arguments.
                if let Operand::Immediate(drop) = operand {
                    self.regs.s = self.regs.s.wrapping_add(drop);
                }
            }
            Instruction::Rti => {
                self.regs.p = Status(self.pull(bus));
                self.regs.pc = self.pull_word(bus);
            }
            Instruction::Brk => {
                self.regs.p.set(flags::B);
                log::warn!(
                    "{}: BRK at ${:04X}",
                    self.variant().name(),
                    self.regs.pc.wrapping_sub(2)
                );
                return StepKind::Break;
            }

            // Stack
            Instruction::Pha => self.push(bus, self.regs.a),
            Instruction::Phx => self.push(bus, self.regs.x),
            Instruction::Phy => self.push(bus, self.regs.y),
            Instruction::Phz => self.push(bus, self.regs.z),
            Instruction::Php => self.push(bus, self.regs.p.0),
            Instruction::Pla => {
                self.regs.a = self.pull(bus);
                self.regs.p.update_nz(self.regs.a);
            }
            Instruction::Plx => {
                self.regs.x = self.pull(bus);
                self.regs.p.update_nz(self.regs.x);
            }
            Instruction::Ply => {
                self.regs.y = self.pull(bus);
                self.regs.p.update_nz(self.regs.y);
            }
            Instruction::Plz => {
                self.regs.z = self.pull(bus);
                self.regs.p.update_nz(self.regs.z);
            }
            Instruction::Plp => self.regs.p = Status(self.pull(bus)),
            Instruction::Phw => {
                let value = match operand {
                    Operand::ImmediateWord(value) => value,
                    Operand::Address(addr) => read_word(bus, addr),
                    _ => unreachable!("PHW without a word operand"),
                };
                self.push_word(bus, value);
            }

            // Register transfers and counters
            Instruction::Tax => self.regs.x = self.transfer(self.regs.a),
            Instruction::Tay => self.regs.y = self.transfer(self.regs.a),
            Instruction::Taz => self.regs.z = self.transfer(self.regs.a),
            Instruction::Txa => self.regs.a = self.transfer(self.regs.x),
            Instruction::Tya => self.regs.a = self.transfer(self.regs.y),
            Instruction::Tza => self.regs.a = self.transfer(self.regs.z),
            Instruction::Tsx => self.regs.x = self.transfer(self.regs.s),
            Instruction::Tsy => self.regs.y = self.transfer(self.regs.s),
            Instruction::Txs => self.regs.s = self.regs.x,
            Instruction::Tys => self.regs.s = self.regs.y,
            Instruction::Inx => self.regs.x = self.do_inc(self.regs.x),
            Instruction::Iny => self.regs.y = self.do_inc(self.regs.y),
            Instruction::Inz => self.regs.z = self.do_inc(self.regs.z),
            Instruction::Dex => self.regs.x = self.do_dec(self.regs.x),
            Instruction::Dey => self.regs.y = self.do_dec(self.regs.y),
            Instruction::Dez => self.regs.z = self.do_dec(self.regs.z),

            // Flags
            Instruction::Clc => self.regs.p.clear(C),
            Instruction::Sec => self.regs.p.set(C),
            Instruction::Cli => self.regs.p.clear(I),
            Instruction::Sei => self.regs.p.set(I),
            Instruction::Cld => self.regs.p.clear(D),
            Instruction::Sed => self.regs.p.set(D),
            Instruction::Clv => self.regs.p.clear(V),
            Instruction::Cle => self.regs.p.clear(E),
            Instruction::See => self.regs.p.set(E),

            Instruction::Nop => {}

            // Filtered out by `Instruction::is_modelled` before dispatch.
            Instruction::Tab | Instruction::Tba | Instruction::Aug => {
                return StepKind::Unimplemented;
            }
        }
        StepKind::Executed
    }

    // ========================================================================
    // Operand access
    // ========================================================================

    fn read_with<B: Bus>(&mut self, bus: &mut B, operand: Operand, op: fn(&mut Self, u8)) {
        let val = match operand {
            Operand::Immediate(val) => val,
            Operand::Address(addr) => bus.read(addr),
            Operand::Accumulator => self.regs.a,
            _ => unreachable!("{operand:?} has no value"),
        };
        op(self, val);
    }

    fn modify<B: Bus>(
        &mut self,
        bus: &mut B,
        operand: Operand,
        op: impl FnOnce(&mut Self, u8) -> u8,
    ) {
        match operand {
            Operand::Accumulator => {
                let val = self.regs.a;
                self.regs.a = op(self, val);
            }
            Operand::Address(addr) => {
                let val = bus.read(addr);
                let result = op(self, val);
                bus.write(addr, result);
            }
            _ => unreachable!("{operand:?} cannot be modified"),
        }
    }

    fn modify_word<B: Bus>(&mut self, bus: &mut B, operand: Operand, op: fn(&mut Self, u16) -> u16) {
        if let Operand::Address(addr) = operand {
            let result = op(self, read_word(bus, addr)).to_le_bytes();
            bus.write(addr, result[0]);
            bus.write(addr.wrapping_add(1), result[1]);
        }
    }

    fn store<B: Bus>(&mut self, bus: &mut B, operand: Operand, value: u8) {
        if let Operand::Address(addr) = operand {
            bus.write(addr, value);
        }
    }

    fn branch(&mut self, operand: Operand, taken: bool) {
        match operand {
            Operand::Target(target) if taken => self.regs.pc = target,
            _ => {}
        }
    }

    fn branch_on_bit<B: Bus>(&mut self, bus: &mut B, operand: Operand, bit: u8, set: bool) {
        if let Operand::BitTarget { address, target } = operand {
            let is_set = bus.read(address) & (1 << bit) != 0;
            if is_set == set {
                self.regs.pc = target;
            }
        }
    }

    fn push<B: Bus>(&mut self, bus: &mut B, value: u8) {
        let addr = self.regs.push();
        bus.write(addr, value);
    }

    fn pull<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let addr = self.regs.pop();
        bus.read(addr)
    }

    fn push_word<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push(bus, hi);
        self.push(bus, lo);
    }

    fn pull_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.pull(bus);
        let hi = self.pull(bus);
        u16::from_le_bytes([lo, hi])
    }

    fn transfer(&mut self, value: u8) -> u8 {
        self.regs.p.update_nz(value);
        value
    }

    // ========================================================================
    // ALU operations
    // ========================================================================

    fn do_lda(&mut self, val: u8) {
        self.regs.a = val;
        self.regs.p.update_nz(val);
    }

    fn do_ldx(&mut self, val: u8) {
        self.regs.x = val;
        self.regs.p.update_nz(val);
    }

    fn do_ldy(&mut self, val: u8) {
        self.regs.y = val;
        self.regs.p.update_nz(val);
    }

    fn do_ldz(&mut self, val: u8) {
        self.regs.z = val;
        self.regs.p.update_nz(val);
    }

    fn do_ora(&mut self, val: u8) {
        self.regs.a |= val;
        self.regs.p.update_nz(self.regs.a);
    }

    fn do_and(&mut self, val: u8) {
        self.regs.a &= val;
        self.regs.p.update_nz(self.regs.a);
    }

    fn do_eor(&mut self, val: u8) {
        self.regs.a ^= val;
        self.regs.p.update_nz(self.regs.a);
    }

    fn do_adc(&mut self, val: u8) {
        if self.regs.p.is_set(D) {
            self.do_adc_decimal(val);
        } else {
            self.do_adc_binary(val);
        }
    }

    fn do_adc_binary(&mut self, val: u8) {
        let a = self.regs.a;
        let carry = u16::from(self.regs.p.is_set(C));
        let sum = u16::from(a) + u16::from(val) + carry;
        let result = sum as u8;

        self.regs.p.set_if(C, sum > 0xFF);
        self.regs
            .p
            .set_if(V, (a ^ result) & (val ^ result) & 0x80 != 0);
        self.regs.a = result;
        self.regs.p.update_nz(result);
    }

    fn do_adc_decimal(&mut self, val: u8) {
        let a = self.regs.a;
        let carry = u8::from(self.regs.p.is_set(C));

        let mut lo = (a & 0x0F) + (val & 0x0F) + carry;
        if lo > 9 {
            lo += 6;
        }
        let mut hi = (a >> 4) + (val >> 4) + u8::from(lo > 0x0F);

        // NMOS: N, V and Z come from the binary sum.
        let bin_result = (u16::from(a) + u16::from(val) + u16::from(carry)) as u8;
        self.regs.p.set_if(Z, bin_result == 0);
        self.regs.p.set_if(N, hi & 0x08 != 0);
        self.regs
            .p
            .set_if(V, (a ^ bin_result) & (val ^ bin_result) & 0x80 != 0);

        if hi > 9 {
            hi += 6;
        }

        self.regs.p.set_if(C, hi > 0x0F);
        self.regs.a = (hi << 4) | (lo & 0x0F);
        self.update_nz_decimal();
    }

    fn do_sbc(&mut self, val: u8) {
        if self.regs.p.is_set(D) {
            self.do_sbc_decimal(val);
        } else {
            self.do_adc_binary(!val);
        }
    }

    fn do_sbc_decimal(&mut self, val: u8) {
        let a = self.regs.a;
        let borrow = i16::from(!self.regs.p.is_set(C));

        let bin_result = i16::from(a) - i16::from(val) - borrow;
        self.regs.p.set_if(C, bin_result >= 0);
        self.regs.p.set_if(Z, (bin_result as u8) == 0);
        self.regs.p.set_if(N, bin_result & 0x80 != 0);
        self.regs.p.set_if(
            V,
            (i16::from(a) ^ bin_result) & (i16::from(a) ^ i16::from(val)) & 0x80 != 0,
        );

        let mut lo = i16::from(a & 0x0F) - i16::from(val & 0x0F) - borrow;
        let mut hi = i16::from(a >> 4) - i16::from(val >> 4);
        if lo < 0 {
            lo -= 6;
            hi -= 1;
        }
        if hi < 0 {
            hi -= 6;
        }

        self.regs.a = ((hi << 4) as u8) | ((lo & 0x0F) as u8);
        self.update_nz_decimal();
    }

    /// The CMOS core flags N and Z from the adjusted BCD result.
    fn update_nz_decimal(&mut self) {
        if self.variant() == Variant::Csg65ce02 {
            self.regs.p.update_nz(self.regs.a);
        }
    }

    fn compare(&mut self, reg: u8, val: u8) {
        self.regs.p.set_if(C, reg >= val);
        self.regs.p.update_nz(reg.wrapping_sub(val));
    }

    fn do_cmp(&mut self, val: u8) {
        self.compare(self.regs.a, val);
    }

    fn do_cpx(&mut self, val: u8) {
        self.compare(self.regs.x, val);
    }

    fn do_cpy(&mut self, val: u8) {
        self.compare(self.regs.y, val);
    }

    fn do_cpz(&mut self, val: u8) {
        self.compare(self.regs.z, val);
    }

    fn do_bit(&mut self, val: u8) {
        self.regs.p.set_if(Z, self.regs.a & val == 0);
        self.regs.p.set_if(N, val & 0x80 != 0);
        self.regs.p.set_if(V, val & 0x40 != 0);
    }

    /// BIT # has no memory operand to copy N and V from.
    fn do_bit_immediate(&mut self, val: u8) {
        self.regs.p.set_if(Z, self.regs.a & val == 0);
    }

    fn do_asl(&mut self, val: u8) -> u8 {
        self.regs.p.set_if(C, val & 0x80 != 0);
        let result = val << 1;
        self.regs.p.update_nz(result);
        result
    }

    fn do_lsr(&mut self, val: u8) -> u8 {
        self.regs.p.set_if(C, val & 0x01 != 0);
        let result = val >> 1;
        self.regs.p.update_nz(result);
        result
    }

    fn do_asr(&mut self, val: u8) -> u8 {
        self.regs.p.set_if(C, val & 0x01 != 0);
        let result = (val >> 1) | (val & 0x80);
        self.regs.p.update_nz(result);
        result
    }

    fn do_rol(&mut self, val: u8) -> u8 {
        let carry = u8::from(self.regs.p.is_set(C));
        self.regs.p.set_if(C, val & 0x80 != 0);
        let result = (val << 1) | carry;
        self.regs.p.update_nz(result);
        result
    }

    fn do_ror(&mut self, val: u8) -> u8 {
        let carry = if self.regs.p.is_set(C) { 0x80 } else { 0 };
        self.regs.p.set_if(C, val & 0x01 != 0);
        let result = (val >> 1) | carry;
        self.regs.p.update_nz(result);
        result
    }

    fn do_neg(&mut self, val: u8) -> u8 {
        let result = val.wrapping_neg();
        self.regs.p.update_nz(result);
        result
    }

    fn do_inc(&mut self, val: u8) -> u8 {
        let result = val.wrapping_add(1);
        self.regs.p.update_nz(result);
        result
    }

    fn do_dec(&mut self, val: u8) -> u8 {
        let result = val.wrapping_sub(1);
        self.regs.p.update_nz(result);
        result
    }

    /// TSB: Z reflects the merged value; N is untouched.
    fn do_tsb(&mut self, val: u8) -> u8 {
        let result = self.regs.a | val;
        self.regs.p.set_if(Z, result == 0);
        result
    }

    /// TRB: Z reflects the cleared value; N is untouched.
    fn do_trb(&mut self, val: u8) -> u8 {
        let result = !self.regs.a & val;
        self.regs.p.set_if(Z, result == 0);
        result
    }

    fn do_inw(&mut self, val: u16) -> u16 {
        let result = val.wrapping_add(1);
        self.regs.p.update_nz_word(result);
        result
    }

    fn do_dew(&mut self, val: u16) -> u16 {
        let result = val.wrapping_sub(1);
        self.regs.p.update_nz_word(result);
        result
    }

    fn do_asw(&mut self, val: u16) -> u16 {
        self.regs.p.set_if(C, val & 0x8000 != 0);
        let result = val << 1;
        self.regs.p.update_nz_word(result);
        result
    }

    fn do_row(&mut self, val: u16) -> u16 {
        let carry = u16::from(self.regs.p.is_set(C));
        self.regs.p.set_if(C, val & 0x8000 != 0);
        let result = (val << 1) | carry;
        self.regs.p.update_nz_word(result);
        result
    }
}
