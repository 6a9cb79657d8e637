//! Unit tests for 6502 / 65CE02 instruction behaviour.

use csg_65ce02::{Csg65ce02, StepKind, Variant, flags};
use emu_core::{Bus, SimpleBus};

/// Load a program at $0200 and point PC at it.
fn setup(program: &[u8]) -> Csg65ce02<SimpleBus> {
    setup_variant(Variant::Csg65ce02, program)
}

fn setup_variant(variant: Variant, program: &[u8]) -> Csg65ce02<SimpleBus> {
    let mut bus = SimpleBus::new();
    bus.load(0x0200, program);
    let mut cpu = Csg65ce02::with_variant(variant);
    cpu.bind_memory(bus);
    cpu.regs.pc = 0x0200;
    cpu
}

fn run(cpu: &mut Csg65ce02<SimpleBus>, instructions: usize) {
    for _ in 0..instructions {
        cpu.step().expect("memory is bound");
    }
}

fn mem(cpu: &mut Csg65ce02<SimpleBus>) -> &mut SimpleBus {
    cpu.memory_mut().expect("memory is bound")
}

#[test]
fn ora_zero_result_sets_zero_clears_negative() {
    let mut cpu = setup(&[0x09, 0x00]); // ORA #$00
    cpu.regs.p.set(flags::N);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.regs.p.zero());
    assert!(!cpu.regs.p.negative());
}

#[test]
fn ora_high_bit_sets_negative_clears_zero() {
    let mut cpu = setup(&[0x09, 0xF0]); // ORA #$F0
    cpu.regs.a = 0x0F;
    cpu.regs.p.set(flags::Z);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.a, 0xFF);
    assert!(cpu.regs.p.negative());
    assert!(!cpu.regs.p.zero());
}

#[test]
fn ora_leaves_other_flags_alone() {
    let mut cpu = setup(&[0x05, 0x10]); // ORA $10
    cpu.regs.p.set(flags::C);
    cpu.regs.p.set(flags::V);
    cpu.regs.p.set(flags::D);
    mem(&mut cpu).write(0x0010, 0x01);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.a, 0x01);
    assert!(cpu.regs.p.carry());
    assert!(cpu.regs.p.overflow());
    assert!(cpu.regs.p.decimal());
}

#[test]
fn asl_memory_shifts_bit7_into_carry() {
    let mut cpu = setup(&[0x06, 0x10]); // ASL $10
    mem(&mut cpu).write(0x0010, 0x80);
    run(&mut cpu, 1);
    assert_eq!(mem(&mut cpu).peek(0x0010), 0x00);
    assert!(cpu.regs.p.carry());
    assert!(cpu.regs.p.zero());
    assert!(!cpu.regs.p.negative());
}

#[test]
fn asl_accumulator_costs_one_cycle() {
    let mut cpu = setup(&[0x0A]); // ASL A
    cpu.regs.a = 0x41;
    let step = cpu.step().unwrap();
    assert_eq!(cpu.regs.a, 0x82);
    assert!(cpu.regs.p.negative());
    assert!(!cpu.regs.p.carry());
    assert_eq!(step.cycles, 1);
    assert_eq!(cpu.regs.pc, 0x0201);
}

#[test]
fn tsb_sets_bits_and_zero_from_result() {
    let mut cpu = setup(&[0x04, 0x10, 0x04, 0x11]); // TSB $10; TSB $11
    cpu.regs.a = 0x0F;
    cpu.regs.p.set(flags::N);
    mem(&mut cpu).write(0x0010, 0xA0);
    run(&mut cpu, 1);
    assert_eq!(mem(&mut cpu).peek(0x0010), 0xAF);
    assert!(!cpu.regs.p.zero());
    assert!(cpu.regs.p.negative(), "N is not affected");

    cpu.regs.a = 0x00;
    run(&mut cpu, 1);
    assert_eq!(mem(&mut cpu).peek(0x0011), 0x00);
    assert!(cpu.regs.p.zero());
}

#[test]
fn trb_clears_accumulator_bits() {
    let mut cpu = setup(&[0x1C, 0x00, 0x30]); // TRB $3000
    cpu.regs.a = 0xF0;
    mem(&mut cpu).write(0x3000, 0xFF);
    let step = cpu.step().unwrap();
    assert_eq!(mem(&mut cpu).peek(0x3000), 0x0F);
    assert!(!cpu.regs.p.zero());
    assert_eq!(step.cycles, 5);
}

#[test]
fn rmb3_clears_only_bit_3() {
    let mut cpu = setup(&[0x37, 0x10]); // RMB3 $10
    mem(&mut cpu).write(0x0010, 0xFF);
    let p = cpu.regs.p;
    run(&mut cpu, 1);
    assert_eq!(mem(&mut cpu).peek(0x0010), 0xF7);
    assert_eq!(cpu.regs.p, p, "no flag effects");
}

#[test]
fn rmb_and_smb_cover_every_bit() {
    for bit in 0..8u8 {
        let rmb = (bit << 4) | 0x07;
        let smb = 0x80 | (bit << 4) | 0x07;
        let mut cpu = setup(&[rmb, 0x20, smb, 0x21]);
        mem(&mut cpu).write(0x0020, 0xFF);
        run(&mut cpu, 2);
        assert_eq!(mem(&mut cpu).peek(0x0020), !(1 << bit));
        assert_eq!(mem(&mut cpu).peek(0x0021), 1 << bit);
    }
}

#[test]
fn php_pushes_status_and_decrements_s() {
    let mut cpu = setup(&[0x08]); // PHP
    cpu.regs.s = 0xFF;
    cpu.regs.p.set(flags::C);
    cpu.regs.p.set(flags::N);
    run(&mut cpu, 1);
    assert_eq!(mem(&mut cpu).peek(0x01FF), flags::C | flags::N);
    assert_eq!(cpu.regs.s, 0xFE);
}

#[test]
fn pha_pla_round_trip() {
    // LDA #$42; LDX #$FF; TXS; PHA; LDA #$00; PLA
    let mut cpu = setup(&[0xA9, 0x42, 0xA2, 0xFF, 0x9A, 0x48, 0xA9, 0x00, 0x68]);
    run(&mut cpu, 6);
    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(cpu.regs.s, 0xFF);
}

#[test]
fn z_register_stack_round_trip() {
    // LDZ #$80; PHZ; LDZ #$00; PLZ
    let mut cpu = setup(&[0xA3, 0x80, 0xDB, 0xA3, 0x00, 0xFB]);
    cpu.regs.s = 0xF0;
    run(&mut cpu, 4);
    assert_eq!(cpu.regs.z, 0x80);
    assert!(cpu.regs.p.negative());
    assert_eq!(cpu.regs.s, 0xF0);
}

#[test]
fn tsy_copies_stack_pointer_with_flags() {
    let mut cpu = setup(&[0x0B]); // TSY
    cpu.regs.s = 0x80;
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.y, 0x80);
    assert!(cpu.regs.p.negative());
    assert!(!cpu.regs.p.zero());
}

#[test]
fn tys_sets_stack_without_flags() {
    let mut cpu = setup(&[0x2B]); // TYS
    cpu.regs.y = 0x00;
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.s, 0x00);
    assert!(!cpu.regs.p.zero());
}

#[test]
fn inc_accumulator_and_inz_wrap() {
    // INC A; INZ
    let mut cpu = setup(&[0x1A, 0x1B]);
    cpu.regs.a = 0xFF;
    cpu.regs.z = 0x7F;
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.regs.p.zero());
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.z, 0x80);
    assert!(cpu.regs.p.negative());
    assert!(!cpu.regs.p.zero());
}

#[test]
fn bbr_branches_when_bit_clear() {
    // BBR0 $10,+4
    let mut cpu = setup(&[0x0F, 0x10, 0x04]);
    mem(&mut cpu).write(0x0010, 0xFE);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0x0207);
}

#[test]
fn bbr_falls_through_when_bit_set() {
    // BBR7 $10,+4
    let mut cpu = setup(&[0x7F, 0x10, 0x04]);
    mem(&mut cpu).write(0x0010, 0x80);
    let p = cpu.regs.p;
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0x0203);
    assert_eq!(cpu.regs.p, p);
}

#[test]
fn bbs_branches_backwards_when_bit_set() {
    // BBS2 $10,-3
    let mut cpu = setup(&[0xAF, 0x10, 0xFD]);
    mem(&mut cpu).write(0x0010, 0x04);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0x0200);
}

#[test]
fn bpl_taken_and_not_taken() {
    let mut cpu = setup(&[0x10, 0x10]); // BPL +16
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0x0212);

    let mut cpu = setup(&[0x10, 0x10]);
    cpu.regs.p.set(flags::N);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0x0202);
}

#[test]
fn short_branch_wraps_below_zero() {
    // BPL -2 at $FFFE: PC is $0000 after the displacement, target $FFFE.
    let mut bus = SimpleBus::new();
    bus.load(0xFFFE, &[0x10, 0xFE]);
    let mut cpu = Csg65ce02::new();
    cpu.bind_memory(bus);
    cpu.regs.pc = 0xFFFE;
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0xFFFE);
}

#[test]
fn short_branch_back_to_itself_at_zero() {
    // BNE -2 at $0000 loops on itself.
    let mut bus = SimpleBus::new();
    bus.load(0x0000, &[0xD0, 0xFE]);
    let mut cpu = Csg65ce02::new();
    cpu.bind_memory(bus);
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.pc, 0x0000);
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn word_branch_uses_16_bit_displacement() {
    // BPL +$1000 (word)
    let mut cpu = setup(&[0x13, 0x00, 0x10]);
    let step = cpu.step().unwrap();
    assert_eq!(cpu.regs.pc, 0x1203);
    assert_eq!(step.cycles, 3);

    // BRA -$0203 (word) lands on $0000.
    let mut cpu = setup(&[0x83, 0xFD, 0xFD]);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0x0000);
}

#[test]
fn flag_pseudo_instructions() {
    // SEE; SEC; SED; CLE
    let mut cpu = setup(&[0x03, 0x38, 0xF8, 0x02]);
    run(&mut cpu, 3);
    assert!(cpu.regs.p.extend_disable());
    assert!(cpu.regs.p.carry());
    assert!(cpu.regs.p.decimal());
    run(&mut cpu, 1);
    assert!(!cpu.regs.p.extend_disable());
    assert!(cpu.regs.p.carry());
}

#[test]
fn brk_skips_one_byte_and_continues() {
    // BRK $FF; LDA #$01
    let mut cpu = setup(&[0x00, 0xFF, 0xA9, 0x01]);
    cpu.regs.s = 0xFF;
    let step = cpu.step().unwrap();
    assert_eq!(step.kind, StepKind::Break);
    assert_eq!(step.cycles, 7);
    assert!(cpu.regs.p.brk());
    assert_eq!(cpu.regs.pc, 0x0202, "exactly one operand byte skipped");
    assert_eq!(cpu.regs.s, 0xFF, "no vector dispatch, nothing pushed");

    run(&mut cpu, 1);
    assert_eq!(cpu.regs.a, 0x01);
}

#[test]
fn unimplemented_opcode_is_charged_and_skipped() {
    // TAB is not modelled; NOP follows.
    let mut cpu = setup(&[0x5B, 0xEA]);
    cpu.regs.a = 0x12;
    let before = cpu.regs;
    let step = cpu.step().unwrap();
    assert_eq!(step.kind, StepKind::Unimplemented);
    assert_eq!(step.cycles, 1);
    assert_eq!(cpu.cycles(), 1);
    assert_eq!(cpu.regs.pc, 0x0201);
    assert_eq!(cpu.regs.a, before.a);
    assert_eq!(cpu.regs.p, before.p);

    assert_eq!(cpu.step().unwrap().kind, StepKind::Executed);
}

#[test]
fn aug_skips_three_operand_bytes() {
    // AUG is four bytes long; LDA #$01 follows.
    let mut cpu = setup(&[0x5C, 0xEA, 0xEA, 0xEA, 0xA9, 0x01]);
    cpu.regs.a = 0x12;
    let before = cpu.regs;
    let step = cpu.step().unwrap();
    assert_eq!(step.kind, StepKind::Unimplemented);
    assert_eq!(step.cycles, 4);
    assert_eq!(cpu.regs.pc, 0x0204);
    assert_eq!(cpu.regs.a, before.a);
    assert_eq!(cpu.regs.p, before.p);

    run(&mut cpu, 1);
    assert_eq!(cpu.regs.a, 0x01);
}

#[test]
fn base_variant_skips_65ce02_operands() {
    // TSB $1234 is 65CE02-only: 3 bytes, 5 cycles, memory untouched.
    let mut cpu = setup_variant(Variant::Mos6502, &[0x0C, 0x34, 0x12, 0xA9, 0x07]);
    cpu.regs.a = 0xFF;
    let step = cpu.step().unwrap();
    assert_eq!(step.kind, StepKind::Unimplemented);
    assert_eq!(step.cycles, 5);
    assert_eq!(cpu.regs.pc, 0x0203);
    assert_eq!(mem(&mut cpu).peek(0x1234), 0x00);

    run(&mut cpu, 1);
    assert_eq!(cpu.regs.a, 0x07);
}

#[test]
fn base_variant_still_runs_documented_opcodes() {
    // LDX #$05; DEX; BNE -3
    let mut cpu = setup_variant(Variant::Mos6502, &[0xA2, 0x05, 0xCA, 0xD0, 0xFD]);
    run(&mut cpu, 1 + 2 * 5);
    assert_eq!(cpu.regs.x, 0);
    assert_eq!(cpu.regs.pc, 0x0205);
}

#[test]
fn jsr_rts_round_trip() {
    // JSR $0300; ... $0300: LDA #$55; RTS
    let mut cpu = setup(&[0x20, 0x00, 0x03, 0xEA]);
    cpu.regs.s = 0xFF;
    mem(&mut cpu).load(0x0300, &[0xA9, 0x55, 0x60]);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0x0300);
    assert_eq!(mem(&mut cpu).peek(0x01FF), 0x02);
    assert_eq!(mem(&mut cpu).peek(0x01FE), 0x02);
    run(&mut cpu, 2);
    assert_eq!(cpu.regs.pc, 0x0203);
    assert_eq!(cpu.regs.a, 0x55);
    assert_eq!(cpu.regs.s, 0xFF);
}

#[test]
fn rts_immediate_drops_arguments() {
    // Return address $0250 - 1 on the stack, two argument bytes below it.
    let mut cpu = setup(&[0x62, 0x02]); // RTS #2
    cpu.regs.s = 0xFD;
    mem(&mut cpu).load(0x01FE, &[0x4F, 0x02]);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0x0250);
    assert_eq!(cpu.regs.s, 0x01);
}

#[test]
fn bsr_pushes_return_and_branches() {
    // BSR +$0100
    let mut cpu = setup(&[0x63, 0x00, 0x01]);
    cpu.regs.s = 0xFF;
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0x0303);
    assert_eq!(mem(&mut cpu).peek(0x01FF), 0x02);
    assert_eq!(mem(&mut cpu).peek(0x01FE), 0x02);
}

#[test]
fn jmp_indexed_indirect() {
    // JMP ($1000,X)
    let mut cpu = setup(&[0x7C, 0x00, 0x10]);
    cpu.regs.x = 0x04;
    mem(&mut cpu).load(0x1004, &[0xCD, 0xAB]);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0xABCD);
}

#[test]
fn jmp_indirect_reads_across_page() {
    // JMP ($10FF): the high byte comes from $1100.
    let mut cpu = setup(&[0x6C, 0xFF, 0x10]);
    let memory = mem(&mut cpu);
    memory.write(0x10FF, 0x34);
    memory.write(0x1100, 0x12);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0x1234);
}

#[test]
fn rti_restores_status_and_pc() {
    let mut cpu = setup(&[0x40]);
    cpu.regs.s = 0xFC;
    mem(&mut cpu).load(0x01FD, &[flags::C | flags::V, 0x00, 0x40]);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0x4000);
    assert!(cpu.regs.p.carry());
    assert!(cpu.regs.p.overflow());
    assert_eq!(cpu.regs.s, 0xFF);
}

#[test]
fn adc_binary_overflow() {
    let mut cpu = setup(&[0x69, 0x50]); // ADC #$50
    cpu.regs.a = 0x50;
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.a, 0xA0);
    assert!(cpu.regs.p.overflow());
    assert!(cpu.regs.p.negative());
    assert!(!cpu.regs.p.carry());
}

#[test]
fn adc_decimal_carries() {
    // SED; SEC; ADC #$58 with A=$46 -> $05, C=1
    let mut cpu = setup(&[0xF8, 0x38, 0x69, 0x58]);
    cpu.regs.a = 0x46;
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.a, 0x05);
    assert!(cpu.regs.p.carry());
}

#[test]
fn sbc_decimal_borrows() {
    // SED; SEC; SBC #$13 with A=$40 -> $27, C=1
    let mut cpu = setup(&[0xF8, 0x38, 0xE9, 0x13]);
    cpu.regs.a = 0x40;
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.a, 0x27);
    assert!(cpu.regs.p.carry());
}

#[test]
fn adc_decimal_sets_zero_from_bcd_result() {
    // SED; CLC; ADC #$01 with A=$99 -> $00, C=1
    let mut cpu = setup(&[0xF8, 0x18, 0x69, 0x01]);
    cpu.regs.a = 0x99;
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.regs.p.carry());
    assert!(cpu.regs.p.zero());
    assert!(!cpu.regs.p.negative());
}

#[test]
fn adc_decimal_flags_follow_binary_sum_on_6502() {
    let mut cpu = setup_variant(Variant::Mos6502, &[0xF8, 0x18, 0x69, 0x01]);
    cpu.regs.a = 0x99;
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.regs.p.carry());
    assert!(!cpu.regs.p.zero());
    assert!(cpu.regs.p.negative());
}

#[test]
fn sbc_decimal_sets_negative_from_bcd_result() {
    // SED; SEC; SBC #$01 with A=$00 -> $99, C=0
    let mut cpu = setup(&[0xF8, 0x38, 0xE9, 0x01]);
    cpu.regs.a = 0x00;
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.a, 0x99);
    assert!(!cpu.regs.p.carry());
    assert!(cpu.regs.p.negative());
    assert!(!cpu.regs.p.zero());

    // SED; SEC; SBC #$21 with A=$00 -> $79: binary $DF would set N.
    let mut cpu = setup(&[0xF8, 0x38, 0xE9, 0x21]);
    cpu.regs.a = 0x00;
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.a, 0x79);
    assert!(!cpu.regs.p.carry());
    assert!(!cpu.regs.p.negative());
}

#[test]
fn sbc_decimal_flags_follow_binary_result_on_6502() {
    let mut cpu = setup_variant(Variant::Mos6502, &[0xF8, 0x38, 0xE9, 0x21]);
    cpu.regs.a = 0x00;
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.a, 0x79);
    assert!(cpu.regs.p.negative());
}

#[test]
fn cpz_compares_z_register() {
    let mut cpu = setup(&[0xC2, 0x10]); // CPZ #$10
    cpu.regs.z = 0x10;
    run(&mut cpu, 1);
    assert!(cpu.regs.p.zero());
    assert!(cpu.regs.p.carry());
}

#[test]
fn neg_and_asr_accumulator() {
    // NEG; ASR
    let mut cpu = setup(&[0x42, 0x43]);
    cpu.regs.a = 0x01;
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.a, 0xFF);
    assert!(cpu.regs.p.negative());
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.a, 0xFF, "sign bit is preserved");
    assert!(cpu.regs.p.carry());
}

#[test]
fn inw_and_dew_work_on_words() {
    // INW $10; DEW $12
    let mut cpu = setup(&[0xE3, 0x10, 0xC3, 0x12]);
    mem(&mut cpu).load(0x0010, &[0xFF, 0x00, 0x00, 0x00]);
    run(&mut cpu, 1);
    assert_eq!(mem(&mut cpu).peek(0x0010), 0x00);
    assert_eq!(mem(&mut cpu).peek(0x0011), 0x01);
    assert!(!cpu.regs.p.zero());
    run(&mut cpu, 1);
    assert_eq!(mem(&mut cpu).peek(0x0012), 0xFF);
    assert_eq!(mem(&mut cpu).peek(0x0013), 0xFF);
    assert!(cpu.regs.p.negative());
}

#[test]
fn asw_and_row_shift_words() {
    // ASW $2000; ROW $2000
    let mut cpu = setup(&[0xCB, 0x00, 0x20, 0xEB, 0x00, 0x20]);
    mem(&mut cpu).load(0x2000, &[0x01, 0x80]);
    run(&mut cpu, 1);
    assert_eq!(mem(&mut cpu).peek(0x2000), 0x02);
    assert_eq!(mem(&mut cpu).peek(0x2001), 0x00);
    assert!(cpu.regs.p.carry());
    run(&mut cpu, 1);
    assert_eq!(mem(&mut cpu).peek(0x2000), 0x05);
    assert!(!cpu.regs.p.carry());
}

#[test]
fn phw_pushes_high_then_low() {
    // PHW #$1234
    let mut cpu = setup(&[0xF4, 0x34, 0x12]);
    cpu.regs.s = 0xFF;
    run(&mut cpu, 1);
    assert_eq!(mem(&mut cpu).peek(0x01FF), 0x12);
    assert_eq!(mem(&mut cpu).peek(0x01FE), 0x34);
    assert_eq!(cpu.regs.s, 0xFD);
}

#[test]
fn stack_indirect_y_store() {
    // STA ($02,SP),Y with S=$F0: pointer at $01F2.
    let mut cpu = setup(&[0x82, 0x02]);
    cpu.regs.s = 0xF0;
    cpu.regs.y = 0x01;
    cpu.regs.a = 0x99;
    mem(&mut cpu).load(0x01F2, &[0x00, 0x40]);
    run(&mut cpu, 1);
    assert_eq!(mem(&mut cpu).peek(0x4001), 0x99);
}

#[test]
fn stz_stores_z_register() {
    // STZ $10; LDZ #$33; STZ $11
    let mut cpu = setup(&[0x64, 0x10, 0xA3, 0x33, 0x64, 0x11]);
    mem(&mut cpu).load(0x0010, &[0xAA, 0xAA]);
    run(&mut cpu, 3);
    assert_eq!(mem(&mut cpu).peek(0x0010), 0x00);
    assert_eq!(mem(&mut cpu).peek(0x0011), 0x33);
}

#[test]
fn bit_immediate_only_touches_zero() {
    let mut cpu = setup(&[0x89, 0xC0]); // BIT #$C0
    cpu.regs.a = 0x3F;
    run(&mut cpu, 1);
    assert!(cpu.regs.p.zero());
    assert!(!cpu.regs.p.negative());
    assert!(!cpu.regs.p.overflow());
}

#[test]
fn initialize_clears_registers_and_cycles() {
    let mut cpu = setup(&[0xA9, 0x01, 0xA2, 0x02]);
    run(&mut cpu, 2);
    assert_eq!(cpu.cycles(), 4);
    cpu.initialize();
    assert_eq!(cpu.regs.a, 0);
    assert_eq!(cpu.regs.x, 0);
    assert_eq!(cpu.regs.pc, 0);
    assert_eq!(cpu.cycles(), 0);
    assert!(cpu.memory().is_some(), "binding survives initialisation");
}
