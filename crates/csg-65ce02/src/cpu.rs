//! CPU engine: fetch, decode, operand resolution and bookkeeping.
//!
//! Each step executes one whole instruction and charges the opcode's fixed
//! cost from [`OPCODE_TABLE`]. Instruction bodies live in `execute.rs`.

use emu_core::{Bus, Cpu, Observable, Value};

use crate::addressing::{AddressingMode, Operand};
use crate::flags::{B, C, D, E, I, N, V, Z};
use crate::opcodes::{OPCODE_TABLE, Opcode};
use crate::registers::STACK_PAGE;
use crate::{CpuError, Registers};

/// Address of the little-endian reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Which instruction set the engine decodes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Documented NMOS 6502 opcodes only. Everything else is reported as
    /// not implemented.
    Mos6502,
    /// Full 65CE02 set: Z register, word branches, bit operations.
    #[default]
    Csg65ce02,
}

impl Variant {
    /// Whether `opcode` is decoded by this variant.
    #[must_use]
    pub const fn supports(self, opcode: &Opcode) -> bool {
        match self {
            Self::Mos6502 => opcode.nmos,
            Self::Csg65ce02 => true,
        }
    }

    /// Short part name used in log messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mos6502 => "6502",
            Self::Csg65ce02 => "65CE02",
        }
    }
}

/// How a step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// The instruction ran to completion.
    Executed,
    /// BRK: the break flag was set and one operand byte skipped. No vector
    /// is taken; execution continues with the next opcode.
    Break,
    /// The opcode is not modelled. Its cost was charged and its operand
    /// bytes skipped; registers are otherwise untouched.
    Unimplemented,
}

/// Report for one executed instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Address the opcode was fetched from.
    pub pc: u16,
    pub opcode: u8,
    /// Cycles charged for this instruction.
    pub cycles: u8,
    pub kind: StepKind,
}

/// The CPU engine.
///
/// Owns its register file and cycle counter exclusively. Memory is either
/// bound once with [`bind_memory`](Self::bind_memory) and driven through
/// [`step`](Self::step), or lent per call through [`Cpu::step_with`].
#[derive(Debug)]
pub struct Csg65ce02<M> {
    /// CPU registers.
    pub regs: Registers,
    variant: Variant,
    memory: Option<M>,
    /// Total cycles charged since initialisation.
    cycles: u64,
}

impl<M> Default for Csg65ce02<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Csg65ce02<M> {
    /// Create an engine decoding the full 65CE02 set, with all registers
    /// cleared and no memory bound.
    #[must_use]
    pub fn new() -> Self {
        Self::with_variant(Variant::default())
    }

    /// Create an engine decoding `variant`'s instruction set, with all
    /// registers cleared and no memory bound.
    #[must_use]
    pub fn with_variant(variant: Variant) -> Self {
        Self {
            regs: Registers::new(),
            variant,
            memory: None,
            cycles: 0,
        }
    }

    /// The instruction set this engine decodes.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Clear every register and the cycle counter. Bound memory is kept.
    pub fn initialize(&mut self) {
        self.regs = Registers::new();
        self.cycles = 0;
    }

    /// Attach the memory the engine reads and writes, replacing any
    /// previous binding.
    pub fn bind_memory(&mut self, memory: M) {
        log::debug!("{}: memory bound", self.variant.name());
        self.memory = Some(memory);
    }

    /// Detach and return the bound memory.
    pub fn unbind_memory(&mut self) -> Option<M> {
        self.memory.take()
    }

    #[must_use]
    pub fn memory(&self) -> Option<&M> {
        self.memory.as_ref()
    }

    pub fn memory_mut(&mut self) -> Option<&mut M> {
        self.memory.as_mut()
    }

    /// Total cycles charged since initialisation.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Fetch, decode and execute one instruction.
    pub(crate) fn execute_one<B: Bus>(&mut self, bus: &mut B) -> Step {
        let pc = self.regs.pc;
        let opcode = self.fetch(bus);
        let entry = OPCODE_TABLE[opcode as usize];
        self.cycles += u64::from(entry.cycles);

        let instruction = entry.instruction;
        if !self.variant.supports(&entry) || !instruction.is_modelled() {
            self.regs.pc = self
                .regs
                .pc
                .wrapping_add(u16::from(entry.mode.operand_bytes()));
            log::warn!(
                "{}: instruction not implemented: ${opcode:02X} {} at ${pc:04X}",
                self.variant.name(),
                instruction.mnemonic(),
            );
            return Step {
                pc,
                opcode,
                cycles: entry.cycles,
                kind: StepKind::Unimplemented,
            };
        }

        log::trace!("${pc:04X}: ${opcode:02X} {}", instruction.mnemonic());
        let operand = self.resolve(bus, entry.mode);
        let kind = self.execute(bus, instruction, operand);
        Step {
            pc,
            opcode,
            cycles: entry.cycles,
            kind,
        }
    }

    /// Initialise, then load PC from the reset vector.
    fn reset_with<B: Bus>(&mut self, bus: &mut B) {
        self.initialize();
        self.regs.pc = read_word(bus, RESET_VECTOR);
        log::debug!(
            "{}: reset, PC=${:04X}",
            self.variant.name(),
            self.regs.pc
        );
    }

    // ========================================================================
    // Fetch and operand resolution
    // ========================================================================

    pub(crate) fn fetch<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    fn fetch_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch(bus);
        let hi = self.fetch(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// One-byte base-page address plus an index, wrapped to 16 bits.
    fn base_page<B: Bus>(&mut self, bus: &mut B, index: u8) -> u16 {
        u16::from(self.fetch(bus)).wrapping_add(u16::from(index))
    }

    fn absolute<B: Bus>(&mut self, bus: &mut B, index: u8) -> u16 {
        self.fetch_word(bus).wrapping_add(u16::from(index))
    }

    /// Dereference a base-page pointer and add an index.
    fn indirect_indexed<B: Bus>(&mut self, bus: &mut B, index: u8) -> u16 {
        let pointer = u16::from(self.fetch(bus));
        read_word(bus, pointer).wrapping_add(u16::from(index))
    }

    fn relative<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let displacement = self.fetch(bus) as i8;
        self.regs.pc.wrapping_add_signed(i16::from(displacement))
    }

    fn resolve<B: Bus>(&mut self, bus: &mut B, mode: AddressingMode) -> Operand {
        match mode {
            AddressingMode::Implied => Operand::None,
            AddressingMode::Accumulator => Operand::Accumulator,
            AddressingMode::Immediate => Operand::Immediate(self.fetch(bus)),
            AddressingMode::ImmediateWord => Operand::ImmediateWord(self.fetch_word(bus)),
            AddressingMode::BasePage => Operand::Address(self.base_page(bus, 0)),
            AddressingMode::BasePageX => Operand::Address(self.base_page(bus, self.regs.x)),
            AddressingMode::BasePageY => Operand::Address(self.base_page(bus, self.regs.y)),
            AddressingMode::Absolute => Operand::Address(self.absolute(bus, 0)),
            AddressingMode::AbsoluteX => Operand::Address(self.absolute(bus, self.regs.x)),
            AddressingMode::AbsoluteY => Operand::Address(self.absolute(bus, self.regs.y)),
            AddressingMode::IndexedIndirect => {
                let pointer = self.fetch(bus).wrapping_add(self.regs.x);
                Operand::Address(read_word(bus, u16::from(pointer)))
            }
            AddressingMode::IndirectY => {
                Operand::Address(self.indirect_indexed(bus, self.regs.y))
            }
            AddressingMode::IndirectZ => {
                Operand::Address(self.indirect_indexed(bus, self.regs.z))
            }
            AddressingMode::StackIndirectY => {
                let offset = self.fetch(bus);
                let pointer = STACK_PAGE | u16::from(self.regs.s.wrapping_add(offset));
                Operand::Address(read_word(bus, pointer).wrapping_add(u16::from(self.regs.y)))
            }
            AddressingMode::Indirect => {
                let pointer = self.fetch_word(bus);
                Operand::Address(read_word(bus, pointer))
            }
            AddressingMode::AbsoluteIndexedIndirect => {
                let pointer = self.absolute(bus, self.regs.x);
                Operand::Address(read_word(bus, pointer))
            }
            AddressingMode::Relative => Operand::Target(self.relative(bus)),
            AddressingMode::RelativeWord => {
                let displacement = self.fetch_word(bus) as i16;
                Operand::Target(self.regs.pc.wrapping_add_signed(displacement))
            }
            AddressingMode::BasePageRelative => {
                let address = u16::from(self.fetch(bus));
                let target = self.relative(bus);
                Operand::BitTarget { address, target }
            }
            AddressingMode::Augment => {
                self.regs.pc = self.regs.pc.wrapping_add(3);
                Operand::None
            }
        }
    }
}

impl<M: Bus> Csg65ce02<M> {
    /// Execute one instruction against the bound memory.
    pub fn step(&mut self) -> Result<Step, CpuError> {
        let mut memory = self.memory.take().ok_or(CpuError::MemoryNotBound)?;
        let step = self.execute_one(&mut memory);
        self.memory = Some(memory);
        Ok(step)
    }

    /// Step until at least `budget` cycles have been charged. Returns the
    /// cycles actually charged, which may overshoot by one instruction.
    pub fn run(&mut self, budget: u64) -> Result<u64, CpuError> {
        let mut memory = self.memory.take().ok_or(CpuError::MemoryNotBound)?;
        let mut spent = 0;
        while spent < budget {
            spent += u64::from(self.execute_one(&mut memory).cycles);
        }
        self.memory = Some(memory);
        Ok(spent)
    }

    /// Clear all registers and load PC from the reset vector at $FFFC.
    pub fn reset(&mut self) -> Result<(), CpuError> {
        let mut memory = self.memory.take().ok_or(CpuError::MemoryNotBound)?;
        self.reset_with(&mut memory);
        self.memory = Some(memory);
        Ok(())
    }
}

/// Read a little-endian word. The high byte comes from `address + 1`,
/// wrapping at $FFFF.
pub(crate) fn read_word<B: Bus>(bus: &mut B, address: u16) -> u16 {
    let lo = bus.read(address);
    let hi = bus.read(address.wrapping_add(1));
    u16::from_le_bytes([lo, hi])
}

// ============================================================================
// Trait implementations
// ============================================================================

impl<M> Cpu for Csg65ce02<M> {
    type Registers = Registers;
    type Step = Step;

    fn step_with<B: Bus>(&mut self, bus: &mut B) -> Step {
        self.execute_one(bus)
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Registers {
        self.regs
    }

    fn cycles(&self) -> u64 {
        self.cycles
    }

    fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.reset_with(bus);
    }
}

impl<M> Observable for Csg65ce02<M> {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "pc" => Some(self.regs.pc.into()),
            "a" => Some(self.regs.a.into()),
            "x" => Some(self.regs.x.into()),
            "y" => Some(self.regs.y.into()),
            "z" => Some(self.regs.z.into()),
            "s" | "sp" => Some(self.regs.s.into()),
            "p" | "status" => Some(self.regs.p.0.into()),
            "flags.c" | "c" => Some(self.regs.p.is_set(C).into()),
            "flags.z" => Some(self.regs.p.is_set(Z).into()),
            "flags.i" | "i" => Some(self.regs.p.is_set(I).into()),
            "flags.d" | "d" => Some(self.regs.p.is_set(D).into()),
            "flags.b" | "b" => Some(self.regs.p.is_set(B).into()),
            "flags.e" | "e" => Some(self.regs.p.is_set(E).into()),
            "flags.v" | "v" => Some(self.regs.p.is_set(V).into()),
            "flags.n" | "n" => Some(self.regs.p.is_set(N).into()),
            "cycles" => Some(Value::U64(self.cycles)),
            "variant" => Some(self.variant.name().into()),
            "memory_bound" => Some(self.memory.is_some().into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "pc",
            "a",
            "x",
            "y",
            "z",
            "s",
            "p",
            "flags.c",
            "flags.z",
            "flags.i",
            "flags.d",
            "flags.b",
            "flags.e",
            "flags.v",
            "flags.n",
            "cycles",
            "variant",
            "memory_bound",
        ]
    }
}
