//! CPU core trait.

use crate::Bus;

/// A CPU core driven one instruction at a time.
///
/// The bus is passed in, not owned, so a host can share it with other
/// components between steps. Cores that own their memory offer their own
/// `step()` on top of this.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// The per-instruction report returned by [`Cpu::step_with`].
    type Step;

    /// Execute exactly one instruction against `bus`.
    fn step_with<B: Bus>(&mut self, bus: &mut B) -> Self::Step;

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Total cycles charged since the last initialisation.
    fn cycles(&self) -> u64;

    /// Reset the CPU to its initial state.
    fn reset<B: Bus>(&mut self, bus: &mut B);
}
