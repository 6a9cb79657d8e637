//! Core traits and types shared by the emulation engines.
//!
//! Engines are plain state machines driven by explicit calls from a host.
//! Nothing here owns a thread, a timer or a callback.

mod bus;
mod cpu;
mod device;
mod observable;

pub use bus::{Bus, SimpleBus};
pub use cpu::Cpu;
pub use device::{AudioChannel, RegisterDevice};
pub use observable::{Observable, Value};
