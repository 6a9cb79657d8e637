//! CPU integration errors.

use thiserror::Error;

/// Errors raised when the engine is driven incorrectly.
///
/// Unimplemented opcodes are not errors; they surface as
/// [`StepKind::Unimplemented`](crate::StepKind::Unimplemented).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpuError {
    /// `step`, `run` or `reset` was called before `bind_memory`.
    #[error("no memory bound to the CPU; call bind_memory before stepping")]
    MemoryNotBound,
}
