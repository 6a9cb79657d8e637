//! PSG integration errors.

use thiserror::Error;

/// Errors raised when the PSG is driven incorrectly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PsgError {
    /// Register address outside 0-15.
    #[error("undefined register: {0}")]
    InvalidRegister(usize),

    /// Register value outside 0-255.
    #[error("value {value} out of range for register {address}")]
    InvalidValue { address: usize, value: u32 },

    /// `generate` asked for more samples than the buffer holds.
    #[error("buffer holds {available} samples, {requested} requested")]
    BufferTooSmall { requested: usize, available: usize },

    /// A host sample rate of zero leaves the base step undefined.
    #[error("sample rate must be non-zero")]
    ZeroSampleRate,
}
