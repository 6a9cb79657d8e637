//! Register-mapped devices and audio channels.

/// A device exposing a small file of byte registers to the host bus.
pub trait RegisterDevice {
    /// Error raised for addresses or values the device does not accept.
    type Error;

    /// Store `value` into register `address`.
    fn write_register(&mut self, address: usize, value: u32) -> Result<(), Self::Error>;

    /// Return the last value written to register `address`.
    fn read_register(&self, address: usize) -> Result<u8, Self::Error>;
}

/// A sound source that renders interleaved stereo `i16` samples.
///
/// The mixer sizes the buffer once, asks the channel to `generate` into it,
/// then reads it back through `buffer`.
pub trait AudioChannel {
    /// Error raised when generation cannot fit the request.
    type Error;

    /// Allocate or resize the output buffer to `length` samples.
    fn set_buffer_length(&mut self, length: usize);

    /// The output buffer as last generated.
    fn buffer(&self) -> &[i16];

    /// Render `length` samples (`length / 2` stereo pairs) into the buffer.
    fn generate(&mut self, length: usize) -> Result<(), Self::Error>;
}
