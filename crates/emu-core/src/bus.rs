//! Memory port interface.

/// Byte-addressable memory port over a 16-bit address space.
///
/// The CPU reads and writes through this trait and assumes nothing beyond
/// value storage and retrieval. Memory-mapped I/O is the implementor's
/// business and stays transparent to the CPU.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);
}

impl<B: Bus + ?Sized> Bus for &mut B {
    fn read(&mut self, address: u16) -> u8 {
        (**self).read(address)
    }

    fn write(&mut self, address: u16, value: u8) {
        (**self).write(address, value);
    }
}

/// Flat 64 KiB RAM with no mapped devices.
///
/// Useful for tests and for hosts that only need plain memory.
#[derive(Clone)]
pub struct SimpleBus {
    ram: Box<[u8; 0x1_0000]>,
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleBus {
    /// Create a bus with all 64 KiB cleared to zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: Box::new([0; 0x1_0000]),
        }
    }

    /// Copy `bytes` into RAM starting at `address`, wrapping at $FFFF.
    pub fn load(&mut self, address: u16, bytes: &[u8]) {
        let mut addr = address;
        for &byte in bytes {
            self.ram[addr as usize] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// Read a byte without going through the `Bus` trait.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.ram[address as usize]
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.ram[address as usize]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.ram[address as usize] = value;
    }
}

impl std::fmt::Debug for SimpleBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleBus").finish_non_exhaustive()
    }
}
