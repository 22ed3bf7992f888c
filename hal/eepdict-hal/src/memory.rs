//! Non-volatile memory abstractions
//!
//! Provides the byte-granular primitive that the dictionary layer is built
//! on. Implementations are blocking: every call runs to completion before
//! returning.

/// Value of an erased memory cell
pub const ERASED_BYTE: u8 = 0xFF;

/// Errors from non-volatile memory operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MemoryError {
    /// Address lies outside the memory region
    OutOfRange,
    /// The underlying device reported a failure
    Device,
}

/// Byte-addressable non-volatile memory of fixed capacity
///
/// Addresses run from `0` to `capacity() - 1`. Implementations must reject
/// addresses at or beyond the capacity with [`MemoryError::OutOfRange`].
pub trait NvMemory {
    /// Number of addressable bytes
    fn capacity(&self) -> usize;

    /// Read a single byte
    fn read_byte(&mut self, address: usize) -> Result<u8, MemoryError>;

    /// Write a single byte
    fn write_byte(&mut self, address: usize, value: u8) -> Result<(), MemoryError>;
}

impl<T: NvMemory + ?Sized> NvMemory for &mut T {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read_byte(&mut self, address: usize) -> Result<u8, MemoryError> {
        (**self).read_byte(address)
    }

    fn write_byte(&mut self, address: usize, value: u8) -> Result<(), MemoryError> {
        (**self).write_byte(address, value)
    }
}
