//! RAM-backed EEPROM model
//!
//! Simulates an EEPROM in memory for host builds and unit tests. Supports:
//! - Erased-state initialization (all bytes `0xFF`)
//! - Write counting, to verify that read-only paths never touch memory
//! - Direct inspection and corruption of the contents

use crate::memory::{MemoryError, NvMemory, ERASED_BYTE};

/// In-memory EEPROM of `N` bytes
///
/// # Example
///
/// ```
/// use eepdict_hal::{NvMemory, RamEeprom};
///
/// let mut eeprom = RamEeprom::<64>::new();
/// eeprom.write_byte(3, 0x42).unwrap();
/// assert_eq!(eeprom.read_byte(3), Ok(0x42));
/// assert_eq!(eeprom.write_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RamEeprom<const N: usize> {
    bytes: [u8; N],
    writes: usize,
}

impl<const N: usize> RamEeprom<N> {
    /// Create an erased EEPROM (every byte `0xFF`)
    pub const fn new() -> Self {
        Self {
            bytes: [ERASED_BYTE; N],
            writes: 0,
        }
    }

    /// Create an EEPROM with every byte set to zero
    pub const fn zeroed() -> Self {
        Self {
            bytes: [0; N],
            writes: 0,
        }
    }

    /// Create an EEPROM holding the given contents
    pub const fn from_bytes(bytes: [u8; N]) -> Self {
        Self { bytes, writes: 0 }
    }

    /// Raw contents (for test verification)
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Mutable raw contents (for corruption injection)
    ///
    /// Changes made here are not counted as writes.
    pub fn as_bytes_mut(&mut self) -> &mut [u8; N] {
        &mut self.bytes
    }

    /// Number of byte writes performed through [`NvMemory`]
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Reset the write counter
    pub fn clear_write_count(&mut self) {
        self.writes = 0;
    }
}

impl<const N: usize> Default for RamEeprom<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> NvMemory for RamEeprom<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn read_byte(&mut self, address: usize) -> Result<u8, MemoryError> {
        self.bytes.get(address).copied().ok_or(MemoryError::OutOfRange)
    }

    fn write_byte(&mut self, address: usize, value: u8) -> Result<(), MemoryError> {
        let cell = self.bytes.get_mut(address).ok_or(MemoryError::OutOfRange)?;
        *cell = value;
        self.writes += 1;
        Ok(())
    }
}
