//! embedded-storage adapter
//!
//! Wraps any [`embedded_storage::Storage`] (EEPROM drivers, emulated EEPROM
//! over flash, etc.) so it can back a dictionary.
//!
//! Only available with the `embedded-storage` feature.

use embedded_storage::Storage;

use crate::memory::{MemoryError, NvMemory};

/// [`NvMemory`] implementation over an embedded-storage device
pub struct StorageMemory<S> {
    storage: S,
}

impl<S: Storage> StorageMemory<S> {
    /// Wrap a storage device
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Get the wrapped device for low-level access
    pub fn storage(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Consume the adapter and return the wrapped device
    pub fn into_inner(self) -> S {
        self.storage
    }

    fn offset(&self, address: usize) -> Result<u32, MemoryError> {
        if address >= self.storage.capacity() {
            return Err(MemoryError::OutOfRange);
        }
        u32::try_from(address).map_err(|_| MemoryError::OutOfRange)
    }
}

impl<S: Storage> NvMemory for StorageMemory<S> {
    fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    fn read_byte(&mut self, address: usize) -> Result<u8, MemoryError> {
        let offset = self.offset(address)?;
        let mut byte = [0u8; 1];
        self.storage
            .read(offset, &mut byte)
            .map_err(|_| MemoryError::Device)?;
        Ok(byte[0])
    }

    fn write_byte(&mut self, address: usize, value: u8) -> Result<(), MemoryError> {
        let offset = self.offset(address)?;
        self.storage
            .write(offset, &[value])
            .map_err(|_| MemoryError::Device)
    }
}
