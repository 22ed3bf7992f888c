//! Persisted layout
//!
//! Address allocation, header/index validation, and value transfer between
//! bindings and memory.

pub mod allocator;
pub mod validator;

pub use allocator::assign_addresses;
pub use validator::LayoutValidator;

use eepdict_hal::{NvMemory, ERASED_BYTE};

use crate::config::{index_footprint, MAX_BINDINGS, MAX_VALUE_SIZE};
use crate::error::DictError;
use crate::index::Binding;
use crate::store::ByteStore;

/// Write a binding's current value to its address
pub(crate) fn store_value<M: NvMemory>(
    store: &mut ByteStore<M>,
    binding: &Binding<'_>,
) -> Result<(), DictError> {
    let address = binding.address().ok_or(DictError::NotInitialized)?;
    let mut buffer = [0u8; MAX_VALUE_SIZE];
    let data = binding.save_into(&mut buffer);
    store.write(address as usize, data)
}

/// Load a binding's value from its address
///
/// If the read fails the binding receives zeroes.
pub(crate) fn load_value<M: NvMemory>(
    store: &mut ByteStore<M>,
    binding: &Binding<'_>,
) -> Result<(), DictError> {
    let address = binding.address().ok_or(DictError::NotInitialized)?;
    let mut buffer = [0u8; MAX_VALUE_SIZE];
    let data = &mut buffer[..binding.size() as usize];
    let result = store.read(address as usize, data);
    binding.load_from(data);
    result
}

/// Invalidate any stored layout
///
/// Overwrites the header and the largest possible index with `0xFF`, so the
/// next initialization always takes the rewrite path. Values are left as
/// they are.
pub fn erase_layout<M: NvMemory>(memory: &mut M) -> Result<(), DictError> {
    let mut store = ByteStore::new(memory);
    let len = index_footprint(MAX_BINDINGS).min(store.capacity());
    store.write(0, &[ERASED_BYTE; index_footprint(MAX_BINDINGS)][..len])?;
    info!("Erased stored layout ({} bytes)", len);
    Ok(())
}
