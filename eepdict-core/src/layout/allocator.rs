//! Address allocation
//!
//! Values are packed against the top of the region. Binding `i` of `N`
//! ends where binding `i + 1` starts, and the last-registered binding ends
//! exactly at the region capacity:
//!
//! ```text
//! address(i) = capacity - (size(i) + size(i + 1) + ... + size(N - 1))
//! ```
//!
//! So the first-registered binding sits lowest and the last-registered
//! highest. Stored data depends on this order; do not change it.

use crate::config::{index_footprint, MAX_REGION_CAPACITY};
use crate::error::DictError;
use crate::index::BindingIndex;

/// Capacity usable with 16-bit addresses
pub fn addressable(capacity: usize) -> usize {
    capacity.min(MAX_REGION_CAPACITY)
}

/// Lowest value address for a layout of `count` bindings totalling `total` bytes
///
/// Fails with [`DictError::RegionFull`] if the values would reach down into
/// the header and index.
pub fn values_base(capacity: usize, count: usize, total: usize) -> Result<usize, DictError> {
    let base = addressable(capacity)
        .checked_sub(total)
        .ok_or(DictError::RegionFull)?;
    if base < index_footprint(count) {
        return Err(DictError::RegionFull);
    }
    Ok(base)
}

/// Assign every binding its address, in registration order
pub fn assign_addresses(index: &mut BindingIndex<'_>, capacity: usize) -> Result<(), DictError> {
    let mut address = values_base(capacity, index.len(), index.total_size())?;

    for binding in index.iter_mut() {
        let assigned = u16::try_from(address).map_err(|_| DictError::RegionFull)?;
        binding.set_address(assigned);
        address += binding.size() as usize;
    }

    debug!("Assigned addresses for {} bindings", index.len());
    Ok(())
}
