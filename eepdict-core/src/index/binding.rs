//! A single registered binding

use core::fmt;

use super::value::Persistent;

/// A named, fixed-size variable mapped to a non-volatile memory address
///
/// The key itself is not kept; the binding is identified by its
/// fingerprint. The referenced storage is owned by the caller and must
/// outlive the dictionary.
#[derive(Clone, Copy)]
pub struct Binding<'a> {
    fingerprint: u16,
    size: u8,
    location: &'a dyn Persistent,
    address: Option<u16>,
}

impl<'a> Binding<'a> {
    /// Create an unassigned binding
    pub(crate) fn new(fingerprint: u16, size: u8, location: &'a dyn Persistent) -> Self {
        Self {
            fingerprint,
            size,
            location,
            address: None,
        }
    }

    /// Key fingerprint
    pub fn fingerprint(&self) -> u16 {
        self.fingerprint
    }

    /// Value size in bytes
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Assigned address, or `None` before allocation
    pub fn address(&self) -> Option<u16> {
        self.address
    }

    pub(crate) fn set_address(&mut self, address: u16) {
        self.address = Some(address);
    }

    /// Serialized index entry: fingerprint (little-endian) then size
    pub fn index_entry(&self) -> [u8; 3] {
        let [lo, hi] = self.fingerprint.to_le_bytes();
        [lo, hi, self.size]
    }

    /// Encode the caller's current value into `buffer`
    ///
    /// Returns the encoded prefix of `buffer`.
    pub(crate) fn save_into<'b>(&self, buffer: &'b mut [u8]) -> &'b [u8] {
        let out = &mut buffer[..self.size as usize];
        self.location.save(out);
        out
    }

    /// Replace the caller's value with the bytes in `data`
    pub(crate) fn load_from(&self, data: &[u8]) {
        self.location.load(&data[..self.size as usize]);
    }
}

impl fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("fingerprint", &self.fingerprint)
            .field("size", &self.size)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
