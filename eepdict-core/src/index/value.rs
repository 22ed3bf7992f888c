//! Persistent value descriptors
//!
//! A binding refers to caller-owned storage through `&dyn Persistent`. The
//! trait reports a fixed byte size and converts the value to and from its
//! little-endian stored form. Implementations over [`Cell`] let the caller
//! keep reading and updating the variable while the dictionary holds a
//! shared reference to it.

use core::cell::Cell;

/// Fixed-size value that can be saved to and loaded from raw bytes
///
/// `save` and `load` are always called with a slice of exactly
/// [`size`](Persistent::size) bytes.
pub trait Persistent {
    /// Stored size in bytes (must not change over the value's lifetime)
    fn size(&self) -> usize;

    /// Encode the current value into `out`
    fn save(&self, out: &mut [u8]);

    /// Replace the current value with the one encoded in `data`
    fn load(&self, data: &[u8]);
}

macro_rules! impl_persistent_le {
    ($($t:ty),* $(,)?) => {
        $(
            impl Persistent for Cell<$t> {
                fn size(&self) -> usize {
                    core::mem::size_of::<$t>()
                }

                fn save(&self, out: &mut [u8]) {
                    out.copy_from_slice(&self.get().to_le_bytes());
                }

                fn load(&self, data: &[u8]) {
                    let mut raw = [0u8; core::mem::size_of::<$t>()];
                    raw.copy_from_slice(data);
                    self.set(<$t>::from_le_bytes(raw));
                }
            }
        )*
    };
}

impl_persistent_le!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, f32, f64);

impl Persistent for Cell<bool> {
    fn size(&self) -> usize {
        1
    }

    fn save(&self, out: &mut [u8]) {
        out[0] = self.get() as u8;
    }

    fn load(&self, data: &[u8]) {
        self.set(data[0] != 0);
    }
}

impl<const N: usize> Persistent for Cell<[u8; N]> {
    fn size(&self) -> usize {
        N
    }

    fn save(&self, out: &mut [u8]) {
        out.copy_from_slice(&self.get());
    }

    fn load(&self, data: &[u8]) {
        let mut raw = [0u8; N];
        raw.copy_from_slice(data);
        self.set(raw);
    }
}
