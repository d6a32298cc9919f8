//! Decoding DBN metadata and records from files and streams, with transparent
//! Zstandard decompression.

mod dbn;
mod dyn_reader;
mod stream;
pub(crate) mod zstd;

use std::mem;

pub use dbn::{Decoder, FileDecoder, MetadataDecoder, RecordDecoder};
pub use dyn_reader::DynReader;
pub use stream::RecordIter;

pub(crate) trait FromLittleEndianSlice {
    fn from_le_slice(slice: &[u8]) -> Self;
}

macro_rules! impl_from_le_slice {
    ($ty:ty) => {
        impl FromLittleEndianSlice for $ty {
            /// NOTE: assumes the length of `slice` is at least `size_of::<Self>()`
            fn from_le_slice(slice: &[u8]) -> Self {
                let (bytes, _) = slice.split_at(mem::size_of::<Self>());
                Self::from_le_bytes(bytes.try_into().unwrap())
            }
        }
    };
}

impl_from_le_slice!(u16);
impl_from_le_slice!(i16);
impl_from_le_slice!(u32);
impl_from_le_slice!(i32);
impl_from_le_slice!(u64);
impl_from_le_slice!(i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_le_slice() {
        let bytes = [0x01, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0x7F];
        assert_eq!(u32::from_le_slice(&bytes), 1);
        assert_eq!(i64::from_le_slice(&bytes), i64::from_le_bytes(bytes));
    }
}
