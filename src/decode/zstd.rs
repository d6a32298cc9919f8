use super::FromLittleEndianSlice;

/// Magic number at the beginning of a Zstandard frame.
const ZSTD_MAGIC_NUMBER: u32 = 0xFD2FB528;

/// Returns `true` if `bytes` begin with the Zstandard frame magic
/// `28 B5 2F FD`.
pub(crate) fn starts_with_prefix(bytes: &[u8]) -> bool {
    if bytes.len() < 4 {
        return false;
    }
    u32::from_le_slice(&bytes[..4]) == ZSTD_MAGIC_NUMBER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zstd_stream_starts_with_prefix() {
        let compressed = zstd::stream::encode_all(&b"DBN"[..], 0).unwrap();
        assert!(starts_with_prefix(&compressed));
        assert_eq!(&compressed[..4], &[0x28, 0xB5, 0x2F, 0xFD]);
    }

    #[test]
    fn test_raw_dbn_does_not_match() {
        assert!(!starts_with_prefix(b"DBN\x02"));
        assert!(!starts_with_prefix(b"\x28\xB5"));
    }
}
