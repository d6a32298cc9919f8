//! Encoding DBN metadata and records into files and streams, with optional
//! Zstandard compression.

mod dbn;
mod dyn_writer;
mod stream;

use std::io;

pub use dbn::{Encoder, FileEncoder, MetadataEncoder, RecordEncoder};
pub use dyn_writer::DynWriter;
pub use stream::StreamWriter;

use crate::error::{Error, Result};

/// Level 0 lets the zstd library pick its default compression level.
pub(crate) const ZSTD_COMPRESSION_LEVEL: i32 = 0;

pub(crate) fn zstd_encoder<'a, W: io::Write>(
    writer: W,
) -> Result<zstd::stream::AutoFinishEncoder<'a, W>> {
    Ok(raw_zstd_encoder(writer)?.auto_finish())
}

/// Creates a zstd encoder that must be explicitly finished. Used where the
/// caller needs the final flush to be fallible rather than hidden in a drop.
pub(crate) fn raw_zstd_encoder<'a, W: io::Write>(writer: W) -> Result<zstd::Encoder<'a, W>> {
    let mut encoder = zstd::Encoder::new(writer, ZSTD_COMPRESSION_LEVEL)
        .map_err(|e| Error::io(e, "creating zstd encoder"))?;
    encoder
        .include_checksum(true)
        .map_err(|e| Error::io(e, "setting zstd checksum flag"))?;
    Ok(encoder)
}
