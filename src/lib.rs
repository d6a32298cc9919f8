//! A crate for encoding and decoding market data in the Databento Binary
//! Encoding (DBN), versions 2 and 3 of the format.
//!
//! The encoding is a compact binary container for normalized market data: a
//! [`Metadata`] header followed by a sequence of fixed-layout records, optionally
//! wrapped in a Zstandard stream. Reading and writing go through
//! [`decode::Decoder`] and [`encode::Encoder`]; [`encode::StreamWriter`] appends
//! records whose count and time range aren't known upfront and finalizes the
//! header on close. The convenience functions at the crate root cover the common
//! whole-file operations.
//!
//! All multi-byte integers on the wire are little-endian and are serialized
//! explicitly; none of the codecs rely on the in-memory layout of the record
//! structs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(clippy::missing_errors_doc)]

pub mod decode;
pub mod encode;
pub mod enums;
pub mod error;
pub mod flags;
#[macro_use]
mod macros;
pub mod metadata;
pub mod pretty;
pub mod record;
mod record_enum;
pub mod v2;
pub mod v3;

use std::{fs::File, io, path::Path};

pub use crate::{
    enums::{rtype, Action, Compression, InstrumentClass, RType, SType, Schema, Side},
    error::{Error, Result},
    flags::FlagSet,
    metadata::{Metadata, MetadataBuilder, SymbolMapping},
    record::{
        Bbo1MMsg, Bbo1SMsg, BboMsg, BidAskPair, Cbbo1MMsg, Cbbo1SMsg, CbboMsg, Cmbp1Msg,
        ConsolidatedBidAskPair, ErrorMsg, HasRType, ImbalanceMsg, InstrumentDefMsg, MboMsg,
        Mbp10Msg, Mbp1Msg, OhlcvMsg, Record, RecordHeader, RecordMut, StatMsg, StatusMsg,
        SymbolMappingMsg, SystemMsg, TbboMsg, TcbboMsg, TradeMsg,
    },
    record_enum::RecordEnum,
    v2::{InstrumentDefMsg as InstrumentDefMsgV2, StatMsg as StatMsgV2},
};

/// The current version of the DBN encoding, which is different from the crate version.
pub const DBN_VERSION: u8 = 3;
/// The oldest version of the DBN encoding this crate decodes. Version 1 files must
/// be upgraded before they can be read.
pub const DBN_MIN_VERSION: u8 = 2;

/// The length of fixed-width symbol strings in the metadata and in
/// [`SymbolMappingMsg`] records, including a null terminator byte. The same in
/// versions 2 and 3.
pub const SYMBOL_CSTR_LEN: usize = 71;

pub(crate) const METADATA_DATASET_CSTR_LEN: usize = 16;
pub(crate) const METADATA_RESERVED_LEN: usize = 53;
/// Length of the fixed metadata block, excluding the magic string, version, and
/// frame length.
pub(crate) const METADATA_FIXED_LEN: usize = 100;
pub(crate) const NULL_SCHEMA: u16 = u16::MAX;
pub(crate) const NULL_STYPE: u8 = u8::MAX;
/// The size of the largest record type plus the optional gateway send timestamp.
pub(crate) const MAX_RECORD_LEN: usize = 520 + 8;

/// The denominator of fixed prices in DBN.
pub const FIXED_PRICE_SCALE: i64 = 1_000_000_000;
/// The sentinel value for an unset or null price.
pub const UNDEF_PRICE: i64 = i64::MAX;
/// The sentinel value for an unset or null order quantity.
pub const UNDEF_ORDER_SIZE: u32 = u32::MAX;
/// The sentinel value for an unset or null stat quantity.
pub const UNDEF_STAT_QUANTITY: i64 = i64::MAX;
/// The sentinel value for an unset or null timestamp.
pub const UNDEF_TIMESTAMP: i64 = i64::MAX;

/// Reads an entire DBN file into memory, both metadata and records. Compression
/// is detected from the leading magic bytes, not the file name.
///
/// # Errors
/// This function returns an error if it can't open or read the file at `path`, or
/// if the contents aren't valid DBN.
pub fn read_all(path: impl AsRef<Path>) -> Result<(Metadata, Vec<RecordEnum>)> {
    let mut decoder = decode::Decoder::from_file(path)?;
    let metadata = decoder.metadata().clone();
    let mut records = Vec::new();
    while let Some(rec) = decoder.decode_record()? {
        records.push(rec);
    }
    Ok((metadata, records))
}

/// Writes `metadata` followed by `records` to a new DBN file at `path`. A `.zst`
/// extension selects Zstandard compression for the output.
///
/// # Errors
/// This function returns an error if it can't create the file at `path` or if any
/// record fails to encode, such as a version-dependent record that doesn't match
/// `metadata.version`.
pub fn write_all(
    path: impl AsRef<Path>,
    metadata: &Metadata,
    records: &[RecordEnum],
) -> Result<()> {
    let mut encoder = encode::Encoder::from_file(path, metadata)?;
    for record in records {
        encoder.encode_record(record)?;
    }
    encoder.flush()
}

/// Opens the DBN file at `path` for lazy, single-pass decoding. The returned
/// decoder exposes the metadata upfront and yields records one at a time when
/// iterated. Restarting requires reopening the file.
///
/// # Errors
/// This function returns an error if it can't open the file at `path` or parse
/// its metadata.
pub fn stream(path: impl AsRef<Path>) -> Result<decode::FileDecoder> {
    decode::Decoder::from_file(path)
}

/// Decodes the DBN file at `path`, invoking `f` with each record of type `T` in
/// file order. Records of other types are skipped.
///
/// # Errors
/// This function returns an error if it can't open the file at `path` or if
/// decoding fails partway through.
pub fn for_each_of<T, F>(path: impl AsRef<Path>, mut f: F) -> Result<()>
where
    T: TryFrom<RecordEnum, Error = RecordEnum>,
    F: FnMut(T),
{
    let mut decoder = decode::Decoder::from_file(path)?;
    while let Some(rec) = decoder.decode_record()? {
        if let Ok(rec) = T::try_from(rec) {
            f(rec);
        }
    }
    Ok(())
}

/// Compresses the file at `src` into a Zstandard stream at `dst` without decoding
/// it: the inner byte stream is preserved bit-for-bit, so decompressing `dst`
/// yields exactly the contents of `src`.
///
/// # Errors
/// This function returns an error if it can't read `src`, create `dst`, or
/// initialize the Zstandard encoder.
pub fn compress_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<()> {
    let mut reader = File::open(src.as_ref()).map_err(|e| {
        Error::io(
            e,
            format!("opening file to compress at path '{}'", src.as_ref().display()),
        )
    })?;
    let writer = File::create(dst.as_ref()).map_err(|e| {
        Error::io(
            e,
            format!(
                "creating compressed file at path '{}'",
                dst.as_ref().display()
            ),
        )
    })?;
    let mut encoder = encode::raw_zstd_encoder(io::BufWriter::new(writer))?;
    io::copy(&mut reader, &mut encoder).map_err(|e| Error::io(e, "compressing file"))?;
    let mut writer = encoder
        .finish()
        .map_err(|e| Error::io(e, "finishing zstd stream"))?;
    io::Write::flush(&mut writer).map_err(|e| Error::io(e, "flushing compressed file"))
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use rstest::rstest;

    use super::*;
    use crate::enums::SType;

    fn example_metadata(version: u8, schema: Option<Schema>) -> Metadata {
        Metadata::builder()
            .version(version)
            .dataset("XNAS.ITCH")
            .schema(schema)
            .start(1609160400000000000)
            .stype_in(Some(SType::RawSymbol))
            .stype_out(SType::InstrumentId)
            .build()
    }

    fn example_trade(ts_event: i64) -> TradeMsg {
        TradeMsg {
            hd: RecordHeader::new::<TradeMsg>(rtype::MBP_0, 1, 5482, ts_event),
            price: 3_720_250_000_000,
            size: 5,
            action: b'T' as std::os::raw::c_char,
            side: b'A' as std::os::raw::c_char,
            flags: FlagSet::new(0x81),
            depth: 0,
            ts_recv: ts_event + 328_104,
            ts_in_delta: 19_251,
            sequence: 1_170_380,
        }
    }

    #[rstest]
    fn test_write_read_all_identity(#[values(2, 3)] version: u8) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.dbn");
        let metadata = example_metadata(version, Some(Schema::Trades));
        let records = vec![
            RecordEnum::from(example_trade(1609160400098821953)),
            RecordEnum::from(example_trade(1609160400098821955)),
        ];
        write_all(&path, &metadata, &records).unwrap();
        let (read_metadata, read_records) = read_all(&path).unwrap();
        assert_eq!(read_metadata, metadata);
        assert_eq!(read_records, records);
    }

    #[test]
    fn test_write_all_zstd_suffix_detected_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.dbn.zst");
        let metadata = example_metadata(crate::DBN_VERSION, Some(Schema::Trades));
        let records = vec![RecordEnum::from(example_trade(1609160400098821953))];
        write_all(&path, &metadata, &records).unwrap();
        let mut magic = [0u8; 4];
        File::open(&path).unwrap().read_exact(&mut magic).unwrap();
        assert_eq!(magic, [0x28, 0xB5, 0x2F, 0xFD]);
        let (read_metadata, read_records) = read_all(&path).unwrap();
        assert_eq!(read_metadata, metadata);
        assert_eq!(read_records, records);
    }

    #[test]
    fn test_for_each_of_filters_by_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.dbn");
        let metadata = example_metadata(crate::DBN_VERSION, None);
        let ohlcv = OhlcvMsg {
            hd: RecordHeader::new::<OhlcvMsg>(rtype::OHLCV_1S, 1, 5482, 1609160400000000000),
            open: 372_025_000_000_000,
            high: 372_050_000_000_000,
            low: 372_025_000_000_000,
            close: 372_050_000_000_000,
            volume: 57,
        };
        let records = vec![
            RecordEnum::from(example_trade(1609160400098821953)),
            RecordEnum::from(ohlcv),
            RecordEnum::from(example_trade(1609160400098821960)),
        ];
        write_all(&path, &metadata, &records).unwrap();
        let mut trades = Vec::new();
        for_each_of::<TradeMsg, _>(&path, |trade| trades.push(trade)).unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].hd.ts_event, 1609160400098821953);
        assert_eq!(trades[1].hd.ts_event, 1609160400098821960);
        let mut bars = 0;
        for_each_of::<OhlcvMsg, _>(&path, |_| bars += 1).unwrap();
        assert_eq!(bars, 1);
    }

    #[test]
    fn test_stream_yields_records_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.dbn");
        let metadata = example_metadata(crate::DBN_VERSION, Some(Schema::Trades));
        let records: Vec<_> = (0..5)
            .map(|i| RecordEnum::from(example_trade(1609160400098821953 + i)))
            .collect();
        write_all(&path, &metadata, &records).unwrap();
        let decoder = stream(&path).unwrap();
        assert_eq!(decoder.metadata().schema, Some(Schema::Trades));
        let streamed: Vec<_> = decoder.into_iter().map(|res| res.unwrap()).collect();
        assert_eq!(streamed, records);
    }

    #[rstest]
    fn test_reencode_is_byte_identical(#[values(2, 3)] version: u8) {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("orig.dbn");
        let dst = dir.path().join("reencoded.dbn");
        let metadata = Metadata {
            symbols: vec!["ESM2".to_owned(), "NQM2".to_owned()],
            mappings: vec![SymbolMapping {
                raw_symbol: "ESM2".to_owned(),
                symbol_out: "5482".to_owned(),
                start_ts: 1609160400000000000,
                end_ts: 1609246800000000000,
            }],
            ..example_metadata(version, Some(Schema::Trades))
        };
        let records: Vec<_> = (0..4)
            .map(|i| RecordEnum::from(example_trade(1609160400098821953 + i)))
            .collect();
        write_all(&src, &metadata, &records).unwrap();
        let (read_metadata, read_records) = read_all(&src).unwrap();
        write_all(&dst, &read_metadata, &read_records).unwrap();
        assert_eq!(std::fs::read(&src).unwrap(), std::fs::read(&dst).unwrap());
    }

    #[test]
    fn test_compress_file_preserves_inner_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("trades.dbn");
        let dst = dir.path().join("trades.dbn.zst");
        let metadata = example_metadata(crate::DBN_VERSION, Some(Schema::Trades));
        let records = vec![RecordEnum::from(example_trade(1609160400098821953))];
        write_all(&src, &metadata, &records).unwrap();
        compress_file(&src, &dst).unwrap();
        let orig = std::fs::read(&src).unwrap();
        let decompressed =
            zstd::stream::decode_all(std::fs::read(&dst).unwrap().as_slice()).unwrap();
        assert_eq!(decompressed, orig);
        let (read_metadata, read_records) = read_all(&dst).unwrap();
        assert_eq!(read_metadata, metadata);
        assert_eq!(read_records, records);
    }
}
