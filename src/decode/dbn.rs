use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
};

use super::{DynReader, FromLittleEndianSlice};
use crate::{
    enums::{SType, Schema},
    error::{Error, Result},
    metadata::SymbolMapping,
    record::{serialize, RecordHeader},
    Metadata, RecordEnum, DBN_MIN_VERSION, DBN_VERSION, METADATA_DATASET_CSTR_LEN,
    METADATA_FIXED_LEN, METADATA_RESERVED_LEN, NULL_SCHEMA, NULL_STYPE,
};

/// The ASCII magic bytes at the start of every DBN stream.
pub(crate) const DBN_PREFIX: &[u8] = b"DBN";
pub(crate) const DBN_PREFIX_LEN: usize = DBN_PREFIX.len();

/// A decoder for files and streams in Databento Binary Encoding (DBN), both
/// metadata and records.
pub struct Decoder<R> {
    metadata: Metadata,
    decoder: RecordDecoder<R>,
}

/// A [`Decoder`] over a file with the compression detected from its leading
/// magic bytes. The type returned by [`stream`](crate::stream).
pub type FileDecoder = Decoder<DynReader<'static, BufReader<File>>>;

impl<R> Decoder<R>
where
    R: io::Read,
{
    /// Creates a new DBN [`Decoder`] from `reader`, parsing the metadata header
    /// upfront.
    ///
    /// # Errors
    /// This function will return an error if it is unable to parse the metadata
    /// in `reader` or the input is from an unsupported DBN version.
    pub fn new(mut reader: R) -> Result<Self> {
        let metadata = MetadataDecoder::new(&mut reader).decode()?;
        Ok(Self {
            decoder: RecordDecoder::with_version(reader, metadata.version, metadata.ts_out)?,
            metadata,
        })
    }

    /// Returns a reference to the decoded metadata header.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Tries to decode the next record. Returns `Ok(None)` when the input is
    /// exhausted.
    ///
    /// # Errors
    /// This function returns an error if the underlying reader fails, the input
    /// ends partway through a record payload, or a record is malformed.
    pub fn decode_record(&mut self) -> Result<Option<RecordEnum>> {
        self.decoder.decode()
    }

    /// Returns the gateway send timestamp trailing the most recently decoded
    /// record, when the stream's metadata declares `ts_out`.
    pub fn last_ts_out(&self) -> Option<i64> {
        self.decoder.last_ts_out()
    }

    /// Returns a mutable reference to the inner reader.
    pub fn get_mut(&mut self) -> &mut R {
        self.decoder.get_mut()
    }

    /// Returns a reference to the inner reader.
    pub fn get_ref(&self) -> &R {
        self.decoder.get_ref()
    }

    /// Consumes the decoder and returns the inner reader.
    pub fn into_inner(self) -> R {
        self.decoder.into_inner()
    }

    pub(crate) fn into_record_decoder(self) -> RecordDecoder<R> {
        self.decoder
    }
}

impl<'a, R> Decoder<zstd::stream::Decoder<'a, BufReader<R>>>
where
    R: io::Read,
{
    /// Creates a new DBN [`Decoder`] from Zstandard-compressed `reader`.
    ///
    /// # Errors
    /// This function will return an error if it is unable to create the zstd
    /// decoder or parse the metadata in `reader`.
    pub fn with_zstd(reader: R) -> Result<Self> {
        Decoder::new(
            zstd::stream::Decoder::new(reader)
                .map_err(|e| Error::io(e, "creating zstd decoder"))?,
        )
    }
}

impl Decoder<DynReader<'static, BufReader<File>>> {
    /// Creates a DBN [`Decoder`] from the file at `path`. Compression is
    /// detected from the file's leading magic bytes; the file name is advisory
    /// only.
    ///
    /// # Errors
    /// This function will return an error if it is unable to read the file at
    /// `path` or to parse the metadata in the file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(DynReader::from_file(path)?)
    }
}

/// A DBN decoder of records. Uses the stream's version and `ts_out` flag, which
/// normally come from the preceding metadata.
pub struct RecordDecoder<R> {
    version: u8,
    ts_out: bool,
    reader: R,
    read_buffer: Vec<u8>,
    last_ts_out: Option<i64>,
}

impl<R> RecordDecoder<R>
where
    R: io::Read,
{
    /// Creates a new `RecordDecoder` expecting input of the current DBN version
    /// without `ts_out` suffixes.
    pub fn new(reader: R) -> Self {
        Self {
            version: DBN_VERSION,
            ts_out: false,
            reader,
            read_buffer: Vec::with_capacity(crate::MAX_RECORD_LEN),
            last_ts_out: None,
        }
    }

    /// Creates a new `RecordDecoder` that will decode from `reader` assuming the
    /// specified DBN `version` and `ts_out` setting.
    ///
    /// # Errors
    /// This function will return an error if `version` is outside the supported
    /// range.
    pub fn with_version(reader: R, version: u8, ts_out: bool) -> Result<Self> {
        if !(DBN_MIN_VERSION..=DBN_VERSION).contains(&version) {
            return Err(Error::UnsupportedVersion(version));
        }
        Ok(Self {
            version,
            ts_out,
            reader,
            read_buffer: Vec::with_capacity(crate::MAX_RECORD_LEN),
            last_ts_out: None,
        })
    }

    /// Tries to decode the next record. Returns `Ok(None)` when the input ends
    /// cleanly: at a record boundary or partway through a header.
    ///
    /// # Errors
    /// This function returns an error if the underlying reader fails, the input
    /// ends partway through a record payload, the record type tag is unknown, or
    /// the length field doesn't match the record type's expected size.
    pub fn decode(&mut self) -> Result<Option<RecordEnum>> {
        let mut header = [0u8; RecordHeader::LEN];
        let filled = read_some(&mut self.reader, &mut header)
            .map_err(|e| Error::io(e, "reading record header"))?;
        if filled < RecordHeader::LEN {
            // EOF at a record boundary or partway through a header is a clean
            // end of stream
            return Ok(None);
        }
        let length = header[0] as usize * RecordHeader::LENGTH_MULTIPLIER;
        if length < RecordHeader::LEN {
            return Err(Error::invalid_format(format!(
                "record with length {length} shorter than the header"
            )));
        }
        self.read_buffer.resize(length, 0);
        self.read_buffer[..RecordHeader::LEN].copy_from_slice(&header);
        let read = read_some(&mut self.reader, &mut self.read_buffer[RecordHeader::LEN..])
            .map_err(|e| Error::io(e, "reading record payload"))?;
        if read < length - RecordHeader::LEN {
            return Err(Error::TruncatedRecord {
                rtype: header[1],
                expected: length,
                actual: RecordHeader::LEN + read,
            });
        }
        let (rec, ts_out) = serialize::decode_record(self.version, self.ts_out, &self.read_buffer)?;
        self.last_ts_out = ts_out;
        Ok(Some(rec))
    }

    /// Returns the gateway send timestamp trailing the most recently decoded
    /// record, when the stream carries `ts_out`.
    pub fn last_ts_out(&self) -> Option<i64> {
        self.last_ts_out
    }

    /// Returns a mutable reference to the inner reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Returns a reference to the inner reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consumes the decoder and returns the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Reads until `buf` is full or the reader hits EOF, returning the number of
/// bytes read. Unlike `read_exact`, a short read isn't an error and leaves the
/// byte count known.
fn read_some<R: io::Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// A decoder for [`Metadata`] at the start of a DBN file or stream.
pub struct MetadataDecoder<R>
where
    R: io::Read,
{
    reader: R,
}

impl<R> MetadataDecoder<R>
where
    R: io::Read,
{
    /// Creates a new DBN [`MetadataDecoder`] from `reader`.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Decodes and returns the [`Metadata`].
    ///
    /// # Errors
    /// This function will return an error if the prelude doesn't begin with the
    /// `DBN` magic bytes, the version is unsupported, or the metadata frame is
    /// truncated or malformed.
    pub fn decode(&mut self) -> Result<Metadata> {
        let mut prelude = [0u8; 8];
        self.reader
            .read_exact(&mut prelude)
            .map_err(|e| Error::io(e, "reading metadata prelude"))?;
        if &prelude[..DBN_PREFIX_LEN] != DBN_PREFIX {
            return Err(Error::invalid_format("invalid DBN header magic"));
        }
        let version = prelude[DBN_PREFIX_LEN];
        if !(DBN_MIN_VERSION..=DBN_VERSION).contains(&version) {
            return Err(Error::UnsupportedVersion(version));
        }
        let length = u32::from_le_slice(&prelude[4..]) as usize;
        if length < METADATA_FIXED_LEN {
            return Err(Error::invalid_format(
                "metadata frame length shorter than the fixed block",
            ));
        }
        let mut buffer = vec![0u8; length];
        self.reader.read_exact(&mut buffer).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                Error::invalid_format(format!(
                    "input ended before the declared {length}-byte metadata frame"
                ))
            } else {
                Error::io(e, "reading metadata frame")
            }
        })?;
        Self::decode_metadata_fields(version, &buffer)
    }

    fn decode_metadata_fields(version: u8, buffer: &[u8]) -> Result<Metadata> {
        let mut pos = 0;
        let dataset = std::str::from_utf8(&buffer[pos..pos + METADATA_DATASET_CSTR_LEN])
            .map_err(|e| Error::invalid_format(format!("invalid UTF-8 in dataset: {e}")))?
            // remove null bytes
            .trim_end_matches('\0')
            .to_owned();
        pos += METADATA_DATASET_CSTR_LEN;

        let raw_schema = u16::from_le_slice(&buffer[pos..]);
        let schema = if raw_schema == NULL_SCHEMA {
            None
        } else {
            Some(Schema::try_from(raw_schema).map_err(|_| {
                Error::invalid_format(format!("unknown schema value {raw_schema}"))
            })?)
        };
        pos += 2;
        let start = i64::from_le_slice(&buffer[pos..]);
        pos += 8;
        let end = i64::from_le_slice(&buffer[pos..]);
        pos += 8;
        let limit = u64::from_le_slice(&buffer[pos..]);
        pos += 8;
        let stype_in = if buffer[pos] == NULL_STYPE {
            None
        } else {
            Some(SType::try_from(buffer[pos]).map_err(|_| {
                Error::invalid_format(format!("unknown stype_in value {}", buffer[pos]))
            })?)
        };
        pos += 1;
        let stype_out = SType::try_from(buffer[pos]).map_err(|_| {
            Error::invalid_format(format!("unknown stype_out value {}", buffer[pos]))
        })?;
        pos += 1;
        let ts_out = buffer[pos] != 0;
        pos += 1;
        let symbol_cstr_len = u16::from_le_slice(&buffer[pos..]) as usize;
        pos += 2;
        // reserved padding
        pos += METADATA_RESERVED_LEN;
        let schema_definition_length = table_bytes(buffer, &mut pos, 4, "schema definitions")?;
        let schema_definition_length = u32::from_le_slice(schema_definition_length);
        if schema_definition_length != 0 {
            return Err(Error::invalid_format(
                "unexpected schema definition section in metadata",
            ));
        }
        let symbols = Self::decode_repeated_symbol_cstr(version, symbol_cstr_len, buffer, &mut pos)?;
        let partial = Self::decode_repeated_symbol_cstr(version, symbol_cstr_len, buffer, &mut pos)?;
        let not_found =
            Self::decode_repeated_symbol_cstr(version, symbol_cstr_len, buffer, &mut pos)?;
        let mappings = Self::decode_symbol_mappings(version, symbol_cstr_len, buffer, &mut pos)?;

        Ok(Metadata {
            version,
            dataset,
            schema,
            start,
            end,
            limit,
            stype_in,
            stype_out,
            ts_out,
            symbol_cstr_len,
            symbols,
            partial,
            not_found,
            mappings,
        })
    }

    /// Reads a table's element count. The count prefix is a `u32` in version 3
    /// and a `u16` in earlier versions.
    fn decode_table_count(version: u8, buffer: &[u8], pos: &mut usize) -> Result<usize> {
        if version >= 3 {
            let raw = table_bytes(buffer, pos, 4, "table count")?;
            Ok(u32::from_le_slice(raw) as usize)
        } else {
            let raw = table_bytes(buffer, pos, 2, "table count")?;
            Ok(u16::from_le_slice(raw) as usize)
        }
    }

    fn decode_repeated_symbol_cstr(
        version: u8,
        symbol_cstr_len: usize,
        buffer: &[u8],
        pos: &mut usize,
    ) -> Result<Vec<String>> {
        let count = Self::decode_table_count(version, buffer, pos)?;
        let mut res = Vec::with_capacity(count);
        for i in 0..count {
            res.push(
                Self::decode_symbol(symbol_cstr_len, buffer, pos)
                    .map_err(|e| Error::invalid_format(format!("{e} at symbol index {i}")))?,
            );
        }
        Ok(res)
    }

    fn decode_symbol_mappings(
        version: u8,
        symbol_cstr_len: usize,
        buffer: &[u8],
        pos: &mut usize,
    ) -> Result<Vec<SymbolMapping>> {
        let count = Self::decode_table_count(version, buffer, pos)?;
        let mut res = Vec::with_capacity(count);
        for i in 0..count {
            let raw_symbol = Self::decode_symbol(symbol_cstr_len, buffer, pos)
                .map_err(|e| Error::invalid_format(format!("{e} in mapping at index {i}")))?;
            let symbol_out = Self::decode_symbol(symbol_cstr_len, buffer, pos)
                .map_err(|e| Error::invalid_format(format!("{e} in mapping at index {i}")))?;
            let start_ts = i64::from_le_slice(table_bytes(buffer, pos, 8, "mapping start_ts")?);
            let end_ts = i64::from_le_slice(table_bytes(buffer, pos, 8, "mapping end_ts")?);
            res.push(SymbolMapping {
                raw_symbol,
                symbol_out,
                start_ts,
                end_ts,
            });
        }
        Ok(res)
    }

    fn decode_symbol(
        symbol_cstr_len: usize,
        buffer: &[u8],
        pos: &mut usize,
    ) -> Result<String> {
        let raw = table_bytes(buffer, pos, symbol_cstr_len, "symbol")?;
        Ok(std::str::from_utf8(raw)
            .map_err(|e| Error::invalid_format(format!("invalid UTF-8 in symbol: {e}")))?
            // remove null bytes
            .trim_end_matches('\0')
            .to_owned())
    }

    /// Returns a mutable reference to the inner reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consumes the decoder and returns the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Takes `n` bytes out of the metadata `buffer`, failing with a format error
/// when the declared frame is shorter than its contents require.
fn table_bytes<'a>(
    buffer: &'a [u8],
    pos: &mut usize,
    n: usize,
    what: &str,
) -> Result<&'a [u8]> {
    if *pos + n > buffer.len() {
        return Err(Error::invalid_format(format!(
            "unexpected end of metadata frame reading {what}"
        )));
    }
    let slice = &buffer[*pos..*pos + n];
    *pos += n;
    Ok(slice)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{
        encode::{Encoder, MetadataEncoder},
        record::{Record, TradeMsg},
        rtype, MetadataBuilder,
    };

    fn test_metadata(version: u8) -> Metadata {
        MetadataBuilder::new()
            .version(version)
            .dataset("GLBX.MDP3")
            .schema(Some(Schema::Mbp10))
            .start(1657230820000000000)
            .end(1658960170000000000)
            .stype_in(Some(SType::RawSymbol))
            .stype_out(SType::InstrumentId)
            .symbols(vec!["ES".to_owned(), "NG".to_owned()])
            .partial(vec!["ESM2".to_owned()])
            .not_found(vec!["QQQQQ".to_owned()])
            .mappings(vec![
                SymbolMapping {
                    raw_symbol: "ES.0".to_owned(),
                    symbol_out: "ESU2".to_owned(),
                    start_ts: 1656633600000000000,
                    end_ts: 1661990400000000000,
                },
                SymbolMapping {
                    raw_symbol: "NG.0".to_owned(),
                    symbol_out: "NGU2".to_owned(),
                    start_ts: 1656633600000000000,
                    end_ts: 1659052800000000000,
                },
            ])
            .build()
    }

    #[rstest]
    fn test_metadata_identity(#[values(2, 3)] version: u8) {
        let metadata = test_metadata(version);
        let mut buffer = Vec::new();
        MetadataEncoder::new(&mut buffer).encode(&metadata).unwrap();
        let res = MetadataDecoder::new(buffer.as_slice()).decode().unwrap();
        assert_eq!(res, metadata);
    }

    #[rstest]
    fn test_metadata_frame_is_record_aligned(#[values(2, 3)] version: u8) {
        let metadata = test_metadata(version);
        let mut buffer = Vec::new();
        MetadataEncoder::new(&mut buffer).encode(&metadata).unwrap();
        assert_eq!(buffer.len() % 4, 0);
        if version == 3 {
            assert_eq!(buffer.len() % 8, 0);
        }
        let declared = u32::from_le_slice(&buffer[4..8]) as usize;
        assert_eq!(declared + 8, buffer.len());
    }

    #[test]
    fn test_version_table_count_width_differs() {
        let v2 = {
            let mut buffer = Vec::new();
            MetadataEncoder::new(&mut buffer)
                .encode(&test_metadata(2))
                .unwrap();
            buffer
        };
        let v3 = {
            let mut buffer = Vec::new();
            MetadataEncoder::new(&mut buffer)
                .encode(&test_metadata(3))
                .unwrap();
            buffer
        };
        // same content, but v3 spends 2 extra bytes per table count prefix
        // before end-of-frame alignment padding
        assert_ne!(v2.len(), v3.len());
    }

    #[test]
    fn test_bad_magic() {
        let metadata = test_metadata(3);
        let mut buffer = Vec::new();
        MetadataEncoder::new(&mut buffer).encode(&metadata).unwrap();
        buffer[0] = b'E';
        let res = MetadataDecoder::new(buffer.as_slice()).decode();
        assert!(matches!(res, Err(Error::InvalidFormat(msg)) if msg.contains("magic")));
    }

    #[rstest]
    #[case::v1(1)]
    #[case::v4(4)]
    fn test_unsupported_version(#[case] version: u8) {
        let metadata = test_metadata(3);
        let mut buffer = Vec::new();
        MetadataEncoder::new(&mut buffer).encode(&metadata).unwrap();
        buffer[3] = version;
        let res = MetadataDecoder::new(buffer.as_slice()).decode();
        assert!(matches!(res, Err(Error::UnsupportedVersion(v)) if v == version));
    }

    #[test]
    fn test_truncated_metadata_frame() {
        let metadata = test_metadata(3);
        let mut buffer = Vec::new();
        MetadataEncoder::new(&mut buffer).encode(&metadata).unwrap();
        buffer.truncate(buffer.len() - 40);
        let res = MetadataDecoder::new(buffer.as_slice()).decode();
        assert!(matches!(res, Err(Error::InvalidFormat(msg)) if msg.contains("metadata frame")));
    }

    #[test]
    fn test_decode_trade_stream() {
        let metadata = MetadataBuilder::new()
            .dataset("XNAS.ITCH")
            .schema(Some(Schema::Trades))
            .start(0)
            .stype_out(SType::InstrumentId)
            .build();
        let mut buffer = Vec::new();
        let mut encoder = Encoder::new(&mut buffer, &metadata).unwrap();
        let rec = TradeMsg {
            hd: RecordHeader::new::<TradeMsg>(rtype::MBP_0, 1, 42, 100),
            ..Default::default()
        };
        encoder.encode_record(&RecordEnum::from(rec)).unwrap();
        let mut decoder = Decoder::new(buffer.as_slice()).unwrap();
        assert_eq!(decoder.metadata().schema, Some(Schema::Trades));
        let decoded = decoder.decode_record().unwrap().unwrap();
        assert_eq!(decoded.header().instrument_id, 42);
        assert!(decoder.decode_record().unwrap().is_none());
    }

    #[test]
    fn test_truncated_record_payload() {
        let metadata = MetadataBuilder::new()
            .dataset("XNAS.ITCH")
            .schema(Some(Schema::Trades))
            .start(0)
            .stype_out(SType::InstrumentId)
            .build();
        let mut buffer = Vec::new();
        let mut encoder = Encoder::new(&mut buffer, &metadata).unwrap();
        for instrument_id in 0..3u32 {
            let rec = TradeMsg {
                hd: RecordHeader::new::<TradeMsg>(rtype::MBP_0, 1, instrument_id, 100),
                ..Default::default()
            };
            encoder.encode_record(&RecordEnum::from(rec)).unwrap();
        }
        // cut into the third record's payload
        buffer.truncate(buffer.len() - 20);
        let mut decoder = Decoder::new(buffer.as_slice()).unwrap();
        assert!(decoder.decode_record().unwrap().is_some());
        assert!(decoder.decode_record().unwrap().is_some());
        let res = decoder.decode_record();
        assert!(
            matches!(
                res,
                Err(Error::TruncatedRecord {
                    rtype: rtype::MBP_0,
                    expected: 48,
                    ..
                })
            ),
            "{res:?}"
        );
    }

    #[test]
    fn test_eof_mid_header_is_clean_end() {
        let metadata = MetadataBuilder::new()
            .dataset("XNAS.ITCH")
            .schema(Some(Schema::Trades))
            .start(0)
            .stype_out(SType::InstrumentId)
            .build();
        let mut buffer = Vec::new();
        let mut encoder = Encoder::new(&mut buffer, &metadata).unwrap();
        encoder
            .encode_record(&RecordEnum::from(TradeMsg::default()))
            .unwrap();
        // leave 7 bytes of a second record's header
        let full = buffer.len();
        let partial_header = buffer[full - 48..full - 41].to_vec();
        buffer.extend_from_slice(&partial_header);
        let mut decoder = Decoder::new(buffer.as_slice()).unwrap();
        assert!(decoder.decode_record().unwrap().is_some());
        assert!(decoder.decode_record().unwrap().is_none());
    }

    #[test]
    fn test_record_length_shorter_than_header() {
        let mut decoder = RecordDecoder::new([3u8, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11].as_slice());
        let res = decoder.decode();
        assert!(matches!(res, Err(Error::InvalidFormat(msg)) if msg.contains("shorter")));
    }
}
