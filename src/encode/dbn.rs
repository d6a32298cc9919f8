use std::{
    fs::File,
    io::{self, BufWriter, SeekFrom},
    path::Path,
};

use super::DynWriter;
use crate::{
    enums::Compression,
    error::{Error, Result},
    metadata::SymbolMapping,
    Metadata, RecordEnum, DBN_MIN_VERSION, DBN_VERSION, METADATA_DATASET_CSTR_LEN,
    METADATA_FIXED_LEN, METADATA_RESERVED_LEN, NULL_SCHEMA, NULL_STYPE,
};

/// An encoder for files and streams in Databento Binary Encoding (DBN), both
/// metadata and records.
pub struct Encoder<W>
where
    W: io::Write,
{
    record_encoder: RecordEncoder<W>,
}

/// An [`Encoder`] over a file with the compression selected by the file name's
/// extension.
pub type FileEncoder = Encoder<DynWriter<'static, BufWriter<File>>>;

impl<W> Encoder<W>
where
    W: io::Write,
{
    /// Creates a new DBN [`Encoder`] that will write to `writer`, encoding
    /// `metadata` upfront. Records are encoded with the layouts matching
    /// `metadata.version`.
    ///
    /// # Errors
    /// This function will return an error if it fails to encode `metadata` to
    /// `writer` or `metadata` declares an unsupported version.
    pub fn new(mut writer: W, metadata: &Metadata) -> Result<Self> {
        MetadataEncoder::new(&mut writer).encode(metadata)?;
        let record_encoder = RecordEncoder::with_version(writer, metadata.version)?;
        Ok(Self { record_encoder })
    }

    /// Encodes a single record.
    ///
    /// # Errors
    /// This function returns an error if it fails to write to the underlying
    /// writer, a version-dependent record doesn't match the stream version, or a
    /// string field overflows its fixed-width slot.
    pub fn encode_record(&mut self, record: &RecordEnum) -> Result<()> {
        self.record_encoder.encode_record(record)
    }

    /// Encodes a slice of records in order.
    ///
    /// # Errors
    /// This function returns an error under the same conditions as
    /// [`encode_record`](Self::encode_record).
    pub fn encode_records(&mut self, records: &[RecordEnum]) -> Result<()> {
        for record in records {
            self.record_encoder.encode_record(record)?;
        }
        Ok(())
    }

    /// Flushes the underlying writer.
    ///
    /// # Errors
    /// This function returns an error if the underlying writer fails to flush.
    pub fn flush(&mut self) -> Result<()> {
        self.record_encoder.flush()
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        self.record_encoder.get_ref()
    }

    /// Returns a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        self.record_encoder.get_mut()
    }

    /// Consumes the encoder and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.record_encoder.into_inner()
    }
}

impl Encoder<DynWriter<'static, BufWriter<File>>> {
    /// Creates a DBN [`Encoder`] writing to a new file at `path`. A `.zst`
    /// extension selects Zstandard compression; the encoded DBN bytes are
    /// identical either way.
    ///
    /// # Errors
    /// This function returns an error if it can't create the file at `path` or
    /// fails to encode `metadata`.
    pub fn from_file(path: impl AsRef<Path>, metadata: &Metadata) -> Result<Self> {
        let compression = if path.as_ref().extension().is_some_and(|e| e == "zst") {
            Compression::Zstd
        } else {
            Compression::None
        };
        let file = File::create(path.as_ref()).map_err(|e| {
            Error::io(
                e,
                format!("creating file to encode at path '{}'", path.as_ref().display()),
            )
        })?;
        let writer = DynWriter::new(BufWriter::new(file), compression)?;
        Self::new(writer, metadata)
    }
}

/// An encoder of DBN records (not metadata).
pub struct RecordEncoder<W>
where
    W: io::Write,
{
    writer: W,
    version: u8,
}

impl<W> RecordEncoder<W>
where
    W: io::Write,
{
    /// Creates a new `RecordEncoder` targeting the current DBN version.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            version: DBN_VERSION,
        }
    }

    /// Creates a new `RecordEncoder` targeting the specified DBN `version`.
    ///
    /// # Errors
    /// This function will return an error if `version` is outside the supported
    /// range.
    pub fn with_version(writer: W, version: u8) -> Result<Self> {
        if !(DBN_MIN_VERSION..=DBN_VERSION).contains(&version) {
            return Err(Error::UnsupportedVersion(version));
        }
        Ok(Self { writer, version })
    }

    /// Encodes a single record, serializing every field explicitly in
    /// little-endian order.
    ///
    /// # Errors
    /// This function returns an error if it fails to write to the underlying
    /// writer, a version-dependent record doesn't match the stream version, or a
    /// string field overflows its fixed-width slot.
    pub fn encode_record(&mut self, record: &RecordEnum) -> Result<()> {
        let buf = crate::record::serialize::encode_record(self.version, record)?;
        self.writer
            .write_all(&buf)
            .map_err(|e| Error::io(e, format!("serializing {record:?}")))
    }

    /// Flushes the underlying writer.
    ///
    /// # Errors
    /// This function returns an error if the underlying writer fails to flush.
    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::io(e, "flushing output"))
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Returns a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the encoder and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// An encoder for [`Metadata`] at the start of a DBN file or stream.
pub struct MetadataEncoder<W>
where
    W: io::Write,
{
    writer: W,
}

impl<W> MetadataEncoder<W>
where
    W: io::Write,
{
    /// The byte offset of the `start` field in an encoded metadata header: the
    /// prelude, the dataset slot, and the schema.
    pub(crate) const START_OFFSET: usize = 8 + METADATA_DATASET_CSTR_LEN + 2;

    /// Creates a new [`MetadataEncoder`] that will write to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Encodes `metadata` into DBN, zero-padding the end of the frame so records
    /// start at an aligned offset.
    ///
    /// # Errors
    /// This function returns an error if it fails to write to the underlying
    /// writer, `metadata` declares an unsupported version, or a string doesn't
    /// fit its fixed-width slot.
    pub fn encode(&mut self, metadata: &Metadata) -> Result<()> {
        let metadata_err = |e| Error::io(e, "writing DBN metadata");
        if !(DBN_MIN_VERSION..=DBN_VERSION).contains(&metadata.version) {
            return Err(Error::UnsupportedVersion(metadata.version));
        }
        let (length, end_padding) = Self::calc_length(metadata);
        self.writer.write_all(b"DBN").map_err(metadata_err)?;
        self.writer
            .write_all(&[metadata.version])
            .map_err(metadata_err)?;
        self.writer
            .write_all(length.to_le_bytes().as_slice())
            .map_err(metadata_err)?;
        self.encode_fixed_len_cstr(METADATA_DATASET_CSTR_LEN, &metadata.dataset)?;
        self.writer
            .write_all(
                (metadata.schema.map(|s| s as u16).unwrap_or(NULL_SCHEMA))
                    .to_le_bytes()
                    .as_slice(),
            )
            .map_err(metadata_err)?;
        self.encode_range_and_counts(metadata.start, metadata.end, metadata.limit)?;
        self.writer
            .write_all(&[
                metadata.stype_in.map(|s| s as u8).unwrap_or(NULL_STYPE),
                metadata.stype_out as u8,
                metadata.ts_out as u8,
            ])
            .map_err(metadata_err)?;
        self.writer
            .write_all(&(metadata.symbol_cstr_len as u16).to_le_bytes())
            .map_err(metadata_err)?;
        // reserved padding
        self.writer
            .write_all(&[0; METADATA_RESERVED_LEN])
            .map_err(metadata_err)?;
        // schema_definition_length
        self.writer
            .write_all(0u32.to_le_bytes().as_slice())
            .map_err(metadata_err)?;

        self.encode_repeated_symbol_cstr(metadata, metadata.symbols.as_slice())?;
        self.encode_repeated_symbol_cstr(metadata, metadata.partial.as_slice())?;
        self.encode_repeated_symbol_cstr(metadata, metadata.not_found.as_slice())?;
        self.encode_symbol_mappings(metadata)?;
        if end_padding > 0 {
            let padding = [0; 7];
            self.writer
                .write_all(&padding[..end_padding])
                .map_err(metadata_err)?;
        }

        Ok(())
    }

    /// Computes the metadata frame length and the end padding included in it.
    /// The padding keeps the total of prelude and frame 8-byte aligned in
    /// version 3 and 4-byte aligned in version 2, so every following record
    /// starts at a 4-byte aligned offset.
    pub(crate) fn calc_length(metadata: &Metadata) -> (u32, usize) {
        let count_width = Self::table_count_width(metadata.version);
        let c_str_count =
            metadata.symbols.len() + metadata.partial.len() + metadata.not_found.len();
        // schema_definition_length plus the four table count prefixes
        let needed_len = METADATA_FIXED_LEN
            + 4
            + count_width * 4
            + c_str_count * metadata.symbol_cstr_len
            + metadata.mappings.len() * (metadata.symbol_cstr_len * 2 + 16);
        let align = if metadata.version < 3 { 4 } else { 8 };
        let rem = (needed_len + 8) % align;
        let end_padding = if rem == 0 { 0 } else { align - rem };
        ((needed_len + end_padding) as u32, end_padding)
    }

    /// Table count prefixes are `u32`s in version 3 and `u16`s in earlier
    /// versions.
    const fn table_count_width(version: u8) -> usize {
        if version < 3 {
            2
        } else {
            4
        }
    }

    fn encode_range_and_counts(&mut self, start: i64, end: i64, limit: u64) -> Result<()> {
        let metadata_err = |e| Error::io(e, "writing DBN metadata");
        self.writer
            .write_all(start.to_le_bytes().as_slice())
            .map_err(metadata_err)?;
        self.writer
            .write_all(end.to_le_bytes().as_slice())
            .map_err(metadata_err)?;
        self.writer
            .write_all(limit.to_le_bytes().as_slice())
            .map_err(metadata_err)
    }

    fn encode_table_count(&mut self, version: u8, count: usize) -> Result<()> {
        let count_err = |e| Error::io(e, "writing table count");
        if version < 3 {
            let count: u16 = count.try_into().map_err(|_| {
                Error::invalid_format(format!(
                    "table with {count} entries exceeds the version 2 metadata count range"
                ))
            })?;
            self.writer
                .write_all(count.to_le_bytes().as_slice())
                .map_err(count_err)
        } else {
            self.writer
                .write_all((count as u32).to_le_bytes().as_slice())
                .map_err(count_err)
        }
    }

    fn encode_repeated_symbol_cstr(
        &mut self,
        metadata: &Metadata,
        symbols: &[String],
    ) -> Result<()> {
        self.encode_table_count(metadata.version, symbols.len())?;
        for symbol in symbols {
            self.encode_fixed_len_cstr(metadata.symbol_cstr_len, symbol)?;
        }
        Ok(())
    }

    fn encode_symbol_mappings(&mut self, metadata: &Metadata) -> Result<()> {
        self.encode_table_count(metadata.version, metadata.mappings.len())?;
        for mapping in metadata.mappings.iter() {
            self.encode_symbol_mapping(metadata.symbol_cstr_len, mapping)?;
        }
        Ok(())
    }

    fn encode_symbol_mapping(
        &mut self,
        symbol_cstr_len: usize,
        mapping: &SymbolMapping,
    ) -> Result<()> {
        let mapping_err = |e| Error::io(e, "writing symbol mapping");
        self.encode_fixed_len_cstr(symbol_cstr_len, &mapping.raw_symbol)?;
        self.encode_fixed_len_cstr(symbol_cstr_len, &mapping.symbol_out)?;
        self.writer
            .write_all(mapping.start_ts.to_le_bytes().as_slice())
            .map_err(mapping_err)?;
        self.writer
            .write_all(mapping.end_ts.to_le_bytes().as_slice())
            .map_err(mapping_err)
    }

    fn encode_fixed_len_cstr(&mut self, slot_len: usize, string: &str) -> Result<()> {
        if !string.is_ascii() {
            return Err(Error::invalid_format(format!(
                "'{string}' can't be encoded in DBN because it contains non-ASCII characters"
            )));
        }
        if string.len() >= slot_len {
            return Err(Error::encode_overflow(string, slot_len));
        }
        let cstr_err = |e| Error::io(e, "writing fixed-length cstr");
        self.writer.write_all(string.as_bytes()).map_err(cstr_err)?;
        // pad remaining space with null bytes
        for _ in string.len()..slot_len {
            self.writer.write_all(&[0]).map_err(cstr_err)?;
        }
        Ok(())
    }
}

impl<W> MetadataEncoder<W>
where
    W: io::Write + io::Seek,
{
    /// Updates the time range and count slots of an already-encoded metadata
    /// header in place, then seeks back to the end.
    ///
    /// # Errors
    /// This function returns an error if it's unable to seek to the position of
    /// the `start` field or fails to write to the underlying writer.
    pub fn update_encoded(&mut self, start: i64, end: i64, limit: u64) -> Result<()> {
        self.writer
            .seek(SeekFrom::Start(Self::START_OFFSET as u64))
            .map_err(|e| Error::io(e, "seeking to the time range in the metadata header"))?;
        self.encode_range_and_counts(start, end, limit)?;
        self.writer
            .seek(SeekFrom::End(0))
            .map_err(|e| Error::io(e, "seeking back to the end"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Seek};

    use rstest::rstest;

    use super::*;
    use crate::{
        decode::MetadataDecoder,
        enums::{SType, Schema},
        MetadataBuilder,
    };

    fn base_metadata(version: u8) -> Metadata {
        MetadataBuilder::new()
            .version(version)
            .dataset("XNAS.ITCH")
            .schema(Some(Schema::Mbo))
            .start(1697240529000000000)
            .stype_in(Some(SType::RawSymbol))
            .stype_out(SType::InstrumentId)
            .build()
    }

    #[rstest]
    fn test_calc_length_matches_encoded(#[values(2, 3)] version: u8) {
        let metadata = MetadataBuilder::new()
            .version(version)
            .dataset("XNAS.ITCH")
            .schema(Some(Schema::Mbo))
            .start(1697240529000000000)
            .stype_in(Some(SType::RawSymbol))
            .stype_out(SType::InstrumentId)
            .symbols(vec!["META".to_owned(), "NVDA".to_owned(), "NFLX".to_owned()])
            .build();
        let (calc_length, _) = MetadataEncoder::<Vec<u8>>::calc_length(&metadata);
        let mut buffer = Vec::new();
        MetadataEncoder::new(&mut buffer).encode(&metadata).unwrap();
        // plus 8 for the prelude
        assert_eq!(calc_length as usize + 8, buffer.len());
    }

    #[test]
    fn test_min_encoded_size_v3() {
        let mut buffer = Vec::new();
        MetadataEncoder::new(&mut buffer)
            .encode(&base_metadata(3))
            .unwrap();
        assert_eq!(buffer.len(), 128);
    }

    #[rstest]
    fn test_update_encoded(#[values(2, 3)] version: u8) {
        let metadata = base_metadata(version);
        let mut buffer = Vec::new();
        MetadataEncoder::new(&mut buffer).encode(&metadata).unwrap();
        let mut cursor = Cursor::new(&mut buffer);
        cursor.seek(SeekFrom::End(0)).unwrap();
        let end_pos = cursor.position();
        let new_start = 1697240529000000001;
        let new_end = 1705898017000000000;
        MetadataEncoder::new(&mut cursor)
            .update_encoded(new_start, new_end, 10)
            .unwrap();
        assert_eq!(cursor.position(), end_pos);
        let res = MetadataDecoder::new(buffer.as_slice()).decode().unwrap();
        assert_eq!(res.start, new_start);
        assert_eq!(res.end, new_end);
        assert_eq!(res.limit, 10);
    }

    #[test]
    fn test_encode_fixed_len_cstr_pads_with_nul() {
        let mut buffer = Vec::new();
        let mut target = MetadataEncoder::new(&mut buffer);
        target.encode_fixed_len_cstr(crate::SYMBOL_CSTR_LEN, "NG").unwrap();
        assert_eq!(buffer.len(), crate::SYMBOL_CSTR_LEN);
        assert_eq!(&buffer[..2], b"NG");
        for b in buffer[2..].iter() {
            assert_eq!(*b, 0);
        }
    }

    #[test]
    fn test_dataset_overflow() {
        let metadata = MetadataBuilder::new()
            .dataset("DATASET.NAME.TOO.LONG")
            .build();
        let mut buffer = Vec::new();
        let res = MetadataEncoder::new(&mut buffer).encode(&metadata);
        assert!(matches!(res, Err(Error::EncodeOverflow { .. })));
    }

    #[test]
    fn test_non_ascii_symbol() {
        let metadata = MetadataBuilder::new()
            .dataset("XNAS.ITCH")
            .symbols(vec!["Ö".to_owned()])
            .build();
        let mut buffer = Vec::new();
        let res = MetadataEncoder::new(&mut buffer).encode(&metadata);
        assert!(matches!(res, Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let metadata = MetadataBuilder::new().version(4).dataset("XNAS.ITCH").build();
        let mut buffer = Vec::new();
        let res = MetadataEncoder::new(&mut buffer).encode(&metadata);
        assert!(matches!(res, Err(Error::UnsupportedVersion(4))));
        assert!(buffer.is_empty());
    }
}
