use std::{
    fs::File,
    io::{self, BufWriter},
    num::NonZeroU64,
    path::{Path, PathBuf},
};

use super::{MetadataEncoder, RecordEncoder};
use crate::{
    error::{Error, Result},
    record::Record,
    Metadata, RecordEnum, UNDEF_TIMESTAMP,
};

/// A writer for appending records whose count and time range aren't known in
/// advance, finalizing a valid file on close.
///
/// On construction a provisional metadata header is written with sentinel
/// values: `start = i64::MAX`, `end = 0`, and a zero count. Each
/// [`write_record`](Self::write_record) call folds the record's `ts_event` into
/// the observed minimum and maximum and bumps the count. For seekable sinks,
/// [`close`](Self::close) rewrites the header in place with the observed
/// values; for append-only sinks [`finish`](Self::finish) leaves the sentinels,
/// which readers tolerate.
///
/// Timestamps may arrive out of order; the summary is a minimum and maximum,
/// not a sort.
pub struct StreamWriter<W>
where
    W: io::Write,
{
    encoder: RecordEncoder<W>,
    first_ts: i64,
    last_ts: i64,
    count: u64,
    flush_interval: Option<NonZeroU64>,
    last_flush_count: u64,
    closed: bool,
    staging: Option<Staging>,
}

/// For `.zst` targets the writer stages uncompressed output so the header can
/// be back-patched, then compresses the staged file on close.
struct Staging {
    tmp_path: PathBuf,
    dst_path: PathBuf,
}

impl<W> StreamWriter<W>
where
    W: io::Write,
{
    /// Creates a new `StreamWriter`, writing a provisional header based on
    /// `metadata` with sentinel values in the time range and count slots.
    ///
    /// # Errors
    /// This function returns an error if it fails to write the provisional
    /// header or `metadata` declares an unsupported version.
    pub fn new(mut writer: W, metadata: &Metadata) -> Result<Self> {
        let mut provisional = metadata.clone();
        provisional.start = UNDEF_TIMESTAMP;
        provisional.end = 0;
        provisional.limit = 0;
        MetadataEncoder::new(&mut writer).encode(&provisional)?;
        Ok(Self {
            encoder: RecordEncoder::with_version(writer, metadata.version)?,
            first_ts: UNDEF_TIMESTAMP,
            last_ts: 0,
            count: 0,
            flush_interval: None,
            last_flush_count: 0,
            closed: false,
            staging: None,
        })
    }

    /// Enables flushing the underlying writer every `interval` records, or
    /// disables it with `None`.
    pub fn set_auto_flush(&mut self, interval: Option<NonZeroU64>) {
        self.flush_interval = interval;
    }

    /// Appends a record, folding its `ts_event` into the observed time range.
    ///
    /// # Errors
    /// This function returns an error if the writer was already closed, the
    /// record fails to encode, or the underlying writer fails.
    pub fn write_record(&mut self, record: &RecordEnum) -> Result<()> {
        if self.closed {
            return Err(Error::WriterClosed);
        }
        self.encoder.encode_record(record)?;
        let ts_event = record.header().ts_event;
        self.first_ts = self.first_ts.min(ts_event);
        self.last_ts = self.last_ts.max(ts_event);
        self.count += 1;
        if let Some(interval) = self.flush_interval {
            if self.count - self.last_flush_count >= interval.get() {
                self.encoder.flush()?;
                self.last_flush_count = self.count;
            }
        }
        Ok(())
    }

    /// Returns the number of records written so far.
    pub fn record_count(&self) -> u64 {
        self.count
    }

    /// Flushes and closes the writer without finalizing the header, for sinks
    /// that don't support seeking. The provisional sentinels remain in place;
    /// readers tolerate them. File-backed writers should call
    /// [`close`](Self::close) instead.
    ///
    /// # Errors
    /// This function returns an error if the writer was already closed or the
    /// underlying writer fails to flush.
    pub fn finish(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::WriterClosed);
        }
        self.encoder.flush()?;
        self.closed = true;
        Ok(())
    }
}

impl<W> StreamWriter<W>
where
    W: io::Write + io::Seek,
{
    /// Flushes, rewrites the metadata header in place with the observed first
    /// timestamp, last timestamp, and record count, and closes the writer.
    /// Closing with zero records written leaves the provisional sentinels, which
    /// decode as an empty file.
    ///
    /// Subsequent [`write_record`](Self::write_record) calls fail with
    /// [`Error::WriterClosed`] and leave the finalized output intact.
    ///
    /// # Errors
    /// This function returns an error if the writer was already closed or the
    /// underlying writer fails to flush or seek.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::WriterClosed);
        }
        self.encoder.flush()?;
        MetadataEncoder::new(self.encoder.get_mut()).update_encoded(
            self.first_ts,
            self.last_ts,
            self.count,
        )?;
        self.encoder.flush()?;
        self.closed = true;
        if let Some(staging) = self.staging.take() {
            crate::compress_file(&staging.tmp_path, &staging.dst_path)?;
            std::fs::remove_file(&staging.tmp_path)
                .map_err(|e| Error::io(e, "removing staging file"))?;
        }
        Ok(())
    }
}

impl StreamWriter<BufWriter<File>> {
    /// Creates a `StreamWriter` for a new file at `path`. For a `.zst` target
    /// the records are staged uncompressed in a sibling file so the header can
    /// be back-patched; [`close`](Self::close) then compresses the staged bytes
    /// into `path` and removes the staging file.
    ///
    /// # Errors
    /// This function returns an error if it can't create the file or fails to
    /// write the provisional header.
    pub fn from_file(path: impl AsRef<Path>, metadata: &Metadata) -> Result<Self> {
        let path = path.as_ref();
        let staging = if path.extension().is_some_and(|e| e == "zst") {
            let mut tmp = path.as_os_str().to_owned();
            tmp.push(".staging");
            Some(Staging {
                tmp_path: PathBuf::from(tmp),
                dst_path: path.to_path_buf(),
            })
        } else {
            None
        };
        let write_path = staging
            .as_ref()
            .map_or(path, |staging| staging.tmp_path.as_path());
        let file = File::create(write_path).map_err(|e| {
            Error::io(
                e,
                format!("creating file to write at path '{}'", write_path.display()),
            )
        })?;
        let mut writer = Self::new(BufWriter::new(file), metadata)?;
        writer.staging = staging;
        Ok(writer)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{
        enums::{SType, Schema},
        record::{OhlcvMsg, RecordHeader, TradeMsg},
        rtype, MetadataBuilder,
    };

    fn test_metadata() -> Metadata {
        MetadataBuilder::new()
            .dataset("XNAS.ITCH")
            .schema(Some(Schema::Trades))
            .start(1700000000000000000)
            .stype_in(Some(SType::RawSymbol))
            .stype_out(SType::InstrumentId)
            .build()
    }

    fn trade_at(ts_event: i64) -> RecordEnum {
        RecordEnum::from(TradeMsg {
            hd: RecordHeader::new::<TradeMsg>(rtype::MBP_0, 1, 5482, ts_event),
            ..Default::default()
        })
    }

    const OUT_OF_ORDER: [i64; 5] = [
        1700000000000000000,
        1700000005000000000,
        1700000003000000000,
        1700000010000000000,
        1700000001000000000,
    ];

    #[rstest]
    #[case::plain("summary.dbn")]
    #[case::zstd("summary.dbn.zst")]
    fn test_close_summarizes_out_of_order_timestamps(#[case] name: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut writer = StreamWriter::from_file(&path, &test_metadata()).unwrap();
        for ts_event in OUT_OF_ORDER {
            writer.write_record(&trade_at(ts_event)).unwrap();
        }
        writer.close().unwrap();
        let (metadata, records) = crate::read_all(&path).unwrap();
        assert_eq!(metadata.start, 1700000000000000000);
        assert_eq!(metadata.end, 1700000010000000000);
        assert_eq!(metadata.limit, 5);
        assert_eq!(records.len(), 5);
        // records stay in write order, not sorted
        let written: Vec<_> = records
            .iter()
            .map(|rec| rec.header().ts_event)
            .collect();
        assert_eq!(written, OUT_OF_ORDER);
    }

    #[test]
    fn test_zstd_staging_file_removed_on_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.dbn.zst");
        let mut writer = StreamWriter::from_file(&path, &test_metadata()).unwrap();
        writer.write_record(&trade_at(1700000000000000000)).unwrap();
        writer.close().unwrap();
        assert!(path.exists());
        assert!(!dir.path().join("summary.dbn.zst.staging").exists());
    }

    #[test]
    fn test_close_with_no_records_keeps_sentinels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.dbn");
        let mut writer = StreamWriter::from_file(&path, &test_metadata()).unwrap();
        writer.close().unwrap();
        let (metadata, records) = crate::read_all(&path).unwrap();
        assert!(records.is_empty());
        assert_eq!(metadata.start, UNDEF_TIMESTAMP);
        assert_eq!(metadata.end, 0);
        assert_eq!(metadata.limit, 0);
        assert!(metadata.start().is_none());
        assert!(metadata.end().is_none());
        assert!(metadata.record_count().is_none());
    }

    #[test]
    fn test_write_after_close_fails_without_corrupting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("closed.dbn");
        let mut writer = StreamWriter::from_file(&path, &test_metadata()).unwrap();
        writer.write_record(&trade_at(1700000000000000000)).unwrap();
        writer.close().unwrap();
        assert!(matches!(
            writer.write_record(&trade_at(1700000001000000000)),
            Err(Error::WriterClosed)
        ));
        assert!(matches!(writer.close(), Err(Error::WriterClosed)));
        let (metadata, records) = crate::read_all(&path).unwrap();
        assert_eq!(metadata.limit, 1);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_finish_leaves_provisional_sentinels() {
        let metadata = test_metadata();
        let mut buffer = Vec::new();
        {
            let mut writer = StreamWriter::new(&mut buffer, &metadata).unwrap();
            writer.write_record(&trade_at(1700000000000000000)).unwrap();
            writer.write_record(&trade_at(1700000001000000000)).unwrap();
            writer.finish().unwrap();
        }
        let mut decoder = crate::decode::Decoder::new(buffer.as_slice()).unwrap();
        assert_eq!(decoder.metadata().start, UNDEF_TIMESTAMP);
        assert_eq!(decoder.metadata().end, 0);
        assert_eq!(decoder.metadata().limit, 0);
        let mut count = 0;
        while decoder.decode_record().unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn test_auto_flush_interval() {
        let metadata = test_metadata();
        let mut buffer = Vec::new();
        let mut writer = StreamWriter::new(&mut buffer, &metadata).unwrap();
        writer.set_auto_flush(NonZeroU64::new(2));
        for ts in 0..5i64 {
            writer.write_record(&trade_at(1700000000000000000 + ts)).unwrap();
        }
        assert_eq!(writer.record_count(), 5);
        assert_eq!(writer.last_flush_count, 4);
        writer.finish().unwrap();
    }

    #[test]
    fn test_mixed_record_types_allowed() {
        let metadata = MetadataBuilder::new()
            .dataset("XNAS.ITCH")
            .schema(None)
            .start(0)
            .stype_out(SType::InstrumentId)
            .build();
        let mut buffer = Vec::new();
        let mut writer = StreamWriter::new(&mut buffer, &metadata).unwrap();
        writer.write_record(&trade_at(10)).unwrap();
        writer
            .write_record(&RecordEnum::from(OhlcvMsg {
                hd: RecordHeader::new::<OhlcvMsg>(rtype::OHLCV_1S, 1, 5482, 20),
                ..Default::default()
            }))
            .unwrap();
        writer.finish().unwrap();
        let mut decoder = crate::decode::Decoder::new(buffer.as_slice()).unwrap();
        assert!(matches!(
            decoder.decode_record().unwrap(),
            Some(RecordEnum::Trade(_))
        ));
        assert!(matches!(
            decoder.decode_record().unwrap(),
            Some(RecordEnum::Ohlcv(_))
        ));
    }
}
