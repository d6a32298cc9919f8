use std::io;

use super::{dbn::RecordDecoder, Decoder};
use crate::{RecordEnum, Result};

/// A lazy, single-pass iterator over the records of a DBN stream. Produced by
/// iterating a [`Decoder`].
///
/// The iterator is fused around failure: after yielding an `Err` it yields
/// nothing further, since the stream position is no longer trustworthy.
/// Restarting requires reopening the input.
pub struct RecordIter<R> {
    decoder: RecordDecoder<R>,
    done: bool,
}

impl<R> Iterator for RecordIter<R>
where
    R: io::Read,
{
    type Item = Result<RecordEnum>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.decoder.decode() {
            Ok(Some(rec)) => Some(Ok(rec)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<R> IntoIterator for Decoder<R>
where
    R: io::Read,
{
    type Item = Result<RecordEnum>;
    type IntoIter = RecordIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        RecordIter {
            decoder: self.into_record_decoder(),
            done: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        encode::Encoder,
        enums::{SType, Schema},
        record::{RecordHeader, TradeMsg},
        rtype, MetadataBuilder,
    };

    fn encoded_trades(count: u32) -> Vec<u8> {
        let metadata = MetadataBuilder::new()
            .dataset("XNAS.ITCH")
            .schema(Some(Schema::Trades))
            .start(0)
            .stype_out(SType::InstrumentId)
            .build();
        let mut buffer = Vec::new();
        let mut encoder = Encoder::new(&mut buffer, &metadata).unwrap();
        for instrument_id in 0..count {
            let rec = TradeMsg {
                hd: RecordHeader::new::<TradeMsg>(rtype::MBP_0, 1, instrument_id, 100),
                ..Default::default()
            };
            encoder.encode_record(&RecordEnum::from(rec)).unwrap();
        }
        buffer
    }

    #[test]
    fn test_iterator_completes_cleanly() {
        let buffer = encoded_trades(3);
        let decoder = Decoder::new(buffer.as_slice()).unwrap();
        let records: Vec<_> = decoder.into_iter().map(Result::unwrap).collect();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_iterator_fuses_after_error() {
        let mut buffer = encoded_trades(2);
        // corrupt the second record's rtype
        let second_start = buffer.len() - 48;
        buffer[second_start + 1] = 0x55;
        let decoder = Decoder::new(buffer.as_slice()).unwrap();
        let mut iter = decoder.into_iter();
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }
}
