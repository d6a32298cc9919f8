//! Field-by-field little-endian serialization for every record type.
//!
//! Both directions are explicit: decoding reads each field out of the payload in
//! wire order and encoding writes them back the same way. Record structs are
//! never reinterpreted as raw bytes, so the host's struct layout can't leak into
//! the format.

use std::os::raw::c_char;

use crate::{
    decode::FromLittleEndianSlice,
    error::{Error, Result},
    flags::FlagSet,
    record::{
        BidAskPair, Cmbp1Msg, ConsolidatedBidAskPair, ErrorMsg, HasRType, ImbalanceMsg,
        InstrumentDefMsg, MboMsg, Mbp10Msg, Mbp1Msg, OhlcvMsg, RecordHeader, StatMsg, StatusMsg,
        SymbolMappingMsg, SystemMsg, TradeMsg, ERR_CSTR_LEN, SYSTEM_MSG_CSTR_LEN,
    },
    record_enum::RecordEnum,
    rtype, v2, SYMBOL_CSTR_LEN,
};

/// A sequential reader over a record payload. All fixed-width reads assume the
/// payload length was validated against the record's expected size beforehand.
pub(crate) struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, n: usize) -> &'a [u8] {
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        slice
    }

    fn u8(&mut self) -> u8 {
        self.take(1)[0]
    }

    fn i8(&mut self) -> i8 {
        self.u8() as i8
    }

    fn c_char(&mut self) -> c_char {
        self.u8() as c_char
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_slice(self.take(2))
    }

    fn i16(&mut self) -> i16 {
        i16::from_le_slice(self.take(2))
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_slice(self.take(4))
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_slice(self.take(4))
    }

    fn u64(&mut self) -> u64 {
        u64::from_le_slice(self.take(8))
    }

    fn i64(&mut self) -> i64 {
        i64::from_le_slice(self.take(8))
    }

    fn bytes<const N: usize>(&mut self) -> [u8; N] {
        self.take(N).try_into().unwrap()
    }

    fn c_chars<const N: usize>(&mut self) -> [c_char; N] {
        let mut res = [0; N];
        for (dst, src) in res.iter_mut().zip(self.take(N)) {
            *dst = *src as c_char;
        }
        res
    }

    /// Reads an `n`-byte NUL-padded text slot into an owned string, trimming at
    /// the first NUL.
    fn text(&mut self, n: usize) -> Result<String> {
        let raw = self.take(n);
        let nul = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());
        std::str::from_utf8(&raw[..nul])
            .map(ToOwned::to_owned)
            .map_err(|e| Error::invalid_format(format!("invalid UTF-8 in text field: {e}")))
    }
}

/// A sequential writer building a record's wire image.
pub(crate) struct FieldWriter {
    buf: Vec<u8>,
}

impl FieldWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn i8(&mut self, v: i8) {
        self.buf.push(v as u8);
    }

    fn c_char(&mut self, v: c_char) {
        self.buf.push(v as u8);
    }

    fn u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn i16(&mut self, v: i16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn bytes(&mut self, v: &[u8]) {
        self.buf.extend_from_slice(v);
    }

    fn c_chars(&mut self, v: &[c_char]) {
        for c in v {
            self.buf.push(*c as u8);
        }
    }

    /// Writes `s` into a fixed `n`-byte slot, padding the remainder with NULs.
    fn text(&mut self, s: &str, n: usize) -> Result<()> {
        if s.len() >= n {
            return Err(Error::encode_overflow(s, n));
        }
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.resize(self.buf.len() + (n - s.len()), 0);
        Ok(())
    }
}

/// Returns the expected total record size for `rtype` under `version`, or `None`
/// for the variable-length text records.
pub(crate) fn expected_record_size(version: u8, rtype: u8) -> Result<Option<usize>> {
    Ok(match rtype {
        rtype::MBO => Some(MboMsg::ENCODED_LEN),
        rtype::MBP_0 => Some(TradeMsg::ENCODED_LEN),
        rtype::MBP_1 | rtype::BBO_1S | rtype::BBO_1M => Some(Mbp1Msg::ENCODED_LEN),
        rtype::MBP_10 => Some(Mbp10Msg::ENCODED_LEN),
        rtype::CMBP_1 | rtype::CBBO_1S | rtype::CBBO_1M | rtype::TCBBO => {
            Some(Cmbp1Msg::ENCODED_LEN)
        }
        rtype::OHLCV_1S | rtype::OHLCV_1M | rtype::OHLCV_1H | rtype::OHLCV_1D => {
            Some(OhlcvMsg::ENCODED_LEN)
        }
        rtype::STATUS => Some(StatusMsg::ENCODED_LEN),
        rtype::INSTRUMENT_DEF => Some(if version == 2 {
            v2::InstrumentDefMsg::ENCODED_LEN
        } else {
            InstrumentDefMsg::ENCODED_LEN
        }),
        rtype::IMBALANCE => Some(ImbalanceMsg::ENCODED_LEN),
        rtype::STATISTICS => Some(if version == 2 {
            v2::StatMsg::ENCODED_LEN
        } else {
            StatMsg::ENCODED_LEN
        }),
        rtype::ERROR | rtype::SYMBOL_MAPPING | rtype::SYSTEM => None,
        other => return Err(Error::UnknownRecordType(other)),
    })
}

/// Decodes one complete record from `buf`, which must hold exactly the
/// `length × 4` bytes the header declares. Returns the record and the trailing
/// gateway send timestamp when the stream carries `ts_out`.
pub(crate) fn decode_record(
    version: u8,
    ts_out: bool,
    buf: &[u8],
) -> Result<(RecordEnum, Option<i64>)> {
    let hd = decode_header(buf);
    let mut body_end = buf.len();
    let ts_out_val = if ts_out {
        if body_end < RecordHeader::LEN + 8 {
            return Err(Error::invalid_format(format!(
                "record with rtype {:#04X} is too short to hold a ts_out suffix",
                hd.rtype
            )));
        }
        body_end -= 8;
        Some(i64::from_le_slice(&buf[body_end..]))
    } else {
        None
    };
    if let Some(expected) = expected_record_size(version, hd.rtype)? {
        if body_end != expected {
            return Err(Error::invalid_format(format!(
                "record with rtype {:#04X} declares {} bytes, expected {expected}",
                hd.rtype, body_end,
            )));
        }
    }
    let mut reader = FieldReader::new(&buf[RecordHeader::LEN..body_end]);
    let rec = match hd.rtype {
        rtype::MBO => RecordEnum::Mbo(decode_mbo(hd, &mut reader)),
        rtype::MBP_0 => RecordEnum::Trade(decode_trade(hd, &mut reader)),
        rtype::MBP_1 | rtype::BBO_1S | rtype::BBO_1M => {
            RecordEnum::Mbp1(decode_mbp1(hd, &mut reader))
        }
        rtype::MBP_10 => RecordEnum::Mbp10(decode_mbp10(hd, &mut reader)),
        rtype::CMBP_1 | rtype::CBBO_1S | rtype::CBBO_1M | rtype::TCBBO => {
            RecordEnum::Cmbp1(decode_cmbp1(hd, &mut reader))
        }
        rtype::OHLCV_1S | rtype::OHLCV_1M | rtype::OHLCV_1H | rtype::OHLCV_1D => {
            RecordEnum::Ohlcv(decode_ohlcv(hd, &mut reader))
        }
        rtype::STATUS => RecordEnum::Status(decode_status(hd, &mut reader)),
        rtype::INSTRUMENT_DEF => {
            if version == 2 {
                RecordEnum::InstrumentDefV2(decode_definition_v2(hd, &mut reader))
            } else {
                RecordEnum::InstrumentDef(decode_definition(hd, &mut reader))
            }
        }
        rtype::IMBALANCE => RecordEnum::Imbalance(decode_imbalance(hd, &mut reader)),
        rtype::STATISTICS => {
            if version == 2 {
                RecordEnum::StatV2(decode_stat_v2(hd, &mut reader))
            } else {
                RecordEnum::Stat(decode_stat(hd, &mut reader))
            }
        }
        rtype::ERROR => RecordEnum::Error(decode_error(hd, &mut reader)?),
        rtype::SYMBOL_MAPPING => RecordEnum::SymbolMapping(decode_symbol_mapping(hd, &mut reader)?),
        rtype::SYSTEM => RecordEnum::System(decode_system(hd, &mut reader)?),
        other => return Err(Error::UnknownRecordType(other)),
    };
    Ok((rec, ts_out_val))
}

/// Encodes `rec` into its wire image, recomputing the header's `length` field
/// from the variant's known size.
///
/// # Errors
/// This function returns an error if a version-dependent record doesn't match
/// the stream `version` or a string field overflows its fixed-width slot.
pub(crate) fn encode_record(version: u8, rec: &RecordEnum) -> Result<Vec<u8>> {
    match rec {
        RecordEnum::Mbo(rec) => {
            let mut w = header_writer(rec);
            encode_mbo(&mut w, rec);
            Ok(w.buf)
        }
        RecordEnum::Trade(rec) => {
            let mut w = header_writer(rec);
            encode_trade(&mut w, rec);
            Ok(w.buf)
        }
        RecordEnum::Mbp1(rec) => {
            let mut w = header_writer(rec);
            encode_mbp1(&mut w, rec);
            Ok(w.buf)
        }
        RecordEnum::Mbp10(rec) => {
            let mut w = header_writer(rec);
            encode_mbp10(&mut w, rec);
            Ok(w.buf)
        }
        RecordEnum::Cmbp1(rec) => {
            let mut w = header_writer(rec);
            encode_cmbp1(&mut w, rec);
            Ok(w.buf)
        }
        RecordEnum::Ohlcv(rec) => {
            let mut w = header_writer(rec);
            encode_ohlcv(&mut w, rec);
            Ok(w.buf)
        }
        RecordEnum::Status(rec) => {
            let mut w = header_writer(rec);
            encode_status(&mut w, rec);
            Ok(w.buf)
        }
        RecordEnum::InstrumentDef(rec) => {
            check_version(version, 3, "instrument definition")?;
            let mut w = header_writer(rec);
            encode_definition(&mut w, rec);
            Ok(w.buf)
        }
        RecordEnum::InstrumentDefV2(rec) => {
            check_version(version, 2, "instrument definition")?;
            let mut w = header_writer(rec);
            encode_definition_v2(&mut w, rec);
            Ok(w.buf)
        }
        RecordEnum::Imbalance(rec) => {
            let mut w = header_writer(rec);
            encode_imbalance(&mut w, rec);
            Ok(w.buf)
        }
        RecordEnum::Stat(rec) => {
            check_version(version, 3, "statistics")?;
            let mut w = header_writer(rec);
            encode_stat(&mut w, rec);
            Ok(w.buf)
        }
        RecordEnum::StatV2(rec) => {
            check_version(version, 2, "statistics")?;
            let mut w = header_writer(rec);
            encode_stat_v2(&mut w, rec);
            Ok(w.buf)
        }
        RecordEnum::Error(rec) => {
            let mut w = header_writer(rec);
            encode_error(&mut w, rec)?;
            Ok(w.buf)
        }
        RecordEnum::SymbolMapping(rec) => {
            let mut w = header_writer(rec);
            encode_symbol_mapping(&mut w, rec)?;
            Ok(w.buf)
        }
        RecordEnum::System(rec) => {
            let mut w = header_writer(rec);
            encode_system(&mut w, rec)?;
            Ok(w.buf)
        }
    }
}

fn check_version(version: u8, required: u8, kind: &str) -> Result<()> {
    if version == required {
        Ok(())
    } else {
        Err(Error::invalid_format(format!(
            "can't encode a version {required} {kind} record in a version {version} stream"
        )))
    }
}

fn decode_header(buf: &[u8]) -> RecordHeader {
    RecordHeader {
        length: buf[0],
        rtype: buf[1],
        publisher_id: u16::from_le_slice(&buf[2..]),
        instrument_id: u32::from_le_slice(&buf[4..]),
        ts_event: i64::from_le_slice(&buf[8..]),
    }
}

fn header_writer<T: HasRType>(rec: &T) -> FieldWriter {
    let hd = rec.header();
    debug_assert!(T::has_rtype(hd.rtype));
    let mut w = FieldWriter::with_capacity(T::ENCODED_LEN);
    w.u8((T::ENCODED_LEN / RecordHeader::LENGTH_MULTIPLIER) as u8);
    w.u8(hd.rtype);
    w.u16(hd.publisher_id);
    w.u32(hd.instrument_id);
    w.i64(hd.ts_event);
    w
}

fn decode_level(r: &mut FieldReader) -> BidAskPair {
    BidAskPair {
        bid_px: r.i64(),
        ask_px: r.i64(),
        bid_sz: r.u32(),
        ask_sz: r.u32(),
        bid_ct: r.u32(),
        ask_ct: r.u32(),
    }
}

fn encode_level(w: &mut FieldWriter, level: &BidAskPair) {
    w.i64(level.bid_px);
    w.i64(level.ask_px);
    w.u32(level.bid_sz);
    w.u32(level.ask_sz);
    w.u32(level.bid_ct);
    w.u32(level.ask_ct);
}

fn decode_consolidated_level(r: &mut FieldReader) -> ConsolidatedBidAskPair {
    ConsolidatedBidAskPair {
        bid_px: r.i64(),
        ask_px: r.i64(),
        bid_sz: r.u32(),
        ask_sz: r.u32(),
        bid_pb: r.u32(),
        ask_pb: r.u32(),
    }
}

fn encode_consolidated_level(w: &mut FieldWriter, level: &ConsolidatedBidAskPair) {
    w.i64(level.bid_px);
    w.i64(level.ask_px);
    w.u32(level.bid_sz);
    w.u32(level.ask_sz);
    w.u32(level.bid_pb);
    w.u32(level.ask_pb);
}

fn decode_mbo(hd: RecordHeader, r: &mut FieldReader) -> MboMsg {
    MboMsg {
        hd,
        order_id: r.u64(),
        price: r.i64(),
        size: r.u32(),
        flags: FlagSet::new(r.u8()),
        channel_id: r.u8(),
        action: r.c_char(),
        side: r.c_char(),
        ts_recv: r.i64(),
        ts_in_delta: r.i32(),
        sequence: r.u32(),
    }
}

fn encode_mbo(w: &mut FieldWriter, rec: &MboMsg) {
    w.u64(rec.order_id);
    w.i64(rec.price);
    w.u32(rec.size);
    w.u8(rec.flags.raw());
    w.u8(rec.channel_id);
    w.c_char(rec.action);
    w.c_char(rec.side);
    w.i64(rec.ts_recv);
    w.i32(rec.ts_in_delta);
    w.u32(rec.sequence);
}

fn decode_trade(hd: RecordHeader, r: &mut FieldReader) -> TradeMsg {
    TradeMsg {
        hd,
        price: r.i64(),
        size: r.u32(),
        action: r.c_char(),
        side: r.c_char(),
        flags: FlagSet::new(r.u8()),
        depth: r.u8(),
        ts_recv: r.i64(),
        ts_in_delta: r.i32(),
        sequence: r.u32(),
    }
}

fn encode_trade(w: &mut FieldWriter, rec: &TradeMsg) {
    w.i64(rec.price);
    w.u32(rec.size);
    w.c_char(rec.action);
    w.c_char(rec.side);
    w.u8(rec.flags.raw());
    w.u8(rec.depth);
    w.i64(rec.ts_recv);
    w.i32(rec.ts_in_delta);
    w.u32(rec.sequence);
}

fn decode_mbp1(hd: RecordHeader, r: &mut FieldReader) -> Mbp1Msg {
    Mbp1Msg {
        hd,
        price: r.i64(),
        size: r.u32(),
        action: r.c_char(),
        side: r.c_char(),
        flags: FlagSet::new(r.u8()),
        depth: r.u8(),
        ts_recv: r.i64(),
        ts_in_delta: r.i32(),
        sequence: r.u32(),
        levels: [decode_level(r)],
    }
}

fn encode_mbp1(w: &mut FieldWriter, rec: &Mbp1Msg) {
    w.i64(rec.price);
    w.u32(rec.size);
    w.c_char(rec.action);
    w.c_char(rec.side);
    w.u8(rec.flags.raw());
    w.u8(rec.depth);
    w.i64(rec.ts_recv);
    w.i32(rec.ts_in_delta);
    w.u32(rec.sequence);
    encode_level(w, &rec.levels[0]);
}

fn decode_mbp10(hd: RecordHeader, r: &mut FieldReader) -> Mbp10Msg {
    let mut rec = Mbp10Msg {
        hd,
        price: r.i64(),
        size: r.u32(),
        action: r.c_char(),
        side: r.c_char(),
        flags: FlagSet::new(r.u8()),
        depth: r.u8(),
        ts_recv: r.i64(),
        ts_in_delta: r.i32(),
        sequence: r.u32(),
        levels: [BidAskPair::default(); 10],
    };
    for level in rec.levels.iter_mut() {
        *level = decode_level(r);
    }
    rec
}

fn encode_mbp10(w: &mut FieldWriter, rec: &Mbp10Msg) {
    w.i64(rec.price);
    w.u32(rec.size);
    w.c_char(rec.action);
    w.c_char(rec.side);
    w.u8(rec.flags.raw());
    w.u8(rec.depth);
    w.i64(rec.ts_recv);
    w.i32(rec.ts_in_delta);
    w.u32(rec.sequence);
    for level in &rec.levels {
        encode_level(w, level);
    }
}

fn decode_cmbp1(hd: RecordHeader, r: &mut FieldReader) -> Cmbp1Msg {
    Cmbp1Msg {
        hd,
        price: r.i64(),
        size: r.u32(),
        action: r.c_char(),
        side: r.c_char(),
        flags: FlagSet::new(r.u8()),
        depth: r.u8(),
        ts_recv: r.i64(),
        ts_in_delta: r.i32(),
        sequence: r.u32(),
        levels: [decode_consolidated_level(r)],
    }
}

fn encode_cmbp1(w: &mut FieldWriter, rec: &Cmbp1Msg) {
    w.i64(rec.price);
    w.u32(rec.size);
    w.c_char(rec.action);
    w.c_char(rec.side);
    w.u8(rec.flags.raw());
    w.u8(rec.depth);
    w.i64(rec.ts_recv);
    w.i32(rec.ts_in_delta);
    w.u32(rec.sequence);
    encode_consolidated_level(w, &rec.levels[0]);
}

fn decode_ohlcv(hd: RecordHeader, r: &mut FieldReader) -> OhlcvMsg {
    OhlcvMsg {
        hd,
        open: r.i64(),
        high: r.i64(),
        low: r.i64(),
        close: r.i64(),
        volume: r.u64(),
    }
}

fn encode_ohlcv(w: &mut FieldWriter, rec: &OhlcvMsg) {
    w.i64(rec.open);
    w.i64(rec.high);
    w.i64(rec.low);
    w.i64(rec.close);
    w.u64(rec.volume);
}

fn decode_status(hd: RecordHeader, r: &mut FieldReader) -> StatusMsg {
    StatusMsg {
        hd,
        ts_recv: r.i64(),
        action: r.u16(),
        reason: r.u16(),
        trading_event: r.u16(),
        is_trading: r.c_char(),
        is_quoting: r.c_char(),
        is_short_sell_restricted: r.c_char(),
        _reserved: r.bytes(),
    }
}

fn encode_status(w: &mut FieldWriter, rec: &StatusMsg) {
    w.i64(rec.ts_recv);
    w.u16(rec.action);
    w.u16(rec.reason);
    w.u16(rec.trading_event);
    w.c_char(rec.is_trading);
    w.c_char(rec.is_quoting);
    w.c_char(rec.is_short_sell_restricted);
    w.bytes(&rec._reserved);
}

fn decode_definition(hd: RecordHeader, r: &mut FieldReader) -> InstrumentDefMsg {
    InstrumentDefMsg {
        hd,
        ts_recv: r.i64(),
        min_price_increment: r.i64(),
        display_factor: r.i64(),
        expiration: r.i64(),
        activation: r.i64(),
        high_limit_price: r.i64(),
        low_limit_price: r.i64(),
        max_price_variation: r.i64(),
        unit_of_measure_qty: r.i64(),
        min_price_increment_amount: r.i64(),
        price_ratio: r.i64(),
        strike_price: r.i64(),
        raw_instrument_id: r.u64(),
        leg_price: r.i64(),
        leg_delta: r.i64(),
        inst_attrib_value: r.i32(),
        underlying_id: r.u32(),
        market_depth_implied: r.i32(),
        market_depth: r.i32(),
        market_segment_id: r.u32(),
        max_trade_vol: r.u32(),
        min_lot_size: r.i32(),
        min_lot_size_block: r.i32(),
        min_lot_size_round_lot: r.i32(),
        min_trade_vol: r.u32(),
        contract_multiplier: r.i32(),
        decay_quantity: r.i32(),
        original_contract_size: r.i32(),
        leg_instrument_id: r.u32(),
        leg_ratio_price_numerator: r.i32(),
        leg_ratio_price_denominator: r.i32(),
        leg_ratio_qty_numerator: r.i32(),
        leg_ratio_qty_denominator: r.i32(),
        leg_underlying_id: r.u32(),
        appl_id: r.i16(),
        maturity_year: r.u16(),
        decay_start_date: r.u16(),
        channel_id: r.u16(),
        leg_count: r.u16(),
        leg_index: r.u16(),
        currency: r.c_chars(),
        settl_currency: r.c_chars(),
        secsubtype: r.c_chars(),
        raw_symbol: r.c_chars(),
        group: r.c_chars(),
        exchange: r.c_chars(),
        asset: r.c_chars(),
        cfi: r.c_chars(),
        security_type: r.c_chars(),
        unit_of_measure: r.c_chars(),
        underlying: r.c_chars(),
        strike_price_currency: r.c_chars(),
        leg_raw_symbol: r.c_chars(),
        instrument_class: r.c_char(),
        match_algorithm: r.c_char(),
        main_fraction: r.u8(),
        price_display_format: r.u8(),
        sub_fraction: r.u8(),
        underlying_product: r.u8(),
        security_update_action: r.c_char(),
        maturity_month: r.u8(),
        maturity_day: r.u8(),
        maturity_week: r.u8(),
        user_defined_instrument: r.c_char(),
        contract_multiplier_unit: r.i8(),
        flow_schedule_type: r.i8(),
        tick_rule: r.u8(),
        leg_instrument_class: r.c_char(),
        leg_side: r.c_char(),
        _reserved: r.bytes(),
    }
}

fn encode_definition(w: &mut FieldWriter, rec: &InstrumentDefMsg) {
    w.i64(rec.ts_recv);
    w.i64(rec.min_price_increment);
    w.i64(rec.display_factor);
    w.i64(rec.expiration);
    w.i64(rec.activation);
    w.i64(rec.high_limit_price);
    w.i64(rec.low_limit_price);
    w.i64(rec.max_price_variation);
    w.i64(rec.unit_of_measure_qty);
    w.i64(rec.min_price_increment_amount);
    w.i64(rec.price_ratio);
    w.i64(rec.strike_price);
    w.u64(rec.raw_instrument_id);
    w.i64(rec.leg_price);
    w.i64(rec.leg_delta);
    w.i32(rec.inst_attrib_value);
    w.u32(rec.underlying_id);
    w.i32(rec.market_depth_implied);
    w.i32(rec.market_depth);
    w.u32(rec.market_segment_id);
    w.u32(rec.max_trade_vol);
    w.i32(rec.min_lot_size);
    w.i32(rec.min_lot_size_block);
    w.i32(rec.min_lot_size_round_lot);
    w.u32(rec.min_trade_vol);
    w.i32(rec.contract_multiplier);
    w.i32(rec.decay_quantity);
    w.i32(rec.original_contract_size);
    w.u32(rec.leg_instrument_id);
    w.i32(rec.leg_ratio_price_numerator);
    w.i32(rec.leg_ratio_price_denominator);
    w.i32(rec.leg_ratio_qty_numerator);
    w.i32(rec.leg_ratio_qty_denominator);
    w.u32(rec.leg_underlying_id);
    w.i16(rec.appl_id);
    w.u16(rec.maturity_year);
    w.u16(rec.decay_start_date);
    w.u16(rec.channel_id);
    w.u16(rec.leg_count);
    w.u16(rec.leg_index);
    w.c_chars(&rec.currency);
    w.c_chars(&rec.settl_currency);
    w.c_chars(&rec.secsubtype);
    w.c_chars(&rec.raw_symbol);
    w.c_chars(&rec.group);
    w.c_chars(&rec.exchange);
    w.c_chars(&rec.asset);
    w.c_chars(&rec.cfi);
    w.c_chars(&rec.security_type);
    w.c_chars(&rec.unit_of_measure);
    w.c_chars(&rec.underlying);
    w.c_chars(&rec.strike_price_currency);
    w.c_chars(&rec.leg_raw_symbol);
    w.c_char(rec.instrument_class);
    w.c_char(rec.match_algorithm);
    w.u8(rec.main_fraction);
    w.u8(rec.price_display_format);
    w.u8(rec.sub_fraction);
    w.u8(rec.underlying_product);
    w.c_char(rec.security_update_action);
    w.u8(rec.maturity_month);
    w.u8(rec.maturity_day);
    w.u8(rec.maturity_week);
    w.c_char(rec.user_defined_instrument);
    w.i8(rec.contract_multiplier_unit);
    w.i8(rec.flow_schedule_type);
    w.u8(rec.tick_rule);
    w.c_char(rec.leg_instrument_class);
    w.c_char(rec.leg_side);
    w.bytes(&rec._reserved);
}

fn decode_definition_v2(hd: RecordHeader, r: &mut FieldReader) -> v2::InstrumentDefMsg {
    v2::InstrumentDefMsg {
        hd,
        ts_recv: r.i64(),
        min_price_increment: r.i64(),
        display_factor: r.i64(),
        expiration: r.i64(),
        activation: r.i64(),
        high_limit_price: r.i64(),
        low_limit_price: r.i64(),
        max_price_variation: r.i64(),
        trading_reference_price: r.i64(),
        unit_of_measure_qty: r.i64(),
        min_price_increment_amount: r.i64(),
        price_ratio: r.i64(),
        strike_price: r.i64(),
        inst_attrib_value: r.i32(),
        underlying_id: r.u32(),
        raw_instrument_id: r.u32(),
        market_depth_implied: r.i32(),
        market_depth: r.i32(),
        market_segment_id: r.u32(),
        max_trade_vol: r.u32(),
        min_lot_size: r.i32(),
        min_lot_size_block: r.i32(),
        min_lot_size_round_lot: r.i32(),
        min_trade_vol: r.u32(),
        contract_multiplier: r.i32(),
        decay_quantity: r.i32(),
        original_contract_size: r.i32(),
        trading_reference_date: r.u16(),
        appl_id: r.i16(),
        maturity_year: r.u16(),
        decay_start_date: r.u16(),
        channel_id: r.u16(),
        currency: r.c_chars(),
        settl_currency: r.c_chars(),
        secsubtype: r.c_chars(),
        raw_symbol: r.c_chars(),
        group: r.c_chars(),
        exchange: r.c_chars(),
        asset: r.c_chars(),
        cfi: r.c_chars(),
        security_type: r.c_chars(),
        unit_of_measure: r.c_chars(),
        underlying: r.c_chars(),
        strike_price_currency: r.c_chars(),
        instrument_class: r.c_char(),
        match_algorithm: r.c_char(),
        md_security_trading_status: r.u8(),
        main_fraction: r.u8(),
        price_display_format: r.u8(),
        settl_price_type: r.u8(),
        sub_fraction: r.u8(),
        underlying_product: r.u8(),
        security_update_action: r.c_char(),
        maturity_month: r.u8(),
        maturity_day: r.u8(),
        maturity_week: r.u8(),
        user_defined_instrument: r.c_char(),
        contract_multiplier_unit: r.i8(),
        flow_schedule_type: r.i8(),
        tick_rule: r.u8(),
        _reserved: r.bytes(),
    }
}

fn encode_definition_v2(w: &mut FieldWriter, rec: &v2::InstrumentDefMsg) {
    w.i64(rec.ts_recv);
    w.i64(rec.min_price_increment);
    w.i64(rec.display_factor);
    w.i64(rec.expiration);
    w.i64(rec.activation);
    w.i64(rec.high_limit_price);
    w.i64(rec.low_limit_price);
    w.i64(rec.max_price_variation);
    w.i64(rec.trading_reference_price);
    w.i64(rec.unit_of_measure_qty);
    w.i64(rec.min_price_increment_amount);
    w.i64(rec.price_ratio);
    w.i64(rec.strike_price);
    w.i32(rec.inst_attrib_value);
    w.u32(rec.underlying_id);
    w.u32(rec.raw_instrument_id);
    w.i32(rec.market_depth_implied);
    w.i32(rec.market_depth);
    w.u32(rec.market_segment_id);
    w.u32(rec.max_trade_vol);
    w.i32(rec.min_lot_size);
    w.i32(rec.min_lot_size_block);
    w.i32(rec.min_lot_size_round_lot);
    w.u32(rec.min_trade_vol);
    w.i32(rec.contract_multiplier);
    w.i32(rec.decay_quantity);
    w.i32(rec.original_contract_size);
    w.u16(rec.trading_reference_date);
    w.i16(rec.appl_id);
    w.u16(rec.maturity_year);
    w.u16(rec.decay_start_date);
    w.u16(rec.channel_id);
    w.c_chars(&rec.currency);
    w.c_chars(&rec.settl_currency);
    w.c_chars(&rec.secsubtype);
    w.c_chars(&rec.raw_symbol);
    w.c_chars(&rec.group);
    w.c_chars(&rec.exchange);
    w.c_chars(&rec.asset);
    w.c_chars(&rec.cfi);
    w.c_chars(&rec.security_type);
    w.c_chars(&rec.unit_of_measure);
    w.c_chars(&rec.underlying);
    w.c_chars(&rec.strike_price_currency);
    w.c_char(rec.instrument_class);
    w.c_char(rec.match_algorithm);
    w.u8(rec.md_security_trading_status);
    w.u8(rec.main_fraction);
    w.u8(rec.price_display_format);
    w.u8(rec.settl_price_type);
    w.u8(rec.sub_fraction);
    w.u8(rec.underlying_product);
    w.c_char(rec.security_update_action);
    w.u8(rec.maturity_month);
    w.u8(rec.maturity_day);
    w.u8(rec.maturity_week);
    w.c_char(rec.user_defined_instrument);
    w.i8(rec.contract_multiplier_unit);
    w.i8(rec.flow_schedule_type);
    w.u8(rec.tick_rule);
    w.bytes(&rec._reserved);
}

fn decode_imbalance(hd: RecordHeader, r: &mut FieldReader) -> ImbalanceMsg {
    ImbalanceMsg {
        hd,
        ts_recv: r.i64(),
        ref_price: r.i64(),
        auction_time: r.i64(),
        cont_book_clr_price: r.i64(),
        auct_interest_clr_price: r.i64(),
        ssr_filling_price: r.i64(),
        ind_match_price: r.i64(),
        upper_collar: r.i64(),
        lower_collar: r.i64(),
        paired_qty: r.u32(),
        total_imbalance_qty: r.u32(),
        market_imbalance_qty: r.u32(),
        unpaired_qty: r.u32(),
        auction_type: r.c_char(),
        side: r.c_char(),
        auction_status: r.u8(),
        freeze_status: r.u8(),
        num_extensions: r.u8(),
        unpaired_side: r.c_char(),
        significant_imbalance: r.c_char(),
        _reserved: r.bytes(),
    }
}

fn encode_imbalance(w: &mut FieldWriter, rec: &ImbalanceMsg) {
    w.i64(rec.ts_recv);
    w.i64(rec.ref_price);
    w.i64(rec.auction_time);
    w.i64(rec.cont_book_clr_price);
    w.i64(rec.auct_interest_clr_price);
    w.i64(rec.ssr_filling_price);
    w.i64(rec.ind_match_price);
    w.i64(rec.upper_collar);
    w.i64(rec.lower_collar);
    w.u32(rec.paired_qty);
    w.u32(rec.total_imbalance_qty);
    w.u32(rec.market_imbalance_qty);
    w.u32(rec.unpaired_qty);
    w.c_char(rec.auction_type);
    w.c_char(rec.side);
    w.u8(rec.auction_status);
    w.u8(rec.freeze_status);
    w.u8(rec.num_extensions);
    w.c_char(rec.unpaired_side);
    w.c_char(rec.significant_imbalance);
    w.bytes(&rec._reserved);
}

fn decode_stat(hd: RecordHeader, r: &mut FieldReader) -> StatMsg {
    StatMsg {
        hd,
        ts_recv: r.i64(),
        ts_ref: r.i64(),
        price: r.i64(),
        quantity: r.i64(),
        sequence: r.u32(),
        ts_in_delta: r.i32(),
        stat_type: r.u16(),
        channel_id: r.u16(),
        update_action: r.u8(),
        stat_flags: r.u8(),
        _reserved: r.bytes(),
    }
}

fn encode_stat(w: &mut FieldWriter, rec: &StatMsg) {
    w.i64(rec.ts_recv);
    w.i64(rec.ts_ref);
    w.i64(rec.price);
    w.i64(rec.quantity);
    w.u32(rec.sequence);
    w.i32(rec.ts_in_delta);
    w.u16(rec.stat_type);
    w.u16(rec.channel_id);
    w.u8(rec.update_action);
    w.u8(rec.stat_flags);
    w.bytes(&rec._reserved);
}

fn decode_stat_v2(hd: RecordHeader, r: &mut FieldReader) -> v2::StatMsg {
    v2::StatMsg {
        hd,
        ts_recv: r.i64(),
        ts_ref: r.i64(),
        price: r.i64(),
        quantity: r.i32(),
        sequence: r.u32(),
        ts_in_delta: r.i32(),
        stat_type: r.u16(),
        channel_id: r.u16(),
        update_action: r.u8(),
        stat_flags: r.u8(),
        _reserved: r.bytes(),
    }
}

fn encode_stat_v2(w: &mut FieldWriter, rec: &v2::StatMsg) {
    w.i64(rec.ts_recv);
    w.i64(rec.ts_ref);
    w.i64(rec.price);
    w.i32(rec.quantity);
    w.u32(rec.sequence);
    w.i32(rec.ts_in_delta);
    w.u16(rec.stat_type);
    w.u16(rec.channel_id);
    w.u8(rec.update_action);
    w.u8(rec.stat_flags);
    w.bytes(&rec._reserved);
}

fn decode_error(hd: RecordHeader, r: &mut FieldReader) -> Result<ErrorMsg> {
    let body = r.buf.len();
    if body < 2 {
        return Err(Error::invalid_format(format!(
            "error record with {body}-byte payload is too short"
        )));
    }
    Ok(ErrorMsg {
        hd,
        err: r.text(body - 2)?,
        code: r.u8(),
        is_last: r.u8(),
    })
}

fn encode_error(w: &mut FieldWriter, rec: &ErrorMsg) -> Result<()> {
    w.text(&rec.err, ERR_CSTR_LEN)?;
    w.u8(rec.code);
    w.u8(rec.is_last);
    Ok(())
}

fn decode_symbol_mapping(hd: RecordHeader, r: &mut FieldReader) -> Result<SymbolMappingMsg> {
    let body = r.buf.len();
    const FIXED: usize = 2 + 16;
    if body < FIXED + 2 || (body - FIXED) % 2 != 0 {
        return Err(Error::invalid_format(format!(
            "symbol mapping record with {body}-byte payload can't hold two equal symbol slots"
        )));
    }
    let slot = (body - FIXED) / 2;
    Ok(SymbolMappingMsg {
        hd,
        stype_in: r.u8(),
        stype_in_symbol: r.text(slot)?,
        stype_out: r.u8(),
        stype_out_symbol: r.text(slot)?,
        start_ts: r.i64(),
        end_ts: r.i64(),
    })
}

fn encode_symbol_mapping(w: &mut FieldWriter, rec: &SymbolMappingMsg) -> Result<()> {
    w.u8(rec.stype_in);
    w.text(&rec.stype_in_symbol, SYMBOL_CSTR_LEN)?;
    w.u8(rec.stype_out);
    w.text(&rec.stype_out_symbol, SYMBOL_CSTR_LEN)?;
    w.i64(rec.start_ts);
    w.i64(rec.end_ts);
    Ok(())
}

fn decode_system(hd: RecordHeader, r: &mut FieldReader) -> Result<SystemMsg> {
    let body = r.buf.len();
    if body < 1 {
        return Err(Error::invalid_format(
            "system record with empty payload".to_owned(),
        ));
    }
    Ok(SystemMsg {
        hd,
        msg: r.text(body - 1)?,
        code: r.u8(),
    })
}

fn encode_system(w: &mut FieldWriter, rec: &SystemMsg) -> Result<()> {
    w.text(&rec.msg, SYSTEM_MSG_CSTR_LEN)?;
    w.u8(rec.code);
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{record::str_to_c_chars, UNDEF_PRICE};

    fn round_trip(version: u8, rec: RecordEnum) {
        use crate::record::Record;
        let bytes = encode_record(version, &rec).unwrap();
        assert_eq!(bytes.len(), rec.record_size());
        let (decoded, ts_out) = decode_record(version, false, &bytes).unwrap();
        assert!(ts_out.is_none());
        assert_eq!(decoded, rec);
    }

    #[rstest]
    #[case::mbo(RecordEnum::from(MboMsg::default()))]
    #[case::trade(RecordEnum::from(TradeMsg::default()))]
    #[case::mbp1(RecordEnum::from(Mbp1Msg::default()))]
    #[case::mbp10(RecordEnum::from(Mbp10Msg::default()))]
    #[case::cmbp1(RecordEnum::from(Cmbp1Msg::default()))]
    #[case::ohlcv(RecordEnum::from(OhlcvMsg::default()))]
    #[case::status(RecordEnum::from(StatusMsg::default()))]
    #[case::definition(RecordEnum::from(InstrumentDefMsg::default()))]
    #[case::imbalance(RecordEnum::from(ImbalanceMsg::default()))]
    #[case::stat(RecordEnum::from(StatMsg::default()))]
    #[case::error(RecordEnum::from(ErrorMsg::default()))]
    #[case::symbol_mapping(RecordEnum::from(SymbolMappingMsg::default()))]
    #[case::system(RecordEnum::from(SystemMsg::default()))]
    fn test_v3_round_trip_defaults(#[case] rec: RecordEnum) {
        round_trip(3, rec);
    }

    #[rstest]
    #[case::definition(RecordEnum::from(v2::InstrumentDefMsg::default()))]
    #[case::stat(RecordEnum::from(v2::StatMsg::default()))]
    fn test_v2_round_trip_defaults(#[case] rec: RecordEnum) {
        round_trip(2, rec);
    }

    #[test]
    fn test_trade_wire_image_matches_catalog() {
        let rec = TradeMsg {
            hd: RecordHeader::new::<TradeMsg>(rtype::MBP_0, 1, 5482, 1609160400098821953),
            price: 3_720_250_000_000,
            size: 5,
            action: b'T' as c_char,
            side: b'A' as c_char,
            flags: FlagSet::new(0x81),
            depth: 0,
            ts_recv: 1609160400099150057,
            ts_in_delta: 19251,
            sequence: 1170380,
        };
        let bytes = encode_record(3, &RecordEnum::from(rec)).unwrap();
        assert_eq!(bytes.len(), 48);
        assert_eq!(bytes[0], 12);
        assert_eq!(bytes[1], 0x00);
        assert_eq!(u16::from_le_bytes([bytes[2], bytes[3]]), 1);
        assert_eq!(
            u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            5482
        );
        assert_eq!(
            i64::from_le_bytes(bytes[8..16].try_into().unwrap()),
            1609160400098821953
        );
        assert_eq!(
            i64::from_le_bytes(bytes[16..24].try_into().unwrap()),
            3_720_250_000_000
        );
        assert_eq!(
            u32::from_le_bytes(bytes[24..28].try_into().unwrap()),
            5
        );
        assert_eq!(bytes[28], b'T');
        assert_eq!(bytes[29], b'A');
        assert_eq!(bytes[30], 0x81);
        assert_eq!(bytes[31], 0);
        assert_eq!(
            i64::from_le_bytes(bytes[32..40].try_into().unwrap()),
            1609160400099150057
        );
        assert_eq!(
            i32::from_le_bytes(bytes[40..44].try_into().unwrap()),
            19251
        );
        assert_eq!(
            u32::from_le_bytes(bytes[44..48].try_into().unwrap()),
            1170380
        );
        let (decoded, _) = decode_record(3, false, &bytes).unwrap();
        assert_eq!(decoded, RecordEnum::from(rec));
    }

    #[test]
    fn test_mbp10_mirrored_levels() {
        let mut rec = Mbp10Msg {
            hd: RecordHeader::new::<Mbp10Msg>(rtype::MBP_10, 1, 5482, 1609160400000000000),
            ..Default::default()
        };
        for (i, level) in rec.levels.iter_mut().enumerate() {
            level.bid_px = 3_720_250_000_000 - i as i64 * 250_000_000;
            level.ask_px = 3_720_250_000_000 + (i as i64 + 1) * 250_000_000;
            level.bid_sz = 10 + i as u32;
            level.ask_sz = 10 + i as u32;
            level.bid_ct = 1;
            level.ask_ct = 1;
        }
        let bytes = encode_record(3, &RecordEnum::from(rec)).unwrap();
        assert_eq!(bytes.len(), 368);
        let (decoded, _) = decode_record(3, false, &bytes).unwrap();
        assert_eq!(decoded, RecordEnum::from(rec));
    }

    #[test]
    fn test_ohlcv_payload_identical_across_versions() {
        let rec = OhlcvMsg {
            hd: RecordHeader::new::<OhlcvMsg>(rtype::OHLCV_1S, 1, 5482, 1609160400000000000),
            open: 372_025_000_000_000,
            high: 372_050_000_000_000,
            low: 372_025_000_000_000,
            close: 372_050_000_000_000,
            volume: 57,
        };
        let v2_bytes = encode_record(2, &RecordEnum::from(rec)).unwrap();
        let v3_bytes = encode_record(3, &RecordEnum::from(rec)).unwrap();
        assert_eq!(v2_bytes, v3_bytes);
        let (from_v2, _) = decode_record(2, false, &v2_bytes).unwrap();
        let (from_v3, _) = decode_record(3, false, &v3_bytes).unwrap();
        assert_eq!(from_v2, from_v3);
    }

    #[test]
    fn test_definition_v3_preserves_leg_fields() {
        let rec = InstrumentDefMsg {
            hd: RecordHeader::new::<InstrumentDefMsg>(
                rtype::INSTRUMENT_DEF,
                1,
                5482,
                1609160400000000000,
            ),
            leg_count: 2,
            leg_index: 1,
            leg_instrument_id: 9876,
            leg_raw_symbol: str_to_c_chars("ESH5-ESM5").unwrap(),
            leg_instrument_class: b'F' as c_char,
            leg_side: b'B' as c_char,
            leg_underlying_id: 55,
            leg_ratio_price_numerator: 1,
            leg_ratio_price_denominator: 2,
            leg_ratio_qty_numerator: 3,
            leg_ratio_qty_denominator: 4,
            leg_price: 1_250_000_000,
            leg_delta: 500_000_000,
            ..Default::default()
        };
        let bytes = encode_record(3, &RecordEnum::from(rec)).unwrap();
        assert_eq!(bytes.len(), 520);
        let (decoded, _) = decode_record(3, false, &bytes).unwrap();
        let RecordEnum::InstrumentDef(decoded) = decoded else {
            panic!("wrong variant");
        };
        assert_eq!(decoded, rec);
        assert_eq!(decoded.leg_count, 2);
        assert_eq!(
            crate::record::c_chars_to_str(&decoded.leg_raw_symbol).unwrap(),
            "ESH5-ESM5"
        );
    }

    #[test]
    fn test_stat_quantity_width_depends_on_version() {
        let v3_stat = StatMsg {
            quantity: i64::from(u32::MAX) + 10,
            ..Default::default()
        };
        let bytes = encode_record(3, &RecordEnum::from(v3_stat)).unwrap();
        assert_eq!(bytes.len(), 80);
        let v2_stat = v2::StatMsg {
            quantity: 123,
            ..Default::default()
        };
        let bytes = encode_record(2, &RecordEnum::from(v2_stat)).unwrap();
        assert_eq!(bytes.len(), 64);
    }

    #[test]
    fn test_version_mismatch_is_an_error() {
        let res = encode_record(2, &RecordEnum::from(InstrumentDefMsg::default()));
        assert!(matches!(res, Err(Error::InvalidFormat(_))));
        let res = encode_record(3, &RecordEnum::from(v2::StatMsg::default()));
        assert!(matches!(res, Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_unknown_rtype_is_an_error() {
        let mut bytes = encode_record(3, &RecordEnum::from(TradeMsg::default())).unwrap();
        bytes[1] = 0x69;
        let res = decode_record(3, false, &bytes);
        assert!(matches!(res, Err(Error::UnknownRecordType(0x69))));
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let rec = TradeMsg::default();
        let mut bytes = encode_record(3, &RecordEnum::from(rec)).unwrap();
        // make it an MBO tag with a trade-sized body
        bytes[1] = rtype::MBO;
        let res = decode_record(3, false, &bytes);
        assert!(matches!(res, Err(Error::InvalidFormat(msg)) if msg.contains("expected 56")));
    }

    #[test]
    fn test_variable_length_text_trims_trailing_nuls() {
        let rec = ErrorMsg {
            hd: RecordHeader::new::<ErrorMsg>(rtype::ERROR, 0, 0, 0),
            err: "Test failed successfully".to_owned(),
            code: 7,
            is_last: 1,
        };
        let bytes = encode_record(3, &RecordEnum::from(rec.clone())).unwrap();
        assert_eq!(bytes.len(), 320);
        let (decoded, _) = decode_record(3, false, &bytes).unwrap();
        assert_eq!(decoded, RecordEnum::Error(rec));
    }

    #[test]
    fn test_error_text_overflow() {
        let rec = ErrorMsg {
            hd: RecordHeader::new::<ErrorMsg>(rtype::ERROR, 0, 0, 0),
            err: "x".repeat(ERR_CSTR_LEN),
            code: 0,
            is_last: 1,
        };
        let res = encode_record(3, &RecordEnum::from(rec));
        assert!(matches!(res, Err(Error::EncodeOverflow { .. })));
    }

    #[test]
    fn test_symbol_mapping_round_trip() {
        let rec = SymbolMappingMsg {
            hd: RecordHeader::new::<SymbolMappingMsg>(rtype::SYMBOL_MAPPING, 0, 5482, 0),
            stype_in: 1,
            stype_in_symbol: "ESM2".to_owned(),
            stype_out: 0,
            stype_out_symbol: "5482".to_owned(),
            start_ts: 1609160400000000000,
            end_ts: 1609246800000000000,
        };
        let bytes = encode_record(3, &RecordEnum::from(rec.clone())).unwrap();
        assert_eq!(bytes.len(), 176);
        let (decoded, _) = decode_record(3, false, &bytes).unwrap();
        assert_eq!(decoded, RecordEnum::SymbolMapping(rec));
    }

    #[test]
    fn test_ts_out_suffix_round_trip() {
        let rec = RecordEnum::from(TradeMsg::default());
        let mut bytes = encode_record(3, &rec).unwrap();
        // append a send timestamp and patch the length
        bytes.extend_from_slice(&1609160400099999999i64.to_le_bytes());
        bytes[0] += 2;
        let (decoded, ts_out) = decode_record(3, true, &bytes).unwrap();
        assert_eq!(decoded, rec);
        assert_eq!(ts_out, Some(1609160400099999999));
    }

    #[test]
    fn test_undef_price_survives_round_trip() {
        let rec = TradeMsg {
            price: UNDEF_PRICE,
            ..Default::default()
        };
        let bytes = encode_record(3, &RecordEnum::from(rec)).unwrap();
        let (decoded, _) = decode_record(3, false, &bytes).unwrap();
        let RecordEnum::Trade(decoded) = decoded else {
            panic!("wrong variant");
        };
        assert_eq!(decoded.price, UNDEF_PRICE);
    }
}
