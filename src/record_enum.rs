//! An owned, closed tagged variant over the record type catalog.

use crate::{
    record::{
        Cmbp1Msg, ErrorMsg, ImbalanceMsg, InstrumentDefMsg, MboMsg, Mbp10Msg, Mbp1Msg, OhlcvMsg,
        Record, RecordHeader, RecordMut, StatMsg, StatusMsg, SymbolMappingMsg, SystemMsg, TradeMsg,
    },
    rtype, v2,
};

/// An owned DBN record of flexible type. Pattern matching recovers the concrete
/// payload. The set of variants is closed by the format; the version-dependent
/// layouts (instrument definitions and statistics) appear as distinct variants
/// rather than being widened silently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordEnum {
    /// A market-by-order message.
    Mbo(MboMsg),
    /// A trade message.
    Trade(TradeMsg),
    /// A market-by-price message with a book depth of 1, including the
    /// subsampled BBO records.
    Mbp1(Mbp1Msg),
    /// A market-by-price message with a book depth of 10.
    Mbp10(Mbp10Msg),
    /// A consolidated best bid and offer message, including the subsampled CBBO
    /// and TCBBO records.
    Cmbp1(Cmbp1Msg),
    /// An open, high, low, close, and volume message at any cadence.
    Ohlcv(OhlcvMsg),
    /// A trading status message.
    Status(StatusMsg),
    /// An instrument definition message in the version 3 layout.
    InstrumentDef(InstrumentDefMsg),
    /// An instrument definition message in the version 2 layout.
    InstrumentDefV2(v2::InstrumentDefMsg),
    /// An auction imbalance message.
    Imbalance(ImbalanceMsg),
    /// A publisher statistic message in the version 3 layout.
    Stat(StatMsg),
    /// A publisher statistic message in the version 2 layout.
    StatV2(v2::StatMsg),
    /// An error message from the gateway.
    Error(ErrorMsg),
    /// A symbol mapping message.
    SymbolMapping(SymbolMappingMsg),
    /// A non-error message from the gateway.
    System(SystemMsg),
}

impl Record for RecordEnum {
    fn header(&self) -> &RecordHeader {
        match self {
            Self::Mbo(rec) => rec.header(),
            Self::Trade(rec) => rec.header(),
            Self::Mbp1(rec) => rec.header(),
            Self::Mbp10(rec) => rec.header(),
            Self::Cmbp1(rec) => rec.header(),
            Self::Ohlcv(rec) => rec.header(),
            Self::Status(rec) => rec.header(),
            Self::InstrumentDef(rec) => rec.header(),
            Self::InstrumentDefV2(rec) => rec.header(),
            Self::Imbalance(rec) => rec.header(),
            Self::Stat(rec) => rec.header(),
            Self::StatV2(rec) => rec.header(),
            Self::Error(rec) => rec.header(),
            Self::SymbolMapping(rec) => rec.header(),
            Self::System(rec) => rec.header(),
        }
    }
}

impl RecordMut for RecordEnum {
    fn header_mut(&mut self) -> &mut RecordHeader {
        match self {
            Self::Mbo(rec) => rec.header_mut(),
            Self::Trade(rec) => rec.header_mut(),
            Self::Mbp1(rec) => rec.header_mut(),
            Self::Mbp10(rec) => rec.header_mut(),
            Self::Cmbp1(rec) => rec.header_mut(),
            Self::Ohlcv(rec) => rec.header_mut(),
            Self::Status(rec) => rec.header_mut(),
            Self::InstrumentDef(rec) => rec.header_mut(),
            Self::InstrumentDefV2(rec) => rec.header_mut(),
            Self::Imbalance(rec) => rec.header_mut(),
            Self::Stat(rec) => rec.header_mut(),
            Self::StatV2(rec) => rec.header_mut(),
            Self::Error(rec) => rec.header_mut(),
            Self::SymbolMapping(rec) => rec.header_mut(),
            Self::System(rec) => rec.header_mut(),
        }
    }
}

impl_record!(MboMsg, Mbo, 56, [rtype::MBO]);
impl_record!(TradeMsg, Trade, 48, [rtype::MBP_0]);
impl_record!(
    Mbp1Msg,
    Mbp1,
    80,
    [rtype::MBP_1, rtype::BBO_1S, rtype::BBO_1M]
);
impl_record!(Mbp10Msg, Mbp10, 368, [rtype::MBP_10]);
impl_record!(
    Cmbp1Msg,
    Cmbp1,
    80,
    [rtype::CMBP_1, rtype::CBBO_1S, rtype::CBBO_1M, rtype::TCBBO]
);
impl_record!(
    OhlcvMsg,
    Ohlcv,
    56,
    [rtype::OHLCV_1S, rtype::OHLCV_1M, rtype::OHLCV_1H, rtype::OHLCV_1D]
);
impl_record!(StatusMsg, Status, 40, [rtype::STATUS]);
impl_record!(InstrumentDefMsg, InstrumentDef, 520, [rtype::INSTRUMENT_DEF]);
impl_record!(ImbalanceMsg, Imbalance, 112, [rtype::IMBALANCE]);
impl_record!(StatMsg, Stat, 80, [rtype::STATISTICS]);
impl_record!(ErrorMsg, Error, 320, [rtype::ERROR]);
impl_record!(SymbolMappingMsg, SymbolMapping, 176, [rtype::SYMBOL_MAPPING]);
impl_record!(SystemMsg, System, 320, [rtype::SYSTEM]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::HasRType;

    #[test]
    fn test_enum_round_trip_preserves_variant() {
        let rec = RecordEnum::from(TradeMsg::default());
        let trade = TradeMsg::try_from(rec.clone()).unwrap();
        assert_eq!(RecordEnum::from(trade), rec);
        assert!(MboMsg::try_from(rec).is_err());
    }

    #[test]
    fn test_mbp1_accepts_subsampled_bbo_tags() {
        assert!(Mbp1Msg::has_rtype(rtype::MBP_1));
        assert!(Mbp1Msg::has_rtype(rtype::BBO_1S));
        assert!(Mbp1Msg::has_rtype(rtype::BBO_1M));
        assert!(!Mbp1Msg::has_rtype(rtype::CMBP_1));
        assert!(Cmbp1Msg::has_rtype(rtype::TCBBO));
    }

    #[test]
    fn test_enum_header_dispatch() {
        let rec = RecordEnum::from(OhlcvMsg::default());
        assert_eq!(rec.header().rtype, rtype::OHLCV_1S);
        assert_eq!(rec.record_size(), 56);
    }
}
