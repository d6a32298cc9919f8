//! Enums for the coded fields and type tags used throughout DBN.

use std::fmt::{self, Display, Formatter};

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// A side of the market. The side of the market for resting orders, or the side
/// of the aggressor for trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Side {
    /// A sell order or sell aggressor in a trade.
    Ask = b'A',
    /// A buy order or a buy aggressor in a trade.
    Bid = b'B',
    /// No side specified by the original source.
    #[default]
    None = b'N',
}

impl From<Side> for char {
    fn from(side: Side) -> Self {
        u8::from(side) as char
    }
}

/// An order event or order book operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Action {
    /// An existing order was modified: price and/or size.
    Modify = b'M',
    /// An aggressing order traded. Does not affect the book.
    Trade = b'T',
    /// An existing order was filled. Does not affect the book.
    Fill = b'F',
    /// An order was fully or partially cancelled.
    Cancel = b'C',
    /// A new order was added to the book.
    Add = b'A',
    /// Reset the book; clear all orders for an instrument.
    Clear = b'R',
    /// Has no effect on the book, but may carry `flags` or other information.
    #[default]
    None = b'N',
}

impl From<Action> for char {
    fn from(action: Action) -> Self {
        u8::from(action) as char
    }
}

/// The class of instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum InstrumentClass {
    /// A bond.
    Bond = b'B',
    /// A call option.
    Call = b'C',
    /// A future.
    Future = b'F',
    /// A stock.
    Stock = b'K',
    /// A spread composed of multiple instrument classes.
    MixedSpread = b'M',
    /// A put option.
    Put = b'P',
    /// A spread composed of futures.
    FutureSpread = b'S',
    /// A spread composed of options.
    OptionSpread = b'T',
    /// A foreign exchange spot.
    FxSpot = b'X',
}

impl From<InstrumentClass> for char {
    fn from(class: InstrumentClass) -> Self {
        u8::from(class) as char
    }
}

impl InstrumentClass {
    /// Returns `true` if the instrument class is a type of option.
    ///
    /// Note: excludes [`Self::MixedSpread`], which *may* include options.
    pub fn is_option(&self) -> bool {
        matches!(self, Self::Call | Self::Put | Self::OptionSpread)
    }

    /// Returns `true` if the instrument class is a type of future.
    ///
    /// Note: excludes [`Self::MixedSpread`], which *may* include futures.
    pub fn is_future(&self) -> bool {
        matches!(self, Self::Future | Self::FutureSpread)
    }

    /// Returns `true` if the instrument class is a type of spread, i.e. composed
    /// of two or more instrument legs.
    pub fn is_spread(&self) -> bool {
        matches!(
            self,
            Self::FutureSpread | Self::OptionSpread | Self::MixedSpread
        )
    }
}

/// A symbology type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SType {
    /// Symbology using a unique numeric ID.
    InstrumentId = 0,
    /// Symbology using the original symbols provided by the publisher.
    RawSymbol = 1,
    /// A continuous symbology where one symbol may point to different instruments
    /// at different points of time, e.g. to always refer to the front month
    /// future.
    Continuous = 3,
    /// A symbology for referring to a group of symbols by one "parent" symbol,
    /// e.g. ES.FUT to refer to all ES futures.
    Parent = 4,
    /// Symbology for US equities using NASDAQ Integrated suffix conventions.
    NasdaqSymbol = 5,
    /// Symbology for US equities using CMS suffix conventions.
    CmsSymbol = 6,
}

impl std::str::FromStr for SType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instrument_id" => Ok(SType::InstrumentId),
            "raw_symbol" => Ok(SType::RawSymbol),
            "continuous" => Ok(SType::Continuous),
            "parent" => Ok(SType::Parent),
            "nasdaq_symbol" | "nasdaq" => Ok(SType::NasdaqSymbol),
            "cms_symbol" | "cms" => Ok(SType::CmsSymbol),
            _ => Err(crate::Error::invalid_format(format!(
                "unknown symbology type '{s}'"
            ))),
        }
    }
}

impl AsRef<str> for SType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl SType {
    /// Convert the symbology type to its `str` representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SType::InstrumentId => "instrument_id",
            SType::RawSymbol => "raw_symbol",
            SType::Continuous => "continuous",
            SType::Parent => "parent",
            SType::NasdaqSymbol => "nasdaq_symbol",
            SType::CmsSymbol => "cms_symbol",
        }
    }
}

impl Display for SType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub use rtype::RType;

/// Record types, possible values for [`RecordHeader::rtype`][crate::RecordHeader::rtype].
pub mod rtype {
    use num_enum::TryFromPrimitive;

    use super::Schema;

    /// A record type, i.e. a tag for the different types implementing
    /// [`HasRType`](crate::record::HasRType).
    ///
    /// The set of possible values is closed by the format; decoding a tag outside
    /// this set is a hard error.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[repr(u8)]
    pub enum RType {
        /// Denotes a market-by-price record with a book depth of 0 (used for the
        /// [`Trades`](super::Schema::Trades) schema).
        Mbp0 = 0,
        /// Denotes a market-by-price record with a book depth of 1 (also used for
        /// the [`Tbbo`](super::Schema::Tbbo) schema).
        Mbp1 = 0x01,
        /// Denotes a market-by-price record with a book depth of 10.
        Mbp10 = 0x0A,
        /// Denotes an exchange status record.
        Status = 0x12,
        /// Denotes an instrument definition record.
        InstrumentDef = 0x13,
        /// Denotes an order imbalance record.
        Imbalance = 0x14,
        /// Denotes an error from the gateway.
        Error = 0x15,
        /// Denotes a symbol mapping record.
        SymbolMapping = 0x16,
        /// Denotes a non-error message from the gateway. Also used for heartbeats.
        System = 0x17,
        /// Denotes a statistics record from the publisher (not calculated by
        /// Databento).
        Statistics = 0x18,
        /// Denotes an open, high, low, close, and volume record at a 1-second
        /// cadence.
        Ohlcv1S = 0x20,
        /// Denotes an open, high, low, close, and volume record at a 1-minute
        /// cadence.
        Ohlcv1M = 0x21,
        /// Denotes an open, high, low, close, and volume record at an hourly
        /// cadence.
        Ohlcv1H = 0x22,
        /// Denotes an open, high, low, close, and volume record at a daily cadence
        /// based on the UTC date.
        Ohlcv1D = 0x23,
        /// Denotes a market-by-order record.
        Mbo = 0xA0,
        /// Denotes a consolidated best bid and offer record.
        Cmbp1 = 0xB1,
        /// Denotes a consolidated best bid and offer record subsampled on a
        /// one-second interval.
        Cbbo1S = 0xC0,
        /// Denotes a consolidated best bid and offer record subsampled on a
        /// one-minute interval.
        Cbbo1M = 0xC1,
        /// Denotes a consolidated best bid and offer trade record containing the
        /// consolidated BBO before the trade.
        Tcbbo = 0xC2,
        /// Denotes a best bid and offer record subsampled on a one-second
        /// interval.
        Bbo1S = 0xC3,
        /// Denotes a best bid and offer record subsampled on a one-minute
        /// interval.
        Bbo1M = 0xC4,
    }

    /// Denotes a market-by-price record with a book depth of 0 (used for the
    /// [`Trades`](super::Schema::Trades) schema).
    pub const MBP_0: u8 = RType::Mbp0 as u8;
    /// Denotes a market-by-price record with a book depth of 1 (also used for the
    /// [`Tbbo`](super::Schema::Tbbo) schema).
    pub const MBP_1: u8 = RType::Mbp1 as u8;
    /// Denotes a market-by-price record with a book depth of 10.
    pub const MBP_10: u8 = RType::Mbp10 as u8;
    /// Denotes an exchange status record.
    pub const STATUS: u8 = RType::Status as u8;
    /// Denotes an instrument definition record.
    pub const INSTRUMENT_DEF: u8 = RType::InstrumentDef as u8;
    /// Denotes an order imbalance record.
    pub const IMBALANCE: u8 = RType::Imbalance as u8;
    /// Denotes an error from the gateway.
    pub const ERROR: u8 = RType::Error as u8;
    /// Denotes a symbol mapping record.
    pub const SYMBOL_MAPPING: u8 = RType::SymbolMapping as u8;
    /// Denotes a non-error message from the gateway. Also used for heartbeats.
    pub const SYSTEM: u8 = RType::System as u8;
    /// Denotes a statistics record from the publisher (not calculated by
    /// Databento).
    pub const STATISTICS: u8 = RType::Statistics as u8;
    /// Denotes an open, high, low, close, and volume record at a 1-second cadence.
    pub const OHLCV_1S: u8 = RType::Ohlcv1S as u8;
    /// Denotes an open, high, low, close, and volume record at a 1-minute cadence.
    pub const OHLCV_1M: u8 = RType::Ohlcv1M as u8;
    /// Denotes an open, high, low, close, and volume record at an hourly cadence.
    pub const OHLCV_1H: u8 = RType::Ohlcv1H as u8;
    /// Denotes an open, high, low, close, and volume record at a daily cadence
    /// based on the UTC date.
    pub const OHLCV_1D: u8 = RType::Ohlcv1D as u8;
    /// Denotes a market-by-order record.
    pub const MBO: u8 = RType::Mbo as u8;
    /// Denotes a consolidated best bid and offer record.
    pub const CMBP_1: u8 = RType::Cmbp1 as u8;
    /// Denotes a consolidated best bid and offer record subsampled on a one-second
    /// interval.
    pub const CBBO_1S: u8 = RType::Cbbo1S as u8;
    /// Denotes a consolidated best bid and offer record subsampled on a one-minute
    /// interval.
    pub const CBBO_1M: u8 = RType::Cbbo1M as u8;
    /// Denotes a consolidated best bid and offer trade record containing the
    /// consolidated BBO before the trade.
    pub const TCBBO: u8 = RType::Tcbbo as u8;
    /// Denotes a best bid and offer record subsampled on a one-second interval.
    pub const BBO_1S: u8 = RType::Bbo1S as u8;
    /// Denotes a best bid and offer record subsampled on a one-minute interval.
    pub const BBO_1M: u8 = RType::Bbo1M as u8;

    impl From<Schema> for RType {
        fn from(schema: Schema) -> Self {
            match schema {
                Schema::Mbo => RType::Mbo,
                Schema::Mbp1 | Schema::Tbbo => RType::Mbp1,
                Schema::Mbp10 => RType::Mbp10,
                Schema::Trades => RType::Mbp0,
                Schema::Ohlcv1S => RType::Ohlcv1S,
                Schema::Ohlcv1M => RType::Ohlcv1M,
                Schema::Ohlcv1H => RType::Ohlcv1H,
                Schema::Ohlcv1D => RType::Ohlcv1D,
                Schema::Definition => RType::InstrumentDef,
                Schema::Statistics => RType::Statistics,
                Schema::Status => RType::Status,
                Schema::Imbalance => RType::Imbalance,
                Schema::Cmbp1 => RType::Cmbp1,
                Schema::Cbbo1S => RType::Cbbo1S,
                Schema::Cbbo1M => RType::Cbbo1M,
                Schema::Tcbbo => RType::Tcbbo,
                Schema::Bbo1S => RType::Bbo1S,
                Schema::Bbo1M => RType::Bbo1M,
            }
        }
    }

    /// Tries to convert the given rtype to a [`Schema`].
    ///
    /// Returns `None` if there's no corresponding `Schema` for the given rtype.
    pub fn try_into_schema(rtype: u8) -> Option<Schema> {
        match rtype {
            MBP_0 => Some(Schema::Trades),
            MBP_1 => Some(Schema::Mbp1),
            MBP_10 => Some(Schema::Mbp10),
            STATUS => Some(Schema::Status),
            INSTRUMENT_DEF => Some(Schema::Definition),
            IMBALANCE => Some(Schema::Imbalance),
            STATISTICS => Some(Schema::Statistics),
            OHLCV_1S => Some(Schema::Ohlcv1S),
            OHLCV_1M => Some(Schema::Ohlcv1M),
            OHLCV_1H => Some(Schema::Ohlcv1H),
            OHLCV_1D => Some(Schema::Ohlcv1D),
            MBO => Some(Schema::Mbo),
            CMBP_1 => Some(Schema::Cmbp1),
            CBBO_1S => Some(Schema::Cbbo1S),
            CBBO_1M => Some(Schema::Cbbo1M),
            TCBBO => Some(Schema::Tcbbo),
            BBO_1S => Some(Schema::Bbo1S),
            BBO_1M => Some(Schema::Bbo1M),
            _ => None,
        }
    }

    impl std::str::FromStr for RType {
        type Err = crate::Error;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "mbp-0" => Ok(RType::Mbp0),
                "mbp-1" => Ok(RType::Mbp1),
                "mbp-10" => Ok(RType::Mbp10),
                "status" => Ok(RType::Status),
                "instrument-def" => Ok(RType::InstrumentDef),
                "imbalance" => Ok(RType::Imbalance),
                "error" => Ok(RType::Error),
                "symbol-mapping" => Ok(RType::SymbolMapping),
                "system" => Ok(RType::System),
                "statistics" => Ok(RType::Statistics),
                "ohlcv-1s" => Ok(RType::Ohlcv1S),
                "ohlcv-1m" => Ok(RType::Ohlcv1M),
                "ohlcv-1h" => Ok(RType::Ohlcv1H),
                "ohlcv-1d" => Ok(RType::Ohlcv1D),
                "mbo" => Ok(RType::Mbo),
                "cmbp-1" => Ok(RType::Cmbp1),
                "cbbo-1s" => Ok(RType::Cbbo1S),
                "cbbo-1m" => Ok(RType::Cbbo1M),
                "tcbbo" => Ok(RType::Tcbbo),
                "bbo-1s" => Ok(RType::Bbo1S),
                "bbo-1m" => Ok(RType::Bbo1M),
                _ => Err(crate::Error::invalid_format(format!(
                    "unknown record type '{s}'"
                ))),
            }
        }
    }

    impl RType {
        /// Convert the record type to its `str` representation.
        pub const fn as_str(&self) -> &'static str {
            match self {
                RType::Mbp0 => "mbp-0",
                RType::Mbp1 => "mbp-1",
                RType::Mbp10 => "mbp-10",
                RType::Status => "status",
                RType::InstrumentDef => "instrument-def",
                RType::Imbalance => "imbalance",
                RType::Error => "error",
                RType::SymbolMapping => "symbol-mapping",
                RType::System => "system",
                RType::Statistics => "statistics",
                RType::Ohlcv1S => "ohlcv-1s",
                RType::Ohlcv1M => "ohlcv-1m",
                RType::Ohlcv1H => "ohlcv-1h",
                RType::Ohlcv1D => "ohlcv-1d",
                RType::Mbo => "mbo",
                RType::Cmbp1 => "cmbp-1",
                RType::Cbbo1S => "cbbo-1s",
                RType::Cbbo1M => "cbbo-1m",
                RType::Tcbbo => "tcbbo",
                RType::Bbo1S => "bbo-1s",
                RType::Bbo1M => "bbo-1m",
            }
        }
    }

    impl std::fmt::Display for RType {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.as_str())
        }
    }
}

/// A data record schema. Each schema has a particular record type associated
/// with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Schema {
    /// Market by order.
    Mbo = 0,
    /// Market by price with a book depth of 1.
    Mbp1 = 1,
    /// Market by price with a book depth of 10.
    Mbp10 = 2,
    /// All trade events with the best bid and offer (BBO) immediately **before**
    /// the effect of the trade.
    Tbbo = 3,
    /// All trade events.
    Trades = 4,
    /// Open, high, low, close, and volume at a one-second interval.
    Ohlcv1S = 5,
    /// Open, high, low, close, and volume at a one-minute interval.
    Ohlcv1M = 6,
    /// Open, high, low, close, and volume at an hourly interval.
    Ohlcv1H = 7,
    /// Open, high, low, close, and volume at a daily interval based on the UTC
    /// date.
    Ohlcv1D = 8,
    /// Instrument definitions.
    Definition = 9,
    /// Additional data disseminated by publishers.
    Statistics = 10,
    /// Trading status events.
    Status = 11,
    /// Auction imbalance events.
    Imbalance = 12,
    /// Consolidated best bid and offer.
    Cmbp1 = 14,
    /// Consolidated best bid and offer subsampled at one-second intervals, in
    /// addition to trades.
    Cbbo1S = 15,
    /// Consolidated best bid and offer subsampled at one-minute intervals, in
    /// addition to trades.
    Cbbo1M = 16,
    /// All trade events with the consolidated best bid and offer (CBBO)
    /// immediately **before** the effect of the trade.
    Tcbbo = 17,
    /// Best bid and offer subsampled at one-second intervals, in addition to
    /// trades.
    Bbo1S = 18,
    /// Best bid and offer subsampled at one-minute intervals, in addition to
    /// trades.
    Bbo1M = 19,
}

impl std::str::FromStr for Schema {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mbo" => Ok(Schema::Mbo),
            "mbp-1" => Ok(Schema::Mbp1),
            "mbp-10" => Ok(Schema::Mbp10),
            "tbbo" => Ok(Schema::Tbbo),
            "trades" => Ok(Schema::Trades),
            "ohlcv-1s" => Ok(Schema::Ohlcv1S),
            "ohlcv-1m" => Ok(Schema::Ohlcv1M),
            "ohlcv-1h" => Ok(Schema::Ohlcv1H),
            "ohlcv-1d" => Ok(Schema::Ohlcv1D),
            "definition" => Ok(Schema::Definition),
            "statistics" => Ok(Schema::Statistics),
            "status" => Ok(Schema::Status),
            "imbalance" => Ok(Schema::Imbalance),
            "cmbp-1" => Ok(Schema::Cmbp1),
            "cbbo-1s" => Ok(Schema::Cbbo1S),
            "cbbo-1m" => Ok(Schema::Cbbo1M),
            "tcbbo" => Ok(Schema::Tcbbo),
            "bbo-1s" => Ok(Schema::Bbo1S),
            "bbo-1m" => Ok(Schema::Bbo1M),
            _ => Err(crate::Error::invalid_format(format!("unknown schema '{s}'"))),
        }
    }
}

impl AsRef<str> for Schema {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Schema {
    /// Converts the given schema to a `&'static str`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Schema::Mbo => "mbo",
            Schema::Mbp1 => "mbp-1",
            Schema::Mbp10 => "mbp-10",
            Schema::Tbbo => "tbbo",
            Schema::Trades => "trades",
            Schema::Ohlcv1S => "ohlcv-1s",
            Schema::Ohlcv1M => "ohlcv-1m",
            Schema::Ohlcv1H => "ohlcv-1h",
            Schema::Ohlcv1D => "ohlcv-1d",
            Schema::Definition => "definition",
            Schema::Statistics => "statistics",
            Schema::Status => "status",
            Schema::Imbalance => "imbalance",
            Schema::Cmbp1 => "cmbp-1",
            Schema::Cbbo1S => "cbbo-1s",
            Schema::Cbbo1M => "cbbo-1m",
            Schema::Tcbbo => "tcbbo",
            Schema::Bbo1S => "bbo-1s",
            Schema::Bbo1M => "bbo-1m",
        }
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compression format or none if uncompressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Compression {
    /// Uncompressed.
    #[default]
    None = 0,
    /// Zstandard compressed.
    Zstd = 1,
}

impl std::str::FromStr for Compression {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Compression::None),
            "zstd" => Ok(Compression::Zstd),
            _ => Err(crate::Error::invalid_format(format!(
                "unknown compression '{s}'"
            ))),
        }
    }
}

impl AsRef<str> for Compression {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Compression {
    /// Converts the given compression to a `&'static str`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Zstd => "zstd",
        }
    }
}

impl Display for Compression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::mbo(Schema::Mbo, "mbo")]
    #[case::tbbo(Schema::Tbbo, "tbbo")]
    #[case::ohlcv(Schema::Ohlcv1D, "ohlcv-1d")]
    #[case::cmbp1(Schema::Cmbp1, "cmbp-1")]
    #[case::bbo(Schema::Bbo1M, "bbo-1m")]
    fn test_schema_str_round_trip(#[case] schema: Schema, #[case] s: &str) {
        assert_eq!(schema.as_str(), s);
        assert_eq!(Schema::from_str(s).unwrap(), schema);
    }

    #[rstest]
    #[case::trade(rtype::MBP_0, Some(Schema::Trades))]
    #[case::mbo(rtype::MBO, Some(Schema::Mbo))]
    #[case::tcbbo(rtype::TCBBO, Some(Schema::Tcbbo))]
    #[case::unknown(0x24, None)]
    fn test_rtype_to_schema(#[case] rtype: u8, #[case] exp: Option<Schema>) {
        assert_eq!(rtype::try_into_schema(rtype), exp);
    }

    #[test]
    fn test_rtype_tags_match_catalog() {
        assert_eq!(rtype::MBP_0, 0x00);
        assert_eq!(rtype::MBP_1, 0x01);
        assert_eq!(rtype::MBP_10, 0x0A);
        assert_eq!(rtype::STATUS, 0x12);
        assert_eq!(rtype::INSTRUMENT_DEF, 0x13);
        assert_eq!(rtype::IMBALANCE, 0x14);
        assert_eq!(rtype::ERROR, 0x15);
        assert_eq!(rtype::SYMBOL_MAPPING, 0x16);
        assert_eq!(rtype::SYSTEM, 0x17);
        assert_eq!(rtype::STATISTICS, 0x18);
        assert_eq!(rtype::OHLCV_1S, 0x20);
        assert_eq!(rtype::OHLCV_1D, 0x23);
        assert_eq!(rtype::MBO, 0xA0);
        assert_eq!(rtype::CMBP_1, 0xB1);
        assert_eq!(rtype::CBBO_1S, 0xC0);
        assert_eq!(rtype::BBO_1M, 0xC4);
    }

    #[test]
    fn test_side_and_action_codes_are_ascii() {
        assert_eq!(u8::from(Side::Ask), b'A');
        assert_eq!(u8::from(Side::Bid), b'B');
        assert_eq!(u8::from(Side::None), b'N');
        assert_eq!(u8::from(Action::Trade), b'T');
        assert_eq!(u8::from(Action::Clear), b'R');
        assert_eq!(char::from(Action::Add), 'A');
    }
}
