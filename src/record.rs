//! Market data record types for the different DBN [`Schema`](crate::enums::Schema)s
//! and conversion functions.
//!
//! Every record starts with a [`RecordHeader`] carrying its on-wire size and
//! [`rtype`](crate::enums::rtype) tag. The structs here describe the decoded,
//! in-memory view; the wire layouts are produced and consumed field-by-field by
//! the codecs in [`decode`](crate::decode) and [`encode`](crate::encode), never
//! by reinterpreting struct memory.

pub(crate) mod impl_default;
mod methods;
pub(crate) mod serialize;

use std::os::raw::c_char;

use crate::{
    enums::RType,
    error::{Error, Result},
    flags::FlagSet,
    SYMBOL_CSTR_LEN, UNDEF_TIMESTAMP,
};

/// The length of the `asset` field in version 3 instrument definitions.
pub const ASSET_CSTR_LEN: usize = 11;
/// The length of the fixed text slot in [`ErrorMsg`] records.
pub(crate) const ERR_CSTR_LEN: usize = 302;
/// The length of the fixed text slot in [`SystemMsg`] records.
pub(crate) const SYSTEM_MSG_CSTR_LEN: usize = 303;

/// Common data for all records. Always found at the beginning of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordHeader {
    /// The length of the record in 32-bit words.
    pub(crate) length: u8,
    /// The record type. The set of possible values is defined in
    /// [`rtype`](crate::enums::rtype).
    pub rtype: u8,
    /// The publisher ID assigned by Databento, which denotes the dataset and
    /// venue.
    pub publisher_id: u16,
    /// The numeric ID assigned to the instrument.
    pub instrument_id: u32,
    /// The matching-engine-received timestamp expressed as the number of
    /// nanoseconds since the UNIX epoch.
    pub ts_event: i64,
}

impl RecordHeader {
    /// Number of bytes in a single unit of [`Self::length`].
    pub const LENGTH_MULTIPLIER: usize = 4;
    /// The encoded size of the header itself.
    pub(crate) const LEN: usize = 16;

    /// Creates a new `RecordHeader` for a record of type `T`. `rtype` must be one
    /// of the tags associated with `T`.
    pub fn new<T: HasRType>(
        rtype: u8,
        publisher_id: u16,
        instrument_id: u32,
        ts_event: i64,
    ) -> Self {
        debug_assert!(T::has_rtype(rtype));
        Self {
            length: (T::ENCODED_LEN / Self::LENGTH_MULTIPLIER) as u8,
            rtype,
            publisher_id,
            instrument_id,
            ts_event,
        }
    }

    /// Creates a new `RecordHeader` for a record of type `T` with all other
    /// fields set to their sentinel values.
    pub fn default<T: HasRType>(rtype: u8) -> Self {
        Self::new::<T>(rtype, 0, 0, UNDEF_TIMESTAMP)
    }

    /// Returns the size of the record in bytes as declared on the wire.
    pub const fn record_size(&self) -> usize {
        self.length as usize * Self::LENGTH_MULTIPLIER
    }

    /// Tries to convert the raw record type into an enum for exhaustive pattern
    /// matching.
    ///
    /// # Errors
    /// This function returns an error if the `rtype` field does not contain a
    /// valid, known [`RType`].
    pub fn rtype(&self) -> Result<RType> {
        RType::try_from(self.rtype).map_err(|_| Error::UnknownRecordType(self.rtype))
    }

    /// Parses the raw matching-engine-received timestamp into a datetime. Returns
    /// `None` if `ts_event` contains the sentinel for a null timestamp.
    pub fn ts_event(&self) -> Option<time::OffsetDateTime> {
        ts_to_dt(self.ts_event)
    }
}

/// A price level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BidAskPair {
    /// The bid price.
    pub bid_px: i64,
    /// The ask price.
    pub ask_px: i64,
    /// The bid size.
    pub bid_sz: u32,
    /// The ask size.
    pub ask_sz: u32,
    /// The bid order count.
    pub bid_ct: u32,
    /// The ask order count.
    pub ask_ct: u32,
}

/// A price level consolidated from multiple venues. Shares the wire shape of
/// [`BidAskPair`] with the two order counts reinterpreted as publisher IDs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConsolidatedBidAskPair {
    /// The bid price.
    pub bid_px: i64,
    /// The ask price.
    pub ask_px: i64,
    /// The bid size.
    pub bid_sz: u32,
    /// The ask size.
    pub ask_sz: u32,
    /// The publisher ID of the best bid.
    pub bid_pb: u32,
    /// The publisher ID of the best ask.
    pub ask_pb: u32,
}

/// A market-by-order (MBO) tick message. The record of the
/// [`Mbo`](crate::enums::Schema::Mbo) schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MboMsg {
    /// The common header.
    pub hd: RecordHeader,
    /// The order ID assigned at the venue.
    pub order_id: u64,
    /// The order price expressed as a signed integer where every 1 unit
    /// corresponds to 1e-9, i.e. 1/1,000,000,000 or 0.000000001.
    pub price: i64,
    /// The order quantity.
    pub size: u32,
    /// A combination of packet end with matching engine status. See
    /// [`flags`](crate::flags) for possible values.
    pub flags: FlagSet,
    /// A channel ID within the venue.
    pub channel_id: u8,
    /// The event action. Can be **A**dd, **C**ancel, **M**odify, clea**R**,
    /// **T**rade, or **F**ill.
    pub action: c_char,
    /// The order side. Can be **A**sk, **B**id or **N**one.
    pub side: c_char,
    /// The capture-server-received timestamp expressed as the number of
    /// nanoseconds since the UNIX epoch.
    pub ts_recv: i64,
    /// The delta of `ts_recv - ts_exchange_send`, max 2 seconds.
    pub ts_in_delta: i32,
    /// The message sequence number assigned at the venue.
    pub sequence: u32,
}

/// Market by price implementation with a book depth of 0. Equivalent to MBP-0.
/// The record of the [`Trades`](crate::enums::Schema::Trades) schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TradeMsg {
    /// The common header.
    pub hd: RecordHeader,
    /// The trade price expressed as a signed integer where every 1 unit
    /// corresponds to 1e-9, i.e. 1/1,000,000,000 or 0.000000001.
    pub price: i64,
    /// The trade quantity.
    pub size: u32,
    /// The event action. Always **T**rade in the trades schema.
    pub action: c_char,
    /// The aggressing order's side in the trade. Can be **A**sk, **B**id or
    /// **N**one.
    pub side: c_char,
    /// A combination of packet end with matching engine status. See
    /// [`flags`](crate::flags) for possible values.
    pub flags: FlagSet,
    /// The depth of actual book change.
    pub depth: u8,
    /// The capture-server-received timestamp expressed as the number of
    /// nanoseconds since the UNIX epoch.
    pub ts_recv: i64,
    /// The delta of `ts_recv - ts_exchange_send`, max 2 seconds.
    pub ts_in_delta: i32,
    /// The message sequence number assigned at the venue.
    pub sequence: u32,
}

/// Market by price implementation with a known book depth of 1. The record of the
/// [`Mbp1`](crate::enums::Schema::Mbp1), [`Tbbo`](crate::enums::Schema::Tbbo),
/// and subsampled BBO schemas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mbp1Msg {
    /// The common header.
    pub hd: RecordHeader,
    /// The order price expressed as a signed integer where every 1 unit
    /// corresponds to 1e-9, i.e. 1/1,000,000,000 or 0.000000001.
    pub price: i64,
    /// The order quantity.
    pub size: u32,
    /// The event action. Can be **A**dd, **C**ancel, **M**odify, clea**R**, or
    /// **T**rade.
    pub action: c_char,
    /// The order side. Can be **A**sk, **B**id or **N**one.
    pub side: c_char,
    /// A combination of packet end with matching engine status. See
    /// [`flags`](crate::flags) for possible values.
    pub flags: FlagSet,
    /// The depth of actual book change.
    pub depth: u8,
    /// The capture-server-received timestamp expressed as the number of
    /// nanoseconds since the UNIX epoch.
    pub ts_recv: i64,
    /// The delta of `ts_recv - ts_exchange_send`, max 2 seconds.
    pub ts_in_delta: i32,
    /// The message sequence number assigned at the venue.
    pub sequence: u32,
    /// The top of the order book.
    pub levels: [BidAskPair; 1],
}

/// Market by price implementation with a known book depth of 10. The record of
/// the [`Mbp10`](crate::enums::Schema::Mbp10) schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mbp10Msg {
    /// The common header.
    pub hd: RecordHeader,
    /// The order price expressed as a signed integer where every 1 unit
    /// corresponds to 1e-9, i.e. 1/1,000,000,000 or 0.000000001.
    pub price: i64,
    /// The order quantity.
    pub size: u32,
    /// The event action. Can be **A**dd, **C**ancel, **M**odify, clea**R**, or
    /// **T**rade.
    pub action: c_char,
    /// The order side. Can be **A**sk, **B**id or **N**one.
    pub side: c_char,
    /// A combination of packet end with matching engine status. See
    /// [`flags`](crate::flags) for possible values.
    pub flags: FlagSet,
    /// The depth of actual book change.
    pub depth: u8,
    /// The capture-server-received timestamp expressed as the number of
    /// nanoseconds since the UNIX epoch.
    pub ts_recv: i64,
    /// The delta of `ts_recv - ts_exchange_send`, max 2 seconds.
    pub ts_in_delta: i32,
    /// The message sequence number assigned at the venue.
    pub sequence: u32,
    /// The top 10 levels of the order book.
    pub levels: [BidAskPair; 10],
}

/// The record of the [`Tbbo`](crate::enums::Schema::Tbbo) schema.
pub type TbboMsg = Mbp1Msg;
/// A best bid and offer record subsampled at a fixed interval. Same wire shape
/// as [`Mbp1Msg`].
pub type BboMsg = Mbp1Msg;
/// The record of the [`Bbo1S`](crate::enums::Schema::Bbo1S) schema.
pub type Bbo1SMsg = BboMsg;
/// The record of the [`Bbo1M`](crate::enums::Schema::Bbo1M) schema.
pub type Bbo1MMsg = BboMsg;

/// A consolidated best bid and offer message. The record of the
/// [`Cmbp1`](crate::enums::Schema::Cmbp1) and consolidated subsampled schemas.
/// Shares the wire shape of [`Mbp1Msg`], with the level's order counts
/// reinterpreted as publisher IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cmbp1Msg {
    /// The common header.
    pub hd: RecordHeader,
    /// The order price expressed as a signed integer where every 1 unit
    /// corresponds to 1e-9, i.e. 1/1,000,000,000 or 0.000000001.
    pub price: i64,
    /// The order quantity.
    pub size: u32,
    /// The event action. Can be **A**dd, **C**ancel, **M**odify, clea**R**, or
    /// **T**rade.
    pub action: c_char,
    /// The order side. Can be **A**sk, **B**id or **N**one.
    pub side: c_char,
    /// A combination of packet end with matching engine status. See
    /// [`flags`](crate::flags) for possible values.
    pub flags: FlagSet,
    /// The depth of actual book change.
    pub depth: u8,
    /// The capture-server-received timestamp expressed as the number of
    /// nanoseconds since the UNIX epoch.
    pub ts_recv: i64,
    /// The delta of `ts_recv - ts_exchange_send`, max 2 seconds.
    pub ts_in_delta: i32,
    /// The message sequence number assigned at the venue.
    pub sequence: u32,
    /// The consolidated top of book.
    pub levels: [ConsolidatedBidAskPair; 1],
}

/// A consolidated best bid and offer record subsampled at a fixed interval. Same
/// wire shape as [`Cmbp1Msg`].
pub type CbboMsg = Cmbp1Msg;
/// The record of the [`Cbbo1S`](crate::enums::Schema::Cbbo1S) schema.
pub type Cbbo1SMsg = CbboMsg;
/// The record of the [`Cbbo1M`](crate::enums::Schema::Cbbo1M) schema.
pub type Cbbo1MMsg = CbboMsg;
/// The record of the [`Tcbbo`](crate::enums::Schema::Tcbbo) schema.
pub type TcbboMsg = Cmbp1Msg;

/// Open, high, low, close, and volume. The record of the OHLCV schemas at every
/// cadence; the cadence is carried by the header's rtype.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OhlcvMsg {
    /// The common header.
    pub hd: RecordHeader,
    /// The open price for the bar.
    pub open: i64,
    /// The high price for the bar.
    pub high: i64,
    /// The low price for the bar.
    pub low: i64,
    /// The close price for the bar.
    pub close: i64,
    /// The total volume traded during the aggregation period.
    pub volume: u64,
}

/// A trading status update message. The record of the
/// [`Status`](crate::enums::Schema::Status) schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusMsg {
    /// The common header.
    pub hd: RecordHeader,
    /// The capture-server-received timestamp expressed as the number of
    /// nanoseconds since the UNIX epoch.
    pub ts_recv: i64,
    /// The type of status change.
    pub action: u16,
    /// Additional details about the cause of the status change.
    pub reason: u16,
    /// Further information about the status change and its effect on trading.
    pub trading_event: u16,
    /// Indicates whether one can trade: **Y**es, **N**o, or **~** (not
    /// applicable).
    pub is_trading: c_char,
    /// Indicates whether one can post quotes: **Y**es, **N**o, or **~** (not
    /// applicable).
    pub is_quoting: c_char,
    /// Indicates whether short selling is restricted: **Y**es, **N**o, or **~**
    /// (not applicable).
    pub is_short_sell_restricted: c_char,
    // Filler for alignment.
    #[doc(hidden)]
    pub _reserved: [u8; 7],
}

/// Definition of an instrument in DBN version 3. The record of the
/// [`Definition`](crate::enums::Schema::Definition) schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstrumentDefMsg {
    /// The common header.
    pub hd: RecordHeader,
    /// The capture-server-received timestamp expressed as the number of
    /// nanoseconds since the UNIX epoch.
    pub ts_recv: i64,
    /// The minimum constant tick for the instrument in units of 1e-9, i.e.
    /// 1/1,000,000,000 or 0.000000001.
    pub min_price_increment: i64,
    /// The multiplier to convert the venue's display price to the conventional
    /// price, in units of 1e-9.
    pub display_factor: i64,
    /// The last eligible trade time expressed as a number of nanoseconds since
    /// the UNIX epoch. Will be [`UNDEF_TIMESTAMP`](crate::UNDEF_TIMESTAMP) when
    /// null, such as for equities.
    pub expiration: i64,
    /// The time of instrument activation expressed as a number of nanoseconds
    /// since the UNIX epoch. Will be
    /// [`UNDEF_TIMESTAMP`](crate::UNDEF_TIMESTAMP) when null, such as for
    /// equities.
    pub activation: i64,
    /// The allowable high limit price for the trading day in units of 1e-9.
    pub high_limit_price: i64,
    /// The allowable low limit price for the trading day in units of 1e-9.
    pub low_limit_price: i64,
    /// The differential value for price banding in units of 1e-9.
    pub max_price_variation: i64,
    /// The contract size for each instrument, in combination with
    /// `unit_of_measure`, in units of 1e-9.
    pub unit_of_measure_qty: i64,
    /// The value currently under development by the venue, in units of 1e-9.
    pub min_price_increment_amount: i64,
    /// The value used for price calculation in spread and leg pricing in units
    /// of 1e-9.
    pub price_ratio: i64,
    /// The strike price of the option, in units of 1e-9.
    pub strike_price: i64,
    /// The instrument ID assigned by the publisher. May be the same as
    /// `instrument_id`.
    pub raw_instrument_id: u64,
    /// The tied price (if any) of the leg, in units of 1e-9.
    pub leg_price: i64,
    /// The associated delta (if any) of the leg, in units of 1e-9.
    pub leg_delta: i64,
    /// A bitmap of instrument eligibility attributes.
    pub inst_attrib_value: i32,
    /// The `instrument_id` of the first underlying instrument.
    pub underlying_id: u32,
    /// The implied book depth on the price level data feed.
    pub market_depth_implied: i32,
    /// The (outright) book depth on the price level data feed.
    pub market_depth: i32,
    /// The market segment of the instrument.
    pub market_segment_id: u32,
    /// The maximum trading volume for the instrument.
    pub max_trade_vol: u32,
    /// The minimum order entry quantity for the instrument.
    pub min_lot_size: i32,
    /// The minimum quantity required for a block trade of the instrument.
    pub min_lot_size_block: i32,
    /// The minimum quantity required for a round lot of the instrument.
    /// Multiples of this quantity are also round lots.
    pub min_lot_size_round_lot: i32,
    /// The minimum trading volume for the instrument.
    pub min_trade_vol: u32,
    /// The number of deliverables per instrument, i.e. peak days.
    pub contract_multiplier: i32,
    /// The quantity that a contract will decay daily, after `decay_start_date`
    /// has been reached.
    pub decay_quantity: i32,
    /// The fixed contract value assigned to each instrument.
    pub original_contract_size: i32,
    /// The numeric ID assigned to the leg instrument.
    pub leg_instrument_id: u32,
    /// The numerator of the price ratio of the leg within the spread.
    pub leg_ratio_price_numerator: i32,
    /// The denominator of the price ratio of the leg within the spread.
    pub leg_ratio_price_denominator: i32,
    /// The numerator of the quantity ratio of the leg within the spread.
    pub leg_ratio_qty_numerator: i32,
    /// The denominator of the quantity ratio of the leg within the spread.
    pub leg_ratio_qty_denominator: i32,
    /// The numeric ID of the leg instrument's underlying instrument.
    pub leg_underlying_id: u32,
    /// The channel ID assigned at the venue.
    pub appl_id: i16,
    /// The calendar year reflected in the instrument symbol.
    pub maturity_year: u16,
    /// The date at which a contract will begin to decay.
    pub decay_start_date: u16,
    /// The channel ID assigned by Databento as an incrementing integer starting
    /// at zero.
    pub channel_id: u16,
    /// The number of legs in the strategy or spread. Will be 0 for outrights.
    pub leg_count: u16,
    /// The 0-based index of the leg.
    pub leg_index: u16,
    /// The currency used for price fields.
    pub currency: [c_char; 4],
    /// The currency used for settlement, if different from `currency`.
    pub settl_currency: [c_char; 4],
    /// The strategy type of the spread.
    pub secsubtype: [c_char; 6],
    /// The instrument raw symbol assigned by the publisher.
    pub raw_symbol: [c_char; SYMBOL_CSTR_LEN],
    /// The security group code of the instrument.
    pub group: [c_char; 21],
    /// The exchange used to identify the instrument.
    pub exchange: [c_char; 5],
    /// The underlying asset code (product code) of the instrument.
    pub asset: [c_char; ASSET_CSTR_LEN],
    /// The ISO standard instrument categorization code.
    pub cfi: [c_char; 7],
    /// The type of the instrument, e.g. FUT for future or future spread.
    pub security_type: [c_char; 7],
    /// The unit of measure for the instrument's original contract size, e.g. USD
    /// or LBS.
    pub unit_of_measure: [c_char; 31],
    /// The symbol of the first underlying instrument.
    pub underlying: [c_char; 21],
    /// The currency of [`strike_price`](Self::strike_price).
    pub strike_price_currency: [c_char; 4],
    /// The leg instrument's raw symbol assigned by the publisher.
    pub leg_raw_symbol: [c_char; SYMBOL_CSTR_LEN],
    /// The classification of the instrument.
    pub instrument_class: c_char,
    /// The matching algorithm used for the instrument, typically **F**IFO.
    pub match_algorithm: c_char,
    /// The price denominator of the main fraction.
    pub main_fraction: u8,
    /// The number of digits to the right of the tick mark, to display fractional
    /// prices.
    pub price_display_format: u8,
    /// The price denominator of the sub fraction.
    pub sub_fraction: u8,
    /// The product complex of the instrument.
    pub underlying_product: u8,
    /// Indicates if the instrument definition has been **A**dded, **M**odified,
    /// or **D**eleted.
    pub security_update_action: c_char,
    /// The calendar month reflected in the instrument symbol.
    pub maturity_month: u8,
    /// The calendar day reflected in the instrument symbol, or 0.
    pub maturity_day: u8,
    /// The calendar week reflected in the instrument symbol, or 0.
    pub maturity_week: u8,
    /// Indicates if the instrument is user defined: **Y**es or **N**o.
    pub user_defined_instrument: c_char,
    /// The type of `contract_multiplier`. Either `1` for hours, or `2` for days.
    pub contract_multiplier_unit: i8,
    /// The schedule for delivering electricity.
    pub flow_schedule_type: i8,
    /// The tick rule of the spread.
    pub tick_rule: u8,
    /// The classification of the leg instrument.
    pub leg_instrument_class: c_char,
    /// The side taken for the leg when purchasing the spread.
    pub leg_side: c_char,
    // Filler for alignment.
    #[doc(hidden)]
    pub _reserved: [u8; 17],
}

/// An auction imbalance message. The record of the
/// [`Imbalance`](crate::enums::Schema::Imbalance) schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImbalanceMsg {
    /// The common header.
    pub hd: RecordHeader,
    /// The capture-server-received timestamp expressed as the number of
    /// nanoseconds since the UNIX epoch.
    pub ts_recv: i64,
    /// The price at which the imbalance shares are calculated, in units of 1e-9.
    pub ref_price: i64,
    /// Reserved for future use.
    pub auction_time: i64,
    /// The hypothetical auction-clearing price for both cross and continuous
    /// orders, in units of 1e-9.
    pub cont_book_clr_price: i64,
    /// The hypothetical auction-clearing price for cross orders only, in units
    /// of 1e-9.
    pub auct_interest_clr_price: i64,
    /// Reserved for future use.
    pub ssr_filling_price: i64,
    /// Reserved for future use.
    pub ind_match_price: i64,
    /// Reserved for future use.
    pub upper_collar: i64,
    /// Reserved for future use.
    pub lower_collar: i64,
    /// The quantity of shares that are eligible to be matched at `ref_price`.
    pub paired_qty: u32,
    /// The quantity of shares that are not paired at `ref_price`.
    pub total_imbalance_qty: u32,
    /// Reserved for future use.
    pub market_imbalance_qty: u32,
    /// Reserved for future use.
    pub unpaired_qty: u32,
    /// Venue-specific character code indicating the auction type.
    pub auction_type: c_char,
    /// The market side of the `total_imbalance_qty`. Can be **A**sk, **B**id, or
    /// **N**one.
    pub side: c_char,
    /// Reserved for future use.
    pub auction_status: u8,
    /// Reserved for future use.
    pub freeze_status: u8,
    /// Reserved for future use.
    pub num_extensions: u8,
    /// Reserved for future use.
    pub unpaired_side: c_char,
    /// Venue-specific character code. For Nasdaq, contains the raw Price
    /// Variation Indicator.
    pub significant_imbalance: c_char,
    // Filler for alignment.
    #[doc(hidden)]
    pub _reserved: [u8; 1],
}

/// A statistics message in DBN version 3. A catchall for various data
/// disseminated by publishers. The [`stat_type`](Self::stat_type) indicates the
/// statistic contained in the message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatMsg {
    /// The common header.
    pub hd: RecordHeader,
    /// The capture-server-received timestamp expressed as the number of
    /// nanoseconds since the UNIX epoch.
    pub ts_recv: i64,
    /// The reference timestamp of the statistic value expressed as the number of
    /// nanoseconds since the UNIX epoch. Will be
    /// [`UNDEF_TIMESTAMP`](crate::UNDEF_TIMESTAMP) when unused.
    pub ts_ref: i64,
    /// The value for price statistics, in units of 1e-9. Will be
    /// [`UNDEF_PRICE`](crate::UNDEF_PRICE) when unused.
    pub price: i64,
    /// The value for non-price statistics. Will be
    /// [`UNDEF_STAT_QUANTITY`](crate::UNDEF_STAT_QUANTITY) when unused.
    pub quantity: i64,
    /// The message sequence number assigned at the venue.
    pub sequence: u32,
    /// The delta of `ts_recv - ts_exchange_send`, max 2 seconds.
    pub ts_in_delta: i32,
    /// The type of statistic value contained in the message.
    pub stat_type: u16,
    /// A channel ID within the venue.
    pub channel_id: u16,
    /// Indicates if the statistic is newly added (1) or deleted (2). (Deleted is
    /// only used with some stat types.)
    pub update_action: u8,
    /// Additional flags associated with certain stat types.
    pub stat_flags: u8,
    // Filler for alignment.
    #[doc(hidden)]
    pub _reserved: [u8; 18],
}

/// An error message from the gateway. The message text is decoded into owned
/// storage; on the wire it occupies a fixed NUL-padded slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorMsg {
    /// The common header.
    pub hd: RecordHeader,
    /// The error message.
    pub err: String,
    /// The error code.
    pub code: u8,
    /// Sometimes multiple errors are sent together. This field will be non-zero
    /// for the last error.
    pub is_last: u8,
}

/// A symbol mapping message which maps a symbol of one
/// [`SType`](crate::enums::SType) to another. The symbols are decoded into owned
/// storage; on the wire each occupies a fixed NUL-padded slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolMappingMsg {
    /// The common header.
    pub hd: RecordHeader,
    /// The input symbology type of `stype_in_symbol`.
    pub stype_in: u8,
    /// The input symbol.
    pub stype_in_symbol: String,
    /// The output symbology type of `stype_out_symbol`.
    pub stype_out: u8,
    /// The output symbol.
    pub stype_out_symbol: String,
    /// The start of the mapping interval expressed as the number of nanoseconds
    /// since the UNIX epoch.
    pub start_ts: i64,
    /// The end of the mapping interval expressed as the number of nanoseconds
    /// since the UNIX epoch.
    pub end_ts: i64,
}

/// A non-error message from the gateway. Also used for heartbeating. The message
/// text is decoded into owned storage; on the wire it occupies a fixed
/// NUL-padded slot followed by the code byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemMsg {
    /// The common header.
    pub hd: RecordHeader,
    /// The message from the gateway.
    pub msg: String,
    /// The type of system message.
    pub code: u8,
}

/// Used for polymorphism around types all beginning with a [`RecordHeader`]
/// where `rtype` is the discriminant used for indicating the type of record.
pub trait Record {
    /// Returns a reference to the `RecordHeader` that comes at the beginning of
    /// all record types.
    fn header(&self) -> &RecordHeader;

    /// Returns the size of the record in bytes as declared on the wire.
    fn record_size(&self) -> usize {
        self.header().record_size()
    }

    /// Tries to convert the raw record type into an enum which is useful for
    /// exhaustive pattern matching.
    ///
    /// # Errors
    /// This function returns an error if the `rtype` field does not contain a
    /// valid, known [`RType`].
    fn rtype(&self) -> Result<RType> {
        self.header().rtype()
    }

    /// Returns the raw primary timestamp for the record.
    ///
    /// This timestamp should be used for sorting records as well as indexing
    /// into any symbology data structure.
    fn raw_index_ts(&self) -> i64 {
        self.header().ts_event
    }

    /// Returns the primary timestamp for the record. Returns `None` if the
    /// primary timestamp contains the sentinel value for a null timestamp.
    fn index_ts(&self) -> Option<time::OffsetDateTime> {
        ts_to_dt(self.raw_index_ts())
    }

    /// Returns the primary date for the record: the date component of the
    /// primary timestamp. Returns `None` if the primary timestamp contains the
    /// sentinel value for a null timestamp.
    fn index_date(&self) -> Option<time::Date> {
        self.index_ts().map(|dt| dt.date())
    }
}

/// Used for polymorphism around mutable types beginning with a [`RecordHeader`].
pub trait RecordMut {
    /// Returns a mutable reference to the `RecordHeader` that comes at the
    /// beginning of all record types.
    fn header_mut(&mut self) -> &mut RecordHeader;
}

/// An extension of the [`Record`] trait for types with a static set of valid
/// [`RType`]s and a canonical encoded size.
pub trait HasRType: Record + RecordMut {
    /// The canonical encoded size of the record in bytes, excluding any trailing
    /// `ts_out`. For variable-length text records this is the size produced by
    /// the encoder.
    const ENCODED_LEN: usize;

    /// Returns `true` if `rtype` matches one of the values associated with the
    /// implementing type.
    fn has_rtype(rtype: u8) -> bool;
}

/// Tries to convert a str slice to a fixed-length null-terminated C char array.
///
/// # Errors
/// This function returns an error if `s` contains more than `N - 1` characters.
/// The last character is reserved for the null byte.
pub fn str_to_c_chars<const N: usize>(s: &str) -> Result<[c_char; N]> {
    if s.len() > (N - 1) {
        return Err(Error::encode_overflow(s, N));
    }
    let mut res = [0; N];
    for (i, byte) in s.as_bytes().iter().enumerate() {
        res[i] = *byte as c_char;
    }
    Ok(res)
}

/// Tries to convert a slice of `c_char`s to a UTF-8 `str`, stopping at the first
/// null byte.
///
/// # Errors
/// This function returns an error if `chars` contains invalid UTF-8.
pub fn c_chars_to_str<const N: usize>(chars: &[c_char; N]) -> Result<&str> {
    let bytes: &[u8] = unsafe { std::slice::from_raw_parts(chars.as_ptr().cast(), N) };
    let nul = bytes.iter().position(|b| *b == 0).unwrap_or(N);
    std::str::from_utf8(&bytes[..nul]).map_err(|e| {
        Error::invalid_format(format!("invalid UTF-8 in c_char array: {e}"))
    })
}

/// Parses a raw nanosecond-precision UNIX timestamp to an `OffsetDateTime`.
/// Returns `None` if `ts` contains the sentinel for a null timestamp. Negative
/// (pre-epoch) timestamps are valid.
pub fn ts_to_dt(ts: i64) -> Option<time::OffsetDateTime> {
    if ts == UNDEF_TIMESTAMP {
        None
    } else {
        // Every i64 is within the range `OffsetDateTime` supports
        Some(time::OffsetDateTime::from_unix_timestamp_nanos(ts as i128).unwrap())
    }
}

/// Converts a datetime to a raw nanosecond-precision UNIX timestamp. The exact
/// inverse of [`ts_to_dt`] at nanosecond granularity.
pub fn dt_to_ts(dt: time::OffsetDateTime) -> i64 {
    dt.unix_timestamp_nanos() as i64
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use time::macros::datetime;

    use super::*;
    use crate::rtype;

    #[rstest]
    #[case::mbo(MboMsg::ENCODED_LEN, 56)]
    #[case::trade(TradeMsg::ENCODED_LEN, 48)]
    #[case::mbp1(Mbp1Msg::ENCODED_LEN, 80)]
    #[case::mbp10(Mbp10Msg::ENCODED_LEN, 368)]
    #[case::cmbp1(Cmbp1Msg::ENCODED_LEN, 80)]
    #[case::ohlcv(OhlcvMsg::ENCODED_LEN, 56)]
    #[case::status(StatusMsg::ENCODED_LEN, 40)]
    #[case::definition(InstrumentDefMsg::ENCODED_LEN, 520)]
    #[case::imbalance(ImbalanceMsg::ENCODED_LEN, 112)]
    #[case::stat(StatMsg::ENCODED_LEN, 80)]
    #[case::error(ErrorMsg::ENCODED_LEN, 320)]
    #[case::symbol_mapping(SymbolMappingMsg::ENCODED_LEN, 176)]
    #[case::system(SystemMsg::ENCODED_LEN, 320)]
    fn test_encoded_sizes(#[case] len: usize, #[case] exp: usize) {
        assert_eq!(len, exp);
        assert_eq!(len % RecordHeader::LENGTH_MULTIPLIER, 0);
        assert!(len <= crate::MAX_RECORD_LEN);
    }

    #[test]
    fn test_header_length_in_four_byte_units() {
        let hd = RecordHeader::new::<TradeMsg>(rtype::MBP_0, 1, 5482, 1609160400098821953);
        assert_eq!(hd.length, 12);
        assert_eq!(hd.record_size(), 48);
    }

    #[test]
    fn test_str_to_c_chars_overflow() {
        let res = str_to_c_chars::<4>("EURUSD");
        assert!(matches!(res, Err(Error::EncodeOverflow { max: 3, .. })));
    }

    #[test]
    fn test_c_chars_round_trip() {
        let chars = str_to_c_chars::<7>("ESH4").unwrap();
        assert_eq!(c_chars_to_str(&chars).unwrap(), "ESH4");
    }

    #[rstest]
    #[case::epoch(0, Some(datetime!(1970-01-01 00:00 UTC)))]
    #[case::pre_epoch(-1_000_000_000, Some(datetime!(1969-12-31 23:59:59 UTC)))]
    #[case::undef(UNDEF_TIMESTAMP, None)]
    fn test_ts_to_dt(#[case] ts: i64, #[case] exp: Option<time::OffsetDateTime>) {
        assert_eq!(ts_to_dt(ts), exp);
    }

    #[test]
    fn test_dt_round_trip_nanos() {
        let ts = 1609160400098821953;
        assert_eq!(dt_to_ts(ts_to_dt(ts).unwrap()), ts);
        let neg = -123_456_789;
        assert_eq!(dt_to_ts(ts_to_dt(neg).unwrap()), neg);
    }

    #[test]
    fn test_record_trait_index_ts() {
        let rec = MboMsg {
            ts_recv: 1,
            ..Default::default()
        };
        assert_eq!(rec.raw_index_ts(), UNDEF_TIMESTAMP);
        assert!(rec.index_ts().is_none());
    }
}
