//! Record types whose layout changed in DBN version 3, as they appear in
//! version 2 streams. The decoder produces these when reading a version 2 file;
//! they are never widened into the version 3 shapes silently. Use the `From`
//! impls to convert when a caller wants the current layouts.

use std::os::raw::c_char;

use crate::{
    error::Result,
    record::{c_chars_to_str, RecordHeader},
    rtype, UNDEF_PRICE, UNDEF_TIMESTAMP,
};

/// The length of fixed-width symbol strings in version 2, the same as in
/// version 3.
pub const SYMBOL_CSTR_LEN: usize = crate::SYMBOL_CSTR_LEN;
/// The length of the `asset` field in version 2 instrument definitions.
pub const ASSET_CSTR_LEN: usize = 7;
/// The sentinel value for an unset or null stat quantity in version 2, where
/// the field is 32 bits wide.
pub const UNDEF_STAT_QUANTITY: i32 = i32::MAX;

/// Definition of an instrument in DBN version 2. The record of the
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
    /// price.
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
    /// The trading session settlement price on `trading_reference_date`.
    pub trading_reference_price: i64,
    /// The contract size for each instrument, in combination with
    /// `unit_of_measure`.
    pub unit_of_measure_qty: i64,
    /// The value currently under development by the venue, in units of 1e-9.
    pub min_price_increment_amount: i64,
    /// The value used for price calculation in spread and leg pricing in units
    /// of 1e-9.
    pub price_ratio: i64,
    /// The strike price of the option, in units of 1e-9.
    pub strike_price: i64,
    /// A bitmap of instrument eligibility attributes.
    pub inst_attrib_value: i32,
    /// The `instrument_id` of the first underlying instrument.
    pub underlying_id: u32,
    /// The instrument ID assigned by the publisher. May be the same as
    /// `instrument_id`.
    pub raw_instrument_id: u32,
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
    /// The trading session date corresponding to the settlement price in
    /// `trading_reference_price`, in number of days since the UNIX epoch.
    pub trading_reference_date: u16,
    /// The channel ID assigned at the venue.
    pub appl_id: i16,
    /// The calendar year reflected in the instrument symbol.
    pub maturity_year: u16,
    /// The date at which a contract will begin to decay.
    pub decay_start_date: u16,
    /// The channel ID assigned by Databento as an incrementing integer starting
    /// at zero.
    pub channel_id: u16,
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
    /// The classification of the instrument.
    pub instrument_class: c_char,
    /// The matching algorithm used for the instrument, typically **F**IFO.
    pub match_algorithm: c_char,
    /// The current trading state of the instrument.
    pub md_security_trading_status: u8,
    /// The price denominator of the main fraction.
    pub main_fraction: u8,
    /// The number of digits to the right of the tick mark, to display fractional
    /// prices.
    pub price_display_format: u8,
    /// The type indicators for the settlement price, as a bitmap.
    pub settl_price_type: u8,
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
    // Filler for alignment.
    #[doc(hidden)]
    pub _reserved: [u8; 10],
}

/// A statistics message in DBN version 2, where the quantity field is 32 bits
/// wide. A catchall for various data disseminated by publishers.
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
    /// The value for non-price statistics. Will be [`UNDEF_STAT_QUANTITY`] when
    /// unused.
    pub quantity: i32,
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
    pub _reserved: [u8; 6],
}

impl_record!(InstrumentDefMsg, InstrumentDefV2, 400, [rtype::INSTRUMENT_DEF]);
impl_record!(StatMsg, StatV2, 64, [rtype::STATISTICS]);

impl InstrumentDefMsg {
    /// Returns the raw symbol assigned by the publisher as a `&str`.
    ///
    /// # Errors
    /// This function returns an error if `raw_symbol` contains invalid UTF-8.
    pub fn raw_symbol(&self) -> Result<&str> {
        c_chars_to_str(&self.raw_symbol)
    }

    /// Returns the underlying asset code (product code) as a `&str`.
    ///
    /// # Errors
    /// This function returns an error if `asset` contains invalid UTF-8.
    pub fn asset(&self) -> Result<&str> {
        c_chars_to_str(&self.asset)
    }
}

impl Default for InstrumentDefMsg {
    fn default() -> Self {
        Self {
            hd: RecordHeader::default::<Self>(rtype::INSTRUMENT_DEF),
            ts_recv: UNDEF_TIMESTAMP,
            min_price_increment: UNDEF_PRICE,
            display_factor: UNDEF_PRICE,
            expiration: UNDEF_TIMESTAMP,
            activation: UNDEF_TIMESTAMP,
            high_limit_price: UNDEF_PRICE,
            low_limit_price: UNDEF_PRICE,
            max_price_variation: UNDEF_PRICE,
            trading_reference_price: UNDEF_PRICE,
            unit_of_measure_qty: UNDEF_PRICE,
            min_price_increment_amount: UNDEF_PRICE,
            price_ratio: UNDEF_PRICE,
            strike_price: UNDEF_PRICE,
            inst_attrib_value: 0,
            underlying_id: 0,
            raw_instrument_id: 0,
            market_depth_implied: 0,
            market_depth: 0,
            market_segment_id: 0,
            max_trade_vol: 0,
            min_lot_size: 0,
            min_lot_size_block: 0,
            min_lot_size_round_lot: 0,
            min_trade_vol: 0,
            contract_multiplier: 0,
            decay_quantity: 0,
            original_contract_size: 0,
            trading_reference_date: 0,
            appl_id: 0,
            maturity_year: 0,
            decay_start_date: 0,
            channel_id: 0,
            currency: [0; 4],
            settl_currency: [0; 4],
            secsubtype: [0; 6],
            raw_symbol: [0; SYMBOL_CSTR_LEN],
            group: [0; 21],
            exchange: [0; 5],
            asset: [0; ASSET_CSTR_LEN],
            cfi: [0; 7],
            security_type: [0; 7],
            unit_of_measure: [0; 31],
            underlying: [0; 21],
            strike_price_currency: [0; 4],
            instrument_class: 0,
            match_algorithm: b' ' as c_char,
            md_security_trading_status: 0,
            main_fraction: 0,
            price_display_format: 0,
            settl_price_type: 0,
            sub_fraction: 0,
            underlying_product: 0,
            security_update_action: b'A' as c_char,
            maturity_month: 0,
            maturity_day: 0,
            maturity_week: 0,
            user_defined_instrument: b'N' as c_char,
            contract_multiplier_unit: 0,
            flow_schedule_type: 0,
            tick_rule: 0,
            _reserved: [0; 10],
        }
    }
}

impl Default for StatMsg {
    fn default() -> Self {
        Self {
            hd: RecordHeader::default::<Self>(rtype::STATISTICS),
            ts_recv: UNDEF_TIMESTAMP,
            ts_ref: UNDEF_TIMESTAMP,
            price: UNDEF_PRICE,
            quantity: UNDEF_STAT_QUANTITY,
            sequence: 0,
            ts_in_delta: 0,
            stat_type: 0,
            channel_id: 0,
            update_action: 1,
            stat_flags: 0,
            _reserved: [0; 6],
        }
    }
}

impl From<&InstrumentDefMsg> for crate::record::InstrumentDefMsg {
    /// Converts a version 2 definition to the version 3 layout. The leg fields
    /// are set to their defaults; the fields dropped in version 3 are discarded.
    fn from(old: &InstrumentDefMsg) -> Self {
        let mut asset = [0; crate::record::ASSET_CSTR_LEN];
        asset[..ASSET_CSTR_LEN].copy_from_slice(&old.asset);
        Self {
            hd: RecordHeader::new::<Self>(
                old.hd.rtype,
                old.hd.publisher_id,
                old.hd.instrument_id,
                old.hd.ts_event,
            ),
            ts_recv: old.ts_recv,
            min_price_increment: old.min_price_increment,
            display_factor: old.display_factor,
            expiration: old.expiration,
            activation: old.activation,
            high_limit_price: old.high_limit_price,
            low_limit_price: old.low_limit_price,
            max_price_variation: old.max_price_variation,
            unit_of_measure_qty: old.unit_of_measure_qty,
            min_price_increment_amount: old.min_price_increment_amount,
            price_ratio: old.price_ratio,
            strike_price: old.strike_price,
            raw_instrument_id: u64::from(old.raw_instrument_id),
            inst_attrib_value: old.inst_attrib_value,
            underlying_id: old.underlying_id,
            market_depth_implied: old.market_depth_implied,
            market_depth: old.market_depth,
            market_segment_id: old.market_segment_id,
            max_trade_vol: old.max_trade_vol,
            min_lot_size: old.min_lot_size,
            min_lot_size_block: old.min_lot_size_block,
            min_lot_size_round_lot: old.min_lot_size_round_lot,
            min_trade_vol: old.min_trade_vol,
            contract_multiplier: old.contract_multiplier,
            decay_quantity: old.decay_quantity,
            original_contract_size: old.original_contract_size,
            appl_id: old.appl_id,
            maturity_year: old.maturity_year,
            decay_start_date: old.decay_start_date,
            channel_id: old.channel_id,
            currency: old.currency,
            settl_currency: old.settl_currency,
            secsubtype: old.secsubtype,
            raw_symbol: old.raw_symbol,
            group: old.group,
            exchange: old.exchange,
            asset,
            cfi: old.cfi,
            security_type: old.security_type,
            unit_of_measure: old.unit_of_measure,
            underlying: old.underlying,
            strike_price_currency: old.strike_price_currency,
            instrument_class: old.instrument_class,
            match_algorithm: old.match_algorithm,
            main_fraction: old.main_fraction,
            price_display_format: old.price_display_format,
            sub_fraction: old.sub_fraction,
            underlying_product: old.underlying_product,
            security_update_action: old.security_update_action,
            maturity_month: old.maturity_month,
            maturity_day: old.maturity_day,
            maturity_week: old.maturity_week,
            user_defined_instrument: old.user_defined_instrument,
            contract_multiplier_unit: old.contract_multiplier_unit,
            flow_schedule_type: old.flow_schedule_type,
            tick_rule: old.tick_rule,
            ..Default::default()
        }
    }
}

impl From<&StatMsg> for crate::record::StatMsg {
    /// Converts a version 2 statistic to the version 3 layout, widening the
    /// quantity and translating its sentinel.
    fn from(old: &StatMsg) -> Self {
        Self {
            hd: RecordHeader::new::<Self>(
                old.hd.rtype,
                old.hd.publisher_id,
                old.hd.instrument_id,
                old.hd.ts_event,
            ),
            ts_recv: old.ts_recv,
            ts_ref: old.ts_ref,
            price: old.price,
            quantity: if old.quantity == UNDEF_STAT_QUANTITY {
                crate::UNDEF_STAT_QUANTITY
            } else {
                i64::from(old.quantity)
            },
            sequence: old.sequence,
            ts_in_delta: old.ts_in_delta,
            stat_type: old.stat_type,
            channel_id: old.channel_id,
            update_action: old.update_action,
            stat_flags: old.stat_flags,
            _reserved: [0; 18],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{str_to_c_chars, HasRType, Record};

    #[test]
    fn test_upgrade_definition_recomputes_length() {
        let old = InstrumentDefMsg {
            raw_symbol: str_to_c_chars("ESM2").unwrap(),
            raw_instrument_id: 42,
            ..Default::default()
        };
        assert_eq!(old.record_size(), 400);
        let new = crate::record::InstrumentDefMsg::from(&old);
        assert_eq!(new.record_size(), 520);
        assert_eq!(new.raw_symbol().unwrap(), "ESM2");
        assert_eq!(new.raw_instrument_id, 42);
        assert_eq!(new.leg_count, 0);
    }

    #[test]
    fn test_upgrade_stat_translates_sentinel() {
        let old = StatMsg::default();
        assert_eq!(old.quantity, UNDEF_STAT_QUANTITY);
        let new = crate::record::StatMsg::from(&old);
        assert_eq!(new.quantity, crate::UNDEF_STAT_QUANTITY);
        let real = StatMsg {
            quantity: 1234,
            ..Default::default()
        };
        assert_eq!(crate::record::StatMsg::from(&real).quantity, 1234);
    }

    #[test]
    fn test_v2_sizes() {
        assert_eq!(InstrumentDefMsg::ENCODED_LEN, 400);
        assert_eq!(StatMsg::ENCODED_LEN, 64);
    }
}
