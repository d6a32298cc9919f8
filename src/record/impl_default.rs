//! `Default` implementations seeded with the sentinel values for each field.

use std::os::raw::c_char;

use crate::{
    flags::FlagSet,
    record::{
        Cmbp1Msg, ErrorMsg, ImbalanceMsg, InstrumentDefMsg, MboMsg, Mbp10Msg, Mbp1Msg, OhlcvMsg,
        RecordHeader, StatMsg, StatusMsg, SymbolMappingMsg, SystemMsg, TradeMsg,
    },
    rtype, UNDEF_ORDER_SIZE, UNDEF_PRICE, UNDEF_STAT_QUANTITY, UNDEF_TIMESTAMP,
};

impl Default for MboMsg {
    fn default() -> Self {
        Self {
            hd: RecordHeader::default::<Self>(rtype::MBO),
            order_id: 0,
            price: UNDEF_PRICE,
            size: UNDEF_ORDER_SIZE,
            flags: FlagSet::default(),
            channel_id: 0,
            action: b'N' as c_char,
            side: b'N' as c_char,
            ts_recv: UNDEF_TIMESTAMP,
            ts_in_delta: 0,
            sequence: 0,
        }
    }
}

impl Default for TradeMsg {
    fn default() -> Self {
        Self {
            hd: RecordHeader::default::<Self>(rtype::MBP_0),
            price: UNDEF_PRICE,
            size: UNDEF_ORDER_SIZE,
            action: b'T' as c_char,
            side: b'N' as c_char,
            flags: FlagSet::default(),
            depth: 0,
            ts_recv: UNDEF_TIMESTAMP,
            ts_in_delta: 0,
            sequence: 0,
        }
    }
}

impl Default for Mbp1Msg {
    fn default() -> Self {
        Self {
            hd: RecordHeader::default::<Self>(rtype::MBP_1),
            price: UNDEF_PRICE,
            size: UNDEF_ORDER_SIZE,
            action: b'N' as c_char,
            side: b'N' as c_char,
            flags: FlagSet::default(),
            depth: 0,
            ts_recv: UNDEF_TIMESTAMP,
            ts_in_delta: 0,
            sequence: 0,
            levels: Default::default(),
        }
    }
}

impl Default for Mbp10Msg {
    fn default() -> Self {
        Self {
            hd: RecordHeader::default::<Self>(rtype::MBP_10),
            price: UNDEF_PRICE,
            size: UNDEF_ORDER_SIZE,
            action: b'N' as c_char,
            side: b'N' as c_char,
            flags: FlagSet::default(),
            depth: 0,
            ts_recv: UNDEF_TIMESTAMP,
            ts_in_delta: 0,
            sequence: 0,
            levels: Default::default(),
        }
    }
}

impl Default for Cmbp1Msg {
    fn default() -> Self {
        Self {
            hd: RecordHeader::default::<Self>(rtype::CMBP_1),
            price: UNDEF_PRICE,
            size: UNDEF_ORDER_SIZE,
            action: b'N' as c_char,
            side: b'N' as c_char,
            flags: FlagSet::default(),
            depth: 0,
            ts_recv: UNDEF_TIMESTAMP,
            ts_in_delta: 0,
            sequence: 0,
            levels: Default::default(),
        }
    }
}

impl Default for OhlcvMsg {
    fn default() -> Self {
        Self {
            hd: RecordHeader::default::<Self>(rtype::OHLCV_1S),
            open: UNDEF_PRICE,
            high: UNDEF_PRICE,
            low: UNDEF_PRICE,
            close: UNDEF_PRICE,
            volume: 0,
        }
    }
}

impl Default for StatusMsg {
    fn default() -> Self {
        Self {
            hd: RecordHeader::default::<Self>(rtype::STATUS),
            ts_recv: UNDEF_TIMESTAMP,
            action: 0,
            reason: 0,
            trading_event: 0,
            is_trading: b'~' as c_char,
            is_quoting: b'~' as c_char,
            is_short_sell_restricted: b'~' as c_char,
            _reserved: [0; 7],
        }
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
            unit_of_measure_qty: UNDEF_PRICE,
            min_price_increment_amount: UNDEF_PRICE,
            price_ratio: UNDEF_PRICE,
            strike_price: UNDEF_PRICE,
            raw_instrument_id: 0,
            leg_price: UNDEF_PRICE,
            leg_delta: UNDEF_PRICE,
            inst_attrib_value: 0,
            underlying_id: 0,
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
            leg_instrument_id: 0,
            leg_ratio_price_numerator: 0,
            leg_ratio_price_denominator: 0,
            leg_ratio_qty_numerator: 0,
            leg_ratio_qty_denominator: 0,
            leg_underlying_id: 0,
            appl_id: 0,
            maturity_year: 0,
            decay_start_date: 0,
            channel_id: 0,
            leg_count: 0,
            leg_index: 0,
            currency: [0; 4],
            settl_currency: [0; 4],
            secsubtype: [0; 6],
            raw_symbol: [0; crate::SYMBOL_CSTR_LEN],
            group: [0; 21],
            exchange: [0; 5],
            asset: [0; crate::record::ASSET_CSTR_LEN],
            cfi: [0; 7],
            security_type: [0; 7],
            unit_of_measure: [0; 31],
            underlying: [0; 21],
            strike_price_currency: [0; 4],
            leg_raw_symbol: [0; crate::SYMBOL_CSTR_LEN],
            instrument_class: 0,
            match_algorithm: b' ' as c_char,
            main_fraction: 0,
            price_display_format: 0,
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
            leg_instrument_class: 0,
            leg_side: b'N' as c_char,
            _reserved: [0; 17],
        }
    }
}

impl Default for ImbalanceMsg {
    fn default() -> Self {
        Self {
            hd: RecordHeader::default::<Self>(rtype::IMBALANCE),
            ts_recv: UNDEF_TIMESTAMP,
            ref_price: UNDEF_PRICE,
            auction_time: UNDEF_TIMESTAMP,
            cont_book_clr_price: UNDEF_PRICE,
            auct_interest_clr_price: UNDEF_PRICE,
            ssr_filling_price: UNDEF_PRICE,
            ind_match_price: UNDEF_PRICE,
            upper_collar: UNDEF_PRICE,
            lower_collar: UNDEF_PRICE,
            paired_qty: 0,
            total_imbalance_qty: 0,
            market_imbalance_qty: 0,
            unpaired_qty: 0,
            auction_type: 0,
            side: b'N' as c_char,
            auction_status: 0,
            freeze_status: 0,
            num_extensions: 0,
            unpaired_side: b'N' as c_char,
            significant_imbalance: 0,
            _reserved: [0; 1],
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
            _reserved: [0; 18],
        }
    }
}

impl Default for ErrorMsg {
    fn default() -> Self {
        Self {
            hd: RecordHeader::default::<Self>(rtype::ERROR),
            err: String::new(),
            code: 0,
            is_last: 1,
        }
    }
}

impl Default for SymbolMappingMsg {
    fn default() -> Self {
        Self {
            hd: RecordHeader::default::<Self>(rtype::SYMBOL_MAPPING),
            stype_in: 0,
            stype_in_symbol: String::new(),
            stype_out: 0,
            stype_out_symbol: String::new(),
            start_ts: UNDEF_TIMESTAMP,
            end_ts: UNDEF_TIMESTAMP,
        }
    }
}

impl Default for SystemMsg {
    fn default() -> Self {
        Self {
            hd: RecordHeader::default::<Self>(rtype::SYSTEM),
            msg: String::new(),
            code: 0,
        }
    }
}
