//! Constructors and typed accessors for the record types.

use std::os::raw::c_char;

use crate::{
    enums::{Action, InstrumentClass, Side},
    error::{Error, Result},
    record::{
        c_chars_to_str, ts_to_dt, ErrorMsg, ImbalanceMsg, InstrumentDefMsg, MboMsg, Mbp10Msg,
        Mbp1Msg, RecordHeader, StatMsg, StatusMsg, SymbolMappingMsg, SystemMsg, TradeMsg,
    },
    rtype,
};

const HEARTBEAT_MSG: &str = "Heartbeat";

fn char_field<T: TryFrom<u8>>(raw: c_char, field: &str) -> Result<T> {
    T::try_from(raw as u8).map_err(|_| {
        Error::invalid_format(format!(
            "{:#04X} is not a valid value for {field}",
            raw as u8
        ))
    })
}

macro_rules! impl_action_side {
    ($ty:ident) => {
        impl $ty {
            /// Parses the raw event action into an enum.
            ///
            /// # Errors
            /// This function returns an error if `action` doesn't contain a
            /// valid [`Action`].
            pub fn action(&self) -> Result<Action> {
                char_field(self.action, "action")
            }

            /// Parses the raw side into an enum.
            ///
            /// # Errors
            /// This function returns an error if `side` doesn't contain a valid
            /// [`Side`].
            pub fn side(&self) -> Result<Side> {
                char_field(self.side, "side")
            }

            /// Parses the raw capture-server-received timestamp into a datetime.
            /// Returns `None` if `ts_recv` contains the sentinel for a null
            /// timestamp.
            pub fn ts_recv(&self) -> Option<time::OffsetDateTime> {
                ts_to_dt(self.ts_recv)
            }
        }
    };
}

impl_action_side!(MboMsg);
impl_action_side!(TradeMsg);
impl_action_side!(Mbp1Msg);
impl_action_side!(Mbp10Msg);

impl crate::record::Cmbp1Msg {
    /// Parses the raw event action into an enum.
    ///
    /// # Errors
    /// This function returns an error if `action` doesn't contain a valid
    /// [`Action`].
    pub fn action(&self) -> Result<Action> {
        char_field(self.action, "action")
    }

    /// Parses the raw side into an enum.
    ///
    /// # Errors
    /// This function returns an error if `side` doesn't contain a valid [`Side`].
    pub fn side(&self) -> Result<Side> {
        char_field(self.side, "side")
    }
}

impl StatusMsg {
    /// Parses the raw capture-server-received timestamp into a datetime. Returns
    /// `None` if `ts_recv` contains the sentinel for a null timestamp.
    pub fn ts_recv(&self) -> Option<time::OffsetDateTime> {
        ts_to_dt(self.ts_recv)
    }

    /// Returns whether one can trade, or `None` if it's not applicable.
    pub fn is_trading(&self) -> Option<bool> {
        tri_state(self.is_trading)
    }

    /// Returns whether one can post quotes, or `None` if it's not applicable.
    pub fn is_quoting(&self) -> Option<bool> {
        tri_state(self.is_quoting)
    }

    /// Returns whether short selling is restricted, or `None` if it's not
    /// applicable.
    pub fn is_short_sell_restricted(&self) -> Option<bool> {
        tri_state(self.is_short_sell_restricted)
    }
}

fn tri_state(raw: c_char) -> Option<bool> {
    match raw as u8 {
        b'Y' => Some(true),
        b'N' => Some(false),
        _ => None,
    }
}

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

    /// Returns the instrument type, e.g. FUT for future or future spread, as a
    /// `&str`.
    ///
    /// # Errors
    /// This function returns an error if `security_type` contains invalid UTF-8.
    pub fn security_type(&self) -> Result<&str> {
        c_chars_to_str(&self.security_type)
    }

    /// Parses the raw classification of the instrument into an enum.
    ///
    /// # Errors
    /// This function returns an error if `instrument_class` doesn't contain a
    /// valid [`InstrumentClass`].
    pub fn instrument_class(&self) -> Result<InstrumentClass> {
        char_field(self.instrument_class, "instrument_class")
    }

    /// Parses the last eligible trade time into a datetime. Returns `None` if
    /// `expiration` contains the sentinel for a null timestamp.
    pub fn expiration(&self) -> Option<time::OffsetDateTime> {
        ts_to_dt(self.expiration)
    }

    /// Parses the time of instrument activation into a datetime. Returns `None`
    /// if `activation` contains the sentinel for a null timestamp.
    pub fn activation(&self) -> Option<time::OffsetDateTime> {
        ts_to_dt(self.activation)
    }
}

impl ImbalanceMsg {
    /// Parses the raw side of the total imbalance quantity into an enum.
    ///
    /// # Errors
    /// This function returns an error if `side` doesn't contain a valid [`Side`].
    pub fn side(&self) -> Result<Side> {
        char_field(self.side, "side")
    }
}

impl StatMsg {
    /// Parses the reference timestamp of the statistic value into a datetime.
    /// Returns `None` if `ts_ref` contains the sentinel for a null timestamp.
    pub fn ts_ref(&self) -> Option<time::OffsetDateTime> {
        ts_to_dt(self.ts_ref)
    }
}

impl ErrorMsg {
    /// Creates a new `ErrorMsg`.
    pub fn new(ts_event: i64, msg: impl ToString, is_last: bool) -> Self {
        Self {
            hd: RecordHeader::new::<Self>(rtype::ERROR, 0, 0, ts_event),
            err: msg.to_string(),
            code: 0,
            is_last: is_last as u8,
        }
    }
}

impl SymbolMappingMsg {
    /// Creates a new `SymbolMappingMsg`.
    pub fn new(
        instrument_id: u32,
        ts_event: i64,
        stype_in: u8,
        stype_in_symbol: impl ToString,
        stype_out: u8,
        stype_out_symbol: impl ToString,
        start_ts: i64,
        end_ts: i64,
    ) -> Self {
        Self {
            hd: RecordHeader::new::<Self>(rtype::SYMBOL_MAPPING, 0, instrument_id, ts_event),
            stype_in,
            stype_in_symbol: stype_in_symbol.to_string(),
            stype_out,
            stype_out_symbol: stype_out_symbol.to_string(),
            start_ts,
            end_ts,
        }
    }
}

impl SystemMsg {
    /// Creates a new `SystemMsg`.
    pub fn new(ts_event: i64, msg: impl ToString) -> Self {
        Self {
            hd: RecordHeader::new::<Self>(rtype::SYSTEM, 0, 0, ts_event),
            msg: msg.to_string(),
            code: 0,
        }
    }

    /// Creates a new heartbeat `SystemMsg`.
    pub fn heartbeat(ts_event: i64) -> Self {
        Self::new(ts_event, HEARTBEAT_MSG)
    }

    /// Checks whether the message is a heartbeat from the gateway.
    pub fn is_heartbeat(&self) -> bool {
        self.msg == HEARTBEAT_MSG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_side_accessors() {
        let trade = TradeMsg {
            action: b'T' as c_char,
            side: b'A' as c_char,
            ..Default::default()
        };
        assert_eq!(trade.action().unwrap(), Action::Trade);
        assert_eq!(trade.side().unwrap(), Side::Ask);
        let bad = TradeMsg {
            action: b'Z' as c_char,
            ..Default::default()
        };
        assert!(bad.action().is_err());
    }

    #[test]
    fn test_status_tri_state() {
        let status = StatusMsg {
            is_trading: b'Y' as c_char,
            is_quoting: b'N' as c_char,
            ..Default::default()
        };
        assert_eq!(status.is_trading(), Some(true));
        assert_eq!(status.is_quoting(), Some(false));
        assert_eq!(status.is_short_sell_restricted(), None);
    }

    #[test]
    fn test_system_heartbeat() {
        let msg = SystemMsg::heartbeat(0);
        assert!(msg.is_heartbeat());
        assert!(!SystemMsg::new(0, "Subscription acknowledged").is_heartbeat());
    }
}
