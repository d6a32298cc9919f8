//! Record types as they appear in DBN version 3, the current version. These are
//! re-exports of the crate-level types; the module exists so version-qualified
//! paths read symmetrically with [`v2`](crate::v2).

pub use crate::record::{
    ASSET_CSTR_LEN, InstrumentDefMsg, StatMsg,
};
pub use crate::{SYMBOL_CSTR_LEN, UNDEF_STAT_QUANTITY};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::HasRType;

    #[test]
    fn test_v3_sizes() {
        assert_eq!(InstrumentDefMsg::ENCODED_LEN, 520);
        assert_eq!(StatMsg::ENCODED_LEN, 80);
    }
}
