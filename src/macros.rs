//! Crate-internal macros for wiring record types into the common traits.

/// Implements [`Record`](crate::record::Record),
/// [`RecordMut`](crate::record::RecordMut), [`HasRType`](crate::record::HasRType),
/// and the [`RecordEnum`](crate::RecordEnum) conversions for a record struct.
///
/// Arguments: the struct name, its `RecordEnum` variant, its canonical encoded
/// size, and the set of `rtype` tags it decodes.
macro_rules! impl_record {
    ($ty:ident, $variant:ident, $len:expr, [$($rtype:expr),+ $(,)?]) => {
        impl crate::record::Record for $ty {
            fn header(&self) -> &crate::record::RecordHeader {
                &self.hd
            }
        }

        impl crate::record::RecordMut for $ty {
            fn header_mut(&mut self) -> &mut crate::record::RecordHeader {
                &mut self.hd
            }
        }

        impl crate::record::HasRType for $ty {
            const ENCODED_LEN: usize = $len;

            fn has_rtype(rtype: u8) -> bool {
                $(rtype == $rtype)||+
            }
        }

        impl From<$ty> for crate::RecordEnum {
            fn from(rec: $ty) -> Self {
                Self::$variant(rec)
            }
        }

        impl TryFrom<crate::RecordEnum> for $ty {
            type Error = crate::RecordEnum;

            /// Recovers the concrete record, returning the original enum back if
            /// it holds a different variant.
            fn try_from(rec: crate::RecordEnum) -> ::std::result::Result<Self, Self::Error> {
                match rec {
                    crate::RecordEnum::$variant(rec) => Ok(rec),
                    other => Err(other),
                }
            }
        }
    };
}
