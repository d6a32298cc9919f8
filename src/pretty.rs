//! Conversions and display formatting for the fixed-precision prices and
//! nanosecond timestamps found in DBN records.

use std::fmt;

use time::format_description::BorrowedFormatItem;

use crate::{FIXED_PRICE_SCALE, UNDEF_PRICE};

/// A [new type](https://doc.rust-lang.org/rust-by-example/generics/new_types.html)
/// for formatting nanosecond UNIX timestamps to the canonical ISO 8601 format.
///
/// Supports
/// - width `{:N}` to specify a minimum width of `N` characters
/// - fill and alignment: change the default fill character from a space
///   and alignment from the default of right-aligned
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Ts(pub i64);

/// A [new type](https://doc.rust-lang.org/rust-by-example/generics/new_types.html)
/// for formatting the fixed-precision prices used in DBN.
///
/// Supports
/// - sign `{:+}` to always print the sign
/// - width `{:N}` to specify a minimum width of `N` characters
/// - precision `{:.N}` to print `N` decimal places. By default all 9 are printed
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Px(pub i64);

impl From<i64> for Ts {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<i64> for Px {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Ts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

impl fmt::Display for Ts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const TS_FORMAT: &[BorrowedFormatItem<'static>] = time::macros::format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z"
        );
        let ts = self.0;
        if ts != 0 {
            // Every i64 is within the range `OffsetDateTime` supports
            let dt = time::OffsetDateTime::from_unix_timestamp_nanos(ts as i128).unwrap();
            if let Ok(dt_str) = dt.format(TS_FORMAT) {
                f.pad(&dt_str)?;
            } else {
                // Fall back to regular int formatting
                fmt::Display::fmt(&ts, f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const DIVISORS: [i64; 9] = [
            0,
            100_000_000,
            10_000_000,
            1_000_000,
            100_000,
            10_000,
            1_000,
            100,
            10,
        ];
        let px = self.0;
        if px == UNDEF_PRICE {
            f.write_str("UNDEF_PRICE")
        } else {
            let (is_nonnegative, px_abs) = if px < 0 { (false, -px) } else { (true, px) };
            let px_integer = px_abs / FIXED_PRICE_SCALE;
            let px_fraction = px_abs % FIXED_PRICE_SCALE;
            match f.precision() {
                Some(0) => f.pad_integral(is_nonnegative, "", itoa::Buffer::new().format(px_abs)),
                Some(precision @ ..9) => f.pad_integral(
                    is_nonnegative,
                    "",
                    &format!(
                        "{px_integer}.{:0precision$}",
                        px_fraction / DIVISORS[precision]
                    ),
                ),
                Some(_) | None => f.pad_integral(
                    is_nonnegative,
                    "",
                    &format!("{px_integer}.{px_fraction:09}"),
                ),
            }
        }
    }
}

/// Converts a fixed-precision price to a decimal string with all 9 decimal places
/// printed. Use [`Px`] to customize the number of printed decimal places,
/// alignment, fill, and other formatting options.
pub fn fmt_px(px: i64) -> String {
    let mut out = String::new();
    fmt_px_into(&mut out, px)
        // Writing to a string is infallible
        .unwrap();
    out
}

pub(crate) fn fmt_px_into<W: fmt::Write>(mut out: W, px: i64) -> fmt::Result {
    if px == UNDEF_PRICE {
        write!(out, "UNDEF_PRICE")
    } else {
        let (sign, px_abs) = if px < 0 { ("-", -px) } else { ("", px) };
        let px_integer = px_abs / FIXED_PRICE_SCALE;
        let px_fraction = px_abs % FIXED_PRICE_SCALE;
        write!(
            out,
            "{sign}{}.{:0>9}",
            itoa::Buffer::new().format(px_integer),
            itoa::Buffer::new().format(px_fraction)
        )
    }
}

/// Converts a nanosecond UNIX timestamp to a human-readable string in the format
/// `[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z`.
///
/// Note: this function does not check for [`UNDEF_TIMESTAMP`](crate::UNDEF_TIMESTAMP).
pub fn fmt_ts(ts: i64) -> String {
    format!("{}", Ts(ts))
}

/// Converts a fixed-precision price to a floating point.
///
/// [`UNDEF_PRICE`] will be converted to NaN.
pub fn px_to_f64(px: i64) -> f64 {
    if px == UNDEF_PRICE {
        f64::NAN
    } else {
        px as f64 / FIXED_PRICE_SCALE as f64
    }
}

/// Converts a floating-point price to its fixed-precision representation,
/// rounding halfway cases away from zero.
///
/// NaN and infinities convert to [`UNDEF_PRICE`]. For every finite `px` with
/// `|px| <= i64::MAX / FIXED_PRICE_SCALE`, `px_to_f64(f64_to_px(px))` is within
/// 1 ULP of `px`.
pub fn f64_to_px(px: f64) -> i64 {
    if px.is_finite() {
        // `round` rounds halfway cases away from zero; the cast saturates
        (px * FIXED_PRICE_SCALE as f64).round() as i64
    } else {
        UNDEF_PRICE
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::negative(-100_000, "-0.000100000")]
    #[case::positive(32_500_000_000, "32.500000000")]
    #[case::leading_zero(101_005_000_000, "101.005000000")]
    #[case::zero(0, "0.000000000")]
    #[case::undef(UNDEF_PRICE, "UNDEF_PRICE")]
    fn test_fmt_px(#[case] num: i64, #[case] exp: &str) {
        assert_eq!(fmt_px(num), exp);
        assert_eq!(format!("{}", Px(num)), exp);
    }

    #[rstest]
    #[case::positive(32_500_000_000, 3, "32.500")]
    #[case::leading_zero(101_005_000_000, 5, "101.00500")]
    #[case::trunc(32_123_456_789, 2, "32.12")]
    fn test_px_precision(#[case] num: i64, #[case] precision: usize, #[case] exp: &str) {
        let num = Px(num);
        assert_eq!(format!("{num:.precision$}"), exp);
    }

    #[rstest]
    #[case::zero(0, "")]
    #[case::one(1, "1970-01-01T00:00:00.000000001Z")]
    #[case::pre_epoch(-1, "1969-12-31T23:59:59.999999999Z")]
    #[case::recent(1622838300000000000, "2021-06-04T20:25:00.000000000Z")]
    fn test_fmt_ts(#[case] ts: i64, #[case] exp: &str) {
        assert_eq!(fmt_ts(ts), exp);
    }

    #[rstest]
    #[case::one(1.0, 1_000_000_000)]
    #[case::neg(-1.5, -1_500_000_000)]
    #[case::tick(0.000000001, 1)]
    #[case::round_up(0.0000000015, 2)]
    #[case::round_away_neg(-0.0000000015, -2)]
    #[case::zero(0.0, 0)]
    fn test_f64_to_px(#[case] px: f64, #[case] exp: i64) {
        assert_eq!(f64_to_px(px), exp);
    }

    #[rstest]
    #[case::nan(f64::NAN)]
    #[case::inf(f64::INFINITY)]
    #[case::neg_inf(f64::NEG_INFINITY)]
    fn test_f64_to_px_non_finite(#[case] px: f64) {
        assert_eq!(f64_to_px(px), UNDEF_PRICE);
    }

    #[test]
    fn test_px_to_f64_undef_is_nan() {
        assert!(px_to_f64(UNDEF_PRICE).is_nan());
        assert_eq!(f64_to_px(px_to_f64(UNDEF_PRICE)), UNDEF_PRICE);
    }

    #[rstest]
    #[case(1.0)]
    #[case(-1.0)]
    #[case(0.000000001)]
    #[case(3720.25)]
    #[case(-0.0001)]
    #[case(1234567.890123456)]
    #[case(9_223_372_036.0)]
    #[case(-9_223_372_036.0)]
    fn test_px_round_trip_within_one_ulp(#[case] px: f64) {
        let res = px_to_f64(f64_to_px(px));
        let ulp = f64::from_bits(px.abs().to_bits() + 1) - px.abs();
        assert!(
            (res - px).abs() <= ulp,
            "{res} differs from {px} by more than 1 ULP"
        );
    }
}
