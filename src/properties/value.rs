//! Conversions from raw property strings to typed values.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

/// Strings read as `true`, compared case-insensitively.
pub const TRUTHY: [&str; 5] = ["true", "t", "yes", "y", "1"];

/// Strings read as `false`, compared case-insensitively.
pub const FALSY: [&str; 5] = ["false", "f", "no", "n", "0"];

/// A type a raw property string can be converted into.
///
/// The built-in implementations use [`Default::default`] as the fallback
/// value for [`PropertyStore::get`](super::PropertyStore::get).
pub trait PropertyValue: Sized {
    /// Name used in diagnostics, e.g. `"integer"`.
    const TYPE_NAME: &'static str;

    fn parse_property(raw: &str) -> Result<Self, String>;
}

impl PropertyValue for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn parse_property(raw: &str) -> Result<Self, String> {
        if TRUTHY.iter().any(|t| raw.eq_ignore_ascii_case(t)) {
            return Ok(true);
        }
        if FALSY.iter().any(|f| raw.eq_ignore_ascii_case(f)) {
            return Ok(false);
        }
        Err(format!("expected one of {TRUTHY:?} or {FALSY:?}"))
    }
}

impl PropertyValue for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn parse_property(raw: &str) -> Result<Self, String> {
        raw.parse().map_err(|e: std::num::ParseIntError| e.to_string())
    }
}

impl PropertyValue for f64 {
    const TYPE_NAME: &'static str = "decimal";

    fn parse_property(raw: &str) -> Result<Self, String> {
        raw.trim()
            .parse()
            .map_err(|e: std::num::ParseFloatError| e.to_string())
    }
}

impl PropertyValue for BigInt {
    const TYPE_NAME: &'static str = "big integer";

    fn parse_property(raw: &str) -> Result<Self, String> {
        BigInt::from_str(raw).map_err(|e| e.to_string())
    }
}

impl PropertyValue for BigDecimal {
    const TYPE_NAME: &'static str = "big decimal";

    fn parse_property(raw: &str) -> Result<Self, String> {
        BigDecimal::from_str(raw).map_err(|e| e.to_string())
    }
}

impl PropertyValue for String {
    const TYPE_NAME: &'static str = "string";

    fn parse_property(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_accepts_every_truthy_and_falsy_spelling() {
        for word in TRUTHY {
            assert_eq!(bool::parse_property(word), Ok(true), "{word}");
            assert_eq!(bool::parse_property(&word.to_uppercase()), Ok(true), "{word}");
        }
        for word in FALSY {
            assert_eq!(bool::parse_property(word), Ok(false), "{word}");
            assert_eq!(bool::parse_property(&word.to_uppercase()), Ok(false), "{word}");
        }
        assert_eq!(bool::parse_property("tRuE"), Ok(true));
    }

    #[test]
    fn test_bool_rejects_other_strings() {
        for raw in ["", "on", "off", "2", " true", "yess"] {
            assert!(bool::parse_property(raw).is_err(), "{raw:?}");
        }
    }

    #[test]
    fn test_integer_parsing() {
        assert_eq!(i64::parse_property("1010"), Ok(1010));
        assert_eq!(i64::parse_property("-42"), Ok(-42));
        assert_eq!(i64::parse_property("+7"), Ok(7));
        assert!(i64::parse_property("").is_err());
        assert!(i64::parse_property("20x20").is_err());
        assert!(i64::parse_property("1.5").is_err());
        assert!(i64::parse_property("99999999999999999999").is_err());
    }

    #[test]
    fn test_decimal_parsing_trims() {
        assert_eq!(f64::parse_property("0.1"), Ok(0.1));
        assert_eq!(f64::parse_property(" 1.9 "), Ok(1.9));
        assert_eq!(f64::parse_property("1e3"), Ok(1000.0));
        assert!(f64::parse_property("zero point one").is_err());
        assert!(f64::parse_property("").is_err());
    }

    #[test]
    fn test_big_values_exceed_machine_range() {
        let big = BigInt::parse_property("123456789012345678901234567890").unwrap();
        assert_eq!(big.to_string(), "123456789012345678901234567890");
        assert!(BigInt::parse_property("").is_err());
        assert!(BigInt::parse_property("12ab").is_err());

        let dec = BigDecimal::parse_property("0.1").unwrap();
        assert_eq!(dec, BigDecimal::from_str("0.1").unwrap());
        assert!(BigDecimal::parse_property("zero point one").is_err());
    }
}
