use std::{fmt, str::FromStr};

use alloy_primitives::{I256, U256};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;

use crate::{Result, UnitsError};

/// Largest `f64` safe integer, 2^53 − 1.
///
/// Floats beyond it are rejected even when they hold an exact integer such as
/// `1e18`, because neighbouring integers there collapse into the same value and
/// the caller's intended amount can't be told apart from its rounding.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_991.0;

/// Largest `f32` safe integer, 2^24 − 1.
const MAX_EXACT_FLOAT32: f64 = 16_777_215.0;

/// Any value that can stand for a decimal amount.
#[derive(Clone, Debug, PartialEq)]
pub enum NumberLike {
    /// Signed native integer
    Int(i128),
    /// Unsigned native integer
    Uint(u128),
    /// Native `f32`, accepted only within its safe integer range
    Float32(f32),
    /// Native `f64`, accepted only within its safe integer range
    Float(f64),
    /// Decimal string such as `"-12.5"`
    Str(String),
    /// Signed 256-bit integer
    BigInt(I256),
    /// Unsigned 256-bit integer
    BigUint(U256),
    /// Arbitrary-precision decimal
    Decimal(Decimal),
}

impl NumberLike {
    /// Renders the value in decimal and validates it against the decimal grammar.
    pub fn to_decimal_string(&self) -> Result<DecimalString> {
        match self {
            Self::Int(v) => DecimalString::parse(&v.to_string()),
            Self::Uint(v) => DecimalString::parse(&v.to_string()),
            Self::Float32(v) => {
                DecimalString::parse(&exact_float_string(v, f64::from(*v), MAX_EXACT_FLOAT32)?)
            }
            Self::Float(v) => DecimalString::parse(&exact_float_string(v, *v, MAX_EXACT_FLOAT)?),
            Self::Str(s) => DecimalString::parse(s),
            Self::BigInt(v) => DecimalString::parse(&v.to_string()),
            Self::BigUint(v) => DecimalString::parse(&v.to_string()),
            Self::Decimal(v) => DecimalString::parse(&v.to_string()),
        }
    }
}

/// Rust's float formatting is the shortest string that round-trips and never
/// uses exponent notation, so it is the float's own decimal form.
///
/// `f32` is rendered as itself, so `0.1f32` stays `0.1` instead of the digits of
/// its widened `f64`.
fn exact_float_string(value: impl fmt::Display, widened: f64, max_exact: f64) -> Result<String> {
    if !widened.is_finite() {
        return Err(UnitsError::InvalidType(format!("non-finite float {value}")));
    }
    if widened.abs() > max_exact {
        return Err(UnitsError::InvalidType(format!(
            "float {value} is outside the safe integer range ±{max_exact}, pass it as an integer or string"
        )));
    }
    Ok(value.to_string())
}

macro_rules! impl_from_native {
    ($variant:ident, $wide:ty: $($t:ty),+) => {
        $(
            impl From<$t> for NumberLike {
                fn from(value: $t) -> Self {
                    Self::$variant(value as $wide)
                }
            }
        )+
    };
}

impl_from_native!(Int, i128: i8, i16, i32, i64, i128, isize);
impl_from_native!(Uint, u128: u8, u16, u32, u64, u128, usize);

impl From<f32> for NumberLike {
    fn from(value: f32) -> Self {
        Self::Float32(value)
    }
}

impl From<f64> for NumberLike {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for NumberLike {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for NumberLike {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for NumberLike {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<I256> for NumberLike {
    fn from(value: I256) -> Self {
        Self::BigInt(value)
    }
}

impl From<U256> for NumberLike {
    fn from(value: U256) -> Self {
        Self::BigUint(value)
    }
}

impl From<Decimal> for NumberLike {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl TryFrom<&JsonValue> for NumberLike {
    type Error = UnitsError;

    fn try_from(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Ok(Self::Int(v.into()))
                } else if let Some(v) = n.as_u64() {
                    Ok(Self::Uint(v.into()))
                } else {
                    n.as_f64()
                        .map(Self::Float)
                        .ok_or_else(|| UnitsError::InvalidType(format!("unrepresentable number {n}")))
                }
            }
            JsonValue::String(s) => Ok(Self::Str(s.clone())),
            JsonValue::Null => Err(UnitsError::InvalidType("missing value".to_owned())),
            JsonValue::Bool(b) => Err(UnitsError::InvalidType(format!("boolean {b}"))),
            JsonValue::Array(_) => Err(UnitsError::InvalidType("array".to_owned())),
            JsonValue::Object(_) => Err(UnitsError::InvalidType("object".to_owned())),
        }
    }
}

impl TryFrom<JsonValue> for NumberLike {
    type Error = UnitsError;

    fn try_from(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::String(s) => Ok(Self::Str(s)),
            other => Self::try_from(&other),
        }
    }
}

/// A validated decimal amount in canonical form.
///
/// The integer part carries no redundant leading zeros, the fraction is kept
/// exactly as written and zero is never negative.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DecimalString {
    negative: bool,
    integer: String,
    fraction: Option<String>,
}

impl DecimalString {
    /// Parses `-?digits[.digits]`. Either side of the point may be empty, not both.
    pub fn parse(input: &str) -> Result<Self> {
        let (negative, body) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        if body.bytes().any(|b| !b.is_ascii_digit() && b != b'.') {
            tracing::debug!(input, "rejected number with unexpected characters");
            return Err(UnitsError::malformed(input, "only digits and one decimal point are allowed"));
        }

        let (integer, fraction) = match body.split_once('.') {
            Some((_, fraction)) if fraction.contains('.') => {
                return Err(UnitsError::malformed(input, "more than one decimal point"));
            }
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (body, None),
        };
        let fraction = fraction.filter(|f| !f.is_empty());
        if integer.is_empty() && fraction.is_none() {
            return Err(UnitsError::malformed(input, "no digits"));
        }

        let integer = match integer.trim_start_matches('0') {
            "" => "0",
            trimmed => trimmed,
        };
        let is_zero = integer == "0" && fraction.is_none_or(|f| f.bytes().all(|b| b == b'0'));

        Ok(Self {
            negative: negative && !is_zero,
            integer: integer.to_owned(),
            fraction: fraction.map(str::to_owned),
        })
    }

    /// Whether the amount is below zero.
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    /// Integer digits, at least one.
    pub fn integer(&self) -> &str {
        &self.integer
    }

    /// Fractional digits, if a non-empty fraction was given.
    pub fn fraction(&self) -> Option<&str> {
        self.fraction.as_deref()
    }
}

impl FromStr for DecimalString {
    type Err = UnitsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DecimalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.integer)?;
        if let Some(fraction) = &self.fraction {
            write!(f, ".{fraction}")?;
        }
        Ok(())
    }
}

/// Validates `value` and returns its canonical decimal string.
pub fn number_to_string(value: impl Into<NumberLike>) -> Result<String> {
    value.into().to_decimal_string().map(|d| d.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn malformed(input: &str) -> bool {
        matches!(number_to_string(input), Err(UnitsError::MalformedNumber { .. }))
    }

    #[test]
    fn native_integers() {
        assert_eq!(number_to_string(55).unwrap(), "55");
        assert_eq!(number_to_string(1u8).unwrap(), "1");
        assert_eq!(number_to_string(-1i64).unwrap(), "-1");
        assert_eq!(number_to_string(0).unwrap(), "0");
        assert_eq!(number_to_string(u128::MAX).unwrap(), u128::MAX.to_string());
    }

    #[test]
    fn negative_zero_loses_its_sign() {
        assert_eq!(number_to_string(-0.0).unwrap(), "0");
        assert_eq!(number_to_string("-0").unwrap(), "0");
        assert_eq!(number_to_string("-000").unwrap(), "0");
        assert_eq!(number_to_string("-0.00").unwrap(), "0.00");
    }

    #[test]
    fn floats_use_their_shortest_decimal_form() {
        assert_eq!(number_to_string(10.1).unwrap(), "10.1");
        assert_eq!(number_to_string(0.3).unwrap(), "0.3");
        assert_eq!(number_to_string(1e-7).unwrap(), "0.0000001");
        assert_eq!(number_to_string(9_007_199_254_740_991.0).unwrap(), "9007199254740991");
    }

    #[test]
    fn f32_keeps_its_own_shortest_form() {
        assert_eq!(number_to_string(0.1f32).unwrap(), "0.1");
        assert_eq!(number_to_string(-2.5f32).unwrap(), "-2.5");
        assert_eq!(number_to_string(16_777_215.0f32).unwrap(), "16777215");
        for value in [f32::NAN, f32::INFINITY, 16_777_216.0, -1e10] {
            assert!(
                matches!(number_to_string(value), Err(UnitsError::InvalidType(_))),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn inexact_floats_are_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e18, -1e21] {
            assert!(
                matches!(number_to_string(value), Err(UnitsError::InvalidType(_))),
                "{value} should be rejected"
            );
        }
        // exactly representable, but past the safe integer range
        let err = number_to_string(1e18).unwrap_err();
        assert!(err.to_string().contains("safe integer range"), "{err}");
        assert!(matches!(number_to_string(9_007_199_254_740_992.0), Err(UnitsError::InvalidType(_))));
    }

    #[test]
    fn big_integers_and_decimals() {
        assert_eq!(number_to_string(U256::from(10000)).unwrap(), "10000");
        assert_eq!(number_to_string(I256::MINUS_ONE).unwrap(), "-1");
        assert_eq!(number_to_string(I256::ZERO).unwrap(), "0");
        assert_eq!(number_to_string(Decimal::new(101, 1)).unwrap(), "10.1");
        assert_eq!(number_to_string(Decimal::from(10000)).unwrap(), "10000");
        assert_eq!(number_to_string(U256::MAX).unwrap(), U256::MAX.to_string());
    }

    #[test]
    fn strings_are_canonicalized() {
        assert_eq!(number_to_string("007").unwrap(), "7");
        assert_eq!(number_to_string(".3").unwrap(), "0.3");
        assert_eq!(number_to_string("-.3").unwrap(), "-0.3");
        assert_eq!(number_to_string("3.").unwrap(), "3");
        assert_eq!(number_to_string("00.500").unwrap(), "0.500");
        assert_eq!(number_to_string("-12.340").unwrap(), "-12.340");
    }

    #[test]
    fn malformed_strings() {
        for input in
            ["", "-", ".", "-.", "-1sdffsdsdf", "-0..-...9", "fds", "#", "1.2.3", "+1", "1e18", " 1", "1,000", "--1", "1-"]
        {
            assert!(malformed(input), "{input:?} should be malformed");
        }
    }

    #[test]
    fn json_values() {
        let ok = |value: JsonValue| number_to_string(NumberLike::try_from(value).unwrap()).unwrap();
        assert_eq!(ok(json!(42)), "42");
        assert_eq!(ok(json!(-7)), "-7");
        assert_eq!(ok(json!(u64::MAX)), u64::MAX.to_string());
        assert_eq!(ok(json!(2.5)), "2.5");
        assert_eq!(ok(json!("1.25")), "1.25");

        for value in [json!(null), json!({}), json!([]), json!(true)] {
            assert!(
                matches!(NumberLike::try_from(&value), Err(UnitsError::InvalidType(_))),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn parts_are_exposed() {
        let parsed: DecimalString = "-0012.0500".parse().unwrap();
        assert!(parsed.is_negative());
        assert_eq!(parsed.integer(), "12");
        assert_eq!(parsed.fraction(), Some("0500"));
        assert_eq!(parsed.to_string(), "-12.0500");
    }
}
