use alloy_primitives::I256;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{NumberLike, Result, UnitsError, format::commify, resolve_unit};

/// Output options for [`from_wei_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOptions {
    /// Group the integer digits with `,` every three places.
    pub commify: bool,
}

impl ConvertOptions {
    /// Sets whether the integer part gets grouping separators.
    pub const fn with_commify(mut self, commify: bool) -> Self {
        self.commify = commify;
        self
    }
}

/// Converts an amount denominated in `unit` into an exact number of wei.
///
/// Fails with [`UnitsError::PrecisionOverflow`] instead of rounding when the
/// amount has more fractional digits than `unit` has decimals, trailing zeros
/// included.
pub fn to_wei(value: impl Into<NumberLike>, unit: &str) -> Result<I256> {
    let amount = value.into().to_decimal_string()?;
    let unit = resolve_unit(unit)?;
    let decimals = unit.decimals() as usize;

    // `wei` still takes a single zero digit, so `0.0` is a valid amount of wei
    let fraction = amount.fraction().unwrap_or_default();
    let nonzero_wei_fraction = decimals == 0 && fraction.bytes().any(|b| b != b'0');
    if fraction.len() > decimals.max(1) || nonzero_wei_fraction {
        debug!(%amount, unit = unit.name(), "fractional digits exceed unit precision");
        return Err(UnitsError::PrecisionOverflow {
            input: amount.to_string(),
            unit: unit.name(),
            fraction_digits: fraction.len(),
            decimals: unit.decimals(),
        });
    }

    let fraction = &fraction[..fraction.len().min(decimals)];

    let mut digits = String::with_capacity(amount.integer().len() + decimals);
    digits.push_str(amount.integer());
    digits.push_str(fraction);
    digits.push_str(&"0".repeat(decimals - fraction.len()));
    let digits = match digits.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };

    let signed = if amount.is_negative() { format!("-{digits}") } else { digits.to_owned() };
    let wei = I256::from_dec_str(&signed).map_err(|_| UnitsError::Overflow(signed.clone()))?;
    trace!(%amount, unit = unit.name(), %wei, "converted to wei");
    Ok(wei)
}

/// Converts a whole number of wei into a decimal amount of `unit`.
pub fn from_wei(value: impl Into<NumberLike>, unit: &str) -> Result<String> {
    from_wei_with(value, unit, &ConvertOptions::default())
}

/// [`from_wei`] with output options.
///
/// Accepts the same signed 256-bit range [`to_wei`] produces, so every result
/// converts back to the exact input.
///
/// The fraction never carries trailing zeros and is dropped entirely, point
/// included, when it is zero.
pub fn from_wei_with(
    value: impl Into<NumberLike>,
    unit: &str,
    options: &ConvertOptions,
) -> Result<String> {
    let amount = value.into().to_decimal_string()?;
    if amount.fraction().is_some() {
        debug!(%amount, "rejected fractional wei amount");
        return Err(UnitsError::malformed(&amount.to_string(), "wei amounts must be whole numbers"));
    }
    let wei = amount.to_string();
    I256::from_dec_str(&wei).map_err(|_| UnitsError::Overflow(wei.clone()))?;
    let unit = resolve_unit(unit)?;
    let decimals = unit.decimals() as usize;

    // at least one digit must remain left of the split
    let padded = format!("{:0>width$}", amount.integer(), width = decimals + 1);
    let (integer, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    let integer = match integer.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };

    let mut out = String::with_capacity(padded.len() + padded.len() / 3 + 2);
    if amount.is_negative() {
        out.push('-');
    }
    if options.commify {
        out.push_str(&commify(integer));
    } else {
        out.push_str(integer);
    }
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }

    trace!(%amount, unit = unit.name(), value = %out, "converted from wei");
    Ok(out)
}
