/// Convenience alias for results returned by this crate.
pub type Result<T, E = UnitsError> = std::result::Result<T, E>;

/// Everything that can go wrong while parsing or converting an amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitsError {
    /// The unit name is not in the denomination table.
    #[error("unknown unit {0:?}")]
    UnknownUnit(String),
    /// The value is of a kind that cannot be read as a number.
    #[error("invalid number type: {0}")]
    InvalidType(String),
    /// The value is a string that does not follow the decimal grammar.
    #[error("malformed number {input:?}: {reason}")]
    MalformedNumber {
        /// Offending input
        input: String,
        /// What rule it broke
        reason: &'static str,
    },
    /// The value has more fractional digits than the unit can represent.
    #[error(
        "{input:?} has {fraction_digits} fractional digits but unit {unit:?} allows at most {decimals}"
    )]
    PrecisionOverflow {
        /// Offending input
        input: String,
        /// Target unit
        unit: &'static str,
        /// Fractional digits in the input, trailing zeros included
        fraction_digits: usize,
        /// Decimal places of the unit
        decimals: u8,
    },
    /// The exact result does not fit in a signed 256-bit integer.
    #[error("{0:?} does not fit in a signed 256-bit integer")]
    Overflow(String),
}

impl UnitsError {
    pub(crate) fn malformed(input: &str, reason: &'static str) -> Self {
        Self::MalformedNumber { input: input.to_owned(), reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_input() {
        let err = UnitsError::malformed("1..2", "more than one decimal point");
        assert_eq!(err.to_string(), r#"malformed number "1..2": more than one decimal point"#);

        let err = UnitsError::PrecisionOverflow {
            input: "0.0001".to_owned(),
            unit: "kwei",
            fraction_digits: 4,
            decimals: 3,
        };
        assert_eq!(
            err.to_string(),
            r#""0.0001" has 4 fractional digits but unit "kwei" allows at most 3"#
        );

        assert_eq!(UnitsError::UnknownUnit("wei1".to_owned()).to_string(), r#"unknown unit "wei1""#);
    }
}
