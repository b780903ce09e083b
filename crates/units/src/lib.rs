//! Exact conversions between `wei` and the named sophy denominations.
//!
//! Amounts are shifted as decimal digit strings and only then parsed into
//! [`I256`](alloy_primitives::I256), so no step ever goes through binary
//! floating point.
//!
//! ```
//! use units::{from_wei, to_wei};
//!
//! assert_eq!(to_wei("1.5", "gwei").unwrap().to_string(), "1500000000");
//! assert_eq!(from_wei(1_500_000_000u64, "gwei").unwrap(), "1.5");
//! ```

/// Wei ⇄ denomination conversion
pub mod convert;
/// Unit conversion errors
pub mod error;
/// Output formatting helpers
pub mod format;
/// Number-like inputs and the decimal string parser
pub mod number;
/// The denomination table
pub mod unit;

pub use convert::{ConvertOptions, from_wei, from_wei_with, to_wei};
pub use error::{Result, UnitsError};
pub use format::commify;
pub use number::{DecimalString, NumberLike, number_to_string};
pub use unit::{UNITS, Unit, resolve_unit, unit_map};
