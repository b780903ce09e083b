use std::{collections::HashMap, fmt, str::FromStr, sync::LazyLock};

use alloy_primitives::U256;

use crate::{Result, UnitsError};

/// A named denomination and the number of decimal places between it and `wei`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Unit {
    name: &'static str,
    decimals: u8,
}

impl Unit {
    const fn new(name: &'static str, decimals: u8) -> Self {
        Self { name, decimals }
    }

    /// Name of the unit as it appears in the table.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of base-unit digits per whole unit.
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Amount of wei in one whole unit, i.e. `10^decimals`.
    pub fn multiplier(&self) -> U256 {
        U256::from(10u8).pow(U256::from(self.decimals))
    }

    /// The multiplier written out in decimal, `"1"` followed by `decimals` zeros.
    pub fn multiplier_str(&self) -> String {
        format!("1{}", "0".repeat(self.decimals as usize))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for Unit {
    type Err = UnitsError;

    fn from_str(s: &str) -> Result<Self> {
        resolve_unit(s).copied()
    }
}

/// Every known denomination, ordered by exponent. Aliases are separate entries.
pub static UNITS: [Unit; 26] = [
    Unit::new("wei", 0),
    Unit::new("kwei", 3),
    Unit::new("Kwei", 3),
    Unit::new("babbage", 3),
    Unit::new("femtosophy", 3),
    Unit::new("mwei", 6),
    Unit::new("Mwei", 6),
    Unit::new("lovelace", 6),
    Unit::new("picosophy", 6),
    Unit::new("gwei", 9),
    Unit::new("Gwei", 9),
    Unit::new("shannon", 9),
    Unit::new("nanosophy", 9),
    Unit::new("nano", 9),
    Unit::new("szabo", 12),
    Unit::new("microsophy", 12),
    Unit::new("micro", 12),
    Unit::new("finney", 15),
    Unit::new("millisophy", 15),
    Unit::new("milli", 15),
    Unit::new("sophy", 18),
    Unit::new("ksophy", 21),
    Unit::new("grand", 21),
    Unit::new("msophy", 24),
    Unit::new("gsophy", 27),
    Unit::new("tsophy", 30),
];

static UNIT_INDEX: LazyLock<HashMap<&'static str, &'static Unit>> =
    LazyLock::new(|| UNITS.iter().map(|unit| (unit.name, unit)).collect());

/// Look up a unit by its exact, case-sensitive name.
pub fn resolve_unit(name: &str) -> Result<&'static Unit> {
    UNIT_INDEX.get(name).copied().ok_or_else(|| UnitsError::UnknownUnit(name.to_owned()))
}

/// Iterate the table in order, for listing valid names.
pub fn unit_map() -> impl Iterator<Item = (&'static str, u8)> {
    UNITS.iter().map(|unit| (unit.name, unit.decimals))
}
