//! Command line and environment configuration for `sophy-units`.
use clap::{Parser, Subcommand};
use tracing::Level;
use units::{ConvertOptions, Unit};

/// Denomination selection shared by the conversion commands
#[derive(Debug, Clone, Parser)]
pub struct UnitOpts {
    /// Denomination of the human-scaled amount
    #[clap(long, short, env = "SOPHY_UNIT", default_value = "sophy")]
    pub unit: Unit,
}

/// Subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Convert an amount of `--unit` into wei
    ToWei {
        /// Decimal amount, e.g. `1.5` or `-0.25`
        #[clap(allow_hyphen_values = true)]
        value: String,
        /// Source denomination
        #[clap(flatten)]
        unit: UnitOpts,
    },
    /// Convert a whole number of wei into `--unit`
    FromWei {
        /// Integer amount of wei
        #[clap(allow_hyphen_values = true)]
        value: String,
        /// Target denomination
        #[clap(flatten)]
        unit: UnitOpts,
        /// Insert `,` separators into the integer part
        #[clap(long, env = "SOPHY_COMMIFY")]
        commify: bool,
    },
    /// Print the canonical form of a decimal amount
    Normalize {
        /// Decimal amount
        #[clap(allow_hyphen_values = true)]
        value: String,
    },
    /// List every known denomination
    Units,
}

impl Command {
    /// Output options implied by the command's flags.
    pub const fn convert_options(&self) -> ConvertOptions {
        match self {
            Self::FromWei { commify, .. } => ConvertOptions { commify: *commify },
            _ => ConvertOptions { commify: false },
        }
    }
}

/// CLI options for sophy-units
#[derive(Debug, Clone, Parser)]
#[clap(name = "sophy-units", version, about = "Exact conversions between wei and sophy denominations")]
pub struct Opts {
    /// Maximum log level written to stderr when `RUST_LOG` is unset
    #[clap(long, env = "SOPHY_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: Level,

    /// Print results as JSON objects
    #[clap(long, env = "SOPHY_JSON", global = true)]
    pub json: bool,

    /// Command to run
    #[clap(subcommand)]
    pub command: Command,
}
