//! Entrypoint.

use clap::Parser;
use config::{Command, Opts};
use dotenvy::dotenv;
use eyre::WrapErr;
use serde::Serialize;
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

/// One line of output, printed as text or as a JSON object.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Output {
    Conversion { input: String, unit: &'static str, result: String },
    Normalized { input: String, result: String },
    Units(Vec<UnitRow>),
}

#[derive(Debug, Serialize)]
struct UnitRow {
    name: &'static str,
    decimals: u8,
    multiplier: String,
}

fn main() -> eyre::Result<()> {
    if let Ok(custom_env_file) = std::env::var("ENV_FILE") {
        dotenvy::from_filename(custom_env_file)?;
    } else {
        // Try the default .env file, and ignore if it doesn't exist.
        dotenv().ok();
    }

    let opts = Opts::parse();
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(opts.log_level).into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    debug!(command = ?opts.command, json = opts.json, "running");

    let output = render(&opts.command)?;
    if opts.json {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        print_text(&output);
    }
    Ok(())
}

fn render(command: &Command) -> eyre::Result<Output> {
    match command {
        Command::ToWei { value, unit } => {
            let wei = units::to_wei(value.as_str(), unit.unit.name())
                .wrap_err_with(|| format!("failed to convert {value} {} to wei", unit.unit))?;
            Ok(Output::Conversion { input: value.clone(), unit: unit.unit.name(), result: wei.to_string() })
        }
        Command::FromWei { value, unit, .. } => {
            let result =
                units::from_wei_with(value.as_str(), unit.unit.name(), &command.convert_options())
                    .wrap_err_with(|| format!("failed to convert {value} wei to {}", unit.unit))?;
            Ok(Output::Conversion { input: value.clone(), unit: unit.unit.name(), result })
        }
        Command::Normalize { value } => {
            let result = units::number_to_string(value.as_str())
                .wrap_err_with(|| format!("failed to normalize {value}"))?;
            Ok(Output::Normalized { input: value.clone(), result })
        }
        Command::Units => Ok(Output::Units(
            units::UNITS
                .iter()
                .map(|unit| UnitRow {
                    name: unit.name(),
                    decimals: unit.decimals(),
                    multiplier: unit.multiplier_str(),
                })
                .collect(),
        )),
    }
}

fn print_text(output: &Output) {
    match output {
        Output::Conversion { result, .. } | Output::Normalized { result, .. } => {
            println!("{result}")
        }
        Output::Units(rows) => {
            for row in rows {
                println!("{:<12} {:>2}  {}", row.name, row.decimals, row.multiplier);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Command {
        Opts::try_parse_from(std::iter::once("sophy-units").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn renders_conversions_as_json() {
        let output = render(&parse(&["to-wei", "1.5", "-u", "gwei"])).unwrap();
        assert_eq!(
            serde_json::to_string(&output).unwrap(),
            r#"{"input":"1.5","unit":"gwei","result":"1500000000"}"#
        );

        let output = render(&parse(&["from-wei", "10000000", "-u", "wei", "--commify"])).unwrap();
        assert!(matches!(output, Output::Conversion { ref result, .. } if result == "10,000,000"));
    }

    #[test]
    fn reports_failures_with_context() {
        let err = render(&parse(&["to-wei", "1.0001", "-u", "kwei"])).unwrap_err();
        assert!(err.to_string().contains("failed to convert 1.0001 kwei to wei"));

        assert!(render(&parse(&["normalize", "1..2"])).is_err());
    }

    #[test]
    fn lists_every_unit() {
        let Output::Units(rows) = render(&Command::Units).unwrap() else {
            panic!("expected unit rows");
        };
        assert_eq!(rows.len(), units::UNITS.len());
        assert_eq!(rows[0].multiplier, "1");
    }
}
