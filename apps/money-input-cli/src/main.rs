//! # money-input-cli
//!
//! Drives a masked field from the terminal.
//!
//! ## Usage
//! ```bash
//! # Type 123456, then backspace: one JSON line per keystroke
//! money-input-cli type 123456 "<"
//!
//! # Tap at offset 5 and delete backwards
//! money-input-cli type 123456 @5 "<"
//!
//! # Format minor units for a locale
//! money-input-cli --locale de_DE format 123456
//!
//! # Read the amount back out of a label
//! money-input-cli extract '1.234,56 €'
//! ```
//!
//! ## Options
//! - `--locale <ID>`: field locale (default: config, then `LANG`, then en_US)
//! - `--config <PATH>`: mask.toml to load instead of the platform default
//!
//! Logs go to stderr; set `RUST_LOG=money_input=trace` for per-edit detail.

mod error;
mod script;

use money_input_core::{AmountCodec, BuiltinProvider, FormattingProvider};
use money_input_field::MaskConfig;
use serde_json::json;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, ErrorReport};
use crate::script::{Session, Step};

const USAGE: &str = "\
money-input-cli - masked money field driver

Usage: money-input-cli [OPTIONS] <COMMAND>

Commands:
  type <TOKENS>...   Replay keystrokes (digits, +paste, <, >, @N, ^)
  format <MINOR>     Format an amount given in minor units
  extract <LABEL>    Extract the amount from a formatted label

Options:
  -l, --locale <ID>    Locale identifier, e.g. de_DE
  -c, --config <PATH>  Config file (default: platform config dir)
  -h, --help           Show this help message";

#[derive(Debug, Default)]
struct Args {
    locale: Option<String>,
    config: Option<PathBuf>,
    command: Vec<String>,
}

fn main() -> ExitCode {
    init_tracing();

    match run(env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match serde_json::to_string(&ErrorReport::from(&err)) {
                Ok(line) => println!("{}", line),
                Err(_) => eprintln!("{}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,money_input=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(raw: Vec<String>) -> Result<(), CliError> {
    let Some(args) = parse_args(raw)? else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = MaskConfig::load(args.config.clone())?;
    info!(locale = %config.default_locale(), "Configuration loaded");

    let (command, rest) = args
        .command
        .split_first()
        .ok_or_else(|| CliError::Usage("missing command; see --help".into()))?;

    match command.as_str() {
        "type" => {
            let steps = rest
                .iter()
                .map(|token| token.parse::<Step>())
                .collect::<Result<Vec<_>, _>>()?;
            let mut session = Session::new(config, args.locale);
            for step in &steps {
                for report in session.run(step) {
                    println!("{}", serde_json::to_string(&report)?);
                }
            }
        }
        "format" => {
            let minor: u64 = single(rest, "format <MINOR>")?
                .parse()
                .map_err(|_| CliError::Usage("format expects an integer of minor units".into()))?;
            let codec = AmountCodec::new(BuiltinProvider::with_default_locale(
                config.default_locale(),
            ));
            let locale = codec.provider().resolve_locale(args.locale.as_deref());
            let text = codec.mask(minor.into(), &locale);
            let line = json!({ "locale": locale.to_string(), "amount": minor, "text": text });
            println!("{}", line);
        }
        "extract" => {
            let label = single(rest, "extract <LABEL>")?;
            let amount = money_input_core::extract_value(label);
            println!("{}", json!({ "label": label, "amount": amount }));
        }
        other => {
            return Err(CliError::Usage(format!("unknown command {:?}", other)));
        }
    }

    Ok(())
}

/// Parses options. `Ok(None)` means help was requested.
fn parse_args(raw: Vec<String>) -> Result<Option<Args>, CliError> {
    let mut args = Args::default();
    let mut iter = raw.into_iter();

    while let Some(arg) = iter.next() {
        if !args.command.is_empty() {
            args.command.push(arg);
            continue;
        }
        match arg.as_str() {
            "--locale" | "-l" => {
                args.locale = Some(
                    iter.next()
                        .ok_or_else(|| CliError::Usage("--locale needs a value".into()))?,
                );
            }
            "--config" | "-c" => {
                let path = iter
                    .next()
                    .ok_or_else(|| CliError::Usage("--config needs a path".into()))?;
                args.config = Some(PathBuf::from(path));
            }
            "--help" | "-h" => return Ok(None),
            _ => args.command.push(arg),
        }
    }

    Ok(Some(args))
}

fn single<'a>(rest: &'a [String], usage: &str) -> Result<&'a str, CliError> {
    match rest {
        [value] => Ok(value.as_str()),
        _ => Err(CliError::Usage(format!("usage: {}", usage))),
    }
}
