//! Runner configuration from environment variables and command-line flags

use std::env;
use std::path::PathBuf;

use check_core::{LoopOptions, MissingKing, OnMalformed};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}, expected one of: {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Missing value after {0}")]
    MissingArgument(String),

    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RunnerConfig {
    /// Input file; stdin when unset
    pub input: Option<PathBuf>,

    pub output: OutputFormat,

    pub options: LoopOptions,
}

impl RunnerConfig {
    /// Load from `CHECK_*` environment variables, then apply flags from
    /// the process arguments on top.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_lookup(|key| env::var(key).ok())?;
        config.apply_args(env::args().skip(1))?;
        Ok(config)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self {
            input: lookup("CHECK_INPUT").map(PathBuf::from),
            ..Self::default()
        };
        if let Some(v) = lookup("CHECK_ON_MALFORMED") {
            config.options.on_malformed = parse_on_malformed("CHECK_ON_MALFORMED", &v)?;
        }
        if let Some(v) = lookup("CHECK_MISSING_KING") {
            config.options.missing_king = parse_missing_king("CHECK_MISSING_KING", &v)?;
        }
        if let Some(v) = lookup("CHECK_OUTPUT") {
            config.output = parse_output("CHECK_OUTPUT", &v)?;
        }
        Ok(config)
    }

    fn apply_args(&mut self, args: impl IntoIterator<Item = String>) -> Result<(), ConfigError> {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--input" => self.input = Some(PathBuf::from(flag_value(&mut args, &arg)?)),
                "--on-malformed" => {
                    self.options.on_malformed =
                        parse_on_malformed("--on-malformed", &flag_value(&mut args, &arg)?)?
                }
                "--missing-king" => {
                    self.options.missing_king =
                        parse_missing_king("--missing-king", &flag_value(&mut args, &arg)?)?
                }
                "--output" => self.output = parse_output("--output", &flag_value(&mut args, &arg)?)?,
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }
        Ok(())
    }
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, ConfigError> {
    args.next()
        .ok_or_else(|| ConfigError::MissingArgument(flag.to_string()))
}

fn parse_on_malformed(key: &'static str, value: &str) -> Result<OnMalformed, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "abort" => Ok(OnMalformed::Abort),
        "skip" => Ok(OnMalformed::Skip),
        _ => Err(invalid(key, value, "abort, skip")),
    }
}

fn parse_missing_king(key: &'static str, value: &str) -> Result<MissingKing, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "ignore" => Ok(MissingKing::Ignore),
        "error" => Ok(MissingKing::Error),
        _ => Err(invalid(key, value, "ignore, error")),
    }
}

fn parse_output(key: &'static str, value: &str) -> Result<OutputFormat, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(invalid(key, value, "text, json")),
    }
}

fn invalid(key: &'static str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        expected,
    }
}
