use std::{fmt, path::PathBuf};

use clap::{builder::NonEmptyStringValueParser, ArgAction, Parser, ValueEnum};
use getset::{CopyGetters, Getters};
use serde::Serialize;
use tracing::Level;

use crate::error::Error;

/// Get the current weather and temperature for a city.
#[derive(Parser, Debug)]
#[command(name = "weather", version, about, long_about = None)]
pub struct Cli {
    /// The city name, multiple words are allowed (e.g. New York).
    #[arg(required = true, num_args = 1.., value_parser = NonEmptyStringValueParser::new())]
    pub city: Vec<String>,

    /// Show the temperature in imperial units (Fahrenheit).
    #[arg(short, long)]
    pub imperial: bool,

    /// Path to the secrets file holding the API key.
    #[arg(short, long, default_value = "secrets.toml")]
    pub secrets: PathBuf,

    /// How to print the weather information.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Styled)]
    pub output: OutputFormat,

    /// Increase log verbosity, may be repeated.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn arguments(&self) -> Result<CliArguments, Error> {
        CliArguments::new(self.city.clone(), self.imperial)
    }

    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored single line.
    Styled,
    /// Pretty printed JSON.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    Imperial,
}

impl Units {
    pub fn from_imperial_flag(imperial: bool) -> Self {
        if imperial {
            Units::Imperial
        } else {
            Units::Metric
        }
    }

    /// Value of the `units` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Letter printed after the degree sign.
    pub fn temperature_letter(self) -> char {
        match self {
            Units::Metric => 'C',
            Units::Imperial => 'F',
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

/// Validated city words and unit system for one invocation.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct CliArguments {
    #[getset(get = "pub")]
    city_tokens: Vec<String>,

    #[getset(get_copy = "pub")]
    units: Units,
}

impl CliArguments {
    pub fn new(city_tokens: Vec<String>, imperial: bool) -> Result<Self, Error> {
        if city_tokens.is_empty() {
            return Err(Error::Argument("a city name is required".to_owned()));
        }
        if city_tokens.iter().any(|token| token.trim().is_empty()) {
            return Err(Error::Argument("city name words must not be blank".to_owned()));
        }

        Ok(CliArguments {
            city_tokens,
            units: Units::from_imperial_flag(imperial),
        })
    }
}
