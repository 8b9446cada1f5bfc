//! Terminal rendering of a [`WeatherRecord`].
//!
//! Condition codes follow the provider's groups
//! (<https://openweathermap.org/weather-conditions>): 2xx thunderstorm,
//! 3xx drizzle, 5xx rain, 6xx snow, 7xx atmosphere, 800 clear, 80x clouds.

use std::ops::Range;

use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::{cli::Units, error::Error, weather_client::WeatherRecord};

/// Width the city name and the description are centered in.
pub const PADDING: usize = 20;

/// Terminal color applied to one block of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Red,
    Blue,
    Cyan,
    Yellow,
    White,
    Green,
    /// Terminal default, no escape codes.
    Plain,
}

impl Paint {
    /// Styles `text` and resets right after it, so no color leaks into
    /// whatever is printed next.
    pub fn apply(self, text: &str) -> ColoredString {
        match self {
            Paint::Red => text.red().bold(),
            Paint::Blue => text.blue().bold(),
            Paint::Cyan => text.cyan().bold(),
            Paint::Yellow => text.yellow().bold(),
            Paint::White => text.white(),
            Paint::Green => text.green().bold(),
            Paint::Plain => text.normal(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Cloudy,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayParams {
    pub symbol: &'static str,
    pub paint: Paint,
}

// First match wins.
const CONDITIONS: [(Range<i64>, Condition); 7] = [
    (200..300, Condition::Thunderstorm),
    (300..400, Condition::Drizzle),
    (500..600, Condition::Rain),
    (600..700, Condition::Snow),
    (700..800, Condition::Atmosphere),
    (800..801, Condition::Clear),
    (801..900, Condition::Cloudy),
];

impl Condition {
    pub fn from_code(code: i64) -> Self {
        CONDITIONS
            .iter()
            .find(|(range, _)| range.contains(&code))
            .map_or(Condition::Unknown, |(_, condition)| *condition)
    }

    pub fn display_params(self) -> DisplayParams {
        let (symbol, paint) = match self {
            Condition::Thunderstorm => ("🌩", Paint::Red),
            Condition::Drizzle => ("☔", Paint::Cyan),
            Condition::Rain => ("💧", Paint::Blue),
            Condition::Snow => ("❄", Paint::White),
            Condition::Atmosphere => ("🌌", Paint::Blue),
            Condition::Clear => ("☀", Paint::Yellow),
            Condition::Cloudy => ("☁", Paint::White),
            Condition::Unknown => ("🌡", Paint::Plain),
        };
        DisplayParams { symbol, paint }
    }
}

pub fn display_params(condition_code: i64) -> DisplayParams {
    Condition::from_code(condition_code).display_params()
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn center(text: &str) -> String {
    format!("{:^width$}", text, width = PADDING)
}

/// Renders the one-line summary, newline included.
pub fn render(record: &WeatherRecord, units: Units) -> String {
    let params = display_params(record.condition_code());

    let city = Paint::Green.apply(&center(record.city_name()));
    let conditions = params.paint.apply(&format!(
        "\t{} {} ",
        params.symbol,
        center(&capitalize(record.description()))
    ));

    format!(
        "{}{}({}°{})\n",
        city,
        conditions,
        record.temperature(),
        units.temperature_letter()
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    record: &'a WeatherRecord,
    units: Units,
}

pub fn render_json(record: &WeatherRecord, units: Units) -> Result<String, Error> {
    serde_json::to_string_pretty(&JsonReport { record, units })
        .map_err(|e| Error::Encode(e.to_string()))
}
