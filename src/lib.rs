//! Looks up the current weather of a city on OpenWeather and prints it as a
//! single color-coded terminal line.
//!
//! The pipeline is strictly sequential: [`cli`] arguments and the
//! [`config`] secrets file feed [`query::WeatherQuery`], which
//! [`weather_client::Client`] fetches once, and [`display`] renders.

pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod query;
pub mod weather_client;

pub use error::{Error, TransportError};
