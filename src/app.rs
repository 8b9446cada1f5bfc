use std::io;

use tracing::{info, subscriber, Level};
use tracing_subscriber::FmtSubscriber;

use crate::{
    cli::{Cli, OutputFormat},
    config::ProviderSettings,
    display,
    error::Error,
    query::WeatherQuery,
    weather_client::Client,
};

/// Reads the secrets file, fetches the weather for the requested city and
/// prints it to stdout.
pub async fn run(cli: Cli) -> Result<(), Error> {
    let arguments = cli.arguments()?;
    let settings = ProviderSettings::load(&cli.secrets)?;

    let query = WeatherQuery::build(
        settings.endpoint(),
        arguments.city_tokens(),
        arguments.units(),
        settings.credentials(),
    );
    info!(city = %query.city(), units = %query.units(), "fetching current weather");

    let client = Client::new()?;
    let record = client.current_weather(&query).await?;

    match cli.output {
        OutputFormat::Styled => print!("{}", display::render(&record, query.units())),
        OutputFormat::Json => println!("{}", display::render_json(&record, query.units())?),
    }

    Ok(())
}

/// Logs go to stderr, stdout is reserved for the weather output.
pub fn init_tracing(level: Level) {
    let fmt_subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();

    if subscriber::set_global_default(fmt_subscriber).is_err() {
        eprintln!("a tracing subscriber is already installed");
    }
}
