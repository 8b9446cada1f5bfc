use std::time::Instant;

use getset::{CopyGetters, Getters};
use reqwest::{Client as HttpClient, ClientBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::{Error, TransportError},
    query::WeatherQuery,
};

/// Current weather for a city, as reported by the provider.
///
/// The temperature unit is not part of the record, it depends on the units
/// the query was built with.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters, Serialize)]
pub struct WeatherRecord {
    #[getset(get = "pub")]
    city_name: String,

    #[getset(get_copy = "pub")]
    condition_code: i64,

    #[getset(get = "pub")]
    description: String,

    #[getset(get_copy = "pub")]
    temperature: f64,
}

impl WeatherRecord {
    pub fn new(
        city_name: impl Into<String>,
        condition_code: i64,
        description: impl Into<String>,
        temperature: f64,
    ) -> Self {
        WeatherRecord {
            city_name: city_name.into(),
            condition_code,
            description: description.into(),
            temperature,
        }
    }

    /// Decodes the provider's JSON body.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        let response: WeatherResponse =
            serde_json::from_str(body).map_err(|e| Error::Decode(e.to_string()))?;

        let Some(weather) = response.weather.into_iter().next() else {
            return Err(Error::Decode("response has no weather conditions".to_owned()));
        };

        Ok(WeatherRecord {
            city_name: response.name,
            condition_code: weather.id,
            description: weather.description,
            temperature: response.main.temp,
        })
    }
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    name: String,
    weather: Vec<Weather>,
    main: MainWeather,
}

#[derive(Debug, Deserialize)]
struct Weather {
    id: i64,
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainWeather {
    temp: f64,
}

pub struct Client {
    client: HttpClient,
}

impl Client {
    pub fn new() -> Result<Self, Error> {
        let client = ClientBuilder::new()
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(Client { client })
    }

    /// Issues a single GET for `query`. Any failure is final, there is no retry.
    pub async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherRecord, Error> {
        let started = Instant::now();

        let response = self
            .client
            .get(query.url().clone())
            .send()
            .await
            .map_err(|e| TransportError::Request(e.without_url().to_string()))?;

        let status = response.status();
        debug!(
            status = status.as_u16(),
            city = %query.city(),
            elapsed = ?started.elapsed(),
            "weather response received"
        );

        // At the default level stderr carries only the returned error.
        if let Some(error) = status_error(status) {
            info!(status = status.as_u16(), city = %query.city(), "weather request rejected");
            return Err(error.into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.without_url().to_string()))?;

        WeatherRecord::from_json(&body)
    }
}

fn status_error(status: StatusCode) -> Option<TransportError> {
    match status {
        StatusCode::UNAUTHORIZED => Some(TransportError::Unauthorized),
        StatusCode::NOT_FOUND => Some(TransportError::NotFound),
        status if !status.is_success() => Some(TransportError::Status(status.as_u16())),
        _ => None,
    }
}
