use std::fmt;

use getset::{CopyGetters, Getters};
use itertools::Itertools;
use reqwest::Url;

use crate::{cli::Units, config::ApiCredentials};

/// A fully encoded current-weather request URL.
///
/// The query string is form encoded, so spaces in the city name become `+`
/// and reserved characters are percent escaped. The `appid` parameter is
/// always last.
#[derive(Clone, Getters, CopyGetters)]
pub struct WeatherQuery {
    url: Url,

    #[getset(get = "pub")]
    city: String,

    #[getset(get_copy = "pub")]
    units: Units,
}

impl WeatherQuery {
    pub fn build(
        endpoint: &Url,
        city_tokens: &[String],
        units: Units,
        credentials: &ApiCredentials,
    ) -> Self {
        let city = city_tokens.iter().join(" ");

        let mut url = endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("q", &city)
            .append_pair("units", units.as_query())
            .append_pair("appid", credentials.api_key());

        WeatherQuery { url, city, units }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

// The URL carries the API key, keep it out of logs.
impl fmt::Debug for WeatherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherQuery")
            .field("city", &self.city)
            .field("units", &self.units)
            .finish_non_exhaustive()
    }
}
