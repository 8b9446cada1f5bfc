use std::{fmt, fs, path::Path};

use getset::Getters;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::error::Error;

pub const BASE_WEATHER_API_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

const PROVIDER_SECTION: &str = "openweather";

/// The provider API key. Opaque, never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    api_key: String,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        ApiCredentials {
            api_key: api_key.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Everything read from the `[openweather]` section of the secrets file.
#[derive(Debug, Clone, Getters)]
pub struct ProviderSettings {
    #[getset(get = "pub")]
    credentials: ApiCredentials,

    #[getset(get = "pub")]
    endpoint: Url,
}

#[derive(Deserialize)]
struct SecretsFile {
    openweather: Option<ProviderSection>,
}

#[derive(Deserialize)]
struct ProviderSection {
    api_key: Option<String>,
    endpoint: Option<String>,
}

impl ProviderSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "failed to read secrets file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!(path = %path.display(), "loaded secrets file");

        Self::from_toml(&content)
            .map_err(|e| Error::configuration(format!("{} ({})", message_of(&e), path.display())))
    }

    pub fn from_toml(content: &str) -> Result<Self, Error> {
        let secrets: SecretsFile = toml::from_str(content)
            .map_err(|e| {
                Error::configuration(format!(
                    "failed to parse secrets file, values must be quoted \
                     (api_key = \"<your-api-key>\"): {}",
                    e.message()
                ))
            })?;

        let Some(section) = secrets.openweather else {
            return Err(Error::configuration(format!(
                "missing [{PROVIDER_SECTION}] section"
            )));
        };

        let api_key = match section.api_key {
            Some(key) if !key.trim().is_empty() => key,
            Some(_) => {
                return Err(Error::configuration(format!(
                    "api_key in [{PROVIDER_SECTION}] is empty"
                )))
            }
            None => {
                return Err(Error::configuration(format!(
                    "missing api_key in [{PROVIDER_SECTION}] section"
                )))
            }
        };

        let endpoint = section
            .endpoint
            .as_deref()
            .unwrap_or(BASE_WEATHER_API_URL);
        let endpoint = Url::parse(endpoint).map_err(|e| {
            Error::configuration(format!("invalid endpoint {:?}: {}", endpoint, e))
        })?;

        Ok(ProviderSettings {
            credentials: ApiCredentials::new(api_key),
            endpoint,
        })
    }
}

fn message_of(error: &Error) -> String {
    match error {
        Error::Configuration(message) => message.clone(),
        other => other.to_string(),
    }
}
