use thiserror::Error;

/// Every failure the tool can hit. None of them is recovered from: the
/// binary prints the message and exits with a non-zero status.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid arguments: {0}")]
    Argument(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("could not parse the server response: {0}")]
    Decode(String),

    #[error("could not encode the weather report: {0}")]
    Encode(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("access denied, check your API key")]
    Unauthorized,

    #[error("could not find weather data for this city")]
    NotFound,

    #[error("something went wrong ({0})")]
    Status(u16),

    #[error("request failed: {0}")]
    Request(String),
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }
}
