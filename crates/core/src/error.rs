#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("address query is empty")]
    InvalidQuery,
    #[error("no match for \"{0}\"")]
    NoMatch(String),
    #[error("user location is not known yet")]
    NoUserLocation,
    #[error("no marker to route to")]
    NoMarker,
    #[error("invalid service url: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{service} responded with an error: {message}")]
    Service {
        service: &'static str,
        message: String,
    },
    #[error("malformed response: {0}")]
    InvalidResponse(String),
    #[error("a newer request replaced this one")]
    Superseded,
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
