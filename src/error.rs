use reqwest::StatusCode;
use thiserror::Error;

/// Why a single poll cycle failed.
#[derive(Error, Debug)]
pub enum PollError {
    /// Transport failure or timeout talking to `url`.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The quote source answered, but not with a success status.
    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("response from {url} exceeded {limit} bytes")]
    BodyTooLarge { url: String, limit: usize },

    /// The quote source body was not a JSON array of quote records.
    #[error("could not decode quotes from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("quote source {url} returned no quotes")]
    Empty { url: String },
}

impl PollError {
    pub(crate) fn network(url: &url::Url, source: reqwest::Error) -> Self {
        PollError::Network {
            url: url.to_string(),
            source,
        }
    }
}
