/// Failures surfaced while talking to the server under test.
///
/// Probes never propagate these past their own boundary; they are rendered
/// into a failed finding with their `Display` text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("unsupported endpoint '{0}': expected an http or https URL")]
    UnsupportedEndpoint(String),

    /// Connection refused, DNS failure, timeout, or a broken body stream
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
