//! Errors raised by content backends

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{provider} API error {status}: {body}")]
    Http {
        provider: String,
        status: u16,
        body: String,
    },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Could not parse model output: {0}")]
    Parse(String),
    #[error("Model returned no content")]
    EmptyResponse,
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Parse(e.to_string())
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
