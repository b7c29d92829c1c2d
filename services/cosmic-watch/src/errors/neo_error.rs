use thiserror::Error;

/// Failures of the feed pipeline: fetching, decoding and scoring.
#[derive(Debug, Error)]
pub enum NeoError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("upstream responded with status {status}")]
    UpstreamStatus { status: u16 },

    #[error("malformed feed payload: {0}")]
    Decode(String),

    #[error("invalid {field}: {value:?} is not a number")]
    Validation { field: &'static str, value: String },
}

impl NeoError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn validation(field: &'static str, value: impl Into<String>) -> Self {
        Self::Validation {
            field,
            value: value.into(),
        }
    }
}
