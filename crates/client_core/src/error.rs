use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid server url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        source: reqwest::Error,
    },
    #[error("{endpoint} returned {status}: {body}")]
    Rejected {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("malformed {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        source: serde_json::Error,
    },
}

impl GatewayError {
    /// Text shown to the annotator: the server's own body when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Rejected { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Rejected { status, .. } => Some(*status),
            GatewayError::Transport { source, .. } => source.status(),
            GatewayError::InvalidUrl { .. } | GatewayError::Decode { .. } => None,
        }
    }
}
