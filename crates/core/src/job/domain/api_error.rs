use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("unable to open {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode job config: {0}")]
    EncodeConfig(#[source] serde_json::Error),
    #[error("failed to build {part} part: {source}")]
    BuildPart {
        part: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status} {reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
        body: String,
        headers: Vec<(String, String)>,
    },
    #[error("invalid JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no job id in response: {body}")]
    MissingJobId { body: String },
}

impl ApiError {
    /// Response headers, when the server answered with an error status.
    pub fn headers(&self) -> &[(String, String)] {
        match self {
            ApiError::Status { headers, .. } => headers,
            _ => &[],
        }
    }
}
