//! Client error types and the H2O error payload

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for talking to an H2O server
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status} for {endpoint}: {message}")]
    Server {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid endpoint '{0}', expected '<METHOD> /path'")]
    InvalidEndpoint(String),

    #[error("invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// Build a `Server` error from a non-2xx response body
    pub fn from_response(endpoint: &str, status: u16, body: &[u8]) -> Self {
        let message = match serde_json::from_slice::<ServerErrorPayload>(body) {
            Ok(payload) => payload.message(),
            Err(_) => String::from_utf8_lossy(body).trim().to_string(),
        };

        ClientError::Server {
            endpoint: endpoint.to_string(),
            status,
            message,
        }
    }

    /// HTTP status of a server-side failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Error body returned by H2O (`H2OErrorV3`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerErrorPayload {
    #[serde(default)]
    pub msg: Option<String>,

    #[serde(default)]
    pub dev_msg: Option<String>,

    #[serde(default)]
    pub exception_msg: Option<String>,
}

impl ServerErrorPayload {
    /// Most specific human-readable message in the payload
    pub fn message(&self) -> String {
        [&self.exception_msg, &self.msg, &self.dev_msg]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| "unknown server error".to_string())
    }
}
