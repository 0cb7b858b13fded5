use thiserror::Error;

/// Top-level error type for the `lmsync-api` crate.
///
/// Covers the wire-level failure modes: transport, URL construction, the
/// REST API's embedded-status envelope, and response decoding.
/// `lmsync-core` maps these into domain-level diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport failure (connection refused, DNS failure, TLS, ...).
    /// Never retried; carries the endpoint that was being called.
    #[error("REST API call to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failed to construct the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── API ─────────────────────────────────────────────────────────
    /// A lookup endpoint reported a non-success status (embedded in the
    /// response envelope for versionless GETs, HTTP-level otherwise).
    #[error("API error on {path} (status {status}): {message}")]
    Api {
        path: String,
        status: i64,
        message: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A request payload could not be serialized to JSON.
    #[error("Payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn transport(path: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            path: path.to_owned(),
            source,
        }
    }
}
