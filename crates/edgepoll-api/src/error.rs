use thiserror::Error;

/// Top-level error type for the `edgepoll-api` crate.
///
/// Enumerates every failure mode a poll can hit: transport, unexpected
/// HTTP status, and response parsing. Clients match on these locally in
/// their `update()` implementations -- no error ever crosses the
/// polling boundary.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, TLS
    /// handshake, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Status ──────────────────────────────────────────────────────
    /// The endpoint answered with a non-success HTTP status.
    #[error("Unexpected HTTP {status} from {path}")]
    Status { status: u16, path: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization or field extraction failed, with the raw
    /// body for debugging.
    #[error("Parse error: {message}")]
    Parse { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the device never answered
    /// (as opposed to answering with something unexpected).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The HTTP status code, if the device answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
