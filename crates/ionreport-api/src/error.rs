use thiserror::Error;

/// Top-level error type for the `ionreport-api` crate.
///
/// Covers every failure mode of the controller REST surface:
/// authentication, transport, API error envelopes, and decoding.
/// `ionreport-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login or token validation failed.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A tenant-scoped call was made before the session learned its tenant.
    #[error("Session is not authenticated -- no tenant bound")]
    NotAuthenticated,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success response, decoded from the `_error` envelope when present.
    #[error("Controller API error (HTTP {status}): {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: u16,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the controller rejected our credentials or token.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::Authentication { .. } | Self::NotAuthenticated => true,
            Self::Api { status, .. } => *status == 401,
            _ => false,
        }
    }
}
