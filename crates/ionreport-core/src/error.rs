// ── Core error types ──
//
// User-facing errors from ionreport-core. Consumers never see HTTP status
// codes or JSON parse failures directly: the `From<ionreport_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Controller request timed out")]
    Timeout,

    // ── Report errors ────────────────────────────────────────────────
    /// An identifier referenced by a report row is missing from the name map.
    #[error("No display name known for identifier '{id}'")]
    UnresolvedName { id: String },

    /// An included extension lacks a field the report needs.
    #[error("Malformed extension '{extension}' on element {element_id}: {reason}")]
    MalformedExtension {
        element_id: String,
        extension: String,
        reason: String,
    },

    /// Fetching one element's extensions failed while running in strict mode.
    #[error("Failed to fetch extensions for element {element_id}: {reason}")]
    ExtensionFetch { element_id: String, reason: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// The controller's error code (e.g., "ELEMENT_NOT_FOUND").
        code: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Output errors ────────────────────────────────────────────────
    #[error("Failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<ionreport_api::Error> for CoreError {
    fn from(err: ionreport_api::Error) -> Self {
        if err.is_auth_failure() {
            let message = match err {
                ionreport_api::Error::Authentication { message }
                | ionreport_api::Error::Api { message, .. } => message,
                _ => "session is not bound to a tenant".into(),
            };
            return CoreError::AuthenticationFailed { message };
        }

        match err {
            ionreport_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            ionreport_api::Error::NotAuthenticated => CoreError::AuthenticationFailed {
                message: "session is not bound to a tenant".into(),
            },
            ionreport_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            ionreport_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ionreport_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ionreport_api::Error::Api {
                message,
                code,
                status,
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
            },
            ionreport_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
