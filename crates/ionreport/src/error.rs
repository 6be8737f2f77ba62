//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use ionreport_core::CoreError;

/// Process exit codes. Every fatal path exits nonzero.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(ionreport::connection_failed),
        help(
            "Check network access to the controller.\n\
             URL: {url}\n\
             Override it with --controller or IONREPORT_CONTROLLER."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(ionreport::timeout),
        help("Increase the timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(ionreport::auth_failed),
        help(
            "Check the auth token passed via --token, --authtokenfile,\n\
             X_AUTH_TOKEN or AUTH_TOKEN."
        )
    )]
    AuthFailed { message: String },

    #[error("Interactive login failed after {attempts} attempt(s)")]
    #[diagnostic(
        code(ionreport::login_exhausted),
        help("Raise the limit with --max-login-attempts, or authenticate with a token.")
    )]
    LoginAttemptsExhausted { attempts: u32 },

    #[error("No auth token found and stdin is not a terminal")]
    #[diagnostic(
        code(ionreport::no_credentials),
        help("Pass --token or --authtokenfile, or set X_AUTH_TOKEN / AUTH_TOKEN.")
    )]
    NonInteractiveLogin,

    #[error("Could not read auth token file {path}")]
    #[diagnostic(code(ionreport::token_file))]
    TokenFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ── Report ───────────────────────────────────────────────────────
    #[error("No display name known for identifier '{id}'")]
    #[diagnostic(
        code(ionreport::unresolved_name),
        help("The controller inventory changed during the run, or an interface listing failed.")
    )]
    UnresolvedName { id: String },

    #[error("Malformed extension '{extension}' on element {element_id}: {reason}")]
    #[diagnostic(code(ionreport::malformed_extension))]
    MalformedExtension {
        element_id: String,
        extension: String,
        reason: String,
    },

    #[error("Failed to fetch extensions for element {element_id}: {reason}")]
    #[diagnostic(
        code(ionreport::extension_fetch),
        help("Run without --strict to skip unreadable elements and report them as warnings.")
    )]
    ExtensionFetch { element_id: String, reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(ionreport::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ionreport::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(ionreport::config))]
    Config(Box<figment::Error>),

    // ── IO ───────────────────────────────────────────────────────────
    #[error("Failed to write report: {0}")]
    #[diagnostic(code(ionreport::output))]
    Output(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. }
            | Self::LoginAttemptsExhausted { .. }
            | Self::NonInteractiveLogin
            | Self::TokenFile { .. } => exit_code::AUTH,
            Self::Validation { .. } | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout => CliError::Timeout,

            CoreError::UnresolvedName { id } => CliError::UnresolvedName { id },

            CoreError::MalformedExtension {
                element_id,
                extension,
                reason,
            } => CliError::MalformedExtension {
                element_id,
                extension,
                reason,
            },

            CoreError::ExtensionFetch { element_id, reason } => {
                CliError::ExtensionFetch { element_id, reason }
            }

            CoreError::Api {
                message,
                code,
                status,
            } => CliError::ApiError {
                code: code
                    .or_else(|| status.map(|s| format!("HTTP {s}")))
                    .unwrap_or_else(|| "unknown".into()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Csv(e) => CliError::Output(e.to_string()),

            CoreError::Io(e) => CliError::Io(e),

            CoreError::Internal(message) => CliError::ApiError {
                code: "internal".into(),
                message,
            },
        }
    }
}
