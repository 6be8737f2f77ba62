// ── Runtime connection configuration ──
//
// These types describe *how* to reach a controller and who to log in as.
// They carry credential data and connection tuning, but never touch disk.
// The binary constructs a `ControllerConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Default controller endpoint.
pub const DEFAULT_CONTROLLER_URL: &str = "https://api.elcapitan.cloudgenix.com";

/// How to authenticate with a controller.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// Static auth token, sent as `X-Auth-Token`.
    Token(SecretString),
    /// Interactive email/password login.
    Login {
        email: String,
        password: SecretString,
    },
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict). The controller is a public cloud service.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification.
    DangerAcceptInvalid,
}

/// Configuration for connecting to a controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller URL (e.g., `https://api.elcapitan.cloudgenix.com`).
    pub url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ControllerConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}
