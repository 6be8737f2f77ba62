//! CLI-owned configuration: the optional TOML file, environment overrides,
//! and translation to `ionreport_core::ControllerConfig`.
//!
//! Core never sees these types -- it receives a pre-built `ControllerConfig`.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use ionreport_core::{ControllerConfig, DEFAULT_CONTROLLER_URL, DEFAULT_CSV_FILE, TlsVerification};

use crate::cli::Cli;
use crate::error::CliError;

// ── TOML config struct ───────────────────────────────────────────────

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Controller base URL.
    #[serde(default = "default_controller")]
    pub controller: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Output file used when --csvfile is not given.
    pub csvfile: Option<PathBuf>,

    #[serde(default = "default_max_login_attempts")]
    pub max_login_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            controller: default_controller(),
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
            csvfile: None,
            max_login_attempts: default_max_login_attempts(),
        }
    }
}

fn default_controller() -> String {
    DEFAULT_CONTROLLER_URL.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_max_login_attempts() -> u32 {
    3
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "ionreport", "ionreport").map_or_else(
        || PathBuf::from(".ionreport.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the config from defaults, then the file, then `IONREPORT_*` env vars.
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("IONREPORT_"));

    Ok(figment.extract()?)
}

// ── Settings resolution ──────────────────────────────────────────────

/// Everything the run needs, after flags have been layered over config.
#[derive(Debug)]
pub struct Settings {
    pub controller: ControllerConfig,
    pub csv_file: PathBuf,
    pub max_login_attempts: u32,
    pub strict: bool,
}

/// Layer CLI flags over the loaded config. Flags win.
pub fn resolve_settings(cli: &Cli, config: &Config) -> Result<Settings, CliError> {
    // 1. Controller URL (flag/env > file > default)
    let url_str = cli.controller.as_deref().unwrap_or(&config.controller);
    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "controller".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    // 2. TLS verification
    let tls = if cli.insecure || config.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = config.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    // 3. Timeout
    let secs = cli.timeout.unwrap_or(config.timeout);
    if secs == 0 {
        return Err(CliError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    // 4. Login attempts
    let max_login_attempts = cli.max_login_attempts.unwrap_or(config.max_login_attempts);
    if max_login_attempts == 0 {
        return Err(CliError::Validation {
            field: "max_login_attempts".into(),
            reason: "must be at least 1".into(),
        });
    }

    let csv_file = cli
        .csv_file
        .clone()
        .or_else(|| config.csvfile.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_FILE));

    Ok(Settings {
        controller: ControllerConfig {
            url,
            tls,
            timeout: Duration::from_secs(secs),
        },
        csv_file,
        max_login_attempts,
        strict: cli.strict,
    })
}
