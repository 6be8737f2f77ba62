//! Credential selection and the login flow.
//!
//! Token sources are tried in order (flag, file, `X_AUTH_TOKEN`,
//! `AUTH_TOKEN`); only when none yields a non-empty value does the
//! interactive email/password prompt run.

use std::fmt;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use dialoguer::{Input, Password};
use secrecy::SecretString;
use tracing::{info, warn};

use ionreport_core::{AuthCredentials, Controller, CoreError};

use crate::error::CliError;

/// Environment variables consulted for a token, in order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["X_AUTH_TOKEN", "AUTH_TOKEN"];

/// Where a token came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Flag,
    File(PathBuf),
    Env(&'static str),
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => f.write_str("CLI argument"),
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Env(var) => write!(f, "environment variable {var}"),
        }
    }
}

/// A token and its origin.
#[derive(Debug)]
pub struct ResolvedToken {
    pub token: SecretString,
    pub source: TokenSource,
}

fn non_empty(value: &str) -> Option<SecretString> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| SecretString::from(trimmed.to_owned()))
}

/// Pick the first non-empty token from the flag, the token file, then the
/// environment. `env` is injected so the chain can be tested without
/// touching the process environment.
///
/// A token file that cannot be read is an error even if a later source
/// would have produced a token.
pub fn resolve_token(
    flag: Option<&str>,
    token_file: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Option<ResolvedToken>, CliError> {
    if let Some(token) = flag.and_then(non_empty) {
        return Ok(Some(ResolvedToken {
            token,
            source: TokenSource::Flag,
        }));
    }

    if let Some(path) = token_file {
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::TokenFile {
            path: path.display().to_string(),
            source,
        })?;
        if let Some(token) = non_empty(&contents) {
            return Ok(Some(ResolvedToken {
                token,
                source: TokenSource::File(path.to_path_buf()),
            }));
        }
        warn!(path = %path.display(), "auth token file is empty");
    }

    for var in TOKEN_ENV_VARS {
        if let Some(token) = env(var).as_deref().and_then(non_empty) {
            return Ok(Some(ResolvedToken {
                token,
                source: TokenSource::Env(var),
            }));
        }
    }

    Ok(None)
}

/// Authenticate `controller` with a token if one was found, otherwise by
/// interactive login. Returns the bound tenant id.
pub async fn authenticate(
    controller: &Controller,
    token: Option<ResolvedToken>,
    max_attempts: u32,
) -> Result<String, CliError> {
    if let Some(ResolvedToken { token, source }) = token {
        info!("authenticating using auth token from {source}");
        return Ok(controller
            .authenticate(&AuthCredentials::Token(token))
            .await?);
    }

    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveLogin);
    }

    info!("no auth token found, falling back to interactive login");
    interactive_login(controller, max_attempts, prompt_credentials).await
}

/// Prompt and log in until one attempt succeeds or `max_attempts` have
/// been rejected. `prompt` is injected so the loop can be driven without a
/// terminal.
///
/// Rejected credentials are dropped before the next prompt. Connection and
/// timeout errors end the loop at once.
async fn interactive_login(
    controller: &Controller,
    max_attempts: u32,
    mut prompt: impl FnMut() -> Result<(String, SecretString), CliError>,
) -> Result<String, CliError> {
    for attempt in 1..=max_attempts {
        let (email, password) = prompt()?;
        let credentials = AuthCredentials::Login { email, password };

        match controller.authenticate(&credentials).await {
            Ok(tenant_id) => return Ok(tenant_id),
            Err(err @ (CoreError::AuthenticationFailed { .. } | CoreError::Api { .. })) => {
                warn!(attempt, max_attempts, error = %err, "login failed");
                eprintln!("Login failed, please try again ({attempt}/{max_attempts}).");
            }
            Err(other) => return Err(other.into()),
        }
    }

    Err(CliError::LoginAttemptsExhausted {
        attempts: max_attempts,
    })
}

fn prompt_credentials() -> Result<(String, SecretString), CliError> {
    let email: String = Input::new()
        .with_prompt("Email")
        .interact_text()
        .map_err(prompt_err)?;
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(prompt_err)?;
    Ok((email.trim().to_owned(), SecretString::from(password)))
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: dialoguer::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}
