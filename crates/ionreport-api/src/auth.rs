// Session authentication
//
// Two ways in: a static auth token sent as `X-Auth-Token`, or an
// email/password login whose session lands in the cookie jar. Either way
// the session is only usable once the profile names a tenant.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ControllerClient;
use crate::error::Error;
use crate::models::{LoginResponse, Profile};

const LOGIN_PATH: (&str, &str) = ("v2.0", "login");
const LOGOUT_PATH: (&str, &str) = ("v2.0", "logout");
const PROFILE_PATH: (&str, &str) = ("v2.1", "profile");

impl ControllerClient {
    /// Fetch the caller's profile.
    ///
    /// `GET /v2.1/api/profile`
    pub async fn profile(&self) -> Result<Profile, Error> {
        let (version, path) = PROFILE_PATH;
        let url = self.api_url(version, path)?;
        self.get(url).await
    }

    /// Authenticate with a static auth token.
    ///
    /// The token is installed as the `X-Auth-Token` header and validated by
    /// fetching the profile. A profile without a tenant is a failure; the
    /// token is removed again so the client is left unauthenticated.
    pub async fn use_token(&self, token: SecretString) -> Result<Profile, Error> {
        self.set_token(Some(token));
        match self.bind_tenant().await {
            Ok(profile) => Ok(profile),
            Err(e) => {
                self.set_token(None);
                Err(e)
            }
        }
    }

    /// Authenticate with email and password.
    ///
    /// `POST /v2.0/api/login` with `{"email": ..., "password": ...}`. The
    /// session cookie is kept in the jar; a returned `x_auth_token` is also
    /// installed as the token header. If the profile then names no tenant,
    /// the new session is logged out before the error is returned.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Profile, Error> {
        let (version, path) = LOGIN_PATH;
        let url = self.api_url(version, path)?;

        debug!(email, "logging in");

        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let resp: Option<LoginResponse> = self.post(url, &body).await.map_err(|e| match e {
            Error::Api { message, .. } => Error::Authentication { message },
            other => other,
        })?;

        if let Some(token) = resp.and_then(|r| r.x_auth_token) {
            self.set_token(Some(SecretString::from(token)));
        }

        // The login itself succeeded, so a session exists server-side.
        match self.bind_tenant().await {
            Ok(profile) => Ok(profile),
            Err(e) => {
                if let Err(logout_err) = self.logout().await {
                    debug!(error = %logout_err, "logout after failed login did not complete");
                }
                self.set_token(None);
                Err(e)
            }
        }
    }

    /// End the current session and forget the tenant binding.
    ///
    /// `GET /v2.0/api/logout`
    pub async fn logout(&self) -> Result<(), Error> {
        let (version, path) = LOGOUT_PATH;
        let url = self.api_url(version, path)?;

        debug!("logging out");
        let _: serde_json::Value = self.get(url).await?;

        self.set_token(None);
        self.set_tenant_id(None);
        debug!("logout complete");
        Ok(())
    }

    /// Fetch the profile and bind its tenant to the session.
    async fn bind_tenant(&self) -> Result<Profile, Error> {
        let profile = self.profile().await?;
        match profile.tenant_id.as_deref() {
            Some(tenant) if !tenant.is_empty() => {
                self.set_tenant_id(Some(tenant.to_owned()));
                debug!(tenant, "authenticated");
                Ok(profile)
            }
            _ => Err(Error::Authentication {
                message: "profile does not name a tenant".into(),
            }),
        }
    }
}
