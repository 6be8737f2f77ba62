// Controller HTTP client
//
// Wraps `reqwest::Client` with versioned URL construction, token header
// injection, tenant scoping and `_error` envelope decoding. Endpoint methods
// live in `auth.rs` and `resources.rs` as inherent impls so this module
// stays focused on transport mechanics.

use std::sync::RwLock;

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::ErrorEnvelope;
use crate::transport::TransportConfig;

/// Header carrying the static auth token on every request.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// HTTP client for the SD-WAN controller REST API.
///
/// A client starts unauthenticated. [`use_token`](Self::use_token) or
/// [`login`](Self::login) binds it to a tenant; tenant-scoped endpoints fail
/// with [`Error::NotAuthenticated`] until then.
pub struct ControllerClient {
    http: reqwest::Client,
    base_url: Url,
    /// Static token sent as `X-Auth-Token`. Cookie-only sessions leave this empty.
    token: RwLock<Option<SecretString>>,
    tenant_id: RwLock<Option<String>>,
}

impl ControllerClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// A cookie jar is added when the config lacks one, since interactive
    /// logins are cookie-based.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            token: RwLock::new(None),
            tenant_id: RwLock::new(None),
        }
    }

    /// The tenant this session is bound to, if authenticated.
    pub fn tenant_id(&self) -> Option<String> {
        self.tenant_id.read().expect("tenant lock poisoned").clone()
    }

    // ── Session state ────────────────────────────────────────────────

    pub(crate) fn set_token(&self, token: Option<SecretString>) {
        *self.token.write().expect("token lock poisoned") = token;
    }

    pub(crate) fn set_tenant_id(&self, tenant_id: Option<String>) {
        debug!(?tenant_id, "binding session tenant");
        *self.tenant_id.write().expect("tenant lock poisoned") = tenant_id;
    }

    /// Attach the token header, if one is installed.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.token.read().expect("token lock poisoned");
        let Some(token) = guard.as_ref() else {
            return builder;
        };
        match HeaderValue::from_str(token.expose_secret()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                builder.header(AUTH_TOKEN_HEADER, value)
            }
            Err(_) => {
                trace!("auth token is not a valid header value, sending without it");
                builder
            }
        }
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{version}/api/{path}`.
    pub(crate) fn api_url(&self, version: &str, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/{version}/api/{path}");
        Ok(Url::parse(&full)?)
    }

    /// Build `{base}/{version}/api/tenants/{tenant}/{path}`.
    ///
    /// An empty `path` addresses the tenant object itself.
    pub(crate) fn tenant_url(&self, version: &str, path: &str) -> Result<Url, Error> {
        let tenant = self.tenant_id().ok_or(Error::NotAuthenticated)?;
        if path.is_empty() {
            self.api_url(version, &format!("tenants/{tenant}"))
        } else {
            self.api_url(version, &format!("tenants/{tenant}/{path}"))
        }
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let builder = self.authorize(self.http.get(url));
        let resp = builder.send().await.map_err(Error::Transport)?;

        parse_response(resp).await
    }

    /// Send a POST request with JSON body and decode the JSON response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);

        let builder = self.authorize(self.http.post(url).json(body));
        let resp = builder.send().await.map_err(Error::Transport)?;

        parse_response(resp).await
    }
}

/// Map a response to `T`, or to an `Error` built from the `_error` envelope.
async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;

    if !status.is_success() {
        let envelope: ErrorEnvelope = serde_json::from_str(&body).unwrap_or_default();
        let first = envelope.errors.into_iter().next();
        let code = first.as_ref().and_then(|e| e.code.clone());
        let message = first
            .and_then(|e| e.message)
            .unwrap_or_else(|| format!("HTTP {status}: {}", preview(&body)));

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication { message });
        }
        return Err(Error::Api {
            message,
            code,
            status: status.as_u16(),
        });
    }

    // Some endpoints (logout) answer with an empty body.
    let text = if body.trim().is_empty() { "null" } else { body.as_str() };

    serde_json::from_str(text).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body: body.clone(),
    })
}

/// First 200 characters of a body, for error messages.
fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
