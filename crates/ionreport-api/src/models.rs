// Controller API response types
//
// List endpoints wrap their payload in `{ "count": N, "items": [...] }`.
// Fields use `#[serde(default)]` liberally because the controller omits
// unset attributes rather than sending null.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Envelopes ────────────────────────────────────────────────────────

/// Standard list envelope.
///
/// ```json
/// { "_offset": null, "count": 2, "items": [...] }
/// ```
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// `{"_error": [{"code": "...", "message": "..."}]}` body on failed calls.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default, rename = "_error")]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Session ──────────────────────────────────────────────────────────

/// Response to a successful login. Token-less logins rely on the cookie jar.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub x_auth_token: Option<String>,
}

/// The authenticated operator's profile. Binds the session to a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

// ── Inventory ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A managed ION device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    /// Unassigned elements come back with no site.
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
}

/// A physical or logical interface on an element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interface {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// An element extension, kept close to the wire.
///
/// Nothing is decoded eagerly. `namespace` stays raw JSON like the rest of
/// the object, so extensions a caller ignores can never fail a decode, even
/// when their namespace is not a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementExtension {
    #[serde(default)]
    pub namespace: Value,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ElementExtension {
    /// The namespace, if it is a string.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_str()
    }
}
