// ── Interface management policy model ──
//
// Typed view of `devicemanagement/interface` extensions and the flattened
// row the report emits per rule. Extensions are decoded only after they
// pass the namespace filter.

use std::fmt;

use ionreport_api::ElementExtension;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The only extension namespace that contributes report rows.
pub const INTERFACE_NAMESPACE: &str = "devicemanagement/interface";

/// Whether an extension's rules are in force.
///
/// Two-state view of the extension's `disabled` attribute, which may be
/// `true`, `false`, `null`, missing, or some other JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStatus {
    Enabled,
    Disabled,
}

impl RuleStatus {
    /// `Enabled` only for a literal boolean `false`; anything else is `Disabled`.
    pub fn from_disabled(disabled: &Value) -> Self {
        if matches!(disabled, Value::Bool(false)) {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "Enabled",
            Self::Disabled => "Disabled",
        }
    }
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A required JSON field rendered as CSV cell text.
///
/// Strings are kept verbatim, `null` becomes an empty cell, and any other
/// value is written as compact JSON. The field must be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell(String);

impl Cell {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self(s.clone()),
            Value::Null => Self(String::new()),
            other => Self(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// One traffic rule inside an interface policy.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyRule {
    pub prefix: Cell,
    pub app: Cell,
    pub action: Cell,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConf {
    pub rules: Vec<PolicyRule>,
}

/// A decoded `devicemanagement/interface` extension.
#[derive(Debug, Clone, Deserialize)]
pub struct InterfacePolicy {
    /// The interface the policy applies to.
    pub entity_id: String,
    pub name: Cell,
    #[serde(default)]
    pub disabled: Value,
    pub conf: PolicyConf,
}

impl InterfacePolicy {
    /// Decode an extension. The caller has already checked its namespace.
    pub fn from_extension(extension: &ElementExtension) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(extension.fields.clone()))
    }

    pub fn status(&self) -> RuleStatus {
        RuleStatus::from_disabled(&self.disabled)
    }
}

/// Best available label for an extension in error messages.
pub(crate) fn extension_label(extension: &ElementExtension) -> String {
    ["id", "name"]
        .iter()
        .find_map(|key| extension.fields.get(*key).and_then(Value::as_str))
        .unwrap_or("<unnamed>")
        .to_owned()
}

/// One flattened report line: a single rule of a single interface policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub device: String,
    pub interface: String,
    pub rule_name: String,
    pub status: RuleStatus,
    pub prefix: String,
    pub app: String,
    pub action: String,
}

impl ReportRow {
    /// Column values in header order.
    pub fn record(&self) -> [&str; 7] {
        [
            &self.device,
            &self.interface,
            &self.rule_name,
            self.status.as_str(),
            &self.prefix,
            &self.app,
            &self.action,
        ]
    }
}
