// ── Identifier → display name resolution ──
//
// Built once per run from the tenant inventory and read-only afterwards.
// Lookups are strict: an unknown id is an error, never the raw id.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::CoreError;
use crate::session::ControllerSession;

/// Mapping from controller object ids (sites, elements, interfaces) to names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMap {
    names: HashMap<String, String>,
}

impl NameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map from the session's inventory.
    ///
    /// Sites and elements are fetched once; interfaces are fetched per
    /// element. A failed interface listing only loses that element's
    /// interface names, so rows that need them fail later with
    /// [`CoreError::UnresolvedName`].
    pub async fn resolve<S: ControllerSession>(session: &S) -> Result<Self, CoreError> {
        let mut map = Self::new();

        for site in session.sites().await? {
            let name = site.name.unwrap_or_else(|| site.id.clone());
            map.insert(site.id, name);
        }

        let elements = session.elements().await?;
        for element in &elements {
            let name = element
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .or_else(|| element.serial_number.clone())
                .unwrap_or_else(|| element.id.clone());
            map.insert(element.id.clone(), name);
        }

        for element in &elements {
            let Some(site_id) = element.site_id.as_deref() else {
                continue;
            };
            match session.element_interfaces(site_id, &element.id).await {
                Ok(interfaces) => {
                    for interface in interfaces {
                        let name = interface.name.unwrap_or_else(|| interface.id.clone());
                        map.insert(interface.id, name);
                    }
                }
                Err(e) => {
                    warn!(element_id = %element.id, error = %e, "could not list interfaces");
                }
            }
        }

        debug!(entries = map.len(), "name map built");
        Ok(map)
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    /// Strict lookup.
    pub fn name_of(&self, id: &str) -> Result<&str, CoreError> {
        self.names
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| CoreError::UnresolvedName { id: id.to_owned() })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NameMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (id, name) in iter {
            map.insert(id, name);
        }
        map
    }
}
