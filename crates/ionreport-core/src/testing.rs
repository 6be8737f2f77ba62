// In-memory `ControllerSession` for unit tests.

use std::collections::{HashMap, HashSet};

use ionreport_api::{Element, ElementExtension, Interface, Site, Tenant};
use serde_json::Value;

use crate::error::CoreError;
use crate::session::ControllerSession;

#[derive(Debug, Default)]
pub(crate) struct FakeSession {
    tenant: Option<Tenant>,
    sites: Vec<Site>,
    elements: Vec<Element>,
    interfaces: HashMap<String, Vec<Interface>>,
    extensions: HashMap<String, Vec<Value>>,
    failing_extensions: HashSet<String>,
    failing_interfaces: HashSet<String>,
    fail_elements: bool,
}

fn api_error(message: &str) -> CoreError {
    CoreError::Api {
        message: message.to_owned(),
        code: None,
        status: Some(500),
    }
}

impl FakeSession {
    pub(crate) fn new(tenant_name: &str) -> Self {
        Self {
            tenant: Some(Tenant {
                id: "T1".into(),
                name: Some(tenant_name.into()),
            }),
            ..Self::default()
        }
    }

    pub(crate) fn site(mut self, id: &str, name: Option<&str>) -> Self {
        self.sites.push(Site {
            id: id.into(),
            name: name.map(Into::into),
        });
        self
    }

    pub(crate) fn element(mut self, id: &str, site_id: &str) -> Self {
        self.elements.push(Element {
            id: id.into(),
            site_id: Some(site_id.into()),
            name: None,
            serial_number: None,
        });
        self
    }

    pub(crate) fn named_element(
        mut self,
        id: &str,
        site_id: &str,
        name: Option<&str>,
        serial: Option<&str>,
    ) -> Self {
        self.elements.push(Element {
            id: id.into(),
            site_id: Some(site_id.into()),
            name: name.map(Into::into),
            serial_number: serial.map(Into::into),
        });
        self
    }

    pub(crate) fn unassigned_element(mut self, id: &str) -> Self {
        self.elements.push(Element {
            id: id.into(),
            site_id: None,
            name: None,
            serial_number: None,
        });
        self
    }

    pub(crate) fn interface(mut self, element_id: &str, id: &str, name: &str) -> Self {
        self.interfaces
            .entry(element_id.into())
            .or_default()
            .push(Interface {
                id: id.into(),
                name: Some(name.into()),
            });
        self
    }

    pub(crate) fn extensions(mut self, element_id: &str, items: Vec<Value>) -> Self {
        self.extensions.insert(element_id.into(), items);
        self
    }

    pub(crate) fn failing_extensions(mut self, element_id: &str) -> Self {
        self.failing_extensions.insert(element_id.into());
        self
    }

    pub(crate) fn failing_interfaces(mut self, element_id: &str) -> Self {
        self.failing_interfaces.insert(element_id.into());
        self
    }

    pub(crate) fn failing_tenant(mut self) -> Self {
        self.tenant = None;
        self
    }

    pub(crate) fn failing_elements(mut self) -> Self {
        self.fail_elements = true;
        self
    }
}

impl ControllerSession for FakeSession {
    async fn tenant(&self) -> Result<Tenant, CoreError> {
        self.tenant.clone().ok_or_else(|| api_error("tenant unavailable"))
    }

    async fn sites(&self) -> Result<Vec<Site>, CoreError> {
        Ok(self.sites.clone())
    }

    async fn elements(&self) -> Result<Vec<Element>, CoreError> {
        if self.fail_elements {
            return Err(api_error("elements unavailable"));
        }
        Ok(self.elements.clone())
    }

    async fn element_interfaces(
        &self,
        _site_id: &str,
        element_id: &str,
    ) -> Result<Vec<Interface>, CoreError> {
        if self.failing_interfaces.contains(element_id) {
            return Err(api_error("interfaces unavailable"));
        }
        Ok(self.interfaces.get(element_id).cloned().unwrap_or_default())
    }

    async fn element_extensions(
        &self,
        _site_id: &str,
        element_id: &str,
    ) -> Result<Vec<ElementExtension>, CoreError> {
        if self.failing_extensions.contains(element_id) {
            return Err(api_error("extensions unavailable"));
        }
        self.extensions
            .get(element_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(|e| CoreError::Internal(e.to_string())))
            .collect()
    }
}
