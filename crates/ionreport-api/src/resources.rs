// Tenant-scoped inventory endpoints
//
// Everything here lives under `/{version}/api/tenants/{tenant}/...` and
// requires an authenticated session.

use tracing::debug;

use crate::client::ControllerClient;
use crate::error::Error;
use crate::models::{Element, ElementExtension, Interface, ListResponse, Site, Tenant};

impl ControllerClient {
    /// Fetch the tenant the session is bound to.
    ///
    /// `GET /v2.3/api/tenants/{tenant}`
    pub async fn tenant(&self) -> Result<Tenant, Error> {
        let url = self.tenant_url("v2.3", "")?;
        self.get(url).await
    }

    /// List all sites.
    ///
    /// `GET /v4.7/api/tenants/{tenant}/sites`
    pub async fn list_sites(&self) -> Result<Vec<Site>, Error> {
        let url = self.tenant_url("v4.7", "sites")?;
        let resp: ListResponse<Site> = self.get(url).await?;
        Ok(resp.items)
    }

    /// List all elements in the tenant, in controller order.
    ///
    /// `GET /v3.0/api/tenants/{tenant}/elements`
    pub async fn list_elements(&self) -> Result<Vec<Element>, Error> {
        let url = self.tenant_url("v3.0", "elements")?;
        let resp: ListResponse<Element> = self.get(url).await?;
        debug!(count = resp.items.len(), "listed elements");
        Ok(resp.items)
    }

    /// List the interfaces of one element.
    ///
    /// `GET /v4.15/api/tenants/{tenant}/sites/{site}/elements/{element}/interfaces`
    pub async fn list_element_interfaces(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> Result<Vec<Interface>, Error> {
        let url = self.tenant_url(
            "v4.15",
            &format!("sites/{site_id}/elements/{element_id}/interfaces"),
        )?;
        let resp: ListResponse<Interface> = self.get(url).await?;
        Ok(resp.items)
    }

    /// List the extensions attached to one element.
    ///
    /// `GET /v2.0/api/tenants/{tenant}/sites/{site}/elements/{element}/extensions`
    pub async fn list_element_extensions(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> Result<Vec<ElementExtension>, Error> {
        let url = self.tenant_url(
            "v2.0",
            &format!("sites/{site_id}/elements/{element_id}/extensions"),
        )?;
        let resp: ListResponse<ElementExtension> = self.get(url).await?;
        debug!(element_id, count = resp.items.len(), "listed element extensions");
        Ok(resp.items)
    }
}
