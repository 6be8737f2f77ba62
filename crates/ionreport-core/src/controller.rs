// ── Controller facade ──
//
// Owns the HTTP session for one run. The binary creates exactly one,
// authenticates it, and lends it by reference to the name resolver and the
// report builder. Nothing here is global.

use ionreport_api::{
    ControllerClient, Element, ElementExtension, Interface, Site, Tenant, TlsMode,
    TransportConfig,
};
use tracing::{debug, info};

use crate::config::{AuthCredentials, ControllerConfig, TlsVerification};
use crate::error::CoreError;
use crate::session::ControllerSession;

/// An authenticated (or about to be) controller session.
pub struct Controller {
    client: ControllerClient,
}

impl Controller {
    /// Build the HTTP client. No request is made until [`authenticate`](Self::authenticate).
    pub fn new(config: &ControllerConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: tls_to_transport(&config.tls),
            timeout: config.timeout,
            cookie_jar: None,
        };
        let client = ControllerClient::new(config.url.clone(), &transport)?;
        Ok(Self { client })
    }

    /// Authenticate and bind the session to a tenant. Returns the tenant id.
    pub async fn authenticate(&self, credentials: &AuthCredentials) -> Result<String, CoreError> {
        let profile = match credentials {
            AuthCredentials::Token(token) => {
                debug!("validating auth token");
                self.client.use_token(token.clone()).await?
            }
            AuthCredentials::Login { email, password } => {
                debug!(email = %email, "interactive login");
                self.client.login(email, password).await?
            }
        };

        let tenant_id = profile
            .tenant_id
            .ok_or_else(|| CoreError::AuthenticationFailed {
                message: "profile does not name a tenant".into(),
            })?;
        info!(tenant_id = %tenant_id, "authentication complete");
        Ok(tenant_id)
    }

    /// End the server-side session.
    pub async fn logout(&self) -> Result<(), CoreError> {
        self.client.logout().await?;
        Ok(())
    }
}

impl ControllerSession for Controller {
    async fn tenant(&self) -> Result<Tenant, CoreError> {
        Ok(self.client.tenant().await?)
    }

    async fn sites(&self) -> Result<Vec<Site>, CoreError> {
        Ok(self.client.list_sites().await?)
    }

    async fn elements(&self) -> Result<Vec<Element>, CoreError> {
        Ok(self.client.list_elements().await?)
    }

    async fn element_interfaces(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> Result<Vec<Interface>, CoreError> {
        Ok(self
            .client
            .list_element_interfaces(site_id, element_id)
            .await?)
    }

    async fn element_extensions(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> Result<Vec<ElementExtension>, CoreError> {
        Ok(self
            .client
            .list_element_extensions(site_id, element_id)
            .await?)
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
