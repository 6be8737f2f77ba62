// ── Session capability ──
//
// The report and the name map only need read access to a handful of
// inventory endpoints. They take it through this trait so the traversal
// can run against a live `Controller` or an in-memory fixture alike.

use std::future::Future;

use ionreport_api::{Element, ElementExtension, Interface, Site, Tenant};

use crate::error::CoreError;

/// Read-only inventory calls against an authenticated controller session.
///
/// Every call is awaited to completion before the next is issued; nothing
/// in this crate runs two of them at once.
pub trait ControllerSession {
    /// The tenant the session is bound to.
    fn tenant(&self) -> impl Future<Output = Result<Tenant, CoreError>> + Send;

    /// All sites of the tenant.
    fn sites(&self) -> impl Future<Output = Result<Vec<Site>, CoreError>> + Send;

    /// All elements of the tenant, in controller order.
    fn elements(&self) -> impl Future<Output = Result<Vec<Element>, CoreError>> + Send;

    /// Interfaces of one element.
    fn element_interfaces(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> impl Future<Output = Result<Vec<Interface>, CoreError>> + Send;

    /// Extensions attached to one element, in controller order.
    fn element_extensions(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> impl Future<Output = Result<Vec<ElementExtension>, CoreError>> + Send;
}
