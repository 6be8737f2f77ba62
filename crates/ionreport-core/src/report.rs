// ── Element policy report ──
//
// Walks tenant → elements → element extensions → rules, strictly in
// controller order, and flattens every interface policy rule into one row.

use ionreport_api::{Element, Tenant};
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::names::NameMap;
use crate::policy::{INTERFACE_NAMESPACE, InterfacePolicy, ReportRow, extension_label};
use crate::session::ControllerSession;

/// Knobs for [`build_report`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Abort on the first element whose extensions cannot be fetched,
    /// instead of recording it and moving on.
    pub strict: bool,
}

/// An element whose extensions could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementFailure {
    pub element_id: String,
    pub site_id: Option<String>,
    pub reason: String,
}

/// Result of one traversal.
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Display name of the tenant, for the banner.
    pub tenant_name: Option<String>,
    /// Rows in element → extension → rule order.
    pub rows: Vec<ReportRow>,
    /// Elements skipped because their extensions could not be fetched.
    pub failures: Vec<ElementFailure>,
    /// Total extensions returned across all elements, before filtering.
    pub extensions_examined: usize,
}

impl Report {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Build the element policy report.
///
/// Tenant and element listing failures are fatal. A failed per-element
/// extension listing is recorded in [`Report::failures`] unless
/// `options.strict` is set. Unknown ids and malformed interface policies
/// are always fatal.
///
/// `on_tenant` runs once the tenant is known, before any element is
/// listed, so callers can announce which tenant the walk is on.
pub async fn build_report<S, F>(
    session: &S,
    names: &NameMap,
    options: ReportOptions,
    on_tenant: F,
) -> Result<Report, CoreError>
where
    S: ControllerSession,
    F: FnOnce(&Tenant),
{
    let tenant = session.tenant().await?;
    on_tenant(&tenant);
    let mut report = Report {
        tenant_name: tenant.name,
        ..Report::default()
    };

    let elements = session.elements().await?;
    info!(count = elements.len(), "walking elements");

    for element in &elements {
        let Some(site_id) = element.site_id.as_deref() else {
            record_failure(
                &mut report,
                element,
                "element is not assigned to a site".into(),
                options,
            )?;
            continue;
        };

        let extensions = match session.element_extensions(site_id, &element.id).await {
            Ok(extensions) => extensions,
            Err(e) => {
                record_failure(&mut report, element, e.to_string(), options)?;
                continue;
            }
        };
        report.extensions_examined += extensions.len();

        for extension in &extensions {
            if extension.namespace() != Some(INTERFACE_NAMESPACE) {
                debug!(
                    element_id = %element.id,
                    namespace = %extension.namespace,
                    "skipping extension"
                );
                continue;
            }

            let policy = InterfacePolicy::from_extension(extension).map_err(|e| {
                CoreError::MalformedExtension {
                    element_id: element.id.clone(),
                    extension: extension_label(extension),
                    reason: e.to_string(),
                }
            })?;

            let device = names.name_of(&element.id)?;
            let interface = names.name_of(&policy.entity_id)?;
            let status = policy.status();

            for rule in &policy.conf.rules {
                report.rows.push(ReportRow {
                    device: device.to_owned(),
                    interface: interface.to_owned(),
                    rule_name: policy.name.as_str().to_owned(),
                    status,
                    prefix: rule.prefix.as_str().to_owned(),
                    app: rule.app.as_str().to_owned(),
                    action: rule.action.as_str().to_owned(),
                });
            }
        }
    }

    info!(
        rows = report.rows.len(),
        failures = report.failures.len(),
        "report built"
    );
    Ok(report)
}

fn record_failure(
    report: &mut Report,
    element: &Element,
    reason: String,
    options: ReportOptions,
) -> Result<(), CoreError> {
    if options.strict {
        return Err(CoreError::ExtensionFetch {
            element_id: element.id.clone(),
            reason,
        });
    }
    warn!(element_id = %element.id, %reason, "skipping element");
    report.failures.push(ElementFailure {
        element_id: element.id.clone(),
        site_id: element.site_id.clone(),
        reason,
    });
    Ok(())
}
