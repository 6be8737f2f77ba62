//! Element management-policy reporting on top of `ionreport-api`.
//!
//! - **[`Controller`]** -- owns the HTTP session for one run: authenticates
//!   with a token or an interactive login, and logs out at the end.
//!
//! - **[`NameMap`]** -- id → display name map for sites, elements and
//!   interfaces, built once from the inventory. Lookups are strict.
//!
//! - **[`build_report`]** -- walks elements → extensions → rules in
//!   controller order and flattens every `devicemanagement/interface` rule
//!   into a [`ReportRow`].
//!
//! - **[`sink`]** -- writes rows as CSV.
//!
//! Traversal goes through the [`ControllerSession`] trait, so everything
//! above the HTTP layer runs against in-memory fixtures in tests.

pub mod config;
pub mod controller;
pub mod error;
pub mod names;
pub mod policy;
pub mod report;
pub mod session;
pub mod sink;

#[cfg(test)]
mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AuthCredentials, ControllerConfig, DEFAULT_CONTROLLER_URL, TlsVerification};
pub use controller::Controller;
pub use error::CoreError;
pub use names::NameMap;
pub use policy::{INTERFACE_NAMESPACE, ReportRow, RuleStatus};
pub use report::{ElementFailure, Report, ReportOptions, build_report};
pub use session::ControllerSession;
pub use sink::{CSV_HEADER, DEFAULT_CSV_FILE, write_csv_file, write_rows};
