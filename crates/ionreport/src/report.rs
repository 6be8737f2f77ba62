//! The report run: resolve names, walk the inventory, write the CSV.

use std::path::Path;

use tracing::info;

use ionreport_core::{Controller, NameMap, ReportOptions, build_report, write_csv_file};

use crate::error::CliError;
use crate::output;

/// Run the report against an authenticated controller.
pub async fn run(
    controller: &Controller,
    csv_file: &Path,
    options: ReportOptions,
    quiet: bool,
) -> Result<(), CliError> {
    let names = NameMap::resolve(controller).await?;
    info!(entries = names.len(), "name map resolved");

    let report = build_report(controller, &names, options, |tenant| {
        output::print_banner(tenant.name.as_deref().unwrap_or(&tenant.id), quiet);
    })
    .await?;
    info!(
        extensions = report.extensions_examined,
        rows = report.row_count(),
        "extensions examined"
    );

    let rows = write_csv_file(csv_file, &report.rows)?;
    output::print_summary(csv_file, rows, quiet);
    output::print_failures(&report.failures);
    Ok(())
}
