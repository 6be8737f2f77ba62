//! User-facing output: the tenant banner, the run summary and the
//! aggregated list of skipped elements.
//!
//! Banner and summary go to stdout and honor `--quiet`. Failures go to
//! stderr unconditionally.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use owo_colors::OwoColorize;

use ionreport_core::ElementFailure;

/// Color stdout only for a terminal, and never when `NO_COLOR` is set.
pub fn should_color() -> bool {
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

pub fn banner(tenant_name: &str) -> String {
    format!("======== TENANT NAME {tenant_name} ========")
}

pub fn summary(path: &Path, rows: usize) -> String {
    format!("Wrote to CSV File: {} - {rows} rows", path.display())
}

/// One line per skipped element, with a leading count line.
pub fn failure_report(failures: &[ElementFailure]) -> String {
    let mut out = format!(
        "Skipped {} element(s) whose extensions could not be read:",
        failures.len()
    );
    for failure in failures {
        let site = failure.site_id.as_deref().unwrap_or("-");
        out.push_str(&format!(
            "\n  element {} (site {site}): {}",
            failure.element_id, failure.reason
        ));
    }
    out
}

/// Print a line to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

pub fn print_banner(tenant_name: &str, quiet: bool) {
    let line = banner(tenant_name);
    if should_color() {
        print_output(&line.bold().cyan().to_string(), quiet);
    } else {
        print_output(&line, quiet);
    }
}

pub fn print_summary(path: &Path, rows: usize, quiet: bool) {
    let line = summary(path, rows);
    if should_color() {
        print_output(&line.green().to_string(), quiet);
    } else {
        print_output(&line, quiet);
    }
}

pub fn print_failures(failures: &[ElementFailure]) {
    if failures.is_empty() {
        return;
    }
    let text = failure_report(failures);
    let mut stderr = io::stderr().lock();
    if io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none() {
        let _ = writeln!(stderr, "{}", text.yellow());
    } else {
        let _ = writeln!(stderr, "{text}");
    }
}
