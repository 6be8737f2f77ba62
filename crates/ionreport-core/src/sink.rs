// ── CSV output ──

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::CoreError;
use crate::policy::ReportRow;

/// Default output file name.
pub const DEFAULT_CSV_FILE: &str = "element-policy-mapping.csv";

/// Header row, in column order.
pub const CSV_HEADER: [&str; 7] = [
    "ION-Name",
    "ION-Interface",
    "Rule-Name",
    "Rule-Status",
    "Rule-Prefix",
    "Rule-App",
    "Rule-Action",
];

/// Write the header and every row to `writer`. Returns the number of rows.
///
/// Comma-delimited, double quotes only where a field needs them, CRLF
/// record terminators.
pub fn write_rows<W: Write>(writer: W, rows: &[ReportRow]) -> Result<usize, CoreError> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv.write_record(CSV_HEADER)?;
    for row in rows {
        csv.write_record(row.record())?;
    }
    csv.flush()?;
    Ok(rows.len())
}

/// Create (or truncate) `path` and write the report to it.
pub fn write_csv_file(path: &Path, rows: &[ReportRow]) -> Result<usize, CoreError> {
    debug!(path = %path.display(), rows = rows.len(), "writing CSV");
    let file = File::create(path)?;
    write_rows(BufWriter::new(file), rows)
}
