use crate::analysis::Analysis;
use crate::error::AppError;
use std::path::Path;

pub mod summary;
pub mod table;
pub mod workbook;

pub use table::ReportTables;
pub use workbook::DEFAULT_REPORT_PATH;

/// Render `analysis` into the XLSX report at `path`.
pub fn generate(analysis: &Analysis, path: impl AsRef<Path>) -> Result<ReportTables, AppError> {
    let tables = ReportTables::from_analysis(analysis)?;
    workbook::write_report(&tables, path)?;
    Ok(tables)
}
