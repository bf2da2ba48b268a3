use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("schema mismatch: standard column `{field}` is missing from the dataset")]
    SchemaMismatch { field: &'static str },
    #[error("failed to load dataset: {0}")]
    Load(#[from] polars::error::PolarsError),
    #[error("failed to write report: {0}")]
    Report(#[from] rust_xlsxwriter::XlsxError),
    #[error("failed to serialize summary: {0}")]
    Summary(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("timestamp format error: {0}")]
    Timestamp(#[from] time::error::Format),
}
