use arrow::error::ArrowError;
use parquet::errors::ParquetError;

#[derive(thiserror::Error, Debug)]
pub enum QueryError {
    #[error("failed opening '{path}': {source}")]
    OpenError {
        path: String,
        source: std::io::Error,
    },
    #[error("failed reading Arrow data from '{path}': {source}")]
    ArrowReadError { path: String, source: ArrowError },
    #[error("failed reading Parquet data from '{path}': {source}")]
    ParquetReadError { path: String, source: ParquetError },
    #[error("column '{column}' not found in '{path}'")]
    ColumnNotFound { path: String, column: String },
    #[error("column '{column}' in '{path}' cannot be read as {expected}: {source}")]
    ColumnTypeError {
        path: String,
        column: String,
        expected: &'static str,
        source: ArrowError,
    },
}
