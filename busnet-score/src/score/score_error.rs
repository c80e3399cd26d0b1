use crate::metric::Metric;
use crate::query::QueryError;

#[derive(thiserror::Error, Debug)]
pub enum ScoreError {
    #[error("error calculating {metric}: {source}")]
    MetricError { metric: Metric, source: QueryError },
    #[error("failed writing score to '{filepath}': {source}")]
    WriteError {
        filepath: String,
        source: std::io::Error,
    },
    #[error("failed reading score from '{filepath}': {source}")]
    ReadError {
        filepath: String,
        source: std::io::Error,
    },
    #[error("failed writing score report to '{filepath}': {error}")]
    ReportError { filepath: String, error: String },
}
