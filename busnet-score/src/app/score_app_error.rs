use crate::configuration::{ConfigError, MetadataError};
use crate::coverage::CoverageError;
use crate::score::ScoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreAppError {
    #[error("failure reading scoring configuration: {source}")]
    ConfigurationError {
        #[from]
        source: ConfigError,
    },
    #[error("failure reading simulation metadata: {source}")]
    MetadataError {
        #[from]
        source: MetadataError,
    },
    #[error("{source}")]
    ScoreError {
        #[from]
        source: ScoreError,
    },
    #[error("failure computing service coverage: {source}")]
    CoverageError {
        #[from]
        source: CoverageError,
    },
}

impl ScoreAppError {
    /// failed metric queries exit with status 1, everything else with 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScoreAppError::ScoreError {
                source: ScoreError::MetricError { .. },
            } => 1,
            _ => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ScoreAppError;
    use crate::configuration::ConfigError;
    use crate::metric::Metric;
    use crate::query::QueryError;
    use crate::score::ScoreError;

    #[test]
    fn test_exit_codes() {
        let metric_failure = ScoreAppError::from(ScoreError::MetricError {
            metric: Metric::Ridership,
            source: QueryError::ColumnNotFound {
                path: String::from("pax.arrow"),
                column: String::from("person_id"),
            },
        });
        assert_eq!(metric_failure.exit_code(), 1);
        assert_eq!(
            metric_failure.to_string(),
            "error calculating ridership: column 'person_id' not found in 'pax.arrow'"
        );

        let config_failure =
            ScoreAppError::from(ConfigError::UnsupportedFileType(String::from("a.xml")));
        assert_eq!(config_failure.exit_code(), 2);

        let write_failure = ScoreAppError::from(ScoreError::WriteError {
            filepath: String::from("out/score.bin"),
            source: std::io::Error::other("disk full"),
        });
        assert_eq!(write_failure.exit_code(), 2);
    }
}
