use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

use super::{score_io, ScoreComponents, ScoreError, ScoreReport};
use crate::configuration::{Metadata, ScoringConfig};
use crate::metric::Metric;

/// computes the system-wide score for one simulation run.
///
/// every [`Metric`] is computed independently and combined using the configured
/// weights. the first failing metric aborts the run; no partial score is
/// produced and nothing is retried.
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    config: ScoringConfig,
    metadata: Metadata,
    parallelize: bool,
}

impl ScoreCalculator {
    pub fn new(config: ScoringConfig, metadata: Metadata) -> Self {
        Self {
            config,
            metadata,
            parallelize: false,
        }
    }

    /// run the metric queries on the rayon thread pool. results are identical to
    /// a sequential run.
    pub fn with_parallelize(mut self, parallelize: bool) -> Self {
        self.parallelize = parallelize;
        self
    }

    pub fn compute_metric(&self, metric: &Metric) -> Result<f64, ScoreError> {
        log::info!("calculating {metric}...");
        match metric.compute(&self.config.data_files, &self.metadata) {
            Ok(value) => {
                log::info!("calculated {metric}: {}", metric.format_value(value));
                Ok(value)
            }
            Err(e) => {
                log::error!("error calculating {metric}: {e}");
                Err(ScoreError::MetricError {
                    metric: *metric,
                    source: e,
                })
            }
        }
    }

    /// computes every metric in [`Metric::ALL`] order. with parallelism enabled,
    /// all metrics run to completion and the first failure in that order is returned.
    pub fn compute_components(&self) -> Result<ScoreComponents, ScoreError> {
        let values: Vec<f64> = if self.parallelize {
            Metric::ALL
                .par_iter()
                .map(|m| self.compute_metric(m))
                .collect::<Vec<_>>()
                .into_iter()
                .collect::<Result<_, _>>()?
        } else {
            Metric::ALL
                .iter()
                .map(|m| self.compute_metric(m))
                .collect::<Result<_, _>>()?
        };
        Ok(Metric::ALL.into_iter().zip(values).collect())
    }

    /// computes all components and their weighted sum.
    pub fn calculate(&self) -> Result<ScoreReport, ScoreError> {
        let start = Instant::now();
        log::info!("processing simulation outputs...");
        let components = self.compute_components()?;
        let elapsed = start.elapsed();
        let report = ScoreReport::new(components, self.config.weights, elapsed.as_secs_f64());
        log::info!("score calculation completed in {elapsed:?}");
        log::info!("system-wide score: {:.4}", report.score);
        Ok(report)
    }

    /// computes the score and writes it to `output_file`. the file is not
    /// touched when any metric fails.
    pub fn calculate_score<P>(&self, output_file: P) -> Result<ScoreReport, ScoreError>
    where
        P: AsRef<Path>,
    {
        let report = self.calculate()?;
        let path = output_file.as_ref();
        score_io::write_score(path, report.score).map_err(|e| ScoreError::WriteError {
            filepath: path.to_str().unwrap_or_default().to_string(),
            source: e,
        })?;
        log::debug!("wrote score to '{}'", path.display());
        Ok(report)
    }
}
