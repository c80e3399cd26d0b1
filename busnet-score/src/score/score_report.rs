use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{ScoreComponents, ScoreError};
use crate::configuration::ScoringWeights;
use crate::metric::Metric;

/// everything that went into a score, for writing alongside the binary score file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub score: f64,
    pub components: ScoreComponents,
    pub weights: ScoringWeights,
    /// weight * component for each metric
    pub contributions: BTreeMap<Metric, f64>,
    pub runtime_seconds: f64,
}

impl ScoreReport {
    pub fn new(components: ScoreComponents, weights: ScoringWeights, runtime_seconds: f64) -> Self {
        let contributions = Metric::ALL
            .iter()
            .map(|m| (*m, components.contribution(&weights, m)))
            .collect();
        Self {
            score: components.weighted_sum(&weights),
            components,
            weights,
            contributions,
            runtime_seconds,
        }
    }

    pub fn write_json<P>(&self, filepath: P) -> Result<(), ScoreError>
    where
        P: AsRef<Path>,
    {
        let path = filepath.as_ref();
        let filename = path.to_str().unwrap_or_default().to_string();
        let file = File::create(path).map_err(|e| ScoreError::ReportError {
            filepath: filename.clone(),
            error: e.to_string(),
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|e| {
            ScoreError::ReportError {
                filepath: filename.clone(),
                error: e.to_string(),
            }
        })?;
        writer.flush().map_err(|e| ScoreError::ReportError {
            filepath: filename,
            error: e.to_string(),
        })
    }
}
