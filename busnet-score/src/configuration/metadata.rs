use serde::{Deserialize, Serialize};

use super::{config_ops, MetadataError};

/// simulation-wide constants supplied alongside the simulation outputs.
///
/// headway tolerances and the travel time baseline are in minutes, while the
/// data files record delays and travel times in seconds.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Metadata {
    pub total_population: f64,
    pub early_headway_tolerance: f64,
    pub late_headway_tolerance: f64,
    pub travel_time_baseline: f64,
    pub total_service_hours: f64,
    /// share of the population served by transit, computed upstream
    pub service_coverage: f64,
}

impl Metadata {
    /// confirms every constant is within its domain.
    pub fn validate(&self) -> Result<(), MetadataError> {
        check(
            "total_population",
            self.total_population,
            |v| v > 0.0,
            "must be positive",
        )?;
        check(
            "early_headway_tolerance",
            self.early_headway_tolerance,
            |v| v >= 0.0,
            "must be non-negative",
        )?;
        check(
            "late_headway_tolerance",
            self.late_headway_tolerance,
            |v| v >= 0.0,
            "must be non-negative",
        )?;
        check(
            "travel_time_baseline",
            self.travel_time_baseline,
            |v| v > 0.0,
            "must be positive",
        )?;
        check(
            "total_service_hours",
            self.total_service_hours,
            |v| v >= 0.0,
            "must be non-negative",
        )?;
        check(
            "service_coverage",
            self.service_coverage,
            |v| (0.0..=1.0).contains(&v),
            "must be a ratio in [0, 1]",
        )?;
        Ok(())
    }
}

fn check(
    key: &'static str,
    value: f64,
    predicate: impl Fn(f64) -> bool,
    expected: &'static str,
) -> Result<(), MetadataError> {
    if value.is_finite() && predicate(value) {
        Ok(())
    } else {
        Err(MetadataError::InvalidValue {
            key,
            value,
            expected,
        })
    }
}

impl TryFrom<&str> for Metadata {
    type Error = MetadataError;

    fn try_from(filepath: &str) -> Result<Self, Self::Error> {
        let format = config_ops::file_format(filepath)
            .ok_or_else(|| MetadataError::UnsupportedFileType(filepath.to_string()))?;
        let config = config_ops::read_config(filepath, format).map_err(|e| {
            MetadataError::MetadataReadError {
                msg: format!("failed reading '{filepath}'"),
                source: e,
            }
        })?;
        let metadata = config.try_deserialize::<Metadata>().map_err(|e| {
            MetadataError::MetadataReadError {
                msg: format!("failed deserializing metadata from '{filepath}'"),
                source: e,
            }
        })?;
        metadata.validate()?;
        Ok(metadata)
    }
}

impl TryFrom<&String> for Metadata {
    type Error = MetadataError;

    fn try_from(filepath: &String) -> Result<Self, Self::Error> {
        Self::try_from(filepath.as_str())
    }
}
