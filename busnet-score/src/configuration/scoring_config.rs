use config::Config;
use serde::{Deserialize, Serialize};

use super::{config_ops, ConfigError, DataFiles, ScoringWeights};

/// the data file locations and scoring weights for a single scoring run.
///
/// read from a key-value file with the following layout (YAML shown):
///
/// ```yaml
/// files:
///   data:
///     bus_pax_records: output/bus_pax_records.arrow
///     bus_delay_records: output/bus_delay_records.arrow
///     trip_records: output/trip_records.arrow
/// scoring:
///   weights:
///     service_coverage: 0.2
///     ridership: 0.2
///     travel_time: 0.15
///     transit_auto_time_ratio: 0.15
///     on_time_performance: 0.2
///     productivity: 0.1
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub data_files: DataFiles,
    pub weights: ScoringWeights,
}

impl ScoringConfig {
    pub const DATA_FILES_KEY: &'static str = "files.data";
    pub const WEIGHTS_KEY: &'static str = "scoring.weights";

    pub fn new(data_files: DataFiles, weights: ScoringWeights) -> Self {
        Self {
            data_files,
            weights,
        }
    }

    /// pulls the `files.data` and `scoring.weights` sections out of an already
    /// loaded [`Config`]. `source` is only used for error messages.
    pub fn from_config(config: &Config, source: &str) -> Result<Self, ConfigError> {
        let data_files = config
            .get::<DataFiles>(Self::DATA_FILES_KEY)
            .map_err(|e| ConfigError::ConfigReadError {
                msg: format!("failed reading '{}' from '{source}'", Self::DATA_FILES_KEY),
                source: e,
            })?;
        let weights = config
            .get::<ScoringWeights>(Self::WEIGHTS_KEY)
            .map_err(|e| ConfigError::ConfigReadError {
                msg: format!("failed reading '{}' from '{source}'", Self::WEIGHTS_KEY),
                source: e,
            })?;
        Ok(Self::new(data_files, weights))
    }
}

impl TryFrom<&str> for ScoringConfig {
    type Error = ConfigError;

    fn try_from(filepath: &str) -> Result<Self, Self::Error> {
        let format = config_ops::file_format(filepath)
            .ok_or_else(|| ConfigError::UnsupportedFileType(filepath.to_string()))?;
        let config = config_ops::read_config(filepath, format).map_err(|e| {
            ConfigError::ConfigReadError {
                msg: format!("failed reading '{filepath}'"),
                source: e,
            }
        })?;
        Self::from_config(&config, filepath)
    }
}

impl TryFrom<&String> for ScoringConfig {
    type Error = ConfigError;

    fn try_from(filepath: &String) -> Result<Self, Self::Error> {
        Self::try_from(filepath.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ScoringConfig;
    use crate::configuration::ConfigError;
    use std::path::PathBuf;

    fn write_test_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("busnet-score-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("test setup failed creating temp directory");
        let filepath = dir.join(name);
        std::fs::write(&filepath, contents).expect("test setup failed writing config file");
        filepath
    }

    const YAML_CONFIG: &str = r#"
files:
  data:
    bus_pax_records: pax.arrow
    bus_delay_records: delay.arrow
    trip_records: trips.parquet
    network: ignored.xml
scoring:
  weights:
    service_coverage: 0.2
    ridership: 0.25
    travel_time: 0.1
    transit_auto_time_ratio: 0.15
    on_time_performance: 0.2
    productivity: 1
"#;

    #[test]
    fn test_read_yaml() {
        let filepath = write_test_file("complete.yaml", YAML_CONFIG);
        let conf = ScoringConfig::try_from(filepath.to_str().unwrap()).expect("should load");
        assert_eq!(conf.data_files.bus_pax_records, "pax.arrow");
        assert_eq!(conf.data_files.bus_delay_records, "delay.arrow");
        assert_eq!(conf.data_files.trip_records, "trips.parquet");
        assert_eq!(conf.weights.service_coverage, 0.2);
        assert_eq!(conf.weights.ridership, 0.25);
        assert_eq!(conf.weights.travel_time, 0.1);
        assert_eq!(conf.weights.transit_auto_time_ratio, 0.15);
        assert_eq!(conf.weights.on_time_performance, 0.2);
        assert_eq!(conf.weights.productivity, 1.0);
    }

    #[test]
    fn test_read_toml() {
        let toml = r#"
[files.data]
bus_pax_records = "pax.arrow"
bus_delay_records = "delay.arrow"
trip_records = "trips.arrow"

[scoring.weights]
service_coverage = 1.0
ridership = 0.0
travel_time = 0.0
transit_auto_time_ratio = 0.0
on_time_performance = 0.0
productivity = 0.0
"#;
        let filepath = write_test_file("complete.toml", toml);
        let conf = ScoringConfig::try_from(filepath.to_str().unwrap()).expect("should load");
        assert_eq!(conf.weights.service_coverage, 1.0);
        assert_eq!(conf.data_files.trip_records, "trips.arrow");
    }

    #[test]
    fn test_missing_weight_fails() {
        let missing = YAML_CONFIG.replace("    productivity: 1\n", "");
        let filepath = write_test_file("missing_weight.yaml", &missing);
        let result = ScoringConfig::try_from(filepath.to_str().unwrap());
        match result {
            Err(ConfigError::ConfigReadError { msg, .. }) => {
                assert!(msg.contains(ScoringConfig::WEIGHTS_KEY), "{msg}")
            }
            other => panic!("expected weights read error, found {other:?}"),
        }
    }

    #[test]
    fn test_wrong_type_fails() {
        let wrong = YAML_CONFIG.replace("ridership: 0.25", "ridership: lots");
        let filepath = write_test_file("wrong_type.yaml", &wrong);
        let result = ScoringConfig::try_from(filepath.to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::ConfigReadError { .. })));
    }

    #[test]
    fn test_missing_data_section_fails() {
        let filepath = write_test_file(
            "no_data.yaml",
            "scoring:\n  weights:\n    ridership: 1.0\n",
        );
        let result = ScoringConfig::try_from(filepath.to_str().unwrap());
        match result {
            Err(ConfigError::ConfigReadError { msg, .. }) => {
                assert!(msg.contains(ScoringConfig::DATA_FILES_KEY), "{msg}")
            }
            other => panic!("expected data files read error, found {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_extension_fails() {
        let result = ScoringConfig::try_from("scoring.xml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFileType(_))));
    }

    #[test]
    fn test_missing_file_fails() {
        let result = ScoringConfig::try_from("/nonexistent/busnet/scoring.yaml");
        assert!(matches!(result, Err(ConfigError::ConfigReadError { .. })));
    }
}
