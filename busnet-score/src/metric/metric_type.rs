use serde::{Deserialize, Serialize};

use super::metric_ops as ops;
use crate::configuration::{DataFiles, Metadata};
use crate::query::{query_ops, ColumnarSource, QueryError};

pub const PERSON_ID_COLUMN: &str = "person_id";
pub const ARRIVAL_DELAY_COLUMN: &str = "arrival_delay";
pub const MAIN_MODE_COLUMN: &str = "main_mode";
pub const TRAVEL_TIME_COLUMN: &str = "travel_time";

/// a component of the system-wide score. each variant is computed
/// independently from the data files and metadata.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// share of the population near an active stop, taken from metadata
    ServiceCoverage,
    /// share of the population that rode a bus
    Ridership,
    /// share of bus arrivals within the headway tolerances
    OnTimePerformance,
    /// transit travel time relative to auto travel time
    TransitAutoTimeRatio,
    /// transit travel time relative to the metadata baseline
    TravelTime,
    /// service hours per rider
    Productivity,
}

impl Metric {
    /// every metric in the order it is computed and logged.
    pub const ALL: [Metric; 6] = [
        Metric::ServiceCoverage,
        Metric::Ridership,
        Metric::OnTimePerformance,
        Metric::TransitAutoTimeRatio,
        Metric::TravelTime,
        Metric::Productivity,
    ];

    /// order in which weighted components are added into the score. floating
    /// point addition is not associative, so this order is part of the output.
    pub const SUMMATION_ORDER: [Metric; 6] = [
        Metric::ServiceCoverage,
        Metric::Ridership,
        Metric::OnTimePerformance,
        Metric::TravelTime,
        Metric::TransitAutoTimeRatio,
        Metric::Productivity,
    ];

    /// configuration key for this metric's weight
    pub fn key(&self) -> &'static str {
        match self {
            Metric::ServiceCoverage => "service_coverage",
            Metric::Ridership => "ridership",
            Metric::OnTimePerformance => "on_time_performance",
            Metric::TransitAutoTimeRatio => "transit_auto_time_ratio",
            Metric::TravelTime => "travel_time",
            Metric::Productivity => "productivity",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Metric::ServiceCoverage => "service coverage",
            Metric::Ridership => "ridership",
            Metric::OnTimePerformance => "on-time performance",
            Metric::TransitAutoTimeRatio => "transit-auto travel time ratio",
            Metric::TravelTime => "travel time",
            Metric::Productivity => "productivity",
        }
    }

    /// renders a computed value for logging, as a percentage for ratio metrics.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            Metric::ServiceCoverage | Metric::Ridership | Metric::OnTimePerformance => {
                format!("{:.4}%", value * 100.0)
            }
            _ => format!("{value:.4}"),
        }
    }

    /// computes this metric. queries open and release their own file handles.
    pub fn compute(&self, data_files: &DataFiles, metadata: &Metadata) -> Result<f64, QueryError> {
        match self {
            Metric::ServiceCoverage => Ok(metadata.service_coverage),
            Metric::Ridership => {
                let source = ColumnarSource::new(&data_files.bus_pax_records);
                let riders = query_ops::count_distinct(&source, PERSON_ID_COLUMN)?;
                log::debug!("{riders} distinct bus riders");
                Ok(ops::ridership(riders, metadata.total_population))
            }
            Metric::OnTimePerformance => {
                let source = ColumnarSource::new(&data_files.bus_delay_records);
                let (lower, upper) = ops::on_time_window(
                    metadata.early_headway_tolerance,
                    metadata.late_headway_tolerance,
                );
                let counts = query_ops::count_within(&source, ARRIVAL_DELAY_COLUMN, lower, upper)?;
                if counts.total == 0 {
                    log::warn!(
                        "no delay records in '{}', on-time performance is 0",
                        source.path()
                    );
                }
                log::debug!(
                    "{}/{} arrivals within [{lower}, {upper}] seconds",
                    counts.within,
                    counts.total
                );
                Ok(ops::on_time_performance(counts.within, counts.total))
            }
            Metric::TransitAutoTimeRatio => {
                let source = ColumnarSource::new(&data_files.trip_records);
                let means = query_ops::mean_by_category(
                    &source,
                    TRAVEL_TIME_COLUMN,
                    MAIN_MODE_COLUMN,
                    &[ops::TRANSIT_MODE, ops::AUTO_MODE],
                )?;
                let (transit, auto) = (means[0], means[1]);
                log::debug!("mean travel time (s): transit {transit:?}, auto {auto:?}");
                if auto == Some(0.0) {
                    log::warn!(
                        "mean auto travel time in '{}' is 0, transit-auto travel time ratio is 0",
                        source.path()
                    );
                }
                Ok(ops::transit_auto_time_ratio(transit, auto))
            }
            Metric::TravelTime => {
                let source = ColumnarSource::new(&data_files.trip_records);
                let means = query_ops::mean_by_category(
                    &source,
                    TRAVEL_TIME_COLUMN,
                    MAIN_MODE_COLUMN,
                    &[ops::TRANSIT_MODE],
                )?;
                Ok(ops::travel_time(means[0], metadata.travel_time_baseline))
            }
            Metric::Productivity => {
                let source = ColumnarSource::new(&data_files.bus_pax_records);
                let riders = query_ops::count_distinct(&source, PERSON_ID_COLUMN)?;
                Ok(ops::productivity(metadata.total_service_hours, riders))
            }
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::Metric;
    use crate::configuration::{DataFiles, Metadata};

    #[test]
    fn test_service_coverage_needs_no_files() {
        let data_files = DataFiles {
            bus_pax_records: String::from("/nonexistent/pax.arrow"),
            bus_delay_records: String::from("/nonexistent/delay.arrow"),
            trip_records: String::from("/nonexistent/trips.arrow"),
        };
        let metadata = Metadata {
            total_population: 1000.0,
            early_headway_tolerance: 1.0,
            late_headway_tolerance: 5.0,
            travel_time_baseline: 10.0,
            total_service_hours: 100.0,
            service_coverage: 0.42,
        };
        let value = Metric::ServiceCoverage
            .compute(&data_files, &metadata)
            .expect("should not read any file");
        assert_eq!(value, 0.42);
        assert!(Metric::Ridership.compute(&data_files, &metadata).is_err());
    }

    #[test]
    fn test_keys_and_formatting() {
        let keys: Vec<&str> = Metric::ALL.iter().map(|m| m.key()).collect();
        assert_eq!(
            keys,
            vec![
                "service_coverage",
                "ridership",
                "on_time_performance",
                "transit_auto_time_ratio",
                "travel_time",
                "productivity"
            ]
        );
        assert_eq!(Metric::Ridership.format_value(0.05), "5.0000%");
        assert_eq!(Metric::TravelTime.format_value(0.36787944), "0.3679");
        assert_eq!(
            serde_json::to_string(&Metric::OnTimePerformance).unwrap(),
            "\"on_time_performance\""
        );
    }
}
