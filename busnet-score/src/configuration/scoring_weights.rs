use serde::{Deserialize, Serialize};

use crate::metric::Metric;

/// coefficients applied to each score component. every weight is required,
/// there are no defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub service_coverage: f64,
    pub ridership: f64,
    pub travel_time: f64,
    pub transit_auto_time_ratio: f64,
    pub on_time_performance: f64,
    pub productivity: f64,
}

impl ScoringWeights {
    pub fn get(&self, metric: &Metric) -> f64 {
        match metric {
            Metric::ServiceCoverage => self.service_coverage,
            Metric::Ridership => self.ridership,
            Metric::OnTimePerformance => self.on_time_performance,
            Metric::TransitAutoTimeRatio => self.transit_auto_time_ratio,
            Metric::TravelTime => self.travel_time,
            Metric::Productivity => self.productivity,
        }
    }
}
