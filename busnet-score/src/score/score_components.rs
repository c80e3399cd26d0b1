use serde::{Deserialize, Serialize};

use crate::configuration::ScoringWeights;
use crate::metric::Metric;

/// the computed value of every [`Metric`] for one scoring run.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreComponents {
    pub service_coverage: f64,
    pub ridership: f64,
    pub on_time_performance: f64,
    pub transit_auto_time_ratio: f64,
    pub travel_time: f64,
    pub productivity: f64,
}

impl ScoreComponents {
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

    pub fn set(&mut self, metric: &Metric, value: f64) {
        let slot = match metric {
            Metric::ServiceCoverage => &mut self.service_coverage,
            Metric::Ridership => &mut self.ridership,
            Metric::OnTimePerformance => &mut self.on_time_performance,
            Metric::TransitAutoTimeRatio => &mut self.transit_auto_time_ratio,
            Metric::TravelTime => &mut self.travel_time,
            Metric::Productivity => &mut self.productivity,
        };
        *slot = value;
    }

    /// weighted contribution of a single metric to the score.
    pub fn contribution(&self, weights: &ScoringWeights, metric: &Metric) -> f64 {
        weights.get(metric) * self.get(metric)
    }

    /// `Σ weight * component`, added left to right in [`Metric::SUMMATION_ORDER`].
    /// no normalization or clamping is applied.
    pub fn weighted_sum(&self, weights: &ScoringWeights) -> f64 {
        Metric::SUMMATION_ORDER
            .iter()
            .map(|m| self.contribution(weights, m))
            .reduce(|acc, c| acc + c)
            .unwrap_or_default()
    }
}

impl FromIterator<(Metric, f64)> for ScoreComponents {
    fn from_iter<T: IntoIterator<Item = (Metric, f64)>>(iter: T) -> Self {
        let mut components = ScoreComponents::default();
        for (metric, value) in iter {
            components.set(&metric, value);
        }
        components
    }
}
