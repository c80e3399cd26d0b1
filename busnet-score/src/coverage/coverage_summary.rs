use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CoverageSummary {
    pub covered_population: usize,
    pub total_population: usize,
    pub radius: f64,
    /// covered / total, or 0 when there are no homes or stops
    pub coverage: f64,
}

impl CoverageSummary {
    pub fn new(covered_population: usize, total_population: usize, radius: f64) -> Self {
        let coverage = if total_population == 0 {
            0.0
        } else {
            covered_population as f64 / total_population as f64
        };
        Self {
            covered_population,
            total_population,
            radius,
            coverage,
        }
    }
}
