//! population service coverage: the share of homes within walking distance of
//! an active stop. produces the `service_coverage` metadata value. active stops
//! come from a MATSim transit schedule or from a CSV of stop locations.
mod coverage_error;
pub mod coverage_ops;
mod coverage_summary;
mod location_row;
pub mod transit_schedule;

pub use coverage_error::CoverageError;
pub use coverage_ops::StopInput;
pub use coverage_summary::CoverageSummary;
pub use location_row::LocationRow;

/// default walking radius to a stop, in meters
pub const DEFAULT_COVERAGE_RADIUS: f64 = 400.0;
