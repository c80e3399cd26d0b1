//! Computes a system-wide performance score for a simulated bus transit network.
//!
//! Five sub-metrics are aggregated from columnar simulation outputs (Arrow IPC or
//! Parquet), a sixth is supplied by the run metadata, and the weighted sum is
//! written as a single big-endian `f64`.
pub mod app;
pub mod configuration;
pub mod coverage;
pub mod metric;
pub mod query;
pub mod score;
