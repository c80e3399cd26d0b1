use serde::{Deserialize, Serialize};

/// locations of the simulation outputs read by the scoring queries.
/// any path accepted by [`crate::query::ColumnarSource`] is valid here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DataFiles {
    /// one row per bus boarding, with a `person_id` column
    pub bus_pax_records: String,
    /// one row per bus stop arrival, with an `arrival_delay` column in seconds
    pub bus_delay_records: String,
    /// one row per trip, with `main_mode` and `travel_time` (seconds) columns
    pub trip_records: String,
}
