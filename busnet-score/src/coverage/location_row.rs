use serde::{Deserialize, Serialize};

/// a projected location (meters) from a stops or homes CSV file. stop files
/// may flag stops that are not served by any route with `active = false`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LocationRow {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub active: Option<bool>,
}

impl LocationRow {
    /// rows without an `active` value are considered active.
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(true)
    }

    pub fn coord(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}
