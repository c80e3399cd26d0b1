//! scoring formulas for each metric, free of any I/O.
//!
//! data files record times in seconds while the metadata tolerances and
//! baselines are in minutes.

pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// `main_mode` value for public transit trips
pub const TRANSIT_MODE: &str = "pt";
/// `main_mode` value for private auto trips
pub const AUTO_MODE: &str = "car";

/// stands in for an undefined transit travel time, driving `exp(-x)` to 0
pub const MISSING_TRANSIT_TRAVEL_TIME: f64 = 1e9;
/// stands in for an undefined auto travel time
pub const MISSING_AUTO_TRAVEL_TIME: f64 = 1.0;
/// stands in for service hours per rider when there were no riders
pub const NO_RIDERS_SERVICE_HOURS_PER_RIDER: f64 = 1e9;

/// share of the population that boarded a bus at least once. not clamped:
/// inconsistent inputs with more riders than residents pass through above 1.
pub fn ridership(distinct_riders: usize, total_population: f64) -> f64 {
    distinct_riders as f64 / total_population
}

/// inclusive window of acceptable arrival delays in seconds, built from
/// tolerances in minutes. early arrivals have negative delay.
pub fn on_time_window(early_tolerance: f64, late_tolerance: f64) -> (f64, f64) {
    (
        -SECONDS_PER_MINUTE * early_tolerance,
        SECONDS_PER_MINUTE * late_tolerance,
    )
}

/// fraction of arrivals within the on-time window. an empty delay dataset
/// scores 0.
pub fn on_time_performance(on_time: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        on_time as f64 / total as f64
    }
}

/// `exp(-transit / auto)` over mean travel times, with sentinels substituted
/// for modes that had no trips. a zero auto travel time scores 0, which keeps
/// `0 / 0` out of the score.
pub fn transit_auto_time_ratio(transit_mean: Option<f64>, auto_mean: Option<f64>) -> f64 {
    let transit = transit_mean.unwrap_or(MISSING_TRANSIT_TRAVEL_TIME);
    let auto = auto_mean.unwrap_or(MISSING_AUTO_TRAVEL_TIME);
    if auto == 0.0 {
        return 0.0;
    }
    (-(transit / auto)).exp()
}

/// `exp(-transit / baseline)` where the mean transit travel time is in seconds
/// and the baseline in minutes.
pub fn travel_time(transit_mean: Option<f64>, travel_time_baseline: f64) -> f64 {
    let transit = transit_mean.unwrap_or(MISSING_TRANSIT_TRAVEL_TIME);
    (-(transit / (SECONDS_PER_MINUTE * travel_time_baseline))).exp()
}

/// `exp(-service_hours / riders)`, so more service hours per rider scores lower.
pub fn productivity(total_service_hours: f64, distinct_riders: usize) -> f64 {
    let hours_per_rider = if distinct_riders == 0 {
        NO_RIDERS_SERVICE_HOURS_PER_RIDER
    } else {
        total_service_hours / distinct_riders as f64
    };
    (-hours_per_rider).exp()
}
