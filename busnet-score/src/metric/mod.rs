pub mod metric_ops;
mod metric_type;

pub use metric_type::{
    Metric, ARRIVAL_DELAY_COLUMN, MAIN_MODE_COLUMN, PERSON_ID_COLUMN, TRAVEL_TIME_COLUMN,
};
