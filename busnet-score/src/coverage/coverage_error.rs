#[derive(thiserror::Error, Debug)]
pub enum CoverageError {
    #[error("failure reading '{filepath}': {source}")]
    ReadError {
        filepath: String,
        source: csv::Error,
    },
    #[error("failure reading row {row} of '{filepath}': {source}")]
    RowError {
        filepath: String,
        row: usize,
        source: csv::Error,
    },
    #[error("failure opening transit schedule '{filepath}': {source}")]
    ScheduleOpenError {
        filepath: String,
        source: std::io::Error,
    },
    #[error("failure parsing transit schedule '{filepath}' at byte {position}: {source}")]
    ScheduleParseError {
        filepath: String,
        position: u64,
        source: quick_xml::Error,
    },
    #[error("invalid <{element}> in transit schedule '{filepath}': {error}")]
    ScheduleElementError {
        filepath: String,
        element: &'static str,
        error: String,
    },
    #[error("either a stops file or a transit schedule file is required")]
    MissingStopInput,
    #[error("coverage radius must be a non-negative distance in meters, found {0}")]
    InvalidRadius(f64),
    #[error("failure writing coverage summary to '{filepath}': {error}")]
    WriteError { filepath: String, error: String },
}
