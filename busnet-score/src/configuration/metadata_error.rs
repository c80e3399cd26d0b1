#[derive(thiserror::Error, Debug)]
pub enum MetadataError {
    #[error("unsupported metadata file type: {0}")]
    UnsupportedFileType(String),
    #[error("{msg}: {source}")]
    MetadataReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error("invalid metadata value for '{key}': {value} ({expected})")]
    InvalidValue {
        key: &'static str,
        value: f64,
        expected: &'static str,
    },
}
