#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("unsupported configuration file type: {0}")]
    UnsupportedFileType(String),
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
}
