use config::{Config, ConfigError, FileFormat};
use std::path::Path;

/// infers a [`FileFormat`] from the file extension, or None when the extension
/// is not a supported key-value format.
pub fn file_format<P>(filepath: P) -> Option<FileFormat>
where
    P: AsRef<Path>,
{
    let extension = filepath.as_ref().extension()?.to_str()?.to_lowercase();
    match extension.as_str() {
        "yaml" | "yml" => Some(FileFormat::Yaml),
        "toml" => Some(FileFormat::Toml),
        "json" => Some(FileFormat::Json),
        _ => None,
    }
}

/// builds a [`Config`] from a single required file source.
pub fn read_config(filepath: &str, format: FileFormat) -> Result<Config, ConfigError> {
    let source = config::File::new(filepath, format).required(true);
    Config::builder().add_source(source).build()
}
