use serde::{Deserialize, Serialize};
use std::path::Path;

/// on-disk layouts understood by [`super::ColumnarSource`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColumnarFormat {
    /// Arrow IPC file format (random access, a.k.a. Feather v2)
    #[default]
    ArrowFile,
    /// Arrow IPC streaming format
    ArrowStream,
    Parquet,
}

impl ColumnarFormat {
    /// picks a format from the file extension. anything unrecognized is
    /// treated as an Arrow IPC file, which is what the simulation writes.
    pub fn from_path(path: &str) -> ColumnarFormat {
        let extension = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match extension.as_deref() {
            Some("parquet") | Some("pq") => ColumnarFormat::Parquet,
            Some("arrows") => ColumnarFormat::ArrowStream,
            _ => ColumnarFormat::ArrowFile,
        }
    }
}

impl std::fmt::Display for ColumnarFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ColumnarFormat::ArrowFile => "arrow_file",
            ColumnarFormat::ArrowStream => "arrow_stream",
            ColumnarFormat::Parquet => "parquet",
        };
        write!(f, "{s}")
    }
}
