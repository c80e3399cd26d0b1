mod config_error;
pub mod config_ops;
mod data_files;
mod metadata;
mod metadata_error;
mod scoring_config;
mod scoring_weights;

pub use config_error::ConfigError;
pub use data_files::DataFiles;
pub use metadata::Metadata;
pub use metadata_error::MetadataError;
pub use scoring_config::ScoringConfig;
pub use scoring_weights::ScoringWeights;
