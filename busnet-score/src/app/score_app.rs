use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use super::ScoreAppError;
use crate::configuration::{Metadata, ScoringConfig};
use crate::coverage::{coverage_ops, CoverageError, StopInput, DEFAULT_COVERAGE_RADIUS};
use crate::score::{score_io, ScoreCalculator, ScoreError};

/// command line tool for scoring simulated bus transit networks
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct ScoreApp {
    #[command(subcommand)]
    pub op: ScoreOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum ScoreOperation {
    /// compute the system-wide score of a simulation run and write it as a big-endian f64
    Score {
        /// YAML, TOML or JSON file with `files.data` and `scoring.weights` sections
        #[arg(long)]
        config_file: String,
        /// YAML, TOML or JSON file with the simulation metadata constants
        #[arg(long)]
        metadata_file: String,
        /// destination of the 8-byte score file
        #[arg(long)]
        output_file: String,
        /// optional JSON file to write score components and weights
        #[arg(long)]
        report_file: Option<String>,
        /// run the metric queries in parallel
        #[arg(long, default_value_t = false)]
        parallelize: bool,
    },
    /// compute the service coverage ratio from stop and home locations
    Coverage {
        /// MATSim transit schedule XML (or .xml.gz); stops served by a route are active
        #[arg(long, required_unless_present = "stops_file")]
        schedule_file: Option<String>,
        /// CSV file with projected `x`,`y` stop locations and optional `active` column
        #[arg(long, conflicts_with = "schedule_file")]
        stops_file: Option<String>,
        /// CSV file with projected `x`,`y` home locations, one row per person
        #[arg(long)]
        homes_file: String,
        /// walking radius to a stop, in the units of the coordinates (meters)
        #[arg(long, default_value_t = DEFAULT_COVERAGE_RADIUS)]
        radius: f64,
        /// optional JSON file to write the coverage summary
        #[arg(long)]
        output_file: Option<String>,
    },
    /// print the value stored in a score file
    Inspect {
        /// a file written by the `score` operation
        score_file: String,
    },
}

impl ScoreOperation {
    pub fn run(&self) -> Result<(), ScoreAppError> {
        match self {
            ScoreOperation::Score {
                config_file,
                metadata_file,
                output_file,
                report_file,
                parallelize,
            } => {
                log::info!("reading scoring configuration from {config_file}");
                let config = ScoringConfig::try_from(config_file)?;
                log::info!("reading simulation metadata from {metadata_file}");
                let metadata = Metadata::try_from(metadata_file)?;
                let calculator =
                    ScoreCalculator::new(config, metadata).with_parallelize(*parallelize);
                let report = calculator.calculate_score(output_file)?;
                if let Some(report_file) = report_file {
                    report.write_json(report_file)?;
                    log::info!("wrote score report to {report_file}");
                }
                Ok(())
            }
            ScoreOperation::Coverage {
                schedule_file,
                stops_file,
                homes_file,
                radius,
                output_file,
            } => {
                let stops = match (schedule_file, stops_file) {
                    (Some(schedule_file), _) => StopInput::TransitSchedule(schedule_file.clone()),
                    (None, Some(stops_file)) => StopInput::LocationFile(stops_file.clone()),
                    (None, None) => return Err(CoverageError::MissingStopInput.into()),
                };
                let summary = coverage_ops::run(&stops, homes_file, *radius)?;
                if let Some(output_file) = output_file {
                    coverage_ops::write_summary(&summary, output_file)?;
                    log::info!("wrote coverage summary to {output_file}");
                }
                println!("{}", summary.coverage);
                Ok(())
            }
            ScoreOperation::Inspect { score_file } => {
                let score =
                    score_io::read_score(score_file).map_err(|e| ScoreError::ReadError {
                        filepath: score_file.clone(),
                        source: e,
                    })?;
                println!("{score}");
                Ok(())
            }
        }
    }
}
