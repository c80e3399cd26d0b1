use rayon::prelude::*;
use rstar::RTree;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::transit_schedule;
use super::{CoverageError, CoverageSummary, LocationRow};

/// where stop locations are read from.
#[derive(Debug, Clone, PartialEq)]
pub enum StopInput {
    /// CSV of stop locations, optionally flagged with an `active` column
    LocationFile(String),
    /// MATSim transit schedule XML (optionally gzipped). a stop is active
    /// when some route profile references it.
    TransitSchedule(String),
}

impl StopInput {
    pub fn read(&self) -> Result<Vec<LocationRow>, CoverageError> {
        match self {
            StopInput::LocationFile(filepath) => {
                log::info!("reading stop locations from '{filepath}'");
                read_locations(filepath)
            }
            StopInput::TransitSchedule(filepath) => {
                log::info!("reading transit schedule from '{filepath}'");
                let schedule = transit_schedule::read_schedule(filepath)?;
                Ok(schedule.active_stops())
            }
        }
    }
}

/// reads a CSV of projected locations with `x`,`y` and an optional `active` column.
pub fn read_locations(filepath: &str) -> Result<Vec<LocationRow>, CoverageError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(filepath)
        .map_err(|e| CoverageError::ReadError {
            filepath: filepath.to_string(),
            source: e,
        })?;
    reader
        .into_deserialize::<LocationRow>()
        .enumerate()
        .map(|(row, r)| {
            r.map_err(|e| CoverageError::RowError {
                filepath: filepath.to_string(),
                row,
                source: e,
            })
        })
        .collect()
}

/// counts homes within `radius` meters (inclusive) of at least one active stop.
pub fn compute_coverage(
    stops: &[LocationRow],
    homes: &[LocationRow],
    radius: f64,
) -> Result<CoverageSummary, CoverageError> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(CoverageError::InvalidRadius(radius));
    }
    let active_stops: Vec<[f64; 2]> = stops
        .iter()
        .filter(|s| s.is_active())
        .map(LocationRow::coord)
        .collect();
    if active_stops.is_empty() {
        log::warn!("no active stops found, coverage is 0");
        return Ok(CoverageSummary::new(0, homes.len(), radius));
    }
    log::debug!(
        "indexing {} active stops of {} total",
        active_stops.len(),
        stops.len()
    );
    let rtree = RTree::bulk_load(active_stops);
    let max_distance_2 = radius * radius;
    let covered = homes
        .par_iter()
        .filter(|home| {
            rtree
                .locate_within_distance(home.coord(), max_distance_2)
                .next()
                .is_some()
        })
        .count();
    Ok(CoverageSummary::new(covered, homes.len(), radius))
}

/// reads the stops and homes inputs and computes their coverage.
pub fn run(
    stops: &StopInput,
    homes_file: &str,
    radius: f64,
) -> Result<CoverageSummary, CoverageError> {
    let stops = stops.read()?;
    log::info!("reading home locations from '{homes_file}'");
    let homes = read_locations(homes_file)?;
    log::info!("calculating coverage with radius {radius}m...");
    let summary = compute_coverage(&stops, &homes, radius)?;
    log::info!(
        "covered population: {} / {} ({:.2}%)",
        summary.covered_population,
        summary.total_population,
        summary.coverage * 100.0
    );
    Ok(summary)
}

pub fn write_summary<P>(summary: &CoverageSummary, filepath: P) -> Result<(), CoverageError>
where
    P: AsRef<Path>,
{
    let path = filepath.as_ref();
    let filename = path.to_str().unwrap_or_default().to_string();
    let file = File::create(path).map_err(|e| CoverageError::WriteError {
        filepath: filename.clone(),
        error: e.to_string(),
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary).map_err(|e| CoverageError::WriteError {
        filepath: filename.clone(),
        error: e.to_string(),
    })?;
    writer.flush().map_err(|e| CoverageError::WriteError {
        filepath: filename,
        error: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{compute_coverage, read_locations, write_summary};
    use crate::coverage::{CoverageError, CoverageSummary, LocationRow};

    fn loc(x: f64, y: f64) -> LocationRow {
        LocationRow {
            x,
            y,
            active: None,
        }
    }

    #[test]
    fn test_coverage_radius_is_inclusive() {
        let stops = vec![loc(0.0, 0.0)];
        let homes = vec![loc(400.0, 0.0), loc(0.0, 399.0), loc(400.1, 0.0), loc(300.0, 300.0)];
        let summary = compute_coverage(&stops, &homes, 400.0).expect("should compute");
        assert_eq!(summary.covered_population, 2);
        assert_eq!(summary.total_population, 4);
        assert_eq!(summary.coverage, 0.5);
    }

    #[test]
    fn test_inactive_stops_ignored() {
        let stops = vec![
            LocationRow {
                x: 0.0,
                y: 0.0,
                active: Some(false),
            },
            LocationRow {
                x: 1000.0,
                y: 1000.0,
                active: Some(true),
            },
        ];
        let homes = vec![loc(10.0, 10.0), loc(1010.0, 990.0)];
        let summary = compute_coverage(&stops, &homes, 100.0).unwrap();
        assert_eq!(summary.covered_population, 1);
    }

    #[test]
    fn test_empty_inputs() {
        let summary = compute_coverage(&[], &[loc(0.0, 0.0)], 400.0).unwrap();
        assert_eq!(summary.coverage, 0.0);
        assert_eq!(summary.total_population, 1);
        let summary = compute_coverage(&[loc(0.0, 0.0)], &[], 400.0).unwrap();
        assert_eq!(summary.coverage, 0.0);
        assert_eq!(summary.total_population, 0);
    }

    #[test]
    fn test_invalid_radius() {
        let result = compute_coverage(&[loc(0.0, 0.0)], &[loc(0.0, 0.0)], -1.0);
        assert!(matches!(result, Err(CoverageError::InvalidRadius(_))));
    }

    #[test]
    fn test_read_locations() {
        let dir =
            std::env::temp_dir().join(format!("busnet-score-coverage-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let stops = dir.join("stops.csv");
        std::fs::write(&stops, "x,y,active\n0.0,0.0,true\n5.5, 6.5,false\n1,2,\n").unwrap();
        let rows = read_locations(stops.to_str().unwrap()).expect("should read");
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_active());
        assert!(!rows[1].is_active());
        assert_eq!(rows[1].y, 6.5);
        assert!(rows[2].is_active());

        let bad = dir.join("bad.csv");
        std::fs::write(&bad, "x,y\n1.0,north\n").unwrap();
        let result = read_locations(bad.to_str().unwrap());
        assert!(matches!(result, Err(CoverageError::RowError { row: 0, .. })));
    }

    #[test]
    fn test_write_summary() {
        let dir =
            std::env::temp_dir().join(format!("busnet-score-summary-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("coverage.json");
        let summary = CoverageSummary::new(3, 4, 400.0);
        write_summary(&summary, &path).expect("should write summary");
        let read: CoverageSummary =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read, summary);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_summary_full_device_fails() {
        let summary = CoverageSummary::new(3, 4, 400.0);
        let result = write_summary(&summary, "/dev/full");
        assert!(
            matches!(result, Err(CoverageError::WriteError { .. })),
            "{result:?}"
        );
    }
}
