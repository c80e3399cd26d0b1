use flate2::read::GzDecoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use super::{CoverageError, LocationRow};

const TRANSIT_STOPS: &[u8] = b"transitStops";
const ROUTE_PROFILE: &[u8] = b"routeProfile";
const STOP_FACILITY: &str = "stopFacility";
const ROUTE_STOP: &str = "stop";

/// the stop facilities of a MATSim transit schedule along with the ids of
/// stops that appear in at least one route profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitSchedule {
    stop_facilities: HashMap<String, [f64; 2]>,
    referenced_stops: BTreeSet<String>,
}

impl TransitSchedule {
    pub fn stop_facility_count(&self) -> usize {
        self.stop_facilities.len()
    }

    pub fn referenced_stop_count(&self) -> usize {
        self.referenced_stops.len()
    }

    /// locations of stops served by some route, ordered by stop id. a route
    /// stop without a matching facility is logged and skipped.
    pub fn active_stops(&self) -> Vec<LocationRow> {
        self.referenced_stops
            .iter()
            .filter_map(|id| match self.stop_facilities.get(id) {
                Some([x, y]) => Some(LocationRow {
                    x: *x,
                    y: *y,
                    active: Some(true),
                }),
                None => {
                    log::warn!("stop '{id}' is used by a route but has no stop facility");
                    None
                }
            })
            .collect()
    }

    fn visit(
        &mut self,
        element: &BytesStart,
        parents: &[Vec<u8>],
        filepath: &str,
    ) -> Result<(), CoverageError> {
        let parent = parents.last().map(Vec::as_slice);
        match element.local_name().as_ref() {
            // facilities usually sit in <transitStops>, older files put them under the root
            b"stopFacility" if parent == Some(TRANSIT_STOPS) || parents.len() == 1 => {
                let id = required_attribute(element, "id", STOP_FACILITY, filepath)?;
                let x = coordinate(element, "x", filepath)?;
                let y = coordinate(element, "y", filepath)?;
                self.stop_facilities.insert(id, [x, y]);
                Ok(())
            }
            b"stop" if parent == Some(ROUTE_PROFILE) => {
                let ref_id = required_attribute(element, "refId", ROUTE_STOP, filepath)?;
                self.referenced_stops.insert(ref_id);
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// reads a MATSim transit schedule, which may be gzipped.
pub fn read_schedule(filepath: &str) -> Result<TransitSchedule, CoverageError> {
    let file = File::open(filepath).map_err(|e| CoverageError::ScheduleOpenError {
        filepath: filepath.to_string(),
        source: e,
    })?;
    let r: Box<dyn Read> = if is_gzip(filepath) {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let schedule = parse_schedule(BufReader::new(r), filepath)?;
    log::info!(
        "found {} stop facilities, {} referenced by routes",
        schedule.stop_facility_count(),
        schedule.referenced_stop_count()
    );
    Ok(schedule)
}

fn parse_schedule<R: BufRead>(source: R, filepath: &str) -> Result<TransitSchedule, CoverageError> {
    let mut reader = Reader::from_reader(source);
    let mut schedule = TransitSchedule::default();
    let mut parents: Vec<Vec<u8>> = Vec::new();
    let mut buf = Vec::new();
    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            CoverageError::ScheduleParseError {
                filepath: filepath.to_string(),
                position: reader.error_position(),
                source: e,
            }
        })?;
        match event {
            Event::Start(e) => {
                schedule.visit(&e, &parents, filepath)?;
                parents.push(e.local_name().as_ref().to_vec());
            }
            Event::Empty(e) => schedule.visit(&e, &parents, filepath)?,
            Event::End(_) => {
                parents.pop();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(schedule)
}

fn required_attribute(
    element: &BytesStart,
    name: &str,
    element_name: &'static str,
    filepath: &str,
) -> Result<String, CoverageError> {
    let attribute = element
        .try_get_attribute(name)
        .map_err(|e| element_error(filepath, element_name, e.to_string()))?
        .ok_or_else(|| element_error(filepath, element_name, format!("missing '{name}'")))?;
    let value = attribute
        .unescape_value()
        .map_err(|e| element_error(filepath, element_name, e.to_string()))?;
    Ok(value.into_owned())
}

fn coordinate(element: &BytesStart, name: &str, filepath: &str) -> Result<f64, CoverageError> {
    let value = required_attribute(element, name, STOP_FACILITY, filepath)?;
    value.trim().parse::<f64>().map_err(|e| {
        element_error(
            filepath,
            STOP_FACILITY,
            format!("invalid '{name}' value '{value}': {e}"),
        )
    })
}

fn element_error(filepath: &str, element: &'static str, error: String) -> CoverageError {
    CoverageError::ScheduleElementError {
        filepath: filepath.to_string(),
        element,
        error,
    }
}

fn is_gzip(filepath: &str) -> bool {
    Path::new(filepath)
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"))
}

#[cfg(test)]
mod tests {
    use super::{parse_schedule, read_schedule};
    use crate::coverage::coverage_ops::compute_coverage;
    use crate::coverage::{CoverageError, LocationRow};
    use flate2::{write::GzEncoder, Compression};
    use std::io::Write;

    const SCHEDULE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE transitSchedule SYSTEM "http://www.matsim.org/files/dtd/transitSchedule_v2.dtd">
<transitSchedule>
  <transitStops>
    <stopFacility id="central" x="0.0" y="0.0" linkRefId="l1" isBlocking="false"/>
    <stopFacility id="depot" x="5000.0" y="0.0" isBlocking="false"/>
    <stopFacility id="market" x="1000.0" y="0.0" name="Market &amp; 5th">
      <attributes>
        <attribute name="zone" class="java.lang.String">a</attribute>
      </attributes>
    </stopFacility>
  </transitStops>
  <transitLine id="line_1">
    <transitRoute id="route_1">
      <transportMode>bus</transportMode>
      <routeProfile>
        <stop refId="central" departureOffset="00:00:00" awaitDeparture="true"/>
        <stop refId="market" arrivalOffset="00:03:00"/>
        <stop refId="ghost" arrivalOffset="00:06:00"/>
      </routeProfile>
      <route>
        <link refId="l1"/>
      </route>
      <departures>
        <departure id="d1" departureTime="06:00:00" vehicleRefId="bus_1"/>
      </departures>
    </transitRoute>
  </transitLine>
</transitSchedule>
"#;

    fn home(x: f64, y: f64) -> LocationRow {
        LocationRow { x, y, active: None }
    }

    #[test]
    fn test_only_route_stops_are_active() {
        let schedule = parse_schedule(SCHEDULE.as_bytes(), "schedule.xml").expect("should parse");
        assert_eq!(schedule.stop_facility_count(), 3);
        assert_eq!(schedule.referenced_stop_count(), 3);
        let stops = schedule.active_stops();
        let coords: Vec<[f64; 2]> = stops.iter().map(LocationRow::coord).collect();
        assert_eq!(coords, vec![[0.0, 0.0], [1000.0, 0.0]]);
    }

    #[test]
    fn test_unserved_stop_does_not_cover_homes() {
        let schedule = parse_schedule(SCHEDULE.as_bytes(), "schedule.xml").unwrap();
        // the first home sits next to the depot, which no route serves
        let homes = vec![home(5000.0, 10.0), home(990.0, 0.0)];
        let summary = compute_coverage(&schedule.active_stops(), &homes, 400.0).unwrap();
        assert_eq!(summary.covered_population, 1);
        assert_eq!(summary.coverage, 0.5);
    }

    #[test]
    fn test_read_gzipped_schedule() {
        let dir =
            std::env::temp_dir().join(format!("busnet-score-schedule-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("transitSchedule.xml.gz");
        let mut encoder = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
        encoder.write_all(SCHEDULE.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let schedule = read_schedule(path.to_str().unwrap()).expect("should read gzip");
        assert_eq!(schedule.active_stops().len(), 2);
    }

    #[test]
    fn test_invalid_coordinate_fails() {
        let xml = r#"<transitSchedule><transitStops>
            <stopFacility id="a" x="east" y="0"/>
        </transitStops></transitSchedule>"#;
        let result = parse_schedule(xml.as_bytes(), "bad.xml");
        assert!(
            matches!(result, Err(CoverageError::ScheduleElementError { .. })),
            "{result:?}"
        );
    }

    #[test]
    fn test_missing_schedule_fails() {
        let result = read_schedule("/nonexistent/busnet/transitSchedule.xml");
        assert!(matches!(result, Err(CoverageError::ScheduleOpenError { .. })));
    }
}
