//! JSON catalog loader.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{Route, RouteId, StationCatalog, StationRef};

use super::error::StationError;

/// Keys checked first when the records sit inside a wrapper object.
const RECORD_KEYS: [&str; 3] = ["DATA", "data", "routes"];

/// One route record as it appears in the file.
///
/// Open-data exports disagree on key casing and on whether IDs are
/// strings or numbers, so scalar fields are kept as raw JSON values.
#[derive(Debug, Deserialize)]
struct RouteRecord {
    #[serde(
        rename = "route_id",
        alias = "busRouteId",
        alias = "bus_route_id",
        alias = "ROUTE_ID",
        default
    )]
    route_id: Option<Value>,

    #[serde(
        rename = "route_nm",
        alias = "busRouteNm",
        alias = "route_name",
        alias = "ROUTE_NM",
        default
    )]
    route_nm: Option<Value>,

    #[serde(default)]
    stations: Vec<StationRecord>,
}

#[derive(Debug, Deserialize)]
struct StationRecord {
    #[serde(alias = "stId", alias = "sttn_id", alias = "STTN_ID")]
    id: Value,

    #[serde(alias = "stNm", alias = "sttn_nm", alias = "STTN_NM", default)]
    name: Option<Value>,
}

/// Load the route catalog from a JSON file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<StationCatalog, StationError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let catalog = parse_catalog(&contents)?;
    info!(path = %path.display(), routes = catalog.len(), "loaded route catalog");
    Ok(catalog)
}

/// Parse a catalog document.
///
/// Accepts either a top-level array of records, or an object holding the
/// records in an array member (`DATA`, `data` or `routes`, else the first
/// array-valued member in key order). Records without a usable route ID
/// are skipped, as are records that are not objects of the expected shape.
pub fn parse_catalog(json: &str) -> Result<StationCatalog, StationError> {
    let document: Value = serde_json::from_str(json)?;
    let records = find_records(document).ok_or(StationError::MissingRecords)?;

    let mut routes = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let record: RouteRecord = match serde_json::from_value(record) {
            Ok(record) => record,
            Err(e) => {
                warn!(index, error = %e, "skipping malformed catalog record");
                continue;
            }
        };
        match to_route(record) {
            Some(route) => routes.push(route),
            None => warn!(index, "skipping catalog record without a route ID"),
        }
    }

    Ok(StationCatalog::new(routes)?)
}

fn find_records(document: Value) -> Option<Vec<Value>> {
    match document {
        Value::Array(records) => Some(records),
        Value::Object(mut map) => {
            for key in RECORD_KEYS {
                if let Some(Value::Array(records)) = map.remove(key) {
                    return Some(records);
                }
            }
            map.into_iter().find_map(|(_, v)| match v {
                Value::Array(records) => Some(records),
                _ => None,
            })
        }
        _ => None,
    }
}

fn to_route(record: RouteRecord) -> Option<Route> {
    let route_id = scalar_text(record.route_id.as_ref()?)?;
    let route_id = RouteId::parse(&route_id).ok()?;

    let stations = record
        .stations
        .into_iter()
        .filter_map(|s| {
            Some(StationRef {
                id: scalar_text(&s.id)?,
                name: s.name.as_ref().and_then(scalar_text),
            })
        })
        .collect();

    let route = Route::new(route_id).with_stations(stations);
    Some(match record.route_nm.as_ref().and_then(scalar_text) {
        Some(name) => route.with_name(name),
        None => route,
    })
}

/// String or number as trimmed text; anything else is absent.
fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
