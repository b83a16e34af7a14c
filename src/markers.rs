use chrono::DateTime;
use serde::Serialize;

use crate::encoding::{magnitude_color, marker_radius};
use crate::feed::EarthquakeRecord;

/// Everything the map page needs to draw one earthquake circle.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerSpec {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
    pub color: String,
    pub popup_text: String,
}

/// Converts earthquake records into marker specs, one per record, in input
/// order. No filtering: negative and missing magnitudes still produce a
/// (minimal, palest) marker.
pub fn build_markers(records: &[EarthquakeRecord]) -> Vec<MarkerSpec> {
    records
        .iter()
        .map(|record| MarkerSpec {
            latitude: record.latitude,
            longitude: record.longitude,
            radius: marker_radius(record.magnitude),
            color: magnitude_color(record.magnitude).to_string(),
            popup_text: popup_text(record),
        })
        .collect()
}

/// Popup block: place, event time, raw magnitude.
fn popup_text(record: &EarthquakeRecord) -> String {
    format!(
        "<h3>{}</h3><hr><p>{}</p><hr><p>Magnitude: {}</p>",
        record.place,
        format_event_time(record.time_millis),
        record.magnitude
    )
}

fn format_event_time(time_millis: Option<i64>) -> String {
    time_millis
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Unknown time".to_string())
}
