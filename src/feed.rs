use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Base URL of the USGS earthquake summary feed.
const FEED_BASE: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// Tectonic plate boundary dataset (Bird 2002), served as static GeoJSON.
pub const TECTONIC_PLATES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

/// Feed window offered by the USGS summary endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    #[default]
    AllDay,
    AllWeek,
    AllMonth,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::AllDay => "all_day",
            Timeframe::AllWeek => "all_week",
            Timeframe::AllMonth => "all_month",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all_day" => Ok(Timeframe::AllDay),
            "all_week" => Ok(Timeframe::AllWeek),
            "all_month" => Ok(Timeframe::AllMonth),
            other => Err(format!("unknown timeframe: {}", other)),
        }
    }
}

/// Builds the query URL for the given feed window.
pub fn feed_url(timeframe: Timeframe) -> String {
    format!("{}/{}.geojson", FEED_BASE, timeframe.as_str())
}

// Typed view of the USGS GeoJSON response. Only the fields the map needs;
// serde ignores the rest.
#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub properties: Properties,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Properties {
    pub mag: Option<f64>,
    pub place: Option<String>,
    pub time: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// `[longitude, latitude, depth]` per the GeoJSON point convention.
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

/// One earthquake event, flattened out of the feed geometry/properties.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeRecord {
    /// NaN when the feed carried no magnitude; the encoders treat NaN as
    /// below every threshold, so such events still render (smallest, palest).
    pub magnitude: f64,
    pub longitude: f64,
    pub latitude: f64,
    pub place: String,
    /// Event time in epoch milliseconds; `None` when the feed omitted it.
    pub time_millis: Option<i64>,
}

/// Flattens a feed response into earthquake records, preserving feed order.
///
/// Features whose geometry has fewer than two coordinates cannot be placed
/// on the map and are skipped with a warning; everything else passes
/// through, including events with missing magnitude or place.
pub fn extract_records(collection: &FeatureCollection) -> Vec<EarthquakeRecord> {
    collection
        .features
        .iter()
        .filter_map(|feature| {
            let coords = &feature.geometry.coordinates;
            let (Some(&lon), Some(&lat)) = (coords.first(), coords.get(1)) else {
                tracing::warn!(
                    place = feature.properties.place.as_deref().unwrap_or("?"),
                    "skipping feature without point coordinates"
                );
                return None;
            };
            Some(EarthquakeRecord {
                magnitude: feature.properties.mag.unwrap_or(f64::NAN),
                longitude: lon,
                latitude: lat,
                place: feature
                    .properties
                    .place
                    .clone()
                    .unwrap_or_else(|| "Unknown location".to_string()),
                time_millis: feature.properties.time,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> FeatureCollection {
        serde_json::from_str(json).expect("test GeoJSON should parse")
    }

    #[test]
    fn test_feed_url_per_timeframe() {
        assert_eq!(
            feed_url(Timeframe::AllDay),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson"
        );
        assert_eq!(
            feed_url(Timeframe::AllWeek),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson"
        );
        assert_eq!(
            feed_url(Timeframe::AllMonth),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_month.geojson"
        );
    }

    #[test]
    fn test_timeframe_round_trips_through_str() {
        for tf in [Timeframe::AllDay, Timeframe::AllWeek, Timeframe::AllMonth] {
            assert_eq!(tf.as_str().parse::<Timeframe>(), Ok(tf));
        }
        assert!("yesterday".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_extract_preserves_order_and_fields() {
        let collection = parse(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "properties": {"mag": 2.5, "place": "10km N of Somewhere", "time": 1700000000000},
                        "geometry": {"type": "Point", "coordinates": [-122.1, 47.6, 10.0]}
                    },
                    {
                        "properties": {"mag": 0.8, "place": "Elsewhere", "time": 1700000100000},
                        "geometry": {"type": "Point", "coordinates": [13.4, 52.5, 8.2]}
                    }
                ]
            }"#,
        );

        let records = extract_records(&collection);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].magnitude, 2.5);
        assert_eq!(records[0].longitude, -122.1);
        assert_eq!(records[0].latitude, 47.6);
        assert_eq!(records[0].place, "10km N of Somewhere");
        assert_eq!(records[0].time_millis, Some(1700000000000));
        assert_eq!(records[1].place, "Elsewhere");
    }

    #[test]
    fn test_missing_magnitude_becomes_nan_not_dropped() {
        let collection = parse(
            r#"{
                "features": [
                    {
                        "properties": {"place": "Quiet spot", "time": 0},
                        "geometry": {"coordinates": [1.0, 2.0, 3.0]}
                    }
                ]
            }"#,
        );

        let records = extract_records(&collection);
        assert_eq!(records.len(), 1);
        assert!(records[0].magnitude.is_nan());
    }

    #[test]
    fn test_missing_time_is_carried_as_none() {
        let collection = parse(
            r#"{
                "features": [
                    {
                        "properties": {"mag": 1.5, "place": "Undated"},
                        "geometry": {"coordinates": [1.0, 2.0]}
                    }
                ]
            }"#,
        );

        let records = extract_records(&collection);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].time_millis, None);
    }

    #[test]
    fn test_missing_place_gets_placeholder() {
        let collection = parse(
            r#"{
                "features": [
                    {
                        "properties": {"mag": 1.1, "time": 0},
                        "geometry": {"coordinates": [1.0, 2.0]}
                    }
                ]
            }"#,
        );

        let records = extract_records(&collection);
        assert_eq!(records[0].place, "Unknown location");
    }

    #[test]
    fn test_short_coordinates_are_skipped() {
        let collection = parse(
            r#"{
                "features": [
                    {
                        "properties": {"mag": 4.0, "place": "Broken", "time": 0},
                        "geometry": {"coordinates": [9.9]}
                    },
                    {
                        "properties": {"mag": 3.0, "place": "Fine", "time": 0},
                        "geometry": {"coordinates": [1.0, 2.0]}
                    }
                ]
            }"#,
        );

        let records = extract_records(&collection);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].place, "Fine");
    }

    #[test]
    fn test_empty_collection_yields_no_records() {
        let collection = parse(r#"{"features": []}"#);
        assert!(extract_records(&collection).is_empty());
    }
}
