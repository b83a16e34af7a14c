use serde::Serialize;

/// Linear scale factor from magnitude to circle radius (meters on the map).
pub const RADIUS_SCALE: f64 = 30000.0;

/// Radius used for negative-magnitude events (sensor revisions) so they
/// stay visible instead of disappearing or rendering inside-out.
pub const MIN_RADIUS: f64 = 1.0;

/// Magnitude color ramp, strongest first. First threshold that the
/// magnitude reaches wins.
const COLOR_RAMP: &[(f64, &str)] = &[
    (5.0, "#bd0026"),
    (4.0, "#f03b20"),
    (3.0, "#fd8d3c"),
    (2.0, "#feb24c"),
    (1.0, "#fed976"),
];

/// Fallback color for magnitudes below 1 (including negative and NaN).
const COLOR_FLOOR: &str = "#ffffb2";

/// Maps a magnitude to a marker radius.
///
/// Total over all f64 inputs: negative magnitudes (and NaN, since the
/// comparison fails) collapse to [`MIN_RADIUS`].
pub fn marker_radius(magnitude: f64) -> f64 {
    if magnitude >= 0.0 {
        magnitude * RADIUS_SCALE
    } else {
        MIN_RADIUS
    }
}

/// Maps a magnitude to one of six fixed bucket colors.
pub fn magnitude_color(magnitude: f64) -> &'static str {
    for &(threshold, color) in COLOR_RAMP {
        if magnitude >= threshold {
            return color;
        }
    }
    COLOR_FLOOR
}

/// One row of the map legend: a magnitude range and its display color.
#[derive(Debug, Clone, Serialize)]
pub struct LegendBucket {
    pub lower_bound: f64,
    /// `None` for the open-ended top bucket (5+).
    pub upper_bound: Option<f64>,
    pub color: String,
}

/// The six fixed legend buckets: [0,1) .. [4,5) plus the open 5+ bucket.
///
/// Each bucket's color is sampled at `lower_bound + 0.1` so exact integer
/// boundaries resolve to the intended bucket under the >= thresholds.
pub fn legend_buckets() -> Vec<LegendBucket> {
    let bounds = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    bounds
        .iter()
        .enumerate()
        .map(|(i, &lower)| LegendBucket {
            lower_bound: lower,
            upper_bound: bounds.get(i + 1).copied(),
            color: magnitude_color(lower + 0.1).to_string(),
        })
        .collect()
}
