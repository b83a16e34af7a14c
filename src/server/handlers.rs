use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
};
use serde::Serialize;

use crate::encoding::{legend_buckets, LegendBucket};
use crate::feed;
use crate::html_template;
use crate::markers::{build_markers, MarkerSpec};

use super::state::AppState;

// HTTP API Handlers

pub async fn index_html(State(state): State<AppState>) -> Html<String> {
    let token = {
        let settings = state.settings.lock().unwrap();
        settings.mapbox_token.clone()
    };
    html_template::get_map_html(token.as_deref())
}

pub async fn get_markers(State(state): State<AppState>) -> Json<Vec<MarkerSpec>> {
    let data = state.data.read().await;
    Json(data.markers.clone())
}

pub async fn get_plates(State(state): State<AppState>) -> Json<serde_json::Value> {
    let data = state.data.read().await;
    Json(data.plates.clone())
}

pub async fn get_legend() -> Json<Vec<LegendBucket>> {
    Json(legend_buckets())
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub status: &'static str,
    pub timeframe: String,
    pub marker_count: usize,
}

/// Re-fetches both feeds concurrently and swaps the shared datasets. The
/// write lock is only taken once the new data is fully built.
pub async fn refresh_feeds(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, StatusCode> {
    let timeframe = {
        let settings = state.settings.lock().unwrap();
        settings.timeframe()
    };

    let (collection, plates) = state.feeds.fetch_all(timeframe).await.map_err(|e| {
        tracing::error!(error = %e, "feed refresh failed");
        StatusCode::BAD_GATEWAY
    })?;

    let markers = build_markers(&feed::extract_records(&collection));
    let marker_count = markers.len();

    {
        let mut data = state.data.write().await;
        data.markers = markers;
        data.plates = plates;
    }

    tracing::info!(marker_count, %timeframe, "feeds refreshed");
    Ok(Json(RefreshResponse {
        status: "refreshed",
        timeframe: timeframe.to_string(),
        marker_count,
    }))
}
