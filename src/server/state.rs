use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

use crate::fetch::{FeedClient, ReqwestClient};
use crate::markers::MarkerSpec;
use crate::settings::Settings;

/// The two fetched datasets, already transformed for the page.
#[derive(Debug, Default)]
pub struct MapData {
    pub markers: Vec<MarkerSpec>,
    pub plates: serde_json::Value,
}

// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<RwLock<MapData>>,
    pub feeds: Arc<FeedClient<ReqwestClient>>,
    pub settings: Arc<Mutex<Settings>>,
}
