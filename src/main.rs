use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

// Import modules
mod encoding;
mod feed;
mod fetch;
mod html_template;
mod markers;
mod server;
mod settings;

use fetch::{FeedClient, ReqwestClient};
use markers::build_markers;
use server::state::{AppState, MapData};
use server::start_server;
use settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quakemap=info".into()),
        )
        .init();

    println!("🌋 QuakeMap v0.3 - USGS earthquake feed + tectonic plate map");

    let settings = Settings::load().context("Failed to load settings")?;
    let timeframe = settings.timeframe();
    if settings.mapbox_token.is_none() {
        println!("⚠️  No Mapbox token configured - base map tiles will not load");
        println!("   Set mapbox_token in quakemap.ini or the MAPBOX_TOKEN env var");
    }

    let http_client = ReqwestClient::new().context("Failed to create HTTP client")?;
    let feeds = Arc::new(FeedClient::new(http_client));

    // Both documents are independent; fetch them concurrently.
    println!("🌐 Fetching {} earthquake feed and plate boundaries...", timeframe);
    let (collection, plates) = feeds
        .fetch_all(timeframe)
        .await
        .context("Failed to fetch map data")?;

    let records = feed::extract_records(&collection);
    let markers = build_markers(&records);
    println!("✅ Built {} earthquake markers from {} feed features", markers.len(), collection.features.len());

    let port = settings.port;
    let app_state = AppState {
        data: Arc::new(RwLock::new(MapData { markers, plates })),
        feeds,
        settings: Arc::new(Mutex::new(settings)),
    };

    start_server(app_state, port).await?;

    Ok(())
}
