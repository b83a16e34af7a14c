use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer};

pub mod handlers;
pub mod state;

use self::state::AppState;
use handlers::{get_legend, get_markers, get_plates, index_html, refresh_feeds};

// Create the main application router
fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_html))
        .route("/api/markers", get(get_markers))
        .route("/api/plates", get(get_plates))
        .route("/api/legend", get(get_legend))
        .route("/api/refresh", post(refresh_feeds))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<()> {
    let app = create_app(state);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;

    println!("   ✅ HTTP server started successfully at http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}
