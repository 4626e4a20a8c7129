pub mod handlers;
pub mod types;

use crate::{
    Result,
    config::Config,
    pipeline::Segmenter,
    segmentation::OnnxModel,
    tiles::HttpTileSource,
};
use axum::{Router, routing::get};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/query_segment", get(handlers::query_segment))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

pub async fn run(config: Config) -> Result<()> {
    // Load the model once; it is shared by every request
    let model = OnnxModel::load(&config.model.path)?;
    let tiles = HttpTileSource::new(config.tiles.clone());

    let app_state = AppState {
        segmenter: Arc::new(Segmenter::new(Arc::new(tiles), Arc::new(model))),
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.effective_port()?);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
