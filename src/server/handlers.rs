use super::types::{SegmentQuery, SegmentResponse};
use crate::pipeline::Segmenter;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

/// Body of every failed segmentation response.
pub const FAILURE_MESSAGE: &str = "Something went wrong";

#[derive(Clone)]
pub struct AppState {
    pub segmenter: Arc<Segmenter>,
}

pub async fn query_segment(
    State(state): State<AppState>,
    query: Option<Query<SegmentQuery>>,
) -> Result<Json<SegmentResponse>, (StatusCode, &'static str)> {
    let request_id = Uuid::new_v4();
    // An unparsable query string is treated like an empty one
    let coordinate = query
        .map(|Query(query)| query)
        .unwrap_or_default()
        .coordinate();

    async move {
        info!(
            "Received segment query for ({}, {})",
            coordinate.latitude, coordinate.longitude
        );

        match state.segmenter.segment(coordinate).await {
            Ok(segmentation) => {
                info!("Successfully segmented tile {:?}", segmentation.tile);
                Ok(Json(SegmentResponse::from(segmentation)))
            }
            Err(e) => {
                error!("Error in /query_segment: {}", e);
                Err((StatusCode::INTERNAL_SERVER_ERROR, FAILURE_MESSAGE))
            }
        }
    }
    .instrument(info_span!("query_segment", %request_id))
    .await
}
