use super::fsm::{SegmentEvent, SegmentStateMachine};
use crate::{
    Error, Result,
    segmentation::{
        ClassCount, INPUT_SIDE, NUM_CLASSES, PALETTE, SegmentationModel, decode_scores,
        encode_png, preprocess, render,
    },
    tiles::{Coordinate, Tile, TileSource, ZOOM, point_to_tile},
};
use std::sync::Arc;
use tracing::{debug, info};

/// Everything one successful request produces.
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub tile: Tile,
    /// Tile bytes exactly as the upstream server sent them.
    pub original: Vec<u8>,
    pub prediction_png: Vec<u8>,
    pub class_count: ClassCount,
    /// Forward pass duration in seconds.
    pub inference_time: f64,
}

pub struct Segmenter {
    tiles: Arc<dyn TileSource>,
    model: Arc<dyn SegmentationModel>,
}

impl Segmenter {
    pub fn new(tiles: Arc<dyn TileSource>, model: Arc<dyn SegmentationModel>) -> Self {
        Self { tiles, model }
    }

    pub async fn segment(&self, coordinate: Coordinate) -> Result<Segmentation> {
        let mut fsm = SegmentStateMachine::new();

        match self.run_stages(coordinate, &mut fsm).await {
            Ok(segmentation) => {
                info!(
                    "Segmented tile {}/{}/{} in {:.3}s",
                    segmentation.tile.zoom,
                    segmentation.tile.y,
                    segmentation.tile.x,
                    segmentation.inference_time
                );
                Ok(segmentation)
            }
            Err(e) => {
                debug!(
                    "Segmentation failed while {:?}: {}",
                    fsm.current_state(),
                    e
                );
                if !fsm.is_terminal() {
                    fsm.transition(SegmentEvent::Failed)?;
                }
                Err(e)
            }
        }
    }

    async fn run_stages(
        &self,
        coordinate: Coordinate,
        fsm: &mut SegmentStateMachine,
    ) -> Result<Segmentation> {
        let tile = point_to_tile(coordinate, ZOOM);
        debug!(
            "Coordinate ({}, {}) maps to tile {:?}",
            coordinate.latitude, coordinate.longitude, tile
        );

        let original = self.tiles.fetch(&tile).await?;
        fsm.transition(SegmentEvent::TileFetched)?;

        // Decoding and the forward pass are CPU bound.
        let model = Arc::clone(&self.model);
        let (original, inference) = tokio::task::spawn_blocking(move || {
            let input = preprocess(&original)?;
            let inference = model.run(input)?;
            Ok::<_, Error>((original, inference))
        })
        .await
        .map_err(|e| Error::internal(format!("Inference task failed: {}", e)))??;

        let grid = decode_scores(&inference.scores, INPUT_SIDE, NUM_CLASSES)?;
        fsm.transition(SegmentEvent::InferenceCompleted)?;

        let rendered = render(&grid, &PALETTE)?;
        let prediction_png = encode_png(&rendered.image)?;
        fsm.transition(SegmentEvent::RenderCompleted)?;

        Ok(Segmentation {
            tile,
            original,
            prediction_png,
            class_count: rendered.class_count,
            inference_time: inference.elapsed_secs(),
        })
    }
}
