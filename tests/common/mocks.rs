use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tile_segmenter::{
    Error, Result,
    segmentation::{Inference, InputTensor, SegmentationModel},
    tiles::{Tile, TileSource},
};

use super::test_utils::scores_for;

/// Mock segmentation model returning canned scores
#[derive(Debug)]
pub struct MockSegmentationModel {
    pub scores: Vec<f32>,
    pub elapsed: Duration,
    pub error: Option<String>,
    /// Shapes and lengths of every tensor the model was asked to run
    pub inputs: Arc<Mutex<Vec<([usize; 4], usize)>>>,
}

impl MockSegmentationModel {
    pub fn with_scores(scores: Vec<f32>) -> Self {
        Self {
            scores,
            elapsed: Duration::from_millis(42),
            error: None,
            inputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every pixel scores highest for `class`
    pub fn uniform(class: usize) -> Self {
        Self::with_scores(scores_for(|_, _| class))
    }

    /// Label = column modulo the class count
    pub fn striped() -> Self {
        Self::with_scores(scores_for(|_, col| col % 5))
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn call_count(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }

    pub fn get_inputs(&self) -> Vec<([usize; 4], usize)> {
        self.inputs.lock().unwrap().clone()
    }
}

impl SegmentationModel for MockSegmentationModel {
    fn run(&self, input: InputTensor) -> Result<Inference> {
        self.inputs.lock().unwrap().push((input.dims, input.len()));

        if let Some(ref error) = self.error {
            return Err(Error::inference(error.clone()));
        }

        Ok(Inference {
            scores: self.scores.clone(),
            elapsed: self.elapsed,
        })
    }
}

/// Mock tile source serving fixed bytes
#[derive(Debug)]
pub struct MockTileSource {
    pub bytes: Vec<u8>,
    pub error: Option<String>,
    pub requests: Arc<Mutex<Vec<Tile>>>,
}

impl MockTileSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            error: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(error: impl Into<String>) -> Self {
        Self {
            bytes: Vec::new(),
            error: Some(error.into()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_requests(&self) -> Vec<Tile> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TileSource for MockTileSource {
    async fn fetch(&self, tile: &Tile) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(*tile);

        if let Some(ref error) = self.error {
            return Err(Error::upstream_fetch(error.clone()));
        }

        Ok(self.bytes.clone())
    }
}
