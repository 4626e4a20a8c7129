use super::preprocess::InputTensor;
use crate::{Error, Result};
use ndarray::Array4;
use ort::{
    session::{Session, builder::GraphOptimizationLevel},
    value::Tensor,
};
use std::{
    path::Path,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing::{debug, info};

/// Raw model output for one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    /// Flat per-pixel class scores, row-major.
    pub scores: Vec<f32>,
    /// Time spent inside the forward pass only.
    pub elapsed: Duration,
}

impl Inference {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// A loaded segmentation network. Implementations must be safe to share
/// across requests.
pub trait SegmentationModel: Send + Sync {
    fn run(&self, input: InputTensor) -> Result<Inference>;
}

pub struct OnnxModel {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
}

impl OnnxModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading segmentation model from {}", path.display());

        let session = Session::builder()
            .map_err(|e| Error::model_load(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| Error::model_load(e.to_string()))?
            .commit_from_file(path)
            .map_err(|e| {
                Error::model_load(format!("Failed to load {}: {}", path.display(), e))
            })?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| Error::model_load("Model declares no inputs"))?;
        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| Error::model_load("Model declares no outputs"))?;

        info!(
            "Model loaded (input: {}, output: {})",
            input_name, output_name
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }
}

impl SegmentationModel for OnnxModel {
    fn run(&self, input: InputTensor) -> Result<Inference> {
        let array = Array4::from_shape_vec(input.dims, input.data)
            .map_err(|e| Error::inference(format!("Invalid input tensor: {}", e)))?;
        let tensor = Tensor::from_array(array).map_err(|e| Error::inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| Error::internal("ONNX session lock poisoned"))?;

        let start = Instant::now();
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => tensor])
            .map_err(|e| Error::inference(e.to_string()))?;
        let elapsed = start.elapsed();

        let (_shape, scores) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::inference(format!("Failed to extract output: {}", e)))?;
        let scores = scores.to_vec();

        debug!(
            "Inference produced {} scores in {:.3}s",
            scores.len(),
            elapsed.as_secs_f64()
        );

        Ok(Inference { scores, elapsed })
    }
}
