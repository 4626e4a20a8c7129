use crate::{
    pipeline::Segmentation,
    segmentation::ClassCount,
    tiles::Coordinate,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// Raw query values. Kept as strings so malformed numbers fall back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct SegmentQuery {
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

impl SegmentQuery {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::from_query(self.latitude.as_deref(), self.longitude.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    pub ori_img: String,
    pub pred_result: String,
    pub class_count: ClassCount,
    #[serde(rename = "inferenceTime")]
    pub inference_time: f64,
}

impl From<Segmentation> for SegmentResponse {
    fn from(segmentation: Segmentation) -> Self {
        Self {
            ori_img: STANDARD.encode(&segmentation.original),
            pred_result: STANDARD.encode(&segmentation.prediction_png),
            class_count: segmentation.class_count,
            inference_time: segmentation.inference_time,
        }
    }
}
