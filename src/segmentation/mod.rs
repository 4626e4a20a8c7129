mod decode;
mod model;
mod preprocess;
mod render;

pub use decode::{NUM_CLASSES, PredictionGrid, argmax, decode_scores};
pub use model::{Inference, OnnxModel, SegmentationModel};
pub use preprocess::{
    INPUT_DIMS, INPUT_SIDE, InputTensor, decode_image, image_to_tensor, normalize,
    pixels_to_tensor, preprocess,
};
pub use render::{ClassCount, PALETTE, Palette, Rendered, encode_png, render};
