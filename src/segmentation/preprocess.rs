use crate::{Error, Result};
use image::{DynamicImage, RgbImage, imageops::FilterType};
use tracing::debug;

/// Side length of the square model input.
pub const INPUT_SIDE: usize = 256;

/// `[batch, height, width, channels]`
pub const INPUT_DIMS: [usize; 4] = [1, INPUT_SIDE, INPUT_SIDE, 3];

/// Flat, row-major RGB tensor with its shape.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    pub dims: [usize; 4],
    pub data: Vec<f32>,
}

impl InputTensor {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Maps a raw channel byte into [0, 1].
pub fn normalize(value: u8) -> f32 {
    f32::from(value) / 255.0
}

pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

/// Decodes tile bytes and converts them to a model input of [`INPUT_DIMS`].
pub fn preprocess(bytes: &[u8]) -> Result<InputTensor> {
    let image = decode_image(bytes)?;
    image_to_tensor(&image, INPUT_DIMS)
}

/// Resizes `image` to the height/width in `dims` when needed, then packs it.
pub fn image_to_tensor(image: &DynamicImage, dims: [usize; 4]) -> Result<InputTensor> {
    let (height, width) = (dims[1] as u32, dims[2] as u32);

    let rgb = if image.width() != width || image.height() != height {
        debug!(
            "Resizing tile from {}x{} to {}x{}",
            image.width(),
            image.height(),
            width,
            height
        );
        image.resize_exact(width, height, FilterType::Triangle).to_rgb8()
    } else {
        image.to_rgb8()
    };

    pixels_to_tensor(&rgb, dims)
}

/// Packs RGB pixels row-major and normalizes them. The pixel count must
/// already match `dims`.
pub fn pixels_to_tensor(rgb: &RgbImage, dims: [usize; 4]) -> Result<InputTensor> {
    let raw = rgb.as_raw();
    let expected = dims[1] * dims[2] * dims[3];

    if raw.len() != expected {
        return Err(Error::TensorShape {
            what: "input",
            expected,
            actual: raw.len(),
        });
    }

    let data = raw.iter().copied().map(normalize).collect();
    Ok(InputTensor { dims, data })
}
