use super::decode::{NUM_CLASSES, PredictionGrid};
use crate::{Error, Result};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// Class colors, indexed by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette([Rgb<u8>; NUM_CLASSES]);

pub const PALETTE: Palette = Palette([
    Rgb([0x4A, 0x23, 0x5A]),
    Rgb([0xFF, 0xB9, 0x00]),
    Rgb([0x0F, 0xFF, 0x00]),
    Rgb([0x00, 0x8B, 0xFF]),
    Rgb([0xFF, 0xF6, 0x00]),
]);

impl Palette {
    pub fn color(&self, label: usize) -> Option<Rgb<u8>> {
        self.0.get(label).copied()
    }

    pub fn colors(&self) -> &[Rgb<u8>; NUM_CLASSES] {
        &self.0
    }
}

pub type ClassCount = [u64; NUM_CLASSES];

#[derive(Debug, Clone)]
pub struct Rendered {
    pub image: RgbImage,
    pub class_count: ClassCount,
}

/// Paints one pixel per grid cell and tallies the class histogram.
pub fn render(grid: &PredictionGrid, palette: &Palette) -> Result<Rendered> {
    let side = grid.side() as u32;
    let mut image = RgbImage::new(side, side);
    let mut class_count = [0u64; NUM_CLASSES];

    for (row, labels) in grid.rows().enumerate() {
        for (col, &label) in labels.iter().enumerate() {
            let label = usize::from(label);
            let color = palette.color(label).ok_or_else(|| {
                Error::render(format!(
                    "Label {} at ({}, {}) is outside the {}-color palette",
                    label, row, col, NUM_CLASSES
                ))
            })?;
            image.put_pixel(col as u32, row as u32, color);
            class_count[label] += 1;
        }
    }

    Ok(Rendered { image, class_count })
}

pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| Error::render(format!("PNG encoding failed: {}", e)))?;
    Ok(buffer.into_inner())
}
