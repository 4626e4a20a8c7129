use axum::Router;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::sync::Arc;
use tile_segmenter::{
    config::TilesConfig,
    pipeline::Segmenter,
    segmentation::{INPUT_SIDE, NUM_CLASSES, SegmentationModel},
    server::{handlers::AppState, router},
    tiles::{HttpTileSource, TileSource},
};

/// Tile path the default coordinate resolves to at zoom 18
pub const DEFAULT_TILE_PATH: &str = "/tile/18/86309/146376";

/// Encode a gradient RGBA image as PNG
pub fn sample_tile_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    });
    encode_png(&image)
}

pub fn encode_png(image: &RgbaImage) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("Failed to encode test PNG");
    buffer.into_inner()
}

/// Flat model output where pixel (row, col) scores highest for `label(row, col)`
pub fn scores_for(label: impl Fn(usize, usize) -> usize) -> Vec<f32> {
    let mut scores = vec![0.0f32; INPUT_SIDE * INPUT_SIDE * NUM_CLASSES];
    for row in 0..INPUT_SIDE {
        for col in 0..INPUT_SIDE {
            let offset = (row * INPUT_SIDE + col) * NUM_CLASSES;
            scores[offset + label(row, col)] = 1.0;
        }
    }
    scores
}

/// Tile template pointing at a wiremock server
pub fn tiles_config(base_uri: &str) -> TilesConfig {
    TilesConfig {
        url_template: format!("{}/tile/{{z}}/{{y}}/{{x}}", base_uri),
    }
}

pub fn create_segmenter(
    tiles: Arc<dyn TileSource>,
    model: Arc<dyn SegmentationModel>,
) -> Segmenter {
    Segmenter::new(tiles, model)
}

/// Router wired to a real HTTP tile client and the given model
pub fn create_test_app(base_uri: &str, model: Arc<dyn SegmentationModel>) -> Router {
    let tiles = HttpTileSource::new(tiles_config(base_uri));
    let segmenter = create_segmenter(Arc::new(tiles), model);
    router(AppState {
        segmenter: Arc::new(segmenter),
    })
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8080
  logs:
    level: "debug"

tiles:
  url_template: "http://localhost:9000/tiles/{z}/{x}/{y}.png"

model:
  path: "models/test.onnx"
"#;

/// Template without the zoom placeholder
pub const INVALID_TEMPLATE_YAML: &str = r#"
tiles:
  url_template: "http://localhost:9000/tiles/{y}/{x}"
"#;
