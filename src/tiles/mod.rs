mod coords;
mod fetcher;

pub use coords::*;
pub use fetcher::{HttpTileSource, TileSource};
