use super::coords::Tile;
use crate::{Error, Result, config::TilesConfig};
use async_trait::async_trait;
use tracing::{debug, info};

#[async_trait]
pub trait TileSource: Send + Sync {
    /// Downloads the raw image bytes for `tile`.
    async fn fetch(&self, tile: &Tile) -> Result<Vec<u8>>;
}

pub struct HttpTileSource {
    client: reqwest::Client,
    url_template: String,
}

impl HttpTileSource {
    pub fn new(config: TilesConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: TilesConfig) -> Self {
        Self {
            client,
            url_template: config.url_template,
        }
    }

    pub fn tile_url(&self, tile: &Tile) -> String {
        tile.url(&self.url_template)
    }
}

#[async_trait]
impl TileSource for HttpTileSource {
    async fn fetch(&self, tile: &Tile) -> Result<Vec<u8>> {
        let url = self.tile_url(tile);
        info!("Fetching tile from: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            Error::upstream_fetch(format!("Failed to request tile {}: {}", url, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream_fetch(format!(
                "Tile server returned {} for {}",
                status, url
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            Error::upstream_fetch(format!("Failed to read tile body from {}: {}", url, e))
        })?;

        debug!("Received {} tile bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}
