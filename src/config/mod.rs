mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from(&config_path).await
}

pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;
    config.validate()?;

    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        for placeholder in ["{z}", "{y}", "{x}"] {
            if !self.tiles.url_template.contains(placeholder) {
                return Err(Error::config(format!(
                    "tiles.url_template is missing the {} placeholder: {}",
                    placeholder, self.tiles.url_template
                )));
            }
        }
        Ok(())
    }

    /// Port to bind, with `PORT` taking precedence over the file.
    pub fn effective_port(&self) -> Result<u16> {
        match env::var("PORT") {
            Ok(port) => port
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port))),
            Err(_) => Ok(self.server.port),
        }
    }
}
