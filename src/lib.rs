pub mod config;
pub mod error;
pub mod pipeline;
pub mod segmentation;
pub mod server;
pub mod tiles;

pub use error::{Error, Result};
