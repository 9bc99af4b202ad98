//! Error types for the gesture engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("degenerate screen size {width}x{height}: ideal magnitude would be zero")]
    DegenerateScreen { width: u32, height: u32 },

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("trace parse error: {0}")]
    TraceParse(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
