//! Crate-wide error type.

#[derive(Debug, thiserror::Error)]
pub enum ScopeBoxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has no area ({width}x{height})")]
    DegenerateImage { width: u32, height: u32 },
    #[error("surface {width}x{height} cannot display an image")]
    UnusableSurface { width: f64, height: f64 },
    #[error("calibration serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("no home directory to store calibration in")]
    NoHomeDir,
}

pub type Result<T> = std::result::Result<T, ScopeBoxError>;
