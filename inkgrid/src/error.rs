use thiserror::Error;

pub type Result<T> = std::result::Result<T, InkgridError>;

#[derive(Debug, Error)]
pub enum InkgridError {
    #[error("could not decode image")]
    Decode(#[from] image::ImageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not load font")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("glyph table needs at least 2 glyphs, got {0}")]
    TableTooSmall(usize),
}

/// Rejected before any pixel is sampled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown greyscale function {0:?}")]
    UnknownGreyscale(String),

    #[error("cell size must be at least 1")]
    ZeroCellSize,
}
