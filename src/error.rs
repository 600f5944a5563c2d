use std::path::PathBuf;

/// Failures while resolving a texture reference to something the renderer
/// can load.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("texture {name:?} not found at {path:?}")]
    NotFound { name: String, path: PathBuf },

    #[error("texture {name:?} at {path:?} is not a regular file")]
    NotAFile { name: String, path: PathBuf },
}

#[derive(Debug, thiserror::Error)]
pub enum OrreryError {
    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error("got {handles} body handles but {rates} rotation rates")]
    RateCountMismatch { handles: usize, rates: usize },

    #[error("ring inner radius {inner} must be non-negative and below outer radius {outer}")]
    InvalidRing { inner: f32, outer: f32 },

    #[error("annulus needs between {min} and {max} segments, got {segments}")]
    InvalidSegments {
        segments: usize,
        min: usize,
        max: usize,
    },
}
