//! Rendering backends and error types.

mod image;

pub use self::image::ImageBackend;

use std::fmt;
use std::io;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors from rendering operations.
#[derive(Debug)]
pub enum RenderError {
    /// Backend or window initialization failed.
    Init(String),
    /// A drawing operation failed.
    Draw(String),
    /// I/O error (file export).
    Io(io::Error),
    /// Image encoding failed.
    ImageEncoding(String),
    /// GIF encoding failed.
    GifEncoding(String),
    /// The trace has no frames to render.
    EmptyTrace,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Init(msg) => write!(f, "initialization error: {}", msg),
            RenderError::Draw(msg) => write!(f, "draw error: {}", msg),
            RenderError::Io(e) => write!(f, "I/O error: {}", e),
            RenderError::ImageEncoding(msg) => write!(f, "image encoding error: {}", msg),
            RenderError::GifEncoding(msg) => write!(f, "GIF encoding error: {}", msg),
            RenderError::EmptyTrace => write!(f, "episode trace has no frames"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RenderError {
    fn from(e: io::Error) -> Self {
        RenderError::Io(e)
    }
}
