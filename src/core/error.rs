//! Error types for the viewer

use thiserror::Error;

/// Main error type for the viewer
#[derive(Debug, Error)]
pub enum Error {
    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Window error: {0}")]
    Window(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Shader error: {0}")]
    Shader(String),

    #[error("Lattice error: {0}")]
    Lattice(String),
}
