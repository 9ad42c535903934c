//! Error type for the std layer (decode, render, export, config).
//!
//! The geometry core keeps its own small [`LayoutError`]; everything that
//! touches pixels, files or configuration reports through [`Error`].

use crate::constraint::LayoutError;
use crate::layout::AssignError;

/// Errors from decoding, rendering, exporting, and configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The bytes are not a decodable image. No slot is consumed.
    #[error("decode error: {0}")]
    Decode(String),

    /// No free face slot.
    #[error("all cube faces already hold an image")]
    CubeFull,

    /// Zero, negative, or non-finite source or box dimension.
    #[error("invalid dimension: {0}")]
    InvalidDimension(#[from] LayoutError),

    /// Decoded image exceeds the configured limits.
    #[error("resource limit: {0}")]
    ResourceLimit(String),

    /// Compositing or resampling failed.
    #[error("render error: {0}")]
    Render(String),

    /// PNG or data URL encoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl From<AssignError<Error>> for Error {
    fn from(error: AssignError<Error>) -> Self {
        match error {
            AssignError::CubeFull => Error::CubeFull,
            AssignError::InvalidDimension(e) => Error::InvalidDimension(e),
            AssignError::Render(e) => e,
        }
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
