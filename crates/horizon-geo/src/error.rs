//! Raster loading errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid raster data: {0}")]
    InvalidData(String),

    #[error("unsupported coordinate reference system EPSG:{0}")]
    UnsupportedCrs(u32),
}

impl RasterError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        RasterError::InvalidData(message.into())
    }

    /// Whether the underlying file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RasterError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
