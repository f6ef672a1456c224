//! Extension-based dispatch between the PDF and image acquisition paths.

use std::path::Path;

use crate::AcquireError;

/// Supported input document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Png,
    Jpeg,
}

impl DocumentKind {
    /// Classify a document by its filename extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Result<Self, AcquireError> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext)
    }

    /// Classify an explicit type tag such as `"pdf"` or `".JPG"`.
    pub fn from_extension(ext: &str) -> Result<Self, AcquireError> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(AcquireError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn is_image(self) -> bool {
        matches!(self, Self::Png | Self::Jpeg)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }
}
