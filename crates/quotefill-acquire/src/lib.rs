//! Text acquisition: PDF text layer, page rasterization, OCR.

mod acquirer;
mod error;
mod format;
pub mod ocr;
pub mod pdf;

pub use acquirer::{AcquireConfig, Acquirer, DEFAULT_DPI};
pub use error::{AcquireError, AcquisitionFailure, OcrError};
pub use format::DocumentKind;
pub use ocr::{Block, BlockType, OcrClient, Table};
pub use pdf::{NoPdfBackend, PdfBackend};

#[cfg(feature = "pdfium")]
pub use pdf::PdfiumBackend;
