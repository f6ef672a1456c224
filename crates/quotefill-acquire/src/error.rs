use thiserror::Error;

/// Fatal acquisition errors. Anything past acquisition degrades silently.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("unsupported document format: {0:?}")]
    UnsupportedFormat(String),

    #[error("acquisition failed: {0}")]
    AcquisitionFailed(#[from] AcquisitionFailure),
}

/// What broke while turning a document into a transcript.
#[derive(Debug, Error)]
pub enum AcquisitionFailure {
    #[error("OCR failed on page {page}: {source}")]
    Ocr {
        page: usize,
        #[source]
        source: OcrError,
    },

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("failed to render page {page}: {message}")]
    Render { page: usize, message: String },

    #[error("no PDF backend available: {0}")]
    NoBackend(String),
}

/// Error contract for OCR collaborators.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR request failed: {0}")]
    Request(String),

    #[error("OCR service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("could not decode OCR response: {0}")]
    Decode(String),
}

impl AcquireError {
    pub(crate) fn ocr(page: usize, source: OcrError) -> Self {
        Self::AcquisitionFailed(AcquisitionFailure::Ocr { page, source })
    }

    #[cfg(feature = "pdfium")]
    pub(crate) fn pdf(message: impl Into<String>) -> Self {
        Self::AcquisitionFailed(AcquisitionFailure::Pdf(message.into()))
    }
}
