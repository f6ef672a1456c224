use tracing::{debug, info};

use crate::ocr::{OcrClient, Table};
use crate::pdf::PdfBackend;
use crate::{AcquireError, DocumentKind};

/// Rasterization resolution for scanned PDFs.
pub const DEFAULT_DPI: u16 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquireConfig {
    /// Resolution used when a PDF has no text layer and must be OCR'd.
    pub dpi: u16,
    /// Append table rows from structured OCR analysis to each OCR'd page.
    pub include_tables: bool,
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            include_tables: false,
        }
    }
}

/// Turns document bytes into a newline-delimited transcript.
///
/// Holds borrowed collaborators so one OCR client can serve many documents.
pub struct Acquirer<'a> {
    ocr: &'a dyn OcrClient,
    pdf: &'a dyn PdfBackend,
    config: AcquireConfig,
}

impl<'a> Acquirer<'a> {
    pub fn new(ocr: &'a dyn OcrClient, pdf: &'a dyn PdfBackend) -> Self {
        Self {
            ocr,
            pdf,
            config: AcquireConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AcquireConfig) -> Self {
        self.config = config;
        self
    }

    /// Acquire a transcript, dispatching on the filename's extension.
    pub async fn acquire(&self, bytes: &[u8], filename: &str) -> Result<String, AcquireError> {
        let kind = DocumentKind::from_filename(filename)?;
        self.acquire_kind(bytes, kind).await
    }

    /// Acquire a transcript for an explicitly typed document.
    pub async fn acquire_kind(
        &self,
        bytes: &[u8],
        kind: DocumentKind,
    ) -> Result<String, AcquireError> {
        let transcript = if kind.is_image() {
            info!(kind = kind.as_str(), bytes = bytes.len(), "OCR image document");
            self.ocr_page(bytes, 1).await?.join("\n")
        } else {
            self.acquire_pdf(bytes).await?
        };

        debug!(lines = transcript.lines().count(), "Transcript acquired");
        Ok(transcript)
    }

    async fn acquire_pdf(&self, bytes: &[u8]) -> Result<String, AcquireError> {
        let texts = self.pdf.page_texts(bytes)?;

        if texts.iter().any(|t| !t.trim().is_empty()) {
            info!(pages = texts.len(), "PDF has a text layer");
            return Ok(texts.join("\n"));
        }

        let images = self.pdf.render_pages(bytes, self.config.dpi)?;
        info!(pages = images.len(), dpi = self.config.dpi, "OCR scanned PDF");

        let mut lines = Vec::new();
        for (index, image) in images.iter().enumerate() {
            lines.extend(self.ocr_page(image, index + 1).await?);
        }
        Ok(lines.join("\n"))
    }

    async fn ocr_page(&self, image: &[u8], page: usize) -> Result<Vec<String>, AcquireError> {
        let mut lines = self
            .ocr
            .detect_lines(image)
            .await
            .map_err(|e| AcquireError::ocr(page, e))?;
        debug!(page, lines = lines.len(), "OCR detected lines");

        if self.config.include_tables {
            let tables = self
                .ocr
                .analyze_tables(image)
                .await
                .map_err(|e| AcquireError::ocr(page, e))?;
            debug!(page, tables = tables.len(), "OCR table analysis");
            lines.extend(tables.iter().flat_map(table_lines));
        }

        Ok(lines)
    }
}

fn table_lines(table: &Table) -> impl Iterator<Item = String> + '_ {
    table.iter().map(|row| row.join(" | "))
}
