//! PDF text-layer reads and page rasterization.

use crate::AcquireError;

/// Points per inch in PDF user space.
pub const POINTS_PER_INCH: f32 = 72.0;

/// A PDF engine able to expose page text and rasterize pages.
pub trait PdfBackend: Send + Sync {
    /// Embedded text of each page, in page order.
    fn page_texts(&self, pdf: &[u8]) -> Result<Vec<String>, AcquireError>;

    /// PNG-encoded raster of each page at `dpi`, in page order.
    fn render_pages(&self, pdf: &[u8], dpi: u16) -> Result<Vec<Vec<u8>>, AcquireError>;
}

/// Placeholder backend for builds without a PDF engine.
///
/// Every call fails with [`AcquisitionFailure::NoBackend`](crate::AcquisitionFailure::NoBackend),
/// so image inputs still work while PDFs report a clear error.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPdfBackend;

impl PdfBackend for NoPdfBackend {
    fn page_texts(&self, _pdf: &[u8]) -> Result<Vec<String>, AcquireError> {
        Err(no_backend())
    }

    fn render_pages(&self, _pdf: &[u8], _dpi: u16) -> Result<Vec<Vec<u8>>, AcquireError> {
        Err(no_backend())
    }
}

fn no_backend() -> AcquireError {
    crate::AcquisitionFailure::NoBackend("built without the `pdfium` feature".into()).into()
}

#[cfg(feature = "pdfium")]
pub use pdfium::PdfiumBackend;

#[cfg(feature = "pdfium")]
mod pdfium {
    use std::io::Cursor;

    use image::ImageFormat;
    use pdfium_render::prelude::*;
    use tracing::debug;

    use super::{POINTS_PER_INCH, PdfBackend};
    use crate::{AcquireError, AcquisitionFailure};

    /// PDFium-backed implementation.
    ///
    /// The library is bound per call; `Pdfium` handles are not shared across
    /// threads.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct PdfiumBackend;

    fn create_pdfium() -> Result<Pdfium, AcquireError> {
        // Local paths first, then system.
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                    "./vendor/pdfium/lib/",
                ))
            })
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| {
                AcquisitionFailure::NoBackend(format!("failed to load PDFium library: {e:?}"))
            })?;

        Ok(Pdfium::new(bindings))
    }

    impl PdfBackend for PdfiumBackend {
        fn page_texts(&self, pdf: &[u8]) -> Result<Vec<String>, AcquireError> {
            let pdfium = create_pdfium()?;
            let document = pdfium
                .load_pdf_from_byte_slice(pdf, None)
                .map_err(|e| AcquireError::pdf(format!("failed to load PDF: {e:?}")))?;

            let mut texts = Vec::new();
            for (index, page) in document.pages().iter().enumerate() {
                let text = page
                    .text()
                    .map_err(|e| AcquireError::pdf(format!("page {}: {e:?}", index + 1)))?;
                texts.push(text.all());
            }

            debug!(pages = texts.len(), "Read PDF text layer");
            Ok(texts)
        }

        fn render_pages(&self, pdf: &[u8], dpi: u16) -> Result<Vec<Vec<u8>>, AcquireError> {
            let pdfium = create_pdfium()?;
            let document = pdfium
                .load_pdf_from_byte_slice(pdf, None)
                .map_err(|e| AcquireError::pdf(format!("failed to load PDF: {e:?}")))?;

            let pixels_per_point = f32::from(dpi) / POINTS_PER_INCH;
            let mut images = Vec::new();

            for (index, page) in document.pages().iter().enumerate() {
                let page_number = index + 1;
                let width = (page.width().value * pixels_per_point).ceil() as i32;
                let height = (page.height().value * pixels_per_point).ceil() as i32;

                let config = PdfRenderConfig::new()
                    .set_target_width(width)
                    .set_target_height(height);

                let bitmap = page.render_with_config(&config).map_err(|e| {
                    AcquisitionFailure::Render {
                        page: page_number,
                        message: format!("{e:?}"),
                    }
                })?;

                let mut png = Cursor::new(Vec::new());
                bitmap
                    .as_image()
                    .write_to(&mut png, ImageFormat::Png)
                    .map_err(|e| AcquisitionFailure::Render {
                        page: page_number,
                        message: e.to_string(),
                    })?;

                debug!(page = page_number, width, height, dpi, "Rendered page");
                images.push(png.into_inner());
            }

            Ok(images)
        }
    }
}
