//! OCR collaborators: AWS Textract and a Textract-compatible HTTP gateway.

#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "textract")]
pub mod textract;

#[cfg(feature = "http")]
pub use http::HttpOcrClient;
#[cfg(feature = "textract")]
pub use textract::TextractClient;
