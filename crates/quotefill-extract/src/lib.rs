//! Field extraction: turns a quote transcript into a [`QuoteRecord`].
//!
//! Extractors are independent pure functions over the same transcript. None
//! of them fail; a miss leaves the field at its default.
//!
//! [`QuoteRecord`]: quotefill_core::QuoteRecord

pub mod coverage;
pub mod keywords;
mod pipeline;
pub mod scalars;
pub mod vehicle;

pub use pipeline::{Extraction, extract, extract_fields};
