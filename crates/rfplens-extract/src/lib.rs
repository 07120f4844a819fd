//! RFPLens Content Extraction
//!
//! Turns raw documents into plain text for the pipeline.
//!
//! Two paths:
//!
//! - **PDF bytes** ([`extract_pdf`], [`extract_batch`]): total functions.
//!   A file that cannot be parsed produces a placeholder document instead of
//!   an error, so one bad file never blocks the rest of a batch.
//! - **URL** ([`WebExtractor`]): fetch over HTTP with a bounded timeout,
//!   strip non-content markup, collapse whitespace. Fetch failures DO
//!   propagate here; a single-URL workflow has no other documents to fall
//!   back on.

#![warn(missing_docs)]

pub mod pdf;
pub mod web;

use thiserror::Error;

pub use pdf::{extract_batch, extract_pdf};
pub use web::WebExtractor;

/// Errors from content extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    /// DNS failure or connection refused while fetching a URL
    #[error("source unreachable: {0}")]
    Unreachable(String),

    /// The remote site answered with a non-success status
    #[error("fetch returned HTTP {0}")]
    HttpStatus(u16),

    /// Other transport failure (timeout, protocol error)
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// PDF parsing failure. Only surfaced by single-document paths; batch
    /// extraction converts this into a placeholder document instead.
    #[error("could not parse PDF: {0}")]
    Pdf(String),
}
