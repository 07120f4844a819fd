//! RFPLens Domain Layer
//!
//! Core types and pure logic for the RFP ingestion pipeline. This crate has
//! no external dependencies: document modeling, corpus aggregation, form
//! field merging, and the task template table all live here as plain Rust,
//! so every invariant can be tested without spinning up the transport or a
//! generation provider.
//!
//! ## Key Concepts
//!
//! - **Document**: an uploaded file and its extracted text, one-to-one
//! - **Corpus**: labeled, length-bounded concatenation of extracted texts
//! - **Form fields**: user-declared responses keyed by normalized name
//! - **Task templates**: the fixed set of analysis tasks and their ceilings

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod corpus;
pub mod document;
pub mod field;
pub mod task;

// Re-exports for convenience
pub use corpus::{aggregate, AggregatedCorpus, TRUNCATION_MARKER};
pub use document::{AnalysisResult, ExtractedDocument, UploadedDocument, PARSE_FAILURE_PLACEHOLDER};
pub use field::{merge_fields, FieldType, FormFieldResponse};
pub use task::{TaskKind, TemplateSpec};
