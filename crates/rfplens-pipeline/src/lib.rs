//! RFPLens Pipeline
//!
//! Prompt assembly and analysis dispatch: the stage between extracted text
//! and the generation provider.
//!
//! # Architecture
//!
//! ```text
//! ExtractedDocument[] → aggregate → render_prompt → GenerationProvider → AnalysisResult
//! ```
//!
//! The six task templates are data, not control flow: each [`TaskKind`] maps
//! to an immutable instruction body and a pair of ceilings, so prompt
//! rendering is a pure function testable without any network call. The
//! [`AnalysisEngine`] owns the provider handles and executes a single
//! aggregate-render-generate pass per request.

#![warn(missing_docs)]

pub mod catalog;
pub mod engine;
pub mod prompt;

use rfplens_llm::GenerationError;
use thiserror::Error;

pub use catalog::{CatalogField, FieldCatalog};
pub use engine::AnalysisEngine;
pub use prompt::render_prompt;

// Re-exported so the transport depends on one pipeline facade
pub use rfplens_domain::{
    aggregate, merge_fields, AggregatedCorpus, AnalysisResult, ExtractedDocument, FieldType,
    FormFieldResponse, TaskKind, UploadedDocument,
};

/// Errors from the analysis pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The generation provider failed (or was never configured)
    #[error("generation failed: {0}")]
    Provider(#[from] GenerationError),
}
