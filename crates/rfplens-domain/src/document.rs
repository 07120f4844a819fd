//! Document types flowing through the pipeline
//!
//! An [`UploadedDocument`] is the raw request payload; an
//! [`ExtractedDocument`] is its text form. Extraction is total: a file that
//! cannot be parsed still yields an `ExtractedDocument`, carrying a fixed
//! placeholder text so one bad file never aborts a batch.

/// Placeholder text substituted for a document whose bytes could not be
/// parsed. Rendered into the corpus verbatim so the generation provider can
/// see that a section is missing.
pub const PARSE_FAILURE_PLACEHOLDER: &str = "[Error: Could not parse this PDF file]";

/// A raw uploaded file, held in memory for the duration of one request.
///
/// Never shared across requests and never persisted; the transport caps the
/// size before constructing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    /// Client-supplied file name, used for corpus provenance labels
    pub original_name: String,
    /// Full file contents
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    /// Create a new uploaded document
    pub fn new(original_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            original_name: original_name.into(),
            bytes,
        }
    }
}

/// The text form of one uploaded document.
///
/// Invariant: batch extraction produces exactly one `ExtractedDocument` per
/// `UploadedDocument`, in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// Name of the originating upload
    pub original_name: String,
    /// Extracted plain text, or [`PARSE_FAILURE_PLACEHOLDER`] on failure
    pub text: String,
    /// Why extraction failed, if it did. The batch continues regardless.
    pub extraction_error: Option<String>,
}

impl ExtractedDocument {
    /// A successfully extracted document
    pub fn ok(original_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            original_name: original_name.into(),
            text: text.into(),
            extraction_error: None,
        }
    }

    /// A document whose extraction failed; its text is the fixed placeholder
    pub fn failed(original_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            original_name: original_name.into(),
            text: PARSE_FAILURE_PLACEHOLDER.to_string(),
            extraction_error: Some(reason.into()),
        }
    }

    /// Whether extraction succeeded
    pub fn is_ok(&self) -> bool {
        self.extraction_error.is_none()
    }
}

/// The externally observable output of a successful analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Raw model output, returned verbatim to the transport
    pub text: String,
    /// Names of the source documents, in upload order
    pub source_files: Vec<String>,
}
