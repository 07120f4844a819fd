//! Task templates
//!
//! The fixed set of analysis tasks the service performs. Each task carries
//! an immutable [`TemplateSpec`]: the corpus character budget fed to
//! aggregation and the output token ceiling passed to the generation
//! provider. The instruction bodies themselves live in the pipeline crate;
//! this table only fixes the shape and the limits.

use std::fmt;

/// The fixed, enumerated set of analysis tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Summarize a single RFP page: services requested, requirements,
    /// deadlines, budget, contacts
    AnalyzeSingleRfp,
    /// Consolidate one or more RFP documents into requirements, evaluation
    /// criteria, and deadlines
    AnalyzeMultiRfp,
    /// The consolidated analysis with a competitive-bidder strategic lens
    AnalyzeMultiRfpStrategic,
    /// List every item a bidder must fill out across the package
    ListFillableFields,
    /// Reformat the package as clean text with declared field responses
    /// filled into the blanks
    FillAndReformat,
    /// Draft a full professional RFP response
    DraftResponse,
}

/// Immutable limits for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSpec {
    /// Corpus character budget handed to aggregation
    pub max_corpus_len: usize,
    /// Output token ceiling handed to the generation provider
    pub max_output_tokens: u32,
}

impl TaskKind {
    /// Every task, in a stable order
    pub const ALL: [TaskKind; 6] = [
        TaskKind::AnalyzeSingleRfp,
        TaskKind::AnalyzeMultiRfp,
        TaskKind::AnalyzeMultiRfpStrategic,
        TaskKind::ListFillableFields,
        TaskKind::FillAndReformat,
        TaskKind::DraftResponse,
    ];

    /// The limits for this task.
    ///
    /// Single-page summaries run on a small budget; multi-document
    /// consolidation gets more corpus room; the draft response gets the
    /// largest output ceiling. Fill-and-reformat must see whole documents
    /// to locate blanks, hence the much larger corpus budget.
    pub fn template(&self) -> TemplateSpec {
        match self {
            TaskKind::AnalyzeSingleRfp => TemplateSpec {
                max_corpus_len: 8_000,
                max_output_tokens: 500,
            },
            TaskKind::AnalyzeMultiRfp => TemplateSpec {
                max_corpus_len: 12_000,
                max_output_tokens: 1_500,
            },
            TaskKind::AnalyzeMultiRfpStrategic => TemplateSpec {
                max_corpus_len: 15_000,
                max_output_tokens: 1_500,
            },
            TaskKind::ListFillableFields => TemplateSpec {
                max_corpus_len: 15_000,
                max_output_tokens: 1_500,
            },
            TaskKind::FillAndReformat => TemplateSpec {
                max_corpus_len: 60_000,
                max_output_tokens: 2_000,
            },
            TaskKind::DraftResponse => TemplateSpec {
                max_corpus_len: 15_000,
                max_output_tokens: 2_000,
            },
        }
    }

    /// Stable task name for logs
    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::AnalyzeSingleRfp => "analyze-single-rfp",
            TaskKind::AnalyzeMultiRfp => "analyze-multi-rfp",
            TaskKind::AnalyzeMultiRfpStrategic => "analyze-multi-rfp-strategic",
            TaskKind::ListFillableFields => "list-fillable-fields",
            TaskKind::FillAndReformat => "fill-and-reformat",
            TaskKind::DraftResponse => "draft-response",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
