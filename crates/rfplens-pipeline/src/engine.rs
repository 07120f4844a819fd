//! Analysis dispatch
//!
//! The engine owns the generation providers and runs one
//! aggregate-render-generate pass per request. It makes a single attempt
//! upstream; interpreting a failure is the transport layer's job.

use crate::prompt::{render_prompt, system_instruction};
use crate::PipelineError;
use rfplens_domain::{aggregate, AnalysisResult, ExtractedDocument, FormFieldResponse, TaskKind};
use rfplens_llm::{GenerationError, GenerationProvider, GenerationRequest};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Runs analysis tasks against injected generation providers.
///
/// Two providers, because the deployment carries two distinct credentials:
/// the analysis provider serves the five read-only tasks, the form-fill
/// provider serves [`TaskKind::FillAndReformat`].
pub struct AnalysisEngine {
    analysis: Arc<dyn GenerationProvider>,
    form_fill: Arc<dyn GenerationProvider>,
}

impl AnalysisEngine {
    /// Create an engine from the two provider handles
    pub fn new(analysis: Arc<dyn GenerationProvider>, form_fill: Arc<dyn GenerationProvider>) -> Self {
        Self { analysis, form_fill }
    }

    fn provider_for(&self, task: TaskKind) -> &Arc<dyn GenerationProvider> {
        match task {
            TaskKind::FillAndReformat => &self.form_fill,
            _ => &self.analysis,
        }
    }

    /// Whether the provider serving `task` has a credential. The transport
    /// checks this before doing any extraction work, so a misconfigured
    /// deployment fails before any upstream spend.
    pub fn is_configured(&self, task: TaskKind) -> bool {
        self.provider_for(task).is_configured()
    }

    /// Run one task over already-extracted documents.
    ///
    /// Aggregates under the task's corpus budget, renders the instruction
    /// text, and makes a single generation call with the task's output
    /// ceiling and the fixed low analysis temperature.
    pub async fn run(
        &self,
        task: TaskKind,
        docs: &[ExtractedDocument],
        fields: Option<&BTreeMap<String, FormFieldResponse>>,
    ) -> Result<AnalysisResult, PipelineError> {
        let provider = self.provider_for(task);
        if !provider.is_configured() {
            return Err(PipelineError::Provider(GenerationError::MissingCredential));
        }

        let template = task.template();
        let corpus = aggregate(docs, template.max_corpus_len);
        info!(
            %task,
            documents = docs.len(),
            corpus_chars = corpus.text.len(),
            truncated = corpus.truncated,
            "dispatching analysis"
        );

        let prompt = render_prompt(task, &corpus, fields);
        debug!(prompt_chars = prompt.len(), "rendered prompt");

        let mut request = GenerationRequest::new(prompt, template.max_output_tokens);
        if let Some(system) = system_instruction(task) {
            request = request.with_system(system);
        }

        let text = provider.generate(&request).await?;
        info!(%task, response_chars = text.len(), "analysis complete");

        Ok(AnalysisResult {
            text,
            source_files: corpus.source_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfplens_domain::{merge_fields, FieldType};
    use rfplens_llm::MockProvider;

    fn engine_with(analysis: MockProvider, form_fill: MockProvider) -> AnalysisEngine {
        AnalysisEngine::new(Arc::new(analysis), Arc::new(form_fill))
    }

    fn docs() -> Vec<ExtractedDocument> {
        vec![
            ExtractedDocument::ok("a.pdf", "Budget: $50,000"),
            ExtractedDocument::ok("b.pdf", "Due: June 1"),
        ]
    }

    #[tokio::test]
    async fn test_run_returns_model_output_with_provenance() {
        let engine = engine_with(MockProvider::new("the analysis"), MockProvider::default());

        let result = engine
            .run(TaskKind::AnalyzeMultiRfp, &docs(), None)
            .await
            .unwrap();

        assert_eq!(result.text, "the analysis");
        assert_eq!(result.source_files, vec!["a.pdf", "b.pdf"]);
    }

    #[tokio::test]
    async fn test_unconfigured_provider_fails_without_a_call() {
        let analysis = MockProvider::unconfigured();
        let engine = engine_with(analysis.clone(), MockProvider::default());

        let result = engine.run(TaskKind::DraftResponse, &docs(), None).await;
        assert!(matches!(
            result,
            Err(PipelineError::Provider(GenerationError::MissingCredential))
        ));
        assert_eq!(analysis.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fill_task_routes_to_form_fill_provider() {
        let analysis = MockProvider::new("wrong provider");
        let form_fill = MockProvider::new("filled document");
        let engine = engine_with(analysis.clone(), form_fill.clone());

        let fields = merge_fields(vec![FormFieldResponse::new(
            "Title:",
            "Director",
            FieldType::Text,
        )]);
        let result = engine
            .run(TaskKind::FillAndReformat, &docs(), Some(&fields))
            .await
            .unwrap();

        assert_eq!(result.text, "filled document");
        assert_eq!(analysis.call_count(), 0);
        assert_eq!(form_fill.call_count(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let analysis = MockProvider::new("unused");
        analysis.fail_with("You exceeded your current quota");
        let engine = engine_with(analysis, MockProvider::default());

        let result = engine.run(TaskKind::AnalyzeSingleRfp, &docs(), None).await;
        match result {
            Err(PipelineError::Provider(e)) => assert!(e.is_auth_or_quota()),
            other => panic!("expected provider error, got {other:?}"),
        }
    }
}
