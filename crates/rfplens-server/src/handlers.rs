//! HTTP request handlers
//!
//! Seven routes over one shared pipeline: extract, aggregate, render,
//! generate, classify. Each handler follows the same fixed order: validate
//! input, check the provider credential (before any extraction or network
//! work), then run the pipeline and classify whatever failed.

use crate::config::UploadLimits;
use crate::error::{AppError, RouteMessages};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::Json,
    routing::{get, post},
    Router,
};
use rfplens_extract::{extract_batch, extract_pdf, ExtractError, WebExtractor};
use rfplens_pipeline::{
    merge_fields, AnalysisEngine, ExtractedDocument, FieldCatalog, FieldType, FormFieldResponse,
    TaskKind, UploadedDocument,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Analysis pipeline with its injected providers
    pub engine: Arc<AnalysisEngine>,
    /// URL fetcher for the web-page variant
    pub web: Arc<WebExtractor>,
    /// The form-field catalog served to the UI
    pub catalog: Arc<FieldCatalog>,
    /// Upload boundary conditions
    pub limits: UploadLimits,
}

const URL_MESSAGES: RouteMessages = RouteMessages {
    provider_config: "OpenAI API configuration error. Please check your API key.",
    retry: "Failed to analyze the RFP. Please try again later.",
};

const PDF_MESSAGES: RouteMessages = RouteMessages {
    provider_config: "OpenAI API configuration error. Please check your API key and billing.",
    retry: "Failed to analyze the PDF. Please try again later.",
};

const MULTI_MESSAGES: RouteMessages = RouteMessages {
    provider_config: "OpenAI API configuration error. Please check your API key and billing.",
    retry: "Failed to analyze the RFP files. Please try again later.",
};

const ATTACHMENTS_MESSAGES: RouteMessages = RouteMessages {
    provider_config: "OpenAI API configuration error. Please check your API key and billing.",
    retry: "Failed to analyze the attachments. Please try again later.",
};

const GENERATE_MESSAGES: RouteMessages = RouteMessages {
    provider_config: "Gemini API configuration error. Please check your API key.",
    retry: "Failed to convert attachments to text. Please try again later.",
};

const DRAFT_MESSAGES: RouteMessages = RouteMessages {
    provider_config: "OpenAI API configuration error. Please check your API key and billing.",
    retry: "Failed to generate draft response. Please try again later.",
};

const OPENAI_NOT_CONFIGURED: &str = "OpenAI API key not configured";
const GEMINI_NOT_CONFIGURED: &str = "Gemini API key not configured";

#[derive(Debug, Deserialize)]
struct AnalyzeUrlRequest {
    url: Option<String>,
}

#[derive(Serialize)]
struct AnalyzeUrlResponse {
    success: bool,
    analysis: String,
    url: String,
}

#[derive(Serialize)]
struct AnalyzePdfResponse {
    success: bool,
    analysis: String,
    filename: String,
}

#[derive(Serialize)]
struct AnalyzeBatchResponse {
    success: bool,
    analysis: String,
    files: Vec<String>,
    #[serde(rename = "fileCount")]
    file_count: usize,
}

#[derive(Serialize)]
struct GenerateRfpResponse {
    success: bool,
    #[serde(rename = "convertedText")]
    converted_text: String,
    #[serde(rename = "processedFiles")]
    processed_files: Vec<String>,
    #[serde(rename = "formFieldResponses")]
    form_field_responses: BTreeMap<String, FieldEcho>,
}

/// Echo of one merged field, keyed by normalized name in the response
#[derive(Serialize)]
struct FieldEcho {
    value: String,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(rename = "originalName")]
    original_name: String,
}

#[derive(Serialize)]
struct DraftResponseBody {
    success: bool,
    #[serde(rename = "draftResponse")]
    draft_response: String,
    #[serde(rename = "processedFiles")]
    processed_files: Vec<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Everything pulled out of one multipart request: the uploads under the
/// expected field name, plus all plain text fields.
struct MultipartPayload {
    files: Vec<UploadedDocument>,
    text_fields: HashMap<String, String>,
}

async fn read_multipart(
    multipart: &mut Multipart,
    file_field: &str,
    limits: UploadLimits,
    messages: RouteMessages,
) -> Result<MultipartPayload, AppError> {
    let mut files = Vec::new();
    let mut text_fields = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::Internal(messages))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if field.file_name().is_some() {
            if name != file_field {
                // Files under an unexpected field name are ignored, not fatal
                continue;
            }
            if files.len() == limits.max_files {
                return Err(AppError::TooManyFiles(limits.max_files));
            }
            let file_name = field.file_name().unwrap_or("upload.pdf").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|_| AppError::Internal(messages))?;
            if bytes.len() > limits.max_file_bytes {
                return Err(AppError::FileTooLarge(file_name));
            }
            files.push(UploadedDocument::new(file_name, bytes.to_vec()));
        } else {
            let value = field
                .text()
                .await
                .map_err(|_| AppError::Internal(messages))?;
            text_fields.insert(name, value);
        }
    }

    Ok(MultipartPayload { files, text_fields })
}

/// POST /api/analyze-rfp - analyze an RFP page by URL
async fn analyze_url(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeUrlRequest>,
) -> Result<Json<AnalyzeUrlResponse>, AppError> {
    let url = match request.url {
        Some(url) if !url.is_empty() => url,
        _ => return Err(AppError::MissingInput("URL is required")),
    };

    if !state.engine.is_configured(TaskKind::AnalyzeSingleRfp) {
        return Err(AppError::Configuration(OPENAI_NOT_CONFIGURED));
    }

    let text = state
        .web
        .fetch_text(&url)
        .await
        .map_err(|e| AppError::from_extract(e, URL_MESSAGES))?;

    let doc = ExtractedDocument::ok(&url, text);
    let result = state
        .engine
        .run(TaskKind::AnalyzeSingleRfp, &[doc], None)
        .await
        .map_err(|e| AppError::from_pipeline(e, URL_MESSAGES))?;

    Ok(Json(AnalyzeUrlResponse {
        success: true,
        analysis: result.text,
        url,
    }))
}

/// POST /api/analyze-pdf - analyze a single uploaded PDF
async fn analyze_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzePdfResponse>, AppError> {
    let payload = read_multipart(&mut multipart, "pdf", state.limits, PDF_MESSAGES).await?;
    let doc = payload
        .files
        .into_iter()
        .next()
        .ok_or(AppError::MissingInput("PDF file is required"))?;

    if !state.engine.is_configured(TaskKind::AnalyzeMultiRfp) {
        return Err(AppError::Configuration(OPENAI_NOT_CONFIGURED));
    }

    let filename = doc.original_name.clone();
    let extracted = tokio::task::spawn_blocking(move || extract_pdf(&doc))
        .await
        .map_err(|_| AppError::Internal(PDF_MESSAGES))?;

    // The single-document route has no batch to fall back on; a parse
    // failure aborts the request instead of becoming a placeholder.
    if let Some(reason) = &extracted.extraction_error {
        return Err(AppError::from_extract(
            ExtractError::Pdf(reason.clone()),
            PDF_MESSAGES,
        ));
    }

    let result = state
        .engine
        .run(TaskKind::AnalyzeMultiRfp, &[extracted], None)
        .await
        .map_err(|e| AppError::from_pipeline(e, PDF_MESSAGES))?;

    Ok(Json(AnalyzePdfResponse {
        success: true,
        analysis: result.text,
        filename,
    }))
}

/// Shared body of the three batch-analysis routes
async fn run_batch(
    state: &AppState,
    multipart: &mut Multipart,
    file_field: &str,
    task: TaskKind,
    missing: &'static str,
    messages: RouteMessages,
) -> Result<(String, Vec<String>), AppError> {
    let payload = read_multipart(multipart, file_field, state.limits, messages).await?;
    if payload.files.is_empty() {
        return Err(AppError::MissingInput(missing));
    }

    if !state.engine.is_configured(task) {
        return Err(AppError::Configuration(OPENAI_NOT_CONFIGURED));
    }

    let extracted = extract_batch(payload.files).await;
    let result = state
        .engine
        .run(task, &extracted, None)
        .await
        .map_err(|e| AppError::from_pipeline(e, messages))?;

    Ok((result.text, result.source_files))
}

/// POST /api/analyze-rfp-multiple - strategic analysis of an RFP package
async fn analyze_rfp_multiple(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeBatchResponse>, AppError> {
    let (analysis, files) = run_batch(
        &state,
        &mut multipart,
        "rfpFiles",
        TaskKind::AnalyzeMultiRfpStrategic,
        "RFP files are required",
        MULTI_MESSAGES,
    )
    .await?;

    let file_count = files.len();
    Ok(Json(AnalyzeBatchResponse {
        success: true,
        analysis,
        files,
        file_count,
    }))
}

/// POST /api/analyze-attachments - list every fillable item in the package
async fn analyze_attachments(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeBatchResponse>, AppError> {
    let (analysis, files) = run_batch(
        &state,
        &mut multipart,
        "attachments",
        TaskKind::ListFillableFields,
        "At least one attachment file is required",
        ATTACHMENTS_MESSAGES,
    )
    .await?;

    let file_count = files.len();
    Ok(Json(AnalyzeBatchResponse {
        success: true,
        analysis,
        files,
        file_count,
    }))
}

/// POST /api/generate-rfp - reformat the package with declared field
/// responses filled in
async fn generate_rfp(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GenerateRfpResponse>, AppError> {
    let payload =
        read_multipart(&mut multipart, "attachments", state.limits, GENERATE_MESSAGES).await?;
    if payload.files.is_empty() {
        return Err(AppError::MissingInput("RFP attachments are required"));
    }

    if !state.engine.is_configured(TaskKind::FillAndReformat) {
        return Err(AppError::Configuration(GEMINI_NOT_CONFIGURED));
    }

    let responses = parse_indexed_fields(&payload.text_fields);
    let merged = merge_fields(responses);

    let extracted = extract_batch(payload.files).await;
    let result = state
        .engine
        .run(TaskKind::FillAndReformat, &extracted, Some(&merged))
        .await
        .map_err(|e| AppError::from_pipeline(e, GENERATE_MESSAGES))?;

    let form_field_responses = merged
        .into_iter()
        .map(|(key, field)| {
            (
                key,
                FieldEcho {
                    value: field.value,
                    field_type: field.field_type.as_str().to_string(),
                    original_name: field.name,
                },
            )
        })
        .collect();

    Ok(Json(GenerateRfpResponse {
        success: true,
        converted_text: result.text,
        processed_files: result.source_files,
        form_field_responses,
    }))
}

/// Decode the indexed `field_<i>` / `field_<i>_name` / `field_<i>_type`
/// triples, bounded by the declared `formFieldsCount`. Indexes with a
/// missing name or value are skipped; the merger drops empties anyway.
fn parse_indexed_fields(text_fields: &HashMap<String, String>) -> Vec<FormFieldResponse> {
    // The declared count is client data; cap it at the number of text
    // fields actually sent so an inflated value cannot drive the loop.
    let count: usize = text_fields
        .get("formFieldsCount")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
        .min(text_fields.len());

    let mut responses = Vec::new();
    for i in 0..count {
        let name = text_fields.get(&format!("field_{i}_name"));
        let value = text_fields.get(&format!("field_{i}"));
        let (Some(name), Some(value)) = (name, value) else {
            continue;
        };
        let field_type: FieldType = text_fields
            .get(&format!("field_{i}_type"))
            .map(|t| t.parse().unwrap_or(FieldType::Text))
            .unwrap_or(FieldType::Text);
        responses.push(FormFieldResponse::new(name, value, field_type));
    }
    responses
}

/// POST /api/generate-draft-response - draft a full RFP response
async fn generate_draft_response(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DraftResponseBody>, AppError> {
    let (draft, files) = run_batch(
        &state,
        &mut multipart,
        "rfpFiles",
        TaskKind::DraftResponse,
        "RFP files are required",
        DRAFT_MESSAGES,
    )
    .await?;

    Ok(Json(DraftResponseBody {
        success: true,
        draft_response: draft,
        processed_files: files,
    }))
}

/// GET /api/form-fields - the catalog the UI renders input controls from
async fn form_fields(State(state): State<AppState>) -> Json<FieldCatalog> {
    Json(state.catalog.as_ref().clone())
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Backend server is running",
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> Router {
    let body_limit = state
        .limits
        .max_file_bytes
        .saturating_mul(state.limits.max_files)
        .saturating_add(1024 * 1024);

    Router::new()
        .route("/api/analyze-rfp", post(analyze_url))
        .route("/api/analyze-pdf", post(analyze_pdf))
        .route("/api/analyze-rfp-multiple", post(analyze_rfp_multiple))
        .route("/api/analyze-attachments", post(analyze_attachments))
        .route("/api/generate-rfp", post(generate_rfp))
        .route("/api/generate-draft-response", post(generate_draft_response))
        .route("/api/form-fields", get(form_fields))
        .route("/api/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
