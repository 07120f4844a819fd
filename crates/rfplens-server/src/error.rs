//! Error classification for the transport
//!
//! Maps extraction, fetch, and generation failures onto a small stable set
//! of user-facing categories. The decision table is fixed and ordered:
//! missing input, then missing credential (checked before any upstream
//! work), then fetch failures, then provider auth/billing conditions, then
//! unparseable documents, then a generic retry-later answer. Raw upstream
//! error text is logged but never surfaced to the user.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use rfplens_extract::ExtractError;
use rfplens_llm::GenerationError;
use rfplens_pipeline::PipelineError;
use serde::Serialize;
use tracing::warn;

/// User-facing strings that vary per route. Everything else in the table
/// is shared.
#[derive(Debug, Clone, Copy)]
pub struct RouteMessages {
    /// Shown when the provider rejects the call for auth/billing reasons
    pub provider_config: &'static str,
    /// Shown for any unclassified failure
    pub retry: &'static str,
}

/// Classified application error. Ordering in the handlers matches the
/// decision table: input checks first, credential checks before any
/// extraction or network call.
#[derive(Debug)]
pub enum AppError {
    /// No document, file, or URL was supplied
    MissingInput(&'static str),
    /// A required provider credential is absent
    Configuration(&'static str),
    /// DNS or connection failure while fetching the supplied URL
    UnreachableSource,
    /// The remote site answered 403/404
    AccessRestricted,
    /// The uploaded document could not be parsed
    InvalidDocument,
    /// The batch exceeded the file-count boundary
    TooManyFiles(usize),
    /// One file exceeded the per-file byte boundary
    FileTooLarge(String),
    /// The generation provider failed
    Provider {
        /// What the provider reported (internal only)
        source: GenerationError,
        /// Route-specific user-facing strings
        messages: RouteMessages,
    },
    /// Anything unclassified
    Internal(RouteMessages),
}

impl AppError {
    /// Classify a fetch/extraction failure from the URL workflow
    pub fn from_extract(err: ExtractError, messages: RouteMessages) -> Self {
        match err {
            ExtractError::Unreachable(_) => AppError::UnreachableSource,
            ExtractError::HttpStatus(403) | ExtractError::HttpStatus(404) => {
                AppError::AccessRestricted
            }
            ExtractError::Pdf(_) => AppError::InvalidDocument,
            ExtractError::HttpStatus(status) => {
                warn!(status, "fetch returned non-success status");
                AppError::Internal(messages)
            }
            ExtractError::Fetch(detail) => {
                warn!(%detail, "fetch failed");
                AppError::Internal(messages)
            }
        }
    }

    /// Classify a pipeline failure
    pub fn from_pipeline(err: PipelineError, messages: RouteMessages) -> Self {
        match err {
            PipelineError::Provider(source) => AppError::Provider { source, messages },
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingInput(message) => (StatusCode::BAD_REQUEST, *message),
            AppError::Configuration(message) => (StatusCode::INTERNAL_SERVER_ERROR, *message),
            AppError::UnreachableSource => (
                StatusCode::BAD_REQUEST,
                "Invalid URL or website is not accessible.",
            ),
            AppError::AccessRestricted => (
                StatusCode::BAD_REQUEST,
                "Unable to access the website. The site may be restricted or the URL may be \
                 incorrect.",
            ),
            AppError::InvalidDocument => (
                StatusCode::BAD_REQUEST,
                "Invalid PDF file or corrupted document.",
            ),
            AppError::TooManyFiles(_) => (
                StatusCode::BAD_REQUEST,
                "Too many files. Upload at most 10 files per request.",
            ),
            AppError::FileTooLarge(_) => (
                StatusCode::BAD_REQUEST,
                "File exceeds the 10 MB upload limit.",
            ),
            AppError::Provider { source, messages } => {
                warn!(error = %source, "generation provider failed");
                if source.is_auth_or_quota() {
                    (StatusCode::INTERNAL_SERVER_ERROR, messages.provider_config)
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, messages.retry)
                }
            }
            AppError::Internal(messages) => (StatusCode::INTERNAL_SERVER_ERROR, messages.retry),
        };

        let body = Json(ErrorBody {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}
