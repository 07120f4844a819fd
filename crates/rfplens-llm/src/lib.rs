//! RFPLens Generation Provider Layer
//!
//! Pluggable text-generation providers behind one object-safe trait.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions API
//! - `GeminiProvider`: Google Gemini generateContent API
//!
//! Every provider makes a single attempt per request. Failure
//! interpretation (billing vs. transient vs. configuration) is the
//! transport layer's job; this crate only reports what happened.
//!
//! # Examples
//!
//! ```
//! use rfplens_llm::{GenerationProvider, GenerationRequest, MockProvider};
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new("Hello from the model!");
//! let request = GenerationRequest::new("test prompt", 500);
//! let result = provider.generate(&request).await.unwrap();
//! assert_eq!(result, "Hello from the model!");
//! # });
//! ```

#![warn(missing_docs)]

pub mod gemini;
pub mod openai;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

/// Temperature used for every analysis call. Low, to favor consistent
/// factual extraction over creative variance.
pub const ANALYSIS_TEMPERATURE: f32 = 0.3;

/// Errors surfaced by generation providers
#[derive(Error, Debug)]
pub enum GenerationError {
    /// No credential was configured for this provider
    #[error("provider credential not configured")]
    MissingCredential,

    /// Network-level failure before an API response arrived
    #[error("communication error: {0}")]
    Http(String),

    /// The API answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the provider
        status: u16,
        /// Body or message text returned by the provider
        message: String,
    },

    /// The API answered 2xx but the body was not in the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    /// Whether this failure looks like an authentication, billing, or quota
    /// problem rather than a transient one. Used by the transport layer to
    /// classify the failure for the user.
    pub fn is_auth_or_quota(&self) -> bool {
        match self {
            GenerationError::MissingCredential => true,
            GenerationError::Api { status, message } => {
                matches!(status, 401 | 403 | 429)
                    || message.contains("API key")
                    || message.contains("quota")
            }
            _ => false,
        }
    }
}

/// One generation request: a rendered prompt plus its ceilings.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Optional system-role instruction, sent ahead of the prompt
    pub system: Option<String>,
    /// The fully rendered instruction text
    pub prompt: String,
    /// Output token ceiling
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl GenerationRequest {
    /// Create a request with the standard analysis temperature
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            max_tokens,
            temperature: ANALYSIS_TEMPERATURE,
        }
    }

    /// Attach a system-role instruction
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// A text-generation capability.
///
/// Object-safe so the transport can hold `Arc<dyn GenerationProvider>` and
/// tests can substitute a [`MockProvider`].
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate text for the given request. Single attempt, no retry.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Whether this provider has a credential and can be called at all.
    /// Checked before any extraction or network work is done, so a
    /// misconfigured deployment fails fast without upstream spend.
    fn is_configured(&self) -> bool {
        true
    }
}

/// Mock generation provider for deterministic testing.
///
/// Returns pre-configured responses without any network calls, records how
/// often it was invoked, and can simulate failures.
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    fail_with: Arc<Mutex<Option<String>>>,
    configured: bool,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a mock returning a fixed response for every prompt
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            fail_with: Arc::new(Mutex::new(None)),
            configured: true,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock that reports itself unconfigured (no credential)
    pub fn unconfigured() -> Self {
        let mut mock = Self::new("");
        mock.configured = false;
        mock
    }

    /// Add a specific response for an exact prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), response.into());
    }

    /// Make every subsequent call fail with an API error carrying `message`
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail_with.lock().unwrap() = Some(message.into());
    }

    /// How many times `generate` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl GenerationProvider for MockProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        *self.call_count.lock().unwrap() += 1;

        if !self.configured {
            return Err(GenerationError::MissingCredential);
        }

        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(GenerationError::Api {
                status: 500,
                message,
            });
        }

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(&request.prompt) {
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}
