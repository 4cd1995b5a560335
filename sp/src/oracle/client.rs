//! Oracle trait definition

use async_trait::async_trait;

use super::OracleError;

/// Everything needed for one oracle call
///
/// `instructions` carries the system-level contract (output schema, ranking
/// rules); `input` carries the request-specific payload. When `json_only` is
/// set the provider is asked for its forced structured-output mode.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// System instructions (rendered from a Handlebars template)
    pub instructions: String,

    /// Request-specific input text
    pub input: String,

    /// Force the provider's JSON output mode
    pub json_only: bool,

    /// Max tokens for the reply (capped by client config)
    pub max_tokens: u32,
}

impl GenerationRequest {
    /// Plain-text generation request
    pub fn text(instructions: impl Into<String>, input: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            instructions: instructions.into(),
            input: input.into(),
            json_only: false,
            max_tokens,
        }
    }

    /// Generation request with forced JSON output
    pub fn json(instructions: impl Into<String>, input: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            instructions: instructions.into(),
            input: input.into(),
            json_only: true,
            max_tokens,
        }
    }
}

/// Stateless text-generation oracle - each call is independent
///
/// This is the core abstraction for the planning pipeline. The oracle is
/// handed a natural-language instruction and is expected to reply with text
/// conforming to the structural contract embedded in the prompt. Nothing is
/// guaranteed about that reply; callers own the parsing.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Send a single generation request (blocking until complete)
    async fn generate(&self, request: GenerationRequest) -> Result<String, OracleError>;
}
