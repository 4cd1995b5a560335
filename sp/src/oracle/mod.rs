//! Generation oracle module for SweetSpot
//!
//! The oracle is the external text-generation service both pipeline stages
//! talk to: once for the destination shortlist, then once per candidate for
//! the detailed plan.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod openai;

pub use client::{GenerationRequest, Oracle};
pub use error::OracleError;
pub use openai::OpenAIClient;

use crate::config::OracleConfig;

/// Create an oracle client based on the provider specified in config
///
/// Currently only the "openai" provider (and anything speaking its
/// chat-completions dialect via `base-url`) is supported.
pub fn create_oracle(config: &OracleConfig) -> Result<Arc<dyn Oracle>, OracleError> {
    debug!(provider = %config.provider, model = %config.model, "create_oracle: called");
    match config.provider.as_str() {
        "openai" => {
            debug!("create_oracle: creating OpenAI client");
            Ok(Arc::new(OpenAIClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_oracle: unknown provider");
            Err(OracleError::InvalidResponse(format!(
                "Unknown oracle provider: '{}'. Supported: openai",
                other
            )))
        }
    }
}
