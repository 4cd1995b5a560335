//! Destination shortlist service
//!
//! One oracle round trip turns the group's interest profiles into a ranked
//! list of exactly K candidate cities. The count contract is strict: any
//! other length rejects the whole reply, no truncation or padding. Ranking
//! and tie-break order are asked of the oracle in the instructions, not
//! recomputed here.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::oracle::{GenerationRequest, Oracle, OracleError};
use crate::prompt::{PromptBuilder, PromptError};
use crate::trip::GroupProfile;

/// Max tokens for the shortlist reply
const SHORTLIST_MAX_TOKENS: u32 = 2048;

/// One ranked destination candidate, immutable once returned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub city: String,
    pub iata: String,
    pub score: f64,
    #[serde(default)]
    pub matched: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

/// Errors from the shortlist stage
#[derive(Debug, Error)]
pub enum ShortlistError {
    #[error("Oracle call failed: {0}")]
    Oracle(#[from] OracleError),

    #[error("Shortlist reply was not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The reply parsed but broke the output contract (missing `candidates`
    /// key, wrong count, malformed entries)
    #[error("Shortlist contract violated: {0}")]
    Contract(String),

    #[error("Prompt rendering failed: {0}")]
    Prompt(#[from] PromptError),
}

/// Obtains the ranked candidate shortlist from the oracle
pub struct ShortlistService {
    oracle: Arc<dyn Oracle>,
    prompts: Arc<PromptBuilder>,
    size: usize,
}

impl ShortlistService {
    /// Create a service producing shortlists of exactly `size` candidates
    pub fn new(oracle: Arc<dyn Oracle>, prompts: Arc<PromptBuilder>, size: usize) -> Self {
        debug!(%size, "ShortlistService::new: called");
        Self { oracle, prompts, size }
    }

    /// Get the ranked shortlist for a group
    ///
    /// Exactly one oracle round trip, no retry and no caching. The reply
    /// must parse as JSON, contain a `candidates` key, and hold exactly
    /// `size` entries.
    pub async fn shortlist(&self, profiles: &[GroupProfile]) -> Result<Vec<Candidate>, ShortlistError> {
        debug!(profile_count = profiles.len(), "shortlist: called");

        let request = GenerationRequest::json(
            self.prompts.shortlist_instructions(self.size)?,
            self.prompts.shortlist_payload(profiles, self.size)?,
            SHORTLIST_MAX_TOKENS,
        );

        let reply = self.oracle.generate(request).await?;
        let candidates = self.parse_reply(&reply)?;

        info!(candidate_count = candidates.len(), "shortlist: contract satisfied");
        Ok(candidates)
    }

    fn parse_reply(&self, reply: &str) -> Result<Vec<Candidate>, ShortlistError> {
        debug!(reply_len = reply.len(), "parse_reply: called");
        let data: serde_json::Value = serde_json::from_str(reply)?;

        let raw_candidates = data
            .get("candidates")
            .cloned()
            .ok_or_else(|| ShortlistError::Contract("missing 'candidates' key".to_string()))?;

        let candidates: Vec<Candidate> = serde_json::from_value(raw_candidates)
            .map_err(|e| ShortlistError::Contract(format!("malformed candidate entry: {e}")))?;

        if candidates.len() != self.size {
            debug!(
                expected = self.size,
                got = candidates.len(),
                "parse_reply: wrong candidate count"
            );
            return Err(ShortlistError::Contract(format!(
                "expected exactly {} candidates, got {}",
                self.size,
                candidates.len()
            )));
        }

        Ok(candidates)
    }
}
