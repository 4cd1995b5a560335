//! Concurrent per-candidate plan generation
//!
//! The fan-out/aggregate stage of the pipeline. One oracle call is issued
//! per shortlist candidate, all calls run concurrently, and the stage joins
//! on every call before producing output, so total latency tracks the
//! slowest call instead of the sum. Each candidate owns its prompt and its
//! result slot: a parse failure or transport failure in one call becomes a
//! `Failure` value in that slot and never touches its siblings.

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::oracle::{GenerationRequest, Oracle};
use crate::prompt::{PromptBuilder, PromptError};
use crate::shortlist::Candidate;
use crate::trip::TripRequest;

/// System instructions for the per-candidate plan call
const PLAN_INSTRUCTIONS: &str = "Use the tools to help planning out user's trip";

/// Max tokens for one plan reply
const PLAN_MAX_TOKENS: u32 = 4096;

/// Outcome of one candidate's plan generation
///
/// Serialized untagged: a `Success` slot is the plan object itself, a
/// `Failure` slot is `{"raw": .., "error": ..}`. `Failure` is listed first
/// so deserialization only picks it for objects carrying both keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanResult {
    Failure { raw: String, error: String },
    Success(serde_json::Value),
}

impl PlanResult {
    pub fn is_success(&self) -> bool {
        matches!(self, PlanResult::Success(_))
    }

    /// The parsed plan, if this slot succeeded
    pub fn plan(&self) -> Option<&serde_json::Value> {
        match self {
            PlanResult::Success(plan) => Some(plan),
            PlanResult::Failure { .. } => None,
        }
    }
}

/// Convert one raw oracle reply into a `PlanResult`. Never fails.
///
/// Only top-level parseability is enforced; the plan's inner structure is
/// asserted by the prompt contract, not re-validated here.
pub fn aggregate(raw: &str) -> PlanResult {
    debug!(raw_len = raw.len(), "aggregate: called");
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(plan) => PlanResult::Success(plan),
        Err(e) => {
            debug!(error = %e, "aggregate: reply did not parse as JSON");
            PlanResult::Failure {
                raw: raw.to_string(),
                error: e.to_string(),
            }
        }
    }
}

/// Fans out one oracle call per candidate and joins on all of them
pub struct PlanningOrchestrator {
    oracle: Arc<dyn Oracle>,
    prompts: Arc<PromptBuilder>,
}

impl PlanningOrchestrator {
    pub fn new(oracle: Arc<dyn Oracle>, prompts: Arc<PromptBuilder>) -> Self {
        Self { oracle, prompts }
    }

    /// Generate one plan per candidate, concurrently
    ///
    /// Output position i corresponds to candidate position i regardless of
    /// completion order. The only fallible part is prompt rendering, which
    /// happens up front before anything is dispatched; once the calls are
    /// in flight every outcome is captured into its own slot.
    pub async fn plan_all(
        &self,
        request: &TripRequest,
        candidates: &[Candidate],
    ) -> Result<Vec<PlanResult>, PromptError> {
        debug!(candidate_count = candidates.len(), "plan_all: called");

        let prompts: Vec<String> = candidates
            .iter()
            .map(|c| self.prompts.plan_prompt(request, &c.city))
            .collect::<Result<_, _>>()?;

        let calls = prompts.into_iter().map(|prompt| {
            let oracle = Arc::clone(&self.oracle);
            async move {
                oracle
                    .generate(GenerationRequest::text(PLAN_INSTRUCTIONS, prompt, PLAN_MAX_TOKENS))
                    .await
            }
        });

        // Join barrier: wait for every call, keep input order
        let replies = join_all(calls).await;

        let results: Vec<PlanResult> = replies
            .into_iter()
            .map(|reply| match reply {
                Ok(text) => aggregate(&text),
                Err(e) => {
                    warn!(error = %e, "plan_all: oracle call failed for one candidate");
                    PlanResult::Failure {
                        raw: String::new(),
                        error: e.to_string(),
                    }
                }
            })
            .collect();

        info!(
            total = results.len(),
            succeeded = results.iter().filter(|r| r.is_success()).count(),
            "plan_all: fan-out complete"
        );
        Ok(results)
    }
}
