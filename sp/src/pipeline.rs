//! End-to-end planning pipeline
//!
//! request -> validate -> shortlist -> concurrent fan-out -> envelope.
//! Failures that affect the shape of the whole response (validation,
//! shortlist contract) abort the request; failures confined to one
//! candidate's content are already data by the time they get here.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::oracle::Oracle;
use crate::planner::{PlanResult, PlanningOrchestrator};
use crate::prompt::{PromptBuilder, PromptError};
use crate::shortlist::{Candidate, ShortlistError, ShortlistService};
use crate::trip::{RawTripRequest, ValidationError, validate};

/// Request-aborting pipeline failures, mapped onto HTTP statuses
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed client input - 400
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The shortlist oracle broke its output contract - 500, the whole
    /// request fails because no partial shortlist is usable downstream
    #[error("Shortlist contract violated: {0}")]
    UpstreamContract(String),

    /// Any other unexpected failure in the orchestration stage - 500
    #[error("Trip planning failed: {0}")]
    Orchestration(String),
}

impl PipelineError {
    /// HTTP status this failure surfaces as
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::Validation(_) => 400,
            PipelineError::UpstreamContract(_) => 500,
            PipelineError::Orchestration(_) => 500,
        }
    }
}

impl From<ShortlistError> for PipelineError {
    fn from(err: ShortlistError) -> Self {
        match err {
            ShortlistError::Contract(message) => PipelineError::UpstreamContract(message),
            other => PipelineError::Orchestration(other.to_string()),
        }
    }
}

impl From<PromptError> for PipelineError {
    fn from(err: PromptError) -> Self {
        PipelineError::Orchestration(err.to_string())
    }
}

/// Response envelope for one planning request
#[derive(Debug, Serialize)]
pub struct TripResponse {
    /// One result per candidate, in shortlist order
    pub plans: Vec<PlanResult>,
    /// The candidate shortlist, echoed when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortlist: Option<Vec<Candidate>>,
}

/// The whole planning pipeline behind `/plan-trip`
pub struct TripPipeline {
    shortlist: ShortlistService,
    planner: PlanningOrchestrator,
    include_shortlist: bool,
}

impl TripPipeline {
    /// Wire the pipeline onto one oracle client
    ///
    /// `shortlist_size` is the exact candidate count demanded of the
    /// shortlist call; `include_shortlist` controls whether the envelope
    /// echoes the candidates alongside the plans.
    pub fn new(oracle: Arc<dyn Oracle>, shortlist_size: usize, include_shortlist: bool) -> Result<Self, PromptError> {
        debug!(%shortlist_size, %include_shortlist, "TripPipeline::new: called");
        let prompts = Arc::new(PromptBuilder::new()?);
        Ok(Self {
            shortlist: ShortlistService::new(Arc::clone(&oracle), Arc::clone(&prompts), shortlist_size),
            planner: PlanningOrchestrator::new(oracle, prompts),
            include_shortlist,
        })
    }

    /// Plan a group trip from a raw request
    pub async fn plan_trip(&self, raw: RawTripRequest) -> Result<TripResponse, PipelineError> {
        let request = validate(raw)?;
        debug!(
            departure_count = request.departures.len(),
            profile_count = request.group_profiles.len(),
            "plan_trip: request validated"
        );

        let candidates = self.shortlist.shortlist(&request.group_profiles).await?;
        let plans = self.planner.plan_all(&request, &candidates).await?;

        info!(
            plan_count = plans.len(),
            succeeded = plans.iter().filter(|p| p.is_success()).count(),
            "plan_trip: complete"
        );
        Ok(TripResponse {
            plans,
            shortlist: self.include_shortlist.then_some(candidates),
        })
    }
}
