//! Prompt construction
//!
//! Renders the deterministic instruction texts sent to the oracle: the
//! per-candidate plan prompt and the group-level shortlist instructions.
//! The rendered text embeds, verbatim, the structural contract the oracle's
//! reply must satisfy; that text is the only enforcement mechanism on the
//! reply shape. Rendering is pure - no I/O, byte-identical output for
//! identical input.

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub mod embedded;

use crate::trip::{GroupProfile, TripRequest};

/// Errors from template registration or rendering
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Payload serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Context for the per-candidate plan template
#[derive(Debug, Serialize)]
struct PlanContext {
    city: String,
    start_date: String,
    end_date: String,
    interests: String,
    departures: Vec<DepartureLine>,
}

#[derive(Debug, Serialize)]
struct DepartureLine {
    airport: String,
    // Pre-formatted so the prompt shows "$800", not "$800.0"
    budget: String,
}

/// Context for the shortlist instructions template
#[derive(Debug, Serialize)]
struct ShortlistContext {
    k: usize,
}

/// Renders oracle instruction texts from embedded templates
pub struct PromptBuilder {
    hbs: Handlebars<'static>,
}

impl PromptBuilder {
    /// Create a builder with the embedded templates registered
    pub fn new() -> Result<Self, PromptError> {
        debug!("PromptBuilder::new: called");
        let mut hbs = Handlebars::new();
        // Prompts are plain text, not HTML
        hbs.register_escape_fn(handlebars::no_escape);
        hbs.register_template_string("plan", embedded::PLAN)?;
        hbs.register_template_string("shortlist", embedded::SHORTLIST)?;
        Ok(Self { hbs })
    }

    /// Render the plan prompt for one candidate city
    ///
    /// Embeds the city, every departure with its budget, the date range and
    /// the flattened group interests (source order, duplicates kept).
    pub fn plan_prompt(&self, request: &TripRequest, city: &str) -> Result<String, PromptError> {
        debug!(%city, "PromptBuilder::plan_prompt: called");
        let context = PlanContext {
            city: city.to_string(),
            start_date: request.start_date.format("%Y-%m-%d").to_string(),
            end_date: request.end_date.format("%Y-%m-%d").to_string(),
            interests: flatten_interests(&request.group_profiles),
            departures: request
                .departures
                .iter()
                .map(|leg| DepartureLine {
                    airport: leg.airport.clone(),
                    budget: leg.budget.to_string(),
                })
                .collect(),
        };
        Ok(self.hbs.render("plan", &context)?)
    }

    /// Render the group-level shortlist ranking instructions
    pub fn shortlist_instructions(&self, k: usize) -> Result<String, PromptError> {
        debug!(%k, "PromptBuilder::shortlist_instructions: called");
        Ok(self.hbs.render("shortlist", &ShortlistContext { k })?)
    }

    /// Build the user payload for the shortlist call: the target count and
    /// the group profiles as minified JSON
    pub fn shortlist_payload(&self, profiles: &[GroupProfile], k: usize) -> Result<String, PromptError> {
        debug!(profile_count = profiles.len(), %k, "PromptBuilder::shortlist_payload: called");
        let group = serde_json::to_string(profiles)?;
        Ok(format!("k = {k}\n\ngroup = {group}"))
    }
}

/// Flatten all members' interests into one comma-separated list
fn flatten_interests(profiles: &[GroupProfile]) -> String {
    profiles
        .iter()
        .flat_map(|p| p.interests.iter())
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}
