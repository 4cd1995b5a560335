//! SweetSpot - group trip planning service
//!
//! SweetSpot plans group trips by combining a text-generation oracle with
//! simple trip constraints. One inbound request runs a three-stage pipeline:
//!
//! - **Validate**: normalize the raw trip request (departures, group
//!   interest profiles, date range) and fail fast on the first broken rule.
//! - **Shortlist**: one oracle call returns a ranked list of exactly K
//!   candidate destination cities; any other count rejects the reply.
//! - **Fan-out**: one concurrent oracle call per candidate generates a
//!   schema-shaped plan; all calls are joined before responding, results
//!   stay in shortlist order, and a failure in one candidate's call becomes
//!   data in that slot instead of failing the request.
//!
//! # Modules
//!
//! - [`oracle`] - oracle trait and OpenAI-compatible client
//! - [`trip`] - trip request model and input validation
//! - [`prompt`] - deterministic prompt construction
//! - [`shortlist`] - destination shortlist service
//! - [`planner`] - concurrent fan-out and per-slot aggregation
//! - [`pipeline`] - end-to-end pipeline and error taxonomy
//! - [`server`] - HTTP surface
//! - [`store`] - persisted-store request source
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod oracle;
pub mod pipeline;
pub mod planner;
pub mod prompt;
pub mod server;
pub mod shortlist;
pub mod store;
pub mod trip;

// Re-export commonly used types
pub use config::{Config, OracleConfig, ServerConfig, ShortlistConfig};
pub use oracle::{GenerationRequest, OpenAIClient, Oracle, OracleError, create_oracle};
pub use pipeline::{PipelineError, TripPipeline, TripResponse};
pub use planner::{PlanResult, PlanningOrchestrator, aggregate};
pub use prompt::{PromptBuilder, PromptError};
pub use server::{AppState, router, serve};
pub use shortlist::{Candidate, ShortlistError, ShortlistService};
pub use store::{FileRequestSource, RequestSource, StoreError, TripDocument};
pub use trip::{Departure, GroupProfile, RawDeparture, RawTripRequest, TripRequest, ValidationError, validate};
