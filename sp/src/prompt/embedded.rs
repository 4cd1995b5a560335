//! Embedded prompt templates
//!
//! These are compiled into the binary from .pmt files at build time.

/// Per-candidate trip plan prompt
pub const PLAN: &str = include_str!("../../prompts/plan.pmt");

/// Group-level shortlist ranking instructions
pub const SHORTLIST: &str = include_str!("../../prompts/shortlist.pmt");
