//! Interactive merge session
//!
//! Two-phase pattern matching bulk/:
//! 1. Plan - pick non-draft candidates (pure, testable)
//! 2. Execute - ask a `MergePrompt` about each and accept the chosen ones

mod execute;
mod plan;

pub use execute::{
    MergeDecision, MergeEvent, MergePrompt, MergeSessionSummary, run_merge_session,
};
pub use plan::filter_merge_candidates;
