//! Merge candidate selection - pure functions

use crate::types::MergeRequest;

/// Keep only MRs that are ready to be offered for merging.
///
/// Drafts (by flag or title prefix) are dropped; order is preserved.
pub fn filter_merge_candidates(mrs: Vec<MergeRequest>) -> Vec<MergeRequest> {
    mrs.into_iter().filter(|mr| !mr.is_draft()).collect()
}
