//! Pure decisions for the bulk engine - no I/O here

use crate::types::MergeRequest;

/// What the open MRs for a source/target pair mean for this run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingMergeRequest<'a> {
    /// A non-draft MR exists; nothing to do
    Open(&'a MergeRequest),
    /// Only drafts exist; holds the last draft scanned
    Draft(&'a MergeRequest),
}

/// Classify the open MRs for a pair, in API order.
///
/// The first non-draft MR wins and ends the scan. If every MR is a draft,
/// the last one scanned is reported. Returns `None` for an empty list.
pub fn classify_open_merge_requests(mrs: &[MergeRequest]) -> Option<ExistingMergeRequest<'_>> {
    let mut last_draft = None;

    for mr in mrs {
        if !mr.is_draft() {
            return Some(ExistingMergeRequest::Open(mr));
        }
        last_draft = Some(mr);
    }

    last_draft.map(ExistingMergeRequest::Draft)
}

/// Title for an MR created by the bulk engine
pub fn merge_request_title(origin: &str, target: &str) -> String {
    format!("Merge {origin} into {target}")
}

/// Description for an MR created by the bulk engine
pub fn merge_request_description(origin: &str, target: &str) -> String {
    format!(
        "This merge request was created automatically by gitlab-tools.\n\n\
         **Source Branch**: `{origin}`\n\
         **Target Branch**: `{target}`"
    )
}
