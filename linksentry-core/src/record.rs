use linksentry_scanner::{ReferrerGraph, is_internal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statuses for which a HEAD answer is not trusted and GET is tried instead
pub const HEAD_REJECTED_STATUSES: [u16; 3] = [401, 403, 405];

/// Verification outcome for a single URL, in its persisted shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub status_code: Option<u16>,
    pub is_working: bool,
    pub internal_link: bool,
    #[serde(default)]
    pub referrers: Vec<String>,
}

impl LinkRecord {
    /// Build a record from the final status, `None` meaning no response at all
    pub fn from_status(url: &str, domain: &str, status_code: Option<u16>) -> Self {
        Self {
            status_code,
            is_working: is_working(status_code),
            internal_link: is_internal(url, domain),
            referrers: Vec::new(),
        }
    }
}

/// URL -> record, ordered by URL
pub type LinkResults = BTreeMap<String, LinkRecord>;

pub fn is_working(status_code: Option<u16>) -> bool {
    matches!(status_code, Some(code) if code < 400)
}

/// Copy each URL's sorted referrer list from the graph into its record.
/// URLs the graph never saw get an empty list.
pub fn attach_referrers(results: &mut LinkResults, graph: &ReferrerGraph) {
    for (url, record) in results.iter_mut() {
        record.referrers = graph.referrers_of(url);
    }
}
