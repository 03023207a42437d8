use crate::record::LinkResults;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    pub url: String,
    pub status_code: Option<u16>,
    pub referrers: Vec<String>,
}

/// Differences between the previous snapshot and the current run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkDiff {
    /// Known before, not discovered this time
    pub removed: BTreeSet<String>,
    /// Discovered this time, unknown before
    pub added: BTreeSet<String>,
    /// Working before, not working now
    pub became_broken: BTreeSet<String>,
    /// Every link not working in the current run, ordered by URL
    pub currently_broken: Vec<BrokenLink>,
}

impl LinkDiff {
    pub fn compute(previous: &LinkResults, current: &LinkResults) -> Self {
        let removed = previous
            .keys()
            .filter(|url| !current.contains_key(*url))
            .cloned()
            .collect();

        let added = current
            .keys()
            .filter(|url| !previous.contains_key(*url))
            .cloned()
            .collect();

        let became_broken = current
            .iter()
            .filter(|(url, now)| {
                previous
                    .get(*url)
                    .is_some_and(|before| before.is_working && !now.is_working)
            })
            .map(|(url, _)| url.clone())
            .collect();

        let currently_broken = current
            .iter()
            .filter(|(_, record)| !record.is_working)
            .map(|(url, record)| BrokenLink {
                url: url.clone(),
                status_code: record.status_code,
                referrers: record.referrers.clone(),
            })
            .collect();

        Self {
            removed,
            added,
            became_broken,
            currently_broken,
        }
    }

    /// True when anything was removed, added or became broken
    pub fn has_changes(&self) -> bool {
        !self.removed.is_empty() || !self.added.is_empty() || !self.became_broken.is_empty()
    }

    pub fn has_broken(&self) -> bool {
        !self.currently_broken.is_empty()
    }
}
