use std::collections::{BTreeMap, BTreeSet};
use url::Url;

/// True iff the URL's host is exactly `domain`. Subdomains do not count.
pub fn is_internal(url: &str, domain: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str() == Some(domain),
        Err(_) => false,
    }
}

/// Maps every referenced resource to the pages that reference it.
///
/// Both levels are ordered so iteration and output are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferrerGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl ReferrerGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `page` references `resource`. Empty resource keys are ignored.
    pub fn register(&mut self, resource: &str, page: &str) {
        if resource.is_empty() {
            return;
        }
        self.edges
            .entry(resource.to_string())
            .or_default()
            .insert(page.to_string());
    }

    pub fn contains(&self, resource: &str) -> bool {
        self.edges.contains_key(resource)
    }

    /// Sorted referrers of `resource`, empty if it was never registered
    pub fn referrers_of(&self, resource: &str) -> Vec<String> {
        self.edges
            .get(resource)
            .map(|pages| pages.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
