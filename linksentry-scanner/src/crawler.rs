use crate::error::{Result, ScanError};
use crate::extract::extract_references;
use crate::fetch::{FetchMethod, FetchOutcome, Fetcher};
use crate::graph::ReferrerGraph;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Called with the number of pages visited so far and the page being fetched
pub type ProgressCallback = Arc<dyn Fn(usize, &str) + Send + Sync>;

/// Everything a crawl discovered
#[derive(Debug, Clone, Default)]
pub struct CrawlOutput {
    /// In-domain pages that were fetched, each exactly once
    pub visited: BTreeSet<String>,
    pub referrers: ReferrerGraph,
}

/// Traversal state for one crawl call
struct CrawlState {
    visited: BTreeSet<String>,
    to_visit: Vec<String>,
    referrers: ReferrerGraph,
}

impl CrawlState {
    fn new(start: String) -> Self {
        Self {
            visited: BTreeSet::new(),
            to_visit: vec![start],
            referrers: ReferrerGraph::new(),
        }
    }

    fn into_output(self) -> CrawlOutput {
        CrawlOutput {
            visited: self.visited,
            referrers: self.referrers,
        }
    }
}

pub struct Crawler {
    fetcher: Fetcher,
    domain: String,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new(fetcher: Fetcher, domain: impl Into<String>) -> Self {
        Self {
            fetcher,
            domain: domain.into(),
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Walk every page reachable from `start_url` without leaving the crawl
    /// domain, recording who references what along the way.
    ///
    /// Pages answering with an error status or not answering at all stay in
    /// the visited set but contribute no references. Out-of-domain links are
    /// recorded but never fetched.
    pub async fn crawl(&self, start_url: &str) -> Result<CrawlOutput> {
        let start = Url::parse(start_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", start_url, e)))?;

        if start.host_str() != Some(self.domain.as_str()) {
            return Err(ScanError::OutOfScope {
                url: start.to_string(),
                domain: self.domain.clone(),
            });
        }

        info!("Starting crawl of {} within {}", start, self.domain);

        let mut state = CrawlState::new(start.to_string());

        while let Some(page) = state.to_visit.pop() {
            if !state.visited.insert(page.clone()) {
                continue;
            }

            if let Some(ref callback) = self.progress_callback {
                callback(state.visited.len(), &page);
            }

            let Some(body) = self.fetch_page(&page).await else {
                continue;
            };

            self.process_page(&mut state, &page, &body);
        }

        info!(
            "Crawl complete. Visited {} pages, {} referenced links",
            state.visited.len(),
            state.referrers.len()
        );

        Ok(state.into_output())
    }

    /// Body of `page` if it should be scanned for references
    async fn fetch_page(&self, page: &str) -> Option<String> {
        match self.fetcher.fetch(page, FetchMethod::Get).await {
            FetchOutcome::Response { status, .. } if status >= 400 => {
                debug!("Not scanning {} (status {})", page, status);
                None
            }
            FetchOutcome::Response { body, .. } => body,
            FetchOutcome::Unreachable(e) => {
                warn!("Connection error for {}: {}", page, e);
                None
            }
        }
    }

    fn process_page(&self, state: &mut CrawlState, page: &str, body: &str) {
        let page_url = match Url::parse(page) {
            Ok(url) => url,
            Err(e) => {
                warn!("Cannot resolve references on {}: {}", page, e);
                return;
            }
        };

        for reference in extract_references(body, &page_url) {
            let target = reference.url.to_string();
            state.referrers.register(&target, page);

            if reference.crawlable
                && reference.url.host_str() == Some(self.domain.as_str())
                && !state.visited.contains(&target)
            {
                debug!("  -> Same domain, adding {} to queue", target);
                state.to_visit.push(target);
            }
        }
    }
}
