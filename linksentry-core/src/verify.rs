use crate::record::{HEAD_REJECTED_STATUSES, LinkRecord, LinkResults, attach_referrers};
use linksentry_scanner::{FetchMethod, Fetcher, ReferrerGraph};
use std::sync::Arc;
use tracing::{debug, info};

/// Called with (links checked so far, total links, link being checked)
pub type VerifyProgressCallback = Arc<dyn Fn(usize, usize, &str) + Send + Sync>;

/// Checks the liveness of discovered links, one request at a time.
pub struct Verifier {
    fetcher: Fetcher,
    domain: String,
    progress_callback: Option<VerifyProgressCallback>,
}

impl Verifier {
    pub fn new(fetcher: Fetcher, domain: impl Into<String>) -> Self {
        Self {
            fetcher,
            domain: domain.into(),
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: VerifyProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// One record per distinct URL. Referrer lists are left empty.
    pub async fn verify<'a, I>(&self, urls: I) -> LinkResults
    where
        I: IntoIterator<Item = &'a str>,
    {
        let urls: Vec<&str> = urls.into_iter().collect();
        let total = urls.len();
        let mut results = LinkResults::new();

        info!("Verifying {} links", total);

        for (idx, url) in urls.into_iter().enumerate() {
            if results.contains_key(url) {
                continue;
            }

            if let Some(ref callback) = self.progress_callback {
                callback(idx + 1, total, url);
            }

            let status_code = self.resolve_status(url).await;
            results.insert(
                url.to_string(),
                LinkRecord::from_status(url, &self.domain, status_code),
            );
        }

        let broken = results.values().filter(|r| !r.is_working).count();
        info!("Verification complete. {} of {} links broken", broken, results.len());

        results
    }

    /// Verify every resource in the graph and attach its referrers.
    pub async fn verify_graph(&self, graph: &ReferrerGraph) -> LinkResults {
        let mut results = self.verify(graph.resources()).await;
        attach_referrers(&mut results, graph);
        results
    }

    /// HEAD first; servers that refuse HEAD get a second chance with GET.
    /// `None` means the last request attempted never got a response.
    pub async fn resolve_status(&self, url: &str) -> Option<u16> {
        let head = self.fetcher.fetch(url, FetchMethod::Head).await;

        match head.status_code() {
            Some(code) if HEAD_REJECTED_STATUSES.contains(&code) => {
                debug!("HEAD {} answered {}, retrying with GET", url, code);
                self.fetcher.fetch(url, FetchMethod::Get).await.status_code()
            }
            status => status,
        }
    }
}
