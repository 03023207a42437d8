use crate::config::RunConfig;
use crate::diff::LinkDiff;
use crate::record::LinkResults;
use crate::snapshot::{SnapshotError, load_snapshot, save_snapshot};
use crate::verify::Verifier;
use chrono::{DateTime, Local};
use indicatif::{ProgressBar, ProgressStyle};
use linksentry_scanner::{Crawler, Fetcher, ScanError};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Everything a finished run produced, ready to be reported and persisted
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub start_url: String,
    pub domain: String,
    pub pages_crawled: usize,
    pub links_checked: usize,
    pub visited: BTreeSet<String>,
    pub diff: LinkDiff,
    /// Current results with referrers attached; replaces the old snapshot
    pub results: LinkResults,
    pub output: PathBuf,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl RunOutcome {
    /// Overwrite the snapshot with this run's results
    pub fn save(&self) -> Result<(), SnapshotError> {
        save_snapshot(&self.output, &self.results)
    }
}

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    pb
}

fn counter(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}

/// Crawl, verify and diff against the snapshot at `config.output`.
///
/// The snapshot is read but not written; call [`RunOutcome::save`] once the
/// report has been shown. An unreadable or corrupt snapshot is replaced by an
/// empty baseline.
pub async fn execute_run(config: &RunConfig) -> Result<RunOutcome, RunError> {
    let started_at = Local::now();
    let fetcher = Fetcher::new(config.fetch_config())?;

    // Crawl phase
    let mut crawler = Crawler::new(fetcher.clone(), config.domain.as_str());
    let crawl_bar = config.show_progress.then(|| spinner("Starting crawl..."));
    if let Some(ref pb) = crawl_bar {
        let pb = pb.clone();
        crawler = crawler.with_progress_callback(Arc::new(move |count: usize, url: &str| {
            pb.set_message(format!(
                "Crawling... {} pages visited ({})",
                count,
                extract_url_path(url)
            ));
        }));
    }

    let crawl = match crawler.crawl(&config.start_url).await {
        Ok(crawl) => crawl,
        Err(e) => {
            if let Some(ref pb) = crawl_bar {
                pb.finish_and_clear();
            }
            return Err(e.into());
        }
    };

    if let Some(ref pb) = crawl_bar {
        pb.finish_with_message(format!(
            "Crawl complete! {} internal pages, {} referenced links",
            crawl.visited.len(),
            crawl.referrers.len()
        ));
    }
    info!(
        "Found {} internal pages, referrers recorded for {} links",
        crawl.visited.len(),
        crawl.referrers.len()
    );

    // Verification phase
    let mut verifier = Verifier::new(fetcher, config.domain.as_str());
    let verify_bar = config.show_progress.then(|| counter(crawl.referrers.len()));
    if let Some(ref pb) = verify_bar {
        let pb = pb.clone();
        verifier = verifier.with_progress_callback(Arc::new(
            move |done: usize, _total: usize, url: &str| {
                pb.set_position(done as u64);
                pb.set_message(extract_url_path(url));
            },
        ));
    }

    let results = verifier.verify_graph(&crawl.referrers).await;

    if let Some(ref pb) = verify_bar {
        pb.finish_and_clear();
    }

    // Diff against the previous run
    let previous = match load_snapshot(&config.output) {
        Ok(previous) => previous,
        Err(e) => {
            warn!("{}; comparing against an empty baseline", e);
            LinkResults::new()
        }
    };

    let diff = LinkDiff::compute(&previous, &results);

    Ok(RunOutcome {
        start_url: config.start_url.clone(),
        domain: config.domain.clone(),
        pages_crawled: crawl.visited.len(),
        links_checked: results.len(),
        visited: crawl.visited,
        diff,
        results,
        output: config.output.clone(),
        started_at,
        finished_at: Local::now(),
    })
}
