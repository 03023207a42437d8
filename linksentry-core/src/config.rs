use crate::report::ReportFormat;
use linksentry_scanner::FetchConfig;
use linksentry_scanner::fetch::{DEFAULT_DELAY, DEFAULT_TIMEOUT};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_START_URL: &str = "https://pninclusione21-27.lavoro.gov.it/";
pub const DEFAULT_DOMAIN: &str = "pninclusione21-27.lavoro.gov.it";
pub const DEFAULT_OUTPUT: &str = "link_results.json";

/// Configuration for one crawl-verify-diff run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub start_url: String,
    /// Only pages on exactly this host are crawled
    pub domain: String,
    pub delay: Duration,
    pub timeout: Duration,
    /// Snapshot read as the baseline and overwritten with the new results
    pub output: PathBuf,
    pub format: ReportFormat,
    pub show_progress: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
            delay: DEFAULT_DELAY,
            timeout: DEFAULT_TIMEOUT,
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: ReportFormat::Text,
            show_progress: false,
        }
    }
}

impl RunConfig {
    /// Defaults, but crawling `start_url` within its own host
    pub fn for_start_url(start_url: &Url) -> Self {
        Self {
            start_url: start_url.to_string(),
            domain: start_url.host_str().unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::default()
            .with_timeout(self.timeout)
            .with_delay(self.delay)
    }
}
