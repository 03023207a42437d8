use crate::error::Result;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderValue, UPGRADE_INSECURE_REQUESTS,
};
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:100.0) Gecko/20100101 Firefox/100.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_MAX_REDIRECTS: usize = 30;

/// Settings for the shared HTTP fetcher
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-request timeout, covering connect, redirects and body
    pub timeout: Duration,
    /// Pause inserted after every request
    pub delay: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            delay: DEFAULT_DELAY,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMethod {
    Head,
    Get,
}

impl FetchMethod {
    fn as_method(self) -> Method {
        match self {
            FetchMethod::Head => Method::HEAD,
            FetchMethod::Get => Method::GET,
        }
    }
}

/// What came back from a single request.
///
/// Transport failures (DNS, refused, reset, timeout, unsupported scheme) are
/// folded into `Unreachable` instead of being returned as errors.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Response {
        /// Status of the final response after redirects
        status: u16,
        /// Only read for GET requests
        body: Option<String>,
    },
    Unreachable(String),
}

impl FetchOutcome {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchOutcome::Response { status, .. } => Some(*status),
            FetchOutcome::Unreachable(_) => None,
        }
    }
}

/// Sequential HTTP helper used by both the crawl and the verification phase.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    delay: Duration,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(browser_headers())
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self {
            client,
            delay: config.delay,
        })
    }

    /// Issue one request and wait out the courtesy delay afterwards,
    /// whatever the outcome.
    pub async fn fetch(&self, url: &str, method: FetchMethod) -> FetchOutcome {
        let outcome = self.send(url, method).await;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        outcome
    }

    async fn send(&self, url: &str, method: FetchMethod) -> FetchOutcome {
        debug!("{:?} {}", method, url);

        let response = match self.client.request(method.as_method(), url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("Connection failure for {}: {}", url, e);
                return FetchOutcome::Unreachable(e.to_string());
            }
        };

        let status = response.status().as_u16();
        let body = match method {
            FetchMethod::Head => None,
            FetchMethod::Get => match response.text().await {
                Ok(text) => Some(text),
                Err(e) => {
                    debug!("Body of {} could not be read: {}", url, e);
                    return FetchOutcome::Unreachable(e.to_string());
                }
            },
        };

        debug!("{} -> {}", url, status);

        FetchOutcome::Response { status, body }
    }
}

// Content-Encoding is left to reqwest so compressed bodies are always decoded.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}
