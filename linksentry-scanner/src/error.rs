use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Start URL {url} is outside the crawl domain {domain}")]
    OutOfScope { url: String, domain: String },
}

pub type Result<T> = std::result::Result<T, ScanError>;
