pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod graph;

pub use crawler::{CrawlOutput, Crawler, ProgressCallback};
pub use error::ScanError;
pub use fetch::{FetchConfig, FetchMethod, FetchOutcome, Fetcher};
pub use graph::{ReferrerGraph, is_internal};
