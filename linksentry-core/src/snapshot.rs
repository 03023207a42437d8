// Snapshot persistence: the previous run's results as a JSON object keyed by URL

use crate::record::LinkResults;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to access snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot {path} is not a valid link result file: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Load the previous run's results.
///
/// A missing file is not an error: it yields an empty baseline. Unreadable or
/// undecodable content is reported to the caller.
pub fn load_snapshot(path: &Path) -> Result<LinkResults> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No snapshot at {}, starting from an empty baseline", path.display());
            return Ok(LinkResults::new());
        }
        Err(source) => {
            return Err(SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let results: LinkResults =
        serde_json::from_str(&content).map_err(|source| SnapshotError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Loaded {} records from {}", results.len(), path.display());
    Ok(results)
}

/// Replace the snapshot at `path` with `results`, four-space indented,
/// non-ASCII characters written as-is.
pub fn save_snapshot(path: &Path, results: &LinkResults) -> Result<()> {
    let json = encode_snapshot(results)?;

    fs::write(path, json).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Saved {} records to {}", results.len(), path.display());
    Ok(())
}

pub fn encode_snapshot(results: &LinkResults) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    results.serialize(&mut serializer)?;
    Ok(buf)
}
