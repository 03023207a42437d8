// Tests for snapshot persistence

use linksentry_core::record::{LinkRecord, LinkResults};
use linksentry_core::snapshot::{SnapshotError, encode_snapshot, load_snapshot, save_snapshot};
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn record(status_code: Option<u16>, internal_link: bool, referrers: &[&str]) -> LinkRecord {
    LinkRecord {
        status_code,
        is_working: matches!(status_code, Some(code) if code < 400),
        internal_link,
        referrers: referrers.iter().map(|r| r.to_string()).collect(),
    }
}

fn sample_results() -> LinkResults {
    let mut results = LinkResults::new();
    results.insert(
        "https://example.com/".to_string(),
        record(Some(200), true, &["https://example.com/about"]),
    );
    results.insert(
        "https://example.com/città".to_string(),
        record(Some(404), true, &["https://example.com/", "https://example.com/about"]),
    );
    results.insert(
        "https://offline.example.org/".to_string(),
        record(None, false, &["https://example.com/"]),
    );
    results
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_missing_snapshot_is_empty_baseline() {
    let dir = TempDir::new().unwrap();
    let loaded = load_snapshot(&dir.path().join("nothing-here.json")).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn test_malformed_snapshot_is_an_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{{ this is not json").unwrap();

    let result = load_snapshot(file.path());
    assert!(matches!(result, Err(SnapshotError::Malformed { .. })));
}

#[test]
fn test_wrong_shape_is_malformed() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"["https://example.com/"]"#).unwrap();

    let result = load_snapshot(file.path());
    assert!(matches!(result, Err(SnapshotError::Malformed { .. })));
}

#[test]
fn test_load_accepts_records_without_referrers() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"http://x/a": {{"status_code": 200, "is_working": true, "internal_link": true}}}}"#
    )
    .unwrap();

    let loaded = load_snapshot(file.path()).unwrap();
    let a = &loaded["http://x/a"];
    assert_eq!(a.status_code, Some(200));
    assert!(a.is_working);
    assert!(a.referrers.is_empty());
}

#[test]
fn test_load_null_status_code() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"http://x/down": {{"status_code": null, "is_working": false, "internal_link": false, "referrers": ["http://x/"]}}}}"#
    )
    .unwrap();

    let loaded = load_snapshot(file.path()).unwrap();
    assert_eq!(loaded["http://x/down"].status_code, None);
    assert_eq!(loaded["http://x/down"].referrers, vec!["http://x/".to_string()]);
}

// ============================================================================
// Saving
// ============================================================================

#[test]
fn test_save_then_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("link_results.json");
    let results = sample_results();

    save_snapshot(&path, &results).unwrap();
    let loaded = load_snapshot(&path).unwrap();

    assert_eq!(loaded, results);
}

#[test]
fn test_save_replaces_previous_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("link_results.json");

    save_snapshot(&path, &sample_results()).unwrap();

    let mut smaller = LinkResults::new();
    smaller.insert("http://x/only".to_string(), record(Some(200), true, &[]));
    save_snapshot(&path, &smaller).unwrap();

    let loaded = load_snapshot(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.contains_key("http://x/only"));
}

#[test]
fn test_save_to_unwritable_path_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing-dir").join("link_results.json");

    let result = save_snapshot(&path, &sample_results());
    assert!(matches!(result, Err(SnapshotError::Io { .. })));
}

#[test]
fn test_encoding_layout() {
    let encoded = String::from_utf8(encode_snapshot(&sample_results()).unwrap()).unwrap();

    // four-space indentation, fields in persisted order
    assert!(encoded.starts_with("{\n    \"https://example.com/\": {\n        \"status_code\": 200,"));
    assert!(encoded.contains("\"status_code\": null"));
    assert!(encoded.contains("\"internal_link\": false"));

    // non-ASCII kept as-is
    assert!(encoded.contains("città"));
    assert!(!encoded.contains("\\u00e0"));

    let status_pos = encoded.find("\"status_code\"").unwrap();
    let working_pos = encoded.find("\"is_working\"").unwrap();
    let internal_pos = encoded.find("\"internal_link\"").unwrap();
    let referrers_pos = encoded.find("\"referrers\"").unwrap();
    assert!(status_pos < working_pos && working_pos < internal_pos && internal_pos < referrers_pos);
}

#[test]
fn test_saved_file_is_valid_utf8_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    save_snapshot(&path, &sample_results()).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value.is_object());
    assert_eq!(value.as_object().unwrap().len(), 3);
}
