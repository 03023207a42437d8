use linksentry::commands::command_argument_builder;
use linksentry::handlers::*;
use linksentry_core::config::{DEFAULT_DOMAIN, DEFAULT_OUTPUT, DEFAULT_START_URL, RunConfig};
use linksentry_core::report::ReportFormat;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn config(args: &[&str]) -> anyhow::Result<RunConfig> {
    let mut argv = vec!["linksentry"];
    argv.extend_from_slice(args);
    let matches = command_argument_builder().try_get_matches_from(argv)?;
    config_from_args(&matches)
}

#[test]
fn test_no_arguments_uses_defaults() {
    let config = config(&[]).unwrap();

    assert_eq!(config.start_url, DEFAULT_START_URL);
    assert_eq!(config.domain, DEFAULT_DOMAIN);
    assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
    assert_eq!(config.delay, Duration::from_millis(500));
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert_eq!(config.format, ReportFormat::Text);
    assert!(config.show_progress);
}

#[test]
fn test_url_sets_domain_from_host() {
    let config = config(&["--url", "https://docs.example.com/start"]).unwrap();

    assert_eq!(config.start_url, "https://docs.example.com/start");
    assert_eq!(config.domain, "docs.example.com");
}

#[test]
fn test_domain_override() {
    let config = config(&["-u", "https://example.com/", "-d", "www.example.com"]).unwrap();
    assert_eq!(config.domain, "www.example.com");
}

#[test]
fn test_url_without_host_needs_domain() {
    let result = config(&["--url", "data:text/plain,hello"]);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("--domain"));
}

#[test]
fn test_pacing_options() {
    let config = config(&["--delay", "0", "--timeout", "3"]).unwrap();
    assert_eq!(config.delay, Duration::ZERO);
    assert_eq!(config.timeout, Duration::from_secs(3));
}

#[test]
fn test_zero_timeout_rejected() {
    assert!(config(&["--timeout", "0"]).is_err());
}

#[test]
fn test_non_numeric_delay_rejected() {
    assert!(config(&["--delay", "soon"]).is_err());
}

#[test]
fn test_format_and_quiet() {
    let config = config(&["--format", "json", "--quiet"]).unwrap();
    assert_eq!(config.format, ReportFormat::Json);
    assert!(!config.show_progress);
}

#[test]
fn test_unknown_format_rejected() {
    assert!(config(&["--format", "xml"]).is_err());
}

#[test]
fn test_output_path_plain() {
    let config = config(&["-o", "reports/site.json"]).unwrap();
    assert_eq!(config.output, PathBuf::from("reports/site.json"));
}

#[test]
fn test_output_path_tilde_expansion() {
    if let Ok(home) = std::env::var("HOME") {
        let expanded = expand_output_path("~/site.json");
        assert_eq!(expanded, PathBuf::from(home).join("site.json"));
    }
}

#[tokio::test]
async fn test_handle_run_unreachable_site_writes_empty_snapshot() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("link_results.json");
    let config = RunConfig::default();
    let config = RunConfig {
        start_url: "http://127.0.0.1:1/".to_string(),
        domain: "127.0.0.1".to_string(),
        ..config
    }
    .with_delay(Duration::ZERO)
    .with_timeout(Duration::from_secs(2))
    .with_output(&output);

    let exit_code = handle_run(config).await;

    assert_eq!(exit_code, EXIT_OK);
    let saved = std::fs::read_to_string(&output).unwrap();
    assert_eq!(saved.trim(), "{}");
}

#[tokio::test]
async fn test_handle_run_unwritable_output_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = RunConfig {
        start_url: "http://127.0.0.1:1/".to_string(),
        domain: "127.0.0.1".to_string(),
        ..RunConfig::default()
    }
    .with_delay(Duration::ZERO)
    .with_timeout(Duration::from_secs(2))
    .with_output(dir.path().join("no-such-dir").join("out.json"));

    assert_eq!(handle_run(config).await, EXIT_ERROR);
}

#[tokio::test]
async fn test_handle_run_out_of_scope_start_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = RunConfig::default()
        .with_domain("elsewhere.example")
        .with_output(dir.path().join("out.json"));

    assert_eq!(handle_run(config).await, EXIT_ERROR);
}
