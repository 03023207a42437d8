use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use linksentry_core::config::RunConfig;
use linksentry_core::report::{ReportFormat, confirmation_line, render_report};
use linksentry_core::run::execute_run;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;
use url::Url;

pub const EXIT_OK: i32 = 0;
pub const EXIT_BROKEN_LINKS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

pub fn print_banner() {
    println!(
        "{}",
        r#"
  _ _       _                   _
 | (_)_ __ | | _____  ___ _ __ | |_ _ __ _   _
 | | | '_ \| |/ / __|/ _ \ '_ \| __| '__| | | |
 | | | | | |   <\__ \  __/ | | | |_| |  | |_| |
 |_|_|_| |_|_|\_\___/\___|_| |_|\__|_|   \__, |
                                         |___/
"#
        .bright_cyan()
    );
    println!("  {}\n", "every link, every run, every change".bright_white());
}

/// Logs go to stderr so the report on stdout stays readable
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Turn parsed arguments into a run configuration. Anything not given on the
/// command line keeps the built-in default.
pub fn config_from_args(matches: &ArgMatches) -> Result<RunConfig> {
    let mut config = match matches.get_one::<Url>("url") {
        Some(url) => RunConfig::for_start_url(url),
        None => RunConfig::default(),
    };

    if let Some(domain) = matches.get_one::<String>("domain") {
        config = config.with_domain(domain.as_str());
    }

    if config.domain.is_empty() {
        bail!(
            "Start URL {} has no host; pass --domain explicitly",
            config.start_url
        );
    }

    if let Some(delay) = matches.get_one::<u64>("delay") {
        config = config.with_delay(Duration::from_millis(*delay));
    }

    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        if *timeout == 0 {
            bail!("--timeout must be at least one second");
        }
        config = config.with_timeout(Duration::from_secs(*timeout));
    }

    if let Some(output) = matches.get_one::<String>("output") {
        config = config.with_output(expand_output_path(output));
    }

    if let Some(format) = matches.get_one::<String>("format") {
        let format = ReportFormat::from_str(format)
            .with_context(|| format!("Unknown report format '{}'", format))?;
        config = config.with_format(format);
    }

    Ok(config.with_progress(!matches.get_flag("quiet")))
}

pub fn expand_output_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Run the whole pipeline, print the report, persist the results.
/// Returns the process exit code.
pub async fn handle_run(config: RunConfig) -> i32 {
    let text = config.format == ReportFormat::Text;

    if text {
        println!("[*] Crawling {} (domain: {})", config.start_url, config.domain);
    }

    let outcome = match execute_run(&config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{} Run failed: {}", "✗".red().bold(), e);
            return EXIT_ERROR;
        }
    };

    match render_report(&outcome, config.format) {
        Ok(report) => println!("{}", report),
        Err(e) => {
            eprintln!("{} Could not render report: {}", "✗".red().bold(), e);
            return EXIT_ERROR;
        }
    }

    if let Err(e) = outcome.save() {
        eprintln!("{} {}", "✗".red().bold(), e);
        return EXIT_ERROR;
    }

    let confirmation = confirmation_line(&outcome.output);
    if text {
        println!("{}", confirmation);
    } else {
        eprintln!("{}", confirmation);
    }

    if outcome.diff.has_broken() {
        EXIT_BROKEN_LINKS
    } else {
        EXIT_OK
    }
}
