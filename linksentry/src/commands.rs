use clap::arg;
use linksentry_core::config::DEFAULT_OUTPUT;
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("linksentry")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("linksentry")
        .about(
            "Crawl a site within its domain, check every link, image and media source, and \
            report what changed since the last run.",
        )
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and progress output").required(false))
        .arg(arg!(-v --"verbose" "Log every request to stderr").required(false))
        .arg(
            arg!(-u --"url" <URL>)
                .required(false)
                .help("The page to start crawling from (default: the built-in site)")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!(-d --"domain" <DOMAIN>)
                .required(false)
                .help("Only pages on exactly this host are crawled (default: host of --url)"),
        )
        .arg(
            arg!(--"delay" <MILLISECONDS>)
                .required(false)
                .help("Pause after every request")
                .value_parser(clap::value_parser!(u64))
                .default_value("500"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Results file, read as the previous run and overwritten with this one")
                .default_value(DEFAULT_OUTPUT),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Report format: text, json")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
}
