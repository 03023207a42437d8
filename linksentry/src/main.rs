use linksentry::commands::command_argument_builder;
use linksentry::handlers::{config_from_args, handle_run, init_logging, print_banner};
use linksentry_core::report::ReportFormat;

#[tokio::main]
async fn main() {
    let matches = command_argument_builder().get_matches();

    init_logging(matches.get_flag("verbose"));

    let config = match config_from_args(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {:#}", e);
            std::process::exit(2);
        }
    };

    // Keep stdout clean for JSON consumers
    if !matches.get_flag("quiet") && config.format == ReportFormat::Text {
        print_banner();
    }

    let exit_code = handle_run(config).await;
    std::process::exit(exit_code);
}
