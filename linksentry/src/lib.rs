pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{config_from_args, handle_run, init_logging, print_banner};
