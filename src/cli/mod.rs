//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the subcommand runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod record;
pub mod signals;

// Re-export commonly used types
pub use app::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, RecordOptions};
pub use presenter::{Presenter, TerminalNotifier};
pub use record::run_record;
