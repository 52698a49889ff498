// vidframes-cli/src/lib.rs
//
// Library portion of the vidframes CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;

// Re-export items needed by the binary or integration tests
pub use cli::{BatchArgs, Cli, Commands, ConvertArgs, GlobalArgs, InfoArgs};
pub use commands::batch::run_batch;
pub use commands::convert::run_convert;
pub use commands::info::run_info;
pub use error::{CliErrorContext, CliResult};
