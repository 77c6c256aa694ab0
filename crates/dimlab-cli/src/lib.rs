//! dimlab CLI library.
//!
//! This library provides the core functionality for the dimlab command-line
//! interface: configuration management, the interactive labeling sessions,
//! command execution, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod session;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use session::{HypothesisSession, TopicSession};
