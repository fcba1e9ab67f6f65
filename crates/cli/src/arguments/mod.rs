//! Registered commands as clap subcommands.
//!
//! - [`builder`] turns each command descriptor into a subcommand with one
//!   `--flag` per parameter
//! - [`processing`] reads the matched flags back into raw arguments for the
//!   execution engine

pub mod builder;
pub mod processing;

pub use builder::{build_cli, flag_name};
pub use processing::{selected_command, Selection};
