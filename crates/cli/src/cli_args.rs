//! Global command-line options.
//!
//! Registered commands are not declared here; they are attached at runtime as
//! subcommands by [`crate::arguments::build_cli`].

use clap::Parser;
use rust_verbs_core::config::ListFormat;

/// Command-line arguments for the `rv` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use rust_verbs_cli::cli_args::Args;
///
/// let args = Args::parse_from(["rv", "--list-commands", "--format", "json"]);
/// assert!(args.list_commands);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(name = "rv", about = "Run registered commands from the shell or a REPL")]
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the settings file YAML.
    ///
    /// If not provided, defaults to `~/.rust-verbs/config.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Start an interactive session with tab completion.
    #[arg(long, short = 'r', action)]
    pub repl: bool,

    /// Print every registered command with its arguments, then exit.
    #[arg(long, short = 'l', action)]
    pub list_commands: bool,

    /// Output format for `--list-commands`; overrides the settings file.
    #[arg(long, short = 'f')]
    pub format: Option<ListFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["rv"]);

        assert!(args.config_path.is_none());
        assert!(!args.repl);
        assert!(!args.list_commands);
        assert!(args.format.is_none());
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_from(["rv", "-c", "/custom/config.yml", "-r", "-l", "-f", "json"]);

        assert_eq!(args.config_path, Some("/custom/config.yml".to_string()));
        assert!(args.repl);
        assert!(args.list_commands);
        assert_eq!(args.format, Some(ListFormat::Json));
    }

    #[test]
    fn test_args_long_flags() {
        let args = Args::parse_from([
            "rv",
            "--config-path",
            "/custom/config.yml",
            "--repl",
            "--list-commands",
            "--format",
            "yaml",
        ]);

        assert_eq!(args.config_path, Some("/custom/config.yml".to_string()));
        assert!(args.repl);
        assert!(args.list_commands);
        assert_eq!(args.format, Some(ListFormat::Yaml));
    }

    #[test]
    fn test_args_unknown_format_rejected() {
        assert!(Args::try_parse_from(["rv", "--format", "toml"]).is_err());
    }
}
