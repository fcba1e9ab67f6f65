//! Settings for the front-ends and resolution of the settings file path.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default path for the settings file
const DEFAULT_CONFIG_PATH: &str = "~/.rust-verbs/config.yml";

/// Prompt shown by the REPL unless configured otherwise
pub const DEFAULT_PROMPT: &str = "> ";

/// Serialization used when printing the command listing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    #[default]
    Yaml,
    Json,
}

impl FromStr for ListFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(ListFormat::Yaml),
            "json" => Ok(ListFormat::Json),
            _ => Err(Error::Misc(format!("Unknown list format `{s}`"))),
        }
    }
}

impl Display for ListFormat {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ListFormat::Yaml => formatter.write_str("yaml"),
            ListFormat::Json => formatter.write_str("json"),
        }
    }
}

/// Contents of the settings file. Every key is optional.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub prompt: String,
    pub list_format: ListFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            list_format: ListFormat::default(),
        }
    }
}

/// Resolves the settings file path.
///
/// Uses the custom path if one is given, otherwise the default path.
/// Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use rust_verbs_core::config::get_config_path;
///
/// let default_path = get_config_path(&None);
/// assert!(default_path.ends_with(".rust-verbs/config.yml"));
///
/// let custom_path = get_config_path(&Some("/path/to/config.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/config.yml");
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}
