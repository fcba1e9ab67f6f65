//! Reading and writing the settings file.

use std::fs::File;
use std::path::Path;

use log::debug;

use crate::config::Settings;
use crate::error::{Error, Result};

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path).map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

/// Loads the settings file, falling back to defaults when it does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - The file exists but cannot be read
/// - The file contains invalid YAML
/// - A key holds a value of the wrong shape (e.g. an unknown `list_format`)
///
/// # Examples
///
/// ```no_run
/// use rust_verbs_core::file_handling::get_settings;
///
/// let settings = get_settings("/home/me/.rust-verbs/config.yml")?;
/// println!("Prompt: {:?}", settings.prompt);
/// # Ok::<(), rust_verbs_core::error::Error>(())
/// ```
pub fn get_settings(config_path: &str) -> Result<Settings> {
    if !Path::new(config_path).exists() {
        debug!("No settings file at `{config_path}`, using defaults");
        return Ok(Settings::default());
    }

    let reader = get_reader("settings", config_path)?;

    // An empty file parses as null.
    let parsed: serde_yaml::Result<Option<Settings>> = serde_yaml::from_reader(reader);

    match parsed {
        Ok(settings) => Ok(settings.unwrap_or_default()),
        Err(e) => Err(Error::yaml_error(
            "reading".to_string(),
            "settings".to_string(),
            config_path.to_string(),
            e,
        )),
    }
}

/// Writes `settings` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or serialization fails.
pub fn write_settings(path: &str, settings: &Settings) -> Result<()> {
    let f = File::create(path)
        .map_err(|e| Error::io_error("settings".to_string(), path.to_string(), e))?;

    serde_yaml::to_writer(f, settings).map_err(|e| {
        Error::yaml_error(
            "writing".to_string(),
            "settings".to_string(),
            path.to_string(),
            e,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListFormat;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_get_settings_file_not_exists() {
        let settings = get_settings("/this/path/does/not/exist.yml").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_get_settings_partial_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "list_format: json").unwrap();
        let temp_path = temp_file.path().to_str().unwrap();

        let settings = get_settings(temp_path).unwrap();
        assert_eq!(settings.list_format, ListFormat::Json);
        assert_eq!(settings.prompt, "> ");
    }

    #[test]
    fn test_get_settings_empty_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().to_str().unwrap();

        assert_eq!(get_settings(temp_path).unwrap(), Settings::default());
    }

    #[test]
    fn test_get_settings_invalid_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "invalid: yaml: content: [").unwrap();
        let temp_path = temp_file.path().to_str().unwrap();

        assert!(matches!(get_settings(temp_path), Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_get_settings_unknown_format() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "list_format: toml").unwrap();
        let temp_path = temp_file.path().to_str().unwrap();

        let error = get_settings(temp_path).unwrap_err();
        assert!(error.to_string().contains("settings"));
    }

    #[test]
    fn test_write_and_read_settings() {
        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().to_str().unwrap();

        let settings = Settings {
            prompt: "verbs> ".to_string(),
            list_format: ListFormat::Json,
        };

        write_settings(temp_path, &settings).unwrap();
        assert_eq!(get_settings(temp_path).unwrap(), settings);
    }

    #[test]
    fn test_write_settings_to_missing_directory() {
        let result = write_settings("/this/path/does/not/exist.yml", &Settings::default());
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
