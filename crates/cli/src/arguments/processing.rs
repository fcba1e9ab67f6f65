use clap::ArgMatches;
use log::debug;
use rust_verbs_core::descriptor::CommandDescriptor;
use rust_verbs_core::kinds::ParamKind;
use rust_verbs_core::registry::Registry;
use rust_verbs_core::value::{RawArguments, RawValue};

/// Which command, if any, the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// No subcommand was given.
    None,
    /// A registered command, with the values of the flags that were passed.
    Command { name: String, arguments: RawArguments },
    /// A subcommand name the registry does not know.
    Unknown(String),
}

/// Reads the subcommand out of `matches` produced by [`super::build_cli`].
#[must_use]
pub fn selected_command(registry: &Registry, matches: &ArgMatches) -> Selection {
    let Some((name, sub_matches)) = matches.subcommand() else {
        return Selection::None;
    };

    match registry.get(name) {
        Some(descriptor) => Selection::Command {
            name: name.to_string(),
            arguments: raw_arguments(descriptor, sub_matches),
        },
        None => Selection::Unknown(name.to_string()),
    }
}

/// Flags that were not passed are left out so the engine applies defaults.
fn raw_arguments(descriptor: &CommandDescriptor, matches: &ArgMatches) -> RawArguments {
    let mut arguments = RawArguments::new();

    for parameter in descriptor.parameters() {
        let name = parameter.name.as_str();

        if !parameter.is_required() && parameter.kind == ParamKind::Boolean {
            if matches.get_flag(name) {
                arguments.insert(name.to_string(), RawValue::Bool(true));
            }
            continue;
        }

        if let Some(value) = matches.get_one::<String>(name) {
            arguments.insert(name.to_string(), RawValue::String(value.clone()));
        }
    }

    debug!("Arguments for `{}` from the command line: {:?}", descriptor.name, arguments);
    arguments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::build_cli;
    use crate::sample_commands::sample_sources;
    use rust_verbs_core::registry;

    fn select(argv: &[&str]) -> Selection {
        let registry = registry::build(&sample_sources()).unwrap();
        let matches = build_cli(&registry).try_get_matches_from(argv).unwrap();
        selected_command(&registry, &matches)
    }

    fn command(name: &str, pairs: &[(&str, RawValue)]) -> Selection {
        Selection::Command {
            name: name.to_string(),
            arguments: pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn test_no_subcommand() {
        assert_eq!(select(&["rv"]), Selection::None);
        assert_eq!(select(&["rv", "--repl"]), Selection::None);
    }

    #[test]
    fn test_required_and_defaulted_arguments() {
        assert_eq!(
            select(&["rv", "sum", "--a", "2", "--b", "3"]),
            command(
                "sum",
                &[
                    ("a", RawValue::String("2".to_string())),
                    ("b", RawValue::String("3".to_string()))
                ]
            )
        );

        assert_eq!(
            select(&["rv", "sum", "--a", "2", "--b", "3", "--c", "4"]),
            command(
                "sum",
                &[
                    ("a", RawValue::String("2".to_string())),
                    ("b", RawValue::String("3".to_string())),
                    ("c", RawValue::String("4".to_string()))
                ]
            )
        );
    }

    #[test]
    fn test_boolean_flag_with_hyphenated_name() {
        assert_eq!(
            select(&["rv", "test_path", "--path", "/tmp", "--full-path"]),
            command(
                "test_path",
                &[
                    ("path", RawValue::String("/tmp".to_string())),
                    ("full_path", RawValue::Bool(true))
                ]
            )
        );

        assert_eq!(
            select(&["rv", "test_path", "--path", "/tmp"]),
            command("test_path", &[("path", RawValue::String("/tmp".to_string()))])
        );
    }

    #[test]
    fn test_missing_required_flag_is_a_clap_error() {
        let registry = registry::build(&sample_sources()).unwrap();
        let result = build_cli(&registry).try_get_matches_from(["rv", "sum", "--a", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_subcommand() {
        assert_eq!(
            select(&["rv", "test_pth", "--path", "/tmp"]),
            Selection::Unknown("test_pth".to_string())
        );
    }
}
