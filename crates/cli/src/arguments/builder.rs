use clap::{Arg, ArgAction, Command, CommandFactory};
use itertools::Itertools;
use rust_verbs_core::command_definitions::PermittedValues;
use rust_verbs_core::descriptor::{CommandDescriptor, ParamDescriptor};
use rust_verbs_core::kinds::ParamKind;
use rust_verbs_core::registry::Registry;
use rust_verbs_core::value::join_values;

use crate::cli_args::Args;

/// clap wants `'static` names for commands and arguments built at runtime.
/// The registry lives for the whole process, so leaking its names is bounded.
fn leak(name: String) -> &'static str {
    Box::leak(name.into_boxed_str())
}

/// Long flag for a parameter: underscores become hyphens.
#[must_use]
pub fn flag_name(parameter: &str) -> String {
    parameter.replace('_', "-")
}

/// The full `rv` command: global options from [`Args`] plus one subcommand
/// per registered command, in registry order.
///
/// Unknown subcommand names are let through so the caller can report them
/// with a suggestion instead of clap's generic usage error.
///
/// A command named `help` replaces clap's `help` subcommand, and a parameter
/// named `help` takes over `--help`, leaving `-h` to print help.
#[must_use]
pub fn build_cli(registry: &Registry) -> Command {
    Args::command()
        .allow_external_subcommands(true)
        .disable_help_subcommand(registry.contains(HELP))
        .subcommands(registry.commands().map(build_subcommand))
}

const HELP: &str = "help";

/// Id of the replacement help switch; whitespace keeps it clear of parameter names.
const SHORT_HELP_ID: &str = "short help";

fn build_subcommand(descriptor: &CommandDescriptor) -> Command {
    let mut subcommand = Command::new(leak(descriptor.name.clone()));

    if let Some(description) = &descriptor.description {
        subcommand = subcommand.about(description.clone());
    }

    for parameter in descriptor.parameters() {
        subcommand = subcommand.arg(build_arg(
            parameter,
            descriptor.permitted_values(&parameter.name),
        ));
    }

    if descriptor.parameters().any(|p| flag_name(&p.name) == HELP) {
        subcommand = subcommand.disable_help_flag(true).arg(
            Arg::new(SHORT_HELP_ID)
                .short('h')
                .action(ArgAction::Help)
                .help("Print help"),
        );
    }

    subcommand
}

fn build_arg(parameter: &ParamDescriptor, permitted: Option<&PermittedValues>) -> Arg {
    let arg = Arg::new(leak(parameter.name.clone()))
        .long(leak(flag_name(&parameter.name)))
        .help(arg_help(parameter, permitted));

    match &parameter.default {
        None => arg
            .required(true)
            .action(ArgAction::Set)
            .value_name(leak(parameter.kind.name().to_uppercase())),
        Some(_) if parameter.kind == ParamKind::Boolean => arg.action(ArgAction::SetTrue),
        Some(_) => arg
            .action(ArgAction::Set)
            .value_name(leak(parameter.kind.name().to_uppercase())),
    }
}

fn arg_help(parameter: &ParamDescriptor, permitted: Option<&PermittedValues>) -> String {
    let mut parts = Vec::new();

    if let Some(description) = &parameter.description {
        parts.push(description.clone());
    }

    // Providers are left unresolved until a value is actually checked.
    if let Some(PermittedValues::Fixed(values)) = permitted {
        parts.push(format!("[possible values: {}]", join_values(values)));
    }

    if let Some(default) = &parameter.default {
        if parameter.kind != ParamKind::Boolean {
            parts.push(format!("[default: {default}]"));
        }
    }

    parts.into_iter().join(" ")
}
