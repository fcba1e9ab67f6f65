//! Builds the command registry from an ordered list of command sources.
//!
//! Every declaration is validated up front (names, parameter ordering,
//! declared types, valid-value tables) so that a bad declaration stops the
//! process at startup instead of failing on some later call. When two
//! sources declare the same command name, the source registered first wins.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::command_definitions::{
    CommandDeclaration, CommandMetadata, CommandSource, PermittedValues,
};
use crate::descriptor::{CommandDescriptor, ParamDescriptor};
use crate::error::Error::{
    EmptyName, NameWithEquals, NameWithWhitespace, NonUniqueCommandName, NonUniqueParameterName,
    NumericName, RequiredAfterOptional, UnknownPermittedParameter, UnsupportedKind,
};
use crate::error::Result;
use crate::kinds::{align_literal, CustomKind, KindTable};
use crate::value::Value;

/// Prefix marking a declared command as internal; such commands are not registered.
pub const INTERNAL_PREFIX: char = '_';

/// Immutable set of command descriptors, in registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    commands: IndexMap<String, CommandDescriptor>,
}

impl Registry {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn commands(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    kinds: KindTable,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes a custom parameter type available to declarations.
    #[must_use]
    pub fn with_kind<F>(mut self, name: impl Into<String>, convert: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        self.kinds.register(CustomKind::new(name, convert));
        self
    }

    /// Validates every declaration of every source and indexes the result.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A command or parameter name is empty, numeric, or contains whitespace or `=`
    /// - A source declares the same command twice, or a command repeats a parameter
    /// - A required parameter follows an optional one
    /// - A parameter's declared type is not a supported kind
    /// - A valid-values entry names a parameter the command does not declare
    pub fn build(&self, sources: &[Box<dyn CommandSource>]) -> Result<Registry> {
        let mut commands: IndexMap<String, CommandDescriptor> = IndexMap::new();

        for source in sources {
            let source_name = source.source_name();
            let mut valid_values = source.valid_values();
            let mut metadata = source.metadata();
            let mut seen = HashSet::new();

            for declaration in source.commands() {
                if !seen.insert(declaration.name.clone()) {
                    return Err(NonUniqueCommandName(
                        source_name.to_string(),
                        declaration.name.clone(),
                    ));
                }

                if declaration.name.starts_with(INTERNAL_PREFIX) {
                    debug!("Skipping internal command `{}` of `{source_name}`", declaration.name);
                    valid_values.shift_remove(&declaration.name);
                    metadata.shift_remove(&declaration.name);
                    continue;
                }

                let permitted = valid_values.shift_remove(&declaration.name).unwrap_or_default();
                let command_metadata = metadata.shift_remove(&declaration.name).unwrap_or_default();
                let descriptor = self.describe(&declaration, permitted, command_metadata)?;

                if commands.contains_key(&descriptor.name) {
                    debug!(
                        "Command `{}` of `{source_name}` is shadowed by an earlier registration",
                        descriptor.name
                    );
                    continue;
                }

                debug!("Registered command `{}` from `{source_name}`", descriptor.name);
                commands.insert(descriptor.name.clone(), descriptor);
            }

            for command in valid_values.keys() {
                warn!("Valid values of `{source_name}` reference unknown command `{command}`");
            }
            for command in metadata.keys() {
                warn!("Metadata of `{source_name}` references unknown command `{command}`");
            }
        }

        Ok(Registry { commands })
    }

    fn describe(
        &self,
        declaration: &CommandDeclaration,
        permitted: IndexMap<String, PermittedValues>,
        metadata: CommandMetadata,
    ) -> Result<CommandDescriptor> {
        validate_name(&declaration.name)?;

        let mut required = Vec::new();
        let mut optional: Vec<ParamDescriptor> = Vec::new();
        let mut names = HashSet::new();

        for parameter in &declaration.parameters {
            validate_name(&parameter.name)?;

            if !names.insert(parameter.name.as_str()) {
                return Err(NonUniqueParameterName(
                    declaration.name.clone(),
                    parameter.name.clone(),
                ));
            }

            let kind = self
                .kinds
                .resolve(&parameter.type_name)
                .ok_or_else(|| UnsupportedKind {
                    command: declaration.name.clone(),
                    parameter: parameter.name.clone(),
                    type_name: parameter.type_name.clone(),
                })?;

            let descriptor = ParamDescriptor {
                name: parameter.name.clone(),
                default: parameter.default.clone().map(|d| align_literal(&kind, d)),
                kind,
                description: parameter.description.clone(),
            };

            if descriptor.is_required() {
                if !optional.is_empty() {
                    return Err(RequiredAfterOptional {
                        command: declaration.name.clone(),
                        parameter: parameter.name.clone(),
                    });
                }
                required.push(descriptor);
            } else {
                optional.push(descriptor);
            }
        }

        for parameter in permitted.keys() {
            if !names.contains(parameter.as_str()) {
                return Err(UnknownPermittedParameter(
                    declaration.name.clone(),
                    parameter.clone(),
                ));
            }
        }

        Ok(CommandDescriptor {
            name: declaration.name.clone(),
            description: declaration.description.clone(),
            required,
            optional,
            tags: metadata.tags,
            attributes: metadata.attributes,
            permitted,
        })
    }
}

/// Builds a registry using only the built-in parameter kinds.
///
/// # Errors
///
/// See [`RegistryBuilder::build`].
pub fn build(sources: &[Box<dyn CommandSource>]) -> Result<Registry> {
    RegistryBuilder::new().build(sources)
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(EmptyName);
    }

    if name.chars().any(char::is_whitespace) {
        return Err(NameWithWhitespace(name.to_string()));
    }

    if name.contains('=') {
        return Err(NameWithEquals(name.to_string()));
    }

    if name.chars().all(|c| c.is_numeric()) {
        return Err(NumericName(name.to_string()));
    }

    Ok(())
}
