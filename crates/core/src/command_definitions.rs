use std::fmt::{Debug, Display, Formatter};
use std::path::Path;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::error::ArgumentError;
use crate::value::{RawValue, Value};

/// Error type a command method may fail with; only its message is kept.
pub type CommandFailure = Box<dyn std::error::Error + Send + Sync>;

pub type CommandResult = std::result::Result<Value, CommandFailure>;

/// `VALID_VALUES` table of a source: command name, then parameter name.
pub type ValidValuesTable = IndexMap<String, IndexMap<String, PermittedValues>>;

#[derive(Debug, Clone)]
pub struct ParameterDeclaration {
    pub name: String,
    pub type_name: String,
    pub default: Option<Value>,
    pub description: Option<String>,
}

impl Display for ParameterDeclaration {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "`{}`: {}", self.name, self.type_name)?;

        if let Some(default) = &self.default {
            write!(formatter, " = {default}")?;
        }

        Ok(())
    }
}

/// What a command source says about one of its commands.
///
/// Parameters are kept in declaration order; the registry checks that every
/// parameter without a default precedes those with one.
///
/// ```
/// use rust_verbs_core::command_definitions::CommandDeclaration;
///
/// let sum = CommandDeclaration::new("sum")
///     .about("Add up to three integers")
///     .required("a", "int")
///     .required("b", "int")
///     .optional("c", "int", 0)
///     .help("Optional third addend");
///
/// assert_eq!(sum.parameters.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct CommandDeclaration {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Vec<ParameterDeclaration>,
}

impl CommandDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn required(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(ParameterDeclaration {
            name: name.into(),
            type_name: type_name.into(),
            default: None,
            description: None,
        });
        self
    }

    #[must_use]
    pub fn optional(
        mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        default: impl Into<Value>,
    ) -> Self {
        self.parameters.push(ParameterDeclaration {
            name: name.into(),
            type_name: type_name.into(),
            default: Some(default.into()),
            description: None,
        });
        self
    }

    /// Describes the most recently declared parameter.
    #[must_use]
    pub fn help(mut self, description: impl Into<String>) -> Self {
        if let Some(parameter) = self.parameters.last_mut() {
            parameter.description = Some(description.into());
        }
        self
    }
}

impl Display for CommandDeclaration {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) => write!(formatter, "{} ({})", self.name, description),
            None => formatter.write_str(&self.name),
        }
    }
}

/// Tags and attributes attached to a command, read by adapters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandMetadata {
    pub tags: IndexSet<String>,
    pub attributes: IndexMap<String, RawValue>,
}

impl CommandMetadata {
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Values a parameter is restricted to: a fixed set, or one computed on demand.
#[derive(Clone)]
pub enum PermittedValues {
    Fixed(Vec<Value>),
    Provider(Arc<dyn Fn() -> Vec<Value> + Send + Sync>),
}

impl PermittedValues {
    pub fn fixed<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Fixed(values.into_iter().map(Into::into).collect())
    }

    pub fn provider<F>(provider: F) -> Self
    where
        F: Fn() -> Vec<Value> + Send + Sync + 'static,
    {
        Self::Provider(Arc::new(provider))
    }

    /// Current set of values; providers are invoked on every call.
    #[must_use]
    pub fn resolve(&self) -> Vec<Value> {
        match self {
            Self::Fixed(values) => values.clone(),
            Self::Provider(provider) => provider(),
        }
    }

    #[must_use]
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Provider(_))
    }
}

impl Debug for PermittedValues {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(values) => formatter.debug_tuple("Fixed").field(values).finish(),
            Self::Provider(_) => formatter.write_str("Provider(..)"),
        }
    }
}

/// An object whose methods are exposed as commands.
///
/// Sources declare their commands up front; the registry validates and
/// indexes those declarations once, then the execution engine calls
/// [`CommandSource::invoke`] with fully coerced and validated arguments.
pub trait CommandSource: Send + Sync {
    /// Label used in logs and registration errors.
    fn source_name(&self) -> &str;

    fn commands(&self) -> Vec<CommandDeclaration>;

    fn valid_values(&self) -> ValidValuesTable {
        ValidValuesTable::new()
    }

    fn metadata(&self) -> IndexMap<String, CommandMetadata> {
        IndexMap::new()
    }

    fn exposes(&self, command: &str) -> bool {
        self.commands().iter().any(|c| c.name == command)
    }

    /// Runs `command`. Only called for commands this source exposes.
    ///
    /// # Errors
    ///
    /// Any failure of the command itself; the engine reports its message.
    fn invoke(&self, command: &str, arguments: &Arguments) -> CommandResult;
}

/// Coerced and validated arguments handed to [`CommandSource::invoke`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: IndexMap<String, Value>,
}

impl Arguments {
    #[must_use]
    pub fn new(values: IndexMap<String, Value>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn require(&self, name: &str) -> std::result::Result<&Value, ArgumentError> {
        self.values
            .get(name)
            .ok_or_else(|| ArgumentError::Missing(name.to_string()))
    }

    fn wrong_kind(name: &str, expected: &'static str) -> ArgumentError {
        ArgumentError::WrongKind {
            name: name.to_string(),
            expected,
        }
    }

    /// # Errors
    ///
    /// Fails if the argument is absent or not a string.
    pub fn string(&self, name: &str) -> std::result::Result<&str, ArgumentError> {
        self.require(name)?
            .as_str()
            .ok_or_else(|| Self::wrong_kind(name, "a string"))
    }

    /// # Errors
    ///
    /// Fails if the argument is absent or not an integer.
    pub fn integer(&self, name: &str) -> std::result::Result<i64, ArgumentError> {
        self.require(name)?
            .as_i64()
            .ok_or_else(|| Self::wrong_kind(name, "an integer"))
    }

    /// # Errors
    ///
    /// Fails if the argument is absent or not numeric.
    pub fn float(&self, name: &str) -> std::result::Result<f64, ArgumentError> {
        self.require(name)?
            .as_f64()
            .ok_or_else(|| Self::wrong_kind(name, "a number"))
    }

    /// # Errors
    ///
    /// Fails if the argument is absent or not a boolean.
    pub fn boolean(&self, name: &str) -> std::result::Result<bool, ArgumentError> {
        self.require(name)?
            .as_bool()
            .ok_or_else(|| Self::wrong_kind(name, "a boolean"))
    }

    /// # Errors
    ///
    /// Fails if the argument is absent or not a path.
    pub fn path(&self, name: &str) -> std::result::Result<&Path, ArgumentError> {
        self.require(name)?
            .as_path()
            .ok_or_else(|| Self::wrong_kind(name, "a path"))
    }
}
