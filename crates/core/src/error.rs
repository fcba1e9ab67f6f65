use std::path::PathBuf;

use thiserror::Error;

use crate::value::{join_values, Value};

pub type Result<T> = std::result::Result<T, Error>;

/// Startup-time failures: building the registry or loading settings.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parameter `{}` of command `{}` declares unsupported type `{}`", .parameter, .command, .type_name)]
    UnsupportedKind {
        command: String,
        parameter: String,
        type_name: String,
    },

    #[error("Required parameter `{}` of command `{}` is declared after an optional parameter", .parameter, .command)]
    RequiredAfterOptional { command: String, parameter: String },

    #[error("Found a non-unique command name in source `{}`: `{}`", .0, .1)]
    NonUniqueCommandName(String, String),

    #[error("Found a non-unique parameter name on command {}: `{}`", .0, .1)]
    NonUniqueParameterName(String, String),

    #[error("Valid values declared for parameter that is not present in command {}: `{}`", .0, .1)]
    UnknownPermittedParameter(String, String),

    #[error("Invalid name: name may not be empty")]
    EmptyName,

    #[error("Invalid name `{}`: name may not contain whitespace", .0)]
    NameWithWhitespace(String),

    #[error("Invalid name `{}`: name may not contain `=`", .0)]
    NameWithEquals(String),

    #[error("Invalid name `{}`: name cannot be purely numeric", .0)]
    NumericName(String),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("JSON error: {}", .0)]
    Json(#[from] serde_json::Error),

    #[error("Terminal error: {}", .0)]
    Terminal(#[from] std::io::Error),

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}

/// Why a raw value could not be turned into a parameter's declared kind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("`{}` is not a valid {}", .raw, .kind)]
    InvalidNumber { raw: String, kind: &'static str },

    #[error("expected a single value, got {}", .found)]
    NotScalar { found: &'static str },

    #[error("`{}` could not be converted to {}: {}", .raw, .kind, .message)]
    Rejected {
        kind: String,
        raw: String,
        message: String,
    },
}

/// Per-call failures reported by [`crate::execution::execute`].
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command not found: `{}`", .0)]
    NotFound(String),

    #[error("Missing required argument `{}` for command `{}`", .parameter, .command)]
    MissingArgument { command: String, parameter: String },

    #[error("Invalid value for argument `{}`: {}", .parameter, .source)]
    InvalidType {
        parameter: String,
        #[source]
        source: CoercionError,
    },

    #[error("Path {} does not exist (argument `{}`)", .path.display(), .parameter)]
    PathNotFound { parameter: String, path: PathBuf },

    #[error("Invalid value {} for argument `{}`. Valid values are: {}", .value, .parameter, join_values(.allowed))]
    InvalidValue {
        parameter: String,
        value: Value,
        allowed: Vec<Value>,
    },

    #[error("{}", .message)]
    MethodFailed { command: String, message: String },
}

/// Discriminant of an [`ExecutionError`], for adapters that map failures to statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionErrorKind {
    NotFound,
    MissingArgument,
    InvalidType,
    PathNotFound,
    InvalidValue,
    MethodFailed,
}

impl ExecutionError {
    #[must_use]
    pub fn kind(&self) -> ExecutionErrorKind {
        match self {
            Self::NotFound(_) => ExecutionErrorKind::NotFound,
            Self::MissingArgument { .. } => ExecutionErrorKind::MissingArgument,
            Self::InvalidType { .. } => ExecutionErrorKind::InvalidType,
            Self::PathNotFound { .. } => ExecutionErrorKind::PathNotFound,
            Self::InvalidValue { .. } => ExecutionErrorKind::InvalidValue,
            Self::MethodFailed { .. } => ExecutionErrorKind::MethodFailed,
        }
    }

    /// Name of the parameter the failure is about, if any.
    #[must_use]
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::MissingArgument { parameter, .. }
            | Self::InvalidType { parameter, .. }
            | Self::PathNotFound { parameter, .. }
            | Self::InvalidValue { parameter, .. } => Some(parameter),
            Self::NotFound(_) | Self::MethodFailed { .. } => None,
        }
    }
}

/// Returned by the typed accessors on [`crate::command_definitions::Arguments`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgumentError {
    #[error("Argument `{}` was not provided", .0)]
    Missing(String),

    #[error("Argument `{}` is not {}", .name, .expected)]
    WrongKind { name: String, expected: &'static str },
}
