use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::Serialize;

use crate::command_definitions::{Arguments, CommandSource};
use crate::error::ExecutionError;
use crate::kinds::{align_literal, coerce, ParamKind};
use crate::registry::Registry;
use crate::value::{RawArguments, RawValue, Value};

/// Rows of maps sharing (a union of) keys.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// A command's return value, normalized into a presentable shape.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    /// The command returned nothing; a success with nothing to display.
    Nothing,
    Scalar(Value),
    Mapping(IndexMap<String, Value>),
    List(Vec<Value>),
    Table(Table),
}

impl Outcome {
    #[must_use]
    pub fn is_nothing(&self) -> bool {
        matches!(self, Outcome::Nothing)
    }
}

impl From<Value> for Outcome {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Outcome::Nothing,
            Value::Map(entries) => Outcome::Mapping(entries),
            Value::List(items) => {
                if !items.is_empty() && items.iter().all(|item| matches!(item, Value::Map(_))) {
                    Outcome::Table(tabulate(items))
                } else {
                    Outcome::List(items)
                }
            }
            scalar => Outcome::Scalar(scalar),
        }
    }
}

fn tabulate(rows: Vec<Value>) -> Table {
    let mut columns: Vec<String> = Vec::new();
    for row in &rows {
        if let Value::Map(entries) = row {
            for key in entries.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
    }

    let rows = rows
        .into_iter()
        .map(|row| match row {
            Value::Map(mut entries) => columns
                .iter()
                .map(|column| entries.shift_remove(column).unwrap_or(Value::Null))
                .collect(),
            other => vec![other],
        })
        .collect();

    Table { columns, rows }
}

/// Explicit nulls count as absent.
fn supplied<'a>(raw_arguments: &'a RawArguments, name: &str) -> Option<&'a RawValue> {
    raw_arguments.get(name).filter(|raw| !raw.is_null())
}

/// Validates `raw_arguments` against the command's descriptor and runs it.
///
/// Validation happens in stages, each stopping at the first failure: presence
/// of required arguments, coercion of every supplied argument, existence of
/// every path, then membership in permitted-value sets. Absent optional
/// arguments take their declared default without coercion. The command method
/// is only reached once every stage has passed.
///
/// # Errors
///
/// Returns an [`ExecutionError`] describing the first failed stage, or
/// [`ExecutionError::MethodFailed`] carrying the message of a failing method.
pub fn execute(
    registry: &Registry,
    sources: &[Box<dyn CommandSource>],
    command: &str,
    raw_arguments: &RawArguments,
) -> Result<Outcome, ExecutionError> {
    let descriptor = registry
        .get(command)
        .ok_or_else(|| ExecutionError::NotFound(command.to_string()))?;

    for parameter in &descriptor.required {
        if supplied(raw_arguments, &parameter.name).is_none() {
            return Err(ExecutionError::MissingArgument {
                command: command.to_string(),
                parameter: parameter.name.clone(),
            });
        }
    }

    for name in raw_arguments.keys() {
        if descriptor.parameter(name).is_none() {
            warn!("Ignoring unknown argument `{name}` for command `{command}`");
        }
    }

    let mut values: IndexMap<String, Value> = IndexMap::new();
    for parameter in descriptor.parameters() {
        let value = match supplied(raw_arguments, &parameter.name) {
            Some(raw) => coerce(raw, &parameter.kind).map_err(|source| {
                ExecutionError::InvalidType {
                    parameter: parameter.name.clone(),
                    source,
                }
            })?,
            None => parameter.default.clone().unwrap_or_default(),
        };
        values.insert(parameter.name.clone(), value);
    }

    for parameter in descriptor.parameters() {
        if parameter.kind != ParamKind::Path {
            continue;
        }
        if let Some(path) = values.get(&parameter.name).and_then(Value::as_path) {
            if !path.exists() {
                return Err(ExecutionError::PathNotFound {
                    parameter: parameter.name.clone(),
                    path: path.to_path_buf(),
                });
            }
        }
    }

    for parameter in descriptor.parameters() {
        let Some(permitted) = descriptor.permitted_values(&parameter.name) else {
            continue;
        };
        let allowed: Vec<Value> = permitted
            .resolve()
            .into_iter()
            .map(|literal| align_literal(&parameter.kind, literal))
            .collect();
        let value = values.get(&parameter.name).cloned().unwrap_or_default();
        if !allowed.contains(&value) {
            return Err(ExecutionError::InvalidValue {
                parameter: parameter.name.clone(),
                value,
                allowed,
            });
        }
    }

    let source = sources
        .iter()
        .find(|source| source.exposes(command))
        .ok_or_else(|| {
            warn!("No source exposes registered command `{command}`");
            ExecutionError::NotFound(command.to_string())
        })?;

    let arguments = Arguments::new(values);
    info!("Executing `{command}` on `{}` with {:?}", source.source_name(), arguments);

    let returned = source
        .invoke(command, &arguments)
        .map_err(|e| ExecutionError::MethodFailed {
            command: command.to_string(),
            message: e.to_string(),
        })?;

    debug!("Command `{command}` returned a {}", returned.type_name());
    Ok(Outcome::from(returned))
}
