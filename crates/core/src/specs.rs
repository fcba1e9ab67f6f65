//! Serializable projection of the registry, as handed to adapters.

use indexmap::IndexMap;
use serde::Serialize;

use crate::descriptor::{CommandDescriptor, ParamDescriptor};
use crate::registry::Registry;
use crate::value::{RawValue, Value};

/// How permitted-value providers are treated when projecting specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    /// Call providers now and emit their current values.
    #[default]
    Eager,
    /// Emit a `deferred` marker; the adapter resolves the values when it needs them.
    Deferred,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ValidValuesSpec {
    Values(Vec<Value>),
    Deferred,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ArgSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_values: Option<ValidValuesSpec>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CommandSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub args: Vec<ArgSpec>,
    pub tags: Vec<String>,
    pub attributes: IndexMap<String, RawValue>,
}

impl CommandSpec {
    #[must_use]
    pub fn from_descriptor(descriptor: &CommandDescriptor, resolution: Resolution) -> Self {
        Self {
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            args: descriptor
                .parameters()
                .map(|parameter| arg_spec(descriptor, parameter, resolution))
                .collect(),
            tags: descriptor.tags.iter().cloned().collect(),
            attributes: descriptor.attributes.clone(),
        }
    }
}

fn arg_spec(
    descriptor: &CommandDescriptor,
    parameter: &ParamDescriptor,
    resolution: Resolution,
) -> ArgSpec {
    let valid_values = descriptor
        .permitted_values(&parameter.name)
        .map(|permitted| match resolution {
            Resolution::Deferred if permitted.is_deferred() => ValidValuesSpec::Deferred,
            _ => ValidValuesSpec::Values(permitted.resolve()),
        });

    ArgSpec {
        name: parameter.name.clone(),
        type_name: parameter.kind.name().to_string(),
        required: parameter.is_required(),
        default: parameter.default.clone(),
        help: parameter.description.clone(),
        valid_values,
    }
}

/// One spec per registered command, in registration order.
#[must_use]
pub fn list_command_specs(registry: &Registry, resolution: Resolution) -> Vec<CommandSpec> {
    registry
        .commands()
        .map(|descriptor| CommandSpec::from_descriptor(descriptor, resolution))
        .collect()
}
