//! Validated, front-end agnostic description of registered commands.

use std::fmt::{Display, Formatter};

use indexmap::{IndexMap, IndexSet};

use crate::command_definitions::PermittedValues;
use crate::kinds::ParamKind;
use crate::value::{RawValue, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ParamDescriptor {
    pub name: String,
    pub kind: ParamKind,
    /// Present only for optional parameters.
    pub default: Option<Value>,
    pub description: Option<String>,
}

impl ParamDescriptor {
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

impl Display for ParamDescriptor {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "`{}`", self.name)?;

        if let Some(description) = &self.description {
            write!(formatter, " ({description})")?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub required: Vec<ParamDescriptor>,
    pub optional: Vec<ParamDescriptor>,
    pub tags: IndexSet<String>,
    pub attributes: IndexMap<String, RawValue>,
    pub permitted: IndexMap<String, PermittedValues>,
}

impl CommandDescriptor {
    /// Required parameters first, then optional ones, each in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = &ParamDescriptor> {
        self.required.iter().chain(self.optional.iter())
    }

    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParamDescriptor> {
        self.parameters().find(|p| p.name == name)
    }

    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.required.len() + self.optional.len()
    }

    #[must_use]
    pub fn permitted_values(&self, parameter: &str) -> Option<&PermittedValues> {
        self.permitted.get(parameter)
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&RawValue> {
        self.attributes.get(key)
    }
}

impl Display for CommandDescriptor {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) => write!(formatter, "{} ({})", self.name, description),
            None => formatter.write_str(&self.name),
        }
    }
}
