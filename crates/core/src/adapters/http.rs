use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::warn;

use crate::descriptor::CommandDescriptor;
use crate::error::{Error, ExecutionError, Result};
use crate::registry::Registry;
use crate::value::{RawArguments, RawValue};

/// Commands carrying this tag get no route.
pub const NO_HTTP_TAG: &str = "no_http";
/// Attribute overriding the verb a command is served under.
pub const HTTP_METHOD_ATTRIBUTE: &str = "http_method";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Whether arguments arrive in the query string rather than a body.
    #[must_use]
    pub fn reads_query(self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(Error::Misc(format!("Unsupported HTTP method `{s}`"))),
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        };
        formatter.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub command: String,
    pub method: HttpMethod,
    pub path: String,
}

/// One route per command, in registry order, skipping commands tagged [`NO_HTTP_TAG`].
#[must_use]
pub fn plan_routes(registry: &Registry) -> Vec<Route> {
    registry
        .commands()
        .filter(|descriptor| !descriptor.has_tag(NO_HTTP_TAG))
        .map(|descriptor| Route {
            command: descriptor.name.clone(),
            method: route_method(descriptor),
            path: format!("/{}", descriptor.name),
        })
        .collect()
}

fn route_method(descriptor: &CommandDescriptor) -> HttpMethod {
    let default = if descriptor.parameter_count() == 0 {
        HttpMethod::Get
    } else {
        HttpMethod::Post
    };

    let Some(declared) = descriptor.attribute(HTTP_METHOD_ATTRIBUTE) else {
        return default;
    };

    match declared.as_str().map(str::parse::<HttpMethod>) {
        Some(Ok(method)) => method,
        _ => {
            warn!(
                "Ignoring `{HTTP_METHOD_ATTRIBUTE}` of `{}`: {declared} is not a verb, using {default}",
                descriptor.name
            );
            default
        }
    }
}

/// 404 when the command does not exist, 400 for every other failure.
#[must_use]
pub fn status_code(error: &ExecutionError) -> u16 {
    match error {
        ExecutionError::NotFound(_) => 404,
        _ => 400,
    }
}

/// Query parameters become string arguments; a repeated key keeps its last value.
pub fn raw_arguments_from_query<I, K, V>(pairs: I) -> RawArguments
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), RawValue::String(value.into())))
        .collect()
}

/// Reads a JSON request body. An empty body or `null` means no arguments.
///
/// # Errors
///
/// Returns an error if the body is not valid JSON, or is JSON but not an object.
pub fn raw_arguments_from_body(body: &str) -> Result<RawArguments> {
    if body.trim().is_empty() {
        return Ok(RawArguments::new());
    }

    match serde_json::from_str::<RawValue>(body)? {
        RawValue::Null => Ok(RawArguments::new()),
        RawValue::Object(entries) => Ok(entries.into_iter().collect()),
        other => Err(Error::Misc(format!(
            "Request body must be a JSON object, found {other}"
        ))),
    }
}
