//! Parameter kinds and coercion of raw input into typed values.
//!
//! Coercion never consults permitted-value sets and never touches the
//! filesystem: a `path` is only wrapped here, existence is checked by the
//! execution engine.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::CoercionError;
use crate::value::{RawValue, Value};

/// Conversion applied by a [`CustomKind`] to the textual form of a raw value.
pub type Converter = Arc<dyn Fn(&str) -> std::result::Result<Value, String> + Send + Sync>;

/// A named scalar kind outside the built-in set, e.g. a UUID or a date.
#[derive(Clone)]
pub struct CustomKind {
    name: String,
    convert: Converter,
}

impl CustomKind {
    pub fn new<F>(name: impl Into<String>, convert: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            convert: Arc::new(convert),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Debug for CustomKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CustomKind")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum ParamKind {
    String,
    Integer,
    Float,
    Boolean,
    Path,
    Other(CustomKind),
}

impl ParamKind {
    /// Canonical type name, as shown in command specs.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ParamKind::String => "str",
            ParamKind::Integer => "int",
            ParamKind::Float => "float",
            ParamKind::Boolean => "bool",
            ParamKind::Path => "path",
            ParamKind::Other(custom) => custom.name(),
        }
    }
}

impl PartialEq for ParamKind {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

/// Resolves declared type names to kinds.
///
/// Built-in names are always available; custom kinds must be registered
/// before the registry is built, otherwise the declaration is rejected.
#[derive(Debug, Clone, Default)]
pub struct KindTable {
    custom: HashMap<String, CustomKind>,
}

impl KindTable {
    pub fn register(&mut self, kind: CustomKind) {
        self.custom.insert(kind.name().to_string(), kind);
    }

    #[must_use]
    pub fn resolve(&self, type_name: &str) -> Option<ParamKind> {
        let builtin = match type_name {
            "str" | "string" => Some(ParamKind::String),
            "int" | "integer" => Some(ParamKind::Integer),
            "float" => Some(ParamKind::Float),
            "bool" | "boolean" => Some(ParamKind::Boolean),
            "path" | "Path" => Some(ParamKind::Path),
            _ => None,
        };

        builtin.or_else(|| self.custom.get(type_name).cloned().map(ParamKind::Other))
    }
}

/// Strips one layer of matching single or double quotes.
///
/// Only the outermost layer goes, so coercing the result again removes the
/// next one: `""x""` becomes `"x"` and then `x`.
#[must_use]
pub fn strip_matching_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Textual form of a scalar raw value; `None` for null, arrays and objects.
#[must_use]
pub fn raw_text(raw: &RawValue) -> Option<String> {
    match raw {
        RawValue::String(s) => Some(s.clone()),
        RawValue::Number(n) => Some(n.to_string()),
        RawValue::Bool(b) => Some(b.to_string()),
        RawValue::Null | RawValue::Array(_) | RawValue::Object(_) => None,
    }
}

fn raw_type_name(raw: &RawValue) -> &'static str {
    match raw {
        RawValue::Null => "null",
        RawValue::Bool(_) => "a boolean",
        RawValue::Number(_) => "a number",
        RawValue::String(_) => "a string",
        RawValue::Array(_) => "an array",
        RawValue::Object(_) => "an object",
    }
}

fn scalar_text(raw: &RawValue) -> std::result::Result<String, CoercionError> {
    raw_text(raw).ok_or(CoercionError::NotScalar {
        found: raw_type_name(raw),
    })
}

/// Truthy spellings accepted for booleans; anything else is `false`.
const TRUTHY: [&str; 3] = ["true", "1", "yes"];

/// Converts a raw value into the declared kind.
///
/// # Errors
///
/// Returns [`CoercionError::InvalidNumber`] for malformed integers and floats,
/// [`CoercionError::NotScalar`] when an array, object or null is given, and
/// [`CoercionError::Rejected`] when a custom kind's converter fails.
/// Booleans never fail: unrecognized text coerces to `false`.
pub fn coerce(raw: &RawValue, kind: &ParamKind) -> std::result::Result<Value, CoercionError> {
    match kind {
        ParamKind::String => {
            let text = scalar_text(raw)?;
            Ok(Value::String(strip_matching_quotes(&text).to_string()))
        }
        ParamKind::Integer => {
            if let Some(i) = raw.as_i64() {
                return Ok(Value::Integer(i));
            }
            let text = scalar_text(raw)?;
            text.trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| CoercionError::InvalidNumber {
                    raw: text,
                    kind: "integer",
                })
        }
        ParamKind::Float => {
            if let Some(f) = raw.as_f64() {
                return Ok(Value::Float(f));
            }
            let text = scalar_text(raw)?;
            text.trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| CoercionError::InvalidNumber {
                    raw: text,
                    kind: "float",
                })
        }
        ParamKind::Boolean => {
            if let Some(b) = raw.as_bool() {
                return Ok(Value::Bool(b));
            }
            let text = scalar_text(raw)?;
            let lowered = text.trim().to_lowercase();
            Ok(Value::Bool(TRUTHY.contains(&lowered.as_str())))
        }
        ParamKind::Path => {
            let text = scalar_text(raw)?;
            Ok(Value::Path(PathBuf::from(strip_matching_quotes(&text))))
        }
        ParamKind::Other(custom) => {
            let text = scalar_text(raw)?;
            (custom.convert)(&text).map_err(|message| CoercionError::Rejected {
                kind: custom.name().to_string(),
                raw: text,
                message,
            })
        }
    }
}

/// Brings a declared literal (a default or a permitted value) in line with
/// the kind that arguments are coerced to, so the two compare equal.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn align_literal(kind: &ParamKind, literal: Value) -> Value {
    match (kind, literal) {
        (ParamKind::Path, Value::String(s)) => Value::Path(s.into()),
        (ParamKind::Float, Value::Integer(i)) => Value::Float(i as f64),
        (_, literal) => literal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_strips_one_layer_of_quotes() {
        assert_eq!(
            coerce(&json!("\"quoted\""), &ParamKind::String).unwrap(),
            Value::from("quoted")
        );
        assert_eq!(
            coerce(&json!("'single'"), &ParamKind::String).unwrap(),
            Value::from("single")
        );
        assert_eq!(
            coerce(&json!("\"\"x\"\""), &ParamKind::String).unwrap(),
            Value::from("\"x\"")
        );
        assert_eq!(
            coerce(&json!("\"mismatched'"), &ParamKind::String).unwrap(),
            Value::from("\"mismatched'")
        );
    }

    #[test]
    fn test_string_accepts_json_scalars() {
        assert_eq!(
            coerce(&json!(12), &ParamKind::String).unwrap(),
            Value::from("12")
        );
        assert!(matches!(
            coerce(&json!([1, 2]), &ParamKind::String),
            Err(CoercionError::NotScalar { .. })
        ));
    }

    #[test]
    fn test_integer() {
        assert_eq!(
            coerce(&json!("42"), &ParamKind::Integer).unwrap(),
            Value::Integer(42)
        );
        assert_eq!(
            coerce(&json!(" -7 "), &ParamKind::Integer).unwrap(),
            Value::Integer(-7)
        );
        assert_eq!(
            coerce(&json!(5), &ParamKind::Integer).unwrap(),
            Value::Integer(5)
        );
        assert!(matches!(
            coerce(&json!("4.5"), &ParamKind::Integer),
            Err(CoercionError::InvalidNumber { kind: "integer", .. })
        ));
        assert!(matches!(
            coerce(&json!(4.5), &ParamKind::Integer),
            Err(CoercionError::InvalidNumber { .. })
        ));
        assert!(coerce(&json!("abc"), &ParamKind::Integer).is_err());
    }

    #[test]
    fn test_float() {
        assert_eq!(
            coerce(&json!("2.5"), &ParamKind::Float).unwrap(),
            Value::Float(2.5)
        );
        assert_eq!(
            coerce(&json!(3), &ParamKind::Float).unwrap(),
            Value::Float(3.0)
        );
        assert!(matches!(
            coerce(&json!("2,5"), &ParamKind::Float),
            Err(CoercionError::InvalidNumber { kind: "float", .. })
        ));
    }

    #[test]
    fn test_boolean_is_lenient() {
        for truthy in ["true", "TRUE", "True", "1", "yes", "YeS"] {
            assert_eq!(
                coerce(&json!(truthy), &ParamKind::Boolean).unwrap(),
                Value::Bool(true),
                "{truthy}"
            );
        }
        for falsy in ["false", "0", "no", "", "maybe", "on"] {
            assert_eq!(
                coerce(&json!(falsy), &ParamKind::Boolean).unwrap(),
                Value::Bool(false),
                "{falsy}"
            );
        }
        assert_eq!(
            coerce(&json!(true), &ParamKind::Boolean).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            coerce(&json!(1), &ParamKind::Boolean).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_path_does_not_check_existence() {
        assert_eq!(
            coerce(&json!("/definitely/not/here"), &ParamKind::Path).unwrap(),
            Value::Path(PathBuf::from("/definitely/not/here"))
        );
        assert_eq!(
            coerce(&json!("\"/tmp/some dir/\""), &ParamKind::Path).unwrap(),
            Value::Path(PathBuf::from("/tmp/some dir/"))
        );
    }

    #[test]
    fn test_custom_kind() {
        let upper = CustomKind::new("upper", |text| {
            if text.is_empty() {
                Err("empty".to_string())
            } else {
                Ok(Value::String(text.to_uppercase()))
            }
        });
        let kind = ParamKind::Other(upper);

        assert_eq!(coerce(&json!("abc"), &kind).unwrap(), Value::from("ABC"));
        assert!(matches!(
            coerce(&json!(""), &kind),
            Err(CoercionError::Rejected { .. })
        ));
    }

    #[test]
    fn test_scalar_round_trip_is_idempotent() {
        let cases = [
            (json!("7"), ParamKind::Integer),
            (json!("-0.125"), ParamKind::Float),
            (json!("1e3"), ParamKind::Float),
            (json!("Yes"), ParamKind::Boolean),
            (json!("nope"), ParamKind::Boolean),
            (json!("'plain text'"), ParamKind::String),
            (json!("/var/log"), ParamKind::Path),
        ];

        for (raw, kind) in cases {
            let first = coerce(&raw, &kind).unwrap();
            let second = coerce(&json!(first.to_string()), &kind).unwrap();
            assert_eq!(first, second, "{raw} as {}", kind.name());
        }
    }

    #[test]
    fn test_nested_quotes_lose_one_layer_per_coercion() {
        let first = coerce(&json!("\"\"x\"\""), &ParamKind::String).unwrap();
        assert_eq!(first, Value::from("\"x\""));

        let second = coerce(&json!(first.to_string()), &ParamKind::String).unwrap();
        assert_eq!(second, Value::from("x"));

        let path = coerce(&json!("'\"/tmp/a b\"'"), &ParamKind::Path).unwrap();
        assert_eq!(path, Value::Path(PathBuf::from("\"/tmp/a b\"")));
    }

    #[test]
    fn test_align_literal() {
        assert_eq!(align_literal(&ParamKind::Float, Value::from(2)), Value::Float(2.0));
        assert_eq!(
            align_literal(&ParamKind::Path, Value::from("/tmp")),
            Value::Path(PathBuf::from("/tmp"))
        );
        assert_eq!(align_literal(&ParamKind::Integer, Value::from(2)), Value::Integer(2));
        assert_eq!(align_literal(&ParamKind::String, Value::from(2)), Value::Integer(2));
    }

    #[test]
    fn test_kind_table_resolution() {
        let mut table = KindTable::default();
        assert_eq!(table.resolve("int"), Some(ParamKind::Integer));
        assert_eq!(table.resolve("boolean"), Some(ParamKind::Boolean));
        assert_eq!(table.resolve("Path"), Some(ParamKind::Path));
        assert!(table.resolve("uuid").is_none());

        table.register(CustomKind::new("uuid", |t| Ok(Value::from(t))));
        assert_eq!(table.resolve("uuid").map(|k| k.name().to_string()), Some("uuid".to_string()));
    }
}
