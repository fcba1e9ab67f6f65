use indexmap::IndexMap;
use log::debug;

use crate::descriptor::CommandDescriptor;
use crate::kinds::ParamKind;
use crate::value::{RawArguments, RawValue, Value};

/// Input control a form should show for one parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWidget {
    /// Drop-down over the parameter's permitted values.
    Choice(Vec<Value>),
    Checkbox,
    /// Text field paired with a file browser.
    PathPicker,
    Integer,
    Float,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub widget: FieldWidget,
    pub required: bool,
    pub default: Option<Value>,
    pub help: Option<String>,
}

/// What the user entered into one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    Checked(bool),
}

/// Form fields for every parameter of `descriptor`, required ones first.
///
/// Permitted values take precedence over the declared kind, and providers
/// are resolved at the time the form is planned.
#[must_use]
pub fn form_fields(descriptor: &CommandDescriptor) -> Vec<FormField> {
    descriptor
        .parameters()
        .map(|parameter| {
            let widget = match descriptor.permitted_values(&parameter.name) {
                Some(permitted) => FieldWidget::Choice(permitted.resolve()),
                None => match parameter.kind {
                    ParamKind::Boolean => FieldWidget::Checkbox,
                    ParamKind::Path => FieldWidget::PathPicker,
                    ParamKind::Integer => FieldWidget::Integer,
                    ParamKind::Float => FieldWidget::Float,
                    ParamKind::String | ParamKind::Other(_) => FieldWidget::Text,
                },
            };

            FormField {
                name: parameter.name.clone(),
                widget,
                required: parameter.is_required(),
                default: parameter.default.clone(),
                help: parameter.description.clone(),
            }
        })
        .collect()
}

/// Turns submitted field input into raw arguments for the execution engine.
///
/// Fields missing from `inputs` are left out so their defaults apply, as is
/// an empty path field.
#[must_use]
pub fn collect_form_values(
    fields: &[FormField],
    inputs: &IndexMap<String, FieldInput>,
) -> RawArguments {
    let mut raw = RawArguments::new();

    for field in fields {
        let Some(input) = inputs.get(&field.name) else {
            continue;
        };

        let value = match (input, &field.widget) {
            (FieldInput::Checked(checked), _) => RawValue::Bool(*checked),
            (FieldInput::Text(text), FieldWidget::PathPicker) if text.is_empty() => {
                debug!("Leaving empty path field `{}` unset", field.name);
                continue;
            }
            (FieldInput::Text(text), _) => RawValue::String(text.clone()),
        };

        raw.insert(field.name.clone(), value);
    }

    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_definitions::{
        Arguments, CommandDeclaration, CommandResult, CommandSource, PermittedValues,
        ValidValuesTable,
    };
    use crate::registry;
    use crate::registry::Registry;

    struct Fixture;

    impl CommandSource for Fixture {
        fn source_name(&self) -> &str {
            "fixture"
        }

        fn commands(&self) -> Vec<CommandDeclaration> {
            vec![CommandDeclaration::new("export")
                .required("status", "int")
                .required("label", "str")
                .help("Shown in the title")
                .optional("verbose", "bool", false)
                .optional("target", "path", Value::Null)
                .optional("ratio", "float", 0.5)
                .optional("count", "int", 1)]
        }

        fn valid_values(&self) -> ValidValuesTable {
            IndexMap::from([(
                "export".to_string(),
                IndexMap::from([("status".to_string(), PermittedValues::fixed([0, 1, 2]))]),
            )])
        }

        fn invoke(&self, _command: &str, _arguments: &Arguments) -> CommandResult {
            Ok(Value::Null)
        }
    }

    fn fixture_registry() -> Registry {
        let sources: Vec<Box<dyn CommandSource>> = vec![Box::new(Fixture)];
        registry::build(&sources).unwrap()
    }

    #[test]
    fn test_form_fields_widgets() {
        let registry = fixture_registry();
        let fields = form_fields(registry.get("export").unwrap());

        let widgets: Vec<(&str, &FieldWidget)> =
            fields.iter().map(|f| (f.name.as_str(), &f.widget)).collect();
        assert_eq!(
            widgets,
            vec![
                (
                    "status",
                    &FieldWidget::Choice(vec![Value::Integer(0), Value::Integer(1), Value::Integer(2)])
                ),
                ("label", &FieldWidget::Text),
                ("verbose", &FieldWidget::Checkbox),
                ("target", &FieldWidget::PathPicker),
                ("ratio", &FieldWidget::Float),
                ("count", &FieldWidget::Integer),
            ]
        );

        assert!(fields[0].required);
        assert_eq!(fields[1].help.as_deref(), Some("Shown in the title"));
        assert!(!fields[2].required);
        assert_eq!(fields[5].default, Some(Value::Integer(1)));
    }

    #[test]
    fn test_collect_form_values() {
        let registry = fixture_registry();
        let fields = form_fields(registry.get("export").unwrap());

        let inputs = IndexMap::from([
            ("status".to_string(), FieldInput::Text("1".to_string())),
            ("label".to_string(), FieldInput::Text("Quarterly".to_string())),
            ("verbose".to_string(), FieldInput::Checked(true)),
            ("target".to_string(), FieldInput::Text(String::new())),
            ("unrelated".to_string(), FieldInput::Text("x".to_string())),
        ]);

        let raw = collect_form_values(&fields, &inputs);
        let keys: Vec<&str> = raw.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["status", "label", "verbose"]);
        assert_eq!(raw.get("verbose"), Some(&RawValue::Bool(true)));
        assert_eq!(raw.get("status"), Some(&RawValue::String("1".to_string())));
    }

    #[test]
    fn test_non_empty_path_is_kept() {
        let registry = fixture_registry();
        let fields = form_fields(registry.get("export").unwrap());
        let inputs = IndexMap::from([("target".to_string(), FieldInput::Text("/tmp".to_string()))]);

        let raw = collect_form_values(&fields, &inputs);
        assert_eq!(raw.get("target"), Some(&RawValue::String("/tmp".to_string())));
    }
}
