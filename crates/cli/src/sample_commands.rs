//! Command sources shipped with `rv` so every front-end has something to run.

use indexmap::IndexMap;
use rust_verbs_core::command_definitions::{
    Arguments, CommandDeclaration, CommandResult, CommandSource, PermittedValues,
    ValidValuesTable,
};
use rust_verbs_core::value::Value;

fn unknown(source: &str, command: &str) -> CommandResult {
    Err(format!("`{source}` has no command `{command}`").into())
}

/// `test`, `test_path` and `test_status`.
pub struct Commands;

impl CommandSource for Commands {
    fn source_name(&self) -> &str {
        "commands"
    }

    fn commands(&self) -> Vec<CommandDeclaration> {
        vec![
            CommandDeclaration::new("test").about("Prints a fixed message"),
            CommandDeclaration::new("test_path")
                .about("Shows the name of an existing path")
                .required("path", "path")
                .optional("full_path", "bool", false)
                .help("Print the canonical path instead of its name"),
            CommandDeclaration::new("test_status")
                .about("Echoes a status code")
                .optional("status", "int", 0),
        ]
    }

    fn valid_values(&self) -> ValidValuesTable {
        IndexMap::from([(
            "test_status".to_string(),
            IndexMap::from([("status".to_string(), PermittedValues::fixed([0, 1, 2]))]),
        )])
    }

    fn invoke(&self, command: &str, arguments: &Arguments) -> CommandResult {
        match command {
            "test" => Ok(Value::from("This is test")),
            "test_path" => {
                let path = arguments.path("path")?;
                if arguments.boolean("full_path")? {
                    return Ok(Value::from(path.canonicalize()?));
                }
                match path.file_name() {
                    Some(name) => Ok(Value::from(name.to_string_lossy().into_owned())),
                    None => Ok(Value::from(path)),
                }
            }
            "test_status" => Ok(Value::from(arguments.integer("status")?)),
            _ => unknown(self.source_name(), command),
        }
    }
}

/// `test2`.
pub struct Commands2;

impl CommandSource for Commands2 {
    fn source_name(&self) -> &str {
        "commands2"
    }

    fn commands(&self) -> Vec<CommandDeclaration> {
        vec![CommandDeclaration::new("test2").about("Prints another fixed message")]
    }

    fn invoke(&self, command: &str, _arguments: &Arguments) -> CommandResult {
        match command {
            "test2" => Ok(Value::from("This is test2")),
            _ => unknown(self.source_name(), command),
        }
    }
}

/// `test3` and `sum`.
pub struct Commands3;

impl CommandSource for Commands3 {
    fn source_name(&self) -> &str {
        "commands3"
    }

    fn commands(&self) -> Vec<CommandDeclaration> {
        vec![
            CommandDeclaration::new("test3").about("Prints a third fixed message"),
            CommandDeclaration::new("sum")
                .about("Adds two or three integers")
                .required("a", "int")
                .required("b", "int")
                .optional("c", "int", 0),
        ]
    }

    fn invoke(&self, command: &str, arguments: &Arguments) -> CommandResult {
        match command {
            "test3" => Ok(Value::from("This is test3")),
            "sum" => Ok(Value::from(
                arguments.integer("a")? + arguments.integer("b")? + arguments.integer("c")?,
            )),
            _ => unknown(self.source_name(), command),
        }
    }
}

const COLOURS: [&str; 4] = ["red", "green", "blue", "yellow"];

/// Commands returning each shape of result: a mapping, a table, a list, and a failure.
pub struct Showcase;

impl CommandSource for Showcase {
    fn source_name(&self) -> &str {
        "showcase"
    }

    fn commands(&self) -> Vec<CommandDeclaration> {
        vec![
            CommandDeclaration::new("info").about("Describes this build"),
            CommandDeclaration::new("people").about("Lists a few people as a table"),
            CommandDeclaration::new("colours").about("Lists the known colours"),
            CommandDeclaration::new("pick_colour")
                .about("Picks one of the known colours")
                .optional("colour", "str", "red"),
            CommandDeclaration::new("divide")
                .about("Divides two floats")
                .required("dividend", "float")
                .required("divisor", "float"),
        ]
    }

    fn valid_values(&self) -> ValidValuesTable {
        IndexMap::from([(
            "pick_colour".to_string(),
            IndexMap::from([(
                "colour".to_string(),
                PermittedValues::provider(|| COLOURS.iter().map(|c| Value::from(*c)).collect()),
            )]),
        )])
    }

    fn invoke(&self, command: &str, arguments: &Arguments) -> CommandResult {
        match command {
            "info" => Ok([
                ("name".to_string(), Value::from(env!("CARGO_PKG_NAME"))),
                ("version".to_string(), Value::from(env!("CARGO_PKG_VERSION"))),
            ]
            .into_iter()
            .collect()),
            "people" => Ok(Value::List(vec![
                person("Ada", 36),
                person("Grace", 45),
                person("Linus", 21),
            ])),
            "colours" => Ok(Value::from(COLOURS.to_vec())),
            "pick_colour" => Ok(Value::from(format!(
                "You picked {}",
                arguments.string("colour")?
            ))),
            "divide" => {
                let divisor = arguments.float("divisor")?;
                if divisor == 0.0 {
                    return Err("Cannot divide by zero".into());
                }
                Ok(Value::from(arguments.float("dividend")? / divisor))
            }
            _ => unknown(self.source_name(), command),
        }
    }
}

fn person(name: &str, age: i64) -> Value {
    [
        ("name".to_string(), Value::from(name)),
        ("age".to_string(), Value::from(age)),
    ]
    .into_iter()
    .collect()
}

/// Every sample source, in registration order.
#[must_use]
pub fn sample_sources() -> Vec<Box<dyn CommandSource>> {
    vec![
        Box::new(Commands),
        Box::new(Commands2),
        Box::new(Commands3),
        Box::new(Showcase),
    ]
}
