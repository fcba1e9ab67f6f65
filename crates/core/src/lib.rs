//! Rust Verbs Core Library
//!
//! This crate turns ordinary Rust types into commands that several front-ends
//! can expose the same way: a command-line parser, an HTTP surface, a form
//! generator and an interactive REPL with tab completion.
//!
//! # Key Features
//!
//! - **Command Sources**: Types implement [`command_definitions::CommandSource`] to declare
//!   their commands, parameter types, defaults and permitted values
//! - **Registry**: Declarations are validated once into immutable descriptors
//! - **Coercion**: Untyped strings and JSON values become typed [`value::Value`]s
//! - **Execution**: Staged validation, then a single call into the source
//! - **REPL Support**: Line tokenizing and context-sensitive completion
//! - **Adapter Plans**: HTTP routes and form fields derived from descriptors
//!
//! # Examples
//!
//! ```
//! use rust_verbs_core::command_definitions::{
//!     Arguments, CommandDeclaration, CommandResult, CommandSource,
//! };
//! use rust_verbs_core::execution::{execute, Outcome};
//! use rust_verbs_core::registry;
//! use rust_verbs_core::value::{RawArguments, Value};
//!
//! struct Calculator;
//!
//! impl CommandSource for Calculator {
//!     fn source_name(&self) -> &str {
//!         "calculator"
//!     }
//!
//!     fn commands(&self) -> Vec<CommandDeclaration> {
//!         vec![CommandDeclaration::new("sum")
//!             .required("a", "int")
//!             .required("b", "int")]
//!     }
//!
//!     fn invoke(&self, _command: &str, arguments: &Arguments) -> CommandResult {
//!         Ok(Value::from(arguments.integer("a")? + arguments.integer("b")?))
//!     }
//! }
//!
//! let sources: Vec<Box<dyn CommandSource>> = vec![Box::new(Calculator)];
//! let registry = registry::build(&sources)?;
//!
//! let mut raw = RawArguments::new();
//! raw.insert("a".to_string(), "2".into());
//! raw.insert("b".to_string(), "3".into());
//!
//! let outcome = execute(&registry, &sources, "sum", &raw)?;
//! assert_eq!(outcome, Outcome::Scalar(Value::Integer(5)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod adapters;
pub mod command_definitions;
pub mod completion;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod kinds;
pub mod line_parsing;
pub mod registry;
pub mod specs;
pub mod value;
