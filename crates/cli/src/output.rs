//! Text rendering of command outcomes and the command listing.

use itertools::Itertools;
use rust_verbs_core::config::ListFormat;
use rust_verbs_core::error::{Error, Result};
use rust_verbs_core::execution::{Outcome, Table};
use rust_verbs_core::specs::CommandSpec;

/// Shown for an empty list result.
pub const NO_RESULTS: &str = "No results returned.";

/// Renders an outcome for the terminal; `None` when there is nothing to print.
#[must_use]
pub fn render(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Nothing => None,
        Outcome::Scalar(value) => Some(value.to_string()),
        Outcome::Mapping(entries) => Some(
            entries
                .iter()
                .map(|(key, value)| format!("{key}: {value}"))
                .join("\n"),
        ),
        Outcome::List(items) if items.is_empty() => Some(NO_RESULTS.to_string()),
        Outcome::List(items) => Some(items.iter().join("\n")),
        Outcome::Table(table) => Some(render_table(table)),
    }
}

fn render_table(table: &Table) -> String {
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let format_row = |row: &[String]| {
        row.iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header = format_row(table.columns.as_slice());
    let rule = widths.iter().map(|width| "-".repeat(*width)).join("  ");

    std::iter::once(header)
        .chain(std::iter::once(rule))
        .chain(cells.iter().map(|row| format_row(row.as_slice())))
        .join("\n")
}

/// Serializes the command listing in `format`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_specs(specs: &[CommandSpec], format: ListFormat) -> Result<String> {
    match format {
        ListFormat::Yaml => serde_yaml::to_string(specs).map_err(|e| {
            Error::yaml_error(
                "writing".to_string(),
                "command listing".to_string(),
                "<stdout>".to_string(),
                e,
            )
        }),
        ListFormat::Json => Ok(serde_json::to_string_pretty(specs)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use rust_verbs_core::value::Value;

    #[test]
    fn test_render_nothing_and_scalar() {
        assert_eq!(render(&Outcome::Nothing), None);
        assert_eq!(
            render(&Outcome::Scalar(Value::Integer(5))).as_deref(),
            Some("5")
        );
        assert_eq!(render(&Outcome::Scalar(Value::Null)).as_deref(), Some("None"));
    }

    #[test]
    fn test_render_mapping() {
        let entries = IndexMap::from([
            ("name".to_string(), Value::from("rv")),
            ("version".to_string(), Value::from("0.2.0")),
        ]);
        assert_eq!(
            render(&Outcome::Mapping(entries)).as_deref(),
            Some("name: rv\nversion: 0.2.0")
        );
    }

    #[test]
    fn test_render_list() {
        assert_eq!(render(&Outcome::List(vec![])).as_deref(), Some(NO_RESULTS));
        assert_eq!(
            render(&Outcome::List(vec![Value::from("a"), Value::from(2)])).as_deref(),
            Some("a\n2")
        );
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let table = Table {
            columns: vec!["name".to_string(), "age".to_string()],
            rows: vec![
                vec![Value::from("Ada"), Value::from(36)],
                vec![Value::from("Grace"), Value::Null],
            ],
        };

        assert_eq!(
            render(&Outcome::Table(table)).as_deref(),
            Some("name   age\n-----  ----\nAda    36\nGrace  None")
        );
    }

    #[test]
    fn test_render_specs_formats() {
        let spec = CommandSpec {
            name: "test".to_string(),
            description: None,
            args: vec![],
            tags: vec![],
            attributes: IndexMap::new(),
        };

        let yaml = render_specs(&[spec.clone()], ListFormat::Yaml).unwrap();
        assert!(yaml.contains("name: test"));

        let json = render_specs(&[spec], ListFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["name"], "test");
    }
}
