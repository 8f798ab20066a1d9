//! Shared display helpers for backend responses.
//!
//! Objects are printed as pretty JSON. Lists become a box table of a few
//! key columns unless the user asked for `--json`.

use serde_json::Value;

use crate::error::{FoundryError, Result};
use crate::ui::{Table, UserInterface};

/// Keys under which list endpoints may wrap their items.
const LIST_KEYS: &[&str] = &["items", "results", "data"];

/// Print a value as indented JSON.
pub fn print_json(ui: &mut dyn UserInterface, value: &Value) -> Result<()> {
    ui.output(&serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a value as single-line JSON.
pub fn print_compact(ui: &mut dyn UserInterface, value: &Value) {
    ui.output(&value.to_string());
}

/// The items of a list response.
///
/// Accepts a bare array or an object wrapping one under a common key.
pub fn list_items(value: &Value) -> Result<&[Value]> {
    if let Value::Array(items) = value {
        return Ok(items);
    }
    if let Value::Object(map) = value {
        for key in LIST_KEYS {
            if let Some(Value::Array(items)) = map.get(*key) {
                return Ok(items);
            }
        }
    }
    Err(FoundryError::InvalidResponse {
        message: format!("expected a list, got {}", kind_of(value)),
    })
}

/// Print a list response.
///
/// With `as_json` the body is printed verbatim as pretty JSON; otherwise a
/// table of `columns` is rendered, followed by a count on stderr.
pub fn print_list(
    ui: &mut dyn UserInterface,
    value: &Value,
    columns: &[&str],
    noun: &str,
    as_json: bool,
) -> Result<()> {
    if as_json {
        return print_json(ui, value);
    }

    let items = list_items(value)?;
    if items.is_empty() {
        ui.message(&format!("No {} found.", noun));
        return Ok(());
    }

    let mut table = Table::new(columns.to_vec());
    for item in items {
        let row: Vec<String> = columns.iter().map(|c| cell(item, c)).collect();
        table.add_row(&row);
    }
    ui.output(&table.render());
    ui.message(&format!("{} {}", items.len(), noun));
    Ok(())
}

/// A field rendered for a table cell.
pub fn cell(item: &Value, key: &str) -> String {
    match item.get(key) {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use serde_json::json;

    #[test]
    fn list_items_accepts_wrappers() {
        assert_eq!(list_items(&json!([1, 2])).unwrap().len(), 2);
        assert_eq!(list_items(&json!({"items": [1]})).unwrap().len(), 1);
        assert_eq!(list_items(&json!({"results": []})).unwrap().len(), 0);
    }

    #[test]
    fn list_items_rejects_other_shapes() {
        let err = list_items(&json!({"id": 1})).unwrap_err();
        assert!(err.to_string().contains("an object"));
        assert!(list_items(&Value::Null).is_err());
    }

    #[test]
    fn print_list_renders_table() {
        let mut ui = MockUI::new();
        let value = json!([
            {"id": 1, "name": "Alpha", "description": null},
            {"id": 2, "name": "Beta"}
        ]);
        print_list(&mut ui, &value, &["id", "name", "description"], "projects", false).unwrap();

        let out = ui.output_text();
        assert!(out.contains("Alpha"));
        assert!(out.contains("Beta"));
        assert!(out.contains("DESCRIPTION"));
        assert!(ui.has_message("2 projects"));
    }

    #[test]
    fn print_list_json_passthrough() {
        let mut ui = MockUI::new();
        let value = json!([{"id": 1}]);
        print_list(&mut ui, &value, &["id"], "tasks", true).unwrap();

        let printed: Value = serde_json::from_str(&ui.output_text()).unwrap();
        assert_eq!(printed, value);
    }

    #[test]
    fn empty_list_prints_notice_only() {
        let mut ui = MockUI::new();
        print_list(&mut ui, &json!([]), &["id"], "signals", false).unwrap();
        assert!(ui.outputs().is_empty());
        assert!(ui.has_message("No signals found."));
    }

    #[test]
    fn cell_formats_values() {
        let item = json!({"s": "text", "n": 3, "b": true, "z": null});
        assert_eq!(cell(&item, "s"), "text");
        assert_eq!(cell(&item, "n"), "3");
        assert_eq!(cell(&item, "b"), "true");
        assert_eq!(cell(&item, "z"), "-");
        assert_eq!(cell(&item, "missing"), "-");
    }
}
