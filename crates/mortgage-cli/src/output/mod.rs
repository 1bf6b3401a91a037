pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;
use std::io::{self, Write};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match format {
        OutputFormat::Json => json::write_json(&mut out, value),
        OutputFormat::Table => table::write_table(&mut out, value),
        OutputFormat::Csv => csv_out::write_csv(&mut out, value),
        OutputFormat::Minimal => minimal::write_minimal(&mut out, value),
    };
    if let Err(e) = written.and_then(|_| out.flush()) {
        eprintln!("failed to write output: {}", e);
    }
}

/// Scalar rendering shared by the table, CSV and minimal formatters.
/// Decimals arrive as JSON strings and are printed unquoted.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// The `result` member of a computation envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Flatten nested objects into `parent.child` keys, skipping arrays of
/// objects (those become their own tables).
pub(crate) fn flatten_fields(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    let Value::Object(map) = value else {
        out.push((prefix.to_string(), scalar_text(value)));
        return;
    };
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(_) => flatten_fields(&name, val, out),
            Value::Array(items) if items.iter().any(Value::is_object) => {}
            _ => out.push((name, scalar_text(val))),
        }
    }
}

/// First array of objects directly under `value`, with its key.
pub(crate) fn row_array(value: &Value) -> Option<(&str, &[Value])> {
    value.as_object()?.iter().find_map(|(key, val)| match val {
        Value::Array(items) if items.first().is_some_and(Value::is_object) => {
            Some((key.as_str(), items.as_slice()))
        }
        _ => None,
    })
}
