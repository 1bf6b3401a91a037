use serde_json::{Map, Value};
use std::io::{self, Write};
use tabled::{builder::Builder, Table};

use super::{flatten_fields, row_array, scalar_text};

/// Format output as tables: one Field/Value table for the scalar results,
/// then one table per list of rows (the schedule), then warnings.
pub fn write_table<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => write_result_tables(out, result, map),
            None => write_result_tables(out, value, &Map::new()),
        },
        Value::Array(arr) => write_rows(out, arr),
        _ => writeln!(out, "{}", scalar_text(value)),
    }
}

fn write_result_tables<W: Write>(
    out: &mut W,
    result: &Value,
    envelope: &Map<String, Value>,
) -> io::Result<()> {
    let mut fields = Vec::new();
    flatten_fields("", result, &mut fields);
    if !fields.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in fields {
            builder.push_record([key, val]);
        }
        writeln!(out, "{}", Table::from(builder))?;
    }

    if let Some((name, rows)) = row_array(result) {
        writeln!(out, "\n{}:", name)?;
        write_rows(out, rows)?;
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            writeln!(out, "\nWarnings:")?;
            for w in warnings.iter().filter_map(Value::as_str) {
                writeln!(out, "  - {}", w)?;
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        writeln!(out, "\nMethodology: {}", meth)?;
    }
    Ok(())
}

fn write_rows<W: Write>(out: &mut W, rows: &[Value]) -> io::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            writeln!(out, "{}", scalar_text(item))?;
        }
        return Ok(());
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(h).map(scalar_text).unwrap_or_default()),
        );
    }
    writeln!(out, "{}", Table::from(builder))
}
