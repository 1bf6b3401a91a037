use serde_json::Value;
use std::io::{self, Write};

use super::{flatten_fields, result_of, row_array, scalar_text};

/// Write output as CSV. Results holding a list of rows (the schedule) are
/// written as that list; anything else becomes two-column `field,value`.
pub fn write_csv<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    let result = result_of(value);

    if let Some((_, rows)) = row_array(result) {
        write_rows(&mut wtr, rows)?;
    } else if let Value::Array(rows) = result {
        write_rows(&mut wtr, rows)?;
    } else {
        let mut fields = Vec::new();
        flatten_fields("", result, &mut fields);
        wtr.write_record(["field", "value"])?;
        for (key, val) in &fields {
            wtr.write_record([key, val])?;
        }
    }

    wtr.flush()
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> io::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            wtr.write_record([scalar_text(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for row in rows.iter().filter_map(Value::as_object) {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(scalar_text).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }
    Ok(())
}
