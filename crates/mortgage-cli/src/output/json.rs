use serde_json::Value;
use std::io::{self, Write};

/// Pretty-printed JSON, one document per invocation.
pub fn write_json<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
