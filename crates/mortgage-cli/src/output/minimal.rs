use serde_json::Value;
use std::io::{self, Write};

use super::{result_of, scalar_text};

/// Key answers in priority order.
const PRIORITY_KEYS: [&str; 4] = [
    "monthly_payment",
    "remaining_balance",
    "total_interest",
    "path",
];

/// Print just the key answer value from the output.
pub fn write_minimal<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    writeln!(out, "{}", minimal_text(value))
}

/// Searches the result, then its `summary`, then its `terms`, so a schedule
/// prints what is left owing and a payment query prints the payment.
fn minimal_text(value: &Value) -> String {
    let result = result_of(value);
    let Some(map) = result.as_object() else {
        return scalar_text(result);
    };

    let scopes = [Some(result), map.get("summary"), map.get("terms")];
    for scope in scopes.iter().flatten().filter_map(|s| s.as_object()) {
        for key in PRIORITY_KEYS {
            if let Some(val) = scope.get(key).filter(|v| !v.is_null()) {
                return scalar_text(val);
            }
        }
    }

    match map.iter().next() {
        Some((key, val)) => format!("{}: {}", key, scalar_text(val)),
        None => String::new(),
    }
}
