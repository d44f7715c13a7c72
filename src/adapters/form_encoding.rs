//! Flattening of nested request parameters into Conduit form fields.
//!
//! Conduit reads form bodies the way PHP does: `constraints[ids][0]=1`,
//! `attachments[columns]=1`, `transactions[0][type]=title`.

use serde_json::Value;

/// Flatten a JSON object into ordered `(key, value)` form pairs.
///
/// Nulls are dropped and booleans become `1`/`0`.
pub fn encode_params(params: &Value) -> Vec<(String, String)> {
    let mut out = Vec::new();
    if let Value::Object(map) = params {
        for (key, value) in map {
            flatten(key.clone(), value, &mut out);
        }
    }
    out
}

fn flatten(key: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => out.push((key, if *flag { "1" } else { "0" }.to_string())),
        Value::Number(number) => out.push((key, number.to_string())),
        Value::String(text) => out.push((key, text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(format!("{}[{}]", key, index), item, out);
            }
        }
        Value::Object(map) => {
            for (name, item) in map {
                flatten(format!("{}[{}]", key, name), item, out);
            }
        }
    }
}
