use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Server-assigned row identifier (`SERIAL` column).
pub type Id = i32;

/// Converts an arbitrary JSON value into the text bound to a `TEXT` column.
///
/// Request bodies are not validated, so a client may send a number or an
/// object where a name is expected. Scalars and objects are stored as their
/// JSON text, arrays as a Postgres array literal (`[1, 2]` becomes
/// `{"1","2"}`). `null` stays NULL and is left for the NOT NULL constraint
/// to reject.
pub fn coerce_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Array(items) => Some(array_literal(items)),
        other => Some(scalar_text(other)),
    }
}

fn scalar_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn array_literal(items: Vec<Value>) -> String {
    let elements: Vec<String> = items
        .into_iter()
        .map(|item| match item {
            Value::Null => "NULL".to_string(),
            Value::Array(inner) => array_literal(inner),
            other => quote_element(&scalar_text(other)),
        })
        .collect();

    format!("{{{}}}", elements.join(","))
}

fn quote_element(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// `deserialize_with` adapter for optional text fields in write payloads.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(coerce_text))
}
