use crate::ingest::errors::ExtractError;
use serde_json::Value;

/// Pulls the JSON record out of one dump line. Each line is a tab-separated prefix (key, type,
/// revision, timestamp) followed by one JSON object; everything before the first `{` is
/// discarded unconditionally and the rest of the line is parsed as JSON.
pub fn extract_record(line: &str) -> Result<Value, ExtractError> {
    let start = line.find('{').ok_or(ExtractError::MissingObject)?;
    let record = serde_json::from_str(&line[start..])?;
    Ok(record)
}

/// Stringifies a scalar field the way the dump tooling always has: an absent or null field
/// becomes the literal text `"null"` (not an empty string), a string field becomes its contents,
/// and anything else becomes its JSON text (so numeric cover identifiers stringify).
pub(crate) fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Removes a path-style prefix such as `/authors/` from a foreign-key identifier, leaving keys
/// without the prefix untouched.
pub(crate) fn strip_key_prefix(key: &str, prefix: &str) -> String {
    key.strip_prefix(prefix).unwrap_or(key).to_owned()
}
