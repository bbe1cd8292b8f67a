use itertools::Itertools;
use serde_yaml::Value;

/// Collapse a `tags` value into one comma-joined string.
///
/// A string is split on commas, a sequence keeps only its string elements;
/// every piece is trimmed. Anything else yields an empty string.
pub fn normalize_tags(raw: &Value) -> String {
    match raw {
        Value::String(tags) => tags.split(',').map(str::trim).join(","),
        Value::Sequence(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .join(","),
        _ => String::new(),
    }
}
