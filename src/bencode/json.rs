use super::value::Value;

/// Renders a decoded value as JSON for diagnostic output.
///
/// Byte strings are converted with lossy UTF-8, so arbitrary binary data
/// does not round-trip. This is a debug facility, not a serialization
/// format.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Bytes(b) => serde_json::Value::String(String::from_utf8_lossy(b).into_owned()),
        Value::List(l) => serde_json::Value::Array(l.iter().map(to_json).collect()),
        Value::Dict(d) => serde_json::Value::Object(
            d.iter()
                .map(|(k, v)| (String::from_utf8_lossy(k).into_owned(), to_json(v)))
                .collect(),
        ),
    }
}
