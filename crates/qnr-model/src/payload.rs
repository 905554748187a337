//! Raw payload shape helpers.
//!
//! Inbound payloads come in two layouts: respondent details nested under a
//! `basic_info` (or `basicInfo`) object, or a legacy flat layout with the
//! same fields at the top level. `BasicInfoSource` resolves that choice
//! exactly once; downstream code never branches on shape again.

use serde_json::{Map, Value};

/// Where the respondent details live inside a raw payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicInfoSource<'a> {
    /// Details nested under `basic_info` / `basicInfo`.
    Nested(&'a Map<String, Value>),
    /// Legacy layout with details at the payload root.
    Flat(&'a Map<String, Value>),
}

impl<'a> BasicInfoSource<'a> {
    /// Resolve the layout of a raw payload object.
    pub fn resolve(root: &'a Map<String, Value>) -> Self {
        match field(root, &["basic_info", "basicInfo"]).and_then(Value::as_object) {
            Some(nested) => BasicInfoSource::Nested(nested),
            None => BasicInfoSource::Flat(root),
        }
    }

    /// The object holding the respondent fields.
    pub fn fields(&self) -> &'a Map<String, Value> {
        match self {
            BasicInfoSource::Nested(map) | BasicInfoSource::Flat(map) => map,
        }
    }
}

/// Look up a field under any of its accepted spellings, first match wins.
pub fn field<'a>(map: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| map.get(*name))
}

/// Integer coercion shared by the validator and normalizer: JSON integers
/// pass through, floats truncate, numeric strings parse (fractional text
/// also truncates). Anything else is not a number.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

/// Render a JSON scalar the way it appears in operator-facing messages:
/// strings bare, everything else as its JSON text.
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
