use crate::{
    error::{CoreError, ErrorOrigin},
    types::{Float64, Number},
    value::Value,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

///
/// JSON
///
/// JSON documents are held in the same closed `Value` union. Integral
/// literals ingest as `Long` (or `Number` past the `i64` range); decimal
/// literals ingest as `Double` when the shortest double reproduces the
/// literal exactly, otherwise as `Number`.
///

impl Value {
    /// Parse JSON text into a value.
    pub fn parse_json(text: &str) -> Result<Self, CoreError> {
        let json: JsonValue = serde_json::from_str(text).map_err(|err| {
            CoreError::validation(ErrorOrigin::Value, format!("invalid JSON: {err}"))
        })?;

        Self::from_json(&json)
    }

    /// Convert a parsed JSON document into a value.
    pub fn from_json(json: &JsonValue) -> Result<Self, CoreError> {
        Ok(match json {
            JsonValue::Null => Self::JsonNull,
            JsonValue::Bool(v) => Self::Boolean(*v),
            JsonValue::String(v) => Self::String(v.clone()),
            JsonValue::Number(v) => number_from_json(v)?,
            JsonValue::Array(items) => {
                Self::Array(items.iter().map(Self::from_json).collect::<Result<_, _>>()?)
            }
            JsonValue::Object(members) => Self::from_map(
                members
                    .iter()
                    .map(|(key, value)| Ok((key.clone(), Self::from_json(value)?)))
                    .collect::<Result<Vec<_>, CoreError>>()?,
            )?,
        })
    }

    /// JSON form of this value.
    ///
    /// Kinds JSON cannot hold natively render as strings in their display
    /// form; the SQL-null, empty, and absent sentinels render as `null`.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Integer(v) => JsonValue::from(*v),
            Self::Long(v) => JsonValue::from(*v),
            Self::Float(v) => float_json(v.get().is_finite(), v.to_string()),
            Self::Double(v) => float_json(v.get().is_finite(), v.to_string()),
            Self::Number(v) => literal_json(v.to_string()),
            Self::String(v) => JsonValue::String(v.clone()),
            Self::Boolean(v) => JsonValue::Bool(*v),
            Self::Binary(v) | Self::FixedBinary(v) => JsonValue::String(STANDARD.encode(v)),
            Self::Enum(v) => JsonValue::String(v.symbol().to_string()),
            Self::Timestamp(v) => JsonValue::String(v.to_string()),
            Self::Array(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(entries) | Self::Record(entries) => JsonValue::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect::<JsonMap<_, _>>(),
            ),
            Self::JsonNull | Self::Null | Self::Empty | Self::Absent => JsonValue::Null,
        }
    }

    /// JSON text of this value.
    #[must_use]
    pub fn to_json_text(&self) -> String {
        self.to_json().to_string()
    }

    /// Whether this value may appear inside a JSON document: JSON scalars,
    /// JSON null, and arrays/maps of those, recursively.
    #[must_use]
    pub fn is_json_legal(&self) -> bool {
        match self {
            Self::Array(items) => items.iter().all(Self::is_json_legal),
            Self::Map(entries) => entries.iter().all(|(_, value)| value.is_json_legal()),
            Self::JsonNull => true,
            other => other.kind().is_some_and(|kind| kind.is_json_legal() && kind.is_atomic()),
        }
    }
}

fn number_from_json(number: &JsonNumber) -> Result<Value, CoreError> {
    if let Some(v) = number.as_i64() {
        return Ok(Value::Long(v));
    }

    let text = number.to_string();
    let decimal = text
        .parse::<Number>()
        .map_err(|err| CoreError::validation(ErrorOrigin::Value, err.to_string()))?;
    let is_integral_literal = !text.contains(['.', 'e', 'E']);

    if !is_integral_literal && decimal.round_trips_through_f64() {
        Ok(Value::Double(Float64::new(decimal.to_f64())))
    } else {
        Ok(Value::Number(decimal))
    }
}

// Float display text as a JSON number; integral floats keep a fraction so
// they re-ingest as doubles. Non-finite values have no JSON number form.
fn float_json(finite: bool, mut text: String) -> JsonValue {
    if !finite {
        return JsonValue::String(text);
    }
    if !text.contains(['.', 'e', 'E']) {
        text.push_str(".0");
    }

    literal_json(text)
}

fn literal_json(text: String) -> JsonValue {
    serde_json::from_str(&text).unwrap_or(JsonValue::String(text))
}
