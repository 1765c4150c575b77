use crate::{
    error::CoreError,
    model::JsonIndexType,
    types::{Float64, Number},
    value::Value,
};

/// Project a JSON value onto an index's declared type.
///
/// Sentinels pass through. Conversions only widen, except that a decimal
/// becomes a long when it is integral and in range, and a double only when
/// the shortest double reproduces it exactly. Anything else is rejected.
pub(crate) fn project_json(value: Value, declared: JsonIndexType) -> Result<Value, CoreError> {
    if value.is_sentinel() {
        return Ok(value);
    }

    let projected = match (declared, &value) {
        (JsonIndexType::Long, Value::Long(_)) => Some(value.clone()),
        (JsonIndexType::Long, Value::Integer(v)) => Some(Value::Long(i64::from(*v))),
        (JsonIndexType::Long, Value::Number(v)) => v.to_i64_exact().map(Value::Long),

        (JsonIndexType::Double, Value::Double(_)) => Some(value.clone()),
        (JsonIndexType::Double, Value::Integer(_) | Value::Long(_) | Value::Float(_)) => {
            value.as_double().ok().map(|v| Value::Double(Float64::new(v)))
        }
        (JsonIndexType::Double, Value::Number(v)) => v
            .round_trips_through_f64()
            .then(|| Value::Double(Float64::new(v.to_f64()))),

        (JsonIndexType::Number, Value::Number(_)) => Some(value.clone()),
        // Doubles come from literals the shortest double reproduces, so the
        // shortest form restores the literal.
        (JsonIndexType::Number, Value::Double(v)) => shortest_decimal(v.get()),
        (JsonIndexType::Number, _) if value.is_numeric() => {
            value.as_number().ok().map(Value::Number)
        }

        (JsonIndexType::String, Value::String(_))
        | (JsonIndexType::Boolean, Value::Boolean(_)) => Some(value.clone()),

        _ => None,
    };

    projected.ok_or_else(|| {
        CoreError::index_constraint(format!(
            "{} value {} cannot be indexed as {declared}",
            value.kind_label(),
            value.to_json_text()
        ))
    })
}

fn shortest_decimal(value: f64) -> Option<Value> {
    if !value.is_finite() {
        return None;
    }

    format!("{value:e}").parse::<Number>().ok().map(Value::Number)
}
