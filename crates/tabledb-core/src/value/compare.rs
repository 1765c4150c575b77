use crate::{
    error::{CoreError, ErrorOrigin},
    types::{Float64, Number},
    value::{Value, ValueEnum, canonical_rank},
};
use std::cmp::Ordering;

///
/// NumericRepr
///
/// Exact position of a numeric value on the extended number line.
/// Variant order is the comparison order: `-∞ < finite < +∞ < NaN`.
///

#[derive(Debug, Eq, Ord, PartialEq, PartialOrd)]
enum NumericRepr {
    NegInfinity,
    Finite(Number),
    PosInfinity,
    NaN,
}

impl NumericRepr {
    fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            Self::NaN
        } else if value == f64::INFINITY {
            Self::PosInfinity
        } else if value == f64::NEG_INFINITY {
            Self::NegInfinity
        } else {
            Number::from_f64_exact(value).map_or(Self::NaN, Self::Finite)
        }
    }

    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(v) => Some(Self::Finite(Number::from(*v))),
            Value::Long(v) => Some(Self::Finite(Number::from(*v))),
            Value::Float(v) => Some(Self::from_f64(f64::from(v.get()))),
            Value::Double(v) => Some(Self::from_f64(v.get())),
            Value::Number(v) => Some(Self::Finite(v.clone())),
            _ => None,
        }
    }
}

/// Semantic comparator.
///
/// Ordering rules:
/// 1. Any real value sorts before every sentinel; sentinels order as
///    `Empty < JsonNull < Null < Absent` and equal themselves.
/// 2. Numeric kinds compare by exact mathematical value.
/// 3. Enums of the same definition compare by ordinal. An enum and a
///    string are equal when the symbol matches; they have no other order.
/// 4. Same-kind values compare structurally.
///
/// Any other pair fails with a type mismatch.
pub fn compare(left: &Value, right: &Value) -> Result<Ordering, CoreError> {
    if left.is_sentinel() || right.is_sentinel() {
        return Ok(canonical_rank(left).cmp(&canonical_rank(right)));
    }
    if let Some(ordering) = numeric_cmp(left, right) {
        return Ok(ordering);
    }

    match (left, right) {
        (Value::String(a), Value::String(b)) => Ok(a.as_bytes().cmp(b.as_bytes())),
        (Value::Enum(a), Value::Enum(b)) => enum_cmp(a, b),
        (Value::Enum(a), Value::String(b)) | (Value::String(b), Value::Enum(a))
            if a.symbol() == b.as_str() =>
        {
            Ok(Ordering::Equal)
        }
        (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),
        (Value::Timestamp(a), Value::Timestamp(b)) => Ok(a.cmp(b)),
        (Value::FixedBinary(a), Value::FixedBinary(b)) | (Value::Binary(a), Value::Binary(b)) => {
            Ok(a.cmp(b))
        }
        (Value::Array(a), Value::Array(b)) => list_cmp(a, b),
        (Value::Map(a), Value::Map(b)) | (Value::Record(a), Value::Record(b)) => {
            entries_cmp(a, b)
        }
        _ => Err(CoreError::type_mismatch(
            ErrorOrigin::Compare,
            format!(
                "cannot compare {} with {}",
                left.kind_label(),
                right.kind_label()
            ),
        )),
    }
}

/// Total comparator used for key ordering.
///
/// Agrees with [`compare`] wherever that succeeds, except that an enum and
/// a string with the same symbol stay distinct: enums rank after strings.
/// Incomparable pairs fall back to canonical rank, then to the variant tag.
/// Never fails.
#[must_use]
pub fn compare_key_values(left: &Value, right: &Value) -> Ordering {
    let rank = canonical_rank(left).cmp(&canonical_rank(right));
    if rank != Ordering::Equal {
        return rank;
    }

    match (left, right) {
        (Value::Array(a), Value::Array(b)) => total_list_cmp(a, b),
        (Value::Map(a), Value::Map(b)) | (Value::Record(a), Value::Record(b)) => {
            total_entries_cmp(a, b)
        }
        (Value::Enum(a), Value::Enum(b)) if !a.same_definition(b) => a
            .symbol()
            .cmp(b.symbol())
            .then(a.ordinal().cmp(&b.ordinal()))
            .then_with(|| a.symbols().cmp(b.symbols())),
        _ => compare(left, right).unwrap_or_else(|_| left.tag().cmp(&right.tag())),
    }
}

// Exact numeric ordering; `None` unless both sides are numeric.
fn numeric_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    #[allow(clippy::match_same_arms)]
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Long(a), Value::Long(b)) => Some(a.cmp(b)),
        (Value::Integer(a), Value::Long(b)) => Some(i64::from(*a).cmp(b)),
        (Value::Long(a), Value::Integer(b)) => Some(a.cmp(&i64::from(*b))),
        (Value::Float(a), Value::Float(b)) => Some(a.cmp(b)),
        (Value::Double(a), Value::Double(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Double(b)) => Some(Float64::new(f64::from(a.get())).cmp(b)),
        (Value::Double(a), Value::Float(b)) => Some(a.cmp(&Float64::new(f64::from(b.get())))),
        (Value::Number(a), Value::Number(b)) => Some(a.cmp(b)),
        _ => {
            let left = NumericRepr::of(left)?;
            let right = NumericRepr::of(right)?;

            Some(left.cmp(&right))
        }
    }
}

fn enum_cmp(left: &ValueEnum, right: &ValueEnum) -> Result<Ordering, CoreError> {
    if !left.same_definition(right) {
        return Err(CoreError::type_mismatch(
            ErrorOrigin::Compare,
            format!(
                "cannot compare enum symbols '{}' and '{}' from different definitions",
                left.symbol(),
                right.symbol()
            ),
        ));
    }

    Ok(left.ordinal().cmp(&right.ordinal()))
}

fn list_cmp(left: &[Value], right: &[Value]) -> Result<Ordering, CoreError> {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = compare(left, right)?;
        if cmp != Ordering::Equal {
            return Ok(cmp);
        }
    }

    Ok(left.len().cmp(&right.len()))
}

fn entries_cmp(left: &[(String, Value)], right: &[(String, Value)]) -> Result<Ordering, CoreError> {
    for ((left_key, left_value), (right_key, right_value)) in left.iter().zip(right.iter()) {
        let key_cmp = left_key.cmp(right_key);
        if key_cmp != Ordering::Equal {
            return Ok(key_cmp);
        }

        let value_cmp = compare(left_value, right_value)?;
        if value_cmp != Ordering::Equal {
            return Ok(value_cmp);
        }
    }

    Ok(left.len().cmp(&right.len()))
}

fn total_list_cmp(left: &[Value], right: &[Value]) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = compare_key_values(left, right);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}

fn total_entries_cmp(left: &[(String, Value)], right: &[(String, Value)]) -> Ordering {
    for ((left_key, left_value), (right_key, right_value)) in left.iter().zip(right.iter()) {
        let key_cmp = left_key.cmp(right_key);
        if key_cmp != Ordering::Equal {
            return key_cmp;
        }

        let value_cmp = compare_key_values(left_value, right_value);
        if value_cmp != Ordering::Equal {
            return value_cmp;
        }
    }

    left.len().cmp(&right.len())
}
